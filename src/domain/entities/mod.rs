//! Domain Entities
//!
//! - `Document` - the canonical deployment model (services, volumes, networks)
//! - `Service` - one container definition
//! - `Change` - one entry of the change log
//! - `TranslationResult` - what a translation request returns

mod change;
mod document;
mod service;
mod translation_result;

pub use change::{Change, ChangeKind};
pub use document::{
    Document, NetworkDef, ServiceOrdering, StartupPlan, VolumeDef, DEFAULT_NETWORK,
    DEFAULT_NETWORK_DRIVER, DEFAULT_VOLUME_DRIVER,
};
pub use service::Service;
pub use translation_result::TranslationResult;
