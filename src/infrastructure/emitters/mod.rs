//! Emitters
//!
//! Implementations of the `Emitter` port, one per output format.

pub mod compose;
pub mod escaping;
pub mod kube;
pub mod quadlet;

pub use compose::ComposeEmitter;
pub use kube::KubeEmitter;
pub use quadlet::QuadletEmitter;

use crate::domain::ports::Emitter;
use crate::domain::value_objects::OutputFormat;

/// Every emitter, in discovery order
pub fn all_emitters() -> Vec<Box<dyn Emitter>> {
    OutputFormat::ALL.iter().map(|f| get_emitter(*f)).collect()
}

/// Emitter for one format
pub fn get_emitter(format: OutputFormat) -> Box<dyn Emitter> {
    match format {
        OutputFormat::PodmanCompose => Box::new(ComposeEmitter::new()),
        OutputFormat::Quadlet => Box::new(QuadletEmitter::new()),
        OutputFormat::Kube => Box::new(KubeEmitter::new()),
    }
}
