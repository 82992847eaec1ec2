//! Podshift - Docker Compose to Podman translation engine
//!
//! Podshift parses a Compose document, runs an ordered set of rewrite rules
//! that resolve Docker-to-Podman incompatibilities, and emits one of three
//! Podman-native artifacts: a podman-compose file, Quadlet container units,
//! or a single-pod manifest for `podman kube play`.
//!
//! ```
//! use podshift::Translator;
//!
//! let result = Translator::default().translate("services:\n  web:\n    image: nginx\n", "quadlet");
//! assert!(result.is_success());
//! assert!(result.output.contains("Image=nginx"));
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod parser;

// Re-exports for convenience
pub use application::{format_descriptors, rule_descriptors, Translator};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{Change, ChangeKind, Document, Service, TranslationResult};
pub use domain::ports::{Emitter, Rule, RuleReport};
pub use domain::value_objects::{EngineSettings, FormatDescriptor, OutputFormat, RuleDescriptor};
pub use error::{PodshiftError, PodshiftResult};
pub use infrastructure::{all_emitters, get_emitter};
pub use parser::{parse_compose, ParsedDocument};
