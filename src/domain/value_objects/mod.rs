//! Domain Value Objects
//!
//! Immutable, self-validating pieces of a Compose service definition.

pub mod command;
pub mod config_warning;
pub mod dependency;
pub mod descriptor;
pub mod format;
pub mod mount;
pub mod port;
pub mod restart;
pub mod settings;

pub use command::{duration_seconds, split_words, CommandLine, Healthcheck};
pub use config_warning::ConfigWarning;
pub use dependency::{Dependency, DependencyCondition};
pub use descriptor::{FormatDescriptor, RuleDescriptor};
pub use format::OutputFormat;
pub use mount::{MountKind, VolumeMount};
pub use port::{PortMapping, Protocol};
pub use restart::RestartPolicy;
pub use settings::{EngineSettings, DEFAULT_POD_NAME, ROOTFUL_PODMAN_SOCKET};
