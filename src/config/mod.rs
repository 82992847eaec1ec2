//! Configuration module for Podshift
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PODSHIFT_*)
//! 3. Explicit `--config` file, else project `podshift.toml`
//! 4. User config (`<config dir>/podshift/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;
pub use loader::{user_config_path, PROJECT_CONFIG_FILE};
pub use types::{Config, KubeConfig, OutputConfig, PodmanConfig, QuadletConfig};
