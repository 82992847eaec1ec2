//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    ConfigWarning, EngineSettings, OutputFormat, DEFAULT_POD_NAME, ROOTFUL_PODMAN_SOCKET,
};
use crate::error::PodshiftResult;

use super::loader;

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when the command line does not name one
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::PodmanCompose
}

/// Podman host assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodmanConfig {
    /// Host path of the Podman API socket
    #[serde(default = "default_socket_path")]
    pub socket_path: String,

    #[serde(default = "default_true")]
    pub rootless: bool,
}

impl Default for PodmanConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            rootless: true,
        }
    }
}

fn default_socket_path() -> String {
    ROOTFUL_PODMAN_SOCKET.to_string()
}

fn default_true() -> bool {
    true
}

/// Quadlet unit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadletConfig {
    #[serde(default = "default_wanted_by")]
    pub wanted_by: String,
}

impl Default for QuadletConfig {
    fn default() -> Self {
        Self {
            wanted_by: default_wanted_by(),
        }
    }
}

fn default_wanted_by() -> String {
    "default.target".to_string()
}

/// Pod manifest settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubeConfig {
    /// Pod name when the document has no top-level `name`
    #[serde(default = "default_pod_name")]
    pub pod_name: String,

    /// Host path prefixes that bind mounts may use without a warning
    #[serde(default = "default_allowlist")]
    pub host_path_allowlist: Vec<String>,
}

impl Default for KubeConfig {
    fn default() -> Self {
        Self {
            pod_name: default_pod_name(),
            host_path_allowlist: default_allowlist(),
        }
    }
}

fn default_pod_name() -> String {
    DEFAULT_POD_NAME.to_string()
}

fn default_allowlist() -> Vec<String> {
    EngineSettings::default().host_path_allowlist
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub podman: PodmanConfig,

    #[serde(default)]
    pub quadlet: QuadletConfig,

    #[serde(default)]
    pub kube: KubeConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PodshiftResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PodshiftResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, the project file, the user file, or
    /// defaults; environment overrides are applied last.
    pub fn load_layered(
        explicit: Option<&Path>,
        project_root: &Path,
    ) -> PodshiftResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(explicit, project_root)
    }

    /// Apply environment variable overrides (PODSHIFT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Settings one translator is built with
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            podman_socket: self.podman.socket_path.clone(),
            rootless: self.podman.rootless,
            wanted_by: self.quadlet.wanted_by.clone(),
            pod_name: self.kube.pod_name.clone(),
            host_path_allowlist: self.kube.host_path_allowlist.clone(),
        }
    }
}
