//! Output format value object - which Podman-native artifact to emit

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PodshiftError;

/// Target format for translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Compose file consumable by podman-compose
    #[serde(alias = "compose")]
    #[value(alias = "compose")]
    PodmanCompose,
    /// systemd container units run by Quadlet
    Quadlet,
    /// Single-pod manifest for `podman kube play`
    #[serde(alias = "kubernetes")]
    #[value(alias = "kubernetes")]
    Kube,
}

impl OutputFormat {
    /// Every supported format, in discovery order
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::PodmanCompose,
        OutputFormat::Quadlet,
        OutputFormat::Kube,
    ];

    /// Stable identifier used on the wire and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            OutputFormat::PodmanCompose => "podman-compose",
            OutputFormat::Quadlet => "quadlet",
            OutputFormat::Kube => "kube",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputFormat::PodmanCompose => "Podman Compose",
            OutputFormat::Quadlet => "Quadlet",
            OutputFormat::Kube => "Kubernetes Pod",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::PodmanCompose => {
                "Compose file for podman-compose, structurally equivalent to the input"
            }
            OutputFormat::Quadlet => {
                "systemd .container units, one per service, managed by Quadlet"
            }
            OutputFormat::Kube => "Single pod manifest for `podman kube play`",
        }
    }

    /// Whether this format can carry keys the engine does not model
    pub fn carries_opaque_keys(&self) -> bool {
        matches!(self, OutputFormat::PodmanCompose)
    }
}

impl FromStr for OutputFormat {
    type Err = PodshiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "podman-compose" | "compose" => Ok(OutputFormat::PodmanCompose),
            "quadlet" => Ok(OutputFormat::Quadlet),
            "kube" | "kubernetes" => Ok(OutputFormat::Kube),
            _ => Err(PodshiftError::UnknownFormat { id: s.to_string() }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
