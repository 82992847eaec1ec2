//! Engine settings - immutable knobs shared by rules and emitters

/// Path of the Podman API socket on a rootful host
pub const ROOTFUL_PODMAN_SOCKET: &str = "/run/podman/podman.sock";

/// Default pod name when the document carries no project name
pub const DEFAULT_POD_NAME: &str = "compose";

/// Host path prefixes a pod manifest may mount without a warning
pub const DEFAULT_HOST_PATH_ALLOWLIST: &[&str] = &[
    "/srv",
    "/opt",
    "/var/lib",
    "/mnt",
    "/data",
    "/home",
    "/run/podman",
    "/run/user",
];

/// Settings one `Translator` is built with
///
/// Constructed from configuration once and passed by reference; never
/// mutated during a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Host path replacing the Docker control socket
    pub podman_socket: String,
    /// Whether translated artifacts are meant to run rootless
    pub rootless: bool,
    /// `WantedBy=` target of generated units
    pub wanted_by: String,
    pub pod_name: String,
    pub host_path_allowlist: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            podman_socket: ROOTFUL_PODMAN_SOCKET.to_string(),
            rootless: true,
            wanted_by: "default.target".to_string(),
            pod_name: DEFAULT_POD_NAME.to_string(),
            host_path_allowlist: DEFAULT_HOST_PATH_ALLOWLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EngineSettings {
    /// Whether the socket path is one a rootless Podman actually serves
    pub fn socket_is_rootless(&self) -> bool {
        self.podman_socket.starts_with("/run/user/")
            || self.podman_socket.starts_with("%t/")
            || self.podman_socket.starts_with("$XDG_RUNTIME_DIR")
    }

    /// Whether a host path falls under the allow-list
    pub fn host_path_allowed(&self, path: &str) -> bool {
        self.host_path_allowlist.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
