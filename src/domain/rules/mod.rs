//! Transformation Rules
//!
//! Each rule rewrites one concern of a Compose document into its Podman
//! equivalent. [`default_rules`] returns them in the order they must run:
//!
//! 1. `socket` - Docker control socket → Podman socket
//! 2. `restart` - `unless-stopped` → `always`
//! 3. `dependency-ordering` - `depends_on` → startup plan (blocking)
//! 4. `network` - default network cleanup, auto-declared networks
//! 5. `volume` - anonymous volume naming, auto-declared volumes
//! 6. `unsupported-keys` - build/deploy/profiles/... removal (blocking)

mod dependency;
mod network;
mod restart;
mod socket;
mod unsupported;
mod volume;

pub use dependency::DependencyOrderingRule;
pub use network::NetworkRule;
pub use restart::RestartRule;
pub use socket::{SocketRule, CONTAINER_SOCKET_PATH, DOCKER_SOCKET_PATHS, SOCKET_REASON};
pub use unsupported::{UnsupportedKeysRule, UNSUPPORTED_KEYS};
pub use volume::VolumeRule;

use serde_yaml_ng::Value;

use crate::domain::ports::Rule;

/// The full rule set, in execution order
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(SocketRule),
        Box::new(RestartRule),
        Box::new(DependencyOrderingRule),
        Box::new(NetworkRule),
        Box::new(VolumeRule),
        Box::new(UnsupportedKeysRule),
    ]
}

/// Compact single-line rendering of a retained value for the change log
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| "<complex value>".to_string()),
    }
}
