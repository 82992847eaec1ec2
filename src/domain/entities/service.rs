//! Service entity - one container definition inside a Document

use indexmap::IndexMap;
use serde_yaml_ng::Value;

use crate::domain::value_objects::{
    CommandLine, Dependency, Healthcheck, PortMapping, RestartPolicy, VolumeMount,
};

/// A service declared under `services:`
///
/// Shorthand forms are already normalized: ports are structured triples,
/// mounts are classified, list-form environments are mappings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Service {
    /// Unique, non-empty key in the Document
    pub name: String,
    pub image: Option<String>,
    /// Raw `build` directive; only observed so it can be removed
    pub build: Option<Value>,
    pub ports: Vec<PortMapping>,
    pub volumes: Vec<VolumeMount>,
    /// Variable name → value; inherited variables carry an empty value
    pub environment: IndexMap<String, String>,
    pub depends_on: Vec<Dependency>,
    pub restart: Option<RestartPolicy>,
    pub labels: IndexMap<String, String>,
    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
    pub privileged: bool,
    pub devices: Vec<String>,
    pub healthcheck: Option<Healthcheck>,
    pub command: Option<CommandLine>,
    pub entrypoint: Option<CommandLine>,
    /// Networks the service joins, in declaration order
    pub networks: Vec<String>,
    pub network_mode: Option<String>,
    pub container_name: Option<String>,
    /// Keys the model does not understand, kept verbatim
    pub extras: IndexMap<String, Value>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: set the image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_port(mut self, port: PortMapping) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_volume(mut self, mount: VolumeMount) -> Self {
        self.volumes.push(mount);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.depends_on.push(dependency);
        self
    }

    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = Some(restart);
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.networks.push(network.into());
        self
    }

    /// True when the service has an image to run without a build step
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|i| !i.trim().is_empty())
    }

    /// Service whose network namespace this one joins (`network_mode: service:<name>`)
    pub fn shared_namespace_owner(&self) -> Option<&str> {
        self.network_mode
            .as_deref()
            .and_then(|mode| mode.strip_prefix("service:"))
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Location path of a field on this service (e.g. `services.web.volumes[1]`)
    pub fn location(&self, field: &str) -> String {
        format!("services.{}.{}", self.name, field)
    }
}
