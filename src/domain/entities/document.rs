//! Document entity - the canonical multi-service deployment model
//!
//! A Document is built fresh for every translation, mutated only by the
//! rule engine, and dropped after emission.

use indexmap::IndexMap;
use serde_yaml_ng::Value;

use super::service::Service;

/// Default driver of a top-level volume
pub const DEFAULT_VOLUME_DRIVER: &str = "local";
/// Default driver of a top-level network
pub const DEFAULT_NETWORK_DRIVER: &str = "bridge";
/// Name Compose gives the implicit project network
pub const DEFAULT_NETWORK: &str = "default";

/// A top-level volume declaration
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeDef {
    pub name: String,
    pub driver: String,
    pub driver_opts: IndexMap<String, String>,
    pub external: bool,
}

impl VolumeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: DEFAULT_VOLUME_DRIVER.to_string(),
            driver_opts: IndexMap::new(),
            external: false,
        }
    }

    /// True when nothing beyond the name needs stating
    pub fn is_default(&self) -> bool {
        self.driver == DEFAULT_VOLUME_DRIVER && self.driver_opts.is_empty() && !self.external
    }
}

/// A top-level network declaration
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDef {
    pub name: String,
    pub driver: String,
    pub external: bool,
}

impl NetworkDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: DEFAULT_NETWORK_DRIVER.to_string(),
            external: false,
        }
    }
}

/// Startup ordering derived from `depends_on`, consumed by emitters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StartupPlan {
    /// Services in dependency order (dependencies first, ties in document order)
    pub order: Vec<String>,
    /// Per-service ordering hints, keyed by service name
    pub services: IndexMap<String, ServiceOrdering>,
    /// Services that run to completion before their dependents start
    pub run_to_completion: Vec<String>,
}

impl StartupPlan {
    pub fn ordering(&self, service: &str) -> Option<&ServiceOrdering> {
        self.services.get(service)
    }
}

/// Ordering hints for one service
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceOrdering {
    /// Start after these services
    pub after: Vec<String>,
    /// Fail if these services fail
    pub requires: Vec<String>,
    /// Start these services too, without failing on them
    pub wants: Vec<String>,
}

/// Canonical, format-agnostic deployment model
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Format version tag, recorded but not validated
    pub version: Option<String>,
    /// Project name (top-level `name`)
    pub name: Option<String>,
    pub services: IndexMap<String, Service>,
    pub volumes: IndexMap<String, VolumeDef>,
    pub networks: IndexMap<String, NetworkDef>,
    /// Top-level keys the model does not understand, kept verbatim
    pub extensions: IndexMap<String, Value>,
    /// Original key order of each service mapping
    pub layout: IndexMap<String, Vec<String>>,
    /// Filled in by the dependency-ordering rule
    pub startup: Option<StartupPlan>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a service, keyed by its name
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.insert(service.name.clone(), service);
        self
    }

    pub fn with_volume(mut self, volume: VolumeDef) -> Self {
        self.volumes.insert(volume.name.clone(), volume);
        self
    }

    pub fn with_network(mut self, network: NetworkDef) -> Self {
        self.networks.insert(network.name.clone(), network);
        self
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Services in startup order when a plan exists, document order otherwise
    pub fn services_in_start_order(&self) -> Vec<&Service> {
        match &self.startup {
            Some(plan) if plan.order.len() == self.services.len() => plan
                .order
                .iter()
                .filter_map(|name| self.services.get(name))
                .collect(),
            _ => self.services.values().collect(),
        }
    }

    /// Original key order for a service, if it was parsed from text
    pub fn key_order(&self, service: &str) -> &[String] {
        self.layout.get(service).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Groups of services sharing one network namespace, in document order.
    ///
    /// Each group is rooted at the service that owns the namespace; only
    /// groups with two or more members are returned.
    pub fn namespace_groups(&self) -> Vec<Vec<String>> {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
        for service in self.services.values() {
            let root = self.namespace_root(&service.name);
            groups.entry(root).or_default().push(service.name.clone());
        }
        groups
            .into_values()
            .filter(|members| members.len() > 1)
            .collect()
    }

    /// Follow `service:` network modes to the namespace owner
    pub fn namespace_root(&self, service: &str) -> String {
        let mut current = service.to_string();
        // Bounded walk: a malformed chain must not loop forever
        for _ in 0..=self.services.len() {
            match self
                .services
                .get(&current)
                .and_then(Service::shared_namespace_owner)
            {
                Some(owner) if self.services.contains_key(owner) && owner != current => {
                    current = owner.to_string();
                }
                _ => break,
            }
        }
        current
    }
}
