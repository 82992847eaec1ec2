//! Network rule - default-network cleanup and implicit declarations

use crate::domain::entities::{Change, Document, NetworkDef, DEFAULT_NETWORK};
use crate::domain::ports::{Rule, RuleReport};
use crate::domain::value_objects::EngineSettings;

/// Network modes that mean "the implicit project network"
const DEFAULT_MODES: &[&str] = &["bridge", "default"];

#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkRule;

impl Rule for NetworkRule {
    fn name(&self) -> &'static str {
        "network"
    }

    fn description(&self) -> &'static str {
        "Drop default-bridge references and declare networks services join implicitly"
    }

    fn apply(&self, document: &mut Document, _settings: &EngineSettings, report: &mut RuleReport) {
        let mut undeclared: Vec<(String, String)> = Vec::new();
        let service_names: Vec<String> = document.services.keys().cloned().collect();

        for service in document.services.values_mut() {
            if service.networks.iter().any(|n| n == DEFAULT_NETWORK) {
                if service.networks.len() > 1 {
                    let index = service
                        .networks
                        .iter()
                        .position(|n| n == DEFAULT_NETWORK)
                        .unwrap_or(0);
                    report.change(Change::removed(
                        service.location(&format!("networks[{}]", index)),
                        DEFAULT_NETWORK,
                        "the default network is implied alongside explicit networks",
                    ));
                } else {
                    tracing::debug!(service = %service.name, "dropping lone default network");
                }
                service.networks.retain(|n| n != DEFAULT_NETWORK);
            }

            if let Some(mode) = service.network_mode.as_deref() {
                if DEFAULT_MODES.contains(&mode) {
                    tracing::debug!(service = %service.name, mode, "dropping default network mode");
                    service.network_mode = None;
                } else if let Some(owner) = mode.strip_prefix("service:") {
                    if !service_names.iter().any(|n| n == owner.trim()) {
                        report.error(format!(
                            "{}: joins the namespace of undefined service '{}'",
                            service.location("network_mode"),
                            owner.trim()
                        ));
                    }
                }
            }

            for network in &service.networks {
                if !document.networks.contains_key(network)
                    && !undeclared.iter().any(|(name, _)| name == network)
                {
                    undeclared.push((network.clone(), service.name.clone()));
                }
            }
        }

        for (network, service) in undeclared {
            let location = format!("networks.{}", network);
            report.change(Change::added(
                location.clone(),
                network.clone(),
                format!("network joined by services.{} was not declared", service),
            ));
            report.warn(format!(
                "{}: auto-declared with the default bridge driver",
                location
            ));
            document.networks.insert(network.clone(), NetworkDef::new(network));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChangeKind, Service};

    fn run(document: &mut Document) -> RuleReport {
        let mut report = RuleReport::new();
        NetworkRule.apply(document, &EngineSettings::default(), &mut report);
        report
    }

    #[test]
    fn lone_default_network_is_dropped_silently() {
        let mut doc = Document::new()
            .with_service(Service::new("web").with_image("nginx").with_network("default"));
        let report = run(&mut doc);
        assert!(doc.services["web"].networks.is_empty());
        assert!(report.is_empty());
        assert!(!doc.networks.contains_key("default"));
    }

    #[test]
    fn default_beside_explicit_network_is_recorded() {
        let mut doc = Document::new()
            .with_service(
                Service::new("web")
                    .with_image("nginx")
                    .with_network("default")
                    .with_network("front"),
            )
            .with_network(NetworkDef::new("front"));
        let report = run(&mut doc);
        assert_eq!(doc.services["web"].networks, vec!["front"]);
        assert_eq!(report.changes().len(), 1);
        assert_eq!(report.changes()[0].kind, ChangeKind::Removed);
        assert_eq!(report.changes()[0].location, "services.web.networks[0]");
    }

    #[test]
    fn undeclared_network_is_declared_once() {
        let mut doc = Document::new()
            .with_service(Service::new("a").with_image("x").with_network("backend"))
            .with_service(Service::new("b").with_image("x").with_network("backend"));
        let report = run(&mut doc);
        assert!(doc.networks.contains_key("backend"));
        assert_eq!(report.changes().len(), 1);
        assert_eq!(report.changes()[0].kind, ChangeKind::Added);
        assert_eq!(report.changes()[0].location, "networks.backend");
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn bridge_mode_is_dropped() {
        let mut service = Service::new("web").with_image("nginx");
        service.network_mode = Some("bridge".to_string());
        let mut doc = Document::new().with_service(service);
        run(&mut doc);
        assert_eq!(doc.services["web"].network_mode, None);
    }

    #[test]
    fn namespace_of_undefined_service_is_error() {
        let mut service = Service::new("sidecar").with_image("envoy");
        service.network_mode = Some("service:ghost".to_string());
        let mut doc = Document::new().with_service(service);
        let report = run(&mut doc);
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].contains("'ghost'"));
    }
}
