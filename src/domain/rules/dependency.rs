//! Dependency-ordering rule - turn `depends_on` into a startup plan

use indexmap::IndexMap;

use crate::domain::entities::{Document, ServiceOrdering, StartupPlan};
use crate::domain::ports::{Rule, RuleReport};
use crate::domain::services::DependencyGraph;
use crate::domain::value_objects::{DependencyCondition, EngineSettings};

/// Validates `depends_on` edges and records the startup plan on the document.
///
/// Undefined dependencies and cycles are blocking errors; no plan is set
/// when either is found.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyOrderingRule;

impl Rule for DependencyOrderingRule {
    fn name(&self) -> &'static str {
        "dependency-ordering"
    }

    fn description(&self) -> &'static str {
        "Resolve depends_on into start ordering; reject cycles and undefined services"
    }

    fn is_blocking(&self) -> bool {
        true
    }

    fn apply(&self, document: &mut Document, _settings: &EngineSettings, report: &mut RuleReport) {
        let mut valid = true;

        for service in document.services.values() {
            for dep in &service.depends_on {
                let location = service.location(&format!("depends_on.{}", dep.service));
                if !document.services.contains_key(&dep.service) {
                    report.error(format!(
                        "{}: '{}' is not a defined service",
                        location, dep.service
                    ));
                    valid = false;
                    continue;
                }
                if dep.condition == DependencyCondition::Healthy {
                    report.warn(format!(
                        "{}: service_healthy is enforced as start ordering only; the \
                         dependency's healthcheck is not awaited",
                        location
                    ));
                }
            }
        }

        let graph = DependencyGraph::from_document(document);
        let order = match graph.topological_order() {
            Ok(order) => order,
            Err(cycle) => {
                report.error(format!("dependency cycle detected: {}", cycle.join(" -> ")));
                return;
            }
        };

        if !valid {
            return;
        }

        let mut services: IndexMap<String, ServiceOrdering> = IndexMap::new();
        let mut run_to_completion: Vec<String> = Vec::new();

        for service in document.services.values() {
            let mut ordering = ServiceOrdering::default();
            for dep in &service.depends_on {
                if ordering.after.contains(&dep.service) {
                    continue;
                }
                ordering.after.push(dep.service.clone());
                if dep.required {
                    ordering.requires.push(dep.service.clone());
                } else {
                    ordering.wants.push(dep.service.clone());
                }
                if dep.condition == DependencyCondition::CompletedSuccessfully
                    && !run_to_completion.contains(&dep.service)
                {
                    run_to_completion.push(dep.service.clone());
                }
            }
            services.insert(service.name.clone(), ordering);
        }

        // Keep run-to-completion services in start order
        run_to_completion.sort_by_key(|name| order.iter().position(|o| o == name));

        tracing::debug!(order = ?order, "startup order resolved");
        document.startup = Some(StartupPlan {
            order,
            services,
            run_to_completion,
        });
    }
}
