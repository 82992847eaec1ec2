//! Rule engine - runs the ordered rule set over a Document

use crate::domain::entities::{Change, Document};
use crate::domain::ports::{Rule, RuleReport};
use crate::domain::rules::default_rules;
use crate::domain::value_objects::{EngineSettings, RuleDescriptor};
use crate::error::PodshiftError;

/// Everything the rule pass produced
#[derive(Debug, Default)]
pub struct RuleOutcome {
    pub changes: Vec<Change>,
    pub warnings: Vec<String>,
    /// Errors from blocking rules; any entry suppresses emission
    pub errors: Vec<PodshiftError>,
}

impl RuleOutcome {
    pub fn is_blocked(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Applies rules in a fixed order
///
/// Every rule sees the document as left by its predecessors. All rules run
/// even after a blocking error so the caller gets the complete picture.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl RuleEngine {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(|r| r.descriptor()).collect()
    }

    pub fn run(&self, document: &mut Document, settings: &EngineSettings) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        for rule in &self.rules {
            let mut report = RuleReport::new();
            rule.apply(document, settings, &mut report);

            let (changes, warnings, errors) = report.into_parts();
            tracing::debug!(
                rule = rule.name(),
                changes = changes.len(),
                warnings = warnings.len(),
                errors = errors.len(),
                "rule applied"
            );

            outcome.changes.extend(changes);
            outcome.warnings.extend(warnings);

            for message in errors {
                if rule.is_blocking() {
                    tracing::warn!(rule = rule.name(), %message, "blocking rule error");
                    outcome.errors.push(PodshiftError::blocking(rule.name(), message));
                } else {
                    outcome
                        .warnings
                        .push(format!("{}: {}", rule.name(), message));
                }
            }
        }

        outcome
    }
}
