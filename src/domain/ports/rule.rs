//! Rule port - one named, ordered transformation step
//!
//! A rule inspects the Document, optionally rewrites it, and reports what it
//! did through a [`RuleReport`].

use crate::domain::entities::{Change, Document};
use crate::domain::value_objects::{EngineSettings, RuleDescriptor};

/// A transformation rule
///
/// Rules are stateless; one instance serves any number of concurrent
/// translations.
pub trait Rule: Send + Sync {
    /// Stable identifier (kebab-case)
    fn name(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Errors from a blocking rule stop emission; errors from other rules
    /// are downgraded to warnings.
    fn is_blocking(&self) -> bool {
        false
    }

    /// Inspect and rewrite the document, recording every effect in `report`
    fn apply(&self, document: &mut Document, settings: &EngineSettings, report: &mut RuleReport);

    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            name: self.name(),
            description: self.description(),
        }
    }
}

/// Sink for the effects of one rule run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleReport {
    changes: Vec<Change>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl RuleReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn change(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Split into (changes, warnings, errors)
    pub fn into_parts(self) -> (Vec<Change>, Vec<String>, Vec<String>) {
        (self.changes, self.warnings, self.errors)
    }
}
