//! TranslationResult entity - what one translation request returns

use serde::Serialize;

use super::change::{Change, ChangeKind};

/// Outcome of a translation request
///
/// Invariant: when `errors` is non-empty, `output` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub output: String,
    /// Echo of the requested format id
    pub output_format: String,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub changes: Vec<Change>,
}

impl TranslationResult {
    pub fn new(output_format: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            output_format: output_format.into(),
            warnings: Vec::new(),
            errors: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Record a fatal error; clears any output already set
    pub fn fail(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.output.clear();
    }

    /// Set the output unless the result already failed
    pub fn set_output(&mut self, output: String) {
        if self.errors.is_empty() {
            self.output = output;
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of changes of the given kind
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    /// Changes whose location starts with `prefix`
    pub fn changes_at<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Change> + 'a {
        self.changes
            .iter()
            .filter(move |c| c.location.starts_with(prefix))
    }
}
