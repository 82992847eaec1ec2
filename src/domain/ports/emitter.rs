//! Emitter port - renders a transformed Document into one target format
//!
//! `emit` is pure: it never reports changes or warnings. Anything a format
//! cannot carry is reported up front by `diagnose`, which the orchestrator
//! runs before emission.

use crate::domain::entities::Document;
use crate::domain::value_objects::{EngineSettings, FormatDescriptor, OutputFormat};

/// Severity of an emitter diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

/// A construct the target format cannot represent faithfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterDiagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
}

impl EmitterDiagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: message.into(),
        }
    }
}

/// Error raised while rendering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("serialization failed: {message}")]
    Serialization { message: String },

    #[error("invariant violated: {message}")]
    Invariant { message: String },
}

/// A renderer for one output format
pub trait Emitter: Send + Sync {
    fn format(&self) -> OutputFormat;

    /// Render the document as target-format text
    fn emit(&self, document: &Document, settings: &EngineSettings) -> Result<String, EmitError>;

    /// Report what `emit` will lose or approximate
    fn diagnose(&self, document: &Document, settings: &EngineSettings) -> Vec<EmitterDiagnostic> {
        let _ = settings;
        opaque_key_diagnostics(self.format(), document)
    }

    fn descriptor(&self) -> FormatDescriptor {
        let format = self.format();
        FormatDescriptor {
            id: format.id(),
            name: format.display_name(),
            description: format.description(),
        }
    }
}

/// Warnings for retained keys a format cannot carry
pub fn opaque_key_diagnostics(format: OutputFormat, document: &Document) -> Vec<EmitterDiagnostic> {
    if format.carries_opaque_keys() {
        return Vec::new();
    }

    let mut diagnostics: Vec<EmitterDiagnostic> = document
        .extensions
        .keys()
        .map(|key| {
            EmitterDiagnostic::warning(format!(
                "top-level key '{}' has no {} equivalent and was dropped",
                key,
                format.id()
            ))
        })
        .collect();

    for service in document.services.values() {
        for key in service.extras.keys() {
            diagnostics.push(EmitterDiagnostic::warning(format!(
                "{} has no {} equivalent and was dropped",
                service.location(key),
                format.id()
            )));
        }
    }

    diagnostics
}
