//! Translator - the Parse → Rules → Emit pipeline
//!
//! One `Translator` is built from `EngineSettings` and serves any number of
//! requests; it holds no per-request state.

use crate::domain::entities::{Document, TranslationResult};
use crate::domain::ports::{DiagnosticSeverity, Rule};
use crate::domain::rules::default_rules;
use crate::domain::services::RuleEngine;
use crate::domain::value_objects::{
    EngineSettings, FormatDescriptor, OutputFormat, RuleDescriptor,
};
use crate::error::PodshiftError;
use crate::infrastructure::emitters::get_emitter;
use crate::parser::parse_compose;

/// Orchestrates one translation per call
pub struct Translator {
    settings: EngineSettings,
    engine: RuleEngine,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl Translator {
    /// Translator running the full rule set
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_rules(settings, default_rules())
    }

    /// Translator running a custom rule list, in the given order
    pub fn with_rules(settings: EngineSettings, rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            settings,
            engine: RuleEngine::new(rules),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Translate Compose text into the format named by `format_id`.
    ///
    /// Never panics and never returns partial output: when `errors` is
    /// non-empty, `output` is empty.
    pub fn translate(&self, input: &str, format_id: &str) -> TranslationResult {
        let mut result = TranslationResult::new(format_id);

        let Some(document) = self.transform(input, &mut result) else {
            return result;
        };

        match format_id.parse::<OutputFormat>() {
            Ok(format) => self.emit(&document, format, &mut result),
            Err(err) => result.fail(err.to_string()),
        }

        if result.is_success() {
            tracing::info!(
                format = format_id,
                changes = result.changes.len(),
                warnings = result.warnings.len(),
                "translation complete"
            );
        }
        result
    }

    /// Translate into a known format
    pub fn translate_to(&self, input: &str, format: OutputFormat) -> TranslationResult {
        self.translate(input, format.id())
    }

    /// Parse and run the rules without emitting anything.
    ///
    /// The returned result has an empty `output_format`.
    pub fn check(&self, input: &str) -> TranslationResult {
        let mut result = TranslationResult::new("");
        let _ = self.transform(input, &mut result);
        result
    }

    /// Descriptors of the rules this translator runs, in order
    pub fn rules(&self) -> Vec<RuleDescriptor> {
        self.engine.descriptors()
    }

    /// Descriptors of every supported output format
    pub fn formats(&self) -> Vec<FormatDescriptor> {
        format_descriptors()
    }

    fn transform(&self, input: &str, result: &mut TranslationResult) -> Option<Document> {
        tracing::debug!(bytes = input.len(), "parsing compose document");
        let parsed = match parse_compose(input) {
            Ok(parsed) => parsed,
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "parse failed");
                for error in errors {
                    result.fail(error.to_string());
                }
                return None;
            }
        };

        let mut document = parsed.document;
        result.warnings.extend(parsed.warnings);

        tracing::debug!(services = document.services.len(), "running rules");
        let outcome = self.engine.run(&mut document, &self.settings);
        let blocked = outcome.is_blocked();
        result.changes.extend(outcome.changes);
        result.warnings.extend(outcome.warnings);

        if blocked {
            tracing::warn!(
                errors = outcome.errors.len(),
                "blocking rule errors; emission skipped"
            );
            for error in outcome.errors {
                result.fail(error.to_string());
            }
            return None;
        }

        Some(document)
    }

    fn emit(&self, document: &Document, format: OutputFormat, result: &mut TranslationResult) {
        let emitter = get_emitter(format);

        for diagnostic in emitter.diagnose(document, &self.settings) {
            match diagnostic.severity {
                DiagnosticSeverity::Warning => result.warnings.push(diagnostic.message),
                DiagnosticSeverity::Error => result.fail(
                    PodshiftError::Emission {
                        format: format.id().to_string(),
                        message: diagnostic.message,
                    }
                    .to_string(),
                ),
            }
        }
        if !result.is_success() {
            return;
        }

        tracing::debug!(format = format.id(), "emitting");
        match emitter.emit(document, &self.settings) {
            Ok(output) => result.set_output(output),
            Err(err) => result.fail(
                PodshiftError::Emission {
                    format: format.id().to_string(),
                    message: err.to_string(),
                }
                .to_string(),
            ),
        }
    }
}

/// Rule descriptors of the default rule set, in execution order
pub fn rule_descriptors() -> Vec<RuleDescriptor> {
    default_rules().iter().map(|r| r.descriptor()).collect()
}

/// Descriptors of every supported output format
pub fn format_descriptors() -> Vec<FormatDescriptor> {
    OutputFormat::ALL
        .iter()
        .map(|f| get_emitter(*f).descriptor())
        .collect()
}
