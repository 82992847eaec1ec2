//! Domain Ports (Interfaces)
//!
//! The two capabilities the pipeline is polymorphic over: rules rewrite a
//! Document, emitters render it.

pub mod emitter;
pub mod rule;

pub use emitter::{
    opaque_key_diagnostics, DiagnosticSeverity, EmitError, Emitter, EmitterDiagnostic,
};
pub use rule::{Rule, RuleReport};
