//! Application Layer
//!
//! Orchestrates the Parse → Rules → Emit pipeline. Depends on the domain
//! layer for rules and on infrastructure for emitters; holds no rules of
//! its own.

pub mod translator;

pub use translator::{format_descriptors, rule_descriptors, Translator};
