//! Discovery metadata for rules and formats

use serde::Serialize;

/// Name and description of one transformation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

/// Identifier, name and description of one output format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}
