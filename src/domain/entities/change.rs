//! Change entity - one recorded mutation or flagged gap

use serde::Serialize;

/// What a rule did to the field at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
    /// The construct was kept or dropped but cannot be translated faithfully
    Warning,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Modified => write!(f, "modified"),
            ChangeKind::Removed => write!(f, "removed"),
            ChangeKind::Warning => write!(f, "warning"),
        }
    }
}

/// One entry of the change log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Path of the affected field, e.g. `services.web.volumes[1]`
    pub location: String,
    /// Textual form before the change; empty when added
    pub original: String,
    /// Textual form after the change; empty when removed
    pub transformed: String,
    pub reason: String,
}

impl Change {
    pub fn added(
        location: impl Into<String>,
        transformed: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Added,
            location: location.into(),
            original: String::new(),
            transformed: transformed.into(),
            reason: reason.into(),
        }
    }

    pub fn modified(
        location: impl Into<String>,
        original: impl Into<String>,
        transformed: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Modified,
            location: location.into(),
            original: original.into(),
            transformed: transformed.into(),
            reason: reason.into(),
        }
    }

    pub fn removed(
        location: impl Into<String>,
        original: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Removed,
            location: location.into(),
            original: original.into(),
            transformed: String::new(),
            reason: reason.into(),
        }
    }

    pub fn warning(
        location: impl Into<String>,
        original: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Warning,
            location: location.into(),
            original: original.into(),
            transformed: String::new(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_change_has_empty_original() {
        let change = Change::added("volumes.data", "data", "auto-declared");
        assert_eq!(change.kind, ChangeKind::Added);
        assert!(change.original.is_empty());
    }

    #[test]
    fn serializes_kind_as_type() {
        let change = Change::modified("services.web.restart", "unless-stopped", "always", "r");
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["type"], "modified");
        assert_eq!(json["location"], "services.web.restart");
        assert_eq!(json["transformed"], "always");
    }
}
