//! Volume mount value object

use std::fmt;

/// How a mount source is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountKind {
    /// A named volume managed by the container engine
    Named,
    /// A host path bind-mounted into the container
    Bind,
    /// An unnamed volume created per container
    Anonymous,
}

impl MountKind {
    /// Classify a short-syntax mount source.
    ///
    /// Paths (absolute, relative, home-relative or variable-prefixed) are
    /// binds; anything else names a volume.
    pub fn classify(source: &str) -> Self {
        if source.is_empty() {
            MountKind::Anonymous
        } else if source.starts_with('/')
            || source.starts_with('.')
            || source.starts_with('~')
            || source.starts_with('$')
        {
            MountKind::Bind
        } else {
            MountKind::Named
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MountKind::Named => "volume",
            MountKind::Bind => "bind",
            MountKind::Anonymous => "anonymous",
        }
    }
}

/// A volume mount declared by a service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeMount {
    /// Volume name or host path; `None` for anonymous volumes
    pub source: Option<String>,
    /// Path inside the container
    pub target: String,
    pub read_only: bool,
    pub kind: MountKind,
    /// Mode flags other than `ro`/`rw` (`z`, `Z`, `cached`, ...)
    pub options: Vec<String>,
}

impl VolumeMount {
    /// Build a mount from a source, classifying its kind
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let kind = MountKind::classify(&source);
        Self {
            source: if kind == MountKind::Anonymous {
                None
            } else {
                Some(source)
            },
            target: target.into(),
            read_only: false,
            kind,
            options: Vec::new(),
        }
    }

    pub fn anonymous(target: impl Into<String>) -> Self {
        Self {
            source: None,
            target: target.into(),
            read_only: false,
            kind: MountKind::Anonymous,
            options: Vec::new(),
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Mode suffix (`ro`, `ro,z`, ...) or `None` when nothing needs stating
    pub fn mode(&self) -> Option<String> {
        let mut flags = Vec::new();
        if self.read_only {
            flags.push("ro".to_string());
        }
        flags.extend(self.options.iter().cloned());
        if flags.is_empty() {
            None
        } else {
            Some(flags.join(","))
        }
    }
}

impl fmt::Display for VolumeMount {
    /// Renders the short Compose syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}:{}", source, self.target)?,
            None => write!(f, "{}", self.target)?,
        }
        if self.source.is_some() {
            if let Some(mode) = self.mode() {
                write!(f, ":{}", mode)?;
            }
        }
        Ok(())
    }
}
