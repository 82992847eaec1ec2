//! Service dependency value object (`depends_on` entries)

/// Condition under which a dependency counts as satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DependencyCondition {
    #[default]
    Started,
    Healthy,
    CompletedSuccessfully,
}

impl DependencyCondition {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "service_started" => Some(DependencyCondition::Started),
            "service_healthy" => Some(DependencyCondition::Healthy),
            "service_completed_successfully" => Some(DependencyCondition::CompletedSuccessfully),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyCondition::Started => "service_started",
            DependencyCondition::Healthy => "service_healthy",
            DependencyCondition::CompletedSuccessfully => "service_completed_successfully",
        }
    }
}

/// One `depends_on` edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    /// Name of the service depended upon
    pub service: String,
    pub condition: DependencyCondition,
    /// Optional dependencies only order startup; they never fail it
    pub required: bool,
}

impl Dependency {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            condition: DependencyCondition::Started,
            required: true,
        }
    }

    pub fn with_condition(mut self, condition: DependencyCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// True when the short list syntax can express this edge
    pub fn is_plain(&self) -> bool {
        self.condition == DependencyCondition::Started && self.required
    }
}
