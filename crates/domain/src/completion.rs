//! Completion candidates for content assist

use serde::Serialize;

/// Source category of a candidate, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionCategory {
    /// Variables of the owning instance.
    Instance,
    /// Variables of the system the instance belongs to.
    System,
    /// Parameters of the current process.
    Process,
    /// Parameters of other processes in the same instance.
    OtherProcess,
    /// Deployment path constants.
    Path,
    /// Computed special constants.
    Special,
    /// Caller-supplied environment values.
    Environment,
    /// Operating system selectors.
    OsSelector,
}

impl CompletionCategory {
    /// All categories, in presentation order.
    pub const ALL: [Self; 8] = [
        Self::Instance,
        Self::System,
        Self::Process,
        Self::OtherProcess,
        Self::Path,
        Self::Special,
        Self::Environment,
        Self::OsSelector,
    ];

    /// Returns a heading for the category.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Instance => "Instance Variables",
            Self::System => "System Variables",
            Self::Process => "Process Parameters",
            Self::OtherProcess => "Other Process Parameters",
            Self::Path => "Path Constants",
            Self::Special => "Special Constants",
            Self::Environment => "Environment",
            Self::OsSelector => "OS Selectors",
        }
    }
}

/// A suggestion to insert at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionCandidate {
    /// Where the candidate comes from.
    pub category: CompletionCategory,
    /// The complete placeholder to insert, e.g. `{{X:db.host}}`.
    pub expression: String,
    /// The key shown to the user.
    pub key: String,
    /// The current raw value, if the candidate has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display name of the owning process, for process parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// True if a higher-precedence scope overrides this entry.
    pub shadowed: bool,
    /// Short description, for constants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompletionCandidate {
    /// Creates a candidate.
    #[must_use]
    pub fn new(
        category: CompletionCategory,
        expression: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            category,
            expression: expression.into(),
            key: key.into(),
            value: None,
            owner: None,
            shadowed: false,
            description: None,
        }
    }

    /// Sets the current value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the owning process name.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Marks the candidate as shadowed.
    #[must_use]
    pub const fn with_shadowed(mut self, shadowed: bool) -> Self {
        self.shadowed = shadowed;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        let mut sorted = CompletionCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, CompletionCategory::ALL);
        assert!(CompletionCategory::Instance < CompletionCategory::OsSelector);
    }

    #[test]
    fn test_candidate_builder() {
        let candidate = CompletionCandidate::new(CompletionCategory::OtherProcess, "{{V:db:port}}", "port")
            .with_value("5432")
            .with_owner("db");
        assert_eq!(candidate.owner.as_deref(), Some("db"));
        assert!(!candidate.shadowed);
    }
}
