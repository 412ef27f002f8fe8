use thiserror::Error;

/// A single failed validation rule.
///
/// Identifies the offending field and the rule tag it broke (for example
/// `("username", "min=3")`). Carries nothing else, so it is safe to return to
/// callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} field validation failed at {rule} rule")]
pub struct ValidationError {
    field: String,
    rule: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }
}
