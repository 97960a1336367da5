use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("No data")]
    EmptyInput,

    #[error("{min_field} ({min}) cannot be greater than {max_field} ({max})")]
    InvalidRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    #[error("{field} must be true or false, got '{value}'")]
    InvalidBoolean { field: String, value: String },

    #[error("No {resource_type}: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    #[error("Duplicate company: {0}")]
    DuplicateCompany(String),
}

impl DomainError {
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Caller input errors; the HTTP layer answers these with 400.
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}
