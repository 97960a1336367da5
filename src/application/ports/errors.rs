use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_message() {
        let err: RepositoryError = DomainError::EmptyInput.into();
        assert!(matches!(err, RepositoryError::Domain(DomainError::EmptyInput)));
        assert_eq!(err.to_string(), "No data");
    }

    #[test]
    fn test_database_error_message() {
        let err: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(err.to_string().starts_with("Database error"));
    }
}
