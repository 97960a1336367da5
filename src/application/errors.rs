//! Error type shared by the company and job use cases

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(DomainError),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<DomainError> for UseCaseError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

// Domain errors raised inside a repository surface as domain errors, so the
// HTTP layer sees one shape no matter where validation failed.
impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Domain(domain) => Self::Domain(domain),
            other => Self::Repository(other),
        }
    }
}
