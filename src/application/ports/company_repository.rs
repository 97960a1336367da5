use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::{Company, CompanyDetail};
use crate::infrastructure::persistence::{FilterSpec, UpdateSpec};
#[cfg(test)]
use mockall::automock;

/// Port for company persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a company; a taken handle or name is `DuplicateCompany`
    async fn create(&self, company: &Company) -> Result<Company, RepositoryError>;

    /// All companies ordered by name
    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError>;

    /// Companies matching `nameLike` / `minEmployees` / `maxEmployees`; an empty filter is `EmptyInput`
    async fn find_filtered(&self, filter: &FilterSpec) -> Result<Vec<Company>, RepositoryError>;

    /// Company by handle, with its jobs
    async fn get(&self, handle: &str) -> Result<CompanyDetail, RepositoryError>;

    /// Partial update; fields use request names (`numEmployees`, `logoUrl`)
    async fn update(&self, handle: &str, update: &UpdateSpec) -> Result<Company, RepositoryError>;

    async fn remove(&self, handle: &str) -> Result<(), RepositoryError>;
}
