use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::{Job, NewJob};
use crate::infrastructure::persistence::{FilterSpec, UpdateSpec};
#[cfg(test)]
use mockall::automock;

/// Port for job persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a job; an unknown company is `NotFound`
    async fn create(&self, job: &NewJob) -> Result<Job, RepositoryError>;

    /// All jobs ordered by title
    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError>;

    /// Jobs matching `title` / `minSalary` / `hasEquity`; an empty filter is `EmptyInput`
    async fn find_filtered(&self, filter: &FilterSpec) -> Result<Vec<Job>, RepositoryError>;

    async fn get(&self, id: i32) -> Result<Job, RepositoryError>;

    /// Partial update of `title`, `salary` and `equity`
    async fn update(&self, id: i32, update: &UpdateSpec) -> Result<Job, RepositoryError>;

    async fn remove(&self, id: i32) -> Result<(), RepositoryError>;
}
