use async_trait::async_trait;
use sqlx::PgPool;

use super::binding::bind_values;
use super::filters::{sql_for_job_filter, JOB_COLUMNS};
use super::query_builder::{build_set_clause, ClauseResult, FilterSpec, UpdateSpec};
use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::entities::{Job, NewJob};
use crate::domain::errors::DomainError;

// equity is NUMERIC in the table; read it back as a float.
pub(super) const JOB_SELECT: &str =
    "SELECT id, title, salary, equity::float8 AS equity, company_handle FROM jobs";
const JOB_RETURNING: &str =
    "RETURNING id, title, salary, equity::float8 AS equity, company_handle";

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select(&self, clause: &ClauseResult) -> Result<Vec<Job>, RepositoryError> {
        let sql = format!("{} {} ORDER BY title, id", JOB_SELECT, clause.where_sql());
        tracing::debug!(sql = %sql, params = clause.values.len(), "job query");

        let rows = bind_values(sqlx::query_as::<_, JobRow>(&sql), &clause.values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(JobRow::into_domain).collect())
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn create(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            {}
            "#,
            JOB_RETURNING
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(&job.title)
            .bind(job.salary)
            .bind(job.equity)
            .bind(&job.company_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    DomainError::not_found("company", &job.company_handle).into()
                }
                other => RepositoryError::from(other),
            })?;

        Ok(row.into_domain())
    }

    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError> {
        self.select(&ClauseResult::default()).await
    }

    async fn find_filtered(&self, filter: &FilterSpec) -> Result<Vec<Job>, RepositoryError> {
        let clause = sql_for_job_filter(filter)?;
        self.select(&clause).await
    }

    async fn get(&self, id: i32) -> Result<Job, RepositoryError> {
        let sql = format!("{} WHERE id = $1", JOB_SELECT);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DomainError::not_found("job", id))?;

        Ok(row.into_domain())
    }

    async fn update(&self, id: i32, update: &UpdateSpec) -> Result<Job, RepositoryError> {
        let clause = build_set_clause(update, JOB_COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} {}",
            clause.clause,
            clause.next_placeholder(),
            JOB_RETURNING
        );
        tracing::debug!(sql = %sql, "job update");

        let row = bind_values(sqlx::query_as::<_, JobRow>(&sql), &clause.values)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DomainError::not_found("job", id))?;

        Ok(row.into_domain())
    }

    async fn remove(&self, id: i32) -> Result<(), RepositoryError> {
        sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DomainError::not_found("job", id))?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct JobRow {
    id: i32,
    title: String,
    salary: Option<i32>,
    equity: Option<f64>,
    company_handle: String,
}

impl JobRow {
    pub(super) fn into_domain(self) -> Job {
        Job {
            id: self.id,
            title: self.title,
            salary: self.salary,
            equity: self.equity,
            company_handle: self.company_handle,
        }
    }
}
