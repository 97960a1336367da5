use async_trait::async_trait;
use sqlx::PgPool;

use super::binding::bind_values;
use super::filters::{sql_for_company_filter, COMPANY_COLUMNS};
use super::query_builder::{build_set_clause, ClauseResult, FilterSpec, SqlValue, UpdateSpec};
use super::postgres_job_repository::{JobRow, JOB_SELECT};
use crate::application::ports::{CompanyRepository, RepositoryError};
use crate::domain::entities::{Company, CompanyDetail, CompanyJob};
use crate::domain::errors::DomainError;

const COMPANY_SELECT: &str = "SELECT handle, name, description, num_employees, logo_url FROM companies";
const COMPANY_RETURNING: &str = "RETURNING handle, name, description, num_employees, logo_url";

pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select(&self, clause: &ClauseResult) -> Result<Vec<Company>, RepositoryError> {
        let sql = format!("{} {} ORDER BY name", COMPANY_SELECT, clause.where_sql());
        tracing::debug!(sql = %sql, params = clause.values.len(), "company query");

        let rows = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), &clause.values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CompanyRow::into_domain).collect())
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn create(&self, company: &Company) -> Result<Company, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO companies (handle, name, description, num_employees, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            {}
            "#,
            COMPANY_RETURNING
        );

        let row = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(&company.handle)
            .bind(&company.name)
            .bind(&company.description)
            .bind(company.num_employees)
            .bind(&company.logo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| duplicate_company(e, &company.handle))?;

        Ok(row.into_domain())
    }

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
        self.select(&ClauseResult::default()).await
    }

    async fn find_filtered(&self, filter: &FilterSpec) -> Result<Vec<Company>, RepositoryError> {
        let clause = sql_for_company_filter(filter)?;
        self.select(&clause).await
    }

    async fn get(&self, handle: &str) -> Result<CompanyDetail, RepositoryError> {
        let sql = format!("{} WHERE handle = $1", COMPANY_SELECT);
        let company = sqlx::query_as::<_, CompanyRow>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DomainError::not_found("company", handle))?
            .into_domain();

        let sql = format!("{} WHERE company_handle = $1 ORDER BY id", JOB_SELECT);
        let jobs = sqlx::query_as::<_, JobRow>(&sql)
            .bind(handle)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|row| CompanyJob::from(row.into_domain()))
            .collect();

        Ok(CompanyDetail { company, jobs })
    }

    async fn update(&self, handle: &str, update: &UpdateSpec) -> Result<Company, RepositoryError> {
        let clause = build_set_clause(update, COMPANY_COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} {}",
            clause.clause,
            clause.next_placeholder(),
            COMPANY_RETURNING
        );
        tracing::debug!(sql = %sql, "company update");

        // Only `name` is unique besides the handle, which cannot change here.
        let label = match update.get("name") {
            Some(SqlValue::Text(name)) => name.as_str(),
            _ => handle,
        };

        let row = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), &clause.values)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| duplicate_company(e, label))?
            .ok_or_else(|| DomainError::not_found("company", handle))?;

        Ok(row.into_domain())
    }

    async fn remove(&self, handle: &str) -> Result<(), RepositoryError> {
        sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DomainError::not_found("company", handle))?;

        Ok(())
    }
}

fn duplicate_company(err: sqlx::Error, label: &str) -> RepositoryError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            DomainError::DuplicateCompany(label.to_string()).into()
        }
        other => RepositoryError::from(other),
    }
}

#[derive(sqlx::FromRow)]
struct CompanyRow {
    handle: String,
    name: String,
    description: String,
    num_employees: Option<i32>,
    logo_url: Option<String>,
}

impl CompanyRow {
    fn into_domain(self) -> Company {
        Company {
            handle: self.handle,
            name: self.name,
            description: self.description,
            num_employees: self.num_employees,
            logo_url: self.logo_url,
        }
    }
}
