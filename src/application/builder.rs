use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api::middleware::JwtKeys;
use crate::api::router::AppState;
use crate::application::{
    ports::{CompanyRepository, JobRepository},
    use_cases::{
        CreateCompanyUseCase, CreateJobUseCase, DeleteCompanyUseCase, DeleteJobUseCase,
        GetCompanyUseCase, GetJobUseCase, ListCompaniesUseCase, ListJobsUseCase,
        UpdateCompanyUseCase, UpdateJobUseCase,
    },
};
use crate::config::Config;
use crate::infrastructure::persistence::{PostgresCompanyRepository, PostgresJobRepository};

/// Application builder for dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    company_repo: Option<Arc<dyn CompanyRepository>>,
    job_repo: Option<Arc<dyn JobRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            company_repo: None,
            job_repo: None,
        }
    }

    /// Connect with retry, then run migrations
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to database");

        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            max = self.config.db_max_connections,
            min = self.config.db_min_connections,
            "Database pool configured"
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Use an existing pool; migrations are the caller's concern
    pub fn with_pool(mut self, pool: sqlx::PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Initialize the Postgres repositories
    pub fn with_repositories(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;

        self.company_repo = Some(Arc::new(PostgresCompanyRepository::new(pool.clone())));
        self.job_repo = Some(Arc::new(PostgresJobRepository::new(pool.clone())));

        info!("Repositories initialized");
        Ok(self)
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let pool = self.pool.ok_or("Database pool not initialized")?;
        let company_repo = self
            .company_repo
            .ok_or("Company repository not initialized")?;
        let job_repo = self.job_repo.ok_or("Job repository not initialized")?;

        let app_state = AppState {
            pool: Arc::new(pool),
            jwt_keys: Arc::new(JwtKeys::new(&self.config.jwt_secret)),
            create_company_use_case: Arc::new(CreateCompanyUseCase::new(Arc::clone(&company_repo))),
            list_companies_use_case: Arc::new(ListCompaniesUseCase::new(Arc::clone(&company_repo))),
            get_company_use_case: Arc::new(GetCompanyUseCase::new(Arc::clone(&company_repo))),
            update_company_use_case: Arc::new(UpdateCompanyUseCase::new(Arc::clone(&company_repo))),
            delete_company_use_case: Arc::new(DeleteCompanyUseCase::new(company_repo)),
            create_job_use_case: Arc::new(CreateJobUseCase::new(Arc::clone(&job_repo))),
            list_jobs_use_case: Arc::new(ListJobsUseCase::new(Arc::clone(&job_repo))),
            get_job_use_case: Arc::new(GetJobUseCase::new(Arc::clone(&job_repo))),
            update_job_use_case: Arc::new(UpdateJobUseCase::new(Arc::clone(&job_repo))),
            delete_job_use_case: Arc::new(DeleteJobUseCase::new(job_repo)),
            config: self.config,
        };

        info!("Application layer initialized");
        Ok(app_state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
