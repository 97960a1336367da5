use std::sync::Arc;

use crate::application::dto::{
    CompanyDetailDto, CompanyDto, CompanySearchQuery, CreateCompanyRequest, UpdateCompanyRequest,
};
use crate::application::errors::UseCaseError;
use crate::application::ports::CompanyRepository;

/// Use case: Create a company
pub struct CreateCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl CreateCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(&self, request: CreateCompanyRequest) -> Result<CompanyDto, UseCaseError> {
        let company = self.company_repo.create(&request.into()).await?;
        tracing::info!(handle = %company.handle, "company_created");
        Ok(company.into())
    }
}

/// Use case: List companies, optionally filtered
pub struct ListCompaniesUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl ListCompaniesUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(&self, query: &CompanySearchQuery) -> Result<Vec<CompanyDto>, UseCaseError> {
        let companies = match query.to_filter_spec() {
            Some(filter) => self.company_repo.find_filtered(&filter).await?,
            None => self.company_repo.find_all().await?,
        };

        Ok(companies.into_iter().map(CompanyDto::from).collect())
    }
}

/// Use case: Fetch one company with its jobs
pub struct GetCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl GetCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(&self, handle: &str) -> Result<CompanyDetailDto, UseCaseError> {
        Ok(self.company_repo.get(handle).await?.into())
    }
}

/// Use case: Partially update a company
pub struct UpdateCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl UpdateCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(
        &self,
        handle: &str,
        request: &UpdateCompanyRequest,
    ) -> Result<CompanyDto, UseCaseError> {
        let update = request.to_update_spec();
        let company = self.company_repo.update(handle, &update).await?;
        tracing::info!(handle = %handle, fields = update.len(), "company_updated");
        Ok(company.into())
    }
}

/// Use case: Delete a company (its jobs go with it)
pub struct DeleteCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl DeleteCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(&self, handle: &str) -> Result<(), UseCaseError> {
        self.company_repo.remove(handle).await?;
        tracing::info!(handle = %handle, "company_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCompanyRepository, RepositoryError};
    use crate::domain::entities::{Company, CompanyDetail, CompanyJob};
    use crate::domain::errors::DomainError;
    use crate::infrastructure::persistence::SqlValue;
    use serde_json::json;

    fn company(handle: &str) -> Company {
        Company {
            handle: handle.to_string(),
            name: handle.to_uppercase(),
            description: format!("Desc {}", handle),
            num_employees: Some(1),
            logo_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_company() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_create()
            .withf(|c| c.handle == "new" && c.num_employees == Some(10))
            .times(1)
            .returning(|c| Ok(c.clone()));

        let use_case = CreateCompanyUseCase::new(Arc::new(repo));
        let request: CreateCompanyRequest = serde_json::from_value(json!({
            "handle": "new",
            "name": "New",
            "description": "DescNew",
            "numEmployees": 10
        }))
        .unwrap();

        let dto = use_case.execute(request).await.unwrap();
        assert_eq!(dto.handle, "new");
        assert_eq!(dto.num_employees, Some(10));
    }

    #[tokio::test]
    async fn test_create_duplicate_company() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|c| Err(DomainError::DuplicateCompany(c.handle.clone()).into()));

        let use_case = CreateCompanyUseCase::new(Arc::new(repo));
        let request: CreateCompanyRequest = serde_json::from_value(json!({
            "handle": "c1",
            "name": "C1",
            "description": "Desc1"
        }))
        .unwrap();

        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(err, UseCaseError::Domain(DomainError::DuplicateCompany(ref h)) if h == "c1"));
    }

    #[tokio::test]
    async fn test_list_without_filter_uses_find_all() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_all()
            .times(1)
            .returning(|| Ok(vec![company("c1"), company("c2")]));
        repo.expect_find_filtered().never();

        let use_case = ListCompaniesUseCase::new(Arc::new(repo));
        let companies = use_case.execute(&CompanySearchQuery::default()).await.unwrap();

        assert_eq!(companies.len(), 2);
    }

    #[tokio::test]
    async fn test_list_with_filter_uses_find_filtered() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_all().never();
        repo.expect_find_filtered()
            .withf(|f| f.len() == 1 && f["nameLike"] == json!("c1"))
            .times(1)
            .returning(|_| Ok(vec![company("c1")]));

        let use_case = ListCompaniesUseCase::new(Arc::new(repo));
        let query = CompanySearchQuery {
            name_like: Some("c1".into()),
            ..Default::default()
        };

        let companies = use_case.execute(&query).await.unwrap();
        assert_eq!(companies[0].handle, "c1");
    }

    #[tokio::test]
    async fn test_list_invalid_range_is_domain_error() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_find_filtered().times(1).returning(|_| {
            Err(RepositoryError::Domain(DomainError::InvalidRange {
                min_field: "minEmployees",
                max_field: "maxEmployees",
                min: 3.0,
                max: 2.0,
            }))
        });

        let use_case = ListCompaniesUseCase::new(Arc::new(repo));
        let query = CompanySearchQuery {
            min_employees: Some("3".into()),
            max_employees: Some("2".into()),
            ..Default::default()
        };

        let err = use_case.execute(&query).await.unwrap_err();
        assert!(matches!(err, UseCaseError::Domain(DomainError::InvalidRange { .. })));
    }

    #[tokio::test]
    async fn test_get_company_with_jobs() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_get()
            .withf(|h| h == "c1")
            .times(1)
            .returning(|h| {
                Ok(CompanyDetail {
                    company: company(h),
                    jobs: vec![CompanyJob {
                        id: 1,
                        title: "j1".into(),
                        salary: Some(100),
                        equity: Some(0.1),
                    }],
                })
            });

        let use_case = GetCompanyUseCase::new(Arc::new(repo));
        let detail = use_case.execute("c1").await.unwrap();

        assert_eq!(detail.company.handle, "c1");
        assert_eq!(detail.jobs.len(), 1);
        assert_eq!(detail.jobs[0].title, "j1");
    }

    #[tokio::test]
    async fn test_get_missing_company() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|h| Err(DomainError::not_found("company", h).into()));

        let use_case = GetCompanyUseCase::new(Arc::new(repo));
        let err = use_case.execute("nope").await.unwrap_err();

        assert_eq!(err.to_string(), "No company: nope");
    }

    #[tokio::test]
    async fn test_update_passes_fields_in_order() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_update()
            .withf(|h, update| {
                let fields: Vec<_> = update.iter().map(|(k, _)| k).collect();
                h == "c1" && fields == vec!["name", "logoUrl"]
            })
            .times(1)
            .returning(|h, update| {
                let mut updated = company(h);
                if let Some((_, SqlValue::Text(name))) = update.iter().next() {
                    updated.name = name.clone();
                }
                Ok(updated)
            });

        let use_case = UpdateCompanyUseCase::new(Arc::new(repo));
        let request: UpdateCompanyRequest =
            serde_json::from_value(json!({"logoUrl": null, "name": "New"})).unwrap();

        let dto = use_case.execute("c1", &request).await.unwrap();
        assert_eq!(dto.name, "New");
    }

    #[tokio::test]
    async fn test_update_with_no_fields() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_update()
            .withf(|_, update| update.is_empty())
            .times(1)
            .returning(|_, _| Err(DomainError::EmptyInput.into()));

        let use_case = UpdateCompanyUseCase::new(Arc::new(repo));
        let err = use_case
            .execute("c1", &UpdateCompanyRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Domain(DomainError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_delete_company() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_remove()
            .withf(|h| h == "c1")
            .times(1)
            .returning(|_| Ok(()));

        let use_case = DeleteCompanyUseCase::new(Arc::new(repo));
        assert!(use_case.execute("c1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_company() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_remove()
            .times(1)
            .returning(|h| Err(DomainError::not_found("company", h).into()));

        let use_case = DeleteCompanyUseCase::new(Arc::new(repo));
        let err = use_case.execute("nope").await.unwrap_err();

        assert!(matches!(err, UseCaseError::Domain(DomainError::NotFound { .. })));
    }
}
