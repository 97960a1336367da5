use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{
    entities::{Company, CompanyDetail, CompanyJob, Job, NewJob},
    validation::HANDLE_PATTERN,
};
use crate::infrastructure::persistence::{FilterSpec, UpdateSpec};

/// Keeps an explicit `null` apart from an absent field: `None` = absent,
/// `Some(None)` = set to NULL.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// For columns that are `NOT NULL`: the field may be omitted, but an
/// explicit `null` is a type error.
fn deserialize_non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn insert_present(spec: &mut FilterSpec, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        spec.insert(key.to_string(), Value::String(value.clone()));
    }
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

/// DTO for company responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            handle: company.handle,
            name: company.name,
            description: company.description,
            num_employees: company.num_employees,
            logo_url: company.logo_url,
        }
    }
}

/// Job summary nested under a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyJobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

impl From<CompanyJob> for CompanyJobDto {
    fn from(job: CompanyJob) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
        }
    }
}

/// Company with its jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanyDetailDto {
    #[serde(flatten)]
    pub company: CompanyDto,
    pub jobs: Vec<CompanyJobDto>,
}

impl From<CompanyDetail> for CompanyDetailDto {
    fn from(detail: CompanyDetail) -> Self {
        Self {
            company: detail.company.into(),
            jobs: detail.jobs.into_iter().map(Into::into).collect(),
        }
    }
}

/// DTO for company creation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCompanyRequest {
    #[validate(
        length(min = 1, max = 25, message = "handle must be 1-25 characters"),
        regex(path = *HANDLE_PATTERN, message = "handle may only contain a-z, 0-9 and '-'")
    )]
    pub handle: String,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: String,
    #[validate(range(min = 0, message = "numEmployees cannot be negative"))]
    pub num_employees: Option<i32>,
    #[validate(url(message = "logoUrl must be a URL"))]
    pub logo_url: Option<String>,
}

impl From<CreateCompanyRequest> for Company {
    fn from(request: CreateCompanyRequest) -> Self {
        Self {
            handle: request.handle,
            name: request.name,
            description: request.description,
            num_employees: request.num_employees,
            logo_url: request.logo_url,
        }
    }
}

/// DTO for partial company updates. The handle cannot change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCompanyRequest {
    #[serde(default, deserialize_with = "deserialize_non_null")]
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<i32>)]
    #[validate(range(min = 0, message = "numEmployees cannot be negative"))]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(url(message = "logoUrl must be a URL"))]
    pub logo_url: Option<Option<String>>,
}

impl UpdateCompanyRequest {
    /// Present fields in declaration order, keyed by their request names.
    pub fn to_update_spec(&self) -> UpdateSpec {
        let mut spec = UpdateSpec::new();
        if let Some(name) = &self.name {
            spec.set("name", name.as_str());
        }
        if let Some(description) = &self.description {
            spec.set("description", description.as_str());
        }
        if let Some(num_employees) = self.num_employees {
            spec.set("numEmployees", num_employees);
        }
        if let Some(logo_url) = &self.logo_url {
            spec.set("logoUrl", logo_url.clone());
        }
        spec
    }
}

/// Query string for `GET /companies`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanySearchQuery {
    #[validate(length(min = 1, message = "nameLike cannot be empty"))]
    pub name_like: Option<String>,
    pub min_employees: Option<String>,
    pub max_employees: Option<String>,
}

impl CompanySearchQuery {
    /// `None` when no filter was given, so the caller lists everything.
    pub fn to_filter_spec(&self) -> Option<FilterSpec> {
        let mut spec = FilterSpec::new();
        insert_present(&mut spec, "nameLike", &self.name_like);
        insert_present(&mut spec, "minEmployees", &self.min_employees);
        insert_present(&mut spec, "maxEmployees", &self.max_employees);
        (!spec.is_empty()).then_some(spec)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub company: CompanyDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetailDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyDeletedResponse {
    pub deleted: String,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// DTO for job responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

impl From<Job> for JobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company_handle: job.company_handle,
        }
    }
}

/// DTO for job creation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0, message = "equity must be between 0 and 1"))]
    pub equity: Option<f64>,
    #[validate(
        length(min = 1, max = 25, message = "companyHandle must be 1-25 characters"),
        regex(path = *HANDLE_PATTERN, message = "companyHandle may only contain a-z, 0-9 and '-'")
    )]
    pub company_handle: String,
}

impl From<CreateJobRequest> for NewJob {
    fn from(request: CreateJobRequest) -> Self {
        Self {
            title: request.title,
            salary: request.salary,
            equity: request.equity,
            company_handle: request.company_handle,
        }
    }
}

/// DTO for partial job updates. `id` and `companyHandle` cannot change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJobRequest {
    #[serde(default, deserialize_with = "deserialize_non_null")]
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<i32>)]
    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<f64>)]
    #[validate(range(min = 0.0, max = 1.0, message = "equity must be between 0 and 1"))]
    pub equity: Option<Option<f64>>,
}

impl UpdateJobRequest {
    pub fn to_update_spec(&self) -> UpdateSpec {
        let mut spec = UpdateSpec::new();
        if let Some(title) = &self.title {
            spec.set("title", title.as_str());
        }
        if let Some(salary) = self.salary {
            spec.set("salary", salary);
        }
        if let Some(equity) = self.equity {
            spec.set("equity", equity);
        }
        spec
    }
}

/// Query string for `GET /jobs`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearchQuery {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub min_salary: Option<String>,
    pub has_equity: Option<String>,
}

impl JobSearchQuery {
    pub fn to_filter_spec(&self) -> Option<FilterSpec> {
        let mut spec = FilterSpec::new();
        insert_present(&mut spec, "title", &self.title);
        insert_present(&mut spec, "minSalary", &self.min_salary);
        insert_present(&mut spec, "hasEquity", &self.has_equity);
        (!spec.is_empty()).then_some(spec)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub job: JobDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<JobDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobDeletedResponse {
    pub deleted: i32,
}
