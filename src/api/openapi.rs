use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    CompanyDeletedResponse, CompanyDetailDto, CompanyDetailResponse, CompanyDto,
    CompanyJobDto, CompanyListResponse, CompanyResponse, CreateCompanyRequest, CreateJobRequest,
    JobDeletedResponse, JobDto, JobListResponse, JobResponse, UpdateCompanyRequest,
    UpdateJobRequest,
};

/// OpenAPI specification for the Jobly API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Jobly API",
        version = "1.0.0",
        description = "Companies and the jobs they post"
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::companies::create_company_handler,
        crate::api::handlers::companies::list_companies_handler,
        crate::api::handlers::companies::get_company_handler,
        crate::api::handlers::companies::update_company_handler,
        crate::api::handlers::companies::delete_company_handler,
        crate::api::handlers::jobs::create_job_handler,
        crate::api::handlers::jobs::list_jobs_handler,
        crate::api::handlers::jobs::get_job_handler,
        crate::api::handlers::jobs::update_job_handler,
        crate::api::handlers::jobs::delete_job_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadinessResponse,
            CompanyDto,
            CompanyJobDto,
            CompanyDetailDto,
            CreateCompanyRequest,
            UpdateCompanyRequest,
            CompanyResponse,
            CompanyDetailResponse,
            CompanyListResponse,
            CompanyDeletedResponse,
            JobDto,
            CreateJobRequest,
            UpdateJobRequest,
            JobResponse,
            JobListResponse,
            JobDeletedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "companies", description = "Company operations"),
        (name = "jobs", description = "Job operations")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI plus the raw document at `/api-docs/openapi.json`
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for path in [
            "/health",
            "/health/ready",
            "/companies",
            "/companies/{handle}",
            "/jobs",
            "/jobs/{id}",
        ] {
            assert!(paths.iter().any(|p| p == path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
