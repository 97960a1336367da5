use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::{validate_and_respond, RequireAdmin};
use crate::application::dto::{
    CompanyDeletedResponse, CompanyDetailResponse, CompanyListResponse, CompanyResponse,
    CompanySearchQuery, CreateCompanyRequest, UpdateCompanyRequest,
};
use crate::application::use_cases::{
    CreateCompanyUseCase, DeleteCompanyUseCase, GetCompanyUseCase, ListCompaniesUseCase,
    UpdateCompanyUseCase,
};

/// POST /companies
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid body or duplicate company"),
        (status = 401, description = "Admin required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_company_handler(
    RequireAdmin(admin): RequireAdmin,
    State(use_case): State<Arc<CreateCompanyUseCase>>,
    payload: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    tracing::debug!(admin = %admin.username, handle = %request.handle, "create company");
    let company = use_case.execute(request).await?;

    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// GET /companies
/// All companies, optionally filtered by name and size
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    params(
        ("nameLike" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("minEmployees" = Option<i64>, Query, description = "Minimum number of employees"),
        ("maxEmployees" = Option<i64>, Query, description = "Maximum number of employees")
    ),
    responses(
        (status = 200, description = "Companies ordered by name", body = CompanyListResponse),
        (status = 400, description = "Unknown filter, non-numeric bound or min > max")
    )
)]
pub async fn list_companies_handler(
    State(use_case): State<Arc<ListCompaniesUseCase>>,
    query: Result<Query<CompanySearchQuery>, QueryRejection>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let Query(query) = query?;
    validate_and_respond(&query)?;

    let companies = use_case.execute(&query).await?;
    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/{handle}
#[utoipa::path(
    get,
    path = "/companies/{handle}",
    tag = "companies",
    params(("handle" = String, Path, description = "Company handle")),
    responses(
        (status = 200, description = "Company with its jobs", body = CompanyDetailResponse),
        (status = 404, description = "No such company")
    )
)]
pub async fn get_company_handler(
    State(use_case): State<Arc<GetCompanyUseCase>>,
    Path(handle): Path<String>,
) -> Result<Json<CompanyDetailResponse>, ApiError> {
    let company = use_case.execute(&handle).await?;
    Ok(Json(CompanyDetailResponse { company }))
}

/// PATCH /companies/{handle}
/// Partial update; the handle itself cannot change
#[utoipa::path(
    patch,
    path = "/companies/{handle}",
    tag = "companies",
    params(("handle" = String, Path, description = "Company handle")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Invalid or empty body"),
        (status = 401, description = "Admin required"),
        (status = 404, description = "No such company")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_company_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(use_case): State<Arc<UpdateCompanyUseCase>>,
    Path(handle): Path<String>,
    payload: Result<Json<UpdateCompanyRequest>, JsonRejection>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let company = use_case.execute(&handle, &request).await?;
    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{handle}
#[utoipa::path(
    delete,
    path = "/companies/{handle}",
    tag = "companies",
    params(("handle" = String, Path, description = "Company handle")),
    responses(
        (status = 200, description = "Company deleted", body = CompanyDeletedResponse),
        (status = 401, description = "Admin required"),
        (status = 404, description = "No such company")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_company_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(use_case): State<Arc<DeleteCompanyUseCase>>,
    Path(handle): Path<String>,
) -> Result<Json<CompanyDeletedResponse>, ApiError> {
    use_case.execute(&handle).await?;
    Ok(Json(CompanyDeletedResponse { deleted: handle }))
}
