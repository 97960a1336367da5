use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::{validate_and_respond, RequireAdmin};
use crate::application::dto::{
    CreateJobRequest, JobDeletedResponse, JobListResponse, JobResponse, JobSearchQuery,
    UpdateJobRequest,
};
use crate::application::use_cases::{
    CreateJobUseCase, DeleteJobUseCase, GetJobUseCase, ListJobsUseCase, UpdateJobUseCase,
};

/// POST /jobs
#[utoipa::path(
    post,
    path = "/jobs",
    tag = "jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid body"),
        (status = 401, description = "Admin required"),
        (status = 404, description = "No such company")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_job_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(use_case): State<Arc<CreateJobUseCase>>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let job = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// GET /jobs
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive title substring"),
        ("minSalary" = Option<i64>, Query, description = "Minimum salary"),
        ("hasEquity" = Option<bool>, Query, description = "Only jobs with non-zero equity when true")
    ),
    responses(
        (status = 200, description = "Jobs ordered by title", body = JobListResponse),
        (status = 400, description = "Unknown filter or malformed value")
    )
)]
pub async fn list_jobs_handler(
    State(use_case): State<Arc<ListJobsUseCase>>,
    query: Result<Query<JobSearchQuery>, QueryRejection>,
) -> Result<Json<JobListResponse>, ApiError> {
    let Query(query) = query?;
    validate_and_respond(&query)?;

    let jobs = use_case.execute(&query).await?;
    Ok(Json(JobListResponse { jobs }))
}

/// GET /jobs/{id}
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job", body = JobResponse),
        (status = 404, description = "No such job")
    )
)]
pub async fn get_job_handler(
    State(use_case): State<Arc<GetJobUseCase>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<JobResponse>, ApiError> {
    let Path(id) = id?;
    let job = use_case.execute(id).await?;
    Ok(Json(JobResponse { job }))
}

/// PATCH /jobs/{id}
/// Only title, salary and equity can change
#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 400, description = "Invalid or empty body"),
        (status = 401, description = "Admin required"),
        (status = 404, description = "No such job")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_job_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(use_case): State<Arc<UpdateJobUseCase>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateJobRequest>, JsonRejection>,
) -> Result<Json<JobResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    validate_and_respond(&request)?;

    let job = use_case.execute(id, &request).await?;
    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/{id}
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job deleted", body = JobDeletedResponse),
        (status = 401, description = "Admin required"),
        (status = 404, description = "No such job")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_job_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(use_case): State<Arc<DeleteJobUseCase>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<JobDeletedResponse>, ApiError> {
    let Path(id) = id?;
    use_case.execute(id).await?;
    Ok(Json(JobDeletedResponse { deleted: id }))
}
