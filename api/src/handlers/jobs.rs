use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::handlers::{ErrorResponse, SuccessResponse};
use crate::state::AppState;
use common::engine::deliver_application;
use common::errors::ApiError;
use common::models::{Application, Job, SortKey};

/// Query parameters shared by the job list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsParams {
    pub sort: Option<String>,
}

impl ListJobsParams {
    /// Missing sort means the default (most recent first)
    pub fn sort_key(&self) -> Result<SortKey, ErrorResponse> {
        match self.sort.as_deref() {
            None | Some("") => Ok(SortKey::default()),
            Some(raw) => SortKey::from_str(raw).map_err(|e| ApiError::from(e).into()),
        }
    }
}

/// Visible job list with the counters the job board shows
#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub count: usize,
    pub total_jobs: usize,
    pub active_filters: usize,
    pub sort: SortKey,
}

/// List jobs matching the current filters
#[tracing::instrument(skip(state))]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsParams>,
) -> Result<Json<SuccessResponse<JobListResponse>>, ErrorResponse> {
    let sort = params.sort_key()?;
    let engine = state.engine.read().await;

    let jobs = engine.visible_jobs(sort);
    let response = JobListResponse {
        count: jobs.len(),
        jobs,
        total_jobs: engine.total_jobs(),
        active_filters: engine.active_filter_count(),
        sort,
    };

    Ok(Json(SuccessResponse::new(response)))
}

/// Get a single job by id
#[tracing::instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse<Job>>, ErrorResponse> {
    let engine = state.engine.read().await;
    let job = engine
        .find(&id)
        .cloned()
        .ok_or_else(|| ErrorResponse::new("not_found", format!("Job not found: {}", id)))?;

    Ok(Json(SuccessResponse::new(job)))
}

/// List every distinct skill in the catalog
#[tracing::instrument(skip(state))]
pub async fn list_skills(State(state): State<AppState>) -> Json<SuccessResponse<Vec<String>>> {
    let engine = state.engine.read().await;
    Json(SuccessResponse::new(engine.all_skills().to_vec()))
}

/// Apply to an open job
///
/// The notification is delivered on a background task; the response only
/// confirms that the application was accepted.
#[tracing::instrument(skip(state))]
pub async fn apply_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SuccessResponse<Application>>), ErrorResponse> {
    let (application, notifier) = {
        let engine = state.engine.read().await;
        let application = engine.apply(&id).map_err(|e| {
            tracing::warn!(job_id = %id, error = %e, "Application rejected");
            ErrorResponse::from(ApiError::from(e))
        })?;
        (application, engine.notifier())
    };

    let pending = application.clone();
    tokio::spawn(async move {
        deliver_application(notifier.as_ref(), &pending).await;
    });

    Ok((StatusCode::ACCEPTED, Json(SuccessResponse::new(application))))
}
