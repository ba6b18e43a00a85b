//! Job ad endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use deckgen_core::types::{EntityId, JobAd};

use super::upload::read_upload;
use crate::error::ApiResult;
use crate::state::AppState;

/// Extract a job ad from an uploaded document.
/// POST /job-ads
pub async fn create_job_ad(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<JobAd>)> {
    let upload = read_upload(multipart).await?;
    let ctx = state.request_context();
    let job_ad = state
        .service
        .extract_and_store_job_ad(&ctx, upload.document.as_ref(), &upload.provider)
        .await?;
    Ok((StatusCode::CREATED, Json(job_ad)))
}

/// GET /job-ads
pub async fn list_job_ads(State(state): State<AppState>) -> Json<Vec<JobAd>> {
    Json(state.service.list_job_ads())
}

/// GET /job-ads/:id
pub async fn get_job_ad(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Json<JobAd>> {
    Ok(Json(state.service.get_job_ad(id)?))
}

/// Replace a job ad. The path id wins over any id in the body.
/// PUT /job-ads/:id
pub async fn update_job_ad(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(mut job_ad): Json<JobAd>,
) -> ApiResult<Json<JobAd>> {
    job_ad.id = id;
    Ok(Json(state.service.update_job_ad(job_ad)?))
}

/// DELETE /job-ads/:id
pub async fn delete_job_ad(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<StatusCode> {
    state.service.delete_job_ad(id)?;
    Ok(StatusCode::NO_CONTENT)
}
