//! Adapted resume endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use deckgen_core::types::{AdaptedResume, EntityId};

use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for an adaptation.
#[derive(Debug, Deserialize)]
pub struct AdaptRequest {
    pub job_ad_id: EntityId,
    pub candidate_ids: Vec<EntityId>,
    pub provider: String,
}

/// Tailor stored candidates to a stored job ad.
/// POST /adapted
pub async fn create_adapted_resume(
    State(state): State<AppState>,
    Json(request): Json<AdaptRequest>,
) -> ApiResult<(StatusCode, Json<AdaptedResume>)> {
    let ctx = state.request_context();
    let adapted = state
        .service
        .adapt_candidates(&ctx, request.job_ad_id, &request.candidate_ids, &request.provider)
        .await?;
    Ok((StatusCode::CREATED, Json(adapted)))
}

/// GET /adapted
pub async fn list_adapted_resumes(State(state): State<AppState>) -> Json<Vec<AdaptedResume>> {
    Json(state.service.list_adapted_resumes())
}

/// GET /adapted/:id
pub async fn get_adapted_resume(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Json<AdaptedResume>> {
    Ok(Json(state.service.get_adapted_resume(id)?))
}

/// PUT /adapted/:id
pub async fn update_adapted_resume(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(mut adapted): Json<AdaptedResume>,
) -> ApiResult<Json<AdaptedResume>> {
    adapted.id = id;
    Ok(Json(state.service.update_adapted_resume(adapted)?))
}

/// DELETE /adapted/:id
pub async fn delete_adapted_resume(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<StatusCode> {
    state.service.delete_adapted_resume(id)?;
    Ok(StatusCode::NO_CONTENT)
}
