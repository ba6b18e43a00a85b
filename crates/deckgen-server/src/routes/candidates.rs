//! Candidate resume endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use deckgen_core::types::{Candidate, EntityId};

use super::upload::read_upload;
use crate::error::ApiResult;
use crate::state::AppState;

/// Extract a candidate from an uploaded resume.
/// POST /candidates
pub async fn create_candidate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Candidate>)> {
    let upload = read_upload(multipart).await?;
    let ctx = state.request_context();
    let candidate = state
        .service
        .extract_and_store_candidate(&ctx, upload.document.as_ref(), &upload.provider)
        .await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /candidates
pub async fn list_candidates(State(state): State<AppState>) -> Json<Vec<Candidate>> {
    Json(state.service.list_candidates())
}

/// GET /candidates/:id
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<Json<Candidate>> {
    Ok(Json(state.service.get_candidate(id)?))
}

/// PUT /candidates/:id
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(mut candidate): Json<Candidate>,
) -> ApiResult<Json<Candidate>> {
    candidate.id = id;
    Ok(Json(state.service.update_candidate(candidate)?))
}

/// DELETE /candidates/:id
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ApiResult<StatusCode> {
    state.service.delete_candidate(id)?;
    Ok(StatusCode::NO_CONTENT)
}
