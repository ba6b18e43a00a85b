//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Enabled provider names.
    pub providers: Vec<String>,
    pub job_ads: usize,
    pub candidates: usize,
    pub adapted_resumes: usize,
}

/// Health check endpoint.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (job_ads, candidates, adapted_resumes) = state.service.counts();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: state.service.registry().names(),
        job_ads,
        candidates,
        adapted_resumes,
    })
}
