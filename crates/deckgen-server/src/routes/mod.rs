//! Route definitions for the REST API.

mod adapted;
mod candidates;
mod health;
mod job_ads;
mod upload;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Job ads
        .route(
            "/job-ads",
            get(job_ads::list_job_ads).post(job_ads::create_job_ad),
        )
        .route(
            "/job-ads/:id",
            get(job_ads::get_job_ad)
                .put(job_ads::update_job_ad)
                .delete(job_ads::delete_job_ad),
        )
        // Candidates
        .route(
            "/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/candidates/:id",
            get(candidates::get_candidate)
                .put(candidates::update_candidate)
                .delete(candidates::delete_candidate),
        )
        // Adapted resumes
        .route(
            "/adapted",
            get(adapted::list_adapted_resumes).post(adapted::create_adapted_resume),
        )
        .route(
            "/adapted/:id",
            get(adapted::get_adapted_resume)
                .put(adapted::update_adapted_resume)
                .delete(adapted::delete_adapted_resume),
        )
        // Attach state
        .with_state(state)
}

pub use adapted::*;
pub use candidates::*;
pub use health::*;
pub use job_ads::*;
