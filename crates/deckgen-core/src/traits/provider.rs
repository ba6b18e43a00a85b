//! Extraction provider capability.

use async_trait::async_trait;
use deckgen_extractors::ParsedDocument;

use crate::error::DeckgenResult;
use crate::types::{AdaptedResume, Candidate, JobAd};

/// Pluggable backend that turns documents into entities and adapts resumes.
///
/// Implementations are invoked outside every store lock and may be slow or
/// fail; failures are reported as upstream errors. Calls are never retried by
/// deckgen since they are not guaranteed to be idempotent.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    /// Extract a candidate resume from a parsed document.
    async fn extract_candidate(&self, document: &ParsedDocument) -> DeckgenResult<Candidate>;

    /// Extract a job ad from a parsed document.
    async fn extract_job_ad(&self, document: &ParsedDocument) -> DeckgenResult<JobAd>;

    /// Tailor the given resumes (never empty) to a job ad.
    async fn adapt(&self, job_ad: &JobAd, candidates: &[Candidate])
        -> DeckgenResult<AdaptedResume>;
}
