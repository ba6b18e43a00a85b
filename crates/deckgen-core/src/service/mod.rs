//! Orchestration of extraction and adaptation workflows.
//!
//! Each workflow runs its phases in order (resolve references, validate,
//! invoke the provider, persist) and stops at the first failure, so a failed
//! workflow never leaves a partial record behind. Provider calls happen with
//! no store lock held.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use deckgen_extractors::{Document, ParsedDocument};

use crate::context::RequestContext;
use crate::error::{DeckgenError, DeckgenResult};
use crate::registry::ProviderRegistry;
use crate::store::EntityStore;
use crate::types::{AdaptedResume, Candidate, EntityId, JobAd};

/// Entity stores plus the provider registry, shared by handle.
pub struct OrchestrationService {
    job_ads: EntityStore<JobAd>,
    candidates: EntityStore<Candidate>,
    adapted: EntityStore<AdaptedResume>,
    registry: Arc<ProviderRegistry>,
}

impl OrchestrationService {
    /// Create a service with empty stores.
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            job_ads: EntityStore::new(),
            candidates: EntityStore::new(),
            adapted: EntityStore::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    async fn parse(document: &dyn Document) -> DeckgenResult<ParsedDocument> {
        ParsedDocument::from_document(document).await.map_err(|e| {
            warn!(document = %document.name(), error = %e, "Document parsing failed");
            DeckgenError::from(e).with_context(format!("failed to read '{}'", document.name()))
        })
    }

    /// Parse a resume document, extract a candidate and store it.
    #[instrument(skip_all, fields(provider = %provider_name, document = %document.name()))]
    pub async fn extract_and_store_candidate(
        &self,
        ctx: &RequestContext,
        document: &dyn Document,
        provider_name: &str,
    ) -> DeckgenResult<Candidate> {
        let provider = self.registry.get(provider_name)?;
        let parsed = Self::parse(document).await?;

        debug!("Invoking provider for resume extraction");
        let candidate = ctx
            .run(provider.extract_candidate(&parsed))
            .await
            .map_err(|e| {
                warn!(error = %e, "Resume extraction failed");
                e.with_context(format!(
                    "failed to extract resume with provider '{}'",
                    provider_name
                ))
            })?;

        let created = self.candidates.create(candidate);
        info!(id = created.id, "Candidate stored");
        Ok(created)
    }

    /// Parse a job advertisement document, extract a job ad and store it.
    #[instrument(skip_all, fields(provider = %provider_name, document = %document.name()))]
    pub async fn extract_and_store_job_ad(
        &self,
        ctx: &RequestContext,
        document: &dyn Document,
        provider_name: &str,
    ) -> DeckgenResult<JobAd> {
        let provider = self.registry.get(provider_name)?;
        let parsed = Self::parse(document).await?;

        debug!("Invoking provider for job ad extraction");
        let job_ad = ctx
            .run(provider.extract_job_ad(&parsed))
            .await
            .map_err(|e| {
                warn!(error = %e, "Job ad extraction failed");
                e.with_context(format!(
                    "failed to extract job ad with provider '{}'",
                    provider_name
                ))
            })?;

        let created = self.job_ads.create(job_ad);
        info!(id = created.id, "Job ad stored");
        Ok(created)
    }

    /// Tailor the given candidates to a stored job ad and store the result.
    #[instrument(skip_all, fields(provider = %provider_name, job_ad_id = job_ad_id, candidates = ?candidate_ids))]
    pub async fn adapt_candidates(
        &self,
        ctx: &RequestContext,
        job_ad_id: EntityId,
        candidate_ids: &[EntityId],
        provider_name: &str,
    ) -> DeckgenResult<AdaptedResume> {
        if candidate_ids.is_empty() {
            return Err(DeckgenError::validation_with_suggestion(
                "at least one resume ID must be provided for adaptation",
                "Pass one or more candidate IDs",
            ));
        }

        let job_ad = self.job_ads.get(job_ad_id).map_err(|e| {
            e.with_context(format!("failed to retrieve job ad with ID {}", job_ad_id))
        })?;
        let candidates = candidate_ids
            .iter()
            .map(|&id| {
                self.candidates.get(id).map_err(|e| {
                    e.with_context(format!("failed to retrieve resume with ID {}", id))
                })
            })
            .collect::<DeckgenResult<Vec<_>>>()?;
        debug!("References resolved");

        let provider = self.registry.get(provider_name).map_err(|e| {
            e.with_context(format!("failed to resolve provider '{}'", provider_name))
        })?;

        let adapted = ctx
            .run(provider.adapt(&job_ad, &candidates))
            .await
            .map_err(|e| {
                warn!(error = %e, "Adaptation failed");
                e.with_context(format!(
                    "failed to adapt resumes with provider '{}'",
                    provider_name
                ))
            })?;

        let created = self.adapted.create(adapted);
        info!(id = created.id, "Adapted resume stored");
        Ok(created)
    }

    // Job ads

    pub fn get_job_ad(&self, id: EntityId) -> DeckgenResult<JobAd> {
        self.job_ads.get(id)
    }

    pub fn list_job_ads(&self) -> Vec<JobAd> {
        self.job_ads.list()
    }

    pub fn update_job_ad(&self, job_ad: JobAd) -> DeckgenResult<JobAd> {
        self.job_ads.update(job_ad)
    }

    pub fn delete_job_ad(&self, id: EntityId) -> DeckgenResult<()> {
        self.job_ads.delete(id)
    }

    // Candidates

    pub fn get_candidate(&self, id: EntityId) -> DeckgenResult<Candidate> {
        self.candidates.get(id)
    }

    pub fn list_candidates(&self) -> Vec<Candidate> {
        self.candidates.list()
    }

    pub fn update_candidate(&self, candidate: Candidate) -> DeckgenResult<Candidate> {
        self.candidates.update(candidate)
    }

    pub fn delete_candidate(&self, id: EntityId) -> DeckgenResult<()> {
        self.candidates.delete(id)
    }

    // Adapted resumes

    pub fn get_adapted_resume(&self, id: EntityId) -> DeckgenResult<AdaptedResume> {
        self.adapted.get(id)
    }

    pub fn list_adapted_resumes(&self) -> Vec<AdaptedResume> {
        self.adapted.list()
    }

    pub fn update_adapted_resume(&self, adapted: AdaptedResume) -> DeckgenResult<AdaptedResume> {
        self.adapted.update(adapted)
    }

    pub fn delete_adapted_resume(&self, id: EntityId) -> DeckgenResult<()> {
        self.adapted.delete(id)
    }

    /// Live record counts as (job ads, candidates, adapted resumes).
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.job_ads.len(), self.candidates.len(), self.adapted.len())
    }
}
