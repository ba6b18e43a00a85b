//! Extraction provider backed by a chat LLM.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use deckgen_extractors::ParsedDocument;

use super::json_parser::parse_reply;
use super::prompts::{
    adaptation_prompt, build_adaptation_message, build_document_message,
    job_ad_extraction_prompt, resume_extraction_prompt,
};
use crate::error::{DeckgenError, DeckgenResult};
use crate::traits::{ExtractionProvider, GenerationOptions, Llm, ResponseFormat};
use crate::types::{AdaptedResume, Candidate, JobAd, Message};

/// [`ExtractionProvider`] that prompts an [`Llm`] for JSON and parses the reply.
pub struct LlmExtractionProvider {
    name: String,
    llm: Arc<dyn Llm>,
}

impl LlmExtractionProvider {
    /// Wrap an LLM client under the given provider name.
    pub fn new(name: impl Into<String>, llm: Arc<dyn Llm>) -> Self {
        Self {
            name: name.into(),
            llm,
        }
    }

    /// Provider name used in logs and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model used by the wrapped client.
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    fn options(&self) -> GenerationOptions {
        if self.llm.supports_json_mode() {
            GenerationOptions::json()
        } else {
            GenerationOptions {
                response_format: Some(ResponseFormat::Text),
                ..Default::default()
            }
        }
    }

    async fn complete(&self, system: String, user: String) -> DeckgenResult<String> {
        let messages = [Message::system(system), Message::user(user)];
        let response = self.llm.generate(&messages, Some(self.options())).await?;

        if let Some(usage) = &response.usage {
            debug!(
                provider = %self.name,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "LLM call finished"
            );
        }

        response
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| DeckgenError::invalid_response("LLM returned no content"))
    }
}

#[async_trait]
impl ExtractionProvider for LlmExtractionProvider {
    #[instrument(skip_all, fields(provider = %self.name, document = %document.name))]
    async fn extract_candidate(&self, document: &ParsedDocument) -> DeckgenResult<Candidate> {
        let reply = self
            .complete(
                resume_extraction_prompt(),
                build_document_message("resume", document),
            )
            .await?;
        parse_reply(&reply, "resume")
    }

    #[instrument(skip_all, fields(provider = %self.name, document = %document.name))]
    async fn extract_job_ad(&self, document: &ParsedDocument) -> DeckgenResult<JobAd> {
        let reply = self
            .complete(
                job_ad_extraction_prompt(),
                build_document_message("job ad", document),
            )
            .await?;
        let mut job_ad: JobAd = parse_reply(&reply, "job ad")?;
        if job_ad.raw_text.trim().is_empty() {
            job_ad.raw_text = document.text.clone();
        }
        Ok(job_ad)
    }

    #[instrument(skip_all, fields(provider = %self.name, resumes = candidates.len()))]
    async fn adapt(
        &self,
        job_ad: &JobAd,
        candidates: &[Candidate],
    ) -> DeckgenResult<AdaptedResume> {
        if candidates.is_empty() {
            return Err(DeckgenError::validation(
                "at least one resume must be provided for adaptation",
            ));
        }
        let reply = self
            .complete(
                adaptation_prompt(),
                build_adaptation_message(job_ad, candidates)?,
            )
            .await?;
        let resume: Candidate = parse_reply(&reply, "adapted resume")?;
        Ok(AdaptedResume::new(job_ad.clone(), resume))
    }
}
