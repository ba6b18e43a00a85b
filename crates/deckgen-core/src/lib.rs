//! deckgen-core - Core library for deckgen.
//!
//! This crate provides the entity types, in-memory stores, the provider
//! registry and the orchestration workflows that turn uploaded job ads and
//! resumes into structured records and tailored resumes.
//!
//! # Example
//!
//! ```ignore
//! use deckgen_core::{OrchestrationService, ProviderRegistry, RequestContext};
//! use deckgen_extractors::TextDocument;
//!
//! let registry = ProviderRegistry::builder().provider("stub", provider).build();
//! let service = OrchestrationService::new(Arc::new(registry));
//! let ctx = RequestContext::with_timeout(Duration::from_secs(8));
//!
//! let job = service
//!     .extract_and_store_job_ad(&ctx, &TextDocument::new("ad.txt", text), "stub")
//!     .await?;
//! let adapted = service.adapt_candidates(&ctx, job.id, &[1], "stub").await?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod provider;
pub mod registry;
pub mod service;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, LogConfig, LogFormat, ProviderConfig, ProviderKind, ServerConfig};
pub use context::RequestContext;
pub use error::{DeckgenError, DeckgenResult, ErrorCode, ErrorKind};
pub use provider::LlmExtractionProvider;
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};
pub use service::OrchestrationService;
pub use store::EntityStore;
pub use traits::{
    ExtractionProvider, GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat,
    TokenUsage,
};
pub use types::{
    AdaptedResume, Candidate, Entity, EntityId, EntityKind, Experience, JobAd, Message,
    MessageRole,
};
