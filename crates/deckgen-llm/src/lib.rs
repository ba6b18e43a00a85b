//! deckgen-llm - LLM clients for deckgen.
//!
//! This crate provides the chat model clients behind deckgen's extraction
//! providers and the factory that turns the `providers` configuration table
//! into a [`ProviderRegistry`](deckgen_core::ProviderRegistry).
//!
//! # Supported Providers
//!
//! - **OpenAI** (feature: `openai`) - GPT-5, GPT-4o, etc.
//! - **Anthropic** (feature: `anthropic`) - Claude Sonnet, Claude Haiku, etc.
//!
//! # Example
//!
//! ```ignore
//! use deckgen_llm::ProviderFactory;
//!
//! let config = AppConfig::load(None)?;
//! let registry = ProviderFactory::registry(&config.providers)?;
//! ```

#[cfg(feature = "anthropic")]
mod anthropic;
mod factory;
mod openai;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicLlm;
pub use factory::ProviderFactory;
pub use openai::OpenAILlm;

// Re-export core types for convenience
pub use deckgen_core::config::ProviderKind;
pub use deckgen_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat};
