//! Factory for LLM clients and the provider registry built on them.

use std::collections::BTreeMap;
use std::sync::Arc;

use deckgen_core::config::{ProviderConfig, ProviderKind};
use deckgen_core::error::DeckgenResult;
use deckgen_core::provider::LlmExtractionProvider;
use deckgen_core::registry::ProviderRegistry;
use deckgen_core::traits::{ExtractionProvider, Llm, LlmConfig};

#[cfg(feature = "anthropic")]
use crate::anthropic::AnthropicLlm;
use crate::openai::OpenAILlm;

/// Factory for creating LLM clients and extraction providers.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create an LLM client for the given backend.
    pub fn create_llm(kind: ProviderKind, config: LlmConfig) -> DeckgenResult<Arc<dyn Llm>> {
        match kind {
            ProviderKind::OpenAI => Ok(Arc::new(OpenAILlm::new(config)?)),
            #[cfg(feature = "anthropic")]
            ProviderKind::Anthropic => Ok(Arc::new(AnthropicLlm::new(config)?)),
            #[cfg(not(feature = "anthropic"))]
            ProviderKind::Anthropic => Err(deckgen_core::DeckgenError::config(
                "Anthropic feature not enabled. Enable the 'anthropic' feature.",
            )),
        }
    }

    /// Create the extraction provider for one configured entry.
    pub fn create_provider(
        name: &str,
        kind: ProviderKind,
        config: &ProviderConfig,
    ) -> DeckgenResult<Arc<dyn ExtractionProvider>> {
        let llm = Self::create_llm(kind, config.to_llm_config())?;
        Ok(Arc::new(LlmExtractionProvider::new(name, llm)))
    }

    /// Build the registry from the `providers` table.
    pub fn registry(configs: &BTreeMap<String, ProviderConfig>) -> DeckgenResult<ProviderRegistry> {
        ProviderRegistry::from_config(configs, Self::create_provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_core::error::{ErrorCode, ErrorKind};
    use secrecy::SecretString;

    fn entry(kind: Option<&str>, enabled: bool) -> ProviderConfig {
        ProviderConfig {
            enabled,
            kind: kind.map(str::to_string),
            api_key: Some(SecretString::new("key".to_string())),
            model: "some-model".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_registry_from_config() {
        let configs = BTreeMap::from([
            ("openai".to_string(), entry(None, true)),
            ("claude".to_string(), entry(Some("anthropic"), true)),
            ("backup".to_string(), entry(Some("openai"), false)),
        ]);

        let registry = ProviderFactory::registry(&configs).unwrap();
        assert_eq!(registry.names(), vec!["claude", "openai"]);
        assert_eq!(
            registry.get("backup").err().unwrap().code(),
            ErrorCode::ValProviderDisabled
        );
    }

    #[test]
    fn test_registry_rejects_missing_key() {
        let mut config = entry(None, true);
        config.api_key = None;
        let configs = BTreeMap::from([("openai".to_string(), config)]);

        let err = ProviderFactory::registry(&configs).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_default_config_builds_empty_registry() {
        let config = deckgen_core::AppConfig::default();
        let registry = ProviderFactory::registry(&config.providers).unwrap();
        assert!(registry.is_empty());
        assert_eq!(
            registry.get("openai").err().unwrap().kind(),
            ErrorKind::Validation
        );
    }
}
