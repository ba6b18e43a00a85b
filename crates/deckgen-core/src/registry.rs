//! Named extraction providers, fixed at startup.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::{DeckgenError, DeckgenResult};
use crate::traits::ExtractionProvider;

/// Immutable name-to-provider table shared by every request.
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn ExtractionProvider>>,
    disabled: BTreeSet<String>,
}

impl ProviderRegistry {
    /// Start assembling a registry from ready-made providers.
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// Build from configuration, constructing each enabled provider with `build`.
    ///
    /// Every enabled entry is validated first; the first invalid one aborts
    /// construction. Disabled entries are recorded but never built.
    pub fn from_config<F>(configs: &BTreeMap<String, ProviderConfig>, build: F) -> DeckgenResult<Self>
    where
        F: Fn(&str, ProviderKind, &ProviderConfig) -> DeckgenResult<Arc<dyn ExtractionProvider>>,
    {
        let mut builder = Self::builder();
        for (name, config) in configs {
            if !config.enabled {
                debug!(provider = %name, "Provider disabled, skipping");
                builder = builder.disabled(name.clone());
                continue;
            }
            let kind = config.validate(name)?;
            let provider = build(name, kind, config)
                .map_err(|e| e.with_context(format!("failed to initialize provider '{}'", name)))?;
            info!(provider = %name, kind = %kind, model = %config.model, "Provider registered");
            builder = builder.provider(name.clone(), provider);
        }
        Ok(builder.build())
    }

    /// Look up an enabled provider by name.
    pub fn get(&self, name: &str) -> DeckgenResult<Arc<dyn ExtractionProvider>> {
        if let Some(provider) = self.providers.get(name) {
            return Ok(Arc::clone(provider));
        }
        if self.disabled.contains(name) {
            return Err(DeckgenError::provider_disabled(name));
        }
        Err(DeckgenError::provider_not_found(name))
    }

    /// Names of the enabled providers, sorted.
    pub fn names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Number of enabled providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Builder for [`ProviderRegistry`].
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    providers: BTreeMap<String, Arc<dyn ExtractionProvider>>,
    disabled: BTreeSet<String>,
}

impl ProviderRegistryBuilder {
    /// Register a provider under `name`, replacing any earlier one.
    pub fn provider(mut self, name: impl Into<String>, provider: Arc<dyn ExtractionProvider>) -> Self {
        let name = name.into();
        self.disabled.remove(&name);
        self.providers.insert(name, provider);
        self
    }

    /// Record `name` as configured but disabled.
    pub fn disabled(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.providers.contains_key(&name) {
            self.disabled.insert(name);
        }
        self
    }

    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            providers: self.providers,
            disabled: self.disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ErrorKind};
    use crate::types::{AdaptedResume, Candidate, JobAd};
    use async_trait::async_trait;
    use deckgen_extractors::ParsedDocument;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullProvider;

    #[async_trait]
    impl ExtractionProvider for NullProvider {
        async fn extract_candidate(&self, _: &ParsedDocument) -> DeckgenResult<Candidate> {
            Ok(Candidate::default())
        }

        async fn extract_job_ad(&self, _: &ParsedDocument) -> DeckgenResult<JobAd> {
            Ok(JobAd::default())
        }

        async fn adapt(&self, job_ad: &JobAd, _: &[Candidate]) -> DeckgenResult<AdaptedResume> {
            Ok(AdaptedResume::new(job_ad.clone(), Candidate::default()))
        }
    }

    fn enabled(model: &str, key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: model.to_string(),
            api_key: key.map(|k| SecretString::new(k.to_string())),
            ..Default::default()
        }
    }

    fn null_build(
        _: &str,
        _: ProviderKind,
        _: &ProviderConfig,
    ) -> DeckgenResult<Arc<dyn ExtractionProvider>> {
        Ok(Arc::new(NullProvider))
    }

    #[test]
    fn test_lookup_enabled_disabled_unknown() {
        let registry = ProviderRegistry::builder()
            .provider("stub", Arc::new(NullProvider))
            .disabled("anthropic")
            .build();

        assert!(registry.get("stub").is_ok());

        let err = registry.get("anthropic").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), ErrorCode::ValProviderDisabled);

        let err = registry.get("mistral").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.code(), ErrorCode::NfProvider);
    }

    #[test]
    fn test_from_config_skips_disabled() {
        let built = AtomicUsize::new(0);
        let configs = BTreeMap::from([
            ("openai".to_string(), enabled("gpt-5-mini", Some("sk"))),
            (
                "anthropic".to_string(),
                ProviderConfig {
                    enabled: false,
                    ..Default::default()
                },
            ),
        ]);

        let registry = ProviderRegistry::from_config(&configs, |name, kind, config| {
            built.fetch_add(1, Ordering::SeqCst);
            assert_eq!(name, "openai");
            assert_eq!(kind, ProviderKind::OpenAI);
            null_build(name, kind, config)
        })
        .unwrap();

        assert_eq!(built.load(Ordering::SeqCst), 1);
        assert_eq!(registry.names(), vec!["openai"]);
        assert_eq!(
            registry.get("anthropic").err().unwrap().code(),
            ErrorCode::ValProviderDisabled
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_enabled_provider() {
        for config in [enabled("gpt-5-mini", None), enabled("", Some("sk")), enabled("m", Some(" "))] {
            let configs = BTreeMap::from([("openai".to_string(), config)]);
            let err = ProviderRegistry::from_config(&configs, null_build).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(err.message().contains("openai"));
        }
    }

    #[test]
    fn test_from_config_unknown_kind() {
        let configs = BTreeMap::from([("local".to_string(), enabled("llama3", Some("k")))]);
        let err = ProviderRegistry::from_config(&configs, null_build).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_names_sorted() {
        let registry = ProviderRegistry::builder()
            .provider("zeta", Arc::new(NullProvider))
            .provider("alpha", Arc::new(NullProvider))
            .build();
        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
