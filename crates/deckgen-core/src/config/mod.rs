//! Configuration system for deckgen.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{DeckgenError, DeckgenResult};
use crate::traits::LlmConfig;

/// Backend family a provider entry talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
}

/// One entry of the `providers` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Disabled providers are known to the registry but cannot be used.
    pub enabled: bool,
    /// Backend family (`openai`, `anthropic`); defaults to the entry name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// API key; never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<SecretString>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// HTTP timeout for a single call to the backend.
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let llm = LlmConfig::default();
        Self {
            enabled: false,
            kind: None,
            api_key: None,
            model: String::new(),
            base_url: None,
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
            request_timeout_secs: llm.request_timeout_secs,
        }
    }
}

impl ProviderConfig {
    /// Resolve the backend family, falling back to the entry name.
    pub fn resolved_kind(&self, name: &str) -> DeckgenResult<ProviderKind> {
        let kind = self.kind.as_deref().unwrap_or(name);
        ProviderKind::from_str(kind).map_err(|_| {
            DeckgenError::config(format!(
                "provider '{}': unknown provider kind '{}' (expected openai or anthropic)",
                name, kind
            ))
        })
    }

    /// Check the entry is usable. Only meaningful for enabled providers.
    pub fn validate(&self, name: &str) -> DeckgenResult<ProviderKind> {
        let kind = self.resolved_kind(name)?;

        let has_key = self
            .api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty());
        if !has_key {
            return Err(DeckgenError::config(format!(
                "provider '{}': api_key is required",
                name
            )));
        }
        if self.model.trim().is_empty() {
            return Err(DeckgenError::config(format!(
                "provider '{}': model is required",
                name
            )));
        }
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url).map_err(|e| {
                DeckgenError::config(format!(
                    "provider '{}': invalid base_url '{}': {}",
                    name, base_url, e
                ))
            })?;
        }
        if self.request_timeout_secs == 0 {
            return Err(DeckgenError::config(format!(
                "provider '{}': request_timeout_secs must be positive",
                name
            )));
        }
        Ok(kind)
    }

    /// Settings handed to the LLM client.
    pub fn to_llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deadline applied to every request, in seconds.
    pub request_timeout_secs: u64,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 8,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, e.g. `info` or `deckgen_core=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    /// Providers keyed by the name clients select them with.
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai = ProviderConfig {
            model: "gpt-5-mini".to_string(),
            ..Default::default()
        };
        Self {
            server: ServerConfig::default(),
            log: LogConfig::default(),
            providers: BTreeMap::from([("openai".to_string(), openai)]),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> DeckgenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DeckgenError::config(format!("cannot read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| DeckgenError::config(e.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| DeckgenError::config(e.to_string()))
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| DeckgenError::config(e.to_string()))
            }
            _ => Err(DeckgenError::config(
                "Unsupported config file format. Use .toml, .json, or .yaml",
            )),
        }
    }

    /// Load from `path` when given, otherwise start from defaults, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> DeckgenResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides read through `lookup` (normally the process environment).
    ///
    /// A key variable also enables the matching provider entry, creating it
    /// with the backend's default model when absent.
    pub fn apply_env<F>(&mut self, lookup: F) -> DeckgenResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DECKGEN_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DECKGEN_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| DeckgenError::config(format!("invalid DECKGEN_PORT '{}'", port)))?;
        }
        if let Some(level) = lookup("DECKGEN_LOG_LEVEL") {
            self.log.level = level;
        }

        for (name, var, default_model) in [
            ("openai", "OPENAI_API_KEY", "gpt-5-mini"),
            ("anthropic", "ANTHROPIC_API_KEY", "claude-sonnet-4-5"),
        ] {
            let Some(key) = lookup(var).filter(|k| !k.trim().is_empty()) else {
                continue;
            };
            let entry = self
                .providers
                .entry(name.to_string())
                .or_insert_with(|| ProviderConfig {
                    model: default_model.to_string(),
                    ..Default::default()
                });
            entry.api_key = Some(SecretString::new(key));
            entry.enabled = true;
        }
        Ok(())
    }

    /// Check server settings. Provider entries are checked by the registry.
    pub fn validate(&self) -> DeckgenResult<()> {
        if self.server.port == 0 {
            return Err(DeckgenError::config("server.port must be non-zero"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(DeckgenError::config(
                "server.request_timeout_secs must be positive",
            ));
        }
        if self.server.max_body_bytes == 0 {
            return Err(DeckgenError::config("server.max_body_bytes must be positive"));
        }
        Ok(())
    }

    /// Render as YAML. Secrets are omitted.
    pub fn to_yaml(&self) -> DeckgenResult<String> {
        serde_yaml::to_string(self).map_err(|e| DeckgenError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 8);
        assert_eq!(config.log.level, "info");
        let openai = &config.providers["openai"];
        assert!(!openai.enabled);
        assert_eq!(openai.model, "gpt-5-mini");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            r#"
[server]
port = 9000

[providers.openai]
enabled = true
api_key = "sk-test"
model = "gpt-4o-mini"

[providers.claude]
kind = "anthropic"
model = "claude-sonnet-4-5"
"#,
        );
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout_secs, 8);
        assert!(config.providers["openai"].enabled);
        assert_eq!(
            config.providers["openai"].api_key.as_ref().unwrap().expose_secret(),
            "sk-test"
        );
        assert_eq!(
            config.providers["claude"].resolved_kind("claude").unwrap(),
            ProviderKind::Anthropic
        );
    }

    #[test]
    fn test_load_yaml_and_json() {
        let yaml = write_config(".yaml", "log:\n  level: debug\n  format: json\n");
        let config = AppConfig::from_file(yaml.path()).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);

        let json = write_config(".json", r#"{"server": {"host": "127.0.0.1"}}"#);
        let config = AppConfig::from_file(json.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".ini", "port=1");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("DECKGEN_PORT", "3000"),
                ("DECKGEN_LOG_LEVEL", "debug"),
                ("OPENAI_API_KEY", "sk-env"),
                ("ANTHROPIC_API_KEY", "ak-env"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.log.level, "debug");
        assert!(config.providers["openai"].enabled);
        assert_eq!(config.providers["openai"].model, "gpt-5-mini");
        assert!(config.providers["anthropic"].enabled);
        assert!(config.providers["anthropic"].validate("anthropic").is_ok());
    }

    #[test]
    fn test_env_invalid_port() {
        let mut config = AppConfig::default();
        let err = config.apply_env(env(&[("DECKGEN_PORT", "eighty")])).unwrap_err();
        assert!(err.message().contains("DECKGEN_PORT"));
    }

    #[test]
    fn test_provider_validation() {
        let mut provider = ProviderConfig {
            enabled: true,
            model: "gpt-5-mini".to_string(),
            ..Default::default()
        };
        assert!(provider.validate("openai").unwrap_err().message().contains("api_key"));

        provider.api_key = Some(SecretString::new("sk".to_string()));
        assert_eq!(provider.validate("openai").unwrap(), ProviderKind::OpenAI);

        provider.base_url = Some("not a url".to_string());
        assert!(provider.validate("openai").unwrap_err().message().contains("base_url"));

        provider.base_url = None;
        provider.model = " ".to_string();
        assert!(provider.validate("openai").unwrap_err().message().contains("model"));

        provider.model = "m".to_string();
        assert!(provider.validate("mistral").unwrap_err().message().contains("unknown provider kind"));
    }

    #[test]
    fn test_dump_omits_secrets() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[("OPENAI_API_KEY", "sk-very-secret")]))
            .unwrap();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("gpt-5-mini"));
        assert!(!yaml.contains("sk-very-secret"));
    }
}
