//! Error types for deckgen operations.
//!
//! Every failure carries a kind (see [`ErrorKind`]) that callers branch on and
//! a structured [`ErrorCode`] with a stable string form. Workflow layers add
//! context with [`DeckgenError::with_context`], which never changes the kind.

use std::collections::HashMap;
use thiserror::Error;

use deckgen_extractors::ExtractError;

/// Result type alias for deckgen operations.
pub type DeckgenResult<T> = Result<T, DeckgenError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all deckgen operations.
#[derive(Error, Debug)]
pub enum DeckgenError {
    /// Lookup by id or provider name found no match.
    #[error("Not found: {message}")]
    NotFound { message: String, code: ErrorCode },

    /// Caller-supplied input violates a precondition.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        details: HashMap<String, String>,
        suggestion: Option<String>,
    },

    /// Invalid configuration detected at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external provider call or document parsing failed.
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<BoxedSource>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error classification used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Configuration,
    Upstream,
    Internal,
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Not found (NF_xxx)
    NfEntity,
    NfProvider,

    // Validation (VAL_xxx)
    ValInvalidInput,
    ValMissingField,
    ValProviderDisabled,
    ValUnsupportedDocument,

    // Configuration (CFG_xxx)
    CfgInvalid,

    // Upstream (UPS_xxx)
    UpsProviderFailed,
    UpsInvalidResponse,
    UpsTimeout,
    UpsCancelled,
    UpsDocumentParse,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NfEntity => "NF_001",
            ErrorCode::NfProvider => "NF_002",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValMissingField => "VAL_002",
            ErrorCode::ValProviderDisabled => "VAL_003",
            ErrorCode::ValUnsupportedDocument => "VAL_004",
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::UpsProviderFailed => "UPS_001",
            ErrorCode::UpsInvalidResponse => "UPS_002",
            ErrorCode::UpsTimeout => "UPS_003",
            ErrorCode::UpsCancelled => "UPS_004",
            ErrorCode::UpsDocumentParse => "UPS_005",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl DeckgenError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: None,
        }
    }

    /// Create a validation error with suggestion.
    pub fn validation_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: Some(suggestion.into()),
        }
    }

    /// Create a not found error for an entity id.
    pub fn entity_not_found(kind: &str, id: u64) -> Self {
        Self::NotFound {
            message: format!("{} with ID {} not found", kind, id),
            code: ErrorCode::NfEntity,
        }
    }

    /// Create a not found error for a provider name.
    pub fn provider_not_found(name: &str) -> Self {
        Self::NotFound {
            message: format!("provider '{}' is not supported or not enabled in config", name),
            code: ErrorCode::NfProvider,
        }
    }

    /// Create a validation error for a provider that is configured but disabled.
    pub fn provider_disabled(name: &str) -> Self {
        Self::Validation {
            message: format!("provider '{}' is disabled", name),
            code: ErrorCode::ValProviderDisabled,
            details: HashMap::from([("provider".to_string(), name.to_string())]),
            suggestion: Some(format!(
                "Set enabled = true for provider '{}' and restart",
                name
            )),
        }
    }

    /// Create an upstream error for a failed provider call.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            code: ErrorCode::UpsProviderFailed,
            source: None,
        }
    }

    /// Create an upstream error wrapping its cause.
    pub fn upstream_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Upstream {
            message: message.into(),
            code: ErrorCode::UpsProviderFailed,
            source: Some(Box::new(source)),
        }
    }

    /// Create an upstream error for provider output that could not be used.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            code: ErrorCode::UpsInvalidResponse,
            source: None,
        }
    }

    /// Create an upstream error for an expired deadline.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            code: ErrorCode::UpsTimeout,
            source: None,
        }
    }

    /// Create an upstream error for a cancelled request.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            code: ErrorCode::UpsCancelled,
            source: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Prefix the message with workflow context, keeping kind, code and source.
    pub fn with_context(self, context: impl std::fmt::Display) -> Self {
        let prefix = |message: String| format!("{}: {}", context, message);
        match self {
            Self::NotFound { message, code } => Self::NotFound {
                message: prefix(message),
                code,
            },
            Self::Validation {
                message,
                code,
                details,
                suggestion,
            } => Self::Validation {
                message: prefix(message),
                code,
                details,
                suggestion,
            },
            Self::Configuration(message) => Self::Configuration(prefix(message)),
            Self::Upstream {
                message,
                code,
                source,
            } => Self::Upstream {
                message: prefix(message),
                code,
                source,
            },
            Self::Internal(message) => Self::Internal(prefix(message)),
            other @ (Self::Io(_) | Self::Serialization(_)) => {
                Self::Internal(prefix(other.to_string()))
            }
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Io(_) | Self::Serialization(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Upstream { code, .. } => *code,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            _ => ErrorCode::Internal,
        }
    }

    /// Message without the kind prefix added by `Display`.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message, .. }
            | Self::Validation { message, .. }
            | Self::Upstream { message, .. }
            | Self::Configuration(message)
            | Self::Internal(message) => message.clone(),
            Self::Io(e) => e.to_string(),
            Self::Serialization(e) => e.to_string(),
        }
    }

    /// Whether the failure was an expired deadline.
    pub fn is_timeout(&self) -> bool {
        self.code() == ErrorCode::UpsTimeout
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::NotFound {
                code: ErrorCode::NfProvider,
                ..
            } => Some("Check the provider name against the enabled providers"),
            Self::NotFound { .. } => Some("Please check the ID and ensure it exists"),
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::Upstream {
                code: ErrorCode::UpsDocumentParse,
                ..
            } => Some("Please check that the uploaded file is not corrupted"),
            Self::Upstream { .. } => Some("Please check your LLM provider configuration"),
            _ => None,
        }
    }
}

impl From<ExtractError> for DeckgenError {
    fn from(err: ExtractError) -> Self {
        if err.is_unsupported() {
            return Self::Validation {
                message: err.to_string(),
                code: ErrorCode::ValUnsupportedDocument,
                details: HashMap::new(),
                suggestion: Some("Upload a PDF, DOCX or plain text file".to_string()),
            };
        }
        Self::Upstream {
            message: format!("could not parse document: {}", err),
            code: ErrorCode::UpsDocumentParse,
            source: Some(Box::new(err)),
        }
    }
}
