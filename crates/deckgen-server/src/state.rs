//! Server state management.

use std::sync::Arc;
use std::time::Duration;

use deckgen_core::config::ServerConfig;
use deckgen_core::{OrchestrationService, ProviderRegistry, RequestContext};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrchestrationService>,
    /// Deadline applied to every request from the moment it is handled.
    pub request_timeout: Duration,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create application state around a registry with empty stores.
    pub fn new(registry: ProviderRegistry, config: &ServerConfig) -> Self {
        Self::with_service(Arc::new(OrchestrationService::new(Arc::new(registry))), config)
    }

    /// Create application state around an existing service.
    pub fn with_service(service: Arc<OrchestrationService>, config: &ServerConfig) -> Self {
        Self {
            service,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            max_body_bytes: config.max_body_bytes,
        }
    }

    /// Fresh context for one request.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
