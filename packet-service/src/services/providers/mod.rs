//! AI provider abstraction and implementations.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Content blocked by provider safety filters")]
    ContentFiltered,
}

/// Trait for text completion providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one prompt and return the model's text verbatim.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Cheap configuration check used by the readiness probe.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) | ProviderError::RateLimited => {
                AppError::ServiceUnavailable(err.to_string())
            }
            ProviderError::ApiError(_)
            | ProviderError::NetworkError(_)
            | ProviderError::ContentFiltered => AppError::BadGateway(err.to_string()),
        }
    }
}
