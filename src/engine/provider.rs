use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::{Config, ProviderKind};
use crate::engine::gemini::GeminiProvider;
use crate::engine::openrouter::OpenRouterProvider;
use crate::model::turn::Turn;

/// Failure modes of one upstream generation call. Every variant is absorbed
/// by the response normalizer; none reaches the HTTP layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no credential configured ({0} is unset)")]
    MissingCredential(&'static str),
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("provider reply carried no text")]
    EmptyReply,
}

/// One upstream text-generation service.
///
/// Implementations translate the transcript into their own wire format,
/// perform the call, and hand back the raw reply text. Parsing that text is
/// the normalizer's job, never the provider's.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, history: &[Turn], message: &str) -> Result<String, ProviderError>;
}

/// Build the configured provider. The reqwest client carries an explicit
/// timeout so a hung upstream cannot hang the caller.
pub fn select_provider(config: &Config) -> anyhow::Result<Arc<dyn Provider>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    let provider: Arc<dyn Provider> = match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(
            client,
            config.gemini_api_key.clone(),
            config.model.clone(),
        )),
        ProviderKind::OpenRouter => Arc::new(OpenRouterProvider::new(
            client,
            config.openrouter_api_key.clone(),
            config.model.clone(),
        )),
    };
    Ok(provider)
}
