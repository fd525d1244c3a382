mod config;
mod engine;
mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::config::{Config, ProviderKind};
use crate::engine::gemini;
use crate::engine::provider::select_provider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("courtroom_engine=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    let provider = select_provider(&config)?;

    // Deployment logs show which models the key can actually reach.
    if config.provider == ProviderKind::Gemini {
        if let Some(api_key) = config.gemini_api_key.clone() {
            tokio::spawn(async move {
                let client = reqwest::Client::new();
                gemini::log_available_models(&client, &api_key).await;
            });
        }
    }

    server::http::run(provider, config.port).await
}
