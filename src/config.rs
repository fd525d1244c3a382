use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_OPENROUTER_MODEL: &str = "anthropic/claude-3.5-sonnet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenRouter,
}

/// Process configuration, read from the environment exactly once at startup
/// and passed by reference from there on.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub gemini_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub model: String,
    pub port: u16,
    pub upstream_timeout_secs: u64,
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    /// A missing credential is logged, not fatal: the service still starts
    /// and every chat request degrades to the scripted path.
    pub fn from_env() -> Self {
        let provider = match non_empty("PROVIDER").as_deref() {
            Some("openrouter") => ProviderKind::OpenRouter,
            Some("gemini") | None => ProviderKind::Gemini,
            Some(other) => {
                tracing::warn!("unknown PROVIDER '{other}', defaulting to gemini");
                ProviderKind::Gemini
            }
        };

        let gemini_api_key = non_empty("GEMINI_API_KEY");
        let openrouter_api_key = non_empty("OPENROUTER_API_KEY");
        match provider {
            ProviderKind::Gemini if gemini_api_key.is_none() => {
                tracing::warn!("GEMINI_API_KEY is unset; every request will use the scripted fallback");
            }
            ProviderKind::OpenRouter if openrouter_api_key.is_none() => {
                tracing::warn!("OPENROUTER_API_KEY is unset; every request will use the scripted fallback");
            }
            _ => {}
        }

        let model = non_empty("MODEL").unwrap_or_else(|| {
            match provider {
                ProviderKind::Gemini => DEFAULT_GEMINI_MODEL,
                ProviderKind::OpenRouter => DEFAULT_OPENROUTER_MODEL,
            }
            .to_string()
        });

        let port = non_empty("PORT")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let upstream_timeout_secs = non_empty("UPSTREAM_TIMEOUT_SECS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Self {
            provider,
            gemini_api_key,
            openrouter_api_key,
            model,
            port,
            upstream_timeout_secs,
        }
    }
}
