use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engine::prompt::{INSTRUCTION_ACK, SYSTEM_PROMPT};
use crate::engine::provider::{Provider, ProviderError};
use crate::model::turn::Turn;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

// Every level of the reply envelope is optional; a missing text field is a
// hard failure handled by the caller, not a panic here.
#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl Content {
    fn new(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// The caller's `user` role maps to Gemini's user tag; every other role label
/// is treated as game-master output and maps to the model tag.
fn map_role(role: &str) -> &'static str {
    if role == "user" {
        "user"
    } else {
        "model"
    }
}

/// Build the ordered `contents` array. Gemini is driven here without a
/// dedicated system channel, so the instruction goes in as a leading
/// synthetic user turn anchored by a synthetic model acknowledgement.
fn build_contents(history: &[Turn], message: &str) -> Vec<Content> {
    let mut contents = Vec::with_capacity(history.len() + 3);
    contents.push(Content::new("user", SYSTEM_PROMPT));
    contents.push(Content::new("model", INSTRUCTION_ACK));
    for turn in history {
        contents.push(Content::new(map_role(&turn.role), turn.text.clone()));
    }
    contents.push(Content::new("user", message));
    contents
}

fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().find_map(|part| part.text))
}

/// Gemini REST provider (`models/{model}:generateContent`).
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, history: &[Turn], message: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("GEMINI_API_KEY"))?;

        let url = format!("{BASE_URL}/{}:generateContent?key={api_key}", self.model);
        let body = GenerateContentRequest {
            contents: build_contents(history, message),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed).ok_or(ProviderError::EmptyReply)
    }
}

#[derive(Deserialize)]
struct ModelList {
    models: Option<Vec<ModelEntry>>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

/// Startup self-check: list the models this key can reach and log them, so
/// deployment logs show which model permissions the account actually has.
/// Failures are logged and swallowed.
pub async fn log_available_models(client: &reqwest::Client, api_key: &str) {
    let url = format!("{BASE_URL}?key={api_key}");
    let listing = match client.get(&url).send().await {
        Ok(response) => response.json::<ModelList>().await,
        Err(err) => Err(err),
    };

    match listing {
        Ok(ModelList {
            models: Some(models),
        }) if !models.is_empty() => {
            tracing::info!("API key has access to {} models:", models.len());
            for model in models {
                tracing::info!(" - {}", model.name);
            }
        }
        Ok(_) => {
            tracing::warn!("model listing came back empty; the key may lack permissions or be region-locked");
        }
        Err(err) => {
            tracing::warn!("startup model self-check failed: {err}");
        }
    }
}
