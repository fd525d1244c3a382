use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engine::prompt::SYSTEM_PROMPT;
use crate::engine::provider::{Provider, ProviderError};
use crate::model::turn::Turn;

const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// Two-valued mapping: exactly `user` stays the user; anything else is
/// game-master output and becomes the assistant.
fn map_role(role: &str) -> &'static str {
    if role == "user" {
        "user"
    } else {
        "assistant"
    }
}

/// Build the `messages` array. This API has a dedicated system channel, so
/// the instruction rides as the leading `system` message.
fn build_messages(history: &[Turn], message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new("system", SYSTEM_PROMPT));
    for turn in history {
        messages.push(ChatMessage::new(map_role(&turn.role), turn.text.clone()));
    }
    messages.push(ChatMessage::new("user", message));
    messages
}

fn extract_text(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}

/// OpenAI-chat-style provider, used for OpenRouter (Claude et al.).
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl OpenRouterProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn generate(&self, history: &[Turn], message: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("OPENROUTER_API_KEY"))?;

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_messages(history, message),
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(OPENROUTER_ENDPOINT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        extract_text(parsed).ok_or(ProviderError::EmptyReply)
    }
}
