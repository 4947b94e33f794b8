//! Minimal chat-completions client used by specialists to phrase answers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ureq::Agent;

use crate::agent::StepError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Anything that can turn a conversation into a reply.
pub trait LanguageModel {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, StepError>;
}

/// Builder returned by [`crate::Ctx::llm`].
pub struct LlmRequest<'a> {
    model: Option<&'a dyn LanguageModel>,
    messages: Vec<ChatMessage>,
}

impl<'a> LlmRequest<'a> {
    pub(crate) fn new(model: Option<&'a dyn LanguageModel>) -> Self {
        Self {
            model,
            messages: Vec::new(),
        }
    }

    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: Role::System,
            content: content.into(),
        });
        self
    }

    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.into(),
        });
        self
    }

    pub fn send(self) -> Result<String, StepError> {
        let model = self
            .model
            .ok_or_else(|| StepError::invalid("no language model configured"))?;
        model.complete(&self.messages)
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` backend over `ureq`.
pub struct ChatCompletions {
    config: LlmConfig,
    agent: Agent,
}

impl ChatCompletions {
    pub fn new(config: LlmConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        Self { config, agent }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

impl LanguageModel for ChatCompletions {
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, StepError> {
        let url = self.endpoint();
        debug!(model = %self.config.model, messages = messages.len(), "chat completion request");

        let body = CompletionBody {
            model: &self.config.model,
            messages,
        };

        let response: CompletionResponse = self
            .agent
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send_json(&body)?
            .body_mut()
            .read_json()?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| StepError::transient("model returned an empty completion"))
    }
}
