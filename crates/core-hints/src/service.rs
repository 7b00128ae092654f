use crate::config::{Backend, HintConfig};
use crate::error::{self as hint_error, HintResult};
use crate::prompt::build_prompt;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use snafu::{OptionExt, ResultExt};

pub const MOCK_HINT: &str = "Conceptual Hint (Mock Mode): Based on the requirement, consider which \
fields you need to SELECT and which table contains them. If there are conditions like 'active', \
think about the WHERE clause.";

pub const FALLBACK_HINT: &str = "Mock Mode Fallback (API Error): Consider using the WHERE clause \
to filter your results based on the 'status' column.";

#[async_trait]
pub trait HintService: Send + Sync {
    /// Never fails: an unconfigured or failing backend yields a canned hint.
    async fn generate_hint(&self, question: &str, query: Option<&str>) -> String;
}

pub struct LlmHintService {
    client: reqwest::Client,
    config: HintConfig,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LlmHintService {
    pub fn new(config: HintConfig) -> HintResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context(hint_error::ClientSnafu)?;
        Ok(Self { client, config })
    }

    async fn ask(&self, backend: Backend, api_key: &str, prompt: &str) -> HintResult<String> {
        match backend {
            Backend::Gemini => self.ask_gemini(api_key, prompt).await,
            Backend::OpenAi => self.ask_openai(api_key, prompt).await,
        }
    }

    async fn ask_gemini(&self, api_key: &str, prompt: &str) -> HintResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.gemini_base_url.trim_end_matches('/'),
            self.config.gemini_model
        );
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await
            .context(hint_error::RequestSnafu)?;
        let body: GeminiResponse = checked(response)
            .await?
            .json()
            .await
            .context(hint_error::RequestSnafu)?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .context(hint_error::MissingContentSnafu)
    }

    async fn ask_openai(&self, api_key: &str, prompt: &str) -> HintResult<String> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.openai_base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.config.openai_model,
                "messages": [{ "role": "user", "content": prompt }]
            }))
            .send()
            .await
            .context(hint_error::RequestSnafu)?;
        let body: ChatResponse = checked(response)
            .await?
            .json()
            .await
            .context(hint_error::RequestSnafu)?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context(hint_error::MissingContentSnafu)
    }
}

async fn checked(response: reqwest::Response) -> HintResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    hint_error::StatusSnafu {
        status: status.as_u16(),
        body,
    }
    .fail()
}

#[async_trait]
impl HintService for LlmHintService {
    #[tracing::instrument(name = "HintService::generate_hint", level = "debug", skip(self, query))]
    async fn generate_hint(&self, question: &str, query: Option<&str>) -> String {
        let (Some(backend), Some(api_key)) = (self.config.backend(), self.config.api_key.as_deref())
        else {
            return MOCK_HINT.to_string();
        };
        let prompt = build_prompt(question, query);
        match self.ask(backend, api_key, &prompt).await {
            Ok(hint) => hint,
            Err(err) => {
                tracing::error!(?backend, error = %err, "Hint backend failed");
                FALLBACK_HINT.to_string()
            }
        }
    }
}
