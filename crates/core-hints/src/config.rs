use std::time::Duration;

pub const PLACEHOLDER_API_KEY: &str = "your_llm_api_key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Gemini,
    OpenAi,
}

#[derive(Clone)]
pub struct HintConfig {
    pub api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub request_timeout: Duration,
}

// api key stays out of logs
impl std::fmt::Debug for HintConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HintConfig")
            .field("backend", &self.backend())
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl HintConfig {
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Backend chosen by the shape of the api key, `None` when no usable key is set.
    #[must_use]
    pub fn backend(&self) -> Option<Backend> {
        let key = self.api_key.as_deref()?;
        if key.len() <= 10 || key == PLACEHOLDER_API_KEY {
            return None;
        }
        if key.starts_with("AIza") {
            Some(Backend::Gemini)
        } else {
            Some(Backend::OpenAi)
        }
    }
}
