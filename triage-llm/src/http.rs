//! OpenAI-compatible chat-completions provider over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use triage_core::config::LlmConfig;
use triage_core::errors::{LlmError, TriageResult};
use triage_core::traits::ILlmClient;

pub struct HttpLlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    name: String,
}

impl HttpLlmClient {
    /// Build from config. Returns `None` when no base URL is set or the
    /// HTTP client cannot be constructed — the chain simply stays empty.
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        let base_url = config.base_url.clone()?;
        let http = match reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "failed to build HTTP client for LLM provider");
                return None;
            }
        };
        let name = if config.model.is_empty() {
            "http".to_string()
        } else {
            config.model.clone()
        };
        Some(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            name,
        })
    }

    fn request_error(&self, reason: impl std::fmt::Display) -> LlmError {
        LlmError::RequestFailed {
            provider: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl ILlmClient for HttpLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        max_tokens: u32,
    ) -> TriageResult<String> {
        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": max_tokens,
        });

        let mut request = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.request_error(e))?
            .error_for_status()
            .map_err(|e| self.request_error(e))?;

        let payload: Value = response.json().await.map_err(|e| self.request_error(e))?;

        let text = payload["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: self.name.clone(),
            }
            .into());
        }

        if let Some(usage) = payload.get("usage") {
            debug!(
                provider = %self.name,
                prompt_tokens = usage["prompt_tokens"].as_u64(),
                completion_tokens = usage["completion_tokens"].as_u64(),
                "llm token usage"
            );
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        true
    }
}
