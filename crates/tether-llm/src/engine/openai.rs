//! OpenAI-compatible generation engine

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use tether_config::EngineConfig;
use url::Url;

use super::{GenerationEngine, ObjectGeneration, ObjectRequest, TextGeneration, TextRequest};
use crate::convert::openai::{object_generation, object_request, text_generation, text_request};
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiRequest, OpenAiResponse};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Engine backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiEngine {
    client: Client,
    model: String,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl OpenAiEngine {
    /// Create from engine configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Internal` if the timeout is malformed or the HTTP
    /// client cannot be built.
    pub fn new(config: &EngineConfig) -> Result<Self, LlmError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| LlmError::Internal(e.into()))?,
        };

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout()? {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| LlmError::Internal(e.into()))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    /// Send one chat completion request and decode the reply
    async fn post(&self, wire_request: &OpenAiRequest) -> Result<OpenAiResponse, LlmError> {
        let mut builder = self.client.post(self.completions_url()).json(wire_request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(model = %self.model, error = %e, "engine request failed");
            LlmError::Upstream(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, status = %status, "engine returned error");
            return Err(status_error(status, retry_after, &body));
        }

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        if let Some(usage) = &wire_response.usage {
            tracing::debug!(
                model = %self.model,
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                "engine request completed"
            );
        }

        Ok(wire_response)
    }
}

/// Map a non-success status to the matching error
fn status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> LlmError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            LlmError::InvalidRequest(format!("engine returned {status}: {body}"))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            retry_after: retry_after.unwrap_or(0),
        },
        _ => LlmError::Upstream(format!("engine returned {status}: {body}")),
    }
}

#[async_trait]
impl GenerationEngine for OpenAiEngine {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate_object(&self, request: ObjectRequest) -> Result<ObjectGeneration, LlmError> {
        let response = self.post(&object_request(&self.model, &request)).await?;
        object_generation(&response)
    }

    async fn generate_text(&self, request: TextRequest) -> Result<TextGeneration, LlmError> {
        let response = self.post(&text_request(&self.model, &request)).await?;
        Ok(text_generation(&response))
    }
}
