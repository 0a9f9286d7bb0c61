//! Google Gemini `generateContent` backend.
//!
//! Rate-limit classification happens here, on the raw HTTP status and error
//! body, so the fallback loop never has to look at message text.

use crate::config::LlmConfig;
use crate::error::BackendError;
use crate::llm::{
    build_backend_client, sanitize_api_error,
    traits::{BackendFuture, GenerativeBackend},
    types::PromptPart,
};
use anyhow::Context;
use reqwest::{Client, StatusCode};
use url::Url;

mod types;
use types::{
    ApiError, Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

pub struct GeminiBackend {
    api_key: String,
    api_base: Url,
    generation_config: Option<GenerationConfig>,
    client: Client,
}

impl GeminiBackend {
    /// Build the backend from the `[llm]` config section.
    ///
    /// Fails when no API key is available; there is no anonymous access to
    /// the generation API.
    pub fn from_config(config: &LlmConfig, api_key: Option<&str>) -> anyhow::Result<Self> {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .context(
                "Gemini API key not found. Set GEMINI_API_KEY (or BIJOCHAT_API_KEY); \
                 keys are issued at https://aistudio.google.com/app/apikey",
            )?
            .to_string();
        let api_base = Url::parse(&config.api_base)
            .with_context(|| format!("Invalid llm.api_base: {}", config.api_base))?;
        if api_base.cannot_be_a_base() {
            anyhow::bail!("Invalid llm.api_base: {} is not a base URL", config.api_base);
        }

        let generation_config = (config.temperature.is_some()
            || config.max_output_tokens.is_some())
        .then(|| GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        });

        Ok(Self {
            api_key,
            api_base,
            generation_config,
            client: build_backend_client(
                config.request_timeout_secs,
                config.connect_timeout_secs,
            )?,
        })
    }

    fn endpoint(&self, model: &str) -> Result<Url, BackendError> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let method = format!("{model}:generateContent");
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::failed(model, "api base cannot carry a path"))?
            .pop_if_empty()
            .extend(["v1beta", "models", method.as_str()]);
        Ok(url)
    }

    fn build_request(&self, parts: &[PromptPart]) -> GenerateContentRequest {
        let parts = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text { text } => Part {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                PromptPart::InlineData { mime_type, data } => Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: mime_type.clone(),
                        data: data.clone(),
                    }),
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: self.generation_config.clone(),
        }
    }

    fn extract_text(model: &str, response: &GenerateContentResponse) -> Result<String, BackendError> {
        let candidate = response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .ok_or_else(|| BackendError::failed(model, "No response from Gemini"))?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(BackendError::failed(
                model,
                format!("Gemini returned no text (finish reason: {reason})"),
            ));
        }

        Ok(text)
    }
}

fn mentions_quota(message: &str) -> bool {
    message.to_ascii_lowercase().contains("quota")
}

fn classify_api_error(model: &str, status: StatusCode, error: &ApiError) -> BackendError {
    let message = sanitize_api_error(&error.message);
    let code = error.code.unwrap_or(status.as_u16());
    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || code == 429
        || error.status.as_deref() == Some(RESOURCE_EXHAUSTED)
        || mentions_quota(&message);

    let detail = format!("{code} {}: {message}", error.status.as_deref().unwrap_or(""));
    if rate_limited {
        BackendError::rate_limited(model, detail)
    } else {
        BackendError::failed(model, detail)
    }
}

/// Map a non-success HTTP response onto the retryable/fatal split.
fn classify_failure(model: &str, status: StatusCode, body: &str) -> BackendError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return classify_api_error(model, status, &envelope.error);
    }

    let message = sanitize_api_error(body);
    if status == StatusCode::TOO_MANY_REQUESTS || mentions_quota(&message) {
        BackendError::rate_limited(model, format!("{status}: {message}"))
    } else {
        BackendError::failed(model, format!("{status}: {message}"))
    }
}

impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate_content<'a>(
        &'a self,
        model: &'a str,
        parts: &'a [PromptPart],
    ) -> BackendFuture<'a> {
        Box::pin(async move {
            let url = self.endpoint(model)?;
            let request = self.build_request(parts);
            tracing::debug!(model, parts = parts.len(), "Calling Gemini generateContent");

            let response = self
                .client
                .post(url)
                .header(API_KEY_HEADER, self.api_key.as_str())
                .json(&request)
                .send()
                .await
                .map_err(|e| BackendError::failed(model, sanitize_api_error(&e.to_string())))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| BackendError::failed(model, sanitize_api_error(&e.to_string())))?;

            if !status.is_success() {
                return Err(classify_failure(model, status, &body));
            }

            let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
                BackendError::failed(model, format!("Invalid Gemini response body: {e}"))
            })?;
            if let Some(error) = parsed.error.as_ref() {
                return Err(classify_api_error(model, status, error));
            }
            if let Some(version) = parsed.model_version.as_deref() {
                tracing::debug!(model, version, "Gemini answered");
            }

            Self::extract_text(model, &parsed)
        })
    }

    fn warmup(
        &self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = anyhow::Result<()>> + Send + '_>> {
        Box::pin(async move {
            // Any response proves the TLS connection is up; the status is irrelevant.
            self.client.get(self.api_base.clone()).send().await?;
            Ok(())
        })
    }
}
