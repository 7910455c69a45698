use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config::MemebotConfig;
use crate::foundation::error::{MemeError, MemeResult};
use crate::ideas::parse::parse_idea_batch;
use crate::ideas::prompts::{
    IDEA_TEMPERATURE, SYSTEM_INSTRUCTION, idea_prompt, image_prompt, response_schema,
};
use crate::model::idea::{Idea, IdeaRequest};
use crate::remote::{IdeaGenerator, ImageGenerator};

/// Base URL of the Generative Language REST API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_owned),
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// First inline payload of the first candidate.
    fn inline_data(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| !d.data.is_empty())
    }
}

/// Gemini-backed implementation of both remote collaborators.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    idea_model: String,
    image_model: String,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("idea_model", &self.idea_model)
            .field("image_model", &self.image_model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from `config`. A missing credential is a configuration error.
    pub fn new(config: &MemebotConfig) -> MemeResult<Self> {
        let api_key = config.require_api_key()?.to_owned();
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| MemeError::config(format!("http client: {e}")))?;
        Ok(Self {
            http,
            api_key,
            base_url: GEMINI_API_BASE.to_owned(),
            idea_model: config.idea_model.clone(),
            image_model: config.image_model.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Point the client at another endpoint root (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> MemeResult<GenerateContentResponse> {
        let call = async {
            let response = self
                .http
                .post(self.endpoint(model))
                .header("x-goog-api-key", &self.api_key)
                .json(body)
                .send()
                .await
                .map_err(|e| MemeError::request(format!("transport: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(MemeError::request(format!(
                    "status {}: {message}",
                    status.as_u16()
                )));
            }

            response
                .json::<GenerateContentResponse>()
                .await
                .map_err(|e| MemeError::request(format!("undecodable response: {e}")))
        };

        with_timeout(self.timeout, call).await.inspect_err(|e| {
            tracing::warn!(model, error = %e, "gemini call failed");
        })
    }
}

/// Bound `fut` by `limit`; expiry becomes a request error.
pub(crate) async fn with_timeout<T>(
    limit: Duration,
    fut: impl Future<Output = MemeResult<T>>,
) -> MemeResult<T> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| MemeError::request(format!("timed out after {}s", limit.as_secs_f32())))?
}

#[async_trait]
impl IdeaGenerator for GeminiClient {
    #[tracing::instrument(skip_all, fields(model = %self.idea_model))]
    async fn generate_ideas(&self, request: &IdeaRequest) -> MemeResult<Vec<Idea>> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), idea_prompt(request))],
            system_instruction: Some(Content::text(None, SYSTEM_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: IDEA_TEMPERATURE,
            }),
        };
        let response = self.generate_content(&self.idea_model, &body).await?;
        let text = response
            .text()
            .ok_or_else(|| MemeError::request("empty response from idea model"))?;
        tracing::debug!(bytes = text.len(), "idea payload received");
        parse_idea_batch(&text)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    #[tracing::instrument(skip_all, fields(model = %self.image_model))]
    async fn generate_image(&self, visual_description: &str) -> MemeResult<Vec<u8>> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), image_prompt(visual_description))],
            system_instruction: None,
            generation_config: None,
        };
        let response = self.generate_content(&self.image_model, &body).await?;
        let inline = response
            .inline_data()
            .ok_or_else(|| MemeError::request("no image data found in response"))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(inline.data.trim())
            .map_err(|e| MemeError::request(format!("bad image payload: {e}")))?;
        tracing::debug!(mime = %inline.mime_type, bytes = bytes.len(), "image payload received");
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/remote/gemini.rs"]
mod tests;
