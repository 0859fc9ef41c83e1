use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::ConciergeError;
use super::{ChatMessage, ChatRole};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const CHAT_TEMPERATURE: f64 = 0.7;

/// A text + image generation backend. One request per call; no retry, no timeout.
pub trait GenerativeModel: Send + Sync {
    /// Next model turn given the system instruction and the conversation so far.
    fn generate_text(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> impl Future<Output = Result<String, ConciergeError>> + Send;

    /// A `data:` URL for an image matching `prompt`.
    fn generate_image(&self, prompt: &str) -> impl Future<Output = Result<String, ConciergeError>> + Send;
}

/// Gemini REST backend.
#[derive(Clone)]
pub struct GeminiModel {
    http: reqwest::Client,
    api_key: String,
    chat_model: String,
    image_model: String,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, chat_model: impl Into<String>, image_model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            chat_model: chat_model.into(),
            image_model: image_model.into(),
        }
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        model: &str,
        method: &str,
        body: &B,
    ) -> Result<R, ConciergeError> {
        let url = format!("{API_BASE}/{model}:{method}");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConciergeError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<R>().await?)
    }
}

// --- Wire types ---

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
struct ImageInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageParameters {
    sample_count: u32,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<ImageInstance>,
    parameters: ImageParameters,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

fn text_content(role: Option<&str>, text: &str) -> Content {
    Content {
        role: role.map(str::to_string),
        parts: vec![Part { text: text.to_string() }],
    }
}

fn build_chat_request(system_instruction: &str, history: &[ChatMessage]) -> GenerateContentRequest {
    let contents = history
        .iter()
        .map(|message| {
            let role = match message.role {
                ChatRole::User => "user",
                ChatRole::Model => "model",
            };
            text_content(Some(role), &message.text)
        })
        .collect();

    GenerateContentRequest {
        system_instruction: text_content(None, system_instruction),
        contents,
        generation_config: GenerationConfig {
            temperature: CHAT_TEMPERATURE,
        },
    }
}

fn first_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .concat()
}

fn first_image(response: PredictResponse) -> Option<String> {
    response.predictions.into_iter().find_map(|prediction| {
        let data = prediction.bytes_base64_encoded?;
        let mime = prediction.mime_type.unwrap_or_else(|| "image/png".to_string());
        Some(format!("data:{mime};base64,{data}"))
    })
}

impl GenerativeModel for GeminiModel {
    #[instrument(skip_all, fields(model = %self.chat_model, turns = history.len()))]
    async fn generate_text(&self, system_instruction: &str, history: &[ChatMessage]) -> Result<String, ConciergeError> {
        debug!("Sending chat request");
        let request = build_chat_request(system_instruction, history);
        let response: GenerateContentResponse = self.post(&self.chat_model, "generateContent", &request).await?;
        Ok(first_text(response))
    }

    #[instrument(skip_all, fields(model = %self.image_model))]
    async fn generate_image(&self, prompt: &str) -> Result<String, ConciergeError> {
        debug!("Sending image request");
        let request = PredictRequest {
            instances: vec![ImageInstance {
                prompt: prompt.to_string(),
            }],
            parameters: ImageParameters { sample_count: 1 },
        };
        let response: PredictResponse = self.post(&self.image_model, "predict", &request).await?;
        first_image(response).ok_or(ConciergeError::EmptyResponse)
    }
}
