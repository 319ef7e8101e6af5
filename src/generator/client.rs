//! OpenAI-compatible completion client

use crate::config::{Config, Credentials};
use crate::generator::{CompletionProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

/// Client for the `/chat/completions` and `/images/generations` endpoints
pub struct OpenAiClient {
    api_key: Option<String>,
    http: Client,
    base_url: String,
    model: String,
    image_model: String,
    image_size: String,
}

impl OpenAiClient {
    pub fn new(config: &Config, credentials: &Credentials) -> Self {
        Self {
            api_key: credentials.openai_api_key.clone(),
            http: Client::new(),
            base_url: config.endpoints.completion_api.trim_end_matches('/').to_string(),
            model: config.generator.model.clone(),
            image_model: config.generator.image_model.clone(),
            image_size: config.generator.image_size.clone(),
        }
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key()?)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, ProviderError> {
        tracing::debug!(model = %self.model, "Chat completion request");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response: ChatResponse = self
            .post_json("chat/completions", &request)
            .await?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse("completion choice"))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, ProviderError> {
        tracing::debug!(
            model = %self.image_model,
            size = %self.image_size,
            "Image generation request"
        );

        let request = ImageRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size: &self.image_size,
        };

        let response: ImageResponse = self
            .post_json("images/generations", &request)
            .await?
            .json()
            .await?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or(ProviderError::EmptyResponse("image URL"))
    }
}
