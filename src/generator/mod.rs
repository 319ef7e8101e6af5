//! Content generation module
//!
//! Turns a topic plus crawled context into a caption and a post body with a
//! single chat completion, and requests an illustrating image separately.
//! The completion provider sits behind [`CompletionProvider`] so the
//! generation policy does not depend on a particular vendor.

mod client;
mod prompt;

pub use client::OpenAiClient;
pub use prompt::{build_context, build_prompt, parse_completion, PLACEHOLDER_CAPTION};

use crate::config::GeneratorConfig;
use crate::crawler::Corpus;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the completion provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request to completion provider failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider response had no {0}")]
    EmptyResponse(&'static str),
}

/// Caption and body drafted for a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub caption: String,
    pub body: String,
}

impl GenerationResult {
    /// True when the completion could not be split into caption and body
    pub fn is_placeholder(&self) -> bool {
        self.caption == PLACEHOLDER_CAPTION
    }
}

/// Generated image, referenced by URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub url: String,
}

/// Black-box text and image completion service
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends one prompt and returns the first candidate's text
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, ProviderError>;

    /// Requests a single image and returns its URL
    async fn generate_image(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Drafts post content from crawled pages
pub struct Generator<P> {
    provider: P,
    temperature: f32,
    max_context_documents: usize,
}

impl<P: CompletionProvider> Generator<P> {
    pub fn new(provider: P, config: &GeneratorConfig) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            max_context_documents: config.max_context_documents,
        }
    }

    /// Drafts a caption and body about `topic` grounded in `corpus`
    ///
    /// An empty corpus is fine; the prompt then carries no context. If the
    /// completion lacks the labeled fields the placeholder caption is used and
    /// the whole output becomes the body.
    pub async fn generate(
        &self,
        topic: &str,
        corpus: &Corpus,
    ) -> Result<GenerationResult, ProviderError> {
        let context = build_context(corpus, self.max_context_documents);
        let prompt = build_prompt(topic, &context);

        tracing::info!(
            "Requesting caption and content for '{}' ({} context documents)",
            topic,
            corpus.len().min(self.max_context_documents)
        );

        let output = self.provider.complete(&prompt, self.temperature).await?;
        let result = parse_completion(&output);

        if result.is_placeholder() {
            tracing::warn!("Completion did not contain CAPTION:/CONTENT: markers; using raw output");
        }

        Ok(result)
    }

    /// Requests an image for `prompt`
    ///
    /// Failures are logged and yield None: a post without an image is still
    /// valid for text-only platforms.
    pub async fn generate_image(&self, prompt: &str) -> Option<ImageAsset> {
        match self.provider.generate_image(prompt).await {
            Ok(url) => {
                tracing::info!("AI image generated: {}", url);
                Some(ImageAsset { url })
            }
            Err(e) => {
                tracing::warn!("Failed to generate image: {}", e);
                None
            }
        }
    }
}
