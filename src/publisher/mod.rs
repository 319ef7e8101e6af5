//! Publishing module
//!
//! Fans a finished post out to the selected platform adapters:
//! - Facebook: photo upload or feed status
//! - Instagram: media container, then publish
//! - Twitter: OAuth1-signed status update
//! - LinkedIn: register upload, upload bytes, create share
//!
//! Each platform is attempted independently. A failure is recorded in the
//! [`PublishReport`] for that platform and the next platform is still tried.

mod facebook;
mod image;
mod instagram;
mod linkedin;
pub mod oauth;
mod platform;
mod twitter;

pub use facebook::FacebookAdapter;
pub use image::{download_image, resolve_content_type, DownloadedImage, DEFAULT_IMAGE_TYPE};
pub use instagram::InstagramAdapter;
pub use linkedin::LinkedInAdapter;
pub use platform::{Platform, PlatformSet, SelectionError};
pub use twitter::TwitterAdapter;

use crate::config::{Config, Credentials};
use crate::generator::ImageAsset;
use chrono::{DateTime, Utc};
use reqwest::Client;
use thiserror::Error;

/// Errors raised by a platform adapter
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("{step} failed with HTTP {status}: {body}")]
    Http {
        step: &'static str,
        status: u16,
        body: String,
    },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    MalformedResponse(String),
}

/// What happened on one platform
#[derive(Debug)]
pub enum PublishOutcome {
    /// The post is live; carries the platform's post id when returned
    Published { id: Option<String> },

    /// The platform accepted the post for later publication
    Scheduled {
        id: Option<String>,
        publish_at: DateTime<Utc>,
    },

    /// A precondition for this platform was not met (e.g. no image)
    Skipped { reason: String },

    /// The platform cannot do what was asked (e.g. native scheduling)
    Unsupported { reason: String },

    /// The platform call failed
    Failed(PublishError),
}

impl PublishOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Maps an adapter result to Published or Failed
    pub fn published(result: Result<Option<String>, PublishError>) -> Self {
        match result {
            Ok(id) => Self::Published { id },
            Err(e) => Self::Failed(e),
        }
    }

    /// Maps an adapter result to Scheduled or Failed
    pub fn scheduled(
        result: Result<Option<String>, PublishError>,
        publish_at: DateTime<Utc>,
    ) -> Self {
        match result {
            Ok(id) => Self::Scheduled { id, publish_at },
            Err(e) => Self::Failed(e),
        }
    }
}

/// Per-platform outcomes of one publish or schedule run
#[derive(Debug, Default)]
pub struct PublishReport {
    entries: Vec<(Platform, PublishOutcome)>,
}

impl PublishReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records and logs the outcome for a platform
    pub fn record(&mut self, platform: Platform, outcome: PublishOutcome) {
        match &outcome {
            PublishOutcome::Published { id } => {
                tracing::info!("{} post successful (id: {})", platform, display_id(id))
            }
            PublishOutcome::Scheduled { id, publish_at } => tracing::info!(
                "{} post scheduled for {} (id: {})",
                platform,
                publish_at,
                display_id(id)
            ),
            PublishOutcome::Skipped { reason } => {
                tracing::warn!("{} skipped: {}", platform, reason)
            }
            PublishOutcome::Unsupported { reason } => {
                tracing::warn!("{}: {}", platform, reason)
            }
            PublishOutcome::Failed(e) => tracing::error!("{} post failed: {}", platform, e),
        }
        self.entries.push((platform, outcome));
    }

    pub fn outcome(&self, platform: Platform) -> Option<&PublishOutcome> {
        self.entries
            .iter()
            .find(|(p, _)| *p == platform)
            .map(|(_, outcome)| outcome)
    }

    pub fn entries(&self) -> &[(Platform, PublishOutcome)] {
        &self.entries
    }

    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_failure()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn display_id(id: &Option<String>) -> &str {
    id.as_deref().unwrap_or("n/a")
}

/// Turns a non-2xx response into [`PublishError::Http`] carrying the body
pub(crate) async fn check_status(
    step: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, PublishError> {
    let status = response.status();
    if status.is_success() {
        tracing::debug!("{}: HTTP {}", step, status.as_u16());
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(PublishError::Http {
        step,
        status: status.as_u16(),
        body,
    })
}

/// All platform adapters, sharing one HTTP client
pub struct Publisher {
    facebook: FacebookAdapter,
    instagram: InstagramAdapter,
    twitter: TwitterAdapter,
    linkedin: LinkedInAdapter,
}

impl Publisher {
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self, PublishError> {
        let http = Client::builder()
            .user_agent(config.user_agent.header_value())
            .build()?;
        Ok(Self::with_client(http, config, credentials))
    }

    pub fn with_client(http: Client, config: &Config, credentials: &Credentials) -> Self {
        let endpoints = &config.endpoints;
        Self {
            facebook: FacebookAdapter::new(http.clone(), &endpoints.graph_api, credentials),
            instagram: InstagramAdapter::new(http.clone(), &endpoints.graph_api, credentials),
            twitter: TwitterAdapter::new(http.clone(), &endpoints.twitter_api, credentials),
            linkedin: LinkedInAdapter::new(http, &endpoints.linkedin_api, credentials),
        }
    }

    pub fn facebook(&self) -> &FacebookAdapter {
        &self.facebook
    }

    pub fn instagram(&self) -> &InstagramAdapter {
        &self.instagram
    }

    /// Publishes caption and body to every selected platform now
    ///
    /// The combined text (caption, blank line, body) is what single-text
    /// platforms receive. Instagram and LinkedIn need an image and are skipped
    /// without one.
    pub async fn publish(
        &self,
        caption: &str,
        body: &str,
        image: Option<&ImageAsset>,
        platforms: &PlatformSet,
    ) -> PublishReport {
        let text = combined_text(caption, body);
        let mut report = PublishReport::new();

        for platform in platforms.iter() {
            tracing::info!("Publishing to {}", platform);

            let outcome = match platform {
                Platform::Facebook => {
                    PublishOutcome::published(self.facebook.publish(&text, image).await)
                }
                Platform::Instagram => match image {
                    Some(image) => {
                        PublishOutcome::published(self.instagram.publish(&text, image).await)
                    }
                    None => PublishOutcome::Skipped {
                        reason: "Instagram post requires an image".to_string(),
                    },
                },
                Platform::Twitter => PublishOutcome::published(self.twitter.publish(&text).await),
                Platform::LinkedIn => match image {
                    Some(image) => {
                        PublishOutcome::published(self.linkedin.publish(&text, image).await)
                    }
                    None => PublishOutcome::Skipped {
                        reason: "LinkedIn image share requires an image".to_string(),
                    },
                },
            };

            report.record(platform, outcome);
        }

        report
    }
}

/// Caption, blank line, body
pub fn combined_text(caption: &str, body: &str) -> String {
    format!("{}\n\n{}", caption, body)
}
