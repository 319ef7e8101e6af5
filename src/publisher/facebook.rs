//! Facebook Graph API adapter

use crate::config::{require, Credentials};
use crate::generator::ImageAsset;
use crate::publisher::{check_status, download_image, PublishError};
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GraphObject {
    pub id: Option<String>,
    pub post_id: Option<String>,
}

/// Posts to a Facebook page
pub struct FacebookAdapter {
    http: Client,
    graph_api: String,
    page_id: Option<String>,
    page_token: Option<String>,
}

impl FacebookAdapter {
    pub fn new(http: Client, graph_api: &str, credentials: &Credentials) -> Self {
        Self {
            http,
            graph_api: graph_api.trim_end_matches('/').to_string(),
            page_id: credentials.facebook_page_id.clone(),
            page_token: credentials.facebook_page_token.clone(),
        }
    }

    fn endpoint(&self, page_id: &str, edge: &str) -> String {
        format!("{}/{}/{}", self.graph_api, page_id, edge)
    }

    /// Publishes `text` now, as a photo post when an image is given
    ///
    /// The image is downloaded and uploaded as multipart `source`; its content
    /// type comes from the download response, the URL extension, or defaults
    /// to JPEG.
    pub async fn publish(
        &self,
        text: &str,
        image: Option<&ImageAsset>,
    ) -> Result<Option<String>, PublishError> {
        let page_id = require(&self.page_id, "FACEBOOK_PAGE_ID")?;
        let token = require(&self.page_token, "FACEBOOK_PAGE_TOKEN")?;

        let response = match image {
            Some(image) => {
                let downloaded = download_image(&self.http, &image.url).await?;
                let source = Part::bytes(downloaded.bytes)
                    .file_name("image.jpg")
                    .mime_str(&downloaded.content_type)?;
                let form = Form::new()
                    .text("caption", text.to_string())
                    .text("access_token", token.to_string())
                    .part("source", source);

                self.http
                    .post(self.endpoint(page_id, "photos"))
                    .multipart(form)
                    .send()
                    .await?
            }
            None => {
                self.http
                    .post(self.endpoint(page_id, "feed"))
                    .form(&[("message", text), ("access_token", token)])
                    .send()
                    .await?
            }
        };

        let body = check_status("Facebook post", response).await?.text().await?;
        Ok(created_post_id("Facebook post", &body))
    }

    /// Creates an unpublished post that Facebook publishes at `publish_at`
    ///
    /// With an image the photo is referenced by URL rather than uploaded.
    pub async fn schedule(
        &self,
        text: &str,
        image: Option<&ImageAsset>,
        publish_at: DateTime<Utc>,
    ) -> Result<Option<String>, PublishError> {
        let page_id = require(&self.page_id, "FACEBOOK_PAGE_ID")?;
        let token = require(&self.page_token, "FACEBOOK_PAGE_TOKEN")?;
        let timestamp = publish_at.timestamp().to_string();

        let request = match image {
            Some(image) => self.http.post(self.endpoint(page_id, "photos")).form(&[
                ("url", image.url.as_str()),
                ("caption", text),
                ("published", "false"),
                ("scheduled_publish_time", timestamp.as_str()),
                ("access_token", token),
            ]),
            None => self.http.post(self.endpoint(page_id, "feed")).form(&[
                ("message", text),
                ("published", "false"),
                ("scheduled_publish_time", timestamp.as_str()),
                ("access_token", token),
            ]),
        };

        let response = request.send().await?;
        let body = check_status("Facebook schedule", response)
            .await?
            .text()
            .await?;
        Ok(created_post_id("Facebook schedule", &body))
    }
}

/// Post id from a successful Graph response
///
/// The post already exists once Graph answers 2xx, so an unreadable body only
/// loses the id.
fn created_post_id(step: &str, body: &str) -> Option<String> {
    match serde_json::from_str::<GraphObject>(body) {
        Ok(created) => created.post_id.or(created.id),
        Err(e) => {
            tracing::warn!(
                "{}: could not read post id from response ({}): {}",
                step,
                e,
                body
            );
            None
        }
    }
}
