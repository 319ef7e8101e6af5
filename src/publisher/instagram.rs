//! Instagram Graph API adapter
//!
//! Publishing is two calls: create a media container for the image, then
//! publish the container. Nothing is published if the container id is missing.

use crate::config::{require, Credentials};
use crate::generator::ImageAsset;
use crate::publisher::facebook::GraphObject;
use crate::publisher::{check_status, PublishError};
use chrono::{DateTime, Utc};
use reqwest::Client;

/// Posts images to an Instagram business account
pub struct InstagramAdapter {
    http: Client,
    graph_api: String,
    user_id: Option<String>,
    page_token: Option<String>,
}

impl InstagramAdapter {
    pub fn new(http: Client, graph_api: &str, credentials: &Credentials) -> Self {
        Self {
            http,
            graph_api: graph_api.trim_end_matches('/').to_string(),
            user_id: credentials.instagram_user_id.clone(),
            page_token: credentials.facebook_page_token.clone(),
        }
    }

    /// Creates the media container and returns its id
    pub async fn create_container(
        &self,
        image: &ImageAsset,
        caption: &str,
    ) -> Result<String, PublishError> {
        let user_id = require(&self.user_id, "INSTAGRAM_USER_ID")?;
        let token = require(&self.page_token, "FACEBOOK_PAGE_TOKEN")?;

        let response = self
            .http
            .post(format!("{}/{}/media", self.graph_api, user_id))
            .form(&[
                ("image_url", image.url.as_str()),
                ("caption", caption),
                ("access_token", token),
            ])
            .send()
            .await?;

        let body = check_status("Instagram media creation", response)
            .await?
            .text()
            .await?;

        let container: Option<GraphObject> = serde_json::from_str(&body).ok();
        match container.and_then(|c| c.id) {
            Some(id) => {
                tracing::debug!("Instagram container created: {}", id);
                Ok(id)
            }
            None => Err(PublishError::MalformedResponse(format!(
                "Instagram media creation returned no id: {}",
                body
            ))),
        }
    }

    /// Publishes the container, now or at `publish_at`
    async fn publish_container(
        &self,
        container_id: &str,
        publish_at: Option<DateTime<Utc>>,
    ) -> Result<Option<String>, PublishError> {
        let user_id = require(&self.user_id, "INSTAGRAM_USER_ID")?;
        let token = require(&self.page_token, "FACEBOOK_PAGE_TOKEN")?;

        let mut params = vec![
            ("creation_id", container_id.to_string()),
            ("access_token", token.to_string()),
        ];
        if let Some(at) = publish_at {
            params.push(("published", "false".to_string()));
            params.push(("scheduled_publish_time", at.timestamp().to_string()));
        }

        let response = self
            .http
            .post(format!("{}/{}/media_publish", self.graph_api, user_id))
            .form(&params)
            .send()
            .await?;

        let step = if publish_at.is_some() {
            "Instagram scheduling"
        } else {
            "Instagram publish"
        };
        let published: GraphObject = check_status(step, response).await?.json().await?;
        Ok(published.id)
    }

    /// Creates a container for `image` and publishes it immediately
    pub async fn publish(
        &self,
        caption: &str,
        image: &ImageAsset,
    ) -> Result<Option<String>, PublishError> {
        let container_id = self.create_container(image, caption).await?;
        self.publish_container(&container_id, None).await
    }

    /// Creates a container and asks Instagram to publish it at `publish_at`
    pub async fn schedule(
        &self,
        caption: &str,
        image: &ImageAsset,
        publish_at: DateTime<Utc>,
    ) -> Result<Option<String>, PublishError> {
        let container_id = self.create_container(image, caption).await?;
        self.publish_container(&container_id, Some(publish_at)).await
    }
}
