//! Twitter status update adapter (OAuth 1.0a user context)

use crate::config::{require, Credentials};
use crate::publisher::oauth::{authorization_header, OAuth1Credentials, OAuthNonce};
use crate::publisher::{check_status, PublishError};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Status {
    id_str: Option<String>,
}

/// Posts text-only status updates
pub struct TwitterAdapter {
    http: Client,
    twitter_api: String,
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    access_token: Option<String>,
    access_secret: Option<String>,
}

impl TwitterAdapter {
    pub fn new(http: Client, twitter_api: &str, credentials: &Credentials) -> Self {
        Self {
            http,
            twitter_api: twitter_api.trim_end_matches('/').to_string(),
            consumer_key: credentials.twitter_consumer_key.clone(),
            consumer_secret: credentials.twitter_consumer_secret.clone(),
            access_token: credentials.twitter_access_token.clone(),
            access_secret: credentials.twitter_access_secret.clone(),
        }
    }

    fn oauth_credentials(&self) -> Result<OAuth1Credentials, PublishError> {
        Ok(OAuth1Credentials {
            consumer_key: require(&self.consumer_key, "TWITTER_CONSUMER_KEY")?.to_string(),
            consumer_secret: require(&self.consumer_secret, "TWITTER_CONSUMER_SECRET")?
                .to_string(),
            token: require(&self.access_token, "TWITTER_ACCESS_TOKEN")?.to_string(),
            token_secret: require(&self.access_secret, "TWITTER_ACCESS_SECRET")?.to_string(),
        })
    }

    /// Posts `text` as a single status update
    pub async fn publish(&self, text: &str) -> Result<Option<String>, PublishError> {
        let creds = self.oauth_credentials()?;
        let url = format!("{}/1.1/statuses/update.json", self.twitter_api);
        let params = [("status", text)];

        let header = authorization_header("POST", &url, &params, &creds, &OAuthNonce::generate());

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, header)
            .form(&params)
            .send()
            .await?;

        let status: Status = check_status("Tweet", response).await?.json().await?;
        Ok(status.id_str)
    }
}
