//! LinkedIn organization share adapter
//!
//! Three steps, each aborting the rest on failure:
//! 1. register an image upload owned by the organization
//! 2. upload the image bytes to the returned URL
//! 3. create a public share referencing the uploaded asset

use crate::config::{require, Credentials};
use crate::generator::ImageAsset;
use crate::publisher::{check_status, download_image, PublishError};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const RESTLI_PROTOCOL_HEADER: &str = "X-Restli-Protocol-Version";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

#[derive(Debug, Deserialize)]
struct RegisterUploadResponse {
    value: RegisterUploadValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadValue {
    upload_mechanism: UploadMechanism,
    asset: String,
}

#[derive(Debug, Deserialize)]
struct UploadMechanism {
    #[serde(rename = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest")]
    http_request: UploadHttpRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadHttpRequest {
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct CreatedShare {
    id: Option<String>,
}

/// Where to upload the image and the asset URN to reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    pub upload_url: String,
    pub asset: String,
}

/// Posts image shares on behalf of an organization
pub struct LinkedInAdapter {
    http: Client,
    linkedin_api: String,
    access_token: Option<String>,
    organization_urn: Option<String>,
}

impl LinkedInAdapter {
    pub fn new(http: Client, linkedin_api: &str, credentials: &Credentials) -> Self {
        Self {
            http,
            linkedin_api: linkedin_api.trim_end_matches('/').to_string(),
            access_token: credentials.linkedin_access_token.clone(),
            organization_urn: credentials.linkedin_organization_urn.clone(),
        }
    }

    /// Step 1: registers an image upload owned by `owner`
    pub async fn register_upload(
        &self,
        token: &str,
        owner: &str,
    ) -> Result<UploadSession, PublishError> {
        let request = json!({
            "registerUploadRequest": {
                "recipes": ["urn:li:digitalmediaRecipe:feedshare-image"],
                "owner": owner,
                "serviceRelationships": [{
                    "relationshipType": "OWNER",
                    "identifier": "urn:li:userGeneratedContent"
                }]
            }
        });

        let response = self
            .http
            .post(format!("{}/assets?action=registerUpload", self.linkedin_api))
            .bearer_auth(token)
            .header(RESTLI_PROTOCOL_HEADER, RESTLI_PROTOCOL_VERSION)
            .json(&request)
            .send()
            .await?;

        let body = check_status("LinkedIn upload registration", response)
            .await?
            .text()
            .await?;
        let registered: RegisterUploadResponse = serde_json::from_str(&body).map_err(|e| {
            PublishError::MalformedResponse(format!(
                "LinkedIn upload registration: {} ({})",
                e, body
            ))
        })?;

        Ok(UploadSession {
            upload_url: registered.value.upload_mechanism.http_request.upload_url,
            asset: registered.value.asset,
        })
    }

    /// Step 2: uploads the image bytes to the registered URL
    pub async fn upload_image(
        &self,
        token: &str,
        session: &UploadSession,
        image: &ImageAsset,
    ) -> Result<(), PublishError> {
        let downloaded = download_image(&self.http, &image.url).await?;

        let response = self
            .http
            .put(&session.upload_url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(downloaded.bytes)
            .send()
            .await?;

        check_status("LinkedIn image upload", response).await?;
        Ok(())
    }

    /// Step 3: creates the public share referencing `asset`
    pub async fn create_share(
        &self,
        token: &str,
        author: &str,
        asset: &str,
        text: &str,
    ) -> Result<Option<String>, PublishError> {
        let post = json!({
            "author": author,
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": text },
                    "shareMediaCategory": "IMAGE",
                    "media": [{
                        "status": "READY",
                        "description": { "text": "Company post image" },
                        "media": asset,
                        "title": { "text": "Post Image" }
                    }]
                }
            },
            "visibility": {
                "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
            }
        });

        let response = self
            .http
            .post(format!("{}/ugcPosts", self.linkedin_api))
            .bearer_auth(token)
            .header(RESTLI_PROTOCOL_HEADER, RESTLI_PROTOCOL_VERSION)
            .json(&post)
            .send()
            .await?;

        let response = check_status("LinkedIn share", response).await?;
        let header_id = response
            .headers()
            .get("x-restli-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        let body_id = serde_json::from_str::<CreatedShare>(&body)
            .ok()
            .and_then(|share| share.id);

        Ok(body_id.or(header_id))
    }

    /// Runs the three-step share protocol for `text` and `image`
    pub async fn publish(
        &self,
        text: &str,
        image: &ImageAsset,
    ) -> Result<Option<String>, PublishError> {
        let token = require(&self.access_token, "LINKEDIN_ACCESS_TOKEN")?;
        let organization = require(&self.organization_urn, "COMPANY_URN")?;

        let session = self.register_upload(token, organization).await?;
        tracing::debug!("LinkedIn upload registered for asset {}", session.asset);

        self.upload_image(token, &session, image).await?;
        tracing::debug!("LinkedIn image uploaded for asset {}", session.asset);

        self.create_share(token, organization, &session.asset, text)
            .await
    }
}
