//! Downloading generated images for platforms that take raw bytes

use crate::publisher::{check_status, PublishError};
use reqwest::Client;

/// Content type used when neither the server nor the URL tells us
pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Image bytes with their content type
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Fetches an image and determines its content type
pub async fn download_image(http: &Client, url: &str) -> Result<DownloadedImage, PublishError> {
    let response = check_status("image download", http.get(url).send().await?).await?;

    let header = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let content_type = resolve_content_type(header.as_deref(), url);
    let bytes = response.bytes().await?.to_vec();

    tracing::debug!("Downloaded image {} ({} bytes, {})", url, bytes.len(), content_type);

    Ok(DownloadedImage {
        bytes,
        content_type,
    })
}

/// Picks the image content type: response header, then URL extension, then JPEG
pub fn resolve_content_type(header: Option<&str>, url: &str) -> String {
    if let Some(value) = header.map(str::trim).filter(|v| !v.is_empty()) {
        return value.to_string();
    }

    let path = url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string());

    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_IMAGE_TYPE.to_string())
}
