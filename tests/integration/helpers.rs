use content_agent::config::{Config, Credentials, EndpointsConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAGE_ID: &str = "1001";
pub const INSTAGRAM_USER: &str = "2002";
pub const COMPANY_URN: &str = "urn:li:organization:42";

/// Configuration pointing every endpoint at the mock server
pub fn test_config(base: &str) -> Config {
    let mut config = Config::default();
    config.crawler.start_url = format!("{}/", base);
    config.crawler.pacing_delay_ms = 10;
    config.crawler.request_timeout_secs = 5;
    config.endpoints = EndpointsConfig {
        completion_api: format!("{}/v1", base),
        graph_api: format!("{}/graph", base),
        twitter_api: format!("{}/twitter", base),
        linkedin_api: format!("{}/linkedin", base),
    };
    config
}

/// Credentials with every variable set
pub fn test_credentials() -> Credentials {
    Credentials {
        openai_api_key: Some("sk-test".to_string()),
        facebook_page_id: Some(PAGE_ID.to_string()),
        facebook_page_token: Some("fb-token".to_string()),
        instagram_user_id: Some(INSTAGRAM_USER.to_string()),
        twitter_consumer_key: Some("ck".to_string()),
        twitter_consumer_secret: Some("cs".to_string()),
        twitter_access_token: Some("at".to_string()),
        twitter_access_secret: Some("as".to_string()),
        linkedin_access_token: Some("li-token".to_string()),
        linkedin_organization_urn: Some(COMPANY_URN.to_string()),
    }
}

/// Wraps `body` in a minimal HTML document
pub fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

/// Serves a small PNG-typed payload at `/img/generated.png`
pub async fn mount_image(server: &MockServer) -> String {
    Mock::given(method("GET"))
        .and(path("/img/generated.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"fake-png-bytes".to_vec())
                .insert_header("content-type", "image/png"),
        )
        .mount(server)
        .await;

    format!("{}/img/generated.png", server.uri())
}
