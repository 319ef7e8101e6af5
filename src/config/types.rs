use serde::Deserialize;

/// Main configuration structure for Content-Agent
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// First page of the crawl; also fixes the site boundary
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum number of URLs visited per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Timeout for each page fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Pause after each successful fetch (milliseconds)
    #[serde(rename = "pacing-delay-ms")]
    pub pacing_delay_ms: u64,

    /// Page text beyond this many characters is dropped
    #[serde(rename = "max-page-chars")]
    pub max_page_chars: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: "https://cloudjune.com".to_string(),
            max_pages: 20,
            request_timeout_secs: 10,
            pacing_delay_ms: 1000,
            max_page_chars: 500_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the agent
    #[serde(rename = "agent-name")]
    pub agent_name: String,

    /// Version of the agent
    #[serde(rename = "agent-version")]
    pub agent_version: String,

    /// URL with information about the agent
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            agent_name: "ContentAgent".to_string(),
            agent_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://cloudjune.com".to_string(),
        }
    }
}

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Chat model used for caption and body
    pub model: String,

    /// Model used for image generation
    #[serde(rename = "image-model")]
    pub image_model: String,

    /// Sampling temperature for the chat completion
    pub temperature: f32,

    /// Requested image dimensions, e.g. "1024x1024"
    #[serde(rename = "image-size")]
    pub image_size: String,

    /// How many crawled pages are passed to the prompt as context
    #[serde(rename = "max-context-documents")]
    pub max_context_documents: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            image_model: "dall-e-3".to_string(),
            temperature: 0.7,
            image_size: "1024x1024".to_string(),
            max_context_documents: 5,
        }
    }
}

/// Scheduling configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA zone the operator enters publish times in
    #[serde(rename = "time-zone")]
    pub time_zone: String,

    /// Minimum gap between now and the scheduled publish instant
    #[serde(rename = "minimum-lead-minutes")]
    pub minimum_lead_minutes: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_zone: "Asia/Dubai".to_string(),
            minimum_lead_minutes: 20,
        }
    }
}

/// Base URLs of the external APIs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// OpenAI-compatible completion API
    #[serde(rename = "completion-api")]
    pub completion_api: String,

    /// Facebook/Instagram Graph API, including the version segment
    #[serde(rename = "graph-api")]
    pub graph_api: String,

    /// Twitter REST API root
    #[serde(rename = "twitter-api")]
    pub twitter_api: String,

    /// LinkedIn REST API, including the version segment
    #[serde(rename = "linkedin-api")]
    pub linkedin_api: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            completion_api: "https://api.openai.com/v1".to_string(),
            graph_api: "https://graph.facebook.com/v19.0".to_string(),
            twitter_api: "https://api.twitter.com".to_string(),
            linkedin_api: "https://api.linkedin.com/v2".to_string(),
        }
    }
}
