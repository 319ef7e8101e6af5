//! Content-Agent: crawl a site, draft a social post, publish it
//!
//! This crate crawls a website breadth-first, asks a completion provider for a
//! caption and body grounded in the crawled text, and publishes the result to
//! Facebook, Instagram, Twitter and LinkedIn, either immediately or through the
//! platforms' native scheduling.

pub mod config;
pub mod crawler;
pub mod generator;
pub mod output;
pub mod pipeline;
pub mod publisher;
pub mod scheduler;
pub mod url;

use thiserror::Error;

/// Main error type for Content-Agent operations
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Completion provider error: {0}")]
    Provider(#[from] generator::ProviderError),

    #[error("Publish error: {0}")]
    Publish(#[from] publisher::PublishError),

    #[error("Scheduling error: {0}")]
    Schedule(#[from] scheduler::ScheduleError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Content-Agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, Credentials};
pub use crawler::{crawl, Corpus, Page};
pub use generator::{GenerationResult, ImageAsset};
pub use publisher::{Platform, PlatformSet};
pub use scheduler::{convert_local_to_utc, ScheduledPost};
