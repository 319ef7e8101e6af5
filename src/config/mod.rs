//! Configuration module for Content-Agent
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and loading API credentials from the environment.
//!
//! # Example
//!
//! ```no_run
//! use content_agent::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("content-agent.toml")).unwrap();
//! println!("Crawl starts at: {}", config.crawler.start_url);
//! ```

mod credentials;
mod parser;
mod types;
mod validation;

// Re-export types
pub use credentials::Credentials;
pub(crate) use credentials::require;
pub use types::{
    Config, CrawlerConfig, EndpointsConfig, GeneratorConfig, ScheduleConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

use crate::ConfigError;
use chrono_tz::Tz;

impl Config {
    /// Resolves the configured scheduling time zone
    pub fn time_zone(&self) -> Result<Tz, ConfigError> {
        self.schedule
            .time_zone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimeZone(self.schedule.time_zone.clone()))
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.agent_name, self.agent_version, self.contact_url
        )
    }
}
