use crate::config::types::{
    Config, CrawlerConfig, EndpointsConfig, GeneratorConfig, ScheduleConfig, UserAgentConfig,
};
use crate::url::parse_http_url;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_generator_config(&config.generator)?;
    validate_schedule_config(&config.schedule)?;
    validate_endpoints(&config.endpoints)?;
    config.time_zone()?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    parse_http_url(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-url: {}", e)))?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.pacing_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "pacing-delay-ms must be >= 100ms, got {}ms",
            config.pacing_delay_ms
        )));
    }

    if config.max_page_chars < 1 {
        return Err(ConfigError::Validation(
            "max-page-chars must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.agent_name.is_empty() {
        return Err(ConfigError::Validation(
            "agent-name cannot be empty".to_string(),
        ));
    }

    if !config
        .agent_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "agent-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.agent_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

/// Validates completion provider settings
fn validate_generator_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() || config.image_model.trim().is_empty() {
        return Err(ConfigError::Validation(
            "model and image-model cannot be empty".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0.0 and 2.0, got {}",
            config.temperature
        )));
    }

    validate_image_size(&config.image_size)?;

    if config.max_context_documents < 1 {
        return Err(ConfigError::Validation(
            "max-context-documents must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Checks the `WIDTHxHEIGHT` shape of an image size
fn validate_image_size(size: &str) -> Result<(), ConfigError> {
    let valid = size
        .split_once('x')
        .map(|(w, h)| w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok())
        .unwrap_or(false);

    if !valid {
        return Err(ConfigError::Validation(format!(
            "image-size must look like '1024x1024', got '{}'",
            size
        )));
    }

    Ok(())
}

/// Validates scheduling settings
fn validate_schedule_config(config: &ScheduleConfig) -> Result<(), ConfigError> {
    if config.minimum_lead_minutes < 0 {
        return Err(ConfigError::Validation(format!(
            "minimum-lead-minutes cannot be negative, got {}",
            config.minimum_lead_minutes
        )));
    }

    Ok(())
}

/// Validates API base URLs
fn validate_endpoints(config: &EndpointsConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("completion-api", &config.completion_api),
        ("graph-api", &config.graph_api),
        ("twitter-api", &config.twitter_api),
        ("linkedin-api", &config.linkedin_api),
    ] {
        parse_http_url(value)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;
    }

    Ok(())
}
