//! API credentials loaded from the environment
//!
//! Credentials are read once at startup. A missing value is not an error
//! here: the adapter that needs it fails when it is called.

use crate::publisher::PublishError;

/// Secrets and account identifiers for the completion provider and platforms
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub facebook_page_id: Option<String>,
    pub facebook_page_token: Option<String>,
    pub instagram_user_id: Option<String>,
    pub twitter_consumer_key: Option<String>,
    pub twitter_consumer_secret: Option<String>,
    pub twitter_access_token: Option<String>,
    pub twitter_access_secret: Option<String>,
    pub linkedin_access_token: Option<String>,
    pub linkedin_organization_urn: Option<String>,
}

impl Credentials {
    /// Loads credentials from the process environment
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary key lookup
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            facebook_page_id: get("FACEBOOK_PAGE_ID"),
            facebook_page_token: get("FACEBOOK_PAGE_TOKEN"),
            instagram_user_id: get("INSTAGRAM_USER_ID"),
            twitter_consumer_key: get("TWITTER_CONSUMER_KEY"),
            twitter_consumer_secret: get("TWITTER_CONSUMER_SECRET"),
            twitter_access_token: get("TWITTER_ACCESS_TOKEN"),
            twitter_access_secret: get("TWITTER_ACCESS_SECRET"),
            linkedin_access_token: get("LINKEDIN_ACCESS_TOKEN"),
            linkedin_organization_urn: get("COMPANY_URN"),
        }
    }

    /// Names of the environment variables that were not set
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("FACEBOOK_PAGE_ID", &self.facebook_page_id),
            ("FACEBOOK_PAGE_TOKEN", &self.facebook_page_token),
            ("INSTAGRAM_USER_ID", &self.instagram_user_id),
            ("TWITTER_CONSUMER_KEY", &self.twitter_consumer_key),
            ("TWITTER_CONSUMER_SECRET", &self.twitter_consumer_secret),
            ("TWITTER_ACCESS_TOKEN", &self.twitter_access_token),
            ("TWITTER_ACCESS_SECRET", &self.twitter_access_secret),
            ("LINKEDIN_ACCESS_TOKEN", &self.linkedin_access_token),
            ("COMPANY_URN", &self.linkedin_organization_urn),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Returns the credential value or the error naming the missing variable
pub(crate) fn require<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, PublishError> {
    value
        .as_deref()
        .ok_or(PublishError::MissingCredential(name))
}

// Secrets stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("missing", &self.missing())
            .finish()
    }
}
