//! Scheduling module
//!
//! Converts an operator-entered local time to a UTC instant, enforces the
//! minimum lead time, and hands the post to platforms that can publish at a
//! future time by themselves. Nothing here waits or polls.

mod time;

pub use time::{convert_local_to_utc, validate_lead_time, LOCAL_TIME_FORMAT};

use crate::generator::ImageAsset;
use crate::publisher::{
    combined_text, Platform, PlatformSet, PublishOutcome, PublishReport, Publisher,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Invalid scheduling input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("'{input}' is not a valid time, expected YYYY-MM-DD HH:MM")]
    InvalidFormat { input: String },

    #[error("{input} does not exist in {zone} (clock change)")]
    NonexistentLocalTime { input: String, zone: String },

    #[error("Time must be at least {minimum_minutes} minutes in the future (in UTC); got {publish_at}, earliest allowed {earliest}")]
    LeadTimeTooShort {
        publish_at: DateTime<Utc>,
        earliest: DateTime<Utc>,
        minimum_minutes: i64,
    },
}

/// A post waiting for its platform-side publication time
#[derive(Debug, Clone)]
pub struct ScheduledPost {
    pub caption: String,
    pub body: String,
    pub image: Option<ImageAsset>,
    pub platforms: PlatformSet,
    /// Always UTC
    pub publish_at: DateTime<Utc>,
}

impl ScheduledPost {
    pub fn text(&self) -> String {
        combined_text(&self.caption, &self.body)
    }
}

/// Schedules `post` on every selected platform
///
/// Facebook and Instagram receive an unpublished post with a
/// `scheduled_publish_time`. Instagram without an image is skipped, as for an
/// immediate post. Twitter and LinkedIn have no native scheduling and are
/// reported as unsupported.
pub async fn schedule(publisher: &Publisher, post: &ScheduledPost) -> PublishReport {
    let text = post.text();
    let mut report = PublishReport::new();

    tracing::info!(
        "Scheduling post for {} on {}",
        post.publish_at,
        post.platforms
    );

    for platform in post.platforms.iter() {
        let outcome = match platform {
            Platform::Facebook => PublishOutcome::scheduled(
                publisher
                    .facebook()
                    .schedule(&text, post.image.as_ref(), post.publish_at)
                    .await,
                post.publish_at,
            ),
            Platform::Instagram => match &post.image {
                Some(image) => PublishOutcome::scheduled(
                    publisher
                        .instagram()
                        .schedule(&text, image, post.publish_at)
                        .await,
                    post.publish_at,
                ),
                None => PublishOutcome::Skipped {
                    reason: "Instagram post requires an image".to_string(),
                },
            },
            Platform::Twitter | Platform::LinkedIn => PublishOutcome::Unsupported {
                reason: format!("{} scheduling is not supported via API", platform),
            },
        };

        report.record(platform, outcome);
    }

    report
}
