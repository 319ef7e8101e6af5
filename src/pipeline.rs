//! Pipeline driver
//!
//! Sequences one run: crawl, generate, review, then publish or schedule.
//! Each phase finishes before the next starts. Operator input comes through
//! the [`Operator`] trait so the terminal prompts stay in the binary.

use crate::config::{Config, Credentials};
use crate::crawler::{Corpus, Crawler};
use crate::generator::{
    CompletionProvider, GenerationResult, Generator, ImageAsset, OpenAiClient,
};
use crate::publisher::{PlatformSet, PublishReport, Publisher};
use crate::scheduler::{
    self, convert_local_to_utc, validate_lead_time, ScheduleError, ScheduledPost,
};
use crate::AgentError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::io;

/// Source of operator decisions
pub trait Operator {
    /// What the post should be about
    fn topic(&mut self) -> io::Result<String>;

    /// Shows the draft; returns false to abort the run
    fn review_draft(&mut self, draft: &Draft) -> io::Result<bool>;

    /// Which platforms to post to
    fn platforms(&mut self) -> io::Result<PlatformSet>;

    /// Whether to schedule instead of publishing now
    fn wants_schedule(&mut self) -> io::Result<bool>;

    /// Local publish time, `YYYY-MM-DD HH:MM` in the configured zone
    fn publish_time(&mut self, zone: Tz) -> io::Result<String>;
}

/// Generated content awaiting review
#[derive(Debug, Clone)]
pub struct Draft {
    pub topic: String,
    pub corpus: Corpus,
    pub content: GenerationResult,
    pub image: Option<ImageAsset>,
}

/// How a run ended
#[derive(Debug)]
pub enum RunSummary {
    /// The operator declined the draft; nothing was sent
    Aborted,
    Published(PublishReport),
    Scheduled(PublishReport),
}

/// Crawl, generate and publish, wired from configuration
pub struct Pipeline<P> {
    config: Config,
    crawler: Crawler,
    generator: Generator<P>,
    publisher: Publisher,
    zone: Tz,
}

impl Pipeline<OpenAiClient> {
    /// Builds the pipeline against the OpenAI-compatible provider
    pub fn from_config(config: Config, credentials: &Credentials) -> Result<Self, AgentError> {
        let crawler = Crawler::new(&config)?;
        let generator = Generator::new(OpenAiClient::new(&config, credentials), &config.generator);
        let publisher = Publisher::new(&config, credentials)?;
        Self::new(config, crawler, generator, publisher)
    }
}

impl<P: CompletionProvider> Pipeline<P> {
    pub fn new(
        config: Config,
        crawler: Crawler,
        generator: Generator<P>,
        publisher: Publisher,
    ) -> Result<Self, AgentError> {
        let zone = config.time_zone()?;
        Ok(Self {
            config,
            crawler,
            generator,
            publisher,
            zone,
        })
    }

    /// Crawls the site and drafts caption, body and image for `topic`
    ///
    /// An empty crawl still produces a draft. A failed image request leaves
    /// the draft without an image; a failed text completion is an error.
    pub async fn draft(&self, topic: &str) -> Result<Draft, AgentError> {
        let corpus = self
            .crawler
            .crawl(&self.config.crawler.start_url, self.config.crawler.max_pages)
            .await?;

        if corpus.is_empty() {
            tracing::warn!("Crawl returned no pages; generating without website context");
        }

        let content = self.generator.generate(topic, &corpus).await?;
        let image = self.generator.generate_image(topic).await;
        if image.is_none() {
            tracing::warn!("Image generation failed, proceeding without image");
        }

        Ok(Draft {
            topic: topic.to_string(),
            corpus,
            content,
            image,
        })
    }

    /// Converts operator input to a UTC instant and checks the lead time
    pub fn resolve_publish_time(
        &self,
        local_time: &str,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, ScheduleError> {
        let publish_at = convert_local_to_utc(local_time, self.zone)?;
        validate_lead_time(publish_at, now, self.config.schedule.minimum_lead_minutes)?;
        Ok(publish_at)
    }

    /// Publishes the draft now on every selected platform
    pub async fn publish(&self, draft: &Draft, platforms: &PlatformSet) -> PublishReport {
        self.publisher
            .publish(
                &draft.content.caption,
                &draft.content.body,
                draft.image.as_ref(),
                platforms,
            )
            .await
    }

    /// Hands the draft to platform-native scheduling
    pub async fn schedule(
        &self,
        draft: &Draft,
        platforms: &PlatformSet,
        publish_at: DateTime<Utc>,
    ) -> PublishReport {
        let post = ScheduledPost {
            caption: draft.content.caption.clone(),
            body: draft.content.body.clone(),
            image: draft.image.clone(),
            platforms: platforms.clone(),
            publish_at,
        };
        scheduler::schedule(&self.publisher, &post).await
    }

    /// Runs one full interactive pass
    ///
    /// An invalid publish time ends the run with an error; the post is not
    /// published immediately instead.
    pub async fn run<O: Operator>(&self, operator: &mut O) -> Result<RunSummary, AgentError> {
        let topic = operator.topic()?;
        let draft = self.draft(&topic).await?;

        if !operator.review_draft(&draft)? {
            tracing::info!("Draft declined, nothing published");
            return Ok(RunSummary::Aborted);
        }

        let platforms = operator.platforms()?;

        if operator.wants_schedule()? {
            let input = operator.publish_time(self.zone)?;
            let publish_at = self.resolve_publish_time(&input, Utc::now())?;
            let report = self.schedule(&draft, &platforms, publish_at).await;
            Ok(RunSummary::Scheduled(report))
        } else {
            let report = self.publish(&draft, &platforms).await;
            Ok(RunSummary::Published(report))
        }
    }
}
