//! End-to-end pipeline runs against a mocked site, provider and Graph API

use crate::helpers::{html_page, mount_image, test_config, test_credentials, PAGE_ID};
use chrono::{Duration, Utc};
use chrono_tz::Tz;
use content_agent::pipeline::{Draft, Operator, Pipeline, RunSummary};
use content_agent::publisher::{Platform, PlatformSet, PublishOutcome};
use content_agent::scheduler::ScheduleError;
use content_agent::AgentError;
use serde_json::json;
use std::io;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers every prompt from a fixed script
struct ScriptedOperator {
    approve: bool,
    platforms: &'static str,
    publish_time: Option<String>,
    reviewed: Option<Draft>,
}

impl ScriptedOperator {
    fn new(approve: bool, platforms: &'static str, publish_time: Option<String>) -> Self {
        Self {
            approve,
            platforms,
            publish_time,
            reviewed: None,
        }
    }
}

impl Operator for ScriptedOperator {
    fn topic(&mut self) -> io::Result<String> {
        Ok("cloud migration".to_string())
    }

    fn review_draft(&mut self, draft: &Draft) -> io::Result<bool> {
        self.reviewed = Some(draft.clone());
        Ok(self.approve)
    }

    fn platforms(&mut self) -> io::Result<PlatformSet> {
        PlatformSet::parse(self.platforms)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    fn wants_schedule(&mut self) -> io::Result<bool> {
        Ok(self.publish_time.is_some())
    }

    fn publish_time(&mut self, _zone: Tz) -> io::Result<String> {
        Ok(self.publish_time.clone().unwrap_or_default())
    }
}

/// Mounts a one-page site plus chat and image endpoints
async fn mount_site_and_provider(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("Acme", "<p>Acme runs managed Kubernetes</p>"))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Acme runs managed Kubernetes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "CAPTION: Ship faster\nCONTENT: Acme runs it for you." } }]
        })))
        .mount(mock_server)
        .await;

    let image_url = mount_image(mock_server).await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(body_string_contains("cloud migration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "url": image_url }]
        })))
        .mount(mock_server)
        .await;
}

/// A local time two days out, in the default zone
fn future_local_time() -> String {
    (Utc::now() + Duration::days(2))
        .with_timezone(&chrono_tz::Asia::Dubai)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[tokio::test]
async fn test_run_publishes_approved_draft() {
    let mock_server = MockServer::start().await;
    mount_site_and_provider(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/graph/{}/photos", PAGE_ID)))
        .and(body_string_contains("Ship faster"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "1", "post_id": "1001_1" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline =
        Pipeline::from_config(test_config(&mock_server.uri()), &test_credentials()).unwrap();
    let mut operator = ScriptedOperator::new(true, "facebook", None);

    let summary = pipeline.run(&mut operator).await.unwrap();

    let draft = operator.reviewed.expect("Draft was not reviewed");
    assert_eq!(draft.topic, "cloud migration");
    assert_eq!(draft.corpus.len(), 1);
    assert_eq!(draft.content.caption, "Ship faster");
    assert_eq!(draft.content.body, "Acme runs it for you.");
    assert!(draft.image.is_some());

    match summary {
        RunSummary::Published(report) => match report.outcome(Platform::Facebook) {
            Some(PublishOutcome::Published { id }) => assert_eq!(id.as_deref(), Some("1001_1")),
            other => panic!("Expected published, got {:?}", other),
        },
        other => panic!("Expected published run, got {:?}", other),
    }
}

#[tokio::test]
async fn test_declined_draft_publishes_nothing() {
    let mock_server = MockServer::start().await;
    mount_site_and_provider(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/graph/{}/photos", PAGE_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let pipeline =
        Pipeline::from_config(test_config(&mock_server.uri()), &test_credentials()).unwrap();
    let mut operator = ScriptedOperator::new(false, "all", None);

    let summary = pipeline.run(&mut operator).await.unwrap();

    assert!(matches!(summary, RunSummary::Aborted));
}

#[tokio::test]
async fn test_run_schedules_in_local_time() {
    let mock_server = MockServer::start().await;
    mount_site_and_provider(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/graph/{}/photos", PAGE_ID)))
        .and(body_string_contains("published=false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "S1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline =
        Pipeline::from_config(test_config(&mock_server.uri()), &test_credentials()).unwrap();
    let mut operator = ScriptedOperator::new(true, "facebook,twitter", Some(future_local_time()));

    let summary = pipeline.run(&mut operator).await.unwrap();

    match summary {
        RunSummary::Scheduled(report) => {
            assert!(matches!(
                report.outcome(Platform::Facebook),
                Some(PublishOutcome::Scheduled { .. })
            ));
            assert!(matches!(
                report.outcome(Platform::Twitter),
                Some(PublishOutcome::Unsupported { .. })
            ));
        }
        other => panic!("Expected scheduled run, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_publish_time_ends_run() {
    let mock_server = MockServer::start().await;
    mount_site_and_provider(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/graph/{}/photos", PAGE_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let pipeline =
        Pipeline::from_config(test_config(&mock_server.uri()), &test_credentials()).unwrap();

    let mut operator =
        ScriptedOperator::new(true, "facebook", Some("tomorrow at noon".to_string()));
    let result = pipeline.run(&mut operator).await;
    assert!(matches!(
        result,
        Err(AgentError::Schedule(ScheduleError::InvalidFormat { .. }))
    ));

    let too_soon = (Utc::now() + Duration::minutes(5))
        .with_timezone(&chrono_tz::Asia::Dubai)
        .format("%Y-%m-%d %H:%M")
        .to_string();
    let mut operator = ScriptedOperator::new(true, "facebook", Some(too_soon));
    let result = pipeline.run(&mut operator).await;
    assert!(matches!(
        result,
        Err(AgentError::Schedule(ScheduleError::LeadTimeTooShort { .. }))
    ));
}

#[tokio::test]
async fn test_empty_crawl_still_drafts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "no markers here" } }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let pipeline =
        Pipeline::from_config(test_config(&mock_server.uri()), &test_credentials()).unwrap();
    let draft = pipeline.draft("anything").await.unwrap();

    assert!(draft.corpus.is_empty());
    assert!(draft.content.is_placeholder());
    assert_eq!(draft.content.body, "no markers here");
    assert!(draft.image.is_none());
}
