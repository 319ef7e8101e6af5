//! Integration tests for the completion client and generator

use crate::helpers::{test_config, test_credentials};
use content_agent::config::Credentials;
use content_agent::crawler::{Corpus, Page};
use content_agent::generator::{
    CompletionProvider, Generator, OpenAiClient, ProviderError, PLACEHOLDER_CAPTION,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

#[tokio::test]
async fn test_complete_sends_model_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4" })))
        .and(body_string_contains("Hello there"))
        .respond_with(chat_response("General Kenobi"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(&test_config(&mock_server.uri()), &test_credentials());
    let text = client.complete("Hello there", 0.7).await.unwrap();

    assert_eq!(text, "General Kenobi");
}

#[tokio::test]
async fn test_complete_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(&test_config(&mock_server.uri()), &test_credentials());
    let err = client.complete("prompt", 0.7).await.unwrap_err();

    match err {
        ProviderError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_without_choices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(&test_config(&mock_server.uri()), &test_credentials());
    let err = client.complete("prompt", 0.7).await.unwrap_err();

    assert!(matches!(err, ProviderError::EmptyResponse(_)));
}

#[tokio::test]
async fn test_missing_api_key_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(chat_response("unused"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(&test_config(&mock_server.uri()), &Credentials::default());

    assert!(matches!(
        client.complete("prompt", 0.7).await,
        Err(ProviderError::MissingApiKey)
    ));
    assert!(matches!(
        client.generate_image("prompt").await,
        Err(ProviderError::MissingApiKey)
    ));
}

#[tokio::test]
async fn test_generate_image_returns_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(body_partial_json(json!({
            "model": "dall-e-3",
            "prompt": "cloud migration",
            "n": 1,
            "size": "1024x1024"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "url": "https://images.example.com/1.png" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(&test_config(&mock_server.uri()), &test_credentials());
    let url = client.generate_image("cloud migration").await.unwrap();

    assert_eq!(url, "https://images.example.com/1.png");
}

#[tokio::test]
async fn test_generator_grounds_prompt_in_corpus() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Topic: cloud migration"))
        .and(body_string_contains("1. Acme moves workloads"))
        .respond_with(chat_response(
            "CAPTION: Move faster\nCONTENT: Acme helps teams migrate.",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let generator = Generator::new(
        OpenAiClient::new(&config, &test_credentials()),
        &config.generator,
    );
    let corpus = Corpus::from(vec![Page {
        url: "https://acme.example.com/".to_string(),
        content: "Acme moves workloads".to_string(),
    }]);

    let result = generator.generate("cloud migration", &corpus).await.unwrap();

    assert_eq!(result.caption, "Move faster");
    assert_eq!(result.body, "Acme helps teams migrate.");
}

#[tokio::test]
async fn test_generator_unlabeled_output_uses_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_response("  Just some text  "))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let generator = Generator::new(
        OpenAiClient::new(&config, &test_credentials()),
        &config.generator,
    );

    let result = generator.generate("anything", &Corpus::new()).await.unwrap();

    assert_eq!(result.caption, PLACEHOLDER_CAPTION);
    assert_eq!(result.body, "Just some text");
}

#[tokio::test]
async fn test_generator_image_failure_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(400).set_body_string("content policy"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri());
    let generator = Generator::new(
        OpenAiClient::new(&config, &test_credentials()),
        &config.generator,
    );

    assert!(generator.generate_image("anything").await.is_none());
}
