//! Draft generation against a mock generative API server.

use std::sync::Arc;

use flowshelf::adapters::GeminiClient;
use flowshelf::domain::errors::{DraftError, GenerationError};
use flowshelf::domain::models::{DraftRequest, GenerationConfig};
use flowshelf::services::{DraftGenerator, DraftGeneratorConfig};
use mockito::{Matcher, Server};
use serde_json::json;

fn config(base_url: String, models: &[&str]) -> GenerationConfig {
    GenerationConfig {
        api_key: Some("test-key-0123456789".to_string()),
        base_url,
        models: models.iter().map(|m| (*m).to_string()).collect(),
        timeout_secs: 5,
    }
}

fn generator(config: &GenerationConfig) -> DraftGenerator {
    let client = GeminiClient::new(config).unwrap();
    DraftGenerator::new(Arc::new(client), DraftGeneratorConfig::from(config))
}

fn reply_with_text(text: &str) -> String {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
}

#[tokio::test]
async fn test_falls_back_after_not_found() {
    let mut server = Server::new_async().await;

    let missing = server
        .mock("POST", "/v1beta/models/model-a:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key-0123456789".into()))
        .with_status(404)
        .with_body(r#"{"error":{"code":404,"message":"models/model-a is not found"}}"#)
        .expect(1)
        .create_async()
        .await;

    let fenced = "```json\n{\"title\":\"X\",\"desc\":\"Y\",\"steps\":[\"a\",\"b\"]}\n```";
    let answered = server
        .mock("POST", "/v1beta/models/model-b:generateContent")
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex(r#""contents":\[\{"parts":\[\{"text":"#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply_with_text(fenced))
        .expect(1)
        .create_async()
        .await;

    let unused = server
        .mock("POST", "/v1beta/models/model-c:generateContent")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = config(server.url(), &["model-a", "model-b", "model-c"]);
    let request = DraftRequest::new("Chase unpaid invoices", "Finance");
    let draft = generator(&config).generate(&request).await.unwrap();

    assert_eq!(draft.title, "X");
    assert_eq!(draft.description, "Y");
    assert_eq!(draft.steps, vec!["a", "b"]);

    missing.assert_async().await;
    answered.assert_async().await;
    unused.assert_async().await;
}

#[tokio::test]
async fn test_exhaustion_reports_last_reason() {
    let mut server = Server::new_async().await;

    let unavailable = server
        .mock("POST", "/v1beta/models/model-a:generateContent")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(r#"{"error":{"message":"overloaded"}}"#)
        .expect(1)
        .create_async()
        .await;
    let prose = server
        .mock("POST", "/v1beta/models/model-b:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(reply_with_text("Sure! Here is your workflow."))
        .expect(1)
        .create_async()
        .await;

    let config = config(server.url(), &["model-a", "model-b"]);
    let err = generator(&config)
        .generate(&DraftRequest::new("Summarise meetings", "Sales"))
        .await
        .unwrap_err();

    match &err {
        DraftError::Exhausted { attempts } => {
            assert_eq!(attempts.len(), 2);
            assert_eq!(attempts[0].model, "model-a");
            assert_eq!(
                attempts[0].reason,
                GenerationError::Http {
                    status: 503,
                    message: "overloaded".to_string()
                }
            );
            assert_eq!(attempts[1].model, "model-b");
        }
        other => panic!("Expected Exhausted, got {other:?}"),
    }
    assert!(matches!(err.last_reason(), Some(GenerationError::InvalidJson(_))));

    unavailable.assert_async().await;
    prose.assert_async().await;
}

#[tokio::test]
async fn test_missing_text_counts_as_failure() {
    let mut server = Server::new_async().await;
    let blocked = server
        .mock("POST", "/v1beta/models/model-a:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
        .create_async()
        .await;

    let config = config(server.url(), &["model-a"]);
    let err = generator(&config)
        .generate(&DraftRequest::new("Anything", "Sales"))
        .await
        .unwrap_err();
    assert_eq!(err.last_reason(), Some(&GenerationError::MissingText));
    blocked.assert_async().await;
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let server = Server::new_async().await;
    let mut config = config(server.url(), &["model-a"]);
    config.api_key = None;

    let drafts = temp_env::with_var_unset("GEMINI_API_KEY", || generator(&config));
    let err = drafts
        .generate(&DraftRequest::new("Anything", "Sales"))
        .await
        .unwrap_err();
    assert!(matches!(err, DraftError::MissingApiKey));
}
