//! Draft generation with sequential model fallback.
//!
//! Each call walks the configured roster in order. The first model whose
//! reply parses to a JSON object wins; every failed attempt is recorded
//! and the walk moves on. Models are never retried or raced.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{AttemptFailure, DraftError, GenerationError};
use crate::domain::models::{DraftRequest, DraftResult, GenerationConfig};
use crate::domain::ports::TextGenerator;
use crate::services::prompt::{build_draft_prompt, strip_code_fences};

/// Roster and timing for [`DraftGenerator`].
#[derive(Debug, Clone)]
pub struct DraftGeneratorConfig {
    /// Model names tried in order.
    pub models: Vec<String>,
    /// Upper bound for a single attempt.
    pub attempt_timeout: Duration,
}

impl Default for DraftGeneratorConfig {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for DraftGeneratorConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            models: config.models.clone(),
            attempt_timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Turns a [`DraftRequest`] into a [`DraftResult`] using a text generator.
pub struct DraftGenerator {
    generator: Arc<dyn TextGenerator>,
    config: DraftGeneratorConfig,
}

impl DraftGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, config: DraftGeneratorConfig) -> Self {
        Self { generator, config }
    }

    pub fn models(&self) -> &[String] {
        &self.config.models
    }

    /// Generate a draft, falling back through the roster on failure.
    #[instrument(
        skip(self, request),
        fields(department = %request.department, level = %request.level)
    )]
    pub async fn generate(&self, request: &DraftRequest) -> Result<DraftResult, DraftError> {
        request.validate().map_err(DraftError::InvalidRequest)?;
        if !self.generator.is_configured() {
            return Err(DraftError::MissingApiKey);
        }
        if self.config.models.is_empty() {
            return Err(DraftError::EmptyRoster);
        }

        let prompt = build_draft_prompt(request);
        let mut attempts = Vec::with_capacity(self.config.models.len());

        for model in &self.config.models {
            debug!(model = %model, "Requesting draft");
            match self.attempt(model, &prompt).await {
                Ok(draft) => {
                    info!(
                        model = %model,
                        failed_attempts = attempts.len(),
                        "Draft generated"
                    );
                    return Ok(draft);
                }
                Err(reason) => {
                    warn!(model = %model, error = %reason, "Model attempt failed, trying next");
                    attempts.push(AttemptFailure {
                        model: model.clone(),
                        reason,
                    });
                }
            }
        }

        Err(DraftError::Exhausted { attempts })
    }

    async fn attempt(&self, model: &str, prompt: &str) -> Result<DraftResult, GenerationError> {
        let reply = tokio::time::timeout(
            self.config.attempt_timeout,
            self.generator.generate(model, prompt),
        )
        .await
        .map_err(|_| GenerationError::Timeout(self.config.attempt_timeout.as_secs()))??;

        parse_draft_reply(&reply)
    }
}

/// Parse a model reply into a draft.
///
/// Fenced and bare JSON parse identically. Any JSON object is accepted;
/// its fields are mapped leniently.
pub fn parse_draft_reply(reply: &str) -> Result<DraftResult, GenerationError> {
    let json_str = strip_code_fences(reply);
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| GenerationError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(object) => Ok(DraftResult::from_object(object)),
        _ => Err(GenerationError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replies with scripted results and records which models were asked.
    struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, GenerationError>>>,
        calls: Mutex<Vec<String>>,
        configured: bool,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
                configured: true,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, model: &str, _prompt: &str) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(model.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GenerationError::MissingText))
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("{}".to_string())
        }
    }

    fn roster(n: usize) -> DraftGeneratorConfig {
        DraftGeneratorConfig {
            models: (0..n).map(|i| format!("model-{i}")).collect(),
            attempt_timeout: Duration::from_secs(5),
        }
    }

    fn request() -> DraftRequest {
        DraftRequest::new("Chase unpaid invoices", "Finance")
    }

    fn http_404() -> GenerationError {
        GenerationError::Http {
            status: 404,
            message: "model not found".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fallback_after_failures_makes_k_plus_one_attempts() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(http_404()),
            Err(GenerationError::Network("connection reset".to_string())),
            Ok(r#"{"title":"Invoice Chaser","description":"d","steps":["a"]}"#.to_string()),
        ]));
        let drafts = DraftGenerator::new(generator.clone(), roster(4));

        let draft = drafts.generate(&request()).await.unwrap();
        assert_eq!(draft.title, "Invoice Chaser");
        assert_eq!(generator.calls(), vec!["model-0", "model-1", "model-2"]);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_every_attempt_and_last_reason() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(http_404()),
            Ok("not json at all".to_string()),
            Ok("[1, 2, 3]".to_string()),
        ]));
        let drafts = DraftGenerator::new(generator.clone(), roster(3));

        let err = drafts.generate(&request()).await.unwrap_err();
        let DraftError::Exhausted { attempts } = &err else {
            panic!("expected exhaustion, got {err:?}");
        };
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[0].reason, http_404());
        assert!(matches!(attempts[1].reason, GenerationError::InvalidJson(_)));
        assert_eq!(err.last_reason(), Some(&GenerationError::NotAnObject));
        assert_eq!(generator.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_attempts() {
        let mut generator = ScriptedGenerator::new(vec![]);
        generator.configured = false;
        let generator = Arc::new(generator);
        let drafts = DraftGenerator::new(generator.clone(), roster(2));

        let err = drafts.generate(&request()).await.unwrap_err();
        assert!(matches!(err, DraftError::MissingApiKey));
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_roster_and_blank_intent_rejected() {
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let drafts = DraftGenerator::new(generator.clone(), roster(0));
        assert!(matches!(
            drafts.generate(&request()).await,
            Err(DraftError::EmptyRoster)
        ));

        let drafts = DraftGenerator::new(generator.clone(), roster(1));
        let blank = DraftRequest::new("   ", "Finance");
        assert!(matches!(
            drafts.generate(&blank).await,
            Err(DraftError::InvalidRequest(_))
        ));
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_attempt_timeout_is_recorded() {
        let drafts = DraftGenerator::new(
            Arc::new(SlowGenerator),
            DraftGeneratorConfig {
                models: vec!["slow".to_string()],
                attempt_timeout: Duration::from_millis(20),
            },
        );
        let err = drafts.generate(&request()).await.unwrap_err();
        assert!(matches!(err.last_reason(), Some(GenerationError::Timeout(_))));
    }

    #[test]
    fn test_fenced_and_bare_replies_parse_identically() {
        let bare = r#"{"title":"T","desc":"D","steps":["one","two"]}"#;
        let fenced = format!("```json\n{bare}\n```");
        let a = parse_draft_reply(bare).unwrap();
        let b = parse_draft_reply(&fenced).unwrap();
        assert_eq!(a.title, b.title);
        assert_eq!(a.description, "D");
        assert_eq!(a.steps, b.steps);
    }

    #[test]
    fn test_non_object_reply_rejected() {
        assert_eq!(
            parse_draft_reply("\"just a string\"").unwrap_err(),
            GenerationError::NotAnObject
        );
    }
}
