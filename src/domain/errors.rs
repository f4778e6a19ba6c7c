//! Domain errors for the Flowshelf catalog.

use thiserror::Error;

/// Errors from the remote record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record store is not configured: {0}")]
    NotConfigured(String),

    #[error("Not signed in: writing workflows requires a user session")]
    NotSignedIn,

    #[error("Workflow row not found: {0}")]
    NotFound(i64),

    #[error("Invalid workflow: {0}")]
    InvalidRecord(String),

    #[error("Record store request failed: {0}")]
    Network(String),

    #[error("Record store request timed out after {0}s")]
    Timeout(u64),

    #[error("Record store rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to decode record store response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Failure of a single model attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Model returned success but no text")]
    MissingText,

    #[error("Model did not answer within {0}s")]
    Timeout(u64),

    #[error("Reply is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Reply is JSON but not an object")]
    NotAnObject,
}

/// One failed model attempt, kept for the aggregated failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub model: String,
    pub reason: GenerationError,
}

/// Terminal failures of a draft generation call.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Invalid draft request: {0}")]
    InvalidRequest(String),

    #[error("Missing API key for the generative API")]
    MissingApiKey,

    #[error("No models configured for draft generation")]
    EmptyRoster,

    #[error("All {} model(s) failed; last error from {}: {}", .attempts.len(), last_model(.attempts), last_reason(.attempts))]
    Exhausted { attempts: Vec<AttemptFailure> },
}

impl DraftError {
    /// Reason recorded for the final attempt, when the roster was exhausted.
    pub fn last_reason(&self) -> Option<&GenerationError> {
        match self {
            Self::Exhausted { attempts } => attempts.last().map(|a| &a.reason),
            _ => None,
        }
    }
}

fn last_model(attempts: &[AttemptFailure]) -> &str {
    attempts.last().map_or("<none>", |a| a.model.as_str())
}

fn last_reason(attempts: &[AttemptFailure]) -> String {
    attempts
        .last()
        .map_or_else(|| "no attempts".to_string(), |a| a.reason.to_string())
}

/// Errors loading the static catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate catalog id: {0}")]
    DuplicateId(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_reports_last_reason() {
        let err = DraftError::Exhausted {
            attempts: vec![
                AttemptFailure {
                    model: "a".to_string(),
                    reason: GenerationError::Http {
                        status: 404,
                        message: "not found".to_string(),
                    },
                },
                AttemptFailure {
                    model: "b".to_string(),
                    reason: GenerationError::MissingText,
                },
            ],
        };
        assert_eq!(err.last_reason(), Some(&GenerationError::MissingText));
        assert_eq!(
            err.to_string(),
            "All 2 model(s) failed; last error from b: Model returned success but no text"
        );
    }

    #[test]
    fn test_rejected_display() {
        let err = StoreError::Rejected {
            status: 409,
            body: "duplicate key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Record store rejected the request (409): duplicate key"
        );
    }
}
