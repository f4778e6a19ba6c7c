use async_trait::async_trait;

use crate::domain::errors::GenerationError;

/// Port for a generative text API.
///
/// One call is one network attempt against one named model; retry and
/// fallback policy live with the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` to `model` and return the reply text
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;

    /// Whether the generator has the credentials it needs to make a call
    fn is_configured(&self) -> bool {
        true
    }
}
