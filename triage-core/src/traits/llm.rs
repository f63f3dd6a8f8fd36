use async_trait::async_trait;

use crate::errors::TriageResult;

/// A single LLM provider. Providers are composed into a fallback chain;
/// only the chain decides that "nobody answered" means absence rather
/// than an error.
#[async_trait]
pub trait ILlmClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        max_tokens: u32,
    ) -> TriageResult<String>;

    fn name(&self) -> &str;

    fn is_available(&self) -> bool;
}
