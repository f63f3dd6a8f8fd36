//! Ordered provider fallback chain.
//!
//! Tries providers in priority order. Each provider gets its own named
//! breaker (`llm-<name>`) from the shared registry; an open circuit
//! skips the provider without a network call. First success wins.

use std::sync::Arc;

use tracing::{error, info, warn};

use triage_core::traits::ILlmClient;
use triage_resilience::{retry, BreakerRegistry, RetryPolicy};

pub struct ProviderChain {
    providers: Vec<Box<dyn ILlmClient>>,
    breakers: Arc<BreakerRegistry>,
    policy: RetryPolicy,
}

impl ProviderChain {
    pub fn new(breakers: Arc<BreakerRegistry>, policy: RetryPolicy) -> Self {
        Self {
            providers: Vec::new(),
            breakers,
            policy,
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn ILlmClient>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Complete `prompt` via the first provider that answers.
    ///
    /// Returns `None` when no provider is configured, every circuit is
    /// open, or every provider fails — absence, not an error.
    pub async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        max_tokens: u32,
    ) -> Option<String> {
        if self.providers.is_empty() {
            warn!("no LLM provider configured");
            return None;
        }

        for provider in &self.providers {
            if !provider.is_available() {
                continue;
            }
            let breaker = self.breakers.get(&format!("llm-{}", provider.name()));

            let outcome = retry(&self.policy, Some(&breaker), provider.name(), || {
                provider.complete(prompt, system, max_tokens)
            })
            .await;

            match outcome {
                Ok(text) => return Some(text),
                Err(e) => {
                    info!(provider = provider.name(), error = %e, "provider failed, trying next");
                }
            }
        }

        error!("all LLM providers exhausted");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use triage_core::errors::{LlmError, TriageResult};

    use super::*;

    /// A mock provider that always fails, counting invocations.
    struct FailingProvider {
        calls: Arc<AtomicU32>,
    }

    impl FailingProvider {
        fn new() -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl ILlmClient for FailingProvider {
        async fn complete(
            &self,
            _prompt: &str,
            _system: Option<&str>,
            _max_tokens: u32,
        ) -> TriageResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::RequestFailed {
                provider: "failing".into(),
                reason: "mock failure".into(),
            }
            .into())
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    /// A mock provider that always succeeds.
    struct SuccessProvider;

    #[async_trait]
    impl ILlmClient for SuccessProvider {
        async fn complete(
            &self,
            _prompt: &str,
            _system: Option<&str>,
            _max_tokens: u32,
        ) -> TriageResult<String> {
            Ok("a likely root cause".to_string())
        }

        fn name(&self) -> &str {
            "success"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn chain() -> ProviderChain {
        ProviderChain::new(
            Arc::new(BreakerRegistry::new(2, Duration::from_secs(60))),
            RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(2)),
        )
    }

    #[tokio::test]
    async fn empty_chain_returns_none() {
        assert!(chain().complete("prompt", None, 100).await.is_none());
    }

    #[tokio::test]
    async fn falls_back_past_failing_provider() {
        let mut c = chain();
        let (failing, calls) = FailingProvider::new();
        c.push(Box::new(failing));
        c.push(Box::new(SuccessProvider));

        let answer = c.complete("prompt", Some("system"), 100).await;
        assert_eq!(answer.as_deref(), Some("a likely root cause"));
        assert!(calls.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn all_failing_returns_none() {
        let mut c = chain();
        let (failing, _calls) = FailingProvider::new();
        c.push(Box::new(failing));
        assert!(c.complete("prompt", None, 100).await.is_none());
    }

    #[tokio::test]
    async fn open_breaker_skips_network_call() {
        let breakers = Arc::new(BreakerRegistry::new(2, Duration::from_secs(60)));
        let policy = RetryPolicy::new(1, Duration::from_millis(1), Duration::from_millis(1));
        let mut c = ProviderChain::new(breakers.clone(), policy);
        let (failing, calls) = FailingProvider::new();
        c.push(Box::new(failing));

        // Two failing completions open the breaker (threshold 2,
        // one attempt each).
        let _ = c.complete("p", None, 10).await;
        let _ = c.complete("p", None, 10).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            breakers.get("llm-failing").state(),
            triage_resilience::BreakerState::Open
        );

        // Open circuit: the third round never invokes the provider.
        let _ = c.complete("p", None, 10).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
