//! # triage-llm
//!
//! LLM access for root-cause synthesis and remediation proposals: an
//! ordered provider fallback chain where each provider is gated by its
//! own circuit breaker. Total unavailability is absence (`None`), never
//! an error — the pipeline has rule-based fallbacks for everything.

mod chain;
mod http;
mod sanitize;

pub use chain::ProviderChain;
pub use http::HttpLlmClient;
pub use sanitize::sanitize_question;
