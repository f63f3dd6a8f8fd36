use crate::errors::TriageResult;

/// Embedding generation provider.
///
/// The pipeline tolerates total unavailability: callers degrade to
/// lexical-only retrieval when `embed` fails or `is_available` is false.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> TriageResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
