//! Hybrid searcher: strict filters applied to both arms, lexical +
//! vector fused with RRF. Degrades silently to lexical-only when the
//! embedding step fails.

use tracing::{debug, warn};

use triage_core::errors::TriageResult;
use triage_core::models::{EvidenceFilter, SourceKind};
use triage_core::traits::{IEmbeddingProvider, ITelemetryStore};

use crate::fusion::{fuse, FusedHit};

/// One hybrid search over a single telemetry source.
pub struct HybridSearcher<'a> {
    store: &'a dyn ITelemetryStore,
    embedder: &'a dyn IEmbeddingProvider,
    rrf_k: u32,
}

impl<'a> HybridSearcher<'a> {
    pub fn new(
        store: &'a dyn ITelemetryStore,
        embedder: &'a dyn IEmbeddingProvider,
        rrf_k: u32,
    ) -> Self {
        Self {
            store,
            embedder,
            rrf_k,
        }
    }

    /// Run lexical + vector search under `filter`, fuse, keep `top_k`.
    ///
    /// Each arm fetches `top_k * 2` candidates before fusion. A failing
    /// embedding or vector arm downgrades to lexical-only with a
    /// warning; a failing lexical arm is a real error.
    pub async fn search(
        &self,
        question: &str,
        filter: &EvidenceFilter,
        kind: SourceKind,
        top_k: usize,
    ) -> TriageResult<Vec<FusedHit>> {
        let fetch = top_k * 2;

        let vector_hits = if self.embedder.is_available() {
            match self.embedder.embed(question) {
                Ok(embedding) => match self
                    .store
                    .vector_search(&embedding, filter, kind, fetch)
                    .await
                {
                    Ok(hits) => hits,
                    Err(e) => {
                        warn!(source = kind.key(), error = %e, "vector arm failed, lexical-only");
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(
                        provider = self.embedder.name(),
                        error = %e,
                        "embedding failed, lexical-only"
                    );
                    Vec::new()
                }
            }
        } else {
            debug!(
                provider = self.embedder.name(),
                "embedder unavailable, lexical-only"
            );
            Vec::new()
        };

        let lexical_hits = self.store.lexical_search(question, filter, kind, fetch).await?;

        debug!(
            source = kind.key(),
            lexical = lexical_hits.len(),
            vector = vector_hits.len(),
            "fusing ranked lists"
        );
        Ok(fuse(&lexical_hits, &vector_hits, self.rrf_k, top_k))
    }
}
