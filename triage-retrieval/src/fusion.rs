//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines the lexical and vector result lists into a single fused
//! ranking without requiring score normalization across the two
//! retrieval methods.

use std::collections::HashMap;

use triage_core::models::RawHit;

/// A candidate after RRF fusion, carrying both partial scores and the
/// fused score for downstream consumers.
#[derive(Debug, Clone)]
pub struct FusedHit {
    pub hit: RawHit,
    pub score_lexical: f64,
    pub score_vector: f64,
    pub score_fused: f64,
}

/// Contribution of a document at `rank` (0-indexed) in one ranked list.
fn rrf_contribution(k: u32, rank: usize) -> f64 {
    1.0 / (k as f64 + rank as f64)
}

/// Fuse the lexical and vector ranked lists.
///
/// A document absent from one list contributes 0 for that list. The
/// fused score is the sum of both contributions; results are sorted
/// descending by fused score and truncated to `top_k`. Ties keep the
/// lexical-arm encounter order.
pub fn fuse(lexical: &[RawHit], vector: &[RawHit], k: u32, top_k: usize) -> Vec<FusedHit> {
    let mut order: Vec<String> = Vec::new();
    let mut docs: HashMap<String, RawHit> = HashMap::new();
    let mut scores: HashMap<String, (f64, f64)> = HashMap::new();

    for (rank, hit) in lexical.iter().enumerate() {
        let entry = scores.entry(hit.doc_id.clone()).or_insert((0.0, 0.0));
        entry.0 += rrf_contribution(k, rank);
        docs.entry(hit.doc_id.clone()).or_insert_with(|| hit.clone());
        if !order.contains(&hit.doc_id) {
            order.push(hit.doc_id.clone());
        }
    }

    for (rank, hit) in vector.iter().enumerate() {
        let entry = scores.entry(hit.doc_id.clone()).or_insert((0.0, 0.0));
        entry.1 += rrf_contribution(k, rank);
        docs.entry(hit.doc_id.clone()).or_insert_with(|| hit.clone());
        if !order.contains(&hit.doc_id) {
            order.push(hit.doc_id.clone());
        }
    }

    let mut fused: Vec<FusedHit> = order
        .into_iter()
        .filter_map(|doc_id| {
            let (lex, vec) = scores.get(&doc_id).copied()?;
            let hit = docs.remove(&doc_id)?;
            Some(FusedHit {
                hit,
                score_lexical: lex,
                score_vector: vec,
                score_fused: lex + vec,
            })
        })
        .collect();

    fused.sort_by(|a, b| {
        b.score_fused
            .partial_cmp(&a.score_fused)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    fused.truncate(top_k);
    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str) -> RawHit {
        RawHit {
            doc_id: id.to_string(),
            message: Some(format!("message {id}")),
            timestamp: None,
            service: None,
            trace_id: None,
            tags: vec![],
        }
    }

    #[test]
    fn fused_score_is_sum_of_both_contributions() {
        // doc "a": lexical rank 0, vector rank 1.
        let lexical = vec![hit("a"), hit("b")];
        let vector = vec![hit("c"), hit("a")];
        let fused = fuse(&lexical, &vector, 60, 10);

        let a = fused.iter().find(|f| f.hit.doc_id == "a").unwrap();
        let expected = 1.0 / 60.0 + 1.0 / 61.0;
        assert!((a.score_fused - expected).abs() < 1e-12);
        assert!((a.score_lexical - 1.0 / 60.0).abs() < 1e-12);
        assert!((a.score_vector - 1.0 / 61.0).abs() < 1e-12);
    }

    #[test]
    fn absent_list_contributes_zero() {
        let lexical = vec![hit("a")];
        let fused = fuse(&lexical, &[], 60, 10);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].score_vector, 0.0);
        assert!((fused[0].score_fused - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn results_sorted_descending_and_truncated() {
        // "a" appears in both lists, so it outranks single-list docs.
        let lexical = vec![hit("b"), hit("a"), hit("d")];
        let vector = vec![hit("a"), hit("c")];
        let fused = fuse(&lexical, &vector, 60, 2);
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].hit.doc_id, "a");
        assert!(fused[0].score_fused >= fused[1].score_fused);
    }
}
