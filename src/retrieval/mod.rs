//! Similarity ranking over cached segment embeddings.
//!
//! Retrieval is a full linear scan: every segment is scored against the query
//! vector and the best matches are kept. The corpus is small and static, so
//! no index is needed.

use crate::corpus::Segment;
use tracing::debug;

/// A corpus segment paired with its embedding vector.
#[derive(Debug, Clone)]
pub struct SegmentEmbedding {
    pub segment: Segment,
    pub embedding: Vec<f32>,
}

/// A ranked segment with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredSegment {
    /// Position of the segment in the corpus.
    pub index: usize,
    /// Segment text.
    pub text: String,
    /// Cosine similarity to the query (higher is better).
    pub score: f32,
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths or when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Rank segments by descending cosine similarity to the query vector.
///
/// The sort is stable, so segments with equal scores keep corpus order.
/// Results below `min_score` are dropped and at most `top_k` are returned.
pub fn rank(
    query: &[f32],
    records: &[SegmentEmbedding],
    top_k: usize,
    min_score: f32,
) -> Vec<ScoredSegment> {
    let mut results: Vec<ScoredSegment> = records
        .iter()
        .map(|record| ScoredSegment {
            index: record.segment.index,
            text: record.segment.text.clone(),
            score: cosine_similarity(query, &record.embedding),
        })
        .filter(|r| r.score >= min_score)
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(top_k);

    debug!("Ranked {} segments, kept {}", records.len(), results.len());
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, text: &str, embedding: Vec<f32>) -> SegmentEmbedding {
        SegmentEmbedding {
            segment: Segment {
                index,
                text: text.to_string(),
            },
            embedding,
        }
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        let zero = vec![0.0, 0.0, 0.0];
        let a = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &a), 0.0);
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_rank_orders_by_descending_score() {
        let records = vec![
            record(0, "weak", vec![0.1, 1.0]),
            record(1, "strong", vec![1.0, 0.0]),
        ];

        let results = rank(&[1.0, 0.0], &records, 10, 0.0);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].index, 1);
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_rank_ties_keep_corpus_order() {
        let records = vec![
            record(0, "first", vec![1.0, 0.0]),
            record(1, "second", vec![1.0, 0.0]),
            record(2, "third", vec![2.0, 0.0]),
        ];

        let results = rank(&[1.0, 0.0], &records, 10, 0.0);
        // All three score 1.0; stable sort keeps corpus order.
        assert_eq!(
            results.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_rank_truncates_to_top_k() {
        let records = vec![
            record(0, "a", vec![1.0, 0.0]),
            record(1, "b", vec![0.9, 0.1]),
            record(2, "c", vec![0.0, 1.0]),
        ];

        let results = rank(&[1.0, 0.0], &records, 1, 0.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 0);
    }

    #[test]
    fn test_rank_filters_below_min_score() {
        let records = vec![
            record(0, "match", vec![1.0, 0.0]),
            record(1, "orthogonal", vec![0.0, 1.0]),
        ];

        let results = rank(&[1.0, 0.0], &records, 10, 0.5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 0);
    }
}
