//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Compute the cosine similarity between two embeddings.
///
/// Sums are accumulated in `f64` so very small or very large components
/// do not underflow or overflow before the division. Returns a value between -1.0 and 1.0. Degenerate inputs score 0.0
/// instead of failing:
/// - either vector empty, or the lengths differ
/// - either vector has zero magnitude
/// - the result is not finite (NaN or infinite components)
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    let score = dot_product / (magnitude_a * magnitude_b);
    if score.is_finite() { score as f32 } else { 0.0 }
}

fn magnitude(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt()
}

/// A similarity search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// ID of the matched document.
    pub id: String,

    /// Cosine similarity against the query.
    pub score: f32,
}

impl SimilarityResult {
    /// Create a new similarity result.
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// Score every candidate against `query` and keep the best `k`.
///
/// Results are ordered by descending score. Equal scores keep the order
/// the candidates were given in.
pub fn rank_top_k<'a, I>(query: &[f32], candidates: I, k: usize) -> Vec<SimilarityResult>
where
    I: IntoIterator<Item = (&'a str, &'a [f32])>,
{
    let mut scores: Vec<(OrderedFloat<f32>, &str)> = candidates
        .into_iter()
        .map(|(id, embedding)| (OrderedFloat(cosine_similarity(query, embedding)), id))
        .collect();

    // Stable sort, so ties stay in candidate order.
    scores.sort_by(|a, b| b.0.cmp(&a.0));

    scores
        .into_iter()
        .take(k)
        .map(|(score, id)| SimilarityResult::new(id, score.0))
        .collect()
}
