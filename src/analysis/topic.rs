//! Topic similarity between two questions
//!
//! Averages tag overlap, category overlap and difficulty agreement. Tag and
//! category lists are always compared (an empty list overlaps nothing);
//! difficulty is skipped when either side has none.

use super::similarity::jaccard;
use crate::models::QuestionLike;
use std::collections::HashSet;

fn label_set(labels: &[String]) -> HashSet<String> {
    labels
        .iter()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Jaccard overlap of two label lists, 0 when either is empty
fn label_overlap(a: &[String], b: &[String]) -> f64 {
    jaccard(&label_set(a), &label_set(b))
}

/// Mean of the computable sub-scores in [0, 1]
pub fn topic_similarity(a: &impl QuestionLike, b: &impl QuestionLike) -> f64 {
    let mut scores = vec![
        label_overlap(a.tags(), b.tags()),
        label_overlap(a.categories(), b.categories()),
    ];
    if let (Some(da), Some(db)) = (a.difficulty(), b.difficulty()) {
        scores.push(if da == db { 1.0 } else { 0.0 });
    }

    scores.iter().sum::<f64>() / scores.len() as f64
}
