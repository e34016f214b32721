//! Text similarity for question deduplication
//!
//! Whitespace tokenization with Jaccard similarity over the resulting word sets.

use std::collections::HashSet;

/// Tokens of this many characters or fewer carry no signal ("what", "is", "the")
pub const MIN_TOKEN_CHARS: usize = 3;

/// Split on whitespace, lowercase, keep tokens longer than [`MIN_TOKEN_CHARS`].
///
/// Punctuation stays attached to its word: "useState?" and "useState" are
/// different tokens.
///
/// Example: "What is the React useEffect hook?" → {"what", "react", "useeffect", "hook?"}
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .map(|w| w.to_lowercase())
        .collect()
}

/// Jaccard similarity: |intersection| / |union| of token sets.
///
/// Unlike the usual convention, two empty sets score 0: a question with no
/// meaningful words cannot vouch for similarity.
pub fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Word-set similarity of two strings in [0, 1]
pub fn text_similarity(a: &str, b: &str) -> f64 {
    jaccard(&tokenize(a), &tokenize(b))
}
