//! Duplicate question detection
//!
//! A candidate is compared against every existing question with three
//! strategies (containment, word similarity, topic overlap). Each strategy is
//! gated by its own threshold and the strongest accepted score decides.

use super::similarity::text_similarity;
use super::topic::topic_similarity;
use crate::config::DuplicateThresholds;
use crate::models::{InterviewQuestion, QuestionLike};
use serde::{Deserialize, Serialize};

/// Outcome of checking one candidate against a set of existing questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckResult {
    pub is_duplicate: bool,
    /// Heuristic certainty in [0, 1]
    pub confidence: f64,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_question: Option<InterviewQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

impl DuplicateCheckResult {
    fn no_match() -> Self {
        DuplicateCheckResult {
            is_duplicate: false,
            confidence: 0.0,
            reason: "No significant similarity found".to_string(),
            existing_question: None,
            similarity_score: None,
        }
    }
}

/// Which comparison produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Containment,
    Text,
    Topic,
}

impl MatchStrategy {
    fn reason(&self, score: f64) -> String {
        let pct = score * 100.0;
        match self {
            MatchStrategy::Exact => "Exact question match".to_string(),
            MatchStrategy::Containment => {
                format!("Question text contains or is contained in an existing question ({:.0}% length match)", pct)
            }
            MatchStrategy::Text => format!("High text similarity ({:.0}%)", pct),
            MatchStrategy::Topic => format!("Similar topic, tags and difficulty ({:.0}%)", pct),
        }
    }
}

/// Lowercase, trim, and collapse whitespace runs
pub fn normalize_question(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length ratio when one normalized text contains the other
fn containment_score(a: &str, b: &str) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if !a.contains(b) && !b.contains(a) {
        return None;
    }
    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    Some(len_a.min(len_b) / len_a.max(len_b))
}

/// Duplicate checker with configurable thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateChecker {
    thresholds: DuplicateThresholds,
}

impl DuplicateChecker {
    pub fn new(thresholds: DuplicateThresholds) -> Self {
        DuplicateChecker { thresholds }
    }

    /// Check a candidate against existing questions.
    ///
    /// An exact (case and whitespace-insensitive) text match short-circuits
    /// with confidence 1.0. Otherwise the single best accepted score across all
    /// existing questions wins; ties keep the earlier question.
    pub fn check(
        &self,
        candidate: &impl QuestionLike,
        existing: &[InterviewQuestion],
    ) -> DuplicateCheckResult {
        let normalized = normalize_question(candidate.question_text());

        if let Some(hit) = existing
            .iter()
            .find(|q| normalize_question(&q.question) == normalized)
        {
            return DuplicateCheckResult {
                is_duplicate: true,
                confidence: 1.0,
                reason: MatchStrategy::Exact.reason(1.0),
                existing_question: Some(hit.clone()),
                similarity_score: Some(1.0),
            };
        }

        let t = &self.thresholds;
        let mut best: Option<(f64, MatchStrategy, &InterviewQuestion)> = None;

        for question in existing {
            let other = normalize_question(&question.question);

            let candidates = [
                containment_score(&normalized, &other)
                    .filter(|s| *s > t.containment)
                    .map(|s| (s, MatchStrategy::Containment)),
                Some(text_similarity(candidate.question_text(), &question.question))
                    .filter(|s| *s > t.text)
                    .map(|s| (s, MatchStrategy::Text)),
                Some(topic_similarity(candidate, question))
                    .filter(|s| *s > t.topic)
                    .map(|s| (s, MatchStrategy::Topic)),
            ];

            for (score, strategy) in candidates.into_iter().flatten() {
                if best.map_or(true, |(top, _, _)| score > top) {
                    best = Some((score, strategy, question));
                }
            }
        }

        match best {
            Some((score, strategy, question)) => DuplicateCheckResult {
                is_duplicate: score > t.duplicate,
                confidence: score,
                reason: strategy.reason(score),
                existing_question: Some(question.clone()),
                similarity_score: Some(score),
            },
            None => DuplicateCheckResult::no_match(),
        }
    }
}

/// Check with the default thresholds
pub fn check_duplicate(
    candidate: &impl QuestionLike,
    existing: &[InterviewQuestion],
) -> DuplicateCheckResult {
    DuplicateChecker::default().check(candidate, existing)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Difficulty, ScrapingResult};
    use chrono::Utc;

    pub(crate) fn stored(question: &str, tags: &[&str], difficulty: Difficulty) -> InterviewQuestion {
        InterviewQuestion::from_scraped(
            crate::models::slugify(question),
            ScrapingResult {
                question: question.to_string(),
                answer: "answer".to_string(),
                tags: tags.iter().map(|s| s.to_string()).collect(),
                category: vec!["react".to_string()],
                difficulty: Some(difficulty),
                source: "seed".to_string(),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn candidate(question: &str) -> ScrapingResult {
        ScrapingResult {
            question: question.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let existing = vec![stored("What is useState?", &["hooks"], Difficulty::Beginner)];
        let result = check_duplicate(&candidate("what is usestate?"), &existing);
        assert!(result.is_duplicate);
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.reason, "Exact question match");
        assert_eq!(result.existing_question.unwrap().id, "what-is-usestate");
    }

    #[test]
    fn test_exact_match_ignores_whitespace() {
        let existing = vec![stored("What is   the virtual DOM?", &["dom"], Difficulty::Beginner)];
        let result = check_duplicate(&candidate("  what is the Virtual DOM? "), &existing);
        assert!(result.is_duplicate);
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_existing_is_never_duplicate() {
        let result = check_duplicate(&candidate("What is useState?"), &[]);
        assert!(!result.is_duplicate);
        assert!(result.confidence.abs() < f64::EPSILON);
        assert!(result.existing_question.is_none());
    }

    #[test]
    fn test_unrelated_question() {
        let existing = vec![stored("What is Node.js event loop?", &["node"], Difficulty::Advanced)];
        let result = check_duplicate(&candidate("What is React?"), &existing);
        assert!(!result.is_duplicate);
        assert!(result.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_containment_match() {
        // 40 chars inside 46 chars: ratio ~0.87
        let existing = vec![stored(
            "How does React reconcile the virtual DOM tree?",
            &["dom"],
            Difficulty::Advanced,
        )];
        let result = check_duplicate(
            &candidate("How does React reconcile the virtual DOM"),
            &existing,
        );
        assert!(result.is_duplicate, "{result:?}");
        assert!(result.reason.starts_with("Question text contains"));
        assert!(result.confidence > 0.8 && result.confidence < 1.0);
    }

    fn untagged(question: &str, difficulty: Difficulty) -> InterviewQuestion {
        let mut q = stored(question, &[], difficulty);
        q.category.clear();
        q
    }

    #[test]
    fn test_unrelated_untagged_questions() {
        let existing = vec![untagged("What is Node.js event loop?", Difficulty::Beginner)];
        let scraped = ScrapingResult {
            difficulty: Some(Difficulty::Beginner),
            ..candidate("What is React?")
        };
        let result = check_duplicate(&scraped, &existing);
        assert!(!result.is_duplicate, "{result:?}");
        assert!(result.confidence.abs() < f64::EPSILON);
        assert!(result.existing_question.is_none());
    }

    #[test]
    fn test_untagged_candidate_against_tagged_store() {
        let existing = vec![
            stored("Explain the Node.js event loop", &["node"], Difficulty::Intermediate),
            untagged("What are React portals?", Difficulty::Intermediate),
        ];
        let scraped = ScrapingResult {
            difficulty: Some(Difficulty::Intermediate),
            ..candidate("How do CSS grid areas work?")
        };
        let result = check_duplicate(&scraped, &existing);
        assert!(!result.is_duplicate);
        assert!(result.existing_question.is_none());
    }

    #[test]
    fn test_short_containment_rejected() {
        let existing = vec![stored(
            "Explain how React hooks work internally with fiber nodes",
            &["hooks"],
            Difficulty::Advanced,
        )];
        let result = check_duplicate(&candidate("React hooks"), &existing);
        assert!(!result.is_duplicate);
        assert!(result.existing_question.is_none());
    }

    #[test]
    fn test_text_similarity_match() {
        // Same word set, different order
        let existing = vec![stored(
            "Explain component lifecycle methods clearly",
            &["lifecycle"],
            Difficulty::Intermediate,
        )];
        let result = check_duplicate(
            &candidate("Clearly explain lifecycle methods component"),
            &existing,
        );
        assert!(result.is_duplicate);
        assert!(result.reason.starts_with("High text similarity"));
    }

    #[test]
    fn test_topic_match() {
        let existing = vec![stored(
            "When should you reach for useReducer?",
            &["hooks", "state"],
            Difficulty::Intermediate,
        )];
        let scraped = ScrapingResult {
            question: "Compare reducer patterns against plain state setters".to_string(),
            tags: vec!["state".to_string(), "hooks".to_string()],
            category: vec!["React".to_string()],
            difficulty: Some(Difficulty::Intermediate),
            ..Default::default()
        };
        let result = check_duplicate(&scraped, &existing);
        assert!(result.is_duplicate);
        assert!(result.reason.starts_with("Similar topic"));
    }

    #[test]
    fn test_accepted_but_below_decision_threshold() {
        // containment ratio 0.75: accepted (> 0.7) but not a duplicate (<= 0.8)
        let existing = vec![stored("abcdefghijklmnopqrst", &[], Difficulty::Beginner)];
        let result = check_duplicate(&candidate("abcdefghijklmno"), &existing);
        assert!(!result.is_duplicate);
        assert!((result.confidence - 0.75).abs() < 1e-9);
        assert!(result.existing_question.is_some());
    }

    #[test]
    fn test_custom_thresholds() {
        let existing = vec![stored("abcdefghijklmnopqrst", &[], Difficulty::Beginner)];
        let checker = DuplicateChecker::new(DuplicateThresholds {
            duplicate: 0.7,
            ..Default::default()
        });
        let result = checker.check(&candidate("abcdefghijklmno"), &existing);
        assert!(result.is_duplicate);
    }

    #[test]
    fn test_best_match_wins_across_questions() {
        let existing = vec![
            stored("abcdefghijklmnopqrst", &[], Difficulty::Beginner),
            stored("abcdefghijklmnopq", &[], Difficulty::Beginner),
        ];
        let result = check_duplicate(&candidate("abcdefghijklmno"), &existing);
        assert_eq!(result.existing_question.unwrap().question, "abcdefghijklmnopq");
        assert!(result.is_duplicate);
    }
}
