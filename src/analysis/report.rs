//! Duplicate report over a whole question collection
//!
//! Groups are built greedily around anchors: the first ungrouped question
//! becomes an anchor and every later ungrouped question is compared against
//! that anchor alone. Grouping is therefore order-dependent and not
//! transitive (A~B and B~C does not put C with A unless C~A).

use super::duplicate::DuplicateChecker;
use crate::models::InterviewQuestion;
use serde::{Deserialize, Serialize};

/// A cluster of questions judged to be the same
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    /// Anchor first, then its duplicates in collection order
    pub questions: Vec<InterviewQuestion>,
    pub reason: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateReport {
    pub total_questions: usize,
    /// Number of redundant questions (every group member except its anchor)
    pub duplicates_found: usize,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub recommendations: Vec<String>,
}

fn recommendations(duplicates_found: usize, groups: usize) -> Vec<String> {
    if duplicates_found == 0 {
        return vec![
            "No duplicate questions found".to_string(),
            "Keep running the duplicate check before importing new questions".to_string(),
        ];
    }
    vec![
        format!(
            "Review {} duplicate group(s) and keep the most complete version of each question",
            groups
        ),
        "Merge tags and feedback counts from removed duplicates into the kept question"
            .to_string(),
        "Run the duplicate check before importing new questions".to_string(),
    ]
}

impl DuplicateChecker {
    /// Partition a collection into duplicate groups. O(n²) comparisons.
    pub fn report(&self, questions: &[InterviewQuestion]) -> DuplicateReport {
        let mut grouped = vec![false; questions.len()];
        let mut groups = Vec::new();

        for (i, anchor) in questions.iter().enumerate() {
            if grouped[i] {
                continue;
            }

            let mut members = vec![anchor.clone()];
            let mut strongest: Option<(f64, String)> = None;

            for (j, other) in questions.iter().enumerate().skip(i + 1) {
                if grouped[j] {
                    continue;
                }
                let result = self.check(other, std::slice::from_ref(anchor));
                if !result.is_duplicate {
                    continue;
                }
                grouped[j] = true;
                members.push(other.clone());
                if strongest
                    .as_ref()
                    .map_or(true, |(top, _)| result.confidence > *top)
                {
                    strongest = Some((result.confidence, result.reason));
                }
            }

            if let Some((confidence, reason)) = strongest {
                grouped[i] = true;
                groups.push(DuplicateGroup {
                    questions: members,
                    reason,
                    confidence,
                });
            }
        }

        let duplicates_found = groups.iter().map(|g| g.questions.len() - 1).sum();
        tracing::debug!(
            "Duplicate report: {} questions, {} groups, {} duplicates",
            questions.len(),
            groups.len(),
            duplicates_found
        );

        DuplicateReport {
            total_questions: questions.len(),
            duplicates_found,
            recommendations: recommendations(duplicates_found, groups.len()),
            duplicate_groups: groups,
        }
    }
}

/// Report with the default thresholds
pub fn generate_report(questions: &[InterviewQuestion]) -> DuplicateReport {
    DuplicateChecker::default().report(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::duplicate::tests::stored;
    use crate::models::Difficulty;

    #[test]
    fn test_single_exact_pair() {
        let questions = vec![
            stored("What is useState?", &["hooks"], Difficulty::Beginner),
            stored("How does the virtual DOM work?", &["dom"], Difficulty::Intermediate),
            stored("what is usestate?", &["state"], Difficulty::Beginner),
            stored("Explain React context", &["context"], Difficulty::Intermediate),
            stored("What are React portals used for?", &["portals"], Difficulty::Advanced),
        ];

        let report = generate_report(&questions);
        assert_eq!(report.total_questions, 5);
        assert_eq!(report.duplicates_found, 1);
        assert_eq!(report.duplicate_groups.len(), 1);

        let group = &report.duplicate_groups[0];
        assert_eq!(group.questions.len(), 2);
        assert_eq!(group.questions[0].question, "What is useState?");
        assert_eq!(group.reason, "Exact question match");
        assert!((group.confidence - 1.0).abs() < f64::EPSILON);
        assert!(report.recommendations[0].starts_with("Review 1 duplicate group"));
    }

    #[test]
    fn test_no_duplicates() {
        let questions = vec![
            stored("What is JSX?", &["jsx"], Difficulty::Beginner),
            stored("Explain React reconciliation", &["dom"], Difficulty::Advanced),
        ];
        let report = generate_report(&questions);
        assert_eq!(report.duplicates_found, 0);
        assert!(report.duplicate_groups.is_empty());
        assert_eq!(report.recommendations[0], "No duplicate questions found");
    }

    #[test]
    fn test_empty_collection() {
        let report = generate_report(&[]);
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.duplicates_found, 0);
    }

    #[test]
    fn test_three_copies_form_one_group() {
        let questions = vec![
            stored("What is JSX?", &["jsx"], Difficulty::Beginner),
            stored("WHAT IS JSX?", &["syntax"], Difficulty::Beginner),
            stored("Explain React reconciliation", &["dom"], Difficulty::Advanced),
            stored("what is  jsx?", &["markup"], Difficulty::Beginner),
        ];
        let report = generate_report(&questions);
        assert_eq!(report.duplicate_groups.len(), 1);
        assert_eq!(report.duplicate_groups[0].questions.len(), 3);
        assert_eq!(report.duplicates_found, 2);
    }

    #[test]
    fn test_grouping_is_anchor_based() {
        // B contains A (20/23 > 0.8); C contains B (23/28 > 0.8) but only
        // 20/28 of A, so C is never pulled into A's group.
        let questions = vec![
            stored("abcdefghijklmnopqrst", &["a"], Difficulty::Beginner),
            stored("abcdefghijklmnopqrstuvw", &["b"], Difficulty::Intermediate),
            stored("abcdefghijklmnopqrstuvwxyz12", &["c"], Difficulty::Advanced),
        ];
        let report = generate_report(&questions);
        assert_eq!(report.duplicate_groups.len(), 1);
        assert_eq!(report.duplicate_groups[0].questions.len(), 2);
        assert_eq!(
            report.duplicate_groups[0].questions[1].question,
            "abcdefghijklmnopqrstuvw"
        );
    }
}
