//! Question handling logic
//!
//! Duplicate-aware import plus the admin and reader operations on stored
//! questions.

use crate::analysis::{DuplicateCheckResult, DuplicateChecker, DuplicateReport};
use crate::db::questions::QuestionFilter;
use crate::db::Database;
use crate::error::{CoreError, Result};
use crate::models::{
    slugify, Feedback, InterviewQuestion, QuestionLike, QuestionUpdate, ScrapingResult,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A candidate that was not inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedQuestion {
    pub question: String,
    pub reason: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_id: Option<String>,
}

/// Outcome of an import batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total: usize,
    /// Ids of the questions that were stored
    pub inserted: Vec<String>,
    pub skipped: Vec<SkippedQuestion>,
}

/// Question handler for business logic
pub struct QuestionHandler {
    db: Arc<Database>,
    checker: DuplicateChecker,
}

impl QuestionHandler {
    pub fn new(db: Arc<Database>, checker: DuplicateChecker) -> Self {
        QuestionHandler { db, checker }
    }

    /// Check a candidate against every stored question
    pub fn check(&self, candidate: &impl QuestionLike) -> Result<DuplicateCheckResult> {
        let existing = self.db.list_questions(&QuestionFilter::default())?;
        Ok(self.checker.check(candidate, &existing))
    }

    /// Duplicate report over the stored collection
    pub fn report(&self) -> Result<DuplicateReport> {
        let existing = self.db.list_questions(&QuestionFilter::default())?;
        Ok(self.checker.report(&existing))
    }

    /// Insert every candidate the checker does not flag as a duplicate.
    ///
    /// Candidates are also checked against the ones inserted earlier in the
    /// same batch, so a file containing the same question twice stores it once.
    pub fn import(&self, candidates: Vec<ScrapingResult>) -> Result<ImportSummary> {
        let mut existing = self.db.list_questions(&QuestionFilter::default())?;
        let mut summary = ImportSummary {
            total: candidates.len(),
            ..Default::default()
        };

        for candidate in candidates {
            if candidate.question.trim().is_empty() {
                summary.skipped.push(SkippedQuestion {
                    question: candidate.question,
                    reason: "Empty question text".to_string(),
                    confidence: 0.0,
                    existing_id: None,
                });
                continue;
            }

            let result = self.checker.check(&candidate, &existing);
            if result.is_duplicate {
                tracing::debug!(
                    "Skipping duplicate question {:?}: {}",
                    candidate.question,
                    result.reason
                );
                summary.skipped.push(SkippedQuestion {
                    question: candidate.question,
                    reason: result.reason,
                    confidence: result.confidence,
                    existing_id: result.existing_question.map(|q| q.id),
                });
                continue;
            }

            let slug = slugify(&candidate.question);
            let mut question = InterviewQuestion::from_scraped(slug, candidate, Utc::now());
            question.id = self.db.insert_question(&question)?;
            summary.inserted.push(question.id.clone());
            existing.push(question);
        }

        tracing::info!(
            "Imported {} of {} questions ({} skipped)",
            summary.inserted.len(),
            summary.total,
            summary.skipped.len()
        );
        Ok(summary)
    }

    pub fn list(&self, filter: &QuestionFilter) -> Result<Vec<InterviewQuestion>> {
        self.db.list_questions(filter)
    }

    pub fn get(&self, id: &str) -> Result<InterviewQuestion> {
        self.db
            .get_question(id)?
            .ok_or_else(|| CoreError::NotFound("Question", id.to_string()))
    }

    /// Fetch a question for a reader, counting the view
    pub fn view(&self, id: &str) -> Result<InterviewQuestion> {
        self.db.increment_question_views(id)?;
        self.get(id)
    }

    /// Admin edit. The id stays stable even when the text changes.
    pub fn edit(&self, id: &str, update: QuestionUpdate) -> Result<InterviewQuestion> {
        if update.is_empty() {
            return Err(CoreError::Validation("update contains no fields".to_string()));
        }
        if update.question.as_deref().is_some_and(|q| q.trim().is_empty()) {
            return Err(CoreError::Validation("question text cannot be empty".to_string()));
        }

        let mut question = self.get(id)?;
        update.apply(&mut question, Utc::now());
        self.db.update_question(&question)?;
        tracing::info!("Updated question {}", id);
        Ok(question)
    }

    pub fn feedback(&self, id: &str, feedback: Feedback) -> Result<InterviewQuestion> {
        self.db.record_feedback(id, feedback)?;
        self.get(id)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        if !self.db.delete_question(id)? {
            return Err(CoreError::NotFound("Question", id.to_string()));
        }
        tracing::info!("Deleted question {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn handler() -> QuestionHandler {
        let db = Arc::new(Database::open_in_memory().unwrap());
        QuestionHandler::new(db, DuplicateChecker::default())
    }

    fn scraped(question: &str, tags: &[&str]) -> ScrapingResult {
        ScrapingResult {
            question: question.to_string(),
            answer: "answer".to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            difficulty: Some(Difficulty::Beginner),
            source: "test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_import_skips_duplicates() {
        let h = handler();
        let first = h
            .import(vec![scraped("What is JSX?", &["jsx"]), scraped("Explain React portals", &["portals"])])
            .unwrap();
        assert_eq!(first.inserted, vec!["what-is-jsx", "explain-react-portals"]);

        let second = h
            .import(vec![scraped("what is jsx?", &["syntax"]), scraped("How do error boundaries work?", &["errors"])])
            .unwrap();
        assert_eq!(second.total, 2);
        assert_eq!(second.inserted, vec!["how-do-error-boundaries-work"]);
        assert_eq!(second.skipped.len(), 1);
        assert_eq!(second.skipped[0].existing_id.as_deref(), Some("what-is-jsx"));
        assert_eq!(second.skipped[0].reason, "Exact question match");
    }

    #[test]
    fn test_import_dedups_within_batch() {
        let h = handler();
        let summary = h
            .import(vec![scraped("What is JSX?", &["jsx"]), scraped("What is JSX?", &["jsx"])])
            .unwrap();
        assert_eq!(summary.inserted.len(), 1);
        assert_eq!(summary.skipped.len(), 1);
    }

    #[test]
    fn test_import_keeps_unrelated_untagged_questions() {
        let h = handler();
        let summary = h
            .import(vec![
                scraped("What is React?", &[]),
                scraped("Explain the Node.js event loop", &[]),
                scraped("How do CSS grid areas work?", &[]),
            ])
            .unwrap();
        assert_eq!(summary.inserted.len(), 3, "{summary:?}");
        assert!(summary.skipped.is_empty());

        let result = h.check(&scraped("Describe the React fiber architecture", &[])).unwrap();
        assert!(!result.is_duplicate);
    }

    #[test]
    fn test_import_skips_empty_text() {
        let h = handler();
        let summary = h.import(vec![scraped("   ", &[])]).unwrap();
        assert!(summary.inserted.is_empty());
        assert_eq!(summary.skipped[0].reason, "Empty question text");
    }

    #[test]
    fn test_slug_collision_gets_suffix() {
        let h = handler();
        let a = "Explain the difference between controlled and uncontrolled inputs";
        let b = "Explain the difference between controlled and uncontrolled components";
        let mut second = scraped(b, &["components"]);
        second.difficulty = Some(Difficulty::Advanced);

        let summary = h.import(vec![scraped(a, &["forms"]), second]).unwrap();
        assert_eq!(summary.inserted.len(), 2, "{summary:?}");
        assert_eq!(summary.inserted[1], format!("{}-2", summary.inserted[0]));
    }

    #[test]
    fn test_check_and_report() {
        let h = handler();
        h.import(vec![scraped("What is JSX?", &["jsx"])]).unwrap();

        let result = h.check(&scraped("WHAT IS JSX?", &[])).unwrap();
        assert!(result.is_duplicate);

        let report = h.report().unwrap();
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.duplicates_found, 0);
    }

    #[test]
    fn test_edit_view_feedback_delete() {
        let h = handler();
        h.import(vec![scraped("What is JSX?", &["jsx"])]).unwrap();

        let edited = h
            .edit(
                "what-is-jsx",
                QuestionUpdate {
                    question: Some("What is JSX and why use it?".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.id, "what-is-jsx");
        assert_eq!(edited.question, "What is JSX and why use it?");

        assert!(matches!(
            h.edit("what-is-jsx", QuestionUpdate::default()),
            Err(CoreError::Validation(_))
        ));

        assert_eq!(h.view("what-is-jsx").unwrap().view_count, 1);
        assert_eq!(h.feedback("what-is-jsx", Feedback::NotHelpful).unwrap().not_helpful_count, 1);

        h.delete("what-is-jsx").unwrap();
        assert!(matches!(h.get("what-is-jsx"), Err(CoreError::NotFound(..))));
        assert!(matches!(h.delete("what-is-jsx"), Err(CoreError::NotFound(..))));
    }
}
