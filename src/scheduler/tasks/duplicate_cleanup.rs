//! Periodic duplicate question cleanup task
//!
//! Each run takes the newest `batch_size` questions and checks them, oldest
//! first, against every older question still kept. Flagged questions are
//! hard-deleted, so the older, established question always survives. New
//! questions always fall inside the window, so the sweep never stalls behind
//! an already clean prefix of the collection.

use crate::analysis::DuplicateChecker;
use crate::config::Config;
use crate::db::questions::QuestionFilter;
use crate::db::Database;
use crate::error::{CoreError, Result};
use crate::models::InterviewQuestion;
use crate::scheduler::TaskResult;
use std::sync::Arc;
use std::time::Duration;

pub const TASK_NAME: &str = "duplicate_cleanup";

/// Per-run time limit
const TIMEOUT: Duration = Duration::from_secs(120);

pub async fn execute(db: Arc<Database>, config: &Config) -> TaskResult {
    let checker = DuplicateChecker::new(config.duplicates);
    let batch_size = config.scheduler.duplicate_cleanup.batch_size;

    let cleanup_future =
        tokio::task::spawn_blocking(move || cleanup_duplicates(&db, &checker, batch_size));

    match tokio::time::timeout(TIMEOUT, cleanup_future).await {
        Ok(joined) => match joined.map_err(CoreError::from).and_then(|r| r) {
            Ok((scanned, removed)) => {
                if removed > 0 {
                    tracing::info!(
                        "Duplicate cleanup: {} scanned, {} removed",
                        scanned,
                        removed
                    );
                }
                TaskResult {
                    task_name: TASK_NAME.to_string(),
                    items_processed: scanned,
                    items_affected: removed,
                    errors: 0,
                    detail: format!(
                        "{} questions scanned, {} duplicates removed",
                        scanned, removed
                    ),
                }
            }
            Err(e) => {
                tracing::error!("Duplicate cleanup failed: {}", e);
                TaskResult::failed(TASK_NAME, e.to_string())
            }
        },
        Err(_) => {
            tracing::error!("Duplicate cleanup timed out");
            TaskResult::failed(
                TASK_NAME,
                format!("Timed out after {} seconds", TIMEOUT.as_secs()),
            )
        }
    }
}

/// Check the newest `batch_size` questions against all older ones and
/// delete duplicates.
///
/// Returns `(scanned, removed)`.
pub fn cleanup_duplicates(
    db: &Database,
    checker: &DuplicateChecker,
    batch_size: usize,
) -> Result<(usize, usize)> {
    let mut kept: Vec<InterviewQuestion> = db.list_questions(&QuestionFilter::default())?;
    let window_start = kept.len().saturating_sub(batch_size);
    let window = kept.split_off(window_start);

    let scanned = window.len();
    let mut duplicate_ids: Vec<String> = Vec::new();

    for question in window {
        let result = checker.check(&question, &kept);
        if result.is_duplicate {
            tracing::debug!(
                "Question {} duplicates {}: {}",
                question.id,
                result
                    .existing_question
                    .as_ref()
                    .map(|q| q.id.as_str())
                    .unwrap_or("?"),
                result.reason
            );
            duplicate_ids.push(question.id);
        } else {
            kept.push(question);
        }
    }

    let removed = if duplicate_ids.is_empty() {
        0
    } else {
        db.delete_questions(&duplicate_ids)?
    };

    Ok((scanned, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, ScrapingResult};
    use chrono::{Duration as ChronoDuration, Utc};

    fn insert(db: &Database, id: &str, text: &str, tags: &[&str], age_days: i64) {
        let mut q = InterviewQuestion::from_scraped(
            id.to_string(),
            ScrapingResult {
                question: text.to_string(),
                answer: "answer".to_string(),
                tags: tags.iter().map(|s| s.to_string()).collect(),
                difficulty: Some(Difficulty::Intermediate),
                ..Default::default()
            },
            Utc::now(),
        );
        q.created_at = Utc::now() - ChronoDuration::days(age_days);
        db.insert_question(&q).unwrap();
    }

    #[test]
    fn test_keeps_oldest_of_each_pair() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "newer-copy", "what is JSX?", &["syntax"], 1);
        insert(&db, "original", "What is JSX?", &["jsx"], 10);
        insert(&db, "other", "Explain React portals", &["portals"], 5);

        let (scanned, removed) =
            cleanup_duplicates(&db, &DuplicateChecker::default(), 500).unwrap();
        assert_eq!(scanned, 3);
        assert_eq!(removed, 1);
        assert!(db.get_question("original").unwrap().is_some());
        assert!(db.get_question("newer-copy").unwrap().is_none());
        assert!(db.get_question("other").unwrap().is_some());
    }

    #[test]
    fn test_window_covers_newest_questions() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "a", "What is JSX?", &["jsx"], 3);
        insert(&db, "b", "Explain React portals", &["portals"], 2);
        insert(&db, "c", "what is jsx?", &["jsx"], 1);

        // Only b and c are scanned, but c is still compared with a
        let (scanned, removed) =
            cleanup_duplicates(&db, &DuplicateChecker::default(), 2).unwrap();
        assert_eq!((scanned, removed), (2, 1));
        assert!(db.get_question("a").unwrap().is_some());
        assert!(db.get_question("c").unwrap().is_none());
    }

    #[test]
    fn test_later_run_catches_new_duplicate() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "jsx", "What is JSX?", &["jsx"], 5);
        insert(&db, "portals", "Explain React portals", &["portals"], 4);
        insert(&db, "context", "How does React context work", &["context"], 3);
        let checker = DuplicateChecker::default();

        assert_eq!(cleanup_duplicates(&db, &checker, 2).unwrap(), (2, 0));

        insert(&db, "jsx-copy", "WHAT IS JSX?", &["jsx"], 0);
        assert_eq!(cleanup_duplicates(&db, &checker, 2).unwrap(), (2, 1));
        assert!(db.get_question("jsx-copy").unwrap().is_none());
        assert_eq!(db.count_questions().unwrap(), 3);
    }

    #[test]
    fn test_untagged_unrelated_questions_survive() {
        let db = Database::open_in_memory().unwrap();
        insert(&db, "react", "What is React?", &[], 3);
        insert(&db, "node", "Explain the Node.js event loop", &[], 2);
        insert(&db, "grid", "How do CSS grid areas work?", &[], 1);

        let (scanned, removed) =
            cleanup_duplicates(&db, &DuplicateChecker::default(), 500).unwrap();
        assert_eq!((scanned, removed), (3, 0));
        assert_eq!(db.count_questions().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_execute_reports_counts() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        insert(&db, "original", "What is JSX?", &["jsx"], 2);
        insert(&db, "copy", "WHAT IS JSX?", &["jsx"], 1);

        let result = execute(db.clone(), &Config::default()).await;
        assert_eq!(result.task_name, TASK_NAME);
        assert_eq!(result.items_processed, 2);
        assert_eq!(result.items_affected, 1);
        assert_eq!(result.errors, 0);
        assert_eq!(db.count_questions().unwrap(), 1);
    }
}
