//! Analysis Module
//!
//! Pure heuristics over in-memory data:
//! - Word-set (Jaccard) text similarity
//! - Topic similarity from tags, categories and difficulty
//! - Duplicate checking for a candidate question
//! - Duplicate reports over a whole question collection
//! - Lead qualification scoring and price banding
//!
//! Nothing here performs I/O; persistence and scheduling live in `db`,
//! `handlers` and `scheduler`.

pub mod duplicate;
pub mod lead_score;
pub mod report;
pub mod similarity;
pub mod topic;

// Re-export main types
pub use duplicate::{check_duplicate, DuplicateCheckResult, DuplicateChecker};
pub use lead_score::{score_lead, LeadLevel, LeadScore, LeadScorer, LeadSignals};
pub use report::{generate_report, DuplicateGroup, DuplicateReport};
pub use similarity::text_similarity;
pub use topic::topic_similarity;
