//! Business logic handlers
//!
//! These handlers combine storage with the pure analysis functions and are
//! what the CLI and the scheduler call into.

pub mod leads;
pub mod questions;

// Re-export commonly used types
pub use leads::{LeadHandler, LeadSummary, SubmittedLead};
pub use questions::{ImportSummary, QuestionHandler, SkippedQuestion};
