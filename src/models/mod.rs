//! Domain types for interview questions and job leads

pub mod lead;
pub mod question;

pub use lead::{Lead, LeadStatus, LeadSubmission};
pub use question::{
    slugify, Difficulty, Feedback, InterviewQuestion, QuestionLike, QuestionUpdate,
    ScrapingResult,
};
