//! Interview question types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a question id
pub const MAX_ID_LEN: usize = 50;

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse from string (case-insensitive)
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Anything the duplicate checker can compare: stored questions and
/// freshly scraped ones alike.
pub trait QuestionLike {
    fn question_text(&self) -> &str;
    fn tags(&self) -> &[String];
    fn categories(&self) -> &[String];
    fn difficulty(&self) -> Option<Difficulty>;
}

/// A stored interview question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub helpful_count: i64,
    #[serde(default)]
    pub not_helpful_count: i64,
}

impl InterviewQuestion {
    /// Build a new question from scraped content. Counters start at zero and
    /// a missing difficulty becomes `intermediate`.
    pub fn from_scraped(id: String, scraped: ScrapingResult, now: DateTime<Utc>) -> Self {
        InterviewQuestion {
            id,
            question: scraped.question,
            answer: scraped.answer,
            explanation: scraped.explanation,
            code_example: scraped.code_example,
            difficulty: scraped.difficulty.unwrap_or(Difficulty::Intermediate),
            category: scraped.category,
            tags: scraped.tags,
            source: scraped.source,
            source_url: scraped.source_url,
            created_at: now,
            updated_at: now,
            view_count: 0,
            helpful_count: 0,
            not_helpful_count: 0,
        }
    }
}

impl QuestionLike for InterviewQuestion {
    fn question_text(&self) -> &str {
        &self.question
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn categories(&self) -> &[String] {
        &self.category
    }

    fn difficulty(&self) -> Option<Difficulty> {
        Some(self.difficulty)
    }
}

/// Question content before it is persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingResult {
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl QuestionLike for ScrapingResult {
    fn question_text(&self) -> &str {
        &self.question
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn categories(&self) -> &[String] {
        &self.category
    }

    fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

/// Admin edit of a stored question. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdate {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub code_example: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub category: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl QuestionUpdate {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.explanation.is_none()
            && self.code_example.is_none()
            && self.difficulty.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.source_url.is_none()
    }

    /// Apply the edit in place. The id is never regenerated.
    pub fn apply(self, target: &mut InterviewQuestion, now: DateTime<Utc>) {
        if let Some(question) = self.question {
            target.question = question;
        }
        if let Some(answer) = self.answer {
            target.answer = answer;
        }
        if let Some(explanation) = self.explanation {
            target.explanation = explanation;
        }
        if let Some(code) = self.code_example {
            target.code_example = if code.is_empty() { None } else { Some(code) };
        }
        if let Some(difficulty) = self.difficulty {
            target.difficulty = difficulty;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(tags) = self.tags {
            target.tags = tags;
        }
        if let Some(url) = self.source_url {
            target.source_url = if url.is_empty() { None } else { Some(url) };
        }
        target.updated_at = now;
    }
}

/// Reader feedback on a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Helpful,
    NotHelpful,
}

/// Derive a question id from its text.
///
/// Runs of non-alphanumeric characters become a single `-` and the result is
/// cut to [`MAX_ID_LEN`] characters. Distinct questions sharing a long prefix
/// map to the same slug; the store resolves those collisions.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len().min(MAX_ID_LEN));
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    let truncated: String = slug.chars().take(MAX_ID_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}
