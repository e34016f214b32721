//! Lead qualification scoring
//!
//! A flat decision table over keyword hits in the applicant's free text plus
//! the presence of contact details. Produces a 0-100 score, a level band and
//! the price the lead sells for.

use crate::models::{Lead, LeadSubmission};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const SENIORITY_POINTS: u32 = 20;
const TECH_POINTS_EACH: u32 = 4;
const TECH_POINTS_MAX: u32 = 24;
const LONG_LETTER_CHARS: usize = 200;
const SHORT_LETTER_CHARS: usize = 50;
const PHONE_POINTS: u32 = 10;
const RESUME_POINTS: u32 = 16;
const MAX_SCORE: u32 = 100;

const TECH_KEYWORDS: [(&str, &str); 8] = [
    ("React", r"\breact\b"),
    ("TypeScript", r"\btypescript\b"),
    ("JavaScript", r"\bjavascript\b"),
    ("Next.js", r"\bnext\.?js\b"),
    ("Redux", r"\bredux\b"),
    ("Node.js", r"\bnode(\.?js)?\b"),
    ("GraphQL", r"\bgraphql\b"),
    ("Testing", r"\b(testing|jest|cypress)\b"),
];

/// Applicant level band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadLevel {
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
    Lead,
}

impl LeadLevel {
    /// Band a score at 40 / 60 / 80
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=39 => LeadLevel::Junior,
            40..=59 => LeadLevel::MidLevel,
            60..=79 => LeadLevel::Senior,
            _ => LeadLevel::Lead,
        }
    }

    /// Price in dollars for a lead at this level
    pub fn price(&self) -> u32 {
        match self {
            LeadLevel::Junior => 50,
            LeadLevel::MidLevel => 100,
            LeadLevel::Senior => 150,
            LeadLevel::Lead => 200,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LeadLevel::Junior => "Junior",
            LeadLevel::MidLevel => "Mid-level",
            LeadLevel::Senior => "Senior",
            LeadLevel::Lead => "Lead",
        }
    }
}

/// Scoring outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    pub score: u32,
    pub level: LeadLevel,
    pub price: u32,
    pub reasoning: Vec<String>,
}

/// The fields of a lead that feed the score
#[derive(Debug, Clone, Copy)]
pub struct LeadSignals<'a> {
    pub experience: &'a str,
    pub cover_letter: &'a str,
    pub has_phone: bool,
    pub has_resume: bool,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl<'a> From<&'a LeadSubmission> for LeadSignals<'a> {
    fn from(s: &'a LeadSubmission) -> Self {
        LeadSignals {
            experience: &s.experience,
            cover_letter: &s.cover_letter,
            has_phone: present(&s.phone),
            has_resume: present(&s.resume_url),
        }
    }
}

impl<'a> From<&'a Lead> for LeadSignals<'a> {
    fn from(l: &'a Lead) -> Self {
        LeadSignals {
            experience: &l.experience,
            cover_letter: &l.cover_letter,
            has_phone: present(&l.phone),
            has_resume: present(&l.resume_url),
        }
    }
}

/// Regex-based scorer for lead free text
pub struct LeadScorer {
    seniority_regex: Regex,
    years_regex: Regex,
    tech_regexes: Vec<(&'static str, Regex)>,
}

impl Default for LeadScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadScorer {
    pub fn new() -> Self {
        Self {
            seniority_regex: Regex::new(r"(?i)\b(senior|lead|principal|staff|architect)\b")
                .expect("seniority pattern is valid"),
            years_regex: Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b")
                .expect("years pattern is valid"),
            tech_regexes: TECH_KEYWORDS
                .iter()
                .map(|(label, pattern)| {
                    let re = Regex::new(&format!("(?i){}", pattern))
                        .expect("technology pattern is valid");
                    (*label, re)
                })
                .collect(),
        }
    }

    /// Largest "N years" mention in the text
    fn max_years(&self, text: &str) -> Option<u32> {
        self.years_regex
            .captures_iter(text)
            .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
            .max()
    }

    pub fn score<'a>(&self, input: impl Into<LeadSignals<'a>>) -> LeadScore {
        let signals = input.into();
        let text = format!("{} {}", signals.experience, signals.cover_letter);
        let mut score = 0u32;
        let mut reasoning = Vec::new();

        if let Some(m) = self.seniority_regex.find(&text) {
            score += SENIORITY_POINTS;
            reasoning.push(format!(
                "Seniority keyword \"{}\" (+{})",
                m.as_str().to_lowercase(),
                SENIORITY_POINTS
            ));
        }

        if let Some(years) = self.max_years(&text) {
            let points = match years {
                5.. => 20,
                3..=4 => 12,
                1..=2 => 5,
                0 => 0,
            };
            if points > 0 {
                score += points;
                reasoning.push(format!("{} years of experience (+{})", years, points));
            }
        }

        let techs: Vec<&str> = self
            .tech_regexes
            .iter()
            .filter(|(_, re)| re.is_match(&text))
            .map(|(label, _)| *label)
            .collect();
        if !techs.is_empty() {
            let points = (techs.len() as u32 * TECH_POINTS_EACH).min(TECH_POINTS_MAX);
            score += points;
            reasoning.push(format!("Relevant technologies: {} (+{})", techs.join(", "), points));
        }

        let letter_len = signals.cover_letter.trim().chars().count();
        if letter_len >= LONG_LETTER_CHARS {
            score += 10;
            reasoning.push("Detailed cover letter (+10)".to_string());
        } else if letter_len >= SHORT_LETTER_CHARS {
            score += 5;
            reasoning.push("Short cover letter (+5)".to_string());
        }

        if signals.has_phone {
            score += PHONE_POINTS;
            reasoning.push(format!("Phone number provided (+{})", PHONE_POINTS));
        }

        if signals.has_resume {
            score += RESUME_POINTS;
            reasoning.push(format!("Resume attached (+{})", RESUME_POINTS));
        }

        let score = score.min(MAX_SCORE);
        let level = LeadLevel::from_score(score);

        LeadScore {
            score,
            level,
            price: level.price(),
            reasoning,
        }
    }
}

/// Score with a shared scorer instance
pub fn score_lead<'a>(input: impl Into<LeadSignals<'a>>) -> LeadScore {
    static SCORER: OnceLock<LeadScorer> = OnceLock::new();
    SCORER.get_or_init(LeadScorer::new).score(input)
}
