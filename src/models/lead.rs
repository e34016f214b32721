//! Job lead types

use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lead pipeline status, changed only by admin action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Qualified,
    Contacted,
    Sold,
    Rejected,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Qualified,
        LeadStatus::Contacted,
        LeadStatus::Sold,
        LeadStatus::Rejected,
    ];

    /// Parse from string (case-insensitive)
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(LeadStatus::New),
            "qualified" => Some(LeadStatus::Qualified),
            "contacted" => Some(LeadStatus::Contacted),
            "sold" => Some(LeadStatus::Sold),
            "rejected" => Some(LeadStatus::Rejected),
            _ => None,
        }
    }

    /// Parse user input, rejecting unknown values
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_db_str(s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown lead status: {}", s)))
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Sold => "sold",
            LeadStatus::Rejected => "rejected",
        }
    }
}

/// An application submitted against a job posting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl LeadSubmission {
    /// Minimal shape checks before a lead is stored
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("name is required".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CoreError::Validation(format!(
                "invalid email address: {:?}",
                self.email
            )));
        }
        if self.job_id.trim().is_empty() {
            return Err(CoreError::Validation("jobId is required".to_string()));
        }
        Ok(())
    }
}

/// A stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub experience: String,
    pub cover_letter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub status: LeadStatus,
    pub qualification_score: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn from_submission(
        id: String,
        submission: LeadSubmission,
        qualification_score: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Lead {
            id,
            job_id: submission.job_id,
            job_title: submission.job_title,
            company: submission.company,
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: non_blank(submission.phone),
            experience: submission.experience,
            cover_letter: submission.cover_letter,
            resume_url: non_blank(submission.resume_url),
            status: LeadStatus::New,
            qualification_score,
            created_at: now,
            updated_at: now,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
