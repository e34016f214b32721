//! Lead handling logic

use crate::analysis::{score_lead, LeadLevel, LeadScore};
use crate::db::Database;
use crate::error::{CoreError, Result};
use crate::models::{Lead, LeadStatus, LeadSubmission};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A freshly stored lead with the breakdown of its score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedLead {
    pub lead: Lead,
    pub qualification: LeadScore,
}

/// Pipeline overview for reporting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Sum of band prices over sold leads
    pub sold_revenue: u32,
    /// Sum of band prices over leads still in play (new, qualified, contacted)
    pub open_pipeline_value: u32,
}

/// Band price of a stored lead
pub fn lead_price(lead: &Lead) -> u32 {
    LeadLevel::from_score(lead.qualification_score).price()
}

/// Lead handler for business logic
pub struct LeadHandler {
    db: Arc<Database>,
}

impl LeadHandler {
    pub fn new(db: Arc<Database>) -> Self {
        LeadHandler { db }
    }

    /// Validate, score once and store a new lead
    pub fn submit(&self, submission: LeadSubmission) -> Result<SubmittedLead> {
        submission.validate()?;
        let qualification = score_lead(&submission);
        let lead = Lead::from_submission(
            uuid::Uuid::new_v4().to_string(),
            submission,
            qualification.score,
            Utc::now(),
        );
        self.db.insert_lead(&lead)?;

        tracing::info!(
            "Stored lead {} for job {} (score {}, {})",
            lead.id,
            lead.job_id,
            qualification.score,
            qualification.level.display_name()
        );
        Ok(SubmittedLead {
            lead,
            qualification,
        })
    }

    pub fn get(&self, id: &str) -> Result<Lead> {
        self.db
            .get_lead(id)?
            .ok_or_else(|| CoreError::NotFound("Lead", id.to_string()))
    }

    pub fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        self.db.list_leads(status)
    }

    /// Admin status change. The qualification score is left untouched.
    pub fn set_status(&self, id: &str, status: LeadStatus) -> Result<Lead> {
        let lead = self.db.update_lead_status(id, status, Utc::now())?;
        tracing::info!("Lead {} moved to {}", id, status.to_db_str());
        Ok(lead)
    }

    pub fn summary(&self) -> Result<LeadSummary> {
        let leads = self.db.list_leads(None)?;
        let mut summary = LeadSummary {
            total: leads.len(),
            by_status: LeadStatus::ALL
                .iter()
                .map(|s| (s.to_db_str().to_string(), 0))
                .collect(),
            ..Default::default()
        };

        for lead in &leads {
            *summary
                .by_status
                .entry(lead.status.to_db_str().to_string())
                .or_insert(0) += 1;
            match lead.status {
                LeadStatus::Sold => summary.sold_revenue += lead_price(lead),
                LeadStatus::New | LeadStatus::Qualified | LeadStatus::Contacted => {
                    summary.open_pipeline_value += lead_price(lead)
                }
                LeadStatus::Rejected => {}
            }
        }
        Ok(summary)
    }
}
