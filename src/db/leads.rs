//! Lead storage

use super::{format_timestamp, parse_timestamp, Database};
use crate::error::{CoreError, Result};
use crate::models::{Lead, LeadStatus};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

const LEAD_COLUMNS: &str = "id, job_id, job_title, company, name, email, phone, experience,
    cover_letter, resume_url, status, qualification_score, created_at, updated_at";

fn row_to_lead(row: &Row) -> rusqlite::Result<Lead> {
    let status: String = row.get(10)?;
    let status = LeadStatus::from_db_str(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            10,
            Type::Text,
            format!("unknown lead status {:?}", status).into(),
        )
    })?;
    let created_at: String = row.get(12)?;
    let updated_at: String = row.get(13)?;

    Ok(Lead {
        id: row.get(0)?,
        job_id: row.get(1)?,
        job_title: row.get(2)?,
        company: row.get(3)?,
        name: row.get(4)?,
        email: row.get(5)?,
        phone: row.get(6)?,
        experience: row.get(7)?,
        cover_letter: row.get(8)?,
        resume_url: row.get(9)?,
        status,
        qualification_score: row.get(11)?,
        created_at: parse_timestamp(12, &created_at)?,
        updated_at: parse_timestamp(13, &updated_at)?,
    })
}

impl Database {
    pub fn insert_lead(&self, lead: &Lead) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO leads (id, job_id, job_title, company, name, email, phone, experience,
                cover_letter, resume_url, status, qualification_score, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                lead.id,
                lead.job_id,
                lead.job_title,
                lead.company,
                lead.name,
                lead.email,
                lead.phone,
                lead.experience,
                lead.cover_letter,
                lead.resume_url,
                lead.status.to_db_str(),
                lead.qualification_score,
                format_timestamp(&lead.created_at),
                format_timestamp(&lead.updated_at),
            ],
        )?;
        Ok(())
    }

    pub fn get_lead(&self, id: &str) -> Result<Option<Lead>> {
        let conn = self.conn();
        let sql = format!("SELECT {} FROM leads WHERE id = ?", LEAD_COLUMNS);
        let lead = conn.query_row(&sql, [id], row_to_lead).optional()?;
        Ok(lead)
    }

    /// List leads newest first, optionally restricted to one status
    pub fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        let conn = self.conn();
        let sql = format!(
            "SELECT {} FROM leads
             WHERE (?1 IS NULL OR status = ?1)
             ORDER BY created_at DESC, id ASC",
            LEAD_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let leads = stmt
            .query_map(params![status.map(|s| s.to_db_str())], row_to_lead)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(leads)
    }

    /// Set a lead's status and return the updated record
    pub fn update_lead_status(
        &self,
        id: &str,
        status: LeadStatus,
        now: DateTime<Utc>,
    ) -> Result<Lead> {
        {
            let conn = self.conn();
            let changed = conn.execute(
                "UPDATE leads SET status = ?2, updated_at = ?3 WHERE id = ?1",
                params![id, status.to_db_str(), format_timestamp(&now)],
            )?;
            if changed == 0 {
                return Err(CoreError::NotFound("Lead", id.to_string()));
            }
        }
        self.get_lead(id)?
            .ok_or_else(|| CoreError::NotFound("Lead", id.to_string()))
    }
}
