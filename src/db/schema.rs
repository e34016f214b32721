//! SQLite schema for Jobcore
//!
//! Interview questions and job leads. List-valued fields (tags, categories)
//! are stored as JSON text.

use rusqlite::{Connection, Result};

/// Initialize the database with required tables
pub fn init_db(conn: &Connection) -> Result<()> {
    // Interview questions, keyed by the slug of the question text
    conn.execute(
        "CREATE TABLE IF NOT EXISTS questions (
            id TEXT PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            explanation TEXT NOT NULL DEFAULT '',
            code_example TEXT,
            difficulty TEXT NOT NULL CHECK (
                difficulty IN ('beginner', 'intermediate', 'advanced')
            ),
            category TEXT NOT NULL DEFAULT '[]',
            tags TEXT NOT NULL DEFAULT '[]',
            source TEXT NOT NULL DEFAULT '',
            source_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            view_count INTEGER NOT NULL DEFAULT 0,
            helpful_count INTEGER NOT NULL DEFAULT 0,
            not_helpful_count INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    // Job leads submitted by applicants
    conn.execute(
        "CREATE TABLE IF NOT EXISTS leads (
            id TEXT PRIMARY KEY,
            job_id TEXT NOT NULL,
            job_title TEXT NOT NULL DEFAULT '',
            company TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            experience TEXT NOT NULL DEFAULT '',
            cover_letter TEXT NOT NULL DEFAULT '',
            resume_url TEXT,
            status TEXT NOT NULL DEFAULT 'new' CHECK (
                status IN ('new', 'qualified', 'contacted', 'sold', 'rejected')
            ),
            qualification_score INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    create_indexes(conn)?;

    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_questions_created ON questions(created_at ASC)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_questions_difficulty ON questions(difficulty)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status, created_at DESC)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_leads_job ON leads(job_id)",
        [],
    )?;

    Ok(())
}
