//! Question storage

use super::{format_timestamp, parse_string_list, parse_timestamp, Database};
use crate::error::{CoreError, Result};
use crate::models::{Difficulty, Feedback, InterviewQuestion};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

const QUESTION_COLUMNS: &str = "id, question, answer, explanation, code_example, difficulty,
    category, tags, source, source_url, created_at, updated_at,
    view_count, helpful_count, not_helpful_count";

/// Filters for question listing. Empty filters match everything.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive category membership
    pub category: Option<String>,
    /// Case-insensitive tag membership
    pub tag: Option<String>,
    pub limit: Option<usize>,
}

impl QuestionFilter {
    fn matches(&self, q: &InterviewQuestion) -> bool {
        let has = |list: &[String], wanted: &str| list.iter().any(|v| v.eq_ignore_ascii_case(wanted));
        if let Some(category) = &self.category {
            if !has(&q.category, category) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !has(&q.tags, tag) {
                return false;
            }
        }
        true
    }
}

fn row_to_question(row: &Row) -> rusqlite::Result<InterviewQuestion> {
    let difficulty: String = row.get(5)?;
    let difficulty = Difficulty::from_db_str(&difficulty).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Text,
            format!("unknown difficulty {:?}", difficulty).into(),
        )
    })?;
    let category: String = row.get(6)?;
    let tags: String = row.get(7)?;
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;

    Ok(InterviewQuestion {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        explanation: row.get(3)?,
        code_example: row.get(4)?,
        difficulty,
        category: parse_string_list(&category),
        tags: parse_string_list(&tags),
        source: row.get(8)?,
        source_url: row.get(9)?,
        created_at: parse_timestamp(10, &created_at)?,
        updated_at: parse_timestamp(11, &updated_at)?,
        view_count: row.get(12)?,
        helpful_count: row.get(13)?,
        not_helpful_count: row.get(14)?,
    })
}

fn id_exists(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    conn.query_row("SELECT 1 FROM questions WHERE id = ?", [id], |_| Ok(()))
        .optional()
        .map(|r| r.is_some())
}

/// First free id derived from `base`, appending `-2`, `-3`, ... when the
/// slug is already taken by another question.
fn free_question_id(conn: &Connection, base: &str) -> rusqlite::Result<String> {
    let base = if base.is_empty() { "question" } else { base };

    if !id_exists(conn, base)? {
        return Ok(base.to_string());
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !id_exists(conn, &candidate)? {
            tracing::debug!("Question id {} taken, using {}", base, candidate);
            return Ok(candidate);
        }
        n += 1;
    }
}

impl Database {
    /// Insert a new question and return the id it was stored under.
    ///
    /// `q.id` is the preferred id. If it is taken the first free suffixed
    /// variant is used. Picking the id and inserting happen under one lock, so
    /// concurrent importers never race for the same slug.
    pub fn insert_question(&self, q: &InterviewQuestion) -> Result<String> {
        let conn = self.conn();
        let id = free_question_id(&conn, &q.id)?;
        conn.execute(
            "INSERT INTO questions (id, question, answer, explanation, code_example, difficulty,
                category, tags, source, source_url, created_at, updated_at,
                view_count, helpful_count, not_helpful_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                id,
                q.question,
                q.answer,
                q.explanation,
                q.code_example,
                q.difficulty.to_db_str(),
                serde_json::to_string(&q.category)?,
                serde_json::to_string(&q.tags)?,
                q.source,
                q.source_url,
                format_timestamp(&q.created_at),
                format_timestamp(&q.updated_at),
                q.view_count,
                q.helpful_count,
                q.not_helpful_count,
            ],
        )?;
        Ok(id)
    }

    pub fn get_question(&self, id: &str) -> Result<Option<InterviewQuestion>> {
        let conn = self.conn();
        let sql = format!("SELECT {} FROM questions WHERE id = ?", QUESTION_COLUMNS);
        let question = conn.query_row(&sql, [id], row_to_question).optional()?;
        Ok(question)
    }

    /// List questions oldest first
    pub fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<InterviewQuestion>> {
        let conn = self.conn();
        let sql = format!(
            "SELECT {} FROM questions
             WHERE (?1 IS NULL OR difficulty = ?1)
             ORDER BY created_at ASC, id ASC",
            QUESTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![filter.difficulty.map(|d| d.to_db_str())],
            row_to_question,
        )?;

        let mut questions = Vec::new();
        for row in rows {
            let q = row?;
            if filter.matches(&q) {
                questions.push(q);
                if filter.limit.is_some_and(|limit| questions.len() >= limit) {
                    break;
                }
            }
        }
        Ok(questions)
    }

    pub fn count_questions(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Overwrite the editable content of a stored question
    pub fn update_question(&self, q: &InterviewQuestion) -> Result<()> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE questions SET question = ?2, answer = ?3, explanation = ?4,
                code_example = ?5, difficulty = ?6, category = ?7, tags = ?8,
                source_url = ?9, updated_at = ?10
             WHERE id = ?1",
            params![
                q.id,
                q.question,
                q.answer,
                q.explanation,
                q.code_example,
                q.difficulty.to_db_str(),
                serde_json::to_string(&q.category)?,
                serde_json::to_string(&q.tags)?,
                q.source_url,
                format_timestamp(&q.updated_at),
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound("Question", q.id.clone()));
        }
        Ok(())
    }

    pub fn increment_question_views(&self, id: &str) -> Result<()> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE questions SET view_count = view_count + 1 WHERE id = ?",
            [id],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound("Question", id.to_string()));
        }
        Ok(())
    }

    /// Bump the helpful or not-helpful counter
    pub fn record_feedback(&self, id: &str, feedback: Feedback) -> Result<()> {
        let sql = match feedback {
            Feedback::Helpful => {
                "UPDATE questions SET helpful_count = helpful_count + 1 WHERE id = ?"
            }
            Feedback::NotHelpful => {
                "UPDATE questions SET not_helpful_count = not_helpful_count + 1 WHERE id = ?"
            }
        };
        let conn = self.conn();
        let changed = conn.execute(sql, [id])?;
        if changed == 0 {
            return Err(CoreError::NotFound("Question", id.to_string()));
        }
        Ok(())
    }

    /// Hard delete. Returns whether a row was removed.
    pub fn delete_question(&self, id: &str) -> Result<bool> {
        let conn = self.conn();
        let changed = conn.execute("DELETE FROM questions WHERE id = ?", [id])?;
        Ok(changed > 0)
    }

    /// Hard delete a batch inside one transaction
    pub fn delete_questions(&self, ids: &[String]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let mut removed = 0;
        for id in ids {
            removed += tx.execute("DELETE FROM questions WHERE id = ?", [id])?;
        }
        tx.commit()?;
        Ok(removed)
    }
}
