//! Jobcore - duplicate detection and lead qualification for a React job board
//!
//! This crate provides the analytical core of the job board:
//! - Duplicate detection for interview questions (text, containment, topic)
//! - Duplicate reports over a whole question collection
//! - Rule-based lead qualification with level and price bands
//! - SQLite storage that only accepts non-duplicate questions
//! - A periodic cleanup task for duplicates already stored
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use jobcore::{Config, Core};
//!
//! let core = Core::new(Config::default())?;
//! let summary = core.questions().import(scraped)?;
//! ```
//!
//! From the command line:
//! ```text
//! jobcore import questions.json
//! jobcore report
//! ```

pub mod analysis;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod scheduler;

// Re-export main types for convenience
pub use config::Config;
pub use db::Database;
pub use error::{CoreError, Result};

use analysis::DuplicateChecker;
use handlers::{LeadHandler, QuestionHandler};
use scheduler::{ScheduledTask, TaskResult};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Core service that wires configuration, storage and handlers together
pub struct Core {
    /// Configuration
    pub config: Config,

    /// Database connection
    pub db: Arc<Database>,

    questions: QuestionHandler,
    leads: LeadHandler,
}

impl Core {
    /// Create a new Core instance, opening the database in the data directory
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let db = Database::new(config.database_path())?;
        Ok(Self::with_database(config, Arc::new(db)))
    }

    /// Create a Core instance with an existing database
    pub fn with_database(config: Config, db: Arc<Database>) -> Self {
        let checker = DuplicateChecker::new(config.duplicates);
        Core {
            questions: QuestionHandler::new(db.clone(), checker),
            leads: LeadHandler::new(db.clone()),
            config,
            db,
        }
    }

    pub fn questions(&self) -> &QuestionHandler {
        &self.questions
    }

    pub fn leads(&self) -> &LeadHandler {
        &self.leads
    }

    /// Get a reference to the database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Run the duplicate cleanup once, outside the scheduler
    pub async fn cleanup_duplicates(&self) -> TaskResult {
        ScheduledTask::DuplicateCleanup
            .execute(self.db.clone(), &self.config)
            .await
    }

    /// Start periodic background tasks (duplicate cleanup)
    pub fn start_periodic_tasks(&self) -> Vec<JoinHandle<()>> {
        scheduler::start_scheduler(self.config.clone(), self.db.clone())
    }
}
