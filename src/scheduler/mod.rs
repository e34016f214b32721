//! Periodic maintenance scheduler
//!
//! Manages background tasks that run at configurable intervals:
//! - **Duplicate cleanup**: Find and hard-delete stored questions that
//!   duplicate an older one
//!
//! Each task runs in its own tokio::spawn with an independent interval timer.
//! Tasks are staggered to avoid simultaneous DB contention.

pub mod tasks;

use crate::config::Config;
use crate::db::Database;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Result of a single scheduler task execution
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task_name: String,
    pub items_processed: usize,
    pub items_affected: usize,
    pub errors: usize,
    pub detail: String,
}

impl TaskResult {
    pub(crate) fn failed(task_name: &str, detail: String) -> Self {
        TaskResult {
            task_name: task_name.to_string(),
            items_processed: 0,
            items_affected: 0,
            errors: 1,
            detail,
        }
    }
}

/// Registered periodic tasks
#[derive(Debug, Clone, Copy)]
pub enum ScheduledTask {
    DuplicateCleanup,
}

impl ScheduledTask {
    pub const ALL: [ScheduledTask; 1] = [ScheduledTask::DuplicateCleanup];

    pub fn name(&self) -> &'static str {
        match self {
            ScheduledTask::DuplicateCleanup => tasks::duplicate_cleanup::TASK_NAME,
        }
    }

    fn is_enabled(&self, config: &Config) -> bool {
        match self {
            ScheduledTask::DuplicateCleanup => config.scheduler.duplicate_cleanup.enabled,
        }
    }

    fn interval_secs(&self, config: &Config) -> u64 {
        match self {
            ScheduledTask::DuplicateCleanup => {
                config.scheduler.duplicate_cleanup.interval_hours as u64 * 3600
            }
        }
    }

    /// Run the task once
    pub async fn execute(&self, db: Arc<Database>, config: &Config) -> TaskResult {
        match self {
            ScheduledTask::DuplicateCleanup => tasks::duplicate_cleanup::execute(db, config).await,
        }
    }
}

fn log_result(result: &TaskResult) {
    if result.errors > 0 {
        tracing::warn!(
            "Scheduler: task '{}' completed with {} errors: {}",
            result.task_name,
            result.errors,
            result.detail
        );
    } else if result.items_affected > 0 {
        tracing::info!(
            "Scheduler: task '{}' completed: {}",
            result.task_name,
            result.detail
        );
    } else {
        tracing::debug!(
            "Scheduler: task '{}' completed (no changes)",
            result.task_name
        );
    }
}

/// Start all enabled periodic tasks and return their handles.
///
/// Each enabled task runs in its own tokio::spawn with an independent interval
/// timer. Tasks are staggered by 10 seconds and first run after one full
/// interval, not immediately.
pub fn start_scheduler(config: Config, db: Arc<Database>) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::new();

    for (idx, task) in ScheduledTask::ALL.into_iter().enumerate() {
        if !task.is_enabled(&config) {
            tracing::info!("Scheduler: task '{}' is disabled", task.name());
            continue;
        }

        let interval_secs = task.interval_secs(&config).max(1);
        tracing::info!(
            "Scheduler: starting task '{}' (every {} hours)",
            task.name(),
            interval_secs / 3600
        );

        let config = config.clone();
        let db = db.clone();
        let stagger = Duration::from_secs(idx as u64 * 10);

        handles.push(tokio::spawn(async move {
            tokio::time::sleep(stagger).await;

            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                tracing::info!("Scheduler: running task '{}'", task.name());
                let result = task.execute(db.clone(), &config).await;
                log_result(&result);
            }
        }));
    }

    handles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_tasks_not_started() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let handles = start_scheduler(Config::default(), db);
        assert!(handles.is_empty());
    }

    #[tokio::test]
    async fn test_enabled_task_is_spawned() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let mut config = Config::default();
        config.scheduler.duplicate_cleanup.enabled = true;

        let handles = start_scheduler(config, db);
        assert_eq!(handles.len(), 1);
        for handle in handles {
            handle.abort();
        }
    }

    #[test]
    fn test_task_names() {
        assert_eq!(ScheduledTask::DuplicateCleanup.name(), "duplicate_cleanup");
        let config = Config::default();
        assert_eq!(ScheduledTask::DuplicateCleanup.interval_secs(&config), 24 * 3600);
    }
}
