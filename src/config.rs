//! Configuration management for Jobcore
//!
//! Loads settings from TOML file at ~/.jobcore/config.toml

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (defaults to ~/.jobcore)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Duplicate detection thresholds
    #[serde(default)]
    pub duplicates: DuplicateThresholds,

    /// Periodic maintenance tasks
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".jobcore"))
        .unwrap_or_else(|| PathBuf::from(".jobcore"))
}

/// Thresholds used by the duplicate checker.
///
/// A strategy only wins when its score is strictly above its own threshold,
/// and the final decision compares the winning score against `duplicate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuplicateThresholds {
    /// Minimum length ratio for a substring match
    #[serde(default = "default_containment_threshold")]
    pub containment: f64,

    /// Minimum Jaccard similarity of question text
    #[serde(default = "default_text_threshold")]
    pub text: f64,

    /// Minimum tag/category/difficulty overlap
    #[serde(default = "default_topic_threshold")]
    pub topic: f64,

    /// Confidence above which a candidate is flagged as a duplicate
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate: f64,
}

fn default_containment_threshold() -> f64 {
    0.7
}

fn default_text_threshold() -> f64 {
    0.8
}

fn default_topic_threshold() -> f64 {
    0.85
}

fn default_duplicate_threshold() -> f64 {
    0.8
}

impl Default for DuplicateThresholds {
    fn default() -> Self {
        DuplicateThresholds {
            containment: default_containment_threshold(),
            text: default_text_threshold(),
            topic: default_topic_threshold(),
            duplicate: default_duplicate_threshold(),
        }
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SchedulerConfig {
    /// Duplicate question cleanup
    #[serde(default)]
    pub duplicate_cleanup: DuplicateCleanupConfig,
}

/// Duplicate question cleanup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateCleanupConfig {
    /// Whether periodic duplicate cleanup is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Interval in hours between cleanup sweeps
    #[serde(default = "default_cleanup_interval")]
    pub interval_hours: u32,

    /// Number of newest questions checked per sweep
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_cleanup_interval() -> u32 {
    24 // Every 24 hours
}

fn default_batch_size() -> usize {
    500
}

impl Default for DuplicateCleanupConfig {
    fn default() -> Self {
        DuplicateCleanupConfig {
            enabled: false, // Opt-in
            interval_hours: default_cleanup_interval(),
            batch_size: default_batch_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            duplicates: DuplicateThresholds::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_path(path.as_ref());

        if !expanded_path.exists() {
            return Err(CoreError::Config(format!(
                "Configuration file not found: {}",
                expanded_path.display()
            )));
        }

        let content = std::fs::read_to_string(&expanded_path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".jobcore").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".jobcore/config.toml"))
    }

    /// Get the data directory, expanding ~ if present
    pub fn data_dir(&self) -> PathBuf {
        expand_path(&self.data_dir)
    }

    /// Path of the SQLite database inside the data directory
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("jobcore.db")
    }

    /// Reject thresholds outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        let t = &self.duplicates;
        for (name, value) in [
            ("containment", t.containment),
            ("text", t.text),
            ("topic", t.topic),
            ("duplicate", t.duplicate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::Config(format!(
                    "duplicates.{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        if self.scheduler.duplicate_cleanup.interval_hours == 0 {
            return Err(CoreError::Config(
                "scheduler.duplicate_cleanup.interval_hours must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("JOBCORE_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
    }

    /// Create a default configuration file at the given path
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let content = r#"# Jobcore Configuration

# Where the SQLite database lives
data_dir = "~/.jobcore"

[duplicates]
# Substring match is accepted when shorter/longer length ratio exceeds this
containment = 0.7
# Jaccard similarity of question words (tokens longer than 3 chars)
text = 0.8
# Mean of tag, category and difficulty overlap
topic = 0.85
# Winning confidence above this marks the candidate as a duplicate
duplicate = 0.8

[scheduler.duplicate_cleanup]
# Periodically delete stored questions that duplicate an older one
enabled = false
interval_hours = 24
batch_size = 500
"#;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Expand ~ to home directory in paths
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.duplicates, DuplicateThresholds::default());
        assert!((config.duplicates.containment - 0.7).abs() < f64::EPSILON);
        assert!((config.duplicates.topic - 0.85).abs() < f64::EPSILON);
        assert!(!config.scheduler.duplicate_cleanup.enabled);
        assert_eq!(config.scheduler.duplicate_cleanup.interval_hours, 24);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
data_dir = "/tmp/jobcore-test"

[duplicates]
text = 0.6

[scheduler.duplicate_cleanup]
enabled = true
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/jobcore-test"));
        assert!((config.duplicates.text - 0.6).abs() < f64::EPSILON);
        assert!((config.duplicates.duplicate - 0.8).abs() < f64::EPSILON);
        assert!(config.scheduler.duplicate_cleanup.enabled);
        assert_eq!(config.scheduler.duplicate_cleanup.batch_size, 500);
    }

    #[test]
    fn test_created_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::create_default(&path).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.duplicates, DuplicateThresholds::default());
        assert!(!config.scheduler.duplicate_cleanup.enabled);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.duplicates.topic = 1.5;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("/nonexistent/jobcore.toml").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
