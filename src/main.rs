//! Jobcore CLI - duplicate checks, imports and lead scoring for the job board

use clap::{Args as ClapArgs, Parser, Subcommand};
use jobcore::analysis::{score_lead, DuplicateChecker};
use jobcore::db::questions::QuestionFilter;
use jobcore::models::{
    Difficulty, Feedback, InterviewQuestion, LeadStatus, LeadSubmission, QuestionUpdate,
    ScrapingResult,
};
use jobcore::{Config, Core, CoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "jobcore")]
#[command(author = "Jobcore Team")]
#[command(version)]
#[command(about = "Jobcore - interview question dedup and lead qualification", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "JOBCORE_CONFIG", default_value = "~/.jobcore/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check one candidate question for duplicates
    Check {
        /// JSON file holding a single question
        candidate: PathBuf,
        /// Compare against a JSON array of questions instead of the store
        #[arg(long)]
        against: Option<PathBuf>,
    },
    /// Report duplicate groups across the collection
    Report {
        /// JSON array of questions to analyse instead of the store
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Import a JSON array of questions, skipping duplicates
    Import { file: PathBuf },
    /// Browse and edit stored questions
    #[command(subcommand)]
    Questions(QuestionCommand),
    /// Score a lead without storing it
    ScoreLead { file: PathBuf },
    /// Manage stored leads
    #[command(subcommand)]
    Leads(LeadCommand),
    /// Delete stored duplicate questions once
    Cleanup,
    /// Run the periodic scheduler until interrupted
    Run,
}

#[derive(Subcommand, Debug)]
enum QuestionCommand {
    /// List stored questions
    List(ListArgs),
    /// Show one question and count the view
    Show { id: String },
    /// Apply an edit from a JSON file
    Edit { id: String, update: PathBuf },
    /// Record reader feedback
    Feedback {
        id: String,
        /// Count as not helpful (default is helpful)
        #[arg(long)]
        not_helpful: bool,
    },
    /// Permanently delete a question
    Delete { id: String },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    #[arg(long)]
    difficulty: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    tag: Option<String>,
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum LeadCommand {
    /// Score and store a lead from a JSON file
    Submit { file: PathBuf },
    /// List leads, newest first
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one lead
    Show { id: String },
    /// Change a lead's status
    Status { id: String, status: String },
    /// Counts per status and revenue
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("jobcore={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = jobcore::config::expand_path(&args.config);

    // Handle --init flag
    if args.init {
        if config_path.exists() {
            tracing::warn!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        tracing::info!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    let Some(command) = args.command else {
        anyhow::bail!("no command given, see --help");
    };

    // Load configuration
    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        tracing::debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        Config::default()
    };
    config.apply_env_overrides();

    // File-only variants never open the store
    match command {
        Command::Check { candidate, against } => {
            let candidate: ScrapingResult = read_json(&candidate)?;
            let result = match against {
                Some(against) => {
                    let existing: Vec<InterviewQuestion> = read_json(&against)?;
                    DuplicateChecker::new(config.duplicates).check(&candidate, &existing)
                }
                None => Core::new(config)?.questions().check(&candidate)?,
            };
            print_json(&result)?;
        }
        Command::Report { input } => {
            let report = match input {
                Some(input) => {
                    let questions: Vec<InterviewQuestion> = read_json(&input)?;
                    DuplicateChecker::new(config.duplicates).report(&questions)
                }
                None => Core::new(config)?.questions().report()?,
            };
            print_json(&report)?;
        }
        Command::Import { file } => {
            let candidates: Vec<ScrapingResult> = read_json(&file)?;
            print_json(&Core::new(config)?.questions().import(candidates)?)?;
        }
        Command::Questions(cmd) => run_question_command(&Core::new(config)?, cmd)?,
        Command::ScoreLead { file } => {
            let submission: LeadSubmission = read_json(&file)?;
            print_json(&score_lead(&submission))?;
        }
        Command::Leads(cmd) => run_lead_command(&Core::new(config)?, cmd)?,
        Command::Cleanup => {
            let result = Core::new(config)?.cleanup_duplicates().await;
            if result.errors > 0 {
                anyhow::bail!("{} failed: {}", result.task_name, result.detail);
            }
            println!("{}", result.detail);
        }
        Command::Run => {
            let core = Core::new(config)?;
            let handles = core.start_periodic_tasks();
            if handles.is_empty() {
                tracing::warn!("No periodic tasks enabled, nothing to run");
                return Ok(());
            }
            tracing::info!("Scheduler running, press Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutting down");
            for handle in handles {
                handle.abort();
            }
        }
    }

    Ok(())
}

fn run_question_command(core: &Core, cmd: QuestionCommand) -> anyhow::Result<()> {
    let questions = core.questions();
    match cmd {
        QuestionCommand::List(list) => {
            let difficulty = list
                .difficulty
                .as_deref()
                .map(|d| {
                    Difficulty::from_db_str(d)
                        .ok_or_else(|| CoreError::Validation(format!("Unknown difficulty: {}", d)))
                })
                .transpose()?;
            let filter = QuestionFilter {
                difficulty,
                category: list.category,
                tag: list.tag,
                limit: list.limit,
            };
            print_json(&questions.list(&filter)?)
        }
        QuestionCommand::Show { id } => print_json(&questions.view(&id)?),
        QuestionCommand::Edit { id, update } => {
            let update: QuestionUpdate = read_json(&update)?;
            print_json(&questions.edit(&id, update)?)
        }
        QuestionCommand::Feedback { id, not_helpful } => {
            let feedback = if not_helpful {
                Feedback::NotHelpful
            } else {
                Feedback::Helpful
            };
            print_json(&questions.feedback(&id, feedback)?)
        }
        QuestionCommand::Delete { id } => {
            questions.delete(&id)?;
            println!("Deleted {}", id);
            Ok(())
        }
    }
}

fn run_lead_command(core: &Core, cmd: LeadCommand) -> anyhow::Result<()> {
    let leads = core.leads();
    match cmd {
        LeadCommand::Submit { file } => {
            let submission: LeadSubmission = read_json(&file)?;
            print_json(&leads.submit(submission)?)
        }
        LeadCommand::List { status } => {
            let status = status.as_deref().map(LeadStatus::parse).transpose()?;
            print_json(&leads.list(status)?)
        }
        LeadCommand::Show { id } => print_json(&leads.get(&id)?),
        LeadCommand::Status { id, status } => {
            let status = LeadStatus::parse(&status)?;
            print_json(&leads.set_status(&id, status)?)
        }
        LeadCommand::Summary => print_json(&leads.summary()?),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> jobcore::Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
