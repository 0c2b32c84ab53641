//! Command-line consumer of `workhub_core`.
//!
//! # Responsibility
//! - Report project progress from a SQLite store as JSON.
//! - Render gate results through the core binding contract.

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;
use workhub_core::db::open_db;
use workhub_core::{
    init_logging, present, ActionOutcome, GateStyle, LogLevel, LoggingConfig, ProjectListQuery,
    ProjectService, SqliteProjectRepository, SqliteTaskRepository,
};

#[derive(Parser)]
#[command(name = "workhub", version, about = "Project progress and action gates")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, global = true, default_value = "workhub.db")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print progress for one or more projects.
    Progress {
        #[arg(required = true)]
        project_ids: Vec<Uuid>,
    },
    /// Print every project with its stats.
    Projects,
    /// Show whether a project can be completed, without changing it.
    CheckComplete {
        project_id: Uuid,
        #[arg(long, value_enum, default_value_t = Style::Panel)]
        style: Style,
    },
    /// Mark a project completed if its gate passes.
    Complete { project_id: Uuid },
    /// Print the core version.
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Panel,
    Inert,
}

impl From<Style> for GateStyle {
    fn from(value: Style) -> Self {
        match value {
            Style::Panel => GateStyle::Panel,
            Style::Inert => GateStyle::Inert,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .unwrap_or_else(|| LogLevel::build_default().as_str().to_string());
        init_logging(&LoggingConfig::new(&level, log_dir)?)?;
    }

    if let Command::Version = cli.command {
        println!("workhub_core version={}", workhub_core::core_version());
        return Ok(ExitCode::SUCCESS);
    }

    let conn = open_db(&cli.db)?;
    let projects = ProjectService::new(
        SqliteProjectRepository::new(&conn),
        SqliteTaskRepository::new(&conn),
    );

    match cli.command {
        Command::Progress { project_ids } => {
            let progress = projects
                .progress()
                .calculate_multiple_projects_progress(&project_ids)?;
            let mut report = serde_json::Map::new();
            for id in &project_ids {
                if let Some(stats) = progress.get(id) {
                    report.insert(id.to_string(), serde_json::to_value(stats)?);
                }
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Projects => {
            let summaries = projects.list_projects_with_stats(&ProjectListQuery::default())?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Command::CheckComplete { project_id, style } => {
            let check = projects.check_completion(project_id)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&present(&check, style.into()))?
            );
            if !check.passed() {
                return Ok(ExitCode::from(2));
            }
        }
        Command::Complete { project_id } => match projects.complete_project(project_id)? {
            ActionOutcome::Applied(summary) => {
                info!("event=cli_complete module=cli status=ok project_id={project_id}");
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            ActionOutcome::Blocked(requirement) => {
                println!("{}", serde_json::to_string_pretty(&requirement)?);
                return Ok(ExitCode::from(2));
            }
        },
        Command::Version => {}
    }

    Ok(ExitCode::SUCCESS)
}
