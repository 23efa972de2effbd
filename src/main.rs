//! OSINT Detective command line
//!
//! Drives the progression engine against the local SQLite store. Results are
//! printed as JSON on stdout; logs go to stderr.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use osint_detective::config::AcademyConfig;
use osint_detective::game::grading::ReportGrader;
use osint_detective::game::levels::LevelProgress;
use osint_detective::game::progression::MissionAttempt;
use osint_detective::store::SqliteStore;
use osint_detective::{
    act_for, run_tool, Catalog, GameError, GameMode, ProgressionEngine, Theme, ToolType, UserId,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "osint-detective", version, about = "OSINT investigation training campaign")]
struct Cli {
    /// Config file (default: <config_dir>/osint-detective/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Progress database, overrides the config file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Player to act as
    #[arg(long, short, global = true, default_value_t = 1)]
    user: UserId,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a progress record for the player
    Register,
    /// Show the player's progress
    Progress,
    /// List the missions the player can attempt
    Missions,
    /// Submit a report for a mission
    Complete {
        mission: u32,
        /// Report text
        #[arg(long, conflicts_with = "report_file")]
        report: Option<String>,
        /// Read the report from a file
        #[arg(long)]
        report_file: Option<PathBuf>,
        /// Time spent on the mission, milliseconds
        #[arg(long, default_value_t = 0)]
        elapsed_ms: u64,
    },
    /// Switch between beginner and expert mode
    Mode { mode: GameMode },
    /// Pick a codename
    Codename { name: String },
    /// Pick an interface theme
    Theme { theme: Theme },
    /// Opt in or out of instructor grading
    Instructor {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Record a glossary quiz score
    Quiz { term: String, score: u8 },
    /// Show today's daily case
    Daily,
    /// Complete today's daily case
    DailyComplete {
        /// Daily case id (default: today's)
        id: Option<String>,
    },
    /// Top players
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Start over from level 1
    Reset,
    /// Run a simulated investigation tool
    Tool { tool: ToolType, query: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MissionListing<'a> {
    id: u32,
    title: &'a str,
    difficulty: String,
    act: Option<&'static str>,
    min_level: u32,
    xp_reward: u32,
    completed: bool,
    best_score: Option<u8>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AcademyConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli, config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let body = match err.downcast_ref::<GameError>() {
                Some(game_err) => json!({
                    "error": game_err.user_message(),
                    "status": game_err.status_code(),
                }),
                None => json!({ "error": format!("{:#}", err), "status": 500 }),
            };
            println!("{}", body);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: AcademyConfig) -> anyhow::Result<String> {
    // tools run against canned data; no database needed
    if let Command::Tool { tool, query } = &cli.command {
        return to_json(&run_tool(*tool, query));
    }

    let db_path = cli.db.unwrap_or_else(|| config.database.path.clone());
    let store = SqliteStore::open(&db_path)?;
    let grader = ReportGrader::from_config(&config.instructor)?;
    debug!(db = ?db_path, instructor = grader.instructor_available(), "engine ready");

    let engine = ProgressionEngine::new(Catalog::campaign(), grader, store);
    let user = cli.user;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Register => to_json(&engine.register(user)?),
        Command::Progress => {
            let progress = engine.progress(user)?;
            to_json(&json!({
                "progress": progress,
                "levelProgress": LevelProgress::from_xp(progress.xp()),
            }))
        }
        Command::Missions => {
            let progress = engine.progress(user)?;
            let listing: Vec<MissionListing> = engine
                .missions_for(user)?
                .into_iter()
                .map(|m| MissionListing {
                    id: m.id,
                    title: &m.title,
                    difficulty: m.difficulty.to_string(),
                    act: act_for(m.id).map(|act| act.title),
                    min_level: m.min_level,
                    xp_reward: m.xp_reward,
                    completed: progress.has_completed(m.id),
                    best_score: progress.best_score(m.id),
                })
                .collect();
            to_json(&listing)
        }
        Command::Complete {
            mission,
            report,
            report_file,
            elapsed_ms,
        } => {
            let report = match (report, report_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read report {}", path.display()))?,
                (None, None) => bail!("provide --report or --report-file"),
            };
            let attempt = MissionAttempt::new(mission, &report, elapsed_ms);
            to_json(&engine.complete_mission(user, &attempt)?)
        }
        Command::Mode { mode } => to_json(&engine.set_mode(user, mode)?),
        Command::Codename { name } => to_json(&engine.set_codename(user, &name)?),
        Command::Theme { theme } => to_json(&engine.set_theme(user, theme)?),
        Command::Instructor { state } => {
            to_json(&engine.set_ai_instructor(user, matches!(state, Toggle::On))?)
        }
        Command::Quiz { term, score } => to_json(&engine.complete_quiz(user, &term, score)?),
        Command::Daily => to_json(&engine.daily_case(user, today)?),
        Command::DailyComplete { id } => {
            let id = id.unwrap_or_else(|| osint_detective::game::daily::daily_id(today));
            to_json(&engine.complete_daily(user, &id, today)?)
        }
        Command::Leaderboard { limit } => to_json(&engine.leaderboard(limit)?),
        Command::Reset => to_json(&engine.reset(user)?),
        Command::Tool { tool, query } => to_json(&run_tool(tool, &query)),
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}
