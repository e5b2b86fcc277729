//! Command-line front end for logging training and asking the coach.

use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fitcoach::render::{render_documents, render_history, render_matches, render_trend};
use fitcoach_config::{FitcoachConfig, LayeredConfigOptions};
use fitcoach_core::{Coach, CoachContext};
use fitcoach_memory::{FileChatTranscript, FileLogJournal, Timeframe};
use fitcoach_protocol::{LogType, MetricKind};
use log::{debug, info};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Command-line options for fitcoach.
#[derive(Parser)]
#[command(name = "fitcoach", version, about = "Log training and get coaching feedback")]
struct Cli {
    /// Extra fitcoach.json5 applied on top of the discovered layers
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log journal path (overrides memory.journal_path)
    #[arg(long)]
    journal: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a log and print the coaching summary
    Log {
        /// workout, nutrition, recovery, metrics, or strength
        #[arg(long = "type", default_value = "workout")]
        log_type: LogType,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Find logs similar to the given text
    Search {
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show a metric over recent days
    Trend {
        /// doms, weight, waist, bodyFat, or sleep
        metric: MetricKind,
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
    /// Summarize the last week or month
    Summary { timeframe: Timeframe },
    /// List logs recorded on a day (YYYY-MM-DD, UTC)
    Day { date: NaiveDate },
    /// Delete a log by id
    Delete { id: Uuid },
    /// List recent logs, newest first
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Ask the coach a question, continuing the stored conversation
    Chat {
        /// Forget the stored conversation before asking
        #[arg(long)]
        new: bool,
        #[arg(required = true)]
        message: Vec<String>,
    },
}

/// Entry point for the fitcoach CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fitcoach::init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let journal_path = fitcoach::resolve_journal_path(
        cli.journal.clone(),
        config.memory.journal_path.as_deref(),
    )
    .ok_or_else(|| anyhow!("no journal path; pass --journal or set memory.journal_path"))?;
    info!("using journal (path={})", journal_path.display());

    let journal = FileLogJournal::new(&journal_path).context("failed to open log journal")?;
    let mut context = CoachContext::open(journal).context("failed to load logs")?;

    match cli.command {
        Command::Log { log_type, text } => {
            let (record, response) = context
                .submit_log(log_type, text.join(" "), None)
                .context("failed to store log")?;
            debug!("log submitted (id={})", record.id);
            println!("{response}");
            println!("\nid: {}", record.id);
        }
        Command::Search { text, limit } => {
            let limit = limit.unwrap_or(config.memory.recall_limit);
            let matches = context.store().query_scored(&text.join(" "), limit);
            println!("{}", render_matches(&matches));
        }
        Command::Trend { metric, days } => {
            let points = context.trend(metric, days);
            println!("{}", render_trend(metric, days, &points));
        }
        Command::Summary { timeframe } => {
            println!("{}", context.summary(timeframe));
        }
        Command::Day { date } => {
            println!("{}", render_documents(&context.day(date)));
        }
        Command::Delete { id } => {
            if context.delete_log(id).context("failed to delete log")? {
                println!("Deleted {id}");
            } else {
                println!("No log with id {id}");
            }
        }
        Command::History { limit } => {
            println!("{}", render_history(context.recent_logs(limit)));
        }
        Command::Chat { new, message } => {
            let coach = Coach::from_config(&config).context("failed to configure coach")?;
            let transcript = FileChatTranscript::new(fitcoach::chat_transcript_path(&journal_path))
                .context("failed to open chat transcript")?;
            if new {
                transcript.clear().context("failed to clear chat transcript")?;
            }
            let reply = coach
                .converse(&transcript, &message.join(" "), context.logs())
                .await
                .context("failed to store chat turn")?;
            println!("{reply}");
        }
    }
    Ok(())
}

/// Load the layered config, applying `--config` as a runtime layer.
fn load_config(runtime: Option<&Path>) -> anyhow::Result<FitcoachConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = runtime {
        options = options.with_runtime_path(path);
    }
    let layered = FitcoachConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}
