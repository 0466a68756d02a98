//! Triggerscope CLI
//!
//! Deterministic emotional wellbeing scoring over trigger logs.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use triggerscope::{
    build_report, build_snapshot,
    config::Config,
    history::{HistoryEntry, SnapshotHistory, DEFAULT_HISTORY_MONTHS},
    trigger::ingest::{load_triggers, RawTrigger},
    trigger::validate,
    SCORING_METHODOLOGY, VERSION,
};

#[derive(Parser)]
#[command(name = "triggerscope")]
#[command(version = VERSION)]
#[command(about = "Deterministic emotional wellbeing scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a trigger file and print the snapshot as JSON
    Score {
        /// Trigger file (.json array, or JSON Lines otherwise)
        input: PathBuf,

        /// Scoring period in days (defaults to the configured period)
        #[arg(long)]
        days: Option<u32>,

        /// Evaluation anchor as RFC 3339 (defaults to the current instant)
        #[arg(long)]
        at: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Append the snapshot to the history file
        #[arg(long)]
        record: bool,
    },

    /// Generate a markdown wellbeing report
    Report {
        /// Trigger file (.json array, or JSON Lines otherwise)
        input: PathBuf,

        /// Scoring period in days (defaults to the configured period)
        #[arg(long)]
        days: Option<u32>,

        /// Evaluation anchor as RFC 3339 (defaults to the current instant)
        #[arg(long)]
        at: Option<String>,

        /// Output file
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },

    /// Show recorded snapshot history
    History {
        /// How many months back to show
        #[arg(long, default_value_t = DEFAULT_HISTORY_MONTHS)]
        months: u32,
    },

    /// Check a trigger file against the ingest rules
    Validate {
        /// Trigger file (.json array, or JSON Lines otherwise)
        input: PathBuf,
    },

    /// Display the scoring methodology
    Methodology,

    /// Show configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input,
            days,
            at,
            pretty,
            record,
        } => cmd_score(&input, days, at.as_deref(), pretty, record),
        Commands::Report {
            input,
            days,
            at,
            out,
        } => cmd_report(&input, days, at.as_deref(), &out),
        Commands::History { months } => cmd_history(months),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Methodology => {
            println!("{SCORING_METHODOLOGY}");
            Ok(())
        }
        Commands::Config => cmd_config(),
    }
}

/// Resolve the evaluation anchor: an explicit `--at` instant, else now.
fn resolve_anchor(at: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match at {
        Some(s) => {
            let parsed = DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("--at must be RFC 3339, got {s:?}"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

fn cmd_score(
    input: &Path,
    days: Option<u32>,
    at: Option<&str>,
    pretty: bool,
    record: bool,
) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let now = resolve_anchor(at)?;
    let days = days.unwrap_or(config.default_period_days);

    let triggers = load_triggers(input, now)
        .with_context(|| format!("failed to load triggers from {}", input.display()))?;
    let snapshot = build_snapshot(&triggers, days, now);

    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");

    if record {
        let history = SnapshotHistory::new(&config.history_path);
        history
            .append(&HistoryEntry {
                recorded_at: now,
                period_days: days,
                snapshot,
            })
            .with_context(|| {
                format!("failed to record history at {}", config.history_path.display())
            })?;
        eprintln!("Recorded to {}", config.history_path.display());
    }

    Ok(())
}

fn cmd_report(
    input: &Path,
    days: Option<u32>,
    at: Option<&str>,
    out: &Path,
) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let now = resolve_anchor(at)?;
    let days = days.unwrap_or(config.default_period_days);
    let tz = config.tz().context("configured timezone is invalid")?;

    let triggers = load_triggers(input, now)
        .with_context(|| format!("failed to load triggers from {}", input.display()))?;

    let report = build_report(&triggers, days, now, tz);
    std::fs::write(out, report)
        .with_context(|| format!("failed to write report to {}", out.display()))?;
    println!("Report written to {}", out.display());

    Ok(())
}

fn cmd_history(months: u32) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let history = SnapshotHistory::new(&config.history_path);
    let entries = history
        .recent_months(months, Utc::now())
        .with_context(|| format!("failed to read history at {}", config.history_path.display()))?;

    if entries.is_empty() {
        println!("No snapshots recorded in the last {months} month(s).");
        println!("Run 'triggerscope score <file> --record' to start a history.");
        return Ok(());
    }

    println!("Snapshot history (last {months} month(s)):");
    for entry in &entries {
        println!(
            "- {}: composite {:.2}, {} triggers over {} days, trend {}",
            entry.recorded_at.format("%Y-%m-%d %H:%M"),
            entry.snapshot.composite_score,
            entry.snapshot.trigger_count,
            entry.period_days,
            entry.snapshot.volatility.trend
        );
    }

    Ok(())
}

fn cmd_validate(input: &Path) -> anyhow::Result<()> {
    let now = Utc::now();
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let is_array = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut valid = 0usize;
    let mut invalid = 0usize;

    // A file-level parse failure is fatal; per-record failures are listed.
    let records: Vec<(usize, RawTrigger)> = if is_array {
        let raw: Vec<RawTrigger> = serde_json::from_str(&content)
            .with_context(|| format!("{} is not a JSON array of triggers", input.display()))?;
        raw.into_iter().enumerate().map(|(i, r)| (i + 1, r)).collect()
    } else {
        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(raw) => records.push((i + 1, raw)),
                Err(e) => {
                    invalid += 1;
                    println!("Record {}: parse error: {e}", i + 1);
                }
            }
        }
        records
    };

    for (index, raw) in records {
        match validate(raw, now) {
            Ok(_) => valid += 1,
            Err(e) => {
                invalid += 1;
                println!("Record {index}: {e}");
            }
        }
    }

    println!();
    println!("{valid} valid, {invalid} invalid in {}", input.display());
    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
