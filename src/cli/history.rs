use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::error;

use crate::{
    distraction::{filter_distracting, matching_domain},
    history::{
        recent_history, AccessStrategy, HistoryEntry, HistoryOptions, DEFAULT_HISTORY_LIMIT,
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::{default_history_path, default_scratch_path},
        logging::HISTORY_PREFIX,
        time::{format_recency, format_visit_time},
    },
};

use super::{print_json, CommonArgs, ReportStyle};

const SEPARATOR_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(name = "chromepeek-history", version, long_about = None)]
#[command(about = "Show the most recent visits from Google Chrome's history")]
pub struct HistoryArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_HISTORY_LIMIT,
        help = "Number of visits to show"
    )]
    limit: u32,
    #[arg(
        long,
        value_enum,
        default_value_t = AccessStrategy::Copy,
        help = "How to open the history database. \
                `auto` reads it directly and copies it only if Chrome holds a lock"
    )]
    strategy: AccessStrategy,
    #[arg(
        long = "history-path",
        help = "History database. By default the one of Chrome's default profile"
    )]
    history_path: Option<PathBuf>,
    #[arg(long, help = "Where the temporary copy is placed when using the copy strategy")]
    scratch: Option<PathBuf>,
}

impl HistoryArgs {
    /// `default_path` is only consulted without `--history-path`.
    fn options(&self, default_path: impl FnOnce() -> Result<PathBuf>) -> Result<HistoryOptions> {
        Ok(HistoryOptions {
            history_path: match &self.history_path {
                Some(path) => path.clone(),
                None => default_path()?,
            },
            scratch_path: self.scratch.clone().unwrap_or_else(default_scratch_path),
            strategy: self.strategy,
            limit: self.limit,
        })
    }

    /// An unresolvable store location is reported like an unreadable store: logged, no history.
    fn load_history(&self, default_path: impl FnOnce() -> Result<PathBuf>) -> Vec<HistoryEntry> {
        match self.options(default_path) {
            Ok(options) => recent_history(&options),
            Err(e) => {
                error!("Error locating Chrome history: {e:#}");
                Vec::new()
            }
        }
    }
}

pub fn run_history_cli() -> Result<()> {
    let args = HistoryArgs::parse();
    args.common.init_logging(HISTORY_PREFIX)?;

    let history = args.load_history(default_history_path);

    let mut out = std::io::stdout().lock();
    if args.common.json {
        print_json(&mut out, &history)
    } else {
        print_history_report(
            &mut out,
            &history,
            &args.common.distracting,
            &DefaultClock,
            args.common.report_style(),
        )
    }
}

pub fn print_history_report(
    out: &mut impl Write,
    history: &[HistoryEntry],
    distracting: &[String],
    clock: &impl Clock,
    style: ReportStyle,
) -> Result<()> {
    let now = clock.time();
    let separator = "=".repeat(SEPARATOR_WIDTH);

    writeln!(out, "Recent Chrome browsing history:\n")?;
    writeln!(out, "{separator}")?;

    if history.is_empty() {
        writeln!(out, "No history found or unable to read database")?;
    }
    for (i, entry) in history.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, entry.title)?;
        writeln!(out, "   URL: {}", entry.url)?;
        writeln!(out, "   Time: {}", format_visit_time(entry.visit_time))?;
        writeln!(out, "   Recency: {}", format_recency(entry.visit_time, now))?;
        writeln!(out, "   Total visits to this URL: {}", entry.visit_count)?;
        writeln!(out, "   Duration: {:.1} seconds", entry.duration_seconds())?;
    }

    writeln!(out, "\n{separator}")?;
    writeln!(out, "\n🔍 Checking for recent distractions...\n")?;

    let distractions = filter_distracting(history, distracting);
    if distractions.is_empty() {
        writeln!(out, "{}", style.success("✅ No recent distractions detected!".into()))?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        style.warning(format!(
            "⚠️  Found {} recent visits to distracting sites:",
            distractions.len()
        ))
    )?;
    for entry in distractions {
        let domain = matching_domain(&entry.url, distracting).unwrap_or(&entry.url);
        writeln!(out, "  - {domain}: {}", format_recency(entry.visit_time, now))?;
    }
    Ok(())
}
