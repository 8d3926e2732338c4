use std::{io::Write, time::Duration};

use anyhow::Result;
use clap::Parser;

use crate::{
    distraction::filter_distracting,
    tabs::{list_open_tabs, ScriptTabSource, TabRecord, DEFAULT_QUERY_TIMEOUT},
    utils::logging::TABS_PREFIX,
};

use super::{print_json, CommonArgs, ReportStyle};

#[derive(Parser, Debug)]
#[command(name = "chromepeek-tabs", version, long_about = None)]
#[command(about = "List the tabs currently open in Google Chrome")]
pub struct TabsArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(
        long,
        default_value_t = DEFAULT_QUERY_TIMEOUT.as_secs(),
        help = "Seconds to wait for Chrome to answer"
    )]
    timeout: u64,
}

pub async fn run_tabs_cli() -> Result<()> {
    let args = TabsArgs::parse();
    args.common.init_logging(TABS_PREFIX)?;

    let source = ScriptTabSource::osascript(Duration::from_secs(args.timeout));
    let tabs = list_open_tabs(&source).await;

    let mut out = std::io::stdout().lock();
    if args.common.json {
        print_json(&mut out, &tabs)
    } else {
        print_tabs_report(
            &mut out,
            &tabs,
            &args.common.distracting,
            args.common.report_style(),
        )
    }
}

pub fn print_tabs_report(
    out: &mut impl Write,
    tabs: &[TabRecord],
    distracting: &[String],
    style: ReportStyle,
) -> Result<()> {
    if tabs.is_empty() {
        writeln!(out, "No Chrome tabs found (or Chrome not running)")?;
    } else {
        writeln!(out, "Found {} open tabs:\n", tabs.len())?;
        for tab in tabs {
            writeln!(out, "Window {}: {}", tab.window, tab.title)?;
            writeln!(out, "  → {}\n", tab.url)?;
        }
    }

    let distractions = filter_distracting(tabs, distracting);
    if !distractions.is_empty() {
        writeln!(
            out,
            "{}",
            style.warning(format!(
                "⚠️  Found {} potentially distracting tabs!",
                distractions.len()
            ))
        )?;
        for tab in distractions {
            writeln!(out, "  - {}", tab.title)?;
        }
    }
    Ok(())
}
