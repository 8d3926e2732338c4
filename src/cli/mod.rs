pub mod history;
pub mod tabs;

use std::io::{IsTerminal, Write};

use ansi_term::Colour;
use anyhow::Result;
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use crate::{
    distraction::DEFAULT_DISTRACTING_DOMAINS,
    utils::{dir::create_application_default_path, logging::enable_logging},
};

/// Flags shared by both tools.
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    #[arg(
        long,
        help = "Enable trace logging, also written to the application directory"
    )]
    log: bool,
    #[arg(long, help = "Print the records as JSON instead of a report")]
    json: bool,
    #[arg(long = "no-color", help = "Disable colored warnings")]
    no_color: bool,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma separated domains considered distracting",
        default_values_t = DEFAULT_DISTRACTING_DOMAINS.map(String::from).to_vec()
    )]
    distracting: Vec<String>,
}

impl CommonArgs {
    pub fn init_logging(&self, prefix: &str) -> Result<()> {
        if self.log {
            let log_dir = create_application_default_path()?.join("logs");
            enable_logging(prefix, Some(&log_dir), Some(LevelFilter::TRACE))
        } else {
            enable_logging(prefix, None, None)
        }
    }

    pub fn report_style(&self) -> ReportStyle {
        ReportStyle {
            colored: !self.no_color && std::io::stdout().is_terminal(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportStyle {
    pub colored: bool,
}

impl ReportStyle {
    fn paint(&self, colour: Colour, text: String) -> String {
        if self.colored {
            colour.bold().paint(text).to_string()
        } else {
            text
        }
    }

    pub fn warning(&self, text: String) -> String {
        self.paint(Colour::Yellow, text)
    }

    pub fn success(&self, text: String) -> String {
        self.paint(Colour::Green, text)
    }
}

pub fn print_json(out: &mut impl Write, records: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    Ok(())
}
