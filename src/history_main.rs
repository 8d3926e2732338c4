use anyhow::Result;
use chromepeek::cli::history::run_history_cli;
use tracing::error;

fn main() -> Result<()> {
    run_history_cli().inspect_err(|e| {
        error!("Error running cli {e:?}");
    })?;
    Ok(())
}
