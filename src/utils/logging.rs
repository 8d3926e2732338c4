use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const TABS_PREFIX: &str = "tabs";
pub const HISTORY_PREFIX: &str = "history";

const DEFAULT_LEVEL: &str = "warn";

/// Diagnostics always go to stderr so they never mix with the report on stdout. When
/// `log_dir` is given the same events are also written to daily rotated files there.
pub fn enable_logging(
    prefix: &str,
    log_dir: Option<&Path>,
    log_level: Option<LevelFilter>,
) -> Result<()> {
    let file_layer = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix(prefix)
                .build(dir)?;
            Some(fmt::layer().with_ansi(false).with_writer(appender))
        }
        None => None,
    };

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LEVEL.into()));

    tracing_subscriber::registry()
        .with(EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(file_layer)
        .try_init()?;
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .try_init();
});
