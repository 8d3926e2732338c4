//! Lists the tabs currently open in Chrome. The browser is asked through its scripting
//! interface, see [ScriptTabSource], and the answer is parsed by [parse_tab_lines].
//! [list_open_tabs] is the boundary where failures turn into an empty list.

pub mod parse;
pub mod script;

use std::{io, process::ExitStatus, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

pub use parse::parse_tab_lines;
pub use script::{ScriptCommand, ScriptTabSource, DEFAULT_QUERY_TIMEOUT, TAB_LIST_SCRIPT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabRecord {
    pub url: String,
    pub title: String,
    /// 1-based index of the window holding the tab.
    pub window: u32,
}

#[derive(Debug, Error)]
pub enum TabError {
    #[error("failed to start the script interpreter: {0}")]
    Spawn(#[source] io::Error),
    #[error("Chrome query timed out after {0:?}")]
    Timeout(Duration),
    #[error("script interpreter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("failed to read the script output: {0}")]
    Io(#[source] io::Error),
}

/// Anything able to report the open tabs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TabSource {
    async fn query_tabs(&self) -> Result<Vec<TabRecord>, TabError>;
}

/// Queries `source` once. Errors are logged and reported as no tabs at all.
pub async fn list_open_tabs(source: &impl TabSource) -> Vec<TabRecord> {
    match source.query_tabs().await {
        Ok(tabs) => {
            info!("Found {} open tabs", tabs.len());
            tabs
        }
        Err(e) => {
            error!("Error getting Chrome tabs: {e}");
            Vec::new()
        }
    }
}
