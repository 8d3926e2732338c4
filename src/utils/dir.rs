use std::{env, io, path::PathBuf};

use anyhow::{Context, Result};

/// File name used for the scratch copy of the history store.
pub const SCRATCH_FILE_NAME: &str = "chrome_history_copy.db";

fn home_dir() -> Result<PathBuf> {
    env::var("HOME")
        .map(PathBuf::from)
        .context("HOME is not set")
}

/// Directory used for log files. Created if it doesn't exist.
pub fn create_application_default_path() -> Result<PathBuf> {
    let path = {
        cfg_if::cfg_if! {
            if #[cfg(windows)] {
                let mut path = PathBuf::from(env::var("APPDATA").context("APPDATA is not set")?);
                path.push("chromepeek");
                path
            } else if #[cfg(target_os = "macos")] {
                let mut path = home_dir()?;
                path.push("Library/Application Support/chromepeek");
                path
            } else {
                let mut path = match env::var("XDG_STATE_HOME") {
                    Ok(state) => PathBuf::from(state),
                    Err(_) => home_dir()?.join(".local/state"),
                };
                path.push("chromepeek");
                path
            }
        }
    };

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

/// Location of the default Chrome profile's history store on macOS.
pub fn default_history_path() -> Result<PathBuf> {
    Ok(home_dir()?.join("Library/Application Support/Google/Chrome/Default/History"))
}

pub fn default_scratch_path() -> PathBuf {
    env::temp_dir().join(SCRATCH_FILE_NAME)
}
