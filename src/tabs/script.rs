use std::{ffi::OsString, process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::{parse_tab_lines, TabError, TabRecord, TabSource};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Walks every Chrome window and every tab in it and prints `url|title|window` per tab.
pub const TAB_LIST_SCRIPT: &str = r#"
tell application "Google Chrome"
    set output to ""
    set windowIndex to 1
    repeat with w in windows
        repeat with t in tabs of w
            set output to output & (URL of t) & "|" & (title of t) & "|" & windowIndex & "\n"
        end repeat
        set windowIndex to windowIndex + 1
    end repeat
    return output
end tell
"#;

/// Interpreter invocation. The script text is appended as the last argument.
#[derive(Debug, Clone)]
pub struct ScriptCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ScriptCommand {
    pub fn new(
        program: impl Into<OsString>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `osascript -e <script>`
    pub fn osascript() -> Self {
        Self::new("osascript", ["-e"])
    }
}

/// [TabSource] that runs a script through an external interpreter and parses its stdout.
pub struct ScriptTabSource {
    command: ScriptCommand,
    script: String,
    timeout: Duration,
}

impl ScriptTabSource {
    pub fn new(command: ScriptCommand, script: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command,
            script: script.into(),
            timeout,
        }
    }

    /// Chrome on macOS through AppleScript.
    pub fn osascript(timeout: Duration) -> Self {
        Self::new(ScriptCommand::osascript(), TAB_LIST_SCRIPT, timeout)
    }

    #[instrument(skip(self), fields(program = ?self.command.program))]
    async fn run_script(&self) -> Result<String, TabError> {
        let child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(&self.script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the pending wait on timeout must not leave the interpreter running.
            .kill_on_drop(true)
            .spawn()
            .map_err(TabError::Spawn)?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| TabError::Timeout(self.timeout))?
            .map_err(TabError::Io)?;

        if !output.status.success() {
            return Err(TabError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("Script produced {} bytes", output.stdout.len());
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TabSource for ScriptTabSource {
    async fn query_tabs(&self) -> Result<Vec<TabRecord>, TabError> {
        let output = self.run_script().await?;
        Ok(parse_tab_lines(&output))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::{Duration, Instant};

    use anyhow::Result;

    use crate::{
        tabs::{list_open_tabs, TabError, TabSource},
        utils::logging::TEST_LOGGING,
    };

    use super::{ScriptCommand, ScriptTabSource};

    fn sh(script: &str, timeout: Duration) -> ScriptTabSource {
        ScriptTabSource::new(ScriptCommand::new("sh", ["-c"]), script, timeout)
    }

    #[tokio::test]
    async fn test_script_output_is_parsed() -> Result<()> {
        *TEST_LOGGING;
        let source = sh(
            r"printf 'https://docs.rs/|Docs.rs|1\nbroken line\nhttps://reddit.com/|Reddit|2\n'",
            Duration::from_secs(5),
        );
        let tabs = source.query_tabs().await?;
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].url, "https://docs.rs/");
        assert_eq!(tabs[1].title, "Reddit");
        assert_eq!(tabs[1].window, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        *TEST_LOGGING;
        let source = sh("sleep 5", Duration::from_millis(200));
        let started = Instant::now();
        let result = source.query_tabs().await;
        assert!(matches!(result, Err(TabError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported() {
        *TEST_LOGGING;
        let source = sh("echo 'Chrome got an error' >&2; exit 3", Duration::from_secs(5));
        match source.query_tabs().await {
            Err(TabError::Failed { status, stderr }) => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "Chrome got an error");
            }
            other => panic!("expected a failed exit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_reported() {
        *TEST_LOGGING;
        let source = ScriptTabSource::new(
            ScriptCommand::new("/nonexistent/chromepeek-interpreter", ["-e"]),
            "",
            Duration::from_secs(1),
        );
        assert!(matches!(source.query_tabs().await, Err(TabError::Spawn(_))));
    }

    #[tokio::test]
    async fn test_failures_become_empty_lists() {
        *TEST_LOGGING;
        assert!(list_open_tabs(&sh("sleep 5", Duration::from_millis(200)))
            .await
            .is_empty());
        assert!(list_open_tabs(&sh("exit 1", Duration::from_secs(5)))
            .await
            .is_empty());
    }
}
