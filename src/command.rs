use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

/// Abstract external command representation
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub description: String,
}

/// Outcome of one external invocation. `output` holds trimmed stdout on
/// success and trimmed stderr (or the spawn/timeout message) on failure.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub success: bool,
    pub output: String,
}

impl CommandOutcome {
    fn success(output: String) -> Self {
        Self {
            success: true,
            output,
        }
    }

    fn failure(output: String) -> Self {
        Self {
            success: false,
            output,
        }
    }
}

impl ExternalCommand {
    /// Create a new external command
    pub fn new<S1: Into<String>, S2: Into<String>>(program: S1, description: S2) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// Arguments are passed as an array, never through a shell. Failure
    /// (non-zero exit, spawn error, timeout) is reported in the outcome;
    /// this never returns an error to the caller.
    pub async fn run(&self, timeout: Duration) -> CommandOutcome {
        debug!("Executing command: {}", self.display());
        debug!("Description: {}", self.description);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                let message = format!("Failed to spawn {}: {}", self.program, e);
                error!("Command '{}' failed.", self.display());
                error!("Error: {}", message);
                return CommandOutcome::failure(message);
            }
        };

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                let message = format!("Failed to collect output: {}", e);
                error!("Command '{}' failed.", self.display());
                error!("Error: {}", message);
                return CommandOutcome::failure(message);
            }
            Err(_) => {
                // kill_on_drop reaps the child once the future is dropped
                let message = format!("Timed out after {}s", timeout.as_secs());
                error!("Command '{}' failed.", self.display());
                error!("Error: {}", message);
                return CommandOutcome::failure(message);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Command '{}' failed.", self.display());
            error!("Error: {}", stderr);
            return CommandOutcome::failure(stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        CommandOutcome::success(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn test_success_captures_trimmed_stdout() {
        let outcome = ExternalCommand::new("echo", "Echo test")
            .arg("hello world")
            .run(TIMEOUT)
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.output, "hello world");
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_failure() {
        let outcome = ExternalCommand::new("ls", "List missing path")
            .arg("/definitely/not/a/real/path")
            .run(TIMEOUT)
            .await;

        assert!(!outcome.success);
        assert!(!outcome.output.is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_reports_failure() {
        let outcome = ExternalCommand::new("votdub-no-such-binary", "Missing binary")
            .run(TIMEOUT)
            .await;

        assert!(!outcome.success);
        assert!(outcome.output.contains("Failed to spawn"));
    }

    #[tokio::test]
    async fn test_timeout_kills_and_reports_failure() {
        let outcome = ExternalCommand::new("sleep", "Sleep test")
            .arg("5")
            .run(Duration::from_millis(100))
            .await;

        assert!(!outcome.success);
        assert!(outcome.output.contains("Timed out"));
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = ExternalCommand::new("yt-dlp", "Probe")
            .arg("--print-json")
            .arg("https://youtu.be/abc");
        assert_eq!(cmd.display(), "yt-dlp --print-json https://youtu.be/abc");
    }
}
