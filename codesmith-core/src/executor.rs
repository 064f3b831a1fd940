//! Running candidate solutions and capturing the result
//!
//! The candidate is written to a temporary file and run under a configured
//! interpreter with a wall-clock timeout. There is no sandboxing: the code
//! runs with the privileges of this process.

use crate::error::{self, Result};
use std::io::Write;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Configuration for the executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Interpreter binary to run the candidate with
    pub interpreter: String,
    /// Suffix for the staged candidate file
    pub suffix: String,
    /// Wall-clock limit for a single run
    pub timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            suffix: ".py".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Captured result of running a candidate solution
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code; -1 when the process was killed or timed out
    pub exit_code: i32,
    pub timed_out: bool,
}

impl ExecutionOutcome {
    /// Whether the run completed cleanly
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }

    /// Render the outcome for evaluation prompts and reporting.
    ///
    /// stdout and stderr are embedded verbatim.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("exit code: {}\n", self.exit_code));
        if self.timed_out {
            out.push_str("timed out: true\n");
        }
        out.push_str("stdout:\n");
        out.push_str(&self.stdout);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("stderr:\n");
        out.push_str(&self.stderr);
        out
    }
}

/// Runs candidate source text under an interpreter
#[derive(Debug, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute candidate source text and capture stdout/stderr/exit status.
    ///
    /// A timeout is reported as an outcome (`timed_out`, exit code -1), not
    /// an error: the caller treats it as a failed attempt. Errors are
    /// reserved for failures to launch at all.
    pub async fn run(&self, code: &str) -> Result<ExecutionOutcome> {
        let mut staged = tempfile::Builder::new()
            .prefix("candidate")
            .suffix(&self.config.suffix)
            .tempfile()
            .map_err(|e| {
                error::execution_failed(format!("failed to stage candidate: {}", e))
                    .with_operation("executor::run")
                    .set_source(e)
            })?;

        staged.write_all(code.as_bytes()).map_err(|e| {
            error::execution_failed(format!("failed to write candidate: {}", e))
                .with_operation("executor::run")
                .set_source(e)
        })?;
        staged.flush().map_err(|e| {
            error::execution_failed(format!("failed to flush candidate: {}", e))
                .with_operation("executor::run")
                .set_source(e)
        })?;

        let child = Command::new(&self.config.interpreter)
            .arg(staged.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    error::interpreter_not_found(&self.config.interpreter)
                        .with_operation("executor::run")
                }
                _ => error::execution_failed(e.to_string())
                    .with_operation("executor::run")
                    .set_source(e),
            })?;

        let limit = Duration::from_secs(self.config.timeout_secs);
        match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ExecutionOutcome {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code().unwrap_or(-1),
                timed_out: false,
            }),
            Ok(Err(e)) => Err(error::execution_failed(e.to_string())
                .with_operation("executor::run")
                .set_source(e)),
            // Dropping the timed-out future drops the child handle, which
            // kills the process (kill_on_drop).
            Err(_) => Ok(ExecutionOutcome {
                stdout: String::new(),
                stderr: format!(
                    "execution exceeded {} second timeout",
                    self.config.timeout_secs
                ),
                exit_code: -1,
                timed_out: true,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sh_executor(timeout_secs: u64) -> Executor {
        Executor::with_config(ExecutorConfig {
            interpreter: "sh".to_string(),
            suffix: ".sh".to_string(),
            timeout_secs,
        })
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let outcome = sh_executor(10).run("echo OK").await.unwrap();
        assert_eq!(outcome.stdout, "OK\n");
        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.success());
    }

    #[tokio::test]
    async fn test_captures_failure() {
        let outcome = sh_executor(10)
            .run("echo broken >&2\nexit 3")
            .await
            .unwrap();
        assert_eq!(outcome.exit_code, 3);
        assert!(outcome.stderr.contains("broken"));
        assert!(!outcome.success());
    }

    #[tokio::test]
    async fn test_timeout_is_an_outcome() {
        let outcome = sh_executor(1).run("sleep 5").await.unwrap();
        assert!(outcome.timed_out);
        assert_eq!(outcome.exit_code, -1);
        assert!(!outcome.success());
        assert!(outcome.stderr.contains("timeout"));
    }

    #[tokio::test]
    async fn test_missing_interpreter() {
        let executor = Executor::with_config(ExecutorConfig {
            interpreter: "definitely-not-an-interpreter".to_string(),
            suffix: ".py".to_string(),
            timeout_secs: 1,
        });
        let err = executor.run("print('OK')").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InterpreterNotFound);
    }

    #[test]
    fn test_summary_embeds_streams_verbatim() {
        let outcome = ExecutionOutcome {
            stdout: "OK\n".to_string(),
            stderr: "warning: deprecated\n".to_string(),
            exit_code: 0,
            timed_out: false,
        };
        let summary = outcome.summary();
        assert!(summary.contains("exit code: 0"));
        assert!(summary.contains("OK\n"));
        assert!(summary.contains("warning: deprecated\n"));
    }
}
