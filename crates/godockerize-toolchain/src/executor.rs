use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use crate::error::ExecError;

/// An external command to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    /// When set, the inherited environment is cleared and the child sees
    /// exactly these variables.
    pub env: Option<Vec<(String, String)>>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env_clear_with(mut self, vars: Vec<(String, String)>) -> Self {
        self.env = Some(vars);
        self
    }

    fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        if let Some(vars) = &self.env {
            cmd.env_clear();
            cmd.envs(vars.iter().map(|(k, v)| (k, v)));
        }
        cmd
    }

    fn not_found(&self, source: std::io::Error) -> ExecError {
        ExecError::NotFound {
            program: self.program.clone(),
            source,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Abstraction over external process execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run a command and capture stdout.
    async fn exec(&self, cmd: &CommandSpec) -> Result<String, ExecError>;

    /// Run a command, streaming its output to the terminal.
    async fn exec_streaming(&self, cmd: &CommandSpec) -> Result<(), ExecError>;
}

/// Spawns real processes with `tokio::process`.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn exec(&self, cmd: &CommandSpec) -> Result<String, ExecError> {
        tracing::debug!(command = %cmd, "exec");

        let output = cmd
            .to_command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| cmd.not_found(e))?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| ExecError::InvalidUtf8 {
                command: cmd.to_string(),
                source: e,
            })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(ExecError::CommandFailed {
                command: cmd.to_string(),
                stderr,
            })
        }
    }

    async fn exec_streaming(&self, cmd: &CommandSpec) -> Result<(), ExecError> {
        tracing::debug!(command = %cmd, "exec (streaming)");

        let status = cmd
            .to_command()
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| cmd.not_found(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Exited {
                command: cmd.to_string(),
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = CommandSpec::new("go", ["list", "-json", "./cmd/server"]);
        assert_eq!(cmd.to_string(), "go list -json ./cmd/server");
    }

    #[test]
    fn builder_sets_dir_and_env() {
        let cmd = CommandSpec::new("docker", ["build", "."])
            .current_dir("/tmp/stage")
            .env_clear_with(vec![("GOOS".to_owned(), "linux".to_owned())]);

        assert_eq!(cmd.current_dir, Some(PathBuf::from("/tmp/stage")));
        assert_eq!(
            cmd.env,
            Some(vec![("GOOS".to_owned(), "linux".to_owned())])
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_executor_captures_stdout() {
        let out = RealExecutor
            .exec(&CommandSpec::new("sh", ["-c", "echo hello"]))
            .await
            .unwrap();
        assert_eq!(out, "hello\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_executor_reports_stderr_on_failure() {
        let err = RealExecutor
            .exec(&CommandSpec::new("sh", ["-c", "echo boom >&2; exit 3"]))
            .await
            .unwrap_err();
        match err {
            ExecError::CommandFailed { stderr, .. } => assert_eq!(stderr, "boom\n"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_executor_clears_environment() {
        let cmd = CommandSpec::new("sh", ["-c", "echo \"${HOME:-unset} $GOOS\""])
            .env_clear_with(vec![("GOOS".to_owned(), "linux".to_owned())]);
        let out = RealExecutor.exec(&cmd).await.unwrap();
        assert_eq!(out, "unset linux\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_executor_streaming_reports_exit_status() {
        let err = RealExecutor
            .exec_streaming(&CommandSpec::new("sh", ["-c", "exit 2"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Exited { .. }));
    }

    #[tokio::test]
    async fn real_executor_missing_program() {
        let err = RealExecutor
            .exec(&CommandSpec::new("godockerize-no-such-program", Vec::<String>::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::NotFound { .. }));
    }
}
