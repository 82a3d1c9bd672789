//! External command execution

use crate::{BridgeError, Result};
use std::fmt;
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

/// A fully specified external command: program, arguments and extra
/// environment. Arguments are passed verbatim, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Whether `a` and `b` appear as consecutive arguments
    pub fn has_pair(&self, a: &str, b: &str) -> bool {
        self.args.windows(2).any(|w| w[0] == a && w[1] == b)
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-like rendering for logs and dry runs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if !s.is_empty() && !s.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('"', "\\\""))
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output carrying `stdout`
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Turn a non-zero exit into [`BridgeError::CommandFailed`], carrying
    /// stderr (or stdout when stderr is empty) as the message.
    pub fn into_success(self, program: &str) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        let status = self
            .status
            .map(|code| format!("exit code {code}"))
            .unwrap_or_else(|| "terminated".to_string());
        let message = [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .find(|m| !m.is_empty())
            .unwrap_or("no output")
            .to_string();

        Err(BridgeError::CommandFailed {
            program: program.to_string(),
            status,
            message,
        })
    }
}

/// Runs external commands. The seam between the backends and the OS, so a
/// native binding or a scripted fake can stand in for real processes.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> impl Future<Output = Result<CommandOutput>> + Send;
}

/// Runs commands as real child processes with an optional timeout
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        log::debug!("Exec: {}", spec);

        let mut command = tokio::process::Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Keep PowerShell and SumatraPDF from flashing a console window
        #[cfg(windows)]
        command.creation_flags(0x0800_0000);

        let output = command.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output).await.map_err(|_| {
                BridgeError::Timeout {
                    program: spec.program.clone(),
                    limit,
                }
            })?,
            None => output.await,
        }
        .map_err(|source| BridgeError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
