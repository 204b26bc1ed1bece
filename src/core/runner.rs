//! External command execution behind an injectable seam.
//!
//! The pipeline only talks to `CommandRunner`; `SystemRunner` is the real
//! process-spawning implementation and tests swap in a scripted fake.

use std::process::{Command, Output, Stdio};

use serde::Serialize;

use crate::error::{CommandFailedDetails, Error, Result};
use crate::utils::shell;

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputMode {
    /// Capture stdout/stderr; stdout is returned to the caller.
    Captured,
    /// Pass the child's output through to the console; nothing is returned.
    /// The child's stdout is routed to our stderr so stdout stays reserved
    /// for the JSON response.
    Inherit,
}

/// One external command to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub step: String,
    pub program: String,
    pub args: Vec<String>,
    pub output: OutputMode,
}

impl Invocation {
    pub fn new(step: &str, program: &str, args: Vec<String>, output: OutputMode) -> Self {
        Self {
            step: step.to_string(),
            program: program.to_string(),
            args,
            output,
        }
    }

    /// Shell-quoted rendering for logs and error details.
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        shell::quote_args(&parts)
    }

    fn failed(&self, exit_code: Option<i32>, stderr: String) -> Error {
        log_status!("command", "Command failed: {}", self.display());
        Error::command_failed(CommandFailedDetails {
            step: self.step.clone(),
            command: self.display(),
            exit_code,
            stderr,
        })
    }
}

pub trait CommandRunner {
    /// Run to completion. Returns captured stdout in `Captured` mode and an
    /// empty string in `Inherit` mode. Launch failures and non-zero exits are
    /// `command.failed` errors.
    fn run(&self, invocation: &Invocation) -> Result<String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        (**self).run(invocation)
    }
}

/// Spawns real processes. Arguments go straight to the program, no shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        match invocation.output {
            OutputMode::Captured => {
                let output = cmd
                    .output()
                    .map_err(|e| invocation.failed(None, e.to_string()))?;

                if !output.status.success() {
                    return Err(invocation.failed(output.status.code(), error_text(&output)));
                }

                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            OutputMode::Inherit => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::from(std::io::stderr()))
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| invocation.failed(None, e.to_string()))?;

                if !status.success() {
                    return Err(invocation.failed(status.code(), String::new()));
                }

                Ok(String::new())
            }
        }
    }
}

/// Extract error text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
