//! External process invocation.
//!
//! Every action the pipeline takes is one program invocation. The
//! [`CommandRunner`] trait is the seam between the pipeline and the
//! processes it starts.

use crate::error::CommandError;
use async_trait::async_trait;
use colored::Colorize;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
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
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs one command to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError>;
}

/// Spawns real processes.
///
/// stdio is inherited so the tool's own progress and diagnostics reach the
/// terminal unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        tracing::debug!("Running: {}", command);

        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(CommandError::Exited {
                command: command.to_string(),
                code,
            }),
            None => Err(CommandError::Terminated {
                command: command.to_string(),
            }),
        }
    }
}

/// Prints commands instead of running them
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        println!("  {} {}", "$".dimmed(), command);
        Ok(())
    }
}

#[async_trait]
impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        (**self).run(command).await
    }
}
