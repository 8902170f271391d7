//! External command execution.
//!
//! Command templates are split on whitespace into a program and its leading
//! arguments; file paths appended later are single arguments and are never
//! re-tokenized. The child inherits this process's stdout and stderr, so
//! compiler and linker output streams through live and byte-for-byte, and
//! the runner blocks until both streams are drained and the exit status is
//! collected.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Error spawning or waiting on an external command.
///
/// A nonzero exit code is not represented here; it comes back as data and
/// the caller decides what it means.
#[derive(Debug, Error)]
pub enum RunError {
  /// The program could not be started (not found, not executable).
  #[error("failed to launch {program}: {source}")]
  Launch {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The wait for the child was interrupted.
  #[error("interrupted while waiting for {program}")]
  Interrupted { program: String },

  /// The child was terminated by a signal and produced no exit code.
  #[error("{program} terminated without an exit code")]
  Terminated { program: String },

  /// Any other I/O failure while running the child.
  #[error("io error running {program}: {source}")]
  Io {
    program: String,
    #[source]
    source: io::Error,
  },
}

/// An external command: a program and its arguments, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
  program: String,
  args: Vec<String>,
}

impl CommandLine {
  /// Split a command template on whitespace.
  ///
  /// Returns `None` for an empty or all-whitespace template; configuration
  /// loading turns that into an error before any build starts.
  pub fn parse(template: &str) -> Option<Self> {
    let mut parts = template.split_whitespace();
    let program = parts.next()?.to_string();
    let args = parts.map(str::to_string).collect();
    Some(CommandLine { program, args })
  }

  /// Append a single argument.
  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn args(&self) -> &[String] {
    &self.args
  }
}

impl fmt::Display for CommandLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Capability to run an external command to completion.
///
/// The builder only needs an exit code back, so tests substitute a
/// recording implementation that never spawns anything.
pub trait CommandRunner {
  /// Run `command` from `cwd` (or the inherited working directory), wait
  /// for it to exit, and return its exit code.
  fn run(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<i32, RunError>;
}

/// Runs commands as real child processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  fn run(&self, command: &CommandLine, cwd: Option<&Path>) -> Result<i32, RunError> {
    let mut child = Command::new(command.program());
    child.args(command.args());
    if let Some(dir) = cwd {
      child.current_dir(dir);
    }

    debug!(command = %command, cwd = ?cwd, "spawning");

    // Inherited stdio: the child writes straight to our own stdout/stderr
    // until end-of-stream, and status() waits for termination.
    let status = child.status().map_err(|e| {
      let program = command.program().to_string();
      match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => RunError::Launch { program, source: e },
        io::ErrorKind::Interrupted => RunError::Interrupted { program },
        _ => RunError::Io { program, source: e },
      }
    })?;

    status.code().ok_or_else(|| RunError::Terminated {
      program: command.program().to_string(),
    })
  }
}
