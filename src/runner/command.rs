//! Command execution
//!
//! This module runs rendered command bodies through the shell, one at a time.

use crate::config::EnvironmentMap;
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::Context;
use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};

/// A rendered command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Template file the body was rendered from
    pub path: PathBuf,

    /// Shell script text
    pub body: String,
}

impl Command {
    pub fn new(path: impl Into<PathBuf>, body: impl Into<String>) -> Self {
        Command {
            path: path.into(),
            body: body.into(),
        }
    }
}

/// Execute a single command, streaming its output to this process's stdio
///
/// The output is inherited rather than captured, so it is shown exactly once.
pub fn execute_command(cmd: &Command, env: &EnvironmentMap, ctx: &Context) -> ExecutionResult<()> {
    let (program, args) = ctx
        .interpreter
        .split_first()
        .ok_or_else(|| ExecutionError::Spawn {
            path: cmd.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty interpreter"),
        })?;

    // Build the command
    let mut command = StdCommand::new(program);
    command.args(args);
    command.arg(&cmd.body);
    command.current_dir(&ctx.working_dir);

    // Set up stdio
    command.stdin(Stdio::inherit());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());

    if ctx.export_env {
        for (key, value) in env.scalar_vars() {
            // PATH, HOME and friends keep their inherited values.
            if std::env::var_os(key).is_some() {
                log::debug!("not exporting {}: already set in the environment", key);
                continue;
            }
            command.env(key, value);
        }
    }

    log::debug!("spawning {:?} for {}", ctx.interpreter, cmd.path.display());

    let status = command.status().map_err(|source| ExecutionError::Spawn {
        path: cmd.path.clone(),
        source,
    })?;

    // Check exit status
    if !status.success() {
        return Err(ExecutionError::CommandFailed {
            path: cmd.path.clone(),
            code: status.code(),
        });
    }

    Ok(())
}

/// Run every command in order
///
/// Failures are reported and never stop the sequence.
pub fn run_commands(commands: &[Command], env: &EnvironmentMap, ctx: &Context) {
    for cmd in commands {
        ctx.print_banner(&cmd.path.display().to_string());

        if let Err(e) = execute_command(cmd, env, ctx) {
            ctx.print_error(&e.to_string());
        }

        ctx.print_separator();
    }
}
