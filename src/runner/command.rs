//! Command execution
//!
//! This module handles executing shell commands.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{interpolate, Command, Context, Verbosity};
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};

/// Execute a task command from `task_dir`.
///
/// In dry mode the command is printed but not run.
pub fn execute_command(
    cmd: &Command,
    ctx: &Context,
    task_dir: &Path,
    quiet: bool,
) -> ExecutionResult<()> {
    let exec_str = interpolate(&cmd.exec, &ctx.vars).map_err(|e| {
        ExecutionError::Interpolation {
            name: "command".to_string(),
            error: e.to_string(),
        }
    })?;

    if ctx.dry || (!cmd.silent && !quiet) {
        ctx.print_command(&exec_str);
    }
    if ctx.dry {
        return Ok(());
    }

    let working_dir = match &cmd.dir {
        Some(dir) => {
            let dir = interpolate(dir, &ctx.vars).map_err(|e| ExecutionError::Interpolation {
                name: "dir".to_string(),
                error: e.to_string(),
            })?;
            task_dir.join(dir)
        }
        None => task_dir.to_path_buf(),
    };

    let mut command = shell_command(&ctx.interpreter, &exec_str, &working_dir, &ctx.vars)?;

    let output = if ctx.verbosity == Verbosity::Silent {
        Stdio::null()
    } else {
        Stdio::inherit()
    };
    command.stdin(Stdio::inherit());
    command.stdout(output);
    command.stderr(Stdio::inherit());

    let status = command.status().map_err(|e| ExecutionError::Spawn {
        program: ctx.interpreter[0].clone(),
        error: e.to_string(),
    })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed(status.code()));
    }

    Ok(())
}

/// Run `script` and return what it printed on stdout
pub fn capture_command(
    script: &str,
    ctx: &Context,
    dir: &Path,
    env: &HashMap<String, String>,
) -> ExecutionResult<String> {
    let mut command = shell_command(&ctx.interpreter, script, dir, env)?;
    command.stdin(Stdio::null());
    command.stderr(Stdio::inherit());

    let output = command.output().map_err(|e| ExecutionError::Spawn {
        program: ctx.interpreter[0].clone(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(ExecutionError::CommandFailed(output.status.code()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn shell_command(
    interpreter: &[String],
    script: &str,
    dir: &Path,
    env: &HashMap<String, String>,
) -> ExecutionResult<StdCommand> {
    let (program, args) = interpreter
        .split_first()
        .ok_or(ExecutionError::EmptyInterpreter)?;

    let mut command = StdCommand::new(program);
    command.args(args);
    command.arg(script);
    command.current_dir(dir);
    command.envs(env);

    Ok(command)
}
