//! Task execution types and logic
//!
//! This module contains the runtime representation of tasks and execution logic.

use crate::config;
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{execute_command, interpolate_list, project, resolve_vars, Context};
use crate::status::{Checker, Timestamp};
use crate::vars::Vars;
use std::path::PathBuf;
use tracing::{debug, warn};

/// What happened when a task was executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The task was skipped because its outputs are current
    UpToDate,

    /// The task's commands were run (or printed, in dry mode)
    Ran,
}

/// Runtime task representation
#[derive(Debug, Clone)]
pub struct Task {
    /// Task name
    pub name: String,

    /// Usage description
    pub usage: Option<String>,

    /// Whether this task is private
    pub private: bool,

    /// Whether this task should run quietly
    pub quiet: bool,

    /// Working directory, relative to the config file
    pub dir: Option<String>,

    /// Task variables
    pub vars: Vars,

    /// Commands to execute
    pub commands: Vec<Command>,

    /// Source patterns
    pub sources: Vec<String>,

    /// Generated file patterns
    pub generates: Vec<String>,
}

impl Task {
    /// Create a new task from configuration
    pub fn from_config(name: String, config: config::Task) -> Self {
        Task {
            name,
            usage: config.usage,
            private: config.private,
            quiet: config.quiet,
            dir: config.dir,
            vars: config.vars,
            commands: config.cmds.into_iter().map(Command::from_config).collect(),
            sources: config.sources,
            generates: config.generates,
        }
    }

    /// Directory the task's commands and patterns are relative to
    pub fn working_dir(&self, ctx: &Context) -> PathBuf {
        match &self.dir {
            Some(dir) => ctx.config_dir().join(dir),
            None => ctx.config_dir(),
        }
    }

    /// Layer `globals`, the task's own variables and the command-line
    /// overrides, in that order
    pub fn layered_vars(&self, globals: &Vars, ctx: &Context) -> Vars {
        let mut vars = globals.clone();
        vars.merge(&self.vars);
        vars.merge(&ctx.overrides);
        vars
    }

    /// Resolve variables into `ctx` and build the up-to-date checker
    fn prepare(&self, ctx: &mut Context, globals: &Vars) -> ExecutionResult<Timestamp> {
        let dir = self.working_dir(ctx);

        let layered = self.layered_vars(globals, ctx);
        let resolved = resolve_vars(&layered, ctx, &dir)?;
        ctx.vars = project(&resolved);

        let sources = self.render_patterns(&self.sources, ctx, "sources")?;
        let generates = self.render_patterns(&self.generates, ctx, "generates")?;

        Ok(Timestamp::new(self.name.clone(), dir)
            .with_temp_dir(ctx.scratch_dir())
            .with_sources(sources)
            .with_generates(generates)
            .with_dry(ctx.dry))
    }

    fn render_patterns(
        &self,
        patterns: &[String],
        ctx: &Context,
        field: &str,
    ) -> ExecutionResult<Vec<String>> {
        interpolate_list(patterns, &ctx.vars).map_err(|e| ExecutionError::Interpolation {
            name: format!("{}.{}", self.name, field),
            error: e.to_string(),
        })
    }

    /// Check whether the task is up to date without touching checker state
    pub fn status(&self, ctx: &mut Context, globals: &Vars) -> ExecutionResult<bool> {
        let checker = self.prepare(ctx, globals)?.with_dry(true);
        Ok(is_up_to_date(&checker))
    }

    /// Execute the task in the given context
    pub fn execute(&self, ctx: &mut Context, globals: &Vars) -> ExecutionResult<Outcome> {
        let checker = self.prepare(ctx, globals)?;

        if !ctx.force && is_up_to_date(&checker) {
            ctx.print_task_up_to_date(&self.name);
            return Ok(Outcome::UpToDate);
        }

        ctx.print_task_start(&self.name);

        let dir = self.working_dir(ctx);
        for cmd in &self.commands {
            if let Err(e) = execute_command(cmd, ctx, &dir, self.quiet) {
                if let Err(undo) = checker.on_error() {
                    warn!(task = %self.name, error = %undo, "failed to reset {} state", checker.kind());
                }
                ctx.print_error(&format!("Task \"{}\" failed: {}", self.name, e));
                return Err(e);
            }
        }

        ctx.print_task_complete(&self.name);
        Ok(Outcome::Ran)
    }
}

/// Ask a checker, treating a failed check as "not up to date"
pub fn is_up_to_date(checker: &dyn Checker) -> bool {
    match checker.is_up_to_date() {
        Ok(up_to_date) => up_to_date,
        Err(e) => {
            debug!(kind = checker.kind(), error = %e, "up-to-date check failed");
            false
        }
    }
}

/// Runtime representation of a command
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// The command to execute
    pub exec: String,

    /// Don't echo the command
    pub silent: bool,

    /// Working directory, relative to the task directory
    pub dir: Option<String>,
}

impl Command {
    /// Create from config
    pub fn from_config(config: config::Command) -> Self {
        match config {
            config::Command::Simple(exec) => Command {
                exec,
                silent: false,
                dir: None,
            },
            config::Command::Detail(detail) => Command {
                exec: detail.cmd,
                silent: detail.silent,
                dir: detail.dir,
            },
        }
    }
}
