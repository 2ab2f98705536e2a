//! Core configuration types
//!
//! This module defines the data structures that represent a taskr.yml configuration file.

use crate::vars::Vars;
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Application name (optional)
    #[serde(default)]
    pub name: Option<String>,

    /// Application usage description (optional)
    #[serde(default)]
    pub usage: Option<String>,

    /// Global interpreter to use for commands (e.g., ["sh", "-c"])
    #[serde(default)]
    pub interpreter: Option<Vec<String>>,

    /// Variables visible to every task
    #[serde(default)]
    pub vars: Vars,

    /// Tasks defined in the configuration
    #[serde(default)]
    pub tasks: HashMap<String, Task>,
}

/// A task definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Task {
    /// Usage description for help text
    #[serde(default)]
    pub usage: Option<String>,

    /// Longer description for help text
    #[serde(default)]
    pub description: Option<String>,

    /// Whether this task is private (hidden from help)
    #[serde(default)]
    pub private: bool,

    /// Whether this task should run quietly
    #[serde(default)]
    pub quiet: bool,

    /// Working directory, relative to the config file
    #[serde(default)]
    pub dir: Option<String>,

    /// Task variables, layered over the global ones
    #[serde(default)]
    pub vars: Vars,

    /// Commands to execute
    #[serde(default, deserialize_with = "deserialize_commands")]
    pub cmds: Vec<Command>,

    /// Files the task reads
    #[serde(default)]
    pub sources: Vec<String>,

    /// Files the task produces
    #[serde(default)]
    pub generates: Vec<String>,
}

/// A command to execute
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// Simple string command
    Simple(String),

    /// Command with additional options
    Detail(CommandDetail),
}

/// Detailed command specification
#[derive(Debug, Clone, Deserialize)]
pub struct CommandDetail {
    /// The command to execute
    pub cmd: String,

    /// Don't echo the command before running it
    #[serde(default)]
    pub silent: bool,

    /// Working directory, relative to the task directory
    #[serde(default)]
    pub dir: Option<String>,
}

/// Accepts a single command or a list of commands
fn deserialize_commands<'de, D>(deserializer: D) -> Result<Vec<Command>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Command),
        Many(Vec<Command>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(cmd)) => vec![cmd],
        Some(OneOrMany::Many(cmds)) => cmds,
        None => Vec::new(),
    })
}
