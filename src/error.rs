//! Error types for Taskr

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Taskr operations
pub type Result<T> = std::result::Result<T, TaskrError>;

/// Main error type for Taskr
#[derive(Error, Debug)]
pub enum TaskrError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Variable interpolation errors
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Variable decoding errors
    #[error("Variable error: {0}")]
    Vars(#[from] VarsError),

    /// Up-to-date check errors
    #[error("Status error: {0}")]
    Status(#[from] StatusError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Task '{0}' is not defined")]
    TaskNotFound(String),

    #[error("Invalid glob pattern '{pattern}' in task '{task}': {error}")]
    InvalidPattern {
        task: String,
        pattern: String,
        error: String,
    },

    #[error("Invalid variable name '{0}'")]
    InvalidVarName(String),

    #[error("Invalid variable assignment '{0}', expected NAME=VALUE")]
    InvalidAssignment(String),

    #[error("Unsupported config file '{0}'")]
    UnsupportedFormat(PathBuf),
}

/// Task execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),

    #[error("Failed to spawn '{program}': {error}")]
    Spawn { program: String, error: String },

    #[error("Command for variable '{name}' failed: {error}")]
    VarCommand { name: String, error: String },

    #[error("Task '{0}' is not up to date")]
    NotUpToDate(String),

    #[error("Interpreter is empty")]
    EmptyInterpreter,

    #[error("Invalid value for '{name}': {error}")]
    Interpolation { name: String, error: String },
}

/// Variable interpolation errors
#[derive(Error, Debug)]
pub enum InterpolationError {
    #[error("Recursive interpolation detected")]
    RecursiveInterpolation,
}

/// Errors raised while decoding variables from a generic (TOML) table
#[derive(Error, Debug)]
pub enum VarsError {
    #[error("vars is a {0} and not a table")]
    NotATable(&'static str),

    #[error("no such variable attribute: {0}")]
    UnknownField(String),

    #[error("attribute '{field}' expects a {expected}, found a {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("live value could not be converted: {0}")]
    Live(String),

    #[error("invalid variable '{name}': {source}")]
    InvalidVar {
        name: String,
        #[source]
        source: Box<VarsError>,
    },
}

/// Errors surfaced by up-to-date checkers
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("invalid glob pattern '{pattern}': {error}")]
    Pattern { pattern: String, error: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Specialized result type for interpolation operations
pub type InterpolationResult<T> = std::result::Result<T, InterpolationError>;

/// Specialized result type for variable decoding
pub type VarsResult<T> = std::result::Result<T, VarsError>;

/// Specialized result type for up-to-date checks
pub type StatusResult<T> = std::result::Result<T, StatusError>;
