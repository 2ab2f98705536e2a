//! Configuration file parsing and discovery

use crate::config::types::Config;
use crate::error::{ConfigError, ConfigResult, TaskrError};
use crate::vars::Vars;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["taskr.yml", "taskr.yaml", "taskr.toml"];

/// Find the configuration file by searching current and parent directories
pub fn find_config_file() -> ConfigResult<PathBuf> {
    find_config_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the configuration file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut searched_paths = Vec::new();

    for dir in start_dir.ancestors() {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = dir.join(file_name);
            if config_path.is_file() {
                return Ok(config_path);
            }
            searched_paths.push(config_path.display().to_string());
        }
    }

    Err(ConfigError::NotFound(searched_paths.join(", ")))
}

/// Parse a configuration file, picking the format from its extension
pub fn parse_config_file(path: &Path) -> Result<Config, TaskrError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read file: {}", e)))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml") | Some("yaml") => parse_config(&contents),
        Some("toml") => parse_config_toml(&contents),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf()).into()),
    }
}

/// Parse a YAML configuration
pub fn parse_config(yaml: &str) -> Result<Config, TaskrError> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Parse a TOML configuration.
///
/// The `vars` tables are decoded from the generic value tree with
/// [`Vars::from_toml`]; everything else goes through serde.
pub fn parse_config_toml(text: &str) -> Result<Config, TaskrError> {
    let mut root: toml::Table = toml::from_str(text)?;

    let global_vars = take_vars(&mut root)?;

    let mut task_vars = Vec::new();
    if let Some(toml::Value::Table(tasks)) = root.get_mut("tasks") {
        for (name, task) in tasks.iter_mut() {
            if let toml::Value::Table(task) = task {
                task_vars.push((name.clone(), take_vars(task)?));
            }
        }
    }

    let mut config: Config = toml::Value::Table(root).try_into()?;
    config.vars = global_vars;
    for (name, vars) in task_vars {
        if let Some(task) = config.tasks.get_mut(&name) {
            task.vars = vars;
        }
    }

    Ok(config)
}

fn take_vars(table: &mut toml::Table) -> Result<Vars, TaskrError> {
    match table.remove("vars") {
        Some(value) => Ok(Vars::from_toml(&value)?),
        None => Ok(Vars::new()),
    }
}

/// Parse configuration with automatic file discovery
pub fn parse_config_auto() -> Result<(Config, PathBuf), TaskrError> {
    let config_path = find_config_file()?;
    let config = parse_config_file(&config_path)?;
    Ok((config, config_path))
}
