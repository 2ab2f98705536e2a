//! Configuration validation
//!
//! This module provides validation logic for configuration files.

use crate::config::types::{Config, Task};
use crate::error::{ConfigError, ConfigResult};
use crate::vars::Vars;

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    validate_var_names(&config.vars)?;

    for (name, task) in &config.tasks {
        validate_task(name, task)?;
    }

    Ok(())
}

/// Validate a single task
pub fn validate_task(name: &str, task: &Task) -> ConfigResult<()> {
    validate_var_names(&task.vars)?;

    for pattern in task.sources.iter().chain(task.generates.iter()) {
        glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            task: name.to_string(),
            pattern: pattern.clone(),
            error: e.to_string(),
        })?;
    }

    Ok(())
}

/// Variable names are looked up as `${name}`, so they cannot be empty or
/// contain braces or whitespace
pub fn validate_var_name(name: &str) -> ConfigResult<()> {
    let valid = !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '{' || c == '}' || c.is_whitespace());

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidVarName(name.to_string()))
    }
}

fn validate_var_names(vars: &Vars) -> ConfigResult<()> {
    vars.range(|name, _| validate_var_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::Var;

    fn task_with_sources(sources: &[&str]) -> Task {
        Task {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            generates: vec!["out/*.o".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let mut config = Config::default();
        config.vars.set("CC", Var::from_static("gcc"));
        config
            .tasks
            .insert("build".to_string(), task_with_sources(&["src/**/*.c"]));

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_pattern() {
        let mut config = Config::default();
        config
            .tasks
            .insert("build".to_string(), task_with_sources(&["src/[.c"]));

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPattern { ref task, ref pattern, .. })
                if task == "build" && pattern == "src/[.c"
        ));
    }

    #[test]
    fn test_validate_var_names() {
        assert!(validate_var_name("OUT_DIR").is_ok());
        assert!(validate_var_name("with.dot").is_ok());
        assert!(validate_var_name("").is_err());
        assert!(validate_var_name("has space").is_err());
        assert!(validate_var_name("br{ace").is_err());
    }

    #[test]
    fn test_validate_task_var_names() {
        let mut task = Task::default();
        task.vars.set("bad name", Var::from_static("x"));

        let mut config = Config::default();
        config.tasks.insert("t".to_string(), task);

        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidVarName(name)) if name == "bad name"
        ));
    }
}
