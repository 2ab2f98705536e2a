//! Resolving deferred variables

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{capture_command, interpolate, Context};
use crate::vars::{Var, Vars};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Run the command of every deferred variable, in order.
///
/// Each command sees the variables resolved before it, both as `${name}`
/// references and as environment variables. The result replaces the
/// variable with its trimmed output as a live value.
pub fn resolve_vars(vars: &Vars, ctx: &Context, task_dir: &Path) -> ExecutionResult<Vars> {
    let mut resolved = Vars::new();

    vars.range(|name, var| -> ExecutionResult<()> {
        if !var.is_deferred() {
            resolved.set(name, var.clone());
            return Ok(());
        }

        let env = project(&resolved);
        let fail = |error: String| ExecutionError::VarCommand {
            name: name.to_string(),
            error,
        };

        let script = interpolate(&var.sh, &env).map_err(|e| fail(e.to_string()))?;
        let dir = if var.dir.is_empty() {
            task_dir.to_path_buf()
        } else {
            task_dir.join(interpolate(&var.dir, &env).map_err(|e| fail(e.to_string()))?)
        };

        debug!(var = name, command = %script, dir = %dir.display(), "resolving variable");
        let output = capture_command(&script, ctx, &dir, &env).map_err(|e| fail(e.to_string()))?;
        let value = output.trim_end_matches(['\r', '\n']).to_string();

        resolved.set(name, Var::from_live(Value::String(value)));
        Ok(())
    })?;

    Ok(resolved)
}

/// Project variables into strings for interpolation and the environment
pub fn project(vars: &Vars) -> HashMap<String, String> {
    vars.to_cache_map()
        .into_iter()
        .map(|(name, value)| (name, value_to_string(&value)))
        .collect()
}

/// Render a variable value as text
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
