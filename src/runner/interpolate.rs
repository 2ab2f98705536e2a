//! Variable interpolation for strings
//!
//! This module replaces `${var}` references with resolved task variables,
//! falling back to environment variables.

use crate::error::{InterpolationError, InterpolationResult};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;

/// How many rounds of nested references are expanded before giving up
const MAX_DEPTH: usize = 32;

fn reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid interpolation regex"))
}

/// Interpolate variables in a string
///
/// Values may themselves contain references, which are expanded in later
/// rounds. Unknown references are left untouched.
pub fn interpolate(s: &str, vars: &HashMap<String, String>) -> InterpolationResult<String> {
    let mut current = s.to_string();

    for _ in 0..MAX_DEPTH {
        let next = reference()
            .replace_all(&current, |caps: &Captures| {
                let name = &caps[1];
                vars.get(name)
                    .cloned()
                    .or_else(|| env::var(name).ok())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();

        if next == current {
            return Ok(current);
        }
        current = next;
    }

    Err(InterpolationError::RecursiveInterpolation)
}

/// Interpolate a list of strings
pub fn interpolate_list(
    list: &[String],
    vars: &HashMap<String, String>,
) -> InterpolationResult<Vec<String>> {
    list.iter().map(|s| interpolate(s, vars)).collect()
}
