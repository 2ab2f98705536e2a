//! The ordered variable container

use serde_yaml::Value;
use std::collections::HashMap;

/// A single variable.
///
/// Only one of the slots is normally set after decoding: a literal in
/// `static_value`, or a deferred shell command in `sh`. `live` is filled in
/// by the runner once a deferred command has produced its output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Var {
    /// Literal value
    pub static_value: String,

    /// Resolved value of any type
    pub live: Option<Value>,

    /// Command whose output becomes the value
    pub sh: String,

    /// Working directory for `sh`
    pub dir: String,
}

impl Var {
    /// A literal variable
    pub fn from_static(value: impl Into<String>) -> Self {
        Var {
            static_value: value.into(),
            ..Default::default()
        }
    }

    /// A deferred variable resolved by running `command`
    pub fn from_sh(command: impl Into<String>) -> Self {
        Var {
            sh: command.into(),
            ..Default::default()
        }
    }

    /// An already-resolved variable
    pub fn from_live(value: Value) -> Self {
        Var {
            live: Some(value),
            ..Default::default()
        }
    }

    /// Whether this variable still waits for its command to run
    pub fn is_deferred(&self) -> bool {
        !self.sh.is_empty()
    }
}

/// Variables in declaration order.
///
/// `keys` always holds each name of `mapping` exactly once. The default
/// value is the empty set, and every read on it behaves like a read on a
/// set that was never populated.
///
/// `Clone` is a deep copy: the clone owns its own order and mapping, so
/// changing one never shows through the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vars {
    keys: Vec<String>,
    mapping: HashMap<String, Var>,
}

impl Vars {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable.
    ///
    /// A new name goes to the end; an existing name keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: Var) {
        let name = name.into();
        if !self.mapping.contains_key(&name) {
            self.keys.push(name.clone());
        }
        self.mapping.insert(name, value);
    }

    /// Layer `other` on top of `self`, visiting `other` in its order.
    pub fn merge(&mut self, other: &Vars) {
        for (name, value) in other.iter() {
            self.set(name, value.clone());
        }
    }

    /// Visit every variable in order.
    ///
    /// The first error returned by `visit` stops the walk and is returned.
    pub fn range<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str, &Var) -> Result<(), E>,
    {
        for (name, value) in self.iter() {
            visit(name, value)?;
        }
        Ok(())
    }

    /// Iterate over variables in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Var)> + '_ {
        self.keys
            .iter()
            .filter_map(move |k| self.mapping.get(k).map(|v| (k.as_str(), v)))
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&Var> {
        self.mapping.get(name)
    }

    /// Variable names in order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no variable is defined
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Project into a plain lookup for rendering.
    ///
    /// Deferred variables are left out so that lookups miss instead of
    /// seeing an unresolved value. Otherwise the live value wins over the
    /// literal.
    pub fn to_cache_map(&self) -> HashMap<String, Value> {
        let mut map = HashMap::with_capacity(self.len());
        for (name, var) in self.iter() {
            if var.is_deferred() {
                continue;
            }
            let value = match &var.live {
                Some(live) => live.clone(),
                None => Value::String(var.static_value.clone()),
            };
            map.insert(name.to_string(), value);
        }
        map
    }
}

impl<K: Into<String>> FromIterator<(K, Var)> for Vars {
    fn from_iter<I: IntoIterator<Item = (K, Var)>>(iter: I) -> Self {
        let mut vars = Vars::new();
        for (name, value) in iter {
            vars.set(name, value);
        }
        vars
    }
}
