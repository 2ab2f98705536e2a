//! Decoding variables from configuration files
//!
//! YAML documents go through serde: a scalar is a literal and a mapping
//! with an `sh` key is a deferred command. TOML tables are decoded from the
//! generic value tree by [`Vars::from_toml`].

use crate::error::{VarsError, VarsResult};
use crate::vars::{Var, Vars};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

impl<'de> Deserialize<'de> for Var {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(VarVisitor)
    }
}

struct VarVisitor;

impl<'de> Visitor<'de> for VarVisitor {
    type Value = Var;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar or a mapping with an `sh` command")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Var, E> {
        Ok(Var::from_static(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Var, E> {
        Ok(Var::from_static(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Var, E> {
        Ok(Var::from_static(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Var, E> {
        Ok(Var::from_static(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Var, E> {
        Ok(Var::from_static(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Var, E> {
        Ok(Var::from_static(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Var, E> {
        Ok(Var::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Var, E> {
        Ok(Var::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Var, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut sh: Option<String> = None;
        let mut dir = String::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "sh" => sh = Some(map.next_value()?),
                "dir" => dir = map.next_value()?,
                other => return Err(de::Error::unknown_field(other, &["sh", "dir"])),
            }
        }

        let sh = sh.ok_or_else(|| de::Error::missing_field("sh"))?;
        Ok(Var {
            sh,
            dir,
            ..Default::default()
        })
    }
}

impl<'de> Deserialize<'de> for Vars {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(VarsVisitor)
    }
}

struct VarsVisitor;

impl<'de> Visitor<'de> for VarsVisitor {
    type Value = Vars;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of variable names to values")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Vars, E> {
        Ok(Vars::new())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Vars, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut vars = Vars::new();
        while let Some((name, var)) = map.next_entry::<String, Var>()? {
            vars.set(name, var);
        }
        Ok(vars)
    }
}

/// The attributes of a [`Var`] that a TOML table may assign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarField {
    Static,
    Live,
    Sh,
    Dir,
}

impl VarField {
    /// Match an attribute name. Only the first character is case-folded,
    /// so `sh` and `Sh` are accepted but `SH` is not.
    pub fn parse(name: &str) -> VarsResult<Self> {
        let mut chars = name.chars();
        let normalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        match normalized.as_str() {
            "Static" => Ok(VarField::Static),
            "Live" => Ok(VarField::Live),
            "Sh" => Ok(VarField::Sh),
            "Dir" => Ok(VarField::Dir),
            _ => Err(VarsError::UnknownField(normalized)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VarField::Static => "Static",
            VarField::Live => "Live",
            VarField::Sh => "Sh",
            VarField::Dir => "Dir",
        }
    }
}

impl Var {
    /// Assign every entry of `fields` to the matching attribute
    pub fn fill_fields(&mut self, fields: &toml::Table) -> VarsResult<()> {
        for (name, value) in fields {
            self.set_field(name, value)?;
        }
        Ok(())
    }

    /// Assign a single attribute by name
    pub fn set_field(&mut self, name: &str, value: &toml::Value) -> VarsResult<()> {
        let field = VarField::parse(name)?;
        match field {
            VarField::Static => self.static_value = expect_string(field, value)?,
            VarField::Sh => self.sh = expect_string(field, value)?,
            VarField::Dir => self.dir = expect_string(field, value)?,
            VarField::Live => {
                let live =
                    serde_yaml::to_value(value).map_err(|e| VarsError::Live(e.to_string()))?;
                self.live = Some(live);
            }
        }
        Ok(())
    }
}

fn expect_string(field: VarField, value: &toml::Value) -> VarsResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| VarsError::TypeMismatch {
            field: field.name(),
            expected: "string",
            found: value.type_str(),
        })
}

impl Vars {
    /// Decode a TOML `vars` table.
    ///
    /// A top-level entry that is not a table becomes a literal named after
    /// its key. A top-level table is walked one level further: each of its
    /// entries becomes a variable named after the *inner* key, either a
    /// literal (non-table value) or a set of attributes (table value). The
    /// inner entries of one outer key share a single accumulator, so an
    /// attribute assigned by an earlier entry is still present on the next.
    pub fn from_toml(value: &toml::Value) -> VarsResult<Vars> {
        let table = value
            .as_table()
            .ok_or_else(|| VarsError::NotATable(value.type_str()))?;

        let mut vars = Vars::new();
        for (name, value) in table {
            let inner = match value {
                toml::Value::Table(inner) => inner,
                other => {
                    vars.set(name.as_str(), Var::from_static(stringify(other)));
                    continue;
                }
            };

            let mut var = Var::default();
            for (inner_name, inner_value) in inner {
                match inner_value {
                    toml::Value::Table(fields) => {
                        var.fill_fields(fields)
                            .map_err(|e| VarsError::InvalidVar {
                                name: inner_name.clone(),
                                source: Box::new(e),
                            })?;
                    }
                    other => var.static_value = stringify(other),
                }
                vars.set(inner_name.as_str(), var.clone());
            }
        }

        Ok(vars)
    }
}

/// Render a TOML value as a literal
fn stringify(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(stringify).collect();
            format!("[{}]", items.join(" "))
        }
        toml::Value::Table(table) => {
            let entries: Vec<String> = table
                .iter()
                .map(|(k, v)| format!("{}:{}", k, stringify(v)))
                .collect();
            format!("map[{}]", entries.join(" "))
        }
    }
}
