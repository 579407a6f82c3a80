use serde::{Serialize, Serializer};
use std::fmt;

use super::value::{resolve_type_name, ArgValue};
use crate::error::{Result, TelemetryError};

/// Redacted hint about an argument. Never carries free-form content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgMetadata {
    Len(usize),
    /// Allow-listed literal (booleans only).
    Val(&'static str),
}

impl ArgMetadata {
    pub fn of(value: &ArgValue) -> Option<Self> {
        match value {
            ArgValue::Bool(true) => Some(ArgMetadata::Val("True")),
            ArgValue::Bool(false) => Some(ArgMetadata::Val("False")),
            other => other.len().map(ArgMetadata::Len),
        }
    }
}

impl fmt::Display for ArgMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgMetadata::Len(n) => write!(f, "len:{}", n),
            ArgMetadata::Val(v) => write!(f, "val:{}", v),
        }
    }
}

impl Serialize for ArgMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgRecord {
    #[serde(rename = "k")]
    pub key: String,
    #[serde(rename = "t")]
    pub type_name: String,
    #[serde(rename = "m", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ArgMetadata>,
    /// Index in the call, for positional arguments only.
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl ArgRecord {
    pub fn describe(key: impl Into<String>, value: &ArgValue) -> Self {
        Self {
            key: key.into(),
            type_name: resolve_type_name(value),
            metadata: ArgMetadata::of(value),
            position: None,
        }
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

// Text form used in logs: k: "width"\nt: "int"
impl fmt::Display for ArgRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k: {:?}\nt: {:?}", self.key, self.type_name)?;
        if let Some(meta) = &self.metadata {
            write!(f, "\nm: \"{}\"", meta)?;
        }
        Ok(())
    }
}

/// One recorded invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedCommand {
    pub name: String,
    pub args: Vec<ArgRecord>,
}

impl TrackedCommand {
    pub fn new(name: impl Into<String>, args: Vec<ArgRecord>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Bound arguments of a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<ArgValue>,
    keyword: Vec<(String, ArgValue)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.keyword.push((key.into(), value.into()));
        self
    }

    pub fn positional(&self) -> &[ArgValue] {
        &self.positional
    }

    pub fn keywords(&self) -> &[(String, ArgValue)] {
        &self.keyword
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Looks a parameter up by name, falling back to its declared position.
    pub fn get(&self, name: &str, params: &[String]) -> Option<&ArgValue> {
        if let Some((_, v)) = self.keyword.iter().find(|(k, _)| k == name) {
            return Some(v);
        }
        let idx = params.iter().position(|p| p == name)?;
        self.positional.get(idx)
    }
}

/// Builds the redacted record of one call.
///
/// Positional values take the declared parameter name at their index, or the
/// index itself when the call passes more values than there are names.
/// Keyword values follow in declaration order; undeclared keywords come last.
pub fn command_telemetry(name: &str, params: &[String], args: &CallArgs) -> Result<TrackedCommand> {
    let mut records = Vec::with_capacity(args.positional.len() + args.keyword.len());
    let mut bound: Vec<&str> = Vec::with_capacity(args.positional.len());

    for (i, value) in args.positional.iter().enumerate() {
        let key = match params.get(i) {
            Some(p) => {
                bound.push(p.as_str());
                p.clone()
            }
            None => i.to_string(),
        };
        records.push(ArgRecord::describe(&key, value).at_position(i));
        push_nested(&key, value, &mut records);
    }

    let mut keyword: Vec<(usize, &String, &ArgValue)> = Vec::with_capacity(args.keyword.len());
    for (call_idx, (key, value)) in args.keyword.iter().enumerate() {
        if bound.contains(&key.as_str()) {
            return Err(TelemetryError::DuplicateArgument {
                command: name.to_string(),
                key: key.clone(),
            });
        }
        let order = params
            .iter()
            .position(|p| p == key)
            .unwrap_or(params.len() + call_idx);
        keyword.push((order, key, value));
    }
    keyword.sort_by_key(|(order, _, _)| *order);

    for (_, key, value) in keyword {
        records.push(ArgRecord::describe(key, value));
        push_nested(key, value, &mut records);
    }

    Ok(TrackedCommand::new(name, records))
}

fn push_records(key: &str, value: &ArgValue, out: &mut Vec<ArgRecord>) {
    out.push(ArgRecord::describe(key, value));
    push_nested(key, value, out);
}

// Column configs expand into dotted sub-records under their parameter.
fn push_nested(key: &str, value: &ArgValue, out: &mut Vec<ArgRecord>) {
    match value {
        ArgValue::ColumnConfig(config) => {
            for (field, field_value) in &config.fields {
                push_records(&format!("{}.{}", key, field), field_value, out);
            }
        }
        ArgValue::Dict(entries) => {
            for (column, entry) in entries {
                if let ArgValue::ColumnConfig(_) = entry {
                    push_records(&format!("{}.{}", key, column), entry, out);
                }
            }
        }
        _ => {}
    }
}
