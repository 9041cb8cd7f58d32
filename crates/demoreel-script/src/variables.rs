//! `${NAME}` placeholder substitution.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::ScriptError;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Externally supplied values for `${NAME}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment.
    ///
    /// Entries whose name or value is not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitute every placeholder in every string of `value`.
    ///
    /// Fails on the first placeholder without a value; nothing is partially
    /// substituted in that case.
    pub fn substitute(&self, value: Value) -> Result<Value, ScriptError> {
        match value {
            Value::String(s) => self.substitute_str(&s).map(Value::String),
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.substitute(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, item) in map {
                    out.insert(key, self.substitute(item)?);
                }
                Ok(Value::Object(out))
            }
            other => Ok(other),
        }
    }

    /// Substitute placeholders in a single string.
    pub fn substitute_str(&self, input: &str) -> Result<String, ScriptError> {
        if let Some(missing) = PLACEHOLDER
            .captures_iter(input)
            .map(|cap| cap[1].to_string())
            .find(|name| !self.values.contains_key(name))
        {
            return Err(ScriptError::MissingVariable(missing));
        }

        Ok(PLACEHOLDER
            .replace_all(input, |cap: &Captures<'_>| {
                self.values.get(&cap[1]).cloned().unwrap_or_default()
            })
            .into_owned())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
