//! Form serialization and declarative field validation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Non-whitespace, non-`@` on both sides of a single `@`, with a dot after it.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Field name to value mapping.
///
/// Forms read from the page only hold strings; data handed in by scripts
/// may hold any JSON value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, Value>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `(name, value)` entries; a repeated name keeps its last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The field as text for the length and pattern checks.
    ///
    /// Missing, `null`, `false` and `""` count as empty. Numbers and other
    /// values are checked in their JSON text form.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Checks applied to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub email: bool,
}

impl FieldRule {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn email() -> Self {
        Self {
            email: true,
            ..Self::default()
        }
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn and_email(mut self) -> Self {
        self.email = true;
        self
    }

    /// First failing check for `value`, in order required, length, email.
    fn check(&self, field: &str, value: Option<&str>) -> Option<String> {
        let value = value.filter(|v| !v.is_empty());

        let Some(value) = value else {
            return self.required.then(|| format!("{field} is required"));
        };

        if let Some(min) = self.min_length
            && value.chars().count() < min
        {
            return Some(format!("{field} must be at least {min} characters"));
        }

        if self.email && !EMAIL_PATTERN.is_match(value) {
            return Some(format!("{field} must be a valid email"));
        }

        None
    }
}

/// Field name to rule mapping.
pub type ValidationRules = BTreeMap<String, FieldRule>;

/// Field name to error message mapping; empty when the data is valid.
pub type ValidationErrors = BTreeMap<String, String>;

/// Validate `data` against `rules`, reporting at most one message per field.
pub fn validate(data: &FormValues, rules: &ValidationRules) -> ValidationErrors {
    rules
        .iter()
        .filter_map(|(field, rule)| {
            rule.check(field, data.text(field).as_deref())
                .map(|message| (field.clone(), message))
        })
        .collect()
}
