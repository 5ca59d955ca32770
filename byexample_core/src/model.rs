use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::constant::*;

/// The cardinality of a positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// `name`: precisely one value.
    Required,
    /// `[name]`: zero or one value.
    Optional,
    /// `name...`: a run of values.
    Vararg,
}

/// The kind of value an option takes, inferred from its placeholder word.
///
/// `NUM`, `DATE` and `TIME` are coerced; any other placeholder keeps the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Any other placeholder (ex: `ARG`, `FILE`).
    Plain,
    /// `NUM`: a signed integer.
    Integer,
    /// `DATE`: a calendar date such as `1983-09-12`.
    Date,
    /// `TIME`: a time of day such as `14:41` or `14:41:05`.
    Time,
}

impl ValueKind {
    pub(crate) fn from_placeholder(placeholder: &str) -> Self {
        match placeholder {
            INTEGER_PLACEHOLDER => ValueKind::Integer,
            DATE_PLACEHOLDER => ValueKind::Date,
            TIME_PLACEHOLDER => ValueKind::Time,
            _ => ValueKind::Plain,
        }
    }

    /// Describe the expected input, as shown to the user when coercion fails.
    pub fn description(&self) -> &'static str {
        match self {
            ValueKind::Plain => "a value",
            ValueKind::Integer => "an integer value",
            ValueKind::Date => "a date (e.g. YYYY-MM-DD)",
            ValueKind::Time => "a timestamp (e.g. HH:MM:SS)",
        }
    }

    pub(crate) fn coerce(&self, raw: &str) -> Option<Value> {
        match self {
            ValueKind::Plain => Some(Value::Text(raw.to_string())),
            ValueKind::Integer => raw.parse::<i64>().ok().map(Value::Integer),
            ValueKind::Date => DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .map(Value::Date),
            ValueKind::Time => TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
                .map(Value::Time),
        }
    }
}

/// A value bound to an argument name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An uncoerced string: positional values, plain options and defaults.
    Text(String),
    /// The value of a `NUM` option.
    Integer(i64),
    /// The value of a `DATE` option.
    Date(NaiveDate),
    /// The value of a `TIME` option.
    Time(NaiveTime),
    /// The values captured by a vararg positional.
    List(Vec<String>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{text}"),
            Value::Integer(integer) => write!(f, "{integer}"),
            Value::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Value::Time(time) => write!(f, "{}", time.format("%H:%M:%S")),
            Value::List(items) => write!(f, "{}", items.join(" ")),
        }
    }
}

/// The result of matching an argument list against a [`Usage`](crate::Usage).
///
/// `options` records which options were present on the command line.
/// `arguments` maps canonical names to values: positionals, option values and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    options: HashMap<String, bool>,
    arguments: HashMap<String, Value>,
}

impl Matches {
    pub(crate) fn seeded(defaults: &HashMap<String, String>) -> Self {
        Self {
            options: HashMap::default(),
            arguments: defaults
                .iter()
                .map(|(name, value)| (name.clone(), Value::Text(value.clone())))
                .collect(),
        }
    }

    pub(crate) fn mark(&mut self, name: impl Into<String>) {
        self.options.insert(name.into(), true);
    }

    pub(crate) fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.arguments.insert(name.into(), value);
    }

    /// Whether the option with this canonical name was present.
    pub fn include(&self, name: &str) -> bool {
        self.options.get(name).copied().unwrap_or(false)
    }

    /// The option presence flags, by canonical name.
    pub fn options(&self) -> &HashMap<String, bool> {
        &self.options
    }

    /// The bound values, by canonical name.
    pub fn arguments(&self) -> &HashMap<String, Value> {
        &self.arguments
    }

    /// The value bound to this canonical name, if any.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// The value bound to this name, when it is an uncoerced string.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.arguments.get(name) {
            Some(Value::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The value bound to this name, when it is an integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.arguments.get(name) {
            Some(Value::Integer(integer)) => Some(*integer),
            _ => None,
        }
    }

    /// The value bound to this name, when it is a date.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.arguments.get(name) {
            Some(Value::Date(date)) => Some(*date),
            _ => None,
        }
    }

    /// The value bound to this name, when it is a time of day.
    pub fn time(&self, name: &str) -> Option<NaiveTime> {
        match self.arguments.get(name) {
            Some(Value::Time(time)) => Some(*time),
            _ => None,
        }
    }

    /// The values bound to this name, when it is a vararg positional.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.arguments.get(name) {
            Some(Value::List(items)) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// The number of positional values a usage line accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    Range(usize, usize),
    Lower(usize),
}

impl From<Arity> for Bound {
    fn from(value: Arity) -> Self {
        match value {
            Arity::Required => Bound::Range(1, 1),
            Arity::Optional => Bound::Range(0, 1),
            Arity::Vararg => Bound::Lower(1),
        }
    }
}

impl Bound {
    pub(crate) fn lower(&self) -> usize {
        match self {
            Bound::Range(lower, _) | Bound::Lower(lower) => *lower,
        }
    }

    pub(crate) fn combine(self, other: Bound) -> Bound {
        match (self, other) {
            (Bound::Range(i, j), Bound::Range(k, l)) => Bound::Range(i + k, j + l),
            (Bound::Range(i, _), Bound::Lower(k))
            | (Bound::Lower(i), Bound::Range(k, _))
            | (Bound::Lower(i), Bound::Lower(k)) => Bound::Lower(i + k),
        }
    }
}
