use std::any::type_name;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{Matches, Value};

/// Errors converting matched values to program types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// No value is bound to the name.
    #[error("Missing argument '{name}'")]
    Missing {
        /// The canonical name.
        name: String,
    },

    /// The value does not parse as the requested type.
    #[error("Cannot convert '{value}' for '{name}' to {type_name}")]
    InvalidConversion {
        /// The canonical name.
        name: String,
        /// The value, in its display form.
        value: String,
        /// The requested type.
        type_name: &'static str,
    },
}

/// Behaviour to build a program type from [`Matches`].
///
/// Usually derived with `#[derive(FromMatches)]`:
/// * `bool` fields take the presence of the option with the same name.
/// * `Option<T>` fields take the value, if any.
/// * `Vec<T>` fields take every item of a vararg argument.
/// * other fields require a value.
pub trait FromMatches: Sized {
    /// Build `Self`, converting each value via [`FromStr`].
    fn from_matches(matches: &Matches) -> Result<Self, ExtractError>;
}

impl Matches {
    /// Convert the value bound to `name`, if any.
    ///
    /// The value is converted from its display form, so a `NUM` option extracts to any integer type.
    pub fn extract<T: FromStr>(&self, name: &str) -> Result<Option<T>, ExtractError> {
        match self.argument(name) {
            Some(value) => convert(name, &value.to_string()).map(Some),
            None => Ok(None),
        }
    }

    /// Convert the value bound to `name`, which must be present.
    pub fn require<T: FromStr>(&self, name: &str) -> Result<T, ExtractError> {
        self.extract(name)?.ok_or_else(|| ExtractError::Missing {
            name: name.to_string(),
        })
    }

    /// Convert every item bound to `name`.
    ///
    /// A single value extracts as one item, and an unbound name as none.
    pub fn extract_all<T: FromStr>(&self, name: &str) -> Result<Vec<T>, ExtractError> {
        match self.argument(name) {
            Some(Value::List(items)) => items.iter().map(|item| convert(name, item)).collect(),
            Some(value) => Ok(vec![convert(name, &value.to_string())?]),
            None => Ok(Vec::default()),
        }
    }
}

fn convert<T: FromStr>(name: &str, value: &str) -> Result<T, ExtractError> {
    T::from_str(value).map_err(|_| ExtractError::InvalidConversion {
        name: name.to_string(),
        value: value.to_string(),
        type_name: type_name::<T>(),
    })
}
