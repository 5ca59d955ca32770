//! Core module for `byexample`.
//! See [documentation root](https://docs.rs/byexample/latest/byexample/index.html) for full details.
#![deny(missing_docs)]
mod constant;
mod extract;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;
mod usage;

pub use extract::*;
pub use matcher::{match_tokens, Action, ParseError};
pub use model::{Arity, Matches, Value, ValueKind};
pub use parser::{CommandLine, ConsoleInterface, ErrorContext, UserInterface};
pub use usage::*;

/// *Available using 'unit_test' crate feature only.*</br></br>
/// User interfaces that record their output, for testing a [`CommandLine`].
#[cfg(feature = "unit_test")]
pub mod testing {
    pub use crate::parser::util::*;
}

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
