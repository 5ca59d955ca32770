//! Traits which, typically, may be imported without concern: `use byexample::prelude::*`.

// Needs to be imported in order to implement a custom `FromMatches`.
pub use crate::extract::FromMatches;
// Needs to be imported in order to implement a custom `UserInterface`.
pub use crate::parser::UserInterface;
