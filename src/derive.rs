//! Derive Api for `byexample` extraction.
//!
//! ### Getting Started
//! Instrument a struct `S` with `#[derive(FromMatches)]`.
//! This generates an implementation of [`FromMatches`](crate::FromMatches), so that `S` may be built from [`Matches`](crate::Matches)
//! (or directly via [`CommandLine::parse_into`](crate::CommandLine::parse_into)).
//!
//! ```no_run
#![doc = include_str!("../demos/backup.rs")]
//! ```
//!
//! ### Field Mapping
//! Each field reads the argument with the same name as the field (a raw identifier such as `r#type` reads `type`).
//! Override the name with `#[byexample(name = "..")]`.
//!
//! | Field type  | Reads                                                  |
//! |-------------|--------------------------------------------------------|
//! | `bool`      | whether the option was present                         |
//! | `Option<T>` | the value, or `None` when absent                       |
//! | `Vec<T>`    | every item of a vararg argument                        |
//! | `T`         | the value, failing with `ExtractError::Missing` if absent |
//!
//! Values convert via [`std::str::FromStr`], so `T` may be any type implementing it.
pub use byexample_derive::*;
