//! `byexample` is a command line parser configured by example.
//!
//! Most programs document their command line in a usage message, and then describe the same thing again to a parser.
//! `byexample` skips the second step: the usage message *is* the configuration.
//! Write the text you would print for `--help`, and `byexample` derives the grammar from it:
//! * *Positional arguments*:
//! `name` is required, `[name]` is optional, and `name...` collects a run of values.
//! * *Options*:
//! `[-v]` / `[--since DATE]` on the usage line, or lines such as `-r, --retries NUM  Number of retries (default 3)` in an `Options:` block.
//! A trailing `(default ..)` provides the value when the option is absent.
//! * *Typed values*:
//! the placeholders `NUM`, `DATE` and `TIME` are checked and converted while parsing.
//! Any other placeholder keeps the raw string.
//! * *Help*:
//! `-h` / `--help` always print the usage message verbatim (with `$0` replaced by the program name).
//!
//! Short flags may be combined (`-sv` is `-s -v`), and when a `-n NUM` option is declared `-15` is shorthand for `-n 15`.
//!
//! # Usage
//! This page includes a few demos on using `byexample.`
//! More examples are outlined in [the source](https://github.com/sawatzkylindsey/byexample/tree/main/demos).
//!
//! ```no_run
#![doc = include_str!("../demos/connect.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ connect -h
//! Usage: connect [options] host port
//!
//! Open a connection to host.
//!
//! Options:
//!   -s, --secure        Use a secure connection
//!   -r, --retries NUM   Number of retries (default 3)
//!   -t, --timeout ARG   Seconds to wait for each attempt
//!
//! $ connect -s example.com 443
//! Connecting to https://example.com:443 with 3 retries.
//!
//! $ connect --retries many example.com 80
//! ERROR: Invalid argument "many" for option '--retries', please provide an integer value
//! --retries many example.com 80
//!           ^
//! ```
//!
//! # Typed extraction
//! Rather than reading [`Matches`] by name, derive [`FromMatches`] on a struct (see the [derive module](./derive/index.html)):
//! ```no_run
#![doc = include_str!("../demos/connect_derived.rs")]
//! ```
//!
//! Each field reads the argument of the same name (or `#[byexample(name = "..")]`), converting via [`std::str::FromStr`].
//!
//! # Errors
//! There are two classes of errors:
//! * [`UsageError`]: the usage text itself is malformed (ex: it has no `Usage:` line).
//! This is a programming error; [`CommandLine::build`] reports it and exits.
//! * [`ParseError`]: the arguments do not fit the usage.
//! [`CommandLine::parse`] prints the error along with a caret pointing at the token at fault, then exits with code `1`.
//!
//! Use [`CommandLine::try_parse_tokens`] to handle these programmatically instead.
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events while parsing the usage text and the arguments.
//! * `unit_test`: expose the `testing` module of user interfaces, which record output instead of printing it.
pub mod derive;

pub use byexample_core::*;
