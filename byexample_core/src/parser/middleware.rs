use std::env;
use std::io::Read;

use crate::constant::ERROR_PREFIX;
use crate::extract::FromMatches;
use crate::matcher::{match_tokens, Action, ParseError};
use crate::model::Matches;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::ErrorContext;
use crate::usage::{Usage, UsageError};

/// The command line parser, configured by example.
///
/// Built from the usage text of the program (the message printed for `--help`).
/// Prints the usage message on `-h` / `--help`, and a diagnostic when the arguments do not fit the usage.
///
/// ### Example
/// ```
/// # use byexample_core::CommandLine;
/// let command_line = CommandLine::new(
///     "Usage: connect [options] host port
///
///      Options:
///        -s, --secure        Use a secure connection
///        -r, --retries NUM   Number of retries (default 3)",
/// )
/// .unwrap();
///
/// let matches = command_line
///     .parse_tokens(&["--secure", "example.com", "443"])
///     .unwrap();
/// assert!(matches.include("secure"));
/// assert_eq!(matches.text("host"), Some("example.com"));
/// assert_eq!(matches.text("retries"), Some("3"));
/// ```
pub struct CommandLine {
    usage: Usage,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLine")
            .field("usage", &self.usage)
            .finish()
    }
}

impl CommandLine {
    /// Build from a usage text, printing to the console.
    /// A `$0` program name is replaced by the name of the running executable.
    pub fn new(text: &str) -> Result<Self, UsageError> {
        Ok(Self::with_interface(
            Usage::parse(text)?,
            Box::new(ConsoleInterface::default()),
        ))
    }

    /// Build from a usage text, printing to the console.
    /// A `$0` program name is replaced by `program`.
    pub fn with_program(program: &str, text: &str) -> Result<Self, UsageError> {
        Ok(Self::with_interface(
            Usage::parse_as(program, text)?,
            Box::new(ConsoleInterface::default()),
        ))
    }

    /// Build from a usage text read in full from `reader`, printing to the console.
    pub fn read(reader: impl Read) -> Result<Self, UsageError> {
        Ok(Self::with_interface(
            Usage::read(reader)?,
            Box::new(ConsoleInterface::default()),
        ))
    }

    /// Build from a usage text, printing to the console.
    ///
    /// If the usage text is invalid, prints the error and exits with error code `1` (via `std::process::exit`).
    pub fn build(text: &str) -> Self {
        match Self::new(text) {
            Ok(command_line) => command_line,
            Err(error) => {
                eprintln!("{ERROR_PREFIX}{error}");
                std::process::exit(1);
            }
        }
    }

    /// Build from a parsed usage, printing to the provided user interface.
    pub fn with_interface(usage: Usage, user_interface: Box<dyn UserInterface>) -> Self {
        Self {
            usage,
            user_interface,
        }
    }

    /// The usage this command line parses against.
    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Match the input tokens without printing anything.
    ///
    /// On failure, the error is paired with the index of the offending token.
    pub fn try_parse_tokens(&self, tokens: &[&str]) -> Result<Action, (usize, ParseError)> {
        match_tokens(&self.usage, tokens)
    }

    /// Run the command line parser against the input tokens.
    ///
    /// If the tokens do not fit the usage, the parser displays the error and returns with `Err(1)`.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser displays the usage message and returns with `Err(0)`.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Matches, i32> {
        invoke(&self.usage, tokens, &*self.user_interface)
    }

    /// Run the command line parser against the input tokens, then extract `T` from the matches.
    ///
    /// Behaves like [`CommandLine::parse_tokens`]; an extraction failure is displayed and returns with `Err(1)`.
    pub fn parse_tokens_into<T: FromMatches>(&self, tokens: &[&str]) -> Result<T, i32> {
        let matches = self.parse_tokens(tokens)?;

        T::from_matches(&matches).map_err(|error| {
            self.user_interface.print_error(&error);
            1
        })
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// If the arguments do not fit the usage, the parser displays the error and exits with error code `1` (via `std::process::exit`).
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser displays the usage message and exits with error code `0`.
    pub fn parse(&self) -> Matches {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(matches) => matches,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }

    /// Run the command line parser against the Cli [`env::args`], then extract `T` from the matches.
    ///
    /// Exits like [`CommandLine::parse`]; an extraction failure is displayed and exits with error code `1`.
    pub fn parse_into<T: FromMatches>(&self) -> T {
        let matches = self.parse();

        match T::from_matches(&matches) {
            Ok(target) => target,
            Err(error) => {
                self.user_interface.print_error(&error);
                std::process::exit(1);
            }
        }
    }
}

fn invoke(
    usage: &Usage,
    tokens: &[&str],
    user_interface: &(impl UserInterface + ?Sized),
) -> Result<Matches, i32> {
    match match_tokens(usage, tokens) {
        Ok(Action::Complete(matches)) => Ok(matches),
        Ok(Action::ShowUsage(message)) => {
            user_interface.print(message);
            Err(0)
        }
        Err((offset, parse_error)) => {
            user_interface.print_error(&parse_error);
            user_interface.print_error_context(ErrorContext::new(offset, tokens));
            Err(1)
        }
    }
}
