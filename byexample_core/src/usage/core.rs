use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::constant::*;
use crate::model::{Arity, Bound, ValueKind};
use crate::usage::lexer::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Errors in the usage text itself.
#[derive(Debug, Error)]
pub enum UsageError {
    /// No line contains the `Usage:` marker.
    #[error("Expected usage string, got none")]
    MissingUsageLine,

    /// The `Usage:` marker is not followed by a program name.
    #[error("Expected program name after 'Usage:', got none")]
    MissingProgramName,

    /// A usage line token is neither an option, an argument nor an ellipsis.
    #[error("Found invalid usage token '{0}'")]
    InvalidToken(String),

    /// More than one `name...` argument.
    #[error("Found more than one dotted arguments")]
    MultipleVarargs,

    /// Both `[name]` and `name...` arguments, so trailing values cannot be attributed.
    #[error("Found both optional and dotted arguments, cannot tell them apart")]
    AmbiguousArity,

    /// The usage text could not be read.
    #[error("Cannot read usage text: {0}")]
    Io(#[from] std::io::Error),
}

/// A positional argument declared on the usage line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentConfig {
    name: String,
    arity: Arity,
}

impl ArgumentConfig {
    pub(crate) fn new(name: impl Into<String>, arity: Arity) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    /// The canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cardinality.
    pub fn arity(&self) -> Arity {
        self.arity
    }
}

/// An option declared inline on the usage line or on an option line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionConfig {
    name: String,
    short: Option<char>,
    long: Option<String>,
    placeholder: Option<String>,
}

impl OptionConfig {
    pub(crate) fn new(
        short: Option<char>,
        long: Option<impl Into<String>>,
        placeholder: Option<impl Into<String>>,
    ) -> Self {
        let long = long.map(Into::into);
        let name = match (&long, short) {
            (Some(long), _) => sanitize(long),
            (None, Some(short)) => sanitize(&short.to_string()),
            (None, None) => unreachable!("internal error - an option must have a flag"),
        };

        Self {
            name,
            short,
            long,
            placeholder: placeholder.map(Into::into),
        }
    }

    /// The canonical name, derived from the last flag of the declaration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short form, without its dash (ex: `'v'` for `-v`).
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The long form, without its dashes (ex: `"verbose"` for `--verbose`).
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// The value placeholder (ex: `"NUM"`), or `None` for a boolean flag.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The kind of value this option takes, or `None` for a boolean flag.
    pub fn kind(&self) -> Option<ValueKind> {
        self.placeholder
            .as_deref()
            .map(ValueKind::from_placeholder)
    }

    /// Give up the flags that `other` also declares, keeping the canonical name.
    fn release(&mut self, other: &OptionConfig) {
        if self.short.is_some() && self.short == other.short {
            self.short = None;
        }

        if self.long.is_some() && self.long == other.long {
            self.long = None;
        }
    }

    /// Every flag token that selects this option (ex: `["-v", "--verbose"]`).
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::default();

        if let Some(short) = self.short {
            flags.push(format!("-{short}"));
        }

        if let Some(long) = &self.long {
            flags.push(format!("--{long}"));
        }

        flags
    }
}

/// The grammar of a command line, derived from its usage text.
///
/// Built once via [`Usage::parse`]; immutable afterwards.
///
/// Without a vararg, positional values fill the required arguments from the end of the list,
/// then the optional arguments from the front of what remains.
/// Declare optional arguments before required ones (`[mode] host port`) for the values to bind in the order given:
/// `host [port]` matched against `a b` binds `host` to `b` and `port` to `a`.
///
/// ### Example
/// ```
/// # use byexample_core::Usage;
/// let usage = Usage::parse(
///     "Usage: connect [options] [mode] host port
///
///      Options:
///        -s, --secure        Use a secure connection
///        -r, --retries NUM   Number of retries (default 3)",
/// )
/// .unwrap();
///
/// assert_eq!(usage.program(), "connect");
/// assert_eq!(usage.required_count(), 2);
/// assert_eq!(usage.option("-r").unwrap().name(), "retries");
/// assert_eq!(usage.default_value("retries"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    program: String,
    message: String,
    arguments: Vec<ArgumentConfig>,
    options: Vec<OptionConfig>,
    flags: HashMap<String, usize>,
    defaults: HashMap<String, String>,
}

impl Usage {
    /// Parse a usage text.
    /// A `$0` program name is replaced by the name of the running executable.
    pub fn parse(text: &str) -> Result<Self, UsageError> {
        Self::parse_inner(executable_name().as_deref(), text)
    }

    /// Parse a usage text, replacing a `$0` program name with `program`.
    pub fn parse_as(program: &str, text: &str) -> Result<Self, UsageError> {
        Self::parse_inner(Some(program), text)
    }

    /// Read the whole usage text from `reader`, then parse it.
    pub fn read(mut reader: impl Read) -> Result<Self, UsageError> {
        let mut text = String::default();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    fn parse_inner(program: Option<&str>, text: &str) -> Result<Self, UsageError> {
        let usage_line = text
            .lines()
            .find_map(|line| {
                line.find(USAGE_MARKER)
                    .map(|marker| &line[marker + USAGE_MARKER.len()..])
            })
            .ok_or(UsageError::MissingUsageLine)?;
        let tokens = usage_tokens(usage_line);
        let (program_token, tokens) = tokens
            .split_first()
            .ok_or(UsageError::MissingProgramName)?;
        let tokens = match tokens.split_first() {
            Some((&OPTIONS_PLACEHOLDER, rest)) => rest,
            _ => tokens,
        };

        let (arguments, inline_options) = classify(tokens)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Usage arguments: {arguments:?}, inline options: {inline_options:?}.");
        }

        let mut options: Vec<OptionConfig> = Vec::default();
        let mut defaults = HashMap::default();
        let declarations = inline_options.into_iter().chain(
            text.lines()
                .filter(|line| is_declaration_line(line))
                .filter_map(declaration),
        );

        for Declaration {
            short,
            long,
            placeholder,
            default,
        } in declarations
        {
            let option_config = OptionConfig::new(short, long, placeholder);

            if let Some(value) = default {
                defaults.insert(option_config.name().to_string(), value.to_string());
            }

            // A flag declared again belongs to its latest declaration only.
            for earlier in options.iter_mut() {
                earlier.release(&option_config);
            }
            options.retain(|earlier| earlier.short.is_some() || earlier.long.is_some());
            options.push(option_config);
        }

        let flags = options
            .iter()
            .enumerate()
            .flat_map(|(index, option_config)| {
                option_config
                    .flags()
                    .into_iter()
                    .map(move |flag| (flag, index))
            })
            .collect();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Usage options: {options:?}, defaults: {defaults:?}.");
        }

        let program = match program {
            Some(program) if *program_token == PROGRAM_PLACEHOLDER => program.to_string(),
            _ => program_token.to_string(),
        };

        Ok(Self {
            message: render_message(text, &program),
            program,
            arguments,
            options,
            flags,
            defaults,
        })
    }

    /// The program name (with `$0` already replaced).
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The usage text, as shown for `-h` / `--help`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The positional arguments, in declared order.
    pub fn arguments(&self) -> &[ArgumentConfig] {
        &self.arguments
    }

    /// The option declarations, in declared order.
    pub fn options(&self) -> &[OptionConfig] {
        &self.options
    }

    /// Look up an option by any of its flags (ex: `"-v"` or `"--verbose"`).
    pub fn option(&self, flag: &str) -> Option<&OptionConfig> {
        self.flags.get(flag).map(|index| &self.options[*index])
    }

    /// The declared default values, by canonical option name.
    pub fn defaults(&self) -> &HashMap<String, String> {
        &self.defaults
    }

    /// The declared default value of an option, by canonical name.
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    /// The number of required positional arguments.
    pub fn required_count(&self) -> usize {
        self.count(Arity::Required)
    }

    /// The number of optional positional arguments.
    pub fn optional_count(&self) -> usize {
        self.count(Arity::Optional)
    }

    /// Whether a vararg positional argument is declared.
    pub fn has_vararg(&self) -> bool {
        self.count(Arity::Vararg) > 0
    }

    fn count(&self, arity: Arity) -> usize {
        self.arguments
            .iter()
            .filter(|argument| argument.arity() == arity)
            .count()
    }

    pub(crate) fn bound(&self) -> Bound {
        self.arguments
            .iter()
            .map(|argument| Bound::from(argument.arity()))
            .fold(Bound::Range(0, 0), Bound::combine)
    }
}

/// Classify the usage line tokens after the program name into positional arguments and inline option declarations.
fn classify<'a>(
    tokens: &[&'a str],
) -> Result<(Vec<ArgumentConfig>, Vec<Declaration<'a>>), UsageError> {
    let mut arguments: Vec<ArgumentConfig> = Vec::default();
    let mut inline_options = Vec::default();
    let mut token_iter = tokens.iter().peekable();

    while let Some(token) = token_iter.next() {
        if let Some(inner) = token
            .strip_prefix('[')
            .and_then(|token| token.strip_suffix(']'))
        {
            if inner.starts_with('-') {
                let declaration =
                    declaration(inner).ok_or_else(|| UsageError::InvalidToken(token.to_string()))?;
                inline_options.push(declaration);
            } else if is_name(inner) {
                arguments.push(ArgumentConfig::new(sanitize(inner), Arity::Optional));
            } else {
                return Err(UsageError::InvalidToken(token.to_string()));
            }
        } else if let Some(name) = token.strip_suffix(ELLIPSIS).filter(|name| is_name(name)) {
            push_vararg(&mut arguments, name)?;
        } else if is_name(token) {
            if token_iter.peek() == Some(&&ELLIPSIS) {
                token_iter.next();
                push_vararg(&mut arguments, token)?;
            } else {
                arguments.push(ArgumentConfig::new(sanitize(token), Arity::Required));
            }
        } else {
            return Err(UsageError::InvalidToken(token.to_string()));
        }
    }

    let has = |arity: Arity| arguments.iter().any(|a: &ArgumentConfig| a.arity() == arity);

    if has(Arity::Optional) && has(Arity::Vararg) {
        return Err(UsageError::AmbiguousArity);
    }

    Ok((arguments, inline_options))
}

fn push_vararg(arguments: &mut Vec<ArgumentConfig>, name: &str) -> Result<(), UsageError> {
    if arguments
        .iter()
        .any(|argument| argument.arity() == Arity::Vararg)
    {
        return Err(UsageError::MultipleVarargs);
    }

    arguments.push(ArgumentConfig::new(sanitize(name), Arity::Vararg));
    Ok(())
}

/// Replace `$0` with the program name and trim the trailing blank lines.
fn render_message(text: &str, program: &str) -> String {
    text.replace(PROGRAM_PLACEHOLDER, program)
        .trim_end()
        .to_string()
}

fn executable_name() -> Option<String> {
    std::env::args_os().next().and_then(|argument| {
        Path::new(&argument)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CONNECT: &str = r#"
        Establishes network connection to designated host and port, enabling
        users to assess network connectivity and diagnose potential issues.

        Usage: connect [options] [mode] host port

        Options:
          -s, --secure        Establish a secure connection (SSL/TSL)
          -v, --verbose       Enable verbose output for detailed information
          -r, --retries NUM   Number of connection retries (default 3)
          -t, --timeout NUM   Set connection timeout in seconds

        Arguments:
          [mode]              Optional connection mode (active or passive)
          host                The target host to connect to (e.g., example.com)
          port                The target port to connect to (e.g., 80)
    "#;

    fn arity_of(usage: &Usage) -> Vec<(&str, Arity)> {
        usage
            .arguments()
            .iter()
            .map(|argument| (argument.name(), argument.arity()))
            .collect()
    }

    #[test]
    fn parse_minimal() {
        // Execute
        let usage = Usage::parse("Usage: command").unwrap();

        // Verify
        assert_eq!(usage.program(), "command");
        assert!(usage.arguments().is_empty());
        assert!(usage.options().is_empty());
        assert!(usage.defaults().is_empty());
        assert_eq!(usage.bound(), Bound::Range(0, 0));
    }

    #[test]
    fn parse_connect() {
        // Execute
        let usage = Usage::parse(CONNECT).unwrap();

        // Verify
        assert_eq!(usage.program(), "connect");
        assert_eq!(
            arity_of(&usage),
            vec![
                ("mode", Arity::Optional),
                ("host", Arity::Required),
                ("port", Arity::Required),
            ]
        );

        for flag in [
            "-s",
            "--secure",
            "-v",
            "--verbose",
            "-r",
            "--retries",
            "-t",
            "--timeout",
        ] {
            assert!(usage.option(flag).is_some(), "missing {flag}");
        }

        assert_eq!(usage.option("-r"), usage.option("--retries"));
        let retries = usage.option("-r").unwrap();
        assert_eq!(retries.name(), "retries");
        assert_eq!(retries.placeholder(), Some("NUM"));
        assert_eq!(retries.kind(), Some(ValueKind::Integer));
        assert_eq!(usage.option("--secure").unwrap().kind(), None);
        assert_eq!(usage.option("-x"), None);
        assert_eq!(
            usage.defaults(),
            &HashMap::from([("retries".to_string(), "3".to_string())])
        );
        assert_eq!(usage.required_count(), 2);
        assert_eq!(usage.optional_count(), 1);
        assert!(!usage.has_vararg());
        assert_eq!(usage.bound(), Bound::Range(2, 3));
    }

    #[test]
    fn parse_idempotent() {
        assert_eq!(
            Usage::parse_as("connect", CONNECT).unwrap(),
            Usage::parse_as("connect", CONNECT).unwrap()
        );
    }

    #[test]
    fn parse_inline_options() {
        // Execute
        let usage = Usage::parse_as("demo", "Usage: $0 [--foo] [--bar ARG] [-n NUM]").unwrap();

        // Verify
        assert_eq!(usage.program(), "demo");
        assert!(usage.arguments().is_empty());
        assert_eq!(usage.option("--foo").unwrap().kind(), None);
        assert_eq!(usage.option("--bar").unwrap().placeholder(), Some("ARG"));
        assert_eq!(usage.option("-n").unwrap().name(), "n");
        assert_eq!(
            usage.option("-n").unwrap().kind(),
            Some(ValueKind::Integer)
        );
    }

    #[test]
    fn parse_inline_and_listed_options() {
        // Execute
        let usage = Usage::parse(
            "Usage: tool [--dry-run] file

             Options:
               --enable-feature NAME   Enable a feature by name",
        )
        .unwrap();

        // Verify
        assert_eq!(usage.option("--dry-run").unwrap().name(), "dry_run");
        let feature = usage.option("--enable-feature").unwrap();
        assert_eq!(feature.name(), "enable_feature");
        assert_eq!(feature.kind(), Some(ValueKind::Plain));
        assert_eq!(usage.options().len(), 2);
    }

    #[test]
    fn parse_redeclared_option() {
        // Execute
        let usage = Usage::parse(
            "Usage: backup [-n NUM] dest

             Options:
               -n, --keep NUM   Old backups to keep (default 2)",
        )
        .unwrap();

        // Verify
        assert_eq!(usage.options().len(), 1);
        assert_eq!(usage.option("-n"), usage.option("--keep"));
        assert_eq!(usage.option("-n").unwrap().name(), "keep");
        assert_eq!(usage.default_value("keep"), Some("2"));
    }

    #[test]
    fn parse_partially_redeclared_option() {
        // Execute
        let usage = Usage::parse(
            "Usage: tool [options]

             Options:
               -v, --verbose   Print more
               -v, --version   Print the version",
        )
        .unwrap();

        // Verify
        assert_eq!(usage.options().len(), 2);
        assert_eq!(usage.option("--verbose").unwrap().name(), "verbose");
        assert_eq!(usage.option("--verbose").unwrap().flags(), vec!["--verbose"]);
        assert_eq!(usage.option("-v").unwrap().name(), "version");
        assert_eq!(usage.option("-v"), usage.option("--version"));

        let matches = match crate::match_tokens(&usage, &["--verbose"]) {
            Ok(crate::Action::Complete(matches)) => matches,
            other => panic!("expected a complete match, got {other:?}"),
        };
        assert!(matches.include("verbose"));
        assert!(!matches.include("version"));
    }

    #[test]
    fn parse_redeclared_across_entries() {
        // Execute
        let usage = Usage::parse(
            "Usage: tool [-q] [--color ARG]

             Options:
               -q, --color ARG   Quiet, with colour",
        )
        .unwrap();

        // Verify
        assert_eq!(usage.options().len(), 1);
        assert_eq!(usage.option("-q").unwrap().name(), "color");
        assert_eq!(usage.option("-q"), usage.option("--color"));
        assert_eq!(usage.option("--color").unwrap().placeholder(), Some("ARG"));
    }

    #[test]
    fn parse_program_placeholder() {
        // Execute
        let usage = Usage::parse_as("copier", "Usage: $0 source dest\n\n\n").unwrap();

        // Verify
        assert_eq!(usage.program(), "copier");
        assert_eq!(usage.message(), "Usage: copier source dest");
    }

    #[rstest]
    #[case("Usage: upload file type tags...", vec![("file", Arity::Required), ("type", Arity::Required), ("tags", Arity::Vararg)])]
    #[case("Usage: filter logs... from until", vec![("logs", Arity::Vararg), ("from", Arity::Required), ("until", Arity::Required)])]
    #[case("Usage: convert input files... format", vec![("input", Arity::Required), ("files", Arity::Vararg), ("format", Arity::Required)])]
    #[case("Usage: copy source ... dest", vec![("source", Arity::Vararg), ("dest", Arity::Required)])]
    #[case("Usage: print items...", vec![("items", Arity::Vararg)])]
    #[case("Usage: move Source-File [Target-Dir]", vec![("source_file", Arity::Required), ("target_dir", Arity::Optional)])]
    fn parse_arguments(#[case] text: &str, #[case] expected: Vec<(&str, Arity)>) {
        let usage = Usage::parse(text).unwrap();
        assert_eq!(arity_of(&usage), expected);
    }

    #[test]
    fn parse_vararg_bound() {
        let usage = Usage::parse("Usage: convert input files... format").unwrap();
        assert!(usage.has_vararg());
        assert_eq!(usage.bound(), Bound::Lower(3));
    }

    #[test]
    fn parse_missing_usage() {
        let error = Usage::parse("Options:\n  -v, --verbose").unwrap_err();
        assert_matches!(error, UsageError::MissingUsageLine);
        assert_eq!(error.to_string(), "Expected usage string, got none");
    }

    #[test]
    fn parse_missing_program() {
        let error = Usage::parse("Usage:   ").unwrap_err();
        assert_matches!(error, UsageError::MissingProgramName);
    }

    #[rstest]
    #[case("Usage: command arg ^^^ arg", "^^^")]
    #[case("Usage: command ... arg", "...")]
    #[case("Usage: command [^^^]", "[^^^]")]
    #[case("Usage: command [-]", "[-]")]
    #[case("Usage: command [open", "[open")]
    fn parse_invalid_token(#[case] text: &str, #[case] token: &str) {
        let error = Usage::parse(text).unwrap_err();
        assert_eq!(error.to_string(), format!("Found invalid usage token '{token}'"));
        assert_matches!(error, UsageError::InvalidToken(t) if t == token);
    }

    #[rstest]
    #[case("Usage: merge sources... files...")]
    #[case("Usage: merge sources ... files...")]
    fn parse_multiple_varargs(#[case] text: &str) {
        let error = Usage::parse(text).unwrap_err();
        assert_eq!(error.to_string(), "Found more than one dotted arguments");
        assert_matches!(error, UsageError::MultipleVarargs);
    }

    #[rstest]
    #[case("Usage: merge [target] sources...")]
    #[case("Usage: merge sources... [target]")]
    fn parse_ambiguous(#[case] text: &str) {
        assert_matches!(Usage::parse(text), Err(UsageError::AmbiguousArity));
    }

    #[test]
    fn read() {
        // Setup
        let reader = std::io::Cursor::new(CONNECT.as_bytes());

        // Execute
        let usage = Usage::read(reader).unwrap();

        // Verify
        assert_eq!(usage.program(), "connect");
        assert_eq!(usage.options().len(), 4);
    }

    #[test]
    fn option_flags() {
        assert_eq!(
            OptionConfig::new(Some('v'), Some("verbose"), None::<String>).flags(),
            vec!["-v".to_string(), "--verbose".to_string()]
        );
        assert_eq!(
            OptionConfig::new(Some('n'), None::<String>, Some("NUM")).name(),
            "n"
        );
    }

    #[test]
    fn usage_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Usage>();
    }
}
