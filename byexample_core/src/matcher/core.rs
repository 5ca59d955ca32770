use std::collections::VecDeque;
use thiserror::Error;

use crate::constant::*;
use crate::matcher::model::*;
use crate::model::{Arity, Matches, Value, ValueKind};
use crate::usage::Usage;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Errors in the argument list, found while matching it against a [`Usage`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A positional value appears before an option.
    #[error("Unexpected arguments found before option '{0}', please provide all options before arguments")]
    UnexpectedArgumentsBeforeOption(String),

    /// A letter of a combined shorthand group (ex: `-svt`) is not a declared short flag.
    #[error("Found unknown option -{letter} inside '{group}'{}", suggestion_phrase(.suggestion))]
    UnknownShorthandInGroup {
        /// The first unknown letter.
        letter: char,
        /// The whole group, as given.
        group: String,
        /// The long flag spelled by the group, when declared (ex: `--verbose` for `-verbose`).
        suggestion: Option<String>,
    },

    /// An option that the usage text does not declare.
    #[error("Found unknown option '{0}'")]
    UnknownOption(String),

    /// An option that takes a value is the last token of its chunk.
    #[error("Expected argument for option '{0}', got none")]
    MissingOptionValue(String),

    /// An option value cannot be coerced to the option's value kind.
    #[error("Invalid argument \"{value}\" for option '{option}', please provide {}", describe(.expected))]
    InvalidTypedValue {
        /// The offending value.
        value: String,
        /// The option, as given.
        option: String,
        /// The value kind declared by the option's placeholder.
        expected: ValueKind,
    },

    /// More positional values than the usage line accepts.
    #[error("Expected {} arguments, but received too many", count_range(.min, .max))]
    TooManyArguments {
        /// The number of required values.
        min: usize,
        /// The number of required and optional values.
        max: usize,
    },

    /// Fewer positional values than the usage line requires.
    #[error("Expected {min} required arguments, but received {}{}", received_phrase(.received), hint_phrase(.hint))]
    TooFewArguments {
        /// The number of required values.
        min: usize,
        /// The number of values received.
        received: usize,
        /// The last option that consumed a value, which may have swallowed a positional.
        hint: Option<String>,
    },

    /// The matcher reached a state that it cannot reach on correct input.
    #[error("Internal error: unreachable state ({0})")]
    InternalInconsistency(String),
}

fn suggestion_phrase(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(flag) => format!(", did you mean '{flag}'?"),
        None => String::default(),
    }
}

fn describe(kind: &ValueKind) -> &'static str {
    kind.description()
}

fn count_range(min: &usize, max: &usize) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min}-{max}")
    }
}

fn received_phrase(received: &usize) -> &'static str {
    match received {
        0 => "none",
        1 => "only one",
        _ => "too few",
    }
}

fn hint_phrase(hint: &Option<String>) -> String {
    match hint {
        Some(option) => format!(" (considering {option} takes an argument)"),
        None => String::default(),
    }
}

impl From<CloseError> for ParseError {
    fn from(error: CloseError) -> Self {
        match error {
            CloseError::TooFewValues { provided, expected } => ParseError::TooFewArguments {
                min: expected,
                received: provided,
                hint: None,
            },
            CloseError::TooManyValues { lower, upper, .. } => ParseError::TooManyArguments {
                min: lower,
                max: upper,
            },
        }
    }
}

/// Match an argument list (program name excluded) against the usage.
///
/// The stages run in a fixed order and the first failure wins:
/// 1. Split the tokens into chunks, each led by a token starting with `-`.
/// 2. Stop with [`Action::ShowUsage`], carrying the usage message, when a chunk is led by `-h` or `--help`.
/// 3. Expand combined shorthand groups (`-svt` into `-s -v -t`).
/// 4. Expand numeric shorthand (`-15` into `-n 15`).
/// 5. Reject undeclared options.
/// 6. Resolve option values, coercing them by value kind.
/// 7. Check the number of positional values.
/// 8. Bind the positional values to their names.
///
/// On failure, the error is paired with the index of the offending token (`tokens.len()` when the end of input is at fault).
pub fn match_tokens(usage: &Usage, tokens: &[&str]) -> Result<Action, (usize, ParseError)> {
    let (leading, chunks) = partition(tokens);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Partitioned: leading={leading:?}, chunks={chunks:?}.");
    }

    if chunks
        .iter()
        .any(|chunk| chunk.flag() == HELP_SHORT || chunk.flag() == HELP_LONG)
    {
        return Ok(Action::ShowUsage(usage.message().to_string()));
    }

    let chunks = expand_combined_shorthand(usage, chunks)?;
    let chunks = expand_numeric_shorthand(usage, chunks);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Expanded: chunks={chunks:?}.");
    }

    reject_unknown_options(usage, &chunks)?;

    let mut matches = Matches::seeded(usage.defaults());
    let (remainder, last_valued) = resolve_options(usage, leading, chunks, &mut matches)?;

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Resolved options: remainder={remainder:?}, last_valued={last_valued:?}.");
    }

    let values = validate_arity(usage, remainder, last_valued, tokens.len())?;
    bind_positionals(usage, values, &mut matches)?;

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Matched: {matches:?}.");
    }

    Ok(Action::Complete(matches))
}

fn partition(tokens: &[&str]) -> (VecDeque<OffsetValue>, Vec<Chunk>) {
    let mut leading = VecDeque::default();
    let mut chunks: Vec<Chunk> = Vec::default();

    for (offset, token) in tokens.iter().enumerate() {
        if token.starts_with('-') {
            chunks.push(Chunk::new((offset, token.to_string())));
        } else {
            let value = (offset, token.to_string());

            match chunks.last_mut() {
                Some(chunk) => chunk.values.push_back(value),
                None => leading.push_back(value),
            }
        }
    }

    (leading, chunks)
}

fn expand_combined_shorthand(
    usage: &Usage,
    chunks: Vec<Chunk>,
) -> Result<Vec<Chunk>, (usize, ParseError)> {
    let mut expanded = Vec::default();

    for chunk in chunks {
        let group = match chunk.flag().strip_prefix('-') {
            Some(letters) if letters.len() >= 2 && letters.chars().all(|c| c.is_ascii_alphabetic()) => {
                letters.to_string()
            }
            _ => {
                expanded.push(chunk);
                continue;
            }
        };

        if let Some(letter) = group
            .chars()
            .find(|letter| usage.option(&format!("-{letter}")).is_none())
        {
            let long = format!("-{}", chunk.flag());
            return Err((
                chunk.offset(),
                ParseError::UnknownShorthandInGroup {
                    letter,
                    group: chunk.flag().to_string(),
                    suggestion: usage.option(&long).map(|_| long),
                },
            ));
        }

        let Chunk { option, mut values } = chunk;
        let mut letters = group.chars().peekable();

        while let Some(letter) = letters.next() {
            let mut single = Chunk::new((option.0, format!("-{letter}")));

            // Only the last letter of the group keeps the chunk's values.
            if letters.peek().is_none() {
                single.values = std::mem::take(&mut values);
            }

            expanded.push(single);
        }
    }

    Ok(expanded)
}

fn expand_numeric_shorthand(usage: &Usage, chunks: Vec<Chunk>) -> Vec<Chunk> {
    let takes_value = usage
        .option(NUMERIC_SHORTHAND)
        .map(|option_config| option_config.placeholder().is_some())
        .unwrap_or(false);

    if !takes_value {
        return chunks;
    }

    chunks
        .into_iter()
        .map(|chunk| {
            let digits = match chunk.flag().strip_prefix('-') {
                Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                    digits.to_string()
                }
                _ => return chunk,
            };
            let Chunk { option, mut values } = chunk;
            values.push_front((option.0, digits));
            Chunk {
                option: (option.0, NUMERIC_SHORTHAND.to_string()),
                values,
            }
        })
        .collect()
}

fn reject_unknown_options(usage: &Usage, chunks: &[Chunk]) -> Result<(), (usize, ParseError)> {
    match chunks
        .iter()
        .find(|chunk| usage.option(chunk.flag()).is_none())
    {
        Some(chunk) => Err((
            chunk.offset(),
            ParseError::UnknownOption(chunk.flag().to_string()),
        )),
        None => Ok(()),
    }
}

/// Mark every option present and bind the values of those that take one.
/// Returns the trailing positional values, and the last option that consumed a value.
fn resolve_options(
    usage: &Usage,
    leading: VecDeque<OffsetValue>,
    chunks: Vec<Chunk>,
    matches: &mut Matches,
) -> Result<(VecDeque<OffsetValue>, Option<String>), (usize, ParseError)> {
    let mut pending = leading;
    let mut last_valued = None;

    for chunk in chunks {
        if let Some((offset, _)) = pending.front() {
            return Err((
                *offset,
                ParseError::UnexpectedArgumentsBeforeOption(chunk.flag().to_string()),
            ));
        }

        let option_config = usage
            .option(chunk.flag())
            .expect("internal error - unknown options must be rejected before resolving values");
        matches.mark(option_config.name());
        let Chunk { option, mut values } = chunk;

        match option_config.kind() {
            Some(kind) => {
                let (value_offset, raw) = values
                    .pop_front()
                    .ok_or_else(|| (option.0, ParseError::MissingOptionValue(option.1.clone())))?;
                let value = kind.coerce(&raw).ok_or_else(|| {
                    (
                        value_offset,
                        ParseError::InvalidTypedValue {
                            value: raw.clone(),
                            option: option.1.clone(),
                            expected: kind,
                        },
                    )
                })?;
                matches.bind(option_config.name(), value);
                last_valued.replace(option.1);
            }
            None => {
                last_valued = None;
            }
        }

        pending = values;
    }

    Ok((pending, last_valued))
}

fn validate_arity(
    usage: &Usage,
    remainder: VecDeque<OffsetValue>,
    last_valued: Option<String>,
    end: usize,
) -> Result<VecDeque<OffsetValue>, (usize, ParseError)> {
    let mut match_buffer = MatchBuffer::new(usage.bound());

    for (offset, value) in remainder {
        match_buffer.push(offset, value);
    }

    match match_buffer.close() {
        Ok(values) => Ok(values),
        Err(error @ CloseError::TooManyValues { excess, .. }) => Err((excess, error.into())),
        Err(CloseError::TooFewValues { provided, expected }) => Err((
            end,
            ParseError::TooFewArguments {
                min: expected,
                received: provided,
                hint: last_valued,
            },
        )),
    }
}

fn bind_positionals(
    usage: &Usage,
    mut values: VecDeque<OffsetValue>,
    matches: &mut Matches,
) -> Result<(), (usize, ParseError)> {
    let end = values.back().map(|(offset, _)| offset + 1).unwrap_or(0);
    let exhausted = |name: &str| {
        (
            end,
            ParseError::InternalInconsistency(format!("no value left for '{name}'")),
        )
    };

    if usage.has_vararg() {
        let mut remaining = usage.arguments().len();

        for argument in usage.arguments() {
            remaining -= 1;

            match argument.arity() {
                Arity::Required => {
                    let (_, value) = values
                        .pop_front()
                        .ok_or_else(|| exhausted(argument.name()))?;
                    matches.bind(argument.name(), Value::Text(value));
                }
                Arity::Vararg => {
                    let take = values
                        .len()
                        .checked_sub(remaining)
                        .ok_or_else(|| exhausted(argument.name()))?;
                    let items = values.drain(..take).map(|(_, value)| value).collect();
                    matches.bind(argument.name(), Value::List(items));
                }
                Arity::Optional => {
                    return Err((
                        end,
                        ParseError::InternalInconsistency(format!(
                            "optional argument '{}' alongside a vararg",
                            argument.name()
                        )),
                    ));
                }
            }
        }
    } else {
        let split = values
            .len()
            .checked_sub(usage.required_count())
            .ok_or_else(|| exhausted("required arguments"))?;
        let mut required_values = values.split_off(split);

        for argument in usage.arguments() {
            match argument.arity() {
                Arity::Required => {
                    let (_, value) = required_values
                        .pop_front()
                        .ok_or_else(|| exhausted(argument.name()))?;
                    matches.bind(argument.name(), Value::Text(value));
                }
                Arity::Optional => {
                    if let Some((_, value)) = values.pop_front() {
                        matches.bind(argument.name(), Value::Text(value));
                    }
                }
                Arity::Vararg => unreachable!("internal error - checked by has_vararg"),
            }
        }
    }

    match values.front() {
        Some((offset, value)) => Err((
            *offset,
            ParseError::InternalInconsistency(format!("leftover token '{value}'")),
        )),
        None => Ok(()),
    }
}
