use crate::constant::*;

/// One option declaration, from an `Options:` line or an inline `[--flag ARG]` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Declaration<'a> {
    pub short: Option<char>,
    pub long: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub default: Option<&'a str>,
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A positional name: word characters, with inner dashes allowed.
pub(crate) fn is_name(token: &str) -> bool {
    match token.chars().next() {
        Some(first) => is_word_char(first) && token.chars().all(|c| is_word_char(c) || c == '-'),
        None => false,
    }
}

/// Replace every character outside `[A-Za-z0-9]` with `_`, then lower-case.
pub(crate) fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Split the text following `Usage:` into bracketed groups and bare words.
///
/// A `[` without a matching `]` is lexed as a bare word.
pub(crate) fn usage_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::default();
    let mut rest = line.trim_start();

    while !rest.is_empty() {
        let bracket_end = if rest.starts_with('[') {
            rest.find(']').map(|index| index + 1)
        } else {
            None
        };
        let end = match bracket_end {
            Some(end) => end,
            None => rest.find(char::is_whitespace).unwrap_or(rest.len()),
        };
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    tokens
}

/// Whether a line of usage text declares an option (ex: `  -s, --secure  Use TLS`).
pub(crate) fn is_declaration_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let flag = trimmed.strip_prefix("--").or_else(|| trimmed.strip_prefix('-'));

    match flag.and_then(|rest| rest.chars().next()) {
        Some(first) => is_word_char(first),
        None => false,
    }
}

/// Lex an option declaration.
/// Returns `None` when the text does not start with a flag.
pub(crate) fn declaration(text: &str) -> Option<Declaration<'_>> {
    let mut rest = text.trim_start();
    let mut short = None;
    let mut long = None;
    let mut placeholder = None;

    if !rest.starts_with("--") && rest.starts_with('-') {
        let (letter, word, after_word) = short_flag(rest)?;
        short.replace(letter);
        placeholder = word;
        rest = after_word;

        if let Some(after_comma) = rest.trim_start().strip_prefix(',') {
            rest = after_comma;
        }

        rest = rest.trim_start();
    }

    if let Some(after_dashes) = rest.strip_prefix("--") {
        let end = after_dashes
            .find(|c: char| !(is_word_char(c) || c == '-'))
            .unwrap_or(after_dashes.len());
        let name = &after_dashes[..end];

        if name.starts_with(is_word_char) {
            long.replace(name);
            let (word, after_word) = flag_placeholder(&after_dashes[end..]);
            // The placeholder after the long form wins, as that is the last flag listed.
            placeholder = word.or(placeholder);
            rest = after_word;

            // Long form first: `--verbose, -v`.
            if short.is_none() {
                if let Some((letter, word, after_word)) = rest
                    .strip_prefix(',')
                    .and_then(|after_comma| short_flag(after_comma.trim_start()))
                {
                    short.replace(letter);
                    placeholder = word.or(placeholder);
                    rest = after_word;
                }
            }
        }
    }

    if short.is_none() && long.is_none() {
        return None;
    }

    Some(Declaration {
        short,
        long,
        placeholder,
        default: default_annotation(rest),
    })
}

/// Lex a short flag and its placeholder: `-x`, `-x,` or `-x ARG`.
/// Returns `None` unless the flag is exactly one character.
fn short_flag(text: &str) -> Option<(char, Option<&str>, &str)> {
    let mut chars = text.strip_prefix('-')?.chars();
    let letter = chars.next().filter(|c| is_word_char(*c))?;
    let after_letter = chars.as_str();

    match after_letter.chars().next() {
        None => {}
        Some(c) if c.is_whitespace() || c == ',' => {}
        Some(_) => return None,
    }

    let (word, after_word) = flag_placeholder(after_letter);
    Some((letter, word, after_word))
}

/// A placeholder directly follows its flag, separated by a single space (ex: `--retries NUM`).
/// Wider gaps separate the flag from its description.
fn flag_placeholder(text: &str) -> (Option<&str>, &str) {
    if let Some(after_space) = text.strip_prefix(' ') {
        let end = after_space
            .find(|c: char| !is_word_char(c))
            .unwrap_or(after_space.len());

        if end > 0 {
            return (Some(&after_space[..end]), &after_space[end..]);
        }
    }

    (None, text)
}

/// Find `(default VALUE)` or `(default: VALUE)` in a declaration's description.
fn default_annotation(text: &str) -> Option<&str> {
    let start = text.rfind(DEFAULT_ANNOTATION)?;
    let after = &text[start + DEFAULT_ANNOTATION.len()..];
    let after = after.strip_prefix(':').unwrap_or(after);

    if !after.starts_with(char::is_whitespace) {
        return None;
    }

    let after = after.trim_start();
    let end = after.find(|c: char| c.is_whitespace() || c == ')')?;

    if end > 0 && after[end..].starts_with(')') {
        Some(&after[..end])
    } else {
        None
    }
}
