/// The argument list with a caret under the token at fault.
///
/// ```text
/// --secure gibberish -v example.com 80
///          ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    /// Point at `tokens[offset]`, or just past the last token when `offset` is out of range.
    pub fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The index of the token at fault.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        let column = if self.offset < self.tokens.len() {
            self.tokens[..self.offset]
                .iter()
                .map(|token| token.chars().count() + 1)
                .sum()
        } else if self.tokens.is_empty() {
            0
        } else {
            projection.chars().count() + 1
        };

        write!(f, "{projection}\n{:column$}^", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, vec![], "\n^")]
    #[case(3, vec![], "\n^")]
    #[case(0, vec!["abc"], "abc\n^")]
    #[case(1, vec!["abc"], "abc\n    ^")]
    #[case(0, vec!["abc", "123"], "abc 123\n^")]
    #[case(1, vec!["abc", "123"], "abc 123\n    ^")]
    #[case(2, vec!["abc", "123"], "abc 123\n        ^")]
    #[case(9, vec!["abc", "123"], "abc 123\n        ^")]
    #[case(1, vec!["über", "x"], "über x\n     ^")]
    fn display(#[case] offset: usize, #[case] tokens: Vec<&str>, #[case] expected: &str) {
        assert_eq!(ErrorContext::new(offset, &tokens).to_string(), expected);
    }

    #[test]
    fn display_scenario() {
        // Setup
        let tokens = vec!["--secure", "gibberish", "-v", "example.com", "80"];

        // Execute
        let context = ErrorContext::new(1, &tokens);

        // Verify
        assert_eq!(context.offset(), 1);
        assert_eq!(
            context.to_string(),
            r#"--secure gibberish -v example.com 80
         ^"#
        );
    }
}
