use std::collections::VecDeque;
use thiserror::Error;

use crate::model::{Bound, Matches};

/// A token paired with its index in the argument list.
pub(crate) type OffsetValue = (usize, String);

/// What the caller should do once the argument list has been matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Every token was matched; use the contained values.
    Complete(Matches),
    /// `-h` or `--help` was given; display the contained usage message and stop.
    ShowUsage(String),
}

/// An option token followed by the non-option tokens up to the next option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Chunk {
    pub option: OffsetValue,
    pub values: VecDeque<OffsetValue>,
}

impl Chunk {
    pub(super) fn new(option: OffsetValue) -> Self {
        Self {
            option,
            values: VecDeque::default(),
        }
    }

    pub(super) fn flag(&self) -> &str {
        &self.option.1
    }

    pub(super) fn offset(&self) -> usize {
        self.option.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(super) enum CloseError {
    #[error("too few values provided (provided={provided}, expected={expected}).")]
    TooFewValues { provided: usize, expected: usize },

    #[error("too many values provided (provided={provided}, expected={lower}-{upper}).")]
    TooManyValues {
        provided: usize,
        lower: usize,
        upper: usize,
        // Offset of the first value beyond the upper bound.
        excess: usize,
    },
}

/// Collects the positional values and checks them against the usage line's bound.
#[derive(Debug)]
pub(super) struct MatchBuffer {
    bound: Bound,
    values: Vec<OffsetValue>,
}

impl MatchBuffer {
    pub(super) fn new(bound: Bound) -> Self {
        Self {
            bound,
            values: Vec::default(),
        }
    }

    pub(super) fn push(&mut self, offset: usize, value: String) {
        self.values.push((offset, value));
    }

    #[cfg(test)]
    fn can_close(&self) -> bool {
        let within_upper = match self.bound {
            Bound::Range(_, upper) => self.values.len() <= upper,
            Bound::Lower(_) => true,
        };
        within_upper && self.values.len() >= self.bound.lower()
    }

    pub(super) fn close(self) -> Result<VecDeque<OffsetValue>, CloseError> {
        if let Bound::Range(lower, upper) = self.bound {
            if self.values.len() > upper {
                return Err(CloseError::TooManyValues {
                    provided: self.values.len(),
                    lower,
                    upper,
                    excess: self.values[upper].0,
                });
            }
        }

        let lower = self.bound.lower();

        if self.values.len() < lower {
            return Err(CloseError::TooFewValues {
                provided: self.values.len(),
                expected: lower,
            });
        }

        Ok(self.values.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case(Bound::Lower(0), 0, true)]
    #[case(Bound::Lower(0), 1, true)]
    #[case(Bound::Lower(1), 0, false)]
    #[case(Bound::Lower(1), 1, true)]
    #[case(Bound::Lower(1), 2, true)]
    #[case(Bound::Lower(10), 2, false)]
    #[case(Bound::Range(0, 2), 0, true)]
    #[case(Bound::Range(0, 2), 1, true)]
    #[case(Bound::Range(1, 2), 0, false)]
    #[case(Bound::Range(1, 2), 1, true)]
    #[case(Bound::Range(1, 2), 2, true)]
    #[case(Bound::Range(10, 20), 2, false)]
    fn match_buffer_lower(#[case] bound: Bound, #[case] feed: usize, #[case] expected_ok: bool) {
        let mut mb = MatchBuffer::new(bound);
        let tokens: Vec<(usize, String)> = (0..feed)
            .map(|i| (thread_rng().gen(), i.to_string()))
            .collect();

        for (offset, token) in &tokens {
            mb.push(*offset, token.clone());
        }

        if expected_ok {
            assert!(mb.can_close());
            assert_eq!(mb.close().unwrap(), VecDeque::from(tokens));
        } else {
            assert!(!mb.can_close());
            assert_eq!(
                mb.close().unwrap_err(),
                CloseError::TooFewValues {
                    provided: feed,
                    expected: bound.lower(),
                }
            );
        }
    }

    #[rstest]
    #[case(Bound::Range(0, 0), 0, true)]
    #[case(Bound::Range(0, 0), 1, false)]
    #[case(Bound::Range(0, 1), 0, true)]
    #[case(Bound::Range(0, 1), 1, true)]
    #[case(Bound::Range(0, 1), 2, false)]
    #[case(Bound::Range(2, 3), 4, false)]
    #[case(Bound::Range(0, 10), 20, false)]
    fn match_buffer_upper(#[case] bound: Bound, #[case] feed: usize, #[case] expected_ok: bool) {
        let (lower, upper) = match &bound {
            &Bound::Range(lower, upper) => (lower, upper),
            _ => unreachable!("un-planned test case"),
        };
        let mut mb = MatchBuffer::new(bound);
        let tokens: Vec<(usize, String)> = (0..feed).map(|i| (i, i.to_string())).collect();

        for (offset, token) in &tokens {
            mb.push(*offset, token.clone());
        }

        if expected_ok {
            assert!(mb.can_close());
            assert_eq!(mb.close().unwrap(), VecDeque::from(tokens));
        } else {
            assert!(!mb.can_close());
            assert_eq!(
                mb.close().unwrap_err(),
                CloseError::TooManyValues {
                    provided: feed,
                    lower,
                    upper,
                    excess: upper,
                }
            );
        }
    }

    #[test]
    fn chunk() {
        let mut chunk = Chunk::new((3, "--retries".to_string()));
        chunk.values.push_back((4, "5".to_string()));
        assert_eq!(chunk.flag(), "--retries");
        assert_eq!(chunk.offset(), 3);
        assert_eq!(chunk.values.len(), 1);
    }
}
