use petgraph::{Direction, visit::EdgeRef};
use serde::Serialize;
use thiserror::Error;

use crate::automaton::Automaton;

/// Words generated over a length range, split by whether the automaton
/// accepts them. Words are the plain concatenation of their input symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordReport {
    pub accepted_words: Vec<String>,
    pub rejected_words: Vec<String>,
}

impl WordReport {
    fn push(&mut self, word: String, accepted: bool) {
        if accepted {
            self.accepted_words.push(word);
        } else {
            self.rejected_words.push(word);
        }
    }

    pub fn word_count(&self) -> usize {
        self.accepted_words.len() + self.rejected_words.len()
    }
}

/// The requested word length range is descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid word length range, max length {max_length} is smaller than min length {min_length}")]
pub struct WordRangeError {
    pub min_length: usize,
    pub max_length: usize,
}

/// Why a word could not be classified against an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("input symbol '{symbol}' is not one of the automaton's input symbols")]
    InvalidSymbol { symbol: String },
    #[error(
        "the automaton contains {count} transitions for input symbol '{symbol}' from state '{state}'"
    )]
    AmbiguousTransition {
        state: String,
        symbol: String,
        count: usize,
    },
}

impl Automaton {
    /// Generates every word the transition structure can spell with lengths
    /// in `min_length..=max_length`, classifying each as accepted or
    /// rejected.
    ///
    /// The expansion follows all outgoing transitions of the frontier states,
    /// so it also works for NFAs; there the word count legitimately diverges
    /// from `|Σ|^len` per length, which is logged but never an error.
    pub fn generate_words(
        &self,
        min_length: usize,
        max_length: usize,
    ) -> Result<WordReport, WordRangeError> {
        if max_length < min_length {
            return Err(WordRangeError {
                min_length,
                max_length,
            });
        }

        let mut report = WordReport::default();
        let mut frontier = vec![(String::new(), self.initial)];

        if min_length == 0 {
            report.push(String::new(), self.graph[self.initial].accepting);
        }

        for length in 1..=max_length {
            let mut next = Vec::new();

            for (word, state) in &frontier {
                for edge in self.graph.edges_directed(*state, Direction::Outgoing) {
                    let mut extended = word.clone();
                    extended.push_str(edge.weight());
                    next.push((extended, edge.target()));
                }
            }

            if length >= min_length {
                for (word, state) in &next {
                    report.push(word.clone(), self.graph[*state].accepting);
                }
            }

            frontier = next;
        }

        if let Some(expected) = self.expected_word_count(min_length, max_length)
            && report.word_count() as u128 != expected
        {
            tracing::debug!(
                "'{}' generated {} words for lengths {}..={}, a total DFA would generate {}",
                self.name,
                report.word_count(),
                min_length,
                max_length,
                expected
            );
        }

        Ok(report)
    }

    /// Runs the word through the automaton and returns whether it ends in an
    /// accepting state. Each step needs the unique transition from the
    /// current state on the current symbol.
    pub fn classify_word<'a>(
        &self,
        word: impl IntoIterator<Item = &'a str>,
    ) -> Result<bool, WordError> {
        let mut current = self.initial;

        for symbol in word {
            let targets = self.transition_targets(current, symbol).collect::<Vec<_>>();

            if targets.len() != 1 {
                if !self.alphabet.iter().any(|s| s == symbol) {
                    return Err(WordError::InvalidSymbol {
                        symbol: symbol.to_string(),
                    });
                }

                return Err(WordError::AmbiguousTransition {
                    state: self.graph[current].name.clone(),
                    symbol: symbol.to_string(),
                    count: targets.len(),
                });
            }

            current = targets[0];
        }

        Ok(self.graph[current].accepting)
    }

    /// Produces some accepted words by scanning growing length windows,
    /// starting with lengths 0..=4 and then one new length at a time.
    ///
    /// Meant to extract witness words from a language already known to be
    /// non-empty. A non-empty DFA language contains a word shorter than the
    /// state count, so the scan gives up and returns an empty list once the
    /// window start passes that bound.
    pub fn generate_accepted_words(&self) -> Vec<String> {
        let mut min_length = 0;
        let mut max_length = 4;

        while min_length <= self.state_count() {
            let report = self
                .generate_words(min_length, max_length)
                .expect("window bounds are ordered");

            if !report.accepted_words.is_empty() {
                return report.accepted_words;
            }

            min_length = max_length;
            max_length += 1;
        }

        Vec::new()
    }

    /// The word count a total DFA would generate over the range, or `None`
    /// when it overflows.
    fn expected_word_count(&self, min_length: usize, max_length: usize) -> Option<u128> {
        let base = self.alphabet.len() as u128;
        let mut total: u128 = 0;

        for length in min_length..=max_length {
            let exponent = u32::try_from(length).ok()?;
            total = total.checked_add(base.checked_pow(exponent)?)?;
        }

        Some(total)
    }
}
