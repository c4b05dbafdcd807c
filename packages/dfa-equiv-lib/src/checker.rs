use serde::Serialize;
use thiserror::Error;

use crate::automaton::{Automaton, validity::AutomatonValidity};

/// Why an equivalence check could not be run. These are usage-contract
/// violations, kept apart from a genuine not-equivalent verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquivalenceError {
    #[error("automaton '{name}' is not a valid DFA")]
    NotADfa {
        name: String,
        validity: AutomatonValidity,
    },
    #[error("automata '{left}' and '{right}' have different input alphabets")]
    AlphabetMismatch { left: String, right: String },
}

/// Verdict of a language-equivalence check. The witness lists are filled only
/// when the check was asked for them and the automata are not equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquivalenceReport {
    pub equivalent: bool,
    /// Words the attempt accepts that the solution rejects.
    pub incorrectly_accepted: Vec<String>,
    /// Words the attempt rejects that the solution accepts.
    pub incorrectly_rejected: Vec<String>,
}

impl EquivalenceReport {
    fn equivalent() -> Self {
        EquivalenceReport {
            equivalent: true,
            incorrectly_accepted: Vec::new(),
            incorrectly_rejected: Vec::new(),
        }
    }

    fn not_equivalent(
        incorrectly_accepted: Vec<String>,
        incorrectly_rejected: Vec<String>,
    ) -> Self {
        EquivalenceReport {
            equivalent: false,
            incorrectly_accepted,
            incorrectly_rejected,
        }
    }
}

/// Decides whether `solution` and `attempt` accept the same language, via the
/// symmetric difference of the two languages.
///
/// The solution is treated as ground truth for the witness labeling: a word
/// in `complement(solution) ∩ attempt` is incorrectly accepted by the
/// attempt, a word in `solution ∩ complement(attempt)` is incorrectly
/// rejected. The languages are equal iff both products are empty. Witness
/// words are generated only when `want_witnesses` is set and only from
/// non-empty products.
///
/// Both inputs must be valid DFAs over the identical alphabet (same symbols
/// in the same order); anything else is an [`EquivalenceError`], not a
/// verdict.
pub fn check_equivalence(
    solution: &Automaton,
    attempt: &Automaton,
    want_witnesses: bool,
) -> Result<EquivalenceReport, EquivalenceError> {
    for automaton in [solution, attempt] {
        let validity = automaton.validate_dfa();
        if !validity.is_valid_dfa() {
            return Err(EquivalenceError::NotADfa {
                name: automaton.name().to_string(),
                validity,
            });
        }
    }

    if solution.alphabet() != attempt.alphabet() {
        return Err(EquivalenceError::AlphabetMismatch {
            left: solution.name().to_string(),
            right: attempt.name().to_string(),
        });
    }

    let incorrectly_accepted = solution.inverted().intersect(attempt);
    let incorrectly_rejected = solution.intersect(&attempt.inverted());

    tracing::debug!(
        "built '{}' and '{}' with {} states each",
        incorrectly_accepted.name(),
        incorrectly_rejected.name(),
        incorrectly_accepted.state_count(),
    );

    let accepted_empty = incorrectly_accepted.is_empty();
    let rejected_empty = incorrectly_rejected.is_empty();

    if accepted_empty && rejected_empty {
        tracing::debug!("'{}' and '{}' are equivalent", solution.name(), attempt.name());
        return Ok(EquivalenceReport::equivalent());
    }

    if !want_witnesses {
        return Ok(EquivalenceReport::not_equivalent(Vec::new(), Vec::new()));
    }

    let incorrectly_accepted_words = if accepted_empty {
        Vec::new()
    } else {
        incorrectly_accepted.generate_accepted_words()
    };

    let incorrectly_rejected_words = if rejected_empty {
        Vec::new()
    } else {
        incorrectly_rejected.generate_accepted_words()
    };

    Ok(EquivalenceReport::not_equivalent(
        incorrectly_accepted_words,
        incorrectly_rejected_words,
    ))
}
