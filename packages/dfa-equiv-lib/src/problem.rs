use rand::{RngExt, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    automaton::{Automaton, validity::AutomatonValidity},
    checker::{self, EquivalenceError, EquivalenceReport},
    ids::ProblemId,
};

/// How example words for one side of a problem (accepted or rejected) are
/// produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordGenerationPolicy {
    /// No example words for this side.
    #[default]
    Disabled,
    /// A fixed, hand-picked word list.
    Manual { words: Vec<String> },
    /// Words generated from the solution, starting at `min_length` and
    /// growing the searched length window until something turns up (or
    /// `max_length` caps it).
    Automatic {
        min_length: usize,
        max_length: Option<usize>,
    },
}

impl WordGenerationPolicy {
    pub fn automatic() -> Self {
        WordGenerationPolicy::Automatic {
            min_length: 0,
            max_length: None,
        }
    }

    pub fn manual(words: &[&str]) -> Self {
        WordGenerationPolicy::Manual {
            words: words.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("solution '{name}' must be a valid DFA")]
    SolutionNotADfa {
        name: String,
        validity: AutomatonValidity,
    },
}

/// An exercise: a reference DFA plus the policies for showing accepted and
/// rejected example words. Immutable once created; checking an attempt never
/// changes the problem.
#[derive(Debug, Clone)]
pub struct Problem {
    id: ProblemId,
    title: String,
    description: String,
    solution: Automaton,
    accepted: WordGenerationPolicy,
    rejected: WordGenerationPolicy,
}

impl Problem {
    /// Creates a problem around a solution automaton. The solution must be a
    /// valid DFA, otherwise equivalence checks against it could never run.
    pub fn new(
        id: ProblemId,
        title: impl Into<String>,
        description: impl Into<String>,
        solution: Automaton,
        accepted: WordGenerationPolicy,
        rejected: WordGenerationPolicy,
    ) -> Result<Problem, ProblemError> {
        let validity = solution.validate_dfa();
        if !validity.is_valid_dfa() {
            return Err(ProblemError::SolutionNotADfa {
                name: solution.name().to_string(),
                validity,
            });
        }

        Ok(Problem {
            id,
            title: title.into(),
            description: description.into(),
            solution,
            accepted,
            rejected,
        })
    }

    pub fn id(&self) -> ProblemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn solution(&self) -> &Automaton {
        &self.solution
    }

    pub fn accepted_policy(&self) -> &WordGenerationPolicy {
        &self.accepted
    }

    pub fn rejected_policy(&self) -> &WordGenerationPolicy {
        &self.rejected
    }

    /// Checks an attempt against the solution.
    pub fn check_attempt(
        &self,
        attempt: &Automaton,
        want_witnesses: bool,
    ) -> Result<EquivalenceReport, EquivalenceError> {
        checker::check_equivalence(&self.solution, attempt, want_witnesses)
    }

    /// Example words the solution accepts, per the accepted-words policy.
    pub fn example_accepted_words(&self) -> Vec<String> {
        self.example_words(&self.accepted, true)
    }

    /// Example words the solution rejects, per the rejected-words policy.
    pub fn example_rejected_words(&self) -> Vec<String> {
        self.example_words(&self.rejected, false)
    }

    fn example_words(&self, policy: &WordGenerationPolicy, accepted: bool) -> Vec<String> {
        match policy {
            WordGenerationPolicy::Disabled => Vec::new(),
            WordGenerationPolicy::Manual { words } => words.clone(),
            WordGenerationPolicy::Automatic {
                min_length,
                max_length,
            } => self.automatic_words(*min_length, *max_length, accepted),
        }
    }

    fn automatic_words(
        &self,
        min_length: usize,
        max_length: Option<usize>,
        accepted: bool,
    ) -> Vec<String> {
        let accepting = self.solution.accepting_state_names().count();

        // accepted examples need an accepting state, rejected examples a
        // non-accepting one; without that, generation can only come up empty
        if accepted && accepting == 0 {
            return Vec::new();
        }
        if !accepted && accepting == self.solution.state_count() {
            return Vec::new();
        }
        if let Some(max) = max_length
            && max < min_length
        {
            return Vec::new();
        }

        let mut upper = min_length + 4;

        loop {
            let capped = max_length.map_or(upper, |max| upper.min(max));
            let report = self
                .solution
                .generate_words(min_length, capped)
                .expect("window bounds are ordered");

            let words = if accepted {
                report.accepted_words
            } else {
                report.rejected_words
            };

            if !words.is_empty() {
                return words;
            }

            if max_length.is_some_and(|max| capped == max) {
                return Vec::new();
            }

            // a DFA language containing any word of length at least min also
            // contains one shorter than min plus the state count
            if upper > min_length + self.solution.state_count() {
                return Vec::new();
            }

            upper += 1;
        }
    }
}

/// Picks up to `count` distinct words at random, seeded for reproducibility.
/// The editing layer shows a small sample instead of the full generated list.
pub fn sample_words(words: &[String], count: usize, seed: u64) -> Vec<String> {
    let mut r = StdRng::seed_from_u64(seed);
    let mut pool = words.to_vec();
    let mut picked = Vec::new();

    while picked.len() < count && !pool.is_empty() {
        picked.push(pool.swap_remove(r.random_range(0..pool.len())));
    }

    picked
}
