use serde::Serialize;
use thiserror::Error;

/// A single reason why an automaton fails a validity check.
///
/// Reasons are structured so hosts can render or translate them; the
/// [`Display`](std::fmt::Display) text is a ready-made English rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidityReason {
    #[error("there must be at least one state")]
    NoStates,
    #[error("there must be at least one input symbol")]
    NoInputSymbols,
    #[error("all input symbols must have length at least one")]
    EmptyInputSymbol,
    #[error("input symbol '{symbol}' is declared more than once")]
    DuplicateInputSymbol { symbol: String },
    #[error("state '{name}' is declared more than once")]
    DuplicateStateName { name: String },
    #[error("there is no initial state")]
    MissingInitialState,
    #[error("initial state '{name}' is not one of the automaton's states")]
    UnknownInitialState { name: String },
    #[error("accepting state '{name}' is not one of the automaton's states")]
    UnknownAcceptingState { name: String },
    #[error("transition ('{symbol}', '{from}', '{to}') uses an undeclared symbol or state")]
    InvalidTransition {
        symbol: String,
        from: String,
        to: String,
    },
    #[error("only {reachable} of {total} states are reachable, unreachable states: {names}")]
    UnreachableStates {
        reachable: usize,
        total: usize,
        /// Comma-joined names in declaration order.
        names: String,
    },
    #[error(
        "there are {count} transitions from state '{state}' on input symbol '{symbol}', a DFA needs exactly one"
    )]
    NotATotalFunction {
        state: String,
        symbol: String,
        count: usize,
    },
}

/// Outcome of the validity checks.
///
/// `valid_dfa` is `None` when the automaton is a valid NFA but DFA-ness was
/// not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomatonValidity {
    pub valid_automaton: bool,
    pub valid_dfa: Option<bool>,
    pub reasons: Vec<ValidityReason>,
}

impl AutomatonValidity {
    /// A valid automaton whose DFA-ness is unknown.
    pub fn valid() -> Self {
        AutomatonValidity {
            valid_automaton: true,
            valid_dfa: None,
            reasons: Vec::new(),
        }
    }

    pub fn valid_dfa() -> Self {
        AutomatonValidity {
            valid_automaton: true,
            valid_dfa: Some(true),
            reasons: Vec::new(),
        }
    }

    pub fn invalid(reasons: Vec<ValidityReason>) -> Self {
        AutomatonValidity {
            valid_automaton: false,
            valid_dfa: Some(false),
            reasons,
        }
    }

    /// A valid automaton that fails the DFA totality requirement.
    pub fn not_a_dfa(reason: ValidityReason) -> Self {
        AutomatonValidity {
            valid_automaton: true,
            valid_dfa: Some(false),
            reasons: vec![reason],
        }
    }

    pub fn is_valid_dfa(&self) -> bool {
        self.valid_dfa == Some(true)
    }

    /// The reasons rendered as display strings, for hosts that do not want to
    /// match on the structured variants.
    pub fn rendered_reasons(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}
