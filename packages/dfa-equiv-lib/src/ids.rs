use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Identifier of an automaton, handed out by an [`IdAllocator`].
///
/// Derived automata (complements, products, reachable restrictions) carry no
/// id of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AutomatonId(pub u64);

impl Display for AutomatonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a problem, handed out by an [`IdAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(pub u64);

impl Display for ProblemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocates automaton and problem ids from a single ascending sequence.
/// Owned by the session layer that constructs automata and problems; the core
/// never allocates ids on its own.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator::starting_at(1)
    }

    /// Starts the sequence above already used ids, for sessions that load
    /// pre-seeded automata or problems.
    pub fn starting_at(next: u64) -> Self {
        IdAllocator { next }
    }

    pub fn next_automaton_id(&mut self) -> AutomatonId {
        AutomatonId(self.bump())
    }

    pub fn next_problem_id(&mut self) -> ProblemId {
        ProblemId(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator::new()
    }
}
