pub mod automaton;
pub mod checker;
pub mod ids;
pub mod problem;
pub mod validation;
