use hashbrown::{HashMap, HashSet};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Automaton,
        node::StateNode,
        validity::{AutomatonValidity, ValidityReason},
    },
    ids::AutomatonId,
};

/// One transition of a draft, all parts referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDraft {
    pub symbol: String,
    pub from: String,
    pub to: String,
}

/// The plain, name-based description of an automaton as the editing layer
/// produces it. A draft may be incomplete or inconsistent in any way; the
/// validity checks and [`AutomatonDraft::build`] sort that out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDraft {
    #[serde(default)]
    pub id: Option<AutomatonId>,
    #[serde(default)]
    pub name: String,
    pub states: Vec<String>,
    #[serde(default)]
    pub accepting_states: Vec<String>,
    #[serde(default)]
    pub initial_state: Option<String>,
    pub input_symbols: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<TransitionDraft>,
}

impl AutomatonDraft {
    pub fn new(name: impl Into<String>) -> Self {
        AutomatonDraft {
            name: name.into(),
            ..AutomatonDraft::default()
        }
    }

    pub fn with_id(mut self, id: AutomatonId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_states(mut self, states: &[&str]) -> Self {
        self.states = states.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_accepting_states(mut self, states: &[&str]) -> Self {
        self.accepting_states = states.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_initial_state(mut self, state: &str) -> Self {
        self.initial_state = Some(state.to_string());
        self
    }

    pub fn with_input_symbols(mut self, symbols: &[&str]) -> Self {
        self.input_symbols = symbols.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_transition(mut self, symbol: &str, from: &str, to: &str) -> Self {
        self.transitions.push(TransitionDraft {
            symbol: symbol.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    pub fn from_json(json: &str) -> anyhow::Result<AutomatonDraft> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<AutomatonDraft> {
        let canonic_path = std::fs::canonicalize(file_path)?;
        let content = std::fs::read_to_string(canonic_path)?;
        AutomatonDraft::from_json(&content)
    }

    /// Checks automaton validity (the NFA-level rules): the structural and
    /// transition-membership stages, then reachability of every state.
    pub fn check(&self) -> AutomatonValidity {
        match self.build() {
            Ok(automaton) => automaton.validate(),
            Err(validity) => validity,
        }
    }

    /// Checks DFA validity: [`AutomatonDraft::check`] plus the totality scan
    /// over every (state, symbol) pair.
    pub fn check_dfa(&self) -> AutomatonValidity {
        match self.build() {
            Ok(automaton) => automaton.validate_dfa(),
            Err(validity) => validity,
        }
    }

    /// Builds the graph-backed automaton. Fails with the accumulated reasons
    /// when the draft is structurally broken, and with a single reason on the
    /// first transition that uses undeclared names.
    ///
    /// Reachability is deliberately not checked here; a built automaton with
    /// unreachable states is still well-formed (and [`Automaton::validate`]
    /// reports it), which keeps building usable mid-edit.
    pub fn build(&self) -> Result<Automaton, AutomatonValidity> {
        let reasons = self.structural_reasons();
        if !reasons.is_empty() {
            return Err(AutomatonValidity::invalid(reasons));
        }

        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for name in &self.states {
            let accepting = self.accepting_states.contains(name);
            let node = graph.add_node(StateNode::new(name.as_str(), accepting));
            nodes.insert(name.as_str(), node);
        }

        for transition in &self.transitions {
            if !self.input_symbols.contains(&transition.symbol) {
                return Err(invalid_transition(transition));
            }

            let (Some(&from), Some(&to)) = (
                nodes.get(transition.from.as_str()),
                nodes.get(transition.to.as_str()),
            ) else {
                return Err(invalid_transition(transition));
            };

            graph.add_edge(from, to, transition.symbol.clone());
        }

        // the structural stage guarantees an initial state naming a declared
        // state
        let initial = nodes[self.initial_state.as_deref().unwrap()];

        Ok(Automaton {
            id: self.id,
            name: self.name.clone(),
            graph,
            alphabet: self.input_symbols.clone(),
            initial,
        })
    }

    /// The first validity stage. Every failing check contributes a reason;
    /// none of them short-circuits the others.
    fn structural_reasons(&self) -> Vec<ValidityReason> {
        let mut reasons = Vec::new();

        if self.states.is_empty() {
            reasons.push(ValidityReason::NoStates);
        }

        if self.input_symbols.is_empty() {
            reasons.push(ValidityReason::NoInputSymbols);
        }

        if self.input_symbols.iter().any(|symbol| symbol.is_empty()) {
            reasons.push(ValidityReason::EmptyInputSymbol);
        }

        let mut seen = HashSet::new();
        for symbol in &self.input_symbols {
            if !seen.insert(symbol) {
                reasons.push(ValidityReason::DuplicateInputSymbol {
                    symbol: symbol.clone(),
                });
                break;
            }
        }

        let mut seen = HashSet::new();
        for name in &self.states {
            if !seen.insert(name) {
                reasons.push(ValidityReason::DuplicateStateName { name: name.clone() });
                break;
            }
        }

        match &self.initial_state {
            None => reasons.push(ValidityReason::MissingInitialState),
            Some(name) if !self.states.contains(name) => {
                reasons.push(ValidityReason::UnknownInitialState { name: name.clone() });
            }
            Some(_) => {}
        }

        for name in &self.accepting_states {
            if !self.states.contains(name) {
                reasons.push(ValidityReason::UnknownAcceptingState { name: name.clone() });
                break;
            }
        }

        reasons
    }
}

fn invalid_transition(transition: &TransitionDraft) -> AutomatonValidity {
    AutomatonValidity::invalid(vec![ValidityReason::InvalidTransition {
        symbol: transition.symbol.clone(),
        from: transition.from.clone(),
        to: transition.to.clone(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state_draft() -> AutomatonDraft {
        AutomatonDraft::new("loop")
            .with_states(&["s1", "s2"])
            .with_accepting_states(&["s2"])
            .with_initial_state("s1")
            .with_input_symbols(&["a"])
            .with_transition("a", "s1", "s2")
            .with_transition("a", "s2", "s1")
    }

    #[test]
    fn test_build_preserves_declaration_order() {
        let automaton = two_state_draft().build().unwrap();

        assert_eq!(automaton.state_names().collect::<Vec<_>>(), ["s1", "s2"]);
        assert_eq!(automaton.initial_state_name(), "s1");
        assert_eq!(automaton.alphabet().to_vec(), ["a"]);
        assert_eq!(automaton.transition_count(), 2);
    }

    #[test]
    fn test_duplicate_names_are_structural_failures() {
        let validity = two_state_draft().with_states(&["s1", "s1"]).check();

        assert!(!validity.valid_automaton);
        assert!(validity.reasons.contains(&ValidityReason::DuplicateStateName {
            name: "s1".to_string()
        }));

        let validity = two_state_draft().with_input_symbols(&["a", "a"]).check();

        assert!(!validity.valid_automaton);
        assert!(
            validity
                .reasons
                .contains(&ValidityReason::DuplicateInputSymbol {
                    symbol: "a".to_string()
                })
        );
    }

    #[test]
    fn test_draft_json_round_trip() {
        let draft = two_state_draft();
        let json = serde_json::to_string(&draft).unwrap();

        assert_eq!(AutomatonDraft::from_json(&json).unwrap(), draft);
    }

    #[test]
    fn test_draft_json_defaults() {
        let draft =
            AutomatonDraft::from_json(r#"{ "states": ["s1"], "input_symbols": ["a"] }"#).unwrap();

        assert_eq!(draft.id, None);
        assert_eq!(draft.initial_state, None);
        assert!(draft.transitions.is_empty());
    }
}
