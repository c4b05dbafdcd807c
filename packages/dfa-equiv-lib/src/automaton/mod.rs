use std::{collections::VecDeque, fmt::Debug};

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::Serialize;

use crate::{
    automaton::{
        node::StateNode,
        validity::{AutomatonValidity, ValidityReason},
    },
    ids::AutomatonId,
};

pub mod draft;
pub mod node;
pub mod validity;
pub mod words;

/// A structurally sound finite automaton over a graph of named states.
///
/// Values of this type always satisfy the membership invariants (transitions
/// only use declared states and symbols, the initial state exists); the
/// remaining validity stages are [`Automaton::validate`] (reachability) and
/// [`Automaton::validate_dfa`] (transition totality). Built from an
/// [`AutomatonDraft`](draft::AutomatonDraft) or derived from other automata;
/// never mutated after construction.
#[derive(Clone)]
pub struct Automaton {
    id: Option<AutomatonId>,
    name: String,
    graph: DiGraph<StateNode, String>,
    alphabet: Vec<String>,
    initial: NodeIndex,
}

/// All transitions for one input symbol, as (from, to) state-name pairs.
/// A read-only projection for tabular display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolTransitions {
    pub input_symbol: String,
    pub transitions: Vec<(String, String)>,
}

impl Automaton {
    pub fn id(&self) -> Option<AutomatonId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .map(|node| self.graph[node].name.as_str())
    }

    pub fn accepting_state_names(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .filter(|node| self.graph[*node].accepting)
            .map(|node| self.graph[node].name.as_str())
    }

    pub fn initial_state_name(&self) -> &str {
        &self.graph[self.initial].name
    }

    /// Checks the reachability stage of automaton validity. The structural
    /// stages already hold for every built automaton.
    pub fn validate(&self) -> AutomatonValidity {
        let reachable = self.reachable_set();

        if reachable.len() != self.graph.node_count() {
            let names = self
                .graph
                .node_indices()
                .filter(|node| !reachable.contains(node))
                .map(|node| self.graph[node].name.as_str())
                .join(", ");

            return AutomatonValidity::invalid(vec![ValidityReason::UnreachableStates {
                reachable: reachable.len(),
                total: self.graph.node_count(),
                names,
            }]);
        }

        AutomatonValidity::valid()
    }

    /// Checks full DFA validity: [`Automaton::validate`] plus the totality
    /// scan. There must be exactly one transition from each state on each
    /// input symbol.
    pub fn validate_dfa(&self) -> AutomatonValidity {
        let validity = self.validate();
        if !validity.valid_automaton {
            return validity;
        }

        for state in self.graph.node_indices() {
            for symbol in &self.alphabet {
                let count = self.transition_targets(state, symbol).count();
                if count != 1 {
                    return AutomatonValidity::not_a_dfa(ValidityReason::NotATotalFunction {
                        state: self.graph[state].name.clone(),
                        symbol: symbol.clone(),
                        count,
                    });
                }
            }
        }

        AutomatonValidity::valid_dfa()
    }

    /// Checks if the language of the automaton is empty, meaning no accepting
    /// state is reachable from the initial state.
    pub fn is_empty(&self) -> bool {
        if self.graph[self.initial].accepting {
            return false;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(self.initial);
        queue.push_back(self.initial);

        while let Some(state) = queue.pop_front() {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if visited.insert(edge.target()) {
                    if self.graph[edge.target()].accepting {
                        return false;
                    }

                    queue.push_back(edge.target());
                }
            }
        }

        true
    }

    /// Restricts the automaton to the states reachable from the initial
    /// state, dropping the transitions and accepting markers of the rest.
    /// Returns the automaton unchanged when everything is reachable.
    pub fn without_unreachable_states(self) -> Automaton {
        let reachable = self.reachable_set();
        if reachable.len() == self.graph.node_count() {
            return self;
        }

        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for node in self.graph.node_indices() {
            if reachable.contains(&node) {
                node_map.insert(node, graph.add_node(self.graph[node].clone()));
            }
        }

        for edge in self.graph.edge_references() {
            if let (Some(&from), Some(&to)) =
                (node_map.get(&edge.source()), node_map.get(&edge.target()))
            {
                graph.add_edge(from, to, edge.weight().clone());
            }
        }

        Automaton {
            id: None,
            name: self.name,
            initial: node_map[&self.initial],
            alphabet: self.alphabet,
            graph,
        }
    }

    /// Builds the complement automaton: same states, initial state, alphabet
    /// and transitions, with every accepting flag flipped.
    ///
    /// Complementing only makes sense for a valid DFA; a partial or ambiguous
    /// transition relation gives a semantically wrong complement. This is not
    /// re-validated here.
    pub fn inverted(&self) -> Automaton {
        let mut graph = DiGraph::new();

        for node in self.graph.node_indices() {
            graph.add_node(self.graph[node].invert());
        }

        for edge in self.graph.edge_references() {
            graph.add_edge(edge.source(), edge.target(), edge.weight().clone());
        }

        Automaton {
            id: None,
            name: format!("Inverted '{}'", self.name),
            graph,
            alphabet: self.alphabet.clone(),
            initial: self.initial,
        }
    }

    /// Builds the full product automaton recognizing the intersection of the
    /// two languages. Every state pair becomes a product state, so the result
    /// has exactly `|self| * |other|` states and `|self| * |other| * |Σ|`
    /// transitions.
    ///
    /// Both automata must be total DFAs over the same alphabet. Violating
    /// that is a usage error and panics; callers that take user input must
    /// validate first, as [`checker::check_equivalence`](crate::checker::check_equivalence)
    /// does.
    pub fn intersect(&self, other: &Automaton) -> Automaton {
        assert_eq!(
            self.alphabet, other.alphabet,
            "Alphabets must be the same to intersect automata"
        );

        let other_count = other.graph.node_count();
        let mut graph = DiGraph::new();

        // Node indices of both inputs are dense, so the product state of
        // (sa, sb) lives at sa * |other| + sb.
        let mut product = Vec::with_capacity(self.graph.node_count() * other_count);

        for sa in self.graph.node_indices() {
            for sb in other.graph.node_indices() {
                product.push(graph.add_node(self.graph[sa].join(&other.graph[sb])));
            }
        }

        for sa in self.graph.node_indices() {
            for sb in other.graph.node_indices() {
                let from = product[sa.index() * other_count + sb.index()];

                for symbol in &self.alphabet {
                    let next_a = self
                        .sole_successor(sa, symbol)
                        .expect("product construction requires a total DFA");
                    let next_b = other
                        .sole_successor(sb, symbol)
                        .expect("product construction requires a total DFA");

                    let to = product[next_a.index() * other_count + next_b.index()];
                    graph.add_edge(from, to, symbol.clone());
                }
            }
        }

        Automaton {
            id: None,
            name: format!("'{}' ∩ '{}'", self.name, other.name),
            graph,
            alphabet: self.alphabet.clone(),
            initial: product[self.initial.index() * other_count + other.initial.index()],
        }
    }

    /// Groups the transitions by input symbol, in alphabet order.
    pub fn transitions_by_symbol(&self) -> Vec<SymbolTransitions> {
        self.alphabet
            .iter()
            .map(|symbol| SymbolTransitions {
                input_symbol: symbol.clone(),
                transitions: self
                    .graph
                    .edge_references()
                    .filter(|edge| edge.weight() == symbol)
                    .map(|edge| {
                        (
                            self.graph[edge.source()].name.clone(),
                            self.graph[edge.target()].name.clone(),
                        )
                    })
                    .collect_vec(),
            })
            .collect_vec()
    }

    /// Breadth-first expansion from the initial state.
    fn reachable_set(&self) -> HashSet<NodeIndex> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(self.initial);
        queue.push_back(self.initial);

        while let Some(state) = queue.pop_front() {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if visited.insert(edge.target()) {
                    queue.push_back(edge.target());
                }
            }
        }

        visited
    }

    /// All targets of transitions from `state` on `symbol`. A valid DFA has
    /// exactly one per pair; an NFA may have any number.
    fn transition_targets<'a>(
        &'a self,
        state: NodeIndex,
        symbol: &'a str,
    ) -> impl Iterator<Item = NodeIndex> + 'a {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .filter(move |edge| edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    /// The unique successor on `symbol`, or `None` when the transition
    /// relation has zero or several candidates there.
    fn sole_successor(&self, state: NodeIndex, symbol: &str) -> Option<NodeIndex> {
        let mut targets = self.transition_targets(state, symbol);
        let first = targets.next();

        if targets.next().is_some() {
            return None;
        }

        first
    }
}

impl Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field(
                "states",
                &self
                    .graph
                    .node_indices()
                    .map(|node| (&self.graph[node].name, node))
                    .collect_vec(),
            )
            .field("initial_state", &self.initial)
            .field(
                "accepting_states",
                &self.accepting_state_names().collect_vec(),
            )
            .field("transition_count", &self.graph.edge_count())
            .field(
                "transitions",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{} --- {} --> {}",
                            self.graph[edge.source()].name,
                            edge.weight(),
                            self.graph[edge.target()].name
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
