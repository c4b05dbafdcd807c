/// A state in a built automaton.
/// It carries the display name of the state and a boolean flag indicating
/// whether the state is accepting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub name: String,
    pub accepting: bool,
}

impl StateNode {
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        StateNode {
            name: name.into(),
            accepting,
        }
    }

    pub fn accepting(name: impl Into<String>) -> Self {
        StateNode::new(name, true)
    }

    pub fn non_accepting(name: impl Into<String>) -> Self {
        StateNode::new(name, false)
    }

    /// The same state with the accepting flag flipped, for complement
    /// construction.
    pub fn invert(&self) -> Self {
        StateNode::new(self.name.clone(), !self.accepting)
    }

    /// Joins two states into a product state. The pair accepts only when both
    /// components accept.
    pub fn join(&self, other: &StateNode) -> StateNode {
        StateNode::new(
            format!("({}, {})", self.name, other.name),
            self.accepting && other.accepting,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_flips_accepting() {
        let node = StateNode::accepting("q1");

        assert!(!node.invert().accepting);
        assert_eq!(node.invert().invert(), node);
    }

    #[test]
    fn test_join_names_and_accepting() {
        let accepting = StateNode::accepting("q1");
        let rejecting = StateNode::non_accepting("q5");

        let joined = accepting.join(&rejecting);
        assert_eq!(joined.name, "(q1, q5)");
        assert!(!joined.accepting);

        assert!(accepting.join(&accepting).accepting);
    }
}
