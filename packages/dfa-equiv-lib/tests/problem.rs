use dfa_equiv_lib::{
    automaton::{Automaton, draft::AutomatonDraft},
    ids::{IdAllocator, ProblemId},
    problem::{Problem, ProblemError, WordGenerationPolicy},
};
use itertools::Itertools;

/// DFA over {a, b} accepting exactly the words of even length.
fn even_length_dfa() -> Automaton {
    AutomatonDraft::new("Even length")
        .with_states(&["q10", "q11"])
        .with_accepting_states(&["q10"])
        .with_initial_state("q10")
        .with_input_symbols(&["a", "b"])
        .with_transition("a", "q10", "q11")
        .with_transition("b", "q10", "q11")
        .with_transition("a", "q11", "q10")
        .with_transition("b", "q11", "q10")
        .build()
        .unwrap()
}

/// Even-length words again, spelled with three states.
fn even_length_dfa_alt() -> Automaton {
    AutomatonDraft::new("Even length, alternative")
        .with_states(&["q12", "q13", "q14"])
        .with_accepting_states(&["q12", "q14"])
        .with_initial_state("q12")
        .with_input_symbols(&["a", "b"])
        .with_transition("a", "q12", "q13")
        .with_transition("b", "q12", "q13")
        .with_transition("a", "q13", "q14")
        .with_transition("b", "q13", "q14")
        .with_transition("a", "q14", "q13")
        .with_transition("b", "q14", "q13")
        .build()
        .unwrap()
}

fn even_length_problem(accepted: WordGenerationPolicy, rejected: WordGenerationPolicy) -> Problem {
    let mut ids = IdAllocator::new();
    Problem::new(
        ids.next_problem_id(),
        "Even length",
        "Accept exactly the words of even length.",
        even_length_dfa(),
        accepted,
        rejected,
    )
    .unwrap()
}

fn accepts(automaton: &Automaton, word: &str) -> bool {
    let symbols = word.chars().map(|c| c.to_string()).collect_vec();
    automaton
        .classify_word(symbols.iter().map(String::as_str))
        .unwrap()
}

#[test]
fn test_problem_accessors() {
    let problem = even_length_problem(
        WordGenerationPolicy::automatic(),
        WordGenerationPolicy::Disabled,
    );

    assert_eq!(problem.id(), ProblemId(1));
    assert_eq!(problem.title(), "Even length");
    assert_eq!(
        problem.description(),
        "Accept exactly the words of even length."
    );
    assert_eq!(problem.solution().name(), "Even length");
    assert_eq!(
        problem.accepted_policy(),
        &WordGenerationPolicy::automatic()
    );
    assert_eq!(problem.rejected_policy(), &WordGenerationPolicy::Disabled);
}

#[test]
fn test_problem_requires_a_valid_dfa_solution() {
    let nfa = AutomatonDraft::new("Single step")
        .with_states(&["s1", "s2"])
        .with_accepting_states(&["s2"])
        .with_initial_state("s1")
        .with_input_symbols(&["a"])
        .with_transition("a", "s1", "s2")
        .build()
        .unwrap();

    let error = Problem::new(
        ProblemId(1),
        "Broken",
        "",
        nfa,
        WordGenerationPolicy::Disabled,
        WordGenerationPolicy::Disabled,
    )
    .unwrap_err();

    match error {
        ProblemError::SolutionNotADfa { name, validity } => {
            assert_eq!(name, "Single step");
            assert_eq!(validity.valid_dfa, Some(false));
        }
    }
}

#[test]
fn test_disabled_policy_yields_no_words() {
    let problem = even_length_problem(
        WordGenerationPolicy::Disabled,
        WordGenerationPolicy::Disabled,
    );

    assert!(problem.example_accepted_words().is_empty());
    assert!(problem.example_rejected_words().is_empty());
}

#[test]
fn test_manual_policy_passes_words_through() {
    let problem = even_length_problem(
        WordGenerationPolicy::manual(&["aa", "abab"]),
        WordGenerationPolicy::manual(&["b"]),
    );

    assert_eq!(
        problem.example_accepted_words(),
        vec!["aa".to_string(), "abab".to_string()]
    );
    assert_eq!(problem.example_rejected_words(), vec!["b".to_string()]);
}

#[test]
fn test_automatic_policy_finds_classified_words() {
    let problem = even_length_problem(
        WordGenerationPolicy::automatic(),
        WordGenerationPolicy::automatic(),
    );

    let accepted = problem.example_accepted_words();
    let rejected = problem.example_rejected_words();

    assert!(accepted.contains(&"".to_string()));
    assert!(rejected.contains(&"a".to_string()));

    for word in &accepted {
        assert!(accepts(problem.solution(), word));
    }
    for word in &rejected {
        assert!(!accepts(problem.solution(), word));
    }
}

#[test]
fn test_automatic_policy_respects_min_length() {
    let problem = even_length_problem(
        WordGenerationPolicy::Automatic {
            min_length: 2,
            max_length: None,
        },
        WordGenerationPolicy::Disabled,
    );

    let accepted = problem.example_accepted_words();

    assert!(accepted.contains(&"aa".to_string()));
    assert!(accepted.iter().all(|word| word.len() >= 2));
}

#[test]
fn test_automatic_policy_caps_at_max_length() {
    // No even-length word has length exactly one, so the accepted side comes
    // up empty once the cap stops the window from growing.
    let problem = even_length_problem(
        WordGenerationPolicy::Automatic {
            min_length: 1,
            max_length: Some(1),
        },
        WordGenerationPolicy::Automatic {
            min_length: 1,
            max_length: Some(1),
        },
    );

    assert!(problem.example_accepted_words().is_empty());

    let rejected = problem.example_rejected_words();
    assert!(rejected.contains(&"a".to_string()));
    assert!(rejected.contains(&"b".to_string()));
}

#[test]
fn test_automatic_accepted_words_need_an_accepting_state() {
    let empty_language = AutomatonDraft::new("Rejects everything")
        .with_states(&["s1", "s2"])
        .with_initial_state("s1")
        .with_input_symbols(&["a"])
        .with_transition("a", "s1", "s2")
        .with_transition("a", "s2", "s1")
        .build()
        .unwrap();

    let problem = Problem::new(
        ProblemId(1),
        "Nothing",
        "",
        empty_language,
        WordGenerationPolicy::automatic(),
        WordGenerationPolicy::automatic(),
    )
    .unwrap();

    assert!(problem.example_accepted_words().is_empty());
    assert!(!problem.example_rejected_words().is_empty());
}

#[test]
fn test_automatic_rejected_words_need_a_rejecting_state() {
    let full_language = AutomatonDraft::new("Accepts everything")
        .with_states(&["s1"])
        .with_accepting_states(&["s1"])
        .with_initial_state("s1")
        .with_input_symbols(&["a"])
        .with_transition("a", "s1", "s1")
        .build()
        .unwrap();

    let problem = Problem::new(
        ProblemId(1),
        "Everything",
        "",
        full_language,
        WordGenerationPolicy::automatic(),
        WordGenerationPolicy::automatic(),
    )
    .unwrap();

    assert!(!problem.example_accepted_words().is_empty());
    assert!(problem.example_rejected_words().is_empty());
}

#[test]
fn test_check_attempt() {
    let problem = even_length_problem(
        WordGenerationPolicy::Disabled,
        WordGenerationPolicy::Disabled,
    );

    let report = problem.check_attempt(&even_length_dfa_alt(), false).unwrap();
    assert!(report.equivalent);

    let odd_length = AutomatonDraft::new("Odd length")
        .with_states(&["q10", "q11"])
        .with_accepting_states(&["q11"])
        .with_initial_state("q10")
        .with_input_symbols(&["a", "b"])
        .with_transition("a", "q10", "q11")
        .with_transition("b", "q10", "q11")
        .with_transition("a", "q11", "q10")
        .with_transition("b", "q11", "q10")
        .build()
        .unwrap();

    let report = problem.check_attempt(&odd_length, true).unwrap();
    assert!(!report.equivalent);
    assert!(report.incorrectly_accepted.contains(&"a".to_string()));
    assert!(report.incorrectly_rejected.contains(&"".to_string()));
}
