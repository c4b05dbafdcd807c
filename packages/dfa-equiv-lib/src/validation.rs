//! Brute-force language comparisons, for cross-checking the construction
//! based equivalence algorithms against direct word enumeration.

use itertools::{Itertools, repeat_n};

use crate::automaton::Automaton;

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking
/// if the automata accept the same words up to a certain length (exclusive).
pub fn same_language(a: &Automaton, b: &Automaton, max_word_length: usize) -> bool {
    if a.alphabet() != b.alphabet() {
        return false;
    }

    if accepts(a, &[]) != accepts(b, &[]) {
        return false;
    }

    for i in 1..max_word_length {
        for word in words_of_length(a, i) {
            if accepts(a, &word) != accepts(b, &word) {
                return false;
            }
        }
    }

    true
}

pub fn assert_same_language(a: &Automaton, b: &Automaton, max_word_length: usize) {
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in all_words(a, max_word_length) {
        match (accepts(a, &word), accepts(b, &word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word.concat()
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word.concat()
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both
/// and no word is accepted by none.
pub fn assert_inverse_language(a: &Automaton, b: &Automaton, max_word_length: usize) {
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in all_words(a, max_word_length) {
        match (accepts(a, &word), accepts(b, &word)) {
            (true, true) => {
                panic!(
                    "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word.concat()
                );
            }
            (false, false) => {
                panic!(
                    "{:?} is accepted by neither automaton `a` nor automaton `b`. Thus their languages are not inverse.",
                    word.concat()
                );
            }
            _ => {}
        }
    }
}

/// Assert that no word is accepted by both automata.
pub fn assert_disjoint_language(a: &Automaton, b: &Automaton, max_word_length: usize) {
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    for word in all_words(a, max_word_length) {
        if accepts(a, &word) && accepts(b, &word) {
            panic!(
                "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not disjoint.",
                word.concat()
            );
        }
    }
}

fn all_words(automaton: &Automaton, max_word_length: usize) -> Vec<Vec<&str>> {
    let mut words = vec![Vec::new()];

    for i in 1..max_word_length {
        words.extend(words_of_length(automaton, i));
    }

    words
}

fn words_of_length(automaton: &Automaton, length: usize) -> Vec<Vec<&str>> {
    repeat_n(automaton.alphabet(), length)
        .multi_cartesian_product()
        .map(|word| word.into_iter().map(String::as_str).collect_vec())
        .collect_vec()
}

/// A missing transition rejects instead of failing, so partial automata can
/// still be compared word by word.
fn accepts(automaton: &Automaton, word: &[&str]) -> bool {
    automaton
        .classify_word(word.iter().copied())
        .unwrap_or(false)
}
