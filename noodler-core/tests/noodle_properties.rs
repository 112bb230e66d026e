//! Property-based tests for the word-equation driver:
//! - equations of single-word variables against their concatenation
//! - determinism of the produced noodle sequences
//! - emptiness when the right side cannot match

use noodler_core::{noodlify_for_equation, Params};
use noodler_nfa::{Nfa, Symbol};
use proptest::prelude::*;

fn word_nfa(word: &[Symbol]) -> Nfa {
    let mut nfa = Nfa::with_states(word.len() + 1);
    nfa.add_initial(0);
    nfa.add_final(word.len());
    for (i, &symbol) in word.iter().enumerate() {
        nfa.add_transition(i, symbol, i + 1);
    }
    nfa
}

/// Strategy for a left side of one to four single-word automata over the
/// alphabet {0, 1, 2}, each word of length up to three.
fn words_strategy() -> impl Strategy<Value = Vec<Vec<Symbol>>> {
    proptest::collection::vec(proptest::collection::vec(0u64..3, 0..4), 1..5)
}

proptest! {
    /// A concatenation of single-word variables matched against the
    /// concatenated word has exactly one decomposition, and its segments
    /// accept the individual words.
    #[test]
    fn single_word_equation_has_one_noodle(words in words_strategy()) {
        let left: Vec<Nfa> = words.iter().map(|w| word_nfa(w)).collect();
        let concatenated: Vec<Symbol> = words.iter().flatten().copied().collect();
        let right = word_nfa(&concatenated);

        let noodles = noodlify_for_equation(left, &right, false, &Params::new()).unwrap();

        prop_assert_eq!(noodles.len(), 1);
        prop_assert_eq!(noodles[0].len(), words.len());
        for (segment, word) in noodles[0].iter().zip(words.iter()) {
            prop_assert!(segment.is_in_lang(word));
        }
    }

    #[test]
    fn equation_driver_is_deterministic(words in words_strategy()) {
        let concatenated: Vec<Symbol> = words.iter().flatten().copied().collect();
        let right = word_nfa(&concatenated);

        let make_left = || -> Vec<Nfa> { words.iter().map(|w| word_nfa(w)).collect() };
        let first = noodlify_for_equation(make_left(), &right, false, &Params::new()).unwrap();
        let second = noodlify_for_equation(make_left(), &right, false, &Params::new()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Appending a symbol the left side cannot produce empties the result.
    #[test]
    fn mismatched_right_side_is_empty(words in words_strategy()) {
        let left: Vec<Nfa> = words.iter().map(|w| word_nfa(w)).collect();
        let mut mismatched: Vec<Symbol> = words.iter().flatten().copied().collect();
        mismatched.push(0);
        mismatched.push(1);
        let right = word_nfa(&mismatched);

        let noodles = noodlify_for_equation(left, &right, false, &Params::new()).unwrap();
        prop_assert!(noodles.is_empty());
    }

    /// Reduction never changes which words the noodle segments accept.
    #[test]
    fn reduction_preserves_segment_languages(words in words_strategy()) {
        let concatenated: Vec<Symbol> = words.iter().flatten().copied().collect();
        let right = word_nfa(&concatenated);
        let make_left = || -> Vec<Nfa> { words.iter().map(|w| word_nfa(w)).collect() };

        let plain = noodlify_for_equation(make_left(), &right, false, &Params::new()).unwrap();
        let params = Params::new().with("reduce", "bidirectional");
        let reduced = noodlify_for_equation(make_left(), &right, false, &params).unwrap();

        prop_assert_eq!(plain.len(), reduced.len());
        for (lhs, rhs) in plain.iter().zip(reduced.iter()) {
            prop_assert_eq!(lhs.len(), rhs.len());
            for ((a, b), word) in lhs.iter().zip(rhs.iter()).zip(words.iter()) {
                prop_assert!(a.is_in_lang(word));
                prop_assert!(b.is_in_lang(word));
            }
        }
    }
}
