//! ε-aware constructions for word-equation solving.
//!
//! Both operations take the ε-marker as an explicit symbol. It is the
//! caller's duty to pick one that does not occur in the inputs, typically
//! via [`next_free_symbol`](crate::next_free_symbol).

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::nfa::{Nfa, State, Symbol};

/// Concatenate two automata over a fresh ε-transition.
///
/// The result is the disjoint union of `lhs` and `rhs` with the states of
/// `rhs` shifted past those of `lhs`, the initial states of `lhs`, the
/// final states of `rhs` and one `epsilon`-labelled transition from every
/// final state of `lhs` to every initial state of `rhs`. Its language is
/// `L(lhs) · {ε} · L(rhs)` over the extended alphabet.
#[must_use]
pub fn concat_eps(lhs: &Nfa, rhs: &Nfa, epsilon: Symbol) -> Nfa {
    let offset = lhs.num_states();
    let mut result = Nfa::with_states(offset + rhs.num_states());
    for t in lhs.transitions() {
        result.add_transition(t.src, t.symbol, t.tgt);
    }
    for t in rhs.transitions() {
        result.add_transition(t.src + offset, t.symbol, t.tgt + offset);
    }
    for state in lhs.initials() {
        result.add_initial(state);
    }
    for state in rhs.finals() {
        result.add_final(state + offset);
    }
    for final_state in lhs.finals() {
        for initial_state in rhs.initials() {
            result.add_transition(final_state, epsilon, initial_state + offset);
        }
    }
    result
}

/// Allocate (or look up) the product state for the pair `(p, q)`.
fn pair_state(
    product: &mut Nfa,
    pair_id: &mut FxHashMap<(State, State), State>,
    worklist: &mut VecDeque<(State, State, State)>,
    lhs: &Nfa,
    rhs: &Nfa,
    p: State,
    q: State,
) -> State {
    if let Some(&id) = pair_id.get(&(p, q)) {
        return id;
    }
    let id = product.add_state();
    pair_id.insert((p, q), id);
    if lhs.is_final(p) && rhs.is_final(q) {
        product.add_final(id);
    }
    worklist.push_back((p, q, id));
    id
}

/// Product construction that preserves the ε-transitions of `lhs`.
///
/// ε is treated asymmetrically: an `epsilon`-edge `p → p'` of `lhs` lifts
/// to `(p, q) → (p', q)` without `rhs` moving, while every other symbol
/// requires both sides to move. Initial states are `I_lhs × I_rhs`, final
/// states are the pairs of finals. Only pairs reachable from the initial
/// ones are materialized; they are numbered in discovery order of a
/// breadth-first traversal with sorted tie-breaks, so equal inputs produce
/// equal products.
#[must_use]
pub fn intersect_eps(lhs: &Nfa, rhs: &Nfa, epsilon: Symbol) -> Nfa {
    let mut product = Nfa::new();
    let mut pair_id: FxHashMap<(State, State), State> = FxHashMap::default();
    let mut worklist: VecDeque<(State, State, State)> = VecDeque::new();

    let mut lhs_initial: Vec<State> = lhs.initials().collect();
    lhs_initial.sort_unstable();
    let mut rhs_initial: Vec<State> = rhs.initials().collect();
    rhs_initial.sort_unstable();

    for &p in &lhs_initial {
        for &q in &rhs_initial {
            let id = pair_state(&mut product, &mut pair_id, &mut worklist, lhs, rhs, p, q);
            product.add_initial(id);
        }
    }

    while let Some((p, q, src)) = worklist.pop_front() {
        let mut symbols: Vec<Symbol> = lhs.symbol_posts(p).map(|(symbol, _)| symbol).collect();
        symbols.sort_unstable();

        for symbol in symbols {
            let mut lhs_tgts: Vec<State> =
                lhs.post(p, symbol).into_iter().flatten().copied().collect();
            lhs_tgts.sort_unstable();

            if symbol == epsilon {
                for pt in lhs_tgts {
                    let tgt =
                        pair_state(&mut product, &mut pair_id, &mut worklist, lhs, rhs, pt, q);
                    product.add_transition(src, epsilon, tgt);
                }
                continue;
            }

            let mut rhs_tgts: Vec<State> =
                rhs.post(q, symbol).into_iter().flatten().copied().collect();
            rhs_tgts.sort_unstable();
            for &pt in &lhs_tgts {
                for &qt in &rhs_tgts {
                    let tgt =
                        pair_state(&mut product, &mut pair_id, &mut worklist, lhs, rhs, pt, qt);
                    product.add_transition(src, symbol, tgt);
                }
            }
        }
    }

    product
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Symbol = 100;

    fn word_nfa(word: &[Symbol]) -> Nfa {
        let mut nfa = Nfa::with_states(word.len() + 1);
        nfa.add_initial(0);
        nfa.add_final(word.len());
        for (i, &symbol) in word.iter().enumerate() {
            nfa.add_transition(i, symbol, i + 1);
        }
        nfa
    }

    #[test]
    fn test_concat_eps_language() {
        let concat = concat_eps(&word_nfa(&[0]), &word_nfa(&[1]), EPS);
        assert!(concat.is_in_lang(&[0, EPS, 1]));
        assert!(!concat.is_in_lang(&[0, 1]));
        assert!(!concat.is_in_lang(&[0, EPS]));
    }

    #[test]
    fn test_concat_eps_joins_all_finals_to_all_initials() {
        let mut lhs = Nfa::with_states(2);
        lhs.add_initial(0);
        lhs.add_final(0);
        lhs.add_final(1);
        lhs.add_transition(0, 0, 1);

        let mut rhs = Nfa::with_states(2);
        rhs.add_initial(0);
        rhs.add_initial(1);
        rhs.add_final(1);
        rhs.add_transition(0, 1, 1);

        let concat = concat_eps(&lhs, &rhs, EPS);
        assert_eq!(concat.num_states(), 4);
        assert!(concat.is_in_lang(&[EPS]));
        assert!(concat.is_in_lang(&[EPS, 1]));
        assert!(concat.is_in_lang(&[0, EPS, 1]));
        assert!(!concat.is_in_lang(&[0]));
    }

    #[test]
    fn test_intersect_eps_synchronizes_plain_symbols() {
        let mut lhs = word_nfa(&[0, 1]);
        lhs.add_transition(0, 2, 2);
        let product = intersect_eps(&lhs, &word_nfa(&[0, 1]), EPS);
        assert!(product.is_in_lang(&[0, 1]));
        assert!(!product.is_in_lang(&[2, 1]));
    }

    #[test]
    fn test_intersect_eps_lifts_left_epsilon_alone() {
        let lhs = concat_eps(&word_nfa(&[0]), &word_nfa(&[1]), EPS);
        let product = intersect_eps(&lhs, &word_nfa(&[0, 1]), EPS);
        assert!(product.is_in_lang(&[0, EPS, 1]));
        assert!(!product.is_in_lang(&[0, 1]));
    }

    #[test]
    fn test_intersect_eps_empty_when_disjoint() {
        let product = intersect_eps(&word_nfa(&[0]), &word_nfa(&[1]), EPS);
        assert!(product.is_lang_empty());
    }

    #[test]
    fn test_intersect_eps_is_deterministic() {
        let lhs = concat_eps(&word_nfa(&[0, 1]), &word_nfa(&[2]), EPS);
        let rhs = word_nfa(&[0, 1, 2]);
        assert_eq!(intersect_eps(&lhs, &rhs, EPS), intersect_eps(&lhs, &rhs, EPS));
    }
}
