//! Structural operations: trimming, reversal and emptiness.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::nfa::{Nfa, State};

impl Nfa {
    /// States reachable from the initial states via any transition.
    fn reachable_states(&self) -> FxHashSet<State> {
        let mut reached: FxHashSet<State> = self.initial.clone();
        let mut queue: VecDeque<State> = self.initial.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            for (_, tgts) in self.symbol_posts(state) {
                for &tgt in tgts {
                    if reached.insert(tgt) {
                        queue.push_back(tgt);
                    }
                }
            }
        }
        reached
    }

    /// States from which some final state is reachable.
    fn co_reachable_states(&self) -> FxHashSet<State> {
        let mut pred: Vec<Vec<State>> = vec![Vec::new(); self.num_states()];
        for t in self.transitions() {
            pred[t.tgt].push(t.src);
        }
        let mut reached: FxHashSet<State> = self.finals.clone();
        let mut queue: VecDeque<State> = self.finals.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            for &src in &pred[state] {
                if reached.insert(src) {
                    queue.push_back(src);
                }
            }
        }
        reached
    }

    /// Restrict the automaton to useful states.
    ///
    /// A state is useful when it is reachable from some initial state and
    /// some final state is reachable from it. Surviving states are
    /// renumbered densely in ascending order of their old identifiers, so
    /// the result of trimming is deterministic. After trimming,
    /// `num_states() == 0` iff the language is empty.
    pub fn trim(&mut self) {
        let forward = self.reachable_states();
        let backward = self.co_reachable_states();

        let mut new_id: Vec<Option<State>> = vec![None; self.num_states()];
        let mut kept = 0;
        for state in 0..self.num_states() {
            if forward.contains(&state) && backward.contains(&state) {
                new_id[state] = Some(kept);
                kept += 1;
            }
        }

        let mut trimmed = Nfa::with_states(kept);
        for t in self.transitions() {
            if let (Some(src), Some(tgt)) = (new_id[t.src], new_id[t.tgt]) {
                trimmed.add_transition(src, t.symbol, tgt);
            }
        }
        for &state in &self.initial {
            if let Some(fresh) = new_id[state] {
                trimmed.add_initial(fresh);
            }
        }
        for &state in &self.finals {
            if let Some(fresh) = new_id[state] {
                trimmed.add_final(fresh);
            }
        }
        *self = trimmed;
    }

    /// The automaton with every transition reversed and the roles of
    /// initial and final states swapped. The state universe is preserved.
    #[must_use]
    pub fn revert(&self) -> Nfa {
        let mut reverted = Nfa::with_states(self.num_states());
        for t in self.transitions() {
            reverted.add_transition(t.tgt, t.symbol, t.src);
        }
        for &state in &self.finals {
            reverted.add_initial(state);
        }
        for &state in &self.initial {
            reverted.add_final(state);
        }
        reverted
    }

    /// True iff no final state is reachable from any initial state.
    #[must_use]
    pub fn is_lang_empty(&self) -> bool {
        let mut seen: FxHashSet<State> = self.initial.clone();
        let mut queue: VecDeque<State> = self.initial.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            if self.finals.contains(&state) {
                return false;
            }
            for (_, tgts) in self.symbol_posts(state) {
                for &tgt in tgts {
                    if seen.insert(tgt) {
                        queue.push_back(tgt);
                    }
                }
            }
        }
        true
    }
}
