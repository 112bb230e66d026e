//! Simulation-based size reduction.
//!
//! Computes the maximum forward simulation preorder by fixpoint refinement
//! and quotients the automaton by mutual simulation. The quotient is
//! language-equivalent, never larger than the input, introduces no new
//! symbols and is deterministic: classes are represented by their smallest
//! member and renumbered in ascending representative order.

use crate::nfa::Nfa;

/// Maximum forward simulation as a boolean matrix.
///
/// `sim[i * n + j]` holds iff state `j` simulates state `i`: `j` is final
/// whenever `i` is, and every move of `i` can be matched by a move of `j`
/// into a simulating target.
fn max_simulation(aut: &Nfa) -> Vec<bool> {
    let n = aut.num_states();
    let mut sim = vec![true; n * n];
    for i in 0..n {
        for j in 0..n {
            if aut.is_final(i) && !aut.is_final(j) {
                sim[i * n + j] = false;
            }
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            'pairs: for j in 0..n {
                if !sim[i * n + j] {
                    continue;
                }
                for (symbol, itgts) in aut.symbol_posts(i) {
                    let jtgts = aut.post(j, symbol);
                    for &it in itgts {
                        let matched = jtgts
                            .is_some_and(|tgts| tgts.iter().any(|&jt| sim[it * n + jt]));
                        if !matched {
                            sim[i * n + j] = false;
                            changed = true;
                            continue 'pairs;
                        }
                    }
                }
            }
        }
    }
    sim
}

impl Nfa {
    /// Language-equivalent automaton with no more states than `self`,
    /// obtained by merging mutually similar states.
    #[must_use]
    pub fn reduce(&self) -> Nfa {
        let n = self.num_states();
        if n == 0 {
            return self.clone();
        }
        let sim = max_simulation(self);

        // representative of each class is its smallest member
        let mut repr = vec![0; n];
        for i in 0..n {
            let mut r = i;
            for j in 0..i {
                if sim[i * n + j] && sim[j * n + i] {
                    r = j;
                    break;
                }
            }
            repr[i] = r;
        }

        let mut dense = vec![0; n];
        let mut count = 0;
        for (state, &r) in repr.iter().enumerate() {
            if r == state {
                dense[state] = count;
                count += 1;
            }
        }

        let mut reduced = Nfa::with_states(count);
        for t in self.transitions() {
            reduced.add_transition(dense[repr[t.src]], t.symbol, dense[repr[t.tgt]]);
        }
        for state in self.initials() {
            reduced.add_initial(dense[repr[state]]);
        }
        for state in self.finals() {
            reduced.add_final(dense[repr[state]]);
        }
        reduced
    }
}
