//! Segmentation of an NFA along its ε-transitions.
//!
//! A trimmed automaton whose ε-transitions arise from a concatenation over
//! a fresh ε-symbol splits into a linear chain of ε-free *segments*. This
//! pass labels every ε-transition with its *depth*, the number of
//! ε-transitions between it and the initial states, and materializes the
//! untrimmed segments. The depth lists are the only part of the pipeline
//! needing a global view of the automaton; the noodlifier afterwards works
//! purely on local `(entry, exit)` keys.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use noodler_nfa::{Nfa, State, Symbol, Transition};

use crate::error::{NoodlerError, Result};

/// Ordered ε-transition lists indexed by depth.
///
/// Each list is sorted ascending by `(src, tgt)`. The order is observable:
/// it fixes the enumeration order of noodles.
pub type EpsilonDepthTransitions = Vec<Vec<Transition>>;

/// Result of segmenting an automaton along a designated ε-symbol.
#[derive(Debug, Clone)]
pub struct Segmentation {
    epsilon: Symbol,
    depths: EpsilonDepthTransitions,
    segments: Vec<Nfa>,
}

/// Forward closure of `seeds` using only non-ε transitions.
fn non_epsilon_closure(aut: &Nfa, seeds: &[State], epsilon: Symbol) -> FxHashSet<State> {
    let mut reached: FxHashSet<State> = seeds.iter().copied().collect();
    let mut queue: VecDeque<State> = seeds.iter().copied().collect();
    while let Some(state) = queue.pop_front() {
        for (symbol, tgts) in aut.symbol_posts(state) {
            if symbol == epsilon {
                continue;
            }
            for &tgt in tgts {
                if reached.insert(tgt) {
                    queue.push_back(tgt);
                }
            }
        }
    }
    reached
}

/// Copy of `aut` with every ε-transition removed. Keeps the state
/// universe, initial and final states.
fn strip_epsilon(aut: &Nfa, epsilon: Symbol) -> Nfa {
    let mut stripped = Nfa::with_states(aut.num_states());
    for t in aut.transitions() {
        if t.symbol != epsilon {
            stripped.add_transition(t.src, t.symbol, t.tgt);
        }
    }
    for state in aut.initials() {
        stripped.add_initial(state);
    }
    for state in aut.finals() {
        stripped.add_final(state);
    }
    stripped
}

impl Segmentation {
    /// Segment a trimmed automaton along `epsilon`.
    ///
    /// Fails with [`NoodlerError::MalformedAutomaton`] when the
    /// ε-transitions do not partition into disjoint depths: an ε-cycle, an
    /// ε-transition reachable at two depths, or one never reached by the
    /// layering (the input was not trimmed).
    pub fn new(aut: &Nfa, epsilon: Symbol) -> Result<Self> {
        let mut all_epsilon: Vec<Transition> =
            aut.transitions().filter(|t| t.symbol == epsilon).collect();
        all_epsilon.sort_unstable();

        let mut depths: EpsilonDepthTransitions = Vec::new();
        let mut assigned: FxHashSet<Transition> = FxHashSet::default();
        let mut frontier: Vec<State> = aut.initials().collect();
        frontier.sort_unstable();

        loop {
            let closure = non_epsilon_closure(aut, &frontier, epsilon);
            let level: Vec<Transition> = all_epsilon
                .iter()
                .filter(|t| closure.contains(&t.src))
                .copied()
                .collect();
            if level.is_empty() {
                break;
            }
            for &t in &level {
                if !assigned.insert(t) {
                    return Err(NoodlerError::MalformedAutomaton(format!(
                        "ε-transition {} -> {} is reachable at more than one depth",
                        t.src, t.tgt
                    )));
                }
            }
            frontier = level.iter().map(|t| t.tgt).collect();
            frontier.sort_unstable();
            frontier.dedup();
            depths.push(level);
        }

        if let Some(t) = all_epsilon.iter().copied().find(|t| !assigned.contains(t)) {
            return Err(NoodlerError::MalformedAutomaton(format!(
                "ε-transition {} -> {} is not reachable from the initial states; \
                 the input is not trimmed",
                t.src, t.tgt
            )));
        }

        let segments = Self::build_segments(aut, epsilon, &depths);
        debug!(
            depths = depths.len(),
            segments = segments.len(),
            "segmented automaton"
        );

        Ok(Self {
            epsilon,
            depths,
            segments,
        })
    }

    /// Build the untrimmed segments in source-ordered order.
    ///
    /// Untrimmed segments share the parent's state numbering: each is the
    /// input minus all ε-transitions, with the initial and final sets
    /// adjusted per depth. Trimming a segment afterwards cuts it down to
    /// its own states, which is what the noodlifier relies on.
    fn build_segments(aut: &Nfa, epsilon: Symbol, depths: &EpsilonDepthTransitions) -> Vec<Nfa> {
        let base = strip_epsilon(aut, epsilon);
        let depth_count = depths.len();
        if depth_count == 0 {
            return vec![base];
        }

        let mut segments = Vec::with_capacity(depth_count + 1);
        for k in 0..=depth_count {
            let mut segment = base.clone();
            if k > 0 {
                segment.clear_initial();
                for t in &depths[k - 1] {
                    segment.add_initial(t.tgt);
                }
            }
            if k < depth_count {
                segment.clear_final();
                for t in &depths[k] {
                    segment.add_final(t.src);
                }
            }
            segments.push(segment);
        }
        segments
    }

    /// The ε-symbol this segmentation was computed for.
    #[must_use]
    pub fn epsilon(&self) -> Symbol {
        self.epsilon
    }

    /// The ε-transition lists indexed by depth.
    #[must_use]
    pub fn epsilon_depths(&self) -> &EpsilonDepthTransitions {
        &self.depths
    }

    /// Number of ε-depths.
    #[must_use]
    pub fn num_depths(&self) -> usize {
        self.depths.len()
    }

    /// The segments in source-ordered order, untrimmed: they share the
    /// parent automaton's state numbering.
    #[must_use]
    pub fn untrimmed_segments(&self) -> &[Nfa] {
        &self.segments
    }

    /// The segments trimmed to their own states.
    #[must_use]
    pub fn trimmed_segments(&self) -> Vec<Nfa> {
        self.segments
            .iter()
            .map(|segment| {
                let mut trimmed = segment.clone();
                trimmed.trim();
                trimmed
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Symbol = 10;

    /// 0 -a-> 1 -ε-> 2 -b-> 3 with two parallel ε-successors of 1.
    fn forked() -> Nfa {
        let mut aut = Nfa::with_states(5);
        aut.add_initial(0);
        aut.add_final(3);
        aut.add_transition(0, 0, 1);
        aut.add_transition(1, EPS, 2);
        aut.add_transition(1, EPS, 4);
        aut.add_transition(2, 1, 3);
        aut.add_transition(4, 1, 3);
        aut
    }

    #[test]
    fn test_single_segment_without_epsilon() {
        let mut aut = Nfa::with_states(2);
        aut.add_initial(0);
        aut.add_final(1);
        aut.add_transition(0, 0, 1);

        let seg = Segmentation::new(&aut, EPS).unwrap();
        assert_eq!(seg.num_depths(), 0);
        assert_eq!(seg.untrimmed_segments().len(), 1);
        assert_eq!(seg.untrimmed_segments()[0], aut);
    }

    #[test]
    fn test_depth_lists_are_sorted() {
        let seg = Segmentation::new(&forked(), EPS).unwrap();
        assert_eq!(seg.num_depths(), 1);
        assert_eq!(
            seg.epsilon_depths()[0],
            vec![Transition::new(1, EPS, 2), Transition::new(1, EPS, 4)]
        );
    }

    #[test]
    fn test_segment_boundaries() {
        let seg = Segmentation::new(&forked(), EPS).unwrap();
        let segments = seg.untrimmed_segments();
        assert_eq!(segments.len(), 2);

        let first = &segments[0];
        assert!(first.is_initial(0));
        assert!(first.is_final(1));
        assert!(!first.is_final(3));
        assert!(!first.has_transition(1, EPS, 2));

        let last = &segments[1];
        assert!(last.is_initial(2));
        assert!(last.is_initial(4));
        assert!(!last.is_initial(0));
        assert!(last.is_final(3));
    }

    #[test]
    fn test_trimmed_segments_shrink_to_own_states() {
        let seg = Segmentation::new(&forked(), EPS).unwrap();
        let trimmed = seg.trimmed_segments();
        assert_eq!(trimmed[0].num_states(), 2);
        assert!(trimmed[0].is_in_lang(&[0]));
        assert_eq!(trimmed[1].num_states(), 3);
        assert!(trimmed[1].is_in_lang(&[1]));
    }

    #[test]
    fn test_two_depths() {
        // 0 -a-> 1 -ε-> 2 -b-> 3 -ε-> 4 -c-> 5
        let mut aut = Nfa::with_states(6);
        aut.add_initial(0);
        aut.add_final(5);
        aut.add_transition(0, 0, 1);
        aut.add_transition(1, EPS, 2);
        aut.add_transition(2, 1, 3);
        aut.add_transition(3, EPS, 4);
        aut.add_transition(4, 2, 5);

        let seg = Segmentation::new(&aut, EPS).unwrap();
        assert_eq!(seg.num_depths(), 2);
        assert_eq!(seg.epsilon_depths()[0], vec![Transition::new(1, EPS, 2)]);
        assert_eq!(seg.epsilon_depths()[1], vec![Transition::new(3, EPS, 4)]);
        assert_eq!(seg.untrimmed_segments().len(), 3);
    }

    #[test]
    fn test_epsilon_cycle_is_malformed() {
        let mut aut = Nfa::with_states(2);
        aut.add_initial(0);
        aut.add_final(1);
        aut.add_transition(0, EPS, 1);
        aut.add_transition(1, 0, 0);

        let err = Segmentation::new(&aut, EPS).unwrap_err();
        assert!(matches!(err, NoodlerError::MalformedAutomaton(_)));
    }

    #[test]
    fn test_unreachable_epsilon_is_malformed() {
        let mut aut = Nfa::with_states(4);
        aut.add_initial(0);
        aut.add_final(1);
        aut.add_transition(0, 0, 1);
        aut.add_transition(2, EPS, 3);

        let err = Segmentation::new(&aut, EPS).unwrap_err();
        assert!(matches!(err, NoodlerError::MalformedAutomaton(_)));
    }
}
