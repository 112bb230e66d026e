//! Noodle enumeration over a segmented automaton.
//!
//! A *noodle* is one way of threading the segmented product: an ordered
//! tuple of trimmed sub-automata, one per segment, glued across a concrete
//! choice of one ε-transition per depth. Sub-automata are keyed by their
//! `(entry, exit)` state pair and shared between noodles, so each distinct
//! trimmed segment is constructed at most once.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use noodler_nfa::{Nfa, State, Symbol, Transition};

use crate::error::{NoodlerError, Result};
use crate::params::NoodlerConfig;
use crate::segmentation::Segmentation;

/// One noodle: an ordered sequence of shared trimmed sub-automata.
pub type Noodle = Vec<Rc<Nfa>>;

/// All noodles of one call, in enumeration order.
pub type NoodleSequence = Vec<Noodle>;

/// Insert the `(entry, exit)` restriction of `segment` into `table`.
///
/// The restricted copy keeps the automaton's transitions, narrows the
/// initial or final set as requested and trims. Empty restrictions are
/// kept only when `include_empty` is set.
fn insert_restriction(
    table: &mut FxHashMap<(State, State), Rc<Nfa>>,
    segment: &Nfa,
    key: (State, State),
    entry: Option<State>,
    exit: Option<State>,
    include_empty: bool,
) {
    let mut restricted = segment.clone();
    if let Some(entry) = entry {
        restricted.clear_initial();
        restricted.add_initial(entry);
    }
    if let Some(exit) = exit {
        restricted.clear_final();
        restricted.add_final(exit);
    }
    restricted.trim();
    if restricted.num_states() > 0 || include_empty {
        table.insert(key, Rc::new(restricted));
    }
}

/// Sorted initial states of a segment.
fn sorted_initials(segment: &Nfa) -> Vec<State> {
    let mut states: Vec<State> = segment.initials().collect();
    states.sort_unstable();
    states
}

/// Sorted final states of a segment.
fn sorted_finals(segment: &Nfa) -> Vec<State> {
    let mut states: Vec<State> = segment.finals().collect();
    states.sort_unstable();
    states
}

/// Enumerate every noodle of a segmented automaton.
///
/// Equivalent to [`noodlify_with_config`] with the default (unbounded)
/// configuration.
pub fn noodlify(aut: &Nfa, epsilon: Symbol, include_empty: bool) -> Result<NoodleSequence> {
    noodlify_with_config(aut, epsilon, include_empty, &NoodlerConfig::default())
}

/// Enumerate every noodle of a segmented automaton.
///
/// `aut` must be trimmed and segmentable along `epsilon` (see
/// [`Segmentation::new`]). With `include_empty`, sub-automata that trim to
/// the empty automaton are retained instead of dropped. The enumeration
/// order is deterministic: depth lists are ordered ascending `(src, tgt)`
/// and choices are decoded from a mixed-radix counter with depth 0 as the
/// least significant digit.
pub fn noodlify_with_config(
    aut: &Nfa,
    epsilon: Symbol,
    include_empty: bool,
    config: &NoodlerConfig,
) -> Result<NoodleSequence> {
    let segmentation = Segmentation::new(aut, epsilon)?;
    let segments = segmentation.untrimmed_segments();

    if segments.len() == 1 {
        let mut only = segments[0].clone();
        only.trim();
        if only.num_states() > 0 || include_empty {
            return Ok(vec![vec![Rc::new(only)]]);
        }
        return Ok(Vec::new());
    }

    let depths = segmentation.epsilon_depths();
    let depth_count = depths.len();

    let mut candidates: u128 = 1;
    for level in depths {
        candidates = candidates.saturating_mul(level.len() as u128);
    }
    if let Some(limit) = config.max_candidates {
        if candidates > u128::from(limit) {
            return Err(NoodlerError::EnumerationTooLarge { candidates, limit });
        }
    }

    // one past the last state of `aut`, never a real entry or exit
    let sentinel: State = aut.num_states();
    let last = segments.len() - 1;

    let mut table: FxHashMap<(State, State), Rc<Nfa>> = FxHashMap::default();
    for (idx, segment) in segments.iter().enumerate() {
        if idx == 0 {
            // the first segment keeps all initial states
            for exit in sorted_finals(segment) {
                insert_restriction(
                    &mut table,
                    segment,
                    (sentinel, exit),
                    None,
                    Some(exit),
                    include_empty,
                );
            }
        } else if idx == last {
            // the last segment keeps all final states
            for entry in sorted_initials(segment) {
                insert_restriction(
                    &mut table,
                    segment,
                    (entry, sentinel),
                    Some(entry),
                    None,
                    include_empty,
                );
            }
        } else {
            for entry in sorted_initials(segment) {
                for exit in sorted_finals(segment) {
                    insert_restriction(
                        &mut table,
                        segment,
                        (entry, exit),
                        Some(entry),
                        Some(exit),
                        include_empty,
                    );
                }
            }
        }
    }

    let mut noodles: NoodleSequence = Vec::new();
    let mut choice: SmallVec<[Transition; 8]> = SmallVec::with_capacity(depth_count);
    for index in 0..candidates {
        choice.clear();
        let mut rest = index;
        for level in depths {
            let radix = level.len() as u128;
            choice.push(level[(rest % radix) as usize]);
            rest /= radix;
        }

        let mut noodle: Noodle = Vec::with_capacity(depth_count + 1);
        match table.get(&(sentinel, choice[0].src)) {
            Some(segment) => noodle.push(Rc::clone(segment)),
            None => continue,
        }
        let mut glued = true;
        for pair in choice.windows(2) {
            match table.get(&(pair[0].tgt, pair[1].src)) {
                Some(segment) => noodle.push(Rc::clone(segment)),
                None => {
                    glued = false;
                    break;
                }
            }
        }
        if !glued {
            continue;
        }
        match table.get(&(choice[depth_count - 1].tgt, sentinel)) {
            Some(segment) => noodle.push(Rc::clone(segment)),
            None => continue,
        }
        noodles.push(noodle);
    }

    debug!(
        depths = depth_count,
        candidates = %candidates,
        emitted = noodles.len(),
        "noodle enumeration finished"
    );
    Ok(noodles)
}
