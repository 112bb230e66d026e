//! Nondeterministic Finite Automaton over an enumerated alphabet.
//!
//! States form a dense prefix `[0, N)` of the non-negative integers, which
//! keeps the transition relation indexable by source state and makes the
//! value one past the last state usable as a sentinel by callers. Symbols
//! are plain unsigned integers; no symbol carries built-in ε semantics.
//! Operations that need an ε-marker take it as an explicit argument and
//! conventionally use a fresh symbol strictly greater than every symbol of
//! the inputs (see [`next_free_symbol`]).

use rustc_hash::{FxHashMap, FxHashSet};

/// State identifier, an index into the dense state universe `[0, N)`.
pub type State = usize;

/// Symbol of the alphabet.
pub type Symbol = u64;

/// A single transition of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    /// Source state.
    pub src: State,
    /// Symbol labelling the transition.
    pub symbol: Symbol,
    /// Target state.
    pub tgt: State,
}

impl Transition {
    /// Create a new transition.
    #[must_use]
    pub const fn new(src: State, symbol: Symbol, tgt: State) -> Self {
        Self { src, symbol, tgt }
    }
}

/// Nondeterministic finite automaton.
///
/// The transition relation is stored per source state as a map from symbol
/// to the set of target states, so `δ(q, a)` is a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nfa {
    /// `delta[q]` maps each symbol to the set of successors of `q`.
    pub(crate) delta: Vec<FxHashMap<Symbol, FxHashSet<State>>>,
    /// Initial states.
    pub(crate) initial: FxHashSet<State>,
    /// Final (accepting) states.
    pub(crate) finals: FxHashSet<State>,
}

impl Nfa {
    /// Create an empty automaton with no states.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an automaton with `num_states` states and no transitions.
    #[must_use]
    pub fn with_states(num_states: usize) -> Self {
        Self {
            delta: vec![FxHashMap::default(); num_states],
            initial: FxHashSet::default(),
            finals: FxHashSet::default(),
        }
    }

    /// Number of states of the automaton.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.delta.len()
    }

    /// Add a fresh state and return its identifier.
    pub fn add_state(&mut self) -> State {
        self.delta.push(FxHashMap::default());
        self.delta.len() - 1
    }

    /// Grow the state universe so that `state` is a valid identifier.
    pub fn ensure_state(&mut self, state: State) {
        if state >= self.delta.len() {
            self.delta.resize_with(state + 1, FxHashMap::default);
        }
    }

    /// Mark a state as initial, growing the state universe if needed.
    pub fn add_initial(&mut self, state: State) {
        self.ensure_state(state);
        self.initial.insert(state);
    }

    /// Mark a state as final, growing the state universe if needed.
    pub fn add_final(&mut self, state: State) {
        self.ensure_state(state);
        self.finals.insert(state);
    }

    /// Remove all initial states.
    pub fn clear_initial(&mut self) {
        self.initial.clear();
    }

    /// Remove all final states.
    pub fn clear_final(&mut self) {
        self.finals.clear();
    }

    /// Check whether `state` is initial.
    #[must_use]
    pub fn is_initial(&self, state: State) -> bool {
        self.initial.contains(&state)
    }

    /// Check whether `state` is final.
    #[must_use]
    pub fn is_final(&self, state: State) -> bool {
        self.finals.contains(&state)
    }

    /// Iterate over the initial states in arbitrary order.
    pub fn initials(&self) -> impl Iterator<Item = State> + '_ {
        self.initial.iter().copied()
    }

    /// Iterate over the final states in arbitrary order.
    pub fn finals(&self) -> impl Iterator<Item = State> + '_ {
        self.finals.iter().copied()
    }

    /// Add a transition, growing the state universe if needed.
    pub fn add_transition(&mut self, src: State, symbol: Symbol, tgt: State) {
        self.ensure_state(src.max(tgt));
        self.delta[src]
            .entry(symbol)
            .or_insert_with(FxHashSet::default)
            .insert(tgt);
    }

    /// Check whether the transition `(src, symbol, tgt)` is present.
    #[must_use]
    pub fn has_transition(&self, src: State, symbol: Symbol, tgt: State) -> bool {
        self.post(src, symbol).is_some_and(|tgts| tgts.contains(&tgt))
    }

    /// Successors of `state` under `symbol`, if any.
    #[must_use]
    pub fn post(&self, state: State, symbol: Symbol) -> Option<&FxHashSet<State>> {
        self.delta.get(state).and_then(|posts| posts.get(&symbol))
    }

    /// Iterate over the outgoing transitions of `state` grouped by symbol.
    pub fn symbol_posts(
        &self,
        state: State,
    ) -> impl Iterator<Item = (Symbol, &FxHashSet<State>)> + '_ {
        self.delta
            .get(state)
            .into_iter()
            .flat_map(|posts| posts.iter().map(|(&symbol, tgts)| (symbol, tgts)))
    }

    /// Iterate over every transition of the automaton.
    ///
    /// Sources are visited in ascending order; the order of symbols and
    /// targets within one source is arbitrary. Callers that need a total
    /// order sort the collected transitions.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.delta.iter().enumerate().flat_map(|(src, posts)| {
            posts.iter().flat_map(move |(&symbol, tgts)| {
                tgts.iter().map(move |&tgt| Transition { src, symbol, tgt })
            })
        })
    }

    /// The largest symbol occurring on any transition, or `None` for an
    /// automaton without transitions.
    #[must_use]
    pub fn max_symbol(&self) -> Option<Symbol> {
        self.delta
            .iter()
            .flat_map(|posts| posts.keys().copied())
            .max()
    }

    /// Membership test: does the automaton accept `word`?
    ///
    /// Symbols are compared verbatim; no symbol is interpreted as ε.
    #[must_use]
    pub fn is_in_lang(&self, word: &[Symbol]) -> bool {
        let mut current: FxHashSet<State> = self.initial.clone();
        for &symbol in word {
            let mut next = FxHashSet::default();
            for &state in &current {
                if let Some(tgts) = self.post(state, symbol) {
                    next.extend(tgts.iter().copied());
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current.iter().any(|&state| self.finals.contains(&state))
    }

    /// Collapse all initial states into a single fresh one.
    ///
    /// The fresh state receives a copy of every outgoing transition of the
    /// former initial states and is final iff one of them was. Automata with
    /// at most one initial state are left untouched.
    pub fn unify_initial(&mut self) {
        if self.initial.len() <= 1 {
            return;
        }
        let old_initial: Vec<State> = {
            let mut states: Vec<State> = self.initial.iter().copied().collect();
            states.sort_unstable();
            states
        };
        let fresh = self.add_state();
        for state in old_initial {
            let posts: Vec<(Symbol, Vec<State>)> = self.delta[state]
                .iter()
                .map(|(&symbol, tgts)| (symbol, tgts.iter().copied().collect()))
                .collect();
            for (symbol, tgts) in posts {
                for tgt in tgts {
                    self.add_transition(fresh, symbol, tgt);
                }
            }
            if self.finals.contains(&state) {
                self.finals.insert(fresh);
            }
        }
        self.initial.clear();
        self.initial.insert(fresh);
    }

    /// Collapse all final states into a single fresh one.
    ///
    /// The fresh state receives a copy of every incoming transition of the
    /// former final states and is initial iff one of them was.
    pub fn unify_final(&mut self) {
        if self.finals.len() <= 1 {
            return;
        }
        let incoming: Vec<Transition> = self
            .transitions()
            .filter(|t| self.finals.contains(&t.tgt))
            .collect();
        let was_initial = self.finals.iter().any(|f| self.initial.contains(f));
        let fresh = self.add_state();
        for t in incoming {
            self.add_transition(t.src, t.symbol, fresh);
        }
        if was_initial {
            self.initial.insert(fresh);
        }
        self.finals.clear();
        self.finals.insert(fresh);
    }
}

/// The smallest symbol strictly greater than every symbol of the given
/// automata, usable as a fresh ε-marker.
#[must_use]
pub fn next_free_symbol<'a, I>(automata: I) -> Symbol
where
    I: IntoIterator<Item = &'a Nfa>,
{
    automata
        .into_iter()
        .filter_map(Nfa::max_symbol)
        .max()
        .map_or(0, |symbol| symbol + 1)
}
