//! Nondeterministic finite automata for string-constraint solving.
//!
//! This crate provides the automaton collaborator consumed by the
//! noodlification core (`noodler-core`):
//!
//! - **Data model**: dense states, integer symbols, hash-backed δ
//! - **Structural operations**: [`Nfa::trim`], [`Nfa::revert`],
//!   [`Nfa::reduce`], [`Nfa::is_lang_empty`]
//! - **Construction surface**: [`Nfa::add_state`], [`Nfa::add_transition`],
//!   [`Nfa::unify_initial`], [`Nfa::unify_final`]
//! - **ε-aware constructions**: [`concat_eps`], [`intersect_eps`]
//!
//! # Examples
//!
//! ```
//! use noodler_nfa::Nfa;
//!
//! let mut nfa = Nfa::with_states(3);
//! nfa.add_initial(0);
//! nfa.add_final(2);
//! nfa.add_transition(0, 0, 1);
//! nfa.add_transition(1, 1, 2);
//!
//! assert!(nfa.is_in_lang(&[0, 1]));
//! assert!(!nfa.is_lang_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod eps;
pub mod nfa;
mod ops;
mod reduce;

pub use eps::{concat_eps, intersect_eps};
pub use nfa::{next_free_symbol, Nfa, State, Symbol, Transition};
