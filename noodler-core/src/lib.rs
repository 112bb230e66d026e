//! Noodlification core for word-equation solving over NFAs.
//!
//! Given an automaton segmented by a distinguished ε-symbol into a linear
//! chain of sub-automata, *noodlification* enumerates every "noodle": an
//! ordered tuple of trimmed sub-automata obtained by picking, at each
//! ε-boundary, one concrete ε-transition witnessing how the left half
//! glues to the right half. The operation underlies solving word equations
//! `x₁·x₂·…·xₙ = R` by intersecting the ε-separated left concatenation
//! with the right-hand automaton and extracting per-variable languages.
//!
//! - **Segmentation**: ε-depth labelling and segment extraction
//!   ([`Segmentation`])
//! - **Noodlifier**: shared-sub-automaton enumeration ([`noodlify`])
//! - **Equation driver**: [`noodlify_for_equation`] and its shared-handle
//!   variant [`noodlify_for_equation_shared`]
//!
//! # Examples
//!
//! ```
//! use noodler_nfa::Nfa;
//! use noodler_core::{noodlify_for_equation, Params};
//!
//! // x · y = "ab", with x accepting "a" and y accepting "b"
//! let mut x = Nfa::with_states(2);
//! x.add_initial(0);
//! x.add_final(1);
//! x.add_transition(0, 0, 1);
//!
//! let mut y = Nfa::with_states(2);
//! y.add_initial(0);
//! y.add_final(1);
//! y.add_transition(0, 1, 1);
//!
//! let mut right = Nfa::with_states(3);
//! right.add_initial(0);
//! right.add_final(2);
//! right.add_transition(0, 0, 1);
//! right.add_transition(1, 1, 2);
//!
//! let noodles = noodlify_for_equation(vec![x, y], &right, false, &Params::new()).unwrap();
//! assert_eq!(noodles.len(), 1);
//! assert_eq!(noodles[0].len(), 2);
//! assert!(noodles[0][0].is_in_lang(&[0]));
//! assert!(noodles[0][1].is_in_lang(&[1]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod driver;
pub mod error;
pub mod noodlify;
pub mod params;
pub mod segmentation;

pub use driver::{noodlify_for_equation, noodlify_for_equation_shared};
pub use error::{NoodlerError, Result};
pub use noodlify::{noodlify, noodlify_with_config, Noodle, NoodleSequence};
pub use params::{NoodlerConfig, Params, Reduction};
pub use segmentation::{EpsilonDepthTransitions, Segmentation};
