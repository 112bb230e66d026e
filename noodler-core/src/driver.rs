//! Word-equation driver.
//!
//! Solves the decomposition step of `x₁·x₂·…·xₙ = R`: the left-side
//! automata are concatenated over a fresh ε-symbol, intersected with the
//! right-side automaton while preserving the ε-transitions, optionally
//! reduced, and finally noodlified. Each noodle then witnesses one way of
//! splitting `R` among the left-side variables.

use std::rc::Rc;

use tracing::debug;

use noodler_nfa::{concat_eps, intersect_eps, next_free_symbol, Nfa};

use crate::error::Result;
use crate::noodlify::{noodlify, NoodleSequence};
use crate::params::{Params, Reduction};

/// Noodlify the equation `left[0]·left[1]·…·left[n-1] = right`.
///
/// Value-semantics entry point: the left automata are owned and may be
/// mutated freely (they are unified in place when `params` requests a
/// reduction). See [`Params`] for the recognized options.
pub fn noodlify_for_equation(
    mut left: Vec<Nfa>,
    right: &Nfa,
    include_empty: bool,
    params: &Params,
) -> Result<NoodleSequence> {
    let reduction = params.reduction();
    if reduction.is_some() {
        for aut in &mut left {
            aut.unify_initial();
            aut.unify_final();
        }
    }
    if left.is_empty() || right.is_lang_empty() {
        return Ok(Vec::new());
    }
    let refs: Vec<&Nfa> = left.iter().collect();
    noodlify_concatenation(&refs, right, include_empty, reduction)
}

/// Noodlify the equation with shared left-side handles.
///
/// Handle-semantics entry point: when `params` requests no reduction, the
/// shared automata are used as-is and never copied or mutated. When a
/// reduction is requested, unification works on private clones, so the
/// caller's automata stay untouched either way.
pub fn noodlify_for_equation_shared(
    left: &[Rc<Nfa>],
    right: &Nfa,
    include_empty: bool,
    params: &Params,
) -> Result<NoodleSequence> {
    let reduction = params.reduction();
    if left.is_empty() || right.is_lang_empty() {
        return Ok(Vec::new());
    }
    if reduction.is_some() {
        let unified: Vec<Nfa> = left
            .iter()
            .map(|aut| {
                let mut copy = (**aut).clone();
                copy.unify_initial();
                copy.unify_final();
                copy
            })
            .collect();
        let refs: Vec<&Nfa> = unified.iter().collect();
        return noodlify_concatenation(&refs, right, include_empty, reduction);
    }
    let refs: Vec<&Nfa> = left.iter().map(|aut| aut.as_ref()).collect();
    noodlify_concatenation(&refs, right, include_empty, reduction)
}

/// Shared tail of both entry points: build the ε-preserving product of the
/// concatenated left side with `right`, reduce it as requested and
/// noodlify.
fn noodlify_concatenation(
    left: &[&Nfa],
    right: &Nfa,
    include_empty: bool,
    reduction: Option<Reduction>,
) -> Result<NoodleSequence> {
    let epsilon = next_free_symbol(left.iter().copied().chain(std::iter::once(right)));

    let mut concatenated = left[0].clone();
    for &aut in &left[1..] {
        concatenated = concat_eps(&concatenated, aut, epsilon);
    }

    let mut product = intersect_eps(&concatenated, right, epsilon);
    product.trim();
    debug!(
        epsilon,
        product_states = product.num_states(),
        "built ε-preserving product of the equation"
    );
    if product.is_lang_empty() {
        return Ok(Vec::new());
    }

    if let Some(reduction) = reduction {
        let before = product.num_states();
        product = match reduction {
            Reduction::Forward => product.reduce(),
            Reduction::Backward => product.revert().reduce().revert(),
            Reduction::Bidirectional => product.reduce().revert().reduce().revert(),
        };
        debug!(
            before,
            after = product.num_states(),
            "reduced the product automaton"
        );
    }

    noodlify(&product, epsilon, include_empty)
}
