//! Constraint normalization for device output.
//!
//! Two passes, in order:
//!
//! 1. Identifier canonicalization: every lowercase `x`/`y` becomes the
//!    device-reserved `X`/`Y`. This is a plain text substitution, so letters
//!    inside function names are rewritten too (`exp` becomes `eXp`).
//! 2. Chained inequality rewrite: `low <= V <= high` with numeric bounds becomes
//!    `low<=V and V<=high`. Any other constraint shape is emitted verbatim.
//!
//! The rewritten form never matches the chain shape again, so normalizing an
//! already-normalized pair is a no-op.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::equation::{DEPENDENT_VAR, INDEPENDENT_VAR};

fn chain_pattern() -> &'static Regex {
    static CHAIN: OnceLock<Regex> = OnceLock::new();
    CHAIN.get_or_init(|| {
        Regex::new(
            r"^\s*([-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+))\s*<=\s*([XY])\s*<=\s*([-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+))\s*$",
        )
        .expect("valid chained inequality regex")
    })
}

/// Replace the reserved lowercase identifiers with their device forms.
#[must_use]
pub fn canonicalize_identifiers(text: &str) -> Cow<'_, str> {
    let needs_rewrite = text
        .chars()
        .any(|c| c == INDEPENDENT_VAR || c == DEPENDENT_VAR);
    if !needs_rewrite {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| {
                if c == INDEPENDENT_VAR || c == DEPENDENT_VAR {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect(),
    )
}

/// Rewrite a two-sided numeric chain into its conjunctive form.
///
/// Expects identifiers to be canonicalized already; returns the input
/// unchanged when it is not exactly `low <= X|Y <= high`.
#[must_use]
pub fn rewrite_chain(constraint: &str) -> Cow<'_, str> {
    match chain_pattern().captures(constraint) {
        Some(caps) => {
            let (low, var, high) = (&caps[1], &caps[2], &caps[3]);
            Cow::Owned(format!("{low}<={var} and {var}<={high}"))
        }
        None => Cow::Borrowed(constraint),
    }
}

/// Normalize an expression/constraint pair for rendering.
#[must_use]
pub fn normalize(expression: &str, constraint: &str) -> (String, String) {
    let expression = canonicalize_identifiers(expression).into_owned();
    let constraint = canonicalize_identifiers(constraint);
    let constraint = rewrite_chain(&constraint).into_owned();
    (expression, constraint)
}
