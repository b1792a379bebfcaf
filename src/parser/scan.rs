//! Helpers over borrowed token slices.
//!
//! Sub-sequences are plain sub-slices of the caller's tokens, so splitting
//! never copies or frees anything.

use crate::lexer::{Operator, Token};

/// Finds the operator that splits `tokens`.
///
/// Categories are tried in [`Operator::PRIORITY`] order and the first
/// occurrence of the first category present wins, even if an operator of a
/// lower category appears further left.
pub fn find_operator(tokens: &[Token]) -> Option<(Operator, usize)> {
    Operator::PRIORITY.iter().find_map(|&op| {
        tokens
            .iter()
            .position(|t| t.is_operator(op))
            .map(|idx| (op, idx))
    })
}

pub fn contains_operator(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| t.operator().is_some())
}

pub fn count_operator(tokens: &[Token], op: Operator) -> usize {
    tokens.iter().filter(|t| t.is_operator(op)).count()
}

/// Left and right sides of the token at `idx`, which itself is dropped.
pub fn split_around(tokens: &[Token], idx: usize) -> (&[Token], &[Token]) {
    (&tokens[..idx], &tokens[idx + 1..])
}
