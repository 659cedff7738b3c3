//! Alignment of two clause maps by code, and positional pairing of numbers

use shared_types::{ClauseCode, ClauseMap, NumericToken, Presence};
use std::collections::BTreeSet;

/// Sorted union of codes from both documents with their presence
pub fn align(left: &ClauseMap, right: &ClauseMap) -> Vec<(ClauseCode, Presence)> {
    let union: BTreeSet<&ClauseCode> = left.codes().chain(right.codes()).collect();

    union
        .into_iter()
        .filter_map(|code| {
            Presence::classify(left.contains(code), right.contains(code))
                .map(|presence| (code.clone(), presence))
        })
        .collect()
}

/// Right-pad the shorter sequence with placeholders
///
/// Index `i` on one side is compared with index `i` on the other. No attempt is
/// made to realign numbers inserted or removed mid-clause.
pub fn pair_numbers(
    left: &[NumericToken],
    right: &[NumericToken],
) -> (Vec<NumericToken>, Vec<NumericToken>) {
    let len = left.len().max(right.len());
    (pad(left, len), pad(right, len))
}

fn pad(tokens: &[NumericToken], len: usize) -> Vec<NumericToken> {
    let mut padded = tokens.to_vec();
    padded.resize_with(len, NumericToken::placeholder);
    padded
}
