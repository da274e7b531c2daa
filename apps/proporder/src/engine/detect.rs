//! Violation detection over composite units.

use super::comments::Unit;
use super::policy::OrderPolicy;
use super::tokenizer::{BlockSequence, DeclarationItem, Item};
use std::cmp::Ordering;

/// Units taking part in ordering, as `(unit index, declaration)` pairs.
///
/// Ignored properties and every non-declaration unit are pivots and are
/// left out.
pub fn comparable<'a>(units: &[Unit<'a>], policy: &OrderPolicy) -> Vec<(usize, &'a DeclarationItem)> {
    units
        .iter()
        .enumerate()
        .filter_map(|(i, u)| u.declaration().map(|d| (i, d)))
        .filter(|(_, d)| !policy.is_ignored(&d.property))
        .collect()
}

/// First adjacent pair of comparable declarations that is out of order.
pub fn find_violation<'a>(
    units: &[Unit<'a>],
    policy: &OrderPolicy,
) -> Option<(&'a DeclarationItem, &'a DeclarationItem)> {
    let decls = comparable(units, policy);
    decls
        .windows(2)
        .map(|w| (w[0].1, w[1].1))
        .find(|(prev, next)| policy.compare(&prev.property, &next.property) == Ordering::Greater)
}

/// Spans and raw text of statements that are not `identifier: value`.
pub fn invalid_statements(seq: &BlockSequence) -> Vec<(usize, usize, &str)> {
    seq.items
        .iter()
        .filter_map(|it| match it {
            Item::Invalid { raw, start, end } => Some((*start, *end, raw.as_str())),
            _ => None,
        })
        .collect()
}
