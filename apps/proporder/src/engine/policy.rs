//! Ordering policy for property names.

use crate::models::options::Options;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
/// Comparison over property names under the configured mode.
///
/// Length mode orders by character count with a case-sensitive
/// lexicographic tie-break; alphabetical mode uses the lexicographic order
/// only. Equal names always compare `Equal`.
pub struct OrderPolicy<'a> {
    options: &'a Options,
}

impl<'a> OrderPolicy<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    pub fn by_length(&self) -> bool {
        self.options.sort_by_length
    }

    /// Ignored names are never compared and keep their slot on fix.
    pub fn is_ignored(&self, property: &str) -> bool {
        self.options.ignore_properties.contains(property)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if self.options.sort_by_length {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
        } else {
            a.cmp(b)
        }
    }
}
