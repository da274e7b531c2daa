//! Resolved rule options.
//!
//! `Options` carries no optional fields: defaults are applied once when the
//! configuration is resolved (see `config::resolve_effective`) and the value
//! is read-only afterwards, so it can be shared across worker threads.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Options of the `css-property-order` rule.
pub struct Options {
    /// Length-ascending order with alphabetical tie-break when true,
    /// plain alphabetical order when false.
    pub sort_by_length: bool,
    /// Property names exempt from ordering; they keep their slot on fix.
    pub ignore_properties: BTreeSet<String>,
    /// Keep leading comments attached to the declaration they precede.
    pub preserve_comments: bool,
}

impl Options {
    pub fn new(
        sort_by_length: bool,
        ignore_properties: impl IntoIterator<Item = String>,
        preserve_comments: bool,
    ) -> Self {
        Self {
            sort_by_length,
            ignore_properties: ignore_properties.into_iter().collect(),
            preserve_comments,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(true, Vec::new(), true)
    }
}
