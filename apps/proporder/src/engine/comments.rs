//! Comment attachment and composite units.
//!
//! A comment directly above a declaration (no blank line and no other
//! statement in between) is a leading comment of that declaration. The pair
//! forms one unit that always moves as a whole. Every other comment floats
//! and keeps its absolute position.

use super::tokenizer::{BlockSequence, CommentItem, DeclarationItem, Item};

#[derive(Debug, Clone)]
/// A movable or pinned span of the block: one item plus, for declarations,
/// its attached leading comments.
pub struct Unit<'a> {
    pub comments: Vec<&'a CommentItem>,
    pub item: &'a Item,
    pub start: usize,
    pub end: usize,
}

impl<'a> Unit<'a> {
    pub fn declaration(&self) -> Option<&'a DeclarationItem> {
        match self.item {
            Item::Declaration(d) => Some(d),
            _ => None,
        }
    }
}

/// Group the non-blank items of `seq` into units.
///
/// With `preserve_comments` off, no comment is ever attached.
pub fn resolve_units(seq: &BlockSequence, preserve_comments: bool) -> Vec<Unit<'_>> {
    let mut units: Vec<Unit<'_>> = Vec::new();
    // Comments seen since the last statement, with no blank line after them.
    let mut pending: Vec<&Item> = Vec::new();
    for item in &seq.items {
        match item {
            Item::Comment(_) if preserve_comments => pending.push(item),
            Item::Declaration(d) => {
                let comments: Vec<&CommentItem> = pending
                    .drain(..)
                    .filter_map(|it| match it {
                        Item::Comment(c) => Some(c),
                        _ => None,
                    })
                    .collect();
                let start = comments.first().map(|c| c.start).unwrap_or(d.start);
                units.push(Unit {
                    comments,
                    item,
                    start,
                    end: d.end,
                });
            }
            Item::Blank { .. } => flush_floating(&mut pending, &mut units),
            _ => {
                flush_floating(&mut pending, &mut units);
                units.push(single(item));
            }
        }
    }
    flush_floating(&mut pending, &mut units);
    units
}

fn single(item: &Item) -> Unit<'_> {
    let (start, end) = item.span();
    Unit {
        comments: Vec::new(),
        item,
        start,
        end,
    }
}

/// Emit pending comments as floating units of their own.
fn flush_floating<'a>(pending: &mut Vec<&'a Item>, units: &mut Vec<Unit<'a>>) {
    units.extend(pending.drain(..).map(single));
}
