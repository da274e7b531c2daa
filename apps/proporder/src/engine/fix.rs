//! Fix synthesis for an out-of-order block.
//!
//! The replaced span runs from the first comparable unit to the last one.
//! Each comparable unit occupies a slot; slots are refilled with the units
//! in stable sorted order while everything between slots (whitespace,
//! pivots, floating comments) is copied verbatim. The `;` terminator belongs
//! to the slot, not the unit, so a last declaration without `;` stays last
//! in shape even when another declaration moves into its place.

use super::comments::Unit;
use super::detect::comparable;
use super::policy::OrderPolicy;
use crate::models::finding::Fix;

/// Build the replacement for `units`, or `None` when already sorted.
pub fn synthesize(source: &str, units: &[Unit<'_>], policy: &OrderPolicy) -> Option<Fix> {
    let slots = comparable(units, policy);
    if slots.len() < 2 {
        return None;
    }
    let mut sorted = slots.clone();
    // `sort_by` is stable: equal keys keep their source order.
    sorted.sort_by(|a, b| policy.compare(&a.1.property, &b.1.property));
    if sorted.iter().map(|(i, _)| *i).eq(slots.iter().map(|(i, _)| *i)) {
        return None;
    }

    let first = &units[slots[0].0];
    let last = &units[slots[slots.len() - 1].0];
    let mut text = String::with_capacity(last.end - first.start);
    for (k, (slot_idx, slot_decl)) in slots.iter().enumerate() {
        let placed = &units[sorted[k].0];
        text.push_str(unit_body(source, placed));
        if slot_decl.terminated {
            text.push(';');
        }
        if let Some((next_idx, _)) = slots.get(k + 1) {
            text.push_str(&source[units[*slot_idx].end..units[*next_idx].start]);
        }
    }
    Some(Fix {
        range: (first.start, last.end),
        text,
    })
}

/// Unit text without the declaration's own `;`.
fn unit_body<'s>(source: &'s str, unit: &Unit<'_>) -> &'s str {
    let terminated = unit.declaration().map(|d| d.terminated).unwrap_or(false);
    let end = if terminated { unit.end - 1 } else { unit.end };
    &source[unit.start..end]
}

/// Apply non-overlapping fixes in range order. Returns the new text and the
/// number of fixes applied; overlapping fixes are left for a later pass.
pub fn apply_fixes<'f>(source: &str, fixes: impl IntoIterator<Item = &'f Fix>) -> (String, usize) {
    let mut fixes: Vec<&Fix> = fixes.into_iter().collect();
    fixes.sort_by_key(|f| (f.range.0, f.range.1));
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    let mut applied = 0usize;
    for fix in fixes {
        let (start, end) = fix.range;
        if start < cursor || end > source.len() || start > end {
            continue;
        }
        out.push_str(&source[cursor..start]);
        out.push_str(&fix.text);
        cursor = end;
        applied += 1;
    }
    out.push_str(&source[cursor..]);
    (out, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::comments::resolve_units;
    use crate::engine::tokenizer::tokenize;
    use crate::models::options::Options;

    fn fixed(src: &str, opts: &Options) -> String {
        let open = src.find('{').unwrap();
        let close = src.rfind('}').unwrap();
        let seq = tokenize(src, open + 1, close);
        let units = resolve_units(&seq, opts.preserve_comments);
        let policy = OrderPolicy::new(opts);
        match synthesize(src, &units, &policy) {
            Some(fix) => apply_fixes(src, [&fix]).0,
            None => src.to_string(),
        }
    }

    #[test]
    fn test_reorders_by_length() {
        let out = fixed(
            "a { background-color: red; z-index: 10; color: blue; }",
            &Options::default(),
        );
        assert_eq!(out, "a { color: blue; z-index: 10; background-color: red; }");
    }

    #[test]
    fn test_alphabetical_mode() {
        let out = fixed(
            "a { z: 1; color: red; background: blue; }",
            &Options::new(false, Vec::new(), true),
        );
        assert_eq!(out, "a { background: blue; color: red; z: 1; }");
    }

    #[test]
    fn test_ignored_property_keeps_its_slot() {
        let out = fixed(
            "a { margin: 0; display: block; color: red; }",
            &Options::new(true, vec!["display".to_string()], true),
        );
        assert_eq!(out, "a { color: red; display: block; margin: 0; }");
    }

    #[test]
    fn test_attached_comment_moves_with_declaration() {
        let src = "a {\n  /* stacking */\n  z-index: 1;\n  color: red;\n}";
        let out = fixed(src, &Options::default());
        assert_eq!(out, "a {\n  color: red;\n  /* stacking */\n  z-index: 1;\n}");
    }

    #[test]
    fn test_floating_comment_stays_in_place() {
        let src = "a {\n  z-index: 1;\n\n  /* section */\n\n  color: red;\n}";
        let out = fixed(src, &Options::default());
        assert_eq!(out, "a {\n  color: red;\n\n  /* section */\n\n  z-index: 1;\n}");
    }

    #[test]
    fn test_comments_float_when_not_preserved() {
        let src = "a {\n  /* stacking */\n  z-index: 1;\n  color: red;\n}";
        let out = fixed(src, &Options::new(true, Vec::new(), false));
        assert_eq!(out, "a {\n  /* stacking */\n  color: red;\n  z-index: 1;\n}");
    }

    #[test]
    fn test_minified_last_declaration_keeps_shape() {
        let out = fixed(".sel{margin:0;color:red}", &Options::default());
        assert_eq!(out, ".sel{color:red;margin:0}");
    }

    #[test]
    fn test_trailing_line_comment_never_swallows_the_terminator() {
        let src = ".a {\n  z-index: 0;\n  color: red // note\n}";
        let out = fixed(src, &Options::default());
        assert_eq!(out, ".a {\n  color: red;\n  z-index: 0 // note\n}");
        let open = out.find('{').unwrap();
        let seq = tokenize(&out, open + 1, out.rfind('}').unwrap());
        let names: Vec<_> = seq.declarations().map(|d| d.property.as_str()).collect();
        assert_eq!(names, vec!["color", "z-index"]);
    }

    #[test]
    fn test_nested_block_is_a_pivot() {
        let src = "a {\n  margin: 0;\n  & b { top: 0; }\n  color: red;\n}";
        let out = fixed(src, &Options::default());
        assert_eq!(out, "a {\n  color: red;\n  & b { top: 0; }\n  margin: 0;\n}");
    }

    #[test]
    fn test_stable_for_duplicates_and_idempotent() {
        let opts = Options::default();
        let src = "a { margin: 1px; color: red; margin: 2px; color: blue; }";
        let once = fixed(src, &opts);
        assert_eq!(once, "a { color: red; color: blue; margin: 1px; margin: 2px; }");
        assert_eq!(fixed(&once, &opts), once);
    }

    #[test]
    fn test_apply_fixes_skips_overlaps() {
        let a = Fix {
            range: (0, 5),
            text: "AAAAA".into(),
        };
        let b = Fix {
            range: (3, 7),
            text: "B".into(),
        };
        let (out, n) = apply_fixes("0123456789", [&a, &b]);
        assert_eq!(out, "AAAAA56789");
        assert_eq!(n, 1);
    }
}
