//! The `css-property-order` rule.
//!
//! Pipeline per block: tokenize the body, attach comments into units,
//! detect the first out-of-order pair, synthesize a block-scoped fix, then
//! recurse into nested blocks, each judged on its own.

pub mod comments;
pub mod detect;
pub mod fix;
pub mod policy;
pub mod scan;
pub mod tokenizer;

use crate::blocks::top_level_blocks;
use crate::models::finding::{Finding, MessageId};
use crate::models::options::Options;
use comments::resolve_units;
use detect::{find_violation, invalid_statements};
use policy::OrderPolicy;
use tokenizer::{tokenize, Item};

/// Upper bound on fix passes; nested fixes overlapping their parent's span
/// need one extra pass per nesting level.
pub const MAX_FIX_PASSES: usize = 10;

/// Check the block whose braces sit at `open` and `close` in `source`.
///
/// Findings carry absolute offsets into `source`. The sort finding is
/// anchored on the opening brace.
pub fn check_block(source: &str, open: usize, close: usize, options: &Options) -> Vec<Finding> {
    let seq = tokenize(source, open + 1, close);
    let units = resolve_units(&seq, options.preserve_comments);
    let policy = OrderPolicy::new(options);
    let mut findings = Vec::new();

    for (start, end, _) in invalid_statements(&seq) {
        findings.push(Finding {
            message_id: MessageId::InvalidFormat,
            range: (start, end),
            message: message_for(MessageId::InvalidFormat, &policy),
            fix: None,
        });
    }

    if find_violation(&units, &policy).is_some() {
        findings.push(Finding {
            message_id: MessageId::ShouldSortProperties,
            range: (open, open + 1),
            message: message_for(MessageId::ShouldSortProperties, &policy),
            fix: fix::synthesize(source, &units, &policy),
        });
    }

    for item in &seq.items {
        if let Item::Nested(n) = item {
            findings.extend(check_block(source, n.open, n.close, options));
        }
    }
    findings
}

/// Check every block of a stylesheet. Findings are ordered by position.
pub fn check_source(source: &str, options: &Options) -> Vec<Finding> {
    let mut findings: Vec<Finding> = top_level_blocks(source)
        .into_iter()
        .flat_map(|(open, close)| check_block(source, open, close, options))
        .collect();
    findings.sort_by_key(|f| f.range);
    findings
}

/// Apply fixes until the source is stable. Returns the fixed text and the
/// findings that remain (those without a fix, e.g. `invalidFormat`).
pub fn fix_source(source: &str, options: &Options) -> (String, Vec<Finding>) {
    let mut current = source.to_string();
    for _ in 0..MAX_FIX_PASSES {
        let findings = check_source(&current, options);
        let (next, applied) = fix::apply_fixes(&current, findings.iter().filter_map(|f| f.fix.as_ref()));
        if applied == 0 {
            return (current, findings);
        }
        current = next;
    }
    let remaining = check_source(&current, options);
    (current, remaining)
}

fn message_for(id: MessageId, policy: &OrderPolicy) -> String {
    match id {
        MessageId::ShouldSortProperties if policy.by_length() => {
            "CSS properties should be sorted by length, from shortest to longest".to_string()
        }
        MessageId::ShouldSortProperties => "CSS properties should be sorted alphabetically".to_string(),
        MessageId::InvalidFormat => "Unrecognized CSS property format".to_string(),
    }
}
