//! Declaration tokenizer for a single block body.
//!
//! Splits the text between a `{` and its matching `}` into an ordered list
//! of items: declarations, comments, blank lines, nested blocks, directives,
//! invalid statements and an opaque remainder. The scanner tracks `(`/`[`
//! nesting, quotes, inline comments and `#{...}` interpolation so that a `;`,
//! `:` or `{` inside them never splits a statement.
//!
//! Malformed input never fails: once a string, comment or bracket cannot be
//! closed, the rest of the body becomes a single `Opaque` item.

use super::scan::{
    match_brace, skip_block_comment, skip_line_comment, skip_string, starts_block_comment,
    starts_line_comment,
};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `property: value;` statement or preprocessor variable assignment.
pub struct DeclarationItem {
    pub property: String,
    pub raw: String,
    pub start: usize,
    pub end: usize,
    pub is_custom_property: bool,
    pub is_variable: bool,
    pub important: bool,
    /// Statement ended with `;` (the last declaration may omit it).
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `/* ... */` or `// ...` comment between statements.
pub struct CommentItem {
    pub raw: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A nested rule or at-rule with its own body, e.g. `&:hover { ... }`.
pub struct NestedItem {
    pub start: usize,
    pub end: usize,
    /// Offset of the nested `{`.
    pub open: usize,
    /// Offset of the matching `}`.
    pub close: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Declaration(DeclarationItem),
    Comment(CommentItem),
    /// Whitespace containing at least two line breaks.
    Blank { start: usize, end: usize },
    Nested(NestedItem),
    /// Brace-less at-rule (`@include x;`) or mixin call (`.mixin();`).
    Directive { start: usize, end: usize },
    /// Statement that is not `identifier: value` shaped.
    Invalid { raw: String, start: usize, end: usize },
    /// Unparseable remainder of the body.
    Opaque { start: usize, end: usize },
}

impl Item {
    pub fn span(&self) -> (usize, usize) {
        match self {
            Item::Declaration(d) => (d.start, d.end),
            Item::Comment(c) => (c.start, c.end),
            Item::Nested(n) => (n.start, n.end),
            Item::Blank { start, end }
            | Item::Directive { start, end }
            | Item::Invalid { start, end, .. }
            | Item::Opaque { start, end } => (*start, *end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Items of one block body in source order, with the body's offsets.
pub struct BlockSequence {
    pub start: usize,
    pub end: usize,
    pub items: Vec<Item>,
}

impl BlockSequence {
    pub fn declarations(&self) -> impl Iterator<Item = &DeclarationItem> {
        self.items.iter().filter_map(|it| match it {
            Item::Declaration(d) => Some(d),
            _ => None,
        })
    }
}

enum Statement {
    /// Ends at the given index (exclusive), `;` included when terminated.
    Simple { end: usize, terminated: bool },
    Block { open: usize, close: usize },
    Malformed,
}

fn property_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:--[\w-]*|[$@]?-?[A-Za-z_][\w-]*)$").expect("valid property regex")
    })
}

/// Tokenize the body `source[start..end]`. Offsets in the result are
/// absolute positions in `source`.
pub fn tokenize(source: &str, start: usize, end: usize) -> BlockSequence {
    let bytes = source.as_bytes();
    let mut items = Vec::new();
    let mut pos = start;
    while pos < end {
        let ws_start = pos;
        let mut newlines = 0;
        while pos < end && bytes[pos].is_ascii_whitespace() {
            if bytes[pos] == b'\n' {
                newlines += 1;
            }
            pos += 1;
        }
        if newlines >= 2 {
            items.push(Item::Blank {
                start: ws_start,
                end: pos,
            });
        }
        if pos >= end {
            break;
        }

        if starts_block_comment(bytes, pos, end) {
            match skip_block_comment(bytes, pos, end) {
                Some(after) => {
                    items.push(comment(source, pos, after));
                    pos = after;
                    continue;
                }
                None => {
                    items.push(Item::Opaque { start: pos, end });
                    break;
                }
            }
        }
        if starts_line_comment(bytes, pos, start, end) {
            let after = skip_line_comment(bytes, pos, end);
            let trimmed = pos + source[pos..after].trim_end().len();
            items.push(comment(source, pos, trimmed));
            pos = after;
            continue;
        }
        // Empty statement; the stray `;` stays in the surrounding gap text.
        if bytes[pos] == b';' {
            pos += 1;
            continue;
        }

        match scan_statement(bytes, pos, end) {
            Statement::Simple {
                end: stmt_end,
                terminated,
            } => {
                items.push(classify(source, pos, stmt_end, terminated));
                pos = stmt_end;
            }
            Statement::Block { open, close } => {
                items.push(Item::Nested(NestedItem {
                    start: pos,
                    end: close + 1,
                    open,
                    close,
                }));
                pos = close + 1;
            }
            Statement::Malformed => {
                items.push(Item::Opaque { start: pos, end });
                break;
            }
        }
    }
    BlockSequence { start, end, items }
}

fn comment(source: &str, start: usize, end: usize) -> Item {
    Item::Comment(CommentItem {
        raw: source[start..end].to_string(),
        start,
        end,
    })
}

/// Scan one statement starting at `pos` up to a top-level `;`, a nested
/// `{`, or the end of the body.
///
/// An unterminated statement stops before a trailing `//` comment so the
/// comment is tokenized on its own and never ends up in front of a `;`.
fn scan_statement(bytes: &[u8], pos: usize, end: usize) -> Statement {
    let mut depth = 0usize;
    let mut interp = 0usize;
    let mut trailing_comment: Option<usize> = None;
    let mut j = pos;
    while j < end {
        if !bytes[j].is_ascii_whitespace() {
            trailing_comment = None;
        }
        match bytes[j] {
            b'"' | b'\'' => match skip_string(bytes, j, end) {
                Some(after) => {
                    j = after;
                    continue;
                }
                None => return Statement::Malformed,
            },
            b'\\' => {
                j += 2;
                continue;
            }
            b'/' if starts_block_comment(bytes, j, end) => match skip_block_comment(bytes, j, end) {
                Some(after) => {
                    j = after;
                    continue;
                }
                None => return Statement::Malformed,
            },
            b'/' if depth == 0 && starts_line_comment(bytes, j, pos, end) => {
                let at = j;
                j = skip_line_comment(bytes, j, end);
                if at > pos && interp == 0 {
                    trailing_comment = Some(at);
                }
                continue;
            }
            b'#' if j + 1 < end && bytes[j + 1] == b'{' => {
                interp += 1;
                j += 2;
                continue;
            }
            b'(' | b'[' => depth += 1,
            b')' | b']' => {
                if depth == 0 {
                    return Statement::Malformed;
                }
                depth -= 1;
            }
            b'{' if depth == 0 && interp == 0 => {
                return match match_brace(bytes, j, end) {
                    Some(close) => Statement::Block { open: j, close },
                    None => Statement::Malformed,
                };
            }
            b'}' if interp > 0 => interp -= 1,
            b'}' if depth == 0 => return Statement::Malformed,
            b';' if depth == 0 && interp == 0 => {
                return Statement::Simple {
                    end: j + 1,
                    terminated: true,
                };
            }
            _ => {}
        }
        j += 1;
    }
    if depth > 0 || interp > 0 {
        return Statement::Malformed;
    }
    let mut stmt_end = trailing_comment.unwrap_or(end.min(j));
    while stmt_end > pos && bytes[stmt_end - 1].is_ascii_whitespace() {
        stmt_end -= 1;
    }
    Statement::Simple {
        end: stmt_end,
        terminated: false,
    }
}

/// Classify the statement `source[start..end]` as directive, declaration
/// or invalid.
fn classify(source: &str, start: usize, end: usize, terminated: bool) -> Item {
    let raw = &source[start..end];
    let body = if terminated { &raw[..raw.len() - 1] } else { raw };
    let text = body.trim();

    if is_directive(text) {
        return Item::Directive { start, end };
    }
    if let Some(colon) = find_top_level_colon(body.as_bytes()) {
        let name = body[..colon].trim();
        let value = body[colon + 1..].trim();
        // Custom properties may hold an empty value (`--x: ;`).
        if (!value.is_empty() || name.starts_with("--")) && property_name_re().is_match(name) {
            let compact: String = value
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            return Item::Declaration(DeclarationItem {
                property: name.to_string(),
                raw: raw.to_string(),
                start,
                end,
                is_custom_property: name.starts_with("--"),
                is_variable: name.starts_with('$') || name.starts_with('@'),
                important: compact.ends_with("!important"),
                terminated,
            });
        }
    }
    Item::Invalid {
        raw: raw.to_string(),
        start,
        end,
    }
}

/// `@include x`, `@extend .a:hover`, `.mixin()`, `#ns > .mixin()`,
/// `&:extend(.a)`, `+mixin`. An `@name:` prefix is a LESS variable, not a
/// directive.
fn is_directive(text: &str) -> bool {
    if let Some(rest) = text.strip_prefix('@') {
        let word_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        return !rest[word_len..].trim_start().starts_with(':');
    }
    text.starts_with('.')
        || text.starts_with('&')
        || text.starts_with('+')
        || (text.starts_with('#') && !text.starts_with("#{"))
}

/// Index of the first `:` outside strings, comments, brackets and
/// interpolation.
fn find_top_level_colon(bytes: &[u8]) -> Option<usize> {
    let end = bytes.len();
    let mut depth = 0usize;
    let mut j = 0;
    while j < end {
        match bytes[j] {
            b'"' | b'\'' => {
                j = skip_string(bytes, j, end)?;
                continue;
            }
            b'/' if starts_block_comment(bytes, j, end) => {
                j = skip_block_comment(bytes, j, end)?;
                continue;
            }
            b'#' if j + 1 < end && bytes[j + 1] == b'{' => {
                depth += 1;
                j += 2;
                continue;
            }
            b'(' | b'[' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => return Some(j),
            _ => {}
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(src: &str) -> BlockSequence {
        let open = src.find('{').unwrap();
        let close = src.rfind('}').unwrap();
        tokenize(src, open + 1, close)
    }

    fn names(seq: &BlockSequence) -> Vec<&str> {
        seq.declarations().map(|d| d.property.as_str()).collect()
    }

    #[test]
    fn test_semicolons_inside_url_and_strings_do_not_split() {
        let seq = body(r#"a { background: url("x;y.png"); content: "a;b"; font: f(1;2); }"#);
        assert_eq!(names(&seq), vec!["background", "content", "font"]);
        assert_eq!(seq.items.len(), 3);
    }

    #[test]
    fn test_last_declaration_without_semicolon() {
        let src = ".sel{color:red;margin:0}";
        let seq = body(src);
        let decls: Vec<_> = seq.declarations().collect();
        assert_eq!(decls.len(), 2);
        assert!(decls[0].terminated);
        assert!(!decls[1].terminated);
        assert_eq!(decls[1].raw, "margin:0");
    }

    #[test]
    fn test_custom_properties_variables_and_important() {
        let seq = body("a { --main-color: blue; $gap: 4px; @size: 2px; color: red !important; margin: 0 ! IMPORTANT; }");
        let decls: Vec<_> = seq.declarations().collect();
        assert_eq!(decls.len(), 5);
        assert!(decls[0].is_custom_property);
        assert!(decls[1].is_variable && decls[2].is_variable);
        assert_eq!(decls[1].property, "$gap");
        assert!(decls[3].important);
        assert!(decls[4].important);
        assert!(!decls[0].important);
    }

    #[test]
    fn test_comments_and_blank_lines_are_items() {
        let src = "a {\n  /* lead */\n  color: red;\n\n  // note\n  margin: 0;\n}";
        let seq = body(src);
        let kinds: Vec<&str> = seq
            .items
            .iter()
            .map(|it| match it {
                Item::Declaration(_) => "decl",
                Item::Comment(_) => "comment",
                Item::Blank { .. } => "blank",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["comment", "decl", "blank", "comment", "decl"]);
        match &seq.items[3] {
            Item::Comment(c) => assert_eq!(c.raw, "// note"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nested_block_is_placeholder() {
        let src = ".parent {\n  color: red;\n  &.child { padding: 10px; }\n  margin: 0;\n}";
        let seq = body(src);
        assert_eq!(names(&seq), vec!["color", "margin"]);
        let nested = seq
            .items
            .iter()
            .find_map(|it| match it {
                Item::Nested(n) => Some(*n),
                _ => None,
            })
            .unwrap();
        assert_eq!(&src[nested.start..nested.end], "&.child { padding: 10px; }");
        assert_eq!(&src[nested.open..nested.open + 1], "{");
        assert_eq!(&src[nested.close..nested.close + 1], "}");
    }

    #[test]
    fn test_directives_and_invalid_statements() {
        let seq = body("a { .mixin(); @include size($w: 1px); @extend .b:hover; +mixin; *zoom: 1; color: red; }");
        let directives = seq
            .items
            .iter()
            .filter(|it| matches!(it, Item::Directive { .. }))
            .count();
        assert_eq!(directives, 4);
        let invalid: Vec<_> = seq
            .items
            .iter()
            .filter_map(|it| match it {
                Item::Invalid { raw, .. } => Some(raw.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(invalid, vec!["*zoom: 1;"]);
        assert_eq!(names(&seq), vec!["color"]);
    }

    #[test]
    fn test_less_variable_with_space_before_colon() {
        let seq = body("a { @zz-long-name : 1px; @media-x: 2px; color: red; }");
        assert_eq!(names(&seq), vec!["@zz-long-name", "@media-x", "color"]);
        let vars: Vec<bool> = seq.declarations().map(|d| d.is_variable).collect();
        assert_eq!(vars, vec![true, true, false]);
    }

    #[test]
    fn test_empty_value_only_allowed_for_custom_properties() {
        let seq = body("a { --x: ; --y:; color: ; }");
        assert_eq!(names(&seq), vec!["--x", "--y"]);
        assert!(matches!(seq.items.last(), Some(Item::Invalid { raw, .. }) if raw == "color: ;"));
    }

    #[test]
    fn test_trailing_line_comment_of_last_declaration_is_its_own_item() {
        let src = "a {\n  z-index: 0;\n  color: red // note\n}";
        let seq = body(src);
        let decls: Vec<_> = seq.declarations().collect();
        assert_eq!(decls[1].raw, "color: red");
        assert!(!decls[1].terminated);
        match seq.items.last() {
            Some(Item::Comment(c)) => assert_eq!(c.raw, "// note"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_interpolated_property_is_not_a_nested_block() {
        let seq = body("a { #{$side}-width: 1px; color: red; }");
        assert_eq!(seq.items.len(), 2);
        assert!(matches!(seq.items[0], Item::Invalid { .. }));
        assert_eq!(names(&seq), vec!["color"]);
    }

    #[test]
    fn test_unterminated_string_degrades_to_opaque() {
        let src = "a { color: red; content: \"oops; margin: 0; }";
        let seq = body(src);
        assert_eq!(names(&seq), vec!["color"]);
        assert!(matches!(seq.items.last(), Some(Item::Opaque { .. })));
    }

    #[test]
    fn test_unbalanced_paren_degrades_to_opaque() {
        let seq = body("a { width: calc(1px + 2px; color: red; }");
        assert_eq!(seq.items.len(), 1);
        assert!(matches!(seq.items[0], Item::Opaque { .. }));
    }

    #[test]
    fn test_items_are_ordered_and_disjoint() {
        let src = "a {\n  /* c */\n  z-index: 1;\n\n  & b { x: y; }\n  color: red\n}";
        let seq = body(src);
        let mut last = seq.start;
        for it in &seq.items {
            let (s, e) = it.span();
            assert!(s >= last && e > s, "{:?}", it);
            last = e;
        }
        assert!(last <= seq.end);
    }
}
