//! Top-level block discovery in a stylesheet.
//!
//! Finds every outermost `{ ... }` in a CSS/LESS/SCSS file, skipping strings,
//! comments and `#{...}` interpolation in selectors. Nested blocks are left to
//! the rule, which recurses into them.

use crate::engine::scan::{
    match_brace, skip_block_comment, skip_line_comment, skip_string, starts_block_comment,
    starts_line_comment,
};

/// Offsets of `{` and its matching `}` for each top-level block.
///
/// A block whose closing brace is missing extends to the end of the source.
pub fn top_level_blocks(source: &str) -> Vec<(usize, usize)> {
    let bytes = source.as_bytes();
    let end = bytes.len();
    let mut blocks = Vec::new();
    let mut parens = 0usize;
    let mut j = 0;
    while j < end {
        match bytes[j] {
            b'"' | b'\'' => {
                j = skip_string(bytes, j, end).unwrap_or_else(|| skip_line_comment(bytes, j, end));
                continue;
            }
            b'\\' => {
                j += 2;
                continue;
            }
            b'/' if starts_block_comment(bytes, j, end) => match skip_block_comment(bytes, j, end) {
                Some(after) => {
                    j = after;
                    continue;
                }
                None => break,
            },
            b'/' if parens == 0 && starts_line_comment(bytes, j, 0, end) => {
                j = skip_line_comment(bytes, j, end);
                continue;
            }
            b'#' if j + 1 < end && bytes[j + 1] == b'{' => match match_brace(bytes, j + 1, end) {
                Some(close) => {
                    j = close + 1;
                    continue;
                }
                None => break,
            },
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b'{' => match match_brace(bytes, j, end) {
                Some(close) => {
                    blocks.push((j, close));
                    j = close + 1;
                    parens = 0;
                    continue;
                }
                None => {
                    blocks.push((j, end));
                    break;
                }
            },
            _ => {}
        }
        j += 1;
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(src: &str) -> Vec<&str> {
        top_level_blocks(src)
            .into_iter()
            .map(|(open, close)| &src[open + 1..close])
            .collect()
    }

    #[test]
    fn test_finds_each_rule_body() {
        let src = ".class1 { color: red; }\n.class2 { background: blue; }\n.class3 { margin: 0; }";
        assert_eq!(bodies(src), vec![" color: red; ", " background: blue; ", " margin: 0; "]);
    }

    #[test]
    fn test_nested_blocks_stay_inside_parent() {
        let src = "@media (min-width: 1px) {\n  .a { color: red; }\n}\n.b { top: 0; }";
        let found = bodies(src);
        assert_eq!(found.len(), 2);
        assert!(found[0].contains(".a { color: red; }"));
    }

    #[test]
    fn test_skips_comments_strings_and_interpolation() {
        let src = "/* a { } */\n// b { }\n@import \"c{\";\n.d-#{$x} { top: 0; }";
        assert_eq!(bodies(src), vec![" top: 0; "]);
    }

    #[test]
    fn test_unclosed_block_extends_to_end() {
        let src = "a { color: red;";
        assert_eq!(top_level_blocks(src), vec![(2, src.len())]);
    }
}
