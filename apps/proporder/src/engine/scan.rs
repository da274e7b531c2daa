//! Byte-level scanning helpers shared by the tokenizer and block discovery.
//!
//! All helpers take an exclusive `end` bound and never read past it. A
//! `None` return means the construct is unterminated within the bound.

/// Skip a quoted string starting at `i` (which must hold the quote byte).
///
/// Returns the index just past the closing quote. Strings cannot span an
/// unescaped line break, so a newline ends the scan as unterminated.
pub fn skip_string(bytes: &[u8], i: usize, end: usize) -> Option<usize> {
    let quote = bytes[i];
    let mut j = i + 1;
    while j < end {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return None,
            c if c == quote => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

/// Skip a `/* ... */` comment starting at `i`. Returns the index past `*/`.
pub fn skip_block_comment(bytes: &[u8], i: usize, end: usize) -> Option<usize> {
    let mut j = i + 2;
    while j + 1 < end {
        if bytes[j] == b'*' && bytes[j + 1] == b'/' {
            return Some(j + 2);
        }
        j += 1;
    }
    None
}

/// Skip a `// ...` line comment starting at `i`. Returns the index of the
/// terminating newline (not consumed) or `end`.
pub fn skip_line_comment(bytes: &[u8], i: usize, end: usize) -> usize {
    let mut j = i + 2;
    while j < end && bytes[j] != b'\n' {
        j += 1;
    }
    j
}

pub fn starts_block_comment(bytes: &[u8], i: usize, end: usize) -> bool {
    i + 1 < end && bytes[i] == b'/' && bytes[i + 1] == b'*'
}

/// Whether a `//` at `i` opens an SCSS/LESS line comment.
///
/// Only counts when it follows whitespace, a statement boundary, or the
/// start of the scanned region, so `http://` and `url(//cdn)` stay values.
pub fn starts_line_comment(bytes: &[u8], i: usize, start: usize, end: usize) -> bool {
    if !(i + 1 < end && bytes[i] == b'/' && bytes[i + 1] == b'/') {
        return false;
    }
    if i == start {
        return true;
    }
    matches!(bytes[i - 1], b' ' | b'\t' | b'\r' | b'\n' | b';' | b'{' | b'}')
}

/// Find the `}` matching the `{` at `open`, skipping strings and comments.
pub fn match_brace(bytes: &[u8], open: usize, end: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut parens = 0usize;
    let mut j = open + 1;
    while j < end {
        match bytes[j] {
            b'"' | b'\'' => {
                j = skip_string(bytes, j, end)?;
                continue;
            }
            b'\\' => {
                j += 2;
                continue;
            }
            b'/' if starts_block_comment(bytes, j, end) => {
                j = skip_block_comment(bytes, j, end)?;
                continue;
            }
            b'/' if parens == 0 && starts_line_comment(bytes, j, open + 1, end) => {
                j = skip_line_comment(bytes, j, end);
                continue;
            }
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}
