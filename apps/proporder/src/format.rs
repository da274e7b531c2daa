//! Fix application over stylesheet files.
//!
//! Every matched file goes through `engine::fix_source`, which applies the
//! block-scoped fixes pass by pass until the text is stable. Files are
//! processed in parallel and results are returned sorted by path.

use crate::engine::fix_source;
use crate::lint::collect_targets;
use crate::models::options::Options;
use crate::utils::display_path;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub preview: Option<String>,
    pub original: Option<String>,
    /// Findings left after fixing, e.g. `invalidFormat` statements.
    pub remaining: usize,
}

/// Fix files matched by `patterns`.
///
/// When `write` is true changed files are rewritten in place. Otherwise a
/// preview of the fixed text is returned for changed files, plus the
/// original when `capture_old` is set (for diffs).
pub fn run_format(
    repo_root: &Path,
    patterns: &[String],
    options: &Options,
    write: bool,
    capture_old: bool,
) -> (Vec<FormatResult>, Vec<String>) {
    let (targets, mut errors) = collect_targets(repo_root, patterns);

    let per_file: Vec<Result<FormatResult, String>> = targets
        .par_iter()
        .map(|path| {
            let data = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            let (fixed, rest) = fix_source(&data, options);
            let changed = fixed != data;
            let remaining = rest.len();
            if changed && write {
                fs::write(path, &fixed)
                    .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            }
            Ok(FormatResult {
                file: display_path(repo_root, path),
                changed,
                preview: if changed && !write { Some(fixed) } else { None },
                original: if capture_old { Some(data) } else { None },
                remaining,
            })
        })
        .collect();

    let mut results = Vec::new();
    for res in per_file {
        match res {
            Ok(r) => results.push(r),
            Err(e) => errors.push(e),
        }
    }
    results.sort_by(|a, b| a.file.cmp(&b.file));
    (results, errors)
}
