//! Lint runner over stylesheet files.
//!
//! Produces a `LintResult` with one issue per finding and a summary.
//! Files are matched by glob relative to the repository root and checked in
//! parallel; issues are sorted by file, line and column.

use crate::engine::check_source;
use crate::models::finding::{Finding, RULE_ID};
use crate::models::options::Options;
use crate::models::{Issue, LintResult, Summary};
use crate::utils::{display_path, line_col};
use glob::glob;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand `patterns` under `root` into a sorted, de-duplicated file list.
///
/// Bad patterns and unreadable entries are reported as errors, not fatal.
pub fn collect_targets(root: &Path, patterns: &[String]) -> (Vec<PathBuf>, Vec<String>) {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    let mut errors: Vec<String> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        match glob(&pattern) {
            Ok(paths) => {
                for entry in paths {
                    match entry {
                        Ok(p) if p.is_file() => {
                            targets.insert(p);
                        }
                        Ok(_) => {}
                        Err(e) => errors.push(format!("cannot read {}: {}", e.path().display(), e)),
                    }
                }
            }
            Err(e) => errors.push(format!("invalid pattern '{}': {}", pat, e)),
        }
    }
    (targets.into_iter().collect(), errors)
}

/// Convert rule findings for one file into issues.
pub fn to_issues(file: &str, source: &str, findings: &[Finding], level: &str) -> Vec<Issue> {
    findings
        .iter()
        .map(|f| {
            let (line, column) = line_col(source, f.range.0);
            Issue {
                file: file.to_string(),
                rule: RULE_ID.to_string(),
                message_id: f.message_id.as_str().to_string(),
                severity: level.to_string(),
                line,
                column,
                message: f.message.clone(),
                fixable: f.fix.is_some(),
            }
        })
        .collect()
}

/// Run lint across files matched by `patterns`.
///
/// Severity comes from `level` (error|warn|info); `error` findings drive the
/// non-zero exit upstream.
pub fn run_lint(
    repo_root: &Path,
    patterns: &[String],
    options: &Options,
    level: &str,
) -> (LintResult, Vec<String>) {
    let (targets, mut errors) = collect_targets(repo_root, patterns);

    let per_file: Vec<Result<Vec<Issue>, String>> = targets
        .par_iter()
        .map(|path| {
            let data = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            let file = display_path(repo_root, path);
            let findings = check_source(&data, options);
            Ok(to_issues(&file, &data, &findings, level))
        })
        .collect();

    let mut issues: Vec<Issue> = Vec::new();
    let mut files = 0usize;
    for res in per_file {
        match res {
            Ok(found) => {
                files += 1;
                issues.extend(found);
            }
            Err(e) => errors.push(e),
        }
    }
    // Deterministic ordering of issues by file then position
    issues.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(a.column.cmp(&b.column))
    });

    let summary = summarize(&issues, files);
    (LintResult { issues, summary }, errors)
}

fn summarize(issues: &[Issue], files: usize) -> Summary {
    let mut errors = 0usize;
    let mut warnings = 0usize;
    let mut infos = 0usize;
    for is in issues {
        match is.severity.as_str() {
            "error" => errors += 1,
            "warn" | "warning" => warnings += 1,
            _ => infos += 1,
        }
    }
    Summary {
        errors,
        warnings,
        infos,
        files,
        fixable: issues.iter().filter(|i| i.fixable).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn default_patterns() -> Vec<String> {
        crate::config::DEFAULT_PATTERNS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_run_lint_reports_per_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("styles")).unwrap();
        fs::write(
            root.join("styles/a.css"),
            ".a {\n  background-color: red;\n  color: blue;\n}\n",
        )
        .unwrap();
        fs::write(root.join("styles/b.scss"), ".b {\n  color: red;\n  margin: 0;\n}\n").unwrap();
        fs::write(root.join("styles/c.less"), ".c {\n  *zoom: 1;\n}\n").unwrap();
        fs::write(root.join("notes.txt"), ".d { z-index: 1; color: red; }").unwrap();

        let (res, errors) = run_lint(root, &default_patterns(), &Options::default(), "error");
        assert!(errors.is_empty());
        assert_eq!(res.summary.files, 3);
        assert_eq!(res.summary.errors, 2);
        assert_eq!(res.summary.fixable, 1);
        assert_eq!(res.issues[0].file, "styles/a.css");
        assert_eq!(res.issues[0].message_id, "shouldSortProperties");
        assert_eq!((res.issues[0].line, res.issues[0].column), (1, 4));
        assert_eq!(res.issues[1].file, "styles/c.less");
        assert_eq!(res.issues[1].message_id, "invalidFormat");
        assert_eq!((res.issues[1].line, res.issues[1].column), (2, 3));
    }

    #[test]
    fn test_level_controls_severity_counts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.css"), "a { margin: 0; color: red; }").unwrap();
        let (res, _) = run_lint(root, &default_patterns(), &Options::default(), "warn");
        assert_eq!(res.summary.errors, 0);
        assert_eq!(res.summary.warnings, 1);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let dir = tempdir().unwrap();
        let (res, errors) = run_lint(dir.path(), &["a/***[".to_string()], &Options::default(), "error");
        assert_eq!(res.summary.files, 0);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("invalid pattern"));
    }
}
