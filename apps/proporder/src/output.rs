//! Output rendering for lint and format commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary. Host errors (bad patterns,
//! unreadable files) go to stderr in human mode and into an `errors` array
//! in JSON mode.

use crate::format::FormatResult;
use crate::models::LintResult;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_errors(errors: &[String]) {
    for e in errors {
        eprintln!("{} {}", crate::utils::error_prefix(), e);
    }
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
    }
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str, errors: &[String]) {
    match output {
        "json" => print_json(&compose_lint_json(res, errors)),
        _ => {
            print_errors(errors);
            let color = use_colors(output);
            for is in &res.issues {
                let (label, icon) = match is.severity.as_str() {
                    "error" => ("⟦error⟧", "✖"),
                    "warning" | "warn" => ("⟦warn⟧", "▲"),
                    _ => ("⟦info⟧", "◆"),
                };
                let location = format!("{}:{}:{}", is.file, is.line, is.column);
                let fixable = if is.fixable { " (fixable)" } else { "" };
                if color {
                    let (label, icon) = match is.severity.as_str() {
                        "error" => (label.red().bold().to_string(), icon.red().to_string()),
                        "warning" | "warn" => {
                            (label.yellow().bold().to_string(), icon.yellow().to_string())
                        }
                        _ => (label.blue().bold().to_string(), icon.blue().to_string()),
                    };
                    println!(
                        "{} {} {} ❲{}/{}❳ — {}{}",
                        icon,
                        label,
                        location.bold(),
                        is.rule,
                        is.message_id,
                        is.message,
                        fixable.bright_black()
                    );
                } else {
                    println!(
                        "{} {} {} ❲{}/{}❳ — {}{}",
                        icon, label, location, is.rule, is.message_id, is.message, fixable
                    );
                }
            }
            let summary = format!(
                "— Summary — errors={} warnings={} infos={} fixable={} files={}",
                res.summary.errors,
                res.summary.warnings,
                res.summary.infos,
                res.summary.fixable,
                res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print formatting results. When `write` is false, previews or diffs are
/// emitted for changed files; otherwise only file statuses are shown.
pub fn print_format(results: &[FormatResult], output: &str, write: bool, diff: bool, errors: &[String]) {
    match output {
        "json" => print_json(&compose_format_json(results, write, diff, errors)),
        _ => {
            print_errors(errors);
            let color = use_colors(output);
            for r in results {
                if !r.changed {
                    if color {
                        println!("{} {}", "no changes:".bright_black(), r.file);
                    } else {
                        println!("no changes: {}", r.file);
                    }
                } else if write {
                    if color {
                        println!("{} {}", "✏️  formatted:".green().bold(), r.file.bold());
                    } else {
                        println!("✏️  formatted: {}", r.file);
                    }
                } else {
                    let body = if diff {
                        build_diff(r.original.as_deref(), r.preview.as_deref())
                    } else {
                        None
                    };
                    if let Some(text) = body.or_else(|| r.preview.clone()) {
                        if color {
                            println!("{} {}\n{}", "---".cyan().bold(), r.file.bold(), text);
                        } else {
                            println!("--- {}\n{}", r.file, text);
                        }
                    }
                }
                if r.remaining > 0 {
                    let note = format!("{} finding(s) left that cannot be fixed", r.remaining);
                    if color {
                        println!("  {} {}", "note:".yellow(), note);
                    } else {
                        println!("  note: {}", note);
                    }
                }
            }
        }
    }
}

/// Line diff of `old` against `new`: the common head and tail are elided
/// and the differing middle is shown as `-`/`+` lines under one hunk header.
pub fn build_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old = old?;
    let new = new?;
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();
    let head = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
    let tail = a[head..]
        .iter()
        .rev()
        .zip(b[head..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let a_mid = &a[head..a.len() - tail];
    let b_mid = &b[head..b.len() - tail];
    if a_mid.is_empty() && b_mid.is_empty() {
        return None;
    }
    let mut out = format!(
        "@@ -{},{} +{},{} @@\n",
        head + 1,
        a_mid.len(),
        head + 1,
        b_mid.len()
    );
    for line in a_mid {
        out.push('-');
        out.push_str(line);
        out.push('\n');
    }
    for line in b_mid {
        out.push('+');
        out.push_str(line);
        out.push('\n');
    }
    Some(out)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult, errors: &[String]) -> JsonVal {
    json!({
        "issues": res.issues,
        "summary": res.summary,
        "errors": errors,
    })
}

/// Compose format JSON object (pure) for testing/snapshot purposes.
pub fn compose_format_json(results: &[FormatResult], write: bool, diff: bool, errors: &[String]) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "changed": r.changed,
                "wrote": write && r.changed,
                "remaining": r.remaining,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write { build_diff(r.original.as_deref(), r.preview.as_deref()) } else { None }
            })
        })
        .collect();
    let summary = json!({
        "changed": results.iter().filter(|r| r.changed).count(),
        "total": results.len(),
        "wrote": if write { results.iter().filter(|r| r.changed).count() } else { 0 },
    });
    json!({"results": items, "summary": summary, "errors": errors})
}
