//! Shared data models for rule findings, rule options, and lint output.

pub mod finding;
pub mod options;

use serde::Serialize;

#[derive(Serialize)]
/// A single lint issue with severity and location.
pub struct Issue {
    pub file: String,
    pub rule: String,
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub severity: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub fixable: bool,
}

#[derive(Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
    pub fixable: usize,
}

#[derive(Serialize)]
/// Lint results container.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}
