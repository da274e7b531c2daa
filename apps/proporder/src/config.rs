//! Configuration discovery and effective settings resolution.
//!
//! Proporder reads `proporder.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `patterns`: `**/*.css`, `**/*.less`, `**/*.scss`
//! - `output`: `human`
//! - `level`: `error`
//! - `format.write|diff|check`: false
//! - `rule.sortByLength`: true
//! - `rule.ignoreProperties`: empty
//! - `rule.preserveComments`: true
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::options::Options;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["proporder.toml", "proporder.yaml", "proporder.yml"];

pub const DEFAULT_PATTERNS: [&str; 3] = ["**/*.css", "**/*.less", "**/*.scss"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Formatting-related configuration section under `[format]`.
pub struct FormatCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Rule options under `[rule]`, keyed the way stylelint-style configs are.
pub struct RuleCfg {
    #[serde(rename = "sortByLength")]
    pub sort_by_length: Option<bool>,
    #[serde(rename = "ignoreProperties")]
    pub ignore_properties: Option<Vec<String>>,
    #[serde(rename = "preserveComments")]
    pub preserve_comments: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `proporder.toml|yaml`.
pub struct ProporderConfig {
    pub patterns: Option<Vec<String>>,
    pub output: Option<String>,
    /// Severity for findings: error|warn|info
    pub level: Option<String>,
    pub format: Option<FormatCfg>,
    pub rule: Option<RuleCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None`/empty means "not given".
pub struct Overrides {
    pub repo_root: Option<String>,
    pub patterns: Vec<String>,
    pub output: Option<String>,
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
    pub alphabetical: bool,
    pub ignore_properties: Vec<String>,
    pub no_preserve_comments: bool,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    /// Why the config file could not be read or parsed, if it could not.
    pub config_error: Option<String>,
    pub patterns: Vec<String>,
    pub output: String,
    pub level: String,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
    pub options: Options,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `proporder.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// First existing config file under `root`, in `CONFIG_FILES` order.
pub fn config_path(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.exists())
}

/// Load `ProporderConfig` from the first config file present.
///
/// Returns `None` when no file exists or it fails to parse.
pub fn load_config(root: &Path) -> Option<ProporderConfig> {
    read_config(&config_path(root)?).ok()
}

/// Read and parse one config file, by extension.
fn read_config(path: &Path) -> Result<ProporderConfig, String> {
    let s = fs::read_to_string(path).map_err(|e| e.to_string())?;
    if path.extension().and_then(|e| e.to_str()) == Some("toml") {
        toml::from_str(&s).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&s).map_err(|e| e.to_string())
    }
}

/// Normalize a severity token; unknown values fall back to `error`.
pub fn normalize_level(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "warn" | "warning" => "warn".to_string(),
        "info" => "info".to_string(),
        _ => "error".to_string(),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Effective {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let config_path = config_path(&repo_root);
    let (cfg, config_error) = match config_path.as_deref().map(read_config) {
        Some(Ok(cfg)) => (cfg, None),
        Some(Err(e)) => (ProporderConfig::default(), Some(e)),
        None => (ProporderConfig::default(), None),
    };

    let patterns = if !cli.patterns.is_empty() {
        cli.patterns.clone()
    } else {
        cfg.patterns
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect())
    };

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let level = normalize_level(cfg.level.as_deref().unwrap_or("error"));

    let write = cli
        .write
        .or_else(|| cfg.format.as_ref().and_then(|f| f.write))
        .unwrap_or(false);
    let diff = cli
        .diff
        .or_else(|| cfg.format.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let check = cli
        .check
        .or_else(|| cfg.format.as_ref().and_then(|f| f.check))
        .unwrap_or(false);

    let rule = cfg.rule.unwrap_or_default();
    let sort_by_length = if cli.alphabetical {
        false
    } else {
        rule.sort_by_length.unwrap_or(true)
    };
    let preserve_comments = if cli.no_preserve_comments {
        false
    } else {
        rule.preserve_comments.unwrap_or(true)
    };
    // CLI names add to the configured list
    let ignore_properties = rule
        .ignore_properties
        .unwrap_or_default()
        .into_iter()
        .chain(cli.ignore_properties.iter().cloned());

    Effective {
        repo_root,
        config_path,
        config_error,
        patterns,
        output,
        level,
        write,
        diff,
        check,
        options: Options::new(sort_by_length, ignore_properties, preserve_comments),
    }
}
