//! Proporder core library.
//!
//! This crate exposes programmatic APIs for checking and fixing the order of
//! property declarations inside CSS, LESS and SCSS blocks.
//!
//! High-level modules:
//! - `engine`: The `css-property-order` rule (tokenizer, comment
//!   attachment, ordering policy, violation detection, fix synthesis).
//! - `blocks`: Top-level block discovery in a stylesheet.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `lint`: Runs the rule over files matched by glob patterns.
//! - `format`: Applies fixes to matched files.
//! - `models`: Findings, rule options, and lint output structs.
//! - `output`: Human/JSON printers for lint/format.
//! - `utils`: Supporting helpers.
pub mod blocks;
pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod lint;
pub mod models;
pub mod output;
pub mod utils;

pub use engine::{check_block, check_source, fix_source};
pub use models::finding::{Finding, Fix, MessageId};
pub use models::options::Options;
