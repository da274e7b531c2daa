//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "proporder",
    version,
    about = "Sort CSS/LESS/SCSS declarations",
    long_about = "Proporder — lint and fix the order of property declarations inside CSS, LESS and SCSS blocks.\n\nConfiguration precedence: CLI > proporder.toml > defaults.",
    after_help = "Examples:\n  proporder lint\n  proporder lint --pattern 'src/**/*.scss' --output json\n  proporder format --diff\n  proporder format --write --alphabetical",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone, Default)]
/// Options shared by `lint` and `format`.
pub struct CommonArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long = "pattern", help = "Glob relative to the repo root; repeatable (overrides config)")]
    pub patterns: Vec<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Sort alphabetically instead of by length")]
    pub alphabetical: bool,
    #[arg(long = "ignore-property", help = "Property name left in place; repeatable")]
    pub ignore_properties: Vec<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not move comments together with the next declaration")]
    pub no_preserve_comments: bool,
}

#[derive(Subcommand)]
/// Supported subcommands for linting and fixing.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current proporder version.")]
    Version,
    /// Report out-of-order blocks
    #[command(
        about = "Run lint checks",
        long_about = "Report blocks whose declarations are out of order and statements that are not property declarations. Findings at level error make the command exit non-zero.",
        after_help = "Examples:\n  proporder lint\n  proporder lint --ignore-property display --output json"
    )]
    Lint {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Reorder declarations in place
    #[command(
        about = "Apply fixes",
        long_about = "Reorder declarations so every block is sorted. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  proporder format --diff\n  proporder format --write"
    )]
    Format {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_flags() {
        let cli = Cli::try_parse_from([
            "proporder",
            "format",
            "--diff",
            "--pattern",
            "a/*.css",
            "--pattern",
            "b/*.scss",
            "--ignore-property",
            "display",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Format {
                common,
                write,
                diff,
                check,
            } => {
                assert!(diff && !write && !check);
                assert_eq!(common.patterns, vec!["a/*.css", "b/*.scss"]);
                assert_eq!(common.ignore_properties, vec!["display"]);
                assert!(!common.alphabetical);
            }
            _ => panic!("expected format"),
        }
    }
}
