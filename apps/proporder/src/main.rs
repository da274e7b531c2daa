//! Proporder CLI binary entry point.
//! Delegates to the library for lint/format and prints results.

use clap::Parser;
use proporder::cli::{Cli, CommonArgs, Commands};
use proporder::config::{self, Effective, Overrides};
use proporder::utils::{error_prefix, info_prefix, note_prefix};
use proporder::{format, lint, output};

fn overrides(common: &CommonArgs) -> Overrides {
    Overrides {
        repo_root: common.repo_root.clone(),
        patterns: common.patterns.clone(),
        output: common.output.clone(),
        alphabetical: common.alphabetical,
        ignore_properties: common.ignore_properties.clone(),
        no_preserve_comments: common.no_preserve_comments,
        ..Default::default()
    }
}

/// Friendly notes on stderr about where settings came from.
fn announce(eff: &Effective) {
    match (eff.config_path.as_ref(), eff.config_error.as_ref()) {
        (None, _) => eprintln!("{} No proporder.toml found; using defaults.", note_prefix()),
        (Some(p), Some(e)) => eprintln!(
            "{} Could not parse {}: {}; using defaults.",
            error_prefix(),
            p.to_string_lossy(),
            e
        ),
        (Some(_), None) => {}
    }
    if eff.output != "json" {
        eprintln!("{} Using patterns: [{}]", info_prefix(), eff.patterns.join(", "));
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint { common } => {
            let eff = config::resolve_effective(&overrides(&common));
            announce(&eff);
            let (result, errors) =
                lint::run_lint(&eff.repo_root, &eff.patterns, &eff.options, &eff.level);
            output::print_lint(&result, &eff.output, &errors);
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Format {
            common,
            write,
            diff,
            check,
        } => {
            let eff = config::resolve_effective(&Overrides {
                write: if write { Some(true) } else { None },
                diff: if diff { Some(true) } else { None },
                check: if check { Some(true) } else { None },
                ..overrides(&common)
            });
            announce(&eff);
            // CLI/config precedence at runtime:
            // - If diff or check is enabled, force write=false for this run.
            // - Otherwise respect write.
            let eff_write = if eff.diff || eff.check { false } else { eff.write };
            let (results, errors) = format::run_format(
                &eff.repo_root,
                &eff.patterns,
                &eff.options,
                eff_write,
                eff.diff || eff.check,
            );
            output::print_format(&results, &eff.output, eff_write, eff.diff, &errors);
            if eff.check && results.iter().any(|r| r.changed) {
                std::process::exit(1);
            }
        }
    }
}
