//! klupd - update status checker for a Klipper 3D-printer stack
//!
//! Probes the tracked components of a Klipper installation, compares
//! local and upstream versions, and prints the status table together
//! with the actions an "update all" pass would run.

use clap::Parser;
use klupd::aggregator::Aggregator;
use klupd::cli::CliArgs;
use klupd::config::Settings;
use klupd::domain::default_descriptors;
use klupd::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    args.apply_to(&mut settings);

    if args.verbose {
        eprintln!("klupd v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Component base directory: {}", settings.home_dir().display());
        if args.offline {
            eprintln!("Mode: offline");
        }
    }

    let descriptors = args.select(default_descriptors(&settings))?;

    let aggregator = Aggregator::new(&settings, args.offline);
    let show_progress = !args.quiet && !args.json;
    let report = aggregator
        .aggregate_with_progress(&descriptors, show_progress)
        .await;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.no_color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    let errors = report.errors();
    if args.verbose && !errors.is_empty() {
        eprintln!();
        eprintln!("Probe errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
    }

    if errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Partial result - some probes failed
        Ok(ExitCode::from(2))
    }
}
