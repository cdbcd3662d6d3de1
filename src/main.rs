//! `license-sniff` — classify declared licenses and check them against a policy.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load policy config ([`license_sniff::config::load_config`]).
//! 3. Gather declarations from arguments, files, package descriptors or stdin ([`source`]).
//! 4. Classify each declaration ([`license_sniff::classify`]) and apply policy.
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (clean) or `1` (at least one [`PolicyVerdict::Error`]).

mod cli;
mod report;
mod source;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use license_sniff::classify;
use license_sniff::config::{apply_policy, load_config, UNKNOWN_KEY};
use license_sniff::models::{Finding, PolicyVerdict};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("license_sniff=debug")
    } else {
        EnvFilter::new("license_sniff=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let declarations = source::collect(&cli)?;
    tracing::debug!("classifying {} declaration(s)", declarations.len());

    let findings: Vec<Finding> = declarations
        .into_iter()
        .map(|decl| {
            let license = classify(decl.value.as_deref());
            let verdict = apply_policy(&config, license.as_ref());
            tracing::debug!(
                "{} → {} ({})",
                decl.source,
                license
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| UNKNOWN_KEY.to_string()),
                verdict
            );
            Finding {
                source: decl.source,
                declared: decl.value,
                license,
                verdict,
            }
        })
        .collect();

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&findings, cli.verbose, cli.quiet)?,
        ReportFormat::Json => report::json::render(&findings)?,
    }

    let has_errors = findings.iter().any(|f| f.verdict == PolicyVerdict::Error);
    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}
