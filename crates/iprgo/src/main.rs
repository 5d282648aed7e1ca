//! IPRGO - Main entry point

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use iprgo::{Cli, GoReportGenerator, StrainOutcome};
use iprgo_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Before parsing, so clap's env fallbacks see .env values. A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("iprgo")
        .build();

    // Environment variables take precedence over the flag-derived defaults
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The tool still works without logging
    let _log_guard = init_logging(&log_config).ok();

    match execute(&cli).await {
        Ok(outcomes) => {
            let failed = print_summary(&outcomes);
            if failed > 0 {
                process::exit(1);
            }
        },
        Err(e) => {
            error!(error = %e, "Run failed");
            eprintln!("Error: {:#}", e);
            process::exit(1);
        },
    }
}

async fn execute(cli: &Cli) -> anyhow::Result<Vec<StrainOutcome>> {
    let config = cli.pipeline_config()?;
    let strains = config.strains.clone();
    let generator = GoReportGenerator::new(config)?;

    info!(strains = strains.len(), parallel = cli.parallel, "Starting GO report run");

    if cli.parallel {
        run_parallel(Arc::new(generator), strains).await
    } else {
        Ok(generator.run_all(&strains, cli.fail_fast))
    }
}

/// Run every strain on the blocking pool; outcomes keep the requested order
async fn run_parallel(
    generator: Arc<GoReportGenerator>,
    strains: Vec<String>,
) -> anyhow::Result<Vec<StrainOutcome>> {
    let tasks = strains.into_iter().map(|strain| {
        let generator = Arc::clone(&generator);
        tokio::task::spawn_blocking(move || generator.run_logged(&strain))
    });

    futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.context("strain worker panicked"))
        .collect()
}

/// Print one line per strain; returns the number of failures
fn print_summary(outcomes: &[StrainOutcome]) -> usize {
    let mut failed = 0;

    for outcome in outcomes {
        match outcome.result {
            Ok(ref report) => println!(
                "{} {}: {} proteins, {} GO associations ({} of {} rows kept) -> {}",
                "✓".green(),
                outcome.strain,
                report.proteins,
                report.associations,
                report.stats.kept,
                report.stats.rows_read,
                report.output.display()
            ),
            Err(ref e) => {
                failed += 1;
                eprintln!("{} {}: {}", "✗".red(), outcome.strain, e);
            },
        }
    }

    failed
}
