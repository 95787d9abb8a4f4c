/*
 * Bulk invoice export
 *
 * Download every invoice PDF from the billing provider:
 *  - created on or after a local date
 *  - optionally only with one status (paid, open, ...)
 *  - from live or test data, the key decides which one is reached
 *
 * Each invoice lands in the output directory as <invoice id>.pdf,
 * re-running replaces the files. Invoices without a generated PDF
 * are skipped until the provider has one.
 *
 * Exit status is 1 for anything that stops the run, per invoice
 * download failures only do so with --on-error abort.
 */

mod billing;
mod calendar;
mod cli;
mod config;
mod error;
mod invoices;
mod logging;
mod provider;
mod run;

use std::io;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::info;

use crate::cli::Opts;
use crate::config::Config;
use crate::error::FetchError;
use crate::provider::StripeClient;
use crate::run::Summary;

fn main() -> ExitCode {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(error) => {
            error.print().ok();
            return usage_exit(&error);
        }
    };

    logging::init_logging(opts.verbose);

    match fetch(opts) {
        Ok(summary) => {
            info!(
                pages = summary.pages,
                downloaded = summary.downloaded,
                previewed = summary.previewed,
                pending = summary.pending,
                failed = summary.failed,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

/// Help and version succeed, any other usage error exits 1 rather than
/// clap's default of 2.
fn usage_exit(error: &clap::Error) -> ExitCode {
    if error.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn fetch(opts: Opts) -> Result<Summary, FetchError> {
    let config = Config::from_opts(opts, &Local)?;
    info!(
        since = %config.start_date,
        created_gte = config.created_gte,
        mode = ?config.mode,
        mode_verified = config.mode_verified,
        status = ?config.status,
        output = %config.output_dir.display(),
        dry_run = config.dry_run,
        "Fetching invoices"
    );

    let client = StripeClient::new(&config)?;
    let mut preview = io::stdout().lock();
    run::run(&config, &client, &client, &mut preview)
}
