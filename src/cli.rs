use clap::{Parser, ValueEnum, ValueHint};
use std::path::PathBuf;
use strum_macros::{AsRefStr, Display};

/* Argument Structure
 *
 * invoicedl -d <YYYY-MM-DD> -o <dir>
 *      [-k <key>] [-l <1..100>] [-s <status>] [-n] [-t]
 *      [--on-error (continue | abort)] [--api-base <url>] [-v]
 */

/// Download every invoice PDF created on or after a date
#[derive(Parser, Debug)]
#[command(name = "invoicedl", version)]
pub struct Opts {
    /// Only invoices created on or after this local date (YYYY-MM-DD)
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD")]
    pub start_date: String,

    /// Directory the PDFs are written to, created if missing
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: PathBuf,

    /// Secret API key, overrides STRIPE_API_KEY
    #[arg(short = 'k', long, env = "STRIPE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Invoices requested per page
    #[arg(short = 'l', long = "limit", default_value_t = 100,
        value_parser = clap::value_parser!(u8).range(1..=100))]
    pub page_size: u8,

    /// Only invoices with this status
    #[arg(short, long, value_enum)]
    pub status: Option<InvoiceStatus>,

    /// Print what would be downloaded without downloading
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Use the test environment instead of live data
    #[arg(short = 't', long)]
    pub test_mode: bool,

    /// What to do when a single document fails to download
    #[arg(long, value_enum, default_value_t = FailurePolicy::Continue)]
    pub on_error: FailurePolicy,

    /// Base URL of the billing API
    #[arg(long, env = "STRIPE_API_BASE",
        default_value = "https://api.stripe.com/v1", value_hint = ValueHint::Url)]
    pub api_base: String,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Display, AsRefStr, Debug, PartialEq, Eq, Clone, Copy)]
#[strum(serialize_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Open,
    Paid,
    Uncollectible,
    Void,
}

#[derive(ValueEnum, Display, Debug, PartialEq, Eq, Clone, Copy)]
#[strum(serialize_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and move on to the next invoice
    Continue,
    /// Stop the run at the first failed document
    Abort,
}
