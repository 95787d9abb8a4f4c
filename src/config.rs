use std::fmt;
use std::path::PathBuf;

use chrono::{NaiveDate, TimeZone};
use tracing::warn;

use crate::calendar::{parse_start_date, LocalMidnight};
use crate::cli::{FailurePolicy, InvoiceStatus, Opts};
use crate::error::FetchError;

/// Secret key, kept out of `Debug` output.
#[derive(Clone, PartialEq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The environment a key belongs to, when its prefix says so.
    pub fn mode(&self) -> Option<Mode> {
        let key = self.0.as_str();
        if key.starts_with("sk_test_") || key.starts_with("rk_test_") {
            Some(Mode::Test)
        } else if key.starts_with("sk_live_") || key.starts_with("rk_live_") {
            Some(Mode::Live)
        } else {
            None
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Live,
    Test,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Live => "live",
            Mode::Test => "test",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub start_date: NaiveDate,
    pub created_gte: i64,
    pub output_dir: PathBuf,
    pub api_key: ApiKey,
    pub api_base: String,
    pub mode: Mode,
    /// False when the key's prefix does not say which mode it belongs to.
    pub mode_verified: bool,
    pub page_size: u8,
    pub status: Option<InvoiceStatus>,
    pub dry_run: bool,
    pub on_error: FailurePolicy,
}

impl Config {
    /// Everything that can be checked before touching the disk or network.
    pub fn from_opts<Tz: TimeZone>(opts: Opts, tz: &Tz) -> Result<Self, FetchError> {
        let start_date = parse_start_date(&opts.start_date)?;
        let created_gte = start_date.midnight_timestamp(tz).ok_or_else(|| {
            FetchError::InvalidDate {
                input: opts.start_date.clone(),
            }
        })?;

        let api_key = opts
            .api_key
            .filter(|key| !key.trim().is_empty())
            .map(ApiKey::new)
            .ok_or(FetchError::MissingCredential)?;

        let mode = if opts.test_mode { Mode::Test } else { Mode::Live };
        let mode_verified = match api_key.mode() {
            Some(key_mode) if key_mode != mode => {
                return Err(FetchError::CredentialMode {
                    key_mode: key_mode.name(),
                    requested: mode.name(),
                });
            }
            Some(_) => true,
            None => {
                warn!(
                    requested = mode.name(),
                    "Unable to tell from the API key whether it is for live or test data"
                );
                false
            }
        };

        Ok(Self {
            start_date,
            created_gte,
            output_dir: opts.output,
            api_key,
            api_base: opts.api_base.trim_end_matches('/').to_string(),
            mode,
            mode_verified,
            page_size: opts.page_size,
            status: opts.status,
            dry_run: opts.dry_run,
            on_error: opts.on_error,
        })
    }
}
