use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid start date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("No API key given, pass -k or set STRIPE_API_KEY")]
    MissingCredential,

    #[error("API key is for {key_mode} data but {requested} mode was requested")]
    CredentialMode {
        key_mode: &'static str,
        requested: &'static str,
    },

    #[error("Unable to create output directory {}: {source}", .path.display())]
    OutputDir { path: PathBuf, source: io::Error },

    #[error("Request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Provider returned {status}: {message}")]
    Provider { status: StatusCode, message: String },

    #[error("Error decoding invoice list: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    #[error("Page {page} reported more results but gave no cursor to continue from")]
    StalledPagination { page: usize },

    #[error("All {failed} invoice documents failed, nothing was saved")]
    NothingDownloaded { failed: usize },

    #[error("Invoice '{id}': {source}")]
    Document { id: String, source: DocumentError },

    #[error("Unable to write preview: {source}")]
    Preview { source: io::Error },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invoice has an empty identifier")]
    EmptyId,

    #[error("identifier is not a plain file name")]
    UnsafeId,

    #[error("document host returned {status}")]
    Status { status: StatusCode },

    #[error("download failed: {source}")]
    Transport { source: reqwest::Error },

    #[error("unable to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}
