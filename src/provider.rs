use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::config::{ApiKey, Config};
use crate::error::{DocumentError, FetchError};
use crate::invoices::{ErrorBody, InvoicePage, ListParams};

/// The provider's invoice listing.
pub trait InvoiceSource {
    fn list_invoices(&self, params: &ListParams) -> Result<InvoicePage, FetchError>;
}

/// Fetches a rendered invoice document.
pub trait DocumentFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DocumentError>;
}

pub struct StripeClient {
    client: Client,
    api_base: String,
    api_key: ApiKey,
}

impl StripeClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl InvoiceSource for StripeClient {
    fn list_invoices(&self, params: &ListParams) -> Result<InvoicePage, FetchError> {
        let url = format!("{}/invoices", self.api_base);
        debug!(%url, cursor = ?params.starting_after, "Listing invoices");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose())
            .query(&params.query())
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FetchError::Provider {
                status,
                message: provider_message(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

// Document links are pre-signed, the API key stays with the API host.
impl DocumentFetcher for StripeClient {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, DocumentError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| DocumentError::Transport { source })?;
        read_document(response)
    }
}

fn read_document(response: Response) -> Result<Vec<u8>, DocumentError> {
    let status = response.status();
    if !status.is_success() {
        return Err(DocumentError::Status { status });
    }
    let bytes = response
        .bytes()
        .map_err(|source| DocumentError::Transport { source })?;
    Ok(bytes.to_vec())
}

fn provider_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.to_string(),
        Err(_) if body.trim().is_empty() => "empty response".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
