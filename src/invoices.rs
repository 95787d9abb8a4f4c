use std::fmt;

use serde::Deserialize;

use crate::billing::Money;
use crate::cli::InvoiceStatus;

/// One entry of the provider's invoice listing. Only `id` and
/// `invoice_pdf` drive the download, the rest is shown in previews.
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub invoice_pdf: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub total: Option<i64>,
}

impl Invoice {
    /// The document URL, if the provider has finished generating it.
    pub fn document_url(&self) -> Option<&str> {
        self.invoice_pdf.as_deref().filter(|url| !url.is_empty())
    }

    pub fn total(&self) -> Option<Money> {
        match (&self.currency, self.total) {
            (Some(currency), Some(amount)) => {
                Some(Money::from_minor_units(currency, amount))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id)?;
        let details: Vec<String> = [
            self.number.clone(),
            self.status.clone(),
            self.total().map(|total| total.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !details.is_empty() {
            write!(f, " [{}]", details.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct InvoicePage {
    pub data: Vec<Invoice>,
    pub has_more: bool,
}

impl InvoicePage {
    /// Cursor for the page after this one, `None` when the page is empty
    /// or its last entry has no usable id.
    pub fn next_cursor(&self) -> Option<&str> {
        self.data
            .last()
            .map(|invoice| invoice.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ListParams {
    pub limit: u8,
    pub created_gte: i64,
    pub status: Option<InvoiceStatus>,
    pub starting_after: Option<String>,
}

impl ListParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", self.limit.to_string()),
            ("created[gte]", self.created_gte.to_string()),
        ];
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(cursor) = &self.starting_after {
            query.push(("starting_after", cursor.clone()));
        }
        query
    }
}

/// Error body of a failed provider request.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.kind, &self.message) {
            (Some(kind), Some(message)) => write!(f, "{} ({})", message, kind),
            (None, Some(message)) => write!(f, "{}", message),
            (Some(kind), None) => write!(f, "{}", kind),
            (None, None) => write!(f, "no details"),
        }
    }
}
