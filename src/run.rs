use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cli::FailurePolicy;
use crate::config::Config;
use crate::error::{DocumentError, FetchError};
use crate::invoices::{Invoice, ListParams};
use crate::provider::{DocumentFetcher, InvoiceSource};

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Summary {
    pub pages: usize,
    pub downloaded: usize,
    pub previewed: usize,
    pub pending: usize,
    pub failed: usize,
}

impl Summary {
    fn record_failure(
        &mut self,
        policy: FailurePolicy,
        id: &str,
        error: DocumentError,
    ) -> Result<(), FetchError> {
        self.failed += 1;
        match policy {
            FailurePolicy::Continue => {
                warn!(invoice = %id, %error, "Skipping invoice");
                Ok(())
            }
            FailurePolicy::Abort => Err(FetchError::Document {
                id: id.to_string(),
                source: error,
            }),
        }
    }
}

/// Prepares the output directory, then downloads (or previews) every
/// listed invoice that has a document. Fails when every document failed.
pub fn run<S, D, W>(
    config: &Config,
    source: &S,
    fetcher: &D,
    preview: &mut W,
) -> Result<Summary, FetchError>
where
    S: InvoiceSource,
    D: DocumentFetcher,
    W: Write,
{
    if !config.dry_run {
        prepare_output_dir(&config.output_dir)?;
    }
    let summary = fetch_all(config, source, fetcher, preview)?;
    if summary.failed > 0 && summary.downloaded + summary.previewed == 0 {
        return Err(FetchError::NothingDownloaded {
            failed: summary.failed,
        });
    }
    Ok(summary)
}

pub fn prepare_output_dir(dir: &Path) -> Result<(), FetchError> {
    fs::create_dir_all(dir).map_err(|source| FetchError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn fetch_all<S, D, W>(
    config: &Config,
    source: &S,
    fetcher: &D,
    preview: &mut W,
) -> Result<Summary, FetchError>
where
    S: InvoiceSource,
    D: DocumentFetcher,
    W: Write,
{
    let mut summary = Summary::default();
    let mut cursor: Option<String> = None;

    loop {
        let params = ListParams {
            limit: config.page_size,
            created_gte: config.created_gte,
            status: config.status,
            starting_after: cursor.clone(),
        };
        let page = source.list_invoices(&params)?;
        summary.pages += 1;
        debug!(
            page = summary.pages,
            invoices = page.data.len(),
            has_more = page.has_more,
            "Received page"
        );

        for invoice in page.data.iter() {
            handle_invoice(config, invoice, fetcher, preview, &mut summary)?;
        }

        if !page.has_more {
            break;
        }

        let next = page
            .next_cursor()
            .filter(|next| cursor.as_deref() != Some(*next))
            .ok_or(FetchError::StalledPagination { page: summary.pages })?;
        cursor = Some(next.to_string());
    }

    Ok(summary)
}

fn handle_invoice<D: DocumentFetcher, W: Write>(
    config: &Config,
    invoice: &Invoice,
    fetcher: &D,
    preview: &mut W,
    summary: &mut Summary,
) -> Result<(), FetchError> {
    let url = match invoice.document_url() {
        Some(url) => url,
        None => {
            debug!(invoice = %invoice.id, "No document yet");
            summary.pending += 1;
            return Ok(());
        }
    };

    let path = match document_path(&config.output_dir, &invoice.id) {
        Ok(path) => path,
        Err(error) => {
            return summary.record_failure(config.on_error, &invoice.id, error)
        }
    };

    if config.dry_run {
        writeln!(preview, "would download {} -> {}", invoice, path.display())
            .map_err(|source| FetchError::Preview { source })?;
        summary.previewed += 1;
        return Ok(());
    }

    match download(fetcher, url, &path) {
        Ok(size) => {
            info!(invoice = %invoice.id, bytes = size, path = %path.display(), "Downloaded");
            summary.downloaded += 1;
            Ok(())
        }
        Err(error) => summary.record_failure(config.on_error, &invoice.id, error),
    }
}

/// `<dir>/<id>.pdf`, as long as the id cannot leave `dir`.
pub fn document_path(dir: &Path, id: &str) -> Result<PathBuf, DocumentError> {
    if id.is_empty() {
        return Err(DocumentError::EmptyId);
    }
    let mut components = Path::new(id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None)
            if name == id && !id.contains(['/', '\\']) =>
        {
            Ok(dir.join(format!("{}.pdf", id)))
        }
        _ => Err(DocumentError::UnsafeId),
    }
}

fn download<D: DocumentFetcher>(
    fetcher: &D,
    url: &str,
    path: &Path,
) -> Result<usize, DocumentError> {
    let document = fetcher.fetch(url)?;
    fs::write(path, &document).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(document.len())
}
