//! # Ingest
//!
//! Loads item image documents into the `item_image` index.
//!
//! 1. Read the items file. Either a bare JSON array of documents or a whole
//!    catalog snapshot, in which case its `items` are used.
//! 2. Drop documents without an `itemId`. They have nothing to key on and
//!    would be indexed under a random id, so reruns would duplicate them.
//! 3. Split the rest into batches and send each as one NDJSON `_bulk` request,
//!    `_id` set to the item id so reruns overwrite instead of duplicating.
//! 4. A batch that fails at the transport level is retried with backoff. Item
//!    level rejections in the bulk response are counted, not retried.
use std::{fs, path::Path};

use anyhow::{Context, Result};
use catalog::{Catalog, item::ItemImageDocument};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode, header::{AUTHORIZATION, CONTENT_TYPE}};
use serde::Deserialize;
use serde_json::json;
use server::{
    error::AppError,
    retry::{RetryPolicy, retry},
};
use tracing::{info, warn};

pub const NDJSON: &str = "application/x-ndjson";

pub struct IngestOptions {
    pub elastic_url: String,
    pub index: String,
    pub batch_size: usize,
    pub api_key: Option<String>,
    pub retry: RetryPolicy,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub indexed: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsFile {
    Items(Vec<ItemImageDocument>),
    Catalog(Catalog),
}

pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<ItemImageDocument>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let items = match serde_json::from_slice(&data)
        .with_context(|| format!("parsing {}", path.display()))?
    {
        ItemsFile::Items(items) => items,
        ItemsFile::Catalog(catalog) => catalog.items,
    };

    Ok(items)
}

/// Documents that can be indexed, and how many were dropped for lacking an id.
pub fn keyed_items(items: &[ItemImageDocument]) -> (Vec<&ItemImageDocument>, usize) {
    let keyed: Vec<&ItemImageDocument> = items.iter().filter(|doc| doc.item_id.is_some()).collect();
    let skipped = items.len() - keyed.len();

    (keyed, skipped)
}

/// One `index` action line and one source line per document.
pub fn bulk_body(index: &str, docs: &[&ItemImageDocument]) -> Result<String> {
    let mut body = String::new();

    for doc in docs {
        let action = json!({ "index": { "_index": index, "_id": doc.item_id } });

        body.push_str(&action.to_string());
        body.push('\n');
        body.push_str(&serde_json::to_string(doc)?);
        body.push('\n');
    }

    Ok(body)
}

#[derive(Deserialize, Debug)]
pub struct BulkResponse {
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkItem>,
}

#[derive(Deserialize, Debug)]
pub struct BulkItem {
    pub index: Option<BulkItemResult>,
}

#[derive(Deserialize, Debug)]
pub struct BulkItemResult {
    pub status: u16,
}

impl BulkResponse {
    pub fn failed(&self) -> usize {
        if !self.errors {
            return 0;
        }

        self.items
            .iter()
            .filter(|item| item.index.as_ref().is_none_or(|r| r.status >= 300))
            .count()
    }
}

async fn send_batch(client: &Client, options: &IngestOptions, body: &str) -> Result<BulkResponse, AppError> {
    let url = format!("{}/_bulk", options.elastic_url.trim_end_matches('/'));

    let mut request = client
        .post(&url)
        .header(CONTENT_TYPE, NDJSON)
        .body(body.to_string());

    if let Some(key) = &options.api_key {
        request = request.header(AUTHORIZATION, format!("ApiKey {key}"));
    }

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();

        return Err(match status {
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS => {
                AppError::SearchUnavailable(format!("{status}: {detail}"))
            }
            _ => AppError::SearchFailed(format!("{status}: {detail}")),
        });
    }

    let bytes = response.bytes().await?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::SearchFailed(format!("undecodable bulk response: {e}")))
}

pub async fn ingest(items: &[ItemImageDocument], options: &IngestOptions) -> Result<IngestReport> {
    let (keyed, skipped) = keyed_items(items);

    if skipped > 0 {
        warn!("Skipping {skipped} documents without itemId");
    }

    let client = Client::new();
    let mut report = IngestReport {
        skipped,
        ..Default::default()
    };

    let pb = ProgressBar::new(keyed.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    for (number, batch) in keyed.chunks(options.batch_size.max(1)).enumerate() {
        pb.set_message(format!("Batch {}", number + 1));

        let body = bulk_body(&options.index, batch)?;
        let outcome = retry(&options.retry, "bulk index", AppError::is_retryable, || {
            send_batch(&client, options, &body)
        })
        .await;

        match outcome {
            Ok(response) => {
                let failed = response.failed().min(batch.len());

                report.indexed += batch.len() - failed;
                report.failed += failed;
            }
            Err(e) => {
                warn!("Batch {} failed: {e}", number + 1);
                report.failed += batch.len();
            }
        }

        pb.inc(batch.len() as u64);
    }

    pb.finish_with_message("Done");

    info!(
        indexed = report.indexed,
        failed = report.failed,
        skipped = report.skipped,
        "Ingest finished"
    );

    Ok(report)
}
