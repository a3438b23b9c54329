//! Fetch + extract for a list of URLs.
//!
//! Results come back one per input URL, in input order. A failed fetch does
//! not fail the batch: it becomes a [`PageResult`] whose single line is the
//! error message. Pipeline faults do fail the batch.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use sift_common::Result;
use sift_web::PageFetcher;

use crate::pipeline::Extractor;
use crate::types::PageResult;

#[derive(Clone)]
pub struct BatchProcessor {
    extractor: Arc<Extractor>,
    fetcher: Arc<dyn PageFetcher>,
    concurrency: usize,
}

impl BatchProcessor {
    pub fn new(extractor: Arc<Extractor>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            extractor,
            fetcher,
            concurrency: 1,
        }
    }

    /// In-flight fetches per batch; `0` is treated as `1`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn process<S: AsRef<str>>(&self, urls: &[S]) -> Result<Vec<PageResult>> {
        tracing::info!(urls = urls.len(), concurrency = self.concurrency, "batch.start");
        let urls: Vec<String> = urls.iter().map(|u| u.as_ref().trim().to_owned()).collect();
        let results: Vec<PageResult> = stream::iter(urls)
            .map(|url| async move { self.process_one(&url).await })
            .buffered(self.concurrency)
            .try_collect()
            .await?;
        tracing::info!(pages = results.len(), "batch.done");
        Ok(results)
    }

    async fn process_one(&self, url: &str) -> Result<PageResult> {
        let page = self.fetcher.fetch(url).await;
        if page.is_error() {
            tracing::debug!(%url, "batch.page_failed");
            return Ok(PageResult::failure(page.title, page.content));
        }
        let lines = self.extractor.extract(&page.content)?;
        tracing::debug!(%url, lines = lines.len(), "batch.page");
        Ok(PageResult {
            title: page.title,
            lines,
        })
    }
}
