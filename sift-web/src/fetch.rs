//! The fetch collaborator: URL in, `(title, content)` out, never an error.
//!
//! Failures of any kind (bad URL, network, timeout, non-2xx status) are
//! folded into the content itself: the title becomes the URL and the content
//! becomes `"Error: <message>"`. The [`ERROR_MARKER`] prefix is the only
//! signal downstream code uses to tell a failed page from a fetched one.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use sift_http::{HttpClient, HttpError, RequestOpts};

use crate::extract::{PageContent, extract_page};

pub const ERROR_MARKER: &str = "Error:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedPage {
    pub title: String,
    pub content: String,
}

impl FetchedPage {
    pub fn failed(url: &str, message: impl std::fmt::Display) -> Self {
        Self {
            title: url.to_string(),
            content: format!("{ERROR_MARKER} {message}"),
        }
    }

    pub fn is_error(&self) -> bool {
        self.content.starts_with(ERROR_MARKER)
    }
}

impl From<PageContent> for FetchedPage {
    fn from(page: PageContent) -> Self {
        Self {
            title: page.title,
            content: page.text,
        }
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchedPage;
}

/// Fetcher backed by a plain HTTP GET and the `scraper` HTML parser.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: HttpClient,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, HttpError> {
        let client = HttpClient::new()?
            .with_timeout(timeout)
            .with_user_agent(user_agent);
        Ok(Self { client })
    }

    async fn try_fetch(&self, url: &str) -> Result<PageContent, HttpError> {
        let resp = self.client.get_text(url, RequestOpts::default()).await?;
        Ok(extract_page(&resp.body, url))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> FetchedPage {
        match self.try_fetch(url).await {
            Ok(page) => {
                tracing::debug!(%url, title=%page.title, text_len=page.text.len(), "fetch.ok");
                page.into()
            }
            Err(e) => {
                tracing::warn!(%url, error=%e, "fetch.failed");
                FetchedPage::failed(url, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_page_carries_marker_and_url_title() {
        let page = FetchedPage::failed("http://bad", "invalid URL: empty host");
        assert_eq!(page.title, "http://bad");
        assert_eq!(page.content, "Error: invalid URL: empty host");
        assert!(page.is_error());
    }

    #[test]
    fn page_text_starting_with_marker_reads_as_failure() {
        let page: FetchedPage = PageContent {
            title: "t".into(),
            text: "Error: 404 page".into(),
        }
        .into();
        assert!(page.is_error());
    }

    #[test]
    fn ordinary_page_is_not_a_failure() {
        let page: FetchedPage = PageContent {
            title: "t".into(),
            text: "An error occurred? No.".into(),
        }
        .into();
        assert!(!page.is_error());
    }
}
