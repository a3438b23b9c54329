//! Page acquisition for the extraction pipeline.
//!
//! - HTML to title + line-preserving text (`extract`)
//! - The fetch collaborator trait and its HTTP-backed implementation (`fetch`)

pub mod extract;
pub mod fetch;

pub use extract::{PageContent, extract_page};
pub use fetch::{ERROR_MARKER, FetchedPage, HttpPageFetcher, PageFetcher};
