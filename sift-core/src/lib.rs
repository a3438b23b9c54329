//! Noteworthy-sentence extraction.
//!
//! Raw page text flows through four stages:
//!
//! 1. [`clean`]: trim lines, drop blanks and boilerplate (removal markers)
//! 2. [`segment`]: split each line into sentences, keep only long ones
//! 3. a second removal-marker pass over the sentences
//! 4. [`matcher`]: keep sentences with a keyword hit or a numeric entity
//!
//! [`Extractor`] runs those stages for one text; [`BatchProcessor`] runs
//! fetch + extraction for a list of URLs and keeps their order.
//!
//! ```
//! use sift_core::{Extractor, FilterSet};
//! use sift_config::FilterConfig;
//!
//! let extractor = Extractor::with_defaults(FilterSet::from_config(&FilterConfig::default()).unwrap());
//! let text = "Posted On: 12 Jan 2024\n\n\
//!             The government launched the Fasal Bima Yojana with ₹1,070 crore allocated for farmers.\n\
//!             Short note.";
//! let entries = extractor.extract(text).unwrap();
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].metadata().keywords, vec!["yojana", "launched"]);
//! assert_eq!(entries[0].metadata().entities, vec!["₹1,070 crore"]);
//! ```

pub mod batch;
pub mod clean;
pub mod filters;
pub mod matcher;
pub mod pipeline;
pub mod segment;
pub mod types;

pub use batch::BatchProcessor;
pub use filters::FilterSet;
pub use pipeline::Extractor;
pub use types::{MatchMetadata, PageResult, ResultEntry};
