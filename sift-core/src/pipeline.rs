//! Per-page extraction: clean, segment, second marker pass, match.

use std::fmt;
use std::sync::Arc;

use sift_common::Result;
use sift_nlp::{EntityRecognizer, PatternRecognizer, RuleSegmenter, SentenceSegmenter};

use crate::clean::clean_lines;
use crate::filters::FilterSet;
use crate::matcher::match_sentence;
use crate::segment::long_sentences;
use crate::types::ResultEntry;

/// Text to matched sentences. Holds no per-call state; share it freely.
#[derive(Clone)]
pub struct Extractor {
    filters: FilterSet,
    segmenter: Arc<dyn SentenceSegmenter>,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl Extractor {
    pub fn new(
        filters: FilterSet,
        segmenter: Arc<dyn SentenceSegmenter>,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Self {
        let supported = recognizer.supported_labels();
        for label in filters.entity_labels.iter().filter(|l| !supported.contains(*l)) {
            tracing::warn!(%label, recognizer = recognizer.name(), "extractor.label_unsupported");
        }
        Self {
            filters,
            segmenter,
            recognizer,
        }
    }

    /// Rule-based segmenter and pattern recognizer.
    pub fn with_defaults(filters: FilterSet) -> Self {
        Self::new(
            filters,
            Arc::new(RuleSegmenter::new()),
            Arc::new(PatternRecognizer::new()),
        )
    }

    /// Noteworthy sentences of `text`, in document order.
    pub fn extract(&self, text: &str) -> Result<Vec<ResultEntry>> {
        let lines = clean_lines(text, &self.filters);
        let sentences = long_sentences(&lines, self.segmenter.as_ref(), self.filters.min_sentence_chars)?;

        let mut entries = Vec::new();
        for sentence in sentences {
            if self.filters.has_removal_marker(sentence) {
                continue;
            }
            let meta = match_sentence(sentence, &self.filters, self.recognizer.as_ref())?;
            if meta.is_match() {
                entries.push(ResultEntry(sentence.to_string(), meta));
            }
        }

        tracing::debug!(
            lines = lines.len(),
            kept = entries.len(),
            segmenter = self.segmenter.name(),
            recognizer = self.recognizer.name(),
            "pipeline.done"
        );
        Ok(entries)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("filters", &self.filters)
            .field("segmenter", &self.segmenter.name())
            .field("recognizer", &self.recognizer.name())
            .finish()
    }
}
