use sift_common::Result;

use crate::{Entity, EntityLabel};

/// Splits a block of text into sentences.
pub trait SentenceSegmenter: Send + Sync {
    /// Return the sentences of `text`, in order, as trimmed sub-slices of it.
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}

/// Finds labelled entity spans in a piece of text.
pub trait EntityRecognizer: Send + Sync {
    /// Return entities in the order they appear in `text`.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>>;

    /// Labels this recognizer can ever emit.
    fn supported_labels(&self) -> Vec<EntityLabel>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}
