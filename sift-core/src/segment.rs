//! Sentence stage: segment each cleaned line, keep long sentences only.

use sift_common::Result;
use sift_nlp::SentenceSegmenter;

/// Sentences of every line, in order, whose trimmed length in characters
/// is strictly greater than `min_chars`.
pub fn long_sentences<'a>(
    lines: &[&'a str],
    segmenter: &dyn SentenceSegmenter,
    min_chars: usize,
) -> Result<Vec<&'a str>> {
    let mut out = Vec::new();
    for line in lines {
        for sentence in segmenter.segment(line)? {
            let sentence = sentence.trim();
            if sentence.chars().count() > min_chars {
                out.push(sentence);
            }
        }
    }
    Ok(out)
}
