//! Rule-based sentence boundary detection for English prose.
//!
//! A boundary is a run of terminal punctuation (`.`, `!`, `?`, possibly
//! followed by closing quotes or brackets) that is followed by whitespace and
//! then by something that can start a sentence: an upper-case letter, a
//! digit, a currency sign, or an opening quote/bracket. A single `.` directly
//! after a known abbreviation or a one-letter initial is not a boundary.
//! Periods inside tokens (`14.4`, `pib.gov.in`) never are, since they are not
//! followed by whitespace.

use sift_common::Result;

use crate::traits::SentenceSegmenter;

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '”', '’', '»'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '“', '‘', '«'];
const CURRENCY: &[char] = &['₹', '$', '€', '£'];

/// Lower-case abbreviations that are usually followed by a period mid-sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "shri", "smt", "sh", "jr", "rs", "govt", "dept", "hon",
    "ble", "vs", "ltd", "pvt", "inc", "corp", "viz", "approx", "lt", "capt", "maj", "adv",
    "jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "cf",
];

/// Also ordinary words; an abbreviation only when written capitalised (`Co.`, `St.`).
const CAPITALISED_ABBREVIATIONS: &[&str] = &["co", "st", "sr", "gen", "col", "fig", "mar", "dec"];

/// An abbreviation only when a number follows (`No. 5`).
const NUMBER_ABBREVIATIONS: &[&str] = &["no", "nos"];

#[derive(Debug, Clone, Default)]
pub struct RuleSegmenter {
    extra_abbreviations: Vec<String>,
}

impl RuleSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add abbreviations (case-insensitive, without the trailing period).
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_abbreviations
            .extend(abbreviations.into_iter().map(|a| a.into().to_lowercase()));
        self
    }

    fn is_abbreviation(&self, before: &str, next: char) -> bool {
        let token = before
            .rsplit(|c: char| c.is_whitespace() || OPENERS.contains(&c))
            .next()
            .unwrap_or("");
        if token.is_empty() {
            return false;
        }
        // Initials ("A. P. J.") and dotted forms ("i.e", "U.S")
        if token.chars().count() == 1 && token.chars().all(char::is_alphabetic) {
            return true;
        }
        if token.contains('.') {
            return true;
        }
        let lower = token.to_lowercase();
        if ABBREVIATIONS.contains(&lower.as_str()) || self.extra_abbreviations.iter().any(|a| *a == lower) {
            return true;
        }
        if CAPITALISED_ABBREVIATIONS.contains(&lower.as_str()) {
            return token.starts_with(char::is_uppercase);
        }
        NUMBER_ABBREVIATIONS.contains(&lower.as_str()) && next.is_ascii_digit()
    }
}

fn can_start_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || OPENERS.contains(&c) || CURRENCY.contains(&c)
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let n = chars.len();
        let mut sentences = Vec::new();
        let mut start = 0usize; // byte offset of current sentence
        let mut i = 0usize;

        while i < n {
            let (pos, c) = chars[i];
            if !TERMINATORS.contains(&c) {
                i += 1;
                continue;
            }

            // Extend over the terminator run and any closing punctuation.
            let mut j = i + 1;
            while j < n && (TERMINATORS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1)) {
                j += 1;
            }
            if j >= n {
                break;
            }
            if !chars[j].1.is_whitespace() {
                i = j;
                continue;
            }
            let mut k = j;
            while k < n && chars[k].1.is_whitespace() {
                k += 1;
            }
            if k >= n {
                break;
            }

            let single_period = c == '.' && !chars[i + 1..j].iter().any(|(_, t)| TERMINATORS.contains(t));
            if (single_period && self.is_abbreviation(&text[start..pos], chars[k].1)) || !can_start_sentence(chars[k].1) {
                i = k;
                continue;
            }

            let end = chars[j].0;
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = chars[k].0;
            i = k;
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }
        Ok(sentences)
    }

    fn name(&self) -> &str {
        "rule"
    }
}
