//! Language capabilities used by the extraction pipeline.
//!
//! The pipeline only ever talks to the two narrow traits in [`traits`]:
//! [`SentenceSegmenter`] and [`EntityRecognizer`]. Any model can back them;
//! this crate ships a rule-based English implementation of each:
//!
//! - [`segmenter::RuleSegmenter`]: punctuation + abbreviation aware sentence splitting
//! - [`recognizer::PatternRecognizer`]: regex recognition of numeric entities
//!   (money, quantities, percentages, dates, times, ordinals, cardinals)
//!
//! # Examples
//! ```
//! use sift_nlp::{EntityLabel, EntityRecognizer, PatternRecognizer, RuleSegmenter, SentenceSegmenter};
//!
//! let text = "Shri Modi inaugurated the 800 MW unit. It cost ₹1,070 crore.";
//! let sentences = RuleSegmenter::new().segment(text).unwrap();
//! assert_eq!(sentences, vec!["Shri Modi inaugurated the 800 MW unit.", "It cost ₹1,070 crore."]);
//!
//! let entities = PatternRecognizer::new().recognize(sentences[1]).unwrap();
//! assert_eq!(entities[0].label, EntityLabel::Money);
//! assert_eq!(entities[0].text, "₹1,070 crore");
//! ```
pub mod recognizer;
pub mod segmenter;
pub mod traits;

use std::fmt;
use std::str::FromStr;

pub use recognizer::PatternRecognizer;
pub use segmenter::RuleSegmenter;
pub use traits::{EntityRecognizer, SentenceSegmenter};

/// Semantic category assigned to a recognized span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityLabel {
    /// Plain counts and numbers: `800`, `33 lakh`, `five`.
    Cardinal,
    /// A number with a unit of measurement: `14.4 km`, `2 lakh tonnes`.
    Quantity,
    /// Monetary amounts: `₹1,070 crore`, `Rs 6500 crore`.
    Money,
    Percent,
    Ordinal,
    Date,
    Time,
}

impl EntityLabel {
    pub const ALL: [EntityLabel; 7] = [
        EntityLabel::Cardinal,
        EntityLabel::Quantity,
        EntityLabel::Money,
        EntityLabel::Percent,
        EntityLabel::Ordinal,
        EntityLabel::Date,
        EntityLabel::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Cardinal => "CARDINAL",
            EntityLabel::Quantity => "QUANTITY",
            EntityLabel::Money => "MONEY",
            EntityLabel::Percent => "PERCENT",
            EntityLabel::Ordinal => "ORDINAL",
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EntityLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown entity label: {wanted}"))
    }
}

/// A labelled span. `start`/`end` are byte offsets into the recognized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

impl Entity {
    /// True if the text holds a decimal digit `0`-`9`. Vulgar fractions and
    /// roman numerals do not count.
    pub fn has_digit(&self) -> bool {
        self.text.chars().any(|c| c.is_ascii_digit())
    }
}
