//! Immutable filter configuration, compiled once at startup.

use std::collections::BTreeSet;

use regex::Regex;
use sift_common::{Result, SiftError};
use sift_config::FilterConfig;
use sift_nlp::EntityLabel;

#[derive(Debug, Clone)]
pub struct Keyword {
    /// As configured; this is what gets reported.
    pub text: String,
    pattern: Regex,
}

impl Keyword {
    pub fn new(text: &str) -> Result<Self> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Err(SiftError::Config("keywords must not be empty".into()));
        }
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&needle)))
            .map_err(|e| SiftError::Config(format!("keyword {text:?}: {e}")))?;
        Ok(Self {
            text: text.to_string(),
            pattern,
        })
    }

    /// `lowered` must already be lower-cased.
    pub fn is_in(&self, lowered: &str) -> bool {
        self.pattern.is_match(lowered)
    }
}

#[derive(Debug, Clone)]
pub struct FilterSet {
    pub keywords: Vec<Keyword>,
    pub entity_labels: BTreeSet<EntityLabel>,
    pub removal_markers: Vec<String>,
    pub min_sentence_chars: usize,
}

impl FilterSet {
    pub fn from_config(cfg: &FilterConfig) -> Result<Self> {
        let keywords = cfg
            .keywords
            .iter()
            .map(|k| Keyword::new(k))
            .collect::<Result<Vec<_>>>()?;
        let entity_labels = cfg
            .entity_labels
            .iter()
            .map(|l| l.parse::<EntityLabel>().map_err(SiftError::Config))
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self {
            keywords,
            entity_labels,
            removal_markers: cfg.removal_markers.clone(),
            min_sentence_chars: cfg.min_sentence_chars,
        })
    }

    /// Exact, case-sensitive substring test against every removal marker.
    pub fn has_removal_marker(&self, s: &str) -> bool {
        self.removal_markers
            .iter()
            .any(|m| !m.is_empty() && s.contains(m.as_str()))
    }
}
