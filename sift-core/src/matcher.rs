//! Keyword and entity matching for one sentence.

use sift_common::Result;
use sift_nlp::EntityRecognizer;

use crate::filters::FilterSet;
use crate::types::MatchMetadata;

/// Keywords are reported in configured order, entities in text order.
/// An entity counts only if its label is configured and its text holds a digit.
pub fn match_sentence(
    sentence: &str,
    filters: &FilterSet,
    recognizer: &dyn EntityRecognizer,
) -> Result<MatchMetadata> {
    let lowered = sentence.to_lowercase();
    let keywords = filters
        .keywords
        .iter()
        .filter(|k| k.is_in(&lowered))
        .map(|k| k.text.clone())
        .collect();

    let entities = recognizer
        .recognize(sentence)?
        .into_iter()
        .filter(|e| filters.entity_labels.contains(&e.label) && e.has_digit())
        .map(|e| e.text)
        .collect();

    Ok(MatchMetadata { entities, keywords })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_config::FilterConfig;
    use sift_nlp::PatternRecognizer;

    fn run(sentence: &str) -> MatchMetadata {
        let filters = FilterSet::from_config(&FilterConfig::default()).unwrap();
        match_sentence(sentence, &filters, &PatternRecognizer::new()).unwrap()
    }

    #[test]
    fn keywords_in_configured_order() {
        let m = run("The scheme was launched after the Cabinet approved the new Yojana.");
        assert_eq!(m.keywords, vec!["yojana", "approved", "launched"]);
        assert!(m.entities.is_empty());
    }

    #[test]
    fn keyword_matching_is_case_insensitive_whole_word() {
        let m = run("India and Japan SIGN an MoU on significant signage projects.");
        assert_eq!(m.keywords, vec!["sign", "mou"]);
    }

    #[test]
    fn entities_need_configured_label_and_digit() {
        // DATE is not configured; "five" has no digit
        let m = run("Over five states received ₹200 crore on 12 Jan 2024 for 33 lakh farmers.");
        assert_eq!(m.entities, vec!["₹200 crore", "33 lakh"]);
    }

    #[test]
    fn percent_needs_label_in_set() {
        let mut cfg = FilterConfig::default();
        cfg.entity_labels = vec!["PERCENT".into()];
        let filters = FilterSet::from_config(&cfg).unwrap();
        let m = match_sentence("Coverage of the scheme rose to 66% this year.", &filters, &PatternRecognizer::new()).unwrap();
        assert_eq!(m.entities, vec!["66%"]);
        assert!(run("Coverage of the scheme rose to 66% this year.").entities.is_empty());
    }

    #[test]
    fn no_match_gives_empty_metadata() {
        let m = run("The weather in the capital remained pleasant throughout the week.");
        assert!(!m.is_match());
    }
}
