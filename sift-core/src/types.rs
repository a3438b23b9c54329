use serde::{Deserialize, Serialize};

/// Entities and keywords found in one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub entities: Vec<String>,
    pub keywords: Vec<String>,
}

impl MatchMetadata {
    pub fn is_match(&self) -> bool {
        !self.entities.is_empty() || !self.keywords.is_empty()
    }
}

/// One output line: the sentence (or a fetch error message) and its matches.
///
/// Serializes as a two element array, `["sentence", {"entities": [...], "keywords": [...]}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry(pub String, pub MatchMetadata);

impl ResultEntry {
    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn metadata(&self) -> &MatchMetadata {
        &self.1
    }
}

/// Everything extracted from one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub title: String,
    pub lines: Vec<ResultEntry>,
}

impl PageResult {
    /// A failed fetch: the error message is the single line, with no matches.
    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: vec![ResultEntry(message.into(), MatchMetadata::default())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_result_wire_shape() {
        let page = PageResult {
            title: "Cabinet approves".into(),
            lines: vec![ResultEntry(
                "The scheme was approved with ₹500 crore.".into(),
                MatchMetadata {
                    entities: vec!["₹500 crore".into()],
                    keywords: vec!["approved".into()],
                },
            )],
        };
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "title": "Cabinet approves",
                "lines": [[
                    "The scheme was approved with ₹500 crore.",
                    {"entities": ["₹500 crore"], "keywords": ["approved"]}
                ]]
            })
        );
    }

    #[test]
    fn failure_has_single_empty_entry() {
        let page = PageResult::failure("http://x", "Error: boom");
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"title": "http://x", "lines": [["Error: boom", {"entities": [], "keywords": []}]]})
        );
        assert!(!page.lines[0].metadata().is_match());
    }
}
