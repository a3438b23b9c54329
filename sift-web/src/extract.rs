//! HTML to plain text, keeping the page's visual line structure.
//!
//! Title: `og:title` meta content, else the `<title>` text, else the URL.
//!
//! Content: the text of the first `article`, else `main`, else `div`
//! element; with none of those, the whole document. Text nodes are joined
//! with `\n` so block boundaries survive as line breaks. Text inside
//! `script`, `style` and `template` is not page text and is skipped.

use scraper::{ElementRef, Html, Node, Selector};

const CONTENT_REGIONS: &[&str] = &["article", "main", "div"];
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub text: String,
}

pub fn extract_page(html: &str, url: &str) -> PageContent {
    let doc = Html::parse_document(html);
    PageContent {
        title: extract_title(&doc).unwrap_or_else(|| url.to_string()),
        text: extract_text(&doc),
    }
}

fn first_element<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}

fn extract_title(doc: &Html) -> Option<String> {
    let og = first_element(doc, r#"meta[property="og:title"]"#)
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(t) = og {
        return Some(t.to_string());
    }

    let title = first_element(doc, "title")?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    (!title.is_empty()).then_some(title)
}

fn extract_text(doc: &Html) -> String {
    let region = CONTENT_REGIONS
        .iter()
        .find_map(|tag| first_element(doc, tag))
        .unwrap_or_else(|| doc.root_element());
    let text = text_with_breaks(region);
    if text.is_empty() && region.id() != doc.root_element().id() {
        // An empty region (e.g. a layout-only div) falls back to the whole page.
        return text_with_breaks(doc.root_element());
    }
    text
}

fn text_with_breaks(el: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in el.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| NON_TEXT_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }
    parts.join("\n")
}
