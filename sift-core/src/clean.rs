//! First boilerplate pass: line level.

use crate::filters::FilterSet;

/// Line separators recognised when splitting page text.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` into trimmed, non-empty lines that carry no removal marker.
pub fn clean_lines<'a>(text: &'a str, filters: &FilterSet) -> Vec<&'a str> {
    text.split(is_line_break)
        .filter(|line| !filters.has_removal_marker(line))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
