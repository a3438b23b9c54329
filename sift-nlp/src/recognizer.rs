//! Pattern-based recognition of numeric entities.
//!
//! No gazetteers and no statistical model: only spans whose *format*
//! identifies them are extracted. Patterns are tried in priority order
//! (money, percent, quantity, date, time, ordinal, cardinal) and a candidate
//! overlapping an already accepted span is discarded, so `₹1,070 crore` is a
//! single MONEY entity rather than a MONEY plus a CARDINAL.
//!
//! Indian numbering is understood: `1,00,000` digit grouping and the `lakh`
//! and `crore` scale words.

use std::sync::LazyLock;

use regex::Regex;
use sift_common::Result;

use crate::traits::EntityRecognizer;
use crate::{Entity, EntityLabel};

const NUM: &str = r"(?:[0-9]{1,3}(?:,[0-9]{2,3})+(?:\.[0-9]+)?|[0-9]+(?:\.[0-9]+)?)";
const SCALE: &str = r"(?i:lakhs?|lacs?|crores?|cr|million|mn|billion|bn|trillion|thousand|hundred)";
const CURRENCY_PREFIX: &str = r"(?:₹|\$|€|£|\b(?i:us\$|rs|inr|usd)\.?)";
const CURRENCY_WORD: &str = r"(?i:rupees?|dollars?|euros?|pounds?|usd|inr)";
const UNIT: &str = r"(?i:sq\.?\s*km|sq\.?\s*ft|square\s+(?:kilomet(?:re|er)s?|met(?:re|er)s?|feet)|kms?|kilomet(?:re|er)s?|met(?:re|er)s?|kwh|kw|mwh|mw|gwh|gw|mtpa|mmt|lmt|mt|metric\s+tonnes?|tonnes?|tons?|kgs?|kilograms?|quintals?|hectares?|acres?|lit(?:re|er)s?|feet|ft|cusecs|mbps|gbps)";
const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";
const NUMBER_WORD: &str = r"(?i:one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety|hundred|thousand|lakh|crore|million|billion|dozens?)";

struct Pattern {
    label: EntityLabel,
    regex: Regex,
    /// Capture group holding the entity; 0 is the whole match.
    group: usize,
}

fn pattern(label: EntityLabel, source: String, group: usize) -> Pattern {
    // Sources are assembled from the constants above and are known to be valid.
    let regex = Regex::new(&source).expect("static entity pattern");
    Pattern { label, regex, group }
}

static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    use EntityLabel::*;
    vec![
        // ₹1,070 crore / Rs 6500 crore / $1.5 billion
        pattern(Money, format!(r"{CURRENCY_PREFIX}\s*{NUM}(?:\s*{SCALE}\b)*"), 0),
        // 130 crore rupees / 50 dollars
        pattern(Money, format!(r"\b{NUM}(?:\s*{SCALE}\b)*\s*{CURRENCY_WORD}\b"), 0),
        pattern(Percent, format!(r"\b{NUM}\s*(?:%|(?i:per\s*cent|percent)\b)"), 0),
        // 14.4 km / 800 MW / 2 lakh tonnes
        pattern(Quantity, format!(r"\b{NUM}(?:\s*{SCALE}\b)*\s*{UNIT}\b"), 0),
        pattern(Date, format!(r"\b[0-9]{{1,2}}(?:st|nd|rd|th)?\s+{MONTH}\.?(?:,?\s+[0-9]{{4}})?\b"), 0),
        pattern(Date, format!(r"\b{MONTH}\.?\s+[0-9]{{1,2}}(?:st|nd|rd|th)?(?:,\s*[0-9]{{4}})?\b"), 0),
        pattern(Date, format!(r"\b{MONTH},?\s+[0-9]{{4}}\b"), 0),
        pattern(Date, r"\b[0-9]{4}-[0-9]{2}-[0-9]{2}\b".to_string(), 0),
        pattern(Date, r"\b[0-9]{1,2}[/.-][0-9]{1,2}[/.-](?:[0-9]{4}|[0-9]{2})\b".to_string(), 0),
        // FY 2023-24
        pattern(Date, r"\b(?:FY\s*)?(?:19|20)[0-9]{2}[-–](?:19|20)?[0-9]{2}\b".to_string(), 0),
        // a bare year only after a temporal preposition: "by 2030"
        pattern(
            Date,
            r"(?i:\b(?:in|since|by|until|till|during|from|year|before|after)\s+)((?:19|20)[0-9]{2})\b"
                .to_string(),
            1,
        ),
        // "3:00 PM" in any case; a bare hour needs lower-case or dotted am/pm ("11 PM Mitra" is a count)
        pattern(
            Time,
            r"\b[0-9]{1,2}(?::[0-9]{2}\s*(?i:a\.m\.|p\.m\.|am\b|pm\b)|\s*(?:(?i:a\.m\.|p\.m\.)|am\b|pm\b))"
                .to_string(),
            0,
        ),
        pattern(Time, r"\b[0-9]{1,2}:[0-9]{2}\b".to_string(), 0),
        pattern(Ordinal, r"\b[0-9]+(?:st|nd|rd|th)\b".to_string(), 0),
        pattern(
            Ordinal,
            r"(?i:\b(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\b)".to_string(),
            0,
        ),
        pattern(Cardinal, format!(r"\b{NUM}\b(?:\s+{SCALE}\b)*"), 0),
        pattern(Cardinal, format!(r"\b{NUMBER_WORD}(?:[\s-]+{NUMBER_WORD})*\b"), 0),
    ]
});

/// Regex-only recognizer for numeric entity types.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRecognizer;

impl PatternRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        let mut entities: Vec<Entity> = Vec::new();

        for p in PATTERNS.iter() {
            for caps in p.regex.captures_iter(text) {
                let Some(m) = caps.get(p.group) else {
                    continue;
                };
                if !overlaps(&entities, m.start(), m.end()) {
                    entities.push(Entity {
                        text: m.as_str().to_string(),
                        label: p.label,
                        start: m.start(),
                        end: m.end(),
                    });
                }
            }
        }

        entities.sort_by_key(|e| e.start);
        Ok(entities)
    }

    fn supported_labels(&self) -> Vec<EntityLabel> {
        EntityLabel::ALL.to_vec()
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

/// Check if a span overlaps with existing entities.
fn overlaps(entities: &[Entity], start: usize, end: usize) -> bool {
    entities.iter().any(|e| !(end <= e.start || start >= e.end))
}
