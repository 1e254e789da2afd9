//! Recommendation parser.
//!
//! Turns the vision model's Markdown answer into ordered recommendation
//! records. Models do not follow formatting instructions reliably, so the
//! parser runs an ordered chain of strategies and keeps the first one that
//! produces at least one record.
//!
//! Every function here is pure: the same input always yields the same output.

use std::sync::LazyLock;

use regex::Regex;

use hairfit_types::error::SuggestionError;
use hairfit_types::face::Gender;
use hairfit_types::suggestion::{RECOMMENDATION_COUNT, RecommendationRecord};

/// Section boundary: `##`, `###` or `N.` at the start of a line.
static SECTION_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\n)(?:#{2,3}|\d+\.)\s+").expect("section split regex is valid")
});

/// List-item head: marker, label up to `:` or end of line, optional colon.
static LIST_ITEM_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.|[*\-•])\s+([^:\n]+):?\s*").expect("list item regex is valid")
});

/// Where a list-item description stops: the next marker or a blank line.
static LIST_ITEM_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d+\.|[*\-•])\s+|\n\n").expect("list item end regex is valid")
});

/// Gender tokens, longest alternatives first so "female" never reads as "male".
static GENDER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(эмэгтэй|эрэгтэй|female|woman|male|man|эр|эм)\b")
        .expect("gender regex is valid")
});

/// Output of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSuggestions {
    /// Introductory text, when the section strategy found one.
    pub summary: Option<String>,
    /// Records in the order the model listed them.
    pub records: Vec<RecommendationRecord>,
    pub gender: Gender,
}

/// One way of reading recommendations out of model text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Markdown headings or numbered sections, with an introduction first.
    Sections,
    /// Bulleted or numbered `Name: description` items.
    ListItems,
}

impl ParseStrategy {
    /// Strategies in the order they are tried.
    pub const CHAIN: [ParseStrategy; 2] = [ParseStrategy::Sections, ParseStrategy::ListItems];

    pub fn name(&self) -> &'static str {
        match self {
            ParseStrategy::Sections => "sections",
            ParseStrategy::ListItems => "list_items",
        }
    }

    /// Apply this strategy. Returns `None` when it produced no record.
    pub fn apply(&self, text: &str) -> Option<(Option<String>, Vec<RecommendationRecord>)> {
        match self {
            ParseStrategy::Sections => parse_sections(text),
            ParseStrategy::ListItems => parse_list_items(text).map(|records| (None, records)),
        }
    }
}

/// Parse raw model text into recommendation records.
///
/// Fails with [`SuggestionError::ParseFailure`] when no strategy yields a
/// well-formed record.
pub fn parse(raw_text: &str) -> Result<ParsedSuggestions, SuggestionError> {
    let gender = infer_gender(raw_text);

    for strategy in ParseStrategy::CHAIN {
        if let Some((summary, records)) = strategy.apply(raw_text) {
            tracing::debug!(
                strategy = strategy.name(),
                records = records.len(),
                %gender,
                "parsed recommendations"
            );
            return Ok(ParsedSuggestions {
                summary,
                records,
                gender,
            });
        }
    }

    Err(SuggestionError::ParseFailure)
}

/// Infer the subject's gender from the first gender word in the text.
pub fn infer_gender(text: &str) -> Gender {
    let Some(captures) = GENDER_TOKEN.captures(text) else {
        return Gender::Unspecified;
    };

    match captures[1].to_lowercase().as_str() {
        "эмэгтэй" | "female" | "woman" | "эм" => Gender::Female,
        "эрэгтэй" | "male" | "man" | "эр" => Gender::Male,
        _ => Gender::Unspecified,
    }
}

fn parse_sections(text: &str) -> Option<(Option<String>, Vec<RecommendationRecord>)> {
    let segments: Vec<&str> = SECTION_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() < 2 {
        return None;
    }

    let records: Vec<RecommendationRecord> = segments
        .iter()
        .skip(1)
        .take(RECOMMENDATION_COUNT)
        .filter_map(|segment| section_record(segment))
        .collect();

    if records.is_empty() {
        return None;
    }

    Some((Some(segments[0].to_string()), records))
}

fn section_record(segment: &str) -> Option<RecommendationRecord> {
    let mut lines = segment
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty());

    let name = clean_name(lines.next()?);
    let description = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    if name.is_empty() || description.is_empty() {
        return None;
    }
    Some(RecommendationRecord::new(name, description))
}

fn parse_list_items(text: &str) -> Option<Vec<RecommendationRecord>> {
    let mut records = Vec::new();
    let mut pos = 0;

    while let Some(head) = LIST_ITEM_HEAD.captures_at(text, pos) {
        let (Some(whole), Some(label)) = (head.get(0), head.get(2)) else {
            break;
        };

        let body_start = whole.end();
        let body_end = LIST_ITEM_END
            .find_at(text, body_start)
            .map_or(text.len(), |m| m.start());

        let name = clean_name(label.as_str());
        let description = text[body_start..body_end].trim();
        if !name.is_empty() && !description.is_empty() {
            records.push(RecommendationRecord::new(name, description));
        }

        pos = body_end;
    }

    (!records.is_empty()).then_some(records)
}

fn clean_name(raw: &str) -> String {
    raw.replace(['*', '_', '#'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_scenario() {
        let text = "## Intro text\n## Style One\nGreat for round faces.\n## Style Two\nGreat for square faces.";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.summary.as_deref(), Some("Intro text"));
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].name, "Style One");
        assert_eq!(parsed.records[0].description, "Great for round faces.");
        assert_eq!(parsed.records[1].name, "Style Two");
    }

    #[test]
    fn test_sections_strip_markup_and_join_lines() {
        let text = "Your face is oval.\n\n### **Curtain Bangs**\nSoft fringe.\n\nFrames the eyes.\n### _Lob_\nShoulder length.";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.summary.as_deref(), Some("Your face is oval."));
        assert_eq!(parsed.records[0].name, "Curtain Bangs");
        assert_eq!(parsed.records[0].description, "Soft fringe.\nFrames the eyes.");
        assert_eq!(parsed.records[1].name, "Lob");
    }

    #[test]
    fn test_sections_cap_at_five() {
        let mut text = String::from("Intro");
        for i in 1..=8 {
            text.push_str(&format!("\n## Style {i}\nDescription {i}"));
        }
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed.records.len(), 5);
        assert_eq!(parsed.records[4].name, "Style 5");
    }

    #[test]
    fn test_sections_skip_headings_without_description() {
        let text = "Intro\n## Lonely heading\n## Pixie\nVery short.";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].name, "Pixie");
    }

    #[test]
    fn test_list_item_fallback() {
        let text = "- Pixie Cut: Short and bold.\n- Long Layers: Adds movement.";
        let parsed = parse(text).unwrap();
        assert!(parsed.summary.is_none());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].name, "Pixie Cut");
        assert_eq!(parsed.records[0].description, "Short and bold.");
        assert_eq!(parsed.records[1].name, "Long Layers");
        assert_eq!(parsed.records[1].description, "Adds movement.");
    }

    #[test]
    fn test_list_item_stops_at_blank_line() {
        let text = "* **Bob**: Chin length.\n\nSome closing remark.";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].name, "Bob");
        assert_eq!(parsed.records[0].description, "Chin length.");
    }

    #[test]
    fn test_unparseable_text_fails() {
        assert!(matches!(
            parse("I cannot help with that request."),
            Err(SuggestionError::ParseFailure)
        ));
        assert!(matches!(parse(""), Err(SuggestionError::ParseFailure)));
    }

    #[test]
    fn test_gender_first_match_wins() {
        assert_eq!(infer_gender("A young woman with a man behind her"), Gender::Female);
        assert_eq!(infer_gender("The man, not a woman"), Gender::Male);
        assert_eq!(infer_gender("Gender: female"), Gender::Female);
        assert_eq!(infer_gender("Хүйс: эмэгтэй"), Gender::Female);
        assert_eq!(infer_gender("Энэ эрэгтэй хүн"), Gender::Male);
        assert_eq!(infer_gender("A human with many curls"), Gender::Unspecified);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "Hello there, sir.\n1. Quiff\nVolume on top.\n2. Side Part\nClassic and neat.";
        let first = parse(text).unwrap();
        let second = parse(text).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.records.len(), 2);
    }
}
