//! Extraction Engine — recovers well-typed domain objects from unreliable,
//! semi-structured generated text.
//!
//! Three parsing tiers are tried in order, first success short-circuits:
//! 1. direct parse of the whole text
//! 2. parse of a fenced code block's interior (optionally language-tagged)
//! 3. parse of the span from the first `{` to the last `}`
//!
//! A tier succeeds when its candidate parses to a JSON object. The object is
//! then checked for the required top-level array; its elements go through the
//! alias tables in `normalize`. Every failure keeps the original raw text so
//! the user can recover content by hand.

pub mod normalize;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub use normalize::{ModuleOutline, QuestionOutline};

/// Top-level key of the module-structure output contract.
pub const MODULES_KEY: &str = "modules";
/// Top-level key of the quiz output contract.
pub const QUESTIONS_KEY: &str = "questions";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no parseable JSON object found in the generated text")]
    ParseExhausted { raw: String },

    #[error("parsed JSON has no `{key}` array at the top level")]
    SchemaMismatch { key: &'static str, raw: String },

    #[error("every element was dropped during normalization")]
    NoValidElements { raw: String },
}

impl ExtractionError {
    /// The original generated text, kept for manual recovery.
    pub fn raw_text(&self) -> &str {
        match self {
            ExtractionError::ParseExhausted { raw }
            | ExtractionError::SchemaMismatch { raw, .. }
            | ExtractionError::NoValidElements { raw } => raw,
        }
    }
}

/// Extracts canonical module outlines from generated text.
pub fn extract_modules(raw: &str) -> Result<Vec<ModuleOutline>, ExtractionError> {
    let elements = elements_under_key(raw, MODULES_KEY)?;
    let modules: Vec<ModuleOutline> = elements
        .iter()
        .filter_map(normalize::normalize_module)
        .collect();
    if modules.is_empty() {
        return Err(ExtractionError::NoValidElements {
            raw: raw.to_string(),
        });
    }
    debug!("extracted {} module outlines", modules.len());
    Ok(modules)
}

/// Extracts canonical quiz questions from generated text.
pub fn extract_questions(raw: &str) -> Result<Vec<QuestionOutline>, ExtractionError> {
    let elements = elements_under_key(raw, QUESTIONS_KEY)?;
    let questions: Vec<QuestionOutline> = elements
        .iter()
        .filter_map(normalize::normalize_question)
        .collect();
    if questions.is_empty() {
        return Err(ExtractionError::NoValidElements {
            raw: raw.to_string(),
        });
    }
    debug!("extracted {} quiz questions", questions.len());
    Ok(questions)
}

fn elements_under_key(raw: &str, key: &'static str) -> Result<Vec<Value>, ExtractionError> {
    let value = parse_tiered(raw).ok_or_else(|| ExtractionError::ParseExhausted {
        raw: raw.to_string(),
    })?;
    match value.get(key).and_then(Value::as_array) {
        Some(seq) => Ok(seq.clone()),
        None => Err(ExtractionError::SchemaMismatch {
            key,
            raw: raw.to_string(),
        }),
    }
}

/// Runs the three parsing tiers, returning the first JSON object found.
fn parse_tiered(raw: &str) -> Option<Value> {
    if let Some(value) = parse_object(raw) {
        debug!("extraction tier 1 (direct) succeeded");
        return Some(value);
    }
    if let Some(value) = fenced_interior(raw).and_then(parse_object) {
        debug!("extraction tier 2 (fenced block) succeeded");
        return Some(value);
    }
    if let Some(value) = brace_span(raw).and_then(parse_object) {
        debug!("extraction tier 3 (brace span) succeeded");
        return Some(value);
    }
    None
}

/// Parses a candidate substring; only a JSON object counts as success.
/// Scalars and arrays are rejected so the later tiers still get a chance
/// (models sometimes emit a quoted sentence that is technically valid JSON).
fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate.trim())
        .ok()
        .filter(Value::is_object)
}

/// Interior of the first ``` fence, with an optional language tag dropped.
fn fenced_interior(raw: &str) -> Option<&str> {
    let start = raw.find("```")?;
    let rest = &raw[start + 3..];
    let end = rest.find("```")?;
    let block = &rest[..end];
    // A first line without `{` is a language tag (or blank) — skip it.
    match block.find('\n') {
        Some(nl) if !block[..nl].contains('{') => Some(&block[nl + 1..]),
        _ => Some(block),
    }
}

/// Inclusive span from the first `{` to the last `}`.
fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::{QuestionKind, DEFAULT_QUESTION_POINTS};

    const PLAIN_MODULES: &str =
        r#"{"modules":[{"title":"Intro","description":"Basics"}]}"#;

    #[test]
    fn test_tier1_direct_parse() {
        let modules = extract_modules(PLAIN_MODULES).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].title, "Intro");
        assert_eq!(modules[0].description, "Basics");
    }

    #[test]
    fn test_tier2_fenced_block_with_language_tag() {
        let raw = format!(
            "Sure! Here is the structure you asked for:\n\n```json\n{PLAIN_MODULES}\n```\n\nLet me know if you want changes."
        );
        let modules = extract_modules(&raw).unwrap();
        assert_eq!(modules[0].title, "Intro");
    }

    #[test]
    fn test_tier2_fenced_block_without_language_tag() {
        let raw = format!("```\n{PLAIN_MODULES}\n```");
        let modules = extract_modules(&raw).unwrap();
        assert_eq!(modules.len(), 1);
    }

    #[test]
    fn test_tier3_brace_span_in_prose() {
        let raw = format!("Here is your answer: {PLAIN_MODULES} — hope that helps!");
        let modules = extract_modules(&raw).unwrap();
        assert_eq!(modules[0].title, "Intro");
    }

    #[test]
    fn test_all_tiers_fail_is_parse_exhausted_and_keeps_raw() {
        let raw = "I could not produce the structure you asked for.";
        let err = extract_modules(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::ParseExhausted { .. }));
        assert_eq!(err.raw_text(), raw);
    }

    #[test]
    fn test_wrong_top_level_key_is_schema_mismatch() {
        let raw = r#"{"lessons":[{"title":"Intro"}]}"#;
        let err = extract_modules(raw).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::SchemaMismatch { key: MODULES_KEY, .. }
        ));
        assert_eq!(err.raw_text(), raw);
    }

    #[test]
    fn test_key_holding_non_array_is_schema_mismatch() {
        let raw = r#"{"modules": "none"}"#;
        let err = extract_modules(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_empty_array_is_no_valid_elements() {
        // prose wrapper plus an empty array: parse succeeds, nothing survives
        let raw = "Here is your answer: {\"questions\":[]}";
        let err = extract_questions(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::NoValidElements { .. }));
        assert_eq!(err.raw_text(), raw);
    }

    #[test]
    fn test_elements_missing_mandatory_field_are_dropped() {
        let raw = r#"{"modules":[{"description":"no title"},{"title":"Kept"}]}"#;
        let modules = extract_modules(raw).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].title, "Kept");
    }

    #[test]
    fn test_quiz_fenced_true_false_defaults_points() {
        let raw = "```json\n{\"questions\":[{\"question\":\"Q1?\",\"type\":\"TRUE_FALSE\",\"options\":[\"True\",\"False\"],\"correctAnswer\":\"True\"}]}\n```";
        let questions = extract_questions(raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].kind, QuestionKind::TrueFalse);
        assert_eq!(questions[0].points, DEFAULT_QUESTION_POINTS);
        assert_eq!(questions[0].correct_answer, "True");
    }

    #[test]
    fn test_quoted_scalar_does_not_satisfy_tier1() {
        // the whole text is valid JSON (a string) but not an object; the
        // fenced block inside it must still be found by tier 2
        let raw = "\"preamble\" ```json\n{\"modules\":[{\"title\":\"T\"}]}\n``` tail";
        let modules = extract_modules(raw).unwrap();
        assert_eq!(modules[0].title, "T");
    }

    #[test]
    fn test_brace_span_requires_closing_after_opening() {
        assert!(brace_span("} nothing {").is_none());
        assert_eq!(brace_span("x {\"a\":1} y"), Some("{\"a\":1}"));
    }

    #[test]
    fn test_fenced_interior_inline_block() {
        let raw = "```{\"modules\":[]}```";
        assert_eq!(fenced_interior(raw), Some("{\"modules\":[]}"));
    }
}
