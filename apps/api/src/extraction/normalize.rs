//! Field-alias normalization — one fixed alias table per schema, producing a
//! single canonical type per element.
//!
//! Generators name fields inconsistently across providers and runs
//! (`question` vs `question_text` vs `questionText`). The alias tables below
//! are the only place that duck-typing is resolved; call sites never branch
//! on field presence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::course::{QuestionKind, DEFAULT_QUESTION_POINTS};

/// Canonical module element. Ids and order are synthesized at
/// materialization, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOutline {
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
    pub estimated_duration: Option<String>,
}

/// Canonical quiz-question element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutline {
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub points: u32,
}

const MODULE_TITLE_ALIASES: &[&str] = &["title", "name", "moduleName", "module_name"];
const MODULE_DESCRIPTION_ALIASES: &[&str] = &["description", "summary"];
const MODULE_OBJECTIVES_ALIASES: &[&str] =
    &["learningObjectives", "learning_objectives", "objectives"];
const MODULE_DURATION_ALIASES: &[&str] = &["estimatedDuration", "estimated_duration", "duration"];

const QUESTION_TEXT_ALIASES: &[&str] = &["question", "question_text", "questionText"];
const QUESTION_KIND_ALIASES: &[&str] = &["type", "question_type", "questionType"];
const QUESTION_OPTIONS_ALIASES: &[&str] = &["options", "choices", "answers"];
const QUESTION_ANSWER_ALIASES: &[&str] =
    &["correctAnswer", "correct_answer", "answer", "solution"];
const QUESTION_EXPLANATION_ALIASES: &[&str] = &["explanation", "rationale", "reasoning"];
const QUESTION_POINTS_ALIASES: &[&str] = &["points", "score"];

/// Normalizes one module element. Returns `None` (element dropped) when the
/// mandatory title is absent or blank under every alias.
pub(crate) fn normalize_module(element: &Value) -> Option<ModuleOutline> {
    let title = string_alias(element, MODULE_TITLE_ALIASES)?;
    Some(ModuleOutline {
        title,
        description: string_alias(element, MODULE_DESCRIPTION_ALIASES).unwrap_or_default(),
        learning_objectives: string_list_alias(element, MODULE_OBJECTIVES_ALIASES),
        estimated_duration: string_alias(element, MODULE_DURATION_ALIASES),
    })
}

/// Normalizes one question element. Dropped when the question text is
/// missing, and also when a multiple-choice question ends up with no
/// options (the draft invariant would be violated at materialization).
pub(crate) fn normalize_question(element: &Value) -> Option<QuestionOutline> {
    let text = string_alias(element, QUESTION_TEXT_ALIASES)?;
    let kind = string_alias(element, QUESTION_KIND_ALIASES)
        .map(|token| parse_kind_token(&token))
        .unwrap_or(QuestionKind::MultipleChoice);
    let options = string_list_alias(element, QUESTION_OPTIONS_ALIASES);
    if kind == QuestionKind::MultipleChoice && options.is_empty() {
        return None;
    }
    Some(QuestionOutline {
        text,
        kind,
        options,
        correct_answer: string_alias(element, QUESTION_ANSWER_ALIASES).unwrap_or_default(),
        explanation: string_alias(element, QUESTION_EXPLANATION_ALIASES),
        points: points_alias(element, QUESTION_POINTS_ALIASES),
    })
}

/// Unknown kind tokens fall back to multiple choice.
fn parse_kind_token(token: &str) -> QuestionKind {
    match token.trim().to_ascii_uppercase().as_str() {
        "TRUE_FALSE" => QuestionKind::TrueFalse,
        "SHORT_ANSWER" => QuestionKind::ShortAnswer,
        _ => QuestionKind::MultipleChoice,
    }
}

/// First alias holding a non-blank string.
fn string_alias(element: &Value, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|key| element.get(key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First alias holding an array; non-string entries are skipped.
fn string_list_alias(element: &Value, aliases: &[&str]) -> Vec<String> {
    aliases
        .iter()
        .filter_map(|key| element.get(key))
        .find_map(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// First alias holding a positive integer; anything else gets the default.
fn points_alias(element: &Value, aliases: &[&str]) -> u32 {
    aliases
        .iter()
        .filter_map(|key| element.get(key))
        .find_map(Value::as_u64)
        .filter(|p| *p > 0)
        .map(|p| p as u32)
        .unwrap_or(DEFAULT_QUESTION_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_resolution_is_input_order_independent() {
        let camel = json!({
            "questionText": "What is ownership?",
            "questionType": "SHORT_ANSWER",
            "answers": [],
            "solution": "Move semantics",
            "reasoning": "Core concept",
            "score": 10
        });
        let snake = json!({
            "question": "What is ownership?",
            "type": "SHORT_ANSWER",
            "options": [],
            "correctAnswer": "Move semantics",
            "explanation": "Core concept",
            "points": 10
        });
        let a = normalize_question(&camel).unwrap();
        let b = normalize_question(&snake).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_module_title_aliases() {
        for key in ["title", "name", "moduleName", "module_name"] {
            let element = json!({ key: "Getting Started" });
            let module = normalize_module(&element).unwrap();
            assert_eq!(module.title, "Getting Started");
        }
    }

    #[test]
    fn test_module_without_title_is_dropped() {
        let element = json!({"description": "orphan"});
        assert!(normalize_module(&element).is_none());
    }

    #[test]
    fn test_blank_title_counts_as_missing() {
        let element = json!({"title": "   "});
        assert!(normalize_module(&element).is_none());
    }

    #[test]
    fn test_module_optional_fields() {
        let element = json!({
            "name": "Advanced Topics",
            "summary": "Deep dives",
            "learning_objectives": ["lifetimes", "pinning"],
            "estimated_duration": "2 weeks"
        });
        let module = normalize_module(&element).unwrap();
        assert_eq!(module.description, "Deep dives");
        assert_eq!(module.learning_objectives, vec!["lifetimes", "pinning"]);
        assert_eq!(module.estimated_duration.as_deref(), Some("2 weeks"));
    }

    #[test]
    fn test_question_without_text_is_dropped() {
        let element = json!({"type": "TRUE_FALSE", "options": ["True", "False"]});
        assert!(normalize_question(&element).is_none());
    }

    #[test]
    fn test_unknown_kind_token_defaults_to_multiple_choice() {
        let element = json!({
            "question": "Pick one",
            "type": "MULTI_SELECT",
            "choices": ["a", "b"]
        });
        let q = normalize_question(&element).unwrap();
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
    }

    #[test]
    fn test_missing_kind_defaults_to_multiple_choice() {
        let element = json!({"question": "Pick one", "options": ["a", "b"]});
        let q = normalize_question(&element).unwrap();
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
    }

    #[test]
    fn test_multiple_choice_without_options_is_dropped() {
        let element = json!({"question": "Pick one", "type": "MULTIPLE_CHOICE"});
        assert!(normalize_question(&element).is_none());
    }

    #[test]
    fn test_short_answer_without_options_survives() {
        let element = json!({"question": "Explain borrowing", "type": "SHORT_ANSWER"});
        let q = normalize_question(&element).unwrap();
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_points_default_on_absent_invalid_or_nonpositive() {
        for element in [
            json!({"question": "Q", "options": ["a"]}),
            json!({"question": "Q", "options": ["a"], "points": "five"}),
            json!({"question": "Q", "options": ["a"], "points": 0}),
            json!({"question": "Q", "options": ["a"], "points": -3}),
        ] {
            let q = normalize_question(&element).unwrap();
            assert_eq!(q.points, DEFAULT_QUESTION_POINTS);
        }
    }

    #[test]
    fn test_points_score_alias() {
        let element = json!({"question": "Q", "options": ["a"], "score": 7});
        assert_eq!(normalize_question(&element).unwrap().points, 7);
    }

    #[test]
    fn test_non_string_list_entries_are_skipped() {
        let element = json!({"question": "Q", "options": ["a", 2, null, "b"]});
        let q = normalize_question(&element).unwrap();
        assert_eq!(q.options, vec!["a", "b"]);
    }
}
