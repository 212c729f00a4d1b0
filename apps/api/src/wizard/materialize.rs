//! Draft Materializer — applies a pending suggestion into the draft using
//! per-mode merge rules.
//!
//! Materialization is all-or-nothing and only ever runs on an explicit
//! apply request; generation completion never touches the draft. The one
//! exception, the single-field image URL, is applied directly by its
//! handler and never passes through here.

use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{ModuleOutline, QuestionOutline};
use crate::models::course::{CourseDraft, QuizDraft, QuizQuestion, Section};
use crate::models::AuthoringDraft;
use crate::wizard::{AuthoringMode, PendingSuggestion, SuggestionPayload};

/// Controlled category vocabulary, in match-priority order.
pub const CATEGORY_VOCABULARY: &[&str] = &[
    "programming",
    "data science",
    "design",
    "business",
    "marketing",
    "music",
    "photography",
    "health",
    "language",
    "personal development",
];

/// Applies one pending suggestion. Advisory modes are rejected — they are
/// surfaced verbatim and copied by hand, never merged.
pub fn materialize(
    draft: &mut AuthoringDraft,
    suggestion: &PendingSuggestion,
) -> Result<(), AppError> {
    match suggestion.mode {
        AuthoringMode::ModuleStructure => {
            let Some(SuggestionPayload::Modules(modules)) = &suggestion.payload else {
                return Err(AppError::Validation(
                    "module-structure suggestion has no extracted modules to apply".to_string(),
                ));
            };
            let course = require_course(draft)?;
            replace_sections(course, modules);
            Ok(())
        }
        AuthoringMode::Quiz => {
            let Some(SuggestionPayload::Questions(questions)) = &suggestion.payload else {
                return Err(AppError::Validation(
                    "quiz suggestion has no extracted questions to apply".to_string(),
                ));
            };
            let course = require_course(draft)?;
            replace_quiz(course, questions);
            Ok(())
        }
        AuthoringMode::Title => {
            let course = require_course(draft)?;
            if let Some(title) = title_from(&suggestion.raw) {
                course.title = title;
            }
            Ok(())
        }
        AuthoringMode::Description => {
            let course = require_course(draft)?;
            course.description = suggestion.raw.trim().to_string();
            Ok(())
        }
        AuthoringMode::ShortDescription => {
            let course = require_course(draft)?;
            course.short_description = short_description_from(&suggestion.raw);
            Ok(())
        }
        AuthoringMode::Category => {
            let course = require_course(draft)?;
            if let Some(category) = category_from(&suggestion.raw) {
                course.category = category.to_string();
            }
            Ok(())
        }
        mode => Err(AppError::Validation(format!(
            "mode {mode:?} is advisory and is never applied to the draft"
        ))),
    }
}

fn require_course(draft: &mut AuthoringDraft) -> Result<&mut CourseDraft, AppError> {
    draft
        .as_course_mut()
        .ok_or_else(|| AppError::Validation("draft is not a course".to_string()))
}

/// Wholesale replacement of the section list: fresh ids, contiguous order,
/// empty item lists.
fn replace_sections(course: &mut CourseDraft, modules: &[ModuleOutline]) {
    course.sections = modules
        .iter()
        .map(|m| {
            let mut section = Section::new(m.title.clone(), m.description.clone());
            section.learning_objectives = m.learning_objectives.clone();
            section.estimated_duration = m.estimated_duration.clone();
            section
        })
        .collect();
    course.renumber_sections();
}

/// Wholesale replacement of the quiz question list with fresh ids. Creates
/// the quiz container on first use.
fn replace_quiz(course: &mut CourseDraft, questions: &[QuestionOutline]) {
    let quiz = course
        .quiz
        .get_or_insert_with(|| QuizDraft::new("Quiz".to_string(), String::new()));
    quiz.questions = questions
        .iter()
        .map(|q| QuizQuestion {
            id: Uuid::new_v4(),
            text: q.text.clone(),
            kind: q.kind,
            options: q.options.clone(),
            correct_answer: q.correct_answer.clone(),
            explanation: q.explanation.clone(),
            points: q.points,
        })
        .collect();
}

/// First non-blank line with a leading enumeration prefix
/// (digits, period, whitespace) stripped.
pub(crate) fn title_from(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    Some(strip_enumeration_prefix(line).to_string())
}

fn strip_enumeration_prefix(line: &str) -> &str {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    let Some(rest) = line[digits..].strip_prefix('.') else {
        return line;
    };
    let trimmed = rest.trim_start();
    // the prefix pattern requires whitespace after the period
    if trimmed.len() == rest.len() {
        return line;
    }
    trimmed
}

/// First non-blank line, truncated to 200 characters with an ellipsis
/// marker appended when anything was cut.
pub(crate) fn short_description_from(raw: &str) -> String {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let mut out: String = line.chars().take(200).collect();
    if line.chars().count() > 200 {
        out.push('…');
    }
    out
}

/// Case-insensitive substring search against the controlled vocabulary, in
/// priority order. `None` leaves the category unset.
pub(crate) fn category_from(raw: &str) -> Option<&'static str> {
    let haystack = raw.to_lowercase();
    CATEGORY_VOCABULARY
        .iter()
        .copied()
        .find(|category| haystack.contains(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extract_modules;
    use crate::models::course::QuestionKind;
    use crate::models::WizardDomain;
    use chrono::Utc;

    fn pending(mode: AuthoringMode, raw: &str, payload: Option<SuggestionPayload>) -> PendingSuggestion {
        PendingSuggestion {
            mode,
            raw: raw.to_string(),
            payload,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_module_structure_replaces_sections_wholesale() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        draft
            .as_course_mut()
            .unwrap()
            .add_section("Old".into(), String::new());

        let raw = r#"{"modules":[{"title":"Intro","description":"Basics"}]}"#;
        let modules = extract_modules(raw).unwrap();
        let suggestion = pending(
            AuthoringMode::ModuleStructure,
            raw,
            Some(SuggestionPayload::Modules(modules)),
        );
        materialize(&mut draft, &suggestion).unwrap();

        let course = draft.as_course().unwrap();
        assert_eq!(course.sections.len(), 1);
        assert_eq!(course.sections[0].title, "Intro");
        assert_eq!(course.sections[0].description, "Basics");
        assert_eq!(course.sections[0].order, 1);
        assert!(course.sections[0].items.is_empty());
    }

    #[test]
    fn test_module_structure_orders_are_contiguous_and_ids_fresh() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        let modules = vec![
            ModuleOutline {
                title: "A".into(),
                description: String::new(),
                learning_objectives: vec![],
                estimated_duration: None,
            },
            ModuleOutline {
                title: "B".into(),
                description: String::new(),
                learning_objectives: vec![],
                estimated_duration: None,
            },
            ModuleOutline {
                title: "C".into(),
                description: String::new(),
                learning_objectives: vec![],
                estimated_duration: None,
            },
        ];
        let suggestion = pending(
            AuthoringMode::ModuleStructure,
            "",
            Some(SuggestionPayload::Modules(modules)),
        );
        materialize(&mut draft, &suggestion).unwrap();

        let course = draft.as_course().unwrap();
        let orders: Vec<u32> = course.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        let mut ids: Vec<Uuid> = course.sections.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_quiz_replaces_question_list() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        let questions = vec![QuestionOutline {
            text: "Q1?".into(),
            kind: QuestionKind::TrueFalse,
            options: vec!["True".into(), "False".into()],
            correct_answer: "True".into(),
            explanation: None,
            points: 5,
        }];
        let suggestion = pending(
            AuthoringMode::Quiz,
            "",
            Some(SuggestionPayload::Questions(questions)),
        );
        materialize(&mut draft, &suggestion).unwrap();

        let quiz = draft.as_course().unwrap().quiz.as_ref().unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].text, "Q1?");
        assert_eq!(quiz.questions[0].points, 5);
    }

    #[test]
    fn test_schema_mode_without_payload_is_rejected() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        let suggestion = pending(AuthoringMode::ModuleStructure, "prose only", None);
        assert!(materialize(&mut draft, &suggestion).is_err());
        assert!(draft.as_course().unwrap().sections.is_empty());
    }

    #[test]
    fn test_title_takes_first_nonblank_line_and_strips_enumeration() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        let suggestion = pending(
            AuthoringMode::Title,
            "\n\n1. Mastering Rust in 30 Days\n2. Another option\n",
            None,
        );
        materialize(&mut draft, &suggestion).unwrap();
        assert_eq!(draft.as_course().unwrap().title, "Mastering Rust in 30 Days");
    }

    #[test]
    fn test_title_without_enumeration_is_kept_verbatim() {
        assert_eq!(title_from("Plain Title").as_deref(), Some("Plain Title"));
        // no whitespace after the period — not an enumeration prefix
        assert_eq!(title_from("3.14 Pies").as_deref(), Some("3.14 Pies"));
    }

    #[test]
    fn test_short_description_truncation_boundary() {
        let exact: String = "a".repeat(200);
        assert_eq!(short_description_from(&exact), exact);

        let long: String = "b".repeat(201);
        let out = short_description_from(&long);
        assert_eq!(out.chars().count(), 201); // 200 kept + ellipsis
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_category_matches_case_insensitively_in_priority_order() {
        assert_eq!(category_from("Great for DESIGN lovers"), Some("design"));
        // both present: earlier vocabulary entry wins
        assert_eq!(
            category_from("design meets programming"),
            Some("programming")
        );
        assert_eq!(category_from("nothing relevant"), None);
    }

    #[test]
    fn test_category_miss_leaves_existing_value() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        draft.as_course_mut().unwrap().category = "music".into();
        let suggestion = pending(AuthoringMode::Category, "no match here", None);
        materialize(&mut draft, &suggestion).unwrap();
        assert_eq!(draft.as_course().unwrap().category, "music");
    }

    #[test]
    fn test_advisory_modes_are_never_applied() {
        for mode in [
            AuthoringMode::ContentIdeas,
            AuthoringMode::Pricing,
            AuthoringMode::Marketing,
            AuthoringMode::ImageIdeas,
            AuthoringMode::FitAnalysis,
            AuthoringMode::TailorResume,
            AuthoringMode::CoverLetter,
            AuthoringMode::InterviewQuestions,
        ] {
            let mut draft = AuthoringDraft::new(mode.domain());
            let suggestion = pending(mode, "some advice", None);
            assert!(
                materialize(&mut draft, &suggestion).is_err(),
                "{mode:?} must not materialize"
            );
        }
    }

    #[test]
    fn test_description_applies_verbatim_trimmed() {
        let mut draft = AuthoringDraft::new(WizardDomain::Course);
        let suggestion = pending(
            AuthoringMode::Description,
            "  A course about things.\n\nSecond paragraph.  ",
            None,
        );
        materialize(&mut draft, &suggestion).unwrap();
        assert_eq!(
            draft.as_course().unwrap().description,
            "A course about things.\n\nSecond paragraph."
        );
    }
}
