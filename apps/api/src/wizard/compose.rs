//! Prompt Composer — pure mapping from (mode, draft snapshot, user context)
//! to a gateway request. Reads the draft, never mutates it.

use crate::errors::AppError;
use crate::models::course::CourseDraft;
use crate::models::AuthoringDraft;
use crate::wizard::materialize::CATEGORY_VOCABULARY;
use crate::wizard::prompts::*;
use crate::wizard::AuthoringMode;

/// A composed gateway request: cross-cutting system fragment plus the
/// mode-specific prompt.
#[derive(Debug, Clone)]
pub struct ComposedRequest {
    pub system: &'static str,
    pub prompt: String,
}

/// Composes the request for one authoring mode against a draft snapshot.
/// Fails only when the mode belongs to the other domain.
pub fn compose(
    mode: AuthoringMode,
    draft: &AuthoringDraft,
    user_context: &str,
) -> Result<ComposedRequest, AppError> {
    if mode.domain() != draft.domain() {
        return Err(AppError::Validation(format!(
            "mode {mode:?} does not apply to a {:?} draft",
            draft.domain()
        )));
    }

    let user_context = if user_context.trim().is_empty() {
        "(none)"
    } else {
        user_context.trim()
    };

    let request = match (mode, draft) {
        (AuthoringMode::ModuleStructure, AuthoringDraft::Course(course)) => ComposedRequest {
            system: STRUCTURED_SYSTEM,
            prompt: MODULE_STRUCTURE_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{category}", &course.category)
                .replace("{description}", &course.description)
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::Quiz, AuthoringDraft::Course(course)) => ComposedRequest {
            system: STRUCTURED_SYSTEM,
            prompt: QUIZ_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{outline}", &outline_of(course))
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::Title, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: TITLE_PROMPT_TEMPLATE
                .replace("{description}", &course.description)
                .replace("{category}", &course.category)
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::Description, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: DESCRIPTION_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{category}", &course.category)
                .replace("{outline}", &outline_of(course))
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::ShortDescription, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: SHORT_DESCRIPTION_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{description}", &course.description),
        },
        (AuthoringMode::Category, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: CATEGORY_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{description}", &course.description)
                .replace("{vocabulary}", &CATEGORY_VOCABULARY.join(", ")),
        },
        (AuthoringMode::ContentIdeas, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: CONTENT_IDEAS_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{outline}", &outline_of(course))
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::Pricing, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: PRICING_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{category}", &course.category)
                .replace("{outline}", &outline_of(course))
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::Marketing, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: MARKETING_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{description}", &course.description)
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::ImageIdeas, AuthoringDraft::Course(course)) => ComposedRequest {
            system: ADVISORY_SYSTEM,
            prompt: IMAGE_IDEAS_PROMPT_TEMPLATE
                .replace("{title}", &course.title)
                .replace("{category}", &course.category),
        },
        (AuthoringMode::FitAnalysis, AuthoringDraft::Application(app)) => ComposedRequest {
            system: APPLICATION_SYSTEM,
            prompt: FIT_ANALYSIS_PROMPT_TEMPLATE
                .replace("{job_description}", &app.job_description)
                .replace("{resume_text}", &app.resume_text),
        },
        (AuthoringMode::TailorResume, AuthoringDraft::Application(app)) => ComposedRequest {
            system: APPLICATION_SYSTEM,
            prompt: TAILOR_RESUME_PROMPT_TEMPLATE
                .replace("{job_description}", &app.job_description)
                .replace("{resume_text}", &app.resume_text)
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::CoverLetter, AuthoringDraft::Application(app)) => ComposedRequest {
            system: APPLICATION_SYSTEM,
            prompt: COVER_LETTER_PROMPT_TEMPLATE
                .replace("{company}", &app.company)
                .replace("{role_title}", &app.role_title)
                .replace("{job_description}", &app.job_description)
                .replace("{resume_text}", &app.resume_text)
                .replace("{user_context}", user_context),
        },
        (AuthoringMode::InterviewQuestions, AuthoringDraft::Application(app)) => ComposedRequest {
            system: APPLICATION_SYSTEM,
            prompt: INTERVIEW_QUESTIONS_PROMPT_TEMPLATE
                .replace("{job_description}", &app.job_description)
                .replace("{resume_text}", &app.resume_text),
        },
        // the domain check above makes this unreachable
        _ => unreachable!("mode/domain pairing already validated"),
    };

    Ok(request)
}

/// Human-readable module outline fed into quiz and advisory prompts.
fn outline_of(course: &CourseDraft) -> String {
    if course.sections.is_empty() {
        return "(no modules yet)".to_string();
    }
    course
        .sections
        .iter()
        .map(|s| {
            if s.description.is_empty() {
                format!("{}. {}", s.order, s.title)
            } else {
                format!("{}. {} — {}", s.order, s.title, s.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
