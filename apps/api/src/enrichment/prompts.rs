// Prompt constants for per-item enrichment calls.

use crate::enrichment::EnrichmentKind;
use crate::wizard::compose::ComposedRequest;

pub const ENRICHMENT_SYSTEM: &str = "You are a course content writer producing material \
    for one specific module or lesson. \
    Stay within the scope of the material you are given. \
    No preamble, no closing pleasantries.";

/// Video script. Replace {course_title}, {owner_title}, {owner_body},
/// {user_context}.
const VIDEO_PROMPT_TEMPLATE: &str = r#"Write a talking-head video script (5-8 minutes of speech) for this lesson.

Course: {course_title}
Lesson: {owner_title}
Lesson notes: {owner_body}

Direction from the author: {user_context}

Include a hook, the core explanation with one worked example, and a recap."#;

/// Practice exercise. Same placeholders.
const EXERCISE_PROMPT_TEMPLATE: &str = r#"Design a hands-on practice exercise for this lesson.

Course: {course_title}
Lesson: {owner_title}
Lesson notes: {owner_body}

Direction from the author: {user_context}

State the task, starter material, and a model solution."#;

/// Reading passage. Same placeholders.
const READING_PROMPT_TEMPLATE: &str = r#"Write a reading passage (600-900 words) covering this lesson's material.

Course: {course_title}
Lesson: {owner_title}
Lesson notes: {owner_body}

Direction from the author: {user_context}"#;

/// Assessment ideas. Same placeholders.
const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"Propose 3 ways to assess whether a learner mastered this lesson, from quick check to substantial project.

Course: {course_title}
Lesson: {owner_title}
Lesson notes: {owner_body}

Direction from the author: {user_context}"#;

/// Composes the per-kind enrichment request for one owner.
pub fn compose_enrichment(
    kind: EnrichmentKind,
    course_title: &str,
    owner_title: &str,
    owner_body: &str,
    user_context: &str,
) -> ComposedRequest {
    let template = match kind {
        EnrichmentKind::Video => VIDEO_PROMPT_TEMPLATE,
        EnrichmentKind::Exercise => EXERCISE_PROMPT_TEMPLATE,
        EnrichmentKind::Reading => READING_PROMPT_TEMPLATE,
        EnrichmentKind::Assessment => ASSESSMENT_PROMPT_TEMPLATE,
    };
    let user_context = if user_context.trim().is_empty() {
        "(none)"
    } else {
        user_context.trim()
    };
    let owner_body = if owner_body.trim().is_empty() {
        "(none)"
    } else {
        owner_body.trim()
    };
    ComposedRequest {
        system: ENRICHMENT_SYSTEM,
        prompt: template
            .replace("{course_title}", course_title)
            .replace("{owner_title}", owner_title)
            .replace("{owner_body}", owner_body)
            .replace("{user_context}", user_context),
    }
}
