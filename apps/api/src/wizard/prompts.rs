// All prompt constants for the wizard's authoring modes.
// Schema-bearing templates embed the exact output contract the extraction
// engine validates against — key names, nesting, and type tokens.

/// System prompt for schema-bearing modes — enforces JSON-only output.
pub const STRUCTURED_SYSTEM: &str = "You are a precise course-authoring assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for advisory prose modes.
pub const ADVISORY_SYSTEM: &str = "You are an experienced course-authoring coach. \
    Write clear, specific, immediately usable suggestions. \
    No preamble, no closing pleasantries.";

/// System prompt for the application domain's advisory modes.
pub const APPLICATION_SYSTEM: &str = "You are an expert career coach and professional writer. \
    Ground every statement in the resume text you are given. \
    Do NOT invent employers, titles, dates, or accomplishments. \
    No preamble, no closing pleasantries.";

/// Module-structure template. Replace {title}, {category}, {description},
/// {user_context}.
pub const MODULE_STRUCTURE_PROMPT_TEMPLATE: &str = r#"Design the module structure for an online course.

Course title: {title}
Category: {category}
Description: {description}

Additional direction from the author:
{user_context}

Return a JSON object with this EXACT schema (no extra fields):
{
  "modules": [
    {
      "title": "Module title",
      "description": "What the module covers",
      "learningObjectives": ["objective 1", "objective 2"],
      "estimatedDuration": "2 hours"
    }
  ]
}

Rules:
- 4 to 8 modules, ordered from fundamentals to advanced material
- "learningObjectives" and "estimatedDuration" are optional per module
- Every module MUST have a non-empty "title""#;

/// Quiz template. Replace {title}, {outline}, {user_context}.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Write a quiz for an online course.

Course title: {title}
Module outline:
{outline}

Additional direction from the author:
{user_context}

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "question": "The question text",
      "type": "MULTIPLE_CHOICE" | "TRUE_FALSE" | "SHORT_ANSWER",
      "options": ["option A", "option B", "option C", "option D"],
      "correctAnswer": "option B",
      "explanation": "Why this is correct",
      "points": 5
    }
  ]
}

Rules:
- 5 to 10 questions covering the breadth of the outline
- "options" MUST be non-empty for MULTIPLE_CHOICE; use ["True", "False"] for TRUE_FALSE
- "explanation" and "points" are optional"#;

/// Title suggestions. Replace {description}, {category}, {user_context}.
pub const TITLE_PROMPT_TEMPLATE: &str = r#"Suggest 5 compelling titles for an online course.

What the course covers: {description}
Category: {category}
Direction from the author: {user_context}

One title per line, best first. No numbering commentary, no explanations."#;

/// Long description. Replace {title}, {category}, {outline}, {user_context}.
pub const DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Write a course description of 2-4 paragraphs for a course landing page.

Course title: {title}
Category: {category}
Module outline:
{outline}

Direction from the author: {user_context}

Speak to the learner directly: what they will build, what they will be able
to do afterwards, and who the course is for."#;

/// Short description. Replace {title}, {description}.
pub const SHORT_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Condense this course pitch into one catalog-card sentence.

Course title: {title}
Full description: {description}

Return the sentence only."#;

/// Category pick. Replace {title}, {description}, {vocabulary}.
pub const CATEGORY_PROMPT_TEMPLATE: &str = r#"Pick the single best category for this course.

Course title: {title}
Description: {description}

Choose from exactly these categories:
{vocabulary}

Return the chosen category name only."#;

/// Per-module content ideas. Replace {title}, {outline}, {user_context}.
pub const CONTENT_IDEAS_PROMPT_TEMPLATE: &str = r#"Propose concrete content ideas for each module of this course.

Course title: {title}
Module outline:
{outline}

Direction from the author: {user_context}

For each module suggest 2-3 specific lessons, exercises, or demos, with a
one-line rationale each."#;

/// Pricing advice. Replace {title}, {category}, {outline}, {user_context}.
pub const PRICING_PROMPT_TEMPLATE: &str = r#"Recommend a price for this online course.

Course title: {title}
Category: {category}
Module outline:
{outline}

Direction from the author: {user_context}

Give a recommended price in USD, a plausible range, and a short justification
based on scope and comparable courses."#;

/// Marketing copy. Replace {title}, {description}, {user_context}.
pub const MARKETING_PROMPT_TEMPLATE: &str = r#"Write marketing copy for this course: a tagline, three selling points, and a short announcement post.

Course title: {title}
Description: {description}

Direction from the author: {user_context}"#;

/// Cover-image ideas. Replace {title}, {category}.
pub const IMAGE_IDEAS_PROMPT_TEMPLATE: &str = r#"Describe 3 cover-image concepts for this course, each as one vivid sentence usable as an image-generation prompt.

Course title: {title}
Category: {category}"#;

/// Fit analysis. Replace {job_description}, {resume_text}.
pub const FIT_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze how well this candidate fits this role.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

Cover: strongest matches, gaps the candidate should address, and an overall
verdict in one closing line. Base every point on the resume text — do not
assume experience that is not written there."#;

/// Tailored resume. Replace {job_description}, {resume_text}, {user_context}.
pub const TAILOR_RESUME_PROMPT_TEMPLATE: &str = r#"Rewrite this resume so it targets the role below. Keep every fact; change emphasis, ordering, and wording only.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

Direction from the candidate: {user_context}

Return the full tailored resume text."#;

/// Cover letter. Replace {company}, {role_title}, {job_description},
/// {resume_text}, {user_context}.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a one-page cover letter for this application.

Company: {company}
Role: {role_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

Direction from the candidate: {user_context}

Three to four paragraphs, grounded in the resume, specific to the company."#;

/// Interview questions. Replace {job_description}, {resume_text}.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = r#"Predict the 10 most likely interview questions for this role and candidate, with a one-line hint on how to answer each.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}"#;
