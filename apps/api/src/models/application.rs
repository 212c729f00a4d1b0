//! Job-application package draft.
//!
//! All generation modes in this domain are advisory prose — fit analysis,
//! tailored resume, cover letter, interview questions are surfaced to the
//! user and only land in the draft through direct edits, never through
//! automatic materialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub company: String,
    pub role_title: String,
    /// Raw job posting text the tailoring prompts are composed against.
    pub job_description: String,
    /// The user's base resume text, pasted in as-is.
    pub resume_text: String,
    pub tailored_resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let draft = ApplicationDraft::default();
        assert!(draft.job_description.is_empty());
        assert!(draft.tailored_resume.is_none());
        assert!(draft.cover_letter.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let draft = ApplicationDraft {
            company: "Acme".into(),
            role_title: "Platform Engineer".into(),
            job_description: "We need a Rust engineer.".into(),
            resume_text: "Ten years of systems work.".into(),
            tailored_resume: None,
            cover_letter: Some("Dear team,".into()),
        };
        let json = serde_json::to_string(&draft).unwrap();
        let recovered: ApplicationDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.company, "Acme");
        assert_eq!(recovered.cover_letter.as_deref(), Some("Dear team,"));
    }
}
