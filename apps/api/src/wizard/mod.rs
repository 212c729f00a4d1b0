//! Wizard — owns the step sequence, the single draft instance, and the
//! pending (not yet applied) generation results of one authoring session.
//!
//! Navigation is permissive: `advance`/`retreat`/`go_to` clamp instead of
//! erroring, and advancing past an invalid step is allowed — enforcement is
//! the caller's job, surfaced through `is_step_valid`.

pub mod compose;
pub mod handlers;
pub mod materialize;
pub mod prompts;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{ModuleOutline, QuestionOutline};
use crate::models::{AuthoringDraft, WizardDomain};

/// One step of a wizard's fixed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    // course domain
    BasicInfo,
    Curriculum,
    Quiz,
    Pricing,
    Media,
    Review,
    // application domain
    JobPosting,
    Profile,
    Tailoring,
}

/// An authoring intent. Determines prompt shape and materialization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthoringMode {
    // course domain
    Title,
    Description,
    ShortDescription,
    Category,
    ModuleStructure,
    Quiz,
    ContentIdeas,
    Pricing,
    Marketing,
    ImageIdeas,
    // application domain
    FitAnalysis,
    TailorResume,
    CoverLetter,
    InterviewQuestions,
}

impl AuthoringMode {
    pub fn domain(&self) -> WizardDomain {
        match self {
            AuthoringMode::FitAnalysis
            | AuthoringMode::TailorResume
            | AuthoringMode::CoverLetter
            | AuthoringMode::InterviewQuestions => WizardDomain::Application,
            _ => WizardDomain::Course,
        }
    }

    /// Schema-bearing modes carry an explicit output contract in their
    /// prompt and run through the extraction engine on completion.
    pub fn is_schema_bearing(&self) -> bool {
        matches!(self, AuthoringMode::ModuleStructure | AuthoringMode::Quiz)
    }
}

/// Canonical elements recovered from a schema-bearing generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "shape", content = "elements")]
pub enum SuggestionPayload {
    Modules(Vec<ModuleOutline>),
    Questions(Vec<QuestionOutline>),
}

/// A generation result awaiting the user's explicit apply decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingSuggestion {
    pub mode: AuthoringMode,
    /// The collaborator's raw text, always kept for manual recovery.
    pub raw: String,
    pub payload: Option<SuggestionPayload>,
    pub generated_at: DateTime<Utc>,
}

/// One authoring session: step cursor, draft, pending suggestions, and the
/// per-call-site request counters that gate stale results.
#[derive(Debug)]
pub struct WizardSession {
    pub id: Uuid,
    pub domain: WizardDomain,
    pub steps: Vec<StepId>,
    pub current: usize,
    pub draft: AuthoringDraft,
    pub pending: HashMap<AuthoringMode, PendingSuggestion>,
    latest_request: HashMap<AuthoringMode, u64>,
    pub submitted: bool,
    pub created_at: DateTime<Utc>,
}

const COURSE_STEPS: &[StepId] = &[
    StepId::BasicInfo,
    StepId::Curriculum,
    StepId::Quiz,
    StepId::Pricing,
    StepId::Media,
    StepId::Review,
];

const APPLICATION_STEPS: &[StepId] = &[
    StepId::JobPosting,
    StepId::Profile,
    StepId::Tailoring,
    StepId::Review,
];

impl WizardSession {
    pub fn new(domain: WizardDomain) -> Self {
        let steps = match domain {
            WizardDomain::Course => COURSE_STEPS.to_vec(),
            WizardDomain::Application => APPLICATION_STEPS.to_vec(),
        };
        Self {
            id: Uuid::new_v4(),
            domain,
            steps,
            current: 0,
            draft: AuthoringDraft::new(domain),
            pending: HashMap::new(),
            latest_request: HashMap::new(),
            submitted: false,
            created_at: Utc::now(),
        }
    }

    /// Moves forward one step; no-op at the last step.
    pub fn advance(&mut self) {
        self.go_to(self.current.saturating_add(1));
    }

    /// Moves back one step; no-op at the first step.
    pub fn retreat(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    /// Jumps to `index`, clamped to the valid step range.
    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.steps.len() - 1);
    }

    /// Per-step validity. Advancing is never blocked here; the UI uses this
    /// to decide whether to allow it.
    pub fn is_step_valid(&self, index: usize) -> bool {
        let Some(step) = self.steps.get(index) else {
            return false;
        };
        match step {
            StepId::BasicInfo => self.draft.as_course().is_some_and(|c| {
                !c.title.trim().is_empty() && !c.category.trim().is_empty()
            }),
            StepId::Curriculum => self
                .draft
                .as_course()
                .is_some_and(|c| !c.sections.is_empty()),
            StepId::Pricing => self.draft.as_course().is_some_and(|c| c.price_usd.is_some()),
            StepId::JobPosting => self
                .draft
                .as_application()
                .is_some_and(|a| !a.job_description.trim().is_empty()),
            StepId::Profile => self
                .draft
                .as_application()
                .is_some_and(|a| !a.resume_text.trim().is_empty()),
            StepId::Review => (0..index).all(|i| self.is_step_valid(i)),
            StepId::Quiz | StepId::Media | StepId::Tailoring => true,
        }
    }

    /// Guards every mutating operation: submission is terminal.
    pub fn ensure_mutable(&self) -> Result<(), AppError> {
        if self.submitted {
            return Err(AppError::Validation(
                "wizard session has been submitted and can no longer change".to_string(),
            ));
        }
        Ok(())
    }

    /// Issues a new request number for a call site. The matching result is
    /// the only one that will be stored; see `is_latest`.
    pub fn issue_request(&mut self, mode: AuthoringMode) -> u64 {
        let counter = self.latest_request.entry(mode).or_insert(0);
        *counter += 1;
        *counter
    }

    /// True when `seq` is still the newest request issued at this call site.
    /// A stale result (user re-triggered the same site meanwhile) is
    /// discarded by the caller.
    pub fn is_latest(&self, mode: AuthoringMode, seq: u64) -> bool {
        self.latest_request.get(&mode).copied() == Some(seq)
    }

    pub fn store_pending(&mut self, suggestion: PendingSuggestion) {
        self.pending.insert(suggestion.mode, suggestion);
    }

    pub fn take_pending(&mut self, mode: AuthoringMode) -> Option<PendingSuggestion> {
        self.pending.remove(&mode)
    }
}

/// In-process session storage. Critical sections are short and never held
/// across an await.
pub type SessionStore = Arc<RwLock<HashMap<Uuid, WizardSession>>>;

pub fn new_session_store() -> SessionStore {
    Arc::new(RwLock::new(HashMap::new()))
}
