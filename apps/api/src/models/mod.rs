pub mod application;
pub mod course;

use serde::{Deserialize, Serialize};

use crate::models::application::ApplicationDraft;
use crate::models::course::CourseDraft;

/// The two authoring domains served by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardDomain {
    Course,
    Application,
}

/// The in-progress artifact owned by a wizard session.
///
/// All mutation flows through the named operations on the domain drafts or
/// through the materializer — handlers never reach into fields to splice
/// collections directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum AuthoringDraft {
    Course(CourseDraft),
    Application(ApplicationDraft),
}

impl AuthoringDraft {
    pub fn new(domain: WizardDomain) -> Self {
        match domain {
            WizardDomain::Course => AuthoringDraft::Course(CourseDraft::default()),
            WizardDomain::Application => AuthoringDraft::Application(ApplicationDraft::default()),
        }
    }

    pub fn domain(&self) -> WizardDomain {
        match self {
            AuthoringDraft::Course(_) => WizardDomain::Course,
            AuthoringDraft::Application(_) => WizardDomain::Application,
        }
    }

    pub fn as_course(&self) -> Option<&CourseDraft> {
        match self {
            AuthoringDraft::Course(draft) => Some(draft),
            AuthoringDraft::Application(_) => None,
        }
    }

    pub fn as_course_mut(&mut self) -> Option<&mut CourseDraft> {
        match self {
            AuthoringDraft::Course(draft) => Some(draft),
            AuthoringDraft::Application(_) => None,
        }
    }

    pub fn as_application(&self) -> Option<&ApplicationDraft> {
        match self {
            AuthoringDraft::Application(draft) => Some(draft),
            AuthoringDraft::Course(_) => None,
        }
    }

    pub fn as_application_mut(&mut self) -> Option<&mut ApplicationDraft> {
        match self {
            AuthoringDraft::Application(draft) => Some(draft),
            AuthoringDraft::Course(_) => None,
        }
    }
}
