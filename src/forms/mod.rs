//! Form controllers and the submit protocol they share.
//!
//! Every controller follows the same sequence on submit: clear the previous
//! feedback, run all of its rules without stopping at the first failure,
//! then either render the collected errors or hand a payload to the
//! [`SiteApi`](crate::api::SiteApi) and render the typed outcome.

pub mod contact;
pub mod lookup;
pub mod project;

use crate::api::SubmitResponse;
use crate::error::{SiteError, SiteResult};
use crate::view::FormView;

pub use contact::{ContactFields, ContactForm, ContactRules, validate_contact};
pub use lookup::{LookupForm, validate_lookup};
pub use project::{ProjectFields, ProjectForm, ProjectValidation, validate_project};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Form field the message belongs to, when there is one.
    pub field: Option<String>,
    pub message: String,
}

/// Validation failures in the order the rules ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList(Vec<ValidationError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(ValidationError {
            field: Some(field.to_string()),
            message: message.into(),
        });
    }

    pub fn push_general(&mut self, message: impl Into<String>) {
        self.0.push(ValidationError {
            field: None,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field.as_deref() == Some(field))
    }

    /// `Ok(value)` when nothing was collected.
    pub fn into_result<T>(self, value: T) -> Result<T, ErrorList> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    ServerRejected,
    NetworkFailed,
}

/// What one network submission came back with.
#[derive(Debug)]
pub enum SubmitOutcome {
    Succeeded {
        message: Option<String>,
    },
    ServerRejected {
        message: Option<String>,
        errors: Vec<String>,
    },
    NetworkFailed(SiteError),
}

impl SubmitOutcome {
    pub fn from_response(result: SiteResult<SubmitResponse>) -> Self {
        match result {
            Ok(response) if response.is_error() => SubmitOutcome::ServerRejected {
                errors: response.error_messages(),
                message: response.msg,
            },
            Ok(response) => SubmitOutcome::Succeeded {
                message: response.msg.filter(|m| !m.trim().is_empty()),
            },
            Err(e) => SubmitOutcome::NetworkFailed(e),
        }
    }

    pub fn state(&self) -> SubmitState {
        match self {
            SubmitOutcome::Succeeded { .. } => SubmitState::Succeeded,
            SubmitOutcome::ServerRejected { .. } => SubmitState::ServerRejected,
            SubmitOutcome::NetworkFailed(_) => SubmitState::NetworkFailed,
        }
    }
}

/// Marks every field that has a message and renders the banner list.
pub(crate) fn present_errors(view: &mut FormView, errors: &ErrorList) {
    for error in errors {
        if let Some(field) = &error.field {
            view.show_field_error(field, &error.message);
        }
    }
    view.show_errors(errors.messages());
}
