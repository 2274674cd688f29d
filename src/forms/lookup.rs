//! The demo "my work" lookup form. It never reaches the network.

use tracing::info;

use crate::dom_ids::{LOOKUP_ERRORS, LOOKUP_FORM};
use crate::forms::{ErrorList, SubmitState, present_errors};
use crate::validation::{char_len, is_digits_only};
use crate::view::{FieldRegistry, FormView};

pub const STUDENT_ID_FIELD: &str = "studentId";
pub const STUDENT_ID_LEN: usize = 7;

pub fn validate_lookup(raw: &str) -> Result<String, ErrorList> {
    let mut errors = ErrorList::new();
    let student_id = raw.trim();

    if student_id.is_empty() {
        errors.push(STUDENT_ID_FIELD, "Student ID is required.");
    } else if !is_digits_only(student_id) {
        errors.push(STUDENT_ID_FIELD, "Student ID must contain digits only.");
    } else if char_len(student_id) != STUDENT_ID_LEN {
        errors.push(
            STUDENT_ID_FIELD,
            format!("Student ID must be exactly {} digits.", STUDENT_ID_LEN),
        );
    }

    errors.into_result(student_id.to_string())
}

pub fn confirmation_message(student_id: &str) -> String {
    format!(
        "Lookup request received for student ID {}. This is a demo, so no records are fetched.",
        student_id
    )
}

pub struct LookupForm {
    student_id: String,
    view: FormView,
    state: SubmitState,
}

impl Default for LookupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupForm {
    pub fn new() -> Self {
        Self {
            student_id: String::new(),
            view: FormView::new(
                LOOKUP_FORM,
                LOOKUP_ERRORS,
                FieldRegistry::new().with_row(STUDENT_ID_FIELD),
            ),
            state: SubmitState::Idle,
        }
    }

    pub fn set_student_id(&mut self, raw: &str) {
        self.student_id = raw.to_string();
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn submit(&mut self) -> SubmitState {
        self.view.clear_form_errors();
        self.view.ensure_error_box();
        self.state = SubmitState::Validating;

        match validate_lookup(&self.student_id) {
            Ok(student_id) => {
                info!("demo lookup for {}", student_id);
                self.view.show_success(confirmation_message(&student_id));
                self.state = SubmitState::Succeeded;
            }
            Err(errors) => {
                present_errors(&mut self.view, &errors);
                self.state = SubmitState::Invalid;
            }
        }

        self.state
    }
}
