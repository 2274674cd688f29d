use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use crate::api::SiteApi;
use crate::config::SiteConfig;
use crate::dom_ids::{CONTACT_ERRORS, CONTACT_FORM};
use crate::forms::{ErrorList, SubmitOutcome, SubmitState, present_errors};
use crate::models::ContactSubmission;
use crate::validation::{
    char_len, is_valid_email, is_valid_mobile, is_valid_name, parse_date_ymd,
};
use crate::view::{FieldRegistry, FormView};

pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

pub const DEFAULT_SUCCESS: &str = "Thank you! Your message has been sent.";
pub const NETWORK_FAILURE: &str = "Could not send your message. Please try again later.";

const GENDER_FIELDSET: &str = "genderFieldset";

/// Raw values of the contact form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub mobile: String,
    pub dob: String,
    pub email: String,
    /// Selected option value; empty means nothing chosen.
    pub language: String,
    pub message: String,
}

/// Inputs to the contact rules that do not come from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRules {
    /// `max` attribute declared on the date-of-birth input, if any.
    pub declared_dob_max: Option<String>,
    pub fallback_dob_max: String,
    pub today: NaiveDate,
}

impl ContactRules {
    /// The declared maximum when it parses, the fallback otherwise.
    pub fn dob_max(&self) -> Option<NaiveDate> {
        self.declared_dob_max
            .as_deref()
            .and_then(|raw| parse_date_ymd(raw.trim()))
            .or_else(|| parse_date_ymd(&self.fallback_dob_max))
    }
}

/// Runs every contact rule and returns the trimmed payload when all pass.
pub fn validate_contact(
    fields: &ContactFields,
    rules: &ContactRules,
) -> Result<ContactSubmission, ErrorList> {
    let mut errors = ErrorList::new();

    let first_name = fields.first_name.trim();
    if !is_valid_name(first_name) {
        errors.push("firstName", "First name must be 2-30 English letters only.");
    }

    let last_name = fields.last_name.trim();
    if !is_valid_name(last_name) {
        errors.push("lastName", "Last name must be 2-30 English letters only.");
    }

    let gender = fields.gender.as_deref().map(str::trim).unwrap_or_default();
    if gender.is_empty() {
        errors.push("gender", "Please select your gender.");
    }

    let mobile = fields.mobile.trim();
    if !is_valid_mobile(mobile) {
        errors.push("mobile", "Mobile number must look like +9665XXXXXXXX or 05XXXXXXXX.");
    }

    let dob = fields.dob.trim();
    if dob.is_empty() {
        errors.push("dob", "Date of birth is required.");
    } else {
        match parse_date_ymd(dob) {
            None => errors.push("dob", "Date of birth must be a real date in YYYY-MM-DD format."),
            Some(date) if date > rules.today => {
                errors.push("dob", "Date of birth cannot be in the future.")
            }
            Some(date) => {
                if let Some(max) = rules.dob_max().filter(|max| date > *max) {
                    errors.push(
                        "dob",
                        format!("Date of birth must be on or before {}.", max.format("%Y-%m-%d")),
                    );
                }
            }
        }
    }

    let email = fields.email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required.");
    } else if !is_valid_email(email) {
        errors.push("email", "Please enter a valid email address.");
    }

    let language = fields.language.trim();
    if language.is_empty() {
        errors.push("language", "Please choose a preferred language.");
    }

    let message = fields.message.trim();
    let length = char_len(message);
    if !(MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&length) {
        errors.push(
            "message",
            format!(
                "Message must be between {} and {} characters.",
                MESSAGE_MIN_CHARS, MESSAGE_MAX_CHARS
            ),
        );
    }

    errors.into_result(ContactSubmission {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: gender.to_string(),
        mobile: mobile.to_string(),
        dob: dob.to_string(),
        email: email.to_string(),
        language: language.to_string(),
        message: message.to_string(),
    })
}

fn contact_registry() -> FieldRegistry {
    ["firstName", "lastName", "mobile", "dob", "email", "language", "message"]
        .into_iter()
        .fold(FieldRegistry::new(), |registry, field| registry.with_row(field))
        .with_fieldset("gender", GENDER_FIELDSET)
}

pub struct ContactForm {
    fields: ContactFields,
    view: FormView,
    state: SubmitState,
    declared_dob_max: Option<String>,
    fallback_dob_max: String,
}

impl ContactForm {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            fields: ContactFields::default(),
            view: FormView::new(CONTACT_FORM, CONTACT_ERRORS, contact_registry()),
            state: SubmitState::Idle,
            declared_dob_max: None,
            fallback_dob_max: config.dob_max.clone(),
        }
    }

    pub fn with_declared_dob_max(mut self, max: impl Into<String>) -> Self {
        self.declared_dob_max = Some(max.into());
        self
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ContactFields {
        &mut self.fields
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut FormView {
        &mut self.view
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub async fn submit(&mut self, api: &dyn SiteApi) -> SubmitState {
        self.submit_on(api, Local::now().date_naive()).await
    }

    /// Same as [`submit`](Self::submit) with an explicit "today".
    pub async fn submit_on(&mut self, api: &dyn SiteApi, today: NaiveDate) -> SubmitState {
        self.view.clear_form_errors();
        self.view.ensure_error_box();
        self.state = SubmitState::Validating;

        let rules = ContactRules {
            declared_dob_max: self.declared_dob_max.clone(),
            fallback_dob_max: self.fallback_dob_max.clone(),
            today,
        };

        let submission = match validate_contact(&self.fields, &rules) {
            Ok(submission) => submission,
            Err(errors) => {
                info!("contact form has {} validation errors", errors.len());
                present_errors(&mut self.view, &errors);
                self.state = SubmitState::Invalid;
                return self.state;
            }
        };

        self.state = SubmitState::Submitting;
        info!("submitting contact form for {}", submission.email);

        let outcome = SubmitOutcome::from_response(api.submit_contact(&submission).await);
        self.state = outcome.state();

        match outcome {
            SubmitOutcome::Succeeded { message } => {
                self.view
                    .show_success(message.unwrap_or_else(|| DEFAULT_SUCCESS.to_string()));
                self.fields = ContactFields::default();
            }
            SubmitOutcome::ServerRejected { message, errors } => {
                warn!("contact submission rejected: {:?}", errors);
                self.view.alert(server_rejection_text(message, &errors));
            }
            SubmitOutcome::NetworkFailed(e) => {
                error!("contact submission failed: {}", e);
                self.view.alert(NETWORK_FAILURE);
            }
        }

        self.state
    }
}

fn server_rejection_text(message: Option<String>, errors: &[String]) -> String {
    if errors.is_empty() {
        return message.unwrap_or_else(|| "The server rejected the submission.".to_string());
    }

    let mut lines = vec!["Please correct the following:".to_string()];
    lines.extend(errors.iter().map(|e| format!("- {}", e)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ContactRules {
        ContactRules {
            declared_dob_max: None,
            fallback_dob_max: "2025-11-03".to_string(),
            today: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
    }

    fn valid_fields() -> ContactFields {
        ContactFields {
            first_name: " Sara ".to_string(),
            last_name: "Alharbi".to_string(),
            gender: Some("female".to_string()),
            mobile: "0512345678".to_string(),
            dob: "2001-05-20".to_string(),
            email: "sara@example.com".to_string(),
            language: "en".to_string(),
            message: "Hello, I have a question.".to_string(),
        }
    }

    #[test]
    fn test_valid_fields_produce_trimmed_submission() {
        let submission = validate_contact(&valid_fields(), &rules()).unwrap();
        assert_eq!(submission.first_name, "Sara");
        assert_eq!(submission.dob, "2001-05-20");
    }

    #[test]
    fn test_all_rules_are_collected() {
        let errors = validate_contact(&ContactFields::default(), &rules()).unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field.clone()).collect();
        assert_eq!(
            fields,
            vec![
                "firstName", "lastName", "gender", "mobile", "dob", "email", "language",
                "message"
            ]
        );
        assert_eq!(
            errors.for_field("dob").unwrap().message,
            "Date of birth is required."
        );
    }

    #[test]
    fn test_dob_after_fallback_max_is_rejected() {
        let mut fields = valid_fields();
        fields.dob = "2025-12-01".to_string();
        let errors = validate_contact(&fields, &rules()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field("dob").unwrap().message,
            "Date of birth must be on or before 2025-11-03."
        );
    }

    #[test]
    fn test_declared_max_overrides_fallback() {
        let mut fields = valid_fields();
        fields.dob = "2010-01-01".to_string();
        let mut r = rules();
        r.declared_dob_max = Some("2008-01-01".to_string());
        assert!(validate_contact(&fields, &r).is_err());

        fields.dob = "2025-12-01".to_string();
        r.declared_dob_max = Some("2025-12-31".to_string());
        assert!(validate_contact(&fields, &r).is_ok());
    }

    #[test]
    fn test_dob_in_future_and_impossible_date() {
        let mut fields = valid_fields();
        let mut r = rules();
        r.declared_dob_max = Some("2030-12-31".to_string());

        fields.dob = "2027-03-01".to_string();
        let errors = validate_contact(&fields, &r).unwrap_err();
        assert_eq!(
            errors.for_field("dob").unwrap().message,
            "Date of birth cannot be in the future."
        );

        fields.dob = "2001-02-30".to_string();
        let errors = validate_contact(&fields, &r).unwrap_err();
        assert_eq!(
            errors.for_field("dob").unwrap().message,
            "Date of birth must be a real date in YYYY-MM-DD format."
        );
    }

    #[test]
    fn test_message_length_bounds() {
        let mut fields = valid_fields();

        fields.message = "a".repeat(9);
        assert!(validate_contact(&fields, &rules()).is_err());

        fields.message = "a".repeat(10);
        assert!(validate_contact(&fields, &rules()).is_ok());

        fields.message = "a".repeat(1000);
        assert!(validate_contact(&fields, &rules()).is_ok());

        fields.message = "a".repeat(1001);
        assert!(validate_contact(&fields, &rules()).is_err());
    }

    #[test]
    fn test_email_required_and_pattern_messages_differ() {
        let mut fields = valid_fields();
        fields.email = "  ".to_string();
        let errors = validate_contact(&fields, &rules()).unwrap_err();
        assert_eq!(errors.for_field("email").unwrap().message, "Email is required.");

        fields.email = "sara@".to_string();
        let errors = validate_contact(&fields, &rules()).unwrap_err();
        assert_eq!(
            errors.for_field("email").unwrap().message,
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_server_rejection_text_lists_field_errors() {
        let text = server_rejection_text(
            Some("Validation failed".to_string()),
            &["Email already used".to_string(), "Mobile invalid".to_string()],
        );
        assert_eq!(
            text,
            "Please correct the following:\n- Email already used\n- Mobile invalid"
        );
        assert_eq!(
            server_rejection_text(Some("Nope".to_string()), &[]),
            "Nope"
        );
    }

    #[test]
    fn test_gender_error_marks_fieldset() {
        let mut form = ContactForm::new(&SiteConfig::default());
        let errors = validate_contact(&ContactFields::default(), &rules()).unwrap_err();
        present_errors(form.view_mut(), &errors);

        assert!(form.view().has_error("genderFieldset"));
        assert!(form.view().has_error("firstName-row"));
        assert_eq!(form.view().banner().unwrap().items().len(), 8);
        assert_eq!(form.view().focused(), Some("contactErrors"));
    }
}
