use tracing::{debug, error, info, warn};

use crate::api::SiteApi;
use crate::dom_ids::{PROJECT_ERRORS, PROJECT_FORM, member_id_id, member_name_id};
use crate::forms::{ErrorList, SubmitOutcome, SubmitState, present_errors};
use crate::members::{MemberRows, TeamMemberEntry, parse_team_size, serialize_members};
use crate::models::ProjectSubmission;
use crate::validation::{
    has_min_chars, is_valid_course_code, is_valid_email, is_valid_student_id,
};
use crate::view::{Container, ContainerKind, FieldRegistry, FormView};

pub use crate::members::MAX_TEAM_SIZE;

pub const MIN_TEAM_SIZE: u32 = 1;

pub const DEFAULT_SUCCESS: &str = "Your project idea has been submitted successfully.";
pub const DEFAULT_REJECTION: &str = "The server could not accept your project.";
pub const NETWORK_FAILURE: &str =
    "Could not submit your project. Please check your connection and try again.";

const STATIC_FIELDS: [&str; 11] = [
    "teamName",
    "teamSize",
    "repName",
    "repId",
    "repEmail",
    "courseCode",
    "projectName",
    "category",
    "projectDesc",
    "tools",
    "projectType",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFields {
    pub team_name: String,
    pub team_size: String,
    pub rep_name: String,
    pub rep_id: String,
    pub rep_email: String,
    pub course_code: String,
    pub category: String,
    /// Checked radio value.
    pub project_type: Option<String>,
    pub project_name: String,
    pub project_desc: String,
    pub tools: String,
}

/// Result of running the project rules.
///
/// The member log is built from the fully filled rows even when other rules
/// fail, the same value that ends up in the hidden `otherMembers` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectValidation {
    pub member_log: String,
    pub result: Result<ProjectSubmission, ErrorList>,
}

pub fn validate_project(fields: &ProjectFields, members: &MemberRows) -> ProjectValidation {
    let mut errors = ErrorList::new();

    let team_name = fields.team_name.trim();
    if !has_min_chars(team_name, 3) {
        errors.push("teamName", "Team name must be at least 3 characters.");
    }

    let team_size = parse_team_size(&fields.team_size)
        .filter(|size| (MIN_TEAM_SIZE..=MAX_TEAM_SIZE).contains(size));
    if team_size.is_none() {
        errors.push(
            "teamSize",
            format!(
                "Team size must be a whole number between {} and {}.",
                MIN_TEAM_SIZE, MAX_TEAM_SIZE
            ),
        );
    }

    let mut entries = Vec::new();
    if let Some(size) = team_size {
        let expected = (size - 1) as usize;
        if members.len() != expected {
            errors.push_general(format!(
                "Team members do not match the team size: expected {} member entries but found {}. Please re-select the team size.",
                expected,
                members.len()
            ));
        } else {
            for (row, values) in members.inputs() {
                let name = values.name.trim();
                let student_id = values.student_id.trim();

                if name.is_empty() {
                    errors.push(
                        &member_name_id(row.index),
                        format!("Member {} name is required.", row.index),
                    );
                }
                if student_id.is_empty() {
                    errors.push(
                        &member_id_id(row.index),
                        format!("Member {} id is required.", row.index),
                    );
                }
                if !name.is_empty() && !student_id.is_empty() {
                    entries.push(TeamMemberEntry {
                        index: row.index,
                        name: name.to_string(),
                        student_id: student_id.to_string(),
                    });
                }
            }
        }
    }
    let member_log = serialize_members(&entries);

    let rep_name = fields.rep_name.trim();
    if !has_min_chars(rep_name, 3) {
        errors.push("repName", "Representative name must be at least 3 characters.");
    }

    let rep_id = fields.rep_id.trim();
    if !is_valid_student_id(rep_id) {
        errors.push("repId", "Representative ID must be exactly 7 digits.");
    }

    let rep_email = fields.rep_email.trim();
    if !is_valid_email(rep_email) {
        errors.push("repEmail", "Please enter a valid representative email.");
    }

    let course_code = fields.course_code.trim();
    if !is_valid_course_code(course_code) {
        errors.push(
            "courseCode",
            "Course code must be letters followed by digits, e.g. CPIT405.",
        );
    }

    let project_name = fields.project_name.trim();
    if !has_min_chars(project_name, 3) {
        errors.push("projectName", "Project title must be at least 3 characters.");
    }

    let category = fields.category.trim();
    if category.is_empty() {
        errors.push("category", "Please select a category.");
    }

    let project_type = fields
        .project_type
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if project_type.is_empty() {
        errors.push("projectType", "Please select a project type.");
    }

    let project_desc = fields.project_desc.trim();
    if !has_min_chars(project_desc, 10) {
        errors.push("projectDesc", "Description must be at least 10 characters.");
    }

    let result = errors.into_result(ProjectSubmission {
        team_name: team_name.to_string(),
        team_size: fields.team_size.trim().to_string(),
        rep_name: rep_name.to_string(),
        rep_id: rep_id.to_string(),
        rep_email: rep_email.to_string(),
        other_members: member_log.clone(),
        course_code: course_code.to_string(),
        category: category.to_string(),
        project_type: project_type.to_string(),
        project_name: project_name.to_string(),
        project_desc: project_desc.to_string(),
        tools: fields.tools.trim().to_string(),
    });

    ProjectValidation { member_log, result }
}

fn project_registry() -> FieldRegistry {
    STATIC_FIELDS
        .into_iter()
        .fold(FieldRegistry::new(), |registry, field| registry.with_row(field))
}

pub struct ProjectForm {
    fields: ProjectFields,
    members: MemberRows,
    view: FormView,
    state: SubmitState,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectForm {
    pub fn new() -> Self {
        Self {
            fields: ProjectFields::default(),
            members: MemberRows::new(),
            view: FormView::new(PROJECT_FORM, PROJECT_ERRORS, project_registry()),
            state: SubmitState::Idle,
        }
    }

    pub fn fields(&self) -> &ProjectFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ProjectFields {
        &mut self.fields
    }

    pub fn members(&self) -> &MemberRows {
        &self.members
    }

    /// Row values may be edited here; the row set itself only changes through
    /// [`set_team_size`](Self::set_team_size).
    pub fn members_mut(&mut self) -> &mut MemberRows {
        &mut self.members
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Team size change handler: regenerates the member rows from scratch.
    pub fn set_team_size(&mut self, raw: &str) {
        self.fields.team_size = raw.to_string();
        self.unregister_members();
        self.members.regenerate(raw);
        self.register_members();
        debug!("team size {:?} produced {} member rows", raw, self.members.len());
    }

    pub async fn submit(&mut self, api: &dyn SiteApi) -> SubmitState {
        self.view.clear_form_errors();
        self.view.ensure_error_box();
        self.state = SubmitState::Validating;

        let validation = validate_project(&self.fields, &self.members);
        self.members.set_serialized(validation.member_log);

        let submission = match validation.result {
            Ok(submission) => submission,
            Err(errors) => {
                info!("project form has {} validation errors", errors.len());
                present_errors(&mut self.view, &errors);
                self.state = SubmitState::Invalid;
                return self.state;
            }
        };

        self.state = SubmitState::Submitting;
        info!(
            "submitting project {:?} for team {:?}",
            submission.project_name, submission.team_name
        );

        let outcome = SubmitOutcome::from_response(api.submit_project(&submission).await);
        self.state = outcome.state();

        match outcome {
            SubmitOutcome::Succeeded { message } => {
                self.view
                    .show_success(message.unwrap_or_else(|| DEFAULT_SUCCESS.to_string()));
                self.reset();
            }
            SubmitOutcome::ServerRejected { message, errors } => {
                warn!("project submission rejected: {:?} {:?}", message, errors);
                self.view
                    .show_failure(message.unwrap_or_else(|| DEFAULT_REJECTION.to_string()));
            }
            SubmitOutcome::NetworkFailed(e) => {
                error!("project submission failed: {}", e);
                self.view.show_failure(NETWORK_FAILURE);
            }
        }

        self.state
    }

    fn reset(&mut self) {
        self.fields = ProjectFields::default();
        self.unregister_members();
        self.members.clear();
    }

    fn register_members(&mut self) {
        let registry = self.view.registry_mut();
        for row in self.members.rows() {
            let container = Container::new(ContainerKind::Row, row.row_id());
            registry.register(row.name_input.name.clone(), vec![container.clone()]);
            registry.register(row.id_input.name.clone(), vec![container]);
        }
    }

    fn unregister_members(&mut self) {
        let registry = self.view.registry_mut();
        for row in self.members.rows() {
            registry.unregister(&row.name_input.name);
            registry.unregister(&row.id_input.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields(team_size: &str) -> ProjectFields {
        ProjectFields {
            team_name: "Byte Builders".to_string(),
            team_size: team_size.to_string(),
            rep_name: "Sara Alharbi".to_string(),
            rep_id: "2310001".to_string(),
            rep_email: "sara@uni.edu.sa".to_string(),
            course_code: "CPIT405".to_string(),
            category: "ai".to_string(),
            project_type: Some("web".to_string()),
            project_name: "Study Buddy".to_string(),
            project_desc: "A planner that pairs students for revision.".to_string(),
            tools: String::new(),
        }
    }

    #[test]
    fn test_valid_single_member_team() {
        let validation = validate_project(&valid_fields("1"), &MemberRows::new());
        let submission = validation.result.unwrap();
        assert_eq!(submission.other_members, "");
        assert_eq!(submission.team_size, "1");
        assert_eq!(submission.tools, "");
    }

    #[test]
    fn test_partially_filled_member_rows() {
        let mut members = MemberRows::new();
        members.regenerate("4");
        members.set_name(1, "Sara");
        members.set_student_id(1, "2310123");
        members.set_name(3, "Omar");
        members.set_student_id(3, "2310456");

        let validation = validate_project(&valid_fields("4"), &members);
        let errors = validation.result.unwrap_err();

        assert_eq!(
            errors.messages(),
            vec!["Member 2 name is required.", "Member 2 id is required."]
        );
        assert_eq!(
            validation.member_log,
            "member 1: Sara — 2310123\nmember 3: Omar — 2310456"
        );
    }

    #[test]
    fn test_stale_member_rows_are_a_single_error() {
        let mut members = MemberRows::new();
        members.regenerate("3");

        let validation = validate_project(&valid_fields("5"), &members);
        let errors = validation.result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().next().unwrap().field.is_none());
        assert!(errors.messages()[0].contains("expected 4 member entries but found 2"));
        assert_eq!(validation.member_log, "");
    }

    #[test]
    fn test_team_size_out_of_range_skips_member_check() {
        let validation = validate_project(&valid_fields("6"), &MemberRows::new());
        let errors = validation.result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.for_field("teamSize").is_some());

        let validation = validate_project(&valid_fields("0"), &MemberRows::new());
        assert!(validation.result.unwrap_err().for_field("teamSize").is_some());
    }

    #[test]
    fn test_every_rule_reports() {
        let validation = validate_project(&ProjectFields::default(), &MemberRows::new());
        let errors = validation.result.unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field.clone()).collect();
        assert_eq!(
            fields,
            vec![
                "teamName",
                "teamSize",
                "repName",
                "repId",
                "repEmail",
                "courseCode",
                "projectName",
                "category",
                "projectType",
                "projectDesc"
            ]
        );
    }

    #[test]
    fn test_team_size_change_rebuilds_registry() {
        let mut form = ProjectForm::new();
        form.set_team_size("4");
        assert_eq!(form.members().len(), 3);
        assert!(form.view().registry().contains("memberName3"));

        form.set_team_size("2");
        assert_eq!(form.members().len(), 1);
        assert!(!form.view().registry().contains("memberName3"));
        assert_eq!(
            form.view().registry().resolve("memberId1").unwrap().element_id,
            "member-row-1"
        );

        form.set_team_size("1");
        assert!(form.members().is_empty());
        assert_eq!(form.members().serialized(), "");
        assert!(!form.view().registry().contains("memberName1"));
    }

    #[test]
    fn test_oversized_team_size_generates_no_rows() {
        let mut form = ProjectForm::new();
        form.set_team_size("3000000");
        assert!(form.members().is_empty());
        assert!(!form.view().registry().contains("memberName1"));

        let validation = validate_project(form.fields(), form.members());
        let errors = validation.result.unwrap_err();
        assert!(errors.for_field("teamSize").is_some());
    }
}
