//! Element ids and classes shared with the page markup.

pub const CONTACT_FORM: &str = "contactForm";
pub const PROJECT_FORM: &str = "projectForm";
pub const LOOKUP_FORM: &str = "myWorkForm";

pub const PROJECTS_BODY: &str = "projectsBody";
pub const PROJECTS_STATUS: &str = "projectsStatus";

pub const CONTACT_ERRORS: &str = "contactErrors";
pub const PROJECT_ERRORS: &str = "projectErrors";
pub const LOOKUP_ERRORS: &str = "myWorkErrors";

pub const MEMBER_NAME_CLASS: &str = "member-name-input";
pub const MEMBER_ID_CLASS: &str = "member-id-input";

pub const ERROR_MARKER_CLASS: &str = "has-error";
pub const INLINE_ERROR_CLASS: &str = "field-error";
pub const BANNER_CLASS: &str = "form-errors";

pub fn member_name_id(index: u32) -> String {
    format!("memberName{}", index)
}

pub fn member_id_id(index: u32) -> String {
    format!("memberId{}", index)
}

pub fn member_row_id(index: u32) -> String {
    format!("member-row-{}", index)
}

/// Conventional `.form-row` wrapper id for a static field.
pub fn row_id(field: &str) -> String {
    format!("{}-row", field)
}
