//! The read-only projects page: fetch once, render every record as a table row.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{error, info, warn};

use crate::api::SiteApi;
use crate::models::ProjectRecord;
use crate::view::escape_html;

pub const NO_MEMBERS: &str = "none";
pub const LOADING: &str = "Loading projects...";
pub const EMPTY: &str = "No projects have been submitted yet.";
pub const DEFAULT_NOT_OK: &str = "Could not load projects.";
pub const FETCH_FAILED: &str = "Failed to load projects. Please try again later.";

static MEMBER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*member\s*[0-9]+\s*:\s*").expect("member label pattern"));

const MAJORS: [(&str, &str); 7] = [
    ("cs", "computer science"),
    ("is", "information systems"),
    ("it", "information technology"),
    ("ai", "artificial intelligence"),
    ("cyber", "cybersecurity"),
    ("ds", "data science"),
    ("se", "software engineering"),
];

/// Renders the serialized member log as badges, one per line.
pub fn format_members(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return NO_MEMBERS.to_string();
    };

    let badges: Vec<String> = raw
        .lines()
        .map(|line| MEMBER_LABEL.replace(line, "").trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| format!(r#"<span class="member-badge">{}</span>"#, escape_html(&fragment)))
        .collect();

    if badges.is_empty() {
        NO_MEMBERS.to_string()
    } else {
        badges.join(" ")
    }
}

/// Display label for a category code. Unknown codes are shown as they are.
pub fn format_major(code: Option<&str>) -> String {
    let Some(code) = code else {
        return String::new();
    };

    MAJORS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// One `<tr>` of the projects table. `members` is already markup; every other
/// cell is plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub id: String,
    pub team_name: String,
    pub rep_name: String,
    pub members: String,
    pub course_code: String,
    pub major: String,
    pub project_type: String,
    pub project_name: String,
    pub description: String,
}

impl From<&ProjectRecord> for ProjectRow {
    fn from(record: &ProjectRecord) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            id: record.display_id(),
            team_name: text(&record.team_name),
            rep_name: text(&record.rep_name),
            members: format_members(record.other_members.as_deref()),
            course_code: text(&record.course_code),
            major: format_major(record.category.as_deref()),
            project_type: text(&record.project_type),
            project_name: text(&record.project_name),
            description: text(&record.description),
        }
    }
}

impl ProjectRow {
    pub fn to_html(&self) -> String {
        let cell = |value: &str| format!("<td>{}</td>", escape_html(value));
        format!(
            "<tr>{}{}{}<td>{}</td>{}{}{}{}{}</tr>",
            cell(&self.id),
            cell(&self.team_name),
            cell(&self.rep_name),
            self.members,
            cell(&self.course_code),
            cell(&self.major),
            cell(&self.project_type),
            cell(&self.project_name),
            cell(&self.description),
        )
    }
}

/// State behind `#projectsStatus` and `#projectsBody`.
#[derive(Debug, Clone, Default)]
pub struct ProjectsList {
    status: String,
    body: Option<Vec<ProjectRow>>,
}

impl ProjectsList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// `None` until a successful fetch has replaced the table body.
    pub fn rows(&self) -> Option<&[ProjectRow]> {
        self.body.as_deref()
    }

    pub fn body_html(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|rows| rows.iter().map(ProjectRow::to_html).collect())
    }

    pub async fn load(&mut self, api: &dyn SiteApi) {
        self.status = LOADING.to_string();

        let response = match api.fetch_projects().await {
            Ok(response) => response,
            Err(e) => {
                error!("failed to fetch projects: {}", e);
                self.status = FETCH_FAILED.to_string();
                return;
            }
        };

        if !response.is_ok() {
            warn!("projects endpoint returned status {:?}", response.status);
            self.status = response
                .msg
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_NOT_OK.to_string());
            return;
        }

        let records = response.data.unwrap_or_default();
        if records.is_empty() {
            self.status = EMPTY.to_string();
            return;
        }

        info!("rendering {} projects", records.len());
        self.status = count_summary(records.len());
        self.body = Some(records.iter().map(ProjectRow::from).collect());
    }
}

fn count_summary(count: usize) -> String {
    if count == 1 {
        "Showing 1 project.".to_string()
    } else {
        format!("Showing {} projects.", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_members_strips_labels() {
        let html = format_members(Some("member 1: Sara — 2310123\nmember 2: Omar — 2310456"));
        assert_eq!(
            html,
            r#"<span class="member-badge">Sara — 2310123</span> <span class="member-badge">Omar — 2310456</span>"#
        );
    }

    #[test]
    fn test_format_members_label_is_case_insensitive() {
        assert_eq!(
            format_members(Some("MEMBER 3:Lina — 2310999")),
            r#"<span class="member-badge">Lina — 2310999</span>"#
        );
        assert_eq!(
            format_members(Some("Lina")),
            r#"<span class="member-badge">Lina</span>"#
        );
    }

    #[test]
    fn test_format_members_placeholder() {
        assert_eq!(format_members(None), "none");
        assert_eq!(format_members(Some("")), "none");
        assert_eq!(format_members(Some("  \n ")), "none");
    }

    #[test]
    fn test_format_members_escapes_markup() {
        assert_eq!(
            format_members(Some("member 1: <b>x</b>")),
            r#"<span class="member-badge">&lt;b&gt;x&lt;/b&gt;</span>"#
        );
    }

    #[test]
    fn test_format_major() {
        assert_eq!(format_major(Some("ai")), "artificial intelligence");
        assert_eq!(format_major(Some("cs")), "computer science");
        assert_eq!(format_major(Some("unknown")), "unknown");
        assert_eq!(format_major(None), "");
    }

    #[test]
    fn test_row_projection() {
        let record = ProjectRecord {
            id: serde_json::json!(7),
            team_name: Some("Byte & Co".to_string()),
            other_members: Some("member 1: Sara — 2310123".to_string()),
            category: Some("se".to_string()),
            ..Default::default()
        };

        let row = ProjectRow::from(&record);
        assert_eq!(row.id, "7");
        assert_eq!(row.major, "software engineering");

        let html = row.to_html();
        assert!(html.starts_with("<tr><td>7</td><td>Byte &amp; Co</td>"));
        assert!(html.contains(r#"<td><span class="member-badge">Sara — 2310123</span></td>"#));
    }

    #[test]
    fn test_count_summary() {
        assert_eq!(count_summary(1), "Showing 1 project.");
        assert_eq!(count_summary(3), "Showing 3 projects.");
    }
}
