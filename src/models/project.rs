use serde::{Deserialize, Serialize};

/// Body of `POST /api/project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubmission {
    pub team_name: String,
    pub team_size: String,
    pub rep_name: String,
    pub rep_id: String,
    pub rep_email: String,
    /// Newline-joined `member N: name — id` lines.
    pub other_members: String,
    pub course_code: String,
    pub category: String,
    pub project_type: String,
    pub project_name: String,
    pub project_desc: String,
    pub tools: String,
}

/// A submitted project as returned by `GET /api/projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub rep_name: Option<String>,
    #[serde(default)]
    pub other_members: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProjectRecord {
    pub fn display_id(&self) -> String {
        match &self.id {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
