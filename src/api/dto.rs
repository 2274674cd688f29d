use serde::{Deserialize, Serialize};

use crate::models::ProjectRecord;

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

/// Response of both submit endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<ServerFieldError>>,
}

impl SubmitResponse {
    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERROR
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.msg.clone())
            .filter(|msg| !msg.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerFieldError {
    #[serde(default)]
    pub msg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub status: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<ProjectRecord>>,
}

impl ProjectsResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}
