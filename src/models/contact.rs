use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`. Every value is trimmed before it lands here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub mobile: String,
    pub dob: String,
    pub email: String,
    pub language: String,
    pub message: String,
}
