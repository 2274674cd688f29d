use std::env;

use crate::error::SiteError;
use crate::validation::is_valid_date_ymd;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000";

/// Upper bound for the contact form's date of birth when the field itself
/// declares no `max`.
pub const FALLBACK_DOB_MAX: &str = "2025-11-03";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub api_base: String,
    pub dob_max: String,
}

impl SiteConfig {
    pub fn new_from_env() -> Result<Self, SiteError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; `new_from_env` passes the
    /// process environment.
    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, SiteError> {
        let api_base = var("SITE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let dob_max = match var("SITE_DOB_MAX") {
            Some(raw) => {
                let raw = raw.trim().to_string();
                if !is_valid_date_ymd(&raw) {
                    return Err(SiteError::Config(format!(
                        "SITE_DOB_MAX is not a valid YYYY-MM-DD date: {}",
                        raw
                    )));
                }
                raw
            }
            None => FALLBACK_DOB_MAX.to_string(),
        };

        Ok(Self { api_base, dob_max })
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            dob_max: FALLBACK_DOB_MAX.to_string(),
        }
    }
}
