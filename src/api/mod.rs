pub mod dto;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::models::{ContactSubmission, ProjectSubmission};

pub use dto::{ProjectsResponse, ServerFieldError, SubmitResponse};

pub const CONTACT_PATH: &str = "/api/contact";
pub const PROJECT_PATH: &str = "/api/project";
pub const PROJECTS_PATH: &str = "/api/projects";

/// The three backend calls the site makes.
///
/// `Err` always means the exchange itself failed (connection, undecodable
/// body). A response whose `status` says `error` is still `Ok`.
#[async_trait]
pub trait SiteApi: Send + Sync {
    async fn submit_contact(&self, submission: &ContactSubmission) -> SiteResult<SubmitResponse>;
    async fn submit_project(&self, submission: &ProjectSubmission) -> SiteResult<SubmitResponse>;
    async fn fetch_projects(&self) -> SiteResult<ProjectsResponse>;
}

pub struct HttpSiteApi {
    client: Client,
    base_url: String,
}

impl HttpSiteApi {
    pub fn new(config: &SiteConfig) -> SiteResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> SiteResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!("POST {}", path);
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    async fn get_json<R>(&self, path: &str) -> SiteResult<R>
    where
        R: DeserializeOwned,
    {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        decode(response).await
    }
}

/// The backend reports failures in the JSON body, so the body is decoded
/// whatever the HTTP status. Only an undecodable body on a failing status
/// becomes [`SiteError::Status`].
async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> SiteResult<R> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<R>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(SiteError::Status(status)),
        Err(e) => Err(SiteError::Decode(e)),
    }
}

#[async_trait]
impl SiteApi for HttpSiteApi {
    async fn submit_contact(&self, submission: &ContactSubmission) -> SiteResult<SubmitResponse> {
        self.post_json(CONTACT_PATH, submission).await
    }

    async fn submit_project(&self, submission: &ProjectSubmission) -> SiteResult<SubmitResponse> {
        self.post_json(PROJECT_PATH, submission).await
    }

    async fn fetch_projects(&self) -> SiteResult<ProjectsResponse> {
        self.get_json(PROJECTS_PATH).await
    }
}
