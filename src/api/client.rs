//! HTTP client for the recruitment portal REST API

use std::path::Path;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use crate::config::{Config, Session};
use crate::models::{
    stages_from_rows, ApplicationRecord, ApplicationSummary, JobPosting, ProfileStep,
    RawStageRow, Stage, SubmittedApplication,
};
use super::error::{ApiError, Result};
use super::scope::guarded;

/// Multipart field name for uploaded application documents
pub const DOCUMENT_FIELD: &str = "dokumen";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct Registration<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    otp: Option<&'a str>,
}

/// Portal client bound to one view's cancellation token
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    cancel: CancellationToken,
}

impl PortalClient {
    pub fn new(config: &Config, session: Option<&Session>, cancel: CancellationToken) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Connection(format!("{} ({})", config.api_url, e)))?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: session.map(|s| s.token.clone()),
            cancel,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request with optional bearer auth
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{} {}", method, url);
        let mut req = self.http.request(method, url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn require_session(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }

    /// Send under the view's cancellation token, map status codes, decode JSON
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        guarded(&self.cancel, async {
            let resp = req.send().await.map_err(|e| self.transport_error(e))?;
            let resp = check_status(resp).await?;
            resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
        })
        .await
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            log::debug!("transport error: {}", e);
            ApiError::Connection(self.base_url.clone())
        }
    }

    async fn send_message(&self, req: RequestBuilder) -> Result<Option<String>> {
        let resp: MessageResponse = self.send(req).await?;
        Ok(resp.message)
    }

    // Authentication

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let req = self.request(Method::POST, "/auth/login")
            .json(&Credentials { email, password });
        self.send(req).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Option<String>> {
        let req = self.request(Method::POST, "/auth/register")
            .json(&Registration { name, email, password });
        self.send_message(req).await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<Option<String>> {
        let req = self.request(Method::POST, "/auth/verify-otp")
            .json(&OtpRequest { email, otp: Some(otp) });
        self.send_message(req).await
    }

    pub async fn resend_otp(&self, email: &str) -> Result<Option<String>> {
        let req = self.request(Method::POST, "/auth/resend-otp")
            .json(&OtpRequest { email, otp: None });
        self.send_message(req).await
    }

    // Job postings

    pub async fn jobs(&self) -> Result<Vec<JobPosting>> {
        self.send(self.request(Method::GET, "/lowongan")).await
    }

    pub async fn job(&self, id: &str) -> Result<JobPosting> {
        self.send(self.request(Method::GET, &format!("/lowongan/{}", id))).await
    }

    /// Submit an application with one or more documents
    pub async fn apply(&self, job_id: &str, documents: &[&Path]) -> Result<SubmittedApplication> {
        self.require_session()?;
        let mut form = reqwest::multipart::Form::new();
        for path in documents {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "dokumen".to_string());
            form = form.part(
                DOCUMENT_FIELD,
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );
        }
        let req = self.request(Method::POST, &format!("/lowongan/{}/lamar", job_id))
            .multipart(form);
        self.send(req).await
    }

    // Applications

    pub async fn applications(&self) -> Result<Vec<ApplicationSummary>> {
        self.require_session()?;
        self.send(self.request(Method::GET, "/aplikasi")).await
    }

    pub async fn application(&self, id: &str) -> Result<ApplicationRecord> {
        self.require_session()?;
        self.send(self.request(Method::GET, &format!("/aplikasi/{}", id))).await
    }

    /// Stages of an application's pipeline, in backend order
    pub async fn stages(&self, application_id: &str) -> Result<Vec<Stage>> {
        self.require_session()?;
        let rows: Vec<RawStageRow> = self
            .send(self.request(Method::GET, &format!("/aplikasi/{}/tahapan", application_id)))
            .await?;
        Ok(stages_from_rows(rows))
    }

    // Profile

    pub async fn profile(&self) -> Result<Map<String, Value>> {
        self.require_session()?;
        self.send(self.request(Method::GET, "/profil")).await
    }

    pub async fn update_profile(&self, step: ProfileStep, fields: &Map<String, Value>) -> Result<Option<String>> {
        self.require_session()?;
        let req = self.request(Method::PUT, &format!("/profil/{}", step.as_str()))
            .json(fields);
        self.send_message(req).await
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
        s if s.is_server_error() => {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Server(s.as_u16(), body))
        }
        s => {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Rejected(rejection_message(s, &body)))
        }
    }
}

/// Prefer the backend's `message` field over the raw body
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(MessageResponse { message: Some(message) }) = serde_json::from_str::<MessageResponse>(body) {
        return message;
    }
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}
