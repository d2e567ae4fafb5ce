//! API client: the single point of entry for all backend calls.
//!
//! Views and the shell never build HTTP requests themselves; they go through
//! the `JobBoardApi` trait, implemented here by `ApiClient` over reqwest.
//! The base URL is fixed at construction.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::auth::{
    AuthResponse, ErrorBody, FullNameRequest, SignInRequest, SignUpRequest,
};
use crate::models::job::{Job, NewJob};

#[cfg(test)]
pub mod fake;

pub const SIGNUP_PATH: &str = "/user/signup";
pub const SIGNIN_PATH: &str = "/user/signin";
pub const JOBS_PATH: &str = "/jobs";
pub const POST_JOB_PATH: &str = "/post-job";
pub const FULL_NAME_PATH: &str = "/user/getfullname";

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was obtained (connection refused, DNS, reset...).
    #[error("Network error: {0}")]
    Transport(String),

    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// Error text supplied by the backend, if it sent any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(m), ..
            } => Some(m.as_str()),
            _ => None,
        }
    }
}

/// Backend operations consumed by the client.
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn sign_up(&self, request: SignUpRequest<'_>) -> Result<AuthResponse, ApiError>;

    async fn sign_in(&self, request: SignInRequest<'_>) -> Result<AuthResponse, ApiError>;

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;

    /// Returns the backend's plain-text confirmation.
    async fn post_job(&self, token: Option<&str>, job: &NewJob) -> Result<String, ApiError>;

    async fn full_name(&self, token: Option<&str>, email: &str) -> Result<String, ApiError>;
}

/// reqwest-backed `JobBoardApi`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B, token: Option<&str>) -> RequestBuilder {
        let request = self.client.post(self.url(path)).json(body);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and returns the status with the raw body text.
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("Backend unreachable: {e}");
            ApiError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Backend responded {} ({} bytes)", status, body.len());
        Ok((status, body))
    }

    async fn auth<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<AuthResponse, ApiError> {
        let (status, body) = self.send(self.post(path, body, None)).await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: json_error_field(&body),
            });
        }
        decode_json(&body)
    }
}

#[async_trait]
impl JobBoardApi for ApiClient {
    async fn sign_up(&self, request: SignUpRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.auth(SIGNUP_PATH, &request).await
    }

    async fn sign_in(&self, request: SignInRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.auth(SIGNIN_PATH, &request).await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let (status, body) = self.send(self.client.get(self.url(JOBS_PATH))).await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: None,
            });
        }
        decode_json(&body)
    }

    async fn post_job(&self, token: Option<&str>, job: &NewJob) -> Result<String, ApiError> {
        let (status, body) = self.send(self.post(POST_JOB_PATH, job, token)).await?;
        plain_text(status, body)
    }

    async fn full_name(&self, token: Option<&str>, email: &str) -> Result<String, ApiError> {
        let request = FullNameRequest { csrid: email };
        let (status, body) = self.send(self.post(FULL_NAME_PATH, &request, token)).await?;
        plain_text(status, body)
    }
}

fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extracts `{"error": "..."}` from a failure body.
fn json_error_field(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Plain-text endpoints report failures in the body too, either as raw text
/// or as an `error` JSON field.
fn plain_text(status: StatusCode, body: String) -> Result<String, ApiError> {
    if status.is_success() {
        return Ok(body.trim().to_string());
    }
    let message = json_error_field(&body).or_else(|| {
        let text = body.trim();
        (!text.is_empty()).then(|| text.to_string())
    });
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
