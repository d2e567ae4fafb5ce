//! Scripted in-process `JobBoardApi` for driving the shell in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiError, JobBoardApi};
use crate::models::auth::{AuthResponse, SignInRequest, SignUpRequest};
use crate::models::job::{Job, NewJob};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SignUp { email: String, role: String, name: String },
    SignIn { email: String },
    ListJobs,
    PostJob { token: Option<String>, job: NewJob },
    FullName { email: String },
}

/// Each endpoint pops its next scripted result; an unscripted call fails
/// with a transport error.
#[derive(Default)]
pub struct FakeApi {
    pub auth: Mutex<VecDeque<Result<AuthResponse, ApiError>>>,
    pub jobs: Mutex<VecDeque<Result<Vec<Job>, ApiError>>>,
    pub posts: Mutex<VecDeque<Result<String, ApiError>>>,
    pub names: Mutex<VecDeque<Result<String, ApiError>>>,
    pub calls: Mutex<Vec<Call>>,
}

fn next<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>) -> Result<T, ApiError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".into())))
}

impl FakeApi {
    pub fn with_auth(self, result: Result<AuthResponse, ApiError>) -> Self {
        self.auth.lock().unwrap().push_back(result);
        self
    }

    pub fn with_jobs(self, result: Result<Vec<Job>, ApiError>) -> Self {
        self.jobs.lock().unwrap().push_back(result);
        self
    }

    pub fn with_post(self, result: Result<String, ApiError>) -> Self {
        self.posts.lock().unwrap().push_back(result);
        self
    }

    pub fn with_name(self, result: Result<String, ApiError>) -> Self {
        self.names.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl JobBoardApi for FakeApi {
    async fn sign_up(&self, request: SignUpRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.record(Call::SignUp {
            email: request.emailid.to_string(),
            role: request.role.to_string(),
            name: request.name.to_string(),
        });
        next(&self.auth)
    }

    async fn sign_in(&self, request: SignInRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.record(Call::SignIn {
            email: request.emailid.to_string(),
        });
        next(&self.auth)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.record(Call::ListJobs);
        next(&self.jobs)
    }

    async fn post_job(&self, token: Option<&str>, job: &NewJob) -> Result<String, ApiError> {
        self.record(Call::PostJob {
            token: token.map(str::to_string),
            job: job.clone(),
        });
        next(&self.posts)
    }

    async fn full_name(&self, _token: Option<&str>, email: &str) -> Result<String, ApiError> {
        self.record(Call::FullName {
            email: email.to_string(),
        });
        next(&self.names)
    }
}
