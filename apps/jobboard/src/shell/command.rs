//! Requests the shell hands to the event loop, and their results.

use tracing::debug;

use crate::api_client::{ApiError, JobBoardApi};
use crate::lifecycle::RequestId;
use crate::models::auth::{AuthResponse, SignInRequest, SignUpRequest};
use crate::models::job::{Job, NewJob};
use crate::views::auth_modal::AuthSubmission;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Authenticate(AuthSubmission),
    FetchJobs {
        id: RequestId,
    },
    PostJob {
        id: RequestId,
        token: String,
        job: NewJob,
    },
    LookupName {
        id: RequestId,
        token: Option<String>,
        email: String,
    },
}

#[derive(Debug, Clone)]
pub enum Completion {
    Authenticated {
        sign_up: bool,
        email: String,
        result: Result<AuthResponse, ApiError>,
    },
    JobsLoaded {
        id: RequestId,
        result: Result<Vec<Job>, ApiError>,
    },
    JobPosted {
        id: RequestId,
        result: Result<String, ApiError>,
    },
    NameLoaded {
        id: RequestId,
        result: Result<String, ApiError>,
    },
}

impl Command {
    /// Runs the request. Never fails: errors travel inside the completion.
    pub async fn execute(self, api: &dyn JobBoardApi) -> Completion {
        debug!("Executing {:?}", self.kind());
        match self {
            Command::Authenticate(submission) => {
                let sign_up = submission.is_sign_up();
                let email = submission.email().to_string();
                let result = match &submission {
                    AuthSubmission::SignUp {
                        name,
                        email,
                        password,
                        role,
                    } => {
                        api.sign_up(SignUpRequest {
                            emailid: email,
                            password,
                            role: *role,
                            name,
                        })
                        .await
                    }
                    AuthSubmission::SignIn { email, password } => {
                        api.sign_in(SignInRequest {
                            emailid: email,
                            password,
                        })
                        .await
                    }
                };
                Completion::Authenticated {
                    sign_up,
                    email,
                    result,
                }
            }
            Command::FetchJobs { id } => Completion::JobsLoaded {
                id,
                result: api.list_jobs().await,
            },
            Command::PostJob { id, token, job } => Completion::JobPosted {
                id,
                result: api.post_job(Some(&token), &job).await,
            },
            Command::LookupName { id, token, email } => Completion::NameLoaded {
                id,
                result: api.full_name(token.as_deref(), &email).await,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Command::Authenticate(AuthSubmission::SignUp { .. }) => "sign-up",
            Command::Authenticate(AuthSubmission::SignIn { .. }) => "sign-in",
            Command::FetchJobs { .. } => "fetch-jobs",
            Command::PostJob { .. } => "post-job",
            Command::LookupName { .. } => "lookup-name",
        }
    }
}
