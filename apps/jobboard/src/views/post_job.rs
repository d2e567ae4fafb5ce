use tracing::{debug, info, warn};

use super::PageBody;
use crate::api_client::ApiError;
use crate::errors::ClientError;
use crate::lifecycle::{Lifecycle, RequestId};
use crate::models::job::NewJob;
use crate::models::session::Session;
use crate::notification::Notifier;

pub const POSTED: &str = "Job posted successfully!";
pub const POST_FAILED: &str = "Failed to post job.";

/// Recruiter-only form for publishing a listing.
#[derive(Debug, Default)]
pub struct PostJobView {
    draft: NewJob,
    submission: Lifecycle<()>,
}

impl PostJobView {
    /// Validates and starts a submission. Nothing is sent unless the session
    /// belongs to a recruiter and all four fields are filled.
    pub fn submit(
        &mut self,
        session: Option<&Session>,
        job: NewJob,
    ) -> Result<(RequestId, NewJob), ClientError> {
        if !session.is_some_and(Session::is_recruiter) {
            return Err(ClientError::Forbidden);
        }
        let missing = job.missing_fields();
        self.draft = job;
        if !missing.is_empty() {
            return Err(ClientError::Validation(format!(
                "Please fill in: {}",
                missing.join(", ")
            )));
        }
        if self.submission.is_pending() {
            return Err(ClientError::Validation(
                "This job is already being posted.".to_string(),
            ));
        }
        let id = self.submission.begin();
        info!("Posting job '{}' ({id})", self.draft.title);
        Ok((id, self.draft.clone()))
    }

    /// Applies the backend's answer. Returns true when the job was posted.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<String, ApiError>,
        notifier: &mut Notifier,
    ) -> bool {
        match result {
            Ok(confirmation) => {
                if !self.submission.settle(id, Some(())) {
                    debug!("Ignoring duplicate post-job response {id}");
                    return false;
                }
                debug!("Backend confirmation: {confirmation}");
                self.draft = NewJob::default();
                notifier.success(POSTED);
                true
            }
            Err(e) => {
                if self.submission.settle(id, None) {
                    warn!("Posting job failed: {e}");
                    notifier.error(ClientError::from(e).user_message(POST_FAILED));
                }
                false
            }
        }
    }

    pub fn render(&self) -> PageBody {
        PageBody::PostJobForm {
            draft: self.draft.clone(),
            submitting: self.submission.is_pending(),
        }
    }
}
