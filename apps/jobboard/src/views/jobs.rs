use tracing::{debug, info, warn};

use super::{JobCard, PageBody};
use crate::api_client::ApiError;
use crate::lifecycle::{Lifecycle, RequestId};
use crate::models::job::Job;
use crate::notification::Notifier;

pub const LOAD_ERROR: &str = "Error loading jobs.";

/// Listing page. Fetches once per entry; nothing is cached between visits.
#[derive(Debug, Default)]
pub struct JobsView {
    jobs: Lifecycle<Vec<Job>>,
}

impl JobsView {
    pub fn enter(&mut self) -> RequestId {
        let id = self.jobs.begin();
        info!("Fetching job listings ({id})");
        id
    }

    /// Abandons an in-flight fetch so its late result is ignored.
    pub fn leave(&mut self) {
        if self.jobs.is_pending() {
            self.jobs.reset();
        }
    }

    /// Applies a listing result. Returns false for a stale response.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<Vec<Job>, ApiError>,
        notifier: &mut Notifier,
    ) -> bool {
        let applied = match result {
            Ok(jobs) => {
                let count = jobs.len();
                let applied = self.jobs.settle(id, Some(jobs));
                if applied {
                    info!("Loaded {count} jobs");
                }
                applied
            }
            Err(e) => {
                let applied = self.jobs.settle(id, None);
                if applied {
                    warn!("Job listing failed: {e}");
                    notifier.error(LOAD_ERROR);
                }
                applied
            }
        };
        if !applied {
            debug!("Discarding stale job listing response {id}");
        }
        applied
    }

    pub fn render(&self) -> PageBody {
        match &self.jobs {
            Lifecycle::Idle | Lifecycle::Pending(_) => PageBody::Loading("Loading jobs..."),
            Lifecycle::Ready(jobs) if !jobs.is_empty() => {
                PageBody::Jobs(jobs.iter().map(JobCard::from).collect())
            }
            Lifecycle::Ready(_) | Lifecycle::Failed => PageBody::NoJobs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobId;
    use crate::notification::Severity;

    fn listing() -> Vec<Job> {
        vec![Job {
            id: JobId::Number(1),
            title: "Rust Engineer".into(),
            company: "Ferris Co".into(),
            location: "Remote".into(),
            description: "Systems work".into(),
        }]
    }

    #[test]
    fn test_loading_until_resolved() {
        let mut view = JobsView::default();
        view.enter();
        assert_eq!(view.render(), PageBody::Loading("Loading jobs..."));
    }

    #[test]
    fn test_renders_listing() {
        let mut view = JobsView::default();
        let mut notifier = Notifier::default();
        let id = view.enter();
        assert!(view.complete(id, Ok(listing()), &mut notifier));

        match view.render() {
            PageBody::Jobs(cards) => assert_eq!(cards[0].title, "Rust Engineer"),
            other => panic!("expected jobs, got {other:?}"),
        }
        assert!(notifier.last().is_none());
    }

    #[test]
    fn test_empty_listing_is_not_an_error() {
        let mut view = JobsView::default();
        let mut notifier = Notifier::default();
        let id = view.enter();
        view.complete(id, Ok(vec![]), &mut notifier);

        assert_eq!(view.render(), PageBody::NoJobs);
        assert!(notifier.last().is_none());
    }

    #[test]
    fn test_failure_renders_empty_and_notifies() {
        let mut view = JobsView::default();
        let mut notifier = Notifier::default();
        let id = view.enter();
        view.complete(id, Err(ApiError::Transport("refused".into())), &mut notifier);

        assert_eq!(view.render(), PageBody::NoJobs);
        let n = notifier.last().unwrap();
        assert_eq!(n.text, LOAD_ERROR);
        assert_eq!(n.severity, Severity::Error);
    }

    #[test]
    fn test_response_after_leave_is_ignored() {
        let mut view = JobsView::default();
        let mut notifier = Notifier::default();
        let id = view.enter();
        view.leave();

        assert!(!view.complete(id, Err(ApiError::Transport("late".into())), &mut notifier));
        assert!(notifier.last().is_none());
    }

    #[test]
    fn test_reentry_supersedes_previous_fetch() {
        let mut view = JobsView::default();
        let mut notifier = Notifier::default();
        let first = view.enter();
        let second = view.enter();

        assert!(!view.complete(first, Ok(listing()), &mut notifier));
        assert_eq!(view.render(), PageBody::Loading("Loading jobs..."));
        assert!(view.complete(second, Ok(vec![]), &mut notifier));
        assert_eq!(view.render(), PageBody::NoJobs);
    }
}
