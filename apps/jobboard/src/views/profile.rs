use tracing::{debug, info, warn};

use super::PageBody;
use crate::api_client::ApiError;
use crate::errors::ClientError;
use crate::lifecycle::{Lifecycle, RequestId};
use crate::notification::Notifier;

pub const LOOKUP_ERROR: &str = "Failed to load profile.";

/// Profile page: shows the signed-in email and the full name looked up from it.
#[derive(Debug, Default)]
pub struct ProfileView {
    email: Option<String>,
    name: Lifecycle<String>,
}

impl ProfileView {
    /// Starts a name lookup when an email is on record.
    pub fn enter(&mut self, email: Option<&str>) -> Option<RequestId> {
        self.email = email.map(str::to_string);
        match email {
            Some(email) => {
                let id = self.name.begin();
                info!("Looking up full name for '{email}' ({id})");
                Some(id)
            }
            None => {
                self.name.reset();
                None
            }
        }
    }

    pub fn leave(&mut self) {
        if self.name.is_pending() {
            self.name.reset();
        }
    }

    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<String, ApiError>,
        notifier: &mut Notifier,
    ) -> bool {
        let applied = match result {
            Ok(name) => self.name.settle(id, Some(name)),
            Err(e) => {
                let applied = self.name.settle(id, None);
                if applied {
                    warn!("Full name lookup failed: {e}");
                    notifier.error(ClientError::from(e).user_message(LOOKUP_ERROR));
                }
                applied
            }
        };
        if !applied {
            debug!("Discarding stale profile response {id}");
        }
        applied
    }

    pub fn render(&self) -> PageBody {
        PageBody::Profile {
            email: self.email.clone(),
            name: self.name.ready().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_email_issues_no_lookup() {
        let mut view = ProfileView::default();
        assert!(view.enter(None).is_none());
        assert_eq!(
            view.render(),
            PageBody::Profile {
                email: None,
                name: None
            }
        );
    }

    #[test]
    fn test_lookup_success_fills_name() {
        let mut view = ProfileView::default();
        let mut notifier = Notifier::default();
        let id = view.enter(Some("ada@x.io")).unwrap();
        assert!(view.complete(id, Ok("Ada Lovelace".into()), &mut notifier));

        assert_eq!(
            view.render(),
            PageBody::Profile {
                email: Some("ada@x.io".into()),
                name: Some("Ada Lovelace".into())
            }
        );
    }

    #[test]
    fn test_lookup_failure_keeps_placeholder_and_notifies() {
        let mut view = ProfileView::default();
        let mut notifier = Notifier::default();
        let id = view.enter(Some("ada@x.io")).unwrap();
        view.complete(
            id,
            Err(ApiError::Status {
                status: 500,
                message: None,
            }),
            &mut notifier,
        );

        assert!(matches!(view.render(), PageBody::Profile { name: None, .. }));
        assert_eq!(notifier.last().unwrap().text, LOOKUP_ERROR);
    }
}
