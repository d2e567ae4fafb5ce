//! The shell owns all client state (session, route, notification, views) and
//! turns user events and request completions into state changes plus
//! follow-up `Command`s. It never performs I/O itself.

pub mod command;
pub mod screen;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::errors::{ClientError, SESSION_NOT_CLEARED, SESSION_NOT_SAVED};
use crate::models::job::NewJob;
use crate::models::session::Role;
use crate::notification::Notifier;
use crate::router::{Route, Router};
use crate::session::storage::SessionStorage;
use crate::session::SessionStore;
use crate::views::auth_modal::{AuthForm, AuthModal};
use crate::views::home::HomeView;
use crate::views::jobs::JobsView;
use crate::views::post_job::{PostJobView, POST_FAILED};
use crate::views::profile::ProfileView;
use crate::views::PageBody;
use command::{Command, Completion};
use screen::{AuthAffordance, Screen};

pub const AUTH_FAILED: &str = "Authentication failed";
pub const NETWORK_ERROR: &str = "Network error.";
pub const SIGNED_UP: &str = "Sign up successful!";
pub const SIGNED_IN: &str = "Sign in successful!";

pub struct Shell {
    session: SessionStore,
    router: Router,
    notifier: Notifier,
    auth_modal: AuthModal,
    home: HomeView,
    jobs: JobsView,
    post_job: PostJobView,
    profile: ProfileView,
}

impl Shell {
    pub fn new(storage: Box<dyn SessionStorage>, start_fragment: &str) -> Self {
        Self {
            session: SessionStore::new(storage),
            router: Router::new(start_fragment),
            notifier: Notifier::default(),
            auth_modal: AuthModal::default(),
            home: HomeView,
            jobs: JobsView::default(),
            post_job: PostJobView::default(),
            profile: ProfileView::default(),
        }
    }

    /// Restores any persisted session, then enters the initial route.
    pub fn start(&mut self) -> Option<Command> {
        self.session.restore();
        let route = self.router.current();
        info!("Starting at {route}");
        self.enter(route)
    }

    /// Handles a URL fragment change.
    pub fn navigate(&mut self, fragment: &str) -> Option<Command> {
        let previous = self.router.current();
        let route = self.router.navigate(fragment);
        if route != previous {
            self.leave(previous);
        }
        info!("Navigated to {route}");
        self.enter(route)
    }

    fn leave(&mut self, route: Route) {
        match route {
            Route::Jobs => self.jobs.leave(),
            Route::Profile => self.profile.leave(),
            Route::Home | Route::PostJob => {}
        }
    }

    fn enter(&mut self, route: Route) -> Option<Command> {
        match route {
            Route::Home => None,
            Route::Jobs => Some(Command::FetchJobs {
                id: self.jobs.enter(),
            }),
            Route::PostJob => {
                if !self.session.is_recruiter() {
                    warn!("Post-job page requested without recruiter role");
                }
                None
            }
            Route::Profile => {
                let email = self.session.email().map(str::to_string);
                let token = self.session.token().map(str::to_string);
                let id = self.profile.enter(email.as_deref())?;
                Some(Command::LookupName {
                    id,
                    token,
                    email: email.unwrap_or_default(),
                })
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Auth
    // ────────────────────────────────────────────────────────────────────────

    pub fn open_auth_modal(&mut self) {
        self.auth_modal.open();
    }

    pub fn close_auth_modal(&mut self) {
        self.auth_modal.close();
    }

    pub fn toggle_auth_mode(&mut self) {
        self.auth_modal.toggle();
    }

    pub fn set_auth_mode(&mut self, signing_up: bool) {
        self.auth_modal.set_signing_up(signing_up);
    }

    pub fn set_signup_role(&mut self, role: Role) {
        self.auth_modal.set_role(role);
    }

    pub fn submit_auth(&mut self, form: AuthForm) -> Option<Command> {
        match self.auth_modal.submission(form) {
            Ok(submission) => {
                info!(
                    "Submitting {} for '{}'",
                    if submission.is_sign_up() { "sign-up" } else { "sign-in" },
                    submission.email()
                );
                Some(Command::Authenticate(submission))
            }
            Err(e) => {
                self.report(e, AUTH_FAILED);
                None
            }
        }
    }

    pub fn logout(&mut self) -> Option<Command> {
        if let Err(e) = self.session.clear() {
            self.report(e.into(), SESSION_NOT_CLEARED);
        }
        self.navigate(Route::Home.fragment())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Post job
    // ────────────────────────────────────────────────────────────────────────

    pub fn submit_post_job(&mut self, job: NewJob) -> Option<Command> {
        match self.post_job.submit(self.session.current(), job) {
            Ok((id, job)) => Some(Command::PostJob {
                id,
                token: self.session.token().unwrap_or_default().to_string(),
                job,
            }),
            Err(ClientError::Forbidden) => {
                warn!("Refusing post-job submission: not a recruiter");
                self.report(ClientError::Forbidden, POST_FAILED);
                None
            }
            Err(e) => {
                self.report(e, POST_FAILED);
                None
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Completions
    // ────────────────────────────────────────────────────────────────────────

    /// Applies a finished request and returns any follow-up request.
    pub fn apply(&mut self, completion: Completion) -> Option<Command> {
        match completion {
            Completion::Authenticated {
                sign_up,
                email,
                result,
            } => match result {
                Ok(response) => {
                    match self.session.commit(&response.token, response.role(), &email) {
                        Ok(()) => self.notifier.success(if sign_up { SIGNED_UP } else { SIGNED_IN }),
                        Err(e) => self.report(e.into(), SESSION_NOT_SAVED),
                    }
                    self.auth_modal.close();
                    match self.router.current() {
                        Route::Profile => self.enter(Route::Profile),
                        _ => None,
                    }
                }
                Err(e) => {
                    warn!("Authentication for '{email}' failed: {e}");
                    let fallback = if e.is_transport() { NETWORK_ERROR } else { AUTH_FAILED };
                    self.report(e.into(), fallback);
                    None
                }
            },
            Completion::JobsLoaded { id, result } => {
                self.jobs.complete(id, result, &mut self.notifier);
                None
            }
            Completion::JobPosted { id, result } => {
                let posted = self.post_job.complete(id, result, &mut self.notifier);
                if posted && self.router.current() == Route::PostJob {
                    return self.navigate(Route::Jobs.fragment());
                }
                None
            }
            Completion::NameLoaded { id, result } => {
                self.profile.complete(id, result, &mut self.notifier);
                None
            }
        }
    }

    fn report(&mut self, err: ClientError, fallback: &str) {
        let text = err.user_message(fallback);
        self.notifier.error(text);
    }

    // ────────────────────────────────────────────────────────────────────────
    // Rendering
    // ────────────────────────────────────────────────────────────────────────

    pub fn render(&self) -> Screen {
        let route = self.router.current();
        let signed_in = self.session.is_authenticated();
        let recruiter = self.session.is_recruiter();

        let body = if route.requires_recruiter() && !recruiter {
            PageBody::PermissionDenied
        } else {
            match route {
                Route::Home => self.home.render(signed_in),
                Route::Jobs => self.jobs.render(),
                Route::PostJob => self.post_job.render(),
                Route::Profile => self.profile.render(),
            }
        };

        let nav = Route::ALL
            .into_iter()
            .filter(|r| {
                if r.requires_recruiter() {
                    recruiter
                } else {
                    *r != Route::Profile || signed_in
                }
            })
            .collect();

        let auth = match self.session.current() {
            Some(s) => AuthAffordance::Logout {
                email: s.email.clone(),
                role: s.role,
            },
            None => AuthAffordance::SignIn,
        };

        Screen {
            route,
            nav,
            auth,
            body,
            modal: self.auth_modal.render(),
            notification: self.notifier.visible().cloned(),
        }
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notification_deadline(&self) -> Option<Instant> {
        self.notifier.expires_at()
    }

    /// Drops the notification once its window has passed.
    pub fn expire_notification(&mut self) -> bool {
        self.notifier.clear_expired(Instant::now())
    }
}
