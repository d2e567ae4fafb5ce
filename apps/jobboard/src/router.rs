//! Hash-fragment router.
//!
//! `Route::resolve` is the pure mapping from a URL fragment to a page;
//! `Router` is the long-lived state machine the shell feeds navigation events into.

use std::fmt;

use tracing::debug;

/// Logical page identifier derived from the URL fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Home,
    Jobs,
    PostJob,
    Profile,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Jobs, Route::PostJob, Route::Profile];

    /// Maps a fragment (with or without the leading `#`) to a route.
    /// Empty and unrecognized fragments resolve to `Home`.
    pub fn resolve(fragment: &str) -> Route {
        let name = fragment.trim();
        let name = name.strip_prefix('#').unwrap_or(name);
        match name {
            "jobs" => Route::Jobs,
            "post-job" => Route::PostJob,
            "profile" => Route::Profile,
            _ => Route::Home,
        }
    }

    pub fn fragment(&self) -> &'static str {
        match self {
            Route::Home => "#home",
            Route::Jobs => "#jobs",
            Route::PostJob => "#post-job",
            Route::Profile => "#profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Jobs => "Jobs",
            Route::PostJob => "Post a Job",
            Route::Profile => "Profile",
        }
    }

    /// Pages only a recruiter may see.
    pub fn requires_recruiter(&self) -> bool {
        matches!(self, Route::PostJob)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fragment())
    }
}

/// Current-route state machine. Runs for the lifetime of the shell.
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Route,
}

impl Router {
    pub fn new(initial_fragment: &str) -> Self {
        Self {
            current: Route::resolve(initial_fragment),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Handles a fragment change and returns the route now in effect.
    pub fn navigate(&mut self, fragment: &str) -> Route {
        let next = Route::resolve(fragment);
        if next != self.current {
            debug!("Route change {} -> {}", self.current, next);
        }
        self.current = next;
        next
    }
}
