//! Transient user-facing messages.
//!
//! At most one notification is live; a new one replaces the old. Each is
//! visible for exactly `DISPLAY_DURATION` from the moment it was set.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<(Notification, Instant)>,
}

impl Notifier {
    pub fn notify(&mut self, text: impl Into<String>, severity: Severity) {
        self.notify_at(text, severity, Instant::now());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.notify(text, Severity::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notify(text, Severity::Error);
    }

    pub fn notify_at(&mut self, text: impl Into<String>, severity: Severity, at: Instant) {
        let notification = Notification {
            text: text.into(),
            severity,
        };
        debug!("Notification ({:?}): {}", severity, notification.text);
        self.current = Some((notification, at));
    }

    /// The live notification at `now`, if its window has not elapsed.
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        match &self.current {
            Some((n, set_at)) if now.saturating_duration_since(*set_at) < DISPLAY_DURATION => {
                Some(n)
            }
            _ => None,
        }
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.visible_at(Instant::now())
    }

    /// When the live notification disappears, if one is set.
    pub fn expires_at(&self) -> Option<Instant> {
        self.current.as_ref().map(|(_, at)| *at + DISPLAY_DURATION)
    }

    /// Drops an elapsed notification. Returns true if one was removed.
    pub fn clear_expired(&mut self, now: Instant) -> bool {
        if self.current.is_some() && self.visible_at(now).is_none() {
            self.current = None;
            return true;
        }
        false
    }

    /// Most recently set notification regardless of expiry.
    #[cfg(test)]
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }
}
