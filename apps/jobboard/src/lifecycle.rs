//! Explicit request lifecycles for view-owned fetches.
//!
//! Every fetch is tagged with a fresh `RequestId`. A result is applied only if
//! its id matches the request the view is still waiting on; anything else is a
//! late response from a view the user already left and is dropped.

use std::fmt;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Lifecycle<T> {
    #[default]
    Idle,
    Pending(RequestId),
    Ready(T),
    Failed,
}

impl<T> Lifecycle<T> {
    /// Starts a new request, superseding any in flight.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId::new();
        *self = Lifecycle::Pending(id);
        id
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Lifecycle::Pending(_))
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        matches!(self, Lifecycle::Pending(pending) if *pending == id)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Lifecycle::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Settles the request `id` with `value` (`None` = failed).
    /// Returns false and leaves state untouched if `id` is stale.
    pub fn settle(&mut self, id: RequestId, value: Option<T>) -> bool {
        if !self.is_current(id) {
            return false;
        }
        *self = match value {
            Some(v) => Lifecycle::Ready(v),
            None => Lifecycle::Failed,
        };
        true
    }

    /// Abandons whatever is in flight; late results will be treated as stale.
    pub fn reset(&mut self) {
        *self = Lifecycle::Idle;
    }
}
