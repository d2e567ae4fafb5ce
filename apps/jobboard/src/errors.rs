use thiserror::Error;

use crate::api_client::ApiError;
use crate::session::storage::StorageError;

/// Client-level error type.
/// Every variant maps to a user-facing notification text; nothing is rethrown.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden")]
    Forbidden,
}

impl ClientError {
    /// Text shown to the user. `fallback` is used when the backend gave no
    /// message of its own, and for storage failures, whose wording depends on
    /// whether the session was being saved or removed.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api(e) => match e.server_message() {
                Some(message) => message.to_string(),
                None => {
                    tracing::warn!("Request failed without server message: {e}");
                    fallback.to_string()
                }
            },
            ClientError::Storage(e) => {
                tracing::error!("Session storage error: {e}");
                fallback.to_string()
            }
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Forbidden => PERMISSION_DENIED.to_string(),
        }
    }
}

pub const PERMISSION_DENIED: &str = "You do not have permission to view this page.";
pub const SESSION_NOT_SAVED: &str = "Your session could not be saved on this device.";
pub const SESSION_NOT_CLEARED: &str =
    "You were signed out, but saved credentials could not be removed.";
