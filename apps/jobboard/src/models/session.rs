use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role as issued by the backend at sign-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Recruiter => "recruiter",
        }
    }

    /// Strict parse used for persisted values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "recruiter" => Some(Role::Recruiter),
            _ => None,
        }
    }

    /// Lenient parse used for backend responses: anything unrecognized gets
    /// the least-privileged role.
    pub fn from_backend(value: &str) -> Self {
        Self::parse(value).unwrap_or(Role::User)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub email: String,
}

impl Session {
    pub fn is_recruiter(&self) -> bool {
        self.role == Role::Recruiter
    }
}
