use serde::{Deserialize, Serialize};

use crate::models::session::Role;

/// Body of `POST /user/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest<'a> {
    pub emailid: &'a str,
    pub password: &'a str,
    pub role: Role,
    pub name: &'a str,
}

/// Body of `POST /user/signin`.
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest<'a> {
    pub emailid: &'a str,
    pub password: &'a str,
}

/// Body of `POST /user/getfullname`.
#[derive(Debug, Clone, Serialize)]
pub struct FullNameRequest<'a> {
    pub csrid: &'a str,
}

/// Successful sign-in/sign-up payload. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub role: String,
}

impl AuthResponse {
    pub fn role(&self) -> Role {
        Role::from_backend(&self.role)
    }
}

/// Failure payload carried by non-2xx auth responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
