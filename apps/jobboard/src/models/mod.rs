pub mod auth;
pub mod job;
pub mod session;
