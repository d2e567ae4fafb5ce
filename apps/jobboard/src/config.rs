use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9090/jobback";
pub const DEFAULT_SESSION_FILE: &str = ".jobboard-session.json";

/// Client configuration loaded from environment variables once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// `None` keeps the session in memory only (`SESSION_FILE=none`).
    pub session_file: Option<PathBuf>,
    pub start_route: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = lookup("API_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        validate_base_url(&api_base_url)
            .with_context(|| format!("API_BASE_URL '{api_base_url}' is not a valid http(s) URL"))?;

        let session_file = match lookup("SESSION_FILE").map(|v| v.trim().to_string()) {
            Some(v) if v.eq_ignore_ascii_case("none") => None,
            Some(v) if !v.is_empty() => Some(PathBuf::from(v)),
            _ => Some(PathBuf::from(DEFAULT_SESSION_FILE)),
        };

        Ok(Config {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            session_file,
            start_route: lookup("START_ROUTE").unwrap_or_default(),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn validate_base_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw)?;
    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https"),
        "unsupported scheme '{}'",
        url.scheme()
    );
    anyhow::ensure!(url.host_str().is_some_and(|h| !h.is_empty()), "missing host");
    Ok(())
}
