//! Client configuration resolved once at process start.
//! The backend base URL comes from the environment with a localhost fallback,
//! matching how the deployment injects it; everything else has sane defaults.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_SESSION_FILE: &str = "carelink_session.json";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the hospital REST backend, always with a trailing slash so
    /// relative endpoint joins keep the `/api` prefix.
    pub api_base: Url,
    pub request_timeout: Duration,
    /// Where the bearer-token pair is persisted between runs.
    pub session_file: PathBuf,
}

impl ClientConfig {
    pub fn new(api_base: &str, session_file: impl Into<PathBuf>) -> AppResult<Self> {
        // A trailing slash matters: Url::join replaces the last path segment
        // of a slash-less base, silently dropping the /api prefix.
        let normalized = if api_base.ends_with('/') {
            api_base.to_string()
        } else {
            format!("{api_base}/")
        };
        let api_base = Url::parse(&normalized)
            .map_err(|e| AppError::config("bad_base_url".to_string(), format!("{normalized}: {e}")))?;
        Ok(Self {
            api_base,
            request_timeout: Duration::from_secs(30),
            session_file: session_file.into(),
        })
    }

    /// Read `CARELINK_API_BASE`, `CARELINK_SESSION_FILE` and
    /// `CARELINK_HTTP_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> AppResult<Self> {
        let base = std::env::var("CARELINK_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let session_file =
            std::env::var("CARELINK_SESSION_FILE").unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string());
        let mut cfg = Self::new(&base, session_file)?;
        if let Ok(secs) = std::env::var("CARELINK_HTTP_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(n) if n > 0 => cfg.request_timeout = Duration::from_secs(n),
                _ => {
                    return Err(AppError::config(
                        "bad_timeout".to_string(),
                        format!("CARELINK_HTTP_TIMEOUT_SECS='{secs}' is not a positive integer"),
                    ))
                }
            }
        }
        Ok(cfg)
    }
}
