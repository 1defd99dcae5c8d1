//! Unified client error model and classification helpers.
//! This module provides a common error enum used across the HTTP client, auth
//! context and view loaders, keeping the three client-observable failure
//! classes (transport, backend-reported, authorization) distinguishable end
//! to end instead of collapsing them into one generic failure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// Connection, timeout or body-decode trouble before any backend verdict.
    #[error("{code}: {message}")]
    Transport { code: String, message: String },
    /// Backend answered but reported failure (`success:false` or 4xx/5xx).
    #[error("{code}: {message}")]
    Api { code: String, message: String },
    /// Missing, expired or insufficient credentials (401/403 class).
    #[error("{code}: {message}")]
    Auth { code: String, message: String },
    #[error("{code}: {message}")]
    Config { code: String, message: String },
    #[error("{code}: {message}")]
    Io { code: String, message: String },
    #[error("{code}: {message}")]
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Transport { code, .. }
            | AppError::Api { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Config { code, .. }
            | AppError::Io { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Transport { message, .. }
            | AppError::Api { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Config { message, .. }
            | AppError::Io { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn transport<S: Into<String>>(code: S, msg: S) -> Self { AppError::Transport { code: code.into(), message: msg.into() } }
    pub fn api<S: Into<String>>(code: S, msg: S) -> Self { AppError::Api { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn config<S: Into<String>>(code: S, msg: S) -> Self { AppError::Config { code: code.into(), message: msg.into() } }
    pub fn io<S: Into<String>>(code: S, msg: S) -> Self { AppError::Io { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// True for authorization-class failures, the only class the client
    /// reacts to specially (refresh-token exchange before forced re-login).
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth { .. })
    }

    /// Map an HTTP status plus the backend's message payload (when present)
    /// to the right variant.
    pub fn classify_status(status: u16, message: Option<String>) -> Self {
        let msg = |fallback: &str| message.clone().unwrap_or_else(|| fallback.to_string());
        match status {
            401 => AppError::auth("unauthorized".into(), msg("Authentication required")),
            403 => AppError::auth("forbidden".into(), msg("Not authorized")),
            400..=499 => AppError::api(format!("http_{status}"), msg("Request rejected")),
            _ => AppError::api(format!("http_{status}"), msg("Server error")),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "timeout"
        } else if err.is_connect() {
            "connect_failed"
        } else if err.is_decode() {
            "decode_error"
        } else {
            "transport_error"
        };
        AppError::Transport { code: code.into(), message: err.to_string() }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io { code: "io_error".into(), message: err.to_string() }
    }
}
