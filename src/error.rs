//! Error types for the Telegram bot kit
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Failures reported by the Bot API itself, and transport failures that
//! arrive without a JSON envelope, are both carried by [`TelegramError`] so
//! callers can match a single variant and inspect the optional code.

use std::fmt;
use thiserror::Error;

/// An error value reported for a Bot API call.
///
/// Protocol errors carry the `error_code` and `description` from an
/// `{"ok": false}` envelope. Transport errors carry the HTTP status code and
/// reason phrase of a response that had no body at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramError {
    code: Option<i64>,
    message: String,
}

impl TelegramError {
    /// Create an error value from an optional code and a message
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an error value from an HTTP status line
    pub fn transport(status: u16, reason: impl Into<String>) -> Self {
        Self::new(Some(i64::from(status)), reason)
    }

    /// Create an error value from an `ok: false` envelope
    pub fn protocol(error_code: Option<i64>, description: Option<String>) -> Self {
        Self::new(error_code, description.unwrap_or_default())
    }

    /// Numeric code, when one was reported
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TelegramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TelegramError {}

/// The main error type for the Telegram bot kit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Bot API Errors
    // ============================================================================
    #[error(transparent)]
    Telegram(#[from] TelegramError),

    #[error("Unsupported request encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Invalid payload for {encoding} encoding: {message}")]
    InvalidPayload { encoding: String, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid CSS selector: {selector}")]
    Selector { selector: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid payload error
    pub fn invalid_payload(encoding: impl fmt::Display, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            encoding: encoding.to_string(),
            message: message.into(),
        }
    }

    /// Create a selector error
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
        }
    }

    /// The Bot API error value, if this is one
    pub fn as_telegram(&self) -> Option<&TelegramError> {
        match self {
            Error::Telegram(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this error is a Bot API error value
    pub fn is_telegram(&self) -> bool {
        self.as_telegram().is_some()
    }
}

/// Result type alias for the Telegram bot kit
pub type Result<T> = std::result::Result<T, Error>;
