//! Error types for HTML extraction.
//!
//! Field-level errors are built by the parsing sub-routines, logged by the
//! extractors, and swallowed; only URL resolution surfaces an error to the
//! caller.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParsingError {
    #[error("invalid integer value '{value}'")]
    InvalidInteger {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid floating-point value '{value}'")]
    InvalidFloat {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("stats label '{label}' does not match the '<ratings> ratings, <reviews> reviews' shape")]
    MalformedStatsLabel { label: String },

    #[error("URL resolution failed for '{url}': {reason}")]
    UrlResolutionFailed { url: String, reason: String },
}

impl ParsingError {
    /// Create an invalid integer error, keeping the offending text.
    pub fn invalid_integer(value: &str, source: std::num::ParseIntError) -> Self {
        Self::InvalidInteger {
            value: value.to_string(),
            source,
        }
    }

    /// Create an invalid float error, keeping the offending text.
    pub fn invalid_float(value: &str, source: std::num::ParseFloatError) -> Self {
        Self::InvalidFloat {
            value: value.to_string(),
            source,
        }
    }

    /// Create a malformed stats label error.
    pub fn malformed_stats_label(label: &str) -> Self {
        Self::MalformedStatsLabel {
            label: label.to_string(),
        }
    }

    /// Create a URL resolution error.
    pub fn url_resolution_failed(url: &str, reason: impl Into<String>) -> Self {
        Self::UrlResolutionFailed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether extraction can continue past this error.
    ///
    /// Field-level errors are always recoverable: the affected field keeps
    /// its default and the rest of the record is still extracted.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidInteger { .. } => true,
            Self::InvalidFloat { .. } => true,
            Self::MalformedStatsLabel { .. } => true,
            Self::UrlResolutionFailed { .. } => false,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
