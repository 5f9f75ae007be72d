//! Error taxonomy shared by the fetcher, the validator and the presenter.
//!
//! Every fallible operation in this crate returns [`DashboardError`]. The
//! variants map one-to-one onto the four failure kinds a caller may want to
//! branch on; [`DashboardError::kind`] exposes that discriminant without
//! matching on payloads.

use std::fmt;
use thiserror::Error;

/// Why an upstream API call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// The provider answered with a non-2xx status.
    Status(u16),
    /// The request never produced a response (timeout, refused, DNS, ...).
    Transport(String),
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "status {code}"),
            Self::Transport(message) => write!(f, "network failure: {message}"),
        }
    }
}

/// Structured error type for market data operations.
///
/// Designed to be displayable directly in the interactive menu.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("API error: {0}")]
    Api(ApiFailure),

    #[error("data validation error: {0}")]
    DataValidation(String),

    #[error("chart error: {0}")]
    Chart(String),

    /// Reserved for callers that want a "nothing at all" signal distinct
    /// from a validation failure. The fetch path never produces it.
    #[error("no data: {0}")]
    EmptyData(String),
}

/// Discriminant of [`DashboardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Api,
    DataValidation,
    Chart,
    EmptyData,
}

impl DashboardError {
    pub fn status(code: u16) -> Self {
        Self::Api(ApiFailure::Status(code))
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Api(ApiFailure::Transport(message.into()))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::DataValidation(message.into())
    }

    pub fn chart(message: impl Into<String>) -> Self {
        Self::Chart(message.into())
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::EmptyData(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(_) => ErrorKind::Api,
            Self::DataValidation(_) => ErrorKind::DataValidation,
            Self::Chart(_) => ErrorKind::Chart,
            Self::EmptyData(_) => ErrorKind::EmptyData,
        }
    }

    /// HTTP status carried by an [`ApiFailure::Status`], if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(ApiFailure::Status(code)) => Some(*code),
            _ => None,
        }
    }

    /// Whether the interactive loop may report this error and keep going.
    ///
    /// Rendering failures are not recoverable there and end the session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Chart(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
