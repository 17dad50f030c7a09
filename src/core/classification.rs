//! Error kinds, the status table and the pure classifier.
//!
//! Every failed query ends up here: the validator decides *which* [`ErrorKind`]
//! applies, and [`classify`] turns that kind into the uniform [`ClassifiedError`]
//! consumed by error boundaries and toasts.
//!
//! # Status Table
//! | kind                     | status | severity |
//! |--------------------------|--------|----------|
//! | `ParsingError`           | 400    | error    |
//! | `NotFoundError`          | 404    | info     |
//! | `OwnerNotActivatedError` | 403    | info     |
//! | `Unknown`                | 400    | error    |
//!
//! Query callers apply a [`ParseFailureStatus`] convention on top of the table so
//! that an unparseable response can be reported as an absent resource (404).

use crate::core::error::{CoverageNavigatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of failure classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The response did not match the expected schema
    ParsingError,
    /// The remote resource is confirmed absent
    NotFoundError,
    /// The resource exists but the owner has not activated the account
    OwnerNotActivatedError,
    /// Anything that never reached the schema check (transport failures)
    Unknown,
}

/// Severity attached to the diagnostic record of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::ParsingError,
        ErrorKind::NotFoundError,
        ErrorKind::OwnerNotActivatedError,
        ErrorKind::Unknown,
    ];

    /// Status code from the fixed table
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::ParsingError => 400,
            ErrorKind::NotFoundError => 404,
            ErrorKind::OwnerNotActivatedError => 403,
            ErrorKind::Unknown => 400,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ErrorKind::ParsingError | ErrorKind::Unknown => Severity::Error,
            ErrorKind::NotFoundError | ErrorKind::OwnerNotActivatedError => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ParsingError => "ParsingError",
            ErrorKind::NotFoundError => "NotFoundError",
            ErrorKind::OwnerNotActivatedError => "OwnerNotActivatedError",
            ErrorKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorKind {
    type Err = CoverageNavigatorError;

    fn from_str(s: &str) -> Result<Self> {
        ErrorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoverageNavigatorError::unknown_error_kind(s))
    }
}

/// How a query reports a response that failed to parse.
///
/// Both conventions exist for the same situation; a pipeline picks one and
/// applies it to every query it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailureStatus {
    /// Report the raw table value (400)
    BadRequest,
    /// Treat an unparseable response as an absent resource (404)
    #[default]
    NotFound,
}

impl ParseFailureStatus {
    pub fn status_for(&self, kind: ErrorKind) -> u16 {
        match (kind, self) {
            (ErrorKind::ParsingError, ParseFailureStatus::NotFound) => 404,
            _ => kind.status_code(),
        }
    }
}

/// Link target rendered by the UI, addressed by page name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDescriptor {
    pub page_name: String,
    pub text: String,
}

/// User-facing remediation attached to a classified error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub message: String,
    pub link: LinkDescriptor,
}

/// Extra information handed to [`classify`].
///
/// Only the detail matching the kind is used: a mismatch description for
/// `ParsingError`, a payload for `OwnerNotActivatedError`.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetails {
    Mismatch(String),
    Payload(UserPayload),
}

/// The uniform failure object surfaced to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    pub status_code: u16,
    pub error_kind: ErrorKind,
    pub dev_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_payload: Option<UserPayload>,
}

/// Classify `kind` using the raw status table.
pub fn classify(kind: ErrorKind, caller_id: &str, details: Option<ErrorDetails>) -> ClassifiedError {
    classify_with(kind, caller_id, details, ParseFailureStatus::BadRequest)
}

/// Classify `kind`, reporting parse failures according to `convention`.
pub fn classify_with(
    kind: ErrorKind,
    caller_id: &str,
    details: Option<ErrorDetails>,
    convention: ParseFailureStatus,
) -> ClassifiedError {
    let status_code = convention.status_for(kind);

    let (mismatch, user_payload) = match (kind, details) {
        (ErrorKind::ParsingError, Some(ErrorDetails::Mismatch(detail))) => (Some(detail), None),
        (ErrorKind::OwnerNotActivatedError, Some(ErrorDetails::Payload(payload))) => {
            (None, Some(payload))
        }
        _ => (None, None),
    };

    let dev_message = match mismatch {
        Some(detail) => format!("{caller_id} - {status_code} {kind}: {detail}"),
        None => format!("{caller_id} - {status_code} {kind}"),
    };

    ClassifiedError {
        status_code,
        error_kind: kind,
        dev_message,
        user_payload,
    }
}
