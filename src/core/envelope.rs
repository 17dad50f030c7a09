//! The validated response envelope.
//!
//! [`ValidatedResponse`] is either the narrowed payload or the failure kind, never
//! both and never neither. It serializes to the flat wire shape used by the UI:
//! `{"success": true, "data": ...}` or `{"success": false, "errorKind": ...}`.

use crate::core::classification::ErrorKind;
use crate::core::schema::{ResolvedArm, SchemaMismatch};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Validated and projected value with the union arms it was narrowed to
#[derive(Debug, Clone, PartialEq)]
pub struct Narrowed {
    pub value: Value,
    pub arms: Vec<ResolvedArm>,
}

impl Narrowed {
    /// Tag of the union arm selected at `path` (`$.owner.repository`), if any
    pub fn arm_at(&self, path: &str) -> Option<&str> {
        self.arms
            .iter()
            .find(|arm| arm.path == path)
            .map(|arm| arm.tag.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub kind: ErrorKind,
    /// Structural detail, only present for parse failures
    pub mismatch: Option<SchemaMismatch>,
    /// Path of the union value whose arm caused a domain classification
    pub arm_path: Option<String>,
}

impl ValidationFailure {
    pub fn parsing(mismatch: SchemaMismatch) -> Self {
        Self {
            kind: ErrorKind::ParsingError,
            mismatch: Some(mismatch),
            arm_path: None,
        }
    }

    pub fn domain(kind: ErrorKind, arm_path: impl Into<String>) -> Self {
        Self {
            kind,
            mismatch: None,
            arm_path: Some(arm_path.into()),
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: ErrorKind::Unknown,
            mismatch: None,
            arm_path: None,
        }
    }

    /// Human-readable detail for diagnostics
    pub fn detail(&self) -> Option<String> {
        self.mismatch.as_ref().map(ToString::to_string)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedResponse<T> {
    Success(T),
    Failure(ValidationFailure),
}

impl<T> ValidatedResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidatedResponse::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ValidatedResponse::Success(data) => Some(data),
            ValidatedResponse::Failure(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ValidatedResponse::Success(_) => None,
            ValidatedResponse::Failure(failure) => Some(failure.kind),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, ValidationFailure> {
        match self {
            ValidatedResponse::Success(data) => Ok(data),
            ValidatedResponse::Failure(failure) => Err(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidatedResponse<U> {
        match self {
            ValidatedResponse::Success(data) => ValidatedResponse::Success(f(data)),
            ValidatedResponse::Failure(failure) => ValidatedResponse::Failure(failure),
        }
    }
}

impl<T: Serialize> Serialize for ValidatedResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ValidatedResponse::Success(data) => {
                let mut state = serializer.serialize_struct("ValidatedResponse", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            ValidatedResponse::Failure(failure) => {
                let mut state = serializer.serialize_struct("ValidatedResponse", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("errorKind", &failure.kind)?;
                state.serialize_field("detail", &failure.detail())?;
                state.end()
            }
        }
    }
}

impl Serialize for Narrowed {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_has_data_and_no_kind() {
        let response: ValidatedResponse<u32> = ValidatedResponse::Success(7);
        assert!(response.is_success());
        assert_eq!(response.data(), Some(&7));
        assert_eq!(response.error_kind(), None);
    }

    #[test]
    fn test_failure_has_kind_and_no_data() {
        let response: ValidatedResponse<u32> =
            ValidatedResponse::Failure(ValidationFailure::domain(ErrorKind::NotFoundError, "$"));
        assert!(!response.is_success());
        assert_eq!(response.data(), None);
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFoundError));
    }

    #[test]
    fn test_wire_shape() -> crate::core::error::Result<()> {
        let ok: ValidatedResponse<Value> = ValidatedResponse::Success(json!({"name": "c3"}));
        assert_eq!(
            serde_json::to_value(&ok)?,
            json!({"success": true, "data": {"name": "c3"}})
        );

        let failed: ValidatedResponse<Value> = ValidatedResponse::Failure(ValidationFailure::parsing(
            SchemaMismatch {
                path: "$.owner".to_string(),
                expected: "object".to_string(),
                found: "missing required field".to_string(),
            },
        ));
        assert_eq!(
            serde_json::to_value(&failed)?,
            json!({
                "success": false,
                "errorKind": "ParsingError",
                "detail": "$.owner: expected object, found missing required field"
            })
        );
        Ok(())
    }

    #[test]
    fn test_arm_at() {
        let narrowed = Narrowed {
            value: json!({}),
            arms: vec![ResolvedArm {
                path: "$.owner.repository".to_string(),
                tag: "Repository".to_string(),
            }],
        };
        assert_eq!(narrowed.arm_at("$.owner.repository"), Some("Repository"));
        assert_eq!(narrowed.arm_at("$.owner"), None);
    }
}
