//! Pure response validation.
//!
//! [`ResponseValidator`] matches a decoded response against a [`Schema`] and
//! decides the outcome: a narrowed payload, a parse failure, or one of the domain
//! failures signalled by a union arm (`NotFoundError`, `OwnerNotActivatedError`).
//! It performs no I/O and emits nothing; see [`QueryPipeline`] for the wrapper
//! that classifies and reports failures.
//!
//! [`QueryPipeline`]: crate::core::pipeline::QueryPipeline

use crate::core::classification::{ErrorKind, ParseFailureStatus};
use crate::core::envelope::{Narrowed, ValidatedResponse, ValidationFailure};
use crate::core::error::Result;
use crate::core::schema::{Schema, SchemaMismatch, DEFAULT_DISCRIMINANT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings that decide how a matched response is classified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub parse_failure_status: ParseFailureStatus,
    pub not_found_tags: Vec<String>,
    pub owner_not_activated_tags: Vec<String>,
    /// Field that selects the arm of built-in unions and of file unions
    /// that do not name their own
    pub discriminant: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            parse_failure_status: ParseFailureStatus::default(),
            not_found_tags: vec!["NotFoundError".to_string()],
            owner_not_activated_tags: vec!["OwnerNotActivatedError".to_string()],
            discriminant: DEFAULT_DISCRIMINANT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    config: ValidatorConfig,
}

impl ResponseValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `raw` against `schema`.
    ///
    /// Returns `Err` only when `schema` itself is malformed. Every response
    /// outcome, including parse failures, is an `Ok` envelope.
    pub fn validate(
        &self,
        raw: &Value,
        schema: &Schema,
        caller_id: &str,
    ) -> Result<ValidatedResponse<Narrowed>> {
        schema.check()?;

        let matched = match schema.matches(raw) {
            Ok(matched) => matched,
            Err(mismatch) => {
                log::debug!("{caller_id}: response did not match schema: {mismatch}");
                return Ok(ValidatedResponse::Failure(ValidationFailure::parsing(
                    mismatch,
                )));
            }
        };

        for arm in &matched.arms {
            if let Some(kind) = self.domain_kind(&arm.tag) {
                log::debug!("{caller_id}: union at {} resolved to {}", arm.path, arm.tag);
                return Ok(ValidatedResponse::Failure(ValidationFailure::domain(
                    kind,
                    arm.path.clone(),
                )));
            }
        }

        Ok(ValidatedResponse::Success(Narrowed {
            value: matched.value,
            arms: matched.arms,
        }))
    }

    /// Validate and then deserialize the narrowed value into `T`.
    ///
    /// `T` is usually a serde enum tagged on `__typename`, so the union arm is
    /// carried into the type system. A value that passes the schema but not
    /// deserialization is still a parse failure.
    pub fn validate_as<T: DeserializeOwned>(
        &self,
        raw: &Value,
        schema: &Schema,
        caller_id: &str,
    ) -> Result<ValidatedResponse<T>> {
        let validated = self.validate(raw, schema, caller_id)?;
        let narrowed = match validated {
            ValidatedResponse::Success(narrowed) => narrowed,
            ValidatedResponse::Failure(failure) => return Ok(ValidatedResponse::Failure(failure)),
        };

        match serde_json::from_value::<T>(narrowed.value) {
            Ok(data) => Ok(ValidatedResponse::Success(data)),
            Err(err) => {
                log::debug!("{caller_id}: narrowed response did not deserialize: {err}");
                Ok(ValidatedResponse::Failure(ValidationFailure::parsing(
                    SchemaMismatch {
                        path: "$".to_string(),
                        expected: std::any::type_name::<T>().to_string(),
                        found: err.to_string(),
                    },
                )))
            }
        }
    }

    fn domain_kind(&self, tag: &str) -> Option<ErrorKind> {
        if self.config.not_found_tags.iter().any(|t| t == tag) {
            Some(ErrorKind::NotFoundError)
        } else if self.config.owner_not_activated_tags.iter().any(|t| t == tag) {
            Some(ErrorKind::OwnerNotActivatedError)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CoverageNavigatorError;
    use crate::core::schema::{Field, UnionArm};
    use serde_json::json;

    fn overview_schema() -> Schema {
        Schema::object([Field::required(
            "owner",
            Schema::nullable(Schema::object([Field::required(
                "repository",
                Schema::union([
                    UnionArm::new(
                        "Repository",
                        [
                            Field::required("private", Schema::Boolean),
                            Field::optional("defaultBranch", Schema::nullable(Schema::String)),
                        ],
                    ),
                    UnionArm::new("NotFoundError", [Field::required("message", Schema::String)]),
                    UnionArm::new(
                        "OwnerNotActivatedError",
                        [Field::required("message", Schema::String)],
                    ),
                ]),
            )])),
        )])
    }

    #[test]
    fn test_empty_response_is_parsing_error() -> Result<()> {
        let validator = ResponseValidator::default();
        let result = validator.validate(&json!({}), &overview_schema(), "useRepoOverview")?;
        assert_eq!(result.error_kind(), Some(ErrorKind::ParsingError));
        assert!(result.data().is_none());
        Ok(())
    }

    #[test]
    fn test_not_found_arm() -> Result<()> {
        let validator = ResponseValidator::default();
        let raw = json!({
            "owner": {"repository": {"__typename": "NotFoundError", "message": "repo not found"}}
        });
        let result = validator.validate(&raw, &overview_schema(), "useRepoOverview")?;
        assert_eq!(result.error_kind(), Some(ErrorKind::NotFoundError));
        match result {
            ValidatedResponse::Failure(failure) => {
                assert_eq!(failure.arm_path.as_deref(), Some("$.owner.repository"));
                assert!(failure.mismatch.is_none());
            }
            ValidatedResponse::Success(_) => panic!("expected failure"),
        }
        Ok(())
    }

    #[test]
    fn test_owner_not_activated_arm() -> Result<()> {
        let validator = ResponseValidator::default();
        let raw = json!({
            "owner": {"repository": {"__typename": "OwnerNotActivatedError", "message": "activate"}}
        });
        let result = validator.validate(&raw, &overview_schema(), "useRepoOverview")?;
        assert_eq!(result.error_kind(), Some(ErrorKind::OwnerNotActivatedError));
        Ok(())
    }

    #[test]
    fn test_repository_arm_is_narrowed() -> Result<()> {
        let validator = ResponseValidator::default();
        let raw = json!({
            "owner": {"repository": {
                "__typename": "Repository",
                "private": false,
                "defaultBranch": "main",
                "message": "ignored"
            }}
        });
        let result = validator.validate(&raw, &overview_schema(), "useRepoOverview")?;
        let data = result.data().expect("success");
        assert_eq!(
            data.value,
            json!({"owner": {"repository": {
                "__typename": "Repository",
                "private": false,
                "defaultBranch": "main"
            }}})
        );
        assert_eq!(data.arm_at("$.owner.repository"), Some("Repository"));
        assert_eq!(result.error_kind(), None);
        Ok(())
    }

    #[test]
    fn test_null_owner_is_success() -> Result<()> {
        let validator = ResponseValidator::default();
        let result = validator.validate(&json!({"owner": null}), &overview_schema(), "useRepoOverview")?;
        assert!(result.is_success());
        Ok(())
    }

    #[test]
    fn test_configured_tags() -> Result<()> {
        let validator = ResponseValidator::new(ValidatorConfig {
            not_found_tags: vec!["MissingRepo".to_string()],
            ..ValidatorConfig::default()
        });
        let schema = Schema::union([UnionArm::new("MissingRepo", [])]);
        let result = validator.validate(&json!({"__typename": "MissingRepo"}), &schema, "useRepo")?;
        assert_eq!(result.error_kind(), Some(ErrorKind::NotFoundError));
        Ok(())
    }

    #[test]
    fn test_custom_discriminant() -> Result<()> {
        let validator = ResponseValidator::new(ValidatorConfig {
            discriminant: "kind".to_string(),
            ..ValidatorConfig::default()
        });
        let schema = Schema::union_on(
            &validator.config().discriminant,
            [
                UnionArm::new("Repository", [Field::required("private", Schema::Boolean)]),
                UnionArm::new("OwnerNotActivatedError", []),
            ],
        );

        let result = validator.validate(&json!({"kind": "OwnerNotActivatedError"}), &schema, "useRepo")?;
        assert_eq!(result.error_kind(), Some(ErrorKind::OwnerNotActivatedError));

        let result = validator.validate(
            &json!({"kind": "Repository", "private": true, "__typename": "Repository"}),
            &schema,
            "useRepo",
        )?;
        assert_eq!(
            result.data().map(|narrowed| &narrowed.value),
            Some(&json!({"kind": "Repository", "private": true}))
        );
        Ok(())
    }

    #[test]
    fn test_config_default_discriminant() {
        assert_eq!(ValidatorConfig::default().discriminant, "__typename");
        let config: ValidatorConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config.discriminant, DEFAULT_DISCRIMINANT);
    }

    #[test]
    fn test_malformed_schema_is_an_error() {
        let validator = ResponseValidator::default();
        let schema = Schema::object([Field::required("repository", Schema::union([]))]);
        let result = validator.validate(&json!({}), &schema, "useRepo");
        assert!(matches!(
            result,
            Err(CoverageNavigatorError::MalformedSchema { .. })
        ));
    }

    #[test]
    fn test_validate_as_typed_union() -> Result<()> {
        #[derive(Debug, Deserialize, PartialEq)]
        #[serde(tag = "__typename")]
        enum Repo {
            Repository { private: bool },
        }

        let validator = ResponseValidator::default();
        let schema = Schema::union([UnionArm::new(
            "Repository",
            [Field::required("private", Schema::Boolean)],
        )]);
        let result: ValidatedResponse<Repo> = validator.validate_as(
            &json!({"__typename": "Repository", "private": true}),
            &schema,
            "useRepo",
        )?;
        assert_eq!(result.data(), Some(&Repo::Repository { private: true }));
        Ok(())
    }

    #[test]
    fn test_validate_as_deserialize_failure_is_parsing_error() -> Result<()> {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            count: u8,
        }

        let validator = ResponseValidator::default();
        let schema = Schema::object([Field::required("count", Schema::Integer)]);
        let result: ValidatedResponse<Strict> =
            validator.validate_as(&json!({"count": 4096}), &schema, "useCount")?;
        assert_eq!(result.error_kind(), Some(ErrorKind::ParsingError));
        Ok(())
    }
}
