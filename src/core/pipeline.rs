//! Query pipeline: validate, classify, report once.
//!
//! This is the shape every data-fetching call follows. The pipeline takes what the
//! transport produced, runs the [`ResponseValidator`], and on failure turns the
//! failure into a [`ClassifiedError`] while emitting exactly one [`Diagnostic`].
//! Retrying is the caller's decision; nothing here retries.

use crate::core::classification::{classify_with, ClassifiedError, ErrorDetails, UserPayload};
use crate::core::diagnostics::{Diagnostic, DiagnosticSink};
use crate::core::envelope::{Narrowed, ValidatedResponse, ValidationFailure};
use crate::core::error::Result;
use crate::core::schema::Schema;
use crate::core::validator::ResponseValidator;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Result of a query as seen by UI code
pub type QueryResult<T> = std::result::Result<T, ClassifiedError>;

/// What the transport handed back
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A decoded response body
    Body(Value),
    /// The request failed before a body could be decoded
    TransportFailure { message: String },
}

pub struct QueryPipeline<S: DiagnosticSink> {
    validator: ResponseValidator,
    sink: S,
}

impl<S: DiagnosticSink> QueryPipeline<S> {
    pub fn new(validator: ResponseValidator, sink: S) -> Self {
        Self { validator, sink }
    }

    pub fn validator(&self) -> &ResponseValidator {
        &self.validator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Validate a decoded body and classify any failure.
    ///
    /// `activation` is the call-to-action attached when the owner is not
    /// activated. The outer `Result` only fails for a malformed schema.
    pub fn run(
        &self,
        raw: &Value,
        schema: &Schema,
        caller_id: &str,
        activation: Option<&UserPayload>,
    ) -> Result<QueryResult<Narrowed>> {
        let validated = self.validator.validate(raw, schema, caller_id)?;
        Ok(self.settle(validated, caller_id, activation))
    }

    /// Like [`run`](Self::run), deserializing the narrowed value into `T`
    pub fn run_as<T: DeserializeOwned>(
        &self,
        raw: &Value,
        schema: &Schema,
        caller_id: &str,
        activation: Option<&UserPayload>,
    ) -> Result<QueryResult<T>> {
        let validated = self.validator.validate_as::<T>(raw, schema, caller_id)?;
        Ok(self.settle(validated, caller_id, activation))
    }

    /// Handle a transport outcome; transport failures classify as `Unknown`
    pub fn run_outcome<T: DeserializeOwned>(
        &self,
        outcome: FetchOutcome,
        schema: &Schema,
        caller_id: &str,
        activation: Option<&UserPayload>,
    ) -> Result<QueryResult<T>> {
        match outcome {
            FetchOutcome::Body(raw) => self.run_as(&raw, schema, caller_id, activation),
            FetchOutcome::TransportFailure { message } => {
                log::debug!("{caller_id}: transport failure: {message}");
                let failure = ValidationFailure::unknown();
                Ok(Err(self.fail(failure, Some(message), caller_id, activation)))
            }
        }
    }

    fn settle<T>(
        &self,
        validated: ValidatedResponse<T>,
        caller_id: &str,
        activation: Option<&UserPayload>,
    ) -> QueryResult<T> {
        match validated {
            ValidatedResponse::Success(data) => Ok(data),
            ValidatedResponse::Failure(failure) => {
                let detail = failure.detail();
                Err(self.fail(failure, detail, caller_id, activation))
            }
        }
    }

    fn fail(
        &self,
        failure: ValidationFailure,
        detail: Option<String>,
        caller_id: &str,
        activation: Option<&UserPayload>,
    ) -> ClassifiedError {
        let details = match (&failure.mismatch, activation) {
            (Some(mismatch), _) => Some(ErrorDetails::Mismatch(mismatch.to_string())),
            (None, Some(payload)) => Some(ErrorDetails::Payload(payload.clone())),
            (None, None) => None,
        };

        let classified = classify_with(
            failure.kind,
            caller_id,
            details,
            self.validator.config().parse_failure_status,
        );

        self.sink
            .emit(&Diagnostic::new(caller_id, failure.kind, detail));

        classified
    }
}
