//! Diagnostic records emitted for failed queries.
//!
//! The pure validator never reports anything itself. [`QueryPipeline`] builds one
//! [`Diagnostic`] per failed call and hands it to a [`DiagnosticSink`]. Sinks are
//! fire-and-forget: they cannot fail the query that produced the record.
//!
//! [`QueryPipeline`]: crate::core::pipeline::QueryPipeline

use crate::core::classification::{ErrorKind, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Breadcrumb category attached to every failed-query record
pub const NETWORK_ERROR_CATEGORY: &str = "network.error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub caller_id: String,
    pub error_kind: ErrorKind,
    pub category: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Diagnostic {
    pub fn new(caller_id: impl Into<String>, error_kind: ErrorKind, detail: Option<String>) -> Self {
        Self {
            caller_id: caller_id.into(),
            error_kind,
            category: NETWORK_ERROR_CATEGORY.to_string(),
            severity: error_kind.severity(),
            detail,
            recorded_at: Utc::now(),
        }
    }
}

/// Destination for diagnostic records
pub trait DiagnosticSink {
    fn emit(&self, record: &Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, record: &Diagnostic) {
        (**self).emit(record)
    }
}

/// Writes records through the `log` facade under the `network.error` target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, record: &Diagnostic) {
        let detail = record.detail.as_deref().unwrap_or("-");
        match record.severity {
            Severity::Error => log::error!(
                target: NETWORK_ERROR_CATEGORY,
                "{} failed with {}: {}",
                record.caller_id,
                record.error_kind,
                detail
            ),
            Severity::Info => log::info!(
                target: NETWORK_ERROR_CATEGORY,
                "{} failed with {}: {}",
                record.caller_id,
                record.error_kind,
                detail
            ),
        }
    }
}

/// Keeps records in memory; used by tests and by callers that batch telemetry
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, record: &Diagnostic) {
        match self.records.lock() {
            Ok(mut records) => records.push(record.clone()),
            Err(poisoned) => poisoned.into_inner().push(record.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_takes_severity_from_kind() {
        let record = Diagnostic::new("useRepo", ErrorKind::ParsingError, Some("$.owner".into()));
        assert_eq!(record.severity, Severity::Error);
        assert_eq!(record.category, NETWORK_ERROR_CATEGORY);

        let record = Diagnostic::new("useRepo", ErrorKind::NotFoundError, None);
        assert_eq!(record.severity, Severity::Info);
    }

    #[test]
    fn test_memory_sink_collects_records() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.emit(&Diagnostic::new("useRepo", ErrorKind::Unknown, None));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].caller_id, "useRepo");
    }

    #[test]
    fn test_log_sink_does_not_panic() {
        LogSink.emit(&Diagnostic::new("useRepo", ErrorKind::ParsingError, None));
        LogSink.emit(&Diagnostic::new("useRepo", ErrorKind::OwnerNotActivatedError, None));
    }
}
