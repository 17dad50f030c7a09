//! Coverage Navigator - response validation and ref-aware routing for coverage reports.
//!
//! This library provides the logic that sits under a coverage-reporting front end:
//! validating API responses against schemas with discriminated unions, classifying
//! failures into uniform errors with status codes, and rewriting route paths when
//! the user switches branch, tag or commit.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Schema matching and the response validator
//! - Error classification and the query pipeline
//! - Branch/ref path rewriting and the redirect tracker
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use crate::core::{
    classify,
    // Route rewriting
    compute_new_path,
    ClassifiedError,
    // Error handling
    CoverageNavigatorError,
    DiagnosticSink,
    ErrorKind,
    FetchOutcome,
    QueryPipeline,
    RedirectTracker,
    // Validation
    ResponseValidator,
    Result,
    RouteRefDescriptor,
    Schema,
    ValidatedResponse,
};
