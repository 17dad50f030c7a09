//! Core functionality for the coverage-navigator tool.
//!
//! This module provides the response validation pipeline, the ref-aware path
//! rewriter, and the ambient pieces (errors, configuration, output) around them.

pub mod classification;
pub mod config;
pub mod diagnostics;
pub mod dirs;
pub mod envelope;
pub mod error;
pub mod output;
pub mod path_rewriter;
pub mod pipeline;
pub mod redirect;
pub mod schema;
pub mod schemas;
pub mod validator;

// === Error handling ===
// Crate error type for schema defects and the ambient layer
pub use error::{CoverageNavigatorError, Result};

// === Classification ===
// Error kinds, the status table and the pure classifier
pub use classification::{
    classify, classify_with, ClassifiedError, ErrorDetails, ErrorKind, LinkDescriptor,
    ParseFailureStatus, Severity, UserPayload,
};

// === Schemas and validation ===
pub use envelope::{Narrowed, ValidatedResponse, ValidationFailure};
pub use schema::{Field, Matched, ObjectSchema, ResolvedArm, Schema, SchemaMismatch, UnionArm, UnionSchema};
pub use validator::{ResponseValidator, ValidatorConfig};

// === Query pipeline ===
// Validation plus classification plus one-shot diagnostics
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink, NETWORK_ERROR_CATEGORY};
pub use pipeline::{FetchOutcome, QueryPipeline, QueryResult};

// === Built-in queries ===
pub use schemas::{
    builtin_query, resolve_schema, BuiltinQuery, Commit, CommitRepository, OwnerQuery,
    RepoOverview, RepositoryResult, BUILTIN_QUERIES,
};

// === Route rewriting ===
pub use path_rewriter::{compute_new_path, rewrite, Rewrite, RewriteStrategy, RouteRefDescriptor};
pub use redirect::{RedirectState, RedirectTracker};

// === Configuration ===
pub use config::{ActivationConfig, AppConfig};

// === Output formatting ===
pub use output::{print_error, print_info, print_json, print_section_header, print_success};
