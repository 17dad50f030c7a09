//! Built-in query schemas and their typed responses.
//!
//! Each query the front end runs gets a [`Schema`] for structural validation and a
//! serde type that carries the discriminated union into the type system. Schemas
//! can also be loaded from JSON files with [`resolve_schema`].
//!
//! Unions are keyed on the configured discriminant field
//! (`ValidatorConfig::discriminant`). The typed responses below are tagged on
//! `__typename`, the field the remote API actually sends.

use crate::core::error::{CoverageNavigatorError, Result};
use crate::core::schema::{Field, Schema, UnionArm};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A named query known to the CLI
#[derive(Debug, Clone, Copy)]
pub struct BuiltinQuery {
    pub name: &'static str,
    /// Caller identifier used in diagnostics when none is given
    pub caller_id: &'static str,
    build: fn(&str) -> Schema,
}

impl BuiltinQuery {
    /// Build the schema with unions keyed on `discriminant`
    pub fn schema(&self, discriminant: &str) -> Schema {
        (self.build)(discriminant)
    }
}

pub const BUILTIN_QUERIES: [BuiltinQuery; 2] = [
    BuiltinQuery {
        name: "repo-overview",
        caller_id: "useRepoOverview",
        build: repo_overview_schema,
    },
    BuiltinQuery {
        name: "commit",
        caller_id: "useCommit",
        build: commit_schema,
    },
];

pub fn builtin_query(name: &str) -> Option<BuiltinQuery> {
    BUILTIN_QUERIES.into_iter().find(|query| query.name == name)
}

pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN_QUERIES.iter().map(|query| query.name).collect()
}

/// Resolve a built-in schema name or a path to a JSON schema description.
///
/// Unions in a schema file that do not name their own discriminant use
/// `discriminant`.
pub fn resolve_schema(name_or_path: &str, discriminant: &str) -> Result<Schema> {
    if let Some(query) = builtin_query(name_or_path) {
        return Ok(query.schema(discriminant));
    }

    let path = Path::new(name_or_path);
    if !path.exists() {
        return Err(CoverageNavigatorError::unknown_schema(
            name_or_path,
            &builtin_names(),
        ));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| CoverageNavigatorError::schema_read_failed(path, e))?;
    let mut description: Value = serde_json::from_str(&content)
        .map_err(|e| CoverageNavigatorError::schema_parse_failed(path, e))?;
    fill_discriminant(&mut description, discriminant);
    let schema: Schema = serde_json::from_value(description)
        .map_err(|e| CoverageNavigatorError::schema_parse_failed(path, e))?;
    schema.check()?;
    Ok(schema)
}

/// Walk a schema description and give every union without a `discriminant`
/// the configured one. Literal values are left alone.
fn fill_discriminant(description: &mut Value, discriminant: &str) {
    let Some(node) = description.as_object_mut() else {
        return;
    };

    match node.get("type").and_then(Value::as_str) {
        Some("nullable") => {
            if let Some(inner) = node.get_mut("inner") {
                fill_discriminant(inner, discriminant);
            }
        }
        Some("array") => {
            if let Some(items) = node.get_mut("items") {
                fill_discriminant(items, discriminant);
            }
        }
        Some("object") => fill_fields(node.get_mut("fields"), discriminant),
        Some("union") => {
            node.entry("discriminant")
                .or_insert_with(|| Value::String(discriminant.to_string()));
            if let Some(Value::Array(arms)) = node.get_mut("arms") {
                for arm in arms {
                    fill_fields(arm.get_mut("fields"), discriminant);
                }
            }
        }
        _ => {}
    }
}

fn fill_fields(fields: Option<&mut Value>, discriminant: &str) {
    if let Some(Value::Array(fields)) = fields {
        for field in fields {
            if let Some(schema) = field.get_mut("schema") {
                fill_discriminant(schema, discriminant);
            }
        }
    }
}

/// `owner.repository` wrapped around the arms every repository query shares
fn owner_repository(discriminant: &str, repository_fields: Vec<Field>) -> Schema {
    Schema::object([Field::required(
        "owner",
        Schema::nullable(Schema::object([Field::required(
            "repository",
            Schema::union_on(discriminant, [
                UnionArm::new("Repository", repository_fields),
                UnionArm::new("NotFoundError", [Field::required("message", Schema::String)]),
                UnionArm::new(
                    "OwnerNotActivatedError",
                    [Field::required("message", Schema::String)],
                ),
            ]),
        )])),
    )])
}

pub fn repo_overview_schema(discriminant: &str) -> Schema {
    owner_repository(discriminant, vec![
        Field::required("private", Schema::Boolean),
        Field::required("defaultBranch", Schema::nullable(Schema::String)),
        Field::optional("oldestCommitAt", Schema::nullable(Schema::String)),
        Field::optional("coverageEnabled", Schema::nullable(Schema::Boolean)),
        Field::optional("bundleAnalysisEnabled", Schema::nullable(Schema::Boolean)),
        Field::optional(
            "languages",
            Schema::nullable(Schema::array(Schema::String)),
        ),
    ])
}

pub fn commit_schema(discriminant: &str) -> Schema {
    let totals = Schema::object([Field::required("coverage", Schema::nullable(Schema::Number))]);
    let commit = Schema::object([
        Field::required("commitid", Schema::String),
        Field::optional("branchName", Schema::nullable(Schema::String)),
        Field::optional("state", Schema::nullable(Schema::String)),
        Field::optional("totals", Schema::nullable(totals)),
    ]);
    owner_repository(discriminant, vec![Field::required("commit", Schema::nullable(commit))])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerQuery<T> {
    pub owner: Option<OwnerRepository<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRepository<T> {
    pub repository: RepositoryResult<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum RepositoryResult<T> {
    Repository(T),
    NotFoundError { message: String },
    OwnerNotActivatedError { message: String },
}

impl<T> OwnerQuery<T> {
    /// The repository arm, if the owner exists and the repository resolved
    pub fn into_repository(self) -> Option<T> {
        match self.owner?.repository {
            RepositoryResult::Repository(repository) => Some(repository),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoOverview {
    pub private: bool,
    pub default_branch: Option<String>,
    #[serde(default)]
    pub oldest_commit_at: Option<String>,
    #[serde(default)]
    pub coverage_enabled: Option<bool>,
    #[serde(default)]
    pub bundle_analysis_enabled: Option<bool>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRepository {
    pub commit: Option<Commit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub commitid: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub totals: Option<CommitTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitTotals {
    pub coverage: Option<f64>,
}
