//! Structural schema descriptions and the matcher that checks JSON against them.
//!
//! A [`Schema`] describes the shape a decoded API response must have. Matching a
//! value produces a *projected* copy that only keeps declared fields, plus the
//! list of discriminated-union arms that were selected along the way. Mismatches
//! are reported as a [`SchemaMismatch`] carrying a JSON path.
//!
//! # Public API
//! - [`Schema`]: The schema tree (primitives, objects, arrays, discriminated unions)
//! - [`Field`], [`ObjectSchema`], [`UnionSchema`], [`UnionArm`]: Building blocks
//! - [`Matched`], [`ResolvedArm`]: Result of a successful match
//! - [`SchemaMismatch`]: Why a value did not match
//!
//! Schemas deserialize from JSON (`{"type": "object", "fields": [...]}`) so that
//! descriptions can live in files next to the queries that use them.

use crate::core::error::{CoverageNavigatorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Discriminant field used by the remote GraphQL API
pub const DEFAULT_DISCRIMINANT: &str = "__typename";

fn default_discriminant() -> String {
    DEFAULT_DISCRIMINANT.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    Any,
    Null,
    Boolean,
    Number,
    Integer,
    String,
    Literal { value: Value },
    Nullable { inner: Box<Schema> },
    Array { items: Box<Schema> },
    Object(ObjectSchema),
    Union(UnionSchema),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    #[serde(default)]
    pub optional: bool,
}

/// An object whose `discriminant` field selects one of `arms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionSchema {
    #[serde(default = "default_discriminant")]
    pub discriminant: String,
    pub arms: Vec<UnionArm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionArm {
    pub tag: String,
    #[serde(flatten)]
    pub shape: ObjectSchema,
}

/// A union arm picked while matching, with the JSON path of the union value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArm {
    pub path: String,
    pub tag: String,
}

/// Successful match: the projected value and the union arms selected
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub value: Value,
    pub arms: Vec<ResolvedArm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMismatch {
    pub path: String,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path, self.expected, self.found
        )
    }
}

impl Field {
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            optional: true,
        }
    }
}

impl UnionArm {
    pub fn new(tag: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            tag: tag.into(),
            shape: ObjectSchema {
                fields: fields.into_iter().collect(),
            },
        }
    }
}

impl Schema {
    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Schema::Object(ObjectSchema {
            fields: fields.into_iter().collect(),
        })
    }

    /// Union keyed on the default `__typename` discriminant
    pub fn union(arms: impl IntoIterator<Item = UnionArm>) -> Self {
        Schema::union_on(DEFAULT_DISCRIMINANT, arms)
    }

    pub fn union_on(discriminant: impl Into<String>, arms: impl IntoIterator<Item = UnionArm>) -> Self {
        Schema::Union(UnionSchema {
            discriminant: discriminant.into(),
            arms: arms.into_iter().collect(),
        })
    }

    pub fn nullable(inner: Schema) -> Self {
        Schema::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Schema::Literal {
            value: value.into(),
        }
    }

    /// Check that the description itself is well formed.
    ///
    /// A failure here is a defect in the schema, not in the response being
    /// validated, and is reported as [`CoverageNavigatorError::MalformedSchema`].
    pub fn check(&self) -> Result<()> {
        self.check_at("$")
    }

    fn check_at(&self, path: &str) -> Result<()> {
        match self {
            Schema::Nullable { inner } => inner.check_at(path),
            Schema::Array { items } => items.check_at(&format!("{path}[]")),
            Schema::Object(object) => object.check_at(path),
            Schema::Union(union) => {
                if union.discriminant.is_empty() {
                    return Err(CoverageNavigatorError::malformed_schema(
                        path,
                        "union discriminant name is empty",
                    ));
                }
                if union.arms.is_empty() {
                    return Err(CoverageNavigatorError::malformed_schema(
                        path,
                        "union has no arms",
                    ));
                }

                let mut tags = HashSet::new();
                for arm in &union.arms {
                    if !tags.insert(arm.tag.as_str()) {
                        return Err(CoverageNavigatorError::malformed_schema(
                            path,
                            format!("duplicate union arm '{}'", arm.tag),
                        ));
                    }

                    let redeclared = arm
                        .shape
                        .fields
                        .iter()
                        .find(|field| field.name == union.discriminant);
                    if let Some(field) = redeclared {
                        let compatible = match &field.schema {
                            Schema::String | Schema::Any => true,
                            Schema::Literal { value } => value.as_str() == Some(arm.tag.as_str()),
                            _ => false,
                        };
                        if !compatible {
                            return Err(CoverageNavigatorError::malformed_schema(
                                format!("{path}<{}>", arm.tag),
                                format!(
                                    "arm redeclares discriminant '{}' incompatibly",
                                    union.discriminant
                                ),
                            ));
                        }
                    }

                    arm.shape.check_at(&format!("{path}<{}>", arm.tag))?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Match `value` against this schema.
    ///
    /// Unknown object fields are dropped from the projected value; union values
    /// keep their discriminant.
    pub fn matches(&self, value: &Value) -> std::result::Result<Matched, SchemaMismatch> {
        let mut arms = Vec::new();
        let value = self.project(value, "$", &mut arms)?;
        Ok(Matched { value, arms })
    }

    fn project(
        &self,
        value: &Value,
        path: &str,
        arms: &mut Vec<ResolvedArm>,
    ) -> std::result::Result<Value, SchemaMismatch> {
        match self {
            Schema::Any => Ok(value.clone()),
            Schema::Null if value.is_null() => Ok(Value::Null),
            Schema::Boolean if value.is_boolean() => Ok(value.clone()),
            Schema::Number if value.is_number() => Ok(value.clone()),
            Schema::Integer if value.is_i64() || value.is_u64() => Ok(value.clone()),
            Schema::String if value.is_string() => Ok(value.clone()),
            Schema::Literal { value: expected } => {
                if value == expected {
                    Ok(value.clone())
                } else {
                    Err(mismatch(path, format!("literal {expected}"), describe(value)))
                }
            }
            Schema::Nullable { inner } => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    inner.project(value, path, arms)
                }
            }
            Schema::Array { items } => {
                let elements = value
                    .as_array()
                    .ok_or_else(|| mismatch(path, "array", describe(value)))?;
                elements
                    .iter()
                    .enumerate()
                    .map(|(i, element)| items.project(element, &format!("{path}[{i}]"), arms))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            Schema::Object(object) => {
                let map = value
                    .as_object()
                    .ok_or_else(|| mismatch(path, "object", describe(value)))?;
                object.project(map, Map::new(), path, arms).map(Value::Object)
            }
            Schema::Union(union) => union.project(value, path, arms),
            primitive => Err(mismatch(path, primitive.type_name(), describe(value))),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Schema::Any => "any",
            Schema::Null => "null",
            Schema::Boolean => "boolean",
            Schema::Number => "number",
            Schema::Integer => "integer",
            Schema::String => "string",
            Schema::Literal { .. } => "literal",
            Schema::Nullable { .. } => "nullable",
            Schema::Array { .. } => "array",
            Schema::Object(_) => "object",
            Schema::Union(_) => "union",
        }
    }
}

impl ObjectSchema {
    fn check_at(&self, path: &str) -> Result<()> {
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(CoverageNavigatorError::malformed_schema(
                    path,
                    format!("duplicate field '{}'", field.name),
                ));
            }
            field.schema.check_at(&format!("{path}.{}", field.name))?;
        }
        Ok(())
    }

    fn project(
        &self,
        map: &Map<String, Value>,
        mut out: Map<String, Value>,
        path: &str,
        arms: &mut Vec<ResolvedArm>,
    ) -> std::result::Result<Map<String, Value>, SchemaMismatch> {
        for field in &self.fields {
            let field_path = format!("{path}.{}", field.name);
            match map.get(&field.name) {
                Some(value) => {
                    let projected = field.schema.project(value, &field_path, arms)?;
                    out.insert(field.name.clone(), projected);
                }
                None if field.optional => {}
                None => {
                    return Err(mismatch(
                        &field_path,
                        field.schema.type_name(),
                        "missing required field",
                    ))
                }
            }
        }
        Ok(out)
    }
}

impl UnionSchema {
    fn project(
        &self,
        value: &Value,
        path: &str,
        arms: &mut Vec<ResolvedArm>,
    ) -> std::result::Result<Value, SchemaMismatch> {
        let map = value
            .as_object()
            .ok_or_else(|| mismatch(path, "object", describe(value)))?;

        let tag_path = format!("{path}.{}", self.discriminant);
        let tag = match map.get(&self.discriminant) {
            Some(Value::String(tag)) => tag,
            Some(other) => return Err(mismatch(&tag_path, "string discriminant", describe(other))),
            None => {
                return Err(mismatch(
                    &tag_path,
                    "string discriminant",
                    "missing required field",
                ))
            }
        };

        let arm = self.arms.iter().find(|arm| &arm.tag == tag).ok_or_else(|| {
            let known: Vec<&str> = self.arms.iter().map(|arm| arm.tag.as_str()).collect();
            mismatch(
                &tag_path,
                format!("one of [{}]", known.join(", ")),
                format!("\"{tag}\""),
            )
        })?;

        arms.push(ResolvedArm {
            path: path.to_string(),
            tag: tag.clone(),
        });

        let mut out = Map::new();
        out.insert(self.discriminant.clone(), Value::String(tag.clone()));
        arm.shape.project(map, out, path, arms).map(Value::Object)
    }
}

fn mismatch(path: &str, expected: impl Into<String>, found: impl Into<String>) -> SchemaMismatch {
    SchemaMismatch {
        path: path.to_string(),
        expected: expected.into(),
        found: found.into(),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
