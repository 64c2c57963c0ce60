//! OpenAPI document model
//!
//! The document is kept as an ordered YAML tree rather than a typed OpenAPI
//! model, so every keyword survives extraction with its original position.

use crate::{Error, Result};
use serde_yaml::{Mapping, Value};
use tracing::warn;

pub const INFO_KEY: &str = "info";
pub const VERSION_KEY: &str = "version";
pub const COMPONENTS_KEY: &str = "components";
pub const SCHEMAS_KEY: &str = "schemas";

/// A parsed OpenAPI document
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    root: Mapping,
}

impl OpenApiDocument {
    /// Wrap an already parsed root mapping
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    /// Build a document from any YAML value; the root must be a mapping
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(root) => Ok(Self::new(root)),
            Value::Null => Err(Error::InvalidFormat("document is empty".to_string())),
            other => Err(Error::InvalidFormat(format!(
                "document root must be a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// `info.version` rendered as text, if present.
    ///
    /// An unquoted float such as `1.10` has already lost its source text
    /// when parsed and renders as `1.1`.
    pub fn version(&self) -> Option<String> {
        let version = self.root.get(INFO_KEY)?.get(VERSION_KEY)?;
        let rendered = scalar_to_string(version)?;

        if let Value::Number(n) = version {
            if n.is_f64() {
                warn!(
                    "info.version is an unquoted number; rendered as '{}', which may differ from the source text",
                    rendered
                );
            }
        }

        Some(rendered)
    }

    /// The `components.schemas` mapping
    pub fn schemas(&self) -> Result<&Mapping> {
        self.root
            .get(COMPONENTS_KEY)
            .and_then(|components| components.get(SCHEMAS_KEY))
            .and_then(Value::as_mapping)
            .ok_or(Error::MissingSchemas)
    }

    /// Schema names in document order
    pub fn schema_names(&self) -> Result<Vec<String>> {
        Ok(self
            .schema_entries()?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// Snapshot of every `(name, schema)` pair in document order.
    ///
    /// The snapshot is taken up front so callers can transform each schema
    /// without touching the source mapping while iterating it.
    pub fn schema_entries(&self) -> Result<Vec<(String, Value)>> {
        let schemas = self.schemas()?;
        let mut entries = Vec::with_capacity(schemas.len());

        for (key, schema) in schemas {
            match scalar_to_string(key) {
                Some(name) => entries.push((name, schema.clone())),
                None => warn!(
                    "Skipping schema with non-scalar name ({})",
                    value_kind(key)
                ),
            }
        }

        Ok(entries)
    }
}

/// Render a scalar YAML value as text; `None` for null, sequences, mappings and tags
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
