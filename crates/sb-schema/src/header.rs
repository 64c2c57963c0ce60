//! Metadata header merge
//!
//! A header is an ordered block of fields (`$schema`, `$id`, `$comment`, ...)
//! placed in front of every extracted schema. The merged key order is built
//! explicitly:
//!
//! 1. header fields, in header order
//! 2. `version`, when the source document declares one
//! 3. `title`, set to the schema name
//! 4. the schema's own keys, in their original order
//!
//! A schema key that collides with an injected key is dropped; the injected
//! value wins and stays at its injected position.

use crate::model::{VERSION_KEY, value_kind};
use crate::{Error, Result};
use serde_yaml::{Mapping, Value};

pub const TITLE_KEY: &str = "title";
pub const ID_KEY: &str = "$id";

/// Ordered metadata fields merged into every extracted schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    fields: Mapping,
}

impl Header {
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    /// Build a header from a parsed YAML value; null means an empty header
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(fields) => Ok(Self::new(fields)),
            Value::Null => Ok(Self::default()),
            other => Err(Error::InvalidHeader(format!(
                "header must be a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    pub fn fields(&self) -> &Mapping {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge this header, the optional document version and the schema name
    /// into `schema`, returning the reordered mapping.
    pub fn merge_into(&self, schema: Mapping, name: &str, version: Option<&str>) -> Mapping {
        let mut merged = Mapping::with_capacity(self.fields.len() + schema.len() + 2);

        for (key, value) in &self.fields {
            if is_derived_key(key, version.is_some()) {
                continue;
            }
            merged.insert(key.clone(), value.clone());
        }

        if let Some(version) = version {
            merged.insert(Value::from(VERSION_KEY), Value::from(version));
        }
        merged.insert(Value::from(TITLE_KEY), Value::from(name));

        for (key, value) in schema {
            if !merged.contains_key(&key) {
                merged.insert(key, value);
            }
        }

        merged
    }
}

impl From<Mapping> for Header {
    fn from(fields: Mapping) -> Self {
        Self::new(fields)
    }
}

// Header entries superseded by the per-schema derived fields
fn is_derived_key(key: &Value, has_version: bool) -> bool {
    match key.as_str() {
        Some(TITLE_KEY) => true,
        Some(VERSION_KEY) => has_version,
        _ => false,
    }
}
