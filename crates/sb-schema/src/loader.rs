//! Document and header loading

use crate::header::Header;
use crate::model::OpenApiDocument;
use crate::{Error, Result};
use serde_yaml::Value;
use std::path::Path;
use tracing::trace;

/// Loads OpenAPI documents and metadata headers from YAML or JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load an OpenAPI document from a file.
    /// `.json` files are read as JSON, anything else as YAML.
    pub fn load_from_file(&self, path: &Path) -> Result<OpenApiDocument> {
        trace!("Loading OpenAPI document from file: {:?}", path);
        let content = read_file(path)?;

        if is_json(path) {
            self.load_from_json(&content)
        } else {
            self.load_from_yaml(&content)
        }
    }

    /// Load an OpenAPI document from a YAML string
    pub fn load_from_yaml(&self, yaml: &str) -> Result<OpenApiDocument> {
        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {}", e)))?;
        OpenApiDocument::from_value(value)
    }

    /// Load an OpenAPI document from a JSON string
    pub fn load_from_json(&self, json: &str) -> Result<OpenApiDocument> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {}", e)))?;
        OpenApiDocument::from_value(value)
    }

    /// Load a metadata header document from a YAML file
    pub fn load_header(&self, path: &Path) -> Result<Header> {
        trace!("Loading header from file: {:?}", path);
        let content = read_file(path)?;
        self.load_header_from_yaml(&content)
    }

    /// Load a metadata header from a YAML string; blank input is an empty header
    pub fn load_header_from_yaml(&self, yaml: &str) -> Result<Header> {
        if yaml.trim().is_empty() {
            return Ok(Header::default());
        }
        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidHeader(format!("YAML parse error: {}", e)))?;
        Header::from_value(value)
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
