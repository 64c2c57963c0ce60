//! Output of standalone schema documents

use crate::{Error, Result};
use sb_schema::TransformedSchema;
use std::path::PathBuf;
use tracing::trace;

/// Writes transformed schemas as `<name>.yaml` into one directory
#[derive(Debug, Clone)]
pub struct SchemaWriter {
    out_dir: PathBuf,
}

impl SchemaWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Output path for a schema name; rejects names that are not plain file names
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(Error::InvalidSchemaName(name.to_string()));
        }
        Ok(self.out_dir.join(format!("{name}.yaml")))
    }

    /// Serialize and write one schema, returning the written path.
    ///
    /// The file is only opened once the document is fully serialized.
    pub fn write(&self, schema: &TransformedSchema) -> Result<PathBuf> {
        let path = self.path_for(&schema.name)?;
        let yaml = serde_yaml::to_string(&schema.document)
            .map_err(|e| Error::Serialize(format!("schema '{}': {}", schema.name, e)))?;

        trace!("Writing {} bytes to {:?}", yaml.len(), path);
        std::fs::write(&path, yaml)
            .map_err(|e| Error::io("write", path.display().to_string(), e.to_string()))?;

        Ok(path)
    }
}
