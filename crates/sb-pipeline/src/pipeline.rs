//! Pipeline orchestration
//!
//! Drives one extraction run: load the document, snapshot the schema names,
//! then transform and write each schema before moving to the next.

use crate::{Error, ExtractConfig, Result, SchemaWriter};
use sb_schema::{DocumentLoader, SchemaTransformer};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Statistics for one run
#[derive(Debug, Default, Clone)]
pub struct PipelineStats {
    /// Schema files written
    pub schemas_written: usize,
    /// `$ref` values rewritten across all schemas
    pub refs_rewritten: usize,
    /// Written files, in document order
    pub files: Vec<PathBuf>,
    /// Total processing time
    pub duration: Duration,
}

/// Extraction pipeline for one OpenAPI document
#[derive(Debug)]
pub struct Pipeline {
    config: ExtractConfig,
    loader: DocumentLoader,
}

impl Pipeline {
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            loader: DocumentLoader::new(),
        }
    }

    /// Extract every schema of the configured document
    pub fn run(&self) -> Result<PipelineStats> {
        let start = Instant::now();
        let mut stats = PipelineStats::default();

        info!("Reading {}", self.config.schema_file().display());
        let document = self.loader.load_from_file(self.config.schema_file())?;
        let entries = document.schema_entries()?;

        let writer = SchemaWriter::new(self.config.out_dir());
        let mut seen = HashSet::with_capacity(entries.len());
        for (name, _) in &entries {
            writer.path_for(name)?;
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateSchemaName(name.clone()));
            }
        }

        let transformer = SchemaTransformer::for_document(
            self.config.header().clone(),
            self.config.project(),
            &document,
            self.config.ref_style(),
        );
        match transformer.version() {
            Some(version) => debug!("Document version: {}", version),
            None => debug!("Document has no info.version"),
        }

        for (name, schema) in entries {
            let transformed = transformer.transform(&name, schema);
            let path = writer.write(&transformed)?;
            info!("{}", transformed.file_name());

            stats.schemas_written += 1;
            stats.refs_rewritten += transformed.rewritten_refs;
            stats.files.push(path);
        }

        stats.duration = start.elapsed();
        info!(
            "Extracted {} schema(s) into {} ({} reference(s) rewritten, {:?})",
            stats.schemas_written,
            self.config.out_dir().display(),
            stats.refs_rewritten,
            stats.duration
        );

        Ok(stats)
    }
}
