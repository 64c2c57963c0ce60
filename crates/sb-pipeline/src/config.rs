//! Extraction configuration
//!
//! Settings arrive from a YAML config file, from command-line flags, or
//! both. They are collected into a [`ConfigFile`] where every field is
//! optional, then validated once by [`ConfigFile::resolve`] into an immutable
//! [`ExtractConfig`].

use crate::{Error, Result};
use sb_schema::{DocumentLoader, Header, RefStyle};
use serde::Deserialize;
use serde_yaml::Mapping;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the metadata header comes from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HeaderSource {
    /// Path to a header YAML file
    Path(PathBuf),
    /// Header fields given inline in the config file
    Inline(Mapping),
}

/// Raw, unvalidated settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    /// OpenAPI input document
    pub schemafile: Option<PathBuf>,
    /// Directory receiving one file per schema
    pub outdir: Option<PathBuf>,
    /// Project identifier substituted for `__project__`
    pub project: Option<String>,
    pub header: Option<HeaderSource>,
    pub ref_style: Option<RefStyle>,
}

impl ConfigFile {
    /// Read a config file
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("{} ({})", e, path.display())))
    }

    /// Parse config YAML; blank input gives an empty config
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("YAML parse error: {}", e)))
    }

    /// Directory relative paths of a config file are resolved against
    pub fn base_dir_of(path: &Path) -> PathBuf {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win
    pub fn overlay(self, overrides: ConfigFile) -> Self {
        Self {
            schemafile: overrides.schemafile.or(self.schemafile),
            outdir: overrides.outdir.or(self.outdir),
            project: overrides.project.or(self.project),
            header: overrides.header.or(self.header),
            ref_style: overrides.ref_style.or(self.ref_style),
        }
    }

    /// Validate the settings and load the header.
    ///
    /// Relative paths are joined onto `base_dir`. Fails when a required key
    /// is missing, the output directory does not exist or the input file
    /// does not exist.
    pub fn resolve(self, base_dir: &Path) -> Result<ExtractConfig> {
        let schema_file = self.schemafile.ok_or(Error::MissingKey("schemafile"))?;
        let out_dir = self.outdir.ok_or(Error::MissingKey("outdir"))?;
        let project = self
            .project
            .filter(|p| !p.trim().is_empty())
            .ok_or(Error::MissingKey("project"))?;

        let out_dir = base_dir.join(out_dir);
        if !out_dir.is_dir() {
            return Err(Error::OutputDirNotFound(out_dir));
        }

        let schema_file = base_dir.join(schema_file);
        if !schema_file.is_file() {
            return Err(Error::InputNotFound(schema_file));
        }

        let header = match self.header {
            Some(HeaderSource::Path(path)) => {
                DocumentLoader::new().load_header(&base_dir.join(path))?
            }
            Some(HeaderSource::Inline(fields)) => Header::new(fields),
            None => {
                warn!("No header provided; schemas will only carry title and version");
                Header::default()
            }
        };

        Ok(ExtractConfig {
            schema_file,
            out_dir,
            project,
            header,
            ref_style: self.ref_style.unwrap_or_default(),
        })
    }
}

/// Validated settings for one extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    schema_file: PathBuf,
    out_dir: PathBuf,
    project: String,
    header: Header,
    ref_style: RefStyle,
}

impl ExtractConfig {
    pub fn schema_file(&self) -> &Path {
        &self.schema_file
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn ref_style(&self) -> RefStyle {
        self.ref_style
    }
}
