#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # sb-pipeline
//!
//! Configuration, orchestration and output for SchemaBlocks extraction.
//!
//! The pipeline loads one OpenAPI document, transforms each entry of
//! `components.schemas` and writes it to `<name>.yaml` in the output
//! directory. Schemas are processed one at a time, in document order.

pub mod config;
pub mod pipeline;
pub mod writer;

pub use config::{ConfigFile, ExtractConfig, HeaderSource};
pub use pipeline::{Pipeline, PipelineStats};
pub use writer::SchemaWriter;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or running the pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No '{0}' parameter has been provided")]
    MissingKey(&'static str),

    #[error("The output directory {} does not exist", .0.display())]
    OutputDirNotFound(PathBuf),

    #[error("The input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid schema name '{0}': names must be usable as file names")]
    InvalidSchemaName(String),

    #[error("Schema name '{0}' appears more than once in components.schemas")]
    DuplicateSchemaName(String),

    #[error("IO error during {operation} for '{path}': {message}")]
    Io {
        operation: String,
        path: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Schema(#[from] sb_schema::Error),
}

impl Error {
    /// Create a structured I/O error with operation/path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
