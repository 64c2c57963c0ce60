#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # sb-schema
//!
//! Schema loading and transformation for SchemaBlocks extraction.
//!
//! This crate turns the entries of an OpenAPI document's
//! `components.schemas` map into standalone schema documents:
//! metadata header fields are merged in front, the `$id` template is
//! resolved, and internal `$ref` pointers are rewritten to address sibling
//! files instead of the source document.

pub mod header;
pub mod loader;
pub mod model;
pub mod refs;
pub mod template;
pub mod transform;

pub use header::Header;
pub use loader::DocumentLoader;
pub use model::OpenApiDocument;
pub use refs::{RefStyle, rewrite_ref, rewrite_refs};
pub use template::TemplateContext;
pub use transform::{SchemaTransformer, TransformedSchema};

use thiserror::Error;

/// Errors that can occur when loading or transforming schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    #[error("Document has no components.schemas mapping")]
    MissingSchemas,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

pub type Result<T> = std::result::Result<T, Error>;
