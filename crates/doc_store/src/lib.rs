//! Doc Store - markdown persistence for the document model
//!
//! This crate reads and writes documents in a markdown dialect that carries
//! structural metadata in HTML comments, hydrates them into the live
//! [`doc_model`] tree and keeps them in a [`DocumentRegistry`] that writes
//! every change back through a pluggable [`StorageBackend`].

pub mod markdown;
mod hydrate;
mod document_key;
mod backend;
mod file_io;
mod memory_backend;
mod index;
mod registry;
mod settings;
mod error;

pub use hydrate::*;
pub use document_key::*;
pub use backend::*;
pub use file_io::*;
pub use memory_backend::*;
pub use index::*;
pub use registry::*;
pub use settings::*;
pub use error::*;

pub use markdown::{parse_markdown, serialize_markdown, ParseReport, ParseWarning, RawDocument};
