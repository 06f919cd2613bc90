//! Document Model - the Document → Chapter → Paragraph hierarchy
//!
//! This crate provides the live in-memory model that the store hydrates from
//! markdown files: typed metadata records per node kind, comment threads,
//! variables, snapshots and the position bookkeeping shared by chapters and
//! paragraphs.

mod node;
mod node_id;
mod error;
mod comment;
mod variable;
mod metadata;
mod paragraph;
mod chapter;
mod document;
mod snapshot;
pub mod position;

pub use node::*;
pub use node_id::*;
pub use error::*;
pub use comment::*;
pub use variable::*;
pub use metadata::*;
pub use paragraph::*;
pub use chapter::*;
pub use document::*;
pub use snapshot::*;
