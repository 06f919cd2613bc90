//! Document keys
//!
//! Every registry operation addresses a document either by its storage path
//! or by its key, the standard base64 encoding of that path. Paths always
//! start with `/`; the key of a UTF-8 path never does.

use crate::{Result, StoreError};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Key of the document stored at `path`
pub fn document_key(path: &str) -> String {
    STANDARD.encode(path.as_bytes())
}

/// Storage path for a path or a document key
pub fn resolve_path(reference: &str) -> Result<String> {
    if reference.starts_with('/') {
        return Ok(reference.to_string());
    }
    if reference.is_empty() {
        return Err(StoreError::InvalidDocumentKey(String::new()));
    }
    STANDARD
        .decode(reference)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| StoreError::InvalidDocumentKey(reference.to_string()))
}
