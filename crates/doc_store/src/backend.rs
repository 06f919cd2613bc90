//! Storage collaborator abstraction
//!
//! The store never touches storage directly. Every read, write and listing
//! goes through a [`StorageBackend`], which answers with the response text
//! of the underlying tool. A response beginning with [`ERROR_SENTINEL`] is a
//! failure reported in-band; a [`StorageError`] means the request itself
//! could not be carried out.

use thiserror::Error;

/// Prefix marking an in-band failure response
pub const ERROR_SENTINEL: &str = "Error:";

/// Errors raised by a backend when a request cannot be delivered
#[derive(Error, Debug)]
pub enum StorageError {
    /// The transport to the storage tool failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal backend error
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Result type for backend requests
pub type StorageResult<T> = Result<T, StorageError>;

/// Text-based storage collaborator.
///
/// Paths are passed through unchanged; interpretation is up to the
/// implementation. Every method answers with the tool's response text.
///
/// # Example
///
/// ```ignore
/// let backend = MemoryBackend::new();
/// backend.write_text("/book.md", "# Title\n").await?;
/// let text = backend.read_text("/book.md").await?;
/// ```
#[trait_variant::make(Send)]
pub trait StorageBackend: Send + Sync {
    /// Read a whole file as text
    async fn read_text(&self, path: &str) -> StorageResult<String>;

    /// Replace a file's content, creating it when missing
    async fn write_text(&self, path: &str, content: &str) -> StorageResult<String>;

    /// Create a directory and any missing parents
    async fn create_directory(&self, path: &str) -> StorageResult<String>;

    /// List a directory as `[DIR] name` / `[FILE] name` lines
    async fn list_directory(&self, path: &str) -> StorageResult<String>;

    async fn delete_file(&self, path: &str) -> StorageResult<String>;

    async fn delete_directory(&self, path: &str) -> StorageResult<String>;
}

/// Message of a sentinel response, or `None` for a regular response
pub fn sentinel_message(response: &str) -> Option<&str> {
    response.strip_prefix(ERROR_SENTINEL).map(str::trim)
}

/// Whether a sentinel message reports a missing file
pub fn is_missing_file(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("not found") || lower.contains("no such file") || lower.contains("enoent")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Render the entry as a listing line
    pub fn to_line(&self) -> String {
        match self.kind {
            EntryKind::Directory => format!("[DIR] {}", self.name),
            EntryKind::File => format!("[FILE] {}", self.name),
        }
    }
}

/// Parse a listing response. Lines in any other shape are skipped.
pub fn parse_listing(listing: &str) -> Vec<DirEntry> {
    listing
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (kind, name) = if let Some(name) = line.strip_prefix("[DIR]") {
                (EntryKind::Directory, name)
            } else if let Some(name) = line.strip_prefix("[FILE]") {
                (EntryKind::File, name)
            } else {
                return None;
            };
            let name = name.trim();
            (!name.is_empty()).then(|| DirEntry {
                name: name.to_string(),
                kind,
            })
        })
        .collect()
}

/// Render entries as a listing response
pub fn format_listing(entries: &[DirEntry]) -> String {
    entries
        .iter()
        .map(DirEntry::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_message() {
        assert_eq!(sentinel_message("Error: ENOENT: nope"), Some("ENOENT: nope"));
        assert_eq!(sentinel_message("# Error: not a sentinel"), None);
        assert_eq!(sentinel_message("Successfully wrote"), None);
    }

    #[test]
    fn test_missing_file_classification() {
        assert!(is_missing_file("ENOENT: no such file or directory, open '/a.md'"));
        assert!(is_missing_file("File not found"));
        assert!(!is_missing_file("Access denied - path outside allowed directories"));
    }

    #[test]
    fn test_parse_listing() {
        let entries = parse_listing("[DIR] drafts\n[FILE] book.md\n\nnoise\n[FILE]   \n");
        assert_eq!(
            entries,
            vec![
                DirEntry { name: "drafts".into(), kind: EntryKind::Directory },
                DirEntry { name: "book.md".into(), kind: EntryKind::File },
            ]
        );
        assert_eq!(format_listing(&entries), "[DIR] drafts\n[FILE] book.md");
    }
}
