//! Filesystem storage backend
//!
//! `FsBackend` serves a single workspace directory through tokio's
//! filesystem API. Storage paths are interpreted relative to that root
//! (`/book.md` and `book.md` are the same file) and may not escape it.
//! Failures are answered in-band with `Error:` sentinel text, the way a
//! filesystem tool server would.

use crate::backend::{format_listing, DirEntry, EntryKind, StorageBackend, StorageResult};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Workspace-rooted filesystem backend
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a storage path onto the filesystem, refusing to leave the root
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut resolved = self.root.clone();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => return None,
            }
        }
        Some(resolved)
    }
}

fn denied(path: &str) -> String {
    format!("Error: Access denied - path outside allowed directories: {}", path)
}

fn describe(err: &io::Error, action: &str, path: &str) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => {
            format!("Error: ENOENT: no such file or directory, {} '{}'", action, path)
        }
        io::ErrorKind::PermissionDenied => {
            format!("Error: EACCES: permission denied, {} '{}'", action, path)
        }
        _ => format!("Error: {}", err),
    }
}

impl StorageBackend for FsBackend {
    async fn read_text(&self, path: &str) -> StorageResult<String> {
        let Some(file) = self.resolve(path) else {
            return Ok(denied(path));
        };
        match tokio::fs::read_to_string(&file).await {
            Ok(content) => Ok(content),
            Err(err) => Ok(describe(&err, "open", path)),
        }
    }

    async fn write_text(&self, path: &str, content: &str) -> StorageResult<String> {
        let Some(file) = self.resolve(path) else {
            return Ok(denied(path));
        };
        if let Some(parent) = file.parent() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                return Ok(describe(&err, "mkdir", path));
            }
        }
        match tokio::fs::write(&file, content).await {
            Ok(()) => Ok(format!("Successfully wrote to {}", path)),
            Err(err) => Ok(describe(&err, "open", path)),
        }
    }

    async fn create_directory(&self, path: &str) -> StorageResult<String> {
        let Some(dir) = self.resolve(path) else {
            return Ok(denied(path));
        };
        match tokio::fs::create_dir_all(&dir).await {
            Ok(()) => Ok(format!("Successfully created directory {}", path)),
            Err(err) => Ok(describe(&err, "mkdir", path)),
        }
    }

    async fn list_directory(&self, path: &str) -> StorageResult<String> {
        let Some(dir) = self.resolve(path) else {
            return Ok(denied(path));
        };
        let mut reader = match tokio::fs::read_dir(&dir).await {
            Ok(reader) => reader,
            Err(err) => return Ok(describe(&err, "scandir", path)),
        };

        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let kind = if entry.file_type().await?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(format_listing(&entries))
    }

    async fn delete_file(&self, path: &str) -> StorageResult<String> {
        let Some(file) = self.resolve(path) else {
            return Ok(denied(path));
        };
        match tokio::fs::remove_file(&file).await {
            Ok(()) => Ok(format!("Successfully deleted {}", path)),
            Err(err) => Ok(describe(&err, "unlink", path)),
        }
    }

    async fn delete_directory(&self, path: &str) -> StorageResult<String> {
        let Some(dir) = self.resolve(path) else {
            return Ok(denied(path));
        };
        if dir == self.root {
            return Ok(denied(path));
        }
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(format!("Successfully deleted directory {}", path)),
            Err(err) => Ok(describe(&err, "rmdir", path)),
        }
    }
}
