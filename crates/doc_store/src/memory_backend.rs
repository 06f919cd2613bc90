//! In-memory storage backend
//!
//! Keeps files in a map and answers exactly like a filesystem tool would,
//! including `Error:` sentinel responses. Writes can be made to fail on
//! demand, which is what the store's persistence tests rely on.

use crate::backend::{format_listing, DirEntry, EntryKind, StorageBackend, StorageError, StorageResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tree {
    files: BTreeMap<String, String>,
    directories: BTreeSet<String>,
}

/// In-memory implementation of [`StorageBackend`]
#[derive(Default)]
pub struct MemoryBackend {
    tree: RwLock<Tree>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(index) => &path[..index],
        None => "",
    }
}

fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a file
    pub fn with_file(self, path: &str, content: impl Into<String>) -> Self {
        if let Ok(mut tree) = self.tree.write() {
            tree.files.insert(normalize(path), content.into());
        }
        self
    }

    /// Current content of a file
    pub fn file(&self, path: &str) -> Option<String> {
        self.tree.read().ok()?.files.get(&normalize(path)).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.tree.read().map(|tree| tree.files.len()).unwrap_or(0)
    }

    /// Make subsequent writes answer with an error sentinel
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read_tree(&self) -> StorageResult<RwLockReadGuard<'_, Tree>> {
        self.tree
            .read()
            .map_err(|_| StorageError::Internal("memory backend lock poisoned".into()))
    }

    fn write_tree(&self) -> StorageResult<RwLockWriteGuard<'_, Tree>> {
        self.tree
            .write()
            .map_err(|_| StorageError::Internal("memory backend lock poisoned".into()))
    }
}

impl StorageBackend for MemoryBackend {
    async fn read_text(&self, path: &str) -> StorageResult<String> {
        let tree = self.read_tree()?;
        Ok(match tree.files.get(&normalize(path)) {
            Some(content) => content.clone(),
            None => format!("Error: ENOENT: no such file or directory, open '{}'", path),
        })
    }

    async fn write_text(&self, path: &str, content: &str) -> StorageResult<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Ok(format!("Error: EACCES: permission denied, open '{}'", path));
        }
        let mut tree = self.write_tree()?;
        tree.files.insert(normalize(path), content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Successfully wrote to {}", path))
    }

    async fn create_directory(&self, path: &str) -> StorageResult<String> {
        let mut tree = self.write_tree()?;
        let mut current = normalize(path);
        while !current.is_empty() && current != "/" {
            let parent = parent_of(&current).to_string();
            tree.directories.insert(current);
            current = parent;
        }
        Ok(format!("Successfully created directory {}", path))
    }

    async fn list_directory(&self, path: &str) -> StorageResult<String> {
        let tree = self.read_tree()?;
        let dir = normalize(path);
        let known = dir == "/"
            || tree.directories.contains(&dir)
            || tree.files.keys().any(|file| parent_of(file) == dir);
        if !known {
            return Ok(format!("Error: ENOENT: no such file or directory, scandir '{}'", path));
        }

        let mut entries: Vec<DirEntry> = tree
            .directories
            .iter()
            .filter(|d| parent_of(d) == dir)
            .map(|d| DirEntry {
                name: name_of(d).to_string(),
                kind: EntryKind::Directory,
            })
            .collect();
        entries.extend(
            tree.files
                .keys()
                .filter(|f| parent_of(f) == dir)
                .map(|f| DirEntry {
                    name: name_of(f).to_string(),
                    kind: EntryKind::File,
                }),
        );
        Ok(format_listing(&entries))
    }

    async fn delete_file(&self, path: &str) -> StorageResult<String> {
        let mut tree = self.write_tree()?;
        Ok(match tree.files.remove(&normalize(path)) {
            Some(_) => format!("Successfully deleted {}", path),
            None => format!("Error: ENOENT: no such file or directory, unlink '{}'", path),
        })
    }

    async fn delete_directory(&self, path: &str) -> StorageResult<String> {
        let mut tree = self.write_tree()?;
        let dir = normalize(path);
        let prefix = format!("{}/", dir);
        tree.directories.retain(|d| d != &dir && !d.starts_with(&prefix));
        tree.files.retain(|f, _| !f.starts_with(&prefix));
        Ok(format!("Successfully deleted directory {}", path))
    }
}
