//! Document-level registry operations

use super::DocumentRegistry;
use crate::document_key::resolve_path;
use crate::backend::{
    is_missing_file, parse_listing, sentinel_message, DirEntry, StorageBackend, StorageError,
};
use crate::hydrate;
use crate::markdown::{self, RawDocument};
use crate::{Result, StoreError};
use doc_model::{Comments, Document, DocumentMetadata, DocumentSummary, NodeId, ScopedVariable};
use serde_json::{Map, Value};

/// Initial values for [`DocumentRegistry::create`]
#[derive(Debug, Clone, Default)]
pub struct DocumentOverrides {
    pub id: Option<NodeId>,
    pub title: Option<String>,
    pub info_text: Option<String>,
}

/// Fields [`DocumentRegistry::update_document`] may change; `None` keeps the
/// current value
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub info_text: Option<String>,
    pub commands: Option<Vec<Value>>,
    pub comments: Option<Comments>,
}

impl<B: StorageBackend> DocumentRegistry<B> {
    /// Read, parse and hydrate a document, replacing any cached copy
    pub async fn load(&mut self, document: &str) -> Result<&Document> {
        let path = &resolve_path(document)?;
        let text = self.fetch_text(path).await?;
        tracing::debug!("Loaded {} ({} bytes)", path, text.len());

        let report = markdown::parse_markdown(&text);
        for warning in &report.warnings {
            tracing::warn!("{}: {}", path, warning);
        }
        let document = hydrate::hydrate_with(report.document, path, &self.settings.hydrate_options());
        self.cache(document);
        self.cached(path)
    }

    /// Discard the cached copy and load again
    pub async fn reload(&mut self, document: &str) -> Result<&Document> {
        self.load(document).await
    }

    /// Cached document, loading it on a miss
    pub async fn get(&mut self, document: &str) -> Result<&Document> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        self.cached(path)
    }

    /// Selected top-level fields of a document, by their serialized
    /// (camelCase) names
    pub async fn document_fields(
        &mut self,
        document: &str,
        fields: &[&str],
    ) -> Result<Map<String, Value>> {
        let value = serde_json::to_value(self.get(document).await?)?;
        let Some(object) = value.as_object() else {
            return Ok(Map::new());
        };
        fields
            .iter()
            .map(|field| {
                object
                    .get(*field)
                    .cloned()
                    .map(|value| ((*field).to_string(), value))
                    .ok_or_else(|| StoreError::UnknownField((*field).to_string()))
            })
            .collect()
    }

    pub fn get_cached(&self, document: &str) -> Option<&Document> {
        self.documents.get(&resolve_path(document).ok()?)
    }

    /// Sync a cached document and write it back
    pub async fn save(&mut self, document: &str) -> Result<&Document> {
        let path = &resolve_path(document)?;
        let options = self.settings.write_options();
        let content = {
            let document = self.cached_mut(path)?;
            hydrate::sync(document);
            markdown::serialize_markdown_with(&hydrate::dehydrate(document), &options)
        };
        tracing::debug!("Saving {} ({} bytes)", path, content.len());
        self.persist_text(path, &content).await?;
        self.cached(path)
    }

    /// Create a new document with one default chapter and save it under
    /// exactly the given path.
    ///
    /// As on every load, the file name decides the title; `overrides.title`
    /// only applies to a path without one.
    pub async fn create(&mut self, document: &str, overrides: DocumentOverrides) -> Result<&Document> {
        let path = &resolve_path(document)?;
        let raw = RawDocument {
            id: overrides.id.clone(),
            metadata: DocumentMetadata {
                id: overrides.id,
                title: overrides.title,
                info_text: overrides.info_text,
                ..Default::default()
            },
            ..Default::default()
        };
        let document = hydrate::hydrate_with(raw, path, &self.settings.hydrate_options());
        tracing::info!("Creating document {} at {}", document.id, path);

        self.cache(document);
        self.save(path).await?;
        self.cached(path)
    }

    /// Truncate a document through the backend and forget it.
    ///
    /// Snapshots of the document are dropped with it.
    pub async fn delete_document(&mut self, document: &str) -> Result<()> {
        let path = &resolve_path(document)?;
        if !self.documents.contains_key(path) {
            self.fetch_text(path).await?;
        }
        self.persist_text(path, "").await?;
        self.uncache(path);
        self.snapshots.remove(path);
        tracing::info!("Deleted document {}", path);
        Ok(())
    }

    /// Drop a document from the cache without touching storage
    pub fn evict(&mut self, document: &str) -> Option<Document> {
        let path = resolve_path(document).ok()?;
        self.uncache(&path)
    }

    /// Summaries of every cached document, ordered by path
    pub fn list_documents(&self) -> Vec<DocumentSummary> {
        let mut summaries: Vec<DocumentSummary> =
            self.documents.values().map(Document::summary).collect();
        summaries.sort_by(|a, b| a.path.cmp(&b.path));
        summaries
    }

    pub async fn update_document(&mut self, document: &str, update: DocumentUpdate) -> Result<&Document> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        let document = self.cached_mut(path)?;
        if let Some(title) = update.title {
            document.title = title;
        }
        if let Some(info_text) = update.info_text {
            document.info_text = info_text;
        }
        if let Some(commands) = update.commands {
            document.annotations.commands = commands;
        }
        if let Some(comments) = update.comments {
            document.annotations.comments = comments;
        }
        self.save(path).await
    }

    pub async fn update_doc_id(&mut self, document: &str, id: NodeId) -> Result<&Document> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        self.cached_mut(path)?.id = id;
        self.save(path).await
    }

    /// Tasks of every chapter and paragraph, in document order
    pub async fn document_tasks(&mut self, document: &str) -> Result<Vec<Value>> {
        let path = &resolve_path(document)?;
        Ok(self.get(path).await?.tasks())
    }

    /// Variables of every paragraph with their owning ids
    pub async fn paragraph_variables(&mut self, document: &str) -> Result<Vec<ScopedVariable>> {
        let path = &resolve_path(document)?;
        Ok(self.get(path).await?.paragraph_variables())
    }

    pub async fn create_directory(&self, path: &str) -> Result<()> {
        let response = self.backend.create_directory(path).await?;
        if let Some(message) = sentinel_message(&response) {
            return Err(StoreError::Persist {
                path: path.to_string(),
                reason: message.to_string(),
            });
        }
        Ok(())
    }

    pub async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>> {
        let response = self.backend.list_directory(path).await?;
        match sentinel_message(&response) {
            None => Ok(parse_listing(&response)),
            Some(message) if is_missing_file(message) => Err(StoreError::NotFound(path.to_string())),
            Some(message) => Err(StorageError::Transport(message.to_string()).into()),
        }
    }
}
