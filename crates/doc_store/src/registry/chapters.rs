//! Chapter operations

use super::DocumentRegistry;
use crate::document_key::resolve_path;
use crate::backend::StorageBackend;
use crate::{Result, StoreError};
use doc_model::{Chapter, Comments, NodeId, NodeKind};
use serde_json::Value;

/// Initial values for [`DocumentRegistry::add_chapter`]
#[derive(Debug, Clone, Default)]
pub struct NewChapter {
    pub title: Option<String>,
    pub commands: Option<Vec<Value>>,
    pub comments: Option<Comments>,
}

/// Fields [`DocumentRegistry::update_chapter`] may change
#[derive(Debug, Clone, Default)]
pub struct ChapterUpdate {
    /// New title; also becomes the heading text
    pub title: Option<String>,
    pub commands: Option<Vec<Value>>,
    pub comments: Option<Comments>,
}

impl ChapterUpdate {
    fn apply(self, chapter: &mut Chapter) {
        if let Some(title) = self.title {
            chapter.set_title(title);
        }
        if let Some(commands) = self.commands {
            chapter.annotations.commands = commands;
        }
        if let Some(comments) = self.comments {
            chapter.annotations.comments = comments;
        }
    }
}

fn chapter_nodes(chapter: &Chapter) -> Vec<(NodeId, NodeKind)> {
    std::iter::once((chapter.id.clone(), NodeKind::Chapter))
        .chain(
            chapter
                .paragraphs
                .iter()
                .map(|p| (p.id.clone(), NodeKind::Paragraph)),
        )
        .collect()
}

impl<B: StorageBackend> DocumentRegistry<B> {
    /// Add a chapter holding one empty paragraph.
    ///
    /// `position` is clamped into range; `None` appends.
    pub async fn add_chapter(
        &mut self,
        document: &str,
        new: NewChapter,
        position: Option<i64>,
    ) -> Result<Chapter> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;

        let title = new
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.settings.new_chapter_title.clone());
        let mut chapter = Chapter::new(title);
        chapter.heading_level = self.settings.default_heading_level.clamp(1, 6);
        if let Some(commands) = new.commands {
            chapter.annotations.commands = commands;
        }
        if let Some(comments) = new.comments {
            chapter.annotations.comments = comments;
        }

        let chapter_id = chapter.id.clone();
        let nodes = chapter_nodes(&chapter);
        self.cached_mut(path)?.insert_chapter(position, chapter);
        self.index_nodes(path, &nodes);

        self.save(path).await?;
        self.saved_chapter(path, &chapter_id)
    }

    /// Remove a chapter and all of its paragraphs
    pub async fn delete_chapter(&mut self, document: &str, chapter_id: &NodeId) -> Result<Chapter> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        let removed = self.cached_mut(path)?.remove_chapter(chapter_id)?;
        self.forget_nodes(path, &chapter_nodes(&removed));
        self.save(path).await?;
        Ok(removed)
    }

    /// Move a chapter to a new position within its document
    pub async fn change_chapter_order(
        &mut self,
        document: &str,
        chapter_id: &NodeId,
        position: Option<i64>,
    ) -> Result<Chapter> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        self.cached_mut(path)?.move_chapter(chapter_id, position)?;
        self.save(path).await?;
        self.saved_chapter(path, chapter_id)
    }

    /// Find a chapter by id in any cached document
    pub fn get_chapter(&self, chapter_id: &NodeId) -> Result<&Chapter> {
        let path = self.chapter_path(chapter_id)?;
        self.cached(&path)?
            .chapter(chapter_id)
            .ok_or_else(|| StoreError::chapter_not_found(chapter_id))
    }

    /// Find a chapter by id in one document, loading it if needed
    pub async fn get_chapter_in(&mut self, document: &str, chapter_id: &NodeId) -> Result<&Chapter> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        self.cached(path)?
            .chapter(chapter_id)
            .ok_or_else(|| StoreError::chapter_not_found(chapter_id))
    }

    /// Update a chapter located by id in any cached document
    pub async fn update_chapter(&mut self, chapter_id: &NodeId, update: ChapterUpdate) -> Result<Chapter> {
        let path = self.chapter_path(chapter_id)?;
        self.update_chapter_in(&path, chapter_id, update).await
    }

    /// Update a chapter of one document
    pub async fn update_chapter_in(
        &mut self,
        document: &str,
        chapter_id: &NodeId,
        update: ChapterUpdate,
    ) -> Result<Chapter> {
        let path = &resolve_path(document)?;
        self.ensure_loaded(path).await?;
        let chapter = self
            .cached_mut(path)?
            .chapter_mut(chapter_id)
            .ok_or_else(|| StoreError::chapter_not_found(chapter_id))?;
        update.apply(chapter);
        self.save(path).await?;
        self.saved_chapter(path, chapter_id)
    }

    /// Copy of a chapter as it was just written
    fn saved_chapter(&self, path: &str, chapter_id: &NodeId) -> Result<Chapter> {
        self.cached(path)?
            .chapter(chapter_id)
            .cloned()
            .ok_or_else(|| StoreError::chapter_not_found(chapter_id))
    }
}
