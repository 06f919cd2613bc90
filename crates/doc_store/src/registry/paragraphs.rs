//! Paragraph operations
//!
//! Paragraphs are addressed through their chapter, which may live in any
//! cached document.

use super::DocumentRegistry;
use crate::backend::StorageBackend;
use crate::{Result, StoreError};
use doc_model::{
    Chapter, Comments, NodeId, NodeKind, Paragraph, ParagraphMetadata, DEFAULT_PARAGRAPH_KIND,
};
use serde_json::Value;

/// Initial values for [`DocumentRegistry::add_paragraph`]
#[derive(Debug, Clone, Default)]
pub struct NewParagraph {
    pub text: String,
    /// Metadata to start from; its id is kept when present
    pub metadata: Option<ParagraphMetadata>,
    /// Content kind; falls back to the metadata's, then `markdown`
    pub kind: Option<String>,
}

impl NewParagraph {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn build(self, chapter_id: &NodeId) -> Paragraph {
        let metadata = self.metadata.unwrap_or_default();
        let id = metadata
            .id
            .clone()
            .unwrap_or_else(|| NodeId::generate(NodeKind::Paragraph));
        let kind = self
            .kind
            .or_else(|| metadata.kind.clone())
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PARAGRAPH_KIND.to_string());

        Paragraph {
            id,
            chapter_id: chapter_id.clone(),
            annotations: metadata.annotations.clone(),
            metadata,
            text: self.text,
            leading: String::new(),
            trailing: "\n".to_string(),
            kind,
        }
    }
}

/// Fields [`DocumentRegistry::update_paragraph`] may change
#[derive(Debug, Clone, Default)]
pub struct ParagraphUpdate {
    pub text: Option<String>,
    pub commands: Option<Vec<Value>>,
    pub comments: Option<Comments>,
}

impl<B: StorageBackend> DocumentRegistry<B> {
    fn chapter_in_mut(&mut self, path: &str, chapter_id: &NodeId) -> Result<&mut Chapter> {
        self.cached_mut(path)?
            .chapter_mut(chapter_id)
            .ok_or_else(|| StoreError::chapter_not_found(chapter_id))
    }

    fn saved_paragraph(&self, path: &str, chapter_id: &NodeId, paragraph_id: &NodeId) -> Result<Paragraph> {
        self.cached(path)?
            .chapter(chapter_id)
            .and_then(|chapter| chapter.paragraph(paragraph_id))
            .cloned()
            .ok_or_else(|| StoreError::paragraph_not_found(paragraph_id))
    }

    /// Add a paragraph to a chapter. `None` appends.
    pub async fn add_paragraph(
        &mut self,
        chapter_id: &NodeId,
        new: NewParagraph,
        position: Option<i64>,
    ) -> Result<Paragraph> {
        let path = self.chapter_path(chapter_id)?;
        let paragraph = new.build(chapter_id);
        let paragraph_id = paragraph.id.clone();

        self.chapter_in_mut(&path, chapter_id)?
            .insert_paragraph(position, paragraph);
        self.index_nodes(&path, &[(paragraph_id.clone(), NodeKind::Paragraph)]);

        self.save(&path).await?;
        self.saved_paragraph(&path, chapter_id, &paragraph_id)
    }

    pub async fn delete_paragraph(&mut self, chapter_id: &NodeId, paragraph_id: &NodeId) -> Result<Paragraph> {
        let path = self.chapter_path(chapter_id)?;
        let removed = self
            .chapter_in_mut(&path, chapter_id)?
            .remove_paragraph(paragraph_id)?;
        self.forget_nodes(&path, &[(removed.id.clone(), NodeKind::Paragraph)]);
        self.save(&path).await?;
        Ok(removed)
    }

    /// Move a paragraph within its chapter
    pub async fn change_paragraph_order(
        &mut self,
        chapter_id: &NodeId,
        paragraph_id: &NodeId,
        position: Option<i64>,
    ) -> Result<Paragraph> {
        let path = self.chapter_path(chapter_id)?;
        self.chapter_in_mut(&path, chapter_id)?
            .move_paragraph(paragraph_id, position)?;
        self.save(&path).await?;
        self.saved_paragraph(&path, chapter_id, paragraph_id)
    }

    /// Find a paragraph by id in any cached document (first match)
    pub fn get_paragraph(&self, paragraph_id: &NodeId) -> Result<&Paragraph> {
        let path = self.paragraph_path(paragraph_id)?;
        self.cached(&path)?
            .find_paragraph(paragraph_id)
            .map(|(_, paragraph)| paragraph)
            .ok_or_else(|| StoreError::paragraph_not_found(paragraph_id))
    }

    pub async fn update_paragraph(
        &mut self,
        chapter_id: &NodeId,
        paragraph_id: &NodeId,
        update: ParagraphUpdate,
    ) -> Result<Paragraph> {
        let path = self.chapter_path(chapter_id)?;
        let paragraph = self
            .chapter_in_mut(&path, chapter_id)?
            .paragraph_mut(paragraph_id)
            .ok_or_else(|| StoreError::paragraph_not_found(paragraph_id))?;
        if let Some(text) = update.text {
            paragraph.text = text;
        }
        if let Some(commands) = update.commands {
            paragraph.annotations.commands = commands;
        }
        if let Some(comments) = update.comments {
            paragraph.annotations.comments = comments;
        }
        self.save(&path).await?;
        self.saved_paragraph(&path, chapter_id, paragraph_id)
    }

    /// Replace a paragraph's commands
    pub async fn update_paragraph_commands(
        &mut self,
        chapter_id: &NodeId,
        paragraph_id: &NodeId,
        commands: Vec<Value>,
    ) -> Result<Paragraph> {
        let update = ParagraphUpdate {
            commands: Some(commands),
            ..Default::default()
        };
        self.update_paragraph(chapter_id, paragraph_id, update).await
    }
}
