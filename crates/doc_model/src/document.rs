//! Document root node and document-level operations

use crate::position::{clamp_position, move_item};
use crate::variable::{find_variable, upsert_variable};
use crate::{
    Annotations, Chapter, DocModelError, DocumentMetadata, NodeId, NodeKind, Paragraph, Result,
    Variable,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used when neither metadata nor the storage path supplies one
pub const DEFAULT_DOCUMENT_TITLE: &str = "Untitled Document";

/// Current time as an RFC 3339 UTC timestamp with millisecond precision
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The root document node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Storage key; the authoritative identity of the document
    pub path: String,
    /// Document id as persisted in metadata
    pub id: NodeId,
    /// Persisted view of this document, refreshed by `sync`
    pub metadata: DocumentMetadata,
    pub title: String,
    pub info_text: String,
    #[serde(flatten)]
    pub annotations: Annotations,
    pub version: u64,
    pub updated_at: String,
    /// Free text before the first chapter
    pub preface: String,
    pub chapters: Vec<Chapter>,
}

/// Cheap listing entry for a cached document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: NodeId,
    pub path: String,
    pub title: String,
    pub info_text: String,
    pub updated_at: String,
}

/// A paragraph variable together with the nodes that own it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedVariable {
    #[serde(flatten)]
    pub variable: Variable,
    pub chapter_id: NodeId,
    pub paragraph_id: NodeId,
}

impl Document {
    /// Create an empty document: one default chapter holding one empty
    /// paragraph
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        let id = NodeId::generate(NodeKind::Document);
        let title = title.into();
        let updated_at = current_timestamp();
        Self {
            path: path.into(),
            metadata: DocumentMetadata {
                id: Some(id.clone()),
                title: Some(title.clone()),
                version: Some(1),
                updated_at: Some(updated_at.clone()),
                ..Default::default()
            },
            id,
            title,
            info_text: String::new(),
            annotations: Annotations::default(),
            version: 1,
            updated_at,
            preface: String::new(),
            chapters: vec![Chapter::new("Chapter 1")],
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            path: self.path.clone(),
            title: self.title.clone(),
            info_text: self.info_text.clone(),
            updated_at: self.updated_at.clone(),
        }
    }

    /// Rewrite every chapter's `position` to its index
    pub fn renumber_chapters(&mut self) {
        for (index, chapter) in self.chapters.iter_mut().enumerate() {
            chapter.position = index;
        }
    }

    pub fn chapter_index(&self, id: &NodeId) -> Option<usize> {
        self.chapters.iter().position(|c| &c.id == id)
    }

    pub fn chapter(&self, id: &NodeId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| &c.id == id)
    }

    pub fn chapter_mut(&mut self, id: &NodeId) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|c| &c.id == id)
    }

    /// Insert a chapter at a clamped position (append when `None`) and
    /// renumber. Returns the index it landed at.
    pub fn insert_chapter(&mut self, position: Option<i64>, chapter: Chapter) -> usize {
        let index = clamp_position(self.chapters.len(), position);
        self.chapters.insert(index, chapter);
        self.renumber_chapters();
        index
    }

    /// Remove the first chapter with the given id and renumber
    pub fn remove_chapter(&mut self, id: &NodeId) -> Result<Chapter> {
        let index = self
            .chapter_index(id)
            .ok_or_else(|| DocModelError::chapter_not_found(id))?;
        let removed = self.chapters.remove(index);
        self.renumber_chapters();
        Ok(removed)
    }

    /// Move a chapter to a clamped position and renumber. Returns its new
    /// index.
    pub fn move_chapter(&mut self, id: &NodeId, position: Option<i64>) -> Result<usize> {
        let index = self
            .chapter_index(id)
            .ok_or_else(|| DocModelError::chapter_not_found(id))?;
        let target = move_item(&mut self.chapters, index, position);
        self.renumber_chapters();
        Ok(target)
    }

    /// Find the first paragraph with the given id, in document order
    pub fn find_paragraph(&self, id: &NodeId) -> Option<(&Chapter, &Paragraph)> {
        self.chapters
            .iter()
            .find_map(|c| c.paragraph(id).map(|p| (c, p)))
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        find_variable(&self.annotations.variables, name)
    }

    /// Update a document variable in place, or append it when new
    pub fn set_variable(&mut self, name: &str, value: Value) -> &Variable {
        let index = upsert_variable(&mut self.annotations.variables, name, value);
        &self.annotations.variables[index]
    }

    /// Tasks of every chapter followed by those of its paragraphs, in
    /// document order
    pub fn tasks(&self) -> Vec<Value> {
        let mut tasks = Vec::new();
        for chapter in &self.chapters {
            tasks.extend(chapter.annotations.tasks.iter().cloned());
            for paragraph in &chapter.paragraphs {
                tasks.extend(paragraph.annotations.tasks.iter().cloned());
            }
        }
        tasks
    }

    /// Every paragraph variable, tagged with its owners
    pub fn paragraph_variables(&self) -> Vec<ScopedVariable> {
        self.chapters
            .iter()
            .flat_map(|chapter| {
                chapter.paragraphs.iter().flat_map(move |paragraph| {
                    paragraph.annotations.variables.iter().map(move |variable| ScopedVariable {
                        variable: variable.clone(),
                        chapter_id: chapter.id.clone(),
                        paragraph_id: paragraph.id.clone(),
                    })
                })
            })
            .collect()
    }
}
