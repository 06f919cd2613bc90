//! Chapter node - a heading followed by an ordered run of paragraphs

use crate::position::{clamp_position, move_item};
use crate::{Annotations, ChapterMetadata, DocModelError, NodeId, NodeKind, Paragraph, Result};
use serde::{Deserialize, Serialize};

/// Heading level used for chapters that do not specify one
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// A chapter inside a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: NodeId,
    /// Persisted view of this chapter, refreshed by `sync`
    pub metadata: ChapterMetadata,
    pub title: String,
    /// Index within the owning document. Derived; rewritten after every
    /// structural change of the chapter sequence.
    pub position: usize,
    /// Markdown heading level, 1..=6
    pub heading_level: u8,
    pub heading_text: String,
    /// Free text between the chapter marker and its heading
    pub leading: String,
    #[serde(flatten)]
    pub annotations: Annotations,
    pub paragraphs: Vec<Paragraph>,
}

impl Chapter {
    /// Create a chapter with a fresh id, the given title and one empty
    /// paragraph
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let id = NodeId::generate(NodeKind::Chapter);
        let paragraph = Paragraph::new(id.clone());
        Self {
            metadata: ChapterMetadata {
                id: Some(id.clone()),
                title: Some(title.clone()),
                ..Default::default()
            },
            id,
            heading_text: title.clone(),
            title,
            position: 0,
            heading_level: DEFAULT_HEADING_LEVEL,
            leading: String::new(),
            annotations: Annotations::default(),
            paragraphs: vec![paragraph],
        }
    }

    /// Set the title, keeping heading text and metadata title in step
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.heading_text = title.clone();
        self.metadata.title = Some(title.clone());
        self.title = title;
    }

    /// Index of the paragraph with the given id (first match)
    pub fn paragraph_index(&self, id: &NodeId) -> Option<usize> {
        self.paragraphs.iter().position(|p| &p.id == id)
    }

    pub fn paragraph(&self, id: &NodeId) -> Option<&Paragraph> {
        self.paragraphs.iter().find(|p| &p.id == id)
    }

    pub fn paragraph_mut(&mut self, id: &NodeId) -> Option<&mut Paragraph> {
        self.paragraphs.iter_mut().find(|p| &p.id == id)
    }

    /// Insert a paragraph at a clamped position (append when `None`).
    /// Returns the index it landed at.
    pub fn insert_paragraph(&mut self, position: Option<i64>, mut paragraph: Paragraph) -> usize {
        paragraph.chapter_id = self.id.clone();
        let index = clamp_position(self.paragraphs.len(), position);
        self.paragraphs.insert(index, paragraph);
        index
    }

    /// Remove the first paragraph with the given id
    pub fn remove_paragraph(&mut self, id: &NodeId) -> Result<Paragraph> {
        let index = self
            .paragraph_index(id)
            .ok_or_else(|| DocModelError::paragraph_not_found(id))?;
        Ok(self.paragraphs.remove(index))
    }

    /// Move a paragraph to a clamped position. Returns its new index.
    pub fn move_paragraph(&mut self, id: &NodeId, position: Option<i64>) -> Result<usize> {
        let index = self
            .paragraph_index(id)
            .ok_or_else(|| DocModelError::paragraph_not_found(id))?;
        Ok(move_item(&mut self.paragraphs, index, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chapter_has_one_paragraph() {
        let chapter = Chapter::new("Intro");
        assert_eq!(chapter.paragraphs.len(), 1);
        assert_eq!(chapter.paragraphs[0].chapter_id, chapter.id);
        assert_eq!(chapter.heading_text, "Intro");
        assert_eq!(chapter.metadata.id.as_ref(), Some(&chapter.id));
    }

    #[test]
    fn test_insert_paragraph_clamps_and_adopts() {
        let mut chapter = Chapter::new("Intro");
        let other = NodeId::from("elsewhere");
        let index = chapter.insert_paragraph(Some(5), Paragraph::with_text(other, "tail"));
        assert_eq!(index, 1);
        assert_eq!(chapter.paragraphs[1].chapter_id, chapter.id);
    }

    #[test]
    fn test_move_and_remove_paragraph() {
        let mut chapter = Chapter::new("Intro");
        let second = Paragraph::with_text(chapter.id.clone(), "second");
        let second_id = second.id.clone();
        chapter.insert_paragraph(None, second);

        assert_eq!(chapter.move_paragraph(&second_id, Some(0)).unwrap(), 0);
        assert_eq!(chapter.paragraphs[0].text, "second");

        let removed = chapter.remove_paragraph(&second_id).unwrap();
        assert_eq!(removed.id, second_id);
        assert!(chapter.remove_paragraph(&second_id).is_err());
    }

    #[test]
    fn test_set_title_updates_heading() {
        let mut chapter = Chapter::new("Old");
        chapter.set_title("New");
        assert_eq!(chapter.title, "New");
        assert_eq!(chapter.heading_text, "New");
        assert_eq!(chapter.metadata.title.as_deref(), Some("New"));
    }
}
