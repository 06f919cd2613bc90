//! Store settings management
//!
//! Defaults the registry applies when it synthesizes documents, chapters and
//! snapshots, persisted as `doc_store.json` in a settings directory.

use crate::hydrate::HydrateOptions;
use crate::markdown::WriteOptions;
use crate::Result;
use doc_model::{DEFAULT_DOCUMENT_TITLE, DEFAULT_HEADING_LEVEL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the settings file inside the settings directory
pub const SETTINGS_FILE_NAME: &str = "doc_store.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    /// Title when neither the path nor metadata supplies one
    pub default_document_title: String,
    /// Base title of synthesized chapters ("Chapter" → "Chapter 1")
    pub default_chapter_title: String,
    /// Title of chapters added without one
    pub new_chapter_title: String,
    pub default_heading_level: u8,
    /// Snapshots kept per document; 0 keeps all
    pub max_snapshots_per_document: usize,
    /// Longest run of newlines left in saved text
    pub max_consecutive_newlines: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            default_document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
            default_chapter_title: "Chapter".to_string(),
            new_chapter_title: "New Chapter".to_string(),
            default_heading_level: DEFAULT_HEADING_LEVEL,
            max_snapshots_per_document: 0,
            max_consecutive_newlines: 3,
        }
    }
}

impl StoreSettings {
    pub fn hydrate_options(&self) -> HydrateOptions {
        HydrateOptions {
            fallback_title: self.default_document_title.clone(),
            chapter_title: self.default_chapter_title.clone(),
            heading_level: self.default_heading_level.clamp(1, 6),
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            max_consecutive_newlines: self.max_consecutive_newlines,
        }
    }
}

/// Settings manager for loading, saving, and updating store settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: StoreSettings,
}

impl SettingsManager {
    /// Create a new settings manager for the given directory
    pub fn new(settings_dir: PathBuf) -> Self {
        Self {
            settings_path: settings_dir.join(SETTINGS_FILE_NAME),
            current: StoreSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, or fall back to defaults
    pub async fn load(&mut self) -> Result<&StoreSettings> {
        if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            match serde_json::from_str::<StoreSettings>(&content) {
                Ok(settings) => self.current = settings,
                Err(e) => {
                    tracing::warn!("Failed to parse store settings, using defaults: {}", e);
                    self.current = StoreSettings::default();
                }
            }
        } else {
            self.current = StoreSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    pub fn get(&self) -> &StoreSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub async fn update(&mut self, settings: StoreSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    /// Reset settings to defaults and save
    pub async fn reset(&mut self) -> Result<&StoreSettings> {
        self.current = StoreSettings::default();
        self.save().await?;
        Ok(&self.current)
    }
}
