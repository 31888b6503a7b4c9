use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{AppError, PlanError};
use crate::file_utils::FileManager;

/// Chapter-plan catalog module
/// This module loads the JSON catalog that enumerates exportable chapters and
/// the speakers that may appear in them, and resolves chapter lookups.
/// Configuration for a single chapter export
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChapterPlan {
    /// Unique chapter identifier used for lookup and the output filename
    #[serde(rename = "id")]
    pub chapter_id: String,

    /// Human-readable chapter title
    pub title: String,

    /// Episode the chapter belongs to
    pub episode: String,

    /// Label marking the first line after which extraction starts
    pub start_label: String,

    /// Label marking the line at which extraction stops
    pub end_label: String,
}

/// Metadata about a character that might speak in the script
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpeakerInfo {
    /// Speaker code as it appears in speaker-switch commands
    #[serde(default)]
    pub speaker_id: String,

    /// Display name, if one is configured
    pub name: Option<String>,

    /// Portrait image reference, if one is configured
    pub portrait: Option<String>,
}

// @struct: Raw catalog document shape
#[derive(Debug, Deserialize)]
struct CatalogDoc {
    #[serde(default)]
    chapters: Vec<ChapterPlan>,

    #[serde(default)]
    speakers: HashMap<String, SpeakerInfo>,
}

/// Catalog of chapter definitions and speaker metadata
#[derive(Debug, Clone)]
pub struct ChapterCatalog {
    /// Chapter definitions in catalog order
    pub chapters: Vec<ChapterPlan>,

    /// Speaker metadata keyed by speaker code
    pub speakers: HashMap<String, SpeakerInfo>,
}

impl ChapterCatalog {
    /// Load the catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(AppError::ConfigNotFound(path.to_path_buf()));
        }

        let content = FileManager::read_to_string(path)
            .with_context(|| format!("Failed to read chapter plan: {}", path.display()))?;
        Self::from_json(&content).map_err(AppError::from)
    }

    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> Result<Self, PlanError> {
        let doc: CatalogDoc =
            serde_json::from_str(content).map_err(|e| PlanError::Schema(e.to_string()))?;

        // The speaker code lives in the JSON object key; copy it into the
        // value so exports can carry it standalone.
        let speakers = doc
            .speakers
            .into_iter()
            .map(|(speaker_id, info)| {
                let info = SpeakerInfo {
                    speaker_id: speaker_id.clone(),
                    ..info
                };
                (speaker_id, info)
            })
            .collect();

        debug!("Loaded {} chapter definition(s)", doc.chapters.len());
        Ok(ChapterCatalog {
            chapters: doc.chapters,
            speakers,
        })
    }

    /// Return the chapter whose id or start label matches `key`
    pub fn find_chapter(&self, key: &str) -> Result<&ChapterPlan, PlanError> {
        self.chapters
            .iter()
            .find(|ch| ch.chapter_id == key || ch.start_label == key)
            .ok_or_else(|| PlanError::UnknownChapter {
                requested: key.to_string(),
                available: self
                    .chapters
                    .iter()
                    .map(|ch| ch.chapter_id.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Look up a speaker by code; absence is not an error
    pub fn speaker(&self, speaker_id: &str) -> Option<&SpeakerInfo> {
        self.speakers.get(speaker_id)
    }
}
