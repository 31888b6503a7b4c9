use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::chapter_plan::{ChapterPlan, SpeakerInfo};
use crate::file_utils::FileManager;
use crate::script_processor::Entry;

// @module: Chapter export assembly and serialization

/// Fully assembled export for one chapter
#[derive(Debug, Serialize)]
pub struct ChapterExport {
    /// Chapter metadata copied from the plan
    pub chapter: ChapterPlan,

    /// Extracted entries in script order
    pub entries: Vec<Entry>,

    /// Catalog metadata for the speakers the entries actually reference
    pub speakers: BTreeMap<String, SpeakerInfo>,
}

impl ChapterExport {
    /// Assemble an export, restricting the speaker map to speakers that are
    /// referenced by at least one dialogue entry.
    pub fn new(
        chapter: &ChapterPlan,
        entries: Vec<Entry>,
        speaker_map: &HashMap<String, SpeakerInfo>,
    ) -> Self {
        let speakers = entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Dialogue { speaker_id, .. } => speaker_map
                    .get(speaker_id)
                    .map(|info| (speaker_id.clone(), info.clone())),
                _ => None,
            })
            .collect();

        ChapterExport {
            chapter: chapter.clone(),
            entries,
            speakers,
        }
    }

    /// Serialise the export to `<output_dir>/<chapter_id>.json` and return
    /// the written path.
    ///
    /// The payload is assembled in full before anything touches the
    /// filesystem, so a failed run never leaves partial output behind.
    pub fn write_to<P: AsRef<Path>>(&self, output_dir: P) -> Result<PathBuf> {
        let destination = output_dir
            .as_ref()
            .join(format!("{}.json", self.chapter.chapter_id));

        // serde_json leaves non-ASCII characters unescaped, which keeps the
        // exported text readable as-is.
        let payload = serde_json::to_string_pretty(self)
            .context("Failed to serialise chapter export to JSON")?;
        FileManager::write_to_file(&destination, &payload)?;

        info!(
            "Exported {} entr(ies) and {} speaker(s) for chapter '{}'",
            self.entries.len(),
            self.speakers.len(),
            self.chapter.chapter_id
        );
        Ok(destination)
    }
}
