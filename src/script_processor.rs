use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::chapter_plan::{ChapterPlan, SpeakerInfo};
use crate::errors::{AppError, SliceError};
use crate::file_utils::FileManager;

// @module: Scenario script parsing and entry extraction

/// Keyword that opens a retained language-channel line. Sibling channels
/// (e.g. `langjp`) are ignored entirely.
pub const LANG_KEYWORD: &str = "langen";

/// Speaker-switch command keyword
pub const SPEAKER_KEYWORD: &str = "advchar";

/// Speaker code that returns extraction to narration mode
const NARRATION_SENTINEL: &str = "-1";

/// Music commands preserved as cues when no override is given
pub const DEFAULT_MUSIC_COMMANDS: [&str; 6] =
    ["bgm", "bgmplay", "bgmstop", "meplay", "meplay2", "bgmfade"];

// @const: Voice-clip annotation tags, delimiters included
static VOICE_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":(?:dwave_eng|dwave_jp|voicedelay|dwave) [^:]*:").unwrap());

// @const: Inline engine directives like !sd or !w800
static CONTROL_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\w+").unwrap());

// @const: Runs of horizontal whitespace
static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

// @const: Leading colon separator on any line of a multi-line block
static LINE_LEADING_COLON_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*:\s*").unwrap());

// @const: Three or more consecutive newlines
static NEWLINE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

// @const: Quoted speaker code argument of the speaker-switch command
static SPEAKER_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

/// Strip control codes and extract the retained-language sentence from a
/// language-channel line.
///
/// Returns the empty string when the line carries no displayable content,
/// including every line that does not start with the channel keyword. The
/// rules run as an ordered pipeline; later rules see the output of earlier
/// ones, which matters for carets and page-break markers.
pub fn clean_lang_line(raw: &str) -> String {
    let content = raw.trim();
    let Some(content) = content.strip_prefix(LANG_KEYWORD) else {
        return String::new();
    };

    let content = VOICE_TAG_REGEX.replace_all(content, "");
    let content = content.trim_start_matches([':', ' ']);

    // Drop the paragraph-start caret (if any) so text tokens can be processed.
    let content = content.strip_prefix('^').unwrap_or(content);

    // Remaining carets and page-break markers have fixed display meanings.
    let content = content.replace('^', "");
    let content = content.replace("@/", "\n");
    let content = content.replace('@', "\n");
    let content = content.replace('\\', "");

    // Remove inline scripting hints like !sd or !w800.
    let content = CONTROL_CODE_REGEX.replace_all(&content, "");

    // Normalise quotes that are escaped for the engine.
    let content = content.replace("\\\"", "\"");

    // Condense stray whitespace.
    let content = WHITESPACE_RUN_REGEX.replace_all(&content, " ");
    let content = LINE_LEADING_COLON_REGEX.replace_all(&content, "");
    let content = NEWLINE_RUN_REGEX.replace_all(&content, "\n\n");

    // Drop leftover control characters (keep newlines intact).
    let content: String = content
        .chars()
        .filter(|&ch| ch == '\n' || ch as u32 >= 32)
        .collect();

    content.trim().to_string()
}

/// One unit of extracted chapter content
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    /// Music cue produced by a configured music command
    Music {
        /// Lowercased command keyword
        command: String,
        /// Original trimmed source line
        raw: String,
    },

    /// Spoken line attributed to the current speaker
    Dialogue {
        /// Cleaned display text
        text: String,
        /// Speaker code active when the line was emitted
        speaker_id: String,
        /// Display name resolved from the catalog, when present
        #[serde(skip_serializing_if = "Option::is_none")]
        speaker: Option<String>,
        /// Portrait reference resolved from the catalog, when present
        #[serde(skip_serializing_if = "Option::is_none")]
        portrait: Option<String>,
    },

    /// Narration emitted while no speaker is active
    Narration {
        /// Cleaned display text
        text: String,
    },
}

/// Converts raw scenario lines into structured narration/dialogue entries
#[derive(Debug)]
pub struct EntryExtractor<'a> {
    /// Speaker metadata keyed by speaker code
    speakers: &'a HashMap<String, SpeakerInfo>,

    /// Lowercased command keywords preserved as music cues
    music_keywords: HashSet<String>,
}

impl<'a> EntryExtractor<'a> {
    /// Create an extractor over the given speaker catalog and music commands
    pub fn new<S: AsRef<str>>(
        speakers: &'a HashMap<String, SpeakerInfo>,
        music_commands: &[S],
    ) -> Self {
        EntryExtractor {
            speakers,
            music_keywords: music_commands
                .iter()
                .map(|cmd| cmd.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Walk `lines` in order and emit entries for every recognised directive.
    ///
    /// Speaker state is threaded through the fold explicitly: a
    /// speaker-switch command updates it, the `"-1"` sentinel clears it, and
    /// nothing else touches it. Unrecognised lines are ignored.
    pub fn extract(&self, lines: &[String]) -> Vec<Entry> {
        let (entries, _) = lines.iter().fold(
            (Vec::new(), None::<String>),
            |(mut entries, current_speaker), raw_line| {
                let stripped = raw_line.trim();
                if stripped.is_empty() {
                    return (entries, current_speaker);
                }

                // Comments include speaker hints such as `;＜金蔵`; skip them.
                if stripped.starts_with(';') {
                    return (entries, current_speaker);
                }

                if stripped.starts_with(SPEAKER_KEYWORD) {
                    let next = Self::parse_speaker_switch(stripped).unwrap_or(current_speaker);
                    return (entries, next);
                }

                let keyword = stripped
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_lowercase();
                if self.music_keywords.contains(&keyword) {
                    entries.push(Entry::Music {
                        command: keyword,
                        raw: stripped.to_string(),
                    });
                    return (entries, current_speaker);
                }

                if stripped.starts_with(LANG_KEYWORD) {
                    let text = clean_lang_line(stripped);
                    if !text.is_empty() {
                        entries.push(self.text_entry(text, current_speaker.as_deref()));
                    }
                    return (entries, current_speaker);
                }

                (entries, current_speaker)
            },
        );
        entries
    }

    // @parses: Speaker-switch command into the next speaker state
    // @returns: None when the line carries no quoted code
    fn parse_speaker_switch(stripped: &str) -> Option<Option<String>> {
        let code = SPEAKER_CODE_REGEX
            .captures(stripped)
            .map(|caps| caps[1].to_string())?;
        if code == NARRATION_SENTINEL {
            Some(None)
        } else {
            Some(Some(code))
        }
    }

    // @creates: Dialogue entry when a speaker is active, narration otherwise
    fn text_entry(&self, text: String, current_speaker: Option<&str>) -> Entry {
        match current_speaker {
            Some(speaker_id) => {
                // A code missing from the catalog is tolerated; the entry
                // simply omits name and portrait.
                let info = self.speakers.get(speaker_id);
                Entry::Dialogue {
                    text,
                    speaker_id: speaker_id.to_string(),
                    speaker: info.and_then(|i| i.name.clone()),
                    portrait: info.and_then(|i| i.portrait.clone()),
                }
            }
            None => Entry::Narration { text },
        }
    }
}

/// A loaded scenario script with its label index
#[derive(Debug)]
pub struct Script {
    /// Source filename
    pub source_file: PathBuf,

    /// Raw script lines in file order
    pub lines: Vec<String>,

    /// Label name mapped to its zero-based line index
    labels: HashMap<String, usize>,
}

impl Script {
    /// Load a scenario script from disk.
    ///
    /// The master script predates UTF-8 discipline, so invalid byte
    /// sequences are decoded lossily rather than rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(AppError::ScriptNotFound(path.to_path_buf()));
        }

        let content = FileManager::read_to_string_lossy(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Ok(Self::from_text(path, &content))
    }

    /// Build a script from already-loaded text
    pub fn from_text<P: AsRef<Path>>(source: P, content: &str) -> Self {
        let lines: Vec<String> = content.lines().map(|line| line.to_string()).collect();
        let labels = Self::index_labels(&lines);
        debug!("Indexed {} label(s) across {} line(s)", labels.len(), lines.len());

        Script {
            source_file: source.as_ref().to_path_buf(),
            lines,
            labels,
        }
    }

    /// Create a mapping from label names (`*label`) to their line index.
    ///
    /// Duplicate definitions are accepted; the last occurrence wins.
    fn index_labels(lines: &[String]) -> HashMap<String, usize> {
        let mut result = HashMap::new();
        for (index, raw_line) in lines.iter().enumerate() {
            let stripped = raw_line.trim();
            if let Some(label) = stripped.strip_prefix('*') {
                if !label.is_empty() {
                    result.insert(label.to_string(), index);
                }
            }
        }
        result
    }

    /// Line index of a label, if the label is defined
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Return the portion of the script that belongs to `chapter`.
    ///
    /// The range is exclusive on both sides: the label lines themselves are
    /// never part of the chapter.
    pub fn slice_chapter(&self, chapter: &ChapterPlan) -> Result<&[String], SliceError> {
        let start = self
            .label_index(&chapter.start_label)
            .ok_or_else(|| SliceError::MissingStartLabel(chapter.start_label.clone()))?;
        let end = self
            .label_index(&chapter.end_label)
            .ok_or_else(|| SliceError::MissingEndLabel(chapter.end_label.clone()))?;

        if start >= end {
            warn!(
                "Rejecting chapter '{}': start index {} >= end index {}",
                chapter.chapter_id, start, end
            );
            return Err(SliceError::InvalidRange {
                chapter_id: chapter.chapter_id.clone(),
                start_label: chapter.start_label.clone(),
                end_label: chapter.end_label.clone(),
            });
        }

        Ok(&self.lines[start + 1..end])
    }
}
