/*!
 * # scenaslice - Scenario chapter extractor
 *
 * A Rust library for slicing chapters out of a large visual-novel scenario
 * script and converting them into structured JSON.
 *
 * ## Features
 *
 * - Index label anchors (`*label`) across the full script
 * - Slice the exclusive line range between a chapter's start and end labels
 * - Classify each line as a music cue, dialogue, or narration
 * - Strip engine markup (voice tags, carets, page breaks, inline directives)
 *   from the retained language channel
 * - Resolve speaker metadata from a chapter-plan catalog
 * - Emit one UTF-8 JSON export per chapter
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `chapter_plan`: Chapter-plan catalog loading and lookup
 * - `script_processor`: Script loading, label indexing, slicing, line
 *   cleaning, and entry extraction
 * - `export`: Chapter export assembly and JSON serialization
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod chapter_plan;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod script_processor;

// Re-export main types for easier usage
pub use chapter_plan::{ChapterCatalog, ChapterPlan, SpeakerInfo};
pub use errors::{AppError, PlanError, SliceError};
pub use export::ChapterExport;
pub use script_processor::{clean_lang_line, Entry, EntryExtractor, Script};
