/*!
 * Tests for chapter-plan catalog loading and lookup
 */

use anyhow::Result;
use scenaslice::chapter_plan::ChapterCatalog;
use scenaslice::errors::{AppError, PlanError};

use crate::common;

/// Test that a valid catalog parses chapters and speakers
#[test]
fn test_fromJson_withValidCatalog_shouldParseChaptersAndSpeakers() {
    let catalog = ChapterCatalog::from_json(common::sample_catalog_json()).unwrap();

    assert_eq!(catalog.chapters.len(), 2);
    assert_eq!(catalog.chapters[0].chapter_id, "episode1-opening");
    assert_eq!(catalog.chapters[0].title, "Opening");
    assert_eq!(catalog.chapters[0].episode, "Episode 1");
    assert_eq!(catalog.chapters[0].start_label, "umi1_opning");
    assert_eq!(catalog.chapters[0].end_label, "umi1_main");

    let beato = catalog.speaker("beato").expect("beato should exist");
    assert_eq!(beato.speaker_id, "beato");
    assert_eq!(beato.name.as_deref(), Some("Beatrice"));
    assert_eq!(beato.portrait.as_deref(), Some("portraits/beato.png"));
}

/// Test that speaker fields are optional
#[test]
fn test_fromJson_withSpeakerMissingPortrait_shouldParseAsNone() {
    let catalog = ChapterCatalog::from_json(common::sample_catalog_json()).unwrap();

    let battler = catalog.speaker("but").expect("but should exist");
    assert_eq!(battler.name.as_deref(), Some("Battler"));
    assert!(battler.portrait.is_none());
}

/// Test that top-level keys may be absent entirely
#[test]
fn test_fromJson_withEmptyDocument_shouldYieldEmptyCatalog() {
    let catalog = ChapterCatalog::from_json("{}").unwrap();

    assert!(catalog.chapters.is_empty());
    assert!(catalog.speakers.is_empty());
}

/// Test that a chapter definition missing a required field fails with a
/// schema error naming the field
#[test]
fn test_fromJson_withMissingRequiredField_shouldReturnSchemaError() {
    let content = r#"{
  "chapters": [
    {
      "id": "ep1",
      "episode": "Episode 1",
      "start_label": "a",
      "end_label": "b"
    }
  ]
}"#;

    let err = ChapterCatalog::from_json(content).unwrap_err();
    assert!(matches!(err, PlanError::Schema(_)));
    assert!(format!("{}", err).contains("title"));
}

/// Test chapter lookup by id
#[test]
fn test_findChapter_withChapterId_shouldReturnChapter() {
    let catalog = ChapterCatalog::from_json(common::sample_catalog_json()).unwrap();

    let chapter = catalog.find_chapter("episode1-main").unwrap();
    assert_eq!(chapter.start_label, "umi1_main");
}

/// Test chapter lookup by start label
#[test]
fn test_findChapter_withStartLabel_shouldReturnChapter() {
    let catalog = ChapterCatalog::from_json(common::sample_catalog_json()).unwrap();

    let chapter = catalog.find_chapter("umi1_opning").unwrap();
    assert_eq!(chapter.chapter_id, "episode1-opening");
}

/// Test that an unknown chapter id enumerates every known id
#[test]
fn test_findChapter_withUnknownId_shouldEnumerateKnownIds() {
    let catalog = ChapterCatalog::from_json(common::sample_catalog_json()).unwrap();

    let err = catalog.find_chapter("nope").unwrap_err();
    let message = format!("{}", err);
    assert!(message.contains("nope"));
    assert!(message.contains("episode1-opening"));
    assert!(message.contains("episode1-main"));
}

/// Test that loading a missing catalog file fails with ConfigNotFound
#[test]
fn test_load_withMissingFile_shouldReturnConfigNotFound() {
    let err = ChapterCatalog::load("does/not/exist.json").unwrap_err();

    assert!(matches!(err, AppError::ConfigNotFound(_)));
}

/// Test that loading a catalog from disk round-trips the document
#[test]
fn test_load_withCatalogOnDisk_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "chapter_plan.json",
        common::sample_catalog_json(),
    )?;

    let catalog = ChapterCatalog::load(&path)?;
    assert_eq!(catalog.chapters.len(), 2);

    Ok(())
}
