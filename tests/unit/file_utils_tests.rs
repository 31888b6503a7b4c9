/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;

use scenaslice::file_utils::FileManager;

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_fileExists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file =
        common::create_test_file(&temp_dir.path().to_path_buf(), "script.utf", "*start")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_fileExists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.utf"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensureDir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("build").join("epub");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(FileManager::dir_exists(&test_subdir));

    Ok(())
}

/// Test that read_to_string returns file content correctly
#[test]
fn test_readToString_withValidFile_shouldReturnContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "*start\nlangen Hello.";
    let test_file =
        common::create_test_file(&temp_dir.path().to_path_buf(), "script.utf", content)?;

    let read_content = FileManager::read_to_string(&test_file)?;
    assert_eq!(read_content, content);

    Ok(())
}

/// Test that read_to_string_lossy tolerates invalid UTF-8 sequences
#[test]
fn test_readToStringLossy_withInvalidUtf8_shouldReplaceBadBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = temp_dir.path().join("script.utf");
    fs::write(&test_file, [b'*', b's', 0xFF, 0xFE, b'\n'])?;

    let content = FileManager::read_to_string_lossy(&test_file)?;

    assert!(content.starts_with("*s"));
    assert!(content.contains('\u{FFFD}'));

    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_writeToFile_withMissingParent_shouldCreateFileWithContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = temp_dir.path().join("nested").join("out.json");
    let content = "{}";

    FileManager::write_to_file(&test_file, content)?;

    assert!(test_file.exists());
    assert_eq!(fs::read_to_string(&test_file)?, content);

    Ok(())
}
