/*!
 * Common test utilities for the scenaslice test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small scenario script exercising every directive the extractor handles
pub fn sample_script() -> &'static str {
    r#"*umi1_opning
;＜金蔵
bgm theme01
advchar "beato"
langen:dwave_eng v01:^Good evening.
advchar "-1"
langen ^The hall fell silent.@
mov %100,1
*umi1_main
langen Not part of the opening.
*umi1_end
"#
}

/// A chapter plan catalog matching the labels in `sample_script`
pub fn sample_catalog_json() -> &'static str {
    r#"{
  "chapters": [
    {
      "id": "episode1-opening",
      "title": "Opening",
      "episode": "Episode 1",
      "start_label": "umi1_opning",
      "end_label": "umi1_main"
    },
    {
      "id": "episode1-main",
      "title": "Main",
      "episode": "Episode 1",
      "start_label": "umi1_main",
      "end_label": "umi1_end"
    }
  ],
  "speakers": {
    "beato": {
      "name": "Beatrice",
      "portrait": "portraits/beato.png"
    },
    "but": {
      "name": "Battler"
    }
  }
}"#
}
