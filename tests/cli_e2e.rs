//! End-to-end CLI tests for chatmd.
//!
//! These tests run the actual binary against temporary exports and check
//! the generated files and console output.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const EXPORT: &str = r#"[
  {
    "title": "Rust error handling",
    "create_time": 1705314600,
    "update_time": 1705315200,
    "mapping": {
      "root": {"message": null, "children": ["a"]},
      "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["How do I handle an error in Rust?"]}, "create_time": 1705314601}},
      "b": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["Use Result:\n```rust\nfn f() -> Result<(), E> { Ok(()) }\n```"]}, "create_time": 1705314660}}
    }
  },
  {
    "title": "Dinner ideas",
    "create_time": 1718452800,
    "update_time": 1718452900,
    "mapping": {
      "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["Something quick with pasta"]}, "create_time": 1718452801}}
    }
  }
]"#;

fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("conversations.json"), EXPORT).unwrap();
    fs::write(dir.path().join("not_array.json"), r#"{"mapping": {}}"#).unwrap();
    fs::write(dir.path().join("broken.json"), "[{").unwrap();
    dir
}

fn chatmd_cmd(dir: &Path) -> Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatmd"));
    cmd.current_dir(dir);
    Command::from_std(cmd)
}

fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_default_paths() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("Created:"));

        let files = markdown_files(&fixtures.path().join("output"));
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_custom_output_dir() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .args(["conversations.json", "-o", "notes"])
            .assert()
            .success();

        let files = markdown_files(&fixtures.path().join("notes"));
        assert_eq!(files.len(), 2);

        let rust_note = files
            .iter()
            .find(|p| p.to_string_lossy().contains("Rusterrorhandling"))
            .expect("rust note written");
        let content = fs::read_to_string(rust_note).unwrap();
        assert!(content.starts_with("# Rust error handling\n\n"));
        assert!(content.contains("#lang:rust"));
        assert!(content.contains("**User:** mr.774  \n"));
        assert!(content.contains("## Response:\n"));
    }

    #[test]
    fn test_config_file_is_applied() {
        let fixtures = setup_fixtures();
        fs::write(
            fixtures.path().join("my-config.json"),
            r#"{"user_name": "alice", "features": {"show_tags": false}}"#,
        )
        .unwrap();

        chatmd_cmd(fixtures.path())
            .args(["-c", "my-config.json", "-o", "out"])
            .assert()
            .success();

        for file in markdown_files(&fixtures.path().join("out")) {
            let content = fs::read_to_string(file).unwrap();
            assert!(content.contains("**User:** alice  \n"));
            assert!(!content.contains("### Tags"));
        }
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let fixtures = setup_fixtures();
        fs::write(fixtures.path().join("bad.json"), "{ nope").unwrap();

        chatmd_cmd(fixtures.path())
            .args(["-c", "bad.json", "-o", "out"])
            .assert()
            .success()
            .stderr(predicate::str::contains("using default configuration"));

        assert_eq!(markdown_files(&fixtures.path().join("out")).len(), 2);
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_after_filter() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .args(["--after", "2024-06-01", "-o", "out"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Skipped:   1"));

        let files = markdown_files(&fixtures.path().join("out"));
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().contains("Dinnerideas"));
    }

    #[test]
    fn test_title_filter() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .args(["--title", "RUST", "-o", "out"])
            .assert()
            .success();

        let files = markdown_files(&fixtures.path().join("out"));
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().contains("Rusterrorhandling"));
    }

    #[test]
    fn test_invalid_date() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .args(["--before", "15/01/2024"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invalid date"));
    }
}

// ============================================================================
// Flag Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_dry_run_writes_nothing() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .args(["--dry-run", "-o", "out"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ChatGPT-Rusterrorhandling-"))
            .stdout(predicate::str::contains("#lang:rust"))
            .stdout(predicate::str::contains("2 of 2"));

        assert!(!fixtures.path().join("out").exists());
    }

    #[test]
    fn test_print_config() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .arg("--print-config")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"user_name\": \"mr.774\""))
            .stdout(predicate::str::contains("\"topK\": 50"));
    }

    #[test]
    fn test_help() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("EXAMPLES"))
            .stdout(predicate::str::contains("--dry-run"));
    }

    #[test]
    fn test_version() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_input() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .arg("nope.json")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_not_an_array() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .arg("not_array.json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid ChatGPT JSON format"));
    }

    #[test]
    fn test_missing_dictionary() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .args(["--dictionary", "no-such-dictionary", "-o", "out"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("lindera"));

        assert!(markdown_files(&fixtures.path().join("out")).is_empty());
    }

    #[test]
    fn test_truncated_json() {
        let fixtures = setup_fixtures();

        chatmd_cmd(fixtures.path())
            .arg("broken.json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse"));
    }
}
