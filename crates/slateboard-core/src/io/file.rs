//! Reading whiteboard and plain-text files from disk.

use super::{ImportError, ImportResult, ImportedScene, parse_scene};
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed content of one imported file.
#[derive(Debug)]
pub enum FilePayload {
    /// A whiteboard document that replaces the scene.
    Scene(ImportedScene),
    /// Plain text, one candidate text element per line.
    TextLines(Vec<String>),
}

/// Per-file result of a batch import.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: ImportResult<()>,
}

/// Read one file, dispatching on its extension.
///
/// `.json` files must hold a valid whiteboard document, `.txt` files are
/// split into lines. Any other extension is rejected with the offending
/// type named in the error.
pub fn read_file(path: &Path) -> ImportResult<FilePayload> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => {
            let content = read_to_string(path)?;
            Ok(FilePayload::Scene(parse_scene(&content)?))
        }
        Some("txt") => {
            let content = read_to_string(path)?;
            Ok(FilePayload::TextLines(
                content.lines().map(|l| l.to_string()).collect(),
            ))
        }
        Some(other) => Err(ImportError::UnsupportedFile(other.to_string())),
        None => Err(ImportError::UnsupportedFile("unknown".to_string())),
    }
}

fn read_to_string(path: &Path) -> ImportResult<String> {
    fs::read_to_string(path)
        .map_err(|e| ImportError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use kurbo::Point;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_json_file_loads_as_scene() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        fs::write(
            &path,
            r#"{"type": "excalidraw", "elements": []}"#,
        )
        .unwrap();

        match read_file(&path).unwrap() {
            FilePayload::Scene(imported) => assert!(imported.elements.is_empty()),
            other => panic!("expected scene payload, got {other:?}"),
        }
    }

    #[test]
    fn test_txt_file_keeps_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "first\n\nthird\n").unwrap();

        match read_file(&path).unwrap() {
            FilePayload::TextLines(lines) => {
                assert_eq!(lines, vec!["first", "", "third"]);
            }
            other => panic!("expected text payload, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension_is_named() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, [0u8; 4]).unwrap();

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFile(ext) if ext == "png"));
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README");
        fs::write(&path, "hello").unwrap();

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFile(ext) if ext == "unknown"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }

    #[test]
    fn test_batch_import_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("photo.png");
        let good = dir.path().join("notes.txt");
        fs::write(&bad, [0u8; 4]).unwrap();
        fs::write(&good, "imported line\n").unwrap();

        let mut session = Session::new();
        let outcomes = session.import_files(&[bad, good], Point::new(0.0, 0.0));

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        // The bad file did not keep the good one out of the scene.
        assert_eq!(session.scene().len(), 1);
    }
}
