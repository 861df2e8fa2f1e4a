//! Document serialization and file import.
//!
//! The wire format follows the Excalidraw envelope: a `type` tag, a format
//! version, the element list, and an `appState` block with view
//! preferences. Export filters tombstones out; import validates the whole
//! payload before anything is applied, so a rejected document never
//! touches the scene.

mod file;

pub use file::{FileOutcome, FilePayload, read_file};

use crate::element::Element;
use crate::scene::Scene;
use crate::session::{Theme, ViewPrefs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document type tag required on import.
pub const DOCUMENT_TYPE: &str = "excalidraw";
/// Format version written on export.
pub const DOCUMENT_VERSION: u32 = 1;
/// Producer name written on export.
pub const SOURCE: &str = "slateboard";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Parse(String),
    #[error("Unsupported document type: {0}")]
    WrongType(String),
    #[error("Document has no elements")]
    MissingElements,
    #[error("Invalid element data: {0}")]
    InvalidElements(String),
    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Document envelope written on export.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    #[serde(rename = "type")]
    doc_type: &'a str,
    version: u32,
    source: &'a str,
    elements: Vec<&'a Element>,
    app_state: AppState,
}

/// View preferences carried alongside the elements.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub view_background_color: String,
    pub grid_size: f64,
    pub theme: Theme,
}

/// Validated document ready to apply to a scene.
#[derive(Debug)]
pub struct ImportedScene {
    pub elements: Vec<Element>,
    pub app_state: Option<ImportedAppState>,
}

/// App state accepted on import. Everything is optional so documents from
/// other producers still load.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedAppState {
    #[serde(default)]
    pub theme: Option<Theme>,
}

/// Parse and validate a whiteboard document.
pub fn parse_scene(json: &str) -> ImportResult<ImportedScene> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ImportError::Parse(e.to_string()))?;

    let doc_type = value.get("type").and_then(|t| t.as_str()).unwrap_or("none");
    if doc_type != DOCUMENT_TYPE {
        return Err(ImportError::WrongType(doc_type.to_string()));
    }

    let Some(elements_value) = value.get("elements") else {
        return Err(ImportError::MissingElements);
    };
    let elements: Vec<Element> = serde_json::from_value(elements_value.clone())
        .map_err(|e| ImportError::InvalidElements(e.to_string()))?;

    let app_state = match value.get("appState") {
        Some(state) => match serde_json::from_value(state.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("ignoring malformed appState: {e}");
                None
            }
        },
        None => None,
    };

    Ok(ImportedScene {
        elements,
        app_state,
    })
}

/// Serialize the live elements and view preferences as a document.
pub fn export_scene(scene: &Scene, prefs: &ViewPrefs) -> Result<String, serde_json::Error> {
    let document = ExportDocument {
        doc_type: DOCUMENT_TYPE,
        version: DOCUMENT_VERSION,
        source: SOURCE,
        elements: scene.live_elements().collect(),
        app_state: AppState {
            view_background_color: prefs.view_background_color.clone(),
            grid_size: prefs.grid_size,
            theme: prefs.theme,
        },
    };
    serde_json::to_string_pretty(&document)
}
