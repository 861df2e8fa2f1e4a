//! Slateboard Core Library
//!
//! Platform-agnostic scene model, hit-testing, camera transform, and
//! undo/redo engine for the Slateboard whiteboard.

pub mod camera;
pub mod element;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod input;
pub mod io;
pub mod scene;
pub mod session;
pub mod style;

pub use camera::Camera;
pub use element::{Element, ElementId, ElementKind};
pub use history::{History, HistoryEntry};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use io::{FileOutcome, FilePayload, ImportError, ImportResult, ImportedScene};
pub use scene::Scene;
pub use session::{Session, Theme, Tool, ViewPrefs};
pub use style::{StrokeStyle, Style, StylePatch, TextAlign};
