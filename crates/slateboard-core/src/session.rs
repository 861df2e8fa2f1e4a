//! Editing session: owns the scene, camera, history, and tool state.
//!
//! The session is the single entry point for the hosting shell. Pointer and
//! keyboard events come in as [`PointerEvent`]/[`KeyEvent`] values in screen
//! coordinates, the session converts them to scene space, resolves hits,
//! records history, and applies mutations. A session is an ordinary value
//! with no process-wide state, so multiple independent boards can coexist.

use crate::camera::Camera;
use crate::element::{Element, ElementId, ElementKind};
use crate::geometry;
use crate::history::History;
use crate::hit;
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::io::{self, FileOutcome, FilePayload, ImportError, ImportedScene};
use crate::scene::Scene;
use crate::style::{Style, StylePatch};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Line spacing for text imported from plain-text files.
const TEXT_IMPORT_LINE_SPACING: f64 = 30.0;
const TEXT_IMPORT_FONT_SIZE: u32 = 16;
const TEXT_IMPORT_FONT_FAMILY: &str = "Arial";

/// Active editing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Pen,
    Rectangle,
    Ellipse,
    Diamond,
    Line,
    Arrow,
    Text,
    Hand,
    Eraser,
}

/// Canvas color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Presentation preferences consumed by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPrefs {
    pub theme: Theme,
    pub view_background_color: String,
    pub grid_size: f64,
    pub show_grid: bool,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            view_background_color: "#ffffff".to_string(),
            grid_size: 20.0,
            show_grid: true,
        }
    }
}

/// Transient pointer interaction. Exactly one phase is active at a time
/// and a new one can only begin from `Idle`.
#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    /// An element is being drawn; it joins the scene on pointer-up.
    Drawing { element: Element },
    /// Selected elements follow the pointer. `origin` holds their state at
    /// grab time so each update recomputes positions from scratch instead
    /// of accumulating deltas. The pre-move snapshot is recorded once, at
    /// the first nonzero displacement.
    Moving {
        grab: Point,
        origin: Vec<Element>,
        recorded: bool,
    },
    /// The camera follows the pointer by raw screen deltas.
    Panning { last: Point },
    /// Pointer sweep deletes the topmost element it passes over.
    Erasing,
}

/// One whiteboard editing session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    scene: Scene,
    camera: Camera,
    history: History,
    tool: Tool,
    style: Style,
    prefs: ViewPrefs,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer event, in screen coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Scroll { position, delta } => self.wheel_zoom(position, delta),
        }
    }

    /// Feed one keyboard event. Key names follow the web `KeyboardEvent.key`
    /// convention ("z", "Delete", "Escape", ...).
    pub fn handle_key(&mut self, event: KeyEvent) {
        let KeyEvent::Pressed { key, modifiers } = event else {
            return;
        };

        if modifiers.command() {
            match key.as_str() {
                "z" => {
                    self.undo();
                }
                "y" => {
                    self.redo();
                }
                "a" => self.select_all(),
                "g" => self.toggle_grid(),
                _ => {}
            }
            return;
        }

        match key.as_str() {
            "v" => self.set_tool(Tool::Select),
            "p" => self.set_tool(Tool::Pen),
            "r" => self.set_tool(Tool::Rectangle),
            "o" => self.set_tool(Tool::Ellipse),
            "d" => self.set_tool(Tool::Diamond),
            "l" => self.set_tool(Tool::Line),
            "a" => self.set_tool(Tool::Arrow),
            "t" => self.set_tool(Tool::Text),
            "h" => self.set_tool(Tool::Hand),
            "e" => self.set_tool(Tool::Eraser),
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => self.cancel(),
            _ => {}
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton) {
        if !matches!(self.phase, Phase::Idle) {
            return;
        }

        if button == MouseButton::Middle || self.tool == Tool::Hand {
            self.phase = Phase::Panning { last: position };
            return;
        }

        let scene_point = self.camera.screen_to_scene(position);
        match self.tool {
            Tool::Select => {
                let hit = hit::top_element_at(scene_point, self.scene.elements()).map(|e| e.id);
                match hit {
                    Some(id) => {
                        if !self.scene.is_selected(id) {
                            self.scene.set_selection(vec![id]);
                        }
                        let origin: Vec<Element> =
                            self.scene.selected_elements().cloned().collect();
                        self.phase = Phase::Moving {
                            grab: scene_point,
                            origin,
                            recorded: false,
                        };
                    }
                    None => self.scene.clear_selection(),
                }
            }
            Tool::Eraser => {
                Self::erase_topmost(&mut self.scene, &mut self.history, scene_point);
                self.phase = Phase::Erasing;
            }
            Tool::Pen => {
                let element =
                    Element::freedraw(scene_point, vec![scene_point], self.style.clone());
                self.phase = Phase::Drawing { element };
            }
            Tool::Rectangle => self.begin_shape(ElementKind::Rectangle, scene_point),
            Tool::Ellipse => self.begin_shape(ElementKind::Ellipse, scene_point),
            Tool::Diamond => self.begin_shape(ElementKind::Diamond, scene_point),
            Tool::Line => self.begin_shape(ElementKind::Line, scene_point),
            Tool::Arrow => self.begin_shape(ElementKind::Arrow, scene_point),
            // Text placement goes through `insert_text` once the shell has
            // collected the string; the hand tool was handled above.
            Tool::Text | Tool::Hand => {}
        }
    }

    fn begin_shape(&mut self, kind: ElementKind, at: Point) {
        let element = Element::new(kind, at.x, at.y, at.x, at.y, self.style.clone());
        self.phase = Phase::Drawing { element };
    }

    fn pointer_move(&mut self, position: Point) {
        let scene_point = self.camera.screen_to_scene(position);
        match &mut self.phase {
            Phase::Idle => {}
            Phase::Panning { last } => {
                let delta = position - *last;
                *last = position;
                self.camera.pan(delta);
            }
            Phase::Drawing { element } => match &mut element.kind {
                ElementKind::Freedraw { points } => points.push(scene_point),
                _ => {
                    element.x2 = scene_point.x;
                    element.y2 = scene_point.y;
                }
            },
            Phase::Moving {
                grab,
                origin,
                recorded,
            } => {
                let delta = scene_point - *grab;
                if !*recorded && delta != Vec2::ZERO {
                    self.history.record(self.scene.elements().to_vec());
                    *recorded = true;
                }
                for element in origin.iter() {
                    let mut moved = element.clone();
                    moved.translate(delta);
                    let id = moved.id;
                    self.scene.update_element(id, |e| *e = moved);
                }
            }
            Phase::Erasing => {
                Self::erase_topmost(&mut self.scene, &mut self.history, scene_point);
            }
        }
    }

    fn pointer_up(&mut self) {
        match std::mem::take(&mut self.phase) {
            Phase::Drawing { element } => self.commit_element(element),
            Phase::Idle | Phase::Moving { .. } | Phase::Panning { .. } | Phase::Erasing => {}
        }
    }

    fn wheel_zoom(&mut self, position: Point, delta: Vec2) {
        let factor = if delta.y > 0.0 { 0.9 } else { 1.1 };
        self.camera.zoom_at(position, factor);
    }

    fn commit_element(&mut self, element: Element) {
        self.history.record(self.scene.elements().to_vec());
        log::debug!("committing {} element {}", element.kind.name(), element.id);
        self.scene.add_element(element);
    }

    fn erase_topmost(scene: &mut Scene, history: &mut History, point: Point) {
        let target = hit::top_element_at(point, scene.elements()).map(|e| e.id);
        if let Some(id) = target {
            history.record(scene.elements().to_vec());
            scene.delete_element(id);
            log::debug!("erased element {id}");
        }
    }

    /// Restore the previous history snapshot. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                let elements = snapshot.to_vec();
                self.scene.set_elements(elements);
                log::debug!("undo to history entry {:?}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    /// Reapply the next history snapshot. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                let elements = snapshot.to_vec();
                self.scene.set_elements(elements);
                log::debug!("redo to history entry {:?}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    /// Switch the active tool. Any tool other than select drops the
    /// current selection.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != Tool::Select {
            self.scene.clear_selection();
        }
        self.tool = tool;
    }

    /// Select every live element.
    pub fn select_all(&mut self) {
        let ids = self.scene.live_ids();
        self.scene.set_selection(ids);
    }

    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
    }

    /// Tombstone every selected element as a single undoable action.
    pub fn delete_selected(&mut self) {
        if self.scene.selected_ids().is_empty() {
            return;
        }
        self.history.record(self.scene.elements().to_vec());
        let ids: Vec<ElementId> = self.scene.selected_ids().to_vec();
        for id in ids {
            self.scene.delete_element(id);
        }
        self.scene.clear_selection();
    }

    /// Abort the current interaction: an in-progress element is dropped
    /// without joining the scene, a move puts the grabbed elements back
    /// where they started. Also clears the selection and returns to the
    /// select tool.
    pub fn cancel(&mut self) {
        if let Phase::Moving { origin, .. } = std::mem::take(&mut self.phase) {
            for element in origin {
                let id = element.id;
                self.scene.update_element(id, |e| *e = element);
            }
        }
        self.scene.clear_selection();
        self.set_tool(Tool::Select);
    }

    /// Remove every element. Not recorded: the board starts over and the
    /// old timeline stays as it was.
    pub fn clear_canvas(&mut self) {
        self.scene.clear();
        log::info!("canvas cleared");
    }

    /// Merge a style patch into the current style and into every selected
    /// element. Unselected elements keep the style they were created with.
    pub fn set_style(&mut self, patch: StylePatch) {
        patch.apply(&mut self.style);
        let ids: Vec<ElementId> = self.scene.selected_ids().to_vec();
        for id in ids {
            let patch = patch.clone();
            self.scene.update_element(id, |e| patch.apply(&mut e.style));
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
        self.prefs.view_background_color = match theme {
            Theme::Light => "#ffffff".to_string(),
            Theme::Dark => "#1e1e1e".to_string(),
        };
    }

    pub fn toggle_grid(&mut self) {
        self.prefs.show_grid = !self.prefs.show_grid;
    }

    /// Place a new text element at a scene position.
    pub fn insert_text(&mut self, at: Point, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let element = Element::text(at, text, self.style.clone());
        self.commit_element(element);
    }

    /// Replace the content of an existing text element. The anchor box is
    /// kept as is. Returns false when `id` is not a live text element.
    pub fn edit_text(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.is_empty() {
            return false;
        }
        let is_text = self
            .scene
            .element(id)
            .is_some_and(|e| !e.is_deleted && matches!(e.kind, ElementKind::Text { .. }));
        if !is_text {
            return false;
        }
        self.history.record(self.scene.elements().to_vec());
        self.scene.update_element(id, |e| {
            if let ElementKind::Text { text: content } = &mut e.kind {
                *content = text;
            }
        });
        true
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    /// Frame every live element in the given viewport. No-op when the
    /// scene has nothing to show.
    pub fn zoom_to_fit(&mut self, viewport: Size) {
        let mut bounds: Option<Rect> = None;
        for element in self.scene.live_elements() {
            let b = geometry::element_bounds(element);
            bounds = Some(match bounds {
                Some(acc) => acc.union(b),
                None => b,
            });
        }
        if let Some(bounds) = bounds {
            self.camera.fit_bounds(bounds, viewport);
        }
    }

    /// Replace the scene with a parsed document. The previous element list
    /// is recorded first, so the import is a single undoable step.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        let imported = io::parse_scene(json)?;
        self.apply_imported(imported);
        Ok(())
    }

    fn apply_imported(&mut self, imported: ImportedScene) {
        self.history.record(self.scene.elements().to_vec());
        let count = imported.elements.len();
        self.scene.set_elements(imported.elements);
        if let Some(theme) = imported.app_state.and_then(|s| s.theme) {
            self.set_theme(theme);
        }
        log::info!("imported scene with {count} elements");
    }

    /// Add one text element per non-blank line, keeping blank lines as
    /// vertical gaps. The whole file is one undoable action.
    pub fn import_text_lines(&mut self, origin: Point, lines: &[String]) {
        self.history.record(self.scene.elements().to_vec());
        let mut style = self.style.clone();
        style.font_size = TEXT_IMPORT_FONT_SIZE;
        style.font_family = TEXT_IMPORT_FONT_FAMILY.to_string();
        for (index, line) in lines.iter().enumerate() {
            let content = line.trim();
            if content.is_empty() {
                continue;
            }
            let at = Point::new(
                origin.x,
                origin.y + index as f64 * TEXT_IMPORT_LINE_SPACING,
            );
            self.scene
                .add_element(Element::text(at, content, style.clone()));
        }
    }

    /// Import a batch of files, one outcome per file. A failed file is
    /// skipped without affecting the others or the scene.
    pub fn import_files<P: AsRef<Path>>(&mut self, paths: &[P], origin: Point) -> Vec<FileOutcome> {
        paths
            .iter()
            .map(|path| self.import_file(path.as_ref(), origin))
            .collect()
    }

    fn import_file(&mut self, path: &Path, origin: Point) -> FileOutcome {
        let result = io::read_file(path).map(|payload| match payload {
            FilePayload::Scene(imported) => self.apply_imported(imported),
            FilePayload::TextLines(lines) => self.import_text_lines(origin, &lines),
        });
        if let Err(error) = &result {
            log::warn!("skipping {}: {error}", path.display());
        }
        FileOutcome {
            path: path.to_path_buf(),
            result,
        }
    }

    /// Serialize the live elements and view preferences as a document.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        io::export_scene(&self.scene, &self.prefs)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn prefs(&self) -> &ViewPrefs {
        &self.prefs
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.history.cursor()
    }

    /// The element being drawn right now, if any. Rendered on top of the
    /// scene but not part of it until pointer-up.
    pub fn current_element(&self) -> Option<&Element> {
        match &self.phase {
            Phase::Drawing { element } => Some(element),
            _ => None,
        }
    }

    pub fn is_interacting(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }
}
