//! Element style properties.

use serde::{Deserialize, Serialize};

/// Stroke line pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual properties copied into every element at creation time.
///
/// Colors are CSS-style strings (`"#rrggbb"` or `"transparent"`) so elements
/// serialize directly into the export document. Editing the session's current
/// style never touches elements that already exist; restyling an existing
/// element goes through the scene's update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub stroke_color: String,
    pub background_color: String,
    pub stroke_width: u32,
    pub stroke_style: StrokeStyle,
    pub roughness: f64,
    /// Opacity percentage, 0 to 100.
    pub opacity: u32,
    pub font_size: u32,
    pub font_family: String,
    pub text_align: TextAlign,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: "#000000".to_string(),
            background_color: "transparent".to_string(),
            stroke_width: 1,
            stroke_style: StrokeStyle::Solid,
            roughness: 1.0,
            opacity: 100,
            font_size: 20,
            font_family: "Virgil".to_string(),
            text_align: TextAlign::Left,
        }
    }
}

/// Partial style update. `None` fields leave the target unchanged.
#[derive(Debug, Clone, Default)]
pub struct StylePatch {
    pub stroke_color: Option<String>,
    pub background_color: Option<String>,
    pub stroke_width: Option<u32>,
    pub stroke_style: Option<StrokeStyle>,
    pub roughness: Option<f64>,
    pub opacity: Option<u32>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub text_align: Option<TextAlign>,
}

impl StylePatch {
    /// Merge the set fields into `style`. Opacity is clamped to 100.
    pub fn apply(&self, style: &mut Style) {
        if let Some(c) = &self.stroke_color {
            style.stroke_color = c.clone();
        }
        if let Some(c) = &self.background_color {
            style.background_color = c.clone();
        }
        if let Some(w) = self.stroke_width {
            style.stroke_width = w;
        }
        if let Some(s) = self.stroke_style {
            style.stroke_style = s;
        }
        if let Some(r) = self.roughness {
            style.roughness = r;
        }
        if let Some(o) = self.opacity {
            style.opacity = o.min(100);
        }
        if let Some(f) = self.font_size {
            style.font_size = f;
        }
        if let Some(f) = &self.font_family {
            style.font_family = f.clone();
        }
        if let Some(a) = self.text_align {
            style.text_align = a;
        }
    }
}
