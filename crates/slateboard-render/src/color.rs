//! CSS-style color string parsing.

use peniko::Color;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unrecognized color: {0:?}")]
pub struct ColorParseError(String);

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Scale the alpha channel by an opacity percentage in `[0, 100]`.
    pub fn with_opacity(self, opacity: u32) -> Self {
        let factor = f64::from(opacity.min(100)) / 100.0;
        Self {
            a: (f64::from(self.a) * factor).round() as u8,
            ..self
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Parse a `transparent` keyword or `#rgb`/`#rrggbb`/`#rrggbbaa` hex
/// string.
pub fn parse_color(value: &str) -> Result<Rgba, ColorParseError> {
    if value == "transparent" {
        return Ok(Rgba::transparent());
    }

    let err = || ColorParseError(value.to_string());
    let hex = value.strip_prefix('#').ok_or_else(err)?.trim();
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(hex.get(range).unwrap_or_default(), 16).map_err(|_| err())
    };

    match hex.len() {
        3 => {
            let r = channel(0..1)? * 17;
            let g = channel(1..2)? * 17;
            let b = channel(2..3)? * 17;
            Ok(Rgba::new(r, g, b, 255))
        }
        6 => Ok(Rgba::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
        8 => Ok(Rgba::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => Err(err()),
    }
}
