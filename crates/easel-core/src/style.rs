//! Style attributes chosen by the user and the paint stored on shapes.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
///
/// Deserializes from either `{"r", "g", "b", "a"}` or a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse a CSS-style hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`).
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => Some(Self::new(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
                255,
            )),
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgba {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
}

fn opaque() -> u8 {
    255
}

impl TryFrom<ColorRepr> for SerializableColor {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(hex) => Self::from_hex(&hex).ok_or_else(|| format!("invalid color {hex:?}")),
            ColorRepr::Rgba { r, g, b, a } => Ok(Self::new(r, g, b, a)),
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style attributes selected in the UI.
///
/// These are read once when a gesture starts; changing them later never
/// touches shapes that were already drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    pub stroke_color: SerializableColor,
    pub fill_color: SerializableColor,
    /// Stroke width in pixels, at least 1.
    pub stroke_width_px: f64,
    /// Opacity in percent, 0 to 100.
    pub opacity_percent: u8,
    pub fill_enabled: bool,
}

impl Default for StyleAttributes {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            fill_color: SerializableColor::white(),
            stroke_width_px: 2.0,
            opacity_percent: 100,
            fill_enabled: false,
        }
    }
}

impl StyleAttributes {
    pub const MIN_STROKE_WIDTH: f64 = 1.0;
    pub const MAX_OPACITY: u8 = 100;

    /// Clamp out-of-range values, returning true if anything changed.
    pub fn clamp(&mut self) -> bool {
        let mut changed = false;
        if self.stroke_width_px.is_nan() || self.stroke_width_px < Self::MIN_STROKE_WIDTH {
            log::warn!(
                "Stroke width {} below minimum, clamping to {}",
                self.stroke_width_px,
                Self::MIN_STROKE_WIDTH
            );
            self.stroke_width_px = Self::MIN_STROKE_WIDTH;
            changed = true;
        }
        if self.opacity_percent > Self::MAX_OPACITY {
            log::warn!("Opacity {}% out of range, clamping to 100%", self.opacity_percent);
            self.opacity_percent = Self::MAX_OPACITY;
            changed = true;
        }
        changed
    }

    /// Resolve into the paint stored on a new shape.
    pub fn to_shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width_px.max(Self::MIN_STROKE_WIDTH),
            fill_color: self.fill_enabled.then_some(self.fill_color),
            opacity: f64::from(self.opacity_percent.min(Self::MAX_OPACITY)) / 100.0,
        }
    }
}

/// Paint properties of a shape in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for ShapeStyle {
    fn default() -> Self {
        StyleAttributes::default().to_shape_style()
    }
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Get the stroke color with opacity applied.
    pub fn stroke_with_opacity(&self) -> Color {
        self.stroke().multiply_alpha(self.opacity as f32)
    }

    /// Get the fill color with opacity applied.
    pub fn fill_with_opacity(&self) -> Option<Color> {
        self.fill().map(|c| c.multiply_alpha(self.opacity as f32))
    }
}
