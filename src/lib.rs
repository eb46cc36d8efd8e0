//! Card raster renderer
//!
//! Turns a sequence of semantically tagged text blocks (title, paragraph,
//! bullet, spacer) into a portrait raster image. Text is wrapped using real
//! glyph measurements, and anything enclosed in parentheses is drawn in a
//! reduced "parenthetical" sub-font, even when parenthetical and regular runs
//! alternate within one visual line. The canvas grows downward on demand.
//!
//! # Example
//!
//! ```no_run
//! use cardraster::{render_blocks, Block, RenderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let blocks = cardraster::source::parse_blocks(&[
//!     "= Groceries (weekly)",
//!     "* apples (green ones)",
//!     "* bread",
//! ]);
//! let canvas = render_blocks(&blocks, &RenderConfig::default())?;
//! canvas.save_png("groceries.png")?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod batch;
pub mod output;
pub mod rendering;
pub mod source;

pub use rendering::canvas::Canvas;
pub use rendering::layout::{LayoutEngine, RenderOutcome};
pub use source::{Block, BlockKind};

/// Font files consulted, in order, when no usable font path was requested.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/SFNS.ttf",
    "/System/Library/Fonts/SFNSText.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

/// Configuration for a render call
///
/// The defaults produce a 1080x1920 portrait card with light text on a near
/// black background. Every field can be supplied from a JSON file (see
/// [`RenderConfig::from_json_file`]); missing fields take their defaults.
///
/// # Examples
///
/// ```
/// let cfg = cardraster::RenderConfig::default();
/// assert_eq!(cfg.width, 1080);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels; fixed for the lifetime of a render call
    pub width: u32,
    /// Initial image height in pixels; grows as content requires
    pub height: u32,
    /// Margin applied on the left, right, top and bottom
    pub margin: u32,
    /// Canvas fill color
    pub background: Color,
    /// Text color
    pub foreground: Color,
    /// Bullet marker color
    pub bullet_color: Color,
    /// Preferred font file, tried before the candidate list
    pub font_path: Option<PathBuf>,
    /// Fallback font files; an empty list means only the built-in font is used
    pub font_candidates: Vec<PathBuf>,
    /// Multiplier applied to every font size and spacing constant
    pub scale: f32,
    /// Forces one parenthetical font size for every block kind
    pub paren_font_size: Option<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            margin: 64,
            background: Color::rgb(0x11, 0x11, 0x11),
            foreground: Color::rgb(0xff, 0xff, 0xff),
            bullet_color: Color::rgb(0xff, 0xff, 0xff),
            font_path: None,
            font_candidates: SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            scale: 1.2,
            paren_font_size: None,
        }
    }
}

impl RenderConfig {
    /// A configuration that never touches the filesystem for fonts.
    ///
    /// Layout with the built-in font is fully deterministic, which is what
    /// golden and scenario tests rely on.
    pub fn builtin_font() -> Self {
        Self {
            font_candidates: Vec::new(),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let cfg: RenderConfig = serde_json::from_str(&raw)?;
        Ok(cfg)
    }

    /// Spacing and font-size constants derived from `scale`.
    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics::from_scale(self.scale)
    }

    /// Check that the configuration can be laid out at all.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::Config(format!("scale must be positive, got {}", self.scale)));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if let Some(size) = self.paren_font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(Error::Config(format!(
                    "parenthetical font size must be positive, got {}",
                    size
                )));
            }
        }
        let reserved = 2 * u64::from(self.margin) + u64::from(self.metrics().bullet_indent);
        if u64::from(self.width) <= reserved {
            return Err(Error::Config(format!(
                "width {} leaves no room for text with margin {}",
                self.width, self.margin
            )));
        }
        Ok(())
    }
}

/// Pixel constants for one scale factor. All values are `round(base * scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub title_size: f32,
    pub body_size: f32,
    pub bullet_size: f32,
    pub title_line_spacing: u32,
    pub title_after_spacing: u32,
    pub body_line_spacing: u32,
    pub body_after_spacing: u32,
    pub bullet_line_spacing: u32,
    pub bullet_item_spacing: u32,
    pub bullet_indent: u32,
    pub bullet_radius: u32,
    /// Minimum extra height added by one canvas growth, on top of the margin
    pub growth_slack: u32,
}

impl LayoutMetrics {
    pub fn from_scale(scale: f32) -> Self {
        let px = |base: f32| (base * scale).round();
        let spacing = |base: f32| px(base).max(0.0) as u32;
        Self {
            title_size: px(100.0),
            body_size: px(40.0),
            bullet_size: px(70.0),
            title_line_spacing: spacing(40.0),
            title_after_spacing: spacing(100.0),
            body_line_spacing: spacing(30.0),
            body_after_spacing: spacing(50.0),
            bullet_line_spacing: spacing(30.0),
            bullet_item_spacing: spacing(100.0),
            bullet_indent: spacing(40.0),
            bullet_radius: spacing(10.0),
            growth_slack: 200,
        }
    }

    /// Size of the parenthetical variant of a font: half, floored, at least 10.
    pub fn paren_size(size: f32) -> f32 {
        (size * 0.5).floor().max(10.0)
    }
}

/// An opaque RGB color, written as `#rrggbb` or `#rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::Config(format!("invalid color literal {:?}", s));
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Color([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ])),
            3 => {
                let mut out = [0u8; 3];
                for (slot, digit) in out.iter_mut().zip(hex.chars()) {
                    let v = channel(&digit.to_string())?;
                    *slot = v * 17;
                }
                Ok(Color(out))
            }
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Lay out `blocks` and return the finished canvas.
///
/// Nothing is written to disk; persist the result with [`Canvas::save_png`]
/// once the whole sequence has been laid out.
pub fn render_blocks(blocks: &[Block], config: &RenderConfig) -> Result<Canvas> {
    let outcome = LayoutEngine::new(config.clone())?.render(blocks)?;
    Ok(outcome.canvas)
}
