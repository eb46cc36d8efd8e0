//! Text measurement

use crate::rendering::builtin;
use crate::rendering::font::FontHandle;
use crate::{Error, Result};

/// Pixel bounds that drawing a string at origin (0, 0) would occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    /// From the leftmost of origin/ink to the rightmost of pen advance/ink
    pub width: u32,
    /// Ink height; zero when the text has no visible glyphs
    pub height: u32,
    /// Offset from the draw origin down to the top of the ink
    pub top: i32,
}

/// Anything that can tell how large a string will be when drawn.
///
/// Implementations must be pure: the same text always measures the same.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> Result<TextExtent>;
}

impl TextMeasure for FontHandle {
    fn measure(&self, text: &str) -> Result<TextExtent> {
        match self {
            FontHandle::Builtin { scale, .. } => Ok(measure_builtin(*scale, text)),
            FontHandle::Outline { face, size, path } => {
                measure_outline(face, *size, text).map_err(|what| {
                    Error::Measurement(format!("{} for {:?} in {:?} at {}px", what, text, path, size))
                })
            }
        }
    }
}

fn measure_builtin(scale: u32, text: &str) -> TextExtent {
    let chars = text.chars().count() as u32;
    let visible = text.chars().any(|c| !c.is_whitespace());
    TextExtent {
        width: chars * builtin::CELL_WIDTH * scale,
        height: if visible { builtin::CELL_HEIGHT * scale } else { 0 },
        top: 0,
    }
}

fn measure_outline(face: &fontdue::Font, size: f32, text: &str) -> std::result::Result<TextExtent, &'static str> {
    let ascent = face
        .horizontal_line_metrics(size)
        .map(|m| m.ascent)
        .unwrap_or(size);

    let mut pen = 0.0f32;
    let mut left = 0.0f32;
    let mut right = 0.0f32;
    let mut top = f32::INFINITY;
    let mut bottom = f32::NEG_INFINITY;
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if let Some(p) = prev {
            pen += face.horizontal_kern(p, c, size).unwrap_or(0.0);
        }
        let m = face.metrics(c, size);
        if m.width > 0 && m.height > 0 {
            let x0 = pen + m.xmin as f32;
            left = left.min(x0);
            right = right.max(x0 + m.width as f32);
            top = top.min(-(m.ymin as f32 + m.height as f32));
            bottom = bottom.max(-(m.ymin as f32));
        }
        pen += m.advance_width;
        prev = Some(c);
    }
    right = right.max(pen);

    if !(pen.is_finite() && left.is_finite() && right.is_finite() && ascent.is_finite()) {
        return Err("non-finite glyph metrics");
    }
    if top.is_infinite() {
        return Ok(TextExtent {
            width: (right - left).ceil() as u32,
            height: 0,
            top: 0,
        });
    }
    Ok(TextExtent {
        width: (right - left).ceil() as u32,
        height: (bottom - top).ceil() as u32,
        top: (ascent + top).round() as i32,
    })
}
