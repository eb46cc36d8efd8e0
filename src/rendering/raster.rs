//! Glyph rasterization onto a canvas

use crate::rendering::builtin;
use crate::rendering::canvas::Canvas;
use crate::rendering::font::FontHandle;
use crate::Color;

/// Draw `text` with its top-left draw origin at (x, y).
///
/// The origin is the top of the line box, matching the offsets reported by
/// measurement, so text measured at (0, 0) and drawn at (x, y) occupies the
/// measured box translated by (x, y).
pub fn draw_text(canvas: &mut Canvas, font: &FontHandle, x: i32, y: i32, text: &str, color: Color) {
    match font {
        FontHandle::Builtin { scale, .. } => draw_builtin(canvas, *scale, x, y, text, color),
        FontHandle::Outline { face, size, .. } => draw_outline(canvas, face, *size, x, y, text, color),
    }
}

fn draw_builtin(canvas: &mut Canvas, scale: u32, x: i32, y: i32, text: &str, color: Color) {
    let advance = (builtin::CELL_WIDTH * scale) as i32;
    let unit = scale as i32;
    for (i, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        let cell_x = x + i as i32 * advance;
        for (col, bits) in builtin::glyph(c).iter().enumerate() {
            for row in 0..builtin::CELL_HEIGHT {
                if bits & (1 << row) != 0 {
                    canvas.fill_block(
                        cell_x + col as i32 * unit,
                        y + row as i32 * unit,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }
}

fn draw_outline(
    canvas: &mut Canvas,
    face: &fontdue::Font,
    size: f32,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
) {
    let ascent = face
        .horizontal_line_metrics(size)
        .map(|m| m.ascent)
        .unwrap_or(size);
    let baseline = y + ascent.round() as i32;

    let mut pen = 0.0f32;
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if let Some(p) = prev {
            pen += face.horizontal_kern(p, c, size).unwrap_or(0.0);
        }
        let (m, coverage) = face.rasterize(c, size);
        if m.width > 0 && m.height > 0 {
            let gx = x + (pen + m.xmin as f32).round() as i32;
            let gy = baseline - (m.ymin + m.height as i32);
            for (i, alpha) in coverage.iter().enumerate() {
                let px = gx + (i % m.width) as i32;
                let py = gy + (i / m.width) as i32;
                canvas.blend(px, py, color, *alpha);
            }
        }
        pen += m.advance_width;
        prev = Some(c);
    }
}
