//! Paint surface: draws text runs and markers onto the canvas while keeping
//! a log of every command, plus the mixed-font line renderer.

use crate::rendering::canvas::Canvas;
use crate::rendering::font::FontHandle;
use crate::rendering::measure::TextMeasure;
use crate::rendering::raster;
use crate::{Color, Result};

/// Record of one drawing operation, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Text {
        x: i32,
        y: i32,
        text: String,
        size: f32,
        parenthetical: bool,
    },
    Disc {
        cx: i32,
        cy: i32,
        radius: u32,
    },
    Grow {
        from: u32,
        to: u32,
    },
}

/// A maximal run of a line with one parenthesis membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub inside_parens: bool,
    pub text: String,
}

impl Segment {
    fn new(inside_parens: bool, text: String) -> Self {
        Self { inside_parens, text }
    }
}

/// Split a line that starts outside any parenthesis into segments.
///
/// Only the outermost `(` opens a parenthetical segment and only its matching
/// `)` closes it; nested pairs stay inside. A `)` with nothing open is plain
/// text. A segment still open at the end of the line is parenthetical.
pub fn split_segments(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut depth: u32 = 0;

    for c in line.chars() {
        match c {
            '(' => {
                if depth == 0 && !buf.is_empty() {
                    segments.push(Segment::new(false, std::mem::take(&mut buf)));
                }
                depth += 1;
                buf.push(c);
            }
            ')' if depth > 0 => {
                buf.push(c);
                depth -= 1;
                if depth == 0 {
                    segments.push(Segment::new(true, std::mem::take(&mut buf)));
                }
            }
            _ => buf.push(c),
        }
    }
    if !buf.is_empty() {
        segments.push(Segment::new(depth > 0, buf));
    }
    segments
}

/// Owns the canvas for one render call and logs everything drawn on it.
#[derive(Debug)]
pub struct Painter {
    canvas: Canvas,
    commands: Vec<PaintCommand>,
}

impl Painter {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    pub fn finish(self) -> (Canvas, Vec<PaintCommand>) {
        (self.canvas, self.commands)
    }

    /// Grow the canvas to `at_least` rows if it is shorter.
    pub fn ensure_height(&mut self, at_least: u32) -> Result<bool> {
        let from = self.canvas.height();
        let grown = self.canvas.ensure_height(at_least)?;
        if grown {
            self.commands.push(PaintCommand::Grow {
                from,
                to: self.canvas.height(),
            });
        }
        Ok(grown)
    }

    /// Draw a run in a single font.
    pub fn text(&mut self, font: &FontHandle, x: i32, y: i32, text: &str, color: Color, parenthetical: bool) {
        raster::draw_text(&mut self.canvas, font, x, y, text, color);
        self.commands.push(PaintCommand::Text {
            x,
            y,
            text: text.to_string(),
            size: font.size(),
            parenthetical,
        });
    }

    pub fn disc(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        self.canvas.fill_disc(cx, cy, radius, color);
        self.commands.push(PaintCommand::Disc { cx, cy, radius });
    }

    /// Draw a line that starts outside parentheses, switching to `paren` for
    /// every parenthetical segment.
    ///
    /// Parenthetical segments are shifted down so both fonts share a baseline.
    /// Each segment advances the pen by its own measured width. Returns the
    /// total advance.
    pub fn draw_mixed(
        &mut self,
        x: i32,
        y: i32,
        line: &str,
        normal: &FontHandle,
        paren: &FontHandle,
        color: Color,
    ) -> Result<u32> {
        let baseline_shift = (normal.ascent() - paren.ascent()).round() as i32;
        let mut cx = x;
        for segment in split_segments(line) {
            let (font, cy) = if segment.inside_parens {
                (paren, y + baseline_shift)
            } else {
                (normal, y)
            };
            let width = font.measure(&segment.text)?.width;
            self.text(font, cx, cy, &segment.text, color, segment.inside_parens);
            cx += width as i32;
        }
        Ok((cx - x) as u32)
    }
}
