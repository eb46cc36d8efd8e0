//! Block layout: vertical cursor, per-kind spacing, bullets and canvas growth

use crate::rendering::canvas::Canvas;
use crate::rendering::font::{FontHandle, FontProvider};
use crate::rendering::measure::TextMeasure;
use crate::rendering::paint::{PaintCommand, Painter};
use crate::rendering::wrap::wrap_paren_aware;
use crate::source::{Block, BlockKind};
use crate::{LayoutMetrics, RenderConfig, Result};

/// The regular and parenthetical fonts of one block kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FontPair {
    pub normal: FontHandle,
    pub paren: FontHandle,
}

impl FontPair {
    fn resolve(provider: &mut FontProvider, config: &RenderConfig, size: f32) -> Self {
        let requested = config.font_path.as_deref();
        let paren_size = config
            .paren_font_size
            .unwrap_or_else(|| LayoutMetrics::paren_size(size));
        Self {
            normal: provider.resolve(requested, size),
            paren: provider.resolve(requested, paren_size),
        }
    }
}

/// Everything a render call produced.
#[derive(Debug)]
pub struct RenderOutcome {
    pub canvas: Canvas,
    /// Every text run, marker and growth, in drawing order
    pub commands: Vec<PaintCommand>,
    /// Vertical cursor after the last block
    pub cursor_y: u32,
}

impl RenderOutcome {
    /// Number of times the canvas was reallocated
    pub fn growths(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::Grow { .. }))
            .count()
    }
}

/// Per-block drawing parameters.
struct Flow<'a> {
    fonts: &'a FontPair,
    x: i32,
    max_width: u32,
    line_spacing: u32,
    after_spacing: u32,
    marker: bool,
}

/// Lays out blocks top to bottom on a canvas of fixed width.
pub struct LayoutEngine {
    config: RenderConfig,
    metrics: LayoutMetrics,
    title: FontPair,
    body: FontPair,
    bullet: FontPair,
}

impl LayoutEngine {
    /// Validate `config` and resolve all fonts for one render.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let mut provider = FontProvider::new(config.font_candidates.clone());
        Self::with_provider(config, &mut provider)
    }

    pub fn with_provider(config: RenderConfig, provider: &mut FontProvider) -> Result<Self> {
        config.validate()?;
        let metrics = config.metrics();
        let title = FontPair::resolve(provider, &config, metrics.title_size);
        let body = FontPair::resolve(provider, &config, metrics.body_size);
        let bullet = FontPair::resolve(provider, &config, metrics.bullet_size);
        Ok(Self {
            config,
            metrics,
            title,
            body,
            bullet,
        })
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Fonts used for blocks of `kind`; spacers use the body fonts.
    pub fn fonts(&self, kind: BlockKind) -> &FontPair {
        match kind {
            BlockKind::Title => &self.title,
            BlockKind::Bullet => &self.bullet,
            BlockKind::Paragraph | BlockKind::Spacer => &self.body,
        }
    }

    /// Width available to title and paragraph text.
    pub fn text_width(&self) -> u32 {
        self.config.width - 2 * self.config.margin
    }

    /// Width available to bullet text.
    pub fn bullet_text_width(&self) -> u32 {
        self.text_width() - self.metrics.bullet_indent
    }

    /// Lay out `blocks`. An empty sequence yields a blank canvas.
    pub fn render(&self, blocks: &[Block]) -> Result<RenderOutcome> {
        let cfg = &self.config;
        let m = &self.metrics;
        let mut painter = Painter::new(Canvas::new(cfg.width, cfg.height, cfg.background)?);
        let x = cfg.margin as i32;
        let mut y = cfg.margin;
        log::debug!("laying out {} blocks on {}x{}", blocks.len(), cfg.width, cfg.height);
        self.grow_for(&mut painter, y)?;

        for (idx, block) in blocks.iter().enumerate() {
            let next_kind = blocks.get(idx + 1).map(|b| b.kind);
            y = match block.kind {
                BlockKind::Title => self.flow(
                    &mut painter,
                    &block.text,
                    y,
                    Flow {
                        fonts: &self.title,
                        x,
                        max_width: self.text_width(),
                        line_spacing: m.title_line_spacing,
                        after_spacing: m.title_after_spacing,
                        marker: false,
                    },
                )?,
                BlockKind::Paragraph => self.flow(
                    &mut painter,
                    &block.text,
                    y,
                    Flow {
                        fonts: &self.body,
                        x,
                        max_width: self.text_width(),
                        line_spacing: m.body_line_spacing,
                        after_spacing: m.body_after_spacing,
                        marker: false,
                    },
                )?,
                BlockKind::Bullet => {
                    let after_spacing = if next_kind == Some(BlockKind::Bullet) {
                        m.bullet_item_spacing
                    } else {
                        m.body_after_spacing
                    };
                    self.flow(
                        &mut painter,
                        &block.text,
                        y,
                        Flow {
                            fonts: &self.bullet,
                            x,
                            max_width: self.bullet_text_width(),
                            line_spacing: m.bullet_line_spacing,
                            after_spacing,
                            marker: true,
                        },
                    )?
                }
                BlockKind::Spacer => y.saturating_add((self.body.normal.size() / 2.0).floor() as u32),
            };
            self.grow_for(&mut painter, y)?;
        }

        let (canvas, commands) = painter.finish();
        log::debug!("layout finished at y={} on a {}px tall canvas", y, canvas.height());
        Ok(RenderOutcome {
            canvas,
            commands,
            cursor_y: y,
        })
    }

    /// Wrap and draw one block starting at `y`; returns the cursor after it.
    fn flow(&self, painter: &mut Painter, text: &str, mut y: u32, flow: Flow<'_>) -> Result<u32> {
        let fonts = flow.fonts;
        let text_x = if flow.marker {
            flow.x + self.metrics.bullet_indent as i32
        } else {
            flow.x
        };
        let lines = wrap_paren_aware(text, &fonts.normal, &fonts.paren, flow.max_width)?;
        let count = lines.len();

        for (i, line) in lines.iter().enumerate() {
            let font = if line.parenthetical { &fonts.paren } else { &fonts.normal };
            let extent = font.measure(&line.text)?;
            self.grow_for(painter, y.saturating_add(extent.height))?;

            if flow.marker && i == 0 {
                let cy = y as i32 + extent.top + (extent.height / 2) as i32;
                painter.disc(flow.x, cy, self.metrics.bullet_radius, self.config.bullet_color);
            }

            if line.parenthetical {
                painter.text(&fonts.paren, text_x, y as i32, &line.text, self.config.foreground, true);
            } else {
                painter.draw_mixed(
                    text_x,
                    y as i32,
                    &line.text,
                    &fonts.normal,
                    &fonts.paren,
                    self.config.foreground,
                )?;
            }

            let spacing = if i + 1 < count {
                flow.line_spacing
            } else {
                flow.after_spacing
            };
            y = y.saturating_add(extent.height).saturating_add(spacing);
        }
        Ok(y)
    }

    /// Grow the canvas when `y` has passed the bottom margin, leaving at least
    /// one margin below it.
    fn grow_for(&self, painter: &mut Painter, y: u32) -> Result<()> {
        let height = painter.canvas().height();
        let margin = self.config.margin;
        let needed = y.saturating_add(margin);
        if needed > height {
            let extra = (margin + self.metrics.growth_slack).max(needed - height);
            painter.ensure_height(height.saturating_add(extra))?;
        }
        Ok(())
    }
}
