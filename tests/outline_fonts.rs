use std::path::PathBuf;

use cardraster::rendering::{
    split_segments, wrap_paren_aware, FontHandle, FontProvider, PaintCommand, Painter, TextMeasure,
};
use cardraster::{Block, Canvas, Color, LayoutEngine, RenderConfig, SYSTEM_FONT_CANDIDATES};

const SAMPLES: &[&str] = &[
    "The quick brown fox jumps over the lazy dog while the cat watches (silently) from the fence",
    "Shipping went fine (mostly) and the new layout engine wraps long lines without trouble.",
    "(a long aside that (keeps nesting) for quite a while before it closes) and then plain text",
    "AVATAR WAVE Toyota typography kerning pairs (LT AV) are narrower than their parts",
];

/// Resolve a pair of outline fonts, or `None` when no system font is installed.
fn outline_pair(size: f32, paren_size: f32) -> Option<(FontHandle, FontHandle)> {
    let candidates: Vec<PathBuf> = SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect();
    let mut provider = FontProvider::new(candidates);
    let normal = provider.resolve(None, size);
    let paren = provider.resolve(None, paren_size);
    if normal.is_builtin() {
        println!("No system font installed. Skipping.");
        return None;
    }
    Some((normal, paren))
}

#[test]
fn outline_wrapped_lines_fit_the_width() {
    for (size, paren_size) in [(120.0, 60.0), (48.0, 24.0), (84.0, 42.0)] {
        let Some((normal, paren)) = outline_pair(size, paren_size) else {
            return;
        };
        for max_width in [300, 500, 952] {
            for text in SAMPLES {
                let lines = wrap_paren_aware(text, &normal, &paren, max_width).unwrap();
                for line in &lines {
                    if line.text.split_whitespace().count() < 2 {
                        continue;
                    }
                    let font = if line.parenthetical { &paren } else { &normal };
                    let width = font.measure(&line.text).unwrap().width;
                    assert!(
                        width <= max_width,
                        "{:?} is {}px wide at {}px, limit {}",
                        line.text,
                        width,
                        size,
                        max_width
                    );
                }
                let words: Vec<&str> = lines.iter().flat_map(|l| l.text.split_whitespace()).collect();
                assert_eq!(words, text.split_whitespace().collect::<Vec<_>>());
            }
        }
    }
}

#[test]
fn outline_width_grows_with_text() {
    let Some((normal, _)) = outline_pair(48.0, 24.0) else {
        return;
    };
    let text = SAMPLES[3];
    let mut prev = 0;
    for (i, _) in text.char_indices().skip(1) {
        let width = normal.measure(&text[..i]).unwrap().width;
        assert!(width + 1 >= prev, "{:?} shrank from {} to {}", &text[..i], prev, width);
        prev = width;
    }
    assert!(normal.measure("   ").unwrap().width > 0);
    assert_eq!(normal.measure("   ").unwrap().height, 0);
}

#[test]
fn outline_segments_share_a_baseline() {
    let Some((normal, paren)) = outline_pair(48.0, 24.0) else {
        return;
    };
    let shift = (normal.ascent() - paren.ascent()).round() as i32;
    assert!(shift > 0);

    let mut painter = Painter::new(Canvas::new(1080, 200, Color::rgb(0, 0, 0)).unwrap());
    let line = "see (page two) here";
    let advance = painter
        .draw_mixed(10, 40, line, &normal, &paren, Color::rgb(255, 255, 255))
        .unwrap();

    let runs: Vec<(i32, i32, bool)> = painter
        .commands()
        .iter()
        .filter_map(|c| match c {
            PaintCommand::Text { x, y, parenthetical, .. } => Some((*x, *y, *parenthetical)),
            _ => None,
        })
        .collect();
    assert_eq!(runs.len(), split_segments(line).len());
    assert_eq!(runs[0], (10, 40, false));
    assert_eq!(runs[1].1, 40 + shift);
    assert!(runs[1].2);
    assert_eq!(runs[2].1, 40);
    assert!(runs[0].0 < runs[1].0 && runs[1].0 < runs[2].0);
    assert_eq!(runs[2].0 + normal.measure(" here").unwrap().width as i32, 10 + advance as i32);
}

#[test]
fn outline_render_inks_the_canvas() {
    let cfg = RenderConfig::default();
    let engine = LayoutEngine::new(cfg.clone()).unwrap();
    if engine.fonts(cardraster::BlockKind::Title).normal.is_builtin() {
        println!("No system font installed. Skipping.");
        return;
    }
    let outcome = engine
        .render(&[Block::title("Outline (check)"), Block::bullet("one"), Block::paragraph("done")])
        .unwrap();

    let inked = (0..outcome.canvas.height())
        .flat_map(|y| (0..outcome.canvas.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| outcome.canvas.pixel(x, y) != Some(cfg.background))
        .count();
    assert!(inked > 1000);
    assert!(outcome.canvas.height() >= outcome.cursor_y + cfg.margin);
}
