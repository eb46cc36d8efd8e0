use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use cardraster::rendering::PaintCommand;
use cardraster::source::{parse_blocks, split_sections};
use cardraster::{render_blocks, LayoutEngine, RenderConfig, RenderOutcome};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

/// One line per paint command, prefixed by the final canvas size and cursor.
fn transcript(outcome: &RenderOutcome) -> String {
    let mut out = format!(
        "canvas {}x{} cursor {}\n",
        outcome.canvas.width(),
        outcome.canvas.height(),
        outcome.cursor_y
    );
    for command in &outcome.commands {
        match command {
            PaintCommand::Text { x, y, text, size, parenthetical } => {
                let face = if *parenthetical { "paren" } else { "normal" };
                writeln!(out, "text {} {} {} {} {:?}", x, y, size, face, text).unwrap();
            }
            PaintCommand::Disc { cx, cy, radius } => {
                writeln!(out, "disc {} {} {}", cx, cy, radius).unwrap();
            }
            PaintCommand::Grow { from, to } => {
                writeln!(out, "grow {} {}", from, to).unwrap();
            }
        }
    }
    out
}

#[test]
fn golden_card_matches_fixture() {
    let doc = fs::read_to_string("tests/goldens/pages/card1.txt").expect("read fixture");
    let sections = split_sections(&doc);
    assert_eq!(sections.len(), 1);
    let blocks = parse_blocks(&sections[0]);
    let engine = LayoutEngine::new(RenderConfig::builtin_font()).expect("engine");
    let actual = transcript(&engine.render(&blocks).expect("render"));

    let expected_path = golden_path("card1.layout");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &actual).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
        panic!(
            "unable to read golden {:?} ({}); run with UPDATE_GOLDENS=1 to create it",
            expected_path, e
        )
    });
    assert_eq!(actual, expected);
}

#[test]
fn rendering_is_deterministic() {
    let blocks = parse_blocks(&["= Same (every) time", "* one", "* two (2)"]);
    let cfg = RenderConfig::builtin_font();
    let a = render_blocks(&blocks, &cfg).unwrap();
    let b = render_blocks(&blocks, &cfg).unwrap();
    assert_eq!(a.digest(), b.digest());
}
