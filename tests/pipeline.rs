use std::fs;

use cardraster::batch::render_document;
use cardraster::{Error, RenderConfig};

#[test]
fn writes_one_png_per_section() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("cards");
    let doc = "ignored preamble\n= First Card\nbody (aside)\n= Second: card!\n* a\n* b\n= First Card\nagain\n";
    let written = render_document(doc, &dir, &RenderConfig::builtin_font()).expect("render");

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["First_Card.png", "Second_card.png", "First_Card_2.png"]);
    for path in &written {
        let bytes = fs::read(path).expect("png written");
        assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
    }
}

#[test]
fn invalid_config_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("cards");
    let cfg = RenderConfig {
        width: 10,
        ..RenderConfig::builtin_font()
    };
    let err = render_document("= T\nx\n", &dir, &cfg).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(!dir.exists());
}
