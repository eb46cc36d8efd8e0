//! Document pipeline: one PNG per section

use std::fs;
use std::path::{Path, PathBuf};

use crate::output::{slugify, unique_output_path};
use crate::rendering::font::FontProvider;
use crate::rendering::layout::LayoutEngine;
use crate::source::{parse_blocks, split_sections, title_text};
use crate::{Error, RenderConfig, Result};

/// Render every section of `text` into `outdir`, returning the written paths.
///
/// Each section is laid out completely in memory before its file is written,
/// so a failure never leaves a half-drawn image behind. Fonts are resolved
/// once and shared by all sections.
pub fn render_document(text: &str, outdir: &Path, config: &RenderConfig) -> Result<Vec<PathBuf>> {
    let sections = split_sections(text);
    if sections.is_empty() {
        return Err(Error::EmptyInput(
            "no sections found; start each section with a line beginning '= '".into(),
        ));
    }

    let mut provider = FontProvider::new(config.font_candidates.clone());
    let engine = LayoutEngine::with_provider(config.clone(), &mut provider)?;
    fs::create_dir_all(outdir)?;

    let mut written = Vec::with_capacity(sections.len());
    for (idx, lines) in sections.iter().enumerate() {
        let blocks = parse_blocks(lines);
        let base = match title_text(&blocks) {
            Some(title) => slugify(title),
            None => format!("section_{}", idx + 1),
        };
        let outcome = engine.render(&blocks)?;
        let path = unique_output_path(outdir, &base);
        outcome.canvas.save_png(&path)?;
        log::info!(
            "wrote {:?} ({}x{}, {} growths)",
            path,
            outcome.canvas.width(),
            outcome.canvas.height(),
            outcome.growths()
        );
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_without_titles_is_empty_input() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("cards");
        let err = render_document("no titles here", &dir, &RenderConfig::builtin_font()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
        assert!(!dir.exists());
    }
}
