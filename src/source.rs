//! Input classification: splitting a document into sections and sections into blocks

/// The kind of a block decides its fonts and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Title,
    Bullet,
    Paragraph,
    Spacer,
}

/// One semantic unit of input text. Never mutated after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Bullet text keeps its leading indentation as spaces
    pub text: String,
}

impl Block {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Title, text)
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Bullet, text)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn spacer() -> Self {
        Self::new(BlockKind::Spacer, "")
    }
}

/// Text of the first title block, if the section has one.
pub fn title_text(blocks: &[Block]) -> Option<&str> {
    blocks
        .iter()
        .find(|b| b.kind == BlockKind::Title)
        .map(|b| b.text.as_str())
}

/// Classify raw lines into blocks.
///
/// - blank or whitespace-only lines become spacers
/// - `"= "` starts a title
/// - `"* "` after any indentation starts a bullet; the indentation width is kept
/// - everything else is a paragraph
pub fn parse_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<Block> {
    lines
        .iter()
        .map(|raw| {
            let line = raw.as_ref().trim_end_matches(['\n', '\r']);
            let dedented = line.trim_start();
            if line.trim().is_empty() {
                Block::spacer()
            } else if let Some(rest) = line.strip_prefix("= ") {
                Block::title(rest.trim())
            } else if let Some(rest) = dedented.strip_prefix("* ") {
                let leading = line.chars().count() - dedented.chars().count();
                Block::bullet(format!("{}{}", " ".repeat(leading), rest.trim()))
            } else {
                Block::paragraph(line.trim())
            }
        })
        .collect()
}

/// Split a document into sections, each starting at a `"= "` title line.
/// Lines before the first title are dropped.
pub fn split_sections(text: &str) -> Vec<Vec<String>> {
    let mut sections = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.starts_with("= ") {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
            current.push(line.to_string());
        } else if !current.is_empty() {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}
