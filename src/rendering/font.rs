//! Font resolution with a fixed fallback chain ending in the built-in face

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};

use crate::rendering::builtin;

/// A measurable, drawable font at one pixel size.
#[derive(Clone)]
pub enum FontHandle {
    /// A TrueType/OpenType face loaded from disk
    Outline {
        path: PathBuf,
        face: Arc<Font>,
        size: f32,
    },
    /// The built-in bitmap face, drawn as blocks of `scale` pixels
    Builtin { size: f32, scale: u32 },
}

impl FontHandle {
    pub fn builtin(size: f32) -> Self {
        FontHandle::Builtin {
            size,
            scale: builtin::scale_for(size),
        }
    }

    /// Requested pixel size
    pub fn size(&self) -> f32 {
        match self {
            FontHandle::Outline { size, .. } | FontHandle::Builtin { size, .. } => *size,
        }
    }

    /// Path of the face, or `None` for the built-in face
    pub fn path(&self) -> Option<&Path> {
        match self {
            FontHandle::Outline { path, .. } => Some(path),
            FontHandle::Builtin { .. } => None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontHandle::Builtin { .. })
    }

    /// Distance from the draw origin (top of the line) down to the baseline.
    pub fn ascent(&self) -> f32 {
        match self {
            FontHandle::Outline { face, size, .. } => face
                .horizontal_line_metrics(*size)
                .map(|m| m.ascent)
                .unwrap_or(*size),
            FontHandle::Builtin { scale, .. } => (builtin::BASELINE_ROW * scale) as f32,
        }
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontHandle::Outline { path, size, .. } => f
                .debug_struct("Outline")
                .field("path", path)
                .field("size", size)
                .finish(),
            FontHandle::Builtin { size, scale } => f
                .debug_struct("Builtin")
                .field("size", size)
                .field("scale", scale)
                .finish(),
        }
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path() && self.size() == other.size()
    }
}

/// Resolves font requests against a requested path and an ordered candidate list.
///
/// Parsed faces are cached per path, and paths that failed to load are
/// remembered so each file is read at most once per provider.
pub struct FontProvider {
    candidates: Vec<PathBuf>,
    faces: HashMap<PathBuf, Option<Arc<Font>>>,
}

impl FontProvider {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            faces: HashMap::new(),
        }
    }

    /// A provider that always answers with the built-in face.
    pub fn builtin_only() -> Self {
        Self::new(Vec::new())
    }

    /// Resolve `requested` at `size`, falling back through the candidates and
    /// finally to the built-in face. Never fails.
    pub fn resolve(&mut self, requested: Option<&Path>, size: f32) -> FontHandle {
        let size = if size.is_finite() && size > 0.0 { size } else { 1.0 };

        if let Some(path) = requested {
            let first_attempt = !self.faces.contains_key(path);
            if let Some(face) = self.load(path) {
                return FontHandle::Outline {
                    path: path.to_path_buf(),
                    face,
                    size,
                };
            }
            if first_attempt {
                log::warn!("font {:?} is not usable, trying fallbacks", path);
            }
        }

        let candidates = self.candidates.clone();
        let found = candidates
            .iter()
            .find_map(|path| self.load(path).map(|face| (path.clone(), face)));
        match found {
            Some((path, face)) => {
                log::debug!("resolved font {:?} at {}px", path, size);
                FontHandle::Outline { path, face, size }
            }
            None => {
                log::debug!("no font file usable, using built-in face at {}px", size);
                FontHandle::builtin(size)
            }
        }
    }

    fn load(&mut self, path: &Path) -> Option<Arc<Font>> {
        if let Some(cached) = self.faces.get(path) {
            return cached.clone();
        }
        let face = Self::read_face(path);
        self.faces.insert(path.to_path_buf(), face.clone());
        face
    }

    fn read_face(path: &Path) -> Option<Arc<Font>> {
        if !path.is_file() {
            return None;
        }
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                log::debug!("reading font {:?} failed: {}", path, e);
                return None;
            }
        };
        match Font::from_bytes(bytes, FontSettings::default()) {
            Ok(face) => Some(Arc::new(face)),
            Err(e) => {
                log::debug!("parsing font {:?} failed: {}", path, e);
                None
            }
        }
    }
}
