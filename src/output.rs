//! Output file naming and archiving of previous runs

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Turn a title into a filesystem-friendly base name.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('_');
            in_gap = true;
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// First of `base.png`, `base_2.png`, `base_3.png`, ... that does not exist in `dir`.
pub fn unique_output_path(dir: &Path, base: &str) -> PathBuf {
    let first = dir.join(format!("{}.png", base));
    if !first.exists() {
        return first;
    }
    (2u32..)
        .map(|i| dir.join(format!("{}_{}.png", base, i)))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Default output directory: the input file name without its extension.
pub fn default_outdir(input: &Path) -> PathBuf {
    match input.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if !stem.is_empty() => PathBuf::from(stem),
        _ => PathBuf::from("output_images"),
    }
}

/// Move an existing directory out of the way as `<dir>-YYYY-mm-dd-HH-MM`.
///
/// Returns the new location, or `None` when `dir` did not exist.
pub fn archive_existing_dir(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    let stamp = chrono::Local::now().format("%Y-%m-%d-%H-%M").to_string();
    let archived = archive_target(dir, &stamp);
    fs::rename(dir, &archived)?;
    log::debug!("archived {:?} to {:?}", dir, archived);
    Ok(Some(archived))
}

fn archive_target(dir: &Path, stamp: &str) -> PathBuf {
    let base = dir.to_string_lossy();
    let base = base.trim_end_matches('/');
    let candidate = PathBuf::from(format!("{}-{}", base, stamp));
    if !candidate.exists() {
        return candidate;
    }
    (2u32..)
        .map(|i| PathBuf::from(format!("{}-{}_{}", base, stamp, i)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
