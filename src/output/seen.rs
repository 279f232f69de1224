// src/output/seen.rs
//! Bookkeeping of files written in this run, so files left over from
//! earlier runs can be removed.

use crate::error::AppError;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "ico", "tif", "tiff", "avif",
];

#[derive(Debug, Default)]
pub struct SeenFiles {
    paths: Mutex<HashSet<PathBuf>>,
}

impl SeenFiles {
    pub fn record(&self, path: &Path) {
        self.paths.lock().insert(normalize(path));
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.lock().contains(&normalize(path))
    }

    pub fn len(&self) -> usize {
        self.paths.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delete files under `root` with one of `extensions` that were not
    /// recorded. Returns how many were removed.
    pub fn prune(&self, root: &Path, extensions: &[&str]) -> Result<usize, AppError> {
        if !root.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let wanted = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
            if wanted && !self.contains(path) {
                log::info!("Removing stale file {}", path.display());
                std::fs::remove_file(path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Drop `.` components so `./docs/a.md` and `docs/a.md` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
