// src/output/writer.rs
//! The only place Markdown files are written.

use super::SeenFiles;
use crate::error::AppError;
use std::path::Path;

/// Writes a page file, creating parent directories, and records it as seen.
pub async fn write_page(path: &Path, content: &str, seen: &SeenFiles) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    seen.record(path);

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pages_are_written_and_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/page.md");
        let seen = SeenFiles::default();
        let written = write_page(&path, "# Hi\n", &seen).await.unwrap();
        assert_eq!(written, 5);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Hi\n");
        assert!(seen.contains(&path));
    }
}
