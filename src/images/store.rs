// src/images/store.rs
//! Writing image files and their per-locale copies.

use super::ImageSet;
use crate::error::AppError;
use crate::output::SeenFiles;
use std::path::{Path, PathBuf};

/// Root of the translated docs tree for `locale`.
pub fn localized_docs_root(site_root: &Path, locale: &str) -> PathBuf {
    site_root
        .join("i18n")
        .join(locale)
        .join("docusaurus-plugin-content-docs")
        .join("current")
}

/// Where Docusaurus looks for a translated copy of a docs asset.
pub fn localized_image_path(
    site_root: &Path,
    locale: &str,
    relative_directory_of_page: &Path,
    file_name: &str,
) -> PathBuf {
    localized_docs_root(site_root, locale)
        .join(relative_directory_of_page)
        .join(file_name)
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Write the primary image unless a file is already there.
///
/// Returns whether bytes were written.
pub async fn save_primary(set: &ImageSet, seen: &SeenFiles) -> Result<bool, AppError> {
    let path = &set.primary_file_output_path;
    seen.record(path);
    if tokio::fs::try_exists(path).await? {
        log::debug!("Image {} already present, keeping it", path.display());
        return Ok(false);
    }
    log::debug!("Writing image {}", path.display());
    write_file(path, &set.primary_bytes).await?;
    Ok(true)
}

/// Write one localized copy, replacing whatever is there.
pub async fn save_localized(
    path: &Path,
    bytes: &[u8],
    seen: &SeenFiles,
) -> Result<(), AppError> {
    seen.record(path);
    log::debug!("Writing localized image {}", path.display());
    write_file(path, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_paths_follow_the_docusaurus_i18n_tree() {
        let path = localized_image_path(
            Path::new("site"),
            "fr",
            Path::new("guide/basics"),
            "intro.b1.png",
        );
        assert_eq!(
            path,
            PathBuf::from(
                "site/i18n/fr/docusaurus-plugin-content-docs/current/guide/basics/intro.b1.png"
            )
        );
    }

    #[tokio::test]
    async fn existing_primary_files_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"old").unwrap();

        let set = ImageSet {
            primary_bytes: b"new".to_vec(),
            primary_file_output_path: path.clone(),
            ..ImageSet::default()
        };
        let seen = SeenFiles::default();
        assert!(!save_primary(&set, &seen).await.unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), b"old");
        assert!(seen.contains(&path));
    }
}
