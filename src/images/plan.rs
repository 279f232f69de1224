// src/images/plan.rs
//! Deciding where an image lives on disk and how Markdown refers to it.

use super::ImageSet;
use crate::config::{ImageFileNameFormat, ImageOptions};
use crate::constants::{CONTENT_HASH_LENGTH, DEFAULT_IMAGE_PREFIX};
use crate::error::AppError;
use crate::output::sanitize_filename;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("valid uuid regex")
});

/// 32-bit rolling string hash (`h * 31 + unit` over UTF-16 units), made
/// non-negative.
pub fn hash_of_string(s: &str) -> i64 {
    let hash = s
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    i64::from(hash).abs()
}

/// The last path segment of `url` that is a UUID with slashes on both sides.
pub fn find_last_uuid(url: &str) -> Option<&str> {
    let base = url.split('?').next().unwrap_or(url);
    let segments: Vec<&str> = base.split('/').collect();
    if segments.len() < 3 {
        return None;
    }
    segments[1..segments.len() - 1]
        .iter()
        .rev()
        .find(|segment| UUID_SEGMENT.is_match(segment))
        .copied()
}

fn base_name(set: &ImageSet, format: ImageFileNameFormat) -> String {
    match format {
        ImageFileNameFormat::Legacy => {
            let base = set.primary_url.split('?').next().unwrap_or(&set.primary_url);
            let key = find_last_uuid(&set.primary_url).unwrap_or(base);
            hash_of_string(key).to_string()
        }
        ImageFileNameFormat::ContentHash => {
            let digest = hex::encode(Sha256::digest(&set.primary_bytes));
            digest[..CONTENT_HASH_LENGTH].to_string()
        }
        ImageFileNameFormat::Default => {
            let slug = set.page_slug.trim_start_matches('/');
            if slug.is_empty() {
                set.block_id.clone()
            } else {
                // `#` would start a fragment in the Markdown reference.
                let slug = sanitize_filename(slug).replace('#', "-");
                format!("{}.{}", slug, set.block_id)
            }
        }
    }
}

fn extension(set: &ImageSet) -> Result<String, AppError> {
    if let Some(ext) = set.file_type {
        return Ok(ext.to_string());
    }
    let from_url = url::Url::parse(&set.primary_url).ok().and_then(|url| {
        let segment = url.path_segments()?.next_back()?.to_string();
        let (_, ext) = segment.rsplit_once('.')?;
        Some(ext.to_string()).filter(|e| !e.is_empty())
    });
    from_url.ok_or_else(|| AppError::ImageExtension {
        url: set.primary_url.clone(),
    })
}

/// Fill in the output file name and both paths of `set`.
pub fn plan_image(set: &mut ImageSet, options: &ImageOptions) -> Result<(), AppError> {
    if options.output_path.is_some() && !set.localized_urls.is_empty() {
        return Err(AppError::ImageConfiguration(
            "localized images cannot be used together with an image output path; \
             drop the image output path so images live next to their pages"
                .to_string(),
        ));
    }

    let file_name = format!(
        "{}.{}",
        base_name(set, options.file_name_format),
        extension(set)?
    );
    let decoded = percent_decode_str(&file_name).decode_utf8_lossy().to_string();

    let directory: PathBuf = options
        .output_path
        .clone()
        .unwrap_or_else(|| set.directory_containing_markdown.clone());
    let prefix = options
        .prefix_in_markdown
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_IMAGE_PREFIX)
        .trim_end_matches('/');

    set.primary_file_output_path = directory.join(&decoded);
    set.file_path_to_use_in_markdown = format!("{}/{}", prefix, file_name);
    set.output_file_name = file_name;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(url: &str) -> ImageSet {
        ImageSet {
            primary_url: url.to_string(),
            page_slug: "/intro".to_string(),
            block_id: "b1".to_string(),
            directory_containing_markdown: PathBuf::from("docs/guide"),
            ..ImageSet::default()
        }
    }

    #[test]
    fn rolling_hash_matches_known_values() {
        assert_eq!(hash_of_string(""), 0);
        assert_eq!(hash_of_string("a"), 97);
        assert_eq!(hash_of_string("ab"), 3105);
    }

    #[test]
    fn rolling_hash_wraps_and_stays_positive() {
        let long = "https://s3.us-west-2.amazonaws.com/secure.notion-static.com/x/y.png";
        let first = hash_of_string(long);
        assert!(first >= 0);
        assert_eq!(first, hash_of_string(long));
    }

    #[test]
    fn last_uuid_must_sit_between_slashes() {
        let url = "https://s3.amazonaws.com/a/e1a1b2c3-1234-4abc-8def-0123456789ab/\
                   f2a1b2c3-1234-4abc-9def-0123456789ab/image.png?X-Amz=1";
        assert_eq!(
            find_last_uuid(url),
            Some("f2a1b2c3-1234-4abc-9def-0123456789ab")
        );
        assert_eq!(
            find_last_uuid("https://x.com/e1a1b2c3-1234-4abc-8def-0123456789ab"),
            None
        );
    }

    #[test]
    fn default_names_combine_slug_and_block() {
        let mut image = set("https://example.com/pic.jpeg?sig=1");
        plan_image(&mut image, &ImageOptions::default()).unwrap();
        assert_eq!(image.output_file_name, "intro.b1.jpeg");
        assert_eq!(
            image.primary_file_output_path,
            PathBuf::from("docs/guide/intro.b1.jpeg")
        );
        assert_eq!(image.file_path_to_use_in_markdown, "./intro.b1.jpeg");
    }

    #[test]
    fn default_names_flatten_nested_slugs() {
        let mut image = set("https://example.com/pic.png");
        image.page_slug = "/guides/intro#top".to_string();
        plan_image(&mut image, &ImageOptions::default()).unwrap();
        assert_eq!(image.output_file_name, "guides_intro-top.b1.png");
        assert_eq!(image.file_path_to_use_in_markdown, "./guides_intro-top.b1.png");
        assert_eq!(
            image.primary_file_output_path,
            PathBuf::from("docs/guide/guides_intro-top.b1.png")
        );
    }

    #[test]
    fn legacy_names_follow_the_uuid_segment_across_signatures() {
        let options = ImageOptions {
            file_name_format: ImageFileNameFormat::Legacy,
            ..ImageOptions::default()
        };
        let url = "https://s3.us-west-2.amazonaws.com/secure.notion-static.com/\
                   f2a1b2c3-1234-4abc-9def-0123456789ab/shot.png";
        let mut first = set(&format!("{}?X-Amz-Signature=aaa", url));
        let mut second = set(&format!("{}?X-Amz-Signature=bbb", url));
        plan_image(&mut first, &options).unwrap();
        plan_image(&mut second, &options).unwrap();

        let expected = format!(
            "{}.png",
            hash_of_string("f2a1b2c3-1234-4abc-9def-0123456789ab")
        );
        assert_eq!(first.output_file_name, expected);
        assert_eq!(second.output_file_name, expected);
    }

    #[test]
    fn legacy_names_without_uuid_hash_the_url_before_its_query() {
        let options = ImageOptions {
            file_name_format: ImageFileNameFormat::Legacy,
            ..ImageOptions::default()
        };
        let mut image = set("https://example.com/assets/pic.gif?v=2");
        plan_image(&mut image, &options).unwrap();
        assert_eq!(
            image.output_file_name,
            format!("{}.gif", hash_of_string("https://example.com/assets/pic.gif"))
        );
    }

    #[test]
    fn sniffed_type_wins_over_url() {
        let mut image = set("https://example.com/pic.jpeg");
        image.file_type = Some("png");
        let options = ImageOptions {
            prefix_in_markdown: Some("/img/".to_string()),
            output_path: Some(PathBuf::from("static/img")),
            ..ImageOptions::default()
        };
        plan_image(&mut image, &options).unwrap();
        assert_eq!(image.file_path_to_use_in_markdown, "/img/intro.b1.png");
        assert_eq!(
            image.primary_file_output_path,
            PathBuf::from("static/img/intro.b1.png")
        );
    }

    #[test]
    fn content_hash_depends_only_on_bytes() {
        let options = ImageOptions {
            file_name_format: ImageFileNameFormat::ContentHash,
            ..ImageOptions::default()
        };
        let mut a = set("https://example.com/a.png");
        let mut b = set("https://other.org/b.png");
        a.primary_bytes = b"same".to_vec();
        b.primary_bytes = b"same".to_vec();
        plan_image(&mut a, &options).unwrap();
        plan_image(&mut b, &options).unwrap();
        assert_eq!(a.output_file_name, b.output_file_name);
        assert_eq!(a.output_file_name.len(), CONTENT_HASH_LENGTH + ".png".len());
    }

    #[test]
    fn missing_extension_is_fatal() {
        let mut image = set("https://example.com/noext");
        let err = plan_image(&mut image, &ImageOptions::default()).unwrap_err();
        assert!(matches!(err, AppError::ImageExtension { .. }));
    }

    #[test]
    fn image_root_with_locales_is_rejected() {
        let mut image = set("https://example.com/a.png");
        image.localized_urls = vec![("fr".to_string(), String::new())];
        let options = ImageOptions {
            output_path: Some(PathBuf::from("static/img")),
            ..ImageOptions::default()
        };
        assert!(matches!(
            plan_image(&mut image, &options),
            Err(AppError::ImageConfiguration(_))
        ));
    }
}
