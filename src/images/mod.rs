// src/images/mod.rs
//! Image blocks: fetch the bytes, decide file names, write the files (and
//! per-locale copies) and point the Markdown at them.

pub mod caption;
mod plan;
pub mod sniff;
mod store;

pub use plan::{find_last_uuid, hash_of_string, plan_image};
pub use store::{localized_docs_root, localized_image_path};

use crate::error::AppError;
use crate::model::MediaBlock;
use crate::plugins::PluginContext;
use crate::types::plain_text_of;
use std::path::PathBuf;

/// One image and everything learnt about it on the way to disk.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    pub primary_url: String,
    pub caption: String,
    /// One `(locale, url)` entry per configured locale, url empty when the
    /// caption names no variant, followed by caption variants for other
    /// locales.
    pub localized_urls: Vec<(String, String)>,
    pub primary_bytes: Vec<u8>,
    pub file_type: Option<&'static str>,
    pub page_slug: String,
    pub block_id: String,
    pub directory_containing_markdown: PathBuf,
    pub relative_directory_of_page: PathBuf,
    pub output_file_name: String,
    pub primary_file_output_path: PathBuf,
    pub file_path_to_use_in_markdown: String,
}

impl ImageSet {
    fn from_block(ctx: &PluginContext<'_>, url: &str, image: &MediaBlock) -> Self {
        let parsed = caption::parse_caption(&plain_text_of(&image.caption));

        let mut localized_urls: Vec<(String, String)> = ctx
            .options
            .locales
            .iter()
            .map(|locale| {
                let url = parsed
                    .localized
                    .iter()
                    .find(|(code, _)| code == locale.as_str())
                    .map(|(_, url)| url.clone())
                    .unwrap_or_default();
                (locale.as_str().to_string(), url)
            })
            .collect();
        for (code, url) in &parsed.localized {
            if !localized_urls.iter().any(|(existing, _)| existing == code) {
                localized_urls.push((code.clone(), url.clone()));
            }
        }

        Self {
            primary_url: url.to_string(),
            caption: parsed.text,
            localized_urls,
            page_slug: ctx.page.slug(),
            block_id: image.common.id.as_str().to_string(),
            directory_containing_markdown: ctx.directory_containing_markdown.clone(),
            relative_directory_of_page: ctx.relative_directory_of_page.clone(),
            ..Self::default()
        }
    }
}

/// Persist an image block and return its Markdown.
pub async fn process_image_block(
    ctx: &PluginContext<'_>,
    image: &MediaBlock,
) -> Result<String, AppError> {
    let Some(url) = image.media.url() else {
        log::warn!(
            "Image block {} on page {} has no usable url",
            image.common.id,
            ctx.page.slug()
        );
        return Ok(String::new());
    };

    let mut set = ImageSet::from_block(ctx, url, image);
    set.primary_bytes = ctx.assets.fetch_bytes(&set.primary_url).await?;
    set.file_type = sniff::sniff_extension(&set.primary_bytes);
    plan_image(&mut set, &ctx.options.images)?;

    store::save_primary(&set, ctx.seen).await?;
    for (locale, url) in &set.localized_urls {
        let bytes = if url.is_empty() {
            set.primary_bytes.clone()
        } else {
            ctx.assets.fetch_bytes(url).await?
        };
        let path = localized_image_path(
            &ctx.options.site_root,
            locale,
            &set.relative_directory_of_page,
            &percent_encoding::percent_decode_str(&set.output_file_name)
                .decode_utf8_lossy(),
        );
        store::save_localized(&path, &bytes, ctx.seen).await?;
    }

    Ok(format!(
        "![{}]({})",
        set.caption, set.file_path_to_use_in_markdown
    ))
}
