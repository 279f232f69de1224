// src/plugins/video.rs
use super::{BlockConverter, Converted, Plugin, PluginContext};
use crate::constants::REACT_PLAYER_IMPORT;
use crate::error::AppError;
use crate::model::{Block, FileObject};
use std::sync::Arc;

pub(super) fn plugin() -> Plugin {
    Plugin::new("video").with_converter(&["video"], Arc::new(VideoConverter))
}

struct VideoConverter;

#[async_trait::async_trait]
impl BlockConverter for VideoConverter {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        let Block::Video(video) = block else {
            return Ok(Converted::UseDefault);
        };
        let url = match &video.media {
            FileObject::External { url } | FileObject::File { url, .. } => url,
            FileObject::Unsupported { file_type } => {
                log::warn!(
                    "Unsupported video type '{}' in block {} on page {}; it will be omitted",
                    file_type,
                    block.id(),
                    ctx.page.slug()
                );
                return Ok(Converted::Rendered(String::new()));
            }
        };
        ctx.add_import(REACT_PLAYER_IMPORT);
        Ok(Converted::Rendered(format!(
            "<ReactPlayer controls url=\"{}\" />",
            url
        )))
    }
}
