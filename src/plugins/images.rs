// src/plugins/images.rs
use super::{BlockConverter, Converted, Plugin, PluginContext};
use crate::error::AppError;
use crate::images::process_image_block;
use crate::model::Block;
use std::sync::Arc;

pub(super) fn plugin() -> Plugin {
    Plugin::new("images").with_converter(&["image"], Arc::new(ImageConverter))
}

struct ImageConverter;

#[async_trait::async_trait]
impl BlockConverter for ImageConverter {
    async fn convert(
        &self,
        ctx: &mut PluginContext<'_>,
        block: &Block,
    ) -> Result<Converted, AppError> {
        match block {
            Block::Image(image) => Ok(Converted::Rendered(process_image_block(ctx, image).await?)),
            _ => Ok(Converted::UseDefault),
        }
    }
}
