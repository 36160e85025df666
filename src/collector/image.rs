//! Image collection

use super::{Collectable, ResourceKind};
use crate::engine::{Engine, ImageRemoval, ImageSummary, ResourceDetail};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
impl Collectable for ImageSummary {
    type Removal = ImageRemoval;

    const KIND: ResourceKind = ResourceKind::Image;

    fn id(&self) -> &str {
        &self.id
    }

    fn aliases(&self) -> Vec<&str> {
        self.repo_tags.iter().map(String::as_str).collect()
    }

    async fn inspect(&self, engine: &dyn Engine) -> Result<ResourceDetail> {
        engine.inspect_image(&self.id).await
    }

    async fn remove(
        &self,
        engine: &dyn Engine,
        detail: &ResourceDetail,
        options: ImageRemoval,
    ) -> Result<()> {
        engine.remove_image(&detail.id, options).await
    }
}
