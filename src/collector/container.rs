//! Container collection

use super::{Collectable, ResourceKind};
use crate::engine::{ContainerRemoval, ContainerSummary, Engine, ResourceDetail};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
impl Collectable for ContainerSummary {
    type Removal = ContainerRemoval;

    const KIND: ResourceKind = ResourceKind::Container;

    fn id(&self) -> &str {
        &self.id
    }

    /// The image reference, every name as reported, and every name without
    /// the engine's leading `/`.
    fn aliases(&self) -> Vec<&str> {
        let mut aliases = Vec::with_capacity(1 + self.names.len() * 2);
        if !self.image.is_empty() {
            aliases.push(self.image.as_str());
        }
        for name in &self.names {
            aliases.push(name.as_str());
            if let Some(bare) = name.strip_prefix('/') {
                aliases.push(bare);
            }
        }
        aliases
    }

    async fn inspect(&self, engine: &dyn Engine) -> Result<ResourceDetail> {
        engine.inspect_container(&self.id).await
    }

    async fn remove(
        &self,
        engine: &dyn Engine,
        detail: &ResourceDetail,
        options: ContainerRemoval,
    ) -> Result<()> {
        engine.remove_container(&detail.id, options).await
    }
}
