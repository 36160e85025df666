//! Container engine client
//!
//! The collector only needs six operations from the engine: list, inspect and
//! remove for both images and containers. They sit behind the [`Engine`] trait
//! so the collection pipeline can be driven by the Docker API in production and
//! by an in-memory engine in tests.

pub mod docker;
#[cfg(test)]
pub(crate) mod fake;

pub use docker::DockerEngine;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Image as reported by the engine's image listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    /// Image ID (sha256 digest)
    pub id: String,
    /// Repository tags (e.g. `nginx:latest`)
    pub repo_tags: Vec<String>,
}

/// Container as reported by the engine's container listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    /// Container ID
    pub id: String,
    /// Names, as the engine reports them (Docker prefixes them with `/`)
    pub names: Vec<String>,
    /// Image reference the container was created from
    pub image: String,
}

/// Authoritative record returned by an inspect call. The listing carries no
/// creation time, so this is the only one eligibility is judged on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDetail {
    /// Full ID as resolved by the engine; removal targets this
    pub id: String,
    pub created: DateTime<Utc>,
}

/// Options for removing an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageRemoval {
    /// Remove even if tagged in multiple repositories or used by a stopped container
    pub force: bool,
    /// Also delete untagged parent images
    pub prune_parents: bool,
}

/// Options for removing a container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerRemoval {
    /// Kill the container first if it is running
    pub force: bool,
    /// Remove anonymous volumes associated with the container
    pub remove_volumes: bool,
}

/// Operations the collector needs from a container engine.
///
/// Implementations must tolerate concurrent calls from many tasks.
#[async_trait]
pub trait Engine: Send + Sync {
    /// List images; `all` includes intermediate images
    async fn list_images(&self, all: bool) -> Result<Vec<ImageSummary>>;

    /// List containers; `all` includes stopped containers
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>>;

    async fn inspect_image(&self, id: &str) -> Result<ResourceDetail>;

    async fn inspect_container(&self, id: &str) -> Result<ResourceDetail>;

    async fn remove_image(&self, id: &str, options: ImageRemoval) -> Result<()>;

    async fn remove_container(&self, id: &str, options: ContainerRemoval) -> Result<()>;
}
