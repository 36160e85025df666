//! Docker Engine API implementation of [`Engine`]

use super::{
    ContainerRemoval, ContainerSummary, Engine, ImageRemoval, ImageSummary, ResourceDetail,
};
use crate::error::{DgcError, Result};
use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions, RemoveContainerOptions};
use bollard::image::{ListImagesOptions, RemoveImageOptions};
use bollard::{Docker, API_DEFAULT_VERSION};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

/// Default engine endpoint
pub const DEFAULT_SOCKET: &str = "unix:///var/run/docker.sock";

/// How to reach the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Local unix domain socket (`unix:///path` or a bare absolute path)
    Unix(String),
    /// Remote daemon over plain HTTP (`tcp://host:port` or `http://host:port`)
    Http(String),
}

impl Endpoint {
    pub fn parse(address: &str) -> Result<Self> {
        let address = address.trim();
        if let Some(path) = address.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(DgcError::InvalidConfig("unix socket path is empty".into()));
            }
            Ok(Endpoint::Unix(path.to_string()))
        } else if address.starts_with('/') {
            Ok(Endpoint::Unix(address.to_string()))
        } else if address.starts_with("tcp://") || address.starts_with("http://") {
            Ok(Endpoint::Http(address.to_string()))
        } else {
            Err(DgcError::InvalidConfig(format!(
                "unsupported engine endpoint: {:?} (expected unix://, tcp:// or http://)",
                address
            )))
        }
    }
}

/// Engine client backed by the Docker Engine API
#[derive(Clone)]
pub struct DockerEngine {
    docker: Docker,
}

impl DockerEngine {
    /// Build a client for `address`. Each request is bounded by `timeout`.
    pub fn connect(address: &str, timeout: Duration) -> Result<Self> {
        let secs = timeout.as_secs().max(1);
        let connect_err = |e: bollard::errors::Error| DgcError::Connect {
            endpoint: address.to_string(),
            message: e.to_string(),
        };

        let docker = match Endpoint::parse(address)? {
            #[cfg(unix)]
            Endpoint::Unix(path) => {
                Docker::connect_with_unix(&path, secs, API_DEFAULT_VERSION).map_err(connect_err)?
            }
            #[cfg(not(unix))]
            Endpoint::Unix(_) => {
                return Err(DgcError::InvalidConfig(
                    "unix sockets are not supported on this platform".into(),
                ))
            }
            Endpoint::Http(addr) => {
                Docker::connect_with_http(&addr, secs, API_DEFAULT_VERSION).map_err(connect_err)?
            }
        };

        debug!("Created engine client for {}", address);
        Ok(Self { docker })
    }
}

#[async_trait]
impl Engine for DockerEngine {
    async fn list_images(&self, all: bool) -> Result<Vec<ImageSummary>> {
        let options = ListImagesOptions::<String> {
            all,
            ..Default::default()
        };
        let images = self.docker.list_images(Some(options)).await?;

        Ok(images
            .into_iter()
            .map(|image| ImageSummary {
                id: image.id,
                repo_tags: image.repo_tags,
            })
            .collect())
    }

    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>> {
        let options = ListContainersOptions::<String> {
            all,
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(options)).await?;

        Ok(containers
            .into_iter()
            .filter_map(|c| {
                Some(ContainerSummary {
                    id: c.id?,
                    names: c.names.unwrap_or_default(),
                    image: c.image.unwrap_or_default(),
                })
            })
            .collect())
    }

    async fn inspect_image(&self, id: &str) -> Result<ResourceDetail> {
        let detail = self.docker.inspect_image(id).await?;
        Ok(ResourceDetail {
            created: parse_created(id, detail.created.as_deref())?,
            id: detail.id.unwrap_or_else(|| id.to_string()),
        })
    }

    async fn inspect_container(&self, id: &str) -> Result<ResourceDetail> {
        let detail = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;
        Ok(ResourceDetail {
            created: parse_created(id, detail.created.as_deref())?,
            id: detail.id.unwrap_or_else(|| id.to_string()),
        })
    }

    async fn remove_image(&self, id: &str, options: ImageRemoval) -> Result<()> {
        let options = RemoveImageOptions {
            force: options.force,
            noprune: !options.prune_parents,
        };
        let deleted = self.docker.remove_image(id, Some(options), None).await?;
        debug!("Engine reported {} image delete entries for {}", deleted.len(), id);
        Ok(())
    }

    async fn remove_container(&self, id: &str, options: ContainerRemoval) -> Result<()> {
        let options = RemoveContainerOptions {
            force: options.force,
            v: options.remove_volumes,
            ..Default::default()
        };
        self.docker.remove_container(id, Some(options)).await?;
        Ok(())
    }
}

/// Parse the RFC 3339 creation timestamp the engine returns on inspection
fn parse_created(id: &str, created: Option<&str>) -> Result<DateTime<Utc>> {
    let raw = created.ok_or_else(|| DgcError::InvalidTimestamp {
        id: id.to_string(),
        message: "engine returned no creation time".to_string(),
    })?;

    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DgcError::InvalidTimestamp {
            id: id.to_string(),
            message: format!("{:?}: {}", raw, e),
        })
}
