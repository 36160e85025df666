//! Collection run orchestration
//!
//! A run fetches one snapshot of every image and every container, then
//! collects both kinds side by side. Inventory failures abort the run before
//! anything is deleted.

use crate::collector::{CollectionReport, Collector, ResourceKind};
use crate::config::RunConfig;
use crate::engine::Engine;
use crate::error::{DgcError, Result};
use crate::exclude::ExclusionList;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub images: CollectionReport,
    pub containers: CollectionReport,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn deleted(&self) -> usize {
        self.images.deleted + self.containers.deleted
    }

    pub fn has_failures(&self) -> bool {
        self.images.has_failures() || self.containers.has_failures()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} removed ({}; {})", self.deleted(), self.images, self.containers)
    }
}

/// Runs image and container collection against one engine
pub struct Coordinator {
    engine: Arc<dyn Engine>,
    config: RunConfig,
}

impl Coordinator {
    /// Create a new coordinator
    pub fn new(engine: Arc<dyn Engine>, config: RunConfig) -> Self {
        Self { engine, config }
    }

    /// Perform one full collection run
    pub async fn run(&self, excludes: ExclusionList) -> Result<RunReport> {
        let start = Instant::now();
        let config = &self.config;

        info!("Getting a list of images...");
        let images = self
            .engine
            .list_images(config.list_all)
            .await
            .map_err(|e| DgcError::inventory(ResourceKind::Image, e))?;

        info!("Getting a list of containers...");
        let containers = self
            .engine
            .list_containers(config.list_all)
            .await
            .map_err(|e| DgcError::inventory(ResourceKind::Container, e))?;

        let excludes = Arc::new(excludes);
        let image_collector = Collector::new(
            Arc::clone(&self.engine),
            Arc::clone(&excludes),
            config.grace,
            config.image_removal(),
        )
        .quiet(config.quiet);
        let container_collector = Collector::new(
            Arc::clone(&self.engine),
            excludes,
            config.grace,
            config.container_removal(),
        )
        .quiet(config.quiet);

        info!(
            "Performing garbage collection on {} images and {} containers (grace {})...",
            images.len(),
            containers.len(),
            config.grace
        );
        let (images, containers) = tokio::join!(
            image_collector.collect(images),
            container_collector.collect(containers),
        );

        let report = RunReport {
            images,
            containers,
            elapsed: start.elapsed(),
        };
        info!(
            "Finished garbage collection in {:.2}s: {}",
            report.elapsed.as_secs_f64(),
            report
        );
        Ok(report)
    }
}
