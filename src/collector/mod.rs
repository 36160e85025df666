//! Resource collection
//!
//! A [`Collector`] drives one kind of resource (images or containers) through
//! the collection pipeline. Every resource gets its own task:
//!
//! 1. skip it if its id or an alias is excluded
//! 2. inspect it for the authoritative creation time
//! 3. skip it if it is still within the grace period
//! 4. remove it
//!
//! Each task produces exactly one [`Outcome`]. A failure for one resource never
//! affects another, and the collector always waits for every task it launched.

mod container;
mod image;
pub mod notice;
pub mod report;

pub use notice::{Notices, StdoutNotices};
pub use report::{CollectionReport, Outcome};

use crate::engine::{Engine, ResourceDetail};
use crate::error::Result;
use crate::exclude::ExclusionList;
use crate::policy::GracePeriod;
use async_trait::async_trait;
use chrono::Utc;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Kind of resource under collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Container,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Image => write!(f, "image"),
            ResourceKind::Container => write!(f, "container"),
        }
    }
}

/// A resource the collector knows how to match, inspect and remove
#[async_trait]
pub trait Collectable: Send + Sync + 'static {
    /// Kind-specific removal options
    type Removal: Copy + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> &str;

    /// Human-readable names that the exclusion list may refer to
    fn aliases(&self) -> Vec<&str>;

    async fn inspect(&self, engine: &dyn Engine) -> Result<ResourceDetail>;

    async fn remove(
        &self,
        engine: &dyn Engine,
        detail: &ResourceDetail,
        options: Self::Removal,
    ) -> Result<()>;
}

/// Drives one inventory of resources to completion
pub struct Collector<R: Collectable> {
    engine: Arc<dyn Engine>,
    excludes: Arc<ExclusionList>,
    grace: GracePeriod,
    options: R::Removal,
    quiet: bool,
    notices: Arc<dyn Notices>,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Collectable> Clone for Collector<R> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            excludes: Arc::clone(&self.excludes),
            grace: self.grace,
            options: self.options,
            quiet: self.quiet,
            notices: Arc::clone(&self.notices),
            _kind: PhantomData,
        }
    }
}

impl<R: Collectable> Collector<R> {
    /// Create a new collector
    pub fn new(
        engine: Arc<dyn Engine>,
        excludes: Arc<ExclusionList>,
        grace: GracePeriod,
        options: R::Removal,
    ) -> Self {
        Self {
            engine,
            excludes,
            grace,
            options,
            quiet: false,
            notices: Arc::new(StdoutNotices),
            _kind: PhantomData,
        }
    }

    /// Suppress the notice emitted for each deletion. Failures are still reported.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Send deletion notices somewhere other than stdout
    pub fn notices(mut self, notices: Arc<dyn Notices>) -> Self {
        self.notices = notices;
        self
    }

    /// Process every resource in `inventory` concurrently and wait for all of them.
    pub async fn collect(&self, inventory: Vec<R>) -> CollectionReport {
        let mut report = CollectionReport::new(R::KIND);
        let mut workers = JoinSet::new();

        debug!("Collecting {} {}s", inventory.len(), R::KIND);

        for resource in inventory {
            let worker = self.clone();
            workers.spawn(async move { worker.process(&resource).await });
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    error!("Error. {} worker did not finish: {}", R::KIND, e);
                    report.record_panic();
                }
            }
        }

        report
    }

    /// Run the pipeline for a single resource
    pub async fn process(&self, resource: &R) -> Outcome {
        let outcome = self.run_pipeline(resource).await;
        debug!("{} {}: {}", R::KIND, resource.id(), outcome);
        outcome
    }

    async fn run_pipeline(&self, resource: &R) -> Outcome {
        let kind = R::KIND;
        let id = resource.id();

        if self.excludes.is_excluded(id, resource.aliases()) {
            debug!("Skipping excluded {}: {}", kind, id);
            return Outcome::Excluded;
        }

        info!("Inspecting {}: {}", kind, id);
        let detail = match resource.inspect(self.engine.as_ref()).await {
            Ok(detail) => detail,
            Err(e) => {
                error!("Error. Failed to inspect {}: {}: {}", kind, id, e);
                return Outcome::InspectFailed;
            }
        };

        let now = Utc::now();
        if !self.grace.is_eligible(detail.created, now) {
            debug!(
                "Keeping {} {} created {} (grace {})",
                kind, id, detail.created, self.grace
            );
            return Outcome::WithinGrace;
        }

        info!("Deleting {}: {}", kind, id);
        match resource.remove(self.engine.as_ref(), &detail, self.options).await {
            Ok(()) => {
                info!("Deleted {}: {}", kind, id);
                if !self.quiet {
                    self.notices.deleted(kind, id);
                }
                Outcome::Deleted
            }
            Err(e) => {
                self.notices.delete_failed(kind, id, &e);
                Outcome::DeleteFailed
            }
        }
    }
}
