//! Per-resource outcomes and their tallies

use super::ResourceKind;
use std::fmt;

/// Terminal disposition of one resource in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The id or an alias is on the exclusion list
    Excluded,
    /// Younger than the grace period
    WithinGrace,
    /// The engine could not inspect it; not collected this run
    InspectFailed,
    Deleted,
    DeleteFailed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Excluded => write!(f, "skipped-excluded"),
            Outcome::WithinGrace => write!(f, "skipped-within-grace"),
            Outcome::InspectFailed => write!(f, "skipped-inspect-failed"),
            Outcome::Deleted => write!(f, "deleted"),
            Outcome::DeleteFailed => write!(f, "delete-failed"),
        }
    }
}

/// Outcome counts for one resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub kind: ResourceKind,
    pub excluded: usize,
    pub within_grace: usize,
    pub inspect_failed: usize,
    pub deleted: usize,
    pub delete_failed: usize,
    /// Worker tasks that panicked before producing an outcome
    pub panicked: usize,
}

impl CollectionReport {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            excluded: 0,
            within_grace: 0,
            inspect_failed: 0,
            deleted: 0,
            delete_failed: 0,
            panicked: 0,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Excluded => self.excluded += 1,
            Outcome::WithinGrace => self.within_grace += 1,
            Outcome::InspectFailed => self.inspect_failed += 1,
            Outcome::Deleted => self.deleted += 1,
            Outcome::DeleteFailed => self.delete_failed += 1,
        }
    }

    pub fn record_panic(&mut self) {
        self.panicked += 1;
    }

    /// Number of resources the collector was handed
    pub fn total(&self) -> usize {
        self.excluded
            + self.within_grace
            + self.inspect_failed
            + self.deleted
            + self.delete_failed
            + self.panicked
    }

    pub fn has_failures(&self) -> bool {
        self.inspect_failed + self.delete_failed + self.panicked > 0
    }
}

impl fmt::Display for CollectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}s: {} deleted, {} excluded, {} within grace, {} inspect failures, {} delete failures",
            self.kind,
            self.deleted,
            self.excluded,
            self.within_grace,
            self.inspect_failed,
            self.delete_failed
        )?;
        if self.panicked > 0 {
            write!(f, ", {} crashed workers", self.panicked)?;
        }
        Ok(())
    }
}
