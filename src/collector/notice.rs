//! User-facing deletion notices
//!
//! Successful deletions are announced on stdout unless the run is quiet.
//! Delete failures are always reported, quiet or not.

use super::ResourceKind;
use crate::error::DgcError;
use std::io::{self, Write};
use tracing::error;

/// Receives the notices a collector emits for each attempted deletion
pub trait Notices: Send + Sync {
    fn deleted(&self, kind: ResourceKind, id: &str);

    fn delete_failed(&self, kind: ResourceKind, id: &str, err: &DgcError);
}

/// Deletions to stdout, failures to the log stream
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotices;

impl Notices for StdoutNotices {
    fn deleted(&self, kind: ResourceKind, id: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "Deleted {}: {}", kind, id);
    }

    fn delete_failed(&self, kind: ResourceKind, id: &str, err: &DgcError) {
        error!("Error. Failed to delete {}: {}: {}", kind, id, err);
    }
}

/// Keeps every notice in memory, in arrival order
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordedNotices {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordedNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

#[cfg(test)]
impl Notices for RecordedNotices {
    fn deleted(&self, kind: ResourceKind, id: &str) {
        self.push(format!("Deleted {}: {}", kind, id));
    }

    fn delete_failed(&self, kind: ResourceKind, id: &str, err: &DgcError) {
        self.push(format!("Failed to delete {}: {}: {}", kind, id, err));
    }
}
