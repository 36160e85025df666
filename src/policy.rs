//! Grace-period eligibility
//!
//! A resource becomes collectable once it has existed for at least the
//! configured grace period. The boundary is inclusive.

use crate::error::{DgcError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::time::Duration;

/// Default grace period (one hour)
pub const DEFAULT_GRACE: Duration = Duration::from_secs(3600);

/// Minimum age a resource must reach before it may be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GracePeriod(TimeDelta);

impl GracePeriod {
    /// Grace used by the `--all` override: everything is eligible now
    pub const ZERO: GracePeriod = GracePeriod(TimeDelta::zero());

    /// Create a grace period from a wall-clock duration
    pub fn new(duration: Duration) -> Result<Self> {
        TimeDelta::from_std(duration).map(Self).map_err(|_| {
            DgcError::InvalidConfig(format!(
                "grace period {} is out of range",
                humantime::format_duration(duration)
            ))
        })
    }

    /// Whether this grace period lets everything through
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Decide whether a resource created at `created` may be collected at `now`
    pub fn is_eligible(&self, created: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if self.is_zero() {
            return true;
        }
        now.signed_duration_since(created) >= self.0
    }
}

impl Default for GracePeriod {
    fn default() -> Self {
        Self(TimeDelta::seconds(DEFAULT_GRACE.as_secs() as i64))
    }
}

impl fmt::Display for GracePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.to_std() {
            Ok(d) => write!(f, "{}", humantime::format_duration(d)),
            Err(_) => write!(f, "{}s", self.0.num_seconds()),
        }
    }
}
