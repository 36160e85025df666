//! Run configuration
//!
//! Built once at startup from the command line and never mutated afterwards.

use crate::cli::Args;
use crate::engine::docker::{Endpoint, DEFAULT_SOCKET};
use crate::engine::{ContainerRemoval, ImageRemoval};
use crate::error::{DgcError, Result};
use crate::policy::{GracePeriod, DEFAULT_GRACE};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variables read, in order, when `--grace` is not given
pub const GRACE_ENV_VARS: [&str; 2] = ["GRACE_PERIOD_SECONDS", "GRACE_PERIOD"];

/// Immutable settings for one collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Effective grace period (zero when `--all` is set)
    pub grace: GracePeriod,
    pub quiet: bool,
    pub verbose: bool,
    pub force: bool,
    pub remove_volumes: bool,
    pub prune_parents: bool,
    /// Engine endpoint
    pub socket: String,
    /// Exclusion source, if any
    pub exclude: Option<PathBuf>,
    /// List stopped containers and intermediate images too
    pub list_all: bool,
    /// Per-request engine timeout
    pub timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grace: GracePeriod::default(),
            quiet: false,
            verbose: false,
            force: false,
            remove_volumes: true,
            prune_parents: true,
            socket: DEFAULT_SOCKET.to_string(),
            exclude: None,
            list_all: true,
            timeout: Duration::from_secs(120),
        }
    }
}

impl RunConfig {
    /// Validate parsed arguments into a run configuration
    pub fn from_args(args: &Args) -> Result<Self> {
        Self::from_args_with_env(args, |key| std::env::var(key).ok())
    }

    /// Like [`RunConfig::from_args`], reading grace fallbacks through `env`
    pub fn from_args_with_env<F>(args: &Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let grace = GracePeriod::new(resolve_grace(args.grace, env)?)?;
        let grace = if args.all { GracePeriod::ZERO } else { grace };

        let config = Self {
            grace,
            quiet: args.quiet,
            verbose: args.verbose,
            force: args.force,
            remove_volumes: args.remove_volumes,
            prune_parents: !args.no_prune,
            socket: args.socket.clone(),
            exclude: args.exclude.clone(),
            list_all: !args.active_only,
            timeout: args.timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that the type system does not already enforce
    pub fn validate(&self) -> Result<()> {
        Endpoint::parse(&self.socket)?;
        if self.timeout.is_zero() {
            return Err(DgcError::InvalidConfig("engine timeout must be nonzero".into()));
        }
        if let Some(path) = &self.exclude {
            if path.as_os_str().is_empty() {
                return Err(DgcError::InvalidConfig("exclude path is empty".into()));
            }
        }
        Ok(())
    }

    pub fn image_removal(&self) -> ImageRemoval {
        ImageRemoval {
            force: self.force,
            prune_parents: self.prune_parents,
        }
    }

    pub fn container_removal(&self) -> ContainerRemoval {
        ContainerRemoval {
            force: self.force,
            remove_volumes: self.remove_volumes,
        }
    }
}

/// The `--grace` flag wins, then the first grace variable that is set
fn resolve_grace<F>(flag: Option<Duration>, env: F) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(grace) = flag {
        return Ok(grace);
    }
    for key in GRACE_ENV_VARS {
        match env(key) {
            Some(raw) if !raw.trim().is_empty() => return parse_grace(key, raw.trim()),
            _ => {}
        }
    }
    Ok(DEFAULT_GRACE)
}

/// A bare number counts seconds, anything else goes through humantime
fn parse_grace(key: &str, raw: &str) -> Result<Duration> {
    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(raw)
        .map_err(|e| DgcError::InvalidConfig(format!("invalid {} {:?}: {}", key, raw, e)))
}
