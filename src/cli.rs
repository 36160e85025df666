//! Command-line arguments

use crate::engine::docker::DEFAULT_SOCKET;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// dgc - a minimal container engine garbage collector
#[derive(Parser, Debug, Clone)]
#[command(name = "dgc")]
#[command(author = "Evoker Industries")]
#[command(version)]
#[command(about = "A minimal garbage collector for container images and containers", long_about = None)]
pub struct Args {
    /// Minimum age before a resource is collected (e.g. 1h, 30m, 1h30m, 45s)
    ///
    /// When not given, GRACE_PERIOD_SECONDS and then GRACE_PERIOD are read
    /// from the environment. A bare number there counts seconds. The default
    /// is 1h.
    #[arg(short, long, value_parser = humantime::parse_duration)]
    pub grace: Option<Duration>,

    /// Container engine endpoint (unix:///path, /path, tcp://host:port)
    #[arg(short, long, env = "DOCKER_SOCKET", default_value = DEFAULT_SOCKET)]
    pub socket: String,

    /// File, or directory of files, listing ids, tags and names to keep
    #[arg(short, long, env = "EXCLUDE_FROM_GC")]
    pub exclude: Option<PathBuf>,

    /// Don't print the id of each collected resource
    #[arg(short, long, env = "DGC_QUIET")]
    pub quiet: bool,

    /// Force images and containers to stop and be collected
    #[arg(short, long, env = "DGC_FORCE")]
    pub force: bool,

    /// Remove anonymous volumes along with containers
    #[arg(
        short = 'r',
        long,
        env = "DGC_REMOVE_VOLUMES",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub remove_volumes: bool,

    /// Don't prune untagged parent images of a collected image
    #[arg(short, long, env = "DGC_NO_PRUNE")]
    pub no_prune: bool,

    /// Ignore the grace period and collect everything now
    #[arg(short, long, env = "DGC_ALL")]
    pub all: bool,

    /// Only consider running containers and top-level images
    #[arg(long, env = "DGC_ACTIVE_ONLY")]
    pub active_only: bool,

    /// Timeout for each request to the engine
    #[arg(
        short,
        long,
        env = "DGC_TIMEOUT",
        default_value = "120s",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
