//! dgc - a minimal garbage collector for container engines
//!
//! dgc enumerates the images and containers known to a container engine,
//! decides which of them are old enough to remove, and removes them
//! concurrently. Resources can be protected with an exclusion list of ids,
//! image tags, and container names.
//!
//! - [`coordinator`] runs one collection pass over both kinds of resource
//! - [`collector`] drives the per-resource pipeline
//! - [`engine`] talks to the container engine
//! - [`exclude`] and [`policy`] decide what is protected and what is old enough

pub mod cli;
pub mod collector;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod exclude;
pub mod policy;

pub use config::RunConfig;
pub use coordinator::{Coordinator, RunReport};
pub use error::{DgcError, Result};
