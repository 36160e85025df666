//! In-memory engine used by the collector tests

use super::{
    ContainerRemoval, ContainerSummary, Engine, ImageRemoval, ImageSummary, ResourceDetail,
};
use crate::error::{DgcError, Result};
use async_trait::async_trait;
use bollard::errors::Error as BollardError;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RemoveImage(String, ImageRemoval),
    RemoveContainer(String, ContainerRemoval),
}

#[derive(Default)]
struct State {
    images: Vec<ImageSummary>,
    containers: Vec<ContainerSummary>,
    created: HashMap<String, DateTime<Utc>>,
    fail_inspect: HashSet<String>,
    fail_remove: HashSet<String>,
    fail_list_images: bool,
    fail_list_containers: bool,
    holds: HashMap<String, Arc<Notify>>,
    calls: Vec<Call>,
}

fn server_error(status_code: u16, message: String) -> DgcError {
    DgcError::Docker(BollardError::DockerResponseServerError {
        status_code,
        message,
    })
}

/// Engine whose inventory lives in memory. Removals really remove, so a
/// second run sees what the first one left behind.
#[derive(Default)]
pub struct FakeEngine {
    state: Mutex<State>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, id: &str, tags: &[&str], age: TimeDelta) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let created = Utc::now() - age;
            state.images.push(ImageSummary {
                id: id.to_string(),
                repo_tags: tags.iter().map(|t| t.to_string()).collect(),
            });
            state.created.insert(id.to_string(), created);
        }
        self
    }

    pub fn with_container(self, id: &str, names: &[&str], image: &str, age: TimeDelta) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let created = Utc::now() - age;
            state.containers.push(ContainerSummary {
                id: id.to_string(),
                names: names.iter().map(|n| n.to_string()).collect(),
                image: image.to_string(),
            });
            state.created.insert(id.to_string(), created);
        }
        self
    }

    pub fn fail_inspect(self, id: &str) -> Self {
        self.state.lock().unwrap().fail_inspect.insert(id.to_string());
        self
    }

    pub fn fail_remove(self, id: &str) -> Self {
        self.state.lock().unwrap().fail_remove.insert(id.to_string());
        self
    }

    /// Park the next inspection of `id` until `gate` is notified
    pub fn hold_inspect(self, id: &str, gate: Arc<Notify>) -> Self {
        self.state.lock().unwrap().holds.insert(id.to_string(), gate);
        self
    }

    pub fn fail_list_images(self) -> Self {
        self.state.lock().unwrap().fail_list_images = true;
        self
    }

    pub fn fail_list_containers(self) -> Self {
        self.state.lock().unwrap().fail_list_containers = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn image_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.images.iter().map(|i| i.id.clone()).collect()
    }

    pub fn container_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.containers.iter().map(|c| c.id.clone()).collect()
    }

    async fn inspect(&self, id: &str) -> Result<ResourceDetail> {
        let hold = self.state.lock().unwrap().holds.remove(id);
        if let Some(gate) = hold {
            gate.notified().await;
        }

        let state = self.state.lock().unwrap();
        if state.fail_inspect.contains(id) {
            return Err(server_error(500, format!("inspect {} refused", id)));
        }
        state
            .created
            .get(id)
            .map(|created| ResourceDetail {
                id: id.to_string(),
                created: *created,
            })
            .ok_or_else(|| server_error(404, format!("no such resource: {}", id)))
    }
}

#[async_trait]
impl Engine for FakeEngine {
    async fn list_images(&self, _all: bool) -> Result<Vec<ImageSummary>> {
        let state = self.state.lock().unwrap();
        if state.fail_list_images {
            return Err(server_error(500, "connection refused".into()));
        }
        Ok(state.images.clone())
    }

    async fn list_containers(&self, _all: bool) -> Result<Vec<ContainerSummary>> {
        let state = self.state.lock().unwrap();
        if state.fail_list_containers {
            return Err(server_error(500, "connection refused".into()));
        }
        Ok(state.containers.clone())
    }

    async fn inspect_image(&self, id: &str) -> Result<ResourceDetail> {
        self.inspect(id).await
    }

    async fn inspect_container(&self, id: &str) -> Result<ResourceDetail> {
        self.inspect(id).await
    }

    async fn remove_image(&self, id: &str, options: ImageRemoval) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::RemoveImage(id.to_string(), options));
        if state.fail_remove.contains(id) {
            return Err(server_error(409, format!("image {} is in use", id)));
        }
        let before = state.images.len();
        state.images.retain(|i| i.id != id);
        if state.images.len() == before {
            return Err(server_error(404, format!("no such image: {}", id)));
        }
        Ok(())
    }

    async fn remove_container(&self, id: &str, options: ContainerRemoval) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::RemoveContainer(id.to_string(), options));
        if state.fail_remove.contains(id) {
            return Err(server_error(409, format!("container {} is running", id)));
        }
        let before = state.containers.len();
        state.containers.retain(|c| c.id != id);
        if state.containers.len() == before {
            return Err(server_error(404, format!("no such container: {}", id)));
        }
        Ok(())
    }
}

/// Poll `done` until it holds, failing the test after five seconds
pub async fn wait_until(mut done: impl FnMut() -> bool) {
    let polling = async {
        while !done() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(5), polling)
        .await
        .expect("condition not reached within 5s");
}
