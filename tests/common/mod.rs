// Shared test helpers: snapshot builders and an in-memory runtime

#![allow(dead_code)]

use docktop::docker_repo::{RuntimeClient, RuntimeError};
use docktop::models::{
    ContainerSnapshot, ContainerState, ContainerStatsPatch, ImageSnapshot, RestartPolicy,
    SystemSnapshot,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn container(id: &str, name: &str, state: ContainerState) -> ContainerSnapshot {
    ContainerSnapshot {
        id: id.to_string(),
        name: name.to_string(),
        image: format!("{name}:latest"),
        status: state.to_string(),
        state,
        ports: "-".to_string(),
        ..Default::default()
    }
}

pub fn running(id: &str, name: &str) -> ContainerSnapshot {
    container(id, name, ContainerState::Running)
}

pub fn exited(id: &str, name: &str) -> ContainerSnapshot {
    container(id, name, ContainerState::Exited)
}

pub fn image(id: &str, tag: &str) -> ImageSnapshot {
    ImageSnapshot {
        id: id.to_string(),
        tags: vec![tag.to_string()],
        size_bytes: 1024 * 1024,
        created: None,
    }
}

pub fn cpu(percent: f64) -> ContainerStatsPatch {
    ContainerStatsPatch {
        cpu_percent: percent,
        ..Default::default()
    }
}

/// Runtime double: serves canned data and records every mutating call.
#[derive(Default)]
pub struct FakeRuntime {
    pub containers: Mutex<Vec<ContainerSnapshot>>,
    pub images: Mutex<Vec<ImageSnapshot>>,
    pub system: Mutex<SystemSnapshot>,
    pub stats: Mutex<HashMap<String, ContainerStatsPatch>>,
    pub logs: Mutex<HashMap<String, Vec<String>>>,
    /// Ids whose start call fails.
    pub failing_starts: Mutex<Vec<String>>,
    /// Makes every list call fail.
    pub list_error: Mutex<Option<RuntimeError>>,
    /// Sleep before answering any call.
    pub delay: Mutex<Option<Duration>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRuntime {
    pub fn with_containers(containers: Vec<ContainerSnapshot>) -> Self {
        let fake = Self::default();
        *fake.containers.lock().unwrap() = containers;
        fake
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }

    fn set_state(&self, id: &str, state: ContainerState) {
        if let Some(c) = self.containers.lock().unwrap().iter_mut().find(|c| c.id == id) {
            c.state = state;
        }
    }
}

impl RuntimeClient for FakeRuntime {
    async fn list_containers(&self) -> Result<Vec<ContainerSnapshot>, RuntimeError> {
        self.pause().await;
        if let Some(e) = self.list_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.containers.lock().unwrap().clone())
    }

    async fn list_images(&self) -> Result<Vec<ImageSnapshot>, RuntimeError> {
        self.pause().await;
        Ok(self.images.lock().unwrap().clone())
    }

    async fn system_snapshot(&self) -> Result<SystemSnapshot, RuntimeError> {
        self.pause().await;
        Ok(self.system.lock().unwrap().clone())
    }

    async fn container_stats(&self, id: &str) -> Result<ContainerStatsPatch, RuntimeError> {
        self.pause().await;
        self.stats
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))
    }

    async fn start(&self, id: &str) -> Result<(), RuntimeError> {
        self.pause().await;
        self.record(format!("start {id}"));
        if self.failing_starts.lock().unwrap().iter().any(|f| f == id) {
            return Err(RuntimeError::Api {
                status: 500,
                message: "cannot start".to_string(),
            });
        }
        self.set_state(id, ContainerState::Running);
        Ok(())
    }

    async fn stop(&self, id: &str, grace_secs: i32) -> Result<(), RuntimeError> {
        self.pause().await;
        self.record(format!("stop {id} {grace_secs}"));
        self.set_state(id, ContainerState::Exited);
        Ok(())
    }

    async fn restart(&self, id: &str, grace_secs: i32) -> Result<(), RuntimeError> {
        self.pause().await;
        self.record(format!("restart {id} {grace_secs}"));
        Ok(())
    }

    async fn remove(&self, id: &str, force: bool) -> Result<(), RuntimeError> {
        self.pause().await;
        self.record(format!("remove {id} force={force}"));
        self.containers.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn remove_image(&self, id: &str, force: bool) -> Result<(), RuntimeError> {
        self.pause().await;
        self.record(format!("remove_image {id} force={force}"));
        Ok(())
    }

    async fn set_restart_policy(&self, id: &str, policy: RestartPolicy) -> Result<(), RuntimeError> {
        self.pause().await;
        self.record(format!("restart_policy {id} {policy:?}"));
        Ok(())
    }

    async fn logs(&self, id: &str, tail: u32) -> Result<Vec<String>, RuntimeError> {
        self.pause().await;
        let lines = self.logs.lock().unwrap().get(id).cloned().unwrap_or_default();
        let skip = lines.len().saturating_sub(tail as usize);
        Ok(lines.into_iter().skip(skip).collect())
    }

    async fn pull_image(&self, reference: &str) -> Result<(), RuntimeError> {
        self.pause().await;
        self.record(format!("pull {reference}"));
        Ok(())
    }
}
