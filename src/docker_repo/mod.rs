// Docker runtime client via bollard

mod convert;
mod error;
mod stats;

pub use convert::{
    PortMapping, SHORT_ID_LEN, container_name, format_ports, normalize_reference, short_id,
    split_log_lines,
};
pub use error::RuntimeError;

use crate::models::{
    ContainerSnapshot, ContainerState, ContainerStatsPatch, ImageSnapshot, RestartPolicy,
    SystemSnapshot,
};
use bollard::Docker;
use bollard::models::{ContainerUpdateBody, RestartPolicyNameEnum};
use bollard::query_parameters::{
    CreateImageOptions, ListContainersOptions, ListImagesOptions, LogsOptions,
    RemoveContainerOptions, RemoveImageOptions, RestartContainerOptions, StartContainerOptions,
    StatsOptions, StopContainerOptions,
};
use chrono::DateTime;
use futures_util::StreamExt;
use std::future::Future;
use tracing::{debug, instrument};

/// Seconds a container gets to exit before it is killed on stop/restart.
pub const STOP_GRACE_SECS: i32 = 10;

/// Operations the dashboard and daemon need from a container runtime.
///
/// Every call is independent; implementations acquire whatever connection they
/// need per call so futures can run concurrently on separate tasks.
pub trait RuntimeClient: Send + Sync + 'static {
    fn list_containers(
        &self,
    ) -> impl Future<Output = Result<Vec<ContainerSnapshot>, RuntimeError>> + Send;

    fn list_images(&self) -> impl Future<Output = Result<Vec<ImageSnapshot>, RuntimeError>> + Send;

    fn system_snapshot(&self) -> impl Future<Output = Result<SystemSnapshot, RuntimeError>> + Send;

    fn container_stats(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<ContainerStatsPatch, RuntimeError>> + Send;

    fn start(&self, id: &str) -> impl Future<Output = Result<(), RuntimeError>> + Send;

    fn stop(
        &self,
        id: &str,
        grace_secs: i32,
    ) -> impl Future<Output = Result<(), RuntimeError>> + Send;

    fn restart(
        &self,
        id: &str,
        grace_secs: i32,
    ) -> impl Future<Output = Result<(), RuntimeError>> + Send;

    fn remove(&self, id: &str, force: bool)
    -> impl Future<Output = Result<(), RuntimeError>> + Send;

    fn remove_image(
        &self,
        id: &str,
        force: bool,
    ) -> impl Future<Output = Result<(), RuntimeError>> + Send;

    fn set_restart_policy(
        &self,
        id: &str,
        policy: RestartPolicy,
    ) -> impl Future<Output = Result<(), RuntimeError>> + Send;

    /// Last `tail` lines of stdout+stderr, frame headers already stripped.
    fn logs(
        &self,
        id: &str,
        tail: u32,
    ) -> impl Future<Output = Result<Vec<String>, RuntimeError>> + Send;

    /// Pull an image, consuming the progress stream to completion.
    fn pull_image(&self, reference: &str)
    -> impl Future<Output = Result<(), RuntimeError>> + Send;
}

#[derive(Clone)]
pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    /// Connect to the local daemon (unix socket / named pipe, or `DOCKER_HOST`).
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self { docker })
    }

    /// Round-trip to the daemon; used as the startup connectivity check.
    pub async fn ping(&self) -> Result<(), RuntimeError> {
        self.docker.ping().await?;
        Ok(())
    }
}

impl RuntimeClient for DockerRepo {
    #[instrument(skip(self), fields(repo = "docker", operation = "list_containers"))]
    async fn list_containers(&self) -> Result<Vec<ContainerSnapshot>, RuntimeError> {
        let options = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(options)).await?;

        let snapshots = containers
            .into_iter()
            .map(|c| {
                let ports: Vec<PortMapping> = c
                    .ports
                    .as_deref()
                    .unwrap_or(&[])
                    .iter()
                    .map(|p| PortMapping {
                        private_port: p.private_port as u16,
                        public_port: p.public_port.map(|v| v as u16),
                        protocol: p
                            .typ
                            .as_ref()
                            .map(|t| t.to_string())
                            .filter(|t| !t.is_empty())
                            .unwrap_or_else(|| "tcp".to_string()),
                    })
                    .collect();
                let state = c
                    .state
                    .as_ref()
                    .map(|s| ContainerState::from_docker(&s.to_string()))
                    .unwrap_or_default();
                ContainerSnapshot {
                    id: short_id(c.id.as_deref().unwrap_or_default()),
                    name: container_name(c.names.as_deref()),
                    image: c.image.clone().unwrap_or_default(),
                    status: c.status.clone().unwrap_or_default(),
                    state,
                    ports: format_ports(&ports),
                    created: c.created.and_then(|t| DateTime::from_timestamp(t, 0)),
                    ..Default::default()
                }
            })
            .collect();
        Ok(snapshots)
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "list_images"))]
    async fn list_images(&self) -> Result<Vec<ImageSnapshot>, RuntimeError> {
        let images = self
            .docker
            .list_images(Some(ListImagesOptions::default()))
            .await?;
        Ok(images
            .into_iter()
            .map(|img| ImageSnapshot {
                id: short_id(&img.id),
                tags: img
                    .repo_tags
                    .into_iter()
                    .filter(|t| t != "<none>:<none>")
                    .collect(),
                size_bytes: img.size.max(0) as u64,
                created: DateTime::from_timestamp(img.created, 0),
            })
            .collect())
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "system_snapshot"))]
    async fn system_snapshot(&self) -> Result<SystemSnapshot, RuntimeError> {
        let info = self.docker.info().await?;
        let count = |v: Option<i64>| v.unwrap_or(0).max(0) as u64;
        Ok(SystemSnapshot {
            containers: count(info.containers),
            containers_running: count(info.containers_running),
            containers_paused: count(info.containers_paused),
            containers_stopped: count(info.containers_stopped),
            images: count(info.images),
            memory_limit_bytes: count(info.mem_total),
            ..Default::default()
        })
    }

    async fn container_stats(&self, id: &str) -> Result<ContainerStatsPatch, RuntimeError> {
        // stream=false makes the daemon take two samples so precpu_stats is populated.
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = std::pin::pin!(self.docker.stats(id, Some(options)));
        let response = stream
            .next()
            .await
            .ok_or_else(|| RuntimeError::Stream(format!("no stats for {id}")))??;
        stats::process_statistics(&response)
            .ok_or_else(|| RuntimeError::Stream(format!("incomplete stats for {id}")))
    }

    async fn start(&self, id: &str) -> Result<(), RuntimeError> {
        debug!(container = id, "start");
        self.docker
            .start_container(id, None::<StartContainerOptions>)
            .await?;
        Ok(())
    }

    async fn stop(&self, id: &str, grace_secs: i32) -> Result<(), RuntimeError> {
        debug!(container = id, grace_secs, "stop");
        let options = StopContainerOptions {
            t: Some(grace_secs),
            ..Default::default()
        };
        self.docker.stop_container(id, Some(options)).await?;
        Ok(())
    }

    async fn restart(&self, id: &str, grace_secs: i32) -> Result<(), RuntimeError> {
        debug!(container = id, grace_secs, "restart");
        let options = RestartContainerOptions {
            t: Some(grace_secs),
            ..Default::default()
        };
        self.docker.restart_container(id, Some(options)).await?;
        Ok(())
    }

    async fn remove(&self, id: &str, force: bool) -> Result<(), RuntimeError> {
        debug!(container = id, force, "remove");
        let options = RemoveContainerOptions {
            force,
            ..Default::default()
        };
        self.docker.remove_container(id, Some(options)).await?;
        Ok(())
    }

    async fn remove_image(&self, id: &str, force: bool) -> Result<(), RuntimeError> {
        debug!(image = id, force, "remove image");
        let options = RemoveImageOptions {
            force,
            ..Default::default()
        };
        self.docker.remove_image(id, Some(options), None).await?;
        Ok(())
    }

    async fn set_restart_policy(&self, id: &str, policy: RestartPolicy) -> Result<(), RuntimeError> {
        debug!(container = id, ?policy, "update restart policy");
        let name = match policy {
            RestartPolicy::None => RestartPolicyNameEnum::NO,
            RestartPolicy::Always => RestartPolicyNameEnum::ALWAYS,
        };
        let body = ContainerUpdateBody {
            restart_policy: Some(bollard::models::RestartPolicy {
                name: Some(name),
                maximum_retry_count: None,
            }),
            ..Default::default()
        };
        self.docker.update_container(id, body).await?;
        Ok(())
    }

    async fn logs(&self, id: &str, tail: u32) -> Result<Vec<String>, RuntimeError> {
        let options = LogsOptions {
            stdout: true,
            stderr: true,
            timestamps: true,
            tail: tail.to_string(),
            ..Default::default()
        };
        // bollard decodes the 8-byte multiplexing headers into LogOutput frames.
        let mut stream = std::pin::pin!(self.docker.logs(id, Some(options)));
        let mut chunks = Vec::new();
        while let Some(frame) = stream.next().await {
            chunks.push(frame?.into_bytes());
        }
        Ok(split_log_lines(chunks))
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "pull_image"))]
    async fn pull_image(&self, reference: &str) -> Result<(), RuntimeError> {
        let options = CreateImageOptions {
            from_image: Some(normalize_reference(reference)),
            ..Default::default()
        };
        let mut stream = std::pin::pin!(self.docker.create_image(Some(options), None, None));
        while let Some(progress) = stream.next().await {
            let info = progress?;
            if let Some(detail) = info.error_detail.and_then(|d| d.message) {
                return Err(RuntimeError::Stream(detail));
            }
        }
        Ok(())
    }
}
