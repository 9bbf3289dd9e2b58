// Autostart daemon: keeps the configured containers running.
// Config is re-read every cycle so dashboard toggles take effect without a restart.

use crate::config::DashboardConfig;
use crate::docker_repo::{RuntimeClient, RuntimeError};
use crate::models::ContainerSnapshot;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use tokio::time::{Duration, interval};

/// Outcome of one reconciliation pass, keyed by the configured name/id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub started: Vec<String>,
    pub already_running: Vec<String>,
    pub missing: Vec<String>,
    pub failed: Vec<(String, RuntimeError)>,
}

/// Start every autostart target that exists and is not running.
///
/// Targets match a container by short id or name. Only the list call can fail
/// the whole pass; per-container start failures are collected in the report.
pub async fn reconcile_once<C: RuntimeClient>(
    client: &C,
    autostart: &[String],
) -> Result<ReconcileReport, RuntimeError> {
    let mut report = ReconcileReport::default();
    if autostart.is_empty() {
        return Ok(report);
    }

    let containers = client.list_containers().await?;
    let mut by_key: HashMap<&str, &ContainerSnapshot> = HashMap::new();
    for c in &containers {
        by_key.insert(c.id.as_str(), c);
        by_key.insert(c.name.as_str(), c);
    }

    for target in autostart {
        let Some(container) = by_key.get(target.as_str()) else {
            tracing::warn!(container = %target, "Autostart container not found");
            report.missing.push(target.clone());
            continue;
        };
        if container.state.is_running() {
            report.already_running.push(target.clone());
            continue;
        }
        tracing::info!(container = %target, was = %container.state, "Starting container");
        match client.start(&container.id).await {
            Ok(()) => {
                tracing::info!(container = %target, "Started container");
                report.started.push(target.clone());
            }
            Err(e) => {
                tracing::warn!(container = %target, error = %e, "Failed to start container");
                report.failed.push((target.clone(), e));
            }
        }
    }
    Ok(report)
}

pub struct Daemon<C> {
    client: C,
    config: DashboardConfig,
    config_path: Option<PathBuf>,
    interval: Duration,
}

impl<C: RuntimeClient> Daemon<C> {
    pub fn new(client: C, config: DashboardConfig, config_path: Option<PathBuf>) -> Self {
        let interval = Duration::from_secs(config.daemon_interval_secs);
        Self {
            client,
            config,
            config_path,
            interval,
        }
    }

    pub fn status(&self) -> String {
        format!(
            "Monitoring {} containers, check interval: {:?}",
            self.config.autostart.len(),
            self.interval
        )
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Keep the previous config when the file cannot be read or parsed.
    fn reload_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        match DashboardConfig::load_from_path(path) {
            Ok(config) => self.config = config,
            Err(e) => tracing::warn!(error = %e, "config reload failed, keeping previous"),
        }
    }

    /// Reload the config and reconcile once. `None` when the container list
    /// could not be fetched.
    pub async fn run_once(&mut self) -> Option<ReconcileReport> {
        self.reload_config();
        match reconcile_once(&self.client, &self.config.autostart).await {
            Ok(report) => {
                tracing::debug!(
                    operation = "reconcile",
                    started = report.started.len(),
                    missing = report.missing.len(),
                    failed = report.failed.len(),
                    "reconcile finished"
                );
                Some(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "list_containers", "reconcile failed");
                None
            }
        }
    }

    /// Reconcile immediately, then every interval until `shutdown` resolves.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        tracing::info!("{}", self.status());
        let mut tick = interval(self.interval);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut shutdown = std::pin::pin!(shutdown);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.run_once().await;
                }
                _ = &mut shutdown => {
                    tracing::info!("Daemon stopping (signal received)");
                    break;
                }
            }
        }
    }
}
