// Docker container models

use chrono::{DateTime, Utc};

/// Docker container lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    #[default]
    Exited,
    Dead,
}

impl ContainerState {
    /// Parse from Docker API state string (e.g. "running", "exited").
    /// Anything unrecognised is treated as exited.
    pub fn from_docker(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => ContainerState::Created,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            "removing" => ContainerState::Removing,
            "dead" => ContainerState::Dead,
            _ => ContainerState::Exited,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Removing => "removing",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
        }
    }

    pub fn is_running(self) -> bool {
        self == ContainerState::Running
    }
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One container as seen on a single poll. Metrics start at zero and are
/// filled in by [`ContainerStatsPatch`] results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSnapshot {
    /// Truncated (12 char) container id.
    pub id: String,
    pub name: String,
    pub image: String,
    /// Human status text from the runtime, e.g. "Up 3 hours".
    pub status: String,
    pub state: ContainerState,
    pub ports: String,
    pub created: Option<DateTime<Utc>>,
    pub cpu_percent: f64,
    pub memory_usage_bytes: u64,
    pub memory_limit_bytes: u64,
    pub memory_percent: f64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
    pub autostart: bool,
}

impl ContainerSnapshot {
    /// Case-insensitive substring match on name, image and id.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.image.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
    }

    /// Overwrite the metric fields from a stats result; identity and status are untouched.
    pub fn apply_stats(&mut self, patch: &ContainerStatsPatch) {
        self.cpu_percent = patch.cpu_percent;
        self.memory_usage_bytes = patch.memory_usage_bytes;
        self.memory_limit_bytes = patch.memory_limit_bytes;
        self.memory_percent = patch.memory_percent;
        self.network_rx_bytes = patch.network_rx_bytes;
        self.network_tx_bytes = patch.network_tx_bytes;
    }

    /// The metric fields of this snapshot, as a patch.
    pub fn stats(&self) -> ContainerStatsPatch {
        ContainerStatsPatch {
            cpu_percent: self.cpu_percent,
            memory_usage_bytes: self.memory_usage_bytes,
            memory_limit_bytes: self.memory_limit_bytes,
            memory_percent: self.memory_percent,
            network_rx_bytes: self.network_rx_bytes,
            network_tx_bytes: self.network_tx_bytes,
        }
    }
}

/// Partial snapshot produced by a one-shot stats call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContainerStatsPatch {
    pub cpu_percent: f64,
    pub memory_usage_bytes: u64,
    pub memory_limit_bytes: u64,
    pub memory_percent: f64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
}

/// Restart policy applied when autostart membership is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    None,
    Always,
}

impl RestartPolicy {
    pub fn for_autostart(enabled: bool) -> Self {
        if enabled {
            RestartPolicy::Always
        } else {
            RestartPolicy::None
        }
    }
}
