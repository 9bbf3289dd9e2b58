// Runtime-wide counters and derived aggregate usage

use super::ContainerSnapshot;

/// Daemon-level counts plus aggregate usage.
///
/// `cpu_percent` and `memory_usage_bytes` are not reported by the runtime; the
/// dashboard derives them from the running containers via [`SystemSnapshot::recompute_usage`].
/// `memory_limit_bytes` is the host total as reported by the runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSnapshot {
    pub containers: u64,
    pub containers_running: u64,
    pub containers_paused: u64,
    pub containers_stopped: u64,
    pub images: u64,
    pub memory_limit_bytes: u64,
    pub cpu_percent: f64,
    pub memory_usage_bytes: u64,
}

impl SystemSnapshot {
    /// Replace the aggregate usage with the sum over running containers.
    pub fn recompute_usage(&mut self, containers: &[ContainerSnapshot]) {
        let (cpu, mem) = aggregate_usage(containers);
        self.cpu_percent = cpu;
        self.memory_usage_bytes = mem;
    }

    /// Memory usage as a percent of the host limit; 0 when the limit is unknown.
    pub fn memory_percent(&self) -> f64 {
        if self.memory_limit_bytes == 0 {
            return 0.0;
        }
        self.memory_usage_bytes as f64 / self.memory_limit_bytes as f64 * 100.0
    }
}

/// Sum of CPU percent and memory bytes over containers in the running state.
pub fn aggregate_usage(containers: &[ContainerSnapshot]) -> (f64, u64) {
    containers
        .iter()
        .filter(|c| c.state.is_running())
        .fold((0.0, 0u64), |(cpu, mem), c| {
            (cpu + c.cpu_percent, mem.saturating_add(c.memory_usage_bytes))
        })
}
