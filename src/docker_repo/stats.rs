// Process raw Docker stats API response into a metrics patch.

use crate::models::ContainerStatsPatch;
use bollard::secret::ContainerStatsResponse;

/// Process a raw Docker stats response into a [`ContainerStatsPatch`].
///
/// CPU percent is `(cpu_delta / system_delta) * online_cpus * 100` over the two
/// samples carried by the response; memory percent is `used / limit * 100`.
/// Returns `None` when the CPU sections are absent (container not running).
pub(crate) fn process_statistics(s: &ContainerStatsResponse) -> Option<ContainerStatsPatch> {
    let cpu_stats = s.cpu_stats.as_ref()?;
    let precpu_stats = s.precpu_stats.as_ref()?;

    let cpu_usage = cpu_stats.cpu_usage.as_ref()?;
    let precpu_usage = precpu_stats.cpu_usage.as_ref()?;

    let cpu_delta =
        cpu_usage.total_usage.unwrap_or(0) as i64 - precpu_usage.total_usage.unwrap_or(0) as i64;
    let system_delta = cpu_stats.system_cpu_usage.unwrap_or(0) as i64
        - precpu_stats.system_cpu_usage.unwrap_or(0) as i64;
    // Older daemons omit online_cpus; fall back to the per-cpu breakdown.
    let online = match cpu_stats.online_cpus {
        Some(n) if n > 0 => n as f64,
        _ => cpu_usage
            .percpu_usage
            .as_ref()
            .map_or(1.0, |v| v.len().max(1) as f64),
    };
    let cpu_percent = if system_delta > 0 && cpu_delta > 0 {
        (cpu_delta as f64 / system_delta as f64) * online * 100.0
    } else {
        0.0
    };

    let mem_usage = s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0);
    let mem_limit = s.memory_stats.as_ref().and_then(|m| m.limit).unwrap_or(0);
    let memory_percent = if mem_limit > 0 {
        mem_usage as f64 / mem_limit as f64 * 100.0
    } else {
        0.0
    };

    let (network_rx, network_tx) = s.networks.as_ref().map_or((0u64, 0u64), |n| {
        n.values().fold((0u64, 0u64), |(rx, tx), v| {
            (rx + v.rx_bytes.unwrap_or(0), tx + v.tx_bytes.unwrap_or(0))
        })
    });

    Some(ContainerStatsPatch {
        cpu_percent,
        memory_usage_bytes: mem_usage,
        memory_limit_bytes: mem_limit,
        memory_percent,
        network_rx_bytes: network_rx,
        network_tx_bytes: network_tx,
    })
}
