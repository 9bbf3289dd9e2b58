// Shape raw list/log responses into snapshot fields.

/// Length of the short ids shown in the UI.
pub const SHORT_ID_LEN: usize = 12;

const MAX_PORTS_LEN: usize = 30;

/// First 12 chars of a container or image id, without any `sha256:` prefix.
pub fn short_id(id: &str) -> String {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    id.chars().take(SHORT_ID_LEN).collect()
}

/// Primary container name without Docker's leading slash.
pub fn container_name(names: Option<&[String]>) -> String {
    names
        .and_then(|n| n.first())
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_default()
}

/// One published or exposed port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub private_port: u16,
    pub public_port: Option<u16>,
    pub protocol: String,
}

/// `8080->80/tcp, 443/tcp`, capped at 30 chars; `-` when nothing is exposed.
pub fn format_ports(ports: &[PortMapping]) -> String {
    if ports.is_empty() {
        return "-".to_string();
    }
    let joined = ports
        .iter()
        .map(|p| match p.public_port {
            Some(public) if public > 0 => {
                format!("{}->{}/{}", public, p.private_port, p.protocol)
            }
            _ => format!("{}/{}", p.private_port, p.protocol),
        })
        .collect::<Vec<_>>()
        .join(", ");
    if joined.chars().count() > MAX_PORTS_LEN {
        let head: String = joined.chars().take(MAX_PORTS_LEN - 3).collect();
        format!("{head}...")
    } else {
        joined
    }
}

/// Pin untagged references to `:latest`; the pull API fetches every tag otherwise.
pub fn normalize_reference(reference: &str) -> String {
    let reference = reference.trim();
    let last_segment = reference.rsplit('/').next().unwrap_or(reference);
    if reference.contains('@') || last_segment.contains(':') {
        reference.to_string()
    } else {
        format!("{reference}:latest")
    }
}

/// Split demultiplexed log payloads into display lines.
///
/// Chunks do not align with line boundaries, so they are joined first.
/// Empty lines are dropped.
pub fn split_log_lines<I, B>(chunks: I) -> Vec<String>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut raw = Vec::new();
    for chunk in chunks {
        raw.extend_from_slice(chunk.as_ref());
    }
    String::from_utf8_lossy(&raw)
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
