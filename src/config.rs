use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var that overrides the config file location.
pub const CONFIG_ENV: &str = "DOCKTOP_CONFIG";

const CONFIG_DIR_NAME: &str = "docktop";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dashboard tick interval.
    pub refresh_rate_ms: u64,
    /// Panel that is active when the dashboard starts.
    pub default_view: DefaultView,
    /// Container names or ids kept running by the daemon.
    pub autostart: Vec<String>,
    /// Tail length for log fetches.
    pub log_lines: u32,
    pub graph_style: GraphStyle,
    pub daemon_interval_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Containers,
    Images,
    Logs,
}

/// How the stats panel draws its time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphStyle {
    #[default]
    Blocks,
    Line,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 1000,
            default_view: DefaultView::Containers,
            autostart: Vec::new(),
            log_lines: 100,
            graph_style: GraphStyle::Blocks,
            daemon_interval_secs: 30,
        }
    }
}

/// `$DOCKTOP_CONFIG`, else `~/.config/docktop/config.toml` (`%APPDATA%\docktop` on Windows).
pub fn config_path() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base = if cfg!(windows) {
        dirs::config_dir()
    } else {
        dirs::home_dir().map(|h| h.join(".config"))
    };
    let base = base.ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl DashboardConfig {
    /// Load from [`config_path`]. A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(&config_path()?)
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(anyhow::anyhow!("read {}: {}", path.display(), e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: DashboardConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.refresh_rate_ms > 0,
            "refresh_rate_ms must be > 0, got {}",
            self.refresh_rate_ms
        );
        anyhow::ensure!(
            self.log_lines > 0,
            "log_lines must be > 0, got {}",
            self.log_lines
        );
        anyhow::ensure!(
            self.daemon_interval_secs > 0,
            "daemon_interval_secs must be > 0, got {}",
            self.daemon_interval_secs
        );
        anyhow::ensure!(
            self.autostart.iter().all(|s| !s.trim().is_empty()),
            "autostart entries must be non-empty"
        );
        Ok(())
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let s = toml::to_string_pretty(self)?;
        std::fs::write(path, s)?;
        Ok(())
    }

    pub fn is_autostart(&self, id_or_name: &str) -> bool {
        self.autostart.iter().any(|s| s == id_or_name)
    }

    pub fn add_autostart(&mut self, id_or_name: &str) {
        if !self.is_autostart(id_or_name) {
            self.autostart.push(id_or_name.to_string());
        }
    }

    pub fn remove_autostart(&mut self, id_or_name: &str) {
        self.autostart.retain(|s| s != id_or_name);
    }
}
