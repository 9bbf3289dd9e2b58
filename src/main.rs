use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docktop::config::{self, DashboardConfig};
use docktop::daemon::Daemon;
use docktop::docker_repo::DockerRepo;
use docktop::{app, ui, version};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

const LOG_FILE_NAME: &str = "docktop.log";

const KEYBINDINGS: &str = "\
Keybindings:
  Tab        Switch between panels
  j/k, ↑/↓   Navigate lists / scroll logs
  s          Start container
  x          Stop container
  r          Restart container
  d          Delete container/image
  a          Toggle autostart
  p          Pull image (in images panel)
  Enter      View logs
  /          Filter
  G          Scroll to bottom (in logs)
  q          Quit";

#[derive(Parser)]
#[command(
    name = "docktop",
    version,
    about = "Docker container manager for the terminal",
    after_help = KEYBINDINGS
)]
struct Cli {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone, Copy)]
enum CliCommand {
    /// Start the interactive dashboard (default)
    Run,
    /// Run as daemon, keeping autostart containers running
    Daemon,
    /// Show version information
    Version,
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The dashboard owns the terminal, so its logs go to `<cache dir>/docktop/docktop.log`.
fn init_file_logging() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("docktop");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

fn init_stdout_logging() {
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(env_filter())
        .init();
}

/// Config plus the path toggles are saved to; falls back to defaults on error.
fn load_config() -> (DashboardConfig, Option<PathBuf>) {
    let path = match config::config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "no config location, autostart changes will not persist");
            None
        }
    };
    let config = match &path {
        Some(p) => DashboardConfig::load_from_path(p).unwrap_or_else(|e| {
            eprintln!("Warning: could not load config: {e:#}");
            DashboardConfig::default()
        }),
        None => DashboardConfig::default(),
    };
    (config, path)
}

async fn connect() -> Result<DockerRepo> {
    const HINT: &str = "Error connecting to Docker. Make sure Docker is running and accessible.";
    let repo = DockerRepo::connect().context(HINT)?;
    repo.ping().await.context(HINT)?;
    Ok(repo)
}

async fn run_dashboard() -> Result<()> {
    match init_file_logging() {
        Ok(path) => tracing::debug!(path = %path.display(), "logging to file"),
        Err(e) => eprintln!("Warning: file logging disabled: {e:#}"),
    }
    let (config, path) = load_config();
    let repo = connect().await?;
    tracing::info!(version = version::VERSION, "starting dashboard");
    app::runtime::run(repo, config, path).await
}

async fn run_daemon() -> Result<()> {
    init_stdout_logging();
    for line in ui::banner::LOGO {
        println!("{line}");
    }
    let (config, path) = load_config();
    let repo = connect().await?;
    tracing::info!(version = version::VERSION, "Starting docktop daemon");

    let daemon = Daemon::new(repo, config, path);
    daemon
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "cannot listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(CliCommand::Run) {
        CliCommand::Version => {
            println!("{}", version::version_line());
            Ok(())
        }
        CliCommand::Run => run_dashboard().await,
        CliCommand::Daemon => run_daemon().await,
    }
}
