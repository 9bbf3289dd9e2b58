// Messages into the dashboard loop and the side-effects it asks for

use crate::docker_repo::RuntimeError;
use crate::models::{
    ContainerSnapshot, ContainerStatsPatch, ImageSnapshot, RestartPolicy, SystemSnapshot,
};
use crossterm::event::KeyEvent;
use std::fmt;
use std::time::Duration;

/// Deadline for list, stats and log fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline for start/stop/restart/remove and restart-policy updates.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);
/// Deadline for image pulls.
pub const PULL_TIMEOUT: Duration = Duration::from_secs(300);

/// Everything the dashboard reacts to. Each background task produces exactly one.
#[derive(Debug, Clone)]
pub enum Event {
    Resize { width: u16, height: u16 },
    Key(KeyEvent),
    Tick,
    Fetched(FetchResult),
    CommandDone(Command),
    Failed { origin: Origin, error: RuntimeError },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Containers(Vec<ContainerSnapshot>),
    Images(Vec<ImageSnapshot>),
    System(SystemSnapshot),
    Stats {
        id: String,
        stats: ContainerStatsPatch,
    },
    Logs {
        id: String,
        lines: Vec<String>,
    },
}

/// Read-only queries against the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    Containers,
    Images,
    System,
    Stats(String),
    Logs { id: String, tail: u32 },
}

impl Fetch {
    pub fn timeout(&self) -> Duration {
        FETCH_TIMEOUT
    }
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fetch::Containers => f.write_str("list containers"),
            Fetch::Images => f.write_str("list images"),
            Fetch::System => f.write_str("system info"),
            Fetch::Stats(id) => write!(f, "stats {id}"),
            Fetch::Logs { id, .. } => write!(f, "logs {id}"),
        }
    }
}

/// Mutating, fire-and-forget operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(String),
    Stop(String),
    Restart(String),
    Remove { id: String, force: bool },
    RemoveImage(String),
    SetRestartPolicy { id: String, policy: RestartPolicy },
    Pull(String),
}

impl Command {
    pub fn timeout(&self) -> Duration {
        match self {
            Command::Pull(_) => PULL_TIMEOUT,
            _ => COMMAND_TIMEOUT,
        }
    }

    /// Whether completion changes the image list rather than the container list.
    pub fn affects_images(&self) -> bool {
        matches!(self, Command::Pull(_) | Command::RemoveImage(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start(id) => write!(f, "start {id}"),
            Command::Stop(id) => write!(f, "stop {id}"),
            Command::Restart(id) => write!(f, "restart {id}"),
            Command::Remove { id, .. } => write!(f, "remove {id}"),
            Command::RemoveImage(id) => write!(f, "remove image {id}"),
            Command::SetRestartPolicy { id, .. } => write!(f, "update restart policy {id}"),
            Command::Pull(reference) => write!(f, "pull {reference}"),
        }
    }
}

/// Which request a failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Fetch(Fetch),
    Command(Command),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Fetch(fetch) => fetch.fmt(f),
            Origin::Command(command) => command.fmt(f),
        }
    }
}

/// Side-effects requested by [`Dashboard::handle`](super::Dashboard::handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Deliver [`Event::Tick`] after the delay.
    ScheduleTick(Duration),
    Fetch(Fetch),
    Command(Command),
}
