// The dashboard controller

use super::event::{Command, Event, Fetch, FetchResult, Origin, Task};
use super::input::{Action, InputState, Mode};
use crate::config::DashboardConfig;
use crate::docker_repo::RuntimeError;
use crate::models::{ContainerSnapshot, RestartPolicy};
use crate::ui::layout::{self, DashboardLayout};
use crate::ui::{
    ContainersPanel, ImagesPanel, LogsPanel, Panel, StatsPanel, StatusLine, banner, help,
};
use crate::version::VERSION;
use ratatui::{Frame, layout::Rect};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Owns every panel, the focused panel and the input mode, and never performs
/// I/O. [`Dashboard::handle`] folds one [`Event`] into state and returns the
/// [`Task`]s to run. Results arrive in any order, so each merge only touches
/// the data it carries and tolerates stale ids.
pub struct Dashboard {
    config: DashboardConfig,
    /// Where autostart changes are persisted; `None` keeps them in memory only.
    config_path: Option<PathBuf>,
    active: Panel,
    input: InputState,
    containers: ContainersPanel,
    images: ImagesPanel,
    logs: LogsPanel,
    stats: StatsPanel,
    error: Option<String>,
    area: Rect,
    quit: bool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, config_path: Option<PathBuf>) -> Self {
        let active = Panel::from(config.default_view);
        let stats = StatsPanel::new(config.graph_style);
        Self {
            config,
            config_path,
            active,
            input: InputState::default(),
            containers: ContainersPanel::new(),
            images: ImagesPanel::new(),
            logs: LogsPanel::new(),
            stats,
            error: None,
            area: Rect::default(),
            quit: false,
        }
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.refresh_rate_ms)
    }

    /// First tick plus one fetch of each list.
    pub fn initialize(&mut self) -> Vec<Task> {
        vec![
            Task::ScheduleTick(self.tick_interval()),
            Task::Fetch(Fetch::Containers),
            Task::Fetch(Fetch::Images),
            Task::Fetch(Fetch::System),
        ]
    }

    pub fn handle(&mut self, event: Event) -> Vec<Task> {
        let tasks = match event {
            Event::Resize { width, height } => {
                self.area = Rect::new(0, 0, width, height);
                Vec::new()
            }
            Event::Key(key) => match self.input.handle_key(key, self.active) {
                Some(action) => self.apply(action),
                None => Vec::new(),
            },
            Event::Tick => self.on_tick(),
            Event::Fetched(result) => self.merge(result),
            Event::CommandDone(command) => {
                info!(%command, "command completed");
                if command.affects_images() {
                    vec![Task::Fetch(Fetch::Images)]
                } else {
                    vec![Task::Fetch(Fetch::Containers)]
                }
            }
            Event::Failed { origin, error } => {
                self.on_failure(origin, error);
                Vec::new()
            }
        };
        self.relayout();
        tasks
    }

    fn on_tick(&mut self) -> Vec<Task> {
        let mut tasks = vec![
            Task::ScheduleTick(self.tick_interval()),
            Task::Fetch(Fetch::Containers),
            Task::Fetch(Fetch::System),
        ];
        tasks.extend(
            self.containers
                .items()
                .iter()
                .filter(|c| c.state.is_running())
                .map(|c| Task::Fetch(Fetch::Stats(c.id.clone()))),
        );
        if matches!(self.active, Panel::Containers | Panel::Logs) {
            if let Some(task) = self.follow_selection() {
                tasks.push(task);
            }
        }
        tasks
    }

    /// Point the log viewer at the selected container and fetch its logs.
    fn follow_selection(&mut self) -> Option<Task> {
        let selected = self.containers.selected()?;
        let (id, name) = (selected.id.clone(), selected.name.clone());
        self.logs.set_container(&id, &name);
        Some(Task::Fetch(Fetch::Logs {
            id,
            tail: self.config.log_lines,
        }))
    }

    fn merge(&mut self, result: FetchResult) -> Vec<Task> {
        match result {
            FetchResult::Containers(list) => {
                let list = self.prepare_containers(list);
                self.containers.set_items(list);
                self.stats.refresh_usage(self.containers.items());
                self.error = None;
            }
            FetchResult::Stats { id, stats } => {
                if self.containers.apply_stats(&id, &stats) {
                    self.stats.refresh_usage(self.containers.items());
                } else {
                    debug!(container = %id, "dropping stats for unknown container");
                }
            }
            FetchResult::Images(list) => self.images.set_items(list),
            FetchResult::System(snapshot) => {
                self.stats.record(snapshot, self.containers.items());
            }
            FetchResult::Logs { id, lines } => {
                if self.logs.container_id() == Some(id.as_str()) {
                    self.logs.set_lines(lines);
                } else {
                    debug!(container = %id, "discarding logs for a container no longer viewed");
                }
            }
        }
        Vec::new()
    }

    /// Mark autostart members and carry metrics over for ids still running,
    /// so a list refresh never zeroes numbers a stats result already filled in.
    fn prepare_containers(&self, mut list: Vec<ContainerSnapshot>) -> Vec<ContainerSnapshot> {
        for container in &mut list {
            container.autostart = self.is_autostart(container);
            if !container.state.is_running() {
                continue;
            }
            let previous = self
                .containers
                .items()
                .iter()
                .find(|old| old.id == container.id && old.state.is_running());
            if let Some(old) = previous {
                container.apply_stats(&old.stats());
            }
        }
        list
    }

    fn is_autostart(&self, container: &ContainerSnapshot) -> bool {
        self.config.is_autostart(&container.name) || self.config.is_autostart(&container.id)
    }

    fn on_failure(&mut self, origin: Origin, error: RuntimeError) {
        if let Origin::Fetch(Fetch::Stats(id)) = &origin {
            debug!(container = %id, error = %error, "stats fetch failed");
            return;
        }
        warn!(%origin, error = %error, "request failed");
        self.error = Some(format!("{origin}: {error}"));
    }

    fn apply(&mut self, action: Action) -> Vec<Task> {
        match action {
            Action::Quit => {
                self.quit = true;
                Vec::new()
            }
            Action::NextPanel => {
                self.active = self.active.next();
                Vec::new()
            }
            Action::Up => {
                self.navigate(-1);
                Vec::new()
            }
            Action::Down => {
                self.navigate(1);
                Vec::new()
            }
            Action::Start => self.container_command(|c| {
                (!c.state.is_running()).then(|| Command::Start(c.id.clone()))
            }),
            Action::Stop => self.container_command(|c| {
                c.state.is_running().then(|| Command::Stop(c.id.clone()))
            }),
            Action::Restart => self.container_command(|c| Some(Command::Restart(c.id.clone()))),
            Action::Remove => self.container_command(|c| {
                Some(Command::Remove {
                    id: c.id.clone(),
                    force: c.state.is_running(),
                })
            }),
            Action::ToggleAutostart => self.toggle_autostart(),
            Action::OpenLogs => {
                let task = self.follow_selection();
                if task.is_some() {
                    self.active = Panel::Logs;
                }
                task.into_iter().collect()
            }
            Action::BackToContainers => {
                self.active = Panel::Containers;
                Vec::new()
            }
            Action::ScrollToBottom => {
                self.logs.scroll_to_bottom();
                Vec::new()
            }
            Action::RemoveImage => match self.images.selected() {
                Some(image) => vec![Task::Command(Command::RemoveImage(image.id.clone()))],
                None => Vec::new(),
            },
            Action::ApplyFilter(filter) => {
                if self.active == Panel::Images {
                    self.images.set_filter(filter);
                } else {
                    self.containers.set_filter(filter);
                }
                Vec::new()
            }
            Action::PullImage(reference) => vec![Task::Command(Command::Pull(reference))],
        }
    }

    fn navigate(&mut self, delta: isize) {
        match self.active {
            Panel::Containers => self.containers.move_selection(delta),
            Panel::Images => self.images.move_selection(delta),
            Panel::Logs if delta < 0 => self.logs.scroll_up(),
            Panel::Logs => self.logs.scroll_down(),
            Panel::Stats => {}
        }
    }

    /// Build a command for the selected container (after filtering), if any.
    fn container_command(
        &self,
        build: impl FnOnce(&ContainerSnapshot) -> Option<Command>,
    ) -> Vec<Task> {
        self.containers
            .selected()
            .and_then(build)
            .map(Task::Command)
            .into_iter()
            .collect()
    }

    fn toggle_autostart(&mut self) -> Vec<Task> {
        let Some(selected) = self.containers.selected() else {
            return Vec::new();
        };
        let (id, name) = (selected.id.clone(), selected.name.clone());
        let enable = !self.is_autostart(selected);
        if enable {
            self.config.add_autostart(&name);
        } else {
            self.config.remove_autostart(&name);
            self.config.remove_autostart(&id);
        }
        self.save_config();

        let list: Vec<ContainerSnapshot> = self
            .containers
            .items()
            .iter()
            .cloned()
            .map(|mut c| {
                c.autostart = self.is_autostart(&c);
                c
            })
            .collect();
        self.containers.set_items(list);

        vec![Task::Command(Command::SetRestartPolicy {
            id,
            policy: RestartPolicy::for_autostart(enable),
        })]
    }

    /// Persist the config; failures are logged and otherwise ignored.
    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            warn!(error = %e, path = %path.display(), "failed to save config");
        }
    }

    fn status_line(&self) -> Option<StatusLine> {
        match self.input.mode() {
            Mode::FilterEntry => Some(StatusLine::Prompt {
                label: "Filter",
                buffer: self.input.buffer().to_string(),
            }),
            Mode::PullImageEntry => Some(StatusLine::Prompt {
                label: "Pull image",
                buffer: self.input.buffer().to_string(),
            }),
            Mode::Normal => self.error.clone().map(StatusLine::Error),
        }
    }

    fn layout_for(&self, area: Rect) -> DashboardLayout {
        layout::compute(
            area,
            self.containers.items().len(),
            self.status_line().is_some(),
        )
    }

    /// Size the scrolling panels for the last known terminal area.
    fn relayout(&mut self) {
        let layout = self.layout_for(self.area);
        self.containers.set_visible_rows(layout.container_rows());
        self.images.set_visible_rows(layout.image_rows());
        self.logs.set_visible_rows(layout.log_rows());
    }

    pub fn render(&self, frame: &mut Frame) {
        let layout = self.layout_for(frame.area());
        banner::render(frame, layout.banner, VERSION);
        self.stats
            .render(frame, layout.stats, self.active == Panel::Stats);
        self.images
            .render(frame, layout.images, self.active == Panel::Images);
        self.containers
            .render(frame, layout.containers, self.active == Panel::Containers);
        self.logs
            .render(frame, layout.logs, self.active == Panel::Logs);
        if let (Some(status), Some(area)) = (self.status_line(), layout.status) {
            status.render(frame, area);
        }
        help::render(frame, layout.help, self.active);
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn active_panel(&self) -> Panel {
        self.active
    }

    pub fn mode(&self) -> Mode {
        self.input.mode()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn containers(&self) -> &ContainersPanel {
        &self.containers
    }

    pub fn images(&self) -> &ImagesPanel {
        &self.images
    }

    pub fn logs(&self) -> &LogsPanel {
        &self.logs
    }

    pub fn stats(&self) -> &StatsPanel {
        &self.stats
    }
}
