// Controller behaviour: event folding, key handling and end-to-end flows

mod common;

use common::{FakeRuntime, cpu, exited, image, running};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use docktop::app::{Command, Dashboard, Event, Fetch, FetchResult, Mode, Origin, Task, execute};
use docktop::config::{DashboardConfig, DefaultView};
use docktop::docker_repo::RuntimeError;
use docktop::models::{ContainerSnapshot, RestartPolicy, SystemSnapshot};
use docktop::ui::Panel;
use docktop::ui::layout::compute;
use ratatui::{Terminal, backend::TestBackend, layout::Rect};
use std::time::Duration;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press(dash: &mut Dashboard, code: KeyCode) -> Vec<Task> {
    dash.handle(key(code))
}

fn type_str(dash: &mut Dashboard, s: &str) {
    for c in s.chars() {
        dash.handle(key(KeyCode::Char(c)));
    }
}

fn system() -> SystemSnapshot {
    SystemSnapshot {
        containers: 3,
        containers_running: 2,
        memory_limit_bytes: 1000,
        ..Default::default()
    }
}

/// A sized dashboard that has already received a system snapshot and `list`.
fn loaded(list: Vec<ContainerSnapshot>) -> Dashboard {
    let mut dash = Dashboard::new(DashboardConfig::default(), None);
    dash.handle(Event::Resize {
        width: 120,
        height: 60,
    });
    dash.handle(Event::Fetched(FetchResult::System(system())));
    dash.handle(Event::Fetched(FetchResult::Containers(list)));
    dash
}

fn names(dash: &Dashboard) -> Vec<String> {
    dash.containers()
        .filtered()
        .iter()
        .map(|c| c.name.clone())
        .collect()
}

/// Run every task except ticks against `fake` and feed the results back,
/// until nothing further is requested.
async fn drain(dash: &mut Dashboard, fake: &FakeRuntime, tasks: Vec<Task>) {
    let mut queue = tasks;
    while let Some(task) = queue.pop() {
        if matches!(task, Task::ScheduleTick(_)) {
            continue;
        }
        let event = execute(fake, task).await;
        queue.extend(dash.handle(event));
    }
}

#[test]
fn initialize_schedules_tick_and_first_fetches() {
    let mut dash = Dashboard::new(DashboardConfig::default(), None);
    assert_eq!(
        dash.initialize(),
        vec![
            Task::ScheduleTick(Duration::from_millis(1000)),
            Task::Fetch(Fetch::Containers),
            Task::Fetch(Fetch::Images),
            Task::Fetch(Fetch::System),
        ]
    );
}

#[test]
fn default_view_sets_the_active_panel() {
    let config = DashboardConfig {
        default_view: DefaultView::Images,
        ..Default::default()
    };
    let dash = Dashboard::new(config, None);
    assert_eq!(dash.active_panel(), Panel::Images);
}

#[test]
fn tick_fetches_stats_for_running_containers_and_follows_selection() {
    let mut dash = loaded(vec![running("a", "web"), exited("b", "db"), running("c", "cache")]);
    let tasks = dash.handle(Event::Tick);
    assert_eq!(
        tasks,
        vec![
            Task::ScheduleTick(Duration::from_millis(1000)),
            Task::Fetch(Fetch::Containers),
            Task::Fetch(Fetch::System),
            Task::Fetch(Fetch::Stats("a".into())),
            Task::Fetch(Fetch::Stats("c".into())),
            Task::Fetch(Fetch::Logs {
                id: "a".into(),
                tail: 100
            }),
        ]
    );
    assert_eq!(dash.logs().container_id(), Some("a"));
}

#[test]
fn tick_on_images_panel_skips_logs() {
    let mut dash = loaded(vec![running("a", "web")]);
    press(&mut dash, KeyCode::Tab);
    assert_eq!(dash.active_panel(), Panel::Images);
    let tasks = dash.handle(Event::Tick);
    assert!(!tasks.iter().any(|t| matches!(t, Task::Fetch(Fetch::Logs { .. }))));
}

#[test]
fn aggregate_counts_only_running_containers() {
    let mut dash = loaded(vec![running("a", "A"), exited("b", "B"), running("c", "C")]);
    for (id, pct) in [("a", 10.0), ("b", 50.0), ("c", 5.0)] {
        dash.handle(Event::Fetched(FetchResult::Stats {
            id: id.into(),
            stats: cpu(pct),
        }));
    }
    let system = dash.stats().system().unwrap();
    assert_eq!(system.cpu_percent, 15.0);
}

#[test]
fn metrics_survive_a_list_refresh() {
    let mut dash = loaded(vec![running("a", "web")]);
    dash.handle(Event::Fetched(FetchResult::Stats {
        id: "a".into(),
        stats: cpu(42.0),
    }));
    dash.handle(Event::Fetched(FetchResult::Containers(vec![running("a", "web")])));
    assert_eq!(dash.containers().items()[0].cpu_percent, 42.0);
    assert_eq!(dash.stats().system().unwrap().cpu_percent, 42.0);
}

#[test]
fn stats_for_unknown_container_are_dropped() {
    let mut dash = loaded(vec![running("a", "web")]);
    dash.handle(Event::Fetched(FetchResult::Stats {
        id: "gone".into(),
        stats: cpu(99.0),
    }));
    assert_eq!(dash.containers().items().len(), 1);
    assert_eq!(dash.stats().system().unwrap().cpu_percent, 0.0);
    assert!(dash.error().is_none());
}

#[test]
fn system_snapshot_appends_samples() {
    let mut dash = loaded(vec![running("a", "web")]);
    dash.handle(Event::Fetched(FetchResult::Stats {
        id: "a".into(),
        stats: cpu(20.0),
    }));
    dash.handle(Event::Fetched(FetchResult::System(system())));
    let series = dash.stats().cpu_series();
    assert_eq!(series.len(), 2);
    assert_eq!(series.latest(), Some(20.0));
}

#[tokio::test]
async fn start_key_on_exited_container_flows_through_to_aggregate() {
    let fake = FakeRuntime::with_containers(vec![exited("abc123", "web")]);
    *fake.system.lock().unwrap() = system();
    let mut dash = Dashboard::new(DashboardConfig::default(), None);
    dash.handle(Event::Resize {
        width: 120,
        height: 60,
    });
    let init = dash.initialize();
    drain(&mut dash, &fake, init).await;
    assert_eq!(dash.containers().items().len(), 1);

    let tasks = press(&mut dash, KeyCode::Char('s'));
    assert_eq!(tasks, vec![Task::Command(Command::Start("abc123".into()))]);
    drain(&mut dash, &fake, tasks).await;
    assert_eq!(fake.calls(), vec!["start abc123"]);
    assert!(dash.containers().items()[0].state.is_running());

    fake.stats
        .lock()
        .unwrap()
        .insert("abc123".into(), cpu(7.5));
    let tick = dash.handle(Event::Tick);
    assert!(tick.contains(&Task::Fetch(Fetch::Stats("abc123".into()))));
    drain(&mut dash, &fake, tick).await;
    assert_eq!(dash.stats().system().unwrap().cpu_percent, 7.5);
}

#[test]
fn start_is_ignored_for_running_and_stop_for_exited() {
    let mut dash = loaded(vec![running("a", "web")]);
    assert!(press(&mut dash, KeyCode::Char('s')).is_empty());
    assert_eq!(
        press(&mut dash, KeyCode::Char('x')),
        vec![Task::Command(Command::Stop("a".into()))]
    );

    let mut dash = loaded(vec![exited("b", "db")]);
    assert!(press(&mut dash, KeyCode::Char('x')).is_empty());
}

#[test]
fn control_chords_do_not_trigger_container_commands() {
    let mut dash = loaded(vec![running("a", "web")]);
    for c in ['d', 'r', 'x', 's', 'a'] {
        let chord = Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        assert!(dash.handle(chord).is_empty(), "ctrl+{c} produced tasks");
    }
    let alt_d = Event::Key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::ALT));
    assert!(dash.handle(alt_d).is_empty());
    assert!(!dash.containers().items()[0].autostart);
    assert!(!dash.should_quit());
}

#[test]
fn remove_forces_only_running_containers() {
    let mut dash = loaded(vec![running("a", "web"), exited("b", "db")]);
    assert_eq!(
        press(&mut dash, KeyCode::Char('d')),
        vec![Task::Command(Command::Remove {
            id: "a".into(),
            force: true
        })]
    );
    press(&mut dash, KeyCode::Char('j'));
    assert_eq!(
        press(&mut dash, KeyCode::Char('d')),
        vec![Task::Command(Command::Remove {
            id: "b".into(),
            force: false
        })]
    );
}

#[test]
fn filter_entry_commits_on_enter_and_escape_keeps_previous() {
    let mut dash = loaded(vec![
        running("1", "nginx"),
        running("2", "redis"),
        running("3", "mongo"),
    ]);
    press(&mut dash, KeyCode::Char('/'));
    assert_eq!(dash.mode(), Mode::FilterEntry);
    type_str(&mut dash, "nginx");
    press(&mut dash, KeyCode::Enter);
    assert_eq!(dash.mode(), Mode::Normal);
    assert_eq!(names(&dash), vec!["nginx"]);

    press(&mut dash, KeyCode::Char('/'));
    type_str(&mut dash, "x");
    press(&mut dash, KeyCode::Esc);
    assert_eq!(dash.containers().filter(), "nginx");
    assert_eq!(names(&dash), vec!["nginx"]);

    // Commands act on the filtered selection.
    assert_eq!(
        press(&mut dash, KeyCode::Char('r')),
        vec![Task::Command(Command::Restart("1".into()))]
    );
}

#[test]
fn empty_filter_clears() {
    let mut dash = loaded(vec![running("1", "nginx"), running("2", "redis")]);
    press(&mut dash, KeyCode::Char('/'));
    type_str(&mut dash, "red");
    press(&mut dash, KeyCode::Enter);
    assert_eq!(names(&dash), vec!["redis"]);
    press(&mut dash, KeyCode::Char('/'));
    press(&mut dash, KeyCode::Enter);
    assert_eq!(names(&dash), vec!["nginx", "redis"]);
}

#[test]
fn filtering_keeps_the_container_panel_sized_to_the_full_list() {
    let mut dash = loaded(vec![
        running("1", "nginx"),
        running("2", "redis"),
        running("3", "mongo"),
        exited("4", "cache"),
        exited("5", "worker"),
    ]);
    let logs_row = |dash: &Dashboard| {
        screen(dash, 120, 60)
            .lines()
            .position(|line| line.contains(" Logs "))
    };
    let expected = compute(Rect::new(0, 0, 120, 60), 5, false).logs.y as usize;
    assert_eq!(logs_row(&dash), Some(expected));

    press(&mut dash, KeyCode::Char('/'));
    type_str(&mut dash, "redis");
    press(&mut dash, KeyCode::Enter);
    assert_eq!(names(&dash), vec!["redis"]);
    assert_eq!(logs_row(&dash), Some(expected));
}

#[test]
fn q_quits_only_outside_entry_modes() {
    let mut dash = loaded(vec![running("1", "web")]);
    press(&mut dash, KeyCode::Char('/'));
    press(&mut dash, KeyCode::Char('q'));
    assert!(!dash.should_quit());
    press(&mut dash, KeyCode::Esc);
    press(&mut dash, KeyCode::Char('q'));
    assert!(dash.should_quit());
}

#[test]
fn tab_cycles_focus() {
    let mut dash = loaded(vec![]);
    assert_eq!(dash.active_panel(), Panel::Containers);
    press(&mut dash, KeyCode::Tab);
    assert_eq!(dash.active_panel(), Panel::Images);
    press(&mut dash, KeyCode::Tab);
    assert_eq!(dash.active_panel(), Panel::Logs);
    press(&mut dash, KeyCode::Tab);
    assert_eq!(dash.active_panel(), Panel::Containers);
}

#[test]
fn enter_opens_logs_and_escape_returns() {
    let mut dash = loaded(vec![running("a", "web"), running("b", "db")]);
    press(&mut dash, KeyCode::Down);
    let tasks = press(&mut dash, KeyCode::Enter);
    assert_eq!(
        tasks,
        vec![Task::Fetch(Fetch::Logs {
            id: "b".into(),
            tail: 100
        })]
    );
    assert_eq!(dash.active_panel(), Panel::Logs);
    assert_eq!(dash.logs().container_name(), "db");

    dash.handle(Event::Fetched(FetchResult::Logs {
        id: "a".into(),
        lines: vec!["stale".into()],
    }));
    assert!(dash.logs().lines().is_empty());
    dash.handle(Event::Fetched(FetchResult::Logs {
        id: "b".into(),
        lines: vec!["ready".into()],
    }));
    assert_eq!(dash.logs().lines(), ["ready".to_string()]);

    press(&mut dash, KeyCode::Esc);
    assert_eq!(dash.active_panel(), Panel::Containers);
}

#[test]
fn enter_with_no_containers_stays_put() {
    let mut dash = loaded(vec![]);
    assert!(press(&mut dash, KeyCode::Enter).is_empty());
    assert_eq!(dash.active_panel(), Panel::Containers);
}

#[test]
fn image_keys_remove_and_pull() {
    let mut dash = loaded(vec![]);
    dash.handle(Event::Fetched(FetchResult::Images(vec![image("sha1", "nginx:1")])));
    press(&mut dash, KeyCode::Tab);
    assert_eq!(
        press(&mut dash, KeyCode::Char('d')),
        vec![Task::Command(Command::RemoveImage("sha1".into()))]
    );
    press(&mut dash, KeyCode::Char('p'));
    assert_eq!(dash.mode(), Mode::PullImageEntry);
    type_str(&mut dash, "redis:7");
    assert_eq!(
        press(&mut dash, KeyCode::Enter),
        vec![Task::Command(Command::Pull("redis:7".into()))]
    );
}

#[test]
fn command_completion_refreshes_the_affected_list() {
    let mut dash = loaded(vec![]);
    assert_eq!(
        dash.handle(Event::CommandDone(Command::Pull("redis".into()))),
        vec![Task::Fetch(Fetch::Images)]
    );
    assert_eq!(
        dash.handle(Event::CommandDone(Command::Start("a".into()))),
        vec![Task::Fetch(Fetch::Containers)]
    );
}

#[test]
fn failures_set_error_until_a_container_list_arrives() {
    let mut dash = loaded(vec![running("a", "web")]);
    dash.handle(Event::Failed {
        origin: Origin::Command(Command::Start("a".into())),
        error: RuntimeError::Api {
            status: 500,
            message: "boom".into(),
        },
    });
    assert_eq!(
        dash.error(),
        Some("start a: docker api error (500): boom")
    );
    dash.handle(Event::Fetched(FetchResult::Containers(vec![running("a", "web")])));
    assert!(dash.error().is_none());
}

#[test]
fn stats_failures_are_silent() {
    let mut dash = loaded(vec![running("a", "web")]);
    dash.handle(Event::Failed {
        origin: Origin::Fetch(Fetch::Stats("a".into())),
        error: RuntimeError::NotFound("a".into()),
    });
    assert!(dash.error().is_none());
}

#[test]
fn autostart_toggle_persists_and_sets_restart_policy() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let mut dash = Dashboard::new(DashboardConfig::default(), Some(path.clone()));
    dash.handle(Event::Fetched(FetchResult::Containers(vec![running("a", "web")])));

    let tasks = press(&mut dash, KeyCode::Char('a'));
    assert_eq!(
        tasks,
        vec![Task::Command(Command::SetRestartPolicy {
            id: "a".into(),
            policy: RestartPolicy::Always
        })]
    );
    assert!(dash.containers().items()[0].autostart);
    let saved = DashboardConfig::load_from_path(&path).unwrap();
    assert_eq!(saved.autostart, vec!["web"]);

    let tasks = press(&mut dash, KeyCode::Char('a'));
    assert_eq!(
        tasks,
        vec![Task::Command(Command::SetRestartPolicy {
            id: "a".into(),
            policy: RestartPolicy::None
        })]
    );
    assert!(!dash.containers().items()[0].autostart);
    let saved = DashboardConfig::load_from_path(&path).unwrap();
    assert!(saved.autostart.is_empty());
}

#[test]
fn autostart_marks_by_name_or_id() {
    let config = DashboardConfig {
        autostart: vec!["web".into(), "b".into()],
        ..Default::default()
    };
    let mut dash = Dashboard::new(config, None);
    dash.handle(Event::Fetched(FetchResult::Containers(vec![
        running("a", "web"),
        exited("b", "db"),
        exited("c", "cache"),
    ])));
    let marked: Vec<bool> = dash.containers().items().iter().map(|c| c.autostart).collect();
    assert_eq!(marked, vec![true, true, false]);
}

fn screen(dash: &Dashboard, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| dash.render(f)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn renders_every_panel() {
    let mut dash = loaded(vec![running("a", "web"), exited("b", "db")]);
    dash.handle(Event::Fetched(FetchResult::Images(vec![image("sha1", "nginx:1")])));
    let text = screen(&dash, 120, 60);
    assert!(text.contains("Docker Stats"));
    assert!(text.contains("Containers"));
    assert!(text.contains("Images"));
    assert!(text.contains("Logs"));
    assert!(text.contains("web"));
    assert!(text.contains("nginx:1"));
    assert!(text.contains("Select a container to view logs"));
}

#[test]
fn renders_prompt_and_error_lines() {
    let mut dash = loaded(vec![running("a", "web")]);
    dash.handle(Event::Failed {
        origin: Origin::Fetch(Fetch::Images),
        error: RuntimeError::Connection("refused".into()),
    });
    assert!(screen(&dash, 120, 60).contains("cannot reach docker: refused"));

    press(&mut dash, KeyCode::Char('/'));
    type_str(&mut dash, "we");
    assert!(screen(&dash, 120, 60).contains("Filter: we"));
}

#[test]
fn renders_on_a_tiny_terminal() {
    let dash = loaded(vec![running("a", "web")]);
    let text = screen(&dash, 20, 5);
    assert_eq!(text.lines().count(), 5);
}
