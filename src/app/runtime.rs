// Terminal event loop

use super::dashboard::Dashboard;
use super::event::Event;
use super::tasks::TaskRunner;
use crate::config::DashboardConfig;
use crate::docker_repo::RuntimeClient;
use crossterm::{
    cursor::{Hide, Show},
    event::{self as term, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};

const INPUT_POLL: Duration = Duration::from_millis(200);

/// Raw mode + alternate screen for the guard's lifetime. Restores the terminal
/// on drop, and from a panic hook so the panic message lands on a sane screen.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            restore();
            return Err(e);
        }

        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore();
            previous(info);
        }));

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Forward key presses and resizes until `stop` is set or the queue closes.
fn spawn_input_thread(tx: UnboundedSender<Event>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match term::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal poll failed");
                    break;
                }
            }
            let event = match term::read() {
                Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(TermEvent::Resize(width, height)) => Event::Resize { width, height },
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    })
}

/// Run the interactive dashboard until the user quits.
///
/// Single consumer: the loop pops an [`Event`], lets the [`Dashboard`] fold
/// it, spawns the returned tasks and redraws. Keys and resizes come from a
/// dedicated OS thread through the same queue as task results.
pub async fn run<C: RuntimeClient>(
    client: C,
    config: DashboardConfig,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut guard = TerminalGuard::new()?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = TaskRunner::new(Arc::new(client), tx.clone());

    let stop = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(tx, Arc::clone(&stop));

    let mut dashboard = Dashboard::new(config, config_path);
    let size = guard.terminal().size()?;
    dashboard.handle(Event::Resize {
        width: size.width,
        height: size.height,
    });
    runner.spawn_all(dashboard.initialize());
    guard.terminal().draw(|f| dashboard.render(f))?;
    tracing::info!("dashboard started");

    let result = async {
        while let Some(event) = rx.recv().await {
            let tasks = dashboard.handle(event);
            if dashboard.should_quit() {
                break;
            }
            runner.spawn_all(tasks);
            guard.terminal().draw(|f| dashboard.render(f))?;
        }
        anyhow::Ok(())
    }
    .await;

    stop.store(true, Ordering::Relaxed);
    drop(rx);
    if input.join().is_err() {
        tracing::warn!("input thread panicked");
    }
    drop(guard);
    tracing::info!("dashboard stopped");
    result
}
