// Runs dashboard tasks on the tokio runtime

use super::event::{Command, Event, Fetch, FetchResult, Origin, Task};
use crate::docker_repo::{RuntimeClient, RuntimeError, STOP_GRACE_SECS};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Spawns every task independently under its own deadline. Each task sends
/// exactly one [`Event`] back into the loop's queue, success or not.
pub struct TaskRunner<C> {
    client: Arc<C>,
    tx: UnboundedSender<Event>,
}

impl<C> Clone for TaskRunner<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            tx: self.tx.clone(),
        }
    }
}

impl<C: RuntimeClient> TaskRunner<C> {
    pub fn new(client: Arc<C>, tx: UnboundedSender<Event>) -> Self {
        Self { client, tx }
    }

    pub fn spawn_all(&self, tasks: impl IntoIterator<Item = Task>) {
        for task in tasks {
            self.spawn(task);
        }
    }

    pub fn spawn(&self, task: Task) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = execute(client.as_ref(), task).await;
            // A closed queue means the loop is shutting down.
            let _ = tx.send(event);
        });
    }
}

/// Run one task to completion and turn its outcome into the event it reports.
pub async fn execute<C: RuntimeClient>(client: &C, task: Task) -> Event {
    match task {
        Task::ScheduleTick(delay) => {
            tokio::time::sleep(delay).await;
            Event::Tick
        }
        Task::Fetch(fetch) => {
            let limit = fetch.timeout();
            match with_deadline(limit, run_fetch(client, &fetch)).await {
                Ok(result) => Event::Fetched(result),
                Err(error) => Event::Failed {
                    origin: Origin::Fetch(fetch),
                    error,
                },
            }
        }
        Task::Command(command) => {
            let limit = command.timeout();
            match with_deadline(limit, run_command(client, &command)).await {
                Ok(()) => Event::CommandDone(command),
                Err(error) => Event::Failed {
                    origin: Origin::Command(command),
                    error,
                },
            }
        }
    }
}

async fn with_deadline<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, RuntimeError>>,
) -> Result<T, RuntimeError> {
    tokio::time::timeout(limit, fut)
        .await
        .unwrap_or(Err(RuntimeError::Timeout(limit)))
}

async fn run_fetch<C: RuntimeClient>(client: &C, fetch: &Fetch) -> Result<FetchResult, RuntimeError> {
    Ok(match fetch {
        Fetch::Containers => FetchResult::Containers(client.list_containers().await?),
        Fetch::Images => FetchResult::Images(client.list_images().await?),
        Fetch::System => FetchResult::System(client.system_snapshot().await?),
        Fetch::Stats(id) => FetchResult::Stats {
            id: id.clone(),
            stats: client.container_stats(id).await?,
        },
        Fetch::Logs { id, tail } => FetchResult::Logs {
            id: id.clone(),
            lines: client.logs(id, *tail).await?,
        },
    })
}

async fn run_command<C: RuntimeClient>(client: &C, command: &Command) -> Result<(), RuntimeError> {
    match command {
        Command::Start(id) => client.start(id).await,
        Command::Stop(id) => client.stop(id, STOP_GRACE_SECS).await,
        Command::Restart(id) => client.restart(id, STOP_GRACE_SECS).await,
        Command::Remove { id, force } => client.remove(id, *force).await,
        Command::RemoveImage(id) => client.remove_image(id, false).await,
        Command::SetRestartPolicy { id, policy } => client.set_restart_policy(id, *policy).await,
        Command::Pull(reference) => client.pull_image(reference).await,
    }
}
