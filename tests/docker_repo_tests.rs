// Optional DockerRepo tests when a Docker daemon is available

use docktop::docker_repo::{DockerRepo, RuntimeClient, SHORT_ID_LEN};

async fn connected() -> Option<DockerRepo> {
    let repo = DockerRepo::connect().ok()?;
    repo.ping().await.ok()?;
    Some(repo)
}

#[tokio::test]
async fn docker_repo_lists_containers_with_short_ids() {
    let Some(repo) = connected().await else {
        return; // Skip when Docker is not available (e.g. CI without Docker)
    };
    let containers = repo.list_containers().await.expect("list_containers");
    for c in &containers {
        assert!(c.id.len() <= SHORT_ID_LEN);
        assert!(!c.name.starts_with('/'));
        assert!(!c.ports.is_empty());
    }
}

#[tokio::test]
async fn docker_repo_system_and_images() {
    let Some(repo) = connected().await else {
        return;
    };
    let system = repo.system_snapshot().await.expect("system_snapshot");
    assert!(system.containers >= system.containers_running);
    let images = repo.list_images().await.expect("list_images");
    assert!(images.iter().all(|i| i.id.len() <= SHORT_ID_LEN));
}

#[tokio::test]
async fn docker_repo_unknown_container_is_not_found() {
    let Some(repo) = connected().await else {
        return;
    };
    let err = repo
        .start("docktop-test-no-such-container")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        docktop::docker_repo::RuntimeError::NotFound(_)
    ));
}
