// Snapshot models shared by the runtime client, the dashboard and the daemon

mod container;
mod image;
mod system;

pub use container::{ContainerSnapshot, ContainerState, ContainerStatsPatch, RestartPolicy};
pub use image::ImageSnapshot;
pub use system::{SystemSnapshot, aggregate_usage};
