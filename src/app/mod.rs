// Interactive dashboard: controller, input handling, task execution and the terminal loop

pub mod dashboard;
pub mod event;
pub mod input;
pub mod runtime;
pub mod tasks;

pub use dashboard::Dashboard;
pub use event::{Command, Event, Fetch, FetchResult, Origin, Task};
pub use input::{Action, InputState, Mode};
pub use tasks::{TaskRunner, execute};
