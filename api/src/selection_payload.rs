use serde::Deserialize;
use studio::{Screen, Task};

#[derive(Deserialize)]
pub struct ScreenPayload {
    pub screen: Screen,
}

#[derive(Deserialize)]
pub struct TaskPayload {
    pub task: Task,
}
