use serde::Serialize;
use studio::{SessionId, View};

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
    pub view: View,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}
