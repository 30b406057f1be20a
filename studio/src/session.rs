use crate::models::{Screen, Task};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub type SessionId = Uuid;

/// Each session sits behind its own lock; actions on one session run one at a time.
pub type SessionHandle = Arc<Mutex<Session>>;

/// UI selections and last results for one user's visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub screen: Screen,
    pub task: Task,
    pub last_input: Option<String>,
    pub last_output: Option<String>,
    pub splash_dismissed: bool,
}

#[derive(Debug)]
struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

impl Entry {
    fn fresh() -> Self {
        Self {
            handle: Arc::new(Mutex::new(Session::default())),
            last_seen: Instant::now(),
        }
    }

    fn touch(&mut self) -> SessionHandle {
        self.last_seen = Instant::now();
        self.handle.clone()
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (SessionId, SessionHandle) {
        let id = Uuid::new_v4();
        let entry = Entry::fresh();
        let handle = entry.handle.clone();
        self.sessions.write().await.insert(id, entry);
        log::info!("Created session {}", id);
        (id, handle)
    }

    /// Unknown ids get a default session, which is stored on the spot.
    pub async fn get(&self, id: SessionId) -> SessionHandle {
        self.sessions
            .write()
            .await
            .entry(id)
            .or_insert_with(|| {
                log::info!("Initialised session {} on first access", id);
                Entry::fresh()
            })
            .touch()
    }

    /// Like [`Self::get`], but unknown ids stay unknown.
    pub async fn find(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.write().await.get_mut(&id).map(Entry::touch)
    }

    pub async fn set(&self, id: SessionId, session: Session) {
        let handle = self.get(id).await;
        *handle.lock().await = session;
    }

    pub async fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            log::info!("Ended session {}", id);
        }
        removed
    }

    /// Ends every session untouched for longer than `max_idle`. Sessions in
    /// the middle of an action are kept.
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            entry.last_seen.elapsed() <= max_idle || entry.handle.try_lock().is_err()
        });
        let pruned = before - sessions.len();
        if pruned > 0 {
            log::info!("Ended {} idle sessions", pruned);
        }
        pruned
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
