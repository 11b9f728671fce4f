//! In-memory session registry. One entry per live interview; nothing survives
//! a restart.
//!
//! Each session sits behind its own mutex, held by a handler for the whole of
//! one event, so events on a session run one at a time while separate
//! sessions never contend. Restarting an interview reuses its entry and
//! overwrites the session under that mutex.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::interview::session::Session;

pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the session under its id, replacing whatever was there.
    pub async fn insert(&self, session: Session) {
        let id = session.id;
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
