use super::Session;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// In-memory session map. Nothing here outlives the process.
///
/// Callers take a snapshot with [`SessionStore::load`], do their slow work
/// without holding the lock and write the result back with
/// [`SessionStore::save`]. Concurrent writers on one session: last one wins.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    /// `ttl` of zero keeps idle sessions forever.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: (!ttl.is_zero()).then_some(ttl),
        }
    }

    /// Returns a copy of the session, creating an empty one if `id` is unknown.
    pub async fn load(&self, id: &str) -> Session {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);

        let session = sessions.entry(id.to_string()).or_insert_with(|| {
            debug!("Creating session {}", id);
            Session::new(id)
        });
        session.last_seen = Instant::now();
        session.clone()
    }

    pub async fn save(&self, mut session: Session) {
        session.last_seen = Instant::now();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id.clone(), session);
    }

    pub async fn set_prediction(&self, id: &str, label: &str) {
        let mut session = self.load(id).await;
        session.prediction = Some(label.to_string());
        self.save(session).await;
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn prune(&self, sessions: &mut HashMap<String, Session>) {
        let Some(ttl) = self.ttl else {
            return;
        };
        let before = sessions.len();
        sessions.retain(|_, session| session.last_seen.elapsed() < ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Pruned {} idle sessions", removed);
        }
    }
}
