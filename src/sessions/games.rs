use std::{sync::Arc, time::Duration};

use moka::{notification::RemovalCause, sync::Cache};
use tokio::sync::Mutex;

use crate::{models::GuessSession, random::RandomNumberSource};

pub type SharedSession = Arc<Mutex<GuessSession>>;

/// Every player's game, keyed by the `sid` kept in their cookie session.
///
/// Entries are created explicitly by [`GameStore::open`] and go away on
/// [`GameStore::evict`], after sitting idle for the configured time, or when
/// the store is over capacity.
#[derive(Clone)]
pub struct GameStore {
    games: Cache<String, SharedSession>,
    random: Arc<dyn RandomNumberSource>,
}

impl GameStore {
    pub fn new(random: Arc<dyn RandomNumberSource>, capacity: u64, idle: Duration) -> Self {
        let games = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(idle)
            .eviction_listener(|sid: Arc<String>, _, cause| {
                if cause != RemovalCause::Explicit && cause != RemovalCause::Replaced {
                    tracing::info!(sid = %sid, ?cause, "game session evicted");
                }
            })
            .build();

        return Self { games, random };
    }

    /// Creates a fresh game for `sid`, replacing any previous one.
    pub fn open(&self, sid: &str, player_name: &str) -> SharedSession {
        let session = Arc::new(Mutex::new(GuessSession::new(
            player_name,
            self.random.clone(),
        )));

        self.games.insert(sid.to_string(), session.clone());
        tracing::info!(sid, player = player_name, "game session opened");

        return session;
    }

    pub fn find(&self, sid: &str) -> Option<SharedSession> {
        return self.games.get(sid);
    }

    pub fn evict(&self, sid: &str) -> bool {
        let removed = self.games.remove(sid).is_some();

        if removed {
            tracing::info!(sid, "game session closed");
        }

        return removed;
    }
}
