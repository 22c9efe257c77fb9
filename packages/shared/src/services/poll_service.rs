use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::models::game::GameView;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::game_service::GameService;

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const POLL_TIMEOUT: Duration = Duration::from_secs(30);
const FETCH_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// How a long-poll wait resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Changed(GameView),
    NoChange,
}

/// Change notifier, long-poll style: re-reads the store on a fixed interval
/// and resolves when the persisted view differs from the client's snapshot,
/// or at the timeout. Re-checks are plain reads; they take no write-side
/// locks and concurrent waits on the same game are fully independent.
pub struct PollService {
    games: Arc<GameService>,
    interval: Duration,
    timeout: Duration,
    retry_backoff: Duration,
}

impl PollService {
    pub fn new(games: Arc<GameService>) -> Self {
        Self::with_timings(games, POLL_INTERVAL, POLL_TIMEOUT)
    }

    /// Same notifier with custom interval and timeout, so tests and local
    /// setups do not sit through the production 30 seconds.
    pub fn with_timings(games: Arc<GameService>, interval: Duration, timeout: Duration) -> Self {
        PollService {
            games,
            interval,
            timeout,
            retry_backoff: FETCH_RETRY_BACKOFF.min(interval),
        }
    }

    /// Wait until the game's view differs from `last_known`, or the timeout
    /// elapses. Resolves immediately when no snapshot is supplied or it
    /// already differs. Every timer lives inside this future, so a client
    /// disconnect (the caller dropping the future) releases the wait with
    /// nothing left to clean up.
    pub async fn await_change(
        &self,
        game_id: &str,
        last_known: Option<&str>,
    ) -> Result<PollOutcome, GameServiceError> {
        let deadline = Instant::now() + self.timeout;
        // A snapshot that is not valid JSON can never match the current
        // view; like any stale snapshot, it resolves on the first check.
        let snapshot: Option<Value> = last_known.and_then(|raw| serde_json::from_str(raw).ok());

        let current = self.games.get_game(game_id).await?;
        if differs(&current, snapshot.as_ref())? {
            return Ok(PollOutcome::Changed(current));
        }

        loop {
            let now = Instant::now();
            if now >= deadline {
                debug!(game_id, "poll timed out with no change");
                return Ok(PollOutcome::NoChange);
            }
            sleep(self.interval.min(deadline - now)).await;

            // Transient read failures must not abort the wait; anything
            // else (the game vanishing, a broken invariant) must.
            let view = match self.fetch_with_retry(game_id).await {
                Ok(view) => view,
                Err(GameServiceError::RepositoryError(e)) => {
                    warn!(game_id, error = %e, "poll re-check failed, retrying next interval");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if differs(&view, snapshot.as_ref())? {
                debug!(game_id, "poll resolved with changed state");
                return Ok(PollOutcome::Changed(view));
            }
        }
    }

    async fn fetch_with_retry(&self, game_id: &str) -> Result<GameView, GameServiceError> {
        match self.games.get_game(game_id).await {
            Err(GameServiceError::RepositoryError(e)) => {
                warn!(game_id, error = %e, "transient poll fetch failure, backing off");
                sleep(self.retry_backoff).await;
                self.games.get_game(game_id).await
            }
            other => other,
        }
    }
}

/// Full-value comparison of the current view against the client snapshot,
/// independent of key ordering in either serialization.
fn differs(view: &GameView, snapshot: Option<&Value>) -> Result<bool, GameServiceError> {
    let Some(snapshot) = snapshot else {
        return Ok(true);
    };
    let current = serde_json::to_value(view)
        .map_err(|e| GameServiceError::ConsistencyError(e.to_string()))?;
    Ok(&current != snapshot)
}
