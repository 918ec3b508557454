use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{game_store::GameStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Connect to the storage backend, then keep it healthy for the lifetime of the process.
///
/// The shared state stays in degraded mode until the first connection succeeds. When a
/// health check fails the supervisor retries in place a few times before dropping the
/// store and starting over with a fresh connection.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn GameStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.install_game_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                delay = INITIAL_DELAY;

                watch_health(&state, store.as_ref()).await;

                warn!("exhausted storage reconnect attempts; dropping connection");
                state.clear_game_store().await;
            }
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
            }
        }

        sleep(delay).await;
        delay = (delay * 2).min(MAX_DELAY);
    }
}

/// Poll `store` until it fails and cannot be revived in place.
async fn watch_health(state: &SharedState, store: &dyn GameStore) {
    loop {
        match store.health_check().await {
            Ok(()) => {
                if state.is_degraded() {
                    info!("storage healthy again; leaving degraded mode");
                    state.update_degraded(false);
                }
            }
            Err(err) => {
                warn!(error = %err, "storage health check failed; entering degraded mode");
                state.update_degraded(true);
                if !reconnect(store).await {
                    return;
                }
                info!("storage reconnection succeeded after health check failure");
                state.update_degraded(false);
            }
        }
        sleep(HEALTH_POLL_INTERVAL).await;
    }
}

async fn reconnect(store: &dyn GameStore) -> bool {
    let mut delay = INITIAL_DELAY;
    for attempt in 1..=MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => return true,
            Err(err) => {
                warn!(attempt, error = %err, "storage reconnect attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use futures::future::BoxFuture;
    use uuid::Uuid;

    use super::*;
    use crate::{
        dao::{
            game_store::InMemoryGameStore,
            models::{GameEntity, GamePatch, NewGameEntity},
            storage::StorageResult,
        },
        state::AppState,
    };

    /// Store whose health and reconnect outcomes are switched by the test.
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: InMemoryGameStore,
        unhealthy: Arc<AtomicBool>,
        reconnect_failures: Arc<AtomicU32>,
    }

    impl FlakyStore {
        fn break_connection(&self, reconnect_failures: u32) {
            self.reconnect_failures
                .store(reconnect_failures, Ordering::SeqCst);
            self.unhealthy.store(true, Ordering::SeqCst);
        }

        fn recover(&self) {
            self.reconnect_failures.store(0, Ordering::SeqCst);
            self.unhealthy.store(false, Ordering::SeqCst);
        }
    }

    fn lost_connection() -> StorageError {
        StorageError::unavailable("ping failed".into(), std::io::Error::other("broken pipe"))
    }

    impl GameStore for FlakyStore {
        fn insert_game(&self, game: NewGameEntity) -> BoxFuture<'static, StorageResult<GameEntity>> {
            self.inner.insert_game(game)
        }

        fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            self.inner.find_game(id)
        }

        fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
            self.inner.list_games()
        }

        fn replace_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
            self.inner.replace_game(game)
        }

        fn update_game(
            &self,
            id: Uuid,
            patch: GamePatch,
        ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            self.inner.update_game(id, patch)
        }

        fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            self.inner.delete_game(id)
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            let unhealthy = self.unhealthy.load(Ordering::SeqCst);
            Box::pin(async move {
                if unhealthy {
                    Err(lost_connection())
                } else {
                    Ok(())
                }
            })
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            let outcome = if self.reconnect_failures.load(Ordering::SeqCst) > 0 {
                self.reconnect_failures.fetch_sub(1, Ordering::SeqCst);
                Err(lost_connection())
            } else {
                self.unhealthy.store(false, Ordering::SeqCst);
                Ok(())
            };
            Box::pin(async move { outcome })
        }
    }

    async fn wait_degraded(state: &SharedState, expected: bool) {
        let mut degraded = state.degraded_watcher();
        tokio::time::timeout(
            Duration::from_secs(120),
            degraded.wait_for(|value| *value == expected),
        )
        .await
        .expect("degraded flag updated before timeout")
        .expect("watch channel open");
    }

    #[tokio::test(start_paused = true)]
    async fn installs_store_after_failed_attempts() {
        let state = AppState::new();
        let mut attempts = 0u32;
        let connect = move || {
            attempts += 1;
            let current = attempts;
            async move {
                if current < 3 {
                    Err(StorageError::unavailable(
                        "refused".into(),
                        std::io::Error::other("connection refused"),
                    ))
                } else {
                    Ok(Arc::new(InMemoryGameStore::new()) as Arc<dyn GameStore>)
                }
            }
        };

        let handle = tokio::spawn(run(state.clone(), connect));
        let mut degraded = state.degraded_watcher();
        tokio::time::timeout(Duration::from_secs(60), degraded.wait_for(|value| !*value))
            .await
            .expect("store installed before timeout")
            .expect("watch channel open");

        assert!(state.game_store().await.is_some());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_health_check_recovers_in_place() {
        let state = AppState::new();
        let store = FlakyStore::default();
        let connects = Arc::new(AtomicU32::new(0));

        let connect = {
            let store = store.clone();
            let connects = connects.clone();
            move || {
                connects.fetch_add(1, Ordering::SeqCst);
                let store = store.clone();
                async move { Ok(Arc::new(store) as Arc<dyn GameStore>) }
            }
        };
        let handle = tokio::spawn(run(state.clone(), connect));
        wait_degraded(&state, false).await;

        // The first reconnect attempt fails, keeping the flag raised across its backoff.
        store.break_connection(1);
        wait_degraded(&state, true).await;
        assert!(state.game_store().await.is_some());

        wait_degraded(&state, false).await;
        assert!(state.game_store().await.is_some());
        assert_eq!(connects.load(Ordering::SeqCst), 1);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_reconnects_drop_store_and_connect_again() {
        let state = AppState::new();
        let store = FlakyStore::default();
        let connects = Arc::new(AtomicU32::new(0));

        let connect = {
            let store = store.clone();
            let connects = connects.clone();
            move || {
                if connects.fetch_add(1, Ordering::SeqCst) > 0 {
                    store.recover();
                }
                let store = store.clone();
                async move { Ok(Arc::new(store) as Arc<dyn GameStore>) }
            }
        };
        let handle = tokio::spawn(run(state.clone(), connect));
        wait_degraded(&state, false).await;

        store.break_connection(u32::MAX);
        wait_degraded(&state, true).await;

        tokio::time::timeout(Duration::from_secs(120), async {
            while state.game_store().await.is_some() {
                sleep(Duration::from_millis(100)).await;
            }
        })
        .await
        .expect("store dropped after reconnect attempts ran out");
        assert!(state.is_degraded());

        wait_degraded(&state, false).await;
        assert!(state.game_store().await.is_some());
        assert_eq!(connects.load(Ordering::SeqCst), 2);
        handle.abort();
    }
}
