//! Process-local game store used by tests and by the `memory` backend.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    game_store::GameStore,
    models::{GameEntity, GamePatch, NewGameEntity},
    storage::StorageResult,
};

/// In-memory collection of games kept in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<RwLock<IndexMap<Uuid, GameEntity>>>,
}

impl InMemoryGameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(&self, game: NewGameEntity) -> GameEntity {
        let mut guard = self.games.write().await;
        let mut id = Uuid::new_v4();
        while guard.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let entity = game.with_id(id);
        guard.insert(id, entity.clone());
        entity
    }

    async fn replace(&self, game: GameEntity) -> bool {
        let mut guard = self.games.write().await;
        match guard.get_mut(&game.id) {
            Some(slot) => {
                *slot = game;
                true
            }
            None => false,
        }
    }

    async fn update(&self, id: Uuid, patch: GamePatch) -> Option<GameEntity> {
        let mut guard = self.games.write().await;
        let game = guard.get_mut(&id)?;
        patch.apply_to(game);
        Some(game.clone())
    }
}

impl GameStore for InMemoryGameStore {
    fn insert_game(&self, game: NewGameEntity) -> BoxFuture<'static, StorageResult<GameEntity>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.insert(game).await) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.games.read().await.get(&id).cloned()) })
    }

    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.games.read().await.values().cloned().collect()) })
    }

    fn replace_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.replace(game).await) })
    }

    fn update_game(
        &self,
        id: Uuid,
        patch: GamePatch,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.update(id, patch).await) })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        // shift_remove keeps the remaining games in insertion order.
        Box::pin(async move { Ok(store.games.write().await.shift_remove(&id)) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
