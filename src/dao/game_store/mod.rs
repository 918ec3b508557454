/// In-memory backend.
pub mod memory;
/// MongoDB backend.
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{GameEntity, GamePatch, NewGameEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

pub use memory::InMemoryGameStore;

/// Abstraction over the document collection holding game records.
pub trait GameStore: Send + Sync {
    /// Insert a new game, letting the store assign its identifier.
    fn insert_game(&self, game: NewGameEntity) -> BoxFuture<'static, StorageResult<GameEntity>>;
    /// Fetch a single game by identifier.
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Fetch every game in store-native order.
    fn list_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Replace an existing game document. Returns `false` when no document matched.
    fn replace_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>>;
    /// Merge a partial update and return the post-update game, if it exists.
    fn update_game(
        &self,
        id: Uuid,
        patch: GamePatch,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Remove a game, returning the removed document if one matched.
    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Check that the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to restore a lost connection in place.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
