//! Error types shared by the MongoDB storage implementation.

use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

/// Convenient result alias returning [`MongoDaoError`] failures.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Failures that can occur while interacting with MongoDB.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection string could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// Connection string as supplied.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The driver rejected the client options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The server never answered during startup.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Number of pings attempted.
        attempts: u32,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A periodic ping failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Inserting a new game failed.
    #[error("failed to insert game `{id}`")]
    InsertGame {
        /// Identifier of the game involved.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Replacing a game document failed.
    #[error("failed to save game `{id}`")]
    SaveGame {
        /// Identifier of the game involved.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Applying a partial update failed.
    #[error("failed to update game `{id}`")]
    UpdateGame {
        /// Identifier of the game involved.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Reading a game failed.
    #[error("failed to load game `{id}`")]
    LoadGame {
        /// Identifier of the game involved.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Deleting a game failed.
    #[error("failed to delete game `{id}`")]
    DeleteGame {
        /// Identifier of the game involved.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Listing games failed.
    #[error("failed to list games")]
    ListGames {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A stored `_id` is not a 16-byte UUID.
    #[error("game document `{id}` has a malformed identifier")]
    CorruptDocument {
        /// Raw `_id` as stored.
        id: String,
        /// Decoding error.
        #[source]
        source: uuid::Error,
    },
}
