//! Library crate for wordgame-back, exposing modules for binaries and integration tests.

/// Process configuration loaded from the environment.
pub mod config;
/// Persistence layer: entities, the storage trait and its backends.
pub mod dao;
mod dto;
mod error;
/// HTTP route trees.
pub mod routes;
/// Business logic invoked by the routes.
pub mod services;
/// Shared application state and domain rules.
pub mod state;

pub use dto::game::{
    CreateGameRequest, GameResponse, StatusChangeRequest, TeamInput, TeamResponse,
    UpdateGameRequest, WordRequest,
};
pub use error::{AppError, ServiceError};
