//! DTO definitions used by the `/game` REST API and documentation layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{GameEntity, TeamEntity},
    dto::validation::{validate_name, validate_word, validate_words},
    state::lifecycle::GameStatus,
};

/// Team definition supplied when creating or updating a game.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct TeamInput {
    /// Team display name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Starting score; defaults to 0.
    #[serde(default)]
    pub points: i32,
}

impl From<TeamInput> for TeamEntity {
    fn from(value: TeamInput) -> Self {
        Self {
            name: value.name,
            points: value.points,
        }
    }
}

/// Payload used to create a new game record.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGameRequest {
    /// Game display name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Competing teams.
    #[validate(nested)]
    pub teams: Vec<TeamInput>,
    /// Initial word pool; entries are trimmed and lowercased.
    #[validate(custom(function = "validate_words"))]
    pub words: Vec<String>,
    /// Initial status; defaults to `CREATED`.
    #[serde(default)]
    pub status: Option<GameStatus>,
}

/// Partial update of a game; omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateGameRequest {
    /// New display name.
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    /// Replacement team list, scores included.
    #[validate(nested)]
    pub teams: Option<Vec<TeamInput>>,
    /// Replacement word pool; only accepted while the game is `CREATED`.
    #[validate(custom(function = "validate_words"))]
    pub words: Option<Vec<String>>,
    /// Target status; must not move the lifecycle backwards.
    pub status: Option<GameStatus>,
}

/// Payload for adding a word to, or deleting a word from, a game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WordRequest {
    /// Identifier of the target game.
    pub game_id: String,
    /// Word to add or delete; matched case-insensitively.
    #[validate(custom(function = "validate_word"))]
    pub word: String,
}

/// Payload moving a game to another lifecycle status.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StatusChangeRequest {
    /// Target status.
    pub status: GameStatus,
}

/// Team as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TeamResponse {
    /// Team display name.
    pub name: String,
    /// Current score.
    pub points: i32,
}

/// Full game record as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GameResponse {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Game display name.
    pub name: String,
    /// Teams with their scores.
    pub teams: Vec<TeamResponse>,
    /// Normalized word pool, in insertion order.
    pub words: Vec<String>,
    /// Lifecycle status.
    pub status: GameStatus,
}

impl From<TeamEntity> for TeamResponse {
    fn from(value: TeamEntity) -> Self {
        Self {
            name: value.name,
            points: value.points,
        }
    }
}

impl From<GameEntity> for GameResponse {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            teams: value.teams.into_iter().map(Into::into).collect(),
            words: value.words,
            status: value.status,
        }
    }
}
