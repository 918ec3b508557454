use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::lifecycle::GameStatus;

/// Team embedded in a game document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Display name of the team.
    pub name: String,
    /// Current score for the team.
    #[serde(default)]
    pub points: i32,
}

/// Aggregate game entity persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Primary key assigned by the store on insertion.
    pub id: Uuid,
    /// Display name of the game.
    pub name: String,
    /// Participating teams, in the order they were supplied.
    pub teams: Vec<TeamEntity>,
    /// Normalized word pool.
    pub words: Vec<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: GameStatus,
}

/// Game payload handed to the store before an identifier exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameEntity {
    /// Display name of the game.
    pub name: String,
    /// Participating teams.
    pub teams: Vec<TeamEntity>,
    /// Normalized word pool.
    pub words: Vec<String>,
    /// Initial lifecycle status.
    pub status: GameStatus,
}

impl NewGameEntity {
    /// Attach the identifier chosen by the store.
    pub fn with_id(self, id: Uuid) -> GameEntity {
        GameEntity {
            id,
            name: self.name,
            teams: self.teams,
            words: self.words,
            status: self.status,
        }
    }
}

/// Partial update merged into an existing game; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement team list.
    pub teams: Option<Vec<TeamEntity>>,
    /// Replacement word pool, already normalized.
    pub words: Option<Vec<String>>,
    /// New status, already validated against the stored one.
    pub status: Option<GameStatus>,
}

impl GamePatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.teams.is_none() && self.words.is_none() && self.status.is_none()
    }

    /// Merge the patch into `game` in place.
    pub fn apply_to(self, game: &mut GameEntity) {
        if let Some(name) = self.name {
            game.name = name;
        }
        if let Some(teams) = self.teams {
            game.teams = teams;
        }
        if let Some(words) = self.words {
            game.words = words;
        }
        if let Some(status) = self.status {
            game.status = status;
        }
    }
}
