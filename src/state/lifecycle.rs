use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Lifecycle status of a game record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Freshly created; teams and words can still be edited.
    #[default]
    Created,
    /// The game has been started; the word pool is locked.
    InProgress,
    /// The game is over; the word pool is locked.
    Finished,
}

/// Error returned when a status change would move the lifecycle backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid status transition: {from} cannot move to {to}")]
pub struct InvalidTransition {
    /// Status currently stored for the game.
    pub from: GameStatus,
    /// Status requested by the caller.
    pub to: GameStatus,
}

impl GameStatus {
    /// Wire representation, matching the serde encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Created => "CREATED",
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::Finished => "FINISHED",
        }
    }

    fn rank(self) -> u8 {
        match self {
            GameStatus::Created => 0,
            GameStatus::InProgress => 1,
            GameStatus::Finished => 2,
        }
    }

    /// Validate a move to `next`, returning the resulting status.
    ///
    /// Forward moves (including skipping straight to [`GameStatus::Finished`]) and
    /// re-applying the current status are accepted; anything going backwards is not.
    pub fn transition(self, next: GameStatus) -> Result<GameStatus, InvalidTransition> {
        if next.rank() < self.rank() {
            return Err(InvalidTransition {
                from: self,
                to: next,
            });
        }
        Ok(next)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_created() {
        assert_eq!(GameStatus::default(), GameStatus::Created);
    }

    #[test]
    fn forward_transitions_are_accepted() {
        assert_eq!(
            GameStatus::Created.transition(GameStatus::InProgress),
            Ok(GameStatus::InProgress)
        );
        assert_eq!(
            GameStatus::InProgress.transition(GameStatus::Finished),
            Ok(GameStatus::Finished)
        );
        assert_eq!(
            GameStatus::Created.transition(GameStatus::Finished),
            Ok(GameStatus::Finished)
        );
    }

    #[test]
    fn same_status_is_a_no_op() {
        for status in [
            GameStatus::Created,
            GameStatus::InProgress,
            GameStatus::Finished,
        ] {
            assert_eq!(status.transition(status), Ok(status));
        }
    }

    #[test]
    fn backward_transitions_are_rejected() {
        let err = GameStatus::Finished
            .transition(GameStatus::Created)
            .unwrap_err();
        assert_eq!(err.from, GameStatus::Finished);
        assert_eq!(err.to, GameStatus::Created);
        assert_eq!(
            err.to_string(),
            "invalid status transition: FINISHED cannot move to CREATED"
        );
        assert!(
            GameStatus::InProgress
                .transition(GameStatus::Created)
                .is_err()
        );
        assert!(
            GameStatus::Finished
                .transition(GameStatus::InProgress)
                .is_err()
        );
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&GameStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let parsed: GameStatus = serde_json::from_str("\"FINISHED\"").unwrap();
        assert_eq!(parsed, GameStatus::Finished);
    }
}
