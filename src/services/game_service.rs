//! Business logic behind the `/game` routes.
//!
//! Each operation performs at most one read-modify-write against the store. Edits to the
//! same game are not serialized, so concurrent writers follow last-writer-wins semantics.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::models::{GameEntity, GamePatch, NewGameEntity},
    dto::game::{CreateGameRequest, GameResponse, UpdateGameRequest, WordRequest},
    error::ServiceError,
    state::{
        SharedState,
        game::{self, normalize_words},
        lifecycle::GameStatus,
    },
};

/// Parse a client-supplied game identifier.
pub fn parse_game_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ServiceError::InvalidInput(format!("invalid game id `{raw}`")))
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("game `{id}` not found"))
}

async fn load_game(state: &SharedState, id: Uuid) -> Result<GameEntity, ServiceError> {
    let store = state.require_game_store().await?;
    store.find_game(id).await?.ok_or_else(|| not_found(id))
}

async fn persist_game(state: &SharedState, game: GameEntity) -> Result<GameResponse, ServiceError> {
    let store = state.require_game_store().await?;
    let id = game.id;
    // The document may have been deleted between the read and this write.
    if !store.replace_game(game.clone()).await? {
        return Err(not_found(id));
    }
    Ok(game.into())
}

/// Return every stored game in store-native order.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameResponse>, ServiceError> {
    let store = state.require_game_store().await?;
    let games = store.list_games().await?;
    debug!(count = games.len(), "listed games");
    Ok(games.into_iter().map(Into::into).collect())
}

/// Fetch a single game by its textual identifier.
pub async fn get_game_by_id(state: &SharedState, id: &str) -> Result<GameResponse, ServiceError> {
    let id = parse_game_id(id)?;
    Ok(load_game(state, id).await?.into())
}

/// Persist a new game; the store assigns its identifier.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let CreateGameRequest {
        name,
        teams,
        words,
        status,
    } = request;

    let game = NewGameEntity {
        name,
        teams: teams.into_iter().map(Into::into).collect(),
        words: normalize_words(words)?,
        status: status.unwrap_or_default(),
    };

    let store = state.require_game_store().await?;
    let created = store.insert_game(game).await?;
    info!(game_id = %created.id, name = %created.name, status = %created.status, "game created");
    Ok(created.into())
}

/// Add a word to the pool of a `CREATED` game.
///
/// Checks run in a fixed order: game existence, lifecycle status, then duplicates.
pub async fn add_word(
    state: &SharedState,
    request: WordRequest,
) -> Result<GameResponse, ServiceError> {
    let id = parse_game_id(&request.game_id)?;
    let mut game = load_game(state, id).await?;

    let word = game::add_word(&mut game, &request.word)?;
    let response = persist_game(state, game).await?;
    info!(game_id = %id, %word, "word added");
    Ok(response)
}

/// Remove a word from the pool of a `CREATED` game.
///
/// Uses the same check order as [`add_word`], with a missing word reported last.
pub async fn delete_word(
    state: &SharedState,
    request: WordRequest,
) -> Result<GameResponse, ServiceError> {
    let id = parse_game_id(&request.game_id)?;
    let mut game = load_game(state, id).await?;

    let word = game::remove_word(&mut game, &request.word)?;
    let response = persist_game(state, game).await?;
    info!(game_id = %id, %word, "word deleted");
    Ok(response)
}

/// Merge a partial update into an existing game.
///
/// A status change goes through [`GameStatus::transition`], and a replacement word pool
/// is only accepted while the stored game is still editable.
pub async fn update_game_by_id(
    state: &SharedState,
    id: &str,
    request: UpdateGameRequest,
) -> Result<GameResponse, ServiceError> {
    let id = parse_game_id(id)?;
    let current = load_game(state, id).await?;

    let UpdateGameRequest {
        name,
        teams,
        words,
        status,
    } = request;

    let status = status
        .map(|next| current.status.transition(next))
        .transpose()?;
    let words = match words {
        Some(words) => {
            game::ensure_editable(current.status)?;
            Some(normalize_words(words)?)
        }
        None => None,
    };

    let patch = GamePatch {
        name,
        teams: teams.map(|teams| teams.into_iter().map(Into::into).collect()),
        words,
        status,
    };

    let store = state.require_game_store().await?;
    let updated = store
        .update_game(id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!(game_id = %id, status = %updated.status, "game updated");
    Ok(updated.into())
}

/// Move a game to `next`, rejecting backward transitions.
pub async fn change_status(
    state: &SharedState,
    id: &str,
    next: GameStatus,
) -> Result<GameResponse, ServiceError> {
    let id = parse_game_id(id)?;
    let mut game = load_game(state, id).await?;

    let previous = game.status;
    game.status = previous.transition(next)?;
    if previous == game.status {
        return Ok(game.into());
    }

    let response = persist_game(state, game).await?;
    info!(game_id = %id, from = %previous, to = %next, "game status changed");
    Ok(response)
}

/// Delete a game, returning it when it existed.
pub async fn delete_game(
    state: &SharedState,
    id: &str,
) -> Result<Option<GameResponse>, ServiceError> {
    let id = parse_game_id(id)?;
    let store = state.require_game_store().await?;
    let removed = store.delete_game(id).await?;
    match &removed {
        Some(_) => info!(game_id = %id, "game deleted"),
        None => debug!(game_id = %id, "delete requested for unknown game"),
    }
    Ok(removed.map(Into::into))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use super::*;
    use crate::{
        dao::game_store::InMemoryGameStore,
        dto::game::TeamInput,
        state::AppState,
    };

    fn state() -> SharedState {
        AppState::with_store(Arc::new(InMemoryGameStore::new()))
    }

    fn create_request(words: &[&str], status: Option<GameStatus>) -> CreateGameRequest {
        CreateGameRequest {
            name: "G1".into(),
            teams: vec![
                TeamInput {
                    name: "Red".into(),
                    points: 0,
                },
                TeamInput {
                    name: "Blue".into(),
                    points: 0,
                },
            ],
            words: words.iter().map(|w| w.to_string()).collect(),
            status,
        }
    }

    fn word(game: &GameResponse, word: &str) -> WordRequest {
        WordRequest {
            game_id: game.id.to_string(),
            word: word.into(),
        }
    }

    #[tokio::test]
    async fn created_games_get_fresh_ids() {
        let state = state();
        let mut ids = HashSet::new();
        for _ in 0..10 {
            let game = create_game(&state, create_request(&[], None)).await.unwrap();
            assert!(ids.insert(game.id));
            assert_eq!(game.status, GameStatus::Created);
        }
        assert_eq!(list_games(&state).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_initial_words() {
        let state = state();
        let err = create_game(&state, create_request(&["dog", "DOG"], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert!(list_games(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn adding_same_word_twice_conflicts() {
        let state = state();
        let game = create_game(&state, create_request(&["dog"], None))
            .await
            .unwrap();

        let err = add_word(&state, word(&game, "Dog")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let updated = add_word(&state, word(&game, "CAT")).await.unwrap();
        assert_eq!(updated.words, vec!["dog", "cat"]);
        let err = add_word(&state, word(&game, "cat")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let stored = get_game_by_id(&state, &game.id.to_string()).await.unwrap();
        assert_eq!(stored.words, vec!["dog", "cat"]);
    }

    #[tokio::test]
    async fn delete_then_add_restores_word() {
        let state = state();
        let game = create_game(&state, create_request(&["dog", "cat"], None))
            .await
            .unwrap();

        let after_delete = delete_word(&state, word(&game, "DOG")).await.unwrap();
        assert_eq!(after_delete.words, vec!["cat"]);
        let err = delete_word(&state, word(&game, "dog")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let restored = add_word(&state, word(&game, "dog")).await.unwrap();
        assert_eq!(restored.words, vec!["cat", "dog"]);
    }

    #[tokio::test]
    async fn locked_games_reject_word_edits() {
        let state = state();
        for status in [GameStatus::InProgress, GameStatus::Finished] {
            let game = create_game(&state, create_request(&["dog"], Some(status)))
                .await
                .unwrap();
            for candidate in ["dog", "bird"] {
                assert!(matches!(
                    add_word(&state, word(&game, candidate)).await,
                    Err(ServiceError::InvalidState(_))
                ));
                assert!(matches!(
                    delete_word(&state, word(&game, candidate)).await,
                    Err(ServiceError::InvalidState(_))
                ));
            }
            let stored = get_game_by_id(&state, &game.id.to_string()).await.unwrap();
            assert_eq!(stored.words, vec!["dog"]);
        }
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_reported() {
        let state = state();
        let other = create_game(&state, create_request(&["dog"], None))
            .await
            .unwrap();
        let missing = Uuid::new_v4().to_string();

        let err = delete_word(
            &state,
            WordRequest {
                game_id: missing.clone(),
                word: "dog".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(matches!(
            get_game_by_id(&state, &missing).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            get_game_by_id(&state, "not-an-id").await,
            Err(ServiceError::InvalidInput(_))
        ));

        let untouched = get_game_by_id(&state, &other.id.to_string()).await.unwrap();
        assert_eq!(untouched.words, vec!["dog"]);
    }

    #[tokio::test]
    async fn update_merges_fields_and_guards_lifecycle() {
        let state = state();
        let game = create_game(&state, create_request(&["dog"], None))
            .await
            .unwrap();
        let id = game.id.to_string();

        let updated = update_game_by_id(
            &state,
            &id,
            UpdateGameRequest {
                name: Some("Renamed".into()),
                words: Some(vec!["Bird".into()]),
                status: Some(GameStatus::InProgress),
                ..UpdateGameRequest::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.words, vec!["bird"]);
        assert_eq!(updated.status, GameStatus::InProgress);
        assert_eq!(updated.teams.len(), 2);

        let err = update_game_by_id(
            &state,
            &id,
            UpdateGameRequest {
                words: Some(vec!["cat".into()]),
                ..UpdateGameRequest::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));

        let err = update_game_by_id(
            &state,
            &id,
            UpdateGameRequest {
                status: Some(GameStatus::Created),
                ..UpdateGameRequest::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));

        let err = update_game_by_id(
            &state,
            &Uuid::new_v4().to_string(),
            UpdateGameRequest::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn status_changes_are_monotonic() {
        let state = state();
        let game = create_game(&state, create_request(&[], None)).await.unwrap();
        let id = game.id.to_string();

        let started = change_status(&state, &id, GameStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(started.status, GameStatus::InProgress);
        let again = change_status(&state, &id, GameStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(again.status, GameStatus::InProgress);

        assert!(matches!(
            change_status(&state, &id, GameStatus::Created).await,
            Err(ServiceError::InvalidState(_))
        ));
        let finished = change_status(&state, &id, GameStatus::Finished)
            .await
            .unwrap();
        assert_eq!(finished.status, GameStatus::Finished);
    }

    #[tokio::test]
    async fn delete_game_returns_removed_record_once() {
        let state = state();
        let game = create_game(&state, create_request(&["dog"], None))
            .await
            .unwrap();
        let id = game.id.to_string();

        assert_eq!(delete_game(&state, &id).await.unwrap(), Some(game));
        assert_eq!(delete_game(&state, &id).await.unwrap(), None);
        assert!(list_games(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn degraded_mode_is_reported() {
        let state = AppState::new();
        assert!(matches!(
            list_games(&state).await,
            Err(ServiceError::Degraded)
        ));
    }
}
