//! Word pool rules for a game record.
//!
//! Every edit checks the lifecycle first and the pool contents second, so a locked game
//! always reports its status regardless of which word was sent.

use std::collections::HashSet;

use thiserror::Error;

use crate::{dao::models::GameEntity, state::lifecycle::GameStatus};

/// Reasons a word pool edit can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordPoolError {
    /// The game is in progress.
    #[error("the game has already been started")]
    AlreadyStarted,
    /// The game is over.
    #[error("the game has already finished")]
    AlreadyFinished,
    /// The word is already in the pool.
    #[error("word `{0}` already exists in the game")]
    Duplicate(String),
    /// The word is not in the pool.
    #[error("word `{0}` does not exist in the game")]
    Missing(String),
}

/// Canonical form of a word inside the pool.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Fail unless the pool of a game in `status` may be edited.
pub fn ensure_editable(status: GameStatus) -> Result<(), WordPoolError> {
    match status {
        GameStatus::Created => Ok(()),
        GameStatus::InProgress => Err(WordPoolError::AlreadyStarted),
        GameStatus::Finished => Err(WordPoolError::AlreadyFinished),
    }
}

/// Normalize a whole word list, rejecting entries that collide once normalized.
pub fn normalize_words<I, S>(words: I) -> Result<Vec<String>, WordPoolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|word| {
            let word = normalize_word(word.as_ref());
            if seen.insert(word.clone()) {
                Ok(word)
            } else {
                Err(WordPoolError::Duplicate(word))
            }
        })
        .collect()
}

/// Append `word` to the pool, returning its normalized form.
pub fn add_word(game: &mut GameEntity, word: &str) -> Result<String, WordPoolError> {
    let word = normalize_word(word);
    ensure_editable(game.status)?;

    if game.words.contains(&word) {
        return Err(WordPoolError::Duplicate(word));
    }

    game.words.push(word.clone());
    Ok(word)
}

/// Remove `word` from the pool, returning its normalized form.
pub fn remove_word(game: &mut GameEntity, word: &str) -> Result<String, WordPoolError> {
    let word = normalize_word(word);
    ensure_editable(game.status)?;

    if !game.words.contains(&word) {
        return Err(WordPoolError::Missing(word));
    }

    game.words.retain(|existing| existing != &word);
    Ok(word)
}
