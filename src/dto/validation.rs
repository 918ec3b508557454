//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a word has visible content.
///
/// # Examples
///
/// ```ignore
/// validate_word("Dog")  // Ok
/// validate_word("   ")  // Err - blank
/// ```
pub fn validate_word(word: &str) -> Result<(), ValidationError> {
    if word.trim().is_empty() {
        let mut err = ValidationError::new("word_blank");
        err.message = Some("Word must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Validates every entry of a word list with [`validate_word`].
pub fn validate_words(words: &[String]) -> Result<(), ValidationError> {
    words.iter().try_for_each(|word| validate_word(word))
}

/// Validates that a display name is not blank.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("name_blank");
        err.message = Some("Name must not be empty".into());
        return Err(err);
    }
    Ok(())
}
