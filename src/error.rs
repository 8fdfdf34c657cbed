use thiserror::Error;

/// Errors raised by translatable entities and their translation sources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The key has neither a translation marker nor is it a reference to one.
    #[error("Key '{0}' is not translatable")]
    KeyNotTranslatable(String),

    /// A locale code failed the syntax check.
    #[error("Invalid locale code: '{0}'")]
    InvalidLocale(String),

    /// A raw entity row was not a JSON object.
    #[error("Entity row must be a JSON object, got {0}")]
    InvalidRow(String),

    /// The shared translation table lock was poisoned by a panicking writer.
    #[error("Translation table lock poisoned")]
    LockPoisoned,

    /// Every positive integer group id has been handed out.
    #[error("No integer translation group ids left to reserve")]
    GroupIdsExhausted,
}

pub type Result<T> = std::result::Result<T, TranslationError>;
