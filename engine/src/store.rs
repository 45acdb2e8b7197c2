//! Persistence collaborator used by the engine to save and load games.

use std::error::Error as StdError;

use retro_tactics_world::SavedGame;
use thiserror::Error;

/// Backend able to keep one saved game.
pub trait StateStore {
    /// Replaces the stored game.
    fn save(&mut self, game: &SavedGame) -> Result<(), StoreError>;

    /// Returns the stored game, or `None` when nothing was saved yet.
    fn load(&mut self) -> Result<Option<SavedGame>, StoreError>;
}

/// Failure reported by a [`StateStore`] backend.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl StoreError {
    /// Creates an error with a description and no underlying cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping the backend failure that caused it.
    #[must_use]
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Store that keeps the saved game in memory for the lifetime of a session.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Option<SavedGame>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `game`.
    #[must_use]
    pub fn with_game(game: SavedGame) -> Self {
        Self { saved: Some(game) }
    }

    /// Stored game, if any.
    #[must_use]
    pub fn saved(&self) -> Option<&SavedGame> {
        self.saved.as_ref()
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, game: &SavedGame) -> Result<(), StoreError> {
        self.saved = Some(game.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<SavedGame>, StoreError> {
        Ok(self.saved.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn game(level: u32) -> SavedGame {
        SavedGame {
            is_users_turn: true,
            level,
            points: 0.0,
            statistics: Vec::new(),
            selected: None,
            all_positions: Vec::new(),
        }
    }

    #[test]
    fn memory_store_starts_empty_and_keeps_the_last_save() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().expect("memory load"), None);

        store.save(&game(1)).expect("memory save");
        store.save(&game(3)).expect("memory save");

        assert_eq!(store.load().expect("memory load").map(|saved| saved.level), Some(3));
        assert_eq!(store.saved().map(|saved| saved.level), Some(3));
    }

    #[test]
    fn store_error_exposes_its_source() {
        let error = StoreError::with_source(
            "could not read save file",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );

        assert_eq!(error.to_string(), "could not read save file");
        assert!(StdError::source(&error).is_some());
        assert!(StdError::source(&StoreError::new("plain")).is_none());
    }
}
