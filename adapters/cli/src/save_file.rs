//! Single-line save file format and the file-backed state store.
//!
//! A save file holds one line: `retro-tactics:v1:<payload>`, where the
//! payload is the JSON form of the saved game encoded as unpadded base64.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use retro_tactics_engine::{StateStore, StoreError};
use retro_tactics_world::SavedGame;
use thiserror::Error;

const SAVE_DOMAIN: &str = "retro-tactics";
const SAVE_VERSION: &str = "v1";
const FIELD_DELIMITER: char = ':';

/// Errors that can occur while encoding or decoding save lines.
#[derive(Debug, Error)]
pub(crate) enum SaveFileError {
    /// The save file was empty or contained only whitespace.
    #[error("save file is empty")]
    Empty,
    /// A required segment was missing from the save line.
    #[error("save line is missing the {0}")]
    MissingField(&'static str),
    /// The save line used an unexpected prefix.
    #[error("save prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The save line used an unsupported version identifier.
    #[error("save version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode save payload")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not a saved game.
    #[error("could not parse save payload")]
    InvalidPayload(#[source] serde_json::Error),
}

/// Encodes a saved game into its single-line form.
pub(crate) fn encode(game: &SavedGame) -> Result<String, SaveFileError> {
    let json = serde_json::to_vec(game).map_err(SaveFileError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{SAVE_DOMAIN}:{SAVE_VERSION}:{encoded}"))
}

/// Decodes a saved game from its single-line form.
pub(crate) fn decode(value: &str) -> Result<SavedGame, SaveFileError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SaveFileError::Empty);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().ok_or(SaveFileError::MissingField("prefix"))?;
    let version = parts.next().ok_or(SaveFileError::MissingField("version"))?;
    let payload = parts.next().ok_or(SaveFileError::MissingField("payload"))?;

    if domain != SAVE_DOMAIN {
        return Err(SaveFileError::InvalidPrefix(domain.to_owned()));
    }
    if version != SAVE_VERSION {
        return Err(SaveFileError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(SaveFileError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(SaveFileError::InvalidPayload)
}

/// State store that keeps the saved game in a file.
#[derive(Clone, Debug)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`; the file is created on first save.
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the save file.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn save(&mut self, game: &SavedGame) -> Result<(), StoreError> {
        let line = encode(game)
            .map_err(|error| StoreError::with_source("could not encode the saved game", error))?;
        fs::write(&self.path, format!("{line}\n")).map_err(|error| {
            StoreError::with_source(format!("could not write {}", self.path.display()), error)
        })
    }

    fn load(&mut self) -> Result<Option<SavedGame>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(StoreError::with_source(
                    format!("could not read {}", self.path.display()),
                    error,
                ))
            }
        };
        decode(&text).map(Some).map_err(|error| {
            StoreError::with_source(format!("could not decode {}", self.path.display()), error)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_tactics_world::{query, World};

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "retro-tactics-{name}-{}.save",
            std::process::id()
        ))
    }

    #[test]
    fn encoded_line_carries_the_header() {
        let game = query::saved_game(&World::with_seed(3));
        let line = encode(&game).expect("saved games serialize");

        assert!(line.starts_with("retro-tactics:v1:"));
        assert!(!line.contains('\n'));
        assert_eq!(decode(&line).expect("line decodes"), game);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!(decode("   "), Err(SaveFileError::Empty)));
        assert!(matches!(
            decode("retro-tactics"),
            Err(SaveFileError::MissingField("version"))
        ));
        assert!(matches!(
            decode("chess:v1:abc"),
            Err(SaveFileError::InvalidPrefix(prefix)) if prefix == "chess"
        ));
        assert!(matches!(
            decode("retro-tactics:v9:abc"),
            Err(SaveFileError::UnsupportedVersion(version)) if version == "v9"
        ));
        assert!(matches!(
            decode("retro-tactics:v1:@@@"),
            Err(SaveFileError::InvalidEncoding(_))
        ));
        let not_a_game = STANDARD_NO_PAD.encode(b"[1,2,3]");
        assert!(matches!(
            decode(&format!("retro-tactics:v1:{not_a_game}")),
            Err(SaveFileError::InvalidPayload(_))
        ));
    }

    #[test]
    fn file_store_round_trips_and_reports_missing_files() {
        let path = scratch_file("round-trip");
        let _ = fs::remove_file(&path);
        let mut store = FileStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.load().expect("missing file is not an error"), None);

        let game = query::saved_game(&World::with_seed(8));
        store.save(&game).expect("temp dir is writable");
        assert_eq!(store.load().expect("file readable"), Some(game));

        fs::write(&path, "garbage\n").expect("temp dir is writable");
        assert!(store.load().is_err());
        let _ = fs::remove_file(&path);
    }
}
