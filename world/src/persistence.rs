//! Serializable snapshot of a game and the errors raised while restoring it.

use retro_tactics_core::KindParseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plain snapshot of everything needed to resume a game.
///
/// Field names follow the camelCase layout used by existing save files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    /// Whether the player owned the turn when the game was saved.
    pub is_users_turn: bool,
    /// Level being played, `5` once the run was won.
    pub level: u32,
    /// Score accumulated by the run.
    pub points: f32,
    /// Final scores of earlier runs, in completion order.
    #[serde(default)]
    pub statistics: Vec<f32>,
    /// Cell of the selected player character, if any.
    #[serde(default)]
    pub selected: Option<u32>,
    /// Every positioned character.
    #[serde(default)]
    pub all_positions: Vec<SavedPosition>,
}

/// Character record paired with its cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedPosition {
    /// Character occupying the cell.
    pub character: SavedCharacter,
    /// Linear index of the cell.
    pub position: u32,
}

/// Serialized character record.
///
/// `type`, `level`, `health`, `attack` and `defence` are read back; the
/// ranges are derived from the kind and written for readers of the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCharacter {
    /// Kind tag such as `bowman` or `daemon`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Power tier.
    pub level: u32,
    /// Remaining health.
    pub health: f32,
    /// Attack at the time of saving.
    #[serde(default)]
    pub attack: f32,
    /// Defence at the time of saving.
    #[serde(default)]
    pub defence: f32,
    /// Move radius of the kind.
    #[serde(default)]
    pub move_range: u32,
    /// Attack radius of the kind.
    #[serde(default)]
    pub attack_range: u32,
}

/// Reasons a saved game cannot be restored.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A character carried a tag outside the six concrete kinds.
    #[error("saved character could not be rebuilt")]
    UnknownKind(#[from] KindParseError),
    /// A character was positioned outside the board.
    #[error("saved position {position} lies outside the board")]
    OffBoard {
        /// Offending cell index.
        position: u32,
    },
    /// Two characters were positioned on the same cell.
    #[error("saved position {position} is occupied twice")]
    DuplicateCell {
        /// Offending cell index.
        position: u32,
    },
    /// A character was saved without any health left.
    #[error("saved character at position {position} has no health left")]
    DeadCharacter {
        /// Cell index of the dead character.
        position: u32,
    },
    /// An unfinished level was saved with player characters but no opponents.
    #[error("saved level {level} has no opponents left")]
    MissingOpponents {
        /// Level of the save.
        level: u32,
    },
    /// The level lies outside `1..=5`.
    #[error("saved level {level} is not a valid level")]
    InvalidLevel {
        /// Offending level.
        level: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload_uses_defaults() {
        let json = r#"{
            "isUsersTurn": true,
            "level": 2,
            "points": 40,
            "allPositions": [
                { "character": { "type": "mage", "level": 1, "health": 12.5 }, "position": 8 }
            ]
        }"#;

        let saved: SavedGame = serde_json::from_str(json).expect("valid payload");
        assert_eq!(saved.level, 2);
        assert!(saved.statistics.is_empty());
        assert_eq!(saved.selected, None);
        assert_eq!(saved.all_positions[0].character.kind, "mage");
        assert_eq!(saved.all_positions[0].character.attack, 0.0);
    }

    #[test]
    fn field_names_are_camel_case() {
        let saved = SavedGame {
            is_users_turn: false,
            level: 1,
            points: 0.0,
            statistics: vec![12.0],
            selected: Some(9),
            all_positions: vec![SavedPosition {
                character: SavedCharacter {
                    kind: "daemon".to_owned(),
                    level: 1,
                    health: 50.0,
                    attack: 10.0,
                    defence: 10.0,
                    move_range: 1,
                    attack_range: 4,
                },
                position: 7,
            }],
        };

        let value = serde_json::to_value(&saved).expect("serializable");
        assert_eq!(value["isUsersTurn"], false);
        assert_eq!(value["allPositions"][0]["character"]["type"], "daemon");
        assert_eq!(value["allPositions"][0]["character"]["attackRange"], 4);
    }
}
