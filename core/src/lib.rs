#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Retro Tactics engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for the engine to
//! present and for systems to react to. Systems consume event streams, query
//! immutable [`PositionsView`] snapshots, and respond exclusively with new
//! command batches.
//!
//! The board geometry and the character/team model live here as well since
//! every other crate depends on them.

pub mod character;
pub mod geometry;
pub mod team;

pub use character::{
    Character, CharacterId, CharacterKind, Damage, KindParseError, KindProfile, Side, BASE_HEALTH,
    MAX_HEALTH,
};
pub use team::Team;

/// Number of cells along each edge of the board.
pub const BOARD_SIZE: u32 = 8;

/// Number of cells on the board.
pub const CELL_COUNT: u32 = BOARD_SIZE * BOARD_SIZE;

/// Level every run starts at.
pub const FIRST_LEVEL: u32 = 1;

/// Last playable level.
pub const FINAL_LEVEL: u32 = 4;

/// Sentinel level reached once the final level is cleared.
pub const TERMINAL_LEVEL: u32 = FINAL_LEVEL + 1;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Discards the current run and deals fresh level-one rosters.
    NewGame,
    /// Forwards a player click on a board cell.
    ClickCell {
        /// Cell the player clicked.
        cell: CellIndex,
    },
    /// Applies the pending strike once its damage has been shown.
    ResolveStrike,
    /// Requests that an AI character strike a player character.
    OpponentAttack {
        /// AI character delivering the strike.
        attacker: CharacterId,
        /// Player character receiving the strike.
        target: CharacterId,
    },
    /// Requests that an AI character relocate to an empty cell.
    OpponentMove {
        /// AI character being moved.
        character: CharacterId,
        /// Destination cell.
        to: CellIndex,
    },
    /// Reports that the AI could neither attack nor approach this turn.
    OpponentForfeit {
        /// AI character that was chosen to act, if any.
        character: Option<CharacterId>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a level was dealt and play may begin.
    LevelStarted {
        /// Level that began.
        level: u32,
    },
    /// Reports that the player selection changed.
    SelectionChanged {
        /// Cell that was selected before, if any.
        previous: Option<CellIndex>,
        /// Cell that is selected now, if any.
        selected: Option<CellIndex>,
    },
    /// Confirms that a character moved between two cells.
    CharacterMoved {
        /// Character that moved.
        character: CharacterId,
        /// Cell the character left.
        from: CellIndex,
        /// Cell the character occupies now.
        to: CellIndex,
    },
    /// Announces a committed strike whose damage must be shown before the
    /// engine submits [`Command::ResolveStrike`].
    StrikeCommitted {
        /// Character delivering the strike.
        attacker: CharacterId,
        /// Character receiving the strike.
        target: CharacterId,
        /// Cell occupied by the target.
        cell: CellIndex,
        /// Damage that will be applied.
        damage: Damage,
    },
    /// Confirms that a strike reduced a character's health.
    CharacterDamaged {
        /// Character that was struck.
        character: CharacterId,
        /// Cell the character occupies.
        cell: CellIndex,
        /// Health left after the strike.
        remaining_health: f32,
    },
    /// Confirms that a character ran out of health and left the board.
    CharacterEliminated {
        /// Character that was removed.
        character: CharacterId,
        /// Side the character fought for.
        side: Side,
        /// Cell the character occupied.
        cell: CellIndex,
    },
    /// Signals that the positioned characters should be redrawn.
    PositionsChanged,
    /// Reports a player click that could not be honoured.
    ActionRejected {
        /// Cell the player clicked.
        cell: CellIndex,
        /// Why the click was rejected.
        reason: RejectionReason,
    },
    /// Announces that turn ownership passed to a side.
    TurnPassed {
        /// Side that may act now.
        to: Side,
    },
    /// Reports that the AI gave up its action for the turn.
    MoveForfeited {
        /// AI character that was chosen to act, if any.
        character: Option<CharacterId>,
    },
    /// Announces that the AI roster of a level was eliminated.
    LevelCleared {
        /// Level that was cleared.
        level: u32,
        /// Score accumulated so far.
        points: f32,
    },
    /// Announces that the player roster was eliminated.
    Defeat {
        /// Final score of the run.
        points: f32,
    },
    /// Announces that the final level was cleared.
    Victory {
        /// Final score of the run.
        points: f32,
        /// Best score recorded across runs.
        best: f32,
    },
    /// Confirms that a saved game replaced the current state.
    GameRestored {
        /// Level of the restored game.
        level: u32,
    },
}

/// Reasons a player click may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// The destination is neither a legal move nor a legal attack.
    InvalidMove,
    /// The clicked character belongs to the AI and cannot be attacked.
    NotYourUnit,
}

/// Linear index of a board cell, `0..CELL_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Creates a cell index, returning `None` when it lies off the board.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value < CELL_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Iterates every cell of the board in ascending order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT).map(Self)
    }
}

/// Location of a single board cell expressed as row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Immutable pairing of a character with the cell it occupies.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedSnapshot {
    /// Copy of the character record.
    pub character: Character,
    /// Cell occupied by the character.
    pub cell: CellIndex,
}

impl PositionedSnapshot {
    /// Side the positioned character fights for.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.character.side()
    }
}

/// Read-only snapshot of every positioned character, in position-list order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionsView {
    snapshots: Vec<PositionedSnapshot>,
}

impl PositionsView {
    /// Creates a new view from the provided snapshots, keeping their order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<PositionedSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &PositionedSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the snapshots of one side.
    pub fn side(&self, side: Side) -> impl Iterator<Item = &PositionedSnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| snapshot.side() == side)
    }

    /// Snapshot of the character standing on `cell`, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellIndex) -> Option<&PositionedSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.cell == cell)
    }

    /// Snapshot of the character with the provided identity, if positioned.
    #[must_use]
    pub fn find(&self, id: CharacterId) -> Option<&PositionedSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.character.id() == id)
    }

    /// Cells occupied by any character.
    pub fn occupied_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.snapshots.iter().map(|snapshot| snapshot.cell)
    }

    /// Number of positioned characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no character is positioned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PositionedSnapshot> {
        self.snapshots
    }
}
