//! Character kinds, their capability records, and the mutable character record.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health assigned to every freshly constructed character.
pub const BASE_HEALTH: f32 = 50.0;

/// Upper bound of a character's health.
pub const MAX_HEALTH: f32 = 100.0;

/// Health restored by a level-up, before clamping to [`MAX_HEALTH`].
const LEVEL_UP_HEALING: f32 = 80.0;

/// Side of the board a character fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Characters driven by player clicks.
    Player,
    /// Characters driven by the opponent system.
    Ai,
}

impl Side {
    /// The side facing this one.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Ai,
            Self::Ai => Self::Player,
        }
    }
}

/// Closed set of concrete character kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    /// Player ranged unit.
    #[serde(alias = "archer")]
    Bowman,
    /// Player melee unit.
    Swordsman,
    /// Player long-range caster.
    #[serde(alias = "mage")]
    Magician,
    /// AI counterpart of the bowman.
    Vampire,
    /// AI counterpart of the swordsman.
    Undead,
    /// AI counterpart of the magician.
    Daemon,
}

/// Base statistics and reach shared by every character of a kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindProfile {
    /// Attack assigned at construction.
    pub attack: f32,
    /// Defence assigned at construction.
    pub defence: f32,
    /// Chebyshev radius of a single move.
    pub move_range: u32,
    /// Chebyshev radius of an attack.
    pub attack_range: u32,
    /// Side the kind belongs to.
    pub side: Side,
}

impl CharacterKind {
    /// Every kind, player kinds first.
    pub const ALL: [Self; 6] = [
        Self::Bowman,
        Self::Swordsman,
        Self::Magician,
        Self::Vampire,
        Self::Undead,
        Self::Daemon,
    ];

    /// Kinds that may be recruited into the player roster.
    pub const PLAYER: [Self; 3] = [Self::Bowman, Self::Swordsman, Self::Magician];

    /// Kinds that may be generated for the AI roster.
    pub const AI: [Self; 3] = [Self::Vampire, Self::Undead, Self::Daemon];

    /// Capability record of the kind.
    #[must_use]
    pub const fn profile(self) -> KindProfile {
        let (attack, defence, move_range, attack_range, side) = match self {
            Self::Bowman => (25.0, 25.0, 2, 2, Side::Player),
            Self::Swordsman => (40.0, 10.0, 4, 1, Side::Player),
            Self::Magician => (10.0, 40.0, 1, 4, Side::Player),
            Self::Vampire => (25.0, 25.0, 2, 2, Side::Ai),
            Self::Undead => (40.0, 10.0, 4, 1, Side::Ai),
            Self::Daemon => (10.0, 10.0, 1, 4, Side::Ai),
        };
        KindProfile {
            attack,
            defence,
            move_range,
            attack_range,
            side,
        }
    }

    /// Side the kind fights for.
    #[must_use]
    pub const fn side(self) -> Side {
        self.profile().side
    }

    /// Serialized tag of the kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bowman => "bowman",
            Self::Swordsman => "swordsman",
            Self::Magician => "magician",
            Self::Vampire => "vampire",
            Self::Undead => "undead",
            Self::Daemon => "daemon",
        }
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Raised when a tag does not name a concrete character kind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{tag}` does not name a concrete character kind")]
pub struct KindParseError {
    /// The rejected tag.
    pub tag: String,
}

impl FromStr for CharacterKind {
    type Err = KindParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bowman" | "archer" => Ok(Self::Bowman),
            "swordsman" => Ok(Self::Swordsman),
            "magician" | "mage" => Ok(Self::Magician),
            "vampire" => Ok(Self::Vampire),
            "undead" => Ok(Self::Undead),
            "daemon" => Ok(Self::Daemon),
            other => Err(KindParseError {
                tag: other.to_owned(),
            }),
        }
    }
}

/// Stable identity of a character for the lifetime of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(u32);

impl CharacterId {
    /// Creates a character identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Amount of health removed by a single strike.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Damage(f32);

impl Damage {
    /// Wraps a raw damage amount, clamping negatives to zero.
    #[must_use]
    pub fn new(amount: f32) -> Self {
        Self(amount.max(0.0))
    }

    /// Raw damage amount.
    #[must_use]
    pub const fn amount(&self) -> f32 {
        self.0
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Mutable character record.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    id: CharacterId,
    kind: CharacterKind,
    level: u32,
    attack: f32,
    defence: f32,
    health: f32,
}

impl Character {
    /// Constructs a character of `kind` with its base statistics.
    ///
    /// `level` is recorded as given (at least 1); statistics do not depend
    /// on it.
    #[must_use]
    pub fn new(id: CharacterId, kind: CharacterKind, level: u32) -> Self {
        let profile = kind.profile();
        Self {
            id,
            kind,
            level: level.max(1),
            attack: profile.attack,
            defence: profile.defence,
            health: BASE_HEALTH,
        }
    }

    /// Replaces the health value, used when rebuilding saved characters.
    #[must_use]
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.min(MAX_HEALTH);
        self
    }

    /// Replaces attack and defence, used when rebuilding saved characters.
    ///
    /// Values below the kind's base profile, including the zero of a field
    /// missing from the save, keep the base value.
    #[must_use]
    pub fn with_stats(mut self, attack: f32, defence: f32) -> Self {
        let profile = self.kind.profile();
        self.attack = attack.max(profile.attack);
        self.defence = defence.max(profile.defence);
        self
    }

    /// Identity of the character.
    #[must_use]
    pub const fn id(&self) -> CharacterId {
        self.id
    }

    /// Concrete kind of the character.
    #[must_use]
    pub const fn kind(&self) -> CharacterKind {
        self.kind
    }

    /// Side the character fights for.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.kind.side()
    }

    /// Power tier of the character.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Current attack.
    #[must_use]
    pub const fn attack(&self) -> f32 {
        self.attack
    }

    /// Current defence.
    #[must_use]
    pub const fn defence(&self) -> f32 {
        self.defence
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Chebyshev radius of a single move.
    #[must_use]
    pub const fn move_range(&self) -> u32 {
        self.kind.profile().move_range
    }

    /// Chebyshev radius of an attack.
    #[must_use]
    pub const fn attack_range(&self) -> u32 {
        self.kind.profile().attack_range
    }

    /// Whether the character still has health left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Subtracts `damage` from health and returns the remaining health.
    pub fn apply_damage(&mut self, damage: Damage) -> f32 {
        self.health -= damage.amount();
        self.health
    }

    /// Grows the character by one level.
    ///
    /// Attack and defence scale by `(80 + health) / 100` but never shrink,
    /// health heals by 80 up to [`MAX_HEALTH`].
    pub fn level_up(&mut self) {
        let factor = (LEVEL_UP_HEALING + self.health) / 100.0;
        self.attack = self.attack.max(self.attack * factor);
        self.defence = self.defence.max(self.defence * factor);
        self.health = (self.health + LEVEL_UP_HEALING).min(MAX_HEALTH);
        self.level += 1;
    }
}
