#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure combat math: damage computation and its application to a defender.
//!
//! The functions here know nothing about turn order; the world decides when a
//! strike is committed and when it resolves.

use retro_tactics_core::{Character, Damage};

/// Share of the attacker's raw attack that always gets through.
const DAMAGE_FLOOR_RATIO: f32 = 0.1;

/// Outcome of applying a strike to a defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrikeOutcome {
    /// The defender kept some health.
    Survived {
        /// Health left after the strike.
        remaining: f32,
    },
    /// The defender's health dropped to zero or below.
    Eliminated,
}

/// Computes the damage `attacker` deals to `defender`.
///
/// Defence absorbs damage but never below a tenth of the raw attack.
#[must_use]
pub fn resolve(attacker: &Character, defender: &Character) -> Damage {
    let raw = attacker.attack();
    Damage::new((raw - defender.defence()).max(raw * DAMAGE_FLOOR_RATIO))
}

/// Subtracts `damage` from `defender` and reports whether it survived.
pub fn apply(defender: &mut Character, damage: Damage) -> StrikeOutcome {
    let remaining = defender.apply_damage(damage);
    if remaining <= 0.0 {
        StrikeOutcome::Eliminated
    } else {
        StrikeOutcome::Survived { remaining }
    }
}
