#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides the AI side's action whenever the turn passes to it.
//!
//! The opponent first looks for any player character inside the attack range of
//! an AI character. Failing that, it lets a [`SelectionPolicy`] choose one AI
//! character and walks it one waypoint toward the closest player character.
//! When no player character can be reached the opponent forfeits.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use retro_tactics_core::{
    geometry, CellIndex, Command, Event, PositionedSnapshot, PositionsView, Side,
};
use retro_tactics_system_pathfinding::{find_path, OccupancyGrid};
use tracing::debug;

/// Chooses one entry among several equally valid candidates.
pub trait SelectionPolicy: fmt::Debug {
    /// Returns the index of the chosen candidate, or `None` when `len` is zero.
    fn pick_index(&mut self, len: usize) -> Option<usize>;
}

/// Uniform random choice driven by a seeded generator.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Creates a policy whose choices are reproducible for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SelectionPolicy for RandomPolicy {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }
}

/// Always picks the first candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl SelectionPolicy for FirstCandidate {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then_some(0)
    }
}

/// AI decision system.
#[derive(Debug)]
pub struct Opponent {
    policy: Box<dyn SelectionPolicy>,
}

impl Opponent {
    /// Creates an opponent that selects movers with the provided policy.
    #[must_use]
    pub fn new(policy: Box<dyn SelectionPolicy>) -> Self {
        Self { policy }
    }

    /// Creates an opponent that selects movers uniformly at random.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(RandomPolicy::seeded(seed)))
    }

    /// Consumes world events and emits the AI's command once it owns the turn.
    pub fn handle(&mut self, events: &[Event], positions: &PositionsView, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TurnPassed { to: Side::Ai }))
        {
            return;
        }

        let bots: Vec<&PositionedSnapshot> = positions.side(Side::Ai).collect();
        let targets: Vec<&PositionedSnapshot> = positions.side(Side::Player).collect();
        if bots.is_empty() || targets.is_empty() {
            return;
        }

        if let Some((attacker, target)) = first_target_in_range(&bots, &targets) {
            out.push(Command::OpponentAttack {
                attacker: attacker.character.id(),
                target: target.character.id(),
            });
            return;
        }

        let Some(mover) = self
            .policy
            .pick_index(bots.len())
            .and_then(|index| bots.get(index).copied())
        else {
            out.push(Command::OpponentForfeit { character: None });
            return;
        };

        match approach_cell(mover, &targets, positions) {
            Some(to) => out.push(Command::OpponentMove {
                character: mover.character.id(),
                to,
            }),
            None => {
                debug!(
                    character = mover.character.id().get(),
                    cell = mover.cell.get(),
                    "no player character reachable"
                );
                out.push(Command::OpponentForfeit {
                    character: Some(mover.character.id()),
                });
            }
        }
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new(Box::new(FirstCandidate))
    }
}

fn first_target_in_range<'a>(
    bots: &[&'a PositionedSnapshot],
    targets: &[&'a PositionedSnapshot],
) -> Option<(&'a PositionedSnapshot, &'a PositionedSnapshot)> {
    bots.iter().find_map(|bot| {
        targets
            .iter()
            .find(|target| {
                geometry::within_range(bot.cell, target.cell, bot.character.attack_range())
            })
            .map(|target| (*bot, *target))
    })
}

/// Second-to-last waypoint of the shortest path toward any target, the first
/// target winning ties.
fn approach_cell(
    mover: &PositionedSnapshot,
    targets: &[&PositionedSnapshot],
    positions: &PositionsView,
) -> Option<CellIndex> {
    let start = geometry::coord_of(mover.cell);
    let mut shortest: Option<Vec<_>> = None;

    for target in targets {
        let grid =
            OccupancyGrid::for_approach(positions.occupied_cells(), mover.cell, target.cell);
        let Some(path) = find_path(&grid, start, geometry::coord_of(target.cell)) else {
            continue;
        };
        if shortest.as_ref().map_or(true, |best| path.len() < best.len()) {
            shortest = Some(path);
        }
    }

    let path = shortest?;
    let waypoint = path.len().checked_sub(2).and_then(|index| path.get(index))?;
    geometry::index_of(*waypoint).filter(|cell| *cell != mover.cell)
}
