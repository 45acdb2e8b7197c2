#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Retro Tactics.
//!
//! The [`World`] owns both rosters, the position list and the turn/selection
//! state. Every mutation goes through [`apply`], which validates a
//! [`Command`] and reports what happened as [`Event`]s; read access goes
//! through the [`query`] module.

pub mod persistence;
mod roster;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use retro_tactics_core::{
    geometry, CellIndex, Character, CharacterId, CharacterKind, Command, Damage, Event,
    RejectionReason, Side, Team, BOARD_SIZE, FINAL_LEVEL, FIRST_LEVEL, TERMINAL_LEVEL,
};
use retro_tactics_system_combat::{self as combat, StrikeOutcome};
use tracing::{debug, warn};

pub use persistence::{LoadError, SavedCharacter, SavedGame, SavedPosition};
use roster::IdAllocator;

const ROSTER_SEED: u64 = 0x5eed_7ac7_1c5b_0a2d;

/// Size of each roster when a run starts.
const STARTING_ROSTER: usize = 2;

/// Kinds the player starts a run with.
const STARTING_PLAYER_KINDS: [CharacterKind; 2] = [CharacterKind::Bowman, CharacterKind::Swordsman];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PositionedCharacter {
    character: CharacterId,
    cell: CellIndex,
}

#[derive(Clone, Debug)]
struct GameState {
    level: u32,
    selected: Option<CellIndex>,
    is_users_turn: bool,
    points: f32,
    statistics: Vec<f32>,
    positions: Vec<PositionedCharacter>,
}

impl GameState {
    fn fresh(statistics: Vec<f32>) -> Self {
        Self {
            level: FIRST_LEVEL,
            selected: None,
            is_users_turn: true,
            points: 0.0,
            statistics,
            positions: Vec::new(),
        }
    }
}

/// Strike committed by one side whose damage has not been applied yet.
#[derive(Clone, Copy, Debug)]
struct PendingStrike {
    attacker: CharacterId,
    target: CharacterId,
    side: Side,
    damage: Damage,
}

/// Represents the authoritative Retro Tactics world state.
#[derive(Debug)]
pub struct World {
    state: GameState,
    player_team: Team,
    ai_team: Team,
    pending_strike: Option<PendingStrike>,
    ids: IdAllocator,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world with a fresh level-one game dealt from the default seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(ROSTER_SEED)
    }

    /// Creates a world whose roster generation is driven by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut world = Self {
            state: GameState::fresh(Vec::new()),
            player_team: Team::new(),
            ai_team: Team::new(),
            pending_strike: None,
            ids: IdAllocator::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        world.deal_new_run();
        world
    }

    fn deal_new_run(&mut self) {
        let statistics = std::mem::take(&mut self.state.statistics);
        self.state = GameState::fresh(statistics);
        self.pending_strike = None;
        self.player_team = Team::new();
        self.ai_team = Team::new();

        let player = roster::generate_team(
            &mut self.rng,
            &mut self.ids,
            &STARTING_PLAYER_KINDS,
            FIRST_LEVEL,
            STARTING_ROSTER,
        );
        let ai = roster::generate_team(
            &mut self.rng,
            &mut self.ids,
            &CharacterKind::AI,
            FIRST_LEVEL,
            STARTING_ROSTER,
        );
        self.player_team.add_all(player);
        self.ai_team.add_all(ai);
        self.place_rosters();
    }

    fn place_rosters(&mut self) {
        let player_ids: Vec<CharacterId> = self.player_team.iter().map(Character::id).collect();
        let ai_ids: Vec<CharacterId> = self.ai_team.iter().map(Character::id).collect();

        let player_pool = geometry::player_start_cells(BOARD_SIZE);
        let ai_pool = geometry::ai_start_cells(BOARD_SIZE);
        let placed = roster::place(&mut self.rng, player_ids, &player_pool)
            .into_iter()
            .chain(roster::place(&mut self.rng, ai_ids, &ai_pool));

        self.state.positions.extend(
            placed.map(|(character, cell)| PositionedCharacter { character, cell }),
        );
    }

    fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player_team,
            Side::Ai => &self.ai_team,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player_team,
            Side::Ai => &mut self.ai_team,
        }
    }

    fn character(&self, id: CharacterId) -> Option<&Character> {
        self.player_team.get(id).or_else(|| self.ai_team.get(id))
    }

    fn occupant(&self, cell: CellIndex) -> Option<&Character> {
        self.state
            .positions
            .iter()
            .find(|entry| entry.cell == cell)
            .and_then(|entry| self.character(entry.character))
    }

    fn cell_of(&self, id: CharacterId) -> Option<CellIndex> {
        self.state
            .positions
            .iter()
            .find(|entry| entry.character == id)
            .map(|entry| entry.cell)
    }

    fn selected_character(&self) -> Option<&Character> {
        self.state
            .selected
            .and_then(|cell| self.occupant(cell))
            .filter(|character| character.side() == Side::Player)
    }

    fn within_selected_range(&self, cell: CellIndex, radius: impl Fn(&Character) -> u32) -> bool {
        match (self.state.selected, self.selected_character()) {
            (Some(origin), Some(character)) => {
                geometry::within_range(origin, cell, radius(character))
            }
            _ => false,
        }
    }

    fn set_selection(&mut self, selected: Option<CellIndex>, out_events: &mut Vec<Event>) {
        let previous = self.state.selected;
        if previous == selected {
            return;
        }
        self.state.selected = selected;
        out_events.push(Event::SelectionChanged { previous, selected });
    }

    fn is_over(&self) -> bool {
        self.state.level >= TERMINAL_LEVEL || self.player_team.is_empty()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewGame => {
            world.set_selection(None, out_events);
            world.deal_new_run();
            debug!(runs = world.state.statistics.len(), "new game dealt");
            out_events.push(Event::LevelStarted {
                level: world.state.level,
            });
            out_events.push(Event::PositionsChanged);
        }
        Command::ClickCell { cell } => handle_click(world, cell, out_events),
        Command::ResolveStrike => resolve_strike(world, out_events),
        Command::OpponentAttack { attacker, target } => {
            if !opponent_may_act(world) {
                return;
            }
            let attacker_cell = world.cell_of(attacker);
            let target_cell = world.cell_of(target);
            let pair = world.ai_team.get(attacker).zip(world.player_team.get(target));
            match (attacker_cell, target_cell, pair) {
                (Some(origin), Some(cell), Some((striker, victim)))
                    if geometry::within_range(origin, cell, striker.attack_range()) =>
                {
                    let damage = combat::resolve(striker, victim);
                    commit_strike(world, attacker, target, Side::Ai, cell, damage, out_events);
                }
                _ => {
                    warn!(
                        attacker = attacker.get(),
                        target = target.get(),
                        "opponent attack rejected"
                    );
                    forfeit(world, Some(attacker), out_events);
                }
            }
        }
        Command::OpponentMove { character, to } => {
            if !opponent_may_act(world) {
                return;
            }
            let from = world.cell_of(character);
            let destination_free = world.occupant(to).is_none();
            match from {
                Some(from) if world.ai_team.contains(character) && destination_free => {
                    relocate(world, character, to);
                    out_events.push(Event::CharacterMoved {
                        character,
                        from,
                        to,
                    });
                    out_events.push(Event::PositionsChanged);
                    pass_turn(world, Side::Player, out_events);
                }
                _ => {
                    warn!(
                        character = character.get(),
                        to = to.get(),
                        "opponent move rejected"
                    );
                    forfeit(world, Some(character), out_events);
                }
            }
        }
        Command::OpponentForfeit { character } => {
            if opponent_may_act(world) {
                forfeit(world, character, out_events);
            }
        }
    }
}

/// Replaces the current game with the provided saved game.
///
/// Every character is rebuilt from its kind and level with its saved
/// attack, defence and health.
/// The new state is assembled completely before it replaces the current one,
/// so a failed restore leaves the world untouched.
pub fn restore(
    world: &mut World,
    saved: &SavedGame,
    out_events: &mut Vec<Event>,
) -> Result<(), LoadError> {
    if !(FIRST_LEVEL..=TERMINAL_LEVEL).contains(&saved.level) {
        return Err(LoadError::InvalidLevel { level: saved.level });
    }

    let mut ids = world.ids.clone();
    let mut player_team = Team::new();
    let mut ai_team = Team::new();
    let mut positions: Vec<PositionedCharacter> = Vec::with_capacity(saved.all_positions.len());

    for entry in &saved.all_positions {
        let kind: CharacterKind = entry.character.kind.parse()?;
        let cell = CellIndex::new(entry.position).ok_or(LoadError::OffBoard {
            position: entry.position,
        })?;
        if positions.iter().any(|existing| existing.cell == cell) {
            return Err(LoadError::DuplicateCell {
                position: entry.position,
            });
        }

        if entry.character.health <= 0.0 {
            return Err(LoadError::DeadCharacter {
                position: entry.position,
            });
        }

        let character = Character::new(ids.allocate(), kind, entry.character.level)
            .with_stats(entry.character.attack, entry.character.defence)
            .with_health(entry.character.health);
        positions.push(PositionedCharacter {
            character: character.id(),
            cell,
        });
        match kind.side() {
            Side::Player => player_team.add_all([character]),
            Side::Ai => ai_team.add_all([character]),
        }
    }

    if saved.level < TERMINAL_LEVEL && !player_team.is_empty() && ai_team.is_empty() {
        return Err(LoadError::MissingOpponents { level: saved.level });
    }

    let selected = saved
        .selected
        .and_then(CellIndex::new)
        .filter(|cell| {
            positions
                .iter()
                .find(|entry| entry.cell == *cell)
                .is_some_and(|entry| player_team.contains(entry.character))
        });

    let previous = world.state.selected;
    world.ids = ids;
    world.player_team = player_team;
    world.ai_team = ai_team;
    world.pending_strike = None;
    world.state = GameState {
        level: saved.level,
        selected,
        is_users_turn: saved.is_users_turn,
        points: saved.points,
        statistics: saved.statistics.clone(),
        positions,
    };
    debug!(level = saved.level, "saved game restored");

    if previous != selected {
        out_events.push(Event::SelectionChanged { previous, selected });
    }
    out_events.push(Event::GameRestored { level: saved.level });
    out_events.push(Event::PositionsChanged);
    if !world.state.is_users_turn && !world.is_over() && !world.ai_team.is_empty() {
        out_events.push(Event::TurnPassed { to: Side::Ai });
    }
    Ok(())
}

fn handle_click(world: &mut World, cell: CellIndex, out_events: &mut Vec<Event>) {
    if world.is_over() || world.pending_strike.is_some() {
        return;
    }

    let occupant = world
        .occupant(cell)
        .map(|character| (character.id(), character.side()));
    let users_turn = world.state.is_users_turn;

    if let Some(origin) = world.state.selected {
        match occupant {
            Some((target, Side::Ai)) if query::is_attack_target(world, cell) => {
                if users_turn {
                    let strike = world
                        .selected_character()
                        .zip(world.ai_team.get(target))
                        .map(|(attacker, victim)| {
                            (attacker.id(), combat::resolve(attacker, victim))
                        });
                    if let Some((attacker, damage)) = strike {
                        commit_strike(
                            world,
                            attacker,
                            target,
                            Side::Player,
                            cell,
                            damage,
                            out_events,
                        );
                    }
                }
                return;
            }
            None if query::is_valid_move(world, cell) => {
                if users_turn {
                    if let Some(character) = world.selected_character().map(Character::id) {
                        relocate(world, character, cell);
                        out_events.push(Event::CharacterMoved {
                            character,
                            from: origin,
                            to: cell,
                        });
                        world.set_selection(None, out_events);
                        out_events.push(Event::PositionsChanged);
                        pass_turn(world, Side::Ai, out_events);
                    }
                }
                return;
            }
            None => {
                if users_turn {
                    out_events.push(Event::ActionRejected {
                        cell,
                        reason: RejectionReason::InvalidMove,
                    });
                }
                return;
            }
            Some(_) => {}
        }
    }

    match occupant {
        None => {}
        Some((_, Side::Player)) => world.set_selection(Some(cell), out_events),
        Some((_, Side::Ai)) => out_events.push(Event::ActionRejected {
            cell,
            reason: RejectionReason::NotYourUnit,
        }),
    }
}

fn commit_strike(
    world: &mut World,
    attacker: CharacterId,
    target: CharacterId,
    side: Side,
    cell: CellIndex,
    damage: Damage,
    out_events: &mut Vec<Event>,
) {
    world.state.is_users_turn = false;
    world.pending_strike = Some(PendingStrike {
        attacker,
        target,
        side,
        damage,
    });
    out_events.push(Event::StrikeCommitted {
        attacker,
        target,
        cell,
        damage,
    });
}

fn resolve_strike(world: &mut World, out_events: &mut Vec<Event>) {
    let Some(strike) = world.pending_strike.take() else {
        return;
    };
    let target_side = strike.side.opponent();

    let cell = world.cell_of(strike.target);
    let outcome = world
        .team_mut(target_side)
        .get_mut(strike.target)
        .map(|target| (combat::apply(target, strike.damage), target.health()));

    match (cell, outcome) {
        (Some(cell), Some((StrikeOutcome::Survived { remaining }, _))) => {
            out_events.push(Event::CharacterDamaged {
                character: strike.target,
                cell,
                remaining_health: remaining,
            });
        }
        (Some(cell), Some((StrikeOutcome::Eliminated, health))) => {
            out_events.push(Event::CharacterDamaged {
                character: strike.target,
                cell,
                remaining_health: health,
            });
            world.state.positions.retain(|entry| entry.character != strike.target);
            let _ = world.team_mut(target_side).delete(strike.target);
            out_events.push(Event::CharacterEliminated {
                character: strike.target,
                side: target_side,
                cell,
            });
            if target_side == Side::Player {
                world.set_selection(None, out_events);
            }
            debug!(
                attacker = strike.attacker.get(),
                target = strike.target.get(),
                "character eliminated"
            );
        }
        _ => {
            debug!(target = strike.target.get(), "strike target left the board");
        }
    }
    out_events.push(Event::PositionsChanged);

    match strike.side {
        Side::Player => {
            check_level(world, out_events);
            if !world.state.is_users_turn && !world.is_over() && !world.ai_team.is_empty() {
                out_events.push(Event::TurnPassed { to: Side::Ai });
            }
        }
        Side::Ai => {
            pass_turn(world, Side::Player, out_events);
            check_level(world, out_events);
        }
    }
}

fn check_level(world: &mut World, out_events: &mut Vec<Event>) {
    if world.state.level >= TERMINAL_LEVEL {
        return;
    }

    if world.player_team.is_empty() {
        let points = world.state.points;
        world.state.statistics.push(points);
        debug!(points, "player roster eliminated");
        out_events.push(Event::Defeat { points });
    } else if world.ai_team.is_empty() {
        world.state.points += world.player_team.total_health();
        let points = world.state.points;

        if world.state.level == FINAL_LEVEL {
            world.state.statistics.push(points);
            let best = world
                .state
                .statistics
                .iter()
                .copied()
                .fold(f32::MIN, f32::max);
            world.state.level = TERMINAL_LEVEL;
            debug!(points, best, "final level cleared");
            out_events.push(Event::Victory { points, best });
        } else {
            let level = world.state.level;
            out_events.push(Event::LevelCleared { level, points });
            world.state.level += 1;
            level_up(world, out_events);
        }
    }
}

fn level_up(world: &mut World, out_events: &mut Vec<Event>) {
    let level = world.state.level;
    world.state.positions.clear();
    world.set_selection(None, out_events);

    for character in world.player_team.iter_mut() {
        character.level_up();
    }

    let (recruit_count, recruit_level) = roster::recruits_for(level);
    let recruits = roster::generate_team(
        &mut world.rng,
        &mut world.ids,
        &CharacterKind::PLAYER,
        recruit_level,
        recruit_count,
    );
    world.player_team.add_all(recruits);

    let opponents = roster::generate_team(
        &mut world.rng,
        &mut world.ids,
        &CharacterKind::AI,
        level,
        world.player_team.size(),
    );
    world.ai_team.add_all(opponents);

    world.place_rosters();
    world.state.is_users_turn = true;
    debug!(
        level,
        player = world.player_team.size(),
        ai = world.ai_team.size(),
        "level started"
    );
    out_events.push(Event::LevelStarted { level });
    out_events.push(Event::PositionsChanged);
}

fn relocate(world: &mut World, character: CharacterId, to: CellIndex) {
    if let Some(entry) = world
        .state
        .positions
        .iter_mut()
        .find(|entry| entry.character == character)
    {
        entry.cell = to;
    }
}

fn pass_turn(world: &mut World, to: Side, out_events: &mut Vec<Event>) {
    world.state.is_users_turn = to == Side::Player;
    out_events.push(Event::TurnPassed { to });
}

fn forfeit(world: &mut World, character: Option<CharacterId>, out_events: &mut Vec<Event>) {
    debug!(character = character.map(|id| id.get()), "opponent forfeits its move");
    out_events.push(Event::MoveForfeited { character });
    pass_turn(world, Side::Player, out_events);
}

fn opponent_may_act(world: &World) -> bool {
    !world.state.is_users_turn && world.pending_strike.is_none() && !world.is_over()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use retro_tactics_core::{
        CellIndex, Character, PositionedSnapshot, PositionsView, Side, TERMINAL_LEVEL,
    };

    use crate::{SavedCharacter, SavedGame, SavedPosition, World};

    /// Level currently being played.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.state.level
    }

    /// Whether the run has ended in defeat or victory.
    #[must_use]
    pub fn is_over(world: &World) -> bool {
        world.is_over()
    }

    /// Whether the final level has been cleared.
    #[must_use]
    pub fn is_won(world: &World) -> bool {
        world.state.level >= TERMINAL_LEVEL
    }

    /// Cell of the selected player character, if any.
    #[must_use]
    pub fn selected(world: &World) -> Option<CellIndex> {
        world.state.selected
    }

    /// Whether the player owns the turn.
    #[must_use]
    pub fn is_users_turn(world: &World) -> bool {
        world.state.is_users_turn
    }

    /// Score accumulated by the current run.
    #[must_use]
    pub fn points(world: &World) -> f32 {
        world.state.points
    }

    /// Final scores of completed runs.
    #[must_use]
    pub fn statistics(world: &World) -> &[f32] {
        &world.state.statistics
    }

    /// Best score recorded so far, if any run has completed.
    #[must_use]
    pub fn best_score(world: &World) -> Option<f32> {
        world.state.statistics.iter().copied().reduce(f32::max)
    }

    /// Number of characters left on one side.
    #[must_use]
    pub fn team_size(world: &World, side: Side) -> usize {
        world.team(side).size()
    }

    /// Whether a strike is waiting for [`retro_tactics_core::Command::ResolveStrike`].
    #[must_use]
    pub fn has_pending_strike(world: &World) -> bool {
        world.pending_strike.is_some()
    }

    /// Captures a read-only snapshot of every positioned character.
    #[must_use]
    pub fn positions(world: &World) -> PositionsView {
        let snapshots = world
            .state
            .positions
            .iter()
            .filter_map(|entry| {
                world
                    .character(entry.character)
                    .map(|character| PositionedSnapshot {
                        character: character.clone(),
                        cell: entry.cell,
                    })
            })
            .collect();
        PositionsView::from_snapshots(snapshots)
    }

    /// Character standing on `cell`, if any.
    #[must_use]
    pub fn character_at(world: &World, cell: CellIndex) -> Option<&Character> {
        world.occupant(cell)
    }

    /// Whether `cell` lies inside the selected character's move range.
    ///
    /// Occupancy is not considered; callers combine it with
    /// [`character_at`].
    #[must_use]
    pub fn is_valid_move(world: &World, cell: CellIndex) -> bool {
        world.within_selected_range(cell, Character::move_range)
    }

    /// Whether `cell` lies inside the selected character's attack range.
    #[must_use]
    pub fn is_attack_target(world: &World, cell: CellIndex) -> bool {
        world.within_selected_range(cell, Character::attack_range)
    }

    /// Serializable snapshot of the current game.
    #[must_use]
    pub fn saved_game(world: &World) -> SavedGame {
        let all_positions = positions(world)
            .into_vec()
            .into_iter()
            .map(|snapshot| SavedPosition {
                character: saved_character(&snapshot.character),
                position: snapshot.cell.get(),
            })
            .collect();

        SavedGame {
            is_users_turn: world.state.is_users_turn,
            level: world.state.level,
            points: world.state.points,
            statistics: world.state.statistics.clone(),
            selected: world.state.selected.map(|cell| cell.get()),
            all_positions,
        }
    }

    fn saved_character(character: &Character) -> SavedCharacter {
        SavedCharacter {
            kind: character.kind().tag().to_owned(),
            level: character.level(),
            health: character.health(),
            attack: character.attack(),
            defence: character.defence(),
            move_range: character.move_range(),
            attack_range: character.attack_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_world_deals_two_against_two() {
        let world = World::with_seed(3);
        let view = query::positions(&world);

        assert_eq!(query::level(&world), FIRST_LEVEL);
        assert!(query::is_users_turn(&world));
        assert_eq!(query::team_size(&world, Side::Player), 2);
        assert_eq!(query::team_size(&world, Side::Ai), 2);
        assert_eq!(view.len(), 4);

        let player_pool = geometry::player_start_cells(BOARD_SIZE);
        let ai_pool = geometry::ai_start_cells(BOARD_SIZE);
        for snapshot in view.side(Side::Player) {
            assert!(player_pool.contains(&snapshot.cell));
            assert!(STARTING_PLAYER_KINDS.contains(&snapshot.character.kind()));
            assert_eq!(snapshot.character.level(), 1);
        }
        for snapshot in view.side(Side::Ai) {
            assert!(ai_pool.contains(&snapshot.cell));
        }
        let mut cells: Vec<CellIndex> = view.occupied_cells().collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn empty_cell_without_selection_is_ignored() {
        let mut world = World::with_seed(3);
        let empty = CellIndex::all()
            .find(|candidate| query::character_at(&world, *candidate).is_none())
            .expect("board has free cells");
        let mut events = Vec::new();

        apply(&mut world, Command::ClickCell { cell: empty }, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::selected(&world), None);
    }

    #[test]
    fn clicking_own_unit_selects_it() {
        let mut world = World::with_seed(5);
        let own = query::positions(&world)
            .side(Side::Player)
            .map(|snapshot| snapshot.cell)
            .next()
            .expect("player unit");
        let mut events = Vec::new();

        apply(&mut world, Command::ClickCell { cell: own }, &mut events);

        assert_eq!(query::selected(&world), Some(own));
        assert_eq!(
            events,
            vec![Event::SelectionChanged {
                previous: None,
                selected: Some(own),
            }]
        );
    }

    #[test]
    fn resolve_without_pending_strike_is_silent() {
        let mut world = World::with_seed(5);
        let mut events = Vec::new();

        apply(&mut world, Command::ResolveStrike, &mut events);

        assert!(events.is_empty());
        assert!(!query::has_pending_strike(&world));
    }

    #[test]
    fn opponent_commands_are_ignored_on_the_players_turn() {
        let mut world = World::with_seed(5);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::OpponentForfeit { character: None },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(query::is_users_turn(&world));
    }

    #[test]
    fn new_game_keeps_statistics() {
        let mut world = World::with_seed(9);
        world.state.statistics.push(42.0);
        world.state.points = 17.0;
        let mut events = Vec::new();

        apply(&mut world, Command::NewGame, &mut events);

        assert_eq!(query::statistics(&world), &[42.0]);
        assert_eq!(query::points(&world), 0.0);
        assert_eq!(query::best_score(&world), Some(42.0));
        assert!(events.contains(&Event::LevelStarted { level: 1 }));
    }
}
