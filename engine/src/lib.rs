#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session layer that drives a Retro Tactics game.
//!
//! [`TurnEngine`] owns the authoritative world, the opponent system, an
//! adapter-provided [`Presenter`] and a [`StateStore`]. Adapter input is
//! converted into commands, every resulting event is presented, and the
//! opponent is fed the same events so its replies are applied before control
//! returns to the adapter.

mod store;

use std::collections::VecDeque;

use retro_tactics_core::{CellIndex, Command, Event, RejectionReason, Side};
use retro_tactics_rendering::{tooltip, Cursor, Highlight, Presenter, Theme};
use retro_tactics_system_opponent::Opponent;
use retro_tactics_world::{self as world, query, LoadError, World};
use thiserror::Error;
use tracing::{debug, warn};

pub use store::{MemoryStore, StateStore, StoreError};

/// Session settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    seed: u64,
}

impl Config {
    /// Creates a configuration with the provided seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed shared by roster generation and the opponent's random choices.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Failures reported by [`TurnEngine::save`] and [`TurnEngine::load`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The store holds no saved game.
    #[error("no saved game to load")]
    NothingSaved,
    /// The store backend failed.
    #[error("state store failed")]
    Store(#[from] StoreError),
    /// The saved game could not be restored.
    #[error("saved game is invalid")]
    Load(#[from] LoadError),
}

/// Game session connecting the world, the opponent, a presenter and a store.
#[derive(Debug)]
pub struct TurnEngine<P, S> {
    world: World,
    opponent: Opponent,
    presenter: P,
    store: S,
    hover_marks: Vec<CellIndex>,
}

impl<P, S> TurnEngine<P, S>
where
    P: Presenter,
    S: StateStore,
{
    /// Creates a session whose world and opponent are seeded from `config`.
    pub fn new(config: &Config, presenter: P, store: S) -> Self {
        Self::from_parts(
            World::with_seed(config.seed()),
            Opponent::seeded(config.seed()),
            presenter,
            store,
        )
    }

    /// Assembles a session from prepared collaborators.
    pub fn from_parts(world: World, opponent: Opponent, presenter: P, store: S) -> Self {
        Self {
            world,
            opponent,
            presenter,
            store,
            hover_marks: Vec::new(),
        }
    }

    /// Draws the current level for the first time.
    pub fn start(&mut self) {
        let level = query::level(&self.world);
        self.presenter.draw_board(Theme::for_level(level));
        self.redraw();
        if let Some(cell) = query::selected(&self.world) {
            self.presenter.highlight_cell(cell, Highlight::Selected);
        }
        self.presenter.show_message(&format!("Level {level}"));
    }

    /// Handles a click on `cell`, including the opponent's reply.
    pub fn click(&mut self, cell: CellIndex) {
        self.dispatch(Command::ClickCell { cell });
    }

    /// Shows cursor, highlight and tooltip feedback for the pointer entering
    /// `cell`.
    pub fn hover(&mut self, cell: CellIndex) {
        let occupant = query::character_at(&self.world, cell);
        let selected = query::selected(&self.world);

        if let Some(character) = occupant {
            let text = tooltip(character);
            self.presenter.show_tooltip(&text, cell);
        }

        match occupant.map(|character| character.side()) {
            Some(Side::Player) => self.presenter.set_cursor(Cursor::Pointer),
            Some(Side::Ai) if selected.is_some() && query::is_attack_target(&self.world, cell) => {
                self.presenter.set_cursor(Cursor::Crosshair);
                self.mark(cell, Highlight::Attack);
            }
            None if selected.is_some() && query::is_valid_move(&self.world, cell) => {
                self.presenter.set_cursor(Cursor::Pointer);
                self.mark(cell, Highlight::Move);
            }
            _ if selected.is_some() => self.presenter.set_cursor(Cursor::NotAllowed),
            _ => {}
        }
    }

    /// Clears the feedback shown for the pointer leaving `cell`.
    pub fn leave(&mut self, cell: CellIndex) {
        self.presenter.hide_tooltip(cell);
        self.presenter.set_cursor(Cursor::Auto);

        for marked in std::mem::take(&mut self.hover_marks) {
            self.presenter.clear_highlight(marked);
        }
    }

    /// Abandons the current run and deals a fresh first level.
    pub fn new_game(&mut self) {
        self.dispatch(Command::NewGame);
    }

    /// Stores the current game.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let saved = query::saved_game(&self.world);
        match self.store.save(&saved) {
            Ok(()) => {
                self.presenter.show_message("Game saved");
                Ok(())
            }
            Err(error) => {
                warn!(%error, "saving the game failed");
                self.presenter.show_error("Save failed");
                Err(error.into())
            }
        }
    }

    /// Replaces the current game with the stored one.
    ///
    /// On failure the current game is left untouched and a notice is shown.
    pub fn load(&mut self) -> Result<(), SessionError> {
        self.presenter.show_message("Loading game");
        match self.restore_from_store() {
            Ok(()) => Ok(()),
            Err(error) => {
                warn!(%error, "loading the game failed");
                self.presenter.show_error("Load failed");
                Err(error)
            }
        }
    }

    /// Authoritative world of the session.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Presenter driven by the session.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the presenter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Store used by save and load.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn restore_from_store(&mut self) -> Result<(), SessionError> {
        let saved = self.store.load()?.ok_or(SessionError::NothingSaved)?;
        let mut events = Vec::new();
        world::restore(&mut self.world, &saved, &mut events)?;
        self.hover_marks.clear();

        let mut queue = VecDeque::new();
        self.settle(&events, &mut queue);
        self.drain(queue);
        Ok(())
    }

    fn dispatch(&mut self, command: Command) {
        self.drain(VecDeque::from([command]));
    }

    fn drain(&mut self, mut queue: VecDeque<Command>) {
        while let Some(command) = queue.pop_front() {
            debug!(?command, "dispatching command");
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);
            self.settle(&events, &mut queue);
        }
    }

    fn settle(&mut self, events: &[Event], queue: &mut VecDeque<Command>) {
        for event in events {
            self.present(event);
            if matches!(event, Event::StrikeCommitted { .. }) {
                queue.push_back(Command::ResolveStrike);
            }
        }

        let view = query::positions(&self.world);
        let mut commands = Vec::new();
        self.opponent.handle(events, &view, &mut commands);
        queue.extend(commands);
    }

    fn present(&mut self, event: &Event) {
        match event {
            Event::LevelStarted { level } => {
                self.presenter.draw_board(Theme::for_level(*level));
                self.presenter.show_message(&format!("Level {level}"));
            }
            Event::SelectionChanged { previous, selected } => {
                if let Some(cell) = previous {
                    self.presenter.clear_highlight(*cell);
                }
                if let Some(cell) = selected {
                    self.presenter.highlight_cell(*cell, Highlight::Selected);
                }
            }
            Event::StrikeCommitted { cell, damage, .. } => {
                self.presenter.show_damage(*cell, *damage);
            }
            Event::CharacterEliminated { cell, .. } => {
                self.presenter.clear_highlight(*cell);
            }
            Event::PositionsChanged => self.redraw(),
            Event::ActionRejected { reason, .. } => {
                self.presenter.show_error(rejection_notice(*reason));
            }
            Event::LevelCleared { level, points } => {
                self.presenter
                    .show_message(&format!("Level {level} complete. Points: {points}"));
            }
            Event::Defeat { points } => {
                self.presenter
                    .show_message(&format!("Defeat. Points: {points}"));
            }
            Event::Victory { points, best } => {
                self.presenter
                    .show_message(&format!("Victory! Points: {points}, best score: {best}"));
            }
            Event::GameRestored { level } => {
                self.presenter.draw_board(Theme::for_level(*level));
                if let Some(cell) = query::selected(&self.world) {
                    self.presenter.highlight_cell(cell, Highlight::Selected);
                }
            }
            Event::CharacterMoved { .. }
            | Event::MoveForfeited { .. }
            | Event::CharacterDamaged { .. }
            | Event::TurnPassed { .. } => {}
        }
    }

    fn redraw(&mut self) {
        let snapshots = query::positions(&self.world).into_vec();
        self.presenter.redraw_positions(&snapshots);
    }

    fn mark(&mut self, cell: CellIndex, highlight: Highlight) {
        self.presenter.highlight_cell(cell, highlight);
        if !self.hover_marks.contains(&cell) {
            self.hover_marks.push(cell);
        }
    }
}

fn rejection_notice(reason: RejectionReason) -> &'static str {
    match reason {
        RejectionReason::InvalidMove => "Invalid move",
        RejectionReason::NotYourUnit => "That is not your character",
    }
}
