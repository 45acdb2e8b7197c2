#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Retro Tactics adapters.
//!
//! The engine drives every adapter through the [`Presenter`] trait and never
//! inspects what the adapter draws. Themes, cursors and highlight colours are
//! described here as plain data so each adapter can map them onto its own
//! output.

use retro_tactics_core::{CellIndex, Character, Damage, PositionedSnapshot};

/// RGBA color used when presenting cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color back into byte RGB values, dropping alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn channel_to_u8(channel: f32) -> u8 {
    // Clamped to 0..=255 before the cast.
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Board art used for a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Level one.
    Prairie,
    /// Level two.
    Desert,
    /// Level three.
    Arctic,
    /// Level four and the finished game.
    Mountain,
}

impl Theme {
    /// Theme drawn for `level`; levels past the last one keep its theme.
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => Self::Prairie,
            2 => Self::Desert,
            3 => Self::Arctic,
            _ => Self::Mountain,
        }
    }

    /// Lowercase name of the theme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prairie => "prairie",
            Self::Desert => "desert",
            Self::Arctic => "arctic",
            Self::Mountain => "mountain",
        }
    }

    /// Base tile color of the theme.
    #[must_use]
    pub const fn ground(self) -> Color {
        match self {
            Self::Prairie => Color::from_rgb_u8(96, 148, 72),
            Self::Desert => Color::from_rgb_u8(214, 180, 112),
            Self::Arctic => Color::from_rgb_u8(196, 220, 236),
            Self::Mountain => Color::from_rgb_u8(120, 116, 112),
        }
    }
}

/// Pointer shape requested by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Default arrow.
    Auto,
    /// Hand over selectable units and legal moves.
    Pointer,
    /// Crosshair over attackable enemies.
    Crosshair,
    /// Forbidden sign over unreachable cells.
    NotAllowed,
}

/// Purpose of a highlighted cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// The selected player character.
    Selected,
    /// A legal move destination.
    Move,
    /// An attackable enemy.
    Attack,
}

impl Highlight {
    /// Outline color of the highlight.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Selected => Color::from_rgb_u8(236, 200, 40),
            Self::Move => Color::from_rgb_u8(64, 200, 96),
            Self::Attack => Color::from_rgb_u8(220, 56, 48),
        }
    }
}

/// Stats tooltip shown when hovering a character: level, attack, defence and
/// health.
#[must_use]
pub fn tooltip(character: &Character) -> String {
    format!(
        "\u{1F396}{}\u{2694}{}\u{1F6E1}{}\u{2764}{}",
        character.level(),
        character.attack(),
        character.defence(),
        character.health()
    )
}

/// Output surface driven by the engine.
///
/// Calls arrive in the order the engine decided them; adapters render them
/// as they see fit.
pub trait Presenter {
    /// Redraws the empty board with the provided theme.
    fn draw_board(&mut self, theme: Theme);

    /// Replaces every drawn character with the provided snapshots.
    fn redraw_positions(&mut self, positions: &[PositionedSnapshot]);

    /// Highlights a cell.
    fn highlight_cell(&mut self, cell: CellIndex, highlight: Highlight);

    /// Removes any highlight from a cell.
    fn clear_highlight(&mut self, cell: CellIndex);

    /// Shows a tooltip attached to a cell.
    fn show_tooltip(&mut self, text: &str, cell: CellIndex);

    /// Hides the tooltip attached to a cell.
    fn hide_tooltip(&mut self, cell: CellIndex);

    /// Changes the pointer shape.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Shows an informational message.
    fn show_message(&mut self, text: &str);

    /// Shows a rejected-action or failure notice.
    fn show_error(&mut self, text: &str);

    /// Plays the damage animation on a cell and returns once it finished.
    fn show_damage(&mut self, cell: CellIndex, damage: Damage);
}
