//! Text presenter that renders the board as a grid of characters.

use std::{collections::BTreeMap, fmt::Write as _};

use retro_tactics_core::{
    geometry, CellCoord, CellIndex, CharacterKind, Damage, PositionedSnapshot, BOARD_SIZE,
};
use retro_tactics_rendering::{Color, Cursor, Highlight, Presenter, Theme};

/// Amount by which every other tile is lightened to form a checkerboard.
const CHECKER_LIGHTEN: f32 = 0.18;
const ANSI_RESET: &str = "\x1b[0m";
const COLUMN_LABELS: &str = "abcdefgh";

/// Presenter that accumulates board state and notices until the next report.
#[derive(Debug)]
pub(crate) struct TerminalPresenter {
    colored: bool,
    theme: Theme,
    positions: Vec<PositionedSnapshot>,
    highlights: BTreeMap<CellIndex, Highlight>,
    cursor: Cursor,
    cursor_changed: bool,
    notices: Vec<String>,
    board_changed: bool,
}

impl TerminalPresenter {
    /// Creates a presenter; `colored` enables ANSI tile backgrounds.
    pub(crate) fn new(colored: bool) -> Self {
        Self {
            colored,
            theme: Theme::Prairie,
            positions: Vec::new(),
            highlights: BTreeMap::new(),
            cursor: Cursor::Auto,
            cursor_changed: false,
            notices: Vec::new(),
            board_changed: false,
        }
    }

    /// Requests that the board is printed with the next report.
    pub(crate) fn request_board(&mut self) {
        self.board_changed = true;
    }

    /// Everything presented since the previous report.
    pub(crate) fn take_report(&mut self) -> String {
        let mut report = String::new();
        if std::mem::take(&mut self.board_changed) {
            report.push_str(&self.render_board());
        }
        for notice in self.notices.drain(..) {
            report.push_str(&notice);
            report.push('\n');
        }
        if std::mem::take(&mut self.cursor_changed) {
            let _ = writeln!(report, "cursor: {}", cursor_name(self.cursor));
        }
        report
    }

    /// Board with column letters and row numbers.
    pub(crate) fn render_board(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.theme.name(), legend());
        out.push_str("   ");
        for label in COLUMN_LABELS.chars() {
            let _ = write!(out, " {label} ");
        }
        out.push('\n');

        for row in 0..BOARD_SIZE {
            let _ = write!(out, "{:>2} ", row + 1);
            for column in 0..BOARD_SIZE {
                let Some(cell) = geometry::index_of(CellCoord::new(row, column)) else {
                    continue;
                };
                self.render_cell(&mut out, cell, (row + column) % 2 == 1);
            }
            out.push('\n');
        }
        out
    }

    fn render_cell(&self, out: &mut String, cell: CellIndex, light: bool) {
        let highlight = self.highlights.get(&cell).copied();
        let (open, close) = match highlight {
            Some(Highlight::Selected) => ('[', ']'),
            Some(Highlight::Move) => ('(', ')'),
            Some(Highlight::Attack) => ('>', '<'),
            None => (' ', ' '),
        };
        let glyph = self
            .positions
            .iter()
            .find(|snapshot| snapshot.cell == cell)
            .map_or('.', |snapshot| glyph(snapshot.character.kind()));

        if self.colored {
            let ground = self.theme.ground();
            let tile = match highlight {
                Some(highlight) => highlight.color(),
                None if light => ground.lighten(CHECKER_LIGHTEN),
                None => ground,
            };
            let _ = write!(out, "{}{open}{glyph}{close}{ANSI_RESET}", background(tile));
        } else {
            let _ = write!(out, "{open}{glyph}{close}");
        }
    }
}

impl Presenter for TerminalPresenter {
    fn draw_board(&mut self, theme: Theme) {
        self.theme = theme;
        self.positions.clear();
        self.highlights.clear();
        self.board_changed = true;
    }

    fn redraw_positions(&mut self, positions: &[PositionedSnapshot]) {
        self.positions = positions.to_vec();
        self.board_changed = true;
    }

    fn highlight_cell(&mut self, cell: CellIndex, highlight: Highlight) {
        let _ = self.highlights.insert(cell, highlight);
        self.board_changed = true;
    }

    fn clear_highlight(&mut self, cell: CellIndex) {
        if self.highlights.remove(&cell).is_some() {
            self.board_changed = true;
        }
    }

    fn show_tooltip(&mut self, text: &str, cell: CellIndex) {
        self.notices.push(format!("{}: {text}", cell_label(cell)));
    }

    fn hide_tooltip(&mut self, _cell: CellIndex) {}

    fn set_cursor(&mut self, cursor: Cursor) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.cursor_changed = true;
        }
    }

    fn show_message(&mut self, text: &str) {
        self.notices.push(text.to_owned());
    }

    fn show_error(&mut self, text: &str) {
        self.notices.push(format!("! {text}"));
    }

    fn show_damage(&mut self, cell: CellIndex, damage: Damage) {
        self.notices.push(format!("{} takes {damage} damage", cell_label(cell)));
    }
}

/// Letter-and-number name of a cell, `a1` being the top-left corner.
pub(crate) fn cell_label(cell: CellIndex) -> String {
    let coord = geometry::coord_of(cell);
    let column = COLUMN_LABELS
        .chars()
        .nth(coord.column() as usize)
        .unwrap_or('?');
    format!("{column}{}", coord.row() + 1)
}

fn glyph(kind: CharacterKind) -> char {
    match kind {
        CharacterKind::Bowman => 'B',
        CharacterKind::Swordsman => 'S',
        CharacterKind::Magician => 'M',
        CharacterKind::Vampire => 'v',
        CharacterKind::Undead => 'u',
        CharacterKind::Daemon => 'd',
    }
}

fn legend() -> String {
    CharacterKind::ALL
        .iter()
        .map(|kind| format!("{}={kind}", glyph(*kind)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn cursor_name(cursor: Cursor) -> &'static str {
    match cursor {
        Cursor::Auto => "auto",
        Cursor::Pointer => "pointer",
        Cursor::Crosshair => "crosshair",
        Cursor::NotAllowed => "not-allowed",
    }
}

fn background(color: Color) -> String {
    let (red, green, blue) = color.to_rgb_u8();
    format!("\x1b[48;2;{red};{green};{blue}m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_tactics_core::{Character, CharacterId};

    fn cell(value: u32) -> CellIndex {
        CellIndex::new(value).expect("cell on board")
    }

    fn snapshot(kind: CharacterKind, position: u32) -> PositionedSnapshot {
        PositionedSnapshot {
            character: Character::new(CharacterId::new(position), kind, 1),
            cell: cell(position),
        }
    }

    #[test]
    fn labels_start_in_the_top_left_corner() {
        assert_eq!(cell_label(cell(0)), "a1");
        assert_eq!(cell_label(cell(9)), "b2");
        assert_eq!(cell_label(cell(63)), "h8");
    }

    #[test]
    fn plain_board_marks_units_and_highlights() {
        let mut presenter = TerminalPresenter::new(false);
        presenter.draw_board(Theme::Desert);
        presenter.redraw_positions(&[
            snapshot(CharacterKind::Bowman, 0),
            snapshot(CharacterKind::Daemon, 9),
        ]);
        presenter.highlight_cell(cell(0), Highlight::Selected);
        presenter.highlight_cell(cell(9), Highlight::Attack);
        presenter.highlight_cell(cell(2), Highlight::Move);

        let board = presenter.render_board();
        let rows: Vec<&str> = board.lines().collect();

        assert!(rows[0].starts_with("desert"));
        assert_eq!(rows[2], " 1 [B] . (.) .  .  .  .  . ");
        assert_eq!(rows[3], " 2  . >d< .  .  .  .  .  . ");
        assert_eq!(rows.len(), 2 + BOARD_SIZE as usize);
    }

    #[test]
    fn report_collects_notices_once() {
        let mut presenter = TerminalPresenter::new(false);
        presenter.show_message("Level 1");
        presenter.show_error("Invalid move");
        presenter.show_damage(cell(9), Damage::new(15.0));
        presenter.set_cursor(Cursor::Crosshair);

        assert_eq!(
            presenter.take_report(),
            "Level 1\n! Invalid move\nb2 takes 15.0 damage\ncursor: crosshair\n"
        );
        assert_eq!(presenter.take_report(), "");
    }

    #[test]
    fn colored_tiles_use_theme_ground() {
        let mut presenter = TerminalPresenter::new(true);
        presenter.draw_board(Theme::Arctic);

        let board = presenter.render_board();
        assert!(board.contains(&background(Theme::Arctic.ground())));
        assert!(board.contains(&background(Theme::Arctic.ground().lighten(CHECKER_LIGHTEN))));
        assert!(board.contains(ANSI_RESET));
    }
}
