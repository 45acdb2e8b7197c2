//! Parsing of the interactive commands typed at the prompt.

use std::str::FromStr;

use retro_tactics_core::{geometry, CellCoord, CellIndex, BOARD_SIZE};
use thiserror::Error;

/// Help text printed for the `help` command and unknown input.
pub(crate) const HELP: &str = "\
commands:
  click <cell>   select, move or attack (cell as `c4` or an index 0-63)
  hover <cell>   show the feedback for pointing at a cell
  leave <cell>   clear the feedback for a cell
  new            start a new game
  save           write the game to the save file
  load           restore the game from the save file
  board          print the board
  help           show this text
  quit           leave the game";

/// One line of user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Click(CellIndex),
    Hover(CellIndex),
    Leave(CellIndex),
    NewGame,
    Save,
    Load,
    Board,
    Help,
    Quit,
}

/// Reasons a line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The line was blank.
    #[error("type a command, or `help` to list them")]
    Blank,
    /// The first word is not a command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// A cell command was given no cell.
    #[error("`{0}` needs a cell")]
    MissingCell(&'static str),
    /// The cell argument does not name a board cell.
    #[error("`{0}` is not a board cell")]
    InvalidCell(String),
    /// Extra words followed a complete command.
    #[error("unexpected `{0}`")]
    Trailing(String),
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(InputError::Blank)?;
        let lowered = command.to_ascii_lowercase();

        let input = match lowered.as_str() {
            "click" | "c" => Self::Click(cell_argument("click", words.next())?),
            "hover" | "h" => Self::Hover(cell_argument("hover", words.next())?),
            "leave" | "l" => Self::Leave(cell_argument("leave", words.next())?),
            "new" => Self::NewGame,
            "save" => Self::Save,
            "load" => Self::Load,
            "board" | "b" => Self::Board,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(InputError::UnknownCommand(command.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(InputError::Trailing(extra.to_owned())),
            None => Ok(input),
        }
    }
}

fn cell_argument(command: &'static str, word: Option<&str>) -> Result<CellIndex, InputError> {
    let word = word.ok_or(InputError::MissingCell(command))?;
    parse_cell(word).ok_or_else(|| InputError::InvalidCell(word.to_owned()))
}

/// Accepts either a linear index or a column letter followed by a row number.
fn parse_cell(word: &str) -> Option<CellIndex> {
    if let Ok(index) = word.parse::<u32>() {
        return CellIndex::new(index);
    }

    let mut chars = word.chars();
    let column = chars.next()?.to_ascii_lowercase();
    if !column.is_ascii_lowercase() {
        return None;
    }
    let column = u32::from(column) - u32::from('a');
    let row: u32 = chars.as_str().parse().ok()?;
    if row == 0 || row > BOARD_SIZE {
        return None;
    }
    geometry::index_of(CellCoord::new(row - 1, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: u32) -> CellIndex {
        CellIndex::new(value).expect("cell on board")
    }

    #[test]
    fn cells_parse_from_labels_and_indices() {
        assert_eq!("click a1".parse(), Ok(Input::Click(cell(0))));
        assert_eq!("click B2".parse(), Ok(Input::Click(cell(9))));
        assert_eq!("hover 63".parse(), Ok(Input::Hover(cell(63))));
        assert_eq!("l h8".parse(), Ok(Input::Leave(cell(63))));
    }

    #[test]
    fn plain_commands_parse() {
        assert_eq!("new".parse(), Ok(Input::NewGame));
        assert_eq!("  SAVE ".parse(), Ok(Input::Save));
        assert_eq!("load".parse(), Ok(Input::Load));
        assert_eq!("board".parse(), Ok(Input::Board));
        assert_eq!("?".parse(), Ok(Input::Help));
        assert_eq!("quit".parse(), Ok(Input::Quit));
    }

    #[test]
    fn bad_lines_explain_themselves() {
        assert_eq!("".parse::<Input>(), Err(InputError::Blank));
        assert_eq!(
            "jump a1".parse::<Input>(),
            Err(InputError::UnknownCommand("jump".to_owned()))
        );
        assert_eq!("click".parse::<Input>(), Err(InputError::MissingCell("click")));
        assert_eq!(
            "click i1".parse::<Input>(),
            Err(InputError::InvalidCell("i1".to_owned()))
        );
        assert_eq!(
            "click a9".parse::<Input>(),
            Err(InputError::InvalidCell("a9".to_owned()))
        );
        assert_eq!(
            "click 64".parse::<Input>(),
            Err(InputError::InvalidCell("64".to_owned()))
        );
        assert_eq!(
            "save now".parse::<Input>(),
            Err(InputError::Trailing("now".to_owned()))
        );
    }
}
