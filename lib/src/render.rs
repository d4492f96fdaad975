//! Text rendering of a grid.
use crate::grid::{Grid, Ownership, Tile};
use std::fmt;

/// How a tile is shown, derived from its owner and whether it is defended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTag {
    OpponentDefended,
    Opponent,
    Unclaimed,
    Player,
    PlayerDefended,
}

impl DisplayTag {
    pub fn of(grid: &Grid, tile: &Tile) -> DisplayTag {
        match (tile.ownership, grid.is_defended(tile.index)) {
            (Ownership::Opponent, true) => DisplayTag::OpponentDefended,
            (Ownership::Opponent, false) => DisplayTag::Opponent,
            (Ownership::Unclaimed, _) => DisplayTag::Unclaimed,
            (Ownership::Player, false) => DisplayTag::Player,
            (Ownership::Player, true) => DisplayTag::PlayerDefended,
        }
    }

    /// Brackets drawn around the letter
    fn brackets(self) -> (char, char) {
        match self {
            DisplayTag::OpponentDefended => ('<', '>'),
            DisplayTag::Opponent => ('(', ')'),
            DisplayTag::Unclaimed => (' ', ' '),
            DisplayTag::Player => ('[', ']'),
            DisplayTag::PlayerDefended => ('{', '}'),
        }
    }
}

/// The scores followed by the board, one row per line.
///
/// ```text
///      5 - 3
/// (C)(A)(T) S  X
/// [Y][Z][W][V][U]
/// ...
/// ```
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>6} - {}", self.player_score(), self.opponent_score())?;
        for row in self.rows() {
            writeln!(f)?;
            for tile in row {
                let (open, close) = DisplayTag::of(self, tile).brackets();
                let letter: String = tile.letter.to_uppercase().collect();
                write!(f, "{}{}{}", open, letter, close)?;
            }
        }
        Ok(())
    }
}
