use crate::dictionary::{Dictionary, LetterPool};
use crate::scoring::{self, Move};
use crate::Error;

/// Number of rows and columns on the board
pub const GRID_SIZE: usize = 5;
/// Number of tiles on the board
pub const TILE_COUNT: usize = GRID_SIZE * GRID_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    Player,
    Opponent,
    Unclaimed,
}

impl Ownership {
    pub fn from_tag(tag: char) -> Result<Ownership, Error> {
        match tag.to_ascii_lowercase() {
            'p' => Ok(Ownership::Player),
            'o' => Ok(Ownership::Opponent),
            'u' => Ok(Ownership::Unclaimed),
            _ => Err(Error::InvalidOwnership(tag)),
        }
    }

    pub fn tag(self) -> char {
        match self {
            Ownership::Player => 'p',
            Ownership::Opponent => 'o',
            Ownership::Unclaimed => 'u',
        }
    }
}

/// How the value of a word is weighed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Gain as many points over the opponent as possible
    MaximizeNetScore,
    /// Take tiles from the opponent, and avoid opening up unclaimed tiles
    AvoidSpreading,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::MaximizeNetScore
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// The linear tile index (0.. GRID_SIZE * GRID_SIZE)
    pub index: usize,
    pub letter: char,
    pub ownership: Ownership,
}

impl Tile {
    pub fn row(&self) -> usize {
        self.index / GRID_SIZE
    }

    pub fn col(&self) -> usize {
        self.index % GRID_SIZE
    }
}

/// The state of a board in a given game.
///
/// A grid is never modified: a new one is built for every analyzed screenshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    tiles: Vec<Tile>,
    priority: Priority,
}

impl Grid {
    /// Create a grid from letters and ownership tags in row-major order.
    ///
    /// # Errors
    /// If there are not exactly [TILE_COUNT] letters and tags, or a letter is not alphabetic.
    pub fn new(letters: &[char], ownership: &[Ownership]) -> Result<Grid, Error> {
        if letters.len() != TILE_COUNT {
            return Err(Error::TileCount {
                expected: TILE_COUNT,
                found: letters.len(),
            });
        }
        if ownership.len() != TILE_COUNT {
            return Err(Error::OwnershipCount {
                expected: TILE_COUNT,
                found: ownership.len(),
            });
        }
        if let Some(&bad) = letters.iter().find(|c| !c.is_alphabetic()) {
            return Err(Error::InvalidLetter(bad));
        }
        let letters = letters.iter().map(|c| lowercase(*c));
        Ok(Grid::from_parts(letters.zip(ownership.iter().copied())))
    }

    /// Create a grid from a string of letters and a string of ownership tags
    /// (`p`: player, `o`: opponent, `u`: unclaimed).
    /// # Example
    /// ```
    /// # use letterpress_solver::{Grid, Error};
    /// let grid = Grid::from_strings(
    ///     "catsxyzwvutsrqponmlkjihgf",
    ///     "oooupppppuuuuuuuuuuuuuuuu",
    /// )?;
    /// assert_eq!(grid.opponent_score(), 3);
    /// assert_eq!(grid.player_score(), 5);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_strings(letters: &str, ownership: &str) -> Result<Grid, Error> {
        let letters: Vec<char> = letters.chars().collect();
        let ownership = ownership
            .chars()
            .map(Ownership::from_tag)
            .collect::<Result<Vec<_>, _>>()?;
        Grid::new(&letters, &ownership)
    }

    /// Build a grid from exactly [TILE_COUNT] (letter, ownership) pairs.
    pub(crate) fn from_parts<I>(tiles: I) -> Grid
    where
        I: IntoIterator<Item = (char, Ownership)>,
    {
        let tiles: Vec<Tile> = tiles
            .into_iter()
            .enumerate()
            .map(|(index, (letter, ownership))| Tile {
                index,
                letter,
                ownership,
            })
            .collect();
        debug_assert_eq!(tiles.len(), TILE_COUNT);
        Grid {
            tiles,
            priority: Priority::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Grid {
        self.priority = priority;
        self
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(GRID_SIZE)
    }

    /// All letters on the board in row-major order
    pub fn letters(&self) -> String {
        self.tiles.iter().map(|t| t.letter).collect()
    }

    /// The number of tiles owned by `side`
    pub fn score(&self, side: Ownership) -> usize {
        self.tiles.iter().filter(|t| t.ownership == side).count()
    }

    pub fn player_score(&self) -> usize {
        self.score(Ownership::Player)
    }

    pub fn opponent_score(&self) -> usize {
        self.score(Ownership::Opponent)
    }

    /// The tiles that share an edge with the tile at `index`.
    pub fn neighbours(&self, index: usize) -> impl Iterator<Item = &Tile> {
        let mut found = Vec::with_capacity(4);
        if index < self.tiles.len() {
            let (row, col) = (index / GRID_SIZE, index % GRID_SIZE);
            if row > 0 {
                found.push(&self.tiles[index - GRID_SIZE]);
            }
            if col > 0 {
                found.push(&self.tiles[index - 1]);
            }
            if col + 1 < GRID_SIZE {
                found.push(&self.tiles[index + 1]);
            }
            if row + 1 < GRID_SIZE {
                found.push(&self.tiles[index + GRID_SIZE]);
            }
        }
        found.into_iter()
    }

    /// A tile is defended when it is owned and all its neighbours have the same owner.
    pub fn is_defended(&self, index: usize) -> bool {
        match self.tiles.get(index) {
            Some(tile) if tile.ownership != Ownership::Unclaimed => self
                .neighbours(index)
                .all(|n| n.ownership == tile.ownership),
            _ => false,
        }
    }

    /// Letters on opponent tiles that can still be taken
    pub fn target_letters(&self) -> LetterPool {
        self.tiles
            .iter()
            .filter(|t| t.ownership == Ownership::Opponent && !self.is_defended(t.index))
            .map(|t| t.letter)
            .collect()
    }

    pub fn unclaimed_letters(&self) -> LetterPool {
        self.tiles
            .iter()
            .filter(|t| t.ownership == Ownership::Unclaimed)
            .map(|t| t.letter)
            .collect()
    }

    /// Every letter on the board
    pub fn available_letters(&self) -> LetterPool {
        self.tiles.iter().map(|t| t.letter).collect()
    }

    /// The value of playing `word` with this grid's priority.
    pub fn value_of_word(&self, word: &str) -> Move {
        scoring::value_of_word(self, word, self.priority)
    }

    /// All unique playable words of `dictionary`, best first.
    pub fn best_moves(&self, dictionary: &Dictionary) -> Vec<Move> {
        scoring::best_moves(self, dictionary, self.priority)
    }
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
