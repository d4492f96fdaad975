//! A library that reads a Letterpress board from a screenshot and finds the best words to play
//!
//! Recognition locates the 5x5 board below the status bar, cuts out every tile, tells its
//! owner from the tile colour and reads its letter by comparing the glyph with a set of
//! reference letters. The move search filters a word list down to the words that can be
//! spelled with the letters on the board and ranks them by how much they change the score.
//!
//! # Basic usage
//! ```no_run
//! # use letterpress_solver::{Dictionary, Recognizer};
//! let bytes = std::fs::read("screenshot.png")?;
//! let grid = Recognizer::new().build_grid_from_image(&bytes)?;
//! println!("{}", grid);
//! let dictionary = Dictionary::from_file("en.txt")?;
//! for mv in grid.best_moves(&dictionary).iter().take(10) {
//!     println!("{}", mv);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//! This example would show the scores and the board, followed by the ten best moves.
//!
//! Where: `(x)` is an opponent tile, `<x>` a defended opponent tile, `[x]` a player tile,
//! `{x}` a defended player tile and ` x ` an unclaimed tile.
//!
//! ```text
//!      5 - 3
//! (C)(A)(T) S  X
//! [Y][Z][W][V][U]
//!  T  S  R  Q  P
//!  O  N  M  L  K
//!  J  I  H  G  F
//! ```

mod config;
mod dictionary;
mod error;
mod grid;
mod layout;
mod letters;
mod recognizer;
mod render;
mod scoring;
mod theme;
mod tiles;
mod utils;

pub use config::{
    Config, ACCEPTANCE_THRESHOLD, BLUR_SIGMA, BOUNDARY_TOLERANCE, CONFIDENCE_MARGIN,
    CONTRAST_CUTOFF, CONTRAST_FACTOR, EDGE_WIGGLE, HOMOGENEITY_TOLERANCE, STATUS_BAR_MARGIN,
    TILE_MARGIN,
};
pub use dictionary::{word_is_playable, Dictionary, LetterPool, DEFAULT_LOCALE};
pub use error::{Error, VisionError};
pub use grid::{Grid, Ownership, Priority, Tile, GRID_SIZE, TILE_COUNT};
pub use layout::Layout;
pub use letters::{
    decide, reference_glyph, LetterBank, LetterInvariant, LetterMatch, INVARIANT_SIZE,
};
pub use recognizer::{build_grid_from_image, RecognizedTile, Recognition, Recognizer};
pub use render::DisplayTag;
pub use scoring::{best_moves, score_word, value_of_word, Move, Score};
pub use theme::{closest_colour, colour_diff, Palette, Shade, Theme, SHADES, THEMES};
pub use tiles::{extract_tile, normalize_glyph, TileImage};
pub use utils::{collage, save_glyphs};
