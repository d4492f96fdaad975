use std::io;
use thiserror::Error;

/// Reasons why a screenshot could not be turned into a board.
///
/// None of these are recovered from: the caller has to submit another image.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Image of {width}x{height} is not narrow enough to contain a board")]
    NotNarrowEnough { width: u32, height: u32 },
    #[error("Could not find the top of the board")]
    GridNotFound,
    /// The tile background could not be resolved to black or white, usually because the tile
    /// has already been picked.
    #[error("Tile {0} is not clean")]
    UncleanTile(usize),
    #[error("Too little confidence: {best:?} is hardly better than {runner_up:?} (ratio {ratio:.2})")]
    TooLittleConfidence {
        best: char,
        runner_up: char,
        ratio: f32,
    },
    /// The tile colours can not be classified because no theme was shortlisted
    #[error("No theme to classify tile colours with")]
    NoTheme,
    /// Error decoding image
    #[error("Image could not be decoded")]
    ImageError(#[from] image::error::ImageError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error("A board needs {expected} letters, got {found}")]
    TileCount { expected: usize, found: usize },
    #[error("A board needs {expected} ownership tags, got {found}")]
    OwnershipCount { expected: usize, found: usize },
    #[error("Invalid letter {0:?}")]
    InvalidLetter(char),
    #[error("Invalid ownership tag {0:?}, expected one of 'p', 'o', 'u'")]
    InvalidOwnership(char),
    #[error("The dictionary is empty")]
    EmptyDictionary,
    /// Error composing or saving an image
    #[error("Image could not be written")]
    ImageWriteError(#[source] image::error::ImageError),
    /// Error reading wordfile
    #[error("Wordlist could not be read")]
    WordlistReadError(#[from] io::Error),
}
