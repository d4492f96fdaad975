use crate::config::Config;
use crate::error::VisionError;
use crate::grid::{Grid, GRID_SIZE};
use crate::layout::Layout;
use crate::letters::LetterBank;
use crate::theme::{Palette, Shade};
use crate::tiles::{extract_tile, TileImage};
use image::RgbImage;
use log::debug;
use rayon::prelude::*;
use std::fmt;
use std::path::Path;

/// A recognized tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecognizedTile {
    pub letter: char,
    pub shade: Shade,
    /// Disagreement with the reference glyph of `letter`
    pub disagreement: f32,
}

/// Holds the result of recognize: the located board, the themes it may be drawn in and the
/// recognized tiles in row-major order.
#[derive(Debug, Clone)]
pub struct Recognition {
    pub layout: Layout,
    pub themes: Vec<&'static str>,
    pub tiles: Vec<RecognizedTile>,
}

impl Recognition {
    pub fn grid(&self) -> Grid {
        Grid::from_parts(
            self.tiles
                .iter()
                .map(|t| (t.letter, t.shade.ownership())),
        )
    }
}

impl fmt::Display for Recognition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self
            .tiles
            .chunks(GRID_SIZE)
            .map(|row| {
                row.iter()
                    .map(|t| format!("{}{}", t.letter, t.shade.ownership().tag()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{}", rows)
    }
}

/// Letterpress screenshot recognizer
///
/// The reference letters are built once; a recognizer can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    pub letters: LetterBank,
    pub config: Config,
}

impl Recognizer {
    pub fn new() -> Recognizer {
        Recognizer::default()
    }

    pub fn with_config(mut self, config: Config) -> Recognizer {
        self.config = config;
        self
    }

    pub fn with_letters(mut self, letters: LetterBank) -> Recognizer {
        self.letters = letters;
        self
    }

    /// Locate the board and cut out every tile, normalized for classification.
    ///
    /// # Errors
    /// * The board can not be located
    /// * A tile is not clean. If several are, the lowest index is reported.
    pub fn normalized_tiles(&self, img: &RgbImage) -> Result<(Layout, Vec<TileImage>), VisionError> {
        let layout = Layout::locate(img, &self.config)?;
        let cells = layout.get_cells();
        let tiles = cells
            .par_iter()
            .enumerate()
            .map(|(index, &cell)| extract_tile(img, cell, index, &self.config))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        Ok((layout, tiles))
    }

    /// Recognize a Letterpress screenshot.
    ///
    /// The recognition process consists of these phases:
    /// 1. Locate the board below the status bar
    /// 2. Cut out the tiles and normalize their glyphs
    /// 3. Shortlist the themes from the background colour and classify each tile colour
    /// 4. Match each glyph with the reference letters
    ///
    /// # Errors
    /// Any [VisionError] except `ImageError`; there is no partial result.
    pub fn recognize(&self, img: &RgbImage) -> Result<Recognition, VisionError> {
        let (layout, tiles) = self.normalized_tiles(img)?;
        let palette = Palette::from_background(layout.background);
        let letters = tiles
            .par_iter()
            .map(|tile| self.letters.classify(&tile.glyph, &self.config))
            .collect::<Vec<_>>();

        let mut recognized = Vec::with_capacity(tiles.len());
        for (tile, letter) in tiles.iter().zip(letters) {
            let letter = letter.map_err(|err| {
                debug!("tile {}: {}", tile.index, err);
                err
            })?;
            let shade = palette
                .classify(tile.background)
                .ok_or(VisionError::NoTheme)?;
            debug!(
                "tile {}: {:?} ({:.3}) {:?}",
                tile.index, letter.letter, letter.disagreement, shade
            );
            recognized.push(RecognizedTile {
                letter: letter.letter,
                shade,
                disagreement: letter.disagreement,
            });
        }
        Ok(Recognition {
            layout,
            themes: palette.theme_names(),
            tiles: recognized,
        })
    }

    /// Build a grid from an encoded image (PNG or JPEG).
    pub fn build_grid_from_image(&self, image_bytes: &[u8]) -> Result<Grid, VisionError> {
        let img = image::load_from_memory(image_bytes)?.into_rgb8();
        Ok(self.recognize(&img)?.grid())
    }

    pub fn build_grid_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Grid, VisionError> {
        let img = image::open(path)?.into_rgb8();
        Ok(self.recognize(&img)?.grid())
    }
}

/// Build a grid from an encoded image with the default recognizer.
///
/// Constructing a [Recognizer] decodes the reference letters; keep one around when
/// recognizing many images.
pub fn build_grid_from_image(image_bytes: &[u8]) -> Result<Grid, VisionError> {
    Recognizer::new().build_grid_from_image(image_bytes)
}
