use crate::tiles::TileImage;
use crate::Error;
use image::imageops::{resize, FilterType};
use image::{GenericImage, GrayImage, ImageBuffer};
use log::info;
use std::path::{Path, PathBuf};

/// Create a collage of normalized tile glyphs, `maxcols` per row.
///
/// Glyphs that differ in size from the first one are resized to match it.
pub fn collage(tiles: &[TileImage], maxcols: Option<u32>) -> Result<GrayImage, Error> {
    if tiles.is_empty() {
        return Ok(GrayImage::new(0, 0));
    }
    let ntiles = tiles.len() as u32;
    let ncols = maxcols.unwrap_or(5).max(1).min(ntiles);
    let nrows = (ntiles + ncols - 1) / ncols;
    let (w, h) = tiles[0].glyph.dimensions();
    let mut collage: GrayImage = ImageBuffer::new(w * ncols, h * nrows);
    for (i, tile) in tiles.iter().enumerate() {
        let (row, col) = (i as u32 / ncols, i as u32 % ncols);
        let mut dest = collage.sub_image(col * w, row * h, w, h);
        let src = &tile.glyph;
        if src.dimensions() != (w, h) {
            let resized = resize(src, w, h, FilterType::Nearest);
            dest.copy_from(&resized, 0, 0).map_err(Error::ImageWriteError)?;
        } else {
            dest.copy_from(src, 0, 0).map_err(Error::ImageWriteError)?;
        }
    }
    Ok(collage)
}

/// Save the glyphs of a screenshot with known `letters` as reference images.
///
/// Letters that already have an image in `savedir` are skipped, as are repeats. Returns the
/// paths that were written.
pub fn save_glyphs<P: AsRef<Path>>(
    savedir: P,
    tiles: &[TileImage],
    letters: &str,
) -> Result<Vec<PathBuf>, Error> {
    let mut saved = Vec::new();
    for (tile, letter) in tiles.iter().zip(letters.chars()) {
        let mut path = PathBuf::new();
        path.push(savedir.as_ref());
        path.push(format!("{}.png", letter.to_uppercase()));
        if path.exists() {
            continue;
        }
        info!("save {}", path.display());
        tile.glyph
            .save(&path)
            .map_err(Error::ImageWriteError)?;
        saved.push(path);
    }
    Ok(saved)
}
