use crate::config::Config;
use crate::error::VisionError;
use crate::layout::Layout;
use image::imageops::{grayscale, invert};
use image::math::Rect;
use image::{GenericImageView, GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::{stretch_contrast, threshold};
use imageproc::filter::gaussian_blur_f32;
use imageproc::map::map_pixels;

/// A cropped tile, ready for classification.
#[derive(Debug, Clone)]
pub struct TileImage {
    /// The linear cell index (0.. TILE_COUNT)
    pub index: usize,
    /// Colour of the top left pixel of the crop
    pub background: Rgb<u8>,
    /// Binary glyph: black ink on a white background
    pub glyph: GrayImage,
}

/// Crop the tile in `cell` and normalize its glyph.
///
/// # Errors
/// `UncleanTile` if the tile background does not turn pure black or white.
pub fn extract_tile(
    img: &RgbImage,
    cell: Rect,
    index: usize,
    config: &Config,
) -> Result<TileImage, VisionError> {
    let area = Layout::inner(cell, config.tile_margin);
    let crop = img.view(area.x, area.y, area.width, area.height).to_image();
    let background = *crop.get_pixel(0, 0);
    let glyph = normalize_glyph(&crop, config).ok_or(VisionError::UncleanTile(index))?;
    Ok(TileImage {
        index,
        background,
        glyph,
    })
}

/// Turn a colour tile into a black on white glyph.
///
/// Returns `None` if the top left pixel is not pure black or white after enhancement.
pub fn normalize_glyph(tile: &RgbImage, config: &Config) -> Option<GrayImage> {
    let gray = grayscale(tile);
    let (lower, upper) = stretch_bounds(&gray, config.contrast_cutoff);
    let stretched = if upper > lower {
        stretch_contrast(&gray, lower, upper)
    } else {
        gray
    };
    // suppresses jpeg block artifacts
    let blurred = if config.blur_sigma > 0.0 {
        gaussian_blur_f32(&stretched, config.blur_sigma)
    } else {
        stretched
    };
    let enhanced = enhance_contrast(&blurred, config.contrast_factor);

    let corner = enhanced.get_pixel(0, 0)[0];
    if corner != 0 && corner != 255 {
        return None;
    }
    let mut glyph = threshold(&enhanced, 127);
    if corner == 0 {
        invert(&mut glyph);
    }
    Some(glyph)
}

/// The darkest and lightest gray levels, ignoring `cutoff` of the pixels at each end.
fn stretch_bounds(img: &GrayImage, cutoff: f32) -> (u8, u8) {
    let mut histogram = [0usize; 256];
    for p in img.pixels() {
        histogram[p[0] as usize] += 1;
    }
    let ignore = ((img.width() * img.height()) as f32 * cutoff) as usize;
    let level = |levels: &mut dyn Iterator<Item = usize>| {
        let mut seen = 0;
        for level in levels {
            seen += histogram[level];
            if seen > ignore {
                return level as u8;
            }
        }
        0
    };
    let lower = level(&mut (0..256));
    let upper = level(&mut (0..256).rev());
    (lower, upper)
}

/// Push pixels away from mid gray by `factor`.
fn enhance_contrast(img: &GrayImage, factor: f32) -> GrayImage {
    const MID: f32 = 128.0;
    map_pixels(img, |_x, _y, p| {
        let v = MID + factor * (p[0] as f32 - MID);
        Luma([v.round().max(0.0).min(255.0) as u8])
    })
}
