//! Tunable thresholds of the vision pipeline.
//!
//! The defaults were tuned against reference screenshots; change them only after checking the
//! result against a set of real images.

/// Fraction of the image width skipped at the top of the image (status bar).
pub const STATUS_BAR_MARGIN: f32 = 0.05;
/// Maximum summed channel difference between the column samples of a homogeneous row.
pub const HOMOGENEITY_TOLERANCE: u32 = 24;
/// Minimum summed channel difference that marks the top edge of the board.
pub const BOUNDARY_TOLERANCE: u32 = 48;
/// Distance in pixels between a candidate row and the row it is compared with.
pub const EDGE_WIGGLE: u32 = 4;
/// Fraction of a cell discarded on each edge when cropping a tile.
pub const TILE_MARGIN: f32 = 1.0 / 6.0;
/// Fraction of pixels ignored at each end of the histogram when stretching contrast.
pub const CONTRAST_CUTOFF: f32 = 0.01;
pub const BLUR_SIGMA: f32 = 1.0;
pub const CONTRAST_FACTOR: f32 = 8.0;
/// A letter whose disagreement is below this value is accepted right away.
pub const ACCEPTANCE_THRESHOLD: f32 = 0.10;
/// Minimum ratio between the runner-up and the best disagreement.
pub const CONFIDENCE_MARGIN: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub status_bar_margin: f32,
    pub homogeneity_tolerance: u32,
    pub boundary_tolerance: u32,
    pub edge_wiggle: u32,
    pub tile_margin: f32,
    pub contrast_cutoff: f32,
    pub blur_sigma: f32,
    pub contrast_factor: f32,
    pub acceptance_threshold: f32,
    pub confidence_margin: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            status_bar_margin: STATUS_BAR_MARGIN,
            homogeneity_tolerance: HOMOGENEITY_TOLERANCE,
            boundary_tolerance: BOUNDARY_TOLERANCE,
            edge_wiggle: EDGE_WIGGLE,
            tile_margin: TILE_MARGIN,
            contrast_cutoff: CONTRAST_CUTOFF,
            blur_sigma: BLUR_SIGMA,
            contrast_factor: CONTRAST_FACTOR,
            acceptance_threshold: ACCEPTANCE_THRESHOLD,
            confidence_margin: CONFIDENCE_MARGIN,
        }
    }
}
