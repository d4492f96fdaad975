use crate::config::Config;
use crate::error::VisionError;
use crate::grid::{GRID_SIZE, TILE_COUNT};
use crate::theme::colour_diff;
use image::math::Rect;
use image::{Rgb, RgbImage};
use log::{debug, trace};

/// Represents the located board in a screenshot.
///
/// The board is a square that spans the full width of the image, somewhere below the status
/// bar. Everything above it is screen background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// The screen area (the entire screenshot)
    pub screen: Rect,
    /// The board area (a GRID_SIZE x GRID_SIZE grid)
    pub board_area: Rect,
    /// Screen colour just above the board
    pub background: Rgb<u8>,
}

/// The `x` coordinate of the centre of each board column.
fn column_centres(width: u32) -> Vec<u32> {
    let base = width as f64 / GRID_SIZE as f64;
    (0..GRID_SIZE)
        .map(|col| ((col as f64 + 0.5) * base) as u32)
        .collect()
}

/// Three `x` coordinates per column: its centre and both inner tile margins.
fn column_spread(width: u32) -> Vec<u32> {
    let base = width as f64 / GRID_SIZE as f64;
    (0..GRID_SIZE)
        .flat_map(|col| {
            (0..3).map(move |i| ((col as f64 + (2 * i + 1) as f64 / 6.0) * base) as u32)
        })
        .collect()
}

fn sample_row(img: &RgbImage, xs: &[u32], y: u32) -> Vec<Rgb<u8>> {
    xs.iter().map(|&x| *img.get_pixel(x, y)).collect()
}

/// All samples are within `tol` of each other.
fn homogeneous(samples: &[Rgb<u8>], tol: u32) -> bool {
    samples
        .iter()
        .enumerate()
        .all(|(i, &a)| samples[i + 1..].iter().all(|&b| colour_diff(a, b) <= tol))
}

/// Every column of the cell row starting at `top` shows something other than `background`
/// between its tile margins: a letter, or the tile colour.
fn has_letters(
    img: &RgbImage,
    xs: &[u32],
    top: u32,
    cell: u32,
    background: Rgb<u8>,
    tol: u32,
) -> bool {
    let (y0, y1) = (top + cell / 6, top + cell - cell / 6);
    let dx = cell / 10;
    xs.iter().all(|&x| {
        [x - dx, x, x + dx].iter().any(|&x| {
            (y0..y1).any(|y| colour_diff(*img.get_pixel(x, y), background) > tol)
        })
    })
}

impl Layout {
    /// Locate the board in `img`.
    ///
    /// Rows are scanned downwards from below the status bar. A candidate top is a homogeneous
    /// row of background followed, `edge_wiggle` pixels lower, by a row that differs from it
    /// in at least one column. It is accepted when the background row is plain across the
    /// full width and every cell starts with a plain tile margin, which rules out edges of
    /// letters.
    ///
    /// Unclaimed tiles can have the colour of the background, so the first visible edge may
    /// be a lower row of tiles. The top moves up a cell for as long as the row above holds a
    /// letter in every column. If no edge is found at all the board is expected at the bottom
    /// of the image.
    /// # Errors
    /// * `NotNarrowEnough` if the image is not tall enough to hold a square board below the
    ///   status bar
    /// * `GridNotFound` if no row passes the test
    pub fn locate(img: &RgbImage, config: &Config) -> Result<Layout, VisionError> {
        let (width, height) = img.dimensions();
        let min_top = (config.status_bar_margin * width as f32).round() as u32;
        let wiggle = config.edge_wiggle;
        let max_top = match height.checked_sub(width) {
            Some(max_top) if width as usize >= GRID_SIZE && max_top >= min_top + wiggle => max_top,
            _ => return Err(VisionError::NotNarrowEnough { width, height }),
        };
        let tol = config.homogeneity_tolerance;
        let cell = width / GRID_SIZE as u32;
        let xs = column_centres(width);
        let spread = column_spread(width);
        let plain_above = |y: u32| homogeneous(&sample_row(img, &spread, y), tol);
        let plain_cells = |y: u32| {
            sample_row(img, &spread, y)
                .chunks(3)
                .all(|cell| homogeneous(cell, tol))
        };

        for y in min_top..height - wiggle {
            let samples = sample_row(img, &xs, y);
            if !homogeneous(&samples, tol) {
                trace!("{} not homogeneous {:?}", y, samples);
                continue;
            }
            let below = sample_row(img, &xs, y + wiggle);
            let edge = samples
                .iter()
                .zip(below.iter())
                .any(|(&a, &b)| colour_diff(a, b) > config.boundary_tolerance);
            if !edge {
                continue;
            }
            if !plain_above(y) || !plain_cells(y + wiggle) {
                trace!("{} edge inside a tile", y);
                continue;
            }
            let background = samples[0];
            let mut top = y + wiggle;
            while top >= min_top + cell
                && has_letters(img, &xs, top - cell, cell, background, config.boundary_tolerance)
            {
                top -= cell;
            }
            if top > max_top {
                trace!("{} board top {} leaves no room for the board", y, top);
                continue;
            }
            debug!("# {} board top, background {:?}", top, background);
            return Ok(Layout::new(width, height, top, background));
        }

        // nothing stands out from the background above the board
        let background = *img.get_pixel(xs[0], max_top - wiggle);
        if plain_above(max_top - wiggle)
            && plain_cells(max_top)
            && has_letters(img, &xs, max_top, cell, background, config.boundary_tolerance)
        {
            debug!("# {} board top at the bottom, background {:?}", max_top, background);
            return Ok(Layout::new(width, height, max_top, background));
        }
        Err(VisionError::GridNotFound)
    }

    fn new(width: u32, height: u32, top: u32, background: Rgb<u8>) -> Layout {
        Layout {
            screen: Rect {
                x: 0,
                y: 0,
                width,
                height,
            },
            board_area: Rect {
                x: 0,
                y: top,
                width,
                height: width,
            },
            background,
        }
    }

    /// Create the bounding rectangles of all cells, in row-major order.
    pub fn get_cells(&self) -> Vec<Rect> {
        let base = self.board_area.width as f64 / GRID_SIZE as f64;
        let edge = |i: usize| (i as f64 * base).round() as u32;
        let mut cells = Vec::with_capacity(TILE_COUNT);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                cells.push(Rect {
                    x: self.board_area.x + edge(col),
                    y: self.board_area.y + edge(row),
                    width: edge(col + 1) - edge(col),
                    height: edge(row + 1) - edge(row),
                });
            }
        }
        cells
    }

    /// Shrink `cell` by `margin` (a fraction of the cell size) on each edge.
    pub fn inner(cell: Rect, margin: f32) -> Rect {
        let dx = (cell.width as f32 * margin).round() as u32;
        let dy = (cell.height as f32 * margin).round() as u32;
        Rect {
            x: cell.x + dx,
            y: cell.y + dy,
            width: cell.width.saturating_sub(2 * dx).max(1),
            height: cell.height.saturating_sub(2 * dy).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    const BACKGROUND: Rgb<u8> = Rgb([236, 235, 231]);
    const TILE: Rgb<u8> = Rgb([242, 132, 123]);

    /// A `width` wide screenshot with a dark status bar and the board starting at `top`
    fn screenshot(width: u32, height: u32, top: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            if y < 20 {
                Rgb([20, 20, 20])
            } else if y < top {
                BACKGROUND
            } else if (x / (width / 5)) % 2 == 0 {
                TILE
            } else {
                BACKGROUND
            }
        })
    }

    /// Like `screenshot`, with a dark letter block in every cell. Tiles in rows before
    /// `first_coloured` have the background colour.
    fn lettered(height: u32, top: u32, first_coloured: u32) -> RgbImage {
        let mut img = screenshot(500, height, top);
        for y in top..top + 500 {
            let (row, dy) = ((y - top) / 100, (y - top) % 100);
            for x in 0..500 {
                let dx = x % 100;
                if (30..70).contains(&dy) && (35..65).contains(&dx) {
                    img.put_pixel(x, y, Rgb([20, 20, 20]));
                } else if row < first_coloured {
                    img.put_pixel(x, y, BACKGROUND);
                }
            }
        }
        img
    }

    #[test]
    fn test_locate_with_letters() {
        let img = lettered(800, 260, 0);
        let layout = Layout::locate(&img, &Config::default()).unwrap();
        assert_eq!(layout.board_area.y, 260);
    }

    #[test]
    fn test_locate_unclaimed_first_row() {
        // the first visible edge is the top of the second row
        let img = lettered(800, 260, 1);
        let layout = Layout::locate(&img, &Config::default()).unwrap();
        assert_eq!(layout.board_area.y, 260);
        assert_eq!(layout.background, BACKGROUND);
        let img = lettered(800, 200, 2);
        let layout = Layout::locate(&img, &Config::default()).unwrap();
        assert_eq!(layout.board_area.y, 200);
    }

    #[test]
    fn test_locate_all_unclaimed_at_bottom() {
        let img = lettered(800, 300, 5);
        let layout = Layout::locate(&img, &Config::default()).unwrap();
        assert_eq!(layout.board_area.y, 300);
    }

    #[test]
    fn test_letter_edges_are_not_the_top() {
        let img = lettered(800, 260, 1);
        let spread = column_spread(500);
        assert_eq!(spread.len(), 15);
        assert_eq!(&spread[..3], &[16, 50, 83]);
        // the row where the letters start
        let cells = sample_row(&img, &spread, 290);
        assert!(!cells.chunks(3).all(|c| homogeneous(c, 24)));
        assert!(has_letters(&img, &column_centres(500), 260, 100, BACKGROUND, 48));
        assert!(!has_letters(&img, &column_centres(500), 160, 100, BACKGROUND, 48));
    }

    #[test]
    fn test_homogeneous() {
        assert!(homogeneous(&[BACKGROUND; 5], 0));
        assert!(homogeneous(&[Rgb([10, 10, 10]), Rgb([20, 10, 10])], 10));
        assert!(!homogeneous(&[Rgb([10, 10, 10]), Rgb([21, 10, 10])], 10));
        assert!(!homogeneous(&[BACKGROUND, BACKGROUND, TILE], 24));
    }

    #[test]
    fn test_locate() {
        let img = screenshot(500, 800, 260);
        let layout = Layout::locate(&img, &Config::default()).unwrap();
        assert_eq!(layout.board_area.y, 260);
        assert_eq!(layout.board_area.width, 500);
        assert_eq!(layout.board_area.height, 500);
        assert_eq!(layout.background, BACKGROUND);
    }

    #[test]
    fn test_locate_board_at_bottom() {
        let img = screenshot(500, 800, 300);
        let layout = Layout::locate(&img, &Config::default()).unwrap();
        assert_eq!(layout.board_area.y, 300);
    }

    #[test]
    fn test_not_narrow_enough() {
        let img = screenshot(800, 500, 100);
        assert!(matches!(
            Layout::locate(&img, &Config::default()),
            Err(VisionError::NotNarrowEnough {
                width: 800,
                height: 500
            })
        ));
        // square: no room above the board
        let img = screenshot(500, 500, 0);
        assert!(matches!(
            Layout::locate(&img, &Config::default()),
            Err(VisionError::NotNarrowEnough { .. })
        ));
    }

    #[test]
    fn test_grid_not_found() {
        let img: RgbImage = ImageBuffer::from_pixel(500, 800, BACKGROUND);
        assert!(matches!(
            Layout::locate(&img, &Config::default()),
            Err(VisionError::GridNotFound)
        ));
    }

    #[test]
    fn test_get_cells() {
        let img = screenshot(500, 800, 300);
        let layout = Layout::locate(&img, &Config::default()).unwrap();
        let cells = layout.get_cells();
        assert_eq!(cells.len(), 25);
        assert_eq!(
            cells[0],
            Rect {
                x: 0,
                y: 300,
                width: 100,
                height: 100
            }
        );
        assert_eq!(
            cells[24],
            Rect {
                x: 400,
                y: 700,
                width: 100,
                height: 100
            }
        );
        let inner = Layout::inner(cells[6], 1.0 / 6.0);
        assert_eq!(
            inner,
            Rect {
                x: 117,
                y: 417,
                width: 66,
                height: 66
            }
        );
    }
}
