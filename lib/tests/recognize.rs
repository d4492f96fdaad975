use anyhow::Result;
use image::imageops::{resize, FilterType};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use letterpress_solver::{
    build_grid_from_image, reference_glyph, Dictionary, Grid, Recognizer, Shade, Theme,
    VisionError, THEMES,
};
use std::time::Instant;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 1400;
const TOP: u32 = 304;
const CELL: u32 = WIDTH / 5;
const STATUS_BAR: Rgb<u8> = Rgb([30, 30, 30]);
const INK: Rgb<u8> = Rgb([20, 20, 20]);

const LETTERS: &str = "catsbdefghijklmnopqruvwxy";
const SHADES: &str = concat!("OoupP", "ooupp", "uuuuu", "uuuuu", "uuuuu");
const OWNERSHIP: &str = concat!("ooupp", "ooupp", "uuuuu", "uuuuu", "uuuuu");

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn light() -> &'static Theme {
    THEMES.iter().find(|t| t.name == "light").unwrap()
}

/// Tile colour for a shade tag. `g` is a gray tile that belongs to no theme.
fn paper(theme: &Theme, tag: char) -> Rgb<u8> {
    match tag {
        'O' => theme.colour(Shade::OpponentDefended),
        'o' => theme.colour(Shade::Opponent),
        'u' => theme.colour(Shade::Unclaimed),
        'p' => theme.colour(Shade::Player),
        'P' => theme.colour(Shade::PlayerDefended),
        'g' => Rgb([128, 128, 128]),
        _ => panic!("unknown shade tag {:?}", tag),
    }
}

/// A light theme screenshot with a status bar and the board at `TOP`.
/// A space in `letters` leaves the tile blank.
fn screenshot(letters: &str, shades: &str) -> RgbImage {
    screenshot_at(letters, shades, TOP)
}

fn screenshot_at(letters: &str, shades: &str, top: u32) -> RgbImage {
    let theme = light();
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, theme.unclaimed());
    for y in 0..40 {
        for x in 0..WIDTH {
            img.put_pixel(x, y, STATUS_BAR);
        }
    }
    for (index, (letter, tag)) in letters.chars().zip(shades.chars()).enumerate() {
        let x0 = (index % 5) as u32 * CELL;
        let y0 = top + (index / 5) as u32 * CELL;
        let colour = paper(theme, tag);
        for y in y0..y0 + CELL {
            for x in x0..x0 + CELL {
                img.put_pixel(x, y, colour);
            }
        }
        if letter == ' ' {
            continue;
        }
        let glyph = reference_glyph(letter).unwrap();
        let glyph = resize(
            &glyph,
            glyph.width() / 2,
            glyph.height() / 2,
            FilterType::Nearest,
        );
        let dx = (CELL - glyph.width()) / 2;
        let dy = (CELL - glyph.height()) / 2;
        for (gx, gy, p) in glyph.enumerate_pixels() {
            if p[0] < 128 {
                img.put_pixel(x0 + dx + gx, y0 + dy + gy, INK);
            }
        }
    }
    img
}

fn encode(img: RgbImage, format: ImageOutputFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img).write_to(&mut bytes, format)?;
    Ok(bytes)
}

fn ownership(grid: &Grid) -> String {
    grid.tiles().iter().map(|t| t.ownership.tag()).collect()
}

#[test]
fn test_recognize_screenshot() -> Result<()> {
    init();
    let img = screenshot(LETTERS, SHADES);
    let recognizer = Recognizer::new();
    let now = Instant::now();
    let res = recognizer.recognize(&img)?;
    println!("Recognize screenshot took {:?}", now.elapsed());
    println!("{}", res);

    assert_eq!(res.layout.board_area.y, TOP);
    assert_eq!(res.layout.board_area.width, WIDTH);
    assert_eq!(res.layout.background, light().unclaimed());
    assert_eq!(res.themes, vec!["light"]);
    assert_eq!(res.tiles[0].shade, Shade::OpponentDefended);
    assert_eq!(res.tiles[4].shade, Shade::PlayerDefended);
    assert_eq!(res.tiles[12].shade, Shade::Unclaimed);
    assert!(res.tiles.iter().all(|t| t.disagreement < 0.10));
    assert_eq!(res.to_string().lines().next(), Some("co ao tu sp bp"));

    let grid = res.grid();
    assert_eq!(grid.letters(), LETTERS);
    assert_eq!(ownership(&grid), OWNERSHIP);
    Ok(())
}

#[test]
fn test_unclaimed_first_row() -> Result<()> {
    init();
    // unclaimed tiles have the background colour of the light theme
    let shades = concat!("uuuuu", "ooupp", "uuuuu", "uuuuu", "uuuuu");
    let res = Recognizer::new().recognize(&screenshot(LETTERS, shades))?;
    assert_eq!(res.layout.board_area.y, TOP);
    let grid = res.grid();
    assert_eq!(grid.letters(), LETTERS);
    assert_eq!(ownership(&grid), shades);
    Ok(())
}

#[test]
fn test_all_unclaimed_at_bottom() -> Result<()> {
    init();
    let shades = "u".repeat(25);
    let img = screenshot_at(LETTERS, &shades, HEIGHT - WIDTH);
    let res = Recognizer::new().recognize(&img)?;
    assert_eq!(res.layout.board_area.y, HEIGHT - WIDTH);
    let grid = res.grid();
    assert_eq!(grid.letters(), LETTERS);
    assert_eq!(ownership(&grid), shades);
    Ok(())
}

#[test]
fn test_build_grid_from_png() -> Result<()> {
    init();
    let bytes = encode(screenshot(LETTERS, SHADES), ImageOutputFormat::Png)?;
    let grid = build_grid_from_image(&bytes)?;
    println!("{}", grid);
    assert_eq!(grid.letters(), LETTERS);
    assert_eq!(ownership(&grid), OWNERSHIP);
    assert_eq!(grid.player_score(), 4);
    assert_eq!(grid.opponent_score(), 4);
    Ok(())
}

#[test]
fn test_build_grid_from_jpeg() -> Result<()> {
    init();
    let bytes = encode(screenshot(LETTERS, SHADES), ImageOutputFormat::Jpeg(95))?;
    let grid = Recognizer::new().build_grid_from_image(&bytes)?;
    assert_eq!(grid.letters(), LETTERS);
    assert_eq!(ownership(&grid), OWNERSHIP);
    Ok(())
}

#[test]
fn test_normalized_tiles() -> Result<()> {
    let img = screenshot(LETTERS, SHADES);
    let (layout, tiles) = Recognizer::new().normalized_tiles(&img)?;
    assert_eq!(layout.get_cells().len(), 25);
    assert_eq!(tiles.len(), 25);
    for (index, tile) in tiles.iter().enumerate() {
        assert_eq!(tile.index, index);
        assert_eq!(tile.glyph.dimensions(), (134, 134));
        // black on white, whatever the tile colour
        assert_eq!(tile.glyph.get_pixel(0, 0)[0], 255);
    }
    Ok(())
}

#[test]
fn test_not_narrow_enough() {
    let img = RgbImage::from_pixel(HEIGHT, WIDTH, light().unclaimed());
    let err = Recognizer::new().recognize(&img).unwrap_err();
    assert!(matches!(
        err,
        VisionError::NotNarrowEnough {
            width: HEIGHT,
            height: WIDTH
        }
    ));
}

#[test]
fn test_grid_not_found() {
    let img = RgbImage::from_pixel(WIDTH, HEIGHT, light().unclaimed());
    let err = Recognizer::new().recognize(&img).unwrap_err();
    assert!(matches!(err, VisionError::GridNotFound));
}

#[test]
fn test_unclean_tile() {
    init();
    let mut letters: Vec<char> = LETTERS.chars().collect();
    letters[12] = ' ';
    let letters: String = letters.into_iter().collect();
    let shades = concat!("OoupP", "ooupp", "uuguu", "uuuuu", "uuuuu");
    let err = Recognizer::new()
        .recognize(&screenshot(&letters, shades))
        .unwrap_err();
    assert!(matches!(err, VisionError::UncleanTile(12)), "{:?}", err);
}

#[test]
fn test_blank_tile_is_unreadable() {
    let mut letters: Vec<char> = LETTERS.chars().collect();
    letters[17] = ' ';
    let letters: String = letters.into_iter().collect();
    let err = Recognizer::new()
        .recognize(&screenshot(&letters, SHADES))
        .unwrap_err();
    assert!(
        matches!(err, VisionError::TooLittleConfidence { best: '?', .. }),
        "{:?}",
        err
    );
}

#[test]
fn test_screenshot_to_moves() -> Result<()> {
    init();
    let bytes = encode(screenshot(LETTERS, SHADES), ImageOutputFormat::Png)?;
    let grid = build_grid_from_image(&bytes)?;
    let dictionary = Dictionary::new(&["bat", "tab", "stab", "zebra", "cat", "date"])?;
    let moves = grid.best_moves(&dictionary);
    let words: Vec<&str> = moves.iter().map(|m| m.word.as_str()).collect();
    // a, d, e: opponent; t: unclaimed; s, b: player; c: defended opponent
    assert_eq!(words, vec!["date", "stab", "bat", "tab", "cat"]);
    assert_eq!(moves[0].points, 7);
    assert_eq!(moves[1].points, 3);
    assert_eq!(moves[4].points, 3);
    assert!(moves.iter().all(|m| !m.winning));
    Ok(())
}
