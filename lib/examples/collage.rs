use anyhow::{Context, Result};
use letterpress_solver::{collage, Recognizer};

fn run() -> Result<()> {
    let path = std::env::args().nth(1).expect("Usage: collage SCREENSHOT");

    let img = image::open(&path)
        .with_context(|| format!("Failed to open {}", path))?
        .into_rgb8();
    eprintln!("read image from {}", path);
    let (layout, tiles) = Recognizer::new().normalized_tiles(&img)?;
    eprintln!("board area: {:?}", layout.board_area);

    let collage = collage(&tiles, None)?;
    collage.save("collage.png")?;

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:?}", err);
    }
}
