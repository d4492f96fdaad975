use anyhow::{Context, Result};
use letterpress_solver::{save_glyphs, Recognizer};

/// Save the glyphs of a screenshot whose letters are known, e.g. to build a reference set
/// from the game font.
fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let usage = "Usage: glyphs SCREENSHOT LETTERS [SAVEDIR]";
    let path = args.next().expect(usage);
    let letters = args.next().expect(usage);
    let savedir = args.next().unwrap_or_else(|| ".".to_string());

    let img = image::open(&path)
        .with_context(|| format!("Failed to open {}", path))?
        .into_rgb8();
    let (_, tiles) = Recognizer::new().normalized_tiles(&img)?;
    let saved = save_glyphs(&savedir, &tiles, &letters.to_lowercase())?;
    eprintln!("saved {} glyphs to {}", saved.len(), savedir);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
    }
}
