use anyhow::Result;
use letterpress_solver::Recognizer;

fn main() -> Result<()> {
    let path = "screenshots/screenshot_light.png";
    let grid = Recognizer::new().build_grid_from_file(path)?;
    println!("{}", grid);
    Ok(())
}
