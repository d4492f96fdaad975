use anyhow::{Context, Result};
use letterpress_solver::{Dictionary, Priority, Recognizer};
use std::time::Instant;

fn run() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .expect("Usage: recognize SCREENSHOT [WORDLIST] [--defensive]");
    let wordlist = args.next();
    let priority = match args.next().as_deref() {
        Some("--defensive") => Priority::AvoidSpreading,
        _ => Priority::MaximizeNetScore,
    };

    let t0 = Instant::now();
    let img = image::open(&path)
        .with_context(|| format!("Failed to open {}", path))?
        .into_rgb8();
    let recognizer = Recognizer::new();
    let res = recognizer.recognize(&img)?;
    println!("recognize screenshot took {:?}", t0.elapsed());
    println!("themes: {:?}", res.themes);
    println!("{}\n", res);

    let grid = res.grid().with_priority(priority);
    println!("{}\n", grid);

    if let Some(wordlist) = wordlist {
        let dictionary = Dictionary::from_file(&wordlist)
            .with_context(|| format!("Failed to read {}", wordlist))?;
        let t0 = Instant::now();
        let moves = grid.best_moves(&dictionary);
        println!("{} moves, search took {:?}", moves.len(), t0.elapsed());
        for mv in moves.iter().take(10) {
            println!("{}", mv);
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:?}", err);
    }
}
