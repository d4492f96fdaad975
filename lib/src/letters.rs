use crate::config::Config;
use crate::error::VisionError;
use image::imageops::{resize, FilterType};
use image::{DynamicImage, GenericImageView, GrayImage};
use imageproc::contrast::threshold;
use log::debug;

/// Width and height of the matrix letters are compared in
pub const INVARIANT_SIZE: u32 = 30;

/// Pixels darker than this are ink
const INK_LEVEL: u8 = 127;

/// The templates! macro embeds the reference glyphs in the library
macro_rules! templates {
    ( $( $x:expr ),* ) => {
            [$(
                   ($x, include_bytes!(concat!("glyphs/", $x, ".png"))),
            )*]
        };
}

const LETTER_TEMPLATES: &[(&str, &[u8])] = &templates![
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z"
];

/// The embedded reference image of `letter`: black ink on a white background.
pub fn reference_glyph(letter: char) -> Option<GrayImage> {
    let name = letter.to_uppercase().to_string();
    LETTER_TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .and_then(|(_, buf)| image::load_from_memory(buf).ok())
        .map(|img| img.into_luma8())
}

/// The shape of a glyph, independent of its size and position.
///
/// The bounding box of the ink is scaled to an [INVARIANT_SIZE] square matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterInvariant {
    cells: Vec<bool>,
}

impl LetterInvariant {
    /// Build the invariant of a glyph with dark ink on a light background.
    ///
    /// Returns `None` if there is no ink at all.
    pub fn from_glyph(glyph: &GrayImage) -> Option<LetterInvariant> {
        let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0, 0);
        for (x, y, p) in glyph.enumerate_pixels() {
            if p[0] <= INK_LEVEL {
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x);
                y1 = y1.max(y);
            }
        }
        if x0 > x1 {
            return None;
        }
        let ink = glyph.view(x0, y0, x1 - x0 + 1, y1 - y0 + 1);
        let scaled = resize(&ink, INVARIANT_SIZE, INVARIANT_SIZE, FilterType::Nearest);
        let cells = scaled.pixels().map(|p| p[0] <= INK_LEVEL).collect();
        Some(LetterInvariant { cells })
    }

    /// The fraction of cells that differ: 0 for identical shapes, 1 for disjoint ones.
    pub fn disagreement(&self, other: &LetterInvariant) -> f32 {
        let differ = self
            .cells
            .iter()
            .zip(other.cells.iter())
            .filter(|(a, b)| a != b)
            .count();
        differ as f32 / self.cells.len() as f32
    }
}

/// Disagreement of a glyph with one reference letter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterMatch {
    pub letter: char,
    pub disagreement: f32,
}

/// Pick a letter from the matches of a glyph with every reference letter.
///
/// The best match is accepted when its disagreement is below the acceptance threshold.
/// Otherwise it is only accepted when the runner-up is worse by at least the confidence margin.
pub fn decide(matches: &[LetterMatch], config: &Config) -> Result<LetterMatch, VisionError> {
    let best = matches
        .iter()
        .copied()
        .min_by(|a, b| a.disagreement.total_cmp(&b.disagreement))
        .ok_or_else(unreadable)?;
    if best.disagreement < config.acceptance_threshold || best.disagreement <= 0.0 {
        return Ok(best);
    }
    let runner_up = matches
        .iter()
        .copied()
        .filter(|m| m.letter != best.letter)
        .min_by(|a, b| a.disagreement.total_cmp(&b.disagreement));
    let runner_up = match runner_up {
        Some(m) => m,
        None => return Ok(best),
    };
    let ratio = runner_up.disagreement / best.disagreement;
    if ratio < config.confidence_margin {
        debug!(
            "{:?} ({:.3}) too close to {:?} ({:.3})",
            best.letter, best.disagreement, runner_up.letter, runner_up.disagreement
        );
        return Err(VisionError::TooLittleConfidence {
            best: best.letter,
            runner_up: runner_up.letter,
            ratio,
        });
    }
    Ok(best)
}

/// A glyph without ink, or a bank without letters, gives nothing to decide between.
fn unreadable() -> VisionError {
    VisionError::TooLittleConfidence {
        best: '?',
        runner_up: '?',
        ratio: 1.0,
    }
}

/// The invariants of the reference alphabet.
#[derive(Debug, Clone)]
pub struct LetterBank {
    invariants: Vec<(char, LetterInvariant)>,
}

impl Default for LetterBank {
    fn default() -> Self {
        LetterBank::new()
    }
}

impl LetterBank {
    /// Build the bank from the embedded reference glyphs.
    pub fn new() -> LetterBank {
        let invariants = LETTER_TEMPLATES
            .iter()
            .filter_map(|(name, buf)| {
                // can not fail because the templates are embedded
                let img = image::load_from_memory(buf).expect("embedded glyph");
                let letter = name.chars().next()?.to_ascii_lowercase();
                LetterBank::invariant_of(&img).map(|inv| (letter, inv))
            })
            .collect();
        LetterBank { invariants }
    }

    /// Build the bank from reference images, e.g. renders of the game font.
    ///
    /// Images without any ink are skipped.
    pub fn from_images<I>(images: I) -> LetterBank
    where
        I: IntoIterator<Item = (char, DynamicImage)>,
    {
        let invariants = images
            .into_iter()
            .filter_map(|(letter, img)| {
                LetterBank::invariant_of(&img).map(|inv| (letter.to_ascii_lowercase(), inv))
            })
            .collect();
        LetterBank { invariants }
    }

    fn invariant_of(img: &DynamicImage) -> Option<LetterInvariant> {
        let bw = threshold(&img.to_luma8(), INK_LEVEL);
        LetterInvariant::from_glyph(&bw)
    }

    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.invariants.iter().map(|(c, _)| *c)
    }

    /// Disagreement of `invariant` with every reference letter, in alphabet order.
    pub fn matches(&self, invariant: &LetterInvariant) -> Vec<LetterMatch> {
        self.invariants
            .iter()
            .map(|(letter, reference)| LetterMatch {
                letter: *letter,
                disagreement: invariant.disagreement(reference),
            })
            .collect()
    }

    /// Classify a normalized glyph (dark ink on a light background).
    ///
    /// # Errors
    /// `TooLittleConfidence` if the glyph can not be told apart from a second letter.
    pub fn classify(&self, glyph: &GrayImage, config: &Config) -> Result<LetterMatch, VisionError> {
        let invariant = LetterInvariant::from_glyph(glyph).ok_or_else(unreadable)?;
        decide(&self.matches(&invariant), config)
    }
}
