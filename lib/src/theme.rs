use crate::grid::Ownership;
use image::Rgb;
use log::debug;

/// The five tile shades of a theme, in the order they are stored in a [Theme].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    OpponentDefended,
    Opponent,
    Unclaimed,
    Player,
    PlayerDefended,
}

pub const SHADES: [Shade; 5] = [
    Shade::OpponentDefended,
    Shade::Opponent,
    Shade::Unclaimed,
    Shade::Player,
    Shade::PlayerDefended,
];

impl Shade {
    /// Defended and undefended shades collapse to the same owner. Whether a tile is defended
    /// is derived from the board, not from its colour.
    pub fn ownership(self) -> Ownership {
        match self {
            Shade::OpponentDefended | Shade::Opponent => Ownership::Opponent,
            Shade::Unclaimed => Ownership::Unclaimed,
            Shade::Player | Shade::PlayerDefended => Ownership::Player,
        }
    }
}

/// A visual skin of the game.
///
/// The unclaimed colour doubles as the background colour of the screen, which is what makes
/// it possible to shortlist themes from a single pixel outside the board.
#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Colours in [SHADES] order
    pub colours: [Rgb<u8>; 5],
}

impl Theme {
    pub fn colour(&self, shade: Shade) -> Rgb<u8> {
        self.colours[shade as usize]
    }

    pub fn unclaimed(&self) -> Rgb<u8> {
        self.colour(Shade::Unclaimed)
    }
}

macro_rules! theme {
    ($name:expr, $( ($r:expr, $g:expr, $b:expr) ),* ) => {
        Theme {
            name: $name,
            colours: [$( Rgb([$r, $g, $b]), )*],
        }
    };
}

pub const THEMES: &[Theme] = &[
    theme!("light", (249, 42, 36), (242, 132, 123), (236, 235, 231), (103, 187, 242), (23, 142, 254)),
    theme!("pop", (249, 0, 186), (132, 0, 103), (37, 37, 37), (71, 138, 19), (113, 255, 10)),
    theme!("retro", (229, 74, 54), (239, 148, 114), (249, 232, 185), (181, 111, 218), (119, 0, 255)),
    theme!("dark", (249, 42, 36), (132, 41, 37), (37, 37, 37), (23, 97, 134), (28, 170, 255)),
    theme!("forest", (20, 82, 45), (104, 149, 119), (217, 225, 206), (234, 181, 89), (251, 138, 9)),
    theme!("glow", (226, 0, 86), (120, 7, 60), (37, 37, 37), (60, 137, 100), (86, 255, 176)),
    theme!("pink", (68, 42, 36), (154, 120, 123), (253, 215, 232), (250, 80, 227), (249, 0, 221)),
    theme!("contrast", (0, 0, 0), (108, 108, 108), (255, 255, 255), (129, 255, 109), (45, 255, 9)),
];

/// Summed absolute channel difference
pub fn colour_diff(a: Rgb<u8>, b: Rgb<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&ac, &bc)| (ac as i32 - bc as i32).unsigned_abs())
        .sum()
}

/// The colour closest to `colour`. Ties go to the first one in `colours`.
pub fn closest_colour<I>(colour: Rgb<u8>, colours: I) -> Option<Rgb<u8>>
where
    I: IntoIterator<Item = Rgb<u8>>,
{
    colours.into_iter().min_by_key(|&c| colour_diff(c, colour))
}

/// The themes a screenshot may have been taken with.
#[derive(Debug, Clone)]
pub struct Palette {
    themes: Vec<&'static Theme>,
}

impl Palette {
    /// Shortlist the themes whose unclaimed colour is closest to `background`.
    pub fn from_background(background: Rgb<u8>) -> Palette {
        Palette::shortlist(background, THEMES)
    }

    pub fn shortlist(background: Rgb<u8>, themes: &'static [Theme]) -> Palette {
        let unclaimed = closest_colour(background, themes.iter().map(Theme::unclaimed));
        let themes: Vec<&Theme> = themes
            .iter()
            .filter(|t| Some(t.unclaimed()) == unclaimed)
            .collect();
        debug!(
            "background {:?} shortlists {:?}",
            background,
            themes.iter().map(|t| t.name).collect::<Vec<_>>()
        );
        Palette { themes }
    }

    pub fn theme_names(&self) -> Vec<&'static str> {
        self.themes.iter().map(|t| t.name).collect()
    }

    /// Classify a tile colour as the nearest shade of the shortlisted themes.
    ///
    /// Candidates are visited theme by theme in [SHADES] order, and the first of equally
    /// close candidates wins. Returns `None` if no theme was shortlisted.
    pub fn classify(&self, colour: Rgb<u8>) -> Option<Shade> {
        self.themes
            .iter()
            .flat_map(|t| SHADES.iter().map(move |&s| (s, t.colour(s))))
            .min_by_key(|&(_, c)| colour_diff(c, colour))
            .map(|(shade, _)| shade)
    }
}
