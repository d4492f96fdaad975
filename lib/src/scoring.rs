use crate::dictionary::{Dictionary, LetterPool};
use crate::grid::{Grid, Priority};
use log::debug;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fmt;

/// The value of a move. A winning move beats every finite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    Finite(i32),
    Infinite,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Score::Finite(points) => write!(f, "{}", points),
            Score::Infinite => write!(f, "inf"),
        }
    }
}

/// A candidate word with its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub word: String,
    /// Points gained by the word itself
    pub points: i32,
    /// Playing the word takes every unclaimed tile and leaves the player ahead
    pub winning: bool,
}

impl Move {
    pub fn score(&self) -> Score {
        if self.winning {
            Score::Infinite
        } else {
            Score::Finite(self.points)
        }
    }

    /// Best first: higher score, then longer word.
    pub fn rank(&self, other: &Move) -> Ordering {
        other
            .score()
            .cmp(&self.score())
            .then_with(|| other.word.chars().count().cmp(&self.word.chars().count()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.word, self.score())
    }
}

/// Points for taking an opponent tile and for taking an unclaimed tile.
fn weights(priority: Priority) -> (i32, i32) {
    match priority {
        Priority::MaximizeNetScore => (2, 1),
        Priority::AvoidSpreading => (1, -1),
    }
}

/// Score `word` against the letters that can be taken from the opponent (`targets`) and the
/// unclaimed letters.
///
/// `margin` is the opponent's lead (opponent score minus player score). A word that uses up
/// every unclaimed letter and gains more than `margin` ends the game in the player's favour.
pub fn score_word(
    word: &str,
    targets: &LetterPool,
    unclaimed: &LetterPool,
    priority: Priority,
    margin: i32,
) -> Move {
    let (target_points, unclaimed_points) = weights(priority);
    let mut targets = targets.clone();
    let mut unclaimed = unclaimed.clone();
    let mut points = 0;
    for letter in word.chars() {
        if targets.take(letter) {
            points += target_points;
        } else if unclaimed.take(letter) {
            points += unclaimed_points;
        }
    }
    Move {
        word: word.to_string(),
        points,
        winning: unclaimed.is_empty() && points > margin,
    }
}

/// The value of playing `word` on `grid`.
pub fn value_of_word(grid: &Grid, word: &str, priority: Priority) -> Move {
    let margin = grid.opponent_score() as i32 - grid.player_score() as i32;
    score_word(
        word,
        &grid.target_letters(),
        &grid.unclaimed_letters(),
        priority,
        margin,
    )
}

/// Rank the unique playable words of `dictionary` on `grid`, best first.
///
/// Winning moves come first, then higher scores; of two words with the same score the longer
/// one ranks first. Remaining ties keep the order of [Dictionary::unique_playable].
pub fn best_moves(grid: &Grid, dictionary: &Dictionary, priority: Priority) -> Vec<Move> {
    let targets = grid.target_letters();
    let unclaimed = grid.unclaimed_letters();
    let margin = grid.opponent_score() as i32 - grid.player_score() as i32;
    let words = dictionary.unique_playable(&grid.available_letters());
    debug!(
        "{} unique playable words of {}",
        words.len(),
        dictionary.len()
    );
    let mut moves: Vec<Move> = words
        .par_iter()
        .map(|w| score_word(w, &targets, &unclaimed, priority, margin))
        .collect();
    moves.sort_by(|a, b| a.rank(b));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools(targets: &str, unclaimed: &str) -> (LetterPool, LetterPool) {
        (LetterPool::new(targets), LetterPool::new(unclaimed))
    }

    #[test]
    fn test_score_order() {
        assert!(Score::Infinite > Score::Finite(i32::MAX));
        assert!(Score::Finite(3) > Score::Finite(-3));
        assert_eq!(Score::Infinite.to_string(), "inf");
        assert_eq!(Score::Finite(-2).to_string(), "-2");
    }

    #[test]
    fn test_cats_maximize() {
        let (targets, unclaimed) = pools("cat", "s");
        let m = score_word("cats", &targets, &unclaimed, Priority::MaximizeNetScore, 6);
        assert_eq!(m.points, 7);
        assert!(m.winning);
        assert_eq!(m.score(), Score::Infinite);
        // the opponent is too far ahead
        let m = score_word("cats", &targets, &unclaimed, Priority::MaximizeNetScore, 7);
        assert_eq!(m.points, 7);
        assert!(!m.winning);
        assert_eq!(m.score(), Score::Finite(7));
    }

    #[test]
    fn test_cats_avoid_spreading() {
        let (targets, unclaimed) = pools("cat", "su");
        let m = score_word("cats", &targets, &unclaimed, Priority::AvoidSpreading, 0);
        assert_eq!(m.points, 1 + 1 + 1 - 1);
        // one unclaimed letter is left
        assert!(!m.winning);
    }

    #[test]
    fn test_letters_are_consumed() {
        let (targets, unclaimed) = pools("a", "aa");
        // first a from the opponent, then two unclaimed, the fourth scores nothing
        let m = score_word("aaaa", &targets, &unclaimed, Priority::MaximizeNetScore, 100);
        assert_eq!(m.points, 2 + 1 + 1);
        let m = score_word("xyz", &targets, &unclaimed, Priority::MaximizeNetScore, 100);
        assert_eq!(m.points, 0);
    }

    #[test]
    fn test_scoring_is_pure() {
        let (targets, unclaimed) = pools("tea", "pots");
        let a = score_word("teapots", &targets, &unclaimed, Priority::MaximizeNetScore, 2);
        let b = score_word("teapots", &targets, &unclaimed, Priority::MaximizeNetScore, 2);
        assert_eq!(a, b);
        assert_eq!(targets, LetterPool::new("tea"));
    }

    #[test]
    fn test_rank() {
        let m = |word: &str, points, winning| Move {
            word: word.to_string(),
            points,
            winning,
        };
        let mut moves = vec![
            m("ab", 3, false),
            m("abc", 3, false),
            m("z", 1, true),
            m("abcd", 5, false),
            m("xy", 3, false),
        ];
        moves.sort_by(|a, b| a.rank(b));
        let words: Vec<&str> = moves.iter().map(|m| m.word.as_str()).collect();
        assert_eq!(words, vec!["z", "abcd", "abc", "ab", "xy"]);
    }
}
