use crate::Error;
use log::info;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FromIterator;
use std::path::Path;

/// Locale used when none is given
pub const DEFAULT_LOCALE: &str = "en";

/// A multiset of letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterPool {
    counts: HashMap<char, usize>,
    len: usize,
}

impl LetterPool {
    pub fn new(letters: &str) -> LetterPool {
        letters.chars().collect()
    }

    pub fn count(&self, letter: char) -> usize {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Total number of letters, counting repeats
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove one occurrence of `letter`. Returns false if there is none left.
    pub fn take(&mut self, letter: char) -> bool {
        let n = match self.counts.get_mut(&letter) {
            Some(n) => n,
            None => return false,
        };
        *n -= 1;
        if *n == 0 {
            // pools with the same letters compare equal
            self.counts.remove(&letter);
        }
        self.len -= 1;
        true
    }

    /// True if every letter of `word` occurs at least as often in the pool as in the word.
    pub fn can_spell(&self, word: &str) -> bool {
        let mut used: HashMap<char, usize> = HashMap::new();
        word.chars().all(|c| {
            let n = used.entry(c).or_insert(0);
            *n += 1;
            *n <= self.count(c)
        })
    }
}

impl FromIterator<char> for LetterPool {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut pool = LetterPool::default();
        for c in iter {
            *pool.counts.entry(c).or_insert(0) += 1;
            pool.len += 1;
        }
        pool
    }
}

/// True if `word` can be formed from the letters in `available`.
pub fn word_is_playable(word: &str, available: &LetterPool) -> bool {
    available.can_spell(word)
}

/// An ordered list of lowercase words.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Create a dictionary from a list of words.
    ///
    /// Surrounding whitespace is trimmed and words are lowercased. Repeated words are kept
    /// once, at their first position.
    /// # Errors
    /// If no words are left.
    pub fn new<I, S>(words: I) -> Result<Dictionary, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if seen.insert(word.clone()) {
                kept.push(word);
            }
        }
        if kept.is_empty() {
            return Err(Error::EmptyDictionary);
        }
        Ok(Dictionary { words: kept })
    }

    /// Read one word per line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Dictionary, Error> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Dictionary::new(lines)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Dictionary, Error> {
        let file = File::open(path.as_ref())?;
        let dictionary = Dictionary::from_reader(BufReader::new(file))?;
        info!(
            "read {} words from {}",
            dictionary.len(),
            path.as_ref().display()
        );
        Ok(dictionary)
    }

    /// Read the wordlist `<dir>/<locale>.txt`.
    pub fn for_locale<P: AsRef<Path>>(dir: P, locale: &str) -> Result<Dictionary, Error> {
        let path = dir.as_ref().join(format!("{}.txt", locale.to_lowercase()));
        Dictionary::from_file(path)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words that can be formed from `available`, in dictionary order.
    pub fn playable(&self, available: &LetterPool) -> Vec<&str> {
        self.words
            .par_iter()
            .filter(|w| word_is_playable(w, available))
            .map(String::as_str)
            .collect()
    }

    /// Playable words, leaving out every word that is a strict prefix of a longer playable
    /// word.
    ///
    /// The result is ordered longest first; words of equal length keep dictionary order.
    pub fn unique_playable(&self, available: &LetterPool) -> Vec<&str> {
        let mut playable = self.playable(available);
        playable.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

        let mut blocked: HashSet<&str> = HashSet::new();
        let mut unique = Vec::new();
        for word in playable {
            if blocked.contains(word) {
                continue;
            }
            unique.push(word);
            for (i, _) in word.char_indices().skip(1) {
                blocked.insert(&word[..i]);
            }
        }
        unique
    }
}
