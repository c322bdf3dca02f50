use crate::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::read_to_string;

/// A source of valid words.
///
/// Words are compared in uppercase. Implementations must accept any case in
/// [`contains`](Dictionary::contains).
pub trait Dictionary {
    /// Returns true if `word` is a valid word
    fn contains(&self, word: &str) -> bool;

    /// All words in the dictionary
    fn words(&self) -> Vec<&str>;
}

/// A dictionary held in memory.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordList {
    words: HashSet<String>,
    /// Path of the wordfile used to build the wordlist.
    /// Empty if the wordlist is not build from a file.
    pub wordfile: String,
}

impl fmt::Display for WordList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<Wordlist: {} words from '{}'>",
            self.words.len(),
            self.wordfile
        )
    }
}

impl WordList {
    /// Read the wordlist from a file. The file must be encoded in utf-8 and
    /// have one word per line. Empty lines are skipped.
    /// ## Errors
    /// Fails if the wordlist can not be read.
    pub fn from_file(wordfile: &str) -> Result<WordList, Error> {
        let contents = read_to_string(wordfile).map_err(|source| Error::ReadError {
            path: String::from(wordfile),
            source,
        })?;
        let mut wordlist = WordList::from_words(&contents.lines().collect::<Vec<_>>());
        wordlist.wordfile = String::from(wordfile);
        Ok(wordlist)
    }

    /// Build a wordlist from a list of words.
    /// ## Examples
    /// ```
    /// use scrabble_engine::{Dictionary, WordList};
    /// let wordlist = WordList::from_words(&["rust", "Crab"]);
    /// assert!(wordlist.contains("CRAB"));
    /// assert!(wordlist.contains("rust"));
    /// assert!(!wordlist.contains("ferris"));
    /// ```
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> WordList {
        let words = words
            .iter()
            .map(|word| word.as_ref().trim())
            .filter(|word| !word.is_empty())
            .map(str::to_uppercase)
            .collect();
        WordList {
            words,
            wordfile: String::new(),
        }
    }

    /// The number of words in the wordlist
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    fn words(&self) -> Vec<&str> {
        self.words.iter().map(String::as_str).collect()
    }
}

/// Extra words accepted during one game, on top of the dictionary.
///
/// Custom words count when a move is committed, but not when it is challenged.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomWords(Vec<String>);

impl CustomWords {
    pub fn new() -> CustomWords {
        CustomWords::default()
    }

    /// Add `word` in uppercase. Returns false if it is empty or already present.
    pub fn add(&mut self, word: &str) -> bool {
        let word = word.trim().to_uppercase();
        if word.is_empty() || self.0.contains(&word) {
            return false;
        }
        self.0.push(word);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_uppercase();
        self.0.iter().any(|w| *w == word)
    }

    pub fn iter(&self) -> std::slice::Iter<String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }
}

impl<S: AsRef<str>> From<&[S]> for CustomWords {
    fn from(words: &[S]) -> Self {
        let mut custom = CustomWords::new();
        for word in words {
            custom.add(word.as_ref());
        }
        custom
    }
}
