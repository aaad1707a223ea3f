//! Word lookup for assembled words.

use crate::config::MIN_WORD_LEN;
use crate::error::{PlacementError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read word list: {0}")]
    Io(#[from] std::io::Error),
}

/// Word membership oracle. Lookups are always lowercase.
pub trait Dictionary {
    fn contains(&self, word: &str) -> bool;
}

/// Reject `word` if it is too short or unknown to `dictionary`.
pub fn check_word(dictionary: &dyn Dictionary, word: &str) -> Result<()> {
    if word.chars().count() < MIN_WORD_LEN {
        return Err(PlacementError::WordTooShort {
            word: word.to_string(),
            min: MIN_WORD_LEN,
        });
    }
    if !dictionary.contains(&word.to_lowercase()) {
        return Err(PlacementError::NotAWord {
            word: word.to_string(),
        });
    }
    Ok(())
}

/// Dictionary backed by a list of words, one per line
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| w.chars().count() >= MIN_WORD_LEN)
            .collect();
        Self { words }
    }

    /// Read a word list, skipping words shorter than [`MIN_WORD_LEN`].
    pub fn from_reader<R: BufRead>(reader: R) -> std::result::Result<Self, DictionaryError> {
        let lines = reader.lines().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::from_words(lines))
    }

    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, DictionaryError> {
        let path = path.as_ref();
        let list = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), words = list.len(), "Loaded word list");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
