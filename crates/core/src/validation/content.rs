//! Banned-word filtering for free-text fields.

use std::collections::HashSet;

use crate::error::CoreError;

/// Case-insensitive whole-word filter over free text.
///
/// Text is split on every non-alphanumeric character, so `"Scam!"` and
/// `"a scam-toy"` both match the banned word `scam`, while `"scampi"` does not.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    banned: HashSet<String>,
}

impl ContentFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { banned }
    }

    pub fn is_empty(&self) -> bool {
        self.banned.is_empty()
    }

    /// The first banned word found in `text`, if any.
    pub fn find_banned(&self, text: &str) -> Option<String> {
        if self.banned.is_empty() {
            return None;
        }
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .find(|w| self.banned.contains(w))
    }

    /// Fail with `CoreError::Validation` naming `field` when `text` contains a banned word.
    pub fn check(&self, field: &str, text: &str) -> Result<(), CoreError> {
        match self.find_banned(text) {
            Some(word) => Err(CoreError::Validation(format!(
                "{field} contains a banned word: {word}"
            ))),
            None => Ok(()),
        }
    }
}
