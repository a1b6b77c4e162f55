//! Typed secret word.

use std::collections::VecDeque;

/// Watches typed characters for a secret word.
///
/// Keeps the last `len(word)` characters, lowercased. A match fires once and
/// clears the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretWord {
    word: Vec<char>,
    recent: VecDeque<char>,
}

impl SecretWord {
    /// Watch for `word` (case-insensitive). An empty word never matches.
    pub fn new(word: &str) -> Self {
        let word: Vec<char> = word.chars().flat_map(char::to_lowercase).collect();
        Self { recent: VecDeque::with_capacity(word.len()), word }
    }

    /// Record a typed character. Returns `true` when the word is completed.
    pub fn push(&mut self, c: char) -> bool {
        if self.word.is_empty() {
            return false;
        }
        for lower in c.to_lowercase() {
            if self.recent.len() == self.word.len() {
                self.recent.pop_front();
            }
            self.recent.push_back(lower);
        }
        if self.recent.iter().eq(self.word.iter()) {
            self.recent.clear();
            return true;
        }
        false
    }

    /// Forget partial input.
    pub fn reset(&mut self) {
        self.recent.clear();
    }
}
