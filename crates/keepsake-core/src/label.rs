//! Display token for the current position.

use std::fmt;

/// Where the reader is in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLabel {
    /// Index 0.
    Cover,
    /// Index strictly between 0 and N.
    Memory(usize),
    /// Index N: every page has been turned.
    End,
}

impl PageLabel {
    /// Label for `index` in a deck of `len` pages.
    ///
    /// The cover wins when `index` is both 0 and N.
    pub fn for_index(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Cover
        } else if index >= len {
            Self::End
        } else {
            Self::Memory(index)
        }
    }

    /// Human-facing title for indicators.
    pub fn title(&self) -> String {
        match self {
            Self::Cover => "Cover".to_string(),
            Self::Memory(i) => format!("Memory {i}"),
            Self::End => "The End".to_string(),
        }
    }
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cover => write!(f, "cover"),
            Self::Memory(i) => write!(f, "memory({i})"),
            Self::End => write!(f, "end"),
        }
    }
}
