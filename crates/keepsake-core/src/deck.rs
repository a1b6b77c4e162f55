//! Pages and the deck that orders them.
//!
//! A [`Page`] carries only what navigation needs: its position and two flags.
//! What a page shows is owned by whoever renders it.

use crate::error::DeckError;

/// Resting visual state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFace {
    /// Page lies on the right-hand stack (not yet read).
    #[default]
    Unflipped,
    /// Page has been turned over to the left-hand stack.
    Flipped,
}

/// Transient animation flag of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMotion {
    /// Not animating.
    #[default]
    Idle,
    /// A flip animation is in flight for this page.
    Flipping,
}

/// Opaque page handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    index: usize,
    face: PageFace,
    motion: PageMotion,
}

impl Page {
    fn new(index: usize) -> Self {
        Self { index, face: PageFace::Unflipped, motion: PageMotion::Idle }
    }

    /// Position of this page in the deck.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Resting visual state.
    pub fn face(&self) -> PageFace {
        self.face
    }

    /// Animation flag.
    pub fn motion(&self) -> PageMotion {
        self.motion
    }

    /// Shorthand for `face() == PageFace::Flipped`.
    pub fn is_flipped(&self) -> bool {
        self.face == PageFace::Flipped
    }

    /// Shorthand for `motion() == PageMotion::Flipping`.
    pub fn is_flipping(&self) -> bool {
        self.motion == PageMotion::Flipping
    }
}

/// Fixed, ordered collection of pages.
///
/// The number of pages never changes after construction. Flags are only
/// mutable from inside this crate so that [`crate::PageNavigator`] stays the
/// single writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pages: Vec<Page>,
}

impl Deck {
    /// Create a deck of `len` unflipped, idle pages.
    pub fn new(len: usize) -> Result<Self, DeckError> {
        if len == 0 {
            return Err(DeckError::Empty);
        }
        Ok(Self { pages: (0..len).map(Page::new).collect() })
    }

    /// Number of pages (N).
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at `index`. `None` past the last page.
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// All pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Iterate over pages in order.
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Number of pages currently flagged as flipping.
    pub fn flipping_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_flipping()).count()
    }

    pub(crate) fn set_motion(&mut self, index: usize, motion: PageMotion) {
        if let Some(page) = self.pages.get_mut(index) {
            page.motion = motion;
        }
    }

    pub(crate) fn settle(&mut self, index: usize, face: PageFace) {
        if let Some(page) = self.pages.get_mut(index) {
            page.motion = PageMotion::Idle;
            page.face = face;
        }
    }

    /// Pages before `boundary` become flipped, the rest unflipped, all idle.
    pub(crate) fn reset_to(&mut self, boundary: usize) {
        for page in &mut self.pages {
            page.motion = PageMotion::Idle;
            page.face = if page.index < boundary { PageFace::Flipped } else { PageFace::Unflipped };
        }
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
