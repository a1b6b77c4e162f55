//! Album content shown on the pages.

/// One page of the album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    /// Heading shown at the top of the page.
    pub title: String,
    /// Body text.
    pub caption: String,
}

impl Memory {
    /// Memory with the given title and caption.
    pub fn new(title: impl Into<String>, caption: impl Into<String>) -> Self {
        Self { title: title.into(), caption: caption.into() }
    }
}

/// Ordered pages plus a title. Page 0 is the front cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Name of the book, shown on the welcome banner.
    pub title: String,
    /// Pages in reading order.
    pub pages: Vec<Memory>,
}

/// Pages of the bundled album.
const DEFAULT_PAGES: usize = 25;

impl Album {
    /// Album with the given title and pages.
    pub fn new(title: impl Into<String>, pages: Vec<Memory>) -> Self {
        Self { title: title.into(), pages }
    }

    /// Number of pages (N).
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the album has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at `index`. `None` at the back cover.
    pub fn page(&self, index: usize) -> Option<&Memory> {
        self.pages.get(index)
    }
}

impl Default for Album {
    /// A 25-page book: a cover, 23 memories and a closing page.
    fn default() -> Self {
        let mut pages = Vec::with_capacity(DEFAULT_PAGES);
        pages.push(Memory::new("Our Story", "Turn the page to begin."));
        for i in 1..DEFAULT_PAGES - 1 {
            pages.push(Memory::new(format!("Memory {i}"), "A moment worth keeping."));
        }
        pages.push(Memory::new("To Be Continued", "The best pages are still unwritten."));
        Self::new("Keepsake", pages)
    }
}
