//! Screen regions for the book, its controls, and the indicator.
//!
//! Layout is computed in terminal cells. Hit-testing happens in surface
//! pixels, so regions convert through a nominal [`CellSize`].

use crate::pointer::{Bounds, Point};

/// Nominal pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    /// Cell width in pixels.
    pub width: f64,
    /// Cell height in pixels.
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self { width: 8.0, height: 16.0 }
    }
}

impl CellSize {
    /// Pixel position of the centre of cell `(col, row)`.
    pub fn cell_center(&self, col: u16, row: u16) -> Point {
        Point::new(
            (f64::from(col) + 0.5) * self.width,
            (f64::from(row) + 0.5) * self.height,
        )
    }
}

/// Rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl CellRect {
    /// Rectangle at `(x, y)` of the given size.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Same region in surface pixels.
    pub fn to_bounds(&self, cell: CellSize) -> Bounds {
        Bounds {
            left: f64::from(self.x) * cell.width,
            top: f64::from(self.y) * cell.height,
            width: f64::from(self.width) * cell.width,
            height: f64::from(self.height) * cell.height,
        }
    }
}

const FOOTER_ROWS: u16 = 3;
const STATUS_ROWS: u16 = 1;
const BUTTON_COLS: u16 = 12;

/// Regions of the screen.
///
/// ```text
/// ┌────────────────────────────┐
/// │            book            │
/// ├────────┬──────────┬────────┤
/// │ ◀ Prev │ indicator│ Next ▶ │
/// ├────────┴──────────┴────────┤
/// │ status                     │
/// └────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// The page surface.
    pub book: CellRect,
    /// Previous-page button.
    pub prev_button: CellRect,
    /// Page indicator between the buttons.
    pub indicator: CellRect,
    /// Next-page button.
    pub next_button: CellRect,
    /// Status line.
    pub status: CellRect,
}

impl ScreenLayout {
    /// Layout for a terminal of `cols` x `rows`.
    ///
    /// Small terminals shrink the book first; regions that do not fit come
    /// back empty.
    pub fn compute(cols: u16, rows: u16) -> Self {
        let status_rows = STATUS_ROWS.min(rows);
        let footer_rows = FOOTER_ROWS.min(rows - status_rows);
        let book_rows = rows - status_rows - footer_rows;

        let footer_y = book_rows;
        let button_cols = BUTTON_COLS.min(cols / 3);
        let indicator_cols = cols - button_cols * 2;
        let next_x = button_cols + indicator_cols;

        Self {
            book: CellRect::new(0, 0, cols, book_rows),
            prev_button: CellRect::new(0, footer_y, button_cols, footer_rows),
            indicator: CellRect::new(button_cols, footer_y, indicator_cols, footer_rows),
            next_button: CellRect::new(next_x, footer_y, button_cols, footer_rows),
            status: CellRect::new(0, footer_y + footer_rows, cols, status_rows),
        }
    }
}
