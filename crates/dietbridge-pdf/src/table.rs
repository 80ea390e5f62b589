//! Tabular layout
//!
//! The composer hands a table renderer a start position, a width and the row
//! labels; the renderer places the table on the page and reports the y just
//! below what it used.

use crate::document::{Block, BlockKind, Page, TableBlock, TableCell};
use crate::metrics::{truncate_to_width, FontStyle};

/// Horizontal padding inside each cell
const CELL_PADDING: f32 = 2.0;

/// Request to lay out a single-column table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub kind: BlockKind,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub rows: Vec<String>,
    pub font_size: f32,
    pub row_height: f32,
}

impl TableSpec {
    /// Total height the rows occupy
    pub fn height(&self) -> f32 {
        self.rows.len() as f32 * self.row_height
    }
}

/// Lays out a table on a page
pub trait TableRenderer {
    /// Place the table on `page` and return the y immediately below it
    fn draw(&self, page: &mut Page, spec: &TableSpec) -> f32;
}

/// Borderless single-column table, one cell per row
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTableRenderer;

impl TableRenderer for PlainTableRenderer {
    fn draw(&self, page: &mut Page, spec: &TableSpec) -> f32 {
        let text_width = (spec.width - 2.0 * CELL_PADDING).max(0.0);
        let cells = spec
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| TableCell {
                text: truncate_to_width(row, FontStyle::Regular, spec.font_size, text_width),
                x: spec.x + CELL_PADDING,
                y: spec.y + i as f32 * spec.row_height,
            })
            .collect();

        page.push(Block::Table(TableBlock {
            kind: spec.kind,
            x: spec.x,
            y: spec.y,
            width: spec.width,
            row_height: spec.row_height,
            font_size: spec.font_size,
            cells,
        }));

        spec.y + spec.height()
    }
}
