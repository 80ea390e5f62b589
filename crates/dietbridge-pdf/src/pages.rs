//! Layout cursor and page builder
//!
//! The cursor is a plain value: every emission step takes one and hands back
//! the next. Only [`PageBuilder::start_new_page`] moves it back up, and then
//! onto a later page, so `(page, y)` never decreases during a composition.

use tracing::debug;

use crate::document::Page;

/// Vertical write position on a page
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cursor {
    page: usize,
    y: f32,
}

impl Cursor {
    /// 0-based page index
    pub fn page(&self) -> usize {
        self.page
    }

    /// Distance from the top of the page, in millimetres
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move down by `dy` (negative offsets are ignored)
    #[must_use]
    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy.max(0.0),
            ..self
        }
    }

    /// Move down to `y` if it lies below the cursor
    #[must_use]
    pub fn below(self, y: f32) -> Self {
        Self {
            y: self.y.max(y),
            ..self
        }
    }
}

/// Owns the ordered pages of a document under construction
#[derive(Debug)]
pub struct PageBuilder {
    width: f32,
    height: f32,
    top_margin: f32,
    pages: Vec<Page>,
}

impl PageBuilder {
    /// Create a builder holding one empty page
    pub fn new(width: f32, height: f32, top_margin: f32) -> Self {
        Self {
            width,
            height,
            top_margin,
            pages: vec![Page::new(1, width, height)],
        }
    }

    /// Cursor at the top margin of the current page
    pub fn top(&self) -> Cursor {
        Cursor {
            page: self.pages.len() - 1,
            y: self.top_margin,
        }
    }

    pub fn current_page(&self) -> &Page {
        let last = self.pages.len() - 1;
        &self.pages[last]
    }

    pub fn current_page_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Append a blank page and return a cursor at its top margin
    pub fn start_new_page(&mut self) -> Cursor {
        let number = self.pages.len() + 1;
        self.pages.push(Page::new(number, self.width, self.height));
        debug!(page = number, "started new page");
        self.top()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Hand over the finished pages
    pub fn finalize(self) -> Vec<Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_starts_with_one_page() {
        let builder = PageBuilder::new(210.0, 297.0, 20.0);
        assert_eq!(builder.page_count(), 1);
        assert_eq!(builder.current_page().number, 1);

        let cursor = builder.top();
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.y(), 20.0);
    }

    #[test]
    fn test_start_new_page_resets_cursor() {
        let mut builder = PageBuilder::new(210.0, 297.0, 20.0);
        let before = builder.top().advance(240.0);
        let after = builder.start_new_page();

        assert_eq!(builder.page_count(), 2);
        assert_eq!(builder.current_page().number, 2);
        assert_eq!(after.page(), 1);
        assert_eq!(after.y(), 20.0);
        assert!(after > before);
    }

    #[test]
    fn test_cursor_never_moves_up() {
        let cursor = PageBuilder::new(210.0, 297.0, 20.0).top();
        assert_eq!(cursor.advance(-5.0).y(), 20.0);
        assert_eq!(cursor.advance(7.5).y(), 27.5);
        assert_eq!(cursor.below(10.0).y(), 20.0);
        assert_eq!(cursor.below(42.0).y(), 42.0);
    }

    #[test]
    fn test_finalize_keeps_order() {
        let mut builder = PageBuilder::new(210.0, 297.0, 20.0);
        builder.start_new_page();
        builder.start_new_page();
        let numbers: Vec<_> = builder.finalize().iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
