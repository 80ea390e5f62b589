//! Composed document structure
//!
//! A [`ComposedDocument`] is the finished, positioned layout of one diet
//! plan: an ordered list of pages, each holding text and table blocks placed
//! in millimetres from the top-left corner. It is independent of the PDF
//! backend, which makes layouts comparable and inspectable.

use serde::Serialize;

use crate::metrics::FontStyle;

/// What a block represents in the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Title,
    Metadata,
    Description,
    EmptyPlanNotice,
    DayHeader,
    MealHeading,
    IngredientsLabel,
    Ingredient,
    Instruction,
    NutritionTable,
    Footer,
}

/// Horizontal anchoring of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// `x` is the left edge
    #[default]
    Left,
    /// `x` is the centre
    Center,
}

/// A single line of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: String,
    pub x: f32,
    /// Top of the line
    pub y: f32,
    /// Vertical space reserved for the line
    pub height: f32,
    pub font_size: f32,
    pub style: FontStyle,
    pub align: Align,
}

/// One positioned table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub text: String,
    pub x: f32,
    /// Top of the row
    pub y: f32,
}

/// A borderless table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    pub kind: BlockKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub row_height: f32,
    pub font_size: f32,
    pub cells: Vec<TableCell>,
}

/// A positioned block on a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "lowercase")]
pub enum Block {
    Text(TextBlock),
    Table(TableBlock),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text(t) => t.kind,
            Block::Table(t) => t.kind,
        }
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        match self {
            Block::Text(t) => t.y,
            Block::Table(t) => t.y,
        }
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        match self {
            Block::Text(t) => t.y + t.height,
            Block::Table(t) => t.y + t.row_height * t.cells.len() as f32,
        }
    }

    /// Visible text of the block, one entry per line or cell
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Block::Text(t) => vec![t.text.as_str()],
            Block::Table(t) => t.cells.iter().map(|c| c.text.as_str()).collect(),
        }
    }
}

/// One page of the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(number: usize, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Blocks of the given kind, in emission order
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| b.kind() == kind)
    }

    /// Footer text, if stamped
    pub fn footer(&self) -> Option<&str> {
        self.blocks_of(BlockKind::Footer).find_map(|b| match b {
            Block::Text(t) => Some(t.text.as_str()),
            Block::Table(_) => None,
        })
    }
}

/// A finished, paginated diet plan layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedDocument {
    /// Document title (PDF metadata)
    pub title: String,
    /// Name the document is saved under
    pub file_name: String,
    pub pages: Vec<Page>,
}

impl ComposedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every block with its 1-based page number, in emission order
    pub fn blocks(&self) -> impl Iterator<Item = (usize, &Block)> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter().map(move |b| (page.number, b)))
    }

    /// Text lines of every block of `kind`, across all pages
    pub fn lines_of(&self, kind: BlockKind) -> Vec<&str> {
        self.blocks()
            .filter(|(_, b)| b.kind() == kind)
            .flat_map(|(_, b)| b.lines())
            .collect()
    }

    /// Plain-text outline of the layout, one block per line
    pub fn outline(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} ({} pages)\n", self.file_name, self.page_count()));

        for page in &self.pages {
            output.push_str(&format!("\nPage {}\n", page.number));
            for block in &page.blocks {
                let label = format!("{:?}", block.kind());
                output.push_str(&format!(
                    "  {:>6.1}  {:<16} {}\n",
                    block.top(),
                    label,
                    block.lines().join(" | ")
                ));
            }
        }

        output
    }
}
