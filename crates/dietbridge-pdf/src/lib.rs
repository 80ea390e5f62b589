//! dietbridge-pdf - Paginated PDF export of diet plans
//!
//! This crate turns a [`DietPlanRecord`] into a downloadable, print-ready PDF.
//!
//! # Architecture
//!
//! The export pipeline consists of three stages:
//!
//! 1. **Composer** - Lays the record out onto pages, breaking pages before any
//!    block that would overflow and stamping `Page i of N` footers
//! 2. **Renderer** - Draws the composed pages with printpdf
//! 3. **Emitter** - Saves the PDF directly, or as a serialized blob if the
//!    direct save fails
//!
//! # Example
//!
//! ```ignore
//! use dietbridge_model::DietPlanRecord;
//! use dietbridge_pdf::{export, DirectoryTarget, LayoutOptions};
//!
//! let record = DietPlanRecord::from_json_str(&json)?;
//! let target = DirectoryTarget::create("exports")?;
//! let emitted = export(&record, &target, &LayoutOptions::default())?;
//! println!("saved {}", emitted.path.display());
//! ```

mod composer;
mod document;
mod emit;
mod error;
mod layout;
mod metrics;
mod pages;
mod renderer;
mod table;

pub use composer::{footer_text, nutrition_rows, Composer, EMPTY_PLAN_NOTICE};
pub use document::{
    Align, Block, BlockKind, ComposedDocument, Page, TableBlock, TableCell, TextBlock,
};
pub use emit::{DirectoryTarget, EmitRoute, Emitted, FileEmitter, SaveTarget};
pub use error::{PdfError, Result};
pub use layout::{DateStyle, Geometry, LayoutOptions, PageSize, DEFAULT_BRAND};
pub use metrics::{text_width, wrap_text, FontStyle};
pub use pages::{Cursor, PageBuilder};
pub use renderer::PdfRenderer;
pub use table::{PlainTableRenderer, TableRenderer, TableSpec};

use dietbridge_model::DietPlanRecord;

/// Compose a diet plan and save it through `target`
///
/// Fails only when both the direct and the blob save fail.
pub fn export<S: SaveTarget>(
    record: &DietPlanRecord,
    target: S,
    options: &LayoutOptions,
) -> Result<Emitted> {
    let document = Composer::new(options.clone()).compose(record);
    FileEmitter::new(target).emit(&document)
}
