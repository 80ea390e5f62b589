//! Composed document to PDF
//!
//! Draws a [`ComposedDocument`] with printpdf's built-in Helvetica faces.
//! Layout positions use a top-left origin; PDF pages use bottom-left, so every
//! y is flipped against the page height here.

use std::io::{BufWriter, Write};

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use tracing::debug;

use crate::document::{Align, Block, ComposedDocument, Page, TableBlock, TextBlock};
use crate::error::{PdfError, Result};
use crate::metrics::{text_width, FontStyle, MM_PER_PT};

/// Share of the font size between the top of a line and its baseline
const ASCENT: f32 = 0.8;

const LAYER_NAME: &str = "Content";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}

/// Renderer for turning composed layouts into PDF bytes
pub struct PdfRenderer;

impl PdfRenderer {
    /// Serialize the document to an in-memory PDF
    pub fn render_to_bytes(document: &ComposedDocument) -> Result<Vec<u8>> {
        let pdf = Self::build(document)?;
        Ok(pdf.save_to_bytes()?)
    }

    /// Stream the document as PDF into `writer`
    pub fn write_to<W: Write>(document: &ComposedDocument, writer: W) -> Result<()> {
        let pdf = Self::build(document)?;
        let mut buffer = BufWriter::new(writer);
        pdf.save(&mut buffer)?;
        buffer.flush()?;
        Ok(())
    }

    fn build(document: &ComposedDocument) -> Result<PdfDocumentReference> {
        let first = document
            .pages
            .first()
            .ok_or_else(|| PdfError::Render("document has no pages".to_string()))?;

        let (pdf, page_index, layer_index) = PdfDocument::new(
            document.title.clone(),
            Mm(first.width),
            Mm(first.height),
            LAYER_NAME,
        );
        let fonts = Fonts {
            regular: pdf.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: pdf.add_builtin_font(BuiltinFont::HelveticaBold)?,
        };

        let layer = pdf.get_page(page_index).get_layer(layer_index);
        draw_page(&layer, &fonts, first);

        for page in document.pages.iter().skip(1) {
            let (page_index, layer_index) =
                pdf.add_page(Mm(page.width), Mm(page.height), LAYER_NAME);
            let layer = pdf.get_page(page_index).get_layer(layer_index);
            draw_page(&layer, &fonts, page);
        }

        debug!(
            file = %document.file_name,
            pages = document.page_count(),
            "rendered PDF pages"
        );
        Ok(pdf)
    }
}

fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, page: &Page) {
    for block in &page.blocks {
        match block {
            Block::Text(text) => draw_text(layer, fonts, page.height, text),
            Block::Table(table) => draw_table(layer, fonts, page.height, table),
        }
    }
}

fn draw_text(layer: &PdfLayerReference, fonts: &Fonts, page_height: f32, block: &TextBlock) {
    let x = match block.align {
        Align::Left => block.x,
        Align::Center => block.x - text_width(&block.text, block.style, block.font_size) / 2.0,
    };
    let baseline = block.y + block.font_size * MM_PER_PT * ASCENT;

    layer.use_text(
        block.text.as_str(),
        block.font_size,
        Mm(x),
        Mm(page_height - baseline),
        fonts.get(block.style),
    );
}

fn draw_table(layer: &PdfLayerReference, fonts: &Fonts, page_height: f32, table: &TableBlock) {
    let glyph_height = table.font_size * MM_PER_PT * ASCENT;
    // Baseline sits so the glyphs are centred in the row
    let offset = (table.row_height + glyph_height) / 2.0;

    for cell in &table.cells {
        layer.use_text(
            cell.text.as_str(),
            table.font_size,
            Mm(cell.x),
            Mm(page_height - (cell.y + offset)),
            fonts.get(FontStyle::Regular),
        );
    }
}
