//! Error types for PDF export

use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur during PDF export
#[derive(Error, Debug)]
pub enum PdfError {
    /// The PDF backend rejected the document
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Both the direct save and the blob fallback failed
    #[error("Could not generate PDF {file_name}: {primary}; fallback save failed: {fallback}")]
    Emission {
        file_name: String,
        primary: Box<PdfError>,
        fallback: Box<PdfError>,
    },
}

impl From<printpdf::Error> for PdfError {
    fn from(err: printpdf::Error) -> Self {
        PdfError::Render(err.to_string())
    }
}
