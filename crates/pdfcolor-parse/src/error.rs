//! Error types for the lopdf-backed filter layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps `lopdf` and I/O errors and converts them to [`PdfError`].

use pdfcolor_core::PdfError;
use thiserror::Error;

/// Error type for operations that touch the PDF object backend.
///
/// Wraps backend-specific errors and provides conversion to [`PdfError`]
/// for unified error handling across the library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from the object backend (missing object, bad stream filter).
    #[error("PDF object error: {0}")]
    Lopdf(#[from] lopdf::Error),

    /// Error reading or writing stream data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Lopdf(e) => PdfError::ParseError(e.to_string()),
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            BackendError::Core(e) => e,
        }
    }
}
