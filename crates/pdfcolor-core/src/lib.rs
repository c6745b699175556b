//! pdfcolor-core: Backend-independent color-space types.
//!
//! This crate provides the foundational types (ColorSpaceType, PixelFormat,
//! Color) together with the error, warning and option types shared by the
//! color-space filters in pdfcolor-parse. It has no required external
//! dependencies.

pub mod color;
pub mod color_space;
pub mod error;

pub use color::Color;
pub use color_space::{ColorSpaceType, PixelFormat};
pub use error::{ColorSpaceOptions, ColorSpaceWarning, PdfError, Result, WarningCode};
