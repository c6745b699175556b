//! Color-space filters.
//!
//! A [`ColorSpaceFilter`] is an immutable description of one color space that
//! knows how big a scanline is before and after transcoding, how to transcode
//! one scanline into its [`PixelFormat`], and how to write itself back into a
//! document as a color-space object. Filters are shared through
//! [`ColorSpaceFilterPtr`].

mod device;
mod indexed;
mod lab;
mod separation;

use std::sync::Arc;

use lopdf::{Document, Object};
use pdfcolor_core::{ColorSpaceOptions, ColorSpaceType, PdfError, PixelFormat, Result};

pub use indexed::IndexedFilter;
pub use lab::{DEFAULT_BLACK_POINT, DEFAULT_RANGE, LabFilter};
pub use separation::SeparationFilter;

/// Shared handle to an immutable filter.
pub type ColorSpaceFilterPtr = Arc<ColorSpaceFilter>;

const UNKNOWN_UNSUPPORTED: &str = "Operation unsupported in unknown type color space";

/// A parsed or constructed color space.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpaceFilter {
    /// DeviceGray (1 component, raw encoded).
    DeviceGray,
    /// DeviceRGB (3 components, raw encoded).
    DeviceRGB,
    /// DeviceCMYK (4 components, raw encoded).
    DeviceCMYK,
    /// Palette lookup over a device base space.
    Indexed(IndexedFilter),
    /// Named colorant with a device alternate color. Export only.
    Separation(SeparationFilter),
    /// CIE L*a*b* parameters. Export only.
    Lab(LabFilter),
    /// Placeholder for a color space that could not be resolved.
    Unknown,
}

impl ColorSpaceFilter {
    /// The color-space family of this filter.
    pub fn color_space_type(&self) -> ColorSpaceType {
        match self {
            ColorSpaceFilter::DeviceGray => ColorSpaceType::DeviceGray,
            ColorSpaceFilter::DeviceRGB => ColorSpaceType::DeviceRGB,
            ColorSpaceFilter::DeviceCMYK => ColorSpaceType::DeviceCMYK,
            ColorSpaceFilter::Indexed(_) => ColorSpaceType::Indexed,
            ColorSpaceFilter::Separation(_) => ColorSpaceType::Separation,
            ColorSpaceFilter::Lab(_) => ColorSpaceType::Lab,
            ColorSpaceFilter::Unknown => ColorSpaceType::Unknown,
        }
    }

    /// Whether source sample bytes are already the final pixel bytes.
    pub fn is_raw_encoded(&self) -> Result<bool> {
        match self {
            ColorSpaceFilter::DeviceGray
            | ColorSpaceFilter::DeviceRGB
            | ColorSpaceFilter::DeviceCMYK => Ok(true),
            ColorSpaceFilter::Indexed(_) => Ok(false),
            _ => Err(self.not_implemented("raw encoding query")),
        }
    }

    /// Whether this space maps components directly to device channels.
    pub fn is_trivial(&self) -> bool {
        self.device_components().is_some()
    }

    /// Pixel format of a transcoded scanline.
    pub fn pixel_format(&self) -> Result<PixelFormat> {
        match self {
            ColorSpaceFilter::DeviceGray => Ok(PixelFormat::Grayscale),
            ColorSpaceFilter::DeviceRGB => Ok(PixelFormat::RGB),
            ColorSpaceFilter::DeviceCMYK => Ok(PixelFormat::CMYK),
            ColorSpaceFilter::Indexed(indexed) => indexed.pixel_format(),
            _ => Err(self.not_implemented("pixel format")),
        }
    }

    /// Size in bytes of one row as stored in the source encoding.
    pub fn source_scanline_size(&self, width: u32, bits_per_component: u32) -> Result<usize> {
        if let Some(components) = self.device_components() {
            return Ok(device::raw_scanline_size(
                components,
                width,
                bits_per_component,
            ));
        }
        match self {
            ColorSpaceFilter::Indexed(indexed) => {
                Ok(indexed.source_scanline_size(width, bits_per_component))
            }
            _ => Err(self.not_implemented("source scanline size")),
        }
    }

    /// Size in bytes of one row after conversion to [`Self::pixel_format`].
    pub fn scanline_size(&self, width: u32, bits_per_component: u32) -> Result<usize> {
        if let Some(components) = self.device_components() {
            return Ok(device::raw_scanline_size(
                components,
                width,
                bits_per_component,
            ));
        }
        match self {
            ColorSpaceFilter::Indexed(indexed) => indexed.scanline_size(width, bits_per_component),
            _ => Err(self.not_implemented("scanline size")),
        }
    }

    /// Transcode one row from `src` into `dst`.
    pub fn fetch_scanline(
        &self,
        dst: &mut [u8],
        src: &[u8],
        width: u32,
        bits_per_component: u32,
    ) -> Result<()> {
        if let Some(components) = self.device_components() {
            return device::fetch_raw_scanline(components, dst, src, width, bits_per_component);
        }
        match self {
            ColorSpaceFilter::Indexed(indexed) => {
                indexed.fetch_scanline(dst, src, width, bits_per_component)
            }
            _ => Err(self.not_implemented("scanline fetch")),
        }
    }

    /// Build the PDF representation of this color space with default options.
    ///
    /// Stream-backed parts (lookup tables, tint functions) are allocated as
    /// new indirect objects in `objects`.
    pub fn export_object(&self, objects: &mut Document) -> Result<Object> {
        self.export_object_with(objects, &ColorSpaceOptions::default())
    }

    /// Build the PDF representation of this color space.
    pub fn export_object_with(
        &self,
        objects: &mut Document,
        options: &ColorSpaceOptions,
    ) -> Result<Object> {
        match self {
            ColorSpaceFilter::DeviceGray
            | ColorSpaceFilter::DeviceRGB
            | ColorSpaceFilter::DeviceCMYK => Ok(device::export_name(self.color_space_type())),
            ColorSpaceFilter::Indexed(indexed) => indexed.export_object(objects, options),
            ColorSpaceFilter::Separation(separation) => separation.export_object(objects, options),
            ColorSpaceFilter::Lab(lab) => Ok(lab.export_object()),
            ColorSpaceFilter::Unknown => Err(self.not_implemented("export")),
        }
    }

    /// Number of color components per sample.
    pub fn color_component_count(&self) -> Result<u32> {
        if let Some(components) = self.device_components() {
            return Ok(components);
        }
        match self {
            ColorSpaceFilter::Indexed(_) | ColorSpaceFilter::Separation(_) => Ok(1),
            ColorSpaceFilter::Lab(_) => Ok(3),
            _ => Err(self.not_implemented("component count")),
        }
    }

    fn device_components(&self) -> Option<u32> {
        match self {
            ColorSpaceFilter::DeviceGray => Some(1),
            ColorSpaceFilter::DeviceRGB => Some(3),
            ColorSpaceFilter::DeviceCMYK => Some(4),
            _ => None,
        }
    }

    fn not_implemented(&self, operation: &str) -> PdfError {
        match self {
            ColorSpaceFilter::Unknown => PdfError::NotImplemented(UNKNOWN_UNSUPPORTED.to_string()),
            _ => PdfError::NotImplemented(format!(
                "{operation} is not available for /{} color space",
                self.color_space_type()
            )),
        }
    }
}

/// Fail with [`PdfError::BufferTooSmall`] unless `buf` holds `expected` bytes.
pub(crate) fn ensure_len(buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() < expected {
        return Err(PdfError::BufferTooSmall {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}
