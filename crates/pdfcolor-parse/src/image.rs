//! Whole-image transcoding on top of per-row [`ColorSpaceFilter::fetch_scanline`].

use pdfcolor_core::{PixelFormat, Result};
use tracing::trace;

use crate::filter::{ColorSpaceFilter, ensure_len};

/// Pixel rows produced by [`decode_image`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Layout of every row in `data`.
    pub pixel_format: PixelFormat,
    /// Bytes per row in `data`.
    pub stride: usize,
    /// `height` rows of `stride` bytes.
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// Row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        self.data.get(start..start + self.stride)
    }
}

/// Transcode `height` rows of `data` through `filter`.
///
/// `data` must hold at least `height` rows of
/// [`ColorSpaceFilter::source_scanline_size`] bytes; trailing bytes are
/// ignored. Export-only and unknown spaces fail the same way their
/// per-row operations do.
pub fn decode_image(
    filter: &ColorSpaceFilter,
    data: &[u8],
    width: u32,
    height: u32,
    bits_per_component: u32,
) -> Result<DecodedImage> {
    let pixel_format = filter.pixel_format()?;
    let src_stride = filter.source_scanline_size(width, bits_per_component)?;
    let stride = filter.scanline_size(width, bits_per_component)?;
    let rows = height as usize;
    ensure_len(data, src_stride * rows)?;

    let mut out = vec![0u8; stride * rows];
    if stride > 0 && src_stride > 0 {
        for (dst, src) in out
            .chunks_exact_mut(stride)
            .zip(data.chunks_exact(src_stride))
        {
            filter.fetch_scanline(dst, src, width, bits_per_component)?;
        }
    }
    trace!(
        color_space = %filter.color_space_type(),
        width,
        height,
        stride,
        "decoded image"
    );

    Ok(DecodedImage {
        width,
        height,
        pixel_format,
        stride,
        data: out,
    })
}
