//! /Indexed color space: palette lookup over a device base space.

use lopdf::{Dictionary, Document, Object, Stream};
use pdfcolor_core::{ColorSpaceOptions, ColorSpaceType, PdfError, PixelFormat, Result};

use super::{ColorSpaceFilterPtr, ensure_len};

const UNSUPPORTED_BASE: &str = "Unsupported base color space in /Indexed color space";

/// Palette lookup filter.
///
/// Palette entries are always 8-bit samples of the base space, whatever the
/// image's /BitsPerComponent says.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedFilter {
    base: ColorSpaceFilterPtr,
    map_size: u32,
    lookup: Vec<u8>,
}

impl IndexedFilter {
    /// Create an indexed filter with `map_size` palette entries.
    ///
    /// `base` must be a device space and `lookup` must hold at least
    /// `map_size` entries of the base's component count.
    pub fn new(base: ColorSpaceFilterPtr, map_size: u32, lookup: Vec<u8>) -> Result<Self> {
        if map_size == 0 {
            return Err(PdfError::InvalidArgument(
                "/Indexed map size must be at least 1".to_string(),
            ));
        }
        if !base.is_trivial() {
            return Err(PdfError::InvalidArgument(format!(
                "/Indexed base must be a device color space, got /{}",
                base.color_space_type()
            )));
        }
        let required = map_size as usize * base.color_component_count()? as usize;
        if lookup.len() < required {
            return Err(PdfError::InvalidArgument(format!(
                "/Indexed lookup table has {} bytes, {required} required",
                lookup.len()
            )));
        }
        Ok(Self {
            base,
            map_size,
            lookup,
        })
    }

    /// The base color space palette entries are expressed in.
    pub fn base(&self) -> &ColorSpaceFilterPtr {
        &self.base
    }

    /// Number of palette entries.
    pub fn map_size(&self) -> u32 {
        self.map_size
    }

    /// Raw palette bytes.
    pub fn lookup(&self) -> &[u8] {
        &self.lookup
    }

    pub(super) fn pixel_format(&self) -> Result<PixelFormat> {
        self.base.pixel_format()
    }

    /// One index byte per pixel.
    pub(super) fn source_scanline_size(&self, width: u32, _bits_per_component: u32) -> usize {
        width as usize
    }

    pub(super) fn scanline_size(&self, width: u32, bits_per_component: u32) -> Result<usize> {
        match self.base.pixel_format()? {
            PixelFormat::RGB => Ok((3 * width as usize * bits_per_component as usize).div_ceil(8)),
            _ => Err(PdfError::UnsupportedFilter(UNSUPPORTED_BASE.to_string())),
        }
    }

    pub(super) fn fetch_scanline(
        &self,
        dst: &mut [u8],
        src: &[u8],
        width: u32,
        bits_per_component: u32,
    ) -> Result<()> {
        if self.base.color_space_type() != ColorSpaceType::DeviceRGB {
            return Err(PdfError::UnsupportedFilter(UNSUPPORTED_BASE.to_string()));
        }
        if bits_per_component != 8 {
            return Err(PdfError::UnsupportedFilter(
                "/BitsPerComponent != 8".to_string(),
            ));
        }

        let width = width as usize;
        ensure_len(src, width)?;
        ensure_len(dst, 3 * width)?;

        for (pixel, &index) in dst[..3 * width].chunks_exact_mut(3).zip(&src[..width]) {
            if u32::from(index) >= self.map_size {
                return Err(PdfError::InvariantViolation(format!(
                    "palette index {index} out of range for map size {}",
                    self.map_size
                )));
            }
            let entry = index as usize * 3;
            pixel.copy_from_slice(&self.lookup[entry..entry + 3]);
        }
        Ok(())
    }

    /// `[/Indexed base hival lookupRef]`, with the lookup table stored verbatim
    /// in a new stream object.
    pub(super) fn export_object(
        &self,
        objects: &mut Document,
        options: &ColorSpaceOptions,
    ) -> Result<Object> {
        let lookup_id = objects.add_object(Stream::new(Dictionary::new(), self.lookup.clone()));
        let base = self.base.export_object_with(objects, options)?;

        Ok(Object::Array(vec![
            Object::Name(b"Indexed".to_vec()),
            base,
            Object::Integer(i64::from(self.map_size) - 1),
            Object::Reference(lookup_id),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::filter::ColorSpaceFilter;

    fn rgb_palette() -> IndexedFilter {
        // red, green, blue
        IndexedFilter::new(
            Arc::new(ColorSpaceFilter::DeviceRGB),
            3,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_zero_map_size() {
        let err = IndexedFilter::new(Arc::new(ColorSpaceFilter::DeviceRGB), 0, vec![]).unwrap_err();
        assert!(matches!(err, PdfError::InvalidArgument(_)));
    }

    #[test]
    fn new_rejects_short_lookup() {
        let err =
            IndexedFilter::new(Arc::new(ColorSpaceFilter::DeviceRGB), 2, vec![0; 5]).unwrap_err();
        assert!(matches!(err, PdfError::InvalidArgument(_)));
    }

    #[test]
    fn new_rejects_non_device_base() {
        let inner = Arc::new(ColorSpaceFilter::Indexed(rgb_palette()));
        let err = IndexedFilter::new(inner, 1, vec![0; 3]).unwrap_err();
        assert!(matches!(err, PdfError::InvalidArgument(_)));
    }

    #[test]
    fn new_accepts_gray_base_with_one_byte_entries() {
        let indexed = IndexedFilter::new(
            Arc::new(ColorSpaceFilter::DeviceGray),
            4,
            vec![0, 85, 170, 255],
        )
        .unwrap();
        assert_eq!(indexed.map_size(), 4);
        assert_eq!(indexed.pixel_format(), Ok(PixelFormat::Grayscale));
    }

    #[test]
    fn accessors() {
        let indexed = rgb_palette();
        assert_eq!(indexed.map_size(), 3);
        assert_eq!(indexed.lookup().len(), 9);
        assert_eq!(indexed.base().color_space_type(), ColorSpaceType::DeviceRGB);
    }

    #[test]
    fn source_scanline_ignores_bit_depth() {
        let indexed = rgb_palette();
        assert_eq!(indexed.source_scanline_size(10, 1), 10);
        assert_eq!(indexed.source_scanline_size(10, 8), 10);
        assert_eq!(indexed.source_scanline_size(0, 8), 0);
    }

    #[test]
    fn scanline_size_for_rgb_base() {
        let indexed = rgb_palette();
        assert_eq!(indexed.scanline_size(10, 8), Ok(30));
        assert_eq!(indexed.scanline_size(3, 4), Ok(5));
        assert_eq!(indexed.scanline_size(1, 1), Ok(1));
    }

    #[test]
    fn scanline_size_rejects_gray_base() {
        let indexed =
            IndexedFilter::new(Arc::new(ColorSpaceFilter::DeviceGray), 2, vec![0, 255]).unwrap();
        assert_eq!(
            indexed.scanline_size(4, 8),
            Err(PdfError::UnsupportedFilter(UNSUPPORTED_BASE.to_string()))
        );
    }

    #[test]
    fn fetch_maps_every_index() {
        let indexed = rgb_palette();
        let src = [2u8, 0, 1, 1];
        let mut dst = [0u8; 12];
        indexed.fetch_scanline(&mut dst, &src, 4, 8).unwrap();
        assert_eq!(dst, [0, 0, 255, 255, 0, 0, 0, 255, 0, 0, 255, 0]);
    }

    #[test]
    fn fetch_rejects_index_equal_to_map_size() {
        let indexed = rgb_palette();
        let mut dst = [0u8; 6];
        let err = indexed.fetch_scanline(&mut dst, &[0, 3], 2, 8).unwrap_err();
        assert!(matches!(err, PdfError::InvariantViolation(_)));
    }

    #[test]
    fn fetch_rejects_non_eight_bit_depth() {
        let indexed = rgb_palette();
        let mut dst = [0u8; 6];
        assert_eq!(
            indexed.fetch_scanline(&mut dst, &[0, 1], 2, 4),
            Err(PdfError::UnsupportedFilter(
                "/BitsPerComponent != 8".to_string()
            ))
        );
    }

    #[test]
    fn fetch_rejects_non_rgb_base() {
        let indexed =
            IndexedFilter::new(Arc::new(ColorSpaceFilter::DeviceCMYK), 1, vec![0; 4]).unwrap();
        let mut dst = [0u8; 4];
        assert_eq!(
            indexed.fetch_scanline(&mut dst, &[0], 1, 8),
            Err(PdfError::UnsupportedFilter(UNSUPPORTED_BASE.to_string()))
        );
    }

    #[test]
    fn fetch_rejects_short_destination() {
        let indexed = rgb_palette();
        let mut dst = [0u8; 5];
        assert_eq!(
            indexed.fetch_scanline(&mut dst, &[0, 1], 2, 8),
            Err(PdfError::BufferTooSmall {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn export_allocates_lookup_stream() {
        let indexed = rgb_palette();
        let mut doc = Document::with_version("1.5");
        let obj = indexed
            .export_object(&mut doc, &ColorSpaceOptions::default())
            .unwrap();

        let arr = obj.as_array().unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr[0], Object::Name(b"Indexed".to_vec()));
        assert_eq!(arr[1], Object::Name(b"DeviceRGB".to_vec()));
        assert_eq!(arr[2], Object::Integer(2));

        let id = arr[3].as_reference().unwrap();
        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(stream.content, indexed.lookup());
        assert_eq!(doc.objects.len(), 1);
    }
}
