//! DeviceGray, DeviceRGB and DeviceCMYK scanline handling.
//!
//! Device samples are stored exactly as pixels, so transcoding is a copy.

use lopdf::Object;
use pdfcolor_core::{ColorSpaceType, PdfError, Result};

use super::ensure_len;

/// `ceil(components * width * bits_per_component / 8)`.
pub(super) fn raw_scanline_size(components: u32, width: u32, bits_per_component: u32) -> usize {
    (components as usize * width as usize * bits_per_component as usize).div_ceil(8)
}

/// Copy `components * width * bits_per_component / 8` bytes from `src` to `dst`.
///
/// Only whole-byte depths are accepted; packed sub-byte rows have to be
/// copied by the caller using the full scanline size.
pub(super) fn fetch_raw_scanline(
    components: u32,
    dst: &mut [u8],
    src: &[u8],
    width: u32,
    bits_per_component: u32,
) -> Result<()> {
    if bits_per_component % 8 != 0 {
        return Err(PdfError::UnsupportedFilter(format!(
            "/BitsPerComponent {bits_per_component} is not a multiple of 8"
        )));
    }
    let len = components as usize * width as usize * bits_per_component as usize / 8;
    ensure_len(src, len)?;
    ensure_len(dst, len)?;
    dst[..len].copy_from_slice(&src[..len]);
    Ok(())
}

/// The bare name token of a device space.
pub(super) fn export_name(ty: ColorSpaceType) -> Object {
    Object::Name(ty.to_string().into_bytes())
}
