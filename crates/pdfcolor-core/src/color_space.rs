//! Color-space family tags and destination pixel formats.
//!
//! [`ColorSpaceType`] names every color-space family a PDF declaration may
//! use, so that callers can tell an unsupported family apart from an
//! unrecognized name. [`PixelFormat`] is the layout a scanline has after
//! transcoding.

use std::fmt;
use std::str::FromStr;

/// PDF color-space family, as named by the first element of a color-space
/// array or by a bare name token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpaceType {
    /// DeviceGray (1 component).
    DeviceGray,
    /// DeviceRGB (3 components).
    DeviceRGB,
    /// DeviceCMYK (4 components).
    DeviceCMYK,
    /// CIE-based gray.
    CalGray,
    /// CIE-based RGB.
    CalRGB,
    /// CIE L*a*b*.
    Lab,
    /// ICC profile based space.
    ICCBased,
    /// Palette lookup over a base space.
    Indexed,
    /// Pattern painting space.
    Pattern,
    /// Single named colorant.
    Separation,
    /// Multiple named colorants.
    DeviceN,
    /// Placeholder for spaces that could not be resolved.
    Unknown,
}

impl ColorSpaceType {
    /// Resolve a PDF name (without the leading slash) to a family.
    ///
    /// Returns `None` for names that are not color-space families. The
    /// `Unknown` tag has no PDF name and is never returned.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        let ty = match name {
            b"DeviceGray" => ColorSpaceType::DeviceGray,
            b"DeviceRGB" => ColorSpaceType::DeviceRGB,
            b"DeviceCMYK" => ColorSpaceType::DeviceCMYK,
            b"CalGray" => ColorSpaceType::CalGray,
            b"CalRGB" => ColorSpaceType::CalRGB,
            b"Lab" => ColorSpaceType::Lab,
            b"ICCBased" => ColorSpaceType::ICCBased,
            b"Indexed" => ColorSpaceType::Indexed,
            b"Pattern" => ColorSpaceType::Pattern,
            b"Separation" => ColorSpaceType::Separation,
            b"DeviceN" => ColorSpaceType::DeviceN,
            _ => return None,
        };
        Some(ty)
    }

    /// The PDF name of this family, `None` for [`ColorSpaceType::Unknown`].
    pub fn as_name(&self) -> Option<&'static str> {
        match self {
            ColorSpaceType::DeviceGray => Some("DeviceGray"),
            ColorSpaceType::DeviceRGB => Some("DeviceRGB"),
            ColorSpaceType::DeviceCMYK => Some("DeviceCMYK"),
            ColorSpaceType::CalGray => Some("CalGray"),
            ColorSpaceType::CalRGB => Some("CalRGB"),
            ColorSpaceType::Lab => Some("Lab"),
            ColorSpaceType::ICCBased => Some("ICCBased"),
            ColorSpaceType::Indexed => Some("Indexed"),
            ColorSpaceType::Pattern => Some("Pattern"),
            ColorSpaceType::Separation => Some("Separation"),
            ColorSpaceType::DeviceN => Some("DeviceN"),
            ColorSpaceType::Unknown => None,
        }
    }

    /// Whether this is one of the three device families.
    pub fn is_device(&self) -> bool {
        matches!(
            self,
            ColorSpaceType::DeviceGray | ColorSpaceType::DeviceRGB | ColorSpaceType::DeviceCMYK
        )
    }
}

impl fmt::Display for ColorSpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_name().unwrap_or("Unknown"))
    }
}

impl FromStr for ColorSpaceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorSpaceType::from_name(s.as_bytes()).ok_or(())
    }
}

/// Pixel layout of a transcoded scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// One gray sample per pixel.
    Grayscale,
    /// Red, green, blue samples per pixel.
    RGB,
    /// Cyan, magenta, yellow, black samples per pixel.
    CMYK,
}

impl PixelFormat {
    /// Number of samples per pixel.
    pub fn component_count(&self) -> u32 {
        match self {
            PixelFormat::Grayscale => 1,
            PixelFormat::RGB => 3,
            PixelFormat::CMYK => 4,
        }
    }
}
