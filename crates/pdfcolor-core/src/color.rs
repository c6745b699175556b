//! Color values tagged with the color space they are expressed in.

use crate::color_space::ColorSpaceType;

/// A color value together with its color-space tag.
///
/// Device components are expected in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// DeviceGray value.
    Gray(f64),
    /// DeviceRGB value.
    Rgb(f64, f64, f64),
    /// DeviceCMYK value.
    Cmyk(f64, f64, f64, f64),
    /// CIE L*a*b* value.
    Lab(f64, f64, f64),
}

impl Color {
    /// Black in DeviceGray.
    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    /// The color space this value is expressed in.
    pub fn color_space(&self) -> ColorSpaceType {
        match self {
            Color::Gray(_) => ColorSpaceType::DeviceGray,
            Color::Rgb(..) => ColorSpaceType::DeviceRGB,
            Color::Cmyk(..) => ColorSpaceType::DeviceCMYK,
            Color::Lab(..) => ColorSpaceType::Lab,
        }
    }

    /// Component values in color-space order.
    pub fn components(&self) -> Vec<f64> {
        match *self {
            Color::Gray(g) => vec![g],
            Color::Rgb(r, g, b) => vec![r, g, b],
            Color::Cmyk(c, m, y, k) => vec![c, m, y, k],
            Color::Lab(l, a, b) => vec![l, a, b],
        }
    }

    /// Number of components.
    pub fn component_count(&self) -> u32 {
        match self {
            Color::Gray(_) => 1,
            Color::Rgb(..) | Color::Lab(..) => 3,
            Color::Cmyk(..) => 4,
        }
    }

    /// Gray level, if this is a DeviceGray value.
    pub fn grayscale(&self) -> Option<f64> {
        match *self {
            Color::Gray(g) => Some(g),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}
