//! /Separation color space: a named colorant with a device alternate.
//!
//! Only construction and export are supported. The exported tint transform
//! is a two-sample type 0 (sampled) function going from "no colorant" at
//! tint 0 to the alternate color at tint 1.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Document, Object, Stream};
use pdfcolor_core::{Color, ColorSpaceOptions, PdfError, Result};

use crate::error::BackendError;

/// Separation filter over a DeviceGray, DeviceRGB or DeviceCMYK alternate.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparationFilter {
    name: String,
    alternate: Color,
}

impl SeparationFilter {
    /// Create a separation for colorant `name`.
    ///
    /// Fails with [`PdfError::CannotConvertColor`] unless `alternate` is a
    /// device color.
    pub fn new(name: impl Into<String>, alternate: Color) -> Result<Self> {
        if !alternate.color_space().is_device() {
            return Err(PdfError::CannotConvertColor(
                "Unsupported color space for color space separation".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            alternate,
        })
    }

    /// The `/None` colorant, which never marks the page.
    pub fn separation_none() -> Self {
        Self {
            name: "None".to_string(),
            alternate: Color::Cmyk(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// The `/All` colorant, which marks every separation.
    pub fn separation_all() -> Self {
        Self {
            name: "All".to_string(),
            alternate: Color::Cmyk(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Colorant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate device color shown at full tint.
    pub fn alternate_color(&self) -> Color {
        self.alternate
    }

    /// Sample bytes of the tint function: N zero bytes, then the alternate.
    fn samples(&self, options: &ColorSpaceOptions) -> Vec<u8> {
        let components = self.alternate.components();
        let mut samples = vec![0u8; components.len()];
        match self.alternate {
            Color::Gray(gray) if options.legacy_gray_separation => samples.push(gray as u8),
            _ => samples.extend(components.iter().map(|&c| sample_byte(c))),
        }
        samples
    }

    /// `[/Separation /Name /Alternate tintFunctionRef]`.
    pub(super) fn export_object(
        &self,
        objects: &mut Document,
        options: &ColorSpaceOptions,
    ) -> Result<Object> {
        let n = self.alternate.component_count();
        let mut dict = Dictionary::new();
        dict.set("FunctionType", Object::Integer(0));
        dict.set("Domain", unit_ranges(1));
        dict.set("Encode", unit_ranges(1));
        dict.set("BitsPerSample", Object::Integer(8));
        dict.set("Size", Object::Array(vec![Object::Integer(2)]));
        dict.set("Range", unit_ranges(n));
        dict.set("Decode", unit_ranges(n));

        let samples = self.samples(options);
        let content = if options.compress_functions {
            dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
            flate_encode(&samples)?
        } else {
            samples
        };
        let mut stream = Stream::new(dict, content);
        stream.allows_compression = false;
        let function_id = objects.add_object(stream);

        Ok(Object::Array(vec![
            Object::Name(b"Separation".to_vec()),
            Object::Name(self.name.as_bytes().to_vec()),
            Object::Name(self.alternate.color_space().to_string().into_bytes()),
            Object::Reference(function_id),
        ]))
    }
}

/// Scale a `[0, 1]` component to an 8-bit sample.
fn sample_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// `[0 1]` repeated `n` times.
fn unit_ranges(n: u32) -> Object {
    Object::Array(
        (0..n)
            .flat_map(|_| [Object::Integer(0), Object::Integer(1)])
            .collect(),
    )
}

fn flate_encode(data: &[u8]) -> std::result::Result<Vec<u8>, BackendError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
