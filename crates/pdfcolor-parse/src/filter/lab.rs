//! /Lab color space parameters. Export only.

use lopdf::{Dictionary, Object};

/// BlackPoint used when none is given.
pub const DEFAULT_BLACK_POINT: [f64; 3] = [0.0, 0.0, 0.0];

/// Range of the a* and b* components used when none is given.
pub const DEFAULT_RANGE: [f64; 4] = [-100.0, 100.0, -100.0, 100.0];

/// CIE L*a*b* color space parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LabFilter {
    white_point: [f64; 3],
    black_point: [f64; 3],
    range: [f64; 4],
}

impl LabFilter {
    /// Create Lab parameters; missing BlackPoint and Range take their defaults.
    pub fn new(
        white_point: [f64; 3],
        black_point: Option<[f64; 3]>,
        range: Option<[f64; 4]>,
    ) -> Self {
        Self {
            white_point,
            black_point: black_point.unwrap_or(DEFAULT_BLACK_POINT),
            range: range.unwrap_or(DEFAULT_RANGE),
        }
    }

    /// Diffuse white point in CIE XYZ.
    pub fn white_point(&self) -> [f64; 3] {
        self.white_point
    }

    /// Diffuse black point in CIE XYZ.
    pub fn black_point(&self) -> [f64; 3] {
        self.black_point
    }

    /// `[amin amax bmin bmax]` of the a* and b* components.
    pub fn range(&self) -> [f64; 4] {
        self.range
    }

    /// `[/Lab <<..>>]`; BlackPoint and Range are only written when they
    /// differ from their defaults.
    pub(super) fn export_object(&self) -> Object {
        let mut dict = Dictionary::new();
        dict.set("WhitePoint", reals(&self.white_point));
        if self.black_point != DEFAULT_BLACK_POINT {
            dict.set("BlackPoint", reals(&self.black_point));
        }
        if self.range != DEFAULT_RANGE {
            dict.set("Range", reals(&self.range));
        }
        Object::Array(vec![Object::Name(b"Lab".to_vec()), Object::Dictionary(dict)])
    }
}

fn reals(values: &[f64]) -> Object {
    Object::Array(values.iter().map(|&v| Object::from(v)).collect())
}
