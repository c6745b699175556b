//! pdfcolor-parse: color-space filters backed by lopdf.
//!
//! This crate parses color-space declarations out of a [`lopdf::Document`]
//! into shared [`ColorSpaceFilter`]s, transcodes image scanlines through
//! them, and writes them back as color-space objects. It depends on
//! pdfcolor-core for shared data types.

pub mod cache;
pub mod error;
pub mod factory;
pub mod filter;
pub mod image;

pub use cache::FilterCache;
pub use error::BackendError;
pub use factory::{
    FilterFactory, device_cmyk_instance, device_gray_instance, device_rgb_instance,
    trivial_filter, try_create_from_object, unknown_instance,
};
pub use filter::{
    ColorSpaceFilter, ColorSpaceFilterPtr, DEFAULT_BLACK_POINT, DEFAULT_RANGE, IndexedFilter,
    LabFilter, SeparationFilter,
};
pub use image::{DecodedImage, decode_image};
pub use pdfcolor_core;
