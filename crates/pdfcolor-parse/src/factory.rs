//! Color-space filter construction from PDF objects.
//!
//! Parses a color-space declaration (a name such as `/DeviceRGB` or an array
//! such as `[/Indexed /DeviceRGB 255 lookup]`) into a [`ColorSpaceFilter`].
//!
//! Failures come in two tiers. A malformed or unsupported declaration is a
//! *soft* failure: a warning is logged (and collected) and `Ok(None)` is
//! returned so the caller can fall back. A recognized combination this crate
//! cannot handle, such as an /Indexed space over a non-RGB base, is a *hard*
//! failure returned as `Err`.

use std::sync::{Arc, LazyLock};

use lopdf::{Document, Object, ObjectId};
use pdfcolor_core::{
    ColorSpaceOptions, ColorSpaceType, ColorSpaceWarning, PdfError, PixelFormat, Result,
    WarningCode,
};
use tracing::{debug, warn};

use crate::cache::FilterCache;
use crate::error::BackendError;
use crate::filter::{ColorSpaceFilter, ColorSpaceFilterPtr, IndexedFilter};

/// Deepest chain of nested declarations followed before giving up.
const MAX_NESTING_DEPTH: usize = 8;

static DEVICE_GRAY: LazyLock<ColorSpaceFilterPtr> =
    LazyLock::new(|| Arc::new(ColorSpaceFilter::DeviceGray));
static DEVICE_RGB: LazyLock<ColorSpaceFilterPtr> =
    LazyLock::new(|| Arc::new(ColorSpaceFilter::DeviceRGB));
static DEVICE_CMYK: LazyLock<ColorSpaceFilterPtr> =
    LazyLock::new(|| Arc::new(ColorSpaceFilter::DeviceCMYK));
static UNKNOWN: LazyLock<ColorSpaceFilterPtr> =
    LazyLock::new(|| Arc::new(ColorSpaceFilter::Unknown));

/// Shared DeviceGray filter.
pub fn device_gray_instance() -> ColorSpaceFilterPtr {
    Arc::clone(&DEVICE_GRAY)
}

/// Shared DeviceRGB filter.
pub fn device_rgb_instance() -> ColorSpaceFilterPtr {
    Arc::clone(&DEVICE_RGB)
}

/// Shared DeviceCMYK filter.
pub fn device_cmyk_instance() -> ColorSpaceFilterPtr {
    Arc::clone(&DEVICE_CMYK)
}

/// Shared placeholder for color spaces that could not be resolved.
pub fn unknown_instance() -> ColorSpaceFilterPtr {
    Arc::clone(&UNKNOWN)
}

/// Shared filter for one of the three device spaces.
///
/// Any other type is a programming error and fails with
/// [`PdfError::CannotConvertColor`].
pub fn trivial_filter(ty: ColorSpaceType) -> Result<ColorSpaceFilterPtr> {
    match ty {
        ColorSpaceType::DeviceGray => Ok(device_gray_instance()),
        ColorSpaceType::DeviceRGB => Ok(device_rgb_instance()),
        ColorSpaceType::DeviceCMYK => Ok(device_cmyk_instance()),
        _ => Err(PdfError::CannotConvertColor(
            "Invalid color space".to_string(),
        )),
    }
}

/// Parse a color-space declaration with default options.
///
/// `doc` resolves indirect references. Returns `Ok(None)` on a soft failure.
pub fn try_create_from_object(
    obj: &Object,
    doc: &Document,
) -> Result<Option<ColorSpaceFilterPtr>> {
    FilterFactory::new(doc).try_create(obj)
}

/// Stateful color-space parser.
///
/// Holds the options, an optional [`FilterCache`], and the warnings collected
/// for soft failures.
#[derive(Debug)]
pub struct FilterFactory<'a> {
    doc: &'a Document,
    options: ColorSpaceOptions,
    cache: Option<&'a FilterCache<'a>>,
    warnings: Vec<ColorSpaceWarning>,
    depth: usize,
}

impl<'a> FilterFactory<'a> {
    /// Create a factory over `doc` with default options and no cache.
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            options: ColorSpaceOptions::default(),
            cache: None,
            warnings: Vec::new(),
            depth: 0,
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ColorSpaceOptions) -> Self {
        self.options = options;
        self
    }

    /// Reuse filters parsed from the same indirect object.
    ///
    /// Fails with [`PdfError::InvalidArgument`] when `cache` was created for
    /// another document.
    pub fn with_cache(mut self, cache: &'a FilterCache<'a>) -> Result<Self> {
        if !cache.belongs_to(self.doc) {
            return Err(PdfError::InvalidArgument(
                "filter cache belongs to another document".to_string(),
            ));
        }
        self.cache = Some(cache);
        Ok(self)
    }

    /// Options in effect.
    pub fn options(&self) -> &ColorSpaceOptions {
        &self.options
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[ColorSpaceWarning] {
        &self.warnings
    }

    /// Remove and return the warnings collected so far.
    pub fn take_warnings(&mut self) -> Vec<ColorSpaceWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Parse `obj` into a filter. `Ok(None)` signals a soft failure.
    pub fn try_create(&mut self, obj: &Object) -> Result<Option<ColorSpaceFilterPtr>> {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.reject(
                WarningCode::MalformedObject,
                "Color space nesting is too deep",
            );
        }
        self.depth += 1;
        let cache = self.cache;
        let created = match (obj, cache) {
            (Object::Reference(id), Some(cache)) => {
                cache.get_or_try_insert_with(*id, || self.create_from_reference(*id))
            }
            (Object::Reference(id), None) => self.create_from_reference(*id),
            _ => self.create(obj),
        };
        self.depth -= 1;
        created
    }

    fn create_from_reference(&mut self, id: ObjectId) -> Result<Option<ColorSpaceFilterPtr>> {
        let doc = self.doc;
        match doc.get_object(id) {
            Ok(resolved) => self.create(resolved),
            Err(err) => self.reject(
                WarningCode::MalformedObject,
                format!(
                    "Color space object {} {} R: {}",
                    id.0,
                    id.1,
                    BackendError::from(err)
                ),
            ),
        }
    }

    fn create(&mut self, obj: &Object) -> Result<Option<ColorSpaceFilterPtr>> {
        match obj {
            Object::Array(arr) => self.create_from_array(arr),
            Object::Name(name) => self.create_from_name(name),
            other => self.reject(
                WarningCode::MalformedObject,
                format!(
                    "Color space must be a name or an array, got {}",
                    other.enum_variant()
                ),
            ),
        }
    }

    fn create_from_name(&mut self, name: &[u8]) -> Result<Option<ColorSpaceFilterPtr>> {
        match ColorSpaceType::from_name(name) {
            Some(ColorSpaceType::DeviceGray) => Ok(Some(device_gray_instance())),
            Some(ColorSpaceType::DeviceRGB) => Ok(Some(device_rgb_instance())),
            Some(ColorSpaceType::DeviceCMYK) => Ok(Some(device_cmyk_instance())),
            Some(ty) => self.reject(
                WarningCode::UnsupportedColorSpace,
                format!("Unsupported color space filter {ty}"),
            ),
            None => self.reject(
                WarningCode::UnknownColorSpace,
                format!("Unknown color space {}", String::from_utf8_lossy(name)),
            ),
        }
    }

    fn create_from_array(&mut self, arr: &[Object]) -> Result<Option<ColorSpaceFilterPtr>> {
        let Some(first) = arr.first() else {
            return self.reject(WarningCode::MalformedObject, "Invalid color space");
        };
        let ty = match self.resolve(first) {
            Object::Name(name) => match ColorSpaceType::from_name(name) {
                Some(ty) => ty,
                None => {
                    return self.reject(
                        WarningCode::UnknownColorSpace,
                        format!("Unknown color space {}", String::from_utf8_lossy(name)),
                    );
                }
            },
            _ => {
                return self.reject(
                    WarningCode::MalformedObject,
                    "Color space array must start with a name",
                );
            }
        };

        match ty {
            ColorSpaceType::Indexed => self.create_indexed(arr),
            other => self.reject(
                WarningCode::UnsupportedColorSpace,
                format!("Unsupported color space filter {other}"),
            ),
        }
    }

    /// `[/Indexed base hival lookup]`
    ///
    /// The base must be a device space. An /Indexed base is rejected as a
    /// soft failure even when its own base is DeviceRGB, so palettes are
    /// never chained.
    fn create_indexed(&mut self, arr: &[Object]) -> Result<Option<ColorSpaceFilterPtr>> {
        if arr.len() < 4 {
            return self.invalid_indexed(format!("expected 4 entries, got {}", arr.len()));
        }

        let Some(base) = self.try_create(&arr[1])? else {
            return self.invalid_indexed("base color space could not be parsed");
        };
        if !base.is_trivial() {
            return self.invalid_indexed(format!(
                "base must be a device color space, got /{}",
                base.color_space_type()
            ));
        }

        let max_index = match self.resolve(&arr[2]) {
            Object::Integer(n) if *n >= 0 => *n as u64,
            _ => return self.invalid_indexed("hival must be a non-negative integer"),
        };

        let lookup = match self.lookup_bytes(&arr[3]) {
            Ok(lookup) => lookup,
            Err(reason) => return self.invalid_indexed(reason),
        };

        let component_count = match base.pixel_format()? {
            PixelFormat::RGB => 3u64,
            _ => {
                return Err(PdfError::UnsupportedFilter(
                    "Unsupported base color space in /Indexed color space".to_string(),
                ));
            }
        };

        let Ok(map_size) = u32::try_from(max_index + 1) else {
            return self.invalid_indexed(format!("hival {max_index} is too large"));
        };
        let required = component_count * u64::from(map_size);
        if (lookup.len() as u64) < required {
            return self.invalid_indexed(format!(
                "lookup table has {} bytes, {required} required",
                lookup.len()
            ));
        }
        if lookup.len() > self.options.max_lookup_bytes {
            return self.reject(
                WarningCode::ResourceLimitReached,
                format!(
                    "/Indexed lookup table of {} bytes exceeds limit of {} bytes",
                    lookup.len(),
                    self.options.max_lookup_bytes
                ),
            );
        }

        let indexed = IndexedFilter::new(base, map_size, lookup)?;
        debug!(map_size, "parsed /Indexed color space");
        Ok(Some(Arc::new(ColorSpaceFilter::Indexed(indexed))))
    }

    /// Decoded bytes of a lookup stream or string, or why they are unusable.
    fn lookup_bytes(&self, obj: &Object) -> std::result::Result<Vec<u8>, String> {
        match self.resolve(obj) {
            Object::String(bytes, _) => Ok(bytes.clone()),
            Object::Stream(stream) if stream.dict.has(b"Filter") => {
                stream.decompressed_content().map_err(|err| {
                    format!("cannot decode lookup stream: {}", BackendError::from(err))
                })
            }
            Object::Stream(stream) => Ok(stream.content.clone()),
            _ => Err("lookup table must be a stream or a string".to_string()),
        }
    }

    /// Follow one indirect reference; unresolvable references are returned
    /// unchanged and fail the caller's type check.
    fn resolve<'o>(&self, obj: &'o Object) -> &'o Object
    where
        'a: 'o,
    {
        let doc: &'a Document = self.doc;
        match obj {
            Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }

    fn invalid_indexed(
        &mut self,
        reason: impl std::fmt::Display,
    ) -> Result<Option<ColorSpaceFilterPtr>> {
        self.reject(
            WarningCode::MalformedObject,
            format!("Invalid /Indexed color space: {reason}"),
        )
    }

    fn reject(
        &mut self,
        code: WarningCode,
        description: impl Into<String>,
    ) -> Result<Option<ColorSpaceFilterPtr>> {
        self.warn(code, description);
        Ok(None)
    }

    fn warn(&mut self, code: WarningCode, description: impl Into<String>) {
        let warning = ColorSpaceWarning::new(code, description);
        warn!(code = %warning.code, "{}", warning.description);
        if self.options.collect_warnings {
            self.warnings.push(warning);
        }
    }
}
