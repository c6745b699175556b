//! Error, warning and option types for pdfcolor-rs.
//!
//! Provides [`PdfError`] for fatal errors that stop the current operation,
//! [`ColorSpaceWarning`] for non-fatal issues where parsing gives up on a
//! declaration but the caller may fall back, and [`ColorSpaceOptions`] for
//! configuring resource limits and export behavior.

use std::fmt;

/// Shorthand result type using [`PdfError`].
pub type Result<T> = std::result::Result<T, PdfError>;

/// Fatal error types for color-space processing.
///
/// These errors are raised for recognized-but-unsupported combinations,
/// invariant breaches, and operations a color space does not implement.
/// Malformed declarations are not errors; they are reported as warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// The operation is not implemented for this color space.
    NotImplemented(String),
    /// A recognized filter configuration that is not supported.
    UnsupportedFilter(String),
    /// A color or color space cannot be converted as requested.
    CannotConvertColor(String),
    /// Sample data broke an invariant (e.g. a palette index out of range).
    InvariantViolation(String),
    /// A constructor argument is invalid.
    InvalidArgument(String),
    /// A caller-supplied buffer is smaller than required.
    BufferTooSmall {
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error, e.g. while compressing a stream.
    IoError(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::NotImplemented(msg) => write!(f, "not implemented: {msg}"),
            PdfError::UnsupportedFilter(msg) => write!(f, "unsupported filter: {msg}"),
            PdfError::CannotConvertColor(msg) => write!(f, "cannot convert color: {msg}"),
            PdfError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            PdfError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            PdfError::BufferTooSmall { expected, actual } => write!(
                f,
                "buffer too small (expected at least {expected} bytes, got {actual})"
            ),
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

/// Machine-readable warning code for categorizing soft parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum WarningCode {
    /// A color-space object is malformed or has unexpected structure.
    MalformedObject,
    /// A name does not denote any color-space family.
    UnknownColorSpace,
    /// A recognized color-space family that has no filter.
    UnsupportedColorSpace,
    /// A configured resource limit was reached.
    ResourceLimitReached,
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::MalformedObject => "MALFORMED_OBJECT",
            WarningCode::UnknownColorSpace => "UNKNOWN_COLOR_SPACE",
            WarningCode::UnsupportedColorSpace => "UNSUPPORTED_COLOR_SPACE",
            WarningCode::ResourceLimitReached => "RESOURCE_LIMIT_REACHED",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal warning recorded when a color-space declaration is rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorSpaceWarning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description of the warning.
    pub description: String,
}

impl ColorSpaceWarning {
    /// Create a warning with a code and description.
    pub fn new(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    /// Convert this warning into a [`PdfError`].
    ///
    /// Lets callers that reject the document on any soft failure escalate it.
    pub fn to_error(&self) -> PdfError {
        PdfError::ParseError(self.to_string())
    }
}

impl fmt::Display for ColorSpaceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)
    }
}

/// Options controlling color-space parsing and export.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpaceOptions {
    /// Largest accepted /Indexed lookup table in bytes (default: 16 MiB).
    pub max_lookup_bytes: usize,
    /// Whether soft parse failures are recorded as warnings (default: true).
    ///
    /// They are logged either way.
    pub collect_warnings: bool,
    /// Write the DeviceGray alternate of a Separation as the raw `[0, 1]`
    /// value truncated to a byte instead of scaling it by 255 (default: false).
    ///
    /// Only useful for byte-for-byte compatibility with older output.
    pub legacy_gray_separation: bool,
    /// Flate-compress exported tint-function samples (default: true).
    pub compress_functions: bool,
}

impl Default for ColorSpaceOptions {
    fn default() -> Self {
        Self {
            max_lookup_bytes: 16 * 1024 * 1024,
            collect_warnings: true,
            legacy_gray_separation: false,
            compress_functions: true,
        }
    }
}
