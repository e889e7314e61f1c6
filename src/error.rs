//! Error types for backdrop
//!
//! Most failures in this crate are recovered locally: a malformed descriptor
//! parses to `None`, a degenerate shape resolves to `None` and empty bounds
//! turn drawing into a no-op. The types here cover what is left:
//! - Render errors (scoped layer misuse, pixmap allocation)
//! - Image errors (reported by image pipelines)
//! - Parse errors (diagnostics for rejected descriptors)
//!
//! All errors use the `thiserror` crate for their trait implementations.

use thiserror::Error;

/// Result type alias for backdrop operations
///
/// # Examples
///
/// ```
/// use backdrop::Result;
///
/// fn draw() -> Result<()> {
///   Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
///
/// # Examples
///
/// ```
/// use backdrop::Error;
/// use backdrop::error::RenderError;
///
/// fn close() -> Result<(), Error> {
///   Err(Error::Render(RenderError::NoOpenLayer))
/// }
/// assert!(close().is_err());
/// ```
#[derive(Error, Debug)]
pub enum Error {
  /// Descriptor rejected
  #[error("Parse error: {0}")]
  Parse(#[from] ParseError),

  /// Image loading or decoding error
  #[error("Image error: {0}")]
  Image(#[from] ImageError),

  /// Drawing surface error
  #[error("Render error: {0}")]
  Render(#[from] RenderError),
}

/// Reasons a shape, clip region or mask descriptor was rejected
///
/// The public `parse` entry points discard these and return `None`; the
/// `try_parse` variants keep them for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  /// The descriptor is not a JSON object
  #[error("Descriptor is not an object")]
  NotAnObject,

  /// The `type` field is missing or not a string
  #[error("Descriptor has no type")]
  MissingType,

  /// The `type` field names no known variant
  #[error("Unknown descriptor type: {kind}")]
  UnknownType { kind: String },

  /// A required field is missing or malformed
  #[error("Missing or invalid field '{field}' in {kind}")]
  MissingField { kind: &'static str, field: &'static str },
}

/// Image pipeline failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
  /// The pipeline knows nothing about the requested source
  #[error("Image not found: {uri}")]
  NotFound { uri: String },

  /// The source was found but could not be decoded
  #[error("Failed to decode image {uri}: {reason}")]
  DecodeFailed { uri: String, reason: String },
}

/// Drawing surface contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
  /// Canvas or layer pixmap allocation failed
  #[error("Failed to create canvas: {width}x{height}")]
  CanvasCreationFailed { width: u32, height: u32 },

  /// `close_scoped_layer` called with nothing open
  #[error("close_scoped_layer without a matching open")]
  NoOpenLayer,

  /// `close_scoped_layer` called out of order
  #[error("Scoped layer {token} closed while layer {innermost} is innermost")]
  LayerOrderViolation { token: usize, innermost: usize },
}
