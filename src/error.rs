//! Error types for opaquepoint
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations. The core never retries and never swallows:
//! every error surfaces synchronously to the immediate caller.

use thiserror::Error;

/// Result type alias for opaquepoint operations
///
/// # Examples
///
/// ```
/// use opaquepoint::Result;
///
/// fn classify() -> Result<bool> {
///     Ok(false)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for opaquepoint
///
/// # Examples
///
/// ```
/// use opaquepoint::{AlphaTolerance, Error};
///
/// let err = AlphaTolerance::Level(300.0).normalize().unwrap_err();
/// assert!(matches!(err, Error::InvalidTolerance { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
  /// An alpha tolerance that does not normalize into the 0..=255 range.
  ///
  /// Raised at the point of use and propagated; tolerances are never
  /// silently clamped.
  #[error(
    "invalid alpha tolerance {input:?}: expected a number between 0 and 255 \
     or a string representing an opacity between \"0\" and \"1\", e.g. \"0.25\""
  )]
  InvalidTolerance { input: String },

  /// A pixel sample requested outside an image's rendered bounds.
  ///
  /// The finder never triggers this itself (its points come from real hit
  /// tests); it signals a caller contract violation on the sampling
  /// primitive.
  #[error("pixel sample at local ({x}, {y}) is outside the {width}x{height} rendered raster")]
  SamplingOutOfBounds {
    x: f32,
    y: f32,
    width: u32,
    height: u32,
  },

  /// A raster surface could not be created or used.
  #[error("raster error: {message}")]
  Raster { message: String },
}
