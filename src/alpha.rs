//! Alpha levels and tolerance normalization
//!
//! The canonical internal unit is an [`AlphaLevel`]: an integer in 0..=255
//! where 0 is fully transparent and 255 fully opaque. Callers may express a
//! tolerance either as a CSS-opacity-style fraction (`"0.05"`) or as a raw
//! alpha level (`12.0`); both forms funnel through one explicit
//! normalization step that rejects out-of-range input instead of clamping.

use crate::error::{Error, Result};

/// An alpha channel level: 0 = fully transparent, 255 = fully opaque.
pub type AlphaLevel = u8;

/// Default tolerance for element classification, `floor(255 * 0.05)`.
pub const DEFAULT_OPACITY_TOLERANCE: AlphaLevel = 12;

/// Default tolerance for direct image pixel tests, `floor(255 * 0.1)`.
pub const DEFAULT_IMAGE_ALPHA_TOLERANCE: AlphaLevel = 25;

/// An alpha tolerance in one of its two accepted forms
///
/// Alpha values at or below the normalized tolerance count as transparent.
///
/// # Examples
///
/// ```
/// use opaquepoint::AlphaTolerance;
///
/// assert_eq!(AlphaTolerance::from("0.05").normalize().unwrap(), 12);
/// assert_eq!(AlphaTolerance::from(40.0).normalize().unwrap(), 40);
/// assert!(AlphaTolerance::Level(256.0).normalize().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AlphaTolerance {
  /// A CSS-opacity-style decimal fraction between `"0"` and `"1"`,
  /// e.g. `"0.25"`. Normalizes as `floor(255 * fraction)`.
  Opacity(String),
  /// A raw alpha level between 0 and 255. Fractional values are floored;
  /// every alpha they are compared against is an integer, so flooring never
  /// changes a classification.
  Level(f32),
}

impl AlphaTolerance {
  /// Resolves this tolerance to an [`AlphaLevel`].
  ///
  /// Fails with [`Error::InvalidTolerance`] when the input does not land in
  /// 0..=255: negative values, values above the range, and unparseable
  /// opacity strings are all rejected rather than clamped.
  pub fn normalize(&self) -> Result<AlphaLevel> {
    let level = match self {
      Self::Opacity(text) => {
        let fraction: f32 = text.trim().parse().map_err(|_| self.invalid())?;
        (255.0 * fraction).floor()
      }
      Self::Level(value) => {
        // Range-check the raw value before flooring, so 255.9 is rejected
        // rather than rounded into range.
        if !(*value >= 0.0 && *value <= 255.0) {
          return Err(self.invalid());
        }
        value.floor()
      }
    };
    if !(0.0..=255.0).contains(&level) {
      return Err(self.invalid());
    }
    Ok(level as AlphaLevel)
  }

  fn invalid(&self) -> Error {
    let input = match self {
      Self::Opacity(text) => text.clone(),
      Self::Level(value) => value.to_string(),
    };
    Error::InvalidTolerance { input }
  }
}

impl From<&str> for AlphaTolerance {
  fn from(opacity: &str) -> Self {
    Self::Opacity(opacity.to_string())
  }
}

impl From<String> for AlphaTolerance {
  fn from(opacity: String) -> Self {
    Self::Opacity(opacity)
  }
}

impl From<f32> for AlphaTolerance {
  fn from(level: f32) -> Self {
    Self::Level(level)
  }
}

impl From<AlphaLevel> for AlphaTolerance {
  fn from(level: AlphaLevel) -> Self {
    Self::Level(level as f32)
  }
}
