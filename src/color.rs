//! Pixel color type and resolved-color alpha extraction
//!
//! Resolved `background-color` values arrive as strings, the way a style
//! engine reports them after the cascade. Only the alpha channel matters
//! here, and only to a binary opaque/transparent classification, so the
//! extraction is deliberately narrow: it understands `transparent`, bare
//! color keywords, and `rgba(...)` forms, and treats everything else as
//! fully opaque.

use crate::alpha::{AlphaLevel, AlphaTolerance};
use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;

/// A single RGBA pixel as sampled from a rasterized image
///
/// All channels are 0..=255; alpha 0 is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
  /// Red component
  pub r: u8,
  /// Green component
  pub g: u8,
  /// Blue component
  pub b: u8,
  /// Alpha component (0 = transparent, 255 = opaque)
  pub a: u8,
}

impl Rgba {
  /// Creates a new RGBA pixel value
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }
}

/// Extracts the alpha level from a resolved color string.
///
/// Recognized forms:
/// - the literal `transparent` → 0
/// - a bare alphabetic keyword (some engines resolve to color names) → 255
/// - an `rgba(...)` form → the trailing alpha component, normalized as an
///   opacity fraction
/// - anything else, including plain `rgb(...)` → 255
///
/// A malformed alpha component inside an `rgba(...)` form fails with
/// [`Error::InvalidTolerance`](crate::Error::InvalidTolerance).
///
/// # Examples
///
/// ```
/// use opaquepoint::color::resolved_color_alpha;
///
/// assert_eq!(resolved_color_alpha("transparent").unwrap(), 0);
/// assert_eq!(resolved_color_alpha("rebeccapurple").unwrap(), 255);
/// assert_eq!(resolved_color_alpha("rgb(255, 0, 0)").unwrap(), 255);
/// assert_eq!(resolved_color_alpha("rgba(255, 0, 0, 0.5)").unwrap(), 127);
/// ```
pub fn resolved_color_alpha(color: &str) -> Result<AlphaLevel> {
  if color == "transparent" {
    return Ok(0);
  }
  if !color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic()) {
    return Ok(255);
  }
  match rgba_alpha_pattern().captures(color) {
    Some(captures) => AlphaTolerance::Opacity(captures[1].to_string()).normalize(),
    // An rgb(...) or any other unrecognized form carries no alpha channel.
    None => Ok(255),
  }
}

fn rgba_alpha_pattern() -> &'static Regex {
  static RGBA_ALPHA: OnceLock<Regex> = OnceLock::new();
  RGBA_ALPHA.get_or_init(|| Regex::new(r"^rgba.*,\s*(\d\.?\d*)\s*\)$").expect("rgba alpha regex"))
}
