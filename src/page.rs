//! The collaborator boundary between the finder and the host page
//!
//! The opacity-resolution algorithm does not know how a page is rendered; it
//! only needs a handful of synchronous capabilities from whatever does:
//! point-based hit testing, resolved style readout, pixel sampling at the
//! displayed size, and a scoped visibility override for the hide/requery
//! loop. [`RenderedPage`] bundles those capabilities. Implementations are
//! assumed immediately consistent with the current render state: a
//! visibility override set through [`RenderedPage::set_visibility`] must be
//! observed by the very next [`RenderedPage::element_from_point`] call.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect, Size};

/// Resolved visual style of an element, post-cascade and post-animation
///
/// Values are carried as resolved strings, the way a style engine reports
/// them: `opacity` as a decimal fraction (`"1"`, `"0.35"`),
/// `background_color` as a keyword or functional color form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
  /// Resolved `opacity` value
  pub opacity: String,
  /// Resolved `background-color` value
  pub background_color: String,
}

/// An element's inline `visibility` declaration: value plus priority
///
/// Captures the declaration exactly as set, so it can be restored exactly.
/// An element with no explicit declaration carries empty strings for both
/// fields; restoring those clears the override again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityDeclaration {
  /// The declared value, e.g. `"hidden"`, `"visible"`, or `""` when unset
  pub value: String,
  /// The declaration priority: `"important"` or `""`
  pub priority: String,
}

impl VisibilityDeclaration {
  /// The absent declaration: no value, no priority.
  pub fn unset() -> Self {
    Self::default()
  }

  /// Creates a declaration from value and priority strings.
  pub fn new(value: &str, priority: &str) -> Self {
    Self {
      value: value.to_string(),
      priority: priority.to_string(),
    }
  }
}

/// Host capabilities the finder requires from a rendered page
///
/// All methods are synchronous and reflect the current render state. The
/// finder holds exclusive write access to each overridden element's
/// visibility for the duration of one call; no other actor may mutate that
/// property concurrently.
pub trait RenderedPage {
  /// Opaque element reference. Cheap to copy, comparable for identity.
  type Element: Copy + PartialEq;

  /// Returns the document root element.
  ///
  /// The root is the implicit floor of the hit-test stack: the finder
  /// treats it as always opaque and never hides it.
  fn root_element(&self) -> Self::Element;

  /// Returns the topmost rendered element at a viewport-relative point,
  /// respecting current visibility overrides, or `None` when the point
  /// hits nothing.
  fn element_from_point(&self, point: Point) -> Option<Self::Element>;

  /// Returns true when the element is image-like, i.e. carries intrinsic
  /// pixel content that must be sampled for per-point transparency.
  fn is_image(&self, element: Self::Element) -> bool;

  /// Returns the element's resolved opacity and background color.
  fn resolved_style(&self, element: Self::Element) -> ResolvedStyle;

  /// Returns the element's on-screen bounding rectangle, reflecting any
  /// scaling, stretching, or transforms applied by layout.
  fn bounding_client_rect(&self, element: Self::Element) -> Rect;

  /// Rasterizes an image element at its displayed size and samples the
  /// pixel at the element-local coordinate.
  ///
  /// Callers must keep `local` within the rendered bounds; behavior for
  /// out-of-bounds points is implementation-defined (the built-in backend
  /// reports [`Error::SamplingOutOfBounds`](crate::Error::SamplingOutOfBounds)).
  fn sample_rendered_pixel(
    &self,
    element: Self::Element,
    local: Point,
    rendered: Size,
  ) -> Result<Rgba>;

  /// Reads the element's current inline `visibility` declaration.
  fn visibility_declaration(&self, element: Self::Element) -> VisibilityDeclaration;

  /// Writes the element's inline `visibility` declaration.
  ///
  /// Used by the finder to force `visibility: hidden !important` during the
  /// scan and to restore the prior declaration afterwards. Must not affect
  /// layout.
  fn set_visibility(&mut self, element: Self::Element, value: &str, priority: &str);
}
