//! The opacity-resolution algorithm
//!
//! [`OpaqueElementFinder`] answers "which element is visually opaque at this
//! point?" by repeatedly hit-testing the point and skipping transparent
//! elements. Skipping works by forcing `visibility: hidden !important` on a
//! transparent element so the next hit test sees through it, without
//! touching layout; every override is restored before the call returns, on
//! every exit path.

use crate::alpha::{
  AlphaLevel, AlphaTolerance, DEFAULT_IMAGE_ALPHA_TOLERANCE, DEFAULT_OPACITY_TOLERANCE,
};
use crate::color::resolved_color_alpha;
use crate::error::Result;
use crate::geometry::Point;
use crate::page::{RenderedPage, VisibilityDeclaration};

/// A visibility override recorded for restoration.
struct HiddenRecord<E> {
  element: E,
  prior: VisibilityDeclaration,
}

/// Finds the topmost visually opaque element at a point
///
/// Stateless per call apart from a memo of the last normalized tolerance,
/// which only short-circuits repeated normalization of the same input and
/// never changes observable behavior.
///
/// # Examples
///
/// ```
/// use opaquepoint::{Document, Element, OpaqueElementFinder, Point, Rect, RenderedPage, Size};
///
/// let mut page = Document::new(Size::new(400.0, 300.0));
/// let solid = page.push(
///   Element::new(Rect::from_xywh(0.0, 0.0, 200.0, 200.0)).background_color("rgb(0, 0, 255)"),
/// );
/// let veil = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 200.0, 200.0)).opacity("0.01"));
///
/// let mut finder = OpaqueElementFinder::new();
/// let point = Point::new(50.0, 50.0);
/// assert_eq!(
///   finder.find_opaque_element_at(&mut page, point, None).unwrap(),
///   Some(solid)
/// );
/// // A naive hit test would have reported the nearly invisible veil.
/// assert_eq!(page.element_from_point(point), Some(veil));
/// ```
#[derive(Debug, Default)]
pub struct OpaqueElementFinder {
  last_tolerance: Option<(AlphaTolerance, AlphaLevel)>,
}

impl OpaqueElementFinder {
  /// Creates a new finder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the topmost element that is visually opaque at `(x, y)`.
  ///
  /// Transparent elements in the stack are temporarily hidden so the hit
  /// test can reach the elements beneath them; their prior `visibility`
  /// declarations are restored before this method returns, whether it
  /// returns a hit, `None`, or an error. `Ok(None)` means the point hits
  /// nothing at all (e.g. outside the viewport).
  ///
  /// `tolerance` defaults to opacity `"0.05"` (alpha level 12). Alpha
  /// levels at or below the tolerance count as transparent.
  pub fn find_opaque_element_at<P: RenderedPage>(
    &mut self,
    page: &mut P,
    point: Point,
    tolerance: Option<AlphaTolerance>,
  ) -> Result<Option<P::Element>> {
    let tolerance = self.normalize_cached(tolerance, DEFAULT_OPACITY_TOLERANCE)?;
    let mut hidden: Vec<HiddenRecord<P::Element>> = Vec::new();

    let outcome = loop {
      let Some(element) = page.element_from_point(point) else {
        break Ok(None);
      };
      match self.transparent_at(page, element, point, tolerance) {
        Ok(false) => break Ok(Some(element)),
        Ok(true) => {
          hidden.push(HiddenRecord {
            element,
            prior: page.visibility_declaration(element),
          });
          page.set_visibility(element, "hidden", "important");
        }
        Err(error) => break Err(error),
      }
    };

    // Unconditional restore phase: runs for hits, misses, and errors alike,
    // so no element is ever left hidden.
    for record in hidden {
      page.set_visibility(record.element, &record.prior.value, &record.prior.priority);
    }

    outcome
  }

  /// Returns whether an element is transparent at a viewport-relative point.
  ///
  /// The checks run cheapest-first and short-circuit:
  /// 1. the document root is never transparent;
  /// 2. resolved `opacity` at or below the tolerance is conclusive;
  /// 3. a transparent background is conclusive for non-images, and defers
  ///    to the pixel test for images;
  /// 4. a non-transparent background makes the element opaque regardless of
  ///    foreground content: even a full-alpha image is opaque if it has an
  ///    opaque background color behind it.
  ///
  /// `tolerance` defaults to opacity `"0.05"` (alpha level 12).
  pub fn is_transparent_at<P: RenderedPage>(
    &mut self,
    page: &P,
    element: P::Element,
    point: Point,
    tolerance: Option<AlphaTolerance>,
  ) -> Result<bool> {
    let tolerance = self.normalize_cached(tolerance, DEFAULT_OPACITY_TOLERANCE)?;
    self.transparent_at(page, element, point, tolerance)
  }

  /// Returns whether an image element's pixel at a viewport-relative point
  /// is transparent.
  ///
  /// The image is sampled as displayed: the global point is mapped into the
  /// element's bounding rectangle and the pixel is taken from the image
  /// rasterized at that rectangle's size, so stretching and transforms that
  /// change the apparent size are reflected. The point must fall within the
  /// element's rendered bounds.
  ///
  /// `tolerance` defaults to opacity `"0.1"` (alpha level 25).
  pub fn is_image_transparent_at<P: RenderedPage>(
    &mut self,
    page: &P,
    element: P::Element,
    point: Point,
    tolerance: Option<AlphaTolerance>,
  ) -> Result<bool> {
    let tolerance = self.normalize_cached(tolerance, DEFAULT_IMAGE_ALPHA_TOLERANCE)?;
    self.image_transparent_at(page, element, point, tolerance)
  }

  /// Classification with a pre-normalized tolerance, shared by the public
  /// entry points and the find loop.
  fn transparent_at<P: RenderedPage>(
    &self,
    page: &P,
    element: P::Element,
    point: Point,
    tolerance: AlphaLevel,
  ) -> Result<bool> {
    if element == page.root_element() {
      return Ok(false);
    }
    let style = page.resolved_style(element);
    if AlphaTolerance::Opacity(style.opacity).normalize()? <= tolerance {
      return Ok(true);
    }
    if resolved_color_alpha(&style.background_color)? <= tolerance {
      // Even a full-alpha image is opaque if it got a non-transparent
      // background-color; with a transparent one, the pixel decides.
      if !page.is_image(element) {
        return Ok(true);
      }
      return self.image_transparent_at(page, element, point, tolerance);
    }
    Ok(false)
  }

  fn image_transparent_at<P: RenderedPage>(
    &self,
    page: &P,
    element: P::Element,
    point: Point,
    tolerance: AlphaLevel,
  ) -> Result<bool> {
    let bounds = page.bounding_client_rect(element);
    let pixel = page.sample_rendered_pixel(element, bounds.to_local(point), bounds.size)?;
    Ok(pixel.a <= tolerance)
  }

  /// Normalizes an optional tolerance, memoizing the last normalized input.
  fn normalize_cached(
    &mut self,
    tolerance: Option<AlphaTolerance>,
    default: AlphaLevel,
  ) -> Result<AlphaLevel> {
    let Some(tolerance) = tolerance else {
      return Ok(default);
    };
    if let Some((last_input, last_level)) = &self.last_tolerance {
      if *last_input == tolerance {
        return Ok(*last_level);
      }
    }
    let level = tolerance.normalize()?;
    self.last_tolerance = Some((tolerance, level));
    Ok(level)
  }
}
