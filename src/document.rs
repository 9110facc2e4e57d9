//! In-memory stacked-box page model
//!
//! A minimal [`RenderedPage`] backend for headless use and tests: a root
//! element covering the viewport, plus a flat stack of absolutely
//! positioned boxes pushed in stacking order (later pushes paint on top).
//! Each box carries the resolved style strings the finder consumes, an
//! optional RGBA bitmap making it image-like, and an inline visibility
//! declaration honored by hit testing.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Size};
use crate::page::{RenderedPage, ResolvedStyle, VisibilityDeclaration};
use crate::raster;
use image::RgbaImage;

/// Identifies an element within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Describes an element to be pushed onto a [`Document`]
///
/// Defaults match an unstyled DOM element: opacity `"1"`, background
/// `rgba(0, 0, 0, 0)`, no image content.
///
/// # Examples
///
/// ```
/// use opaquepoint::{Element, Rect};
///
/// let box_like = Element::new(Rect::from_xywh(10.0, 10.0, 50.0, 50.0))
///   .background_color("rgb(255, 0, 0)")
///   .opacity("0.8");
/// ```
#[derive(Debug, Clone)]
pub struct Element {
  bounds: Rect,
  opacity: String,
  background_color: String,
  image: Option<RgbaImage>,
}

impl Element {
  /// Creates an element descriptor with the given on-screen bounds.
  pub fn new(bounds: Rect) -> Self {
    Self {
      bounds,
      opacity: "1".to_string(),
      background_color: "rgba(0, 0, 0, 0)".to_string(),
      image: None,
    }
  }

  /// Sets the resolved `opacity` string, e.g. `"0.5"`.
  pub fn opacity(mut self, opacity: &str) -> Self {
    self.opacity = opacity.to_string();
    self
  }

  /// Sets the resolved `background-color` string, e.g. `"rgb(255, 0, 0)"`.
  pub fn background_color(mut self, color: &str) -> Self {
    self.background_color = color.to_string();
    self
  }

  /// Attaches bitmap content, making the element image-like.
  ///
  /// The bitmap is displayed stretched to the element's bounds, the way an
  /// `<img>` with explicit width/height renders its source.
  pub fn image(mut self, bitmap: RgbaImage) -> Self {
    self.image = Some(bitmap);
    self
  }
}

struct Node {
  element: Element,
  visibility: VisibilityDeclaration,
}

/// An in-memory rendered page
///
/// Node 0 is the document root and spans the viewport; it is always
/// present, always hit inside the viewport, and never transparent to the
/// finder. Points outside the viewport hit nothing, matching
/// `document.elementFromPoint` semantics.
pub struct Document {
  viewport: Size,
  nodes: Vec<Node>,
}

impl Document {
  /// Creates an empty document with the given viewport size.
  pub fn new(viewport: Size) -> Self {
    let root = Node {
      element: Element::new(Rect::new(Point::ZERO, viewport)),
      visibility: VisibilityDeclaration::unset(),
    };
    Self {
      viewport,
      nodes: vec![root],
    }
  }

  /// Returns the document root element.
  pub fn root(&self) -> NodeId {
    NodeId(0)
  }

  /// Pushes an element onto the stack; later pushes are topmost.
  pub fn push(&mut self, element: Element) -> NodeId {
    self.nodes.push(Node {
      element,
      visibility: VisibilityDeclaration::unset(),
    });
    NodeId(self.nodes.len() - 1)
  }

  fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.0]
  }

  fn effectively_hidden(node: &Node) -> bool {
    node.visibility.value == "hidden"
  }
}

impl RenderedPage for Document {
  type Element = NodeId;

  fn root_element(&self) -> NodeId {
    self.root()
  }

  fn element_from_point(&self, point: Point) -> Option<NodeId> {
    if !Rect::new(Point::ZERO, self.viewport).contains_point(point) {
      return None;
    }
    // Topmost first; the root sits at index 0 and acts as the floor.
    self
      .nodes
      .iter()
      .enumerate()
      .rev()
      .find(|(_, node)| {
        !Self::effectively_hidden(node) && node.element.bounds.contains_point(point)
      })
      .map(|(index, _)| NodeId(index))
  }

  fn is_image(&self, element: NodeId) -> bool {
    self.node(element).element.image.is_some()
  }

  fn resolved_style(&self, element: NodeId) -> ResolvedStyle {
    let node = self.node(element);
    ResolvedStyle {
      opacity: node.element.opacity.clone(),
      background_color: node.element.background_color.clone(),
    }
  }

  fn bounding_client_rect(&self, element: NodeId) -> Rect {
    self.node(element).element.bounds
  }

  fn sample_rendered_pixel(&self, element: NodeId, local: Point, rendered: Size) -> Result<Rgba> {
    let Some(bitmap) = &self.node(element).element.image else {
      return Err(Error::Raster {
        message: "element has no image content to sample".to_string(),
      });
    };
    raster::sample_scaled_pixel(bitmap, local, rendered)
  }

  fn visibility_declaration(&self, element: NodeId) -> VisibilityDeclaration {
    self.node(element).visibility.clone()
  }

  fn set_visibility(&mut self, element: NodeId, value: &str, priority: &str) {
    self.nodes[element.0].visibility = VisibilityDeclaration::new(value, priority);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn page() -> Document {
    Document::new(Size::new(200.0, 200.0))
  }

  #[test]
  fn test_hit_test_returns_topmost() {
    let mut page = page();
    let _bottom = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)));
    let top = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)));
    assert_eq!(page.element_from_point(Point::new(50.0, 50.0)), Some(top));
  }

  #[test]
  fn test_hit_test_respects_bounds() {
    let mut page = page();
    let left = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 50.0, 50.0)));
    let right = page.push(Element::new(Rect::from_xywh(100.0, 0.0, 50.0, 50.0)));
    assert_eq!(page.element_from_point(Point::new(25.0, 25.0)), Some(left));
    assert_eq!(page.element_from_point(Point::new(125.0, 25.0)), Some(right));
  }

  #[test]
  fn test_hit_test_falls_back_to_root() {
    let page = page();
    assert_eq!(
      page.element_from_point(Point::new(150.0, 150.0)),
      Some(page.root())
    );
  }

  #[test]
  fn test_hit_test_outside_viewport_misses() {
    let mut page = page();
    // Even an element straddling negative coordinates cannot be hit there.
    page.push(Element::new(Rect::from_xywh(-10.0, -10.0, 50.0, 50.0)));
    assert_eq!(page.element_from_point(Point::new(-1.0, -1.0)), None);
  }

  #[test]
  fn test_hit_test_max_edges_are_exclusive() {
    let mut page = page();
    let box_id = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 50.0, 50.0)));
    // The right/bottom edges belong to whatever is adjacent, so the hit
    // falls through to the root.
    assert_eq!(page.element_from_point(Point::new(50.0, 25.0)), Some(page.root()));
    assert_eq!(page.element_from_point(Point::new(25.0, 50.0)), Some(page.root()));
    assert_eq!(page.element_from_point(Point::new(49.9, 25.0)), Some(box_id));
    // The viewport is half-open the same way.
    assert_eq!(page.element_from_point(Point::new(200.0, 100.0)), None);
  }

  #[test]
  fn test_hidden_override_skips_element() {
    let mut page = page();
    let bottom = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)));
    let top = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)));
    page.set_visibility(top, "hidden", "important");
    assert_eq!(page.element_from_point(Point::new(50.0, 50.0)), Some(bottom));
    page.set_visibility(top, "", "");
    assert_eq!(page.element_from_point(Point::new(50.0, 50.0)), Some(top));
  }

  #[test]
  fn test_sampling_non_image_is_an_error() {
    let mut page = page();
    let plain = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 10.0, 10.0)));
    let result = page.sample_rendered_pixel(plain, Point::ZERO, Size::new(10.0, 10.0));
    assert!(matches!(result, Err(Error::Raster { .. })));
  }

  #[test]
  fn test_resolved_style_defaults() {
    let mut page = page();
    let plain = page.push(Element::new(Rect::from_xywh(0.0, 0.0, 10.0, 10.0)));
    let style = page.resolved_style(plain);
    assert_eq!(style.opacity, "1");
    assert_eq!(style.background_color, "rgba(0, 0, 0, 0)");
  }
}
