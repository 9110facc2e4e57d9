//! Geometry types shared with the host page
//!
//! All units are CSS pixels with the origin at the top-left corner:
//! positive X extends to the right, positive Y downward. Points handed to
//! the finder are viewport-relative, the same coordinate space a hit test
//! operates in.

use std::fmt;

/// A 2D point in CSS pixel space
///
/// # Examples
///
/// ```
/// use opaquepoint::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
  /// Width (horizontal extent)
  pub width: f32,
  /// Height (vertical extent)
  pub height: f32,
}

impl Size {
  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either dimension is zero or negative
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}×{}", self.width, self.height)
  }
}

/// An axis-aligned rectangle in CSS pixel space
///
/// Defined by an origin point (top-left corner) and a size. This is the
/// shape of an element's on-screen bounding rectangle: after layout,
/// stretching, and transforms have been applied.
///
/// # Examples
///
/// ```
/// use opaquepoint::{Point, Rect};
///
/// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.x(), 10.0);
/// assert!(rect.contains_point(Point::new(50.0, 40.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// The top-left corner of the rectangle
  pub origin: Point,
  /// The size (width and height) of the rectangle
  pub size: Size,
}

impl Rect {
  /// Creates a new rectangle from an origin point and size
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height components
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the x coordinate of the left edge
  pub fn x(self) -> f32 {
    self.origin.x
  }

  /// Returns the y coordinate of the top edge
  pub fn y(self) -> f32 {
    self.origin.y
  }

  /// Returns the width
  pub fn width(self) -> f32 {
    self.size.width
  }

  /// Returns the height
  pub fn height(self) -> f32 {
    self.size.height
  }

  /// Returns the x coordinate of the right edge
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the y coordinate of the bottom edge
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// Returns true if this rectangle contains the given point
  ///
  /// Containment is half-open: the top and left edges are inside, the
  /// bottom and right edges belong to whatever is adjacent. This is the
  /// pixel-grid convention hit testing and pixel sampling share, so a
  /// point that hits an element always maps to a samplable pixel.
  pub fn contains_point(self, point: Point) -> bool {
    point.x >= self.x() && point.x < self.max_x() && point.y >= self.y() && point.y < self.max_y()
  }

  /// Converts a viewport-relative point to this rectangle's local space
  ///
  /// # Examples
  ///
  /// ```
  /// use opaquepoint::{Point, Rect};
  ///
  /// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 100.0);
  /// assert_eq!(rect.to_local(Point::new(15.0, 25.0)), Point::new(5.0, 5.0));
  /// ```
  pub fn to_local(self, point: Point) -> Point {
    Point::new(point.x - self.origin.x, point.y - self.origin.y)
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.origin, self.size)
  }
}
