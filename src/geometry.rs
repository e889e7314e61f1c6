//! Geometry primitives shared by the shape resolver and the compositor
//!
//! Everything here is measured in physical (device) pixels. Logical point
//! values are converted before they reach these types, see
//! [`crate::style::values::LengthValue::resolve`].
//!
//! # Coordinate System
//!
//! The origin sits at the top-left corner of the drawing surface:
//! - Positive X extends to the right
//! - Positive Y extends downward

use std::fmt;

/// A 2D point in physical pixel space
///
/// # Examples
///
/// ```
/// use backdrop::Point;
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
  /// The origin
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Offsets this point by `dx`/`dy`
  pub fn offset(self, dx: f32, dy: f32) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }

  /// Euclidean distance to another point
  ///
  /// ```
  /// use backdrop::Point;
  ///
  /// assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
  /// ```
  pub fn distance_to(self, other: Point) -> f32 {
    let dx = self.x - other.x;
    let dy = self.y - other.y;
    (dx * dx + dy * dy).sqrt()
  }
}

impl Default for Point {
  fn default() -> Self {
    Self::ZERO
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A width/height pair
///
/// Sizes are allowed to go negative: the shape resolver computes extents
/// from edge distances and relies on seeing the sign to reject degenerate
/// rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
  pub width: f32,
  pub height: f32,
}

impl Size {
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either dimension is zero or negative
  ///
  /// ```
  /// use backdrop::Size;
  ///
  /// assert!(Size::new(0.0, 10.0).is_empty());
  /// assert!(!Size::new(1.0, 1.0).is_empty());
  /// ```
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

/// An axis-aligned rectangle defined by its top-left origin and size
///
/// # Examples
///
/// ```
/// use backdrop::Rect;
///
/// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.max_x(), 110.0);
/// assert_eq!(rect.max_y(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
  pub origin: Point,
  pub size: Size,
}

impl Rect {
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Builds a rectangle from its four edges
  ///
  /// The result keeps the sign of `right - left` and `bottom - top`, so
  /// inverted edges produce a negative size rather than being normalized.
  ///
  /// ```
  /// use backdrop::Rect;
  ///
  /// let rect = Rect::from_ltrb(10.0, 10.0, 5.0, 30.0);
  /// assert_eq!(rect.width(), -5.0);
  /// assert_eq!(rect.height(), 20.0);
  /// ```
  pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
    Self::from_xywh(left, top, right - left, bottom - top)
  }

  pub fn x(self) -> f32 {
    self.origin.x
  }

  pub fn y(self) -> f32 {
    self.origin.y
  }

  pub fn width(self) -> f32 {
    self.size.width
  }

  pub fn height(self) -> f32 {
    self.size.height
  }

  pub fn min_x(self) -> f32 {
    self.origin.x
  }

  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  pub fn min_y(self) -> f32 {
    self.origin.y
  }

  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// Returns true if the rectangle covers no area
  pub fn is_empty(self) -> bool {
    self.size.is_empty()
  }

  /// Returns true if either dimension is negative
  pub fn is_inverted(self) -> bool {
    self.size.width < 0.0 || self.size.height < 0.0
  }

  pub fn is_finite(self) -> bool {
    self.origin.x.is_finite()
      && self.origin.y.is_finite()
      && self.size.width.is_finite()
      && self.size.height.is_finite()
  }

  /// Center point of the rectangle
  ///
  /// ```
  /// use backdrop::{Point, Rect};
  ///
  /// assert_eq!(Rect::from_xywh(0.0, 0.0, 100.0, 50.0).center(), Point::new(50.0, 25.0));
  /// ```
  pub fn center(self) -> Point {
    Point::new(
      self.origin.x + self.size.width / 2.0,
      self.origin.y + self.size.height / 2.0,
    )
  }

  pub fn contains_point(self, point: Point) -> bool {
    point.x >= self.min_x()
      && point.x < self.max_x()
      && point.y >= self.min_y()
      && point.y < self.max_y()
  }

  /// Smallest rectangle covering both inputs
  pub fn union(self, other: Rect) -> Rect {
    Rect::from_ltrb(
      self.min_x().min(other.min_x()),
      self.min_y().min(other.min_y()),
      self.max_x().max(other.max_x()),
      self.max_y().max(other.max_y()),
    )
  }

  pub fn translate(self, dx: f32, dy: f32) -> Rect {
    Rect::new(self.origin.offset(dx, dy), self.size)
  }

  /// Grows the rectangle outward by `amount` on every side
  ///
  /// Negative amounts shrink it. The size is clamped at zero.
  pub fn inflate(self, amount: f32) -> Rect {
    Rect::from_xywh(
      self.origin.x - amount,
      self.origin.y - amount,
      (self.size.width + amount * 2.0).max(0.0),
      (self.size.height + amount * 2.0).max(0.0),
    )
  }

  /// Shrinks the rectangle by per-side offsets, clamping the size at zero
  ///
  /// ```
  /// use backdrop::{EdgeOffsets, Rect};
  ///
  /// let inner = Rect::from_xywh(0.0, 0.0, 100.0, 100.0).inset_by(EdgeOffsets::all(10.0));
  /// assert_eq!(inner, Rect::from_xywh(10.0, 10.0, 80.0, 80.0));
  /// ```
  pub fn inset_by(self, edges: EdgeOffsets) -> Rect {
    Rect::from_xywh(
      self.origin.x + edges.left,
      self.origin.y + edges.top,
      (self.size.width - edges.horizontal()).max(0.0),
      (self.size.height - edges.vertical()).max(0.0),
    )
  }

  /// Grows the rectangle by per-side offsets
  pub fn outset_by(self, edges: EdgeOffsets) -> Rect {
    Rect::from_xywh(
      self.origin.x - edges.left,
      self.origin.y - edges.top,
      self.size.width + edges.horizontal(),
      self.size.height + edges.vertical(),
    )
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Rect({}, {}, {}x{})",
      self.origin.x, self.origin.y, self.size.width, self.size.height
    )
  }
}

/// Per-side distances, used for margins, padding and border widths
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeOffsets {
  pub top: f32,
  pub right: f32,
  pub bottom: f32,
  pub left: f32,
}

impl EdgeOffsets {
  pub const ZERO: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  pub const fn all(value: f32) -> Self {
    Self {
      top: value,
      right: value,
      bottom: value,
      left: value,
    }
  }

  pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// Sum of left and right
  pub fn horizontal(self) -> f32 {
    self.left + self.right
  }

  /// Sum of top and bottom
  pub fn vertical(self) -> f32 {
    self.top + self.bottom
  }

  pub fn is_zero(self) -> bool {
    self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
  }
}

impl fmt::Display for EdgeOffsets {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "EdgeOffsets(t:{}, r:{}, b:{}, l:{})",
      self.top, self.right, self.bottom, self.left
    )
  }
}
