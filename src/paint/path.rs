//! Resolved path geometry
//!
//! [`ShapePath`] keeps the geometry of a resolved shape in analytic form so it
//! can be compared, translated and measured. [`ShapePath::to_skia`] converts it
//! into a `tiny_skia::Path` for rasterization. Every closed contour is built
//! clockwise starting from the top edge.

use tiny_skia::PathBuilder;

use crate::geometry::{Point, Rect};
use crate::style::border::{CornerRadii, CornerRadius};
use crate::style::shape::FillRule;

/// Magic number for the cubic approximation of a quarter ellipse: 4/3 * tan(π/8)
const KAPPA: f32 = 0.552_284_8;

/// Geometry produced by resolving a shape, a box outline or a border ring
#[derive(Debug, Clone, PartialEq)]
pub enum ShapePath {
  /// Axis-aligned rectangle, rounded when any corner radius is nonzero
  Rect { rect: Rect, radii: CornerRadii },
  Circle { center: Point, radius: f32 },
  Ellipse {
    center: Point,
    radius_x: f32,
    radius_y: f32,
  },
  Polygon {
    points: Vec<Point>,
    fill_rule: FillRule,
  },
  /// The area between two rounded rectangles, filled even-odd
  ///
  /// `inner` is expected to lie inside `outer`.
  Ring {
    outer: Rect,
    outer_radii: CornerRadii,
    inner: Rect,
    inner_radii: CornerRadii,
  },
}

impl ShapePath {
  pub fn rect(rect: Rect) -> Self {
    ShapePath::Rect {
      rect,
      radii: CornerRadii::ZERO,
    }
  }

  pub fn rounded_rect(rect: Rect, radii: CornerRadii) -> Self {
    ShapePath::Rect { rect, radii }
  }

  /// Fill rule the path must be rasterized with
  pub fn fill_rule(&self) -> FillRule {
    match self {
      ShapePath::Polygon { fill_rule, .. } => *fill_rule,
      ShapePath::Ring { .. } => FillRule::EvenOdd,
      _ => FillRule::NonZero,
    }
  }

  /// Axis-aligned bounding box
  pub fn bounds(&self) -> Rect {
    match self {
      ShapePath::Rect { rect, .. } => *rect,
      ShapePath::Circle { center, radius } => Rect::from_xywh(
        center.x - radius,
        center.y - radius,
        radius * 2.0,
        radius * 2.0,
      ),
      ShapePath::Ellipse {
        center,
        radius_x,
        radius_y,
      } => Rect::from_xywh(
        center.x - radius_x,
        center.y - radius_y,
        radius_x * 2.0,
        radius_y * 2.0,
      ),
      ShapePath::Polygon { points, .. } => {
        let Some(first) = points.first() else {
          return Rect::ZERO;
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points.iter().skip(1) {
          min_x = min_x.min(p.x);
          min_y = min_y.min(p.y);
          max_x = max_x.max(p.x);
          max_y = max_y.max(p.y);
        }
        Rect::from_ltrb(min_x, min_y, max_x, max_y)
      }
      ShapePath::Ring { outer, .. } => *outer,
    }
  }

  pub fn translate(&self, dx: f32, dy: f32) -> Self {
    match self {
      ShapePath::Rect { rect, radii } => ShapePath::Rect {
        rect: rect.translate(dx, dy),
        radii: *radii,
      },
      ShapePath::Circle { center, radius } => ShapePath::Circle {
        center: center.offset(dx, dy),
        radius: *radius,
      },
      ShapePath::Ellipse {
        center,
        radius_x,
        radius_y,
      } => ShapePath::Ellipse {
        center: center.offset(dx, dy),
        radius_x: *radius_x,
        radius_y: *radius_y,
      },
      ShapePath::Polygon { points, fill_rule } => ShapePath::Polygon {
        points: points.iter().map(|p| p.offset(dx, dy)).collect(),
        fill_rule: *fill_rule,
      },
      ShapePath::Ring {
        outer,
        outer_radii,
        inner,
        inner_radii,
      } => ShapePath::Ring {
        outer: outer.translate(dx, dy),
        outer_radii: *outer_radii,
        inner: inner.translate(dx, dy),
        inner_radii: *inner_radii,
      },
    }
  }

  /// Builds the tiny-skia path
  ///
  /// Returns `None` when the geometry encloses no area.
  pub fn to_skia(&self) -> Option<tiny_skia::Path> {
    match self {
      ShapePath::Rect { rect, radii } => rounded_rect(*rect, *radii),
      ShapePath::Circle { center, radius } => ellipse(*center, *radius, *radius),
      ShapePath::Ellipse {
        center,
        radius_x,
        radius_y,
      } => ellipse(*center, *radius_x, *radius_y),
      ShapePath::Polygon { points, .. } => polygon(points),
      ShapePath::Ring {
        outer,
        outer_radii,
        inner,
        inner_radii,
      } => {
        let mut pb = PathBuilder::new();
        if !push_rounded_rect(&mut pb, *outer, *outer_radii) {
          return None;
        }
        push_rounded_rect(&mut pb, *inner, *inner_radii);
        pb.finish()
      }
    }
  }
}

/// Builds a clockwise rounded rectangle
///
/// Radii are clamped so adjacent corners never overlap. Empty or non-finite
/// rectangles produce `None`.
pub fn rounded_rect(rect: Rect, radii: CornerRadii) -> Option<tiny_skia::Path> {
  let mut pb = PathBuilder::new();
  if !push_rounded_rect(&mut pb, rect, radii) {
    return None;
  }
  pb.finish()
}

fn push_rounded_rect(pb: &mut PathBuilder, rect: Rect, radii: CornerRadii) -> bool {
  if !rect.is_finite() || rect.is_empty() {
    return false;
  }
  let radii = radii.clamped(rect.width(), rect.height());
  let (l, t, r, b) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());
  // A corner flat along either axis is square.
  let square = |c: CornerRadius| if c.is_zero() { CornerRadius::ZERO } else { c };
  let tl = square(radii.top_left);
  let tr = square(radii.top_right);
  let br = square(radii.bottom_right);
  let bl = square(radii.bottom_left);

  pb.move_to(l + tl.horizontal, t);
  pb.line_to(r - tr.horizontal, t);
  if !tr.is_zero() {
    pb.cubic_to(
      r - tr.horizontal * (1.0 - KAPPA),
      t,
      r,
      t + tr.vertical * (1.0 - KAPPA),
      r,
      t + tr.vertical,
    );
  }
  pb.line_to(r, b - br.vertical);
  if !br.is_zero() {
    pb.cubic_to(
      r,
      b - br.vertical * (1.0 - KAPPA),
      r - br.horizontal * (1.0 - KAPPA),
      b,
      r - br.horizontal,
      b,
    );
  }
  pb.line_to(l + bl.horizontal, b);
  if !bl.is_zero() {
    pb.cubic_to(
      l + bl.horizontal * (1.0 - KAPPA),
      b,
      l,
      b - bl.vertical * (1.0 - KAPPA),
      l,
      b - bl.vertical,
    );
  }
  pb.line_to(l, t + tl.vertical);
  if !tl.is_zero() {
    pb.cubic_to(
      l,
      t + tl.vertical * (1.0 - KAPPA),
      l + tl.horizontal * (1.0 - KAPPA),
      t,
      l + tl.horizontal,
      t,
    );
  }
  pb.close();
  true
}

/// Builds a clockwise ellipse from four cubic quadrants, starting at the top
pub fn ellipse(center: Point, radius_x: f32, radius_y: f32) -> Option<tiny_skia::Path> {
  if !(radius_x > 0.0 && radius_y > 0.0) || !radius_x.is_finite() || !radius_y.is_finite() {
    return None;
  }
  let kx = radius_x * KAPPA;
  let ky = radius_y * KAPPA;
  let (cx, cy) = (center.x, center.y);

  let mut pb = PathBuilder::new();
  pb.move_to(cx, cy - radius_y);
  pb.cubic_to(cx + kx, cy - radius_y, cx + radius_x, cy - ky, cx + radius_x, cy);
  pb.cubic_to(cx + radius_x, cy + ky, cx + kx, cy + radius_y, cx, cy + radius_y);
  pb.cubic_to(cx - kx, cy + radius_y, cx - radius_x, cy + ky, cx - radius_x, cy);
  pb.cubic_to(cx - radius_x, cy - ky, cx - kx, cy - radius_y, cx, cy - radius_y);
  pb.close();
  pb.finish()
}

/// Move to the first point, line to the rest, close
pub fn polygon(points: &[Point]) -> Option<tiny_skia::Path> {
  let (first, rest) = points.split_first()?;
  let mut pb = PathBuilder::new();
  pb.move_to(first.x, first.y);
  for p in rest {
    pb.line_to(p.x, p.y);
  }
  pb.close();
  pb.finish()
}
