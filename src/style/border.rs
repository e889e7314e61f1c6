//! Corner radii and border insets
//!
//! [`BorderRadiusStyle`] and [`BorderInsets`] hold the declared values;
//! resolving them against a box produces physical-pixel [`CornerRadii`] and
//! [`EdgeOffsets`].

use crate::geometry::{EdgeOffsets, Rect};
use crate::style::values::{LengthValue, RenderContext};

/// Elliptical radius of a single corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadius {
  pub horizontal: f32,
  pub vertical: f32,
}

impl CornerRadius {
  pub const ZERO: Self = Self {
    horizontal: 0.0,
    vertical: 0.0,
  };

  pub const fn new(horizontal: f32, vertical: f32) -> Self {
    Self {
      horizontal,
      vertical,
    }
  }

  pub const fn circular(radius: f32) -> Self {
    Self::new(radius, radius)
  }

  pub fn is_zero(self) -> bool {
    self.horizontal <= 0.0 || self.vertical <= 0.0
  }

  fn scaled(self, factor: f32) -> Self {
    Self::new(
      (self.horizontal * factor).max(0.0),
      (self.vertical * factor).max(0.0),
    )
  }

  fn grown(self, horizontal: f32, vertical: f32) -> Self {
    Self::new(
      (self.horizontal + horizontal).max(0.0),
      (self.vertical + vertical).max(0.0),
    )
  }
}

/// Radii for all four corners, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
  pub top_left: CornerRadius,
  pub top_right: CornerRadius,
  pub bottom_right: CornerRadius,
  pub bottom_left: CornerRadius,
}

impl CornerRadii {
  pub const ZERO: Self = Self::uniform(CornerRadius::ZERO);

  pub const fn uniform(radius: CornerRadius) -> Self {
    Self {
      top_left: radius,
      top_right: radius,
      bottom_right: radius,
      bottom_left: radius,
    }
  }

  /// Returns true if at least one corner is rounded
  pub fn has_radius(&self) -> bool {
    !self.top_left.is_zero()
      || !self.top_right.is_zero()
      || !self.bottom_right.is_zero()
      || !self.bottom_left.is_zero()
  }

  pub fn is_zero(&self) -> bool {
    !self.has_radius()
  }

  /// Scales every radius down so adjacent corners never overlap
  ///
  /// If the sum of two radii along a side exceeds that side, all radii are
  /// scaled by the same factor. Empty boxes get no rounding.
  pub fn clamped(self, width: f32, height: f32) -> Self {
    if width <= 0.0 || height <= 0.0 {
      return Self::ZERO;
    }

    let top = width / (self.top_left.horizontal + self.top_right.horizontal).max(width);
    let bottom = width / (self.bottom_left.horizontal + self.bottom_right.horizontal).max(width);
    let left = height / (self.top_left.vertical + self.bottom_left.vertical).max(height);
    let right = height / (self.top_right.vertical + self.bottom_right.vertical).max(height);
    let scale = top.min(bottom).min(left).min(right);

    Self {
      top_left: self.top_left.scaled(scale),
      top_right: self.top_right.scaled(scale),
      bottom_right: self.bottom_right.scaled(scale),
      bottom_left: self.bottom_left.scaled(scale),
    }
  }

  /// Grows each corner by the adjacent insets
  ///
  /// Horizontal radii take the left/right inset of their side, vertical radii
  /// the top/bottom inset.
  pub fn outset_by(self, insets: EdgeOffsets) -> Self {
    Self {
      top_left: self.top_left.grown(insets.left, insets.top),
      top_right: self.top_right.grown(insets.right, insets.top),
      bottom_right: self.bottom_right.grown(insets.right, insets.bottom),
      bottom_left: self.bottom_left.grown(insets.left, insets.bottom),
    }
  }

  /// Shrinks each corner by the adjacent insets, clamping at zero
  pub fn inset_by(self, insets: EdgeOffsets) -> Self {
    self.outset_by(EdgeOffsets::new(
      -insets.top,
      -insets.right,
      -insets.bottom,
      -insets.left,
    ))
  }
}

/// Declared border radius
///
/// Per-corner values override `uniform`. Percentages resolve horizontally
/// against the box width and vertically against its height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderRadiusStyle {
  pub uniform: Option<LengthValue>,
  pub top_left: Option<LengthValue>,
  pub top_right: Option<LengthValue>,
  pub bottom_right: Option<LengthValue>,
  pub bottom_left: Option<LengthValue>,
}

impl BorderRadiusStyle {
  pub fn uniform(radius: LengthValue) -> Self {
    Self {
      uniform: Some(radius),
      ..Self::default()
    }
  }

  /// Returns true if any declared corner is nonzero
  pub fn has_rounded_borders(&self) -> bool {
    [
      self.top_left,
      self.top_right,
      self.bottom_right,
      self.bottom_left,
    ]
    .into_iter()
    .any(|corner| corner.or(self.uniform).is_some_and(|len| len.value > 0.0))
  }

  pub fn resolve(&self, bounds: Rect, ctx: &RenderContext) -> CornerRadii {
    let corner = |declared: Option<LengthValue>| {
      declared
        .or(self.uniform)
        .map(|len| {
          CornerRadius::new(
            len.resolve(bounds.width(), ctx).max(0.0),
            len.resolve(bounds.height(), ctx).max(0.0),
          )
        })
        .unwrap_or_default()
    };
    CornerRadii {
      top_left: corner(self.top_left),
      top_right: corner(self.top_right),
      bottom_right: corner(self.bottom_right),
      bottom_left: corner(self.bottom_left),
    }
  }
}

/// Declared border widths, in logical points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderInsets {
  pub top: f32,
  pub right: f32,
  pub bottom: f32,
  pub left: f32,
}

impl BorderInsets {
  pub fn all(width: f32) -> Self {
    Self {
      top: width,
      right: width,
      bottom: width,
      left: width,
    }
  }

  pub fn resolve(&self, ctx: &RenderContext) -> EdgeOffsets {
    let px = |v: f32| (v * ctx.device_scale).max(0.0);
    EdgeOffsets::new(px(self.top), px(self.right), px(self.bottom), px(self.left))
  }
}
