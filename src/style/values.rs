//! Length values and the render context they resolve against
//!
//! Descriptor lengths come in two units: logical points, which scale by the
//! device pixel ratio, and percentages of a reference dimension that is
//! already in physical pixels.
//!
//! ```
//! use backdrop::{LengthValue, RenderContext};
//!
//! let ctx = RenderContext::new(2.0);
//! assert_eq!(LengthValue::points(10.0).resolve(100.0, &ctx), 20.0);
//! assert_eq!(LengthValue::percent(25.0).resolve(100.0, &ctx), 25.0);
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::debug::runtime::RuntimeToggles;

/// Unit of a [`LengthValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
  /// Logical points, multiplied by the device scale
  #[default]
  Point,
  /// Percentage of a reference dimension
  Percent,
}

impl LengthUnit {
  /// Case-insensitive unit tag; anything unrecognized is a point
  pub fn from_tag(tag: &str) -> Self {
    if tag.trim().eq_ignore_ascii_case("percent") || tag.trim() == "%" {
      LengthUnit::Percent
    } else {
      LengthUnit::Point
    }
  }
}

/// A number paired with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthValue {
  pub value: f32,
  pub unit: LengthUnit,
}

impl LengthValue {
  pub const ZERO: Self = Self::points(0.0);

  pub const fn new(value: f32, unit: LengthUnit) -> Self {
    Self { value, unit }
  }

  pub const fn points(value: f32) -> Self {
    Self::new(value, LengthUnit::Point)
  }

  pub const fn percent(value: f32) -> Self {
    Self::new(value, LengthUnit::Percent)
  }

  /// Converts to physical pixels
  ///
  /// `reference` is the percentage basis in physical pixels and is ignored
  /// for points. Negative values and percentages above 100 pass through.
  pub fn resolve(self, reference: f32, ctx: &RenderContext) -> f32 {
    match self.unit {
      LengthUnit::Point => self.value * ctx.device_scale,
      LengthUnit::Percent => self.value / 100.0 * reference,
    }
  }

  /// Reads a descriptor length: a bare number (points) or `{value, unit}`
  ///
  /// Returns `None` when the value is missing, not numeric or not finite.
  pub fn from_descriptor(value: &Value) -> Option<Self> {
    let raw = RawLength::deserialize(value).ok()?;
    let length = match raw {
      RawLength::Bare(value) => LengthValue::points(value),
      RawLength::Tagged { value, unit } => LengthValue::new(
        value,
        unit
          .as_ref()
          .and_then(Value::as_str)
          .map(LengthUnit::from_tag)
          .unwrap_or_default(),
      ),
    };
    length.value.is_finite().then_some(length)
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
  Bare(f32),
  Tagged {
    value: f32,
    // Any JSON; non-string units fall back to points.
    #[serde(default)]
    unit: Option<Value>,
  },
}

/// Per-draw parameters threaded through resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
  /// Physical pixels per logical point
  pub device_scale: f32,
}

impl RenderContext {
  pub fn new(device_scale: f32) -> Self {
    let device_scale = if device_scale.is_finite() && device_scale > 0.0 {
      device_scale
    } else {
      1.0
    };
    Self { device_scale }
  }

  /// Context using `BACKDROP_DEVICE_SCALE`, defaulting to 1.0
  pub fn from_toggles(toggles: &RuntimeToggles) -> Self {
    Self::new(toggles.device_scale())
  }
}

impl Default for RenderContext {
  fn default() -> Self {
    Self::new(1.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn points_scale_with_device() {
    let ctx = RenderContext::new(3.0);
    assert_eq!(LengthValue::points(4.0).resolve(1000.0, &ctx), 12.0);
  }

  #[test]
  fn percent_ignores_device_scale() {
    let ctx = RenderContext::new(3.0);
    assert_eq!(LengthValue::percent(50.0).resolve(80.0, &ctx), 40.0);
  }

  #[test]
  fn magnitudes_are_not_clamped() {
    let ctx = RenderContext::default();
    assert_eq!(LengthValue::percent(150.0).resolve(10.0, &ctx), 15.0);
    assert_eq!(LengthValue::points(-5.0).resolve(10.0, &ctx), -5.0);
  }

  #[test]
  fn descriptor_lengths() {
    assert_eq!(
      LengthValue::from_descriptor(&json!(12)),
      Some(LengthValue::points(12.0))
    );
    assert_eq!(
      LengthValue::from_descriptor(&json!({"value": 50, "unit": "PERCENT"})),
      Some(LengthValue::percent(50.0))
    );
    assert_eq!(
      LengthValue::from_descriptor(&json!({"value": 7, "unit": "furlong"})),
      Some(LengthValue::points(7.0))
    );
    assert_eq!(
      LengthValue::from_descriptor(&json!({"value": 7})),
      Some(LengthValue::points(7.0))
    );
    assert_eq!(
      LengthValue::from_descriptor(&json!({"value": 5, "unit": 7})),
      Some(LengthValue::points(5.0))
    );
    assert_eq!(
      LengthValue::from_descriptor(&json!({"value": 5, "unit": null})),
      Some(LengthValue::points(5.0))
    );
    assert_eq!(LengthValue::from_descriptor(&json!("12px")), None);
    assert_eq!(LengthValue::from_descriptor(&json!({"unit": "point"})), None);
    assert_eq!(LengthValue::from_descriptor(&Value::Null), None);
  }

  #[test]
  fn invalid_device_scale_falls_back() {
    assert_eq!(RenderContext::new(0.0).device_scale, 1.0);
    assert_eq!(RenderContext::new(f32::NAN).device_scale, 1.0);
    assert_eq!(RenderContext::new(2.5).device_scale, 2.5);
  }
}
