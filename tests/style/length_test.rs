//! Length resolution and radius handling

use std::collections::HashMap;

use backdrop::debug::runtime::DEVICE_SCALE;
use backdrop::debug::RuntimeToggles;
use backdrop::{BorderRadiusStyle, CornerRadius, LengthUnit, LengthValue, Rect, RenderContext};
use serde_json::json;

#[test]
fn descriptors_accept_bare_and_tagged_values() {
  assert_eq!(LengthValue::from_descriptor(&json!(12)), Some(LengthValue::points(12.0)));
  assert_eq!(
    LengthValue::from_descriptor(&json!({"value": 25, "unit": "PERCENT"})),
    Some(LengthValue::percent(25.0))
  );
  assert_eq!(
    LengthValue::from_descriptor(&json!({"value": 3, "unit": "em"})),
    Some(LengthValue::new(3.0, LengthUnit::Point))
  );
  assert_eq!(LengthValue::from_descriptor(&json!({"unit": "point"})), None);
  assert_eq!(LengthValue::from_descriptor(&json!("10px")), None);
}

#[test]
fn percent_ignores_device_scale() {
  let ctx = RenderContext::new(3.0);
  assert_eq!(LengthValue::points(10.0).resolve(100.0, &ctx), 30.0);
  assert_eq!(LengthValue::percent(10.0).resolve(100.0, &ctx), 10.0);
  assert_eq!(LengthValue::percent(150.0).resolve(100.0, &ctx), 150.0);
  assert_eq!(LengthValue::points(-2.0).resolve(100.0, &ctx), -6.0);
}

#[test]
fn device_scale_comes_from_toggles() {
  let toggles =
    RuntimeToggles::from_map(HashMap::from([(DEVICE_SCALE.to_string(), "2.5".to_string())]));
  assert_eq!(RenderContext::from_toggles(&toggles).device_scale, 2.5);

  let invalid =
    RuntimeToggles::from_map(HashMap::from([(DEVICE_SCALE.to_string(), "-1".to_string())]));
  assert_eq!(RenderContext::from_toggles(&invalid).device_scale, 1.0);
}

#[test]
fn border_radius_percent_is_elliptical() {
  let style = BorderRadiusStyle::uniform(LengthValue::percent(10.0));
  let radii = style.resolve(Rect::from_xywh(0.0, 0.0, 200.0, 100.0), &RenderContext::default());
  assert_eq!(radii.top_left, CornerRadius::new(20.0, 10.0));
  assert!(style.has_rounded_borders());
}

#[test]
fn per_corner_overrides_uniform() {
  let style = BorderRadiusStyle {
    uniform: Some(LengthValue::points(4.0)),
    bottom_right: Some(LengthValue::points(0.0)),
    ..BorderRadiusStyle::default()
  };
  let radii = style.resolve(Rect::from_xywh(0.0, 0.0, 50.0, 50.0), &RenderContext::default());
  assert_eq!(radii.top_left, CornerRadius::circular(4.0));
  assert_eq!(radii.bottom_right, CornerRadius::ZERO);
  assert!(radii.has_radius());
}
