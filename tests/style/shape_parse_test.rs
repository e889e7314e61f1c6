//! Shape descriptor parsing

use backdrop::style::shape::{CircleShape, InsetShape};
use backdrop::{BasicShape, ClipRegion, FillRule, GeometryBox, LengthValue, ParseError};
use serde_json::json;

#[test]
fn type_is_case_insensitive() {
  let shape = BasicShape::parse(&json!({"type": "CiRcLe", "r": 5}));
  assert_eq!(
    shape,
    Some(BasicShape::Circle(CircleShape {
      r: LengthValue::points(5.0),
      cx: None,
      cy: None,
    }))
  );
}

#[test]
fn incomplete_descriptors_are_rejected_whole() {
  assert_eq!(BasicShape::parse(&json!({"type": "ellipse", "rx": 5})), None);
  assert_eq!(
    BasicShape::parse(&json!({"type": "inset", "top": 1, "right": 1, "bottom": 1})),
    None
  );
  assert_eq!(BasicShape::parse(&json!({"type": "xywh", "x": 0, "y": 0, "width": 1})), None);
  assert_eq!(BasicShape::parse(&json!({"type": "polygon"})), None);
  assert_eq!(BasicShape::parse(&json!({"type": "path", "d": "M0 0"})), None);
  assert_eq!(BasicShape::parse(&json!({"r": 5})), None);
  assert_eq!(BasicShape::parse(&json!([1, 2, 3])), None);
}

#[test]
fn rejection_reasons() {
  assert_eq!(
    BasicShape::try_parse(&json!({"type": "rect", "top": 0, "right": 0, "bottom": 0})),
    Err(ParseError::MissingField {
      kind: "rect",
      field: "left",
    })
  );
  assert_eq!(
    BasicShape::try_parse(&json!({"type": "star"})),
    Err(ParseError::UnknownType {
      kind: "star".to_string(),
    })
  );
}

#[test]
fn inset_keeps_optional_radius() {
  let shape = BasicShape::parse(&json!({
    "type": "inset",
    "top": 1,
    "right": 2,
    "bottom": 3,
    "left": {"value": 4, "unit": "percent"},
    "borderRadius": 6,
  }));
  assert_eq!(
    shape,
    Some(BasicShape::Inset(InsetShape {
      top: LengthValue::points(1.0),
      right: LengthValue::points(2.0),
      bottom: LengthValue::points(3.0),
      left: LengthValue::percent(4.0),
      border_radius: Some(LengthValue::points(6.0)),
    }))
  );
}

#[test]
fn polygon_fill_rule_keyword() {
  let Some(BasicShape::Polygon(polygon)) = BasicShape::parse(&json!({
    "type": "polygon",
    "fillRule": "EVENODD",
    "points": [{"x": 0, "y": 0}, "junk", {"x": 1, "y": 1}],
  })) else {
    panic!("expected polygon");
  };
  assert_eq!(polygon.fill_rule, Some(FillRule::EvenOdd));
  assert_eq!(polygon.points.len(), 2);
}

#[test]
fn clip_region_tolerates_bad_parts() {
  let region = ClipRegion::parse(&json!({
    "shape": {"type": "circle"},
    "geometryBox": 7,
  }))
  .expect("region");
  assert_eq!(region.shape, None);
  assert_eq!(region.effective_geometry_box(), GeometryBox::BorderBox);

  let region = ClipRegion::parse(&json!({"geometryBox": "MARGIN-box"})).expect("region");
  assert_eq!(region.effective_geometry_box(), GeometryBox::MarginBox);

  assert_eq!(ClipRegion::parse(&json!("circle(50%)")), None);
}

#[test]
fn non_string_unit_reads_as_points() {
  let shape = BasicShape::parse(&json!({"type": "circle", "r": {"value": 5, "unit": 7}}));
  assert_eq!(
    shape,
    Some(BasicShape::Circle(CircleShape {
      r: LengthValue::points(5.0),
      cx: None,
      cy: None,
    }))
  );
}
