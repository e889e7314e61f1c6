//! Basic shapes for clip regions
//!
//! A closed set of shape functions (`circle()`, `ellipse()`, `inset()`,
//! `polygon()`, `rect()`, `xywh()`), the polygon fill rule, the geometry box
//! keywords and the clip region that pairs them.
//!
//! Shapes are read from structured descriptors produced by the style front
//! end. A descriptor is a JSON object with a case-insensitive `type` and the
//! variant's length fields:
//!
//! ```
//! use backdrop::style::shape::BasicShape;
//! use serde_json::json;
//!
//! let shape = BasicShape::parse(&json!({
//!   "type": "Circle",
//!   "r": {"value": 50, "unit": "percent"},
//! }));
//! assert!(matches!(shape, Some(BasicShape::Circle(_))));
//!
//! // A missing required field rejects the whole descriptor.
//! assert_eq!(BasicShape::parse(&json!({"type": "ellipse", "rx": 10})), None);
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ParseError;
use crate::style::values::LengthValue;

/// `circle(r at cx cy)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
  pub r: LengthValue,
  pub cx: Option<LengthValue>,
  pub cy: Option<LengthValue>,
}

/// `ellipse(rx ry at cx cy)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseShape {
  pub rx: LengthValue,
  pub ry: LengthValue,
  pub cx: Option<LengthValue>,
  pub cy: Option<LengthValue>,
}

/// `inset(top right bottom left round radius)`, each edge measured inward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetShape {
  pub top: LengthValue,
  pub right: LengthValue,
  pub bottom: LengthValue,
  pub left: LengthValue,
  pub border_radius: Option<LengthValue>,
}

/// `rect(top right bottom left round radius)`
///
/// Every edge is a distance from the top-left origin of the reference box,
/// so `right` and `bottom` are not measured from the far edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
  pub top: LengthValue,
  pub right: LengthValue,
  pub bottom: LengthValue,
  pub left: LengthValue,
  pub border_radius: Option<LengthValue>,
}

/// `xywh(x y width height round radius)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XywhShape {
  pub x: LengthValue,
  pub y: LengthValue,
  pub width: LengthValue,
  pub height: LengthValue,
  pub border_radius: Option<LengthValue>,
}

/// Winding rule for polygon interiors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
  #[default]
  NonZero,
  EvenOdd,
}

impl FillRule {
  /// `evenodd` (any case) is even-odd, everything else is nonzero
  pub fn from_keyword(keyword: &str) -> Self {
    if keyword.trim().eq_ignore_ascii_case("evenodd") {
      FillRule::EvenOdd
    } else {
      FillRule::NonZero
    }
  }

  pub fn to_skia(self) -> tiny_skia::FillRule {
    match self {
      FillRule::NonZero => tiny_skia::FillRule::Winding,
      FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
  }
}

/// `polygon(fill-rule, x1 y1, x2 y2, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
  pub points: Vec<(LengthValue, LengthValue)>,
  pub fill_rule: Option<FillRule>,
}

/// The closed set of shape functions
#[derive(Debug, Clone, PartialEq)]
pub enum BasicShape {
  Circle(CircleShape),
  Ellipse(EllipseShape),
  Inset(InsetShape),
  Polygon(PolygonShape),
  Rect(RectShape),
  Xywh(XywhShape),
}

impl BasicShape {
  /// Parses a shape descriptor, mapping every rejection to `None`
  pub fn parse(descriptor: &Value) -> Option<Self> {
    match Self::try_parse(descriptor) {
      Ok(shape) => Some(shape),
      Err(err) => {
        debug!(%err, "rejected shape descriptor");
        None
      }
    }
  }

  /// Parses a shape descriptor, reporting why it was rejected
  pub fn try_parse(descriptor: &Value) -> Result<Self, ParseError> {
    let map = descriptor.as_object().ok_or(ParseError::NotAnObject)?;
    let kind = map
      .get("type")
      .and_then(Value::as_str)
      .ok_or(ParseError::MissingType)?;

    match kind.to_ascii_lowercase().as_str() {
      "circle" => Ok(BasicShape::Circle(CircleShape {
        r: required(map, "circle", "r")?,
        cx: optional(map, "cx"),
        cy: optional(map, "cy"),
      })),
      "ellipse" => Ok(BasicShape::Ellipse(EllipseShape {
        rx: required(map, "ellipse", "rx")?,
        ry: required(map, "ellipse", "ry")?,
        cx: optional(map, "cx"),
        cy: optional(map, "cy"),
      })),
      "inset" => Ok(BasicShape::Inset(InsetShape {
        top: required(map, "inset", "top")?,
        right: required(map, "inset", "right")?,
        bottom: required(map, "inset", "bottom")?,
        left: required(map, "inset", "left")?,
        border_radius: optional(map, "borderRadius"),
      })),
      "polygon" => parse_polygon(map).map(BasicShape::Polygon),
      "rect" => Ok(BasicShape::Rect(RectShape {
        top: required(map, "rect", "top")?,
        right: required(map, "rect", "right")?,
        bottom: required(map, "rect", "bottom")?,
        left: required(map, "rect", "left")?,
        border_radius: optional(map, "borderRadius"),
      })),
      "xywh" => Ok(BasicShape::Xywh(XywhShape {
        x: required(map, "xywh", "x")?,
        y: required(map, "xywh", "y")?,
        width: required(map, "xywh", "width")?,
        height: required(map, "xywh", "height")?,
        border_radius: optional(map, "borderRadius"),
      })),
      _ => Err(ParseError::UnknownType {
        kind: kind.to_string(),
      }),
    }
  }
}

fn required(
  map: &Map<String, Value>,
  kind: &'static str,
  field: &'static str,
) -> Result<LengthValue, ParseError> {
  optional(map, field).ok_or(ParseError::MissingField { kind, field })
}

fn optional(map: &Map<String, Value>, field: &str) -> Option<LengthValue> {
  map.get(field).and_then(LengthValue::from_descriptor)
}

fn parse_polygon(map: &Map<String, Value>) -> Result<PolygonShape, ParseError> {
  let entries = map
    .get("points")
    .and_then(Value::as_array)
    .ok_or(ParseError::MissingField {
      kind: "polygon",
      field: "points",
    })?;

  // Entries without both coordinates are dropped, not fatal.
  let points = entries
    .iter()
    .filter_map(Value::as_object)
    .filter_map(|point| Some((optional(point, "x")?, optional(point, "y")?)))
    .collect();

  let fill_rule = map
    .get("fillRule")
    .map(|rule| FillRule::from_keyword(rule.as_str().unwrap_or("nonzero")));

  Ok(PolygonShape { points, fill_rule })
}

/// Reference box a clip shape is laid out against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryBox {
  MarginBox,
  #[default]
  BorderBox,
  ContentBox,
  PaddingBox,
  FillBox,
  StrokeBox,
  ViewBox,
}

impl GeometryBox {
  /// Case-insensitive keyword; unknown keywords fall back to `border-box`
  pub fn from_keyword(keyword: &str) -> Self {
    match keyword.trim().to_ascii_lowercase().as_str() {
      "margin-box" => GeometryBox::MarginBox,
      "content-box" => GeometryBox::ContentBox,
      "padding-box" => GeometryBox::PaddingBox,
      "fill-box" => GeometryBox::FillBox,
      "stroke-box" => GeometryBox::StrokeBox,
      "view-box" => GeometryBox::ViewBox,
      _ => GeometryBox::BorderBox,
    }
  }
}

/// A clip-path value: an optional shape laid out in an optional box
///
/// A region without a shape does not clip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipRegion {
  pub shape: Option<BasicShape>,
  pub geometry_box: Option<GeometryBox>,
}

impl ClipRegion {
  pub fn new(shape: BasicShape) -> Self {
    Self {
      shape: Some(shape),
      geometry_box: None,
    }
  }

  pub fn with_geometry_box(mut self, geometry_box: GeometryBox) -> Self {
    self.geometry_box = Some(geometry_box);
    self
  }

  /// Parses `{shape?, geometryBox?}`
  ///
  /// Only a non-object input yields `None`. An invalid `shape` leaves the
  /// region without a shape.
  pub fn parse(descriptor: &Value) -> Option<Self> {
    let map = descriptor.as_object()?;
    let shape = map
      .get("shape")
      .filter(|shape| shape.is_object())
      .and_then(BasicShape::parse);
    let geometry_box = map
      .get("geometryBox")
      .map(|keyword| GeometryBox::from_keyword(keyword.as_str().unwrap_or("border-box")));
    Some(Self {
      shape,
      geometry_box,
    })
  }

  /// The box used when none was declared
  pub fn effective_geometry_box(&self) -> GeometryBox {
    self.geometry_box.unwrap_or_default()
  }
}
