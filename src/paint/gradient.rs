//! Gradient shaders for mask and background-image layers
//!
//! A [`Gradient`] is the declared value: a linear angle or a radial center
//! and radius plus color stops. Resolving it against a rectangle gives a
//! [`ResolvedGradient`] in physical pixels, which the tiny-skia backend turns
//! into a shader.
//!
//! Descriptors look like
//!
//! ```
//! use backdrop::paint::gradient::Gradient;
//! use serde_json::json;
//!
//! let gradient = Gradient::parse(&json!({
//!   "type": "linear-gradient",
//!   "angle": 90,
//!   "colorStops": [{"color": "#000000ff"}, {"color": "#00000000"}],
//! }))
//! .expect("gradient");
//! assert_eq!(gradient.stops.len(), 2);
//! assert_eq!(gradient.stops[1].offset, 1.0);
//! ```

use serde_json::{Map, Value};
use tiny_skia::{
  GradientStop as SkiaStop, LinearGradient, RadialGradient, Shader, SpreadMode, Transform,
};
use tracing::debug;

use crate::error::ParseError;
use crate::geometry::{Point, Rect};
use crate::style::color::Rgba;
use crate::style::values::{LengthUnit, LengthValue, RenderContext};

/// A color at a normalized position along the gradient line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
  pub offset: f32,
  pub color: Rgba,
}

impl GradientStop {
  pub fn new(offset: f32, color: Rgba) -> Self {
    Self { offset, color }
  }
}

/// Geometry of a declared gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientKind {
  /// CSS angle in degrees: 0 points up, 90 right, 180 (the default) down
  Linear { angle: f32 },
  /// Circle around `(cx, cy)`; `radius: None` reaches the farthest corner
  Radial {
    cx: LengthValue,
    cy: LengthValue,
    radius: Option<LengthValue>,
  },
}

/// A declared linear or radial gradient
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
  pub kind: GradientKind,
  pub stops: Vec<GradientStop>,
}

impl Gradient {
  pub fn linear(angle: f32, stops: Vec<GradientStop>) -> Self {
    Self {
      kind: GradientKind::Linear { angle },
      stops,
    }
  }

  /// Radial gradient centered in the box, reaching the farthest corner
  pub fn radial(stops: Vec<GradientStop>) -> Self {
    Self {
      kind: GradientKind::Radial {
        cx: LengthValue::percent(50.0),
        cy: LengthValue::percent(50.0),
        radius: None,
      },
      stops,
    }
  }

  pub fn parse(descriptor: &Value) -> Option<Self> {
    match Self::try_parse(descriptor) {
      Ok(gradient) => Some(gradient),
      Err(err) => {
        debug!(%err, "rejected gradient descriptor");
        None
      }
    }
  }

  /// Parses `{type: "linear-gradient" | "radial-gradient", colorStops, ...}`
  pub fn try_parse(descriptor: &Value) -> Result<Self, ParseError> {
    let map = descriptor.as_object().ok_or(ParseError::NotAnObject)?;
    let kind = map
      .get("type")
      .and_then(Value::as_str)
      .ok_or(ParseError::MissingType)?;
    let kind = match kind.to_ascii_lowercase().as_str() {
      "linear-gradient" => GradientKind::Linear {
        angle: map
          .get("angle")
          .and_then(Value::as_f64)
          .map(|a| a as f32)
          .unwrap_or(180.0),
      },
      "radial-gradient" => GradientKind::Radial {
        cx: length(map, "cx").unwrap_or(LengthValue::percent(50.0)),
        cy: length(map, "cy").unwrap_or(LengthValue::percent(50.0)),
        radius: length(map, "r"),
      },
      _ => {
        return Err(ParseError::UnknownType {
          kind: kind.to_string(),
        })
      }
    };
    let stops = parse_stops(map)?;
    Ok(Self { kind, stops })
  }

  /// Resolves the gradient line against `area`
  ///
  /// Returns `None` without stops or for an empty area.
  pub fn resolve(&self, area: Rect, ctx: &RenderContext) -> Option<ResolvedGradient> {
    if self.stops.is_empty() || area.is_empty() || !area.is_finite() {
      return None;
    }
    let geometry = match self.kind {
      GradientKind::Linear { angle } => {
        let radians = angle.to_radians();
        let (sin, cos) = radians.sin_cos();
        let half = (area.width() * sin.abs() + area.height() * cos.abs()) / 2.0;
        let center = area.center();
        GradientGeometry::Linear {
          start: Point::new(center.x - sin * half, center.y + cos * half),
          end: Point::new(center.x + sin * half, center.y - cos * half),
        }
      }
      GradientKind::Radial { cx, cy, radius } => {
        let center = Point::new(
          area.x() + cx.resolve(area.width(), ctx),
          area.y() + cy.resolve(area.height(), ctx),
        );
        let radius = match radius {
          Some(r) => r.resolve((area.width() + area.height()) / 2.0, ctx),
          None => [
            Point::new(area.min_x(), area.min_y()),
            Point::new(area.max_x(), area.min_y()),
            Point::new(area.max_x(), area.max_y()),
            Point::new(area.min_x(), area.max_y()),
          ]
          .into_iter()
          .map(|corner| center.distance_to(corner))
          .fold(0.0, f32::max),
        };
        GradientGeometry::Radial { center, radius }
      }
    };
    Some(ResolvedGradient {
      geometry,
      stops: self.stops.clone(),
      opacity: 1.0,
    })
  }
}

fn length(map: &Map<String, Value>, field: &str) -> Option<LengthValue> {
  map.get(field).and_then(LengthValue::from_descriptor)
}

fn parse_stops(map: &Map<String, Value>) -> Result<Vec<GradientStop>, ParseError> {
  let missing = ParseError::MissingField {
    kind: "gradient",
    field: "colorStops",
  };
  let entries = map
    .get("colorStops")
    .and_then(Value::as_array)
    .ok_or(missing.clone())?;

  let mut declared = Vec::with_capacity(entries.len());
  for entry in entries {
    let color = entry.get("color").and_then(parse_color).ok_or(ParseError::MissingField {
      kind: "gradient",
      field: "color",
    })?;
    let position = entry
      .get("position")
      .and_then(LengthValue::from_descriptor)
      .map(|len| match len.unit {
        LengthUnit::Percent => len.value / 100.0,
        LengthUnit::Point => len.value,
      });
    declared.push((position, color));
  }
  if declared.is_empty() {
    return Err(missing);
  }
  Ok(distribute_stops(&declared))
}

/// Packed `0xAARRGGBB` integers or hex strings
fn parse_color(value: &Value) -> Option<Rgba> {
  match value {
    Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).map(Rgba::from_argb),
    Value::String(s) => Rgba::from_hex(s),
    _ => None,
  }
}

/// Fills in missing stop positions
///
/// The first and last stops default to 0 and 1, runs of unpositioned stops
/// are spaced evenly between their positioned neighbours, and every position
/// is raised to at least the one before it.
fn distribute_stops(declared: &[(Option<f32>, Rgba)]) -> Vec<GradientStop> {
  let last = declared.len() - 1;
  let mut offsets: Vec<Option<f32>> = declared.iter().map(|(pos, _)| *pos).collect();
  if offsets[0].is_none() {
    offsets[0] = Some(0.0);
  }
  if offsets[last].is_none() {
    offsets[last] = Some(if last == 0 { 0.0 } else { 1.0 });
  }

  let mut running = f32::NEG_INFINITY;
  let mut i = 0;
  while i <= last {
    if let Some(pos) = offsets[i] {
      running = running.max(pos);
      offsets[i] = Some(running);
      i += 1;
      continue;
    }
    let gap_start = i;
    let mut gap_end = i;
    while offsets[gap_end].is_none() {
      gap_end += 1;
    }
    let from = running;
    let to = offsets[gap_end].unwrap_or(from).max(from);
    let steps = (gap_end - gap_start + 1) as f32;
    for (n, slot) in offsets[gap_start..gap_end].iter_mut().enumerate() {
      *slot = Some(from + (to - from) * (n + 1) as f32 / steps);
    }
    i = gap_end;
  }

  offsets
    .into_iter()
    .zip(declared)
    .map(|(offset, (_, color))| GradientStop::new(offset.unwrap_or(0.0), *color))
    .collect()
}

/// Gradient line in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
  Linear { start: Point, end: Point },
  Radial { center: Point, radius: f32 },
}

/// A gradient ready to be turned into a shader
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGradient {
  pub geometry: GradientGeometry,
  pub stops: Vec<GradientStop>,
  /// Multiplier applied to every stop's alpha
  pub opacity: f32,
}

impl ResolvedGradient {
  pub fn with_opacity(mut self, opacity: f32) -> Self {
    self.opacity = opacity.clamp(0.0, 1.0);
    self
  }

  /// Builds a padded tiny-skia shader
  pub fn to_shader(&self) -> Option<Shader<'static>> {
    let stops: Vec<SkiaStop> = self
      .stops
      .iter()
      .map(|stop| {
        let color = stop.color.with_alpha(stop.color.a * self.opacity);
        SkiaStop::new(stop.offset.clamp(0.0, 1.0), color.to_skia())
      })
      .collect();
    match self.geometry {
      GradientGeometry::Linear { start, end } => LinearGradient::new(
        tiny_skia::Point::from_xy(start.x, start.y),
        tiny_skia::Point::from_xy(end.x, end.y),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
      ),
      GradientGeometry::Radial { center, radius } => {
        let center = tiny_skia::Point::from_xy(center.x, center.y);
        RadialGradient::new(center, center, radius, stops, SpreadMode::Pad, Transform::identity())
      }
    }
  }
}
