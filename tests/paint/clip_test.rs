//! Shape resolution and clipped drawing

use backdrop::paint::{
  draw_clipped, resolve_basic_shape, resolve_clip_region, Canvas, Fill, ReferenceBoxes, ShapePath,
};
use backdrop::{BasicShape, ClipRegion, EdgeOffsets, FillRule, Point, Rect, RenderContext, Rgba};
use serde_json::json;

use super::util::{alpha, pixel};

fn square() -> Rect {
  Rect::from_xywh(0.0, 0.0, 100.0, 100.0)
}

fn resolve(descriptor: serde_json::Value) -> Option<ShapePath> {
  let shape = BasicShape::parse(&descriptor).expect("shape parses");
  resolve_basic_shape(&shape, square(), &RenderContext::default())
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn circle_half_percent_fills_square() {
  let resolved = resolve(json!({"type": "circle", "r": {"value": 50, "unit": "percent"}}));
  assert_eq!(
    resolved,
    Some(ShapePath::Circle {
      center: Point::new(50.0, 50.0),
      radius: 50.0,
    })
  );
}

#[test]
fn ellipse_defaults_to_center() {
  let resolved = resolve(json!({"type": "ellipse", "rx": 20, "ry": {"value": 10, "unit": "%"}}));
  assert_eq!(
    resolved,
    Some(ShapePath::Ellipse {
      center: Point::new(50.0, 50.0),
      radius_x: 20.0,
      radius_y: 10.0,
    })
  );
}

#[test]
fn inset_ten_points() {
  let resolved =
    resolve(json!({"type": "inset", "top": 10, "right": 10, "bottom": 10, "left": 10}));
  assert_eq!(
    resolved,
    Some(ShapePath::rect(Rect::from_ltrb(10.0, 10.0, 90.0, 90.0)))
  );
}

#[test]
fn rect_with_collapsed_edges_does_not_clip() {
  let resolved = resolve(json!({"type": "rect", "top": 10, "right": 10, "bottom": 10, "left": 10}));
  assert_eq!(resolved, None);
}

#[test]
fn empty_polygon_does_not_clip() {
  assert_eq!(resolve(json!({"type": "polygon", "points": []})), None);
}

#[test]
fn polygon_defaults_to_nonzero() {
  let resolved = resolve(json!({
    "type": "polygon",
    "points": [{"x": 0, "y": 0}, {"x": 100, "y": 0}, {"y": 5}, {"x": 50, "y": 100}],
  }));
  let Some(ShapePath::Polygon { points, fill_rule }) = resolved else {
    panic!("expected polygon");
  };
  assert_eq!(points.len(), 3);
  assert_eq!(fill_rule, FillRule::NonZero);
}

#[test]
fn resolution_is_repeatable() {
  let shape = BasicShape::parse(&json!({
    "type": "xywh",
    "x": {"value": 10, "unit": "percent"},
    "y": 5,
    "width": 50,
    "height": {"value": 50, "unit": "percent"},
    "borderRadius": 4,
  }))
  .expect("shape");
  let ctx = RenderContext::new(2.0);
  let first = resolve_basic_shape(&shape, square(), &ctx);
  let second = resolve_basic_shape(&shape, square(), &ctx);
  assert!(first.is_some());
  assert_eq!(first, second);
}

#[test]
fn clip_region_against_content_box() {
  let region = ClipRegion::parse(&json!({
    "shape": {"type": "inset", "top": 0, "right": 0, "bottom": 0, "left": 0},
    "geometryBox": "Content-Box",
  }))
  .expect("region");
  let boxes = ReferenceBoxes::new(
    square(),
    EdgeOffsets::ZERO,
    EdgeOffsets::all(5.0),
    EdgeOffsets::all(5.0),
  );
  assert_eq!(
    resolve_clip_region(&region, &boxes, &RenderContext::default()),
    Some(ShapePath::rect(Rect::from_xywh(10.0, 10.0, 80.0, 80.0)))
  );

  let shapeless = ClipRegion::parse(&json!({"geometryBox": "padding-box"})).expect("region");
  assert_eq!(
    resolve_clip_region(&shapeless, &boxes, &RenderContext::default()),
    None
  );
}

// ============================================================================
// Rasterized clipping
// ============================================================================

#[test]
fn zero_circle_clips_everything_away() {
  let mut canvas = Canvas::new(10, 10).expect("canvas");
  let bounds = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
  let shape = BasicShape::parse(&json!({"type": "circle", "r": 0})).expect("shape parses");
  let clip = resolve_basic_shape(&shape, bounds, &RenderContext::default());
  assert!(clip.is_some());
  draw_clipped(&mut canvas, clip.as_ref(), bounds, |surface| {
    surface.fill_rect(bounds, &Fill::Solid(Rgba::RED))
  })
  .expect("draw");

  assert_eq!(alpha(canvas.pixmap(), 5, 5), 0);
  assert_eq!(canvas.open_layers(), 0);
}

#[test]
fn circle_clip_keeps_center_drops_corners() {
  let mut canvas = Canvas::new(100, 100).expect("canvas");
  let clip = resolve(json!({"type": "circle", "r": {"value": 50, "unit": "percent"}}));
  draw_clipped(&mut canvas, clip.as_ref(), square(), |surface| {
    surface.fill_rect(square(), &Fill::Solid(Rgba::RED))
  })
  .expect("draw");

  assert_eq!(pixel(canvas.pixmap(), 50, 50), (255, 0, 0, 255));
  assert_eq!(alpha(canvas.pixmap(), 2, 2), 0);
  assert_eq!(alpha(canvas.pixmap(), 97, 97), 0);
  assert_eq!(canvas.open_layers(), 0);
}

#[test]
fn even_odd_polygon_clip_leaves_hole() {
  let mut canvas = Canvas::new(100, 100).expect("canvas");
  // Two overlapping squares traced as one path.
  let clip = resolve(json!({
    "type": "polygon",
    "fillRule": "evenodd",
    "points": [
      {"x": 0, "y": 0}, {"x": 60, "y": 0}, {"x": 60, "y": 60},
      {"x": 0, "y": 60}, {"x": 0, "y": 0},
      {"x": 40, "y": 40}, {"x": 100, "y": 40}, {"x": 100, "y": 100},
      {"x": 40, "y": 100}, {"x": 40, "y": 40},
    ],
  }));
  draw_clipped(&mut canvas, clip.as_ref(), square(), |surface| {
    surface.fill_rect(square(), &Fill::Solid(Rgba::BLUE))
  })
  .expect("draw");

  assert_eq!(alpha(canvas.pixmap(), 10, 45), 255);
  assert_eq!(alpha(canvas.pixmap(), 50, 50), 0, "overlap is outside under even-odd");
  assert_eq!(alpha(canvas.pixmap(), 80, 80), 255);
}
