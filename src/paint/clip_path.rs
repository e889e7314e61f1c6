//! Resolves basic shapes into pixel geometry
//!
//! Percentages resolve against the reference box: horizontal lengths against
//! its width, vertical lengths against its height. A circle radius uses the
//! average of the two, `(width + height) / 2`, and a rectangle's corner radius
//! uses the smaller side of the resolved rectangle.
//!
//! A rectangle shape whose edges cross, or that collapses to no area, resolves
//! to `None`, which callers treat as "do not clip". Circles and ellipses always
//! resolve; with a zero radius they enclose nothing and hide the content.

use tracing::debug;

use crate::error::Result;
use crate::geometry::{EdgeOffsets, Point, Rect};
use crate::paint::path::ShapePath;
use crate::paint::surface::{with_scoped_layer, DrawSurface, Fill, LayerPaint};
use crate::style::border::{CornerRadii, CornerRadius};
use crate::style::color::Rgba;
use crate::style::shape::{BasicShape, ClipRegion, FillRule, GeometryBox};
use crate::style::values::{LengthValue, RenderContext};

/// Resolves `shape` against `bounds`
pub fn resolve_basic_shape(
  shape: &BasicShape,
  bounds: Rect,
  ctx: &RenderContext,
) -> Option<ShapePath> {
  let resolved = match shape {
    BasicShape::Circle(circle) => {
      let reference = (bounds.width() + bounds.height()) / 2.0;
      let radius = circle.r.resolve(reference, ctx);
      let center = resolve_center(circle.cx, circle.cy, bounds, ctx);
      // A zero radius still clips, to nothing.
      Some(ShapePath::Circle {
        center,
        radius: radius.max(0.0),
      })
    }
    BasicShape::Ellipse(ellipse) => {
      let radius_x = ellipse.rx.resolve(bounds.width(), ctx);
      let radius_y = ellipse.ry.resolve(bounds.height(), ctx);
      let center = resolve_center(ellipse.cx, ellipse.cy, bounds, ctx);
      Some(ShapePath::Ellipse {
        center,
        radius_x: radius_x.max(0.0),
        radius_y: radius_y.max(0.0),
      })
    }
    BasicShape::Inset(inset) => {
      let rect = Rect::from_ltrb(
        bounds.min_x() + inset.left.resolve(bounds.width(), ctx),
        bounds.min_y() + inset.top.resolve(bounds.height(), ctx),
        bounds.max_x() - inset.right.resolve(bounds.width(), ctx),
        bounds.max_y() - inset.bottom.resolve(bounds.height(), ctx),
      );
      rect_shape(rect, inset.border_radius, ctx)
    }
    BasicShape::Rect(shape) => {
      let rect = Rect::from_ltrb(
        bounds.min_x() + shape.left.resolve(bounds.width(), ctx),
        bounds.min_y() + shape.top.resolve(bounds.height(), ctx),
        bounds.min_x() + shape.right.resolve(bounds.width(), ctx),
        bounds.min_y() + shape.bottom.resolve(bounds.height(), ctx),
      );
      rect_shape(rect, shape.border_radius, ctx)
    }
    BasicShape::Xywh(xywh) => {
      let rect = Rect::from_xywh(
        bounds.min_x() + xywh.x.resolve(bounds.width(), ctx),
        bounds.min_y() + xywh.y.resolve(bounds.height(), ctx),
        xywh.width.resolve(bounds.width(), ctx),
        xywh.height.resolve(bounds.height(), ctx),
      );
      rect_shape(rect, xywh.border_radius, ctx)
    }
    BasicShape::Polygon(polygon) => {
      if polygon.points.is_empty() {
        None
      } else {
        let points = polygon
          .points
          .iter()
          .map(|(x, y)| {
            Point::new(
              bounds.min_x() + x.resolve(bounds.width(), ctx),
              bounds.min_y() + y.resolve(bounds.height(), ctx),
            )
          })
          .collect();
        Some(ShapePath::Polygon {
          points,
          fill_rule: polygon.fill_rule.unwrap_or(FillRule::NonZero),
        })
      }
    }
  };

  if resolved.is_none() {
    debug!(?shape, %bounds, "shape resolved to no clip");
  }
  resolved
}

fn resolve_center(
  cx: Option<LengthValue>,
  cy: Option<LengthValue>,
  bounds: Rect,
  ctx: &RenderContext,
) -> Point {
  let center = bounds.center();
  Point::new(
    cx.map(|x| bounds.min_x() + x.resolve(bounds.width(), ctx))
      .unwrap_or(center.x),
    cy.map(|y| bounds.min_y() + y.resolve(bounds.height(), ctx))
      .unwrap_or(center.y),
  )
}

fn rect_shape(
  rect: Rect,
  border_radius: Option<LengthValue>,
  ctx: &RenderContext,
) -> Option<ShapePath> {
  // Crossed edges and zero-area rectangles enclose nothing to clip to.
  if rect.is_empty() || !rect.is_finite() {
    return None;
  }
  let radii = border_radius
    .map(|radius| {
      let reference = rect.width().min(rect.height());
      CornerRadii::uniform(CornerRadius::circular(radius.resolve(reference, ctx).max(0.0)))
    })
    .unwrap_or(CornerRadii::ZERO);
  Some(ShapePath::Rect { rect, radii })
}

/// The CSS boxes of an element, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceBoxes {
  pub margin: Rect,
  pub border: Rect,
  pub padding: Rect,
  pub content: Rect,
  pub margin_widths: EdgeOffsets,
  pub border_widths: EdgeOffsets,
  pub padding_widths: EdgeOffsets,
}

impl ReferenceBoxes {
  /// All four boxes coincide with `border_box`
  pub fn from_border_box(border_box: Rect) -> Self {
    Self::new(border_box, EdgeOffsets::ZERO, EdgeOffsets::ZERO, EdgeOffsets::ZERO)
  }

  pub fn new(
    border_box: Rect,
    margin: EdgeOffsets,
    border: EdgeOffsets,
    padding: EdgeOffsets,
  ) -> Self {
    let padding_box = border_box.inset_by(border);
    Self {
      margin: border_box.outset_by(margin),
      border: border_box,
      padding: padding_box,
      content: padding_box.inset_by(padding),
      margin_widths: margin,
      border_widths: border,
      padding_widths: padding,
    }
  }

  /// Rectangle for `geometry_box`; SVG boxes map to the border box
  pub fn select(&self, geometry_box: GeometryBox) -> Rect {
    match geometry_box {
      GeometryBox::BorderBox
      | GeometryBox::FillBox
      | GeometryBox::StrokeBox
      | GeometryBox::ViewBox => self.border,
      GeometryBox::PaddingBox => self.padding,
      GeometryBox::ContentBox => self.content,
      GeometryBox::MarginBox => self.margin,
    }
  }

  /// Adjusts border-box radii to follow the curve of `geometry_box`
  ///
  /// Inner boxes shrink each corner by the widths between them and the border
  /// edge; the margin box grows it.
  pub fn radii_for(&self, geometry_box: GeometryBox, border_radii: CornerRadii) -> CornerRadii {
    let radii = match geometry_box {
      GeometryBox::PaddingBox => border_radii.inset_by(self.border_widths),
      GeometryBox::ContentBox => border_radii.inset_by(EdgeOffsets::new(
        self.border_widths.top + self.padding_widths.top,
        self.border_widths.right + self.padding_widths.right,
        self.border_widths.bottom + self.padding_widths.bottom,
        self.border_widths.left + self.padding_widths.left,
      )),
      GeometryBox::MarginBox if border_radii.has_radius() => {
        border_radii.outset_by(self.margin_widths)
      }
      _ => border_radii,
    };
    let rect = self.select(geometry_box);
    radii.clamped(rect.width(), rect.height())
  }
}

/// Resolves a clip region against an element's boxes
///
/// A region without a shape does not clip and yields `None`.
pub fn resolve_clip_region(
  region: &ClipRegion,
  boxes: &ReferenceBoxes,
  ctx: &RenderContext,
) -> Option<ShapePath> {
  let shape = region.shape.as_ref()?;
  let reference = boxes.select(region.effective_geometry_box());
  resolve_basic_shape(shape, reference, ctx)
}

/// Draws `content` clipped to `clip`
///
/// Content goes into a scoped layer over `bounds`; a nested destination-in
/// layer holding the clip path then cuts away everything outside it. With no
/// clip the content is drawn directly.
pub fn draw_clipped<F>(
  surface: &mut dyn DrawSurface,
  clip: Option<&ShapePath>,
  bounds: Rect,
  content: F,
) -> Result<()>
where
  F: FnOnce(&mut dyn DrawSurface) -> Result<()>,
{
  let Some(clip) = clip else {
    return content(surface);
  };
  with_scoped_layer(surface, bounds, LayerPaint::source_over(), |surface| {
    content(&mut *surface)?;
    with_scoped_layer(surface, bounds, LayerPaint::dst_in(), |surface| {
      surface.fill_path(clip, &Fill::Solid(Rgba::BLACK))
    })
  })
}
