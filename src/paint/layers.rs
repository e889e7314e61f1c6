//! Concrete background layers
//!
//! Each layer resolves its declared lengths against the shared bounds at draw
//! time, so a stack can be reused across sizes and device scales.

use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::error::Result;
use crate::geometry::{EdgeOffsets, Rect};
use crate::paint::clip_path::{draw_clipped, ReferenceBoxes};
use crate::paint::gradient::Gradient;
use crate::paint::layer::Layer;
use crate::paint::path::ShapePath;
use crate::paint::surface::{with_scoped_layer, DrawSurface, Fill, LayerPaint};
use crate::style::border::{BorderInsets, BorderRadiusStyle, CornerRadii};
use crate::style::color::Rgba;
use crate::style::shape::GeometryBox;
use crate::style::values::RenderContext;

fn resolve_radii(radius: &BorderRadiusStyle, rect: Rect, ctx: &RenderContext) -> CornerRadii {
  radius.resolve(rect, ctx).clamped(rect.width(), rect.height())
}

/// Solid background color
///
/// Painted into the box selected by `clip` (`background-clip`), with the
/// border radius adjusted to that box.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLayer {
  pub color: Rgba,
  pub radius: BorderRadiusStyle,
  pub clip: GeometryBox,
  pub border: BorderInsets,
  pub padding: BorderInsets,
}

impl ColorLayer {
  pub fn new(color: Rgba) -> Self {
    Self {
      color,
      radius: BorderRadiusStyle::default(),
      clip: GeometryBox::BorderBox,
      border: BorderInsets::default(),
      padding: BorderInsets::default(),
    }
  }

  pub fn with_radius(mut self, radius: BorderRadiusStyle) -> Self {
    self.radius = radius;
    self
  }

  pub fn with_clip(
    mut self,
    clip: GeometryBox,
    border: BorderInsets,
    padding: BorderInsets,
  ) -> Self {
    self.clip = clip;
    self.border = border;
    self.padding = padding;
    self
  }
}

impl Layer for ColorLayer {
  fn kind(&self) -> &'static str {
    "color"
  }

  fn draw(&self, surface: &mut dyn DrawSurface, bounds: Rect, ctx: &RenderContext) -> Result<()> {
    if self.color.is_transparent() || bounds.is_empty() {
      return Ok(());
    }
    let boxes = ReferenceBoxes::new(
      bounds,
      EdgeOffsets::ZERO,
      self.border.resolve(ctx),
      self.padding.resolve(ctx),
    );
    let rect = boxes.select(self.clip);
    let radii = boxes.radii_for(self.clip, self.radius.resolve(bounds, ctx));
    if radii.has_radius() {
      surface.fill_path(&ShapePath::rounded_rect(rect, radii), &Fill::Solid(self.color))
    } else {
      surface.fill_rect(rect, &Fill::Solid(self.color))
    }
  }
}

/// Source of a background image
#[derive(Debug, Clone)]
pub enum ImageFill {
  Gradient(Gradient),
  Pixmap(Arc<Pixmap>),
}

/// Background image stretched over the bounds
#[derive(Debug, Clone)]
pub struct ImageFillLayer {
  pub source: ImageFill,
  pub opacity: f32,
  pub radius: BorderRadiusStyle,
}

impl ImageFillLayer {
  pub fn new(source: ImageFill) -> Self {
    Self {
      source,
      opacity: 1.0,
      radius: BorderRadiusStyle::default(),
    }
  }

  pub fn with_opacity(mut self, opacity: f32) -> Self {
    self.opacity = opacity.clamp(0.0, 1.0);
    self
  }

  pub fn with_radius(mut self, radius: BorderRadiusStyle) -> Self {
    self.radius = radius;
    self
  }
}

impl Layer for ImageFillLayer {
  fn kind(&self) -> &'static str {
    "background-image"
  }

  fn draw(&self, surface: &mut dyn DrawSurface, bounds: Rect, ctx: &RenderContext) -> Result<()> {
    if bounds.is_empty() || self.opacity <= 0.0 {
      return Ok(());
    }
    let radii = resolve_radii(&self.radius, bounds, ctx);
    let clip = radii
      .has_radius()
      .then(|| ShapePath::rounded_rect(bounds, radii));
    draw_clipped(surface, clip.as_ref(), bounds, |surface| match &self.source {
      ImageFill::Gradient(gradient) => match gradient.resolve(bounds, ctx) {
        Some(resolved) => {
          surface.fill_rect(bounds, &Fill::Gradient(resolved.with_opacity(self.opacity)))
        }
        None => Ok(()),
      },
      ImageFill::Pixmap(pixmap) => surface.draw_image(pixmap, bounds, self.opacity),
    })
  }
}

/// Uniformly colored border with per-side widths
#[derive(Debug, Clone, PartialEq)]
pub struct BorderLayer {
  pub color: Rgba,
  pub widths: BorderInsets,
  pub radius: BorderRadiusStyle,
}

impl BorderLayer {
  pub fn new(color: Rgba, widths: BorderInsets) -> Self {
    Self {
      color,
      widths,
      radius: BorderRadiusStyle::default(),
    }
  }

  pub fn with_radius(mut self, radius: BorderRadiusStyle) -> Self {
    self.radius = radius;
    self
  }
}

impl Layer for BorderLayer {
  fn kind(&self) -> &'static str {
    "border"
  }

  fn draw(&self, surface: &mut dyn DrawSurface, bounds: Rect, ctx: &RenderContext) -> Result<()> {
    let widths = self.widths.resolve(ctx);
    if self.color.is_transparent() || bounds.is_empty() || widths.is_zero() {
      return Ok(());
    }
    let outer_radii = resolve_radii(&self.radius, bounds, ctx);
    let inner = bounds.inset_by(widths);
    let fill = Fill::Solid(self.color);
    if inner.is_empty() {
      // Borders wider than the box cover it entirely.
      return surface.fill_path(&ShapePath::rounded_rect(bounds, outer_radii), &fill);
    }
    let inner_radii = outer_radii
      .inset_by(widths)
      .clamped(inner.width(), inner.height());
    surface.fill_path(
      &ShapePath::Ring {
        outer: bounds,
        outer_radii,
        inner,
        inner_radii,
      },
      &fill,
    )
  }
}

/// Hard-edged box shadow
///
/// Offsets and spread are in logical points. Outer shadows are erased where
/// the box itself sits; inset shadows are confined to the box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShadowLayer {
  pub color: Rgba,
  pub offset_x: f32,
  pub offset_y: f32,
  pub spread: f32,
  pub inset: bool,
  pub radius: BorderRadiusStyle,
}

impl BoxShadowLayer {
  pub fn outer(color: Rgba, offset_x: f32, offset_y: f32, spread: f32) -> Self {
    Self {
      color,
      offset_x,
      offset_y,
      spread,
      inset: false,
      radius: BorderRadiusStyle::default(),
    }
  }

  pub fn inset(color: Rgba, offset_x: f32, offset_y: f32, spread: f32) -> Self {
    Self {
      inset: true,
      ..Self::outer(color, offset_x, offset_y, spread)
    }
  }

  pub fn with_radius(mut self, radius: BorderRadiusStyle) -> Self {
    self.radius = radius;
    self
  }

  fn draw_outer(
    &self,
    surface: &mut dyn DrawSurface,
    bounds: Rect,
    radii: CornerRadii,
    ctx: &RenderContext,
  ) -> Result<()> {
    let spread = self.spread * ctx.device_scale;
    let shadow = bounds
      .translate(self.offset_x * ctx.device_scale, self.offset_y * ctx.device_scale)
      .inflate(spread);
    if shadow.is_empty() {
      return Ok(());
    }
    let shadow_radii = if radii.has_radius() {
      radii
        .outset_by(EdgeOffsets::all(spread))
        .clamped(shadow.width(), shadow.height())
    } else {
      CornerRadii::ZERO
    };
    let color = self.color;
    with_scoped_layer(surface, shadow.union(bounds), LayerPaint::source_over(), |surface| {
      surface.fill_path(&ShapePath::rounded_rect(shadow, shadow_radii), &Fill::Solid(color))?;
      with_scoped_layer(surface, bounds, LayerPaint::dst_out(), |surface| {
        surface.fill_path(&ShapePath::rounded_rect(bounds, radii), &Fill::Solid(Rgba::BLACK))
      })
    })
  }

  fn draw_inset(
    &self,
    surface: &mut dyn DrawSurface,
    bounds: Rect,
    radii: CornerRadii,
    ctx: &RenderContext,
  ) -> Result<()> {
    let spread = self.spread * ctx.device_scale;
    let hole = bounds
      .translate(self.offset_x * ctx.device_scale, self.offset_y * ctx.device_scale)
      .inflate(-spread);
    let color = self.color;
    with_scoped_layer(surface, bounds, LayerPaint::source_over(), |surface| {
      surface.fill_path(&ShapePath::rounded_rect(bounds, radii), &Fill::Solid(color))?;
      if hole.is_empty() {
        return Ok(());
      }
      let hole_radii = radii
        .inset_by(EdgeOffsets::all(spread))
        .clamped(hole.width(), hole.height());
      with_scoped_layer(surface, hole, LayerPaint::dst_out(), |surface| {
        surface.fill_path(&ShapePath::rounded_rect(hole, hole_radii), &Fill::Solid(Rgba::BLACK))
      })
    })
  }
}

impl Layer for BoxShadowLayer {
  fn kind(&self) -> &'static str {
    if self.inset {
      "inset-shadow"
    } else {
      "shadow"
    }
  }

  fn draw(&self, surface: &mut dyn DrawSurface, bounds: Rect, ctx: &RenderContext) -> Result<()> {
    if self.color.is_transparent() || bounds.is_empty() {
      return Ok(());
    }
    let radii = resolve_radii(&self.radius, bounds, ctx);
    if self.inset {
      self.draw_inset(surface, bounds, radii, ctx)
    } else {
      self.draw_outer(surface, bounds, radii, ctx)
    }
  }
}

/// Ring drawn outside the border edge
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineLayer {
  pub color: Rgba,
  pub width: f32,
  pub offset: f32,
  pub radius: BorderRadiusStyle,
}

impl OutlineLayer {
  pub fn new(color: Rgba, width: f32) -> Self {
    Self {
      color,
      width,
      offset: 0.0,
      radius: BorderRadiusStyle::default(),
    }
  }

  pub fn with_offset(mut self, offset: f32) -> Self {
    self.offset = offset;
    self
  }

  pub fn with_radius(mut self, radius: BorderRadiusStyle) -> Self {
    self.radius = radius;
    self
  }
}

impl Layer for OutlineLayer {
  fn kind(&self) -> &'static str {
    "outline"
  }

  fn draw(&self, surface: &mut dyn DrawSurface, bounds: Rect, ctx: &RenderContext) -> Result<()> {
    let width = self.width * ctx.device_scale;
    if self.color.is_transparent() || width <= 0.0 || bounds.is_empty() {
      return Ok(());
    }
    let offset = self.offset * ctx.device_scale;
    let inner = bounds.inflate(offset);
    let outer = inner.inflate(width);
    let radii = resolve_radii(&self.radius, bounds, ctx);
    let (inner_radii, outer_radii) = if radii.has_radius() {
      (
        radii.outset_by(EdgeOffsets::all(offset)),
        radii.outset_by(EdgeOffsets::all(offset + width)),
      )
    } else {
      (CornerRadii::ZERO, CornerRadii::ZERO)
    };
    let path = if inner.is_empty() {
      ShapePath::rounded_rect(outer, outer_radii)
    } else {
      ShapePath::Ring {
        outer,
        outer_radii,
        inner,
        inner_radii,
      }
    };
    surface.fill_path(&path, &Fill::Solid(self.color))
  }
}
