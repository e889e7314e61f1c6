//! tiny-skia backed drawing surface
//!
//! Scoped layers are offscreen pixmaps sized to the requested bounds clipped
//! to the target beneath them. Closing a layer draws its pixmap back onto the
//! parent with the layer's blend mode and opacity, so a `DestinationIn` layer
//! opened inside a `SourceOver` layer masks exactly what was drawn into the
//! outer layer before anything reaches the root pixmap.
//!
//! # Example
//!
//! ```
//! use backdrop::paint::canvas::Canvas;
//! use backdrop::paint::surface::{DrawSurface, Fill};
//! use backdrop::{Rect, Rgba};
//!
//! let mut canvas = Canvas::new(20, 20).unwrap();
//! canvas
//!   .fill_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), &Fill::Solid(Rgba::RED))
//!   .unwrap();
//! let pixmap = canvas.into_pixmap();
//! assert_eq!(pixmap.pixel(5, 5).unwrap().red(), 255);
//! ```

use tiny_skia::{FilterQuality, Paint, Pixmap, PixmapPaint, Transform};

use crate::error::{RenderError, Result};
use crate::geometry::Rect;
use crate::paint::path::ShapePath;
use crate::paint::surface::{check_close, DrawSurface, Fill, LayerPaint, LayerToken};
use crate::style::color::Rgba;

/// An open scoped layer
struct LayerRecord {
  /// `None` when the layer's bounds miss its parent entirely
  pixmap: Option<Pixmap>,
  /// Device-space position of the pixmap's top-left pixel
  origin: (i32, i32),
  paint: LayerPaint,
}

/// Software drawing surface over a root pixmap
pub struct Canvas {
  root: Pixmap,
  layers: Vec<LayerRecord>,
}

impl Canvas {
  /// Creates a transparent canvas
  pub fn new(width: u32, height: u32) -> Result<Self> {
    let root =
      Pixmap::new(width, height).ok_or(RenderError::CanvasCreationFailed { width, height })?;
    Ok(Self {
      root,
      layers: Vec::new(),
    })
  }

  /// Creates a canvas filled with `background`
  pub fn with_background(width: u32, height: u32, background: Rgba) -> Result<Self> {
    let mut canvas = Self::new(width, height)?;
    canvas.root.fill(background.to_skia());
    Ok(canvas)
  }

  pub fn from_pixmap(root: Pixmap) -> Self {
    Self {
      root,
      layers: Vec::new(),
    }
  }

  pub fn width(&self) -> u32 {
    self.root.width()
  }

  pub fn height(&self) -> u32 {
    self.root.height()
  }

  pub fn bounds(&self) -> Rect {
    Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
  }

  /// Number of scoped layers currently open
  pub fn open_layers(&self) -> usize {
    self.layers.len()
  }

  /// The root pixmap; content of open layers is not in it yet
  pub fn pixmap(&self) -> &Pixmap {
    &self.root
  }

  pub fn into_pixmap(self) -> Pixmap {
    self.root
  }

  /// Device rectangle covered by the current target, `None` if it is empty
  fn target_area(&self) -> Option<(i32, i32, u32, u32)> {
    match self.layers.last() {
      Some(layer) => layer
        .pixmap
        .as_ref()
        .map(|p| (layer.origin.0, layer.origin.1, p.width(), p.height())),
      None => Some((0, 0, self.root.width(), self.root.height())),
    }
  }

  fn target(&mut self) -> Option<(&mut Pixmap, Transform)> {
    match self.layers.last_mut() {
      Some(layer) => {
        let (x, y) = layer.origin;
        layer
          .pixmap
          .as_mut()
          .map(|p| (p, Transform::from_translate(-(x as f32), -(y as f32))))
      }
      None => Some((&mut self.root, Transform::identity())),
    }
  }

  /// Snaps `bounds` outward to whole pixels and clips it to the current target
  fn layer_area(&self, bounds: Rect) -> Option<(i32, i32, u32, u32)> {
    if !bounds.is_finite() || bounds.is_empty() {
      return None;
    }
    let (tx, ty, tw, th) = self.target_area()?;
    let x0 = (bounds.min_x().floor() as i32).clamp(tx, tx + tw as i32);
    let y0 = (bounds.min_y().floor() as i32).clamp(ty, ty + th as i32);
    let x1 = (bounds.max_x().ceil() as i32).clamp(tx, tx + tw as i32);
    let y1 = (bounds.max_y().ceil() as i32).clamp(ty, ty + th as i32);
    let width = x1.saturating_sub(x0) as u32;
    let height = y1.saturating_sub(y0) as u32;
    if width == 0 || height == 0 {
      return None;
    }
    Some((x0, y0, width, height))
  }
}

fn skia_paint(fill: &Fill) -> Option<Paint<'static>> {
  let mut paint = Paint::default();
  paint.anti_alias = true;
  match fill {
    Fill::Solid(color) => {
      if color.is_transparent() {
        return None;
      }
      paint.set_color(color.to_skia());
    }
    Fill::Gradient(gradient) => paint.shader = gradient.to_shader()?,
  }
  Some(paint)
}

impl DrawSurface for Canvas {
  fn open_scoped_layer(&mut self, bounds: Rect, paint: LayerPaint) -> Result<LayerToken> {
    let (pixmap, origin) = match self.layer_area(bounds) {
      Some((x, y, width, height)) => {
        let pixmap =
          Pixmap::new(width, height).ok_or(RenderError::CanvasCreationFailed { width, height })?;
        (Some(pixmap), (x, y))
      }
      None => (None, (0, 0)),
    };
    self.layers.push(LayerRecord {
      pixmap,
      origin,
      paint,
    });
    Ok(LayerToken::new(self.layers.len()))
  }

  fn close_scoped_layer(&mut self, token: LayerToken) -> Result<()> {
    check_close(&token, self.layers.len())?;
    let Some(record) = self.layers.pop() else {
      return Err(RenderError::NoOpenLayer.into());
    };
    let Some(layer) = record.pixmap else {
      return Ok(());
    };
    let paint = PixmapPaint {
      opacity: record.paint.opacity,
      blend_mode: record.paint.blend.to_skia(),
      quality: FilterQuality::Nearest,
    };
    if let Some((parent, transform)) = self.target() {
      parent.draw_pixmap(
        record.origin.0,
        record.origin.1,
        layer.as_ref(),
        &paint,
        transform,
        None,
      );
    }
    Ok(())
  }

  fn fill_rect(&mut self, rect: Rect, fill: &Fill) -> Result<()> {
    if rect.is_empty() || !rect.is_finite() {
      return Ok(());
    }
    let Some(paint) = skia_paint(fill) else {
      return Ok(());
    };
    let Some(skia_rect) =
      tiny_skia::Rect::from_xywh(rect.x(), rect.y(), rect.width(), rect.height())
    else {
      return Ok(());
    };
    if let Some((target, transform)) = self.target() {
      target.fill_rect(skia_rect, &paint, transform, None);
    }
    Ok(())
  }

  fn fill_path(&mut self, path: &ShapePath, fill: &Fill) -> Result<()> {
    let Some(skia_path) = path.to_skia() else {
      return Ok(());
    };
    let Some(paint) = skia_paint(fill) else {
      return Ok(());
    };
    let rule = path.fill_rule().to_skia();
    if let Some((target, transform)) = self.target() {
      target.fill_path(&skia_path, &paint, rule, transform, None);
    }
    Ok(())
  }

  fn draw_image(&mut self, image: &Pixmap, dest: Rect, opacity: f32) -> Result<()> {
    if dest.is_empty() || !dest.is_finite() || opacity <= 0.0 {
      return Ok(());
    }
    let sx = dest.width() / image.width() as f32;
    let sy = dest.height() / image.height() as f32;
    let paint = PixmapPaint {
      opacity: opacity.min(1.0),
      blend_mode: tiny_skia::BlendMode::SourceOver,
      quality: FilterQuality::Bilinear,
    };
    if let Some((target, transform)) = self.target() {
      let transform = transform.pre_translate(dest.x(), dest.y()).pre_scale(sx, sy);
      target.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }
    Ok(())
  }
}
