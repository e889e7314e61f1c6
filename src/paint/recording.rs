//! A surface that records draw calls instead of rasterizing them
//!
//! Useful for checking draw order and layer nesting without comparing pixels.
//! Layer tokens are validated exactly as the tiny-skia backend does.

use tiny_skia::Pixmap;

use crate::error::Result;
use crate::geometry::Rect;
use crate::paint::path::ShapePath;
use crate::paint::surface::{check_close, DrawSurface, Fill, LayerPaint, LayerToken};

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
  OpenLayer {
    depth: usize,
    bounds: Rect,
    paint: LayerPaint,
  },
  CloseLayer {
    depth: usize,
  },
  FillRect {
    rect: Rect,
    fill: Fill,
  },
  FillPath {
    path: ShapePath,
    fill: Fill,
  },
  DrawImage {
    dest: Rect,
    image_size: (u32, u32),
    opacity: f32,
  },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
  commands: Vec<SurfaceCommand>,
  open: usize,
}

impl RecordingSurface {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn commands(&self) -> &[SurfaceCommand] {
    &self.commands
  }

  pub fn into_commands(self) -> Vec<SurfaceCommand> {
    self.commands
  }

  pub fn open_layers(&self) -> usize {
    self.open
  }

  /// Fills recorded in order, ignoring layer and image commands
  pub fn fills(&self) -> impl Iterator<Item = &Fill> + '_ {
    self.commands.iter().filter_map(|cmd| match cmd {
      SurfaceCommand::FillRect { fill, .. } | SurfaceCommand::FillPath { fill, .. } => Some(fill),
      _ => None,
    })
  }

  pub fn clear(&mut self) {
    self.commands.clear();
  }
}

impl DrawSurface for RecordingSurface {
  fn open_scoped_layer(&mut self, bounds: Rect, paint: LayerPaint) -> Result<LayerToken> {
    self.open += 1;
    self.commands.push(SurfaceCommand::OpenLayer {
      depth: self.open,
      bounds,
      paint,
    });
    Ok(LayerToken::new(self.open))
  }

  fn close_scoped_layer(&mut self, token: LayerToken) -> Result<()> {
    check_close(&token, self.open)?;
    self.commands.push(SurfaceCommand::CloseLayer { depth: self.open });
    self.open -= 1;
    Ok(())
  }

  fn fill_rect(&mut self, rect: Rect, fill: &Fill) -> Result<()> {
    self.commands.push(SurfaceCommand::FillRect {
      rect,
      fill: fill.clone(),
    });
    Ok(())
  }

  fn fill_path(&mut self, path: &ShapePath, fill: &Fill) -> Result<()> {
    self.commands.push(SurfaceCommand::FillPath {
      path: path.clone(),
      fill: fill.clone(),
    });
    Ok(())
  }

  fn draw_image(&mut self, image: &Pixmap, dest: Rect, opacity: f32) -> Result<()> {
    self.commands.push(SurfaceCommand::DrawImage {
      dest,
      image_size: (image.width(), image.height()),
      opacity,
    });
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::color::Rgba;

  #[test]
  fn records_nesting() {
    let mut surface = RecordingSurface::new();
    let bounds = Rect::from_xywh(0.0, 0.0, 4.0, 4.0);
    let outer = surface
      .open_scoped_layer(bounds, LayerPaint::source_over())
      .expect("outer");
    surface.fill_rect(bounds, &Fill::Solid(Rgba::RED)).expect("fill");
    let inner = surface.open_scoped_layer(bounds, LayerPaint::dst_in()).expect("inner");
    assert_eq!(surface.open_layers(), 2);
    surface.close_scoped_layer(inner).expect("inner");
    surface.close_scoped_layer(outer).expect("outer");

    let depths: Vec<_> = surface
      .commands()
      .iter()
      .filter_map(|cmd| match cmd {
        SurfaceCommand::OpenLayer { depth, .. } => Some(*depth as i32),
        SurfaceCommand::CloseLayer { depth } => Some(-(*depth as i32)),
        _ => None,
      })
      .collect();
    assert_eq!(depths, vec![1, 2, -2, -1]);
    assert_eq!(surface.fills().count(), 1);
  }

  #[test]
  fn rejects_out_of_order_close() {
    let mut surface = RecordingSurface::new();
    let bounds = Rect::from_xywh(0.0, 0.0, 4.0, 4.0);
    let outer = surface.open_scoped_layer(bounds, LayerPaint::default()).expect("outer");
    let _inner = surface.open_scoped_layer(bounds, LayerPaint::default()).expect("inner");
    assert!(surface.close_scoped_layer(outer).is_err());
    assert_eq!(surface.open_layers(), 2);
  }
}
