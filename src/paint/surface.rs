//! The drawing surface interface layers and masks paint through
//!
//! Scoped layers are the only compositing primitive: content drawn between
//! [`DrawSurface::open_scoped_layer`] and [`DrawSurface::close_scoped_layer`]
//! lands in an isolated target that is blended back onto its parent with the
//! layer's [`LayerPaint`] when closed. Layers nest and must be closed
//! innermost first.

use tiny_skia::Pixmap;

use crate::error::Result;
use crate::geometry::Rect;
use crate::paint::gradient::ResolvedGradient;
use crate::paint::path::ShapePath;
use crate::style::color::Rgba;

/// How a closed layer combines with what is beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerBlend {
  /// Normal alpha compositing
  #[default]
  SourceOver,
  /// Keep the destination only where the layer has alpha, scaled by it
  DestinationIn,
  /// Erase the destination where the layer has alpha
  DestinationOut,
}

impl LayerBlend {
  pub fn to_skia(self) -> tiny_skia::BlendMode {
    match self {
      LayerBlend::SourceOver => tiny_skia::BlendMode::SourceOver,
      LayerBlend::DestinationIn => tiny_skia::BlendMode::DestinationIn,
      LayerBlend::DestinationOut => tiny_skia::BlendMode::DestinationOut,
    }
  }
}

/// Paint used when a scoped layer is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerPaint {
  pub opacity: f32,
  pub blend: LayerBlend,
}

impl LayerPaint {
  pub fn source_over() -> Self {
    Self {
      opacity: 1.0,
      blend: LayerBlend::SourceOver,
    }
  }

  /// The mask paint: keep what is beneath only where the layer is opaque
  pub fn dst_in() -> Self {
    Self {
      opacity: 1.0,
      blend: LayerBlend::DestinationIn,
    }
  }

  pub fn dst_out() -> Self {
    Self {
      opacity: 1.0,
      blend: LayerBlend::DestinationOut,
    }
  }

  pub fn with_opacity(mut self, opacity: f32) -> Self {
    self.opacity = opacity.clamp(0.0, 1.0);
    self
  }
}

impl Default for LayerPaint {
  fn default() -> Self {
    Self::source_over()
  }
}

/// Paint handed to [`crate::paint::mask::MaskLayer::draw_as_mask`]
pub type MaskPaint = LayerPaint;

/// Proof that a scoped layer is open, consumed when it is closed
///
/// Holds the nesting depth of the layer, starting at 1 for the outermost.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a scoped layer must be closed"]
pub struct LayerToken(usize);

impl LayerToken {
  pub fn new(depth: usize) -> Self {
    Self(depth)
  }

  pub fn depth(&self) -> usize {
    self.0
  }
}

/// What a fill operation paints with
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
  Solid(Rgba),
  Gradient(ResolvedGradient),
}

impl From<Rgba> for Fill {
  fn from(color: Rgba) -> Self {
    Fill::Solid(color)
  }
}

/// Operations a backend provides to layers, masks and composites
pub trait DrawSurface {
  /// Opens an isolated layer covering `bounds`
  fn open_scoped_layer(&mut self, bounds: Rect, paint: LayerPaint) -> Result<LayerToken>;

  /// Closes the innermost layer and composites it onto its parent
  ///
  /// Fails if `token` is not the innermost open layer.
  fn close_scoped_layer(&mut self, token: LayerToken) -> Result<()>;

  fn fill_rect(&mut self, rect: Rect, fill: &Fill) -> Result<()>;

  fn fill_path(&mut self, path: &ShapePath, fill: &Fill) -> Result<()>;

  /// Draws `image` scaled into `dest`
  fn draw_image(&mut self, image: &Pixmap, dest: Rect, opacity: f32) -> Result<()>;
}

/// Runs `draw` inside a scoped layer
///
/// The layer is closed even when `draw` fails; the first error wins.
pub fn with_scoped_layer<F>(
  surface: &mut dyn DrawSurface,
  bounds: Rect,
  paint: LayerPaint,
  draw: F,
) -> Result<()>
where
  F: FnOnce(&mut dyn DrawSurface) -> Result<()>,
{
  let token = surface.open_scoped_layer(bounds, paint)?;
  let drawn = draw(&mut *surface);
  let closed = surface.close_scoped_layer(token);
  drawn.and(closed)
}

/// Checks a close request against the number of open layers
pub(crate) fn check_close(token: &LayerToken, open: usize) -> Result<()> {
  use crate::error::RenderError;
  if open == 0 {
    return Err(RenderError::NoOpenLayer.into());
  }
  if token.depth() != open {
    return Err(
      RenderError::LayerOrderViolation {
        token: token.depth(),
        innermost: open,
      }
      .into(),
    );
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{Error, RenderError};

  #[test]
  fn close_checks() {
    assert!(matches!(
      check_close(&LayerToken::new(1), 0),
      Err(Error::Render(RenderError::NoOpenLayer))
    ));
    assert!(matches!(
      check_close(&LayerToken::new(1), 2),
      Err(Error::Render(RenderError::LayerOrderViolation {
        token: 1,
        innermost: 2
      }))
    ));
    assert!(check_close(&LayerToken::new(2), 2).is_ok());
  }

  #[test]
  fn scoped_layer_closes_after_failure() {
    use crate::paint::recording::{RecordingSurface, SurfaceCommand};
    let mut surface = RecordingSurface::new();
    let result = with_scoped_layer(
      &mut surface,
      Rect::from_xywh(0.0, 0.0, 2.0, 2.0),
      LayerPaint::default(),
      |_| Err(RenderError::NoOpenLayer.into()),
    );
    assert!(result.is_err());
    assert_eq!(surface.open_layers(), 0);
    assert!(matches!(
      surface.commands().last(),
      Some(SurfaceCommand::CloseLayer { depth: 1 })
    ));
  }

  #[test]
  fn paints() {
    assert_eq!(LayerPaint::dst_in().blend, LayerBlend::DestinationIn);
    assert_eq!(LayerPaint::default().with_opacity(3.0).opacity, 1.0);
    assert_eq!(
      LayerBlend::DestinationOut.to_skia(),
      tiny_skia::BlendMode::DestinationOut
    );
  }
}
