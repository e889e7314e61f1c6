//! A view's complete background: the layer stack plus an optional mask
//!
//! Without a mask the stack draws straight onto the surface. With one, the
//! stack (and any content drawn after it) goes into an outer scoped layer;
//! the mask then draws into a nested destination-in layer so that closing the
//! outer layer composites only the masked result.

use std::sync::Arc;

use tracing::{debug, debug_span, trace, warn};

use crate::debug::runtime::{runtime_toggles, RuntimeToggles};
use crate::error::Result;
use crate::geometry::Rect;
use crate::paint::image::Invalidator;
use crate::paint::layer::{compute_outline, LayerStack, Outline};
use crate::paint::mask::{Mask, MaskLayer};
use crate::paint::surface::{with_scoped_layer, DrawSurface, LayerPaint, MaskPaint};
use crate::style::values::RenderContext;

#[derive(Debug)]
pub struct BackgroundComposite {
  stack: LayerStack,
  mask: Option<Mask>,
  bounds: Rect,
  attached: bool,
  invalidator: Invalidator,
  toggles: Arc<RuntimeToggles>,
  ctx: RenderContext,
}

impl BackgroundComposite {
  /// A composite using the process-wide runtime toggles
  pub fn new(invalidator: Invalidator) -> Self {
    Self::with_toggles(invalidator, runtime_toggles())
  }

  pub fn with_toggles(invalidator: Invalidator, toggles: Arc<RuntimeToggles>) -> Self {
    let ctx = RenderContext::from_toggles(&toggles);
    Self {
      stack: LayerStack::new(),
      mask: None,
      bounds: Rect::ZERO,
      attached: false,
      invalidator,
      toggles,
      ctx,
    }
  }

  pub fn with_context(mut self, ctx: RenderContext) -> Self {
    self.ctx = ctx;
    self
  }

  pub fn context(&self) -> &RenderContext {
    &self.ctx
  }

  pub fn stack(&self) -> &LayerStack {
    &self.stack
  }

  pub fn set_stack(&mut self, stack: LayerStack) {
    self.stack = stack;
    self.invalidator.invalidate();
  }

  pub fn bounds(&self) -> Rect {
    self.bounds
  }

  pub fn set_bounds(&mut self, bounds: Rect) {
    if self.bounds == bounds {
      return;
    }
    self.bounds = bounds;
    if let Some(mask) = &mut self.mask {
      mask.set_bounds(bounds);
    }
  }

  pub fn mask(&self) -> Option<&Mask> {
    self.mask.as_ref()
  }

  /// Installs `mask`, releasing the previous one first
  pub fn set_mask(&mut self, mask: Option<Mask>) {
    if let Some(mut previous) = self.mask.take() {
      previous.release();
    }
    self.mask = mask.map(|mut mask| {
      mask.set_invalidator(self.invalidator.clone());
      mask.set_bounds(self.bounds);
      if self.attached {
        mask.attach();
      }
      mask
    });
    self.invalidator.invalidate();
  }

  pub fn is_attached(&self) -> bool {
    self.attached
  }

  pub fn attach(&mut self) {
    if self.attached {
      return;
    }
    self.attached = true;
    if let Some(mask) = &mut self.mask {
      mask.attach();
    }
  }

  pub fn detach(&mut self) {
    if !self.attached {
      return;
    }
    self.attached = false;
    if let Some(mask) = &mut self.mask {
      mask.detach();
    }
  }

  /// Outline of the background for elevation shadows
  pub fn outline(&self) -> Outline {
    compute_outline(
      self.bounds,
      self.stack.border_radius(),
      self.stack.border_insets(),
      &self.ctx,
    )
  }

  pub fn draw(&self, surface: &mut dyn DrawSurface) -> Result<()> {
    self.draw_with_content(surface, |_| Ok(()))
  }

  /// Draws the layer stack, then `content`, masking both together
  ///
  /// With empty bounds there is nothing to mask, so both draw unmasked.
  pub fn draw_with_content<F>(&self, surface: &mut dyn DrawSurface, content: F) -> Result<()>
  where
    F: FnOnce(&mut dyn DrawSurface) -> Result<()>,
  {
    let _span = debug_span!("background_composite", bounds = %self.bounds).entered();
    // Empty bounds only drop the mask; the stack and content still draw.
    let mask = self
      .mask
      .as_ref()
      .filter(|mask| mask.has_content() && !mask.bounds().is_empty());
    let mask = match mask {
      Some(_) if self.toggles.masks_disabled() => {
        debug!("masks disabled by runtime toggle");
        None
      }
      other => other,
    };

    let result = match mask {
      None => self.draw_unmasked(surface, content),
      Some(mask) => with_scoped_layer(surface, self.bounds, LayerPaint::source_over(), |surface| {
        self.draw_unmasked(&mut *surface, content)?;
        mask.draw_as_mask(surface, &MaskPaint::dst_in())
      }),
    };
    if let Err(err) = &result {
      warn!(%err, "background composite draw failed");
    }
    result
  }

  fn draw_unmasked<F>(&self, surface: &mut dyn DrawSurface, content: F) -> Result<()>
  where
    F: FnOnce(&mut dyn DrawSurface) -> Result<()>,
  {
    let trace_layers = self.toggles.trace_layers();
    for (slot, layer) in self.stack.slots() {
      if trace_layers {
        debug!(%slot, kind = layer.kind(), "drawing layer");
      } else {
        trace!(%slot, kind = layer.kind(), "drawing layer");
      }
      layer.draw(&mut *surface, self.bounds, &self.ctx)?;
    }
    content(surface)
  }
}

impl Drop for BackgroundComposite {
  fn drop(&mut self) {
    if let Some(mut mask) = self.mask.take() {
      mask.release();
    }
  }
}
