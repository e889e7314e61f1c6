//! Alpha masks applied over a composite
//!
//! A mask is drawn into a destination-in scoped layer while the composite's
//! own layer is still open, so whatever was painted beneath survives only
//! where the mask has alpha. Two sources are supported: a gradient shader
//! ([`GradientMask`]) and a loaded bitmap ([`ImageMask`]).
//!
//! Masks follow the owning view's lifecycle: [`MaskLayer::attach`] when it
//! becomes visible, [`MaskLayer::detach`] when it leaves, and
//! [`MaskLayer::release`] once the mask is replaced or dropped.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::geometry::Rect;
use crate::paint::gradient::Gradient;
use crate::paint::image::{ImageController, ImagePipeline, ImageRequest, Invalidator, LoadState};
use crate::paint::surface::{with_scoped_layer, DrawSurface, Fill, MaskPaint};
use crate::style::values::RenderContext;

pub trait MaskLayer: fmt::Debug {
  fn set_bounds(&mut self, bounds: Rect);

  fn bounds(&self) -> Rect;

  /// Returns true if a gradient or image is configured
  fn has_content(&self) -> bool;

  /// Draws the mask content over its bounds
  fn draw(&self, surface: &mut dyn DrawSurface) -> Result<()>;

  /// Draws the mask into its own scoped layer blended with `paint`
  ///
  /// With `MaskPaint::dst_in()` this keeps the content of the enclosing layer
  /// only where the mask is opaque. Empty bounds or a mask with nothing
  /// configured open no layer, leaving the content unmasked. A configured
  /// mask whose content is not ready yet still opens its layer, hiding the
  /// content until it is.
  fn draw_as_mask(&self, surface: &mut dyn DrawSurface, paint: &MaskPaint) -> Result<()> {
    let bounds = self.bounds();
    if bounds.is_empty() || !self.has_content() {
      trace!(%bounds, "mask skipped");
      return Ok(());
    }
    with_scoped_layer(surface, bounds, *paint, |surface| self.draw(surface))
  }

  fn set_alpha(&mut self, alpha: u8);

  /// Handle used to request a redraw when the mask content changes
  fn set_invalidator(&mut self, invalidator: Invalidator);

  fn attach(&mut self);

  fn detach(&mut self);

  /// Drops all content; the mask stays usable but empty
  fn release(&mut self);
}

/// Mask drawn from a gradient shader
#[derive(Debug)]
pub struct GradientMask {
  gradient: Option<Gradient>,
  bounds: Rect,
  alpha: u8,
  ctx: RenderContext,
  invalidator: Invalidator,
}

impl GradientMask {
  pub fn new(ctx: RenderContext) -> Self {
    Self {
      gradient: None,
      bounds: Rect::ZERO,
      alpha: u8::MAX,
      ctx,
      invalidator: Invalidator::noop(),
    }
  }

  pub fn with_gradient(mut self, gradient: Gradient) -> Self {
    self.gradient = Some(gradient);
    self
  }

  pub fn gradient(&self) -> Option<&Gradient> {
    self.gradient.as_ref()
  }

  /// Replaces the gradient; returns true and invalidates only on change
  pub fn set_gradient(&mut self, gradient: Option<Gradient>) -> bool {
    if self.gradient == gradient {
      return false;
    }
    self.gradient = gradient;
    self.invalidator.invalidate();
    true
  }
}

impl Default for GradientMask {
  fn default() -> Self {
    Self::new(RenderContext::default())
  }
}

impl MaskLayer for GradientMask {
  fn set_bounds(&mut self, bounds: Rect) {
    self.bounds = bounds;
  }

  fn bounds(&self) -> Rect {
    self.bounds
  }

  fn has_content(&self) -> bool {
    self.gradient.is_some()
  }

  fn draw(&self, surface: &mut dyn DrawSurface) -> Result<()> {
    let Some(gradient) = &self.gradient else {
      return Ok(());
    };
    let Some(resolved) = gradient.resolve(self.bounds, &self.ctx) else {
      return Ok(());
    };
    let opacity = f32::from(self.alpha) / 255.0;
    surface.fill_rect(self.bounds, &Fill::Gradient(resolved.with_opacity(opacity)))
  }

  fn set_alpha(&mut self, alpha: u8) {
    if self.alpha != alpha {
      self.alpha = alpha;
      self.invalidator.invalidate();
    }
  }

  fn set_invalidator(&mut self, invalidator: Invalidator) {
    self.invalidator = invalidator;
  }

  fn attach(&mut self) {}

  fn detach(&mut self) {}

  fn release(&mut self) {
    self.gradient = None;
  }
}

/// Mask drawn from an image loaded through an [`ImagePipeline`]
pub struct ImageMask {
  pipeline: Arc<dyn ImagePipeline>,
  request: Option<ImageRequest>,
  controller: Option<Box<dyn ImageController>>,
  /// Child of `invalidator` handed to the current controller
  controller_invalidator: Option<Invalidator>,
  invalidator: Invalidator,
  attached: bool,
  bounds: Rect,
  alpha: u8,
}

impl ImageMask {
  pub fn new(pipeline: Arc<dyn ImagePipeline>) -> Self {
    Self {
      pipeline,
      request: None,
      controller: None,
      controller_invalidator: None,
      invalidator: Invalidator::noop(),
      attached: false,
      bounds: Rect::ZERO,
      alpha: u8::MAX,
    }
  }

  pub fn request(&self) -> Option<&ImageRequest> {
    self.request.as_ref()
  }

  pub fn is_attached(&self) -> bool {
    self.attached
  }

  pub fn state(&self) -> LoadState {
    self
      .controller
      .as_ref()
      .map(|controller| controller.state())
      .unwrap_or_default()
  }

  /// Switches to a new image
  ///
  /// The previous controller is cut off and detached before the new one is
  /// created, so a late load of the old image can never reach the view.
  /// Setting the current request again does nothing.
  pub fn set_image_request(&mut self, request: Option<ImageRequest>) {
    if self.request == request {
      return;
    }
    self.teardown_controller();
    self.request = request;
    self.install_controller();
    self.invalidator.invalidate();
  }

  fn teardown_controller(&mut self) {
    if let Some(invalidator) = self.controller_invalidator.take() {
      invalidator.revoke();
    }
    if let Some(mut controller) = self.controller.take() {
      if self.attached {
        controller.on_detach();
      }
    }
  }

  fn install_controller(&mut self) {
    let Some(request) = &self.request else {
      return;
    };
    debug!(uri = %request.uri, "installing image mask controller");
    let invalidator = self.invalidator.child();
    let mut controller = self.pipeline.new_controller(request, invalidator.clone());
    if self.attached {
      controller.on_attach();
    }
    self.controller = Some(controller);
    self.controller_invalidator = Some(invalidator);
  }
}

impl fmt::Debug for ImageMask {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ImageMask")
      .field("request", &self.request)
      .field("state", &self.state())
      .field("attached", &self.attached)
      .field("bounds", &self.bounds)
      .field("alpha", &self.alpha)
      .finish()
  }
}

impl MaskLayer for ImageMask {
  fn set_bounds(&mut self, bounds: Rect) {
    self.bounds = bounds;
  }

  fn bounds(&self) -> Rect {
    self.bounds
  }

  fn has_content(&self) -> bool {
    self.request.is_some()
  }

  fn draw(&self, surface: &mut dyn DrawSurface) -> Result<()> {
    let Some(controller) = &self.controller else {
      return Ok(());
    };
    if controller.state() != LoadState::Ready || self.bounds.is_empty() {
      return Ok(());
    }
    match controller.current_frame() {
      Some(frame) => surface.draw_image(&frame, self.bounds, f32::from(self.alpha) / 255.0),
      None => Ok(()),
    }
  }

  fn set_alpha(&mut self, alpha: u8) {
    if self.alpha != alpha {
      self.alpha = alpha;
      self.invalidator.invalidate();
    }
  }

  fn set_invalidator(&mut self, invalidator: Invalidator) {
    // The controller holds a child of the old handle; rebuild it against the new one.
    self.teardown_controller();
    self.invalidator = invalidator;
    self.install_controller();
  }

  fn attach(&mut self) {
    if self.attached {
      return;
    }
    self.attached = true;
    if let Some(controller) = &mut self.controller {
      controller.on_attach();
    }
  }

  fn detach(&mut self) {
    if !self.attached {
      return;
    }
    self.attached = false;
    if let Some(controller) = &mut self.controller {
      controller.on_detach();
    }
  }

  fn release(&mut self) {
    self.teardown_controller();
    self.request = None;
    self.attached = false;
  }
}

/// Either mask strategy
#[derive(Debug)]
pub enum Mask {
  Gradient(GradientMask),
  Image(ImageMask),
}

impl Mask {
  /// Builds the mask for a parsed value
  pub fn from_value(
    value: MaskValue,
    pipeline: &Arc<dyn ImagePipeline>,
    ctx: RenderContext,
  ) -> Self {
    match value {
      MaskValue::Gradient(gradient) => {
        Mask::Gradient(GradientMask::new(ctx).with_gradient(gradient))
      }
      MaskValue::Image(request) => {
        let mut mask = ImageMask::new(Arc::clone(pipeline));
        mask.set_image_request(Some(request));
        Mask::Image(mask)
      }
    }
  }

  fn as_layer(&self) -> &dyn MaskLayer {
    match self {
      Mask::Gradient(mask) => mask,
      Mask::Image(mask) => mask,
    }
  }

  fn as_layer_mut(&mut self) -> &mut dyn MaskLayer {
    match self {
      Mask::Gradient(mask) => mask,
      Mask::Image(mask) => mask,
    }
  }
}

impl MaskLayer for Mask {
  fn set_bounds(&mut self, bounds: Rect) {
    self.as_layer_mut().set_bounds(bounds);
  }

  fn bounds(&self) -> Rect {
    self.as_layer().bounds()
  }

  fn has_content(&self) -> bool {
    self.as_layer().has_content()
  }

  fn draw(&self, surface: &mut dyn DrawSurface) -> Result<()> {
    self.as_layer().draw(surface)
  }

  fn set_alpha(&mut self, alpha: u8) {
    self.as_layer_mut().set_alpha(alpha);
  }

  fn set_invalidator(&mut self, invalidator: Invalidator) {
    self.as_layer_mut().set_invalidator(invalidator);
  }

  fn attach(&mut self) {
    self.as_layer_mut().attach();
  }

  fn detach(&mut self) {
    self.as_layer_mut().detach();
  }

  fn release(&mut self) {
    self.as_layer_mut().release();
  }
}

/// A parsed `mask-image` value
#[derive(Debug, Clone, PartialEq)]
pub enum MaskValue {
  Gradient(Gradient),
  Image(ImageRequest),
}

impl MaskValue {
  pub fn parse(descriptor: &Value) -> Option<Self> {
    match Self::try_parse(descriptor) {
      Ok(value) => Some(value),
      Err(err) => {
        debug!(%err, "rejected mask descriptor");
        None
      }
    }
  }

  /// Parses `{type: "url", url}` or a gradient descriptor
  pub fn try_parse(descriptor: &Value) -> std::result::Result<Self, ParseError> {
    let map = descriptor.as_object().ok_or(ParseError::NotAnObject)?;
    let kind = map
      .get("type")
      .and_then(Value::as_str)
      .ok_or(ParseError::MissingType)?;
    if kind.eq_ignore_ascii_case("url") {
      let uri = map
        .get("url")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingField {
          kind: "url",
          field: "url",
        })?;
      return Ok(MaskValue::Image(ImageRequest::new(uri)));
    }
    Gradient::try_parse(descriptor).map(MaskValue::Gradient)
  }
}
