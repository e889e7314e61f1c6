//! The ordered layer stack behind a view's background
//!
//! A [`LayerStack`] holds at most one layer per role plus any number of outer
//! and inner box shadows. Every layer paints across the same bounds. The
//! stack is immutable: each `with_*` call returns a new stack that shares all
//! other layers with the original.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::geometry::Rect;
use crate::paint::path::ShapePath;
use crate::paint::surface::DrawSurface;
use crate::style::border::{BorderInsets, BorderRadiusStyle, CornerRadii};
use crate::style::values::RenderContext;

/// Something drawn as part of a background
pub trait Layer: fmt::Debug + Send + Sync {
  /// Short name used in diagnostics
  fn kind(&self) -> &'static str;

  fn draw(&self, surface: &mut dyn DrawSurface, bounds: Rect, ctx: &RenderContext) -> Result<()>;
}

/// Role of a layer within the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerSlot {
  OriginalBackground,
  OuterShadow,
  Background,
  BackgroundImage,
  Border,
  FeedbackUnderlay,
  InnerShadow,
  Outline,
}

impl LayerSlot {
  pub fn name(self) -> &'static str {
    match self {
      LayerSlot::OriginalBackground => "original-background",
      LayerSlot::OuterShadow => "outer-shadow",
      LayerSlot::Background => "background",
      LayerSlot::BackgroundImage => "background-image",
      LayerSlot::Border => "border",
      LayerSlot::FeedbackUnderlay => "feedback-underlay",
      LayerSlot::InnerShadow => "inner-shadow",
      LayerSlot::Outline => "outline",
    }
  }
}

impl fmt::Display for LayerSlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, Default)]
pub struct LayerStack {
  original_background: Option<Arc<dyn Layer>>,
  outer_shadows: Vec<Arc<dyn Layer>>,
  background: Option<Arc<dyn Layer>>,
  background_image: Option<Arc<dyn Layer>>,
  border: Option<Arc<dyn Layer>>,
  feedback_underlay: Option<Arc<dyn Layer>>,
  inner_shadows: Vec<Arc<dyn Layer>>,
  outline: Option<Arc<dyn Layer>>,
  border_insets: Option<BorderInsets>,
  border_radius: Option<BorderRadiusStyle>,
}

impl LayerStack {
  pub fn new() -> Self {
    Self::default()
  }

  /// Wraps the background a view had before any styling was applied
  pub fn with_original_background(&self, layer: Option<Arc<dyn Layer>>) -> Self {
    Self {
      original_background: layer,
      ..self.clone()
    }
  }

  pub fn with_background(&self, layer: Option<Arc<dyn Layer>>) -> Self {
    Self {
      background: layer,
      ..self.clone()
    }
  }

  pub fn with_background_image(&self, layer: Option<Arc<dyn Layer>>) -> Self {
    Self {
      background_image: layer,
      ..self.clone()
    }
  }

  /// Replaces both shadow lists, given in declaration order
  pub fn with_shadows(&self, outer: Vec<Arc<dyn Layer>>, inner: Vec<Arc<dyn Layer>>) -> Self {
    Self {
      outer_shadows: outer,
      inner_shadows: inner,
      ..self.clone()
    }
  }

  pub fn with_border(&self, layer: Option<Arc<dyn Layer>>) -> Self {
    Self {
      border: layer,
      ..self.clone()
    }
  }

  /// Layer for touch or hover feedback, drawn above the border
  pub fn with_feedback_underlay(&self, layer: Option<Arc<dyn Layer>>) -> Self {
    Self {
      feedback_underlay: layer,
      ..self.clone()
    }
  }

  pub fn with_outline(&self, layer: Option<Arc<dyn Layer>>) -> Self {
    Self {
      outline: layer,
      ..self.clone()
    }
  }

  pub fn with_border_insets(&self, insets: Option<BorderInsets>) -> Self {
    Self {
      border_insets: insets,
      ..self.clone()
    }
  }

  pub fn with_border_radius(&self, radius: Option<BorderRadiusStyle>) -> Self {
    Self {
      border_radius: radius,
      ..self.clone()
    }
  }

  pub fn original_background(&self) -> Option<&Arc<dyn Layer>> {
    self.original_background.as_ref()
  }

  pub fn outer_shadows(&self) -> &[Arc<dyn Layer>] {
    &self.outer_shadows
  }

  pub fn background(&self) -> Option<&Arc<dyn Layer>> {
    self.background.as_ref()
  }

  pub fn background_image(&self) -> Option<&Arc<dyn Layer>> {
    self.background_image.as_ref()
  }

  pub fn border(&self) -> Option<&Arc<dyn Layer>> {
    self.border.as_ref()
  }

  pub fn feedback_underlay(&self) -> Option<&Arc<dyn Layer>> {
    self.feedback_underlay.as_ref()
  }

  pub fn inner_shadows(&self) -> &[Arc<dyn Layer>] {
    &self.inner_shadows
  }

  pub fn outline(&self) -> Option<&Arc<dyn Layer>> {
    self.outline.as_ref()
  }

  pub fn border_insets(&self) -> Option<&BorderInsets> {
    self.border_insets.as_ref()
  }

  pub fn border_radius(&self) -> Option<&BorderRadiusStyle> {
    self.border_radius.as_ref()
  }

  /// Layers with their roles, in draw order
  ///
  /// Shadows are listed in reverse declaration order so the first declared
  /// shadow ends up on top, as CSS requires.
  pub fn slots(&self) -> Vec<(LayerSlot, Arc<dyn Layer>)> {
    let mut out = Vec::with_capacity(6 + self.outer_shadows.len() + self.inner_shadows.len());
    let mut push = |slot: LayerSlot, layer: Option<&Arc<dyn Layer>>| {
      if let Some(layer) = layer {
        out.push((slot, Arc::clone(layer)));
      }
    };
    push(LayerSlot::OriginalBackground, self.original_background.as_ref());
    for shadow in self.outer_shadows.iter().rev() {
      push(LayerSlot::OuterShadow, Some(shadow));
    }
    push(LayerSlot::Background, self.background.as_ref());
    push(LayerSlot::BackgroundImage, self.background_image.as_ref());
    push(LayerSlot::Border, self.border.as_ref());
    push(LayerSlot::FeedbackUnderlay, self.feedback_underlay.as_ref());
    for shadow in self.inner_shadows.iter().rev() {
      push(LayerSlot::InnerShadow, Some(shadow));
    }
    push(LayerSlot::Outline, self.outline.as_ref());
    out
  }

  /// Layers in draw order
  pub fn layers(&self) -> Vec<Arc<dyn Layer>> {
    self.slots().into_iter().map(|(_, layer)| layer).collect()
  }

  pub fn is_empty(&self) -> bool {
    self.original_background.is_none()
      && self.outer_shadows.is_empty()
      && self.background.is_none()
      && self.background_image.is_none()
      && self.border.is_none()
      && self.feedback_underlay.is_none()
      && self.inner_shadows.is_empty()
      && self.outline.is_none()
  }
}

/// Shape used for elevation shadows and focus rings
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
  Rect(Rect),
  RoundedRect { rect: Rect, radii: CornerRadii },
}

impl Outline {
  pub fn rect(&self) -> Rect {
    match self {
      Outline::Rect(rect) | Outline::RoundedRect { rect, .. } => *rect,
    }
  }

  pub fn path(&self) -> ShapePath {
    match *self {
      Outline::Rect(rect) => ShapePath::rect(rect),
      Outline::RoundedRect { rect, radii } => ShapePath::rounded_rect(rect, radii),
    }
  }
}

/// Outline of a box with the given radius and border insets
///
/// When any corner is rounded, each radius grows by the adjacent border
/// inset: horizontal radii by the left or right inset, vertical radii by the
/// top or bottom one.
pub fn compute_outline(
  bounds: Rect,
  radius: Option<&BorderRadiusStyle>,
  insets: Option<&BorderInsets>,
  ctx: &RenderContext,
) -> Outline {
  let Some(radius) = radius else {
    return Outline::Rect(bounds);
  };
  let radii = radius.resolve(bounds, ctx);
  if !radii.has_radius() {
    return Outline::Rect(bounds);
  }
  let radii = match insets {
    Some(insets) => radii.outset_by(insets.resolve(ctx)),
    None => radii,
  };
  Outline::RoundedRect {
    rect: bounds,
    radii,
  }
}
