//! Layered view backgrounds with alpha masks and basic-shape clipping
//!
//! `backdrop` draws a view's background as an ordered stack of layers
//! (shadows, fills, images, border, outline), optionally masked by a gradient
//! or a loaded image, and resolves CSS basic shapes (`circle()`, `inset()`,
//! `polygon()`, ...) into pixel geometry for clipping.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use backdrop::paint::{
//!   BackgroundComposite, Canvas, ColorLayer, Gradient, GradientMask, GradientStop, Invalidator,
//!   LayerStack, Mask,
//! };
//! use backdrop::{Rect, Rgba};
//!
//! let stack = LayerStack::new().with_background(Some(Arc::new(ColorLayer::new(Rgba::RED))));
//! let mut composite = BackgroundComposite::new(Invalidator::noop());
//! composite.set_stack(stack);
//! composite.set_bounds(Rect::from_xywh(0.0, 0.0, 16.0, 16.0));
//! composite.set_mask(Some(Mask::Gradient(GradientMask::default().with_gradient(
//!   Gradient::linear(
//!     90.0,
//!     vec![GradientStop::new(0.0, Rgba::BLACK), GradientStop::new(1.0, Rgba::TRANSPARENT)],
//!   ),
//! ))));
//!
//! let mut canvas = Canvas::new(16, 16)?;
//! composite.draw(&mut canvas)?;
//! # Ok::<(), backdrop::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`geometry`]: points, sizes, rectangles and edge offsets
//! - [`style`]: declared values (lengths, colors, radii, shapes) and their parsers
//! - [`paint`]: surfaces, layers, masks, clipping and the composite
//! - [`debug`]: `BACKDROP_*` runtime toggles

pub mod debug;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod style;

pub use error::{Error, ImageError, ParseError, RenderError, Result};
pub use geometry::{EdgeOffsets, Point, Rect, Size};
pub use style::{
  BasicShape, BorderInsets, BorderRadiusStyle, ClipRegion, CornerRadii, CornerRadius, FillRule,
  GeometryBox, LengthUnit, LengthValue, RenderContext, Rgba,
};
