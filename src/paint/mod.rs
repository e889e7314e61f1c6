//! Painting and rasterization
//!
//! Backgrounds are built from a [`LayerStack`] and drawn through the
//! [`DrawSurface`] interface by a [`BackgroundComposite`], which optionally
//! applies a [`Mask`] over the result.
//!
//! # Painting order
//!
//! 1. Original background
//! 2. Outer box shadows, last declared first
//! 3. Background color
//! 4. Background image
//! 5. Border
//! 6. Feedback underlay
//! 7. Inner box shadows, last declared first
//! 8. Outline
//!
//! The mask is not part of the stack; it is composited over everything above
//! (and over content drawn with [`BackgroundComposite::draw_with_content`])
//! with a destination-in layer.
//!
//! # Backends
//!
//! - [`Canvas`]: tiny-skia rasterizer with real offscreen layers
//! - [`RecordingSurface`]: records [`SurfaceCommand`]s for inspection

pub mod canvas;
pub mod clip_path;
pub mod composite;
pub mod gradient;
pub mod image;
pub mod layer;
pub mod layers;
pub mod mask;
pub mod path;
pub mod recording;
pub mod surface;

pub use canvas::Canvas;
pub use clip_path::{draw_clipped, resolve_basic_shape, resolve_clip_region, ReferenceBoxes};
pub use composite::BackgroundComposite;
pub use gradient::{Gradient, GradientStop, ResolvedGradient};
pub use image::{
  ImageController, ImagePipeline, ImageRequest, Invalidator, LoadState, MemoryImagePipeline,
};
pub use layer::{compute_outline, Layer, LayerSlot, LayerStack, Outline};
pub use layers::{BorderLayer, BoxShadowLayer, ColorLayer, ImageFill, ImageFillLayer, OutlineLayer};
pub use mask::{GradientMask, ImageMask, Mask, MaskLayer, MaskValue};
pub use path::ShapePath;
pub use recording::{RecordingSurface, SurfaceCommand};
pub use surface::{
  with_scoped_layer, DrawSurface, Fill, LayerBlend, LayerPaint, LayerToken, MaskPaint,
};
