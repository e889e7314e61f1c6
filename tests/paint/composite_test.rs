//! Layer stacks drawn through a composite onto real pixels

use std::sync::Arc;

use backdrop::paint::{
  BackgroundComposite, BorderLayer, BoxShadowLayer, Canvas, ColorLayer, Fill, Gradient,
  GradientMask, GradientStop, ImageMask, ImagePipeline, ImageRequest, Invalidator, Layer,
  LayerStack, Mask, MemoryImagePipeline, RecordingSurface, SurfaceCommand,
};
use backdrop::debug::RuntimeToggles;
use backdrop::{BorderInsets, Rect, Rgba};
use tiny_skia::Pixmap;

use super::util::{alpha, assert_close, init_tracing, pixel};

fn composite(bounds: Rect) -> BackgroundComposite {
  let mut composite =
    BackgroundComposite::with_toggles(Invalidator::noop(), Arc::new(RuntimeToggles::default()));
  composite.set_bounds(bounds);
  composite
}

fn fade_mask() -> Mask {
  Mask::Gradient(GradientMask::default().with_gradient(Gradient::linear(
    90.0,
    vec![
      GradientStop::new(0.0, Rgba::BLACK),
      GradientStop::new(1.0, Rgba::TRANSPARENT),
    ],
  )))
}

/// Left half opaque, right half transparent
fn half_opaque(size: u32) -> Pixmap {
  let mut pixmap = Pixmap::new(size, size).expect("pixmap");
  let mut paint = tiny_skia::Paint::default();
  paint.set_color(tiny_skia::Color::BLACK);
  let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, size as f32 / 2.0, size as f32).expect("rect");
  pixmap.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
  pixmap
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn first_declared_shadow_paints_on_top() {
  let bounds = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
  let first: Arc<dyn Layer> = Arc::new(BoxShadowLayer::outer(Rgba::RED, 10.0, 0.0, 0.0));
  let second: Arc<dyn Layer> = Arc::new(BoxShadowLayer::outer(Rgba::BLUE, 10.0, 0.0, 0.0));
  let mut composite = composite(bounds);
  composite.set_stack(LayerStack::new().with_shadows(vec![first, second], Vec::new()));

  let mut canvas = Canvas::new(30, 10).expect("canvas");
  composite.draw(&mut canvas).expect("draw");
  assert_eq!(pixel(canvas.pixmap(), 15, 5), (255, 0, 0, 255));
  assert_eq!(alpha(canvas.pixmap(), 5, 5), 0);
}

#[test]
fn border_paints_over_background() {
  let bounds = Rect::from_xywh(0.0, 0.0, 20.0, 20.0);
  let mut composite = composite(bounds);
  composite.set_stack(
    LayerStack::new()
      .with_border(Some(Arc::new(BorderLayer::new(Rgba::BLACK, BorderInsets::all(2.0)))))
      .with_background(Some(Arc::new(ColorLayer::new(Rgba::WHITE)))),
  );
  let mut canvas = Canvas::new(20, 20).expect("canvas");
  composite.draw(&mut canvas).expect("draw");
  assert_eq!(pixel(canvas.pixmap(), 0, 10), (0, 0, 0, 255));
  assert_eq!(pixel(canvas.pixmap(), 10, 10), (255, 255, 255, 255));
}

// ============================================================================
// Masking
// ============================================================================

#[test]
fn gradient_mask_fades_background_and_content() {
  init_tracing();
  let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 10.0);
  let mut composite = composite(bounds);
  composite.set_stack(
    LayerStack::new().with_background(Some(Arc::new(ColorLayer::new(Rgba::RED)))),
  );
  composite.set_mask(Some(fade_mask()));

  let mut canvas = Canvas::new(100, 20).expect("canvas");
  composite
    .draw_with_content(&mut canvas, |surface| {
      surface.fill_rect(Rect::from_xywh(40.0, 0.0, 20.0, 10.0), &Fill::Solid(Rgba::BLUE))
    })
    .expect("draw");

  let pixmap = canvas.pixmap();
  assert_close(alpha(pixmap, 0, 5), 255, 6, "left edge");
  assert_close(alpha(pixmap, 50, 5), 127, 6, "content in the middle");
  assert_close(alpha(pixmap, 99, 5), 0, 6, "right edge");
  assert_eq!(pixel(pixmap, 50, 5).2, 255, "content stays blue");
  assert_eq!(alpha(pixmap, 50, 15), 0, "nothing outside the bounds");
  assert_eq!(canvas.open_layers(), 0);
}

#[test]
fn image_mask_hides_until_loaded() {
  let pipeline = MemoryImagePipeline::deferred();
  pipeline.insert("mem://half", half_opaque(8));
  let shared: Arc<dyn ImagePipeline> = Arc::new(pipeline.clone());

  let bounds = Rect::from_xywh(0.0, 0.0, 16.0, 16.0);
  let mut composite = composite(bounds);
  composite.set_stack(
    LayerStack::new().with_background(Some(Arc::new(ColorLayer::new(Rgba::GREEN)))),
  );
  let mut mask = ImageMask::new(shared);
  mask.set_image_request(Some(ImageRequest::new("mem://half")));
  composite.set_mask(Some(Mask::Image(mask)));
  composite.attach();

  let mut canvas = Canvas::new(16, 16).expect("canvas");
  composite.draw(&mut canvas).expect("draw");
  assert_eq!(alpha(canvas.pixmap(), 4, 8), 0, "loading mask hides content");

  assert_eq!(pipeline.complete_pending(), 1);
  let mut canvas = Canvas::new(16, 16).expect("canvas");
  composite.draw(&mut canvas).expect("draw");
  assert_eq!(pixel(canvas.pixmap(), 2, 8), (0, 255, 0, 255));
  assert_eq!(alpha(canvas.pixmap(), 13, 8), 0);
}

#[test]
fn recorded_masked_draw_is_balanced() {
  let bounds = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
  let mut composite = composite(bounds);
  composite.set_stack(
    LayerStack::new()
      .with_background(Some(Arc::new(ColorLayer::new(Rgba::RED))))
      .with_shadows(
        vec![Arc::new(BoxShadowLayer::outer(Rgba::BLACK, 2.0, 2.0, 0.0)) as Arc<dyn Layer>],
        vec![Arc::new(BoxShadowLayer::inset(Rgba::BLACK, 0.0, 0.0, 1.0)) as Arc<dyn Layer>],
      ),
  );
  composite.set_mask(Some(fade_mask()));

  let mut surface = RecordingSurface::new();
  composite.draw(&mut surface).expect("draw");
  let opens = surface
    .commands()
    .iter()
    .filter(|cmd| matches!(cmd, SurfaceCommand::OpenLayer { .. }))
    .count();
  let closes = surface
    .commands()
    .iter()
    .filter(|cmd| matches!(cmd, SurfaceCommand::CloseLayer { .. }))
    .count();
  assert_eq!(opens, closes);
  assert_eq!(surface.open_layers(), 0);
  assert!(matches!(
    surface.commands().first(),
    Some(SurfaceCommand::OpenLayer { depth: 1, .. })
  ));
  assert!(matches!(
    surface.commands().last(),
    Some(SurfaceCommand::CloseLayer { depth: 1 })
  ));
}

#[test]
fn zero_size_composite_still_draws_content() {
  let mut composite = composite(Rect::ZERO);
  composite.set_mask(Some(fade_mask()));

  let mut canvas = Canvas::new(10, 10).expect("canvas");
  composite
    .draw_with_content(&mut canvas, |surface| {
      surface.fill_rect(Rect::from_xywh(0.0, 0.0, 5.0, 5.0), &Fill::Solid(Rgba::RED))
    })
    .expect("draw");
  assert_eq!(pixel(canvas.pixmap(), 2, 2), (255, 0, 0, 255));
  assert_eq!(canvas.open_layers(), 0);
}
