//! Mask lifecycle and descriptor handling

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use backdrop::paint::{
  Canvas, ImageMask, ImagePipeline, ImageRequest, Invalidator, LoadState, Mask, MaskLayer,
  MaskPaint, MaskValue, MemoryImagePipeline, RecordingSurface,
};
use backdrop::{Rect, RenderContext};
use serde_json::json;
use tiny_skia::Pixmap;

fn counting() -> (Arc<AtomicUsize>, Invalidator) {
  let count = Arc::new(AtomicUsize::new(0));
  let seen = Arc::clone(&count);
  let invalidator = Invalidator::new(move || {
    seen.fetch_add(1, Ordering::SeqCst);
  });
  (count, invalidator)
}

fn pipeline_with(uris: &[&str]) -> MemoryImagePipeline {
  let pipeline = MemoryImagePipeline::new();
  for uri in uris {
    pipeline.insert(*uri, Pixmap::new(4, 4).expect("pixmap"));
  }
  pipeline
}

#[test]
fn attach_and_detach_are_idempotent() {
  let (count, invalidator) = counting();
  let mut mask = ImageMask::new(Arc::new(pipeline_with(&["mem://a"])));
  mask.set_invalidator(invalidator);
  mask.set_image_request(Some(ImageRequest::new("mem://a")));
  let after_request = count.load(Ordering::SeqCst);

  mask.attach();
  mask.attach();
  assert_eq!(mask.state(), LoadState::Ready);
  assert_eq!(count.load(Ordering::SeqCst), after_request + 1, "one load, one redraw");

  mask.detach();
  mask.detach();
  assert_eq!(mask.state(), LoadState::Unset);
  mask.attach();
  assert_eq!(mask.state(), LoadState::Ready);
}

#[test]
fn last_request_wins() {
  let mut mask = ImageMask::new(Arc::new(pipeline_with(&["mem://a", "mem://b"])));
  mask.attach();
  mask.set_image_request(Some(ImageRequest::new("mem://a")));
  mask.set_image_request(Some(ImageRequest::new("mem://b")));
  assert_eq!(mask.request(), Some(&ImageRequest::new("mem://b")));
  assert_eq!(mask.state(), LoadState::Ready);

  mask.set_image_request(None);
  assert_eq!(mask.state(), LoadState::Unset);
  assert!(!mask.has_content());
}

#[test]
fn missing_image_fails_and_hides() {
  let mut mask = ImageMask::new(Arc::new(MemoryImagePipeline::new()));
  mask.set_image_request(Some(ImageRequest::new("mem://missing")));
  mask.set_bounds(Rect::from_xywh(0.0, 0.0, 4.0, 4.0));
  mask.attach();
  assert!(matches!(mask.state(), LoadState::Failed(_)));

  let mut surface = RecordingSurface::new();
  mask
    .draw_as_mask(&mut surface, &MaskPaint::dst_in())
    .expect("mask");
  // The destination-in layer is still opened, with nothing drawn into it.
  assert_eq!(surface.commands().len(), 2);
}

#[test]
fn empty_bounds_mask_is_noop() {
  let pipeline: Arc<dyn ImagePipeline> = Arc::new(pipeline_with(&[]));
  let value = MaskValue::parse(&json!({
    "type": "linear-gradient",
    "colorStops": [{"color": 4278190080u32}, {"color": 0}],
  }))
  .expect("gradient mask");
  let mask = Mask::from_value(value, &pipeline, RenderContext::default());
  assert!(mask.has_content());

  let mut canvas = Canvas::new(4, 4).expect("canvas");
  mask
    .draw_as_mask(&mut canvas, &MaskPaint::dst_in())
    .expect("mask");
  assert_eq!(canvas.open_layers(), 0);
  assert!(canvas.pixmap().data().iter().all(|byte| *byte == 0));
}

#[test]
fn url_value_builds_image_mask() {
  let pipeline: Arc<dyn ImagePipeline> = Arc::new(pipeline_with(&["mem://a"]));
  let value = MaskValue::parse(&json!({"type": "url", "url": "mem://a"})).expect("url mask");
  let mut mask = Mask::from_value(value, &pipeline, RenderContext::default());
  mask.attach();
  let Mask::Image(image) = &mask else {
    panic!("expected image mask");
  };
  assert_eq!(image.state(), LoadState::Ready);
  mask.release();
  assert!(!mask.has_content());
}
