//! Image loading interface used by image masks
//!
//! Fetching and decoding live outside this crate. An [`ImagePipeline`] hands
//! out one [`ImageController`] per [`ImageRequest`]; the controller follows
//! the owning view's attach/detach lifecycle and reports progress through a
//! revocable [`Invalidator`].
//!
//! [`MemoryImagePipeline`] serves pixmaps registered in memory, either as soon
//! as a controller attaches or when [`MemoryImagePipeline::complete_pending`]
//! is called.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tiny_skia::Pixmap;
use tracing::{debug, trace};

use crate::error::ImageError;

/// What to load
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRequest {
  pub uri: String,
}

impl ImageRequest {
  pub fn new(uri: impl Into<String>) -> Self {
    Self { uri: uri.into() }
  }
}

/// Progress of a controller's load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
  /// Nothing requested yet, or the content was released on detach
  #[default]
  Unset,
  Loading,
  Ready,
  Failed(ImageError),
}

/// Redraw request handle
///
/// Cloning shares the handle. Revoking it silences every clone, which is how a
/// superseded controller is cut off from the view it used to serve.
#[derive(Clone)]
pub struct Invalidator {
  inner: Arc<InvalidatorInner>,
}

struct InvalidatorInner {
  revoked: AtomicBool,
  callback: Arc<dyn Fn() + Send + Sync>,
}

impl Invalidator {
  pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
    Self {
      inner: Arc::new(InvalidatorInner {
        revoked: AtomicBool::new(false),
        callback: Arc::new(callback),
      }),
    }
  }

  /// A handle that never calls anything
  pub fn noop() -> Self {
    Self::new(|| {})
  }

  /// A new, independently revocable handle forwarding to this one
  pub fn child(&self) -> Self {
    let parent = self.clone();
    Self::new(move || {
      parent.invalidate();
    })
  }

  /// Requests a redraw; returns false if the handle was revoked
  pub fn invalidate(&self) -> bool {
    if self.inner.revoked.load(Ordering::Acquire) {
      return false;
    }
    (self.inner.callback)();
    true
  }

  pub fn revoke(&self) {
    self.inner.revoked.store(true, Ordering::Release);
  }

  pub fn is_revoked(&self) -> bool {
    self.inner.revoked.load(Ordering::Acquire)
  }
}

impl Default for Invalidator {
  fn default() -> Self {
    Self::noop()
  }
}

impl fmt::Debug for Invalidator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Invalidator")
      .field("revoked", &self.is_revoked())
      .finish()
  }
}

/// Drives one image load
///
/// `on_attach` starts (or resumes) loading and animation, `on_detach` stops
/// them and may release the decoded content.
pub trait ImageController {
  fn on_attach(&mut self);
  fn on_detach(&mut self);
  fn state(&self) -> LoadState;
  /// The frame to draw, available once the state is `Ready`
  fn current_frame(&self) -> Option<Arc<Pixmap>>;
}

/// Creates controllers for image requests
pub trait ImagePipeline {
  fn new_controller(
    &self,
    request: &ImageRequest,
    invalidator: Invalidator,
  ) -> Box<dyn ImageController>;
}

#[derive(Default)]
struct MemoryStore {
  images: RwLock<FxHashMap<String, Arc<Pixmap>>>,
  pending: Mutex<Vec<Weak<Mutex<LoadSlot>>>>,
}

impl MemoryStore {
  fn lookup(&self, uri: &str) -> Result<Arc<Pixmap>, ImageError> {
    self
      .images
      .read()
      .get(uri)
      .cloned()
      .ok_or_else(|| ImageError::NotFound {
        uri: uri.to_string(),
      })
  }
}

/// In-memory [`ImagePipeline`] keyed by URI
///
/// Clones share the same store.
#[derive(Clone, Default)]
pub struct MemoryImagePipeline {
  store: Arc<MemoryStore>,
  deferred: bool,
}

impl MemoryImagePipeline {
  /// Loads complete synchronously when a controller attaches
  pub fn new() -> Self {
    Self::default()
  }

  /// Loads stay in `Loading` until [`Self::complete_pending`] runs
  pub fn deferred() -> Self {
    Self {
      deferred: true,
      ..Self::default()
    }
  }

  pub fn insert(&self, uri: impl Into<String>, pixmap: Pixmap) {
    self.store.images.write().insert(uri.into(), Arc::new(pixmap));
  }

  pub fn remove(&self, uri: &str) -> bool {
    self.store.images.write().remove(uri).is_some()
  }

  /// Finishes every outstanding load whose controller is still alive and attached
  ///
  /// Returns how many loads were delivered.
  pub fn complete_pending(&self) -> usize {
    let pending = std::mem::take(&mut *self.store.pending.lock());
    let mut delivered = 0;
    for slot in pending.iter().filter_map(Weak::upgrade) {
      let mut slot = slot.lock();
      if slot.attached && slot.state == LoadState::Loading {
        slot.finish(&self.store);
        delivered += 1;
      }
    }
    delivered
  }
}

impl fmt::Debug for MemoryImagePipeline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MemoryImagePipeline")
      .field("images", &self.store.images.read().len())
      .field("deferred", &self.deferred)
      .finish()
  }
}

impl ImagePipeline for MemoryImagePipeline {
  fn new_controller(
    &self,
    request: &ImageRequest,
    invalidator: Invalidator,
  ) -> Box<dyn ImageController> {
    Box::new(MemoryController {
      store: Arc::clone(&self.store),
      deferred: self.deferred,
      slot: Arc::new(Mutex::new(LoadSlot {
        uri: request.uri.clone(),
        state: LoadState::Unset,
        frame: None,
        attached: false,
        invalidator,
      })),
    })
  }
}

struct LoadSlot {
  uri: String,
  state: LoadState,
  frame: Option<Arc<Pixmap>>,
  attached: bool,
  invalidator: Invalidator,
}

impl LoadSlot {
  fn finish(&mut self, store: &MemoryStore) {
    match store.lookup(&self.uri) {
      Ok(frame) => {
        trace!(uri = %self.uri, "image ready");
        self.frame = Some(frame);
        self.state = LoadState::Ready;
      }
      Err(err) => {
        debug!(%err, "image load failed");
        self.frame = None;
        self.state = LoadState::Failed(err);
      }
    }
    self.invalidator.invalidate();
  }
}

struct MemoryController {
  store: Arc<MemoryStore>,
  deferred: bool,
  slot: Arc<Mutex<LoadSlot>>,
}

impl ImageController for MemoryController {
  fn on_attach(&mut self) {
    let mut slot = self.slot.lock();
    slot.attached = true;
    if matches!(slot.state, LoadState::Ready | LoadState::Loading) {
      return;
    }
    slot.state = LoadState::Loading;
    if self.deferred {
      self.store.pending.lock().push(Arc::downgrade(&self.slot));
    } else {
      slot.finish(&self.store);
    }
  }

  fn on_detach(&mut self) {
    let mut slot = self.slot.lock();
    slot.attached = false;
    slot.frame = None;
    slot.state = LoadState::Unset;
  }

  fn state(&self) -> LoadState {
    self.slot.lock().state.clone()
  }

  fn current_frame(&self) -> Option<Arc<Pixmap>> {
    self.slot.lock().frame.clone()
  }
}
