use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;

/// Environment prefix shared by every toggle.
pub const TOGGLE_PREFIX: &str = "BACKDROP_";

/// Default device scale for [`crate::RenderContext::from_toggles`].
pub const DEVICE_SCALE: &str = "BACKDROP_DEVICE_SCALE";
/// Emit a `tracing` event for every layer drawn by a composite.
pub const TRACE_LAYERS: &str = "BACKDROP_TRACE_LAYERS";
/// Draw composites without their mask.
pub const DISABLE_MASKS: &str = "BACKDROP_DISABLE_MASKS";

/// Parsed runtime debug/configuration toggles sourced from `BACKDROP_*` environment variables.
///
/// Values are captured once (via [`RuntimeToggles::from_env`]) and then reused across draws.
/// Embedders can also build instances from a map to override the environment.
#[derive(Debug, Clone, Default)]
pub struct RuntimeToggles {
  raw: HashMap<String, String>,
}

impl RuntimeToggles {
  /// Parse all `BACKDROP_*` environment variables into a toggle map.
  pub fn from_env() -> Self {
    let raw = std::env::vars()
      .filter(|(k, _)| k.starts_with(TOGGLE_PREFIX))
      .collect::<HashMap<_, _>>();
    Self { raw }
  }

  /// Construct a toggle set from a provided map of key/value pairs.
  pub fn from_map(raw: HashMap<String, String>) -> Self {
    Self { raw }
  }

  /// Returns the raw string value for a toggle, if set.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.raw.get(key).map(String::as_str)
  }

  /// Returns true when the toggle is present and truthy (`!= 0`/`false`/`off`).
  pub fn truthy(&self, key: &str) -> bool {
    self.truthy_with_default(key, false)
  }

  /// Returns true when the toggle is present and truthy, otherwise the provided default.
  pub fn truthy_with_default(&self, key: &str, default: bool) -> bool {
    self
      .get(key)
      .map(|v| !matches_ignore_case(v, &["0", "false", "off", ""]))
      .unwrap_or(default)
  }

  /// Parse a toggle as `f64`, returning `None` when unset or unparseable.
  pub fn f64(&self, key: &str) -> Option<f64> {
    self.get(key).and_then(|v| v.trim().parse::<f64>().ok())
  }

  /// Device scale from `BACKDROP_DEVICE_SCALE`; 1.0 when unset or not a positive number.
  pub fn device_scale(&self) -> f32 {
    self
      .f64(DEVICE_SCALE)
      .map(|v| v as f32)
      .filter(|v| v.is_finite() && *v > 0.0)
      .unwrap_or(1.0)
  }

  pub fn trace_layers(&self) -> bool {
    self.truthy(TRACE_LAYERS)
  }

  pub fn masks_disabled(&self) -> bool {
    self.truthy(DISABLE_MASKS)
  }
}

fn matches_ignore_case(value: &str, candidates: &[&str]) -> bool {
  let lower = value.trim().to_ascii_lowercase();
  candidates.iter().any(|c| lower == *c)
}

static DEFAULT_TOGGLES: OnceLock<Arc<RuntimeToggles>> = OnceLock::new();
static ACTIVE_TOGGLES: OnceLock<RwLock<Arc<RuntimeToggles>>> = OnceLock::new();

/// Returns the currently active runtime toggles.
///
/// Defaults to `RuntimeToggles::from_env()` if no overrides are installed.
pub fn runtime_toggles() -> Arc<RuntimeToggles> {
  ACTIVE_TOGGLES
    .get_or_init(|| RwLock::new(default_toggles()))
    .read()
    .clone()
}

fn default_toggles() -> Arc<RuntimeToggles> {
  DEFAULT_TOGGLES
    .get_or_init(|| Arc::new(RuntimeToggles::from_env()))
    .clone()
}

/// Guard that restores the previous active toggles when dropped.
pub struct RuntimeTogglesGuard {
  previous: Arc<RuntimeToggles>,
}

impl Drop for RuntimeTogglesGuard {
  fn drop(&mut self) {
    if let Some(lock) = ACTIVE_TOGGLES.get() {
      *lock.write() = self.previous.clone();
    }
  }
}

/// Install the provided toggles as the active set for the duration of the returned guard.
pub fn set_runtime_toggles(toggles: Arc<RuntimeToggles>) -> RuntimeTogglesGuard {
  let lock = ACTIVE_TOGGLES.get_or_init(|| RwLock::new(default_toggles()));
  let previous = std::mem::replace(&mut *lock.write(), toggles);
  RuntimeTogglesGuard { previous }
}

/// Run a closure with the provided toggles installed, restoring the previous set afterwards.
pub fn with_runtime_toggles<T>(toggles: Arc<RuntimeToggles>, f: impl FnOnce() -> T) -> T {
  let _guard = set_runtime_toggles(toggles);
  f()
}
