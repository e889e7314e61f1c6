//! Debug and runtime configuration helpers

pub mod runtime;

pub use runtime::{runtime_toggles, set_runtime_toggles, with_runtime_toggles, RuntimeToggles};
