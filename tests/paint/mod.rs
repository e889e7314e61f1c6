//! Paint integration tests.

mod util;

mod clip_test;
mod composite_test;
mod mask_test;
