use tiny_skia::Pixmap;

/// Unpremultiplied RGBA at `(x, y)`
pub fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
  let color = pixmap
    .pixel(x, y)
    .unwrap_or_else(|| panic!("pixel ({x}, {y}) out of bounds"))
    .demultiply();
  (color.red(), color.green(), color.blue(), color.alpha())
}

pub fn alpha(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
  pixel(pixmap, x, y).3
}

/// Asserts two channel values differ by at most `tolerance`
pub fn assert_close(actual: u8, expected: u8, tolerance: u8, what: &str) {
  let diff = actual.abs_diff(expected);
  assert!(
    diff <= tolerance,
    "{what}: expected {expected} +/- {tolerance}, got {actual}"
  );
}

pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}
