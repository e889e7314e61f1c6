//! Color values used by layers and gradient stops
//!
//! Colors arrive from descriptors either as packed `0xAARRGGBB` integers (the
//! form produced by the style front end) or as `#rgb`, `#rrggbb` and
//! `#rrggbbaa` hex strings.
//!
//! # Examples
//!
//! ```
//! use backdrop::Rgba;
//!
//! assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::RED));
//! assert_eq!(Rgba::from_argb(0x80_00_00_ff).b, 255);
//! ```

use std::fmt;

/// RGBA color representation
///
/// - R, G, B: 0-255 (stored as u8)
/// - A: 0.0-1.0 (stored as f32)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: f32,
}

impl Rgba {
  pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);
  pub const BLACK: Self = Self::rgb(0, 0, 0);
  pub const WHITE: Self = Self::rgb(255, 255, 255);
  pub const RED: Self = Self::rgb(255, 0, 0);
  pub const GREEN: Self = Self::rgb(0, 255, 0);
  pub const BLUE: Self = Self::rgb(0, 0, 255);

  pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
    Self { r, g, b, a }
  }

  /// Opaque color from its channels
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self::new(r, g, b, 1.0)
  }

  /// Unpacks a `0xAARRGGBB` integer
  pub fn from_argb(argb: u32) -> Self {
    let [a, r, g, b] = argb.to_be_bytes();
    Self::new(r, g, b, a as f32 / 255.0)
  }

  /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`
  pub fn from_hex(text: &str) -> Option<Self> {
    let hex = text.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
      return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
      3 => {
        let mut out = [0u8; 3];
        for (slot, ch) in out.iter_mut().zip(hex.chars()) {
          let v = ch.to_digit(16)? as u8;
          *slot = v * 17;
        }
        Some(Self::rgb(out[0], out[1], out[2]))
      }
      6 | 8 => {
        let r = channel(&hex[0..2])?;
        let g = channel(&hex[2..4])?;
        let b = channel(&hex[4..6])?;
        let a = if hex.len() == 8 {
          channel(&hex[6..8])? as f32 / 255.0
        } else {
          1.0
        };
        Some(Self::new(r, g, b, a))
      }
      _ => None,
    }
  }

  /// Returns the same color with a different alpha
  pub fn with_alpha(self, alpha: f32) -> Self {
    Self {
      a: alpha.clamp(0.0, 1.0),
      ..self
    }
  }

  /// Alpha as a 0-255 channel value
  pub fn alpha_u8(self) -> u8 {
    (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
  }

  pub fn is_transparent(self) -> bool {
    self.a <= 0.0
  }

  pub fn to_skia(self) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.alpha_u8())
  }
}

impl Default for Rgba {
  fn default() -> Self {
    Self::TRANSPARENT
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_short_and_long_hex() {
    assert_eq!(Rgba::from_hex("#f00"), Some(Rgba::RED));
    assert_eq!(Rgba::from_hex("#00ff00"), Some(Rgba::GREEN));
    let translucent = Rgba::from_hex("#0000ff80").expect("hex");
    assert_eq!(translucent.b, 255);
    assert_eq!(translucent.alpha_u8(), 128);
  }

  #[test]
  fn rejects_malformed_hex() {
    assert_eq!(Rgba::from_hex("ff0000"), None);
    assert_eq!(Rgba::from_hex("#ff00"), None);
    assert_eq!(Rgba::from_hex("#gg0000"), None);
  }

  #[test]
  fn unpacks_argb() {
    let color = Rgba::from_argb(0xff_10_20_30);
    assert_eq!((color.r, color.g, color.b), (0x10, 0x20, 0x30));
    assert_eq!(color.a, 1.0);
    assert!(Rgba::from_argb(0x00_ff_ff_ff).is_transparent());
  }

  #[test]
  fn with_alpha_clamps() {
    assert_eq!(Rgba::RED.with_alpha(2.0).a, 1.0);
    assert_eq!(Rgba::RED.with_alpha(-1.0).alpha_u8(), 0);
  }
}
