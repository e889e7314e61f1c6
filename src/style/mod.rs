//! Style-side values: colors, lengths, corner radii and clip shapes
//!
//! Everything here is declared data. Turning it into pixels happens in
//! [`crate::paint`].

pub mod border;
pub mod color;
pub mod shape;
pub mod values;

pub use border::{BorderInsets, BorderRadiusStyle, CornerRadii, CornerRadius};
pub use color::Rgba;
pub use shape::{BasicShape, ClipRegion, FillRule, GeometryBox};
pub use values::{LengthUnit, LengthValue, RenderContext};
