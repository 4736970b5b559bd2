//! Pure encoding core: no filesystem access.
//!
//! - [`color`]: 8-bit to 2-bit channel quantization and byte packing
//! - [`theme`]: theme model, JSON parsing, flattening into output order

pub mod color;
pub mod error;
pub mod theme;

pub use color::{encode_colors, quantize_channel, Color, FORMAT_TAG};
pub use error::ThemeError;
pub use theme::{ColorEntry, Theme, ThemeEntry};
