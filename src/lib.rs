//! # graybmp
//!
//! Decoder and encoder for 8-bit palette-indexed Windows BMP files, plus a
//! grayscale transform that rewrites the color table in place.
//!
//! ## Format
//!
//! Only the `BITMAPFILEHEADER` + `BITMAPINFOHEADER` + 256 entry palette
//! variant is handled. Every header field is read and written field by field
//! in little-endian order, so a decode followed by an encode reproduces the
//! input byte for byte. Pixel bytes are palette indices and are copied
//! through untouched, including row padding and row order.
//!
//! ## Non-Goals
//!
//! - Bit depths other than 8
//! - RLE compression
//! - Weighted luminance or any color management
//! - Streaming decode; the whole file lives in memory
//!
//! ## Usage
//!
//! ```no_run
//! use graybmp::{DecodeRequest, EncodeRequest, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//! let mut bitmap = DecodeRequest::new(data).decode(Unstoppable)?;
//! bitmap.to_grayscale();
//! let encoded = EncodeRequest::new(&bitmap).encode(Unstoppable)?;
//! # Ok::<(), graybmp::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;

pub mod bmp;
pub mod palette;

mod decode;
mod encode;

// Re-exports
pub use bmp::{FileHeader, IndexedBitmap, InfoHeader, PixelDataLocation};
pub use decode::{DecodeRequest, decode_bmp};
pub use encode::{EncodeRequest, encode_bmp};
pub use enough::{Stop, Unstoppable};
pub use error::{BitmapError, Section};
pub use limits::Limits;
pub use palette::{Palette, PaletteEntry};
