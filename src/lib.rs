//! # pixconv
//!
//! Pixel format model and swizzler for image decoders.
//!
//! A decoder produces samples in whatever layout its codec uses: gray, 16-bit
//! gray, palette indexes, 565, BGR, RGBA with or without premultiplied alpha,
//! 16 bits per channel. The caller asks for one layout. [`PixelSwizzler`]
//! converts between the two a row at a time, optionally compositing with
//! SRC_OVER, and [`PixelBuffer`] gives per-pixel get/set and rectangle fill
//! over caller-owned memory.
//!
//! ```
//! use pixconv::{PixelBlend, PixelFormat, PixelSwizzler};
//!
//! let mut s = PixelSwizzler::new();
//! s.prepare(PixelFormat::RGBA_PREMUL, &mut [], PixelFormat::BGR, &[], PixelBlend::Src)?;
//!
//! let mut dst = [0u8; 8];
//! let n = s.swizzle_interleaved_from_slice(&mut dst, &[], &[1, 2, 3, 4, 5, 6]);
//! assert_eq!(n, 2);
//! assert_eq!(dst, [3, 2, 1, 0xFF, 6, 5, 4, 0xFF]);
//! # Ok::<(), pixconv::Error>(())
//! ```
//!
//! Colors passed around as `u32` are `0xAARRGGBB`, premultiplied unless a
//! name says otherwise; see [`color`].
//!
//! The byte-shuffle conversions use AVX2, NEON or WASM SIMD128 when the CPU
//! has them, falling back to scalar code.
//!
//! ## Feature flags
//!
//! - **`std`** (default): runtime CPU feature detection through `archmage`.
//! - **`dst-allowlist`**: [`PixelSwizzler::prepare`] only accepts the
//!   destinations in [`DstAllowList::RESTRICTED`].

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod buffer;
pub mod color;
mod config;
mod error;
mod format;
mod palette;
mod rect;
mod swizzle;

pub use buffer::{PixelBuffer, Table};
pub use config::{
    AnimationDisposal, DIMENSION_MAX_INCL, FLICKS_PER_MILLISECOND, FLICKS_PER_SECOND, Flicks,
    FrameConfig, ImageConfig, PixelConfig,
};
pub use error::Error;
pub use format::{
    COLOR_PLANE, Coloration, INDEX_PLANE, NUM_PLANES_MAX_INCL, PALETTE_BYTE_LENGTH, PixelBlend,
    PixelFormat, PixelSubsampling, Transparency,
};
pub use palette::closest_element;
pub use rect::RectIeU32;
pub use swizzle::{DstAllowList, PixelSwizzler};
