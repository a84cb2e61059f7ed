//! Routine selection: `(src, dst, blend)` to a leaf, plus the palette
//! transcoding indexed sources need.

use super::Routine;
use super::scalar::*;
use super::{bgr_to_bgrw, bgrx_to_bgr, bgrx_to_rgb, rgb_to_bgrw, swap_rgb_bgr, swap_rgbx_bgrx, y_to_4bpp};
use crate::format::{PALETTE_BYTE_LENGTH, PixelBlend, PixelFormat as F};

use PixelBlend::{Src, SrcOver};

pub(super) fn select(
    dst: F,
    dst_palette: &mut [u8],
    src: F,
    src_palette: &[u8],
    blend: PixelBlend,
) -> Option<Routine> {
    match src {
        F::Y => from_y(dst),
        F::Y_16BE => from_y_16be(dst),
        F::Y_16LE => from_y_16le(dst),
        F::YA_NONPREMUL => from_ya_nonpremul(dst, blend),
        F::INDEXED_BGRA_NONPREMUL => {
            from_indexed_bgra_nonpremul(dst, dst_palette, src_palette, blend)
        }
        F::INDEXED_BGRA_BINARY => from_indexed_bgra_binary(dst, dst_palette, src_palette, blend),
        F::BGR_565 => from_bgr_565(dst),
        F::BGR => from_bgr(dst),
        F::RGB => from_rgb(dst),
        F::BGRX => from_bgrx(dst),
        F::BGRA_NONPREMUL => from_bgra_nonpremul(dst, blend),
        F::RGBA_NONPREMUL => from_rgba_nonpremul(dst, blend),
        F::BGRA_NONPREMUL_4X16LE => from_bgra_nonpremul_4x16le(dst, blend),
        F::BGRA_PREMUL => from_bgra_premul(dst, blend),
        F::RGBA_PREMUL => from_rgba_premul(dst, blend),
        F::BGRA_PREMUL_4X16LE => from_bgra_premul_4x16le(dst, blend),
        F::BGRA_BINARY => from_bgra_binary(dst, blend),
        _ => None,
    }
}

/// Builds a [`Routine`] named after its leaf.
macro_rules! routine {
    ($f:ident) => {
        Routine {
            name: stringify!($f),
            func: $f,
        }
    };
}

#[inline]
fn pick(blend: PixelBlend, src: Routine, over: Routine) -> Routine {
    match blend {
        Src => src,
        SrcOver => over,
    }
}

// ===========================================================================
// Opaque sources (blend-independent)
// ===========================================================================

fn from_y(dst: F) -> Option<Routine> {
    Some(match dst {
        F::Y => routine!(copy_1),
        F::BGR_565 => routine!(y_to_bgr_565),
        F::BGR | F::RGB => routine!(y_to_3bpp),
        F::BGRA_NONPREMUL
        | F::BGRA_PREMUL
        | F::BGRA_BINARY
        | F::BGRX
        | F::RGBA_NONPREMUL
        | F::RGBA_PREMUL
        | F::RGBA_BINARY
        | F::RGBX => routine!(y_to_4bpp),
        F::BGRA_NONPREMUL_4X16LE
        | F::BGRA_PREMUL_4X16LE
        | F::RGBA_NONPREMUL_4X16LE
        | F::RGBA_PREMUL_4X16LE => routine!(y_to_8bpp),
        _ => return None,
    })
}

fn from_y_16be(dst: F) -> Option<Routine> {
    Some(match dst {
        F::Y => routine!(y_16be_to_y),
        F::Y_16LE => routine!(swap_y_16),
        F::Y_16BE => routine!(copy_2),
        F::BGR_565 => routine!(y_16be_to_bgr_565),
        F::BGR | F::RGB => routine!(y_16be_to_3bpp),
        F::BGRA_NONPREMUL
        | F::BGRA_PREMUL
        | F::BGRA_BINARY
        | F::BGRX
        | F::RGBA_NONPREMUL
        | F::RGBA_PREMUL
        | F::RGBA_BINARY
        | F::RGBX => routine!(y_16be_to_4bpp),
        F::BGRA_NONPREMUL_4X16LE
        | F::BGRA_PREMUL_4X16LE
        | F::RGBA_NONPREMUL_4X16LE
        | F::RGBA_PREMUL_4X16LE => routine!(y_16be_to_8bpp),
        _ => return None,
    })
}

fn from_y_16le(dst: F) -> Option<Routine> {
    Some(match dst {
        F::Y => routine!(y_16le_to_y),
        F::Y_16LE => routine!(copy_2),
        F::Y_16BE => routine!(swap_y_16),
        F::BGR_565 => routine!(y_16le_to_bgr_565),
        F::BGR | F::RGB => routine!(y_16le_to_3bpp),
        F::BGRA_NONPREMUL
        | F::BGRA_PREMUL
        | F::BGRA_BINARY
        | F::BGRX
        | F::RGBA_NONPREMUL
        | F::RGBA_PREMUL
        | F::RGBA_BINARY
        | F::RGBX => routine!(y_16le_to_4bpp),
        F::BGRA_NONPREMUL_4X16LE
        | F::BGRA_PREMUL_4X16LE
        | F::RGBA_NONPREMUL_4X16LE
        | F::RGBA_PREMUL_4X16LE => routine!(y_16le_to_8bpp),
        _ => return None,
    })
}

fn from_bgr_565(dst: F) -> Option<Routine> {
    Some(match dst {
        F::Y => routine!(bgr_565_to_y),
        F::BGR_565 => routine!(copy_2),
        F::BGR => routine!(bgr_565_to_bgr),
        F::BGRA_NONPREMUL | F::BGRA_PREMUL | F::BGRA_BINARY | F::BGRX => {
            routine!(bgr_565_to_bgrw)
        }
        F::BGRA_NONPREMUL_4X16LE | F::BGRA_PREMUL_4X16LE => routine!(bgr_565_to_bgrw_4x16le),
        F::RGB => routine!(bgr_565_to_rgb),
        F::RGBA_NONPREMUL | F::RGBA_PREMUL | F::RGBA_BINARY | F::RGBX => {
            routine!(bgr_565_to_rgbw)
        }
        _ => return None,
    })
}

fn from_bgr(dst: F) -> Option<Routine> {
    Some(match dst {
        F::Y => routine!(bgr_to_y),
        F::BGR_565 => routine!(bgr_to_bgr_565),
        F::BGR => routine!(copy_3),
        F::BGRA_NONPREMUL | F::BGRA_PREMUL | F::BGRA_BINARY | F::BGRX => routine!(bgr_to_bgrw),
        F::BGRA_NONPREMUL_4X16LE | F::BGRA_PREMUL_4X16LE => routine!(bgr_to_bgrw_4x16le),
        F::RGB => routine!(swap_rgb_bgr),
        F::RGBA_NONPREMUL | F::RGBA_PREMUL | F::RGBA_BINARY | F::RGBX => {
            routine!(rgb_to_bgrw)
        }
        _ => return None,
    })
}

fn from_rgb(dst: F) -> Option<Routine> {
    Some(match dst {
        F::Y => routine!(rgb_to_y),
        F::BGR_565 => routine!(rgb_to_bgr_565),
        F::BGR => routine!(swap_rgb_bgr),
        F::BGRA_NONPREMUL | F::BGRA_PREMUL | F::BGRA_BINARY | F::BGRX => routine!(rgb_to_bgrw),
        F::BGRA_NONPREMUL_4X16LE => routine!(rgb_to_bgrw_4x16le),
        F::RGB => routine!(copy_3),
        F::RGBA_NONPREMUL | F::RGBA_PREMUL | F::RGBA_BINARY | F::RGBX => {
            routine!(bgr_to_bgrw)
        }
        _ => return None,
    })
}

fn from_bgrx(dst: F) -> Option<Routine> {
    Some(match dst {
        F::Y => routine!(bgrx_to_y),
        F::BGR_565 => routine!(bgrx_to_bgr_565),
        F::BGR => routine!(bgrx_to_bgr),
        F::BGRA_NONPREMUL | F::BGRA_PREMUL | F::BGRA_BINARY => routine!(bgrx_to_bgrw),
        F::BGRA_NONPREMUL_4X16LE => routine!(bgrx_to_bgrw_4x16le),
        F::BGRX => routine!(copy_4),
        F::RGB => routine!(bgrx_to_rgb),
        F::RGBA_NONPREMUL | F::RGBA_PREMUL | F::RGBA_BINARY | F::RGBX => {
            routine!(bgrx_to_rgbw)
        }
        _ => return None,
    })
}

// ===========================================================================
// Sources with alpha
// ===========================================================================

fn from_ya_nonpremul(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (routine!(ya_nonpremul_to_y), routine!(ya_nonpremul_to_y_over)),
        F::YA_NONPREMUL => (routine!(copy_2), routine!(ya_nonpremul_to_ya_nonpremul_over)),
        F::BGR_565 => (
            routine!(ya_nonpremul_to_bgr_565),
            routine!(ya_nonpremul_to_bgr_565_over),
        ),
        F::BGR | F::RGB => (routine!(ya_nonpremul_to_3bpp), routine!(ya_nonpremul_to_3bpp_over)),
        F::BGRA_NONPREMUL | F::RGBA_NONPREMUL => (
            routine!(ya_nonpremul_to_bgra_nonpremul),
            routine!(ya_nonpremul_to_bgra_nonpremul_over),
        ),
        F::BGRA_PREMUL | F::RGBA_PREMUL => (
            routine!(ya_nonpremul_to_bgra_premul),
            routine!(ya_nonpremul_to_bgra_premul_over),
        ),
        F::BGRA_NONPREMUL_4X16LE | F::RGBA_NONPREMUL_4X16LE => (
            routine!(ya_nonpremul_to_bgra_nonpremul_4x16le),
            routine!(ya_nonpremul_to_bgra_nonpremul_4x16le_over),
        ),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

fn from_bgra_nonpremul(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (routine!(bgra_nonpremul_to_y), routine!(bgra_nonpremul_to_y_over)),
        F::BGR_565 => (
            routine!(bgra_nonpremul_to_bgr_565),
            routine!(bgra_nonpremul_to_bgr_565_over),
        ),
        F::BGR => (routine!(bgra_nonpremul_to_bgr), routine!(bgra_nonpremul_to_bgr_over)),
        F::BGRA_NONPREMUL => (routine!(copy_4), routine!(bgra_nonpremul_to_bgra_nonpremul_over)),
        F::BGRA_NONPREMUL_4X16LE => (
            routine!(bgra_nonpremul_to_bgra_nonpremul_4x16le),
            routine!(bgra_nonpremul_to_bgra_nonpremul_4x16le_over),
        ),
        F::BGRA_PREMUL => (
            routine!(bgra_nonpremul_to_bgra_premul),
            routine!(bgra_nonpremul_to_bgra_premul_over),
        ),
        F::RGB => (routine!(bgra_nonpremul_to_rgb), routine!(bgra_nonpremul_to_rgb_over)),
        F::RGBA_NONPREMUL => (
            routine!(swap_rgbx_bgrx),
            routine!(bgra_nonpremul_to_rgba_nonpremul_over),
        ),
        F::RGBA_PREMUL => (
            routine!(bgra_nonpremul_to_rgba_premul),
            routine!(bgra_nonpremul_to_rgba_premul_over),
        ),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

fn from_rgba_nonpremul(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (routine!(rgba_nonpremul_to_y), routine!(rgba_nonpremul_to_y_over)),
        F::BGR_565 => (
            routine!(rgba_nonpremul_to_bgr_565),
            routine!(rgba_nonpremul_to_bgr_565_over),
        ),
        F::BGR => (routine!(bgra_nonpremul_to_rgb), routine!(bgra_nonpremul_to_rgb_over)),
        F::BGRA_NONPREMUL => (
            routine!(swap_rgbx_bgrx),
            routine!(bgra_nonpremul_to_rgba_nonpremul_over),
        ),
        F::BGRA_NONPREMUL_4X16LE => (
            routine!(rgba_nonpremul_to_bgra_nonpremul_4x16le),
            routine!(rgba_nonpremul_to_bgra_nonpremul_4x16le_over),
        ),
        F::BGRA_PREMUL => (
            routine!(bgra_nonpremul_to_rgba_premul),
            routine!(bgra_nonpremul_to_rgba_premul_over),
        ),
        F::RGB => (routine!(bgra_nonpremul_to_bgr), routine!(bgra_nonpremul_to_bgr_over)),
        F::RGBA_NONPREMUL => (routine!(copy_4), routine!(bgra_nonpremul_to_bgra_nonpremul_over)),
        F::RGBA_PREMUL => (
            routine!(bgra_nonpremul_to_bgra_premul),
            routine!(bgra_nonpremul_to_bgra_premul_over),
        ),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

fn from_bgra_nonpremul_4x16le(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (
            routine!(bgra_nonpremul_4x16le_to_y),
            routine!(bgra_nonpremul_4x16le_to_y_over),
        ),
        F::BGR_565 => (
            routine!(bgra_nonpremul_4x16le_to_bgr_565),
            routine!(bgra_nonpremul_4x16le_to_bgr_565_over),
        ),
        F::BGR => (
            routine!(bgra_nonpremul_4x16le_to_bgr),
            routine!(bgra_nonpremul_4x16le_to_bgr_over),
        ),
        F::BGRA_NONPREMUL => (
            routine!(bgra_nonpremul_4x16le_to_bgra_nonpremul),
            routine!(bgra_nonpremul_4x16le_to_bgra_nonpremul_over),
        ),
        F::BGRA_NONPREMUL_4X16LE => (
            routine!(copy_8),
            routine!(bgra_nonpremul_4x16le_to_bgra_nonpremul_4x16le_over),
        ),
        F::BGRA_PREMUL => (
            routine!(bgra_nonpremul_4x16le_to_bgra_premul),
            routine!(bgra_nonpremul_4x16le_to_bgra_premul_over),
        ),
        F::RGB => (
            routine!(bgra_nonpremul_4x16le_to_rgb),
            routine!(bgra_nonpremul_4x16le_to_rgb_over),
        ),
        F::RGBA_NONPREMUL => (
            routine!(bgra_nonpremul_4x16le_to_rgba_nonpremul),
            routine!(bgra_nonpremul_4x16le_to_rgba_nonpremul_over),
        ),
        F::RGBA_PREMUL => (
            routine!(bgra_nonpremul_4x16le_to_rgba_premul),
            routine!(bgra_nonpremul_4x16le_to_rgba_premul_over),
        ),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

fn from_bgra_premul(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (routine!(bgra_premul_to_y), routine!(bgra_premul_to_y_over)),
        F::BGR_565 => (routine!(bgra_premul_to_bgr_565), routine!(bgra_premul_to_bgr_565_over)),
        F::BGR => (routine!(bgra_premul_to_bgr), routine!(bgra_premul_to_bgr_over)),
        F::BGRA_NONPREMUL => (
            routine!(bgra_premul_to_bgra_nonpremul),
            routine!(bgra_premul_to_bgra_nonpremul_over),
        ),
        F::BGRA_NONPREMUL_4X16LE => (
            routine!(bgra_premul_to_bgra_nonpremul_4x16le),
            routine!(bgra_premul_to_bgra_nonpremul_4x16le_over),
        ),
        F::BGRA_PREMUL => (routine!(copy_4), routine!(bgra_premul_to_bgra_premul_over)),
        F::RGB => (routine!(bgra_premul_to_rgb), routine!(bgra_premul_to_rgb_over)),
        F::RGBA_NONPREMUL => (
            routine!(bgra_premul_to_rgba_nonpremul),
            routine!(bgra_premul_to_rgba_nonpremul_over),
        ),
        F::RGBA_PREMUL => (routine!(swap_rgbx_bgrx), routine!(bgra_premul_to_rgba_premul_over)),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

fn from_rgba_premul(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (routine!(rgba_premul_to_y), routine!(rgba_premul_to_y_over)),
        F::BGR_565 => (routine!(rgba_premul_to_bgr_565), routine!(rgba_premul_to_bgr_565_over)),
        F::BGR => (routine!(bgra_premul_to_rgb), routine!(bgra_premul_to_rgb_over)),
        F::BGRA_NONPREMUL => (
            routine!(bgra_premul_to_rgba_nonpremul),
            routine!(bgra_premul_to_rgba_nonpremul_over),
        ),
        F::BGRA_NONPREMUL_4X16LE => (
            routine!(rgba_premul_to_bgra_nonpremul_4x16le),
            routine!(rgba_premul_to_bgra_nonpremul_4x16le_over),
        ),
        F::BGRA_PREMUL => (routine!(swap_rgbx_bgrx), routine!(bgra_premul_to_rgba_premul_over)),
        F::RGB => (routine!(bgra_premul_to_bgr), routine!(bgra_premul_to_bgr_over)),
        F::RGBA_NONPREMUL => (
            routine!(bgra_premul_to_bgra_nonpremul),
            routine!(bgra_premul_to_bgra_nonpremul_over),
        ),
        F::RGBA_PREMUL => (routine!(copy_4), routine!(bgra_premul_to_bgra_premul_over)),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

fn from_bgra_premul_4x16le(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (
            routine!(bgra_premul_4x16le_to_y),
            routine!(bgra_premul_4x16le_to_y_over),
        ),
        F::BGR_565 => (
            routine!(bgra_premul_4x16le_to_bgr_565),
            routine!(bgra_premul_4x16le_to_bgr_565_over),
        ),
        F::BGR => (
            routine!(bgra_premul_4x16le_to_bgr),
            routine!(bgra_premul_4x16le_to_bgr_over),
        ),
        F::BGRA_NONPREMUL => (
            routine!(bgra_premul_4x16le_to_bgra_nonpremul),
            routine!(bgra_premul_4x16le_to_bgra_nonpremul_over),
        ),
        F::BGRA_NONPREMUL_4X16LE => (
            routine!(bgra_premul_4x16le_to_bgra_nonpremul_4x16le),
            routine!(bgra_premul_4x16le_to_bgra_nonpremul_4x16le_over),
        ),
        F::BGRA_PREMUL => (
            routine!(bgra_premul_4x16le_to_bgra_premul),
            routine!(bgra_premul_4x16le_to_bgra_premul_over),
        ),
        F::BGRA_PREMUL_4X16LE => (
            routine!(copy_8),
            routine!(bgra_premul_4x16le_to_bgra_premul_4x16le_over),
        ),
        F::RGB => (
            routine!(bgra_premul_4x16le_to_rgb),
            routine!(bgra_premul_4x16le_to_rgb_over),
        ),
        F::RGBA_NONPREMUL => (
            routine!(bgra_premul_4x16le_to_rgba_nonpremul),
            routine!(bgra_premul_4x16le_to_rgba_nonpremul_over),
        ),
        F::RGBA_PREMUL => (
            routine!(bgra_premul_4x16le_to_rgba_premul),
            routine!(bgra_premul_4x16le_to_rgba_premul_over),
        ),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

// Binary alpha is a special case of premultiplied alpha, except that SRC to
// a non-premultiplied destination needs no conversion.
fn from_bgra_binary(dst: F, blend: PixelBlend) -> Option<Routine> {
    let (src, over) = match dst {
        F::Y => (routine!(bgra_premul_to_y), routine!(bgra_premul_to_y_over)),
        F::BGR_565 => (routine!(bgra_premul_to_bgr_565), routine!(bgra_premul_to_bgr_565_over)),
        F::BGR => (routine!(bgra_premul_to_bgr), routine!(bgra_premul_to_bgr_over)),
        F::BGRA_NONPREMUL => (routine!(copy_4), routine!(bgra_premul_to_bgra_nonpremul_over)),
        F::BGRA_NONPREMUL_4X16LE => (
            routine!(bgra_premul_to_bgra_nonpremul_4x16le),
            routine!(bgra_premul_to_bgra_nonpremul_4x16le_over),
        ),
        F::BGRA_PREMUL | F::BGRA_BINARY => {
            (routine!(copy_4), routine!(bgra_premul_to_bgra_premul_over))
        }
        F::RGB => (routine!(bgra_premul_to_rgb), routine!(bgra_premul_to_rgb_over)),
        F::RGBA_NONPREMUL => (
            routine!(swap_rgbx_bgrx),
            routine!(bgra_premul_to_rgba_nonpremul_over),
        ),
        F::RGBA_PREMUL => (routine!(swap_rgbx_bgrx), routine!(bgra_premul_to_rgba_premul_over)),
        _ => return None,
    };
    Some(pick(blend, src, over))
}

// ===========================================================================
// Indexed sources
// ===========================================================================

/// How an indexed source's palette becomes the destination palette the
/// index leaves read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Palette {
    Copy,
    SwapRb,
    Premultiply,
    SwapRbPremultiply,
    SquashToY { premultiply: bool },
    SquashToBgr565 { premultiply: bool },
}

impl Palette {
    /// Rewrites the first 1024 bytes of `dst` from the first 1024 of `src`.
    fn transcode(self, dst: &mut [u8], src: &[u8]) -> bool {
        let (Some(d), Some(s)) = (
            dst.get_mut(..PALETTE_BYTE_LENGTH),
            src.get(..PALETTE_BYTE_LENGTH),
        ) else {
            return false;
        };
        log::trace!("pixconv: palette transcode {self:?}");
        let n = match self {
            Self::Copy => copy_4(d, &[], s),
            Self::SwapRb => swap_rgbx_bgrx(d, &[], s),
            Self::Premultiply => bgra_nonpremul_to_bgra_premul(d, &[], s),
            Self::SwapRbPremultiply => bgra_nonpremul_to_rgba_premul(d, &[], s),
            Self::SquashToY { premultiply } => squash_palette_to_y(d, s, premultiply),
            Self::SquashToBgr565 { premultiply } => squash_palette_to_bgr_565(d, s, premultiply),
        };
        n == PALETTE_BYTE_LENGTH / 4
    }
}

fn from_indexed_bgra_nonpremul(
    dst: F,
    dst_palette: &mut [u8],
    src_palette: &[u8],
    blend: PixelBlend,
) -> Option<Routine> {
    let (palette, routine) = match (dst, blend) {
        (F::Y, Src) => (
            Palette::SquashToY { premultiply: true },
            routine!(index_to_y),
        ),
        (F::Y, SrcOver) => (Palette::Copy, routine!(index_to_y_over)),
        (F::INDEXED_BGRA_NONPREMUL, Src) => (Palette::Copy, routine!(copy_1)),
        (F::BGR_565, Src) => (
            Palette::SquashToBgr565 { premultiply: true },
            routine!(index_to_bgr_565),
        ),
        (F::BGR_565, SrcOver) => (Palette::Copy, routine!(index_to_bgr_565_over)),
        (F::BGR, Src) => (Palette::Premultiply, routine!(index_to_3bpp)),
        (F::BGR, SrcOver) => (Palette::Copy, routine!(index_to_3bpp_over)),
        (F::BGRA_NONPREMUL, Src) => (Palette::Copy, routine!(index_to_4bpp)),
        (F::BGRA_NONPREMUL, SrcOver) => (Palette::Copy, routine!(index_to_bgra_nonpremul_over)),
        (F::BGRA_NONPREMUL_4X16LE, Src) => (Palette::Copy, routine!(index_to_8bpp)),
        (F::BGRA_NONPREMUL_4X16LE, SrcOver) => {
            (Palette::Copy, routine!(index_to_bgra_nonpremul_4x16le_over))
        }
        (F::BGRA_PREMUL, Src) => (Palette::Premultiply, routine!(index_to_4bpp)),
        (F::BGRA_PREMUL, SrcOver) => (Palette::Copy, routine!(index_to_bgra_premul_over)),
        (F::RGB, Src) => (Palette::SwapRbPremultiply, routine!(index_to_3bpp)),
        (F::RGB, SrcOver) => (Palette::SwapRb, routine!(index_to_3bpp_over)),
        (F::RGBA_NONPREMUL, Src) => (Palette::SwapRb, routine!(index_to_4bpp)),
        (F::RGBA_NONPREMUL, SrcOver) => (Palette::SwapRb, routine!(index_to_bgra_nonpremul_over)),
        (F::RGBA_PREMUL, Src) => (Palette::SwapRbPremultiply, routine!(index_to_4bpp)),
        (F::RGBA_PREMUL, SrcOver) => (Palette::SwapRb, routine!(index_to_bgra_premul_over)),
        _ => return None,
    };
    palette.transcode(dst_palette, src_palette).then_some(routine)
}

// Every entry is fully opaque or fully transparent, so SRC never needs
// premultiplication and SRC_OVER is a per-pixel select.
fn from_indexed_bgra_binary(
    dst: F,
    dst_palette: &mut [u8],
    src_palette: &[u8],
    blend: PixelBlend,
) -> Option<Routine> {
    let (palette, src, over) = match dst {
        F::Y => (
            Palette::SquashToY { premultiply: false },
            routine!(index_to_y),
            Some(routine!(index_to_y_binary_over)),
        ),
        F::INDEXED_BGRA_NONPREMUL | F::INDEXED_BGRA_PREMUL | F::INDEXED_BGRA_BINARY => {
            (Palette::Copy, routine!(copy_1), None)
        }
        F::BGR_565 => (
            Palette::SquashToBgr565 { premultiply: false },
            routine!(index_to_bgr_565),
            Some(routine!(index_to_bgr_565_binary_over)),
        ),
        F::BGR => (
            Palette::Copy,
            routine!(index_to_3bpp),
            Some(routine!(index_to_3bpp_binary_over)),
        ),
        F::BGRA_NONPREMUL | F::BGRA_PREMUL | F::BGRA_BINARY => (
            Palette::Copy,
            routine!(index_to_4bpp),
            Some(routine!(index_to_4bpp_binary_over)),
        ),
        F::BGRA_NONPREMUL_4X16LE | F::BGRA_PREMUL_4X16LE => (
            Palette::Copy,
            routine!(index_to_8bpp),
            Some(routine!(index_to_8bpp_binary_over)),
        ),
        F::RGB => (
            Palette::SwapRb,
            routine!(index_to_3bpp),
            Some(routine!(index_to_3bpp_binary_over)),
        ),
        F::RGBA_NONPREMUL | F::RGBA_PREMUL | F::RGBA_BINARY => (
            Palette::SwapRb,
            routine!(index_to_4bpp),
            Some(routine!(index_to_4bpp_binary_over)),
        ),
        _ => return None,
    };
    if !palette.transcode(dst_palette, src_palette) {
        return None;
    }
    match blend {
        Src => Some(src),
        SrcOver => over,
    }
}
