//! Scalar leaf routines.
//!
//! Every leaf converts `n = min(dst.len() / dst_bpp, src.len() / src_bpp)`
//! pixels and returns `n`. Leaves named `*_over` composite onto `dst`; the
//! others overwrite it. `3bpp`, `4bpp` and `8bpp` leaves write every
//! destination of that size whose channels they fill identically (Y to BGR
//! and Y to RGB are the same bytes). Index leaves read the first 1024 bytes
//! of `dst_palette` and convert nothing when it is shorter.

use archmage::prelude::*;

use crate::color::*;
use crate::format::PALETTE_BYTE_LENGTH;

// ===========================================================================
// Pixel loops
// ===========================================================================

#[inline(always)]
fn convert<const D: usize, const S: usize>(
    dst: &mut [u8],
    src: &[u8],
    f: impl Fn(&[u8; S]) -> [u8; D],
) -> usize {
    let n = (dst.len() / D).min(src.len() / S);
    let d: &mut [[u8; D]] = bytemuck::cast_slice_mut(&mut dst[..n * D]);
    let s: &[[u8; S]] = bytemuck::cast_slice(&src[..n * S]);
    for (d, s) in d.iter_mut().zip(s) {
        *d = f(s);
    }
    n
}

#[inline(always)]
fn blend<const D: usize, const S: usize>(
    dst: &mut [u8],
    src: &[u8],
    f: impl Fn(&[u8; D], &[u8; S]) -> [u8; D],
) -> usize {
    let n = (dst.len() / D).min(src.len() / S);
    let d: &mut [[u8; D]] = bytemuck::cast_slice_mut(&mut dst[..n * D]);
    let s: &[[u8; S]] = bytemuck::cast_slice(&src[..n * S]);
    for (d, s) in d.iter_mut().zip(s) {
        *d = f(d, s);
    }
    n
}

#[inline(always)]
fn lookup<const D: usize>(
    dst: &mut [u8],
    dst_palette: &[u8],
    src: &[u8],
    f: impl Fn(&[u8; D], &[u8; 4]) -> [u8; D],
) -> usize {
    let Some(palette) = dst_palette.get(..PALETTE_BYTE_LENGTH) else {
        return 0;
    };
    let palette: &[[u8; 4]] = bytemuck::cast_slice(palette);
    let n = (dst.len() / D).min(src.len());
    let d: &mut [[u8; D]] = bytemuck::cast_slice_mut(&mut dst[..n * D]);
    for (d, &i) in d.iter_mut().zip(&src[..n]) {
        *d = f(d, &palette[i as usize]);
    }
    n
}

#[inline(always)]
fn copy<const N: usize>(dst: &mut [u8], src: &[u8]) -> usize {
    let n = (dst.len() / N).min(src.len() / N);
    dst[..n * N].copy_from_slice(&src[..n * N]);
    n
}

// ===========================================================================
// Byte helpers
// ===========================================================================

#[inline(always)]
fn u24le(b: &[u8]) -> u32 {
    b[0] as u32 | ((b[1] as u32) << 8) | ((b[2] as u32) << 16)
}

#[inline(always)]
fn u24be(b: &[u8]) -> u32 {
    ((b[0] as u32) << 16) | ((b[1] as u32) << 8) | b[2] as u32
}

#[inline(always)]
fn le3(c: u32) -> [u8; 3] {
    let b = c.to_le_bytes();
    [b[0], b[1], b[2]]
}

#[inline(always)]
fn u32le(b: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*b)
}

#[inline(always)]
fn u64le(b: &[u8; 8]) -> u64 {
    u64::from_le_bytes(*b)
}

#[inline(always)]
fn opaque_gray(y: u8) -> u32 {
    0xFF000000 | (0x010101 * y as u32)
}

/// Non-premultiplied gray+alpha as a non-premultiplied `u32`.
#[inline(always)]
fn ya(s: &[u8; 2]) -> u32 {
    ((s[1] as u32) << 24) | (0x010101 * s[0] as u32)
}

#[inline(always)]
fn ya_u64(s: &[u8; 2]) -> u64 {
    (0x0101_0000_0000_0000 * s[1] as u64) | (0x0000_0101_0101_0101 * s[0] as u64)
}

#[inline(always)]
fn gray_565(y: u8) -> [u8; 2] {
    let y5 = (y >> 3) as u16;
    let y6 = (y >> 2) as u16;
    ((y5 << 11) | (y6 << 5) | y5).to_le_bytes()
}

#[inline(always)]
fn to_565(argb: u32) -> [u8; 2] {
    argb_to_rgb565(argb).to_le_bytes()
}

#[inline(always)]
fn from_565(b: &[u8; 2]) -> u32 {
    rgb565_to_argb(u16::from_le_bytes(*b))
}

#[inline(always)]
fn gray8(argb: u32) -> [u8; 1] {
    [premul_u32_to_gray8(argb)]
}

#[inline(always)]
fn binary<const D: usize>(d: &[u8; D], p: &[u8; 4], f: impl Fn(&[u8; 4]) -> [u8; D]) -> [u8; D] {
    if u32le(p) != 0 { f(p) } else { *d }
}

// ===========================================================================
// 16-bit SRC_OVER onto opaque destinations
// ===========================================================================

/// A source pixel widened to 16 bits per channel.
#[derive(Clone, Copy)]
struct Src16 {
    a: u32,
    r: u32,
    g: u32,
    b: u32,
}

impl Src16 {
    #[inline(always)]
    fn bgra8(s: &[u8; 4]) -> Self {
        Self {
            a: 0x101 * s[3] as u32,
            r: 0x101 * s[2] as u32,
            g: 0x101 * s[1] as u32,
            b: 0x101 * s[0] as u32,
        }
    }

    #[inline(always)]
    fn rgba8(s: &[u8; 4]) -> Self {
        Self::bgra8(&[s[2], s[1], s[0], s[3]])
    }

    #[inline(always)]
    fn bgra16(s: &[u8; 8]) -> Self {
        let ch = |i: usize| u16::from_le_bytes([s[i], s[i + 1]]) as u32;
        Self {
            a: ch(6),
            r: ch(4),
            g: ch(2),
            b: ch(0),
        }
    }

    #[inline(always)]
    fn rgba16(s: &[u8; 8]) -> Self {
        let Self { a, r, g, b } = Self::bgra16(s);
        Self { a, r: b, g, b: r }
    }

    #[inline(always)]
    fn gray_alpha(s: &[u8; 2]) -> Self {
        let y = 0x101 * s[0] as u32;
        Self {
            a: 0x101 * s[1] as u32,
            r: y,
            g: y,
            b: y,
        }
    }

    /// `[r, g, b]` after compositing this non-premultiplied color over `d`.
    #[inline(always)]
    fn over_nonpremul(self, [dr, dg, db]: [u32; 3]) -> [u32; 3] {
        let ia = 0xFFFF - self.a;
        [
            (self.r * self.a + dr * ia) / 0xFFFF,
            (self.g * self.a + dg * ia) / 0xFFFF,
            (self.b * self.a + db * ia) / 0xFFFF,
        ]
    }

    #[inline(always)]
    fn over_premul(self, [dr, dg, db]: [u32; 3]) -> [u32; 3] {
        let ia = 0xFFFF - self.a;
        [
            self.r + dr * ia / 0xFFFF,
            self.g + dg * ia / 0xFFFF,
            self.b + db * ia / 0xFFFF,
        ]
    }
}

#[inline(always)]
fn rgb16_from_565(d: &[u8; 2]) -> [u32; 3] {
    let v = u16::from_le_bytes(*d) as u32;
    [
        (0x8421 * (0x1F & (v >> 11))) >> 4,
        (0x1041 * (0x3F & (v >> 5))) >> 2,
        (0x8421 * (0x1F & v)) >> 4,
    ]
}

#[inline(always)]
fn rgb16_to_565([r, g, b]: [u32; 3]) -> [u8; 2] {
    let v = ((0x1F & (r >> 11)) << 11) | ((0x3F & (g >> 10)) << 5) | (0x1F & (b >> 11));
    (v as u16).to_le_bytes()
}

#[inline(always)]
fn rgb16_from_bgr(d: &[u8; 3]) -> [u32; 3] {
    [0x101 * d[2] as u32, 0x101 * d[1] as u32, 0x101 * d[0] as u32]
}

#[inline(always)]
fn rgb16_to_bgr([r, g, b]: [u32; 3]) -> [u8; 3] {
    [(b >> 8) as u8, (g >> 8) as u8, (r >> 8) as u8]
}

#[inline(always)]
fn rgb16_from_gray(d: &[u8; 1]) -> [u32; 3] {
    [0x101 * d[0] as u32; 3]
}

#[inline(always)]
fn rgb16_to_gray([r, g, b]: [u32; 3]) -> [u8; 1] {
    [(luma16(r, g, b) >> 24) as u8]
}

// ===========================================================================
// Copies and byte swaps
// ===========================================================================

pub(super) fn copy_1(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    copy::<1>(dst, src)
}

pub(super) fn copy_2(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    copy::<2>(dst, src)
}

pub(super) fn copy_3(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    copy::<3>(dst, src)
}

pub(super) fn copy_4(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    copy::<4>(dst, src)
}

pub(super) fn copy_8(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    copy::<8>(dst, src)
}

/// Y_16LE to Y_16BE and back.
pub(super) fn swap_y_16(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| [s[1], s[0]])
}

// ===========================================================================
// Gray sources
// ===========================================================================

pub(super) fn y_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 1]| gray_565(s[0]))
}

pub(super) fn y_to_3bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 1]| [s[0]; 3])
}

pub(super) fn y_to_8bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 1]| {
        (0xFFFF_0000_0000_0000 | (0x0101_0101_0101 * s[0] as u64)).to_le_bytes()
    })
}

pub(super) fn y_16be_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| [s[0]])
}

pub(super) fn y_16le_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| [s[1]])
}

pub(super) fn y_16be_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| gray_565(s[0]))
}

pub(super) fn y_16le_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| gray_565(s[1]))
}

pub(super) fn y_16be_to_3bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| [s[0]; 3])
}

pub(super) fn y_16le_to_3bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| [s[1]; 3])
}

pub(super) fn y_16be_to_4bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| opaque_gray(s[0]).to_le_bytes())
}

pub(super) fn y_16le_to_4bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| opaque_gray(s[1]).to_le_bytes())
}

pub(super) fn y_16be_to_8bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| {
        let y = u16::from_be_bytes(*s) as u64;
        (0xFFFF_0000_0000_0000 | (0x0001_0001_0001 * y)).to_le_bytes()
    })
}

pub(super) fn y_16le_to_8bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| {
        let y = u16::from_le_bytes(*s) as u64;
        (0xFFFF_0000_0000_0000 | (0x0001_0001_0001 * y)).to_le_bytes()
    })
}

// ===========================================================================
// Gray+alpha source
// ===========================================================================

pub(super) fn ya_nonpremul_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| [nonpremul_to_premul_u32(ya(s)) as u8])
}

pub(super) fn ya_nonpremul_to_y_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 1], s: &[u8; 2]| {
        [composite_premul_nonpremul_u32(opaque_gray(d[0]), ya(s)) as u8]
    })
}

pub(super) fn ya_nonpremul_to_ya_nonpremul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 2]| {
        let c = composite_nonpremul_nonpremul_u32(ya(d), ya(s));
        [(c >> 16) as u8, (c >> 24) as u8]
    })
}

pub(super) fn ya_nonpremul_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| to_565(nonpremul_to_premul_u32(ya(s))))
}

pub(super) fn ya_nonpremul_to_bgr_565_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 2]| {
        rgb16_to_565(Src16::gray_alpha(s).over_nonpremul(rgb16_from_565(d)))
    })
}

pub(super) fn ya_nonpremul_to_3bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| le3(nonpremul_to_premul_u32(ya(s))))
}

pub(super) fn ya_nonpremul_to_3bpp_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 2]| {
        le3(composite_premul_nonpremul_u32(0xFF000000 | u24le(d), ya(s)))
    })
}

pub(super) fn ya_nonpremul_to_bgra_nonpremul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| ya(s).to_le_bytes())
}

pub(super) fn ya_nonpremul_to_bgra_nonpremul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 2]| {
        composite_nonpremul_nonpremul_u32(u32le(d), ya(s)).to_le_bytes()
    })
}

pub(super) fn ya_nonpremul_to_bgra_premul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| nonpremul_to_premul_u32(ya(s)).to_le_bytes())
}

pub(super) fn ya_nonpremul_to_bgra_premul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 2]| {
        composite_premul_nonpremul_u32(u32le(d), ya(s)).to_le_bytes()
    })
}

pub(super) fn ya_nonpremul_to_bgra_nonpremul_4x16le(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 2]| ya_u64(s).to_le_bytes())
}

pub(super) fn ya_nonpremul_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 2]| {
        composite_nonpremul_nonpremul_u64(u64le(d), ya_u64(s)).to_le_bytes()
    })
}

// ===========================================================================
// Indexed sources
// ===========================================================================

pub(super) fn index_to_y(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |_: &[u8; 1], p| [p[0]])
}

pub(super) fn index_to_y_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 1], p| {
        gray8(composite_premul_nonpremul_u32(opaque_gray(d[0]), u32le(p)))
    })
}

pub(super) fn index_to_y_binary_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 1], p| binary(d, p, |p| [p[0]]))
}

pub(super) fn index_to_bgr_565(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |_: &[u8; 2], p| [p[0], p[1]])
}

pub(super) fn index_to_bgr_565_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 2], p| {
        to_565(composite_premul_nonpremul_u32(from_565(d), u32le(p)))
    })
}

pub(super) fn index_to_bgr_565_binary_over(
    dst: &mut [u8],
    dst_palette: &[u8],
    src: &[u8],
) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 2], p| binary(d, p, |p| [p[0], p[1]]))
}

pub(super) fn index_to_3bpp(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |_: &[u8; 3], p| [p[0], p[1], p[2]])
}

pub(super) fn index_to_3bpp_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 3], p| {
        le3(composite_premul_nonpremul_u32(0xFF000000 | u24le(d), u32le(p)))
    })
}

pub(super) fn index_to_3bpp_binary_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 3], p| binary(d, p, |p| [p[0], p[1], p[2]]))
}

pub(super) fn index_to_4bpp(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |_: &[u8; 4], p| *p)
}

pub(super) fn index_to_4bpp_binary_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 4], p| binary(d, p, |p| *p))
}

pub(super) fn index_to_bgra_nonpremul_over(
    dst: &mut [u8],
    dst_palette: &[u8],
    src: &[u8],
) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 4], p| {
        composite_nonpremul_nonpremul_u32(u32le(d), u32le(p)).to_le_bytes()
    })
}

pub(super) fn index_to_bgra_premul_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 4], p| {
        composite_premul_nonpremul_u32(u32le(d), u32le(p)).to_le_bytes()
    })
}

pub(super) fn index_to_8bpp(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |_: &[u8; 8], p| u32_to_u64(u32le(p)).to_le_bytes())
}

pub(super) fn index_to_8bpp_binary_over(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 8], p| {
        binary(d, p, |p| u32_to_u64(u32le(p)).to_le_bytes())
    })
}

pub(super) fn index_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    dst_palette: &[u8],
    src: &[u8],
) -> usize {
    lookup(dst, dst_palette, src, |d: &[u8; 8], p| {
        composite_nonpremul_nonpremul_u64(u64le(d), u32_to_u64(u32le(p))).to_le_bytes()
    })
}

// ===========================================================================
// Opaque sources
// ===========================================================================

pub(super) fn bgr_565_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| gray8(from_565(s)))
}

pub(super) fn bgr_565_to_bgr(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| le3(from_565(s)))
}

pub(super) fn bgr_565_to_rgb(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| le3(swap_argb_abgr_u32(from_565(s))))
}

pub(super) fn bgr_565_to_bgrw(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| from_565(s).to_le_bytes())
}

pub(super) fn bgr_565_to_rgbw(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| swap_argb_abgr_u32(from_565(s)).to_le_bytes())
}

pub(super) fn bgr_565_to_bgrw_4x16le(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 2]| u32_to_u64(from_565(s)).to_le_bytes())
}

pub(super) fn bgr_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 3]| gray8(0xFF000000 | u24le(s)))
}

pub(super) fn rgb_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 3]| gray8(0xFF000000 | u24be(s)))
}

pub(super) fn bgrx_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| gray8(0xFF000000 | u32le(s)))
}

pub(super) fn bgr_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 3]| to_565(u24le(s)))
}

pub(super) fn rgb_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 3]| to_565(u24be(s)))
}

pub(super) fn bgrx_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| to_565(u32le(s)))
}

pub(super) fn bgr_to_bgrw_4x16le(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 3]| [s[0], s[0], s[1], s[1], s[2], s[2], 0xFF, 0xFF])
}

pub(super) fn rgb_to_bgrw_4x16le(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 3]| [s[2], s[2], s[1], s[1], s[0], s[0], 0xFF, 0xFF])
}

pub(super) fn bgrx_to_bgrw(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| [s[0], s[1], s[2], 0xFF])
}

pub(super) fn bgrx_to_rgbw(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| [s[2], s[1], s[0], 0xFF])
}

pub(super) fn bgrx_to_bgrw_4x16le(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| [s[0], s[0], s[1], s[1], s[2], s[2], 0xFF, 0xFF])
}

// ===========================================================================
// 8-bit non-premultiplied sources
// ===========================================================================

pub(super) fn bgra_nonpremul_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| gray8(nonpremul_to_premul_u32(u32le(s))))
}

pub(super) fn bgra_nonpremul_to_y_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 1], s: &[u8; 4]| {
        gray8(composite_premul_nonpremul_u32(opaque_gray(d[0]), u32le(s)))
    })
}

pub(super) fn rgba_nonpremul_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        gray8(swap_argb_abgr_u32(nonpremul_to_premul_u32(u32le(s))))
    })
}

pub(super) fn rgba_nonpremul_to_y_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 1], s: &[u8; 4]| {
        gray8(composite_premul_nonpremul_u32(
            opaque_gray(d[0]),
            swap_argb_abgr_u32(u32le(s)),
        ))
    })
}

pub(super) fn bgra_nonpremul_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| to_565(nonpremul_to_premul_u32(u32le(s))))
}

pub(super) fn bgra_nonpremul_to_bgr_565_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 4]| {
        rgb16_to_565(Src16::bgra8(s).over_nonpremul(rgb16_from_565(d)))
    })
}

pub(super) fn rgba_nonpremul_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        to_565(swap_argb_abgr_u32(nonpremul_to_premul_u32(u32le(s))))
    })
}

pub(super) fn rgba_nonpremul_to_bgr_565_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 4]| {
        rgb16_to_565(Src16::rgba8(s).over_nonpremul(rgb16_from_565(d)))
    })
}

pub(super) fn bgra_nonpremul_to_bgr(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| le3(nonpremul_to_premul_u32(u32le(s))))
}

pub(super) fn bgra_nonpremul_to_bgr_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 4]| {
        rgb16_to_bgr(Src16::bgra8(s).over_nonpremul(rgb16_from_bgr(d)))
    })
}

/// Also RGBA_NONPREMUL to BGR.
pub(super) fn bgra_nonpremul_to_rgb(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        le3(swap_argb_abgr_u32(nonpremul_to_premul_u32(u32le(s))))
    })
}

pub(super) fn bgra_nonpremul_to_rgb_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 4]| {
        rgb16_to_bgr(Src16::rgba8(s).over_nonpremul(rgb16_from_bgr(d)))
    })
}

pub(super) fn bgra_nonpremul_to_bgra_nonpremul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_nonpremul_nonpremul_u32(u32le(d), u32le(s)).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_to_rgba_nonpremul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_nonpremul_nonpremul_u32(u32le(d), swap_argb_abgr_u32(u32le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_to_bgra_nonpremul_4x16le(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 4]| [s[0], s[0], s[1], s[1], s[2], s[2], s[3], s[3]])
}

pub(super) fn bgra_nonpremul_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 4]| {
        composite_nonpremul_nonpremul_u64(u64le(d), u32_to_u64(u32le(s))).to_le_bytes()
    })
}

pub(super) fn rgba_nonpremul_to_bgra_nonpremul_4x16le(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 4]| [s[2], s[2], s[1], s[1], s[0], s[0], s[3], s[3]])
}

pub(super) fn rgba_nonpremul_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 4]| {
        let s = u32_to_u64(swap_argb_abgr_u32(u32le(s)));
        composite_nonpremul_nonpremul_u64(u64le(d), s).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_to_bgra_premul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| nonpremul_to_premul_u32(u32le(s)).to_le_bytes())
}

pub(super) fn bgra_nonpremul_to_bgra_premul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_premul_nonpremul_u32(u32le(d), u32le(s)).to_le_bytes()
    })
}

/// Also RGBA_NONPREMUL to BGRA_PREMUL.
pub(super) fn bgra_nonpremul_to_rgba_premul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        nonpremul_to_premul_u32(swap_argb_abgr_u32(u32le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_to_rgba_premul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_premul_nonpremul_u32(u32le(d), swap_argb_abgr_u32(u32le(s))).to_le_bytes()
    })
}

// ===========================================================================
// 16-bit non-premultiplied source
// ===========================================================================

pub(super) fn bgra_nonpremul_4x16le_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| [nonpremul_u64_to_gray8(u64le(s))])
}

pub(super) fn bgra_nonpremul_4x16le_to_y_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 1], s: &[u8; 8]| {
        rgb16_to_gray(Src16::bgra16(s).over_nonpremul(rgb16_from_gray(d)))
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| to_565(nonpremul_u64_to_premul_u32(u64le(s))))
}

pub(super) fn bgra_nonpremul_4x16le_to_bgr_565_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 8]| {
        rgb16_to_565(Src16::bgra16(s).over_nonpremul(rgb16_from_565(d)))
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_bgr(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| le3(nonpremul_u64_to_premul_u32(u64le(s))))
}

pub(super) fn bgra_nonpremul_4x16le_to_bgr_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 8]| {
        rgb16_to_bgr(Src16::bgra16(s).over_nonpremul(rgb16_from_bgr(d)))
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_rgb(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| {
        le3(swap_argb_abgr_u32(nonpremul_u64_to_premul_u32(u64le(s))))
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_rgb_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 8]| {
        rgb16_to_bgr(Src16::rgba16(s).over_nonpremul(rgb16_from_bgr(d)))
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_bgra_nonpremul(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 8]| u64_to_u32(u64le(s)).to_le_bytes())
}

pub(super) fn bgra_nonpremul_4x16le_to_bgra_nonpremul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let c = composite_nonpremul_nonpremul_u64(u32_to_u64(u32le(d)), u64le(s));
        u64_to_u32(c).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_rgba_nonpremul(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 8]| u64_to_u32_swapped(u64le(s)).to_le_bytes())
}

pub(super) fn bgra_nonpremul_4x16le_to_rgba_nonpremul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let s = swap_argb_abgr_u64(u64le(s));
        u64_to_u32(composite_nonpremul_nonpremul_u64(u32_to_u64(u32le(d)), s)).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 8]| {
        composite_nonpremul_nonpremul_u64(u64le(d), u64le(s)).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_bgra_premul(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 8]| nonpremul_u64_to_premul_u32(u64le(s)).to_le_bytes())
}

pub(super) fn bgra_nonpremul_4x16le_to_bgra_premul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let c = composite_premul_nonpremul_u64(u32_to_u64(u32le(d)), u64le(s));
        u64_to_u32(c).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_rgba_premul(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 8]| {
        swap_argb_abgr_u32(nonpremul_u64_to_premul_u32(u64le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_nonpremul_4x16le_to_rgba_premul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let s = swap_argb_abgr_u64(u64le(s));
        u64_to_u32(composite_premul_nonpremul_u64(u32_to_u64(u32le(d)), s)).to_le_bytes()
    })
}

// ===========================================================================
// 8-bit premultiplied sources (BGRA_BINARY reads as premultiplied)
// ===========================================================================

pub(super) fn bgra_premul_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| gray8(u32le(s)))
}

pub(super) fn bgra_premul_to_y_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 1], s: &[u8; 4]| {
        rgb16_to_gray(Src16::bgra8(s).over_premul(rgb16_from_gray(d)))
    })
}

pub(super) fn rgba_premul_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| gray8(swap_argb_abgr_u32(u32le(s))))
}

pub(super) fn rgba_premul_to_y_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 1], s: &[u8; 4]| {
        gray8(composite_premul_premul_u32(
            opaque_gray(d[0]),
            swap_argb_abgr_u32(u32le(s)),
        ))
    })
}

pub(super) fn bgra_premul_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| to_565(u32le(s)))
}

pub(super) fn bgra_premul_to_bgr_565_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 4]| {
        rgb16_to_565(Src16::bgra8(s).over_premul(rgb16_from_565(d)))
    })
}

pub(super) fn rgba_premul_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| to_565(swap_argb_abgr_u32(u32le(s))))
}

pub(super) fn rgba_premul_to_bgr_565_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 4]| {
        rgb16_to_565(Src16::rgba8(s).over_premul(rgb16_from_565(d)))
    })
}

pub(super) fn bgra_premul_to_bgr(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| [s[0], s[1], s[2]])
}

pub(super) fn bgra_premul_to_bgr_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 4]| {
        rgb16_to_bgr(Src16::bgra8(s).over_premul(rgb16_from_bgr(d)))
    })
}

/// Also RGBA_PREMUL to BGR.
pub(super) fn bgra_premul_to_rgb(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| [s[2], s[1], s[0]])
}

pub(super) fn bgra_premul_to_rgb_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 4]| {
        rgb16_to_bgr(Src16::rgba8(s).over_premul(rgb16_from_bgr(d)))
    })
}

pub(super) fn bgra_premul_to_bgra_nonpremul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| premul_to_nonpremul_u32(u32le(s)).to_le_bytes())
}

pub(super) fn bgra_premul_to_bgra_nonpremul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_nonpremul_premul_u32(u32le(d), u32le(s)).to_le_bytes()
    })
}

/// Also RGBA_PREMUL to BGRA_NONPREMUL.
pub(super) fn bgra_premul_to_rgba_nonpremul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        premul_to_nonpremul_u32(swap_argb_abgr_u32(u32le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_premul_to_rgba_nonpremul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_nonpremul_premul_u32(u32le(d), swap_argb_abgr_u32(u32le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_premul_to_bgra_nonpremul_4x16le(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        u32_to_u64(premul_to_nonpremul_u32(u32le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_premul_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 4]| {
        composite_nonpremul_premul_u64(u64le(d), u32_to_u64(u32le(s))).to_le_bytes()
    })
}

pub(super) fn rgba_premul_to_bgra_nonpremul_4x16le(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        u32_to_u64(premul_to_nonpremul_u32(swap_argb_abgr_u32(u32le(s)))).to_le_bytes()
    })
}

pub(super) fn rgba_premul_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 4]| {
        let s = u32_to_u64(swap_argb_abgr_u32(u32le(s)));
        composite_nonpremul_premul_u64(u64le(d), s).to_le_bytes()
    })
}

pub(super) fn bgra_premul_to_bgra_premul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_premul_premul_u32(u32le(d), u32le(s)).to_le_bytes()
    })
}

pub(super) fn bgra_premul_to_rgba_premul_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 4]| {
        composite_premul_premul_u32(u32le(d), swap_argb_abgr_u32(u32le(s))).to_le_bytes()
    })
}

// ===========================================================================
// 16-bit premultiplied source
// ===========================================================================

pub(super) fn bgra_premul_4x16le_to_y(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| [premul_u64_to_gray8(u64le(s))])
}

pub(super) fn bgra_premul_4x16le_to_y_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 1], s: &[u8; 8]| {
        rgb16_to_gray(Src16::bgra16(s).over_premul(rgb16_from_gray(d)))
    })
}

pub(super) fn bgra_premul_4x16le_to_bgr_565(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| to_565(u64_to_u32(u64le(s))))
}

pub(super) fn bgra_premul_4x16le_to_bgr_565_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 2], s: &[u8; 8]| {
        rgb16_to_565(Src16::bgra16(s).over_premul(rgb16_from_565(d)))
    })
}

pub(super) fn bgra_premul_4x16le_to_bgr(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| le3(u64_to_u32(u64le(s))))
}

pub(super) fn bgra_premul_4x16le_to_bgr_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 8]| {
        rgb16_to_bgr(Src16::bgra16(s).over_premul(rgb16_from_bgr(d)))
    })
}

pub(super) fn bgra_premul_4x16le_to_rgb(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| le3(u64_to_u32_swapped(u64le(s))))
}

pub(super) fn bgra_premul_4x16le_to_rgb_over(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    blend(dst, src, |d: &[u8; 3], s: &[u8; 8]| {
        rgb16_to_bgr(Src16::rgba16(s).over_premul(rgb16_from_bgr(d)))
    })
}

pub(super) fn bgra_premul_4x16le_to_bgra_nonpremul(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 8]| {
        u64_to_u32(premul_to_nonpremul_u64(u64le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_premul_4x16le_to_bgra_nonpremul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let c = composite_nonpremul_premul_u64(u32_to_u64(u32le(d)), u64le(s));
        u64_to_u32(c).to_le_bytes()
    })
}

pub(super) fn bgra_premul_4x16le_to_rgba_nonpremul(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 8]| {
        u64_to_u32_swapped(premul_to_nonpremul_u64(u64le(s))).to_le_bytes()
    })
}

pub(super) fn bgra_premul_4x16le_to_rgba_nonpremul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let s = swap_argb_abgr_u64(u64le(s));
        u64_to_u32(composite_nonpremul_premul_u64(u32_to_u64(u32le(d)), s)).to_le_bytes()
    })
}

pub(super) fn bgra_premul_4x16le_to_bgra_nonpremul_4x16le(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    convert(dst, src, |s: &[u8; 8]| premul_to_nonpremul_u64(u64le(s)).to_le_bytes())
}

pub(super) fn bgra_premul_4x16le_to_bgra_nonpremul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 8]| {
        composite_nonpremul_premul_u64(u64le(d), u64le(s)).to_le_bytes()
    })
}

pub(super) fn bgra_premul_4x16le_to_bgra_premul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| u64_to_u32(u64le(s)).to_le_bytes())
}

pub(super) fn bgra_premul_4x16le_to_bgra_premul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let c = composite_premul_premul_u64(u32_to_u64(u32le(d)), u64le(s));
        u64_to_u32(c).to_le_bytes()
    })
}

pub(super) fn bgra_premul_4x16le_to_rgba_premul(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    convert(dst, src, |s: &[u8; 8]| u64_to_u32_swapped(u64le(s)).to_le_bytes())
}

pub(super) fn bgra_premul_4x16le_to_rgba_premul_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 4], s: &[u8; 8]| {
        let s = swap_argb_abgr_u64(u64le(s));
        u64_to_u32(composite_premul_premul_u64(u32_to_u64(u32le(d)), s)).to_le_bytes()
    })
}

pub(super) fn bgra_premul_4x16le_to_bgra_premul_4x16le_over(
    dst: &mut [u8],
    _: &[u8],
    src: &[u8],
) -> usize {
    blend(dst, src, |d: &[u8; 8], s: &[u8; 8]| {
        composite_premul_premul_u64(u64le(d), u64le(s)).to_le_bytes()
    })
}

// ===========================================================================
// Palette transcoding
// ===========================================================================

/// Packs each entry's 565 color into its low two bytes, keeping alpha in the
/// top byte. Entries are premultiplied first when `premultiply` is set.
pub(super) fn squash_palette_to_bgr_565(dst: &mut [u8], src: &[u8], premultiply: bool) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        let mut argb = u32le(s);
        if premultiply {
            argb = nonpremul_to_premul_u32(argb);
        }
        ((argb & 0xFF000000) | argb_to_rgb565(argb) as u32).to_le_bytes()
    })
}

/// Replaces each entry's color with its gray level, keeping alpha.
pub(super) fn squash_palette_to_y(dst: &mut [u8], src: &[u8], premultiply: bool) -> usize {
    convert(dst, src, |s: &[u8; 4]| {
        let mut argb = u32le(s);
        if premultiply {
            argb = nonpremul_to_premul_u32(argb);
        }
        ((argb & 0xFF000000) | (0x010101 * premul_u32_to_gray8(argb) as u32)).to_le_bytes()
    })
}

// ===========================================================================
// Scalar row implementations of the accelerated leaves
// ===========================================================================

pub(super) fn swap_rgbx_bgrx_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[2], s[1], s[0], s[3]]);
    }
}

pub(super) fn bgr_to_bgrw_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[0], s[1], s[2], 0xFF]);
    }
}

pub(super) fn rgb_to_bgrw_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[2], s[1], s[0], 0xFF]);
    }
}

pub(super) fn y_to_4bpp_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (&y, d) in src.iter().zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[y, y, y, 0xFF]);
    }
}

pub(super) fn swap_rgb_bgr_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

pub(super) fn bgrx_to_bgr_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        d.copy_from_slice(&s[..3]);
    }
}

pub(super) fn bgrx_to_rgb_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
    }
}

// ===========================================================================
// Scalar contiguous wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn swap_rgbx_bgrx_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    swap_rgbx_bgrx_row_scalar(t, s, d);
}
pub(super) fn bgr_to_bgrw_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    bgr_to_bgrw_row_scalar(t, s, d);
}
pub(super) fn rgb_to_bgrw_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    rgb_to_bgrw_row_scalar(t, s, d);
}
pub(super) fn y_to_4bpp_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    y_to_4bpp_row_scalar(t, s, d);
}
pub(super) fn swap_rgb_bgr_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    swap_rgb_bgr_row_scalar(t, s, d);
}
pub(super) fn bgrx_to_bgr_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    bgrx_to_bgr_row_scalar(t, s, d);
}
pub(super) fn bgrx_to_rgb_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    bgrx_to_rgb_row_scalar(t, s, d);
}
