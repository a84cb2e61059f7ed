//! Color value model.
//!
//! A `u32` color is `0xAARRGGBB` with 8 bits per channel. A `u64` color is
//! `0xAAAARRRRGGGGBBBB` with 16 bits per channel. Unless a function name says
//! otherwise, colors are premultiplied.
//!
//! All arithmetic is 16-bit fixed point: 8-bit channels are widened by
//! multiplying by `0x101`, and divisions round toward zero. Intermediate
//! sums wrap the same way the 32-bit fixed point math always has, so
//! out-of-range inputs (e.g. a "premultiplied" color whose red exceeds its
//! alpha) produce deterministic garbage instead of a panic.

/// Red weight for luma, out of `1 << 16`. Same fractions as JFIF.
pub const LUMA_R: u32 = 19595;
/// Green weight for luma, out of `1 << 16`.
pub const LUMA_G: u32 = 38470;
/// Blue weight for luma, out of `1 << 16`.
pub const LUMA_B: u32 = 7471;

const LUMA_BIAS: u32 = 32768;

#[inline(always)]
pub(crate) fn luma16(r16: u32, g16: u32, b16: u32) -> u32 {
    LUMA_R
        .wrapping_mul(r16)
        .wrapping_add(LUMA_G.wrapping_mul(g16))
        .wrapping_add(LUMA_B.wrapping_mul(b16))
        .wrapping_add(LUMA_BIAS)
}

/// Whether `c` is a valid premultiplied color: alpha is at least every
/// color channel.
#[inline]
pub fn is_valid_premul(c: u32) -> bool {
    let a = 0xFF & (c >> 24);
    let r = 0xFF & (c >> 16);
    let g = 0xFF & (c >> 8);
    let b = 0xFF & c;
    a >= r && a >= g && a >= b
}

// ===========================================================================
// RGB 565
// ===========================================================================

/// Truncates to 5/6/5 bits. Alpha is ignored.
#[inline]
pub fn argb_to_rgb565(c: u32) -> u16 {
    let r5 = 0xF800 & (c >> 8);
    let g6 = 0x07E0 & (c >> 5);
    let b5 = 0x001F & (c >> 3);
    (r5 | g6 | b5) as u16
}

/// Expands 5/6/5 bits by bit replication, so 0x1F becomes 0xFF. Opaque.
#[inline]
pub fn rgb565_to_argb(rgb_565: u16) -> u32 {
    let v = rgb_565 as u32;
    let b5 = 0x1F & v;
    let b = (b5 << 3) | (b5 >> 2);
    let g6 = 0x3F & (v >> 5);
    let g = (g6 << 2) | (g6 >> 4);
    let r5 = 0x1F & (v >> 11);
    let r = (r5 << 3) | (r5 >> 2);
    0xFF000000 | (r << 16) | (g << 8) | b
}

// ===========================================================================
// Gray
// ===========================================================================

#[inline]
pub fn premul_u32_to_gray8(c: u32) -> u8 {
    let cr = 0x101 * (0xFF & (c >> 16));
    let cg = 0x101 * (0xFF & (c >> 8));
    let cb = 0x101 * (0xFF & c);
    (luma16(cr, cg, cb) >> 24) as u8
}

#[inline]
pub fn premul_u32_to_gray16(c: u32) -> u16 {
    let cr = 0x101 * (0xFF & (c >> 16));
    let cg = 0x101 * (0xFF & (c >> 8));
    let cb = 0x101 * (0xFF & c);
    (luma16(cr, cg, cb) >> 16) as u16
}

/// Non-premultiplied 8-bit alpha (high byte) and 8-bit gray (low byte).
/// Transparent black for alpha 0.
#[inline]
pub fn premul_u32_to_alpha_gray_nonpremul(c: u32) -> u16 {
    let a = 0xFF & (c >> 24);
    if a == 0 {
        return 0;
    }
    let a16 = a * 0x101;
    let unpremul = |ch: u32| ch.wrapping_mul(0x101 * 0xFFFF) / a16;
    let cr = unpremul(0xFF & (c >> 16));
    let cg = unpremul(0xFF & (c >> 8));
    let cb = unpremul(0xFF & c);
    ((a16 & 0xFF00) | (luma16(cr, cg, cb) >> 24)) as u16
}

#[inline]
pub fn premul_u64_to_gray8(c: u64) -> u8 {
    let r16 = (0xFFFF & (c >> 32)) as u32;
    let g16 = (0xFFFF & (c >> 16)) as u32;
    let b16 = (0xFFFF & c) as u32;
    (luma16(r16, g16, b16) >> 24) as u8
}

#[inline]
pub fn nonpremul_u64_to_gray8(c: u64) -> u8 {
    let a16 = (0xFFFF & (c >> 48)) as u32;
    let r16 = (0xFFFF & (c >> 32)) as u32 * a16 / 0xFFFF;
    let g16 = (0xFFFF & (c >> 16)) as u32 * a16 / 0xFFFF;
    let b16 = (0xFFFF & c) as u32 * a16 / 0xFFFF;
    (luma16(r16, g16, b16) >> 24) as u8
}

// ===========================================================================
// Premultiplication
// ===========================================================================

#[inline]
pub fn nonpremul_to_premul_u32(c: u32) -> u32 {
    let a = 0xFF & (c >> 24);
    let a16 = a * (0x101 * 0x101);
    let r = ((0xFF & (c >> 16)) * a16 / 0xFFFF) >> 8;
    let g = ((0xFF & (c >> 8)) * a16 / 0xFFFF) >> 8;
    let b = ((0xFF & c) * a16 / 0xFFFF) >> 8;
    (a << 24) | (r << 16) | (g << 8) | b
}

#[inline]
pub fn premul_to_nonpremul_u32(c: u32) -> u32 {
    let a = 0xFF & (c >> 24);
    if a == 0xFF {
        return c;
    } else if a == 0 {
        return 0;
    }
    let a16 = a * 0x101;
    let unpremul = |ch: u32| (ch.wrapping_mul(0x101 * 0xFFFF) / a16) >> 8;
    let r = unpremul(0xFF & (c >> 16));
    let g = unpremul(0xFF & (c >> 8));
    let b = unpremul(0xFF & c);
    (a << 24) | (r << 16) | (g << 8) | b
}

#[inline]
pub fn nonpremul_to_premul_u64(c: u64) -> u64 {
    let a = 0xFFFF & (c >> 48);
    let r = (0xFFFF & (c >> 32)) * a / 0xFFFF;
    let g = (0xFFFF & (c >> 16)) * a / 0xFFFF;
    let b = (0xFFFF & c) * a / 0xFFFF;
    (a << 48) | (r << 32) | (g << 16) | b
}

#[inline]
pub fn premul_to_nonpremul_u64(c: u64) -> u64 {
    let a = 0xFFFF & (c >> 48);
    if a == 0xFFFF {
        return c;
    } else if a == 0 {
        return 0;
    }
    let r = (0xFFFF & (c >> 32)) * 0xFFFF / a;
    let g = (0xFFFF & (c >> 16)) * 0xFFFF / a;
    let b = (0xFFFF & c) * 0xFFFF / a;
    (a << 48) | (r << 32) | (g << 16) | b
}

/// 4x16 non-premultiplied to 4x8 premultiplied.
#[inline]
pub fn nonpremul_u64_to_premul_u32(c: u64) -> u32 {
    let a16 = (0xFFFF & (c >> 48)) as u32;
    let r16 = (0xFFFF & (c >> 32)) as u32 * a16 / 0xFFFF;
    let g16 = (0xFFFF & (c >> 16)) as u32 * a16 / 0xFFFF;
    let b16 = (0xFFFF & c) as u32 * a16 / 0xFFFF;
    ((a16 >> 8) << 24) | ((r16 >> 8) << 16) | ((g16 >> 8) << 8) | (b16 >> 8)
}

/// 4x8 premultiplied to 4x16 non-premultiplied.
#[inline]
pub fn premul_u32_to_nonpremul_u64(c: u32) -> u64 {
    let a = 0xFF & (c >> 24) as u64;
    if a == 0xFF {
        let r16 = 0x101 * (0xFF & (c >> 16)) as u64;
        let g16 = 0x101 * (0xFF & (c >> 8)) as u64;
        let b16 = 0x101 * (0xFF & c) as u64;
        return 0xFFFF_0000_0000_0000 | (r16 << 32) | (g16 << 16) | b16;
    } else if a == 0 {
        return 0;
    }
    let a16 = a * 0x101;
    let r16 = (0xFF & (c >> 16)) as u64 * (0x101 * 0xFFFF) / a16;
    let g16 = (0xFF & (c >> 8)) as u64 * (0x101 * 0xFFFF) / a16;
    let b16 = (0xFF & c) as u64 * (0x101 * 0xFFFF) / a16;
    (a16 << 48) | (r16 << 32) | (g16 << 16) | b16
}

// ===========================================================================
// Bit depth and channel order
// ===========================================================================

/// Widens every channel by `0x101`.
#[inline]
pub fn u32_to_u64(c: u32) -> u64 {
    let a16 = 0x101 * (0xFF & (c >> 24)) as u64;
    let r16 = 0x101 * (0xFF & (c >> 16)) as u64;
    let g16 = 0x101 * (0xFF & (c >> 8)) as u64;
    let b16 = 0x101 * (0xFF & c) as u64;
    (a16 << 48) | (r16 << 32) | (g16 << 16) | b16
}

/// Keeps the high byte of every channel.
#[inline]
pub fn u64_to_u32(c: u64) -> u32 {
    let a = (0xFF & (c >> 56)) as u32;
    let r = (0xFF & (c >> 40)) as u32;
    let g = (0xFF & (c >> 24)) as u32;
    let b = (0xFF & (c >> 8)) as u32;
    (a << 24) | (r << 16) | (g << 8) | b
}

/// [`u64_to_u32`] followed by [`swap_argb_abgr_u32`].
#[inline]
pub fn u64_to_u32_swapped(c: u64) -> u32 {
    let a = (0xFF & (c >> 56)) as u32;
    let r = (0xFF & (c >> 40)) as u32;
    let g = (0xFF & (c >> 24)) as u32;
    let b = (0xFF & (c >> 8)) as u32;
    (a << 24) | (b << 16) | (g << 8) | r
}

/// Swaps the red and blue channels.
#[inline]
pub fn swap_argb_abgr_u32(u: u32) -> u32 {
    let o = u & 0xFF00FF00;
    let r = u & 0x00FF0000;
    let b = u & 0x000000FF;
    o | (r >> 16) | (b << 16)
}

#[inline]
pub fn swap_argb_abgr_u64(u: u64) -> u64 {
    let o = u & 0xFFFF_0000_FFFF_0000;
    let r = u & 0x0000_FFFF_0000_0000;
    let b = u & 0x0000_0000_0000_FFFF;
    o | (r >> 32) | (b << 32)
}

// ===========================================================================
// YCbCr
// ===========================================================================

// 16.16 fixed point:
//
//  R = Y                + 1.40200 * Cr
//  G = Y - 0.34414 * Cb - 0.71414 * Cr
//  B = Y + 1.77200 * Cb
#[inline(always)]
fn ycc_channels(yy: u8, cb: u8, cr: u8) -> (u32, u32, u32) {
    let yy32 = ((yy as u32) << 16) | (1 << 15);
    let cb32 = (cb as u32).wrapping_sub(0x80);
    let cr32 = (cr as u32).wrapping_sub(0x80);
    let rr32 = yy32.wrapping_add(0x166E9u32.wrapping_mul(cr32));
    let gg32 = yy32
        .wrapping_sub(0x0581Au32.wrapping_mul(cb32))
        .wrapping_sub(0x0B6D2u32.wrapping_mul(cr32));
    let bb32 = yy32.wrapping_add(0x1C5A2u32.wrapping_mul(cb32));
    (clamp_16_16(rr32), clamp_16_16(gg32), clamp_16_16(bb32))
}

// Saturates to 0 on underflow (sign bit set) and to 0xFFFFFFFF on overflow.
#[inline(always)]
fn clamp_16_16(x: u32) -> u32 {
    if x >> 24 != 0 {
        !(((x as i32) >> 31) as u32)
    } else {
        x
    }
}

/// YCbCr (JFIF) to opaque `0xAARRGGBB`.
#[inline]
pub fn ycc_to_argb(yy: u8, cb: u8, cr: u8) -> u32 {
    let (r, g, b) = ycc_channels(yy, cb, cr);
    0xFF000000 | (0x00FF0000 & r) | ((0x00FF0000 & g) >> 8) | ((0x00FF0000 & b) >> 16)
}

/// Like [`ycc_to_argb`] but in `0xAABBGGRR` order.
#[inline]
pub fn ycc_to_abgr(yy: u8, cb: u8, cr: u8) -> u32 {
    let (r, g, b) = ycc_channels(yy, cb, cr);
    0xFF000000 | (0x00FF0000 & b) | ((0x00FF0000 & g) >> 8) | ((0x00FF0000 & r) >> 16)
}

// ===========================================================================
// SRC_OVER compositing
// ===========================================================================
//
// `composite_<dst>_<src>`: each pairing converts the destination to
// premultiplied form, blends, and converts back. The u32 variants work in
// 16-bit color and narrow with `>> 8` at the end.

#[inline(always)]
fn split_u32(c: u32) -> [u32; 4] {
    [
        0x101 * (0xFF & (c >> 24)),
        0x101 * (0xFF & (c >> 16)),
        0x101 * (0xFF & (c >> 8)),
        0x101 * (0xFF & c),
    ]
}

#[inline(always)]
fn split_u64(c: u64) -> [u64; 4] {
    [
        0xFFFF & (c >> 48),
        0xFFFF & (c >> 32),
        0xFFFF & (c >> 16),
        0xFFFF & c,
    ]
}

#[inline(always)]
fn join_u32([a, r, g, b]: [u32; 4]) -> u32 {
    (b >> 8) | ((g >> 8) << 8) | ((r >> 8) << 16) | ((a >> 8) << 24)
}

#[inline(always)]
fn join_u64([a, r, g, b]: [u64; 4]) -> u64 {
    b | (g << 16) | (r << 32) | (a << 48)
}

/// Non-premultiplied source over non-premultiplied destination. A fully
/// transparent destination yields the source unchanged, keeping the color of
/// transparent source pixels.
#[inline]
pub fn composite_nonpremul_nonpremul_u32(dst: u32, src: u32) -> u32 {
    let [mut da, dr, dg, db] = split_u32(dst);
    if da == 0 {
        return src;
    }
    let [sa, sr, sg, sb] = split_u32(src);
    let (dr, dg, db) = (dr * da / 0xFFFF, dg * da / 0xFFFF, db * da / 0xFFFF);
    let ia = 0xFFFF - sa;
    da = sa + da * ia / 0xFFFF;
    let mut c = [
        (sr * sa + dr * ia) / 0xFFFF,
        (sg * sa + dg * ia) / 0xFFFF,
        (sb * sa + db * ia) / 0xFFFF,
    ];
    if da != 0 {
        for ch in &mut c {
            *ch = ch.wrapping_mul(0xFFFF) / da;
        }
    }
    join_u32([da, c[0], c[1], c[2]])
}

#[inline]
pub fn composite_nonpremul_nonpremul_u64(dst: u64, src: u64) -> u64 {
    let [mut da, dr, dg, db] = split_u64(dst);
    if da == 0 {
        return src;
    }
    let [sa, sr, sg, sb] = split_u64(src);
    let (dr, dg, db) = (dr * da / 0xFFFF, dg * da / 0xFFFF, db * da / 0xFFFF);
    let ia = 0xFFFF - sa;
    da = sa + da * ia / 0xFFFF;
    let mut c = [
        (sr * sa + dr * ia) / 0xFFFF,
        (sg * sa + dg * ia) / 0xFFFF,
        (sb * sa + db * ia) / 0xFFFF,
    ];
    if da != 0 {
        for ch in &mut c {
            *ch = *ch * 0xFFFF / da;
        }
    }
    join_u64([da, c[0], c[1], c[2]])
}

/// Premultiplied source over non-premultiplied destination.
#[inline]
pub fn composite_nonpremul_premul_u32(dst: u32, src: u32) -> u32 {
    let [mut da, dr, dg, db] = split_u32(dst);
    let [sa, sr, sg, sb] = split_u32(src);
    let (dr, dg, db) = (dr * da / 0xFFFF, dg * da / 0xFFFF, db * da / 0xFFFF);
    let ia = 0xFFFF - sa;
    da = sa + da * ia / 0xFFFF;
    let mut c = [
        sr + dr * ia / 0xFFFF,
        sg + dg * ia / 0xFFFF,
        sb + db * ia / 0xFFFF,
    ];
    if da != 0 {
        for ch in &mut c {
            *ch = ch.wrapping_mul(0xFFFF) / da;
        }
    }
    join_u32([da, c[0], c[1], c[2]])
}

#[inline]
pub fn composite_nonpremul_premul_u64(dst: u64, src: u64) -> u64 {
    let [mut da, dr, dg, db] = split_u64(dst);
    let [sa, sr, sg, sb] = split_u64(src);
    let (dr, dg, db) = (dr * da / 0xFFFF, dg * da / 0xFFFF, db * da / 0xFFFF);
    let ia = 0xFFFF - sa;
    da = sa + da * ia / 0xFFFF;
    let mut c = [
        sr + dr * ia / 0xFFFF,
        sg + dg * ia / 0xFFFF,
        sb + db * ia / 0xFFFF,
    ];
    if da != 0 {
        for ch in &mut c {
            *ch = *ch * 0xFFFF / da;
        }
    }
    join_u64([da, c[0], c[1], c[2]])
}

/// Non-premultiplied source over premultiplied destination.
#[inline]
pub fn composite_premul_nonpremul_u32(dst: u32, src: u32) -> u32 {
    let [da, dr, dg, db] = split_u32(dst);
    let [sa, sr, sg, sb] = split_u32(src);
    let ia = 0xFFFF - sa;
    join_u32([
        sa + da * ia / 0xFFFF,
        (sr * sa + dr * ia) / 0xFFFF,
        (sg * sa + dg * ia) / 0xFFFF,
        (sb * sa + db * ia) / 0xFFFF,
    ])
}

#[inline]
pub fn composite_premul_nonpremul_u64(dst: u64, src: u64) -> u64 {
    let [da, dr, dg, db] = split_u64(dst);
    let [sa, sr, sg, sb] = split_u64(src);
    let ia = 0xFFFF - sa;
    join_u64([
        sa + da * ia / 0xFFFF,
        (sr * sa + dr * ia) / 0xFFFF,
        (sg * sa + dg * ia) / 0xFFFF,
        (sb * sa + db * ia) / 0xFFFF,
    ])
}

/// Premultiplied source over premultiplied destination.
#[inline]
pub fn composite_premul_premul_u32(dst: u32, src: u32) -> u32 {
    let [da, dr, dg, db] = split_u32(dst);
    let [sa, sr, sg, sb] = split_u32(src);
    let ia = 0xFFFF - sa;
    join_u32([
        sa + da * ia / 0xFFFF,
        sr + dr * ia / 0xFFFF,
        sg + dg * ia / 0xFFFF,
        sb + db * ia / 0xFFFF,
    ])
}

#[inline]
pub fn composite_premul_premul_u64(dst: u64, src: u64) -> u64 {
    let [da, dr, dg, db] = split_u64(dst);
    let [sa, sr, sg, sb] = split_u64(src);
    let ia = 0xFFFF - sa;
    join_u64([
        sa + da * ia / 0xFFFF,
        sr + dr * ia / 0xFFFF,
        sg + dg * ia / 0xFFFF,
        sb + db * ia / 0xFFFF,
    ])
}
