// ---------------------------------------------------------------------------
// Pixel swizzler: converts a run of interleaved pixels from one format to
// another, optionally compositing with SRC_OVER.
//
// Architecture: `prepare` matches (src, dst, blend) to a leaf routine in
// dispatch.rs. Leaves are plain fns over byte slices; most are scalar, and
// the byte-shuffle leaves dispatch via incant! to #[arcane] wrappers around
// #[rite] row kernels.
// ---------------------------------------------------------------------------

use archmage::incant;

use crate::Error;
use crate::format::{PALETTE_BYTE_LENGTH, PixelBlend, PixelFormat};

mod dispatch;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;

#[cfg(test)]
mod tests;

/// A leaf routine: converts `n` pixels from `src` into `dst` and returns `n`.
pub(crate) type SwizzleFn = fn(dst: &mut [u8], dst_palette: &[u8], src: &[u8]) -> usize;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Routine {
    name: &'static str,
    func: SwizzleFn,
}

// ===========================================================================
// Destination allow-list
// ===========================================================================

// Every format some routine writes. Bit 31 stands for all other formats.
const DST_FORMATS: [PixelFormat; 22] = [
    PixelFormat::Y,
    PixelFormat::Y_16LE,
    PixelFormat::Y_16BE,
    PixelFormat::YA_NONPREMUL,
    PixelFormat::INDEXED_BGRA_NONPREMUL,
    PixelFormat::INDEXED_BGRA_PREMUL,
    PixelFormat::INDEXED_BGRA_BINARY,
    PixelFormat::BGR_565,
    PixelFormat::BGR,
    PixelFormat::BGRA_NONPREMUL,
    PixelFormat::BGRA_NONPREMUL_4X16LE,
    PixelFormat::BGRA_PREMUL,
    PixelFormat::BGRA_PREMUL_4X16LE,
    PixelFormat::BGRA_BINARY,
    PixelFormat::BGRX,
    PixelFormat::RGB,
    PixelFormat::RGBA_NONPREMUL,
    PixelFormat::RGBA_NONPREMUL_4X16LE,
    PixelFormat::RGBA_PREMUL,
    PixelFormat::RGBA_PREMUL_4X16LE,
    PixelFormat::RGBA_BINARY,
    PixelFormat::RGBX,
];

const fn dst_bit(format: PixelFormat) -> u32 {
    let mut i = 0;
    while i < DST_FORMATS.len() {
        if DST_FORMATS[i].repr() == format.repr() {
            return 1 << i;
        }
        i += 1;
    }
    1 << 31
}

/// The set of destination formats [`PixelSwizzler`] may prepare for.
///
/// Destinations outside the list fail with
/// [`Error::DisabledByConfiguration`], so a caller can rule out formats it
/// never wants to produce.
///
/// ```
/// use pixconv::{DstAllowList, PixelFormat};
///
/// let list = DstAllowList::NONE
///     .with(PixelFormat::RGBA_PREMUL)
///     .with(PixelFormat::BGRA_PREMUL);
/// assert!(list.contains(PixelFormat::RGBA_PREMUL));
/// assert!(!list.contains(PixelFormat::Y));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DstAllowList(u32);

impl DstAllowList {
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    /// The list the `dst-allowlist` feature enforces.
    pub const RESTRICTED: Self = Self::NONE
        .with(PixelFormat::Y)
        .with(PixelFormat::BGR_565)
        .with(PixelFormat::BGR)
        .with(PixelFormat::BGRA_NONPREMUL)
        .with(PixelFormat::BGRA_NONPREMUL_4X16LE)
        .with(PixelFormat::BGRA_PREMUL)
        .with(PixelFormat::RGB)
        .with(PixelFormat::RGBA_NONPREMUL)
        .with(PixelFormat::RGBA_PREMUL);

    /// The list [`PixelSwizzler::prepare`] uses: [`RESTRICTED`](Self::RESTRICTED)
    /// with the `dst-allowlist` feature, [`ALL`](Self::ALL) without.
    pub const BUILD: Self = if cfg!(feature = "dst-allowlist") {
        Self::RESTRICTED
    } else {
        Self::ALL
    };

    #[must_use]
    pub const fn with(self, format: PixelFormat) -> Self {
        Self(self.0 | dst_bit(format))
    }

    #[must_use]
    pub const fn without(self, format: PixelFormat) -> Self {
        Self(self.0 & !dst_bit(format))
    }

    pub const fn contains(self, format: PixelFormat) -> bool {
        self.0 & dst_bit(format) != 0
    }
}

impl Default for DstAllowList {
    fn default() -> Self {
        Self::BUILD
    }
}

// ===========================================================================
// PixelSwizzler
// ===========================================================================

/// Converts interleaved pixels between formats.
///
/// A swizzler starts unprepared; every swizzle call on it converts nothing
/// and returns 0. [`prepare`](Self::prepare) picks a conversion routine, and
/// the swizzle calls then convert as many whole pixels as both slices hold.
///
/// ```
/// use pixconv::{PixelBlend, PixelFormat, PixelSwizzler};
///
/// let mut s = PixelSwizzler::default();
/// s.prepare(
///     PixelFormat::BGRA_PREMUL,
///     &mut [],
///     PixelFormat::RGBA_NONPREMUL,
///     &[],
///     PixelBlend::Src,
/// )?;
///
/// let src = [0xFF, 0x00, 0x00, 0x80, 0x00, 0xFF, 0x00, 0xFF];
/// let mut dst = [0u8; 8];
/// assert_eq!(s.swizzle_interleaved_from_slice(&mut dst, &[], &src), 2);
/// assert_eq!(dst, [0x00, 0x00, 0x80, 0x80, 0x00, 0xFF, 0x00, 0xFF]);
/// # Ok::<(), pixconv::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelSwizzler {
    routine: Option<Routine>,
    transparent_black: Option<PixelBlend>,
    dst_bytes_per_pixel: usize,
    src_bytes_per_pixel: usize,
}

impl PixelSwizzler {
    pub const fn new() -> Self {
        Self {
            routine: None,
            transparent_black: None,
            dst_bytes_per_pixel: 0,
            src_bytes_per_pixel: 0,
        }
    }

    /// Prepares to convert `src_format` pixels into `dst_format` ones,
    /// restricted to [`DstAllowList::BUILD`].
    ///
    /// Indexed sources need both palettes to hold at least 1024 bytes;
    /// `src_palette` is transcoded into `dst_palette`, which must then be
    /// passed to every swizzle call.
    pub fn prepare(
        &mut self,
        dst_format: PixelFormat,
        dst_palette: &mut [u8],
        src_format: PixelFormat,
        src_palette: &[u8],
        blend: PixelBlend,
    ) -> Result<(), Error> {
        self.prepare_with_allowlist(
            DstAllowList::BUILD,
            dst_format,
            dst_palette,
            src_format,
            src_palette,
            blend,
        )
    }

    /// [`prepare`](Self::prepare) against a caller-chosen allow-list.
    ///
    /// On error the swizzler is left unprepared, except that a failure to
    /// find a routine still records the blend and both pixel sizes, so
    /// [`swizzle_interleaved_transparent_black`](Self::swizzle_interleaved_transparent_black)
    /// keeps working.
    pub fn prepare_with_allowlist(
        &mut self,
        allow: DstAllowList,
        dst_format: PixelFormat,
        dst_palette: &mut [u8],
        src_format: PixelFormat,
        src_palette: &[u8],
        blend: PixelBlend,
    ) -> Result<(), Error> {
        *self = Self::new();

        if !allow.contains(dst_format) {
            log::debug!("pixconv: destination {dst_format:?} is not in the allow-list");
            return Err(Error::DisabledByConfiguration);
        }

        let dst_bits = dst_format.bits_per_pixel();
        let src_bits = src_format.bits_per_pixel();
        if dst_bits == 0
            || !dst_bits.is_multiple_of(8)
            || src_bits == 0
            || !src_bits.is_multiple_of(8)
        {
            log::debug!(
                "pixconv: no whole-byte pixels for {src_format:?} ({src_bits} bits) -> {dst_format:?} ({dst_bits} bits)"
            );
            return Err(Error::UnsupportedOption);
        }

        if src_format.is_indexed()
            && (dst_palette.len() < PALETTE_BYTE_LENGTH || src_palette.len() < PALETTE_BYTE_LENGTH)
        {
            log::debug!(
                "pixconv: palettes of {} and {} bytes for indexed source {src_format:?}",
                dst_palette.len(),
                src_palette.len()
            );
            return Err(Error::BadArgumentLengthTooShort);
        }

        let routine = dispatch::select(dst_format, dst_palette, src_format, src_palette, blend);
        *self = Self {
            routine,
            transparent_black: Some(blend),
            dst_bytes_per_pixel: (dst_bits / 8) as usize,
            src_bytes_per_pixel: (src_bits / 8) as usize,
        };

        match routine {
            Some(r) => {
                log::trace!(
                    "pixconv: {src_format:?} -> {dst_format:?} ({blend:?}) via {}",
                    r.name
                );
                Ok(())
            }
            None => {
                log::debug!("pixconv: no routine for {src_format:?} -> {dst_format:?} ({blend:?})");
                Err(Error::UnsupportedOption)
            }
        }
    }

    /// Whether the last [`prepare`](Self::prepare) found a routine.
    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.routine.is_some()
    }

    #[inline]
    pub fn dst_bytes_per_pixel(&self) -> usize {
        self.dst_bytes_per_pixel
    }

    #[inline]
    pub fn src_bytes_per_pixel(&self) -> usize {
        self.src_bytes_per_pixel
    }

    /// Name of the selected routine, for diagnostics. Not a stable
    /// identifier.
    pub fn routine_name(&self) -> Option<&'static str> {
        self.routine.map(|r| r.name)
    }

    /// Converts `min(dst.len() / dst_bpp, src.len() / src_bpp)` pixels and
    /// returns that count.
    pub fn swizzle_interleaved_from_slice(
        &self,
        dst: &mut [u8],
        dst_palette: &[u8],
        src: &[u8],
    ) -> usize {
        match self.routine {
            Some(r) => (r.func)(dst, dst_palette, src),
            None => 0,
        }
    }

    /// As [`swizzle_interleaved_from_slice`](Self::swizzle_interleaved_from_slice),
    /// then advances `src` past the pixels read.
    pub fn swizzle_interleaved_from_reader(
        &self,
        dst: &mut [u8],
        dst_palette: &[u8],
        src: &mut &[u8],
    ) -> usize {
        self.from_reader(usize::MAX, dst, dst_palette, src)
    }

    /// As [`swizzle_interleaved_from_reader`](Self::swizzle_interleaved_from_reader),
    /// reading at most `up_to_num_pixels` pixels.
    pub fn limited_swizzle_u32_interleaved_from_reader(
        &self,
        up_to_num_pixels: u32,
        dst: &mut [u8],
        dst_palette: &[u8],
        src: &mut &[u8],
    ) -> usize {
        self.from_reader(up_to_num_pixels as usize, dst, dst_palette, src)
    }

    fn from_reader(
        &self,
        max_pixels: usize,
        dst: &mut [u8],
        dst_palette: &[u8],
        src: &mut &[u8],
    ) -> usize {
        let Some(r) = self.routine else {
            return 0;
        };
        let cap = max_pixels.saturating_mul(self.src_bytes_per_pixel);
        let readable = &src[..cap.min(src.len())];
        let n = (r.func)(dst, dst_palette, readable);
        *src = src.get(n * self.src_bytes_per_pixel..).unwrap_or_default();
        n
    }

    /// Draws `num_pixels` transparent black pixels, clamped to what `dst`
    /// holds, and returns the count.
    ///
    /// With SRC the pixels are zeroed. With SRC_OVER nothing is written,
    /// since compositing transparent black changes nothing.
    pub fn swizzle_interleaved_transparent_black(
        &self,
        dst: &mut [u8],
        _dst_palette: &[u8],
        num_pixels: u64,
    ) -> usize {
        let Some(blend) = self.transparent_black else {
            return 0;
        };
        let bpp = self.dst_bytes_per_pixel;
        if bpp == 0 {
            return 0;
        }
        let n = (dst.len() / bpp).min(usize::try_from(num_pixels).unwrap_or(usize::MAX));
        if blend == PixelBlend::Src {
            dst[..n * bpp].fill(0);
        }
        n
    }
}

// ===========================================================================
// Accelerated leaves
// ===========================================================================

/// RGBA to BGRA and back, any alpha.
fn swap_rgbx_bgrx(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    let n = (dst.len() / 4).min(src.len() / 4);
    let (src, dst) = (&src[..n * 4], &mut dst[..n * 4]);
    incant!(swap_rgbx_bgrx_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    n
}

/// BGR to opaque BGRA (and RGB to RGBA).
fn bgr_to_bgrw(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    let n = (dst.len() / 4).min(src.len() / 3);
    let (src, dst) = (&src[..n * 3], &mut dst[..n * 4]);
    incant!(bgr_to_bgrw_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    n
}

/// RGB to opaque BGRA (and BGR to RGBA).
fn rgb_to_bgrw(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    let n = (dst.len() / 4).min(src.len() / 3);
    let (src, dst) = (&src[..n * 3], &mut dst[..n * 4]);
    incant!(rgb_to_bgrw_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    n
}

fn y_to_4bpp(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    let n = (dst.len() / 4).min(src.len());
    let (src, dst) = (&src[..n], &mut dst[..n * 4]);
    incant!(y_to_4bpp_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    n
}

fn swap_rgb_bgr(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    let n = (dst.len() / 3).min(src.len() / 3);
    let (src, dst) = (&src[..n * 3], &mut dst[..n * 3]);
    incant!(swap_rgb_bgr_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    n
}

/// Drops the 4th byte.
fn bgrx_to_bgr(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    let n = (dst.len() / 3).min(src.len() / 4);
    let (src, dst) = (&src[..n * 4], &mut dst[..n * 3]);
    incant!(bgrx_to_bgr_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    n
}

/// Drops the 4th byte and swaps R/B.
fn bgrx_to_rgb(dst: &mut [u8], _: &[u8], src: &[u8]) -> usize {
    let n = (dst.len() / 3).min(src.len() / 4);
    let (src, dst) = (&src[..n * 4], &mut dst[..n * 3]);
    incant!(bgrx_to_rgb_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    n
}
