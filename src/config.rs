//! Image, frame and pixel configuration.

use crate::format::{PALETTE_BYTE_LENGTH, PixelBlend, PixelFormat, PixelSubsampling};
use crate::rect::RectIeU32;

/// Largest width or height any configuration accepts.
pub const DIMENSION_MAX_INCL: u32 = 0xFFFFFF;

/// Time unit for frame durations: 705_600_000 flicks per second, which
/// divides evenly into every common frame rate.
pub type Flicks = i64;

pub const FLICKS_PER_SECOND: Flicks = 705_600_000;
pub const FLICKS_PER_MILLISECOND: Flicks = 705_600;

/// Format, subsampling and dimensions of an image's pixels.
///
/// A configuration is valid when its format is. [`set`](Self::set) fails
/// closed: inputs it cannot represent reset it to [`PixelConfig::null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelConfig {
    format: PixelFormat,
    subsampling: PixelSubsampling,
    width: u32,
    height: u32,
}

impl PixelConfig {
    pub const fn null() -> Self {
        Self {
            format: PixelFormat::INVALID,
            subsampling: PixelSubsampling::NONE,
            width: 0,
            height: 0,
        }
    }

    /// A configuration built with [`set`](Self::set).
    pub fn new(
        format: PixelFormat,
        subsampling: PixelSubsampling,
        width: u32,
        height: u32,
    ) -> Self {
        let mut c = Self::null();
        c.set(format, subsampling, width, height);
        c
    }

    pub fn set(
        &mut self,
        format: PixelFormat,
        subsampling: PixelSubsampling,
        width: u32,
        height: u32,
    ) {
        let fits = (width as u64)
            .checked_mul(height as u64)
            .is_some_and(|wh| usize::try_from(wh).is_ok());
        if format.is_valid() && width <= DIMENSION_MAX_INCL && height <= DIMENSION_MAX_INCL && fits
        {
            *self = Self {
                format,
                subsampling,
                width,
                height,
            };
        } else {
            self.invalidate();
        }
    }

    pub fn invalidate(&mut self) {
        *self = Self::null();
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.format.is_valid()
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn pixel_subsampling(&self) -> PixelSubsampling {
        self.subsampling
    }

    pub fn bounds(&self) -> RectIeU32 {
        RectIeU32::from_size(self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes needed to hold the pixels, plus the palette for indexed
    /// formats.
    ///
    /// Returns 0 for planar formats, formats that are not a whole number of
    /// bytes per pixel, and on overflow. A 0 means "do not trust".
    pub fn pixbuf_len(&self) -> u64 {
        if self.format.is_planar() {
            return 0;
        }
        let bytes_per_pixel = self.format.bytes_per_pixel() as u64;
        if bytes_per_pixel == 0 {
            return 0;
        }
        let n = (self.width as u64)
            .checked_mul(self.height as u64)
            .and_then(|wh| wh.checked_mul(bytes_per_pixel));
        let n = if self.format.is_indexed() {
            n.and_then(|n| n.checked_add(PALETTE_BYTE_LENGTH as u64))
        } else {
            n
        };
        n.unwrap_or(0)
    }
}

/// A [`PixelConfig`] plus what a decoder knows about the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageConfig {
    pixcfg: PixelConfig,
    first_frame_io_position: u64,
    first_frame_is_opaque: bool,
}

impl ImageConfig {
    pub const fn null() -> Self {
        Self {
            pixcfg: PixelConfig::null(),
            first_frame_io_position: 0,
            first_frame_is_opaque: false,
        }
    }

    /// Stores everything, or resets everything when the pixel configuration
    /// is rejected.
    pub fn set(
        &mut self,
        format: PixelFormat,
        subsampling: PixelSubsampling,
        width: u32,
        height: u32,
        first_frame_io_position: u64,
        first_frame_is_opaque: bool,
    ) {
        self.pixcfg.set(format, subsampling, width, height);
        if self.pixcfg.is_valid() {
            self.first_frame_io_position = first_frame_io_position;
            self.first_frame_is_opaque = first_frame_is_opaque;
        } else {
            self.invalidate();
        }
    }

    pub fn invalidate(&mut self) {
        *self = Self::null();
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.pixcfg.is_valid()
    }

    #[inline]
    pub fn pixcfg(&self) -> &PixelConfig {
        &self.pixcfg
    }

    /// I/O stream position of the first frame.
    #[inline]
    pub fn first_frame_io_position(&self) -> u64 {
        self.first_frame_io_position
    }

    #[inline]
    pub fn first_frame_is_opaque(&self) -> bool {
        self.first_frame_is_opaque
    }
}

/// What to do with a frame's pixels before drawing the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationDisposal {
    /// Draw the next frame on top of this one.
    #[default]
    None,
    /// Clear the frame's bounds to the background color (in practice,
    /// transparent black).
    RestoreBackground,
    /// Undo this frame, so the next is drawn over the previous one.
    RestorePrevious,
}

/// Per-frame metadata of an animated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameConfig {
    bounds: RectIeU32,
    duration: Flicks,
    index: u64,
    io_position: u64,
    disposal: AnimationDisposal,
    opaque_within_bounds: bool,
    overwrite_instead_of_blend: bool,
    background_color: u32,
}

impl FrameConfig {
    pub const fn null() -> Self {
        Self {
            bounds: RectIeU32::new(0, 0, 0, 0),
            duration: 0,
            index: 0,
            io_position: 0,
            disposal: AnimationDisposal::None,
            opaque_within_bounds: false,
            overwrite_instead_of_blend: false,
            background_color: 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        bounds: RectIeU32,
        duration: Flicks,
        index: u64,
        io_position: u64,
        disposal: AnimationDisposal,
        opaque_within_bounds: bool,
        overwrite_instead_of_blend: bool,
        background_color: u32,
    ) {
        *self = Self {
            bounds,
            duration,
            index,
            io_position,
            disposal,
            opaque_within_bounds,
            overwrite_instead_of_blend,
            background_color,
        };
    }

    /// Frame bounds, relative to the image canvas.
    #[inline]
    pub fn bounds(&self) -> RectIeU32 {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// How long to show this frame. Zero means forever (a still image).
    #[inline]
    pub fn duration(&self) -> Flicks {
        self.duration
    }

    /// 0 for the first frame, 1 for the second, and so on.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// I/O stream position before this frame's configuration.
    #[inline]
    pub fn io_position(&self) -> u64 {
        self.io_position
    }

    #[inline]
    pub fn disposal(&self) -> AnimationDisposal {
        self.disposal
    }

    /// Whether every pixel within the bounds is fully opaque.
    ///
    /// False negatives are allowed, false positives are not. When true, SRC
    /// and SRC_OVER produce the same pixels.
    #[inline]
    pub fn opaque_within_bounds(&self) -> bool {
        self.opaque_within_bounds
    }

    /// Whether to ignore the previous image state within the bounds when
    /// drawing this frame.
    #[inline]
    pub fn overwrite_instead_of_blend(&self) -> bool {
        self.overwrite_instead_of_blend
    }

    /// The blend to draw this frame with.
    pub fn blend(&self) -> PixelBlend {
        if self.overwrite_instead_of_blend {
            PixelBlend::Src
        } else {
            PixelBlend::SrcOver
        }
    }

    /// Premultiplied ARGB.
    #[inline]
    pub fn background_color(&self) -> u32 {
        self.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_config_set_and_reject() {
        let c = PixelConfig::new(PixelFormat::BGRA_PREMUL, PixelSubsampling::NONE, 3, 2);
        assert!(c.is_valid());
        assert_eq!((c.width(), c.height()), (3, 2));
        assert_eq!(c.bounds(), RectIeU32::new(0, 0, 3, 2));
        assert_eq!(c.pixbuf_len(), 24);

        let c = PixelConfig::new(PixelFormat::INVALID, PixelSubsampling::NONE, 3, 2);
        assert_eq!(c, PixelConfig::null());

        let mut c = PixelConfig::new(PixelFormat::Y, PixelSubsampling::NONE, 1, 1);
        c.set(PixelFormat::Y, PixelSubsampling::NONE, DIMENSION_MAX_INCL + 1, 1);
        assert!(!c.is_valid());
        assert_eq!(c.width(), 0);

        c.set(PixelFormat::Y, PixelSubsampling::NONE, DIMENSION_MAX_INCL, DIMENSION_MAX_INCL);
        assert!(c.is_valid());
        c.invalidate();
        assert_eq!(c, PixelConfig::null());
    }

    #[test]
    fn pixbuf_len() {
        let len = |f, w, h| PixelConfig::new(f, PixelSubsampling::NONE, w, h).pixbuf_len();
        assert_eq!(len(PixelFormat::INDEXED_BGRA_BINARY, 4, 4), 16 + 1024);
        assert_eq!(len(PixelFormat::BGRA_NONPREMUL_4X16LE, 2, 3), 48);
        assert_eq!(len(PixelFormat::YCBCR, 2, 2), 0);
        assert_eq!(len(PixelFormat::from_repr(0x80000111), 2, 2), 0);
        assert_eq!(len(PixelFormat::RGB, 0, 5), 0);
        assert_eq!(
            len(PixelFormat::RGBA_PREMUL_4X16LE, DIMENSION_MAX_INCL, DIMENSION_MAX_INCL),
            0xFFFFFF * 0xFFFFFF * 8
        );
    }

    #[test]
    fn image_config() {
        let mut c = ImageConfig::null();
        c.set(PixelFormat::RGB, PixelSubsampling::NONE, 10, 20, 1234, true);
        assert!(c.is_valid());
        assert_eq!(c.first_frame_io_position(), 1234);
        assert!(c.first_frame_is_opaque());
        assert_eq!(c.pixcfg().height(), 20);

        c.set(PixelFormat::INVALID, PixelSubsampling::NONE, 10, 20, 1234, true);
        assert_eq!(c, ImageConfig::null());
    }

    #[test]
    fn frame_config() {
        let mut f = FrameConfig::null();
        assert_eq!(f.duration(), 0);
        f.set(
            RectIeU32::new(2, 3, 12, 8),
            FLICKS_PER_SECOND / 10,
            7,
            999,
            AnimationDisposal::RestorePrevious,
            true,
            false,
            0xFF102030,
        );
        assert_eq!((f.width(), f.height()), (10, 5));
        assert_eq!(f.duration(), 70_560_000);
        assert_eq!(f.index(), 7);
        assert_eq!(f.io_position(), 999);
        assert_eq!(f.disposal(), AnimationDisposal::RestorePrevious);
        assert!(f.opaque_within_bounds());
        assert_eq!(f.blend(), PixelBlend::SrcOver);
        assert_eq!(f.background_color(), 0xFF102030);
    }
}
