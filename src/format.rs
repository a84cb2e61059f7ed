//! Pixel format and subsampling descriptors.
//!
//! Both are opaque `u32` newtypes. Their bit layouts are private; use the
//! query methods.

use core::fmt;

/// Maximum number of memory planes of any pixel format.
pub const NUM_PLANES_MAX_INCL: usize = 4;

/// Plane holding the per-pixel indexes of an indexed format.
pub const INDEX_PLANE: usize = 0;

/// Plane holding the palette of an indexed format.
pub const COLOR_PLANE: usize = 3;

/// A palette is 256 entries of 4 bytes (B, G, R, A), whatever the format.
pub const PALETTE_BYTE_LENGTH: usize = 1024;

const BITS_PER_CHANNEL: [u32; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 16, 24, 32, 48, 64];

/// How a format's alpha channel, if any, relates to its color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transparency {
    Opaque,
    Nonpremul,
    Premul,
    /// Every pixel is either fully opaque or fully transparent.
    Binary,
}

/// Whether a format carries no color (alpha only), gray, or rich color.
///
/// Rich color covers RGB, BGR, YCbCr, YCbCrK, CMY and CMYK. Alpha is not
/// part of the coloration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coloration {
    None,
    Gray,
    Rich,
}

/// How source pixels combine with destination pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelBlend {
    /// Replace the destination.
    #[default]
    Src,
    /// Porter-Duff "source over destination".
    SrcOver,
}

/// Encodes the layout of the bytes that make up an image's pixel data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PixelFormat(u32);

macro_rules! pixel_formats {
    ($($name:ident = $repr:literal,)*) => {
        impl PixelFormat {
            $(pub const $name: PixelFormat = PixelFormat($repr);)*

            fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($repr => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

pixel_formats! {
    INVALID = 0x00000000,
    A = 0x02000008,
    Y = 0x20000008,
    Y_16LE = 0x2000000B,
    Y_16BE = 0x2010000B,
    YA_NONPREMUL = 0x21000088,
    YA_PREMUL = 0x22000088,
    YXXX = 0x30008888,
    YCBCR = 0x40020888,
    YCBCRA_NONPREMUL = 0x41038888,
    YCBCRK = 0x50038888,
    YCOCG = 0x60020888,
    YCOCGA_NONPREMUL = 0x61038888,
    YCOCGK = 0x70038888,
    INDEXED_BGRA_NONPREMUL = 0x81040008,
    INDEXED_BGRA_PREMUL = 0x82040008,
    INDEXED_BGRA_BINARY = 0x83040008,
    BGR_565 = 0x80000565,
    BGR = 0x80000888,
    BGRA_NONPREMUL = 0x81008888,
    BGRA_NONPREMUL_4X16LE = 0x8100BBBB,
    BGRA_PREMUL = 0x82008888,
    BGRA_PREMUL_4X16LE = 0x8200BBBB,
    BGRA_BINARY = 0x83008888,
    BGRX = 0x90008888,
    RGB = 0xA0000888,
    RGBA_NONPREMUL = 0xA1008888,
    RGBA_NONPREMUL_4X16LE = 0xA100BBBB,
    RGBA_PREMUL = 0xA2008888,
    RGBA_PREMUL_4X16LE = 0xA200BBBB,
    RGBA_BINARY = 0xA3008888,
    RGBX = 0xB0008888,
    CMY = 0xC0020888,
    CMYK = 0xD0038888,
}

impl PixelFormat {
    #[inline]
    pub const fn from_repr(repr: u32) -> Self {
        PixelFormat(repr)
    }

    #[inline]
    pub const fn repr(self) -> u32 {
        self.0
    }

    /// Zero is the only invalid value.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Bits per pixel for interleaved formats, 0 for planar formats.
    pub const fn bits_per_pixel(self) -> u32 {
        if self.is_planar() {
            return 0;
        }
        BITS_PER_CHANNEL[(0x0F & self.0) as usize]
            + BITS_PER_CHANNEL[(0x0F & (self.0 >> 4)) as usize]
            + BITS_PER_CHANNEL[(0x0F & (self.0 >> 8)) as usize]
            + BITS_PER_CHANNEL[(0x0F & (self.0 >> 12)) as usize]
    }

    /// Bytes per pixel, or 0 when the format is planar or not a whole number
    /// of bytes per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        let bits = self.bits_per_pixel();
        if bits % 8 != 0 {
            return 0;
        }
        (bits / 8) as usize
    }

    /// Opaque black for opaque formats, transparent black otherwise.
    #[inline]
    pub const fn default_background_color(self) -> u32 {
        if self.0 & 0x03000000 == 0 {
            0xFF000000
        } else {
            0x00000000
        }
    }

    #[inline]
    pub const fn is_direct(self) -> bool {
        (self.0 >> 18) & 0x01 == 0
    }

    #[inline]
    pub const fn is_indexed(self) -> bool {
        (self.0 >> 18) & 0x01 != 0
    }

    #[inline]
    pub const fn is_interleaved(self) -> bool {
        (self.0 >> 16) & 0x03 == 0
    }

    #[inline]
    pub const fn is_planar(self) -> bool {
        (self.0 >> 16) & 0x03 != 0
    }

    pub const fn coloration(self) -> Coloration {
        match self.0 >> 29 {
            0 => Coloration::None,
            1 => Coloration::Gray,
            _ => Coloration::Rich,
        }
    }

    #[inline]
    pub const fn num_planes(self) -> usize {
        (((self.0 >> 16) & 0x03) + 1) as usize
    }

    pub const fn transparency(self) -> Transparency {
        match (self.0 >> 24) & 0x03 {
            0 => Transparency::Opaque,
            1 => Transparency::Nonpremul,
            2 => Transparency::Premul,
            _ => Transparency::Binary,
        }
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "PixelFormat::{name}"),
            None => write!(f, "PixelFormat({:#010X})", self.0),
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#010X}", self.0),
        }
    }
}

/// Whether sample values cover one pixel or several, per plane.
///
/// Each plane has a horizontal and vertical denominator (1 to 4) and bias
/// (0 to 3). Plane indexes wrap modulo 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PixelSubsampling(u32);

impl PixelSubsampling {
    pub const NONE: PixelSubsampling = PixelSubsampling(0x000000);
    pub const S444: PixelSubsampling = PixelSubsampling(0x000000);
    pub const S440: PixelSubsampling = PixelSubsampling(0x010100);
    pub const S422: PixelSubsampling = PixelSubsampling(0x101000);
    pub const S420: PixelSubsampling = PixelSubsampling(0x111100);
    pub const S411: PixelSubsampling = PixelSubsampling(0x303000);
    pub const S410: PixelSubsampling = PixelSubsampling(0x313100);

    #[inline]
    pub const fn from_repr(repr: u32) -> Self {
        PixelSubsampling(repr)
    }

    #[inline]
    pub const fn repr(self) -> u32 {
        self.0
    }

    #[inline]
    const fn field(self, plane: usize, offset: u32) -> u32 {
        let shift = ((plane & 0x03) as u32) * 8 + offset;
        (self.0 >> shift) & 0x03
    }

    pub const fn bias_x(self, plane: usize) -> u32 {
        self.field(plane, 6)
    }

    pub const fn denominator_x(self, plane: usize) -> u32 {
        self.field(plane, 4) + 1
    }

    pub const fn bias_y(self, plane: usize) -> u32 {
        self.field(plane, 2)
    }

    pub const fn denominator_y(self, plane: usize) -> u32 {
        self.field(plane, 0) + 1
    }
}
