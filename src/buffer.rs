//! Borrowed pixel buffers.
//!
//! A [`PixelBuffer`] never owns or allocates its memory: it is a view of
//! caller-managed bytes described by a [`PixelConfig`]. Plane 0 holds the
//! samples. Indexed formats also pin plane 3 to a 1024-byte palette.

use crate::color::{
    argb_to_rgb565, nonpremul_to_premul_u32, nonpremul_u64_to_premul_u32,
    premul_to_nonpremul_u32, premul_u32_to_alpha_gray_nonpremul, premul_u32_to_gray8,
    premul_u32_to_gray16, premul_u32_to_nonpremul_u64, rgb565_to_argb, swap_argb_abgr_u32,
    u32_to_u64, u64_to_u32,
};
use crate::config::PixelConfig;
use crate::error::Error;
use crate::format::{
    COLOR_PLANE, INDEX_PLANE, NUM_PLANES_MAX_INCL, PALETTE_BYTE_LENGTH, PixelFormat, Transparency,
};
use crate::palette::closest_element;
use crate::rect::RectIeU32;

/// A borrowed 2-D byte grid: `height` rows of `width` bytes, `stride` bytes
/// apart.
#[derive(Debug, Default)]
pub struct Table<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> Table<'a> {
    /// Fails with [`Error::BadArgument`] if rows would overlap and with
    /// [`Error::BadArgumentLengthTooShort`] if `data` does not reach the end
    /// of the last row.
    pub fn new(data: &'a mut [u8], width: usize, height: usize, stride: usize) -> Result<Self, Error> {
        if height > 1 && width > stride {
            return Err(Error::BadArgument);
        }
        if height > 0 {
            let needed = (height - 1)
                .checked_mul(stride)
                .and_then(|n| n.checked_add(width))
                .ok_or(Error::BadArgument)?;
            if data.len() < needed {
                return Err(Error::BadArgumentLengthTooShort);
            }
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// A tightly packed table: `stride == width`.
    pub fn packed(data: &'a mut [u8], width: usize, height: usize) -> Result<Self, Error> {
        Self::new(data, width, height, width)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `y`, exactly `width` bytes. Empty when `y` is out of range.
    pub fn row(&self, y: usize) -> &[u8] {
        if y >= self.height {
            return &[];
        }
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        if y >= self.height {
            return &mut [];
        }
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// The first `len` bytes starting at row `y`, spanning row padding.
    fn run_mut(&mut self, y: usize, len: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + len]
    }
}

/// A pixel configuration plus up to four borrowed memory planes.
#[derive(Debug, Default)]
pub struct PixelBuffer<'a> {
    pixcfg: PixelConfig,
    planes: [Table<'a>; NUM_PLANES_MAX_INCL],
}

fn interleaved_bytes_per_pixel(format: PixelFormat) -> Result<usize, Error> {
    let bits = format.bits_per_pixel();
    if bits == 0 || bits % 8 != 0 {
        return Err(Error::UnsupportedOption);
    }
    Ok((bits / 8) as usize)
}

fn palette_table(palette: &mut [u8]) -> Result<Table<'_>, Error> {
    let palette = palette
        .get_mut(..PALETTE_BYTE_LENGTH)
        .ok_or(Error::BadArgumentLengthTooShort)?;
    Table::new(palette, PALETTE_BYTE_LENGTH, 1, PALETTE_BYTE_LENGTH)
}

impl<'a> PixelBuffer<'a> {
    /// A buffer with no configuration and no memory.
    pub fn null() -> Self {
        Self::default()
    }

    pub fn from_interleaved(
        pixcfg: &PixelConfig,
        primary: Table<'a>,
        palette: &'a mut [u8],
    ) -> Result<Self, Error> {
        let mut pb = Self::null();
        pb.set_interleaved(pixcfg, primary, palette)?;
        Ok(pb)
    }

    pub fn from_slice(pixcfg: &PixelConfig, memory: &'a mut [u8]) -> Result<Self, Error> {
        let mut pb = Self::null();
        pb.set_from_slice(pixcfg, memory)?;
        Ok(pb)
    }

    /// Points the buffer at `primary` (and, for indexed formats, the first
    /// 1024 bytes of `palette`).
    ///
    /// `primary` must be at least `width * bytes_per_pixel` wide and
    /// `height` tall. On failure the buffer is left null.
    pub fn set_interleaved(
        &mut self,
        pixcfg: &PixelConfig,
        primary: Table<'a>,
        palette: &'a mut [u8],
    ) -> Result<(), Error> {
        *self = Self::null();
        let format = pixcfg.pixel_format();
        if !pixcfg.is_valid() || format.is_planar() {
            return Err(Error::BadArgument);
        }
        if format.is_indexed() && palette.len() < PALETTE_BYTE_LENGTH {
            return Err(Error::BadArgumentLengthTooShort);
        }
        let bytes_per_pixel = interleaved_bytes_per_pixel(format)?;
        let width_in_bytes = (pixcfg.width() as usize)
            .checked_mul(bytes_per_pixel)
            .ok_or(Error::BadArgument)?;
        if width_in_bytes > primary.width || pixcfg.height() as usize > primary.height {
            return Err(Error::BadArgumentLengthTooShort);
        }

        if format.is_indexed() {
            self.planes[COLOR_PLANE] = palette_table(palette)?;
        }
        self.planes[INDEX_PLANE] = primary;
        self.pixcfg = *pixcfg;
        Ok(())
    }

    /// Like [`set_interleaved`](Self::set_interleaved) with one flat,
    /// tightly packed buffer. Indexed formats take their palette from the
    /// front of `memory`.
    pub fn set_from_slice(&mut self, pixcfg: &PixelConfig, memory: &'a mut [u8]) -> Result<(), Error> {
        *self = Self::null();
        if !pixcfg.is_valid() {
            return Err(Error::BadArgument);
        }
        let format = pixcfg.pixel_format();
        if format.is_planar() {
            return Err(Error::UnsupportedOption);
        }
        let bytes_per_pixel = interleaved_bytes_per_pixel(format)?;

        let mut memory = memory;
        let mut palette = None;
        if format.is_indexed() {
            if memory.len() < PALETTE_BYTE_LENGTH {
                return Err(Error::BadArgumentLengthTooShort);
            }
            let (front, rest) = memory.split_at_mut(PALETTE_BYTE_LENGTH);
            palette = Some(front);
            memory = rest;
        }

        let width_in_bytes = (pixcfg.width() as usize)
            .checked_mul(bytes_per_pixel)
            .ok_or(Error::BadArgument)?;
        let len = width_in_bytes
            .checked_mul(pixcfg.height() as usize)
            .ok_or(Error::BadArgument)?;
        if memory.len() < len {
            return Err(Error::BadArgumentLengthTooShort);
        }

        let primary = Table::packed(&mut memory[..len], width_in_bytes, pixcfg.height() as usize)?;
        if let Some(palette) = palette {
            self.planes[COLOR_PLANE] = palette_table(palette)?;
        }
        self.planes[INDEX_PLANE] = primary;
        self.pixcfg = *pixcfg;
        Ok(())
    }

    #[inline]
    pub fn pixel_config(&self) -> &PixelConfig {
        &self.pixcfg
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixcfg.pixel_format()
    }

    /// The 1024-byte palette of an indexed buffer, else empty.
    pub fn palette(&self) -> &[u8] {
        self.palette_or_else(&[])
    }

    pub fn palette_mut(&mut self) -> &mut [u8] {
        if self.has_palette() {
            self.planes[COLOR_PLANE].row_mut(0)
        } else {
            &mut []
        }
    }

    pub fn palette_or_else<'s>(&'s self, fallback: &'s [u8]) -> &'s [u8] {
        if self.has_palette() {
            self.planes[COLOR_PLANE].row(0)
        } else {
            fallback
        }
    }

    fn has_palette(&self) -> bool {
        let tab = &self.planes[COLOR_PLANE];
        self.pixel_format().is_indexed() && tab.width == PALETTE_BYTE_LENGTH && tab.height == 1
    }

    /// Plane `p`, or `None` when `p` is not below
    /// [`NUM_PLANES_MAX_INCL`](crate::NUM_PLANES_MAX_INCL).
    pub fn plane(&self, p: usize) -> Option<&Table<'a>> {
        self.planes.get(p)
    }

    /// Row `y` of plane `p` for writing. Empty when either is out of range.
    ///
    /// Planes themselves are only reachable read-only, so a configured
    /// buffer always matches its tables.
    pub fn plane_row_mut(&mut self, p: usize, y: usize) -> &mut [u8] {
        match self.planes.get_mut(p) {
            Some(tab) => tab.row_mut(y),
            None => &mut [],
        }
    }

    /// The color at `(x, y)` as premultiplied ARGB.
    ///
    /// Returns 0 out of bounds, for planar formats and for formats outside
    /// the supported subset.
    pub fn color_u32_at(&self, x: u32, y: u32) -> u32 {
        if x >= self.pixcfg.width() || y >= self.pixcfg.height() {
            return 0;
        }
        let format = self.pixel_format();
        if format.is_planar() {
            return 0;
        }
        let row = self.planes[INDEX_PLANE].row(y as usize);
        let x = x as usize;

        match format {
            PixelFormat::BGRA_PREMUL | PixelFormat::BGRA_BINARY => peek_u32le(&row[4 * x..]),
            PixelFormat::INDEXED_BGRA_PREMUL | PixelFormat::INDEXED_BGRA_BINARY => {
                self.palette_entry(row[x])
            }
            PixelFormat::Y => 0xFF000000 | 0x00010101 * row[x] as u32,
            PixelFormat::Y_16LE => 0xFF000000 | 0x00010101 * row[2 * x + 1] as u32,
            PixelFormat::Y_16BE => 0xFF000000 | 0x00010101 * row[2 * x] as u32,
            PixelFormat::YA_NONPREMUL => nonpremul_to_premul_u32(
                ((row[2 * x + 1] as u32) << 24) | 0x00010101 * row[2 * x] as u32,
            ),
            PixelFormat::INDEXED_BGRA_NONPREMUL => nonpremul_to_premul_u32(self.palette_entry(row[x])),
            PixelFormat::BGR_565 => {
                rgb565_to_argb(u16::from_le_bytes([row[2 * x], row[2 * x + 1]]))
            }
            PixelFormat::BGR => 0xFF000000 | peek_u24le(&row[3 * x..]),
            PixelFormat::BGRA_NONPREMUL => nonpremul_to_premul_u32(peek_u32le(&row[4 * x..])),
            PixelFormat::BGRA_NONPREMUL_4X16LE => {
                nonpremul_u64_to_premul_u32(peek_u64le(&row[8 * x..]))
            }
            PixelFormat::BGRA_PREMUL_4X16LE => u64_to_u32(peek_u64le(&row[8 * x..])),
            PixelFormat::BGRX => 0xFF000000 | peek_u32le(&row[4 * x..]),
            PixelFormat::RGB => 0xFF000000 | peek_u24be(&row[3 * x..]),
            PixelFormat::RGBA_NONPREMUL => {
                swap_argb_abgr_u32(nonpremul_to_premul_u32(peek_u32le(&row[4 * x..])))
            }
            PixelFormat::RGBA_PREMUL | PixelFormat::RGBA_BINARY => {
                swap_argb_abgr_u32(peek_u32le(&row[4 * x..]))
            }
            PixelFormat::RGBX => swap_argb_abgr_u32(0xFF000000 | peek_u32le(&row[4 * x..])),
            _ => 0,
        }
    }

    fn palette_entry(&self, index: u8) -> u32 {
        let palette = self.palette();
        match palette.get(4 * index as usize..) {
            Some(entry) if entry.len() >= 4 => peek_u32le(entry),
            _ => 0,
        }
    }

    /// Sets the pixel at `(x, y)` to the premultiplied ARGB `color`.
    ///
    /// Indexed formats store the closest palette entry.
    pub fn set_color_u32_at(&mut self, x: u32, y: u32, color: u32) -> Result<(), Error> {
        if !self.pixcfg.is_valid() {
            return Err(Error::BadReceiver);
        }
        if x >= self.pixcfg.width() || y >= self.pixcfg.height() {
            return Err(Error::BadArgument);
        }
        let format = self.pixel_format();
        if format.is_planar() {
            return Err(Error::UnsupportedOption);
        }
        let x = x as usize;

        if format.is_indexed() {
            let index = closest_element(self.palette(), format, color);
            self.planes[INDEX_PLANE].row_mut(y as usize)[x] = index;
            return Ok(());
        }

        let row = self.planes[INDEX_PLANE].row_mut(y as usize);
        match format {
            PixelFormat::BGRA_PREMUL | PixelFormat::BGRX => {
                poke(&mut row[4 * x..], &color.to_le_bytes())
            }
            PixelFormat::Y => row[x] = premul_u32_to_gray8(color),
            PixelFormat::Y_16LE => poke(&mut row[2 * x..], &premul_u32_to_gray16(color).to_le_bytes()),
            PixelFormat::Y_16BE => poke(&mut row[2 * x..], &premul_u32_to_gray16(color).to_be_bytes()),
            PixelFormat::YA_NONPREMUL => poke(
                &mut row[2 * x..],
                &premul_u32_to_alpha_gray_nonpremul(color).to_le_bytes(),
            ),
            _ => {
                let Some(bytes) = direct_pixel_bytes(format, color) else {
                    return Err(Error::UnsupportedOption);
                };
                let n = bytes.len();
                poke(&mut row[n * x..], &bytes);
            }
        }
        Ok(())
    }

    /// Fills `rect` with the premultiplied ARGB `color`.
    ///
    /// An empty `rect` is a no-op. Common direct formats write whole rows
    /// at once; everything else goes through
    /// [`set_color_u32_at`](Self::set_color_u32_at) pixel by pixel, which
    /// for indexed formats means a palette search per pixel.
    pub fn set_color_u32_fill_rect(&mut self, rect: RectIeU32, color: u32) -> Result<(), Error> {
        if !self.pixcfg.is_valid() {
            return Err(Error::BadReceiver);
        }
        if rect.is_empty() {
            return Ok(());
        }
        if !self.pixcfg.bounds().contains_rect(&rect) {
            return Err(Error::BadArgument);
        }
        let format = self.pixel_format();
        if format.is_planar() {
            return Err(Error::UnsupportedOption);
        }

        let fast = match format {
            PixelFormat::BGRA_PREMUL
            | PixelFormat::BGRX
            | PixelFormat::BGR_565
            | PixelFormat::BGR
            | PixelFormat::BGRA_NONPREMUL
            | PixelFormat::BGRA_NONPREMUL_4X16LE
            | PixelFormat::RGBA_NONPREMUL
            | PixelFormat::RGBA_PREMUL
            | PixelFormat::RGBX => direct_pixel_bytes(format, color),
            _ => None,
        };
        if let Some(bytes) = fast {
            self.fill_rect_bytes(rect, &bytes);
            return Ok(());
        }

        for y in rect.min_incl_y..rect.max_excl_y {
            for x in rect.min_incl_x..rect.max_excl_x {
                self.set_color_u32_at(x, y, color)?;
            }
        }
        Ok(())
    }

    fn fill_rect_bytes(&mut self, rect: RectIeU32, pixel: &[u8]) {
        let bpp = pixel.len();
        let width = rect.width() as usize;
        let height = rect.height() as usize;
        let tab = &mut self.planes[INDEX_PLANE];

        if tab.stride == bpp * width && rect.min_incl_x == 0 {
            let run = tab.run_mut(rect.min_incl_y as usize, bpp * width * height);
            for d in run.chunks_exact_mut(bpp) {
                d.copy_from_slice(pixel);
            }
            return;
        }

        let x0 = bpp * rect.min_incl_x as usize;
        for y in rect.min_incl_y..rect.max_excl_y {
            let row = &mut tab.row_mut(y as usize)[x0..x0 + bpp * width];
            for d in row.chunks_exact_mut(bpp) {
                d.copy_from_slice(pixel);
            }
        }
    }

    /// Whether every pixel is fully opaque.
    ///
    /// This scans the whole buffer (or, for indexed formats, the palette and
    /// then possibly every pixel). It is O(width × height): do not call it
    /// per pixel. Formats that cannot carry alpha return true without
    /// scanning. A null buffer, and any format with alpha outside the
    /// supported subset, returns false.
    pub fn is_opaque(&self) -> bool {
        if !self.pixcfg.is_valid() {
            return false;
        }
        let format = self.pixel_format();
        if format.transparency() == Transparency::Opaque {
            return true;
        }
        if self.pixcfg.bounds().is_empty() {
            return true;
        }

        match format {
            PixelFormat::BGRA_NONPREMUL
            | PixelFormat::BGRA_PREMUL
            | PixelFormat::BGRA_BINARY
            | PixelFormat::RGBA_NONPREMUL
            | PixelFormat::RGBA_PREMUL
            | PixelFormat::RGBA_BINARY => self.all_pixels(4, |px| px[3] == 0xFF),
            PixelFormat::BGRA_NONPREMUL_4X16LE => {
                self.all_pixels(8, |px| px[6] == 0xFF && px[7] == 0xFF)
            }
            PixelFormat::YA_NONPREMUL => self.all_pixels(2, |px| px[1] == 0xFF),
            PixelFormat::INDEXED_BGRA_NONPREMUL
            | PixelFormat::INDEXED_BGRA_PREMUL
            | PixelFormat::INDEXED_BGRA_BINARY => {
                let palette = self.palette();
                let entry_opaque = |i: usize| palette.get(4 * i + 3) == Some(&0xFF);
                if (0..256).all(entry_opaque) {
                    return true;
                }
                self.all_pixels(1, |px| entry_opaque(px[0] as usize))
            }
            _ => false,
        }
    }

    fn all_pixels(&self, bpp: usize, pred: impl Fn(&[u8]) -> bool) -> bool {
        let w = self.pixcfg.width() as usize;
        let tab = &self.planes[INDEX_PLANE];
        (0..self.pixcfg.height() as usize)
            .all(|y| tab.row(y)[..w * bpp].chunks_exact(bpp).all(&pred))
    }
}

/// Little-endian bytes of one pixel of a direct format with a whole-row
/// fill path or a plain packing in `set_color_u32_at`.
fn direct_pixel_bytes(format: PixelFormat, color: u32) -> Option<PixelBytes> {
    let px = match format {
        PixelFormat::BGRA_PREMUL | PixelFormat::BGRX => PixelBytes::new(&color.to_le_bytes()),
        PixelFormat::BGR_565 => PixelBytes::new(&argb_to_rgb565(color).to_le_bytes()),
        PixelFormat::BGR => PixelBytes::new(&color.to_le_bytes()[..3]),
        PixelFormat::BGRA_NONPREMUL => {
            PixelBytes::new(&premul_to_nonpremul_u32(color).to_le_bytes())
        }
        PixelFormat::BGRA_NONPREMUL_4X16LE => {
            PixelBytes::new(&premul_u32_to_nonpremul_u64(color).to_le_bytes())
        }
        PixelFormat::BGRA_PREMUL_4X16LE => PixelBytes::new(&u32_to_u64(color).to_le_bytes()),
        PixelFormat::BGRA_BINARY => {
            let c = if color >> 31 != 0 { color | 0xFF000000 } else { 0 };
            PixelBytes::new(&c.to_le_bytes())
        }
        PixelFormat::RGB => PixelBytes::new(&swap_argb_abgr_u32(color).to_le_bytes()[..3]),
        PixelFormat::RGBA_NONPREMUL => PixelBytes::new(
            &premul_to_nonpremul_u32(swap_argb_abgr_u32(color)).to_le_bytes(),
        ),
        PixelFormat::RGBA_PREMUL | PixelFormat::RGBX => {
            PixelBytes::new(&swap_argb_abgr_u32(color).to_le_bytes())
        }
        _ => return None,
    };
    Some(px)
}

/// Up to 8 bytes of one packed pixel.
#[derive(Clone, Copy)]
struct PixelBytes {
    buf: [u8; 8],
    len: usize,
}

impl PixelBytes {
    fn new(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        Self {
            buf,
            len: bytes.len(),
        }
    }
}

impl core::ops::Deref for PixelBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

#[inline]
fn poke(dst: &mut [u8], bytes: &[u8]) {
    dst[..bytes.len()].copy_from_slice(bytes);
}

#[inline]
fn peek_u24le(p: &[u8]) -> u32 {
    u32::from_le_bytes([p[0], p[1], p[2], 0])
}

#[inline]
fn peek_u24be(p: &[u8]) -> u32 {
    u32::from_be_bytes([0, p[0], p[1], p[2]])
}

#[inline]
fn peek_u32le(p: &[u8]) -> u32 {
    u32::from_le_bytes([p[0], p[1], p[2], p[3]])
}

#[inline]
fn peek_u64le(p: &[u8]) -> u64 {
    u64::from_le_bytes([p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelSubsampling;
    use alloc::{vec, vec::Vec};

    fn config(format: PixelFormat, w: u32, h: u32) -> PixelConfig {
        PixelConfig::new(format, PixelSubsampling::NONE, w, h)
    }

    #[test]
    fn table_validation() {
        let mut data = vec![0u8; 10];
        assert!(Table::new(&mut data, 4, 3, 3).is_err());
        assert_eq!(
            Table::new(&mut data, 4, 3, 4).err(),
            Some(Error::BadArgumentLengthTooShort)
        );
        let t = Table::new(&mut data, 2, 3, 4).unwrap();
        assert_eq!(t.row(2).len(), 2);
        assert!(t.row(3).is_empty());
        // A single row may have any stride.
        assert!(Table::new(&mut data, 10, 1, 0).is_ok());
    }

    #[test]
    fn set_interleaved_errors() {
        let mut prim = vec![0u8; 64];
        let mut pal = vec![0u8; 1024];
        let mut attempt = |format: PixelFormat, w: u32, pal: &mut [u8]| {
            let tab = Table::packed(&mut prim, 16, 4).unwrap();
            PixelBuffer::from_interleaved(&config(format, w, 4), tab, pal).err()
        };

        assert_eq!(attempt(PixelFormat::YCBCR, 4, &mut pal), Some(Error::BadArgument));
        assert_eq!(
            attempt(PixelFormat::INDEXED_BGRA_BINARY, 4, &mut pal[..1023]),
            Some(Error::BadArgumentLengthTooShort)
        );
        assert_eq!(
            attempt(PixelFormat::from_repr(0x80000111), 4, &mut []),
            Some(Error::UnsupportedOption)
        );
        assert_eq!(
            attempt(PixelFormat::BGRA_PREMUL, 5, &mut []),
            Some(Error::BadArgumentLengthTooShort)
        );
        assert_eq!(attempt(PixelFormat::BGRA_PREMUL, 4, &mut []), None);
    }

    #[test]
    fn failed_set_leaves_null_buffer() {
        let mut prim = vec![0u8; 4];
        let mut pb = PixelBuffer::null();
        let tab = Table::packed(&mut prim, 4, 1).unwrap();
        let r = pb.set_interleaved(&config(PixelFormat::BGR, 2, 1), tab, &mut []);
        assert_eq!(r, Err(Error::BadArgumentLengthTooShort));
        assert!(!pb.pixel_config().is_valid());
        assert_eq!(pb.plane(0).unwrap().height(), 0);
    }

    #[test]
    fn set_interleaved_pins_palette() {
        let mut prim = vec![0u8; 4];
        let mut pal = vec![0u8; 2000];
        let tab = Table::packed(&mut prim, 2, 2).unwrap();
        let pb = PixelBuffer::from_interleaved(
            &config(PixelFormat::INDEXED_BGRA_NONPREMUL, 2, 2),
            tab,
            &mut pal,
        )
        .unwrap();
        assert_eq!(pb.palette().len(), 1024);
        let plane = pb.plane(COLOR_PLANE).unwrap();
        assert_eq!((plane.width(), plane.height(), plane.stride()), (1024, 1, 1024));
        assert!(pb.plane(4).is_none());
    }

    #[test]
    fn set_from_slice_splits_palette_from_front() {
        let mut mem = vec![0u8; 1024 + 6];
        mem[..4].copy_from_slice(&[1, 2, 3, 4]);
        mem[1024] = 9;
        let pb = PixelBuffer::from_slice(&config(PixelFormat::INDEXED_BGRA_PREMUL, 3, 2), &mut mem).unwrap();
        assert_eq!(&pb.palette()[..4], &[1, 2, 3, 4]);
        assert_eq!(pb.plane(0).unwrap().row(0), &[9, 0, 0]);
        assert_eq!(pb.color_u32_at(0, 1), 0x04030201);
    }

    #[test]
    fn set_from_slice_errors() {
        let mut mem = vec![0u8; 100];
        let mut attempt = |pixcfg: PixelConfig| PixelBuffer::from_slice(&pixcfg, &mut mem).err();

        assert_eq!(attempt(PixelConfig::null()), Some(Error::BadArgument));
        assert_eq!(attempt(config(PixelFormat::YCBCR, 2, 2)), Some(Error::UnsupportedOption));
        assert_eq!(
            attempt(config(PixelFormat::INDEXED_BGRA_BINARY, 2, 2)),
            Some(Error::BadArgumentLengthTooShort)
        );
        assert_eq!(
            attempt(config(PixelFormat::RGB, 6, 6)),
            Some(Error::BadArgumentLengthTooShort)
        );

        let pb = PixelBuffer::from_slice(&config(PixelFormat::RGB, 5, 6), &mut mem).unwrap();
        assert_eq!(pb.plane(0).unwrap().stride(), 15);
    }

    #[test]
    fn null_buffer() {
        let mut pb = PixelBuffer::null();
        assert_eq!(pb.color_u32_at(0, 0), 0);
        assert_eq!(pb.set_color_u32_at(0, 0, 0), Err(Error::BadReceiver));
        assert_eq!(
            pb.set_color_u32_fill_rect(RectIeU32::new(0, 0, 1, 1), 0),
            Err(Error::BadReceiver)
        );
        assert!(!pb.is_opaque());
        assert!(pb.palette_mut().is_empty());
    }

    #[test]
    fn get_set_out_of_range() {
        let mut mem = vec![0u8; 16];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::BGRA_PREMUL, 2, 2), &mut mem).unwrap();
        assert_eq!(pb.set_color_u32_at(2, 0, 0xFFFFFFFF), Err(Error::BadArgument));
        assert_eq!(pb.set_color_u32_at(0, 2, 0xFFFFFFFF), Err(Error::BadArgument));
        assert_eq!(pb.color_u32_at(2, 0), 0);
    }

    #[test]
    fn get_set_byte_layouts() {
        let mut mem = vec![0u8; 8];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::RGB, 2, 1), &mut mem).unwrap();
        pb.set_color_u32_at(1, 0, 0xFF112233).unwrap();
        assert_eq!(pb.plane(0).unwrap().row(0), &[0, 0, 0, 0x11, 0x22, 0x33]);
        assert_eq!(pb.color_u32_at(1, 0), 0xFF112233);

        let mut mem = vec![0u8; 4];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::Y_16BE, 2, 1), &mut mem).unwrap();
        pb.set_color_u32_at(0, 0, 0xFFFFFFFF).unwrap();
        pb.set_color_u32_at(1, 0, 0xFF808080).unwrap();
        assert_eq!(pb.plane(0).unwrap().row(0), &[0xFF, 0xFF, 0x80, 0x80]);
        assert_eq!(pb.color_u32_at(1, 0), 0xFF808080);

        let mut mem = vec![0u8; 2];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::YA_NONPREMUL, 1, 1), &mut mem).unwrap();
        pb.set_color_u32_at(0, 0, 0x80808080).unwrap();
        assert_eq!(pb.plane(0).unwrap().row(0), &[0xFF, 0x80]);
        assert_eq!(pb.color_u32_at(0, 0), 0x80808080);

        let mut mem = vec![0u8; 4];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::BGRA_BINARY, 1, 1), &mut mem).unwrap();
        pb.set_color_u32_at(0, 0, 0x80102030).unwrap();
        assert_eq!(pb.color_u32_at(0, 0), 0xFF102030);
        pb.set_color_u32_at(0, 0, 0x7F102030).unwrap();
        assert_eq!(pb.color_u32_at(0, 0), 0);
    }

    #[test]
    fn unsupported_formats() {
        let mut mem = vec![0u8; 16];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::RGBA_BINARY, 2, 2), &mut mem).unwrap();
        assert_eq!(pb.set_color_u32_at(0, 0, 0xFFFFFFFF), Err(Error::UnsupportedOption));
        assert_eq!(
            pb.set_color_u32_fill_rect(RectIeU32::new(0, 0, 1, 1), 0xFFFFFFFF),
            Err(Error::UnsupportedOption)
        );

        let mut mem = vec![0u8; 8];
        let pb = PixelBuffer::from_slice(&config(PixelFormat::YA_PREMUL, 2, 2), &mut mem).unwrap();
        assert_eq!(pb.color_u32_at(0, 0), 0);
        assert!(!pb.is_opaque());
    }

    #[test]
    fn indexed_set_picks_closest() {
        let mut mem = vec![0u8; 1024 + 4];
        mem[..4].copy_from_slice(&0xFF000000u32.to_le_bytes());
        mem[4..8].copy_from_slice(&0xFFFFFFFFu32.to_le_bytes());
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::INDEXED_BGRA_BINARY, 2, 2), &mut mem).unwrap();
        pb.set_color_u32_fill_rect(RectIeU32::new(1, 0, 2, 2), 0xFFEEEEEE).unwrap();
        assert_eq!(pb.plane(0).unwrap().row(0), &[0, 1]);
        assert_eq!(pb.plane(0).unwrap().row(1), &[0, 1]);
        assert_eq!(pb.color_u32_at(1, 1), 0xFFFFFFFF);
    }

    #[test]
    fn fill_rect_with_padding_and_offset() {
        let mut prim = vec![0xAAu8; 3 * 12];
        let tab = Table::new(&mut prim, 8, 3, 12).unwrap();
        let mut pb = PixelBuffer::from_interleaved(&config(PixelFormat::BGR_565, 4, 3), tab, &mut []).unwrap();
        pb.set_color_u32_fill_rect(RectIeU32::new(1, 1, 3, 3), 0xFFFFFFFF).unwrap();
        let plane = pb.plane(0).unwrap();
        assert_eq!(plane.row(0), &[0xAA; 8]);
        assert_eq!(plane.row(1), &[0xAA, 0xAA, 0xFF, 0xFF, 0xFF, 0xFF, 0xAA, 0xAA]);
        assert_eq!(plane.row(2), &[0xAA, 0xAA, 0xFF, 0xFF, 0xFF, 0xFF, 0xAA, 0xAA]);
        drop(pb);
        // Row padding is untouched.
        assert_eq!(&prim[8..12], &[0xAA; 4]);
    }

    #[test]
    fn fill_rect_bounds() {
        let mut mem = vec![0u8; 16];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::BGRX, 2, 2), &mut mem).unwrap();
        assert_eq!(pb.set_color_u32_fill_rect(RectIeU32::new(0, 0, 3, 1), 0), Err(Error::BadArgument));
        assert_eq!(pb.set_color_u32_fill_rect(RectIeU32::new(9, 9, 0, 0), 0), Ok(()));
        pb.set_color_u32_fill_rect(RectIeU32::new(0, 0, 2, 2), 0xFF010203).unwrap();
        let expected: Vec<u8> = [3u8, 2, 1, 0xFF].repeat(4);
        drop(pb);
        assert_eq!(mem, expected);
    }

    #[test]
    fn opacity_of_formats_without_alpha() {
        let mut mem = vec![0u8; 12];
        let pb = PixelBuffer::from_slice(&config(PixelFormat::BGR, 2, 2), &mut mem).unwrap();
        assert!(pb.is_opaque());
    }

    #[test]
    fn opacity_of_indexed() {
        let mut mem = vec![0xFFu8; 1024 + 4];
        mem[1024..].copy_from_slice(&[0, 1, 1, 0]);
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::INDEXED_BGRA_NONPREMUL, 2, 2), &mut mem).unwrap();
        assert!(pb.is_opaque());
        // An unreferenced transparent entry does not matter.
        pb.palette_mut()[4 * 7 + 3] = 0;
        assert!(pb.is_opaque());
        pb.palette_mut()[4 + 3] = 0x80;
        assert!(!pb.is_opaque());
    }

    #[test]
    fn opacity_of_wide_and_gray_alpha() {
        let mut mem = vec![0xFFu8; 16];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::BGRA_NONPREMUL_4X16LE, 2, 1), &mut mem).unwrap();
        assert!(pb.is_opaque());
        pb.plane_row_mut(0, 0)[14] = 0xFE;
        assert!(!pb.is_opaque());

        let mut mem = vec![0xFFu8; 4];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::YA_NONPREMUL, 2, 1), &mut mem).unwrap();
        assert!(pb.is_opaque());
        pb.plane_row_mut(0, 0)[0] = 0;
        assert!(pb.is_opaque());
        pb.plane_row_mut(0, 0)[3] = 0;
        assert!(!pb.is_opaque());
    }

    #[test]
    fn plane_rows_are_writable_but_planes_stay_put() {
        let mut mem = vec![0u8; 2 * 2 * 4];
        let mut pb = PixelBuffer::from_slice(&config(PixelFormat::BGRA_PREMUL, 2, 2), &mut mem).unwrap();
        pb.plane_row_mut(0, 1)[4..].copy_from_slice(&[0x30, 0x20, 0x10, 0xFF]);
        assert_eq!(pb.color_u32_at(1, 1), 0xFF102030);

        assert!(pb.plane_row_mut(0, 2).is_empty());
        assert!(pb.plane_row_mut(1, 0).is_empty());
        assert!(pb.plane_row_mut(NUM_PLANES_MAX_INCL, 0).is_empty());

        // The primary table is untouched by row access: every accessor still
        // sees the full 2x2 grid.
        assert_eq!(pb.plane(0).unwrap().height(), 2);
        pb.set_color_u32_fill_rect(RectIeU32::from_size(2, 2), 0xFF000000).unwrap();
        assert_eq!(pb.color_u32_at(1, 1), 0xFF000000);
        assert!(pb.is_opaque());
    }
}
