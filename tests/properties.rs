use pixconv::color::{
    LUMA_B, LUMA_G, LUMA_R, argb_to_rgb565, composite_nonpremul_nonpremul_u32,
    nonpremul_to_premul_u32, premul_to_nonpremul_u32, premul_u32_to_gray8, rgb565_to_argb,
};
use pixconv::{
    Error, PALETTE_BYTE_LENGTH, PixelBlend, PixelBuffer, PixelConfig, PixelFormat,
    PixelSubsampling, PixelSwizzler, RectIeU32, closest_element,
};

const SWIZZLE_DSTS: [PixelFormat; 9] = [
    PixelFormat::Y,
    PixelFormat::BGR_565,
    PixelFormat::BGR,
    PixelFormat::BGRA_NONPREMUL,
    PixelFormat::BGRA_NONPREMUL_4X16LE,
    PixelFormat::BGRA_PREMUL,
    PixelFormat::RGB,
    PixelFormat::RGBA_NONPREMUL,
    PixelFormat::RGBA_PREMUL,
];

fn swizzler(dst: PixelFormat, src: PixelFormat, blend: PixelBlend) -> PixelSwizzler {
    let mut s = PixelSwizzler::new();
    s.prepare(dst, &mut [], src, &[], blend).unwrap();
    s
}

// --- Scenarios ---

#[test]
fn scenario_rgba_nonpremul_to_bgra_premul() {
    let s = swizzler(
        PixelFormat::BGRA_PREMUL,
        PixelFormat::RGBA_NONPREMUL,
        PixelBlend::Src,
    );
    let src = [0xFF, 0x00, 0x00, 0x80, 0x00, 0xFF, 0x00, 0xFF];
    let mut dst = [0u8; 8];
    assert_eq!(s.swizzle_interleaved_from_slice(&mut dst, &[], &src), 2);
    assert_eq!(dst, [0x00, 0x00, 0x80, 0x80, 0x00, 0xFF, 0x00, 0xFF]);
}

#[test]
fn scenario_indexed_to_gray() {
    let mut src_palette = vec![0u8; PALETTE_BYTE_LENGTH];
    // Opaque red, opaque white, half-transparent green.
    src_palette[..12].copy_from_slice(&[
        0x00, 0x00, 0xFF, 0xFF, //
        0xFF, 0xFF, 0xFF, 0xFF, //
        0x00, 0xFF, 0x00, 0x80,
    ]);
    let mut dst_palette = vec![0u8; PALETTE_BYTE_LENGTH];

    let mut s = PixelSwizzler::new();
    s.prepare(
        PixelFormat::Y,
        &mut dst_palette,
        PixelFormat::INDEXED_BGRA_NONPREMUL,
        &src_palette,
        PixelBlend::Src,
    )
    .unwrap();

    let red = premul_u32_to_gray8(0xFFFF0000);
    assert_eq!(&dst_palette[..4], &[red, red, red, 0xFF]);
    assert_eq!(&dst_palette[4..8], &[0xFF, 0xFF, 0xFF, 0xFF]);
    let green = premul_u32_to_gray8(nonpremul_to_premul_u32(0x8000FF00));
    assert_eq!(&dst_palette[8..12], &[green, green, green, 0x80]);

    let mut dst = [0u8; 3];
    assert_eq!(
        s.swizzle_interleaved_from_slice(&mut dst, &dst_palette, &[1, 0, 2]),
        3
    );
    assert_eq!(dst, [0xFF, red, green]);
}

// --- Color model ---

/// Every channel value the color grids below visit.
fn grid() -> impl Iterator<Item = u32> {
    (0..=255u32).step_by(17)
}

fn rgb_grid() -> impl Iterator<Item = u32> {
    grid().flat_map(|r| grid().flat_map(move |g| grid().map(move |b| (r << 16) | (g << 8) | b)))
}

#[test]
fn premul_round_trip_when_opaque_and_alpha_preserved() {
    for rgb in rgb_grid() {
        for a in 0..=255u32 {
            let c = (a << 24) | rgb;
            let premul = nonpremul_to_premul_u32(c);
            assert_eq!(premul >> 24, a, "{c:#010X}");
            for shift in [0, 8, 16] {
                assert!((premul >> shift) & 0xFF <= a, "{c:#010X}");
            }
            let back = premul_to_nonpremul_u32(premul);
            assert_eq!(back >> 24, a, "{c:#010X}");
            if a == 0xFF {
                assert_eq!(back, c);
            }
        }
    }
}

#[test]
fn luma_weights_sum_to_unity() {
    assert_eq!(LUMA_R + LUMA_G + LUMA_B, 65536);
}

#[test]
fn rgb565_round_trip() {
    // (shift, quantization step) per channel. Packing truncates, so the
    // error stays under one step.
    let channels = [(16u32, 8u32), (8, 4), (0, 8)];
    for (shift, _) in channels {
        for others in [0x000000u32, 0x5A5A5A, 0xFFFFFF, 0x10C080] {
            for v in 0..=255u32 {
                let c = 0xFF000000 | (others & !(0xFF << shift)) | (v << shift);
                let back = rgb565_to_argb(argb_to_rgb565(c));
                for (s, limit) in channels {
                    let want = (c >> s) & 0xFF;
                    let got = (back >> s) & 0xFF;
                    assert!(got.abs_diff(want) < limit, "{c:#010X} -> {back:#010X}");
                }
            }
        }
    }
    for bits in 0..=u16::MAX {
        assert_eq!(argb_to_rgb565(rgb565_to_argb(bits)), bits);
    }
}

#[test]
fn over_transparent_nonpremul_dst_returns_src() {
    let dsts = [0x00000000u32, 0x00FFFFFF, 0x00102030, 0x00C08040];
    for rgb in rgb_grid() {
        for a in 0..=255u32 {
            let src = (a << 24) | rgb;
            for dst in dsts {
                assert_eq!(composite_nonpremul_nonpremul_u32(dst, src), src, "{dst:#010X}");
            }
        }
    }
}

#[test]
fn closest_element_ties_and_empty() {
    let mut palette = vec![0u8; PALETTE_BYTE_LENGTH];
    palette[0..4].copy_from_slice(&[0x10, 0x10, 0x10, 0xFF]);
    palette[4..8].copy_from_slice(&[0x10, 0x10, 0x10, 0xFF]);
    assert_eq!(
        closest_element(&palette, PixelFormat::INDEXED_BGRA_PREMUL, 0xFF101010),
        0
    );
    assert_eq!(
        closest_element(&[], PixelFormat::INDEXED_BGRA_PREMUL, 0xFF101010),
        0
    );
}

// --- Swizzler ---

#[test]
fn transparent_black_over_leaves_every_dst_untouched() {
    for dst_format in SWIZZLE_DSTS {
        let s = swizzler(dst_format, PixelFormat::BGRA_PREMUL, PixelBlend::SrcOver);
        let mut dst = [0x5Au8; 64];
        let bpp = dst_format.bytes_per_pixel();
        assert_eq!(
            s.swizzle_interleaved_transparent_black(&mut dst, &[], 1000),
            64 / bpp,
            "{dst_format}"
        );
        assert_eq!(dst, [0x5A; 64], "{dst_format}");
    }
}

#[test]
fn capacity_clamping() {
    let s = swizzler(PixelFormat::BGR, PixelFormat::BGRA_NONPREMUL, PixelBlend::Src);
    let src: Vec<u8> = (0..40).collect();
    for dst_len in 0..20 {
        for src_len in 0..20 {
            let mut dst = vec![0xEEu8; dst_len];
            let n = s.swizzle_interleaved_from_slice(&mut dst, &[], &src[..src_len]);
            assert_eq!(n, (dst_len / 3).min(src_len / 4), "{dst_len} {src_len}");
            assert!(dst[n * 3..].iter().all(|&b| b == 0xEE));
        }
    }
}

#[test]
fn reader_consumes_exactly_what_was_converted() {
    let s = swizzler(PixelFormat::RGBA_PREMUL, PixelFormat::Y_16LE, PixelBlend::Src);
    let src = [0x00, 0x10, 0x00, 0x20, 0x00, 0x30, 0x99];
    let mut reader: &[u8] = &src;
    let mut dst = [0u8; 8];
    assert_eq!(s.swizzle_interleaved_from_reader(&mut dst, &[], &mut reader), 2);
    assert_eq!(dst, [0x10, 0x10, 0x10, 0xFF, 0x20, 0x20, 0x20, 0xFF]);
    assert_eq!(reader, &[0x00, 0x30, 0x99]);
}

#[test]
fn unsupported_pairs() {
    let mut s = PixelSwizzler::new();
    assert_eq!(
        s.prepare(PixelFormat::BGR, &mut [], PixelFormat::YCBCR, &[], PixelBlend::Src),
        Err(Error::UnsupportedOption)
    );
    assert_eq!(
        s.prepare(PixelFormat::BGR, &mut [], PixelFormat::RGBA_BINARY, &[], PixelBlend::Src),
        Err(Error::UnsupportedOption)
    );
    assert!(!s.is_prepared());
}

// --- Pixel buffer ---

fn config(format: PixelFormat, width: u32, height: u32) -> PixelConfig {
    PixelConfig::new(format, PixelSubsampling::NONE, width, height)
}

#[test]
fn fill_rect_reads_back() {
    let gray = [0xFF000000u32, 0xFFFFFFFF];
    let lossless = [0xFF000000u32, 0xFFFFFFFF, 0xFF102030, 0xFFC08040];
    // 565-representable colors round-trip exactly.
    let rgb565 = [
        0xFF000000u32,
        0xFFFFFFFF,
        rgb565_to_argb(0x1234),
        rgb565_to_argb(0xC408),
    ];
    let cases: [(PixelFormat, &[u32]); 15] = [
        (PixelFormat::Y, &gray),
        (PixelFormat::Y_16LE, &gray),
        (PixelFormat::Y_16BE, &gray),
        (PixelFormat::YA_NONPREMUL, &gray),
        (PixelFormat::BGR_565, &rgb565),
        (PixelFormat::BGR, &lossless),
        (PixelFormat::BGRA_NONPREMUL, &lossless),
        (PixelFormat::BGRA_NONPREMUL_4X16LE, &lossless),
        (PixelFormat::BGRA_PREMUL, &lossless),
        (PixelFormat::BGRA_PREMUL_4X16LE, &lossless),
        (PixelFormat::BGRX, &lossless),
        (PixelFormat::RGB, &lossless),
        (PixelFormat::RGBA_NONPREMUL, &lossless),
        (PixelFormat::RGBA_PREMUL, &lossless),
        (PixelFormat::RGBX, &lossless),
    ];
    let rect = RectIeU32::new(1, 1, 4, 3);
    for (format, colors) in cases {
        for &color in colors {
            let mut mem = vec![0x33u8; 5 * 4 * 8];
            let mut pb = PixelBuffer::from_slice(&config(format, 5, 4), &mut mem).unwrap();
            pb.set_color_u32_fill_rect(rect, color).unwrap();
            for y in 0..4 {
                for x in 0..5 {
                    if rect.contains(x, y) {
                        assert_eq!(pb.color_u32_at(x, y), color, "{format} {color:#X} ({x},{y})");
                    }
                }
            }
        }
    }
}

#[test]
fn fill_rect_keeps_channel_order() {
    let mut mem = vec![0u8; 2 * 4];
    let mut pb = PixelBuffer::from_slice(&config(PixelFormat::RGBA_PREMUL, 2, 1), &mut mem).unwrap();
    pb.set_color_u32_fill_rect(RectIeU32::from_size(2, 1), 0xFF102030)
        .unwrap();
    assert_eq!(mem, [0x10, 0x20, 0x30, 0xFF, 0x10, 0x20, 0x30, 0xFF]);

    let mut mem = vec![0u8; 3];
    let mut pb = PixelBuffer::from_slice(&config(PixelFormat::BGR, 1, 1), &mut mem).unwrap();
    pb.set_color_u32_fill_rect(RectIeU32::from_size(1, 1), 0xFFC08040)
        .unwrap();
    assert_eq!(mem, [0x40, 0x80, 0xC0]);
}

#[test]
fn fill_rect_indexed_picks_palette_entry() {
    let mut mem = vec![0u8; PALETTE_BYTE_LENGTH + 6];
    mem[8..12].copy_from_slice(&[0x00, 0x00, 0xFF, 0xFF]);
    let mut pb =
        PixelBuffer::from_slice(&config(PixelFormat::INDEXED_BGRA_PREMUL, 3, 2), &mut mem).unwrap();
    pb.set_color_u32_fill_rect(RectIeU32::from_size(3, 2), 0xFFFF0000)
        .unwrap();
    assert_eq!(pb.color_u32_at(2, 1), 0xFFFF0000);
}

#[test]
fn unset_buffer_is_bad_receiver() {
    let mut pb = PixelBuffer::null();
    assert_eq!(
        pb.set_color_u32_fill_rect(RectIeU32::from_size(1, 1), 0),
        Err(Error::BadReceiver)
    );
    assert!(!pb.is_opaque());
}

#[test]
fn is_opaque_flips_on_one_translucent_pixel() {
    let mut mem = vec![0xFFu8; 3 * 2 * 4];
    let mut pb =
        PixelBuffer::from_slice(&config(PixelFormat::BGRA_NONPREMUL, 3, 2), &mut mem).unwrap();
    assert!(pb.is_opaque());
    pb.set_color_u32_at(2, 1, 0xFEFEFEFE).unwrap();
    assert!(!pb.is_opaque());
}
