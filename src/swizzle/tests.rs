extern crate alloc;
extern crate std;
use super::*;
use crate::color::{nonpremul_to_premul_u32, premul_u32_to_gray8};
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

// --- Helpers to generate test data ---

fn make_4bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels * 4).map(|i| (i % 251) as u8).collect()
}

fn make_3bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels * 3).map(|i| (i % 251) as u8).collect()
}

fn make_1bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels).map(|i| (i % 251) as u8).collect()
}

fn make_palette() -> Vec<u8> {
    (0..PALETTE_BYTE_LENGTH)
        .map(|i| (i as u8).wrapping_mul(37).wrapping_add(11))
        .collect()
}

// --- Reference implementations for comparison ---

fn ref_swap_rgbx_bgrx(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
    out
}

fn ref_3_to_4(src: &[u8], swap: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / 3 * 4);
    for s in src.chunks_exact(3) {
        if swap {
            out.extend_from_slice(&[s[2], s[1], s[0], 0xFF]);
        } else {
            out.extend_from_slice(&[s[0], s[1], s[2], 0xFF]);
        }
    }
    out
}

fn ref_y_to_4bpp(src: &[u8]) -> Vec<u8> {
    src.iter().flat_map(|&y| [y, y, y, 0xFF]).collect()
}

fn ref_swap_rgb_bgr(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for px in out.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    out
}

fn ref_4_to_3(src: &[u8], swap: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / 4 * 3);
    for s in src.chunks_exact(4) {
        if swap {
            out.extend_from_slice(&[s[2], s[1], s[0]]);
        } else {
            out.extend_from_slice(&s[..3]);
        }
    }
    out
}

const TEST_PIXEL_COUNTS: &[usize] = &[1, 2, 3, 7, 8, 15, 16, 31, 32, 33, 63, 64, 65, 100];

fn prepared(dst: PixelFormat, src: PixelFormat, blend: PixelBlend) -> PixelSwizzler {
    let mut s = PixelSwizzler::new();
    s.prepare_with_allowlist(DstAllowList::ALL, dst, &mut [], src, &[], blend)
        .unwrap();
    s
}

// ===========================================================================
// Accelerated leaves under every SIMD tier
// ===========================================================================

#[test]
fn permutation_swap_rgbx_bgrx() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_4bpp(n);
            let mut dst = vec![0u8; n * 4];
            assert_eq!(swap_rgbx_bgrx(&mut dst, &[], &src), n);
            assert_eq!(dst, ref_swap_rgbx_bgrx(&src), "swap_rgbx_bgrx n={n} tier={perm}");
        }
    });
    std::eprintln!("swap_rgbx_bgrx: {report}");
}

#[test]
fn permutation_bgr_to_bgrw() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_3bpp(n);
            let mut dst = vec![0u8; n * 4];
            assert_eq!(bgr_to_bgrw(&mut dst, &[], &src), n);
            assert_eq!(dst, ref_3_to_4(&src, false), "bgr_to_bgrw n={n} tier={perm}");
        }
    });
    std::eprintln!("bgr_to_bgrw: {report}");
}

#[test]
fn permutation_rgb_to_bgrw() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_3bpp(n);
            let mut dst = vec![0u8; n * 4];
            assert_eq!(rgb_to_bgrw(&mut dst, &[], &src), n);
            assert_eq!(dst, ref_3_to_4(&src, true), "rgb_to_bgrw n={n} tier={perm}");
        }
    });
    std::eprintln!("rgb_to_bgrw: {report}");
}

#[test]
fn permutation_y_to_4bpp() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_1bpp(n);
            let mut dst = vec![0u8; n * 4];
            assert_eq!(y_to_4bpp(&mut dst, &[], &src), n);
            assert_eq!(dst, ref_y_to_4bpp(&src), "y_to_4bpp n={n} tier={perm}");
        }
    });
    std::eprintln!("y_to_4bpp: {report}");
}

#[test]
fn permutation_swap_rgb_bgr() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_3bpp(n);
            let mut dst = vec![0u8; n * 3];
            assert_eq!(swap_rgb_bgr(&mut dst, &[], &src), n);
            assert_eq!(dst, ref_swap_rgb_bgr(&src), "swap_rgb_bgr n={n} tier={perm}");
        }
    });
    std::eprintln!("swap_rgb_bgr: {report}");
}

#[test]
fn permutation_bgrx_to_bgr() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_4bpp(n);
            let mut dst = vec![0u8; n * 3];
            assert_eq!(bgrx_to_bgr(&mut dst, &[], &src), n);
            assert_eq!(dst, ref_4_to_3(&src, false), "bgrx_to_bgr n={n} tier={perm}");
        }
    });
    std::eprintln!("bgrx_to_bgr: {report}");
}

#[test]
fn permutation_bgrx_to_rgb() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_4bpp(n);
            let mut dst = vec![0u8; n * 3];
            assert_eq!(bgrx_to_rgb(&mut dst, &[], &src), n);
            assert_eq!(dst, ref_4_to_3(&src, true), "bgrx_to_rgb n={n} tier={perm}");
        }
    });
    std::eprintln!("bgrx_to_rgb: {report}");
}

// Uneven slices: the leaf converts the smaller side and never touches bytes
// past it.
#[test]
fn permutation_clamps_to_shorter_slice() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_3bpp(n);
            let mut dst = vec![0xAAu8; (n / 2) * 4 + 3];
            let converted = bgr_to_bgrw(&mut dst, &[], &src);
            assert_eq!(converted, n / 2, "n={n} tier={perm}");
            let expected = ref_3_to_4(&src[..converted * 3], false);
            assert_eq!(&dst[..converted * 4], &expected[..], "n={n} tier={perm}");
            assert_eq!(&dst[converted * 4..], &[0xAA; 3], "n={n} tier={perm}");

            let mut dst = vec![0u8; n * 3 + 2];
            let short_src = &src[..src.len() - 1];
            let converted = swap_rgb_bgr(&mut dst, &[], short_src);
            assert_eq!(converted, n - 1, "n={n} tier={perm}");
            assert_eq!(&dst[converted * 3..], &vec![0u8; dst.len() - converted * 3][..]);
        }
    });
    std::eprintln!("clamps_to_shorter_slice: {report}");
}

// ===========================================================================
// Scalar leaves
// ===========================================================================

#[test]
fn gray_16_leaves() {
    let src = [0x12, 0x34, 0xAB, 0xCD];
    let mut y = [0u8; 2];
    assert_eq!(y_16be_to_y(&mut y, &[], &src), 2);
    assert_eq!(y, [0x12, 0xAB]);
    assert_eq!(y_16le_to_y(&mut y, &[], &src), 2);
    assert_eq!(y, [0x34, 0xCD]);

    let mut swapped = [0u8; 4];
    assert_eq!(swap_y_16(&mut swapped, &[], &src), 2);
    assert_eq!(swapped, [0x34, 0x12, 0xCD, 0xAB]);
}

#[test]
fn bgr_565_expands_full_scale() {
    // 0xF800 is pure red.
    let src = [0x00, 0xF8];
    let mut bgr = [0u8; 3];
    assert_eq!(bgr_565_to_bgr(&mut bgr, &[], &src), 1);
    assert_eq!(bgr, [0x00, 0x00, 0xFF]);
    let mut rgbw = [0u8; 4];
    assert_eq!(bgr_565_to_rgbw(&mut rgbw, &[], &src), 1);
    assert_eq!(rgbw, [0xFF, 0x00, 0x00, 0xFF]);
}

#[test]
fn premul_over_transparent_src_keeps_dst() {
    let mut dst = [10, 20, 30, 255, 40, 50, 60, 255];
    let src = [0, 0, 0, 0, 1, 2, 3, 255];
    assert_eq!(bgra_premul_to_bgra_premul_over(&mut dst, &[], &src), 2);
    assert_eq!(dst, [10, 20, 30, 255, 1, 2, 3, 255]);
}

#[test]
fn nonpremul_over_transparent_dst_returns_src() {
    let mut dst = [99, 98, 97, 0];
    let src = [0x10, 0x20, 0x30, 0x40];
    bgra_nonpremul_to_bgra_nonpremul_over(&mut dst, &[], &src);
    assert_eq!(dst, src);
}

#[test]
fn index_leaves_need_a_full_palette() {
    let palette = make_palette();
    let src = [0u8, 1, 255];
    let mut dst = [0u8; 12];
    assert_eq!(index_to_4bpp(&mut dst, &palette[..1020], &src), 0);
    assert_eq!(dst, [0; 12]);
    assert_eq!(index_to_4bpp(&mut dst, &palette, &src), 3);
    assert_eq!(&dst[..4], &palette[..4]);
    assert_eq!(&dst[4..8], &palette[4..8]);
    assert_eq!(&dst[8..], &palette[1020..]);
}

#[test]
fn binary_over_skips_transparent_entries() {
    let mut palette = vec![0u8; PALETTE_BYTE_LENGTH];
    palette[4..8].copy_from_slice(&[1, 2, 3, 0xFF]);
    let mut dst = [7u8; 6];
    assert_eq!(index_to_3bpp_binary_over(&mut dst, &palette, &[0, 1]), 2);
    assert_eq!(dst, [7, 7, 7, 1, 2, 3]);
}

// ===========================================================================
// PixelSwizzler
// ===========================================================================

#[test]
fn rgba_nonpremul_to_bgra_premul() {
    let s = prepared(PixelFormat::BGRA_PREMUL, PixelFormat::RGBA_NONPREMUL, PixelBlend::Src);
    let src = [0xFF, 0x00, 0x00, 0x80, 0x00, 0xFF, 0x00, 0xFF];
    let mut dst = [0u8; 8];
    assert_eq!(s.swizzle_interleaved_from_slice(&mut dst, &[], &src), 2);
    assert_eq!(dst, [0x00, 0x00, 0x80, 0x80, 0x00, 0xFF, 0x00, 0xFF]);
    assert_eq!(s.routine_name(), Some("bgra_nonpremul_to_rgba_premul"));
}

#[test]
fn accelerated_routines_are_selected() {
    let cases = [
        (PixelFormat::BGRA_PREMUL, PixelFormat::RGBA_PREMUL, "swap_rgbx_bgrx"),
        (PixelFormat::BGRX, PixelFormat::BGR, "bgr_to_bgrw"),
        (PixelFormat::BGRA_PREMUL, PixelFormat::RGB, "rgb_to_bgrw"),
        (PixelFormat::RGBX, PixelFormat::Y, "y_to_4bpp"),
        (PixelFormat::RGB, PixelFormat::BGR, "swap_rgb_bgr"),
        (PixelFormat::BGR, PixelFormat::BGRX, "bgrx_to_bgr"),
        (PixelFormat::RGB, PixelFormat::BGRX, "bgrx_to_rgb"),
    ];
    for (dst, src, name) in cases {
        let s = prepared(dst, src, PixelBlend::Src);
        assert_eq!(s.routine_name(), Some(name), "{src} -> {dst}");
    }
}

#[test]
fn indexed_to_y_squashes_palette() {
    let src_palette = make_palette();
    let mut dst_palette = vec![0u8; PALETTE_BYTE_LENGTH];
    let mut s = PixelSwizzler::new();
    s.prepare_with_allowlist(
        DstAllowList::ALL,
        PixelFormat::Y,
        &mut dst_palette,
        PixelFormat::INDEXED_BGRA_NONPREMUL,
        &src_palette,
        PixelBlend::Src,
    )
    .unwrap();

    for (d, e) in dst_palette.chunks_exact(4).zip(src_palette.chunks_exact(4)) {
        let argb = u32::from_le_bytes([e[0], e[1], e[2], e[3]]);
        let gray = premul_u32_to_gray8(nonpremul_to_premul_u32(argb));
        assert_eq!(d, &[gray, gray, gray, e[3]]);
    }

    let mut dst = [0u8; 2];
    assert_eq!(s.swizzle_interleaved_from_slice(&mut dst, &dst_palette, &[3, 200]), 2);
    assert_eq!(dst, [dst_palette[12], dst_palette[800]]);
}

#[test]
fn indexed_source_requires_full_palettes() {
    let mut s = PixelSwizzler::new();
    let mut short = vec![0u8; PALETTE_BYTE_LENGTH - 1];
    let full = make_palette();
    let err = s
        .prepare(
            PixelFormat::BGRA_PREMUL,
            &mut short,
            PixelFormat::INDEXED_BGRA_BINARY,
            &full,
            PixelBlend::Src,
        )
        .unwrap_err();
    assert_eq!(err, Error::BadArgumentLengthTooShort);
    assert!(!s.is_prepared());
}

#[test]
fn binary_indexed_over_indexed_is_unsupported() {
    let src_palette = make_palette();
    let mut dst_palette = vec![0u8; PALETTE_BYTE_LENGTH];
    let mut s = PixelSwizzler::new();
    let err = s
        .prepare_with_allowlist(
            DstAllowList::ALL,
            PixelFormat::INDEXED_BGRA_BINARY,
            &mut dst_palette,
            PixelFormat::INDEXED_BGRA_BINARY,
            &src_palette,
            PixelBlend::SrcOver,
        )
        .unwrap_err();
    assert_eq!(err, Error::UnsupportedOption);
    assert!(!s.is_prepared());
}

#[test]
fn rejected_formats() {
    let mut s = PixelSwizzler::new();
    let mut check = |dst: PixelFormat, src: PixelFormat, want: Error| {
        let got = s.prepare_with_allowlist(DstAllowList::ALL, dst, &mut [], src, &[], PixelBlend::Src);
        assert_eq!(got, Err(want), "{src} -> {dst}");
    };
    check(PixelFormat::BGR, PixelFormat::YCBCR, Error::UnsupportedOption);
    check(PixelFormat::INVALID, PixelFormat::BGR, Error::UnsupportedOption);
    check(PixelFormat::BGR, PixelFormat::RGBX, Error::UnsupportedOption);
    check(PixelFormat::A, PixelFormat::BGR, Error::UnsupportedOption);
}

#[test]
fn allowlist_rejects_before_anything_else() {
    let allow = DstAllowList::NONE.with(PixelFormat::Y);
    let mut s = PixelSwizzler::new();
    let err = s
        .prepare_with_allowlist(
            allow,
            PixelFormat::BGR,
            &mut [],
            PixelFormat::YCBCR,
            &[],
            PixelBlend::Src,
        )
        .unwrap_err();
    assert_eq!(err, Error::DisabledByConfiguration);

    assert!(DstAllowList::RESTRICTED.contains(PixelFormat::RGBA_PREMUL));
    assert!(!DstAllowList::RESTRICTED.contains(PixelFormat::BGRX));
    assert!(!DstAllowList::RESTRICTED.contains(PixelFormat::CMYK));
    assert!(DstAllowList::ALL.contains(PixelFormat::CMYK));
    assert!(!DstAllowList::ALL.without(PixelFormat::Y).contains(PixelFormat::Y));
}

#[test]
fn unprepared_swizzler_converts_nothing() {
    let s = PixelSwizzler::default();
    let mut dst = [5u8; 8];
    let mut reader: &[u8] = &[1, 2, 3, 4];
    assert_eq!(s.swizzle_interleaved_from_slice(&mut dst, &[], &[1, 2, 3, 4]), 0);
    assert_eq!(s.swizzle_interleaved_from_reader(&mut dst, &[], &mut reader), 0);
    assert_eq!(reader.len(), 4);
    assert_eq!(s.swizzle_interleaved_transparent_black(&mut dst, &[], 2), 0);
    assert_eq!(dst, [5; 8]);
}

#[test]
fn reader_advances_by_pixels_read() {
    let s = prepared(PixelFormat::BGRA_PREMUL, PixelFormat::BGR, PixelBlend::Src);
    let src = make_3bpp(5);
    let mut reader: &[u8] = &src[..14];
    let mut dst = [0u8; 4 * 8];

    assert_eq!(s.swizzle_interleaved_from_reader(&mut dst, &[], &mut reader), 4);
    assert_eq!(reader, &src[12..14]);

    let mut reader: &[u8] = &src;
    assert_eq!(
        s.limited_swizzle_u32_interleaved_from_reader(2, &mut dst, &[], &mut reader),
        2
    );
    assert_eq!(reader, &src[6..]);
    assert_eq!(&dst[..8], &ref_3_to_4(&src[..6], false)[..]);

    assert_eq!(
        s.limited_swizzle_u32_interleaved_from_reader(0, &mut dst, &[], &mut reader),
        0
    );
    assert_eq!(reader, &src[6..]);
}

#[test]
fn transparent_black() {
    let s = prepared(PixelFormat::BGR, PixelFormat::BGRA_PREMUL, PixelBlend::Src);
    let mut dst = [9u8; 10];
    assert_eq!(s.swizzle_interleaved_transparent_black(&mut dst, &[], 2), 2);
    assert_eq!(dst, [0, 0, 0, 0, 0, 0, 9, 9, 9, 9]);
    assert_eq!(s.swizzle_interleaved_transparent_black(&mut dst, &[], u64::MAX), 3);
    assert_eq!(dst, [0, 0, 0, 0, 0, 0, 0, 0, 0, 9]);

    let s = prepared(PixelFormat::BGR, PixelFormat::BGRA_PREMUL, PixelBlend::SrcOver);
    let mut dst = [9u8; 9];
    assert_eq!(s.swizzle_interleaved_transparent_black(&mut dst, &[], 5), 3);
    assert_eq!(dst, [9; 9]);
}

#[test]
fn transparent_black_survives_missing_routine() {
    let mut s = PixelSwizzler::new();
    let err = s.prepare_with_allowlist(
        DstAllowList::ALL,
        PixelFormat::RGBX,
        &mut [],
        PixelFormat::BGRA_NONPREMUL,
        &[],
        PixelBlend::Src,
    );
    assert_eq!(err, Err(Error::UnsupportedOption));
    assert!(!s.is_prepared());
    assert_eq!(s.dst_bytes_per_pixel(), 4);
    let mut dst = [1u8; 8];
    assert_eq!(s.swizzle_interleaved_transparent_black(&mut dst, &[], 2), 2);
    assert_eq!(dst, [0; 8]);
}
