use archmage::SimdToken;
use criterion::{BenchmarkGroup, Criterion, Throughput, measurement::WallTime};
use pixconv::{PALETTE_BYTE_LENGTH, PixelBlend, PixelFormat, PixelSwizzler};

// === SIMD tier detection ===

fn probe<T: SimdToken>() -> &'static str {
    if T::summon().is_some() {
        "available"
    } else {
        "not available"
    }
}

fn print_simd_info() {
    eprintln!("=== SIMD Tier Detection ===");
    #[cfg(target_arch = "x86_64")]
    {
        eprintln!(
            "  AVX2+FMA (x86-64-v3):    {}",
            probe::<archmage::X64V3Token>()
        );
        eprintln!(
            "  SSE4.2 (x86-64-v2):      {}",
            probe::<archmage::X64V2Token>()
        );
    }
    #[cfg(target_arch = "aarch64")]
    {
        eprintln!(
            "  Arm64-v2:                {}",
            probe::<archmage::Arm64V2Token>()
        );
        eprintln!(
            "  NEON:                    {}",
            probe::<archmage::NeonToken>()
        );
    }
    #[cfg(target_arch = "wasm32")]
    {
        eprintln!(
            "  WASM SIMD128:            {}",
            probe::<archmage::Wasm128Token>()
        );
    }
    eprintln!("  Scalar:                  always available");
    eprintln!("===========================");
}

// === Scalar disable/enable via archmage ===

fn disable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(true);
}

fn enable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(false);
}

// === Benchmark helpers ===

const W: usize = 1920;
const H: usize = 1080;

fn gradient(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 251) as u8).collect()
}

fn palette() -> Vec<u8> {
    (0..PALETTE_BYTE_LENGTH).map(|i| (i * 7 % 256) as u8).collect()
}

/// Benchmark one conversion of a 1080p frame, best SIMD tier and scalar.
fn bench_swizzle(
    c: &mut Criterion,
    name: &str,
    dst_format: PixelFormat,
    src_format: PixelFormat,
    blend: PixelBlend,
) {
    let src_palette = palette();
    let mut dst_palette = vec![0u8; PALETTE_BYTE_LENGTH];
    let mut s = PixelSwizzler::new();
    s.prepare(dst_format, &mut dst_palette, src_format, &src_palette, blend)
        .unwrap();

    let src = gradient(W * H * s.src_bytes_per_pixel());
    let dst_len = W * H * s.dst_bytes_per_pixel();

    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Bytes(src.len() as u64));
    run(&mut group, &s, &dst_palette, &src, dst_len);
    group.finish();
}

fn run(
    group: &mut BenchmarkGroup<WallTime>,
    s: &PixelSwizzler,
    dst_palette: &[u8],
    src: &[u8],
    dst_len: usize,
) {
    group.bench_function("pixconv", |b| {
        let mut dst = gradient(dst_len);
        b.iter(|| s.swizzle_interleaved_from_slice(&mut dst, dst_palette, src));
    });

    disable_all_simd();
    group.bench_function("pixconv_scalar", |b| {
        let mut dst = gradient(dst_len);
        b.iter(|| s.swizzle_interleaved_from_slice(&mut dst, dst_palette, src));
    });
    enable_all_simd();
}

// === Custom main for tier detection before criterion runs ===

fn main() {
    print_simd_info();

    use PixelFormat as F;
    let mut criterion = Criterion::default().configure_from_args();
    let cases = [
        ("rgba_to_bgra", F::BGRA_PREMUL, F::RGBA_PREMUL, PixelBlend::Src),
        ("bgr_to_bgra", F::BGRA_PREMUL, F::BGR, PixelBlend::Src),
        ("rgb_to_bgra", F::BGRA_PREMUL, F::RGB, PixelBlend::Src),
        ("y_to_bgra", F::BGRA_PREMUL, F::Y, PixelBlend::Src),
        ("rgb_to_bgr", F::BGR, F::RGB, PixelBlend::Src),
        ("bgrx_to_bgr", F::BGR, F::BGRX, PixelBlend::Src),
        ("bgrx_to_rgb", F::RGB, F::BGRX, PixelBlend::Src),
        ("rgba_nonpremul_to_bgra_premul", F::BGRA_PREMUL, F::RGBA_NONPREMUL, PixelBlend::Src),
        ("bgra_premul_over_bgra_premul", F::BGRA_PREMUL, F::BGRA_PREMUL, PixelBlend::SrcOver),
        ("bgra_16_to_bgra_premul", F::BGRA_PREMUL, F::BGRA_NONPREMUL_4X16LE, PixelBlend::Src),
        ("indexed_to_bgra_premul", F::BGRA_PREMUL, F::INDEXED_BGRA_NONPREMUL, PixelBlend::Src),
        ("indexed_over_bgr", F::BGR, F::INDEXED_BGRA_NONPREMUL, PixelBlend::SrcOver),
    ];
    for (name, dst, src, blend) in cases {
        bench_swizzle(&mut criterion, name, dst, src, blend);
    }
    criterion.final_summary();
}
