use archmage::SimdToken;
use criterion::{BenchmarkGroup, Criterion, Throughput, measurement::WallTime};
use texpack::{FormatCode, MappedRegion, MemoryDevice, SourceImage, convert, create_and_upload};

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
    }
    #[cfg(target_arch = "aarch64")]
    {
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

// === Naive scalar baselines ===

fn naive_swap_rows(src: &[u8], dst: &mut [u8], row_bytes: usize, src_stride: usize, dst_stride: usize) {
    for (s, d) in src.chunks(src_stride).zip(dst.chunks_mut(dst_stride)) {
        for (s, d) in s[..row_bytes].chunks_exact(4).zip(d.chunks_exact_mut(4)) {
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
            d[3] = s[3];
        }
    }
}

fn naive_duplicate_rows(src: &[u8], dst: &mut [u8], width: usize, src_stride: usize, dst_stride: usize) {
    for (s, d) in src.chunks(src_stride).zip(dst.chunks_mut(dst_stride)) {
        for (i, &v) in s[..width].iter().enumerate() {
            d[2 * i] = v;
            d[2 * i + 1] = v;
        }
    }
}

// === Benchmark helpers ===

const W: usize = 1920;
const H: usize = 1080;
// Emulated framebuffers are usually wider than the visible area.
const SRC_STRIDE: usize = 2048;
// Row pitch padding a driver might choose.
const DST_PAD: usize = 64;

/// Benchmark `convert` with 3 variants: texpack (best SIMD), texpack_scalar, naive.
fn bench_convert(
    group: &mut BenchmarkGroup<WallTime>,
    format: FormatCode,
    swap: bool,
    src_texel: usize,
    dst_texel: usize,
    naive_fn: fn(&[u8], &mut [u8], usize, usize, usize),
) {
    let src: Vec<u8> = (0..SRC_STRIDE * src_texel * H).map(|i| (i % 251) as u8).collect();
    let dst_stride = W * dst_texel + DST_PAD;
    let image = SourceImage::new(&src, W as u32, H as u32, format).with_stride(SRC_STRIDE as u32);

    group.bench_function("texpack", |b| {
        let mut dst = vec![0u8; dst_stride * H];
        b.iter(|| convert(&image, &mut MappedRegion::new(&mut dst, dst_stride), swap).unwrap());
    });

    disable_all_simd();
    group.bench_function("texpack_scalar", |b| {
        let mut dst = vec![0u8; dst_stride * H];
        b.iter(|| convert(&image, &mut MappedRegion::new(&mut dst, dst_stride), swap).unwrap());
    });
    enable_all_simd();

    group.bench_function("naive", |b| {
        let mut dst = vec![0u8; dst_stride * H];
        let n = if dst_texel == 4 { W * 4 } else { W };
        b.iter(|| naive_fn(&src, &mut dst, n, SRC_STRIDE * src_texel, dst_stride));
    });
}

// === Benchmark groups ===

fn bench_swap_red_blue(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_red_blue");
    group.throughput(Throughput::Bytes((W * H * 4) as u64));
    bench_convert(&mut group, FormatCode::A8R8G8B8, true, 4, 4, naive_swap_rows);
    group.finish();
}

fn bench_duplicate_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate_bytes");
    group.throughput(Throughput::Bytes((W * H * 2) as u64));
    bench_convert(&mut group, FormatCode::A8P8, false, 1, 2, naive_duplicate_rows);
    group.finish();
}

fn bench_create_and_upload(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_and_upload");
    group.throughput(Throughput::Bytes((1024 * 1024 * 4) as u64));
    let src: Vec<u8> = (0..1024 * 1024 * 4).map(|i| (i % 251) as u8).collect();
    let image = SourceImage::new(&src, 1024, 1024, FormatCode::A8R8G8B8);
    group.bench_function("a8r8g8b8_1024", |b| {
        let mut device = MemoryDevice::new();
        b.iter(|| create_and_upload(&mut device, &image, false).unwrap());
    });
    group.finish();
}

// === Custom main for tier detection before criterion runs ===

fn main() {
    print_simd_info();

    let mut criterion = Criterion::default().configure_from_args();
    bench_swap_red_blue(&mut criterion);
    bench_duplicate_bytes(&mut criterion);
    bench_create_and_upload(&mut criterion);
    criterion.final_summary();
}
