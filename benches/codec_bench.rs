// In benches/codec_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use fpdc::{CodecConfig, ExecutionMode, TraceCodec};

// --- MOCK TRACE GENERATION ---

/// Generates a smooth, highly predictable D-channel trace.
fn generate_smooth_trace(len: usize, dim: usize) -> Vec<u64> {
    (0..len)
        .map(|i| {
            let channel = (i % dim) as f64;
            let t = (i / dim) as f64;
            (channel * 100.0 + t * 0.25).to_bits()
        })
        .collect()
}

/// Generates a noisy trace whose low mantissa bits are random.
fn generate_noisy_trace(len: usize, dim: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    (0..len)
        .map(|i| {
            let base = (i % dim) as f64 * 10.0;
            (base + rng.random::<f64>()).to_bits()
        })
        .collect()
}

// --- Benchmark Suite ---

const BENCH_ELEMENTS: usize = 1 << 20; // 8 MiB of words
const BENCH_DIM: usize = 3;

fn bench_codec(c: &mut Criterion) {
    let smooth = generate_smooth_trace(BENCH_ELEMENTS, BENCH_DIM);
    let noisy = generate_noisy_trace(BENCH_ELEMENTS, BENCH_DIM);

    let modes = [
        ("Sequential", ExecutionMode::Sequential),
        ("Parallel", ExecutionMode::Parallel { threads: None }),
    ];

    let mut group = c.benchmark_group("Trace Codec");
    group.throughput(Throughput::Bytes((BENCH_ELEMENTS * 8) as u64));

    for (mode_name, mode) in modes {
        let codec = TraceCodec::new(CodecConfig {
            dimensionality: BENCH_DIM,
            execution: mode,
            ..CodecConfig::default()
        })
        .unwrap();
        let bounds = codec.partition(BENCH_ELEMENTS).unwrap();

        for (data_name, data) in [("Smooth", &smooth), ("Noisy", &noisy)] {
            let compressed = codec.compress(data, &bounds).unwrap();

            group.bench_function(format!("Compress {} ({})", mode_name, data_name), |b| {
                b.iter(|| black_box(codec.compress(black_box(data), &bounds)))
            });
            group.bench_function(format!("Decompress {} ({})", mode_name, data_name), |b| {
                b.iter(|| black_box(codec.decompress(black_box(compressed.as_bytes()), &bounds)))
            });
        }
    }

    group.finish();
}

// These two lines generate the main function and register the benchmark group.
criterion_group!(benches, bench_codec);
criterion_main!(benches);
