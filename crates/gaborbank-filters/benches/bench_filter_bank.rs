use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gaborbank_filters::{
    gabor_filter_bank_with_strategy, log_gabor_filter_bank_with_strategy, ExecutionStrategy,
    GaborBankParams, LogGaborBankParams,
};
use gaborbank_grid::KernelSize;

fn bench_filter_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("FilterBank");

    let gabor = GaborBankParams {
        n_scales: 4,
        n_orientations: 8,
        ..Default::default()
    };
    let log_gabor = LogGaborBankParams {
        n_scales: 4,
        n_orientations: 8,
        ..Default::default()
    };

    for side in [32, 128, 256].iter() {
        let size = KernelSize {
            width: *side,
            height: *side,
        };

        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelElements,
            ExecutionStrategy::Chunked(4),
        ] {
            let parameter_string = format!("{}x{}/{:?}", side, side, strategy);

            group.bench_with_input(
                BenchmarkId::new("gabor_bank_f32", &parameter_string),
                &(size, strategy),
                |b, (s, st)| {
                    b.iter(|| black_box(gabor_filter_bank_with_strategy::<f32>(*s, &gabor, *st)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("log_gabor_bank_f32", &parameter_string),
                &(size, strategy),
                |b, (s, st)| {
                    b.iter(|| {
                        black_box(log_gabor_filter_bank_with_strategy::<f32>(
                            *s, &log_gabor, *st,
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filter_bank);
criterion_main!(benches);
