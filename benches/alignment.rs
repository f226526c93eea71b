use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mzfeature::prelude::*;

/// Single-sample tables sharing the same ions with small m/z and rt drift
fn sample_tables(samples: usize, features: usize) -> Vec<FeatureTable> {
    (0..samples)
        .map(|s| {
            let sample = format!("sample_{}", s + 1);
            let mut table = FeatureTable::new(sample.as_str(), vec![sample.clone()]).unwrap();
            for i in 0..features {
                let mz = 150.0 + i as f64 * 0.37 + s as f64 * 0.0005;
                let rt = (i % 200) as f32 * 0.1 + s as f32 * 0.01;
                let feature = Feature::from_apex(sample.as_str(), mz, rt, 1e4);
                table
                    .push_row(FeatureTableRow::with_feature(i as u32 + 1, feature))
                    .unwrap();
            }
            table
        })
        .collect()
}

/// Benchmark the join aligner
fn bench_join_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("join_alignment");
    let engine = AlignmentEngine::new(AlignmentConfig::default()).unwrap();

    for features in [1_000, 5_000, 20_000] {
        let tables = sample_tables(4, features);
        group.throughput(Throughput::Elements((4 * features) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("4x{}", features)),
            &features,
            |b, _| {
                b.iter(|| {
                    let result = engine
                        .align("aligned", black_box(&tables), &TaskProgress::new())
                        .unwrap();
                    black_box(result);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark gap filling of a sparse aligned table
fn bench_gap_filling(c: &mut Criterion) {
    let mut group = c.benchmark_group("gap_filling");
    let filler = GapFiller::new(GapFillConfig::default()).unwrap();

    let raw: Vec<RawDataFile> = (0..4)
        .map(|s| {
            let scans = (0..500)
                .map(|n| {
                    let rt = n as f32 * 0.04;
                    let points = (0..200).map(|i| (150.0 + i as f64 * 0.37, 5e3 + (n % 7) as f32));
                    ScanBuilder::new(n + 1).retention_time(rt).add_points(points).build()
                })
                .collect();
            RawDataFile::new(format!("sample_{}", s + 1), scans)
        })
        .collect();

    for features in [200, 1_000] {
        let mut tables = sample_tables(4, features);
        // drop every other feature from the last sample
        let last = tables.pop().unwrap();
        let mut sparse = FeatureTable::new(last.name(), last.samples().to_vec()).unwrap();
        for row in last.rows().iter().step_by(2) {
            sparse.push_row(row.clone()).unwrap();
        }
        tables.push(sparse);
        let aligned = AlignmentEngine::new(AlignmentConfig::default())
            .unwrap()
            .align("aligned", &tables, &TaskProgress::new())
            .unwrap()
            .finished()
            .unwrap()
            .table;

        group.throughput(Throughput::Elements(aligned.empty_cell_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(features), &features, |b, _| {
            b.iter(|| {
                let mut table = aligned.clone();
                let result = filler.fill(&mut table, black_box(&raw), &TaskProgress::new());
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_join_alignment, bench_gap_filling);
criterion_main!(benches);
