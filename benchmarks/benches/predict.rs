use std::hint::black_box;

use benchmarks::PassengerDataset;
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use titanic_survival::{train_table, SurvivalModel, TrainOptions};

/// Train a model once for prediction benchmarks
fn train_model_for_prediction() -> SurvivalModel {
    let table = PassengerDataset::synthetic(800, 42)
        .to_table()
        .expect("valid synthetic table");
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    train_table(&table, &TrainOptions::default(), date)
        .expect("Failed to train model")
        .model
}

fn bench_predict_batch(c: &mut Criterion) {
    let model = train_model_for_prediction();
    let mut group = c.benchmark_group("predict_batch");

    for batch_size in [1, 10, 100, 1000] {
        let input = PassengerDataset::synthetic(batch_size, 99)
            .to_table()
            .expect("valid synthetic table");
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &input, |b, input| {
            b.iter(|| black_box(model.predict(black_box(input))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_predict_batch);
criterion_main!(benches);
