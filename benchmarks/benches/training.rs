use std::hint::black_box;

use benchmarks::PassengerDataset;
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use titanic_survival::classifier::{
    Classifier, ClassifierKind, LogisticRegression, SupportVectorClassifier,
};
use titanic_survival::preprocessing::{
    FittedTransformer, IterativeImputer, Preprocessor, Transformer,
};
use titanic_survival::{train_table, TrainOptions};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

fn bench_train_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("train_pipeline");
    group.sample_size(10);

    for rows in [100, 400, 1000] {
        let table = PassengerDataset::synthetic(rows, 42)
            .to_table()
            .expect("valid synthetic table");

        group.bench_with_input(BenchmarkId::new("svc", rows), &table, |b, table| {
            let options = TrainOptions::default();
            b.iter(|| black_box(train_table(black_box(table), &options, date())));
        });
        group.bench_with_input(BenchmarkId::new("logistic", rows), &table, |b, table| {
            let options = TrainOptions {
                classifier: ClassifierKind::Logistic(LogisticRegression::new()),
                ..TrainOptions::default()
            };
            b.iter(|| black_box(train_table(black_box(table), &options, date())));
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let table = PassengerDataset::synthetic(1000, 7)
        .to_table()
        .expect("valid synthetic table");
    let features = Preprocessor::default()
        .transform(&table)
        .expect("preprocess");
    let imputer = IterativeImputer::new()
        .fit(&features.values)
        .expect("imputer fit");
    let x = imputer.transform(&features.values).expect("impute");
    let y = table
        .column("SURVIVED")
        .and_then(|c| c.to_f64("SURVIVED"))
        .expect("labels");
    let y = ndarray::Array1::from(y);

    let mut group = c.benchmark_group("stages");
    group.sample_size(10);
    group.bench_function("preprocess", |b| {
        b.iter(|| black_box(Preprocessor::default().transform(black_box(&table))))
    });
    group.bench_function("imputer_fit", |b| {
        b.iter(|| black_box(IterativeImputer::new().fit(black_box(&features.values))))
    });
    group.bench_function("svc_fit", |b| {
        b.iter(|| black_box(SupportVectorClassifier::new().fit(black_box(&x), black_box(&y))))
    });
    group.finish();
}

criterion_group!(benches, bench_train_pipeline, bench_stages);
criterion_main!(benches);
