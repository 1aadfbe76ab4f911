// Held-out evaluation of the survival pipeline on synthetic passengers.

use std::process;

use benchmarks::{time_fn, Metrics, PassengerDataset};
use chrono::NaiveDate;
use titanic_survival::classifier::{ClassifierKind, LogisticRegression};
use titanic_survival::table::Column;
use titanic_survival::{train_table, TrainOptions};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = PassengerDataset::synthetic(1000, 42);
    let (train, test) = dataset.split(0.8);
    let train_table_data = train.to_table()?;
    let test_table = test.to_table()?;
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid date")?;

    println!("Survival pipeline benchmark");
    println!("  train rows: {}, test rows: {}", train.len(), test.len());
    println!();

    let candidates = [
        ("svc", TrainOptions::default()),
        (
            "logistic",
            TrainOptions {
                classifier: ClassifierKind::Logistic(LogisticRegression::new()),
                ..TrainOptions::default()
            },
        ),
    ];

    for (name, options) in candidates {
        let (package, fit_time) = time_fn(|| train_table(&train_table_data, &options, date));
        let package = package?;
        let (output, predict_time) = time_fn(|| package.model.predict(&test_table));
        let predicted: Vec<i64> = match output?.column("output")? {
            Column::Int(values) => values.iter().map(|v| v.unwrap_or(0)).collect(),
            _ => return Err("output column is not integer".into()),
        };

        let metrics = Metrics::calculate_all(&test.labels(), &predicted);
        metrics.print(name);
        println!("  Train score: {:.4}", package.score().unwrap_or(f64::NAN));
        println!("  Fit time:     {:.1} ms", fit_time.as_secs_f64() * 1000.0);
        println!("  Predict time: {:.1} ms", predict_time.as_secs_f64() * 1000.0);
        println!();
    }

    println!("Criterion benchmarks:");
    println!("  cargo bench --package benchmarks --bench training");
    println!("  cargo bench --package benchmarks --bench predict");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
