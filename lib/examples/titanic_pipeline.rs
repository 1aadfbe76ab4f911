//! Titanic Survival Model
//!
//! Trains the survival model from the bundled sample table, registers it in
//! a throwaway registry, loads the default version back and scores a few
//! new passengers:
//! - Config loaded from `config/model.toml`
//! - Categorical encoding and iterative age imputation
//! - RBF support vector classifier
//! - Versioned registry with a default pointer
//!
//! Run with: cargo run --example titanic_pipeline

use std::path::Path;

use anyhow::Context;
use titanic_survival::config::ModelConfig;
use titanic_survival::registry::{FsRegistry, ModelRegistry};
use titanic_survival::table::{Column, CsvDirectorySource, Table};
use titanic_survival::train;

fn new_passengers() -> anyhow::Result<Table> {
    let text = |v: &[Option<&str>]| Column::Text(v.iter().map(|s| s.map(str::to_string)).collect());
    let ints = |v: &[i64]| Column::Int(v.iter().map(|&x| Some(x)).collect());

    let table = Table::from_columns(vec![
        ("PCLASS", ints(&[1, 3, 2, 3])),
        ("SEX", text(&[Some("female"), Some("male"), Some("female"), Some("male")])),
        ("AGE", Column::Float(vec![Some(35.0), Some(27.0), None, Some(4.0)])),
        ("SIBSP", ints(&[1, 0, 0, 4])),
        ("PARCH", ints(&[0, 0, 0, 1])),
        ("FARE", Column::Float(vec![Some(83.475), Some(7.8958), Some(13.0), Some(29.125)])),
        // A missing port encodes as all zeros.
        ("EMBARKED", text(&[Some("S"), Some("S"), None, Some("Q")])),
    ])?;
    Ok(table)
}

fn main() -> anyhow::Result<()> {
    println!("=== Titanic Survival Model ===\n");

    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/model.toml");
    let mut config = ModelConfig::from_file(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let registry_dir = tempfile::tempdir()?;
    config.registry.root = registry_dir.path().to_path_buf();

    // 1. Train
    let source = CsvDirectorySource::new(&config.source.root);
    let package = train(&config, &source)?;
    println!("Trained {} ({})", config.name, package.version_name);
    println!("  {}", package.comment);
    for (method, signature) in &package.signatures {
        println!("  signature `{method}`:");
        for input in &signature.inputs {
            println!("    in  {input}");
        }
        for output in &signature.outputs {
            println!("    out {output}");
        }
    }

    // 2. Register
    let registry = FsRegistry::open(&config.registry.root)?;
    let registered = registry.register(&config.name, &package)?;
    println!(
        "\nRegistered {}/{} (default: {})",
        registered.name, registered.version, registered.is_default
    );

    // 3. Load the default version and predict
    let model = registry.load(&config.name, None)?;
    let passengers = new_passengers()?;
    let output = model.predict(&passengers)?;

    println!("\nPredictions:");
    if let Column::Int(values) = output.column("output")? {
        for (i, value) in values.iter().enumerate() {
            let verdict = match value {
                Some(1) => "survives",
                Some(_) => "does not survive",
                None => "unknown",
            };
            println!("  passenger {i}: {verdict}");
        }
    }

    Ok(())
}
