//! Command implementations.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::cli::args::*;
use crate::config::ModelConfig;
use crate::model::ModelPackage;
use crate::registry::{FsRegistry, ModelRegistry};
use crate::table::{CsvDirectorySource, Table};
use crate::training;

/// Execute a CLI command.
pub fn execute_command(args: CliArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, args.output_format),
        Command::Predict(predict_args) => predict(predict_args),
        Command::Versions(versions_args) => versions(versions_args, args.output_format),
    }
}

#[derive(Debug, Serialize)]
struct TrainSummary {
    model: String,
    version: String,
    score: Option<f64>,
    comment: String,
    registered: bool,
    location: Option<String>,
    materialized: String,
    runtime_version: Option<String>,
    packages: Vec<String>,
}

impl TrainSummary {
    fn new(config: &ModelConfig, package: &ModelPackage) -> Self {
        Self {
            model: config.name.clone(),
            version: package.version_name.clone(),
            score: package.score(),
            comment: package.comment.clone(),
            registered: false,
            location: None,
            materialized: config.materialized.to_string(),
            runtime_version: config.runtime_version.clone(),
            packages: config.packages.clone(),
        }
    }
}

fn train(args: &TrainArgs, format: OutputFormat) -> Result<()> {
    let config = ModelConfig::from_file(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    info!(
        model = %config.name,
        materialized = %config.materialized,
        "Training"
    );

    let source = CsvDirectorySource::new(&config.source.root);
    let package = training::train(&config, &source).context("training failed")?;
    let mut summary = TrainSummary::new(&config, &package);

    if args.dry_run {
        info!("Dry run: skipping registration");
    } else {
        let registry = FsRegistry::open(&config.registry.root).with_context(|| {
            format!("opening registry {}", config.registry.root.display())
        })?;
        let registered = registry
            .register(&config.name, &package)
            .context("registering model")?;
        summary.registered = true;
        summary.location = Some(registered.location.display().to_string());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Human => {
            println!("Model:    {}", summary.model);
            println!("Version:  {}", summary.version);
            println!("Comment:  {}", summary.comment);
            match &summary.location {
                Some(location) => println!("Stored:   {location}"),
                None => println!("Stored:   (dry run, not registered)"),
            }
        }
    }
    Ok(())
}

fn predict(args: &PredictArgs) -> Result<()> {
    let registry = FsRegistry::open(&args.registry)
        .with_context(|| format!("opening registry {}", args.registry.display()))?;
    let model = registry
        .load(&args.model, args.version.as_deref())
        .with_context(|| format!("loading model {}", args.model))?;
    let input = Table::read_csv(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    info!(rows = input.n_rows(), "Loaded input");

    let output = model.predict(&input).context("prediction failed")?;
    match &args.output {
        Some(path) => {
            output
                .write_csv(path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Wrote predictions");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output.write_csv_to(&mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    is_default: bool,
    classifier: String,
    comment: String,
    created_at: DateTime<Utc>,
}

/// One row per registered version of `model`, ascending.
fn version_rows(registry: &dyn ModelRegistry, model: &str) -> Result<Vec<VersionInfo>> {
    let default = registry.default_version(model)?;

    let mut rows = Vec::new();
    for version in registry.versions(model)? {
        let manifest = registry.manifest(model, &version)?;
        rows.push(VersionInfo {
            is_default: default.as_deref() == Some(version.as_str()),
            version,
            classifier: manifest.classifier,
            comment: manifest.comment,
            created_at: manifest.created_at,
        });
    }
    Ok(rows)
}

fn versions(args: &VersionsArgs, format: OutputFormat) -> Result<()> {
    let registry = FsRegistry::open(&args.registry)
        .with_context(|| format!("opening registry {}", args.registry.display()))?;
    let rows = version_rows(&registry, &args.model)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Human => {
            for row in &rows {
                let marker = if row.is_default { "*" } else { " " };
                println!(
                    "{marker} {}  {:<8}  {}  {}",
                    row.version,
                    row.classifier,
                    row.created_at.format("%Y-%m-%d %H:%M:%S"),
                    row.comment
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use crate::model::OUTPUT_COLUMN;
    use crate::table::Column;

    const MODEL: &str = "titanic_survival";

    fn bundled_table() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/titanic3.csv")
    }

    /// Writes a config next to a copy of the bundled table.
    fn workspace(dir: &Path) -> PathBuf {
        let data = dir.join("data");
        fs::create_dir_all(&data).unwrap();
        fs::copy(bundled_table(), data.join("titanic3.csv")).unwrap();

        let config = dir.join("model.toml");
        fs::write(
            &config,
            "[source]\nroot = \"data\"\ntable = \"titanic3\"\n\n[registry]\nroot = \"registry\"\n",
        )
        .unwrap();
        config
    }

    fn run(args: &[&str]) -> Result<()> {
        let mut argv = vec!["titanic-survival", "-q"];
        argv.extend_from_slice(args);
        execute_command(CliArgs::try_parse_from(argv)?)
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_train_dry_run_skips_registration() {
        let dir = tempfile::tempdir().unwrap();
        let config = workspace(dir.path());

        run(&["train", "--config", path_str(&config), "--dry-run"]).unwrap();
        assert!(!dir.path().join("registry").join(MODEL).exists());
    }

    #[test]
    fn test_train_then_predict_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = workspace(dir.path());
        let registry = dir.path().join("registry");
        let output = dir.path().join("out.csv");

        run(&["train", "--config", path_str(&config)]).unwrap();
        run(&[
            "predict",
            "--registry",
            path_str(&registry),
            "--model",
            MODEL,
            "--input",
            path_str(&bundled_table()),
            "--output",
            path_str(&output),
        ])
        .unwrap();

        let input = Table::read_csv(bundled_table()).unwrap();
        let written = Table::read_csv(&output).unwrap();
        assert_eq!(written.column_names().collect::<Vec<_>>(), vec![OUTPUT_COLUMN]);
        assert_eq!(written.n_rows(), input.n_rows());
        match written.column(OUTPUT_COLUMN).unwrap() {
            Column::Int(values) => assert!(values
                .iter()
                .all(|v| matches!(v, Some(0) | Some(1)))),
            other => panic!("unexpected output column {other:?}"),
        }
    }

    #[test]
    fn test_versions_marks_default_after_train() {
        let dir = tempfile::tempdir().unwrap();
        let config = workspace(dir.path());
        let registry_dir = dir.path().join("registry");

        run(&["train", "--config", path_str(&config)]).unwrap();
        run(&["versions", "--registry", path_str(&registry_dir), "--model", MODEL]).unwrap();

        let registry = FsRegistry::open(&registry_dir).unwrap();
        let rows = version_rows(&registry, MODEL).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_default);
        assert!(rows[0].version.starts_with('V'));
        assert_eq!(rows[0].classifier, "svc");
        assert!(rows[0].comment.starts_with("r2_score: "));
    }

    #[test]
    fn test_predict_unknown_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let registry = dir.path().join("registry");
        let err = run(&[
            "predict",
            "--registry",
            path_str(&registry),
            "--model",
            MODEL,
            "--input",
            path_str(&bundled_table()),
        ])
        .unwrap_err();
        assert!(format!("{err:#}").contains(MODEL));
    }
}
