//! Benchmark utilities for the titanic-survival pipeline.
//!
//! - Synthetic passenger data with a learnable survival signal
//! - Classification metrics (accuracy, precision, recall, F1)
//! - Timing helpers

pub mod data;
pub mod metrics;
pub mod utils;

pub use data::{Passenger, PassengerDataset};
pub use metrics::{ClassificationMetrics, ConfusionMatrix, Metrics};
pub use utils::{benchmark_with_warmup, time_fn, BenchmarkStats};
