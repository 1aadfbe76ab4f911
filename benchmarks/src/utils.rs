use std::time::{Duration, Instant};

/// Run a function and measure its execution time.
///
/// Returns `(result, elapsed_time)`.
pub fn time_fn<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Run a function `warmup + iterations` times and summarize the measured runs.
pub fn benchmark_with_warmup<F, R>(warmup: usize, iterations: usize, mut f: F) -> BenchmarkStats
where
    F: FnMut() -> R,
{
    for _ in 0..warmup {
        let _ = f();
    }
    let times = (0..iterations)
        .map(|_| time_fn(&mut f).1.as_secs_f64() * 1000.0)
        .collect();
    BenchmarkStats::from_times(times)
}

/// Statistics for benchmarking results.
#[derive(Debug, Clone)]
pub struct BenchmarkStats {
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
}

impl BenchmarkStats {
    /// Calculate statistics from a list of times in milliseconds.
    pub fn from_times(mut times: Vec<f64>) -> Self {
        if times.is_empty() {
            return Self {
                mean_ms: 0.0,
                std_dev_ms: 0.0,
                min_ms: 0.0,
                max_ms: 0.0,
                median_ms: 0.0,
            };
        }
        times.sort_by(f64::total_cmp);

        let n = times.len();
        let mean = times.iter().sum::<f64>() / n as f64;
        let variance = times.iter().map(|&t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (times[n / 2 - 1] + times[n / 2]) / 2.0
        } else {
            times[n / 2]
        };

        Self {
            mean_ms: mean,
            std_dev_ms: variance.sqrt(),
            min_ms: times[0],
            max_ms: times[n - 1],
            median_ms: median,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_fn_returns_result() {
        let (value, elapsed) = time_fn(|| 6 * 7);
        assert_eq!(value, 42);
        assert!(elapsed >= Duration::ZERO);
    }

    #[test]
    fn test_benchmark_with_warmup() {
        let mut calls = 0;
        let stats = benchmark_with_warmup(2, 5, || calls += 1);
        assert_eq!(calls, 7);
        assert!(stats.max_ms >= stats.min_ms);
    }

    #[test]
    fn test_benchmark_stats() {
        let stats = BenchmarkStats::from_times(vec![5.0, 1.0, 3.0, 2.0, 4.0]);
        assert!((stats.mean_ms - 3.0).abs() < 1e-6);
        assert!((stats.median_ms - 3.0).abs() < 1e-6);
        assert!((stats.min_ms - 1.0).abs() < 1e-6);
        assert!((stats.max_ms - 5.0).abs() < 1e-6);
    }
}
