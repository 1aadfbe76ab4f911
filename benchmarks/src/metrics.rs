/// Metrics for evaluating binary classifiers with labels `0` and `1`.
pub struct Metrics;

impl Metrics {
    /// Fraction of predictions equal to the truth.
    ///
    /// # Panics
    ///
    /// Panics if the slices differ in length.
    pub fn accuracy(y_true: &[i64], y_pred: &[i64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );
        if y_true.is_empty() {
            return 0.0;
        }
        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
        correct as f64 / y_true.len() as f64
    }

    /// Confusion counts with `1` as the positive class.
    pub fn confusion(y_true: &[i64], y_pred: &[i64]) -> ConfusionMatrix {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );
        let mut m = ConfusionMatrix::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t == 1, p == 1) {
                (true, true) => m.true_positive += 1,
                (false, true) => m.false_positive += 1,
                (false, false) => m.true_negative += 1,
                (true, false) => m.false_negative += 1,
            }
        }
        m
    }

    pub fn calculate_all(y_true: &[i64], y_pred: &[i64]) -> ClassificationMetrics {
        let confusion = Self::confusion(y_true, y_pred);
        ClassificationMetrics {
            accuracy: Self::accuracy(y_true, y_pred),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
            confusion,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    /// TP / (TP + FP); 0 when nothing was predicted positive.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// TP / (TP + FN); 0 when there are no positives.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

impl ClassificationMetrics {
    pub fn print(&self, label: &str) {
        println!("{label}:");
        println!("  Accuracy:  {:.4}", self.accuracy);
        println!("  Precision: {:.4}", self.precision);
        println!("  Recall:    {:.4}", self.recall);
        println!("  F1:        {:.4}", self.f1);
        println!(
            "  TP={} FP={} TN={} FN={}",
            self.confusion.true_positive,
            self.confusion.false_positive,
            self.confusion.true_negative,
            self.confusion.false_negative
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(Metrics::accuracy(&[1, 0, 1, 0], &[1, 0, 0, 0]), 0.75);
        assert_eq!(Metrics::accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_confusion_and_scores() {
        let m = Metrics::calculate_all(&[1, 1, 0, 0, 1], &[1, 0, 1, 0, 1]);
        assert_eq!(
            m.confusion,
            ConfusionMatrix {
                true_positive: 2,
                false_positive: 1,
                true_negative: 1,
                false_negative: 1,
            }
        );
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_predictions() {
        let m = Metrics::calculate_all(&[1, 0], &[0, 0]);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        Metrics::accuracy(&[1], &[1, 0]);
    }
}
