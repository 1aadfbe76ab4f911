//! One-hot encoding for categorical columns with a fixed domain.

use ndarray::Array2;

use super::Category;
use crate::table::{Cell, Column};

/// One-hot encoder over a declared category domain.
///
/// Produces one indicator column per domain value, in declaration order.
/// Missing cells and values outside the domain encode as all zeros.
///
/// # Example
/// ```
/// use titanic_survival::preprocessing::{Category, OneHotEncoder};
/// use titanic_survival::table::Column;
///
/// let encoder = OneHotEncoder::new(vec![Category::from("C"), "Q".into(), "S".into()]);
/// let column = Column::Text(vec![Some("S".into()), Some("X".into())]);
///
/// let encoded = encoder.encode(&column);
/// assert_eq!(encoded.row(0).to_vec(), vec![0.0, 0.0, 1.0]);
/// assert_eq!(encoded.row(1).to_vec(), vec![0.0, 0.0, 0.0]);
/// ```
#[derive(Clone, Debug)]
pub struct OneHotEncoder {
    categories: Vec<Category>,
}

impl OneHotEncoder {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of indicator columns produced.
    pub fn n_features_out(&self) -> usize {
        self.categories.len()
    }

    /// Encodes `column` into a `(rows, categories)` indicator block.
    pub fn encode(&self, column: &Column) -> Array2<f64> {
        let rows = column.len();
        let mut out = Array2::<f64>::zeros((rows, self.categories.len()));

        for row in 0..rows {
            let cell = column.cell(row);
            if cell == Cell::Missing {
                continue;
            }
            if let Some(idx) = self.categories.iter().position(|c| c.matches(cell)) {
                out[[row, idx]] = 1.0;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pclass_encoder() -> OneHotEncoder {
        OneHotEncoder::new(vec![Category::Int(1), Category::Int(2), Category::Int(3)])
    }

    #[test]
    fn test_encode_int_domain() {
        let column = Column::Int(vec![Some(3), Some(1), Some(2)]);
        let encoded = pclass_encoder().encode(&column);

        assert_eq!(encoded.dim(), (3, 3));
        assert_eq!(encoded.row(0).to_vec(), vec![0.0, 0.0, 1.0]);
        assert_eq!(encoded.row(1).to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(encoded.row(2).to_vec(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_encode_float_column_against_int_domain() {
        let column = Column::Float(vec![Some(2.0), None]);
        let encoded = pclass_encoder().encode(&column);
        assert_eq!(encoded.row(0).to_vec(), vec![0.0, 1.0, 0.0]);
        assert_eq!(encoded.row(1).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_category_gives_zeros() {
        let column = Column::Int(vec![Some(4), Some(0), Some(1)]);
        let encoded = pclass_encoder().encode(&column);
        assert_eq!(encoded.row(0).to_vec(), vec![0.0, 0.0, 0.0]);
        assert_eq!(encoded.row(1).to_vec(), vec![0.0, 0.0, 0.0]);
        assert_eq!(encoded.row(2).to_vec(), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_text_category_gives_zeros() {
        let column = Column::Text(vec![Some("Male".into())]);
        let encoder = OneHotEncoder::new(vec!["male".into(), "female".into()]);
        assert_eq!(encoder.encode(&column).row(0).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_missing_cell_is_never_an_error() {
        let column = Column::Text(vec![None]);
        let encoder = OneHotEncoder::new(vec!["male".into(), "female".into()]);
        let encoded = encoder.encode(&column);
        assert_eq!(encoded.row(0).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_column() {
        let column = Column::Int(vec![]);
        let encoded = pclass_encoder().encode(&column);
        assert_eq!(encoded.dim(), (0, 3));
    }
}
