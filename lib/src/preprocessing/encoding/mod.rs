//! Categorical feature encoding against declared domains.
//!
//! Domains are fixed ahead of time rather than learned from data, so the
//! indicator layout depends only on the declaration and never on which
//! values happen to appear in a batch.
//!
//! ```ignore
//! // domain [C, Q, S], column ["S", "X", missing]
//! // -> [[0,0,1], [0,0,0], [0,0,0]]
//! ```

mod one_hot;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::table::Cell;

pub use one_hot::OneHotEncoder;

/// One declared category value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Int(i64),
    Text(String),
}

impl Category {
    /// Whether `cell` holds this category.
    ///
    /// Integer categories also match integral float cells, since numeric
    /// columns with gaps are often stored as floats.
    pub fn matches(&self, cell: Cell<'_>) -> bool {
        match (self, cell) {
            (Category::Int(v), Cell::Int(x)) => *v == x,
            (Category::Int(v), Cell::Float(x)) => x.fract() == 0.0 && x == *v as f64,
            (Category::Text(v), Cell::Text(x)) => v == x,
            _ => false,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Int(v) => write!(f, "{v}"),
            Category::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Category {
    fn from(v: i64) -> Self {
        Category::Int(v)
    }
}

impl From<&str> for Category {
    fn from(v: &str) -> Self {
        Category::Text(v.to_string())
    }
}
