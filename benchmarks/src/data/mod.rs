//! Benchmark datasets.

mod passengers;

pub use passengers::{Passenger, PassengerDataset};
