use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use titanic_survival::table::{Column, SchemaError, Table};

/// One passenger record. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub pclass: i64,
    pub sex: &'static str,
    pub age: Option<f64>,
    pub sibsp: i64,
    pub parch: i64,
    pub fare: f64,
    pub embarked: Option<&'static str>,
    pub survived: i64,
}

/// Synthetic passenger list resembling the Titanic manifest.
///
/// Survival odds rise for women, first class and children, so the label is
/// learnable but noisy. About 20% of ages and 0.5% of ports are missing,
/// close to the real data.
#[derive(Debug, Clone)]
pub struct PassengerDataset {
    passengers: Vec<Passenger>,
}

impl PassengerDataset {
    /// Generates `n` passengers deterministically from `seed`.
    pub fn synthetic(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let passengers = (0..n).map(|_| Self::sample(&mut rng)).collect();
        Self { passengers }
    }

    fn sample(rng: &mut StdRng) -> Passenger {
        let pclass = match rng.random::<f64>() {
            p if p < 0.25 => 1,
            p if p < 0.46 => 2,
            _ => 3,
        };
        let sex = if rng.random_bool(0.36) { "female" } else { "male" };
        let true_age: f64 = (rng.random::<f64>() * 70.0 + 0.5).round();
        let age = (!rng.random_bool(0.2)).then_some(true_age);
        let sibsp = if rng.random_bool(0.3) { rng.random_range(1..4) } else { 0 };
        let parch = if rng.random_bool(0.25) { rng.random_range(1..3) } else { 0 };
        let base_fare: f64 = match pclass {
            1 => 60.0,
            2 => 20.0,
            _ => 8.0,
        };
        let fare = ((base_fare * (0.5 + rng.random::<f64>() * 1.5)) * 100.0).round() / 100.0;
        let embarked = match rng.random::<f64>() {
            p if p < 0.005 => None,
            p if p < 0.2 => Some("C"),
            p if p < 0.3 => Some("Q"),
            _ => Some("S"),
        };

        let mut logit: f64 = -1.2;
        if sex == "female" {
            logit += 2.4;
        }
        logit += match pclass {
            1 => 1.0,
            2 => 0.3,
            _ => -0.5,
        };
        if true_age < 12.0 {
            logit += 1.0;
        }
        let p_survive = 1.0 / (1.0 + (-logit).exp());
        let survived = i64::from(rng.random_bool(p_survive));

        Passenger {
            pclass,
            sex,
            age,
            sibsp,
            parch,
            fare,
            embarked,
            survived,
        }
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Splits into a leading train part with `ratio` of the rows and the rest.
    pub fn split(&self, ratio: f64) -> (Self, Self) {
        let cut = ((self.passengers.len() as f64) * ratio).round() as usize;
        let cut = cut.min(self.passengers.len());
        (
            Self {
                passengers: self.passengers[..cut].to_vec(),
            },
            Self {
                passengers: self.passengers[cut..].to_vec(),
            },
        )
    }

    /// Observed labels.
    pub fn labels(&self) -> Vec<i64> {
        self.passengers.iter().map(|p| p.survived).collect()
    }

    /// Table with the passenger columns and `SURVIVED`.
    pub fn to_table(&self) -> Result<Table, SchemaError> {
        let p = &self.passengers;
        Table::from_columns(vec![
            ("PCLASS", Column::Int(p.iter().map(|r| Some(r.pclass)).collect())),
            (
                "SEX",
                Column::Text(p.iter().map(|r| Some(r.sex.to_string())).collect()),
            ),
            ("AGE", Column::Float(p.iter().map(|r| r.age).collect())),
            ("SIBSP", Column::Int(p.iter().map(|r| Some(r.sibsp)).collect())),
            ("PARCH", Column::Int(p.iter().map(|r| Some(r.parch)).collect())),
            ("FARE", Column::Float(p.iter().map(|r| Some(r.fare)).collect())),
            (
                "EMBARKED",
                Column::Text(p.iter().map(|r| r.embarked.map(str::to_string)).collect()),
            ),
            ("SURVIVED", Column::Int(p.iter().map(|r| Some(r.survived)).collect())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_is_deterministic() {
        let a = PassengerDataset::synthetic(50, 7);
        let b = PassengerDataset::synthetic(50, 7);
        assert_eq!(a.passengers(), b.passengers());
    }

    #[test]
    fn test_has_both_labels_and_missing_ages() {
        let data = PassengerDataset::synthetic(500, 1);
        let labels = data.labels();
        assert!(labels.contains(&0) && labels.contains(&1));
        assert!(data.passengers().iter().any(|p| p.age.is_none()));
    }

    #[test]
    fn test_split() {
        let data = PassengerDataset::synthetic(10, 3);
        let (train, test) = data.split(0.8);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(data.to_table().unwrap().n_rows(), 10);
    }
}
