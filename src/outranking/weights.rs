use serde::Serialize;
use std::ops::Deref;

use super::criteria::Criteria;
use super::error::ElectreError;
use super::matrix::Table;
use super::normalize::NormalizedMatrix;

/// Normalized matrix with every column scaled by its criterion weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightedMatrix(Table<f64>);

impl Deref for WeightedMatrix {
    type Target = Table<f64>;

    fn deref(&self) -> &Table<f64> {
        &self.0
    }
}

impl WeightedMatrix {
    pub(crate) fn from_table(table: Table<f64>) -> Self {
        Self(table)
    }
}

/// `w_ij = x_ij * weight_j` for every cell.
///
/// The criteria must name exactly the matrix columns, in any order.
pub fn apply_weights(normalized: &NormalizedMatrix, criteria: &Criteria) -> Result<WeightedMatrix, ElectreError> {
    let weights = criteria
        .aligned_weights(normalized.columns())
        .ok_or_else(|| ElectreError::WeightMismatch {
            expected: normalized.columns().sorted(),
            found: criteria.names().sorted(),
        })?;

    Ok(WeightedMatrix::from_table(Table::from_fn(
        normalized.rows().clone(),
        normalized.columns().clone(),
        |i, j| normalized.at(i, j) * weights[j],
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outranking::criteria::{Criterion, Direction};
    use crate::outranking::matrix::DecisionMatrix;
    use crate::outranking::normalize::{normalize, NormalizationRule};

    fn normalized() -> NormalizedMatrix {
        let matrix = DecisionMatrix::new(
            ["a", "b", "c"],
            ["cost", "speed"],
            vec![vec![10.0, 1.0], vec![20.0, 3.0], vec![30.0, 2.0]],
        )
        .unwrap();
        normalize(&matrix, &criteria(), NormalizationRule::MinMax).unwrap()
    }

    fn criteria() -> Criteria {
        Criteria::new(vec![
            Criterion::new("speed", Direction::Maximize, 0.7),
            Criterion::new("cost", Direction::Minimize, 0.3),
        ])
        .unwrap()
    }

    #[test]
    fn test_each_cell_scaled_by_its_weight() {
        let n = normalized();
        let w = apply_weights(&n, &criteria()).unwrap();
        for (i, alt) in n.rows().iter().enumerate() {
            assert_eq!(w.get(alt, "cost").unwrap(), n.at(i, 0) * 0.3);
            assert_eq!(w.get(alt, "speed").unwrap(), n.at(i, 1) * 0.7);
        }
    }

    #[test]
    fn test_weight_keys_must_match_columns() {
        let n = normalized();
        let other = Criteria::new(vec![
            Criterion::new("speed", Direction::Maximize, 0.7),
            Criterion::new("weight", Direction::Minimize, 0.3),
        ])
        .unwrap();
        let err = apply_weights(&n, &other).unwrap_err();
        assert_eq!(
            err,
            ElectreError::WeightMismatch {
                expected: vec!["cost".to_string(), "speed".to_string()],
                found: vec!["speed".to_string(), "weight".to_string()],
            }
        );
    }

    #[test]
    fn test_weights_preserve_labels() {
        let n = normalized();
        let w = apply_weights(&n, &criteria()).unwrap();
        assert!(w.same_index(&*n));
    }
}
