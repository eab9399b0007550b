use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ElectreError;
use super::matrix::{approx_eq, Labels};

/// Optimization direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "max", alias = "maximise")]
    Maximize,
    #[serde(alias = "min", alias = "minimise")]
    Minimize,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Maximize => write!(f, "max"),
            Direction::Minimize => write!(f, "min"),
        }
    }
}

/// A dimension of comparison with its direction and weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    pub name: String,
    pub direction: Direction,
    pub weight: f64,
}

impl Criterion {
    pub fn new(name: impl Into<String>, direction: Direction, weight: f64) -> Self {
        Self {
            name: name.into(),
            direction,
            weight,
        }
    }
}

/// Validated criterion configuration keyed by criterion identifier.
///
/// Construction fails fast: identifiers are unique, weights are
/// non-negative and sum to 1 within [`approx_eq`] tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criteria {
    names: Labels,
    criteria: Vec<Criterion>,
}

impl Criteria {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, ElectreError> {
        let names = Labels::try_from_iter(criteria.iter().map(|c| c.name.clone()))
            .map_err(ElectreError::DuplicateCriterion)?;

        if let Some(c) = criteria.iter().find(|c| !c.weight.is_finite() || c.weight < 0.0) {
            return Err(ElectreError::NegativeWeight {
                criterion: c.name.clone(),
                weight: c.weight,
            });
        }

        let sum: f64 = criteria.iter().map(|c| c.weight).sum();
        if !approx_eq(sum, 1.0) {
            return Err(ElectreError::WeightSum { sum });
        }

        Ok(Self { names, criteria })
    }

    pub fn names(&self) -> &Labels {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> + '_ {
        self.criteria.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Criterion> {
        self.names.position(name).map(|i| &self.criteria[i])
    }

    pub fn direction(&self, name: &str) -> Option<Direction> {
        self.get(name).map(|c| c.direction)
    }

    pub fn weight(&self, name: &str) -> Option<f64> {
        self.get(name).map(|c| c.weight)
    }

    /// Matrix columns with no configured direction.
    pub(crate) fn missing_directions(&self, columns: &Labels) -> Vec<String> {
        columns
            .iter()
            .filter(|c| !self.names.contains(c))
            .map(str::to_string)
            .collect()
    }

    /// Weights aligned with `columns`, or `None` unless both key sets are equal.
    pub(crate) fn aligned_weights(&self, columns: &Labels) -> Option<Vec<f64>> {
        if !self.names.same_set(columns) {
            return None;
        }
        columns.iter().map(|c| self.weight(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_criteria() -> Vec<Criterion> {
        vec![
            Criterion::new("price", Direction::Minimize, 3.0 / 11.5),
            Criterion::new("storage", Direction::Maximize, 1.0 / 11.5),
            Criterion::new("camera", Direction::Maximize, 2.5 / 11.5),
            Criterion::new("looks", Direction::Maximize, 1.5 / 11.5),
            Criterion::new("battery", Direction::Maximize, 3.5 / 11.5),
        ]
    }

    #[test]
    fn test_fractional_weights_sum_to_one() {
        let criteria = Criteria::new(phone_criteria()).unwrap();
        assert_eq!(criteria.len(), 5);
        assert_eq!(criteria.direction("price"), Some(Direction::Minimize));
        assert!((criteria.weight("battery").unwrap() - 3.5 / 11.5).abs() < 1e-12);
    }

    #[test]
    fn test_weight_sum_error() {
        let err = Criteria::new(vec![
            Criterion::new("a", Direction::Maximize, 0.5),
            Criterion::new("b", Direction::Maximize, 0.4),
        ])
        .unwrap_err();
        assert!(matches!(err, ElectreError::WeightSum { sum } if (sum - 0.9).abs() < 1e-12));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = Criteria::new(vec![
            Criterion::new("a", Direction::Maximize, 1.5),
            Criterion::new("b", Direction::Maximize, -0.5),
        ])
        .unwrap_err();
        assert!(matches!(err, ElectreError::NegativeWeight { ref criterion, .. } if criterion == "b"));
    }

    #[test]
    fn test_duplicate_criterion_rejected() {
        let err = Criteria::new(vec![
            Criterion::new("a", Direction::Maximize, 0.5),
            Criterion::new("a", Direction::Minimize, 0.5),
        ])
        .unwrap_err();
        assert_eq!(err, ElectreError::DuplicateCriterion("a".to_string()));
    }

    #[test]
    fn test_aligned_weights_follow_column_order() {
        let criteria = Criteria::new(vec![
            Criterion::new("a", Direction::Maximize, 0.25),
            Criterion::new("b", Direction::Minimize, 0.75),
        ])
        .unwrap();
        let columns = Labels::try_from_iter(["b", "a"]).unwrap();
        assert_eq!(criteria.aligned_weights(&columns), Some(vec![0.75, 0.25]));

        let other = Labels::try_from_iter(["a", "c"]).unwrap();
        assert_eq!(criteria.aligned_weights(&other), None);
        assert_eq!(criteria.missing_directions(&other), vec!["c".to_string()]);
    }

    #[test]
    fn test_direction_parses_short_and_long_forms() {
        let short: Direction = serde_json::from_str("\"min\"").unwrap();
        let long: Direction = serde_json::from_str("\"maximize\"").unwrap();
        assert_eq!(short, Direction::Minimize);
        assert_eq!(long, Direction::Maximize);
    }
}
