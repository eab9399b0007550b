use serde::Serialize;
use std::fmt;
use std::ops::Deref;
use tracing::{debug, warn};

use super::criteria::{Criteria, Direction};
use super::error::ElectreError;
use super::matrix::{DecisionMatrix, Table};

/// Column rescaling rules, identified by ids 1 to 4.
///
/// `MinMax` and `Ratio` encode the criterion direction so that higher is
/// always better afterwards. `Vector` and `ZScore` ignore directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationRule {
    /// `a / sqrt(sum(a^2))`
    Vector,
    /// `(a - lo) / (hi - lo)`, or `(hi - a) / (hi - lo)` when minimizing
    MinMax,
    /// `a / max`, or `min / a` when minimizing
    Ratio,
    /// `(a - mean) / std` with the population standard deviation
    ZScore,
}

impl NormalizationRule {
    pub const ALL: [NormalizationRule; 4] = [
        NormalizationRule::Vector,
        NormalizationRule::MinMax,
        NormalizationRule::Ratio,
        NormalizationRule::ZScore,
    ];

    pub fn from_id(id: u8) -> Result<Self, ElectreError> {
        match id {
            1 => Ok(NormalizationRule::Vector),
            2 => Ok(NormalizationRule::MinMax),
            3 => Ok(NormalizationRule::Ratio),
            4 => Ok(NormalizationRule::ZScore),
            other => Err(ElectreError::InvalidRule(other)),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            NormalizationRule::Vector => 1,
            NormalizationRule::MinMax => 2,
            NormalizationRule::Ratio => 3,
            NormalizationRule::ZScore => 4,
        }
    }

    pub fn is_direction_aware(self) -> bool {
        matches!(self, NormalizationRule::MinMax | NormalizationRule::Ratio)
    }
}

impl TryFrom<u8> for NormalizationRule {
    type Error = ElectreError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}

impl fmt::Display for NormalizationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NormalizationRule::Vector => "vector",
            NormalizationRule::MinMax => "min-max",
            NormalizationRule::Ratio => "ratio",
            NormalizationRule::ZScore => "z-score",
        };
        write!(f, "rule {} ({})", self.id(), name)
    }
}

/// Decision matrix after column rescaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMatrix {
    rule: NormalizationRule,
    #[serde(flatten)]
    table: Table<f64>,
}

impl NormalizedMatrix {
    pub(crate) fn from_parts(rule: NormalizationRule, table: Table<f64>) -> Self {
        Self { rule, table }
    }

    pub fn rule(&self) -> NormalizationRule {
        self.rule
    }
}

impl Deref for NormalizedMatrix {
    type Target = Table<f64>;

    fn deref(&self) -> &Table<f64> {
        &self.table
    }
}

/// Rescale every criterion column of `matrix` with `rule`.
///
/// Every matrix column needs a direction in `criteria`, even for rules that
/// ignore it. Zero or overflowing denominators are reported as
/// [`ElectreError::DegenerateColumn`] rather than producing NaN or infinity.
pub fn normalize(
    matrix: &DecisionMatrix,
    criteria: &Criteria,
    rule: NormalizationRule,
) -> Result<NormalizedMatrix, ElectreError> {
    let missing = criteria.missing_directions(matrix.criteria());
    if !missing.is_empty() {
        return Err(ElectreError::DirectionCount { missing });
    }

    if !rule.is_direction_aware() {
        warn!("normalization {} does not take MIN/MAX criteria into account", rule);
    }

    let mut columns = Vec::with_capacity(matrix.n_columns());
    for (j, name) in matrix.criteria().iter().enumerate() {
        let values: Vec<f64> = matrix.column(j).collect();
        let direction = criteria.direction(name).unwrap_or(Direction::Maximize);
        let scaled = normalize_column(&values, direction, rule).map_err(|reason| {
            ElectreError::DegenerateColumn {
                criterion: name.to_string(),
                rule,
                reason,
            }
        })?;
        columns.push(scaled);
    }

    debug!(
        alternatives = matrix.n_rows(),
        criteria = matrix.n_columns(),
        %rule,
        "normalized decision matrix"
    );

    let table = Table::from_fn(matrix.rows().clone(), matrix.columns().clone(), |i, j| columns[j][i]);
    Ok(NormalizedMatrix::from_parts(rule, table))
}

fn normalize_column(
    values: &[f64],
    direction: Direction,
    rule: NormalizationRule,
) -> Result<Vec<f64>, &'static str> {
    let scaled = scale_column(values, direction, rule)?;
    if scaled.iter().all(|x| x.is_finite()) {
        Ok(scaled)
    } else {
        Err("normalized value is not finite")
    }
}

fn scale_column(
    values: &[f64],
    direction: Direction,
    rule: NormalizationRule,
) -> Result<Vec<f64>, &'static str> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    match rule {
        NormalizationRule::Vector => {
            let norm = values.iter().map(|a| a * a).sum::<f64>().sqrt();
            if norm == 0.0 {
                return Err("column is all zeros");
            }
            if !norm.is_finite() {
                return Err("column norm overflows");
            }
            Ok(values.iter().map(|a| a / norm).collect())
        }
        NormalizationRule::MinMax => {
            let range = hi - lo;
            if range == 0.0 {
                return Err("column is constant");
            }
            if !range.is_finite() {
                return Err("column range overflows");
            }
            Ok(match direction {
                Direction::Maximize => values.iter().map(|a| (a - lo) / range).collect(),
                Direction::Minimize => values.iter().map(|a| (hi - a) / range).collect(),
            })
        }
        NormalizationRule::Ratio => match direction {
            Direction::Maximize => {
                if hi == 0.0 {
                    return Err("column maximum is zero");
                }
                Ok(values.iter().map(|a| a / hi).collect())
            }
            Direction::Minimize => {
                if values.iter().any(|a| *a == 0.0) {
                    return Err("column contains a zero");
                }
                Ok(values.iter().map(|a| lo / a).collect())
            }
        },
        NormalizationRule::ZScore => {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / n;
            if !mean.is_finite() || !variance.is_finite() {
                return Err("column mean or variance overflows");
            }
            // Constant columns scale by 1, leaving all zeros.
            let std = match variance.sqrt() {
                s if s == 0.0 => 1.0,
                s => s,
            };
            Ok(values.iter().map(|a| (a - mean) / std).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outranking::criteria::Criterion;

    fn phones() -> DecisionMatrix {
        DecisionMatrix::new(
            ["p1", "p2", "p3", "p4"],
            ["price", "battery"],
            vec![
                vec![200.0, 3000.0],
                vec![400.0, 4000.0],
                vec![300.0, 5000.0],
                vec![600.0, 3500.0],
            ],
        )
        .unwrap()
    }

    fn criteria() -> Criteria {
        Criteria::new(vec![
            Criterion::new("price", Direction::Minimize, 0.5),
            Criterion::new("battery", Direction::Maximize, 0.5),
        ])
        .unwrap()
    }

    fn column(matrix: &NormalizedMatrix, name: &str) -> Vec<f64> {
        let j = matrix.columns().position(name).unwrap();
        matrix.column(j).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_rule_ids_round_trip() {
        for rule in NormalizationRule::ALL {
            assert_eq!(NormalizationRule::from_id(rule.id()).unwrap(), rule);
        }
    }

    #[test]
    fn test_invalid_rule_ids() {
        assert_eq!(NormalizationRule::from_id(0), Err(ElectreError::InvalidRule(0)));
        assert_eq!(NormalizationRule::try_from(5u8), Err(ElectreError::InvalidRule(5)));
    }

    #[test]
    fn test_vector_rule_unit_norm_columns() {
        let n = normalize(&phones(), &criteria(), NormalizationRule::Vector).unwrap();
        for j in 0..n.n_columns() {
            let norm: f64 = n.column(j).map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
        // Direction is ignored: the cheapest phone keeps the smallest value.
        let price = column(&n, "price");
        assert!(price[0] < price[3]);
    }

    #[test]
    fn test_min_max_rule_direction_aware() {
        let n = normalize(&phones(), &criteria(), NormalizationRule::MinMax).unwrap();
        assert_close(&column(&n, "price"), &[1.0, 0.5, 0.75, 0.0]);
        assert_close(&column(&n, "battery"), &[0.0, 0.5, 1.0, 0.25]);
    }

    #[test]
    fn test_min_max_rule_spans_unit_interval() {
        let n = normalize(&phones(), &criteria(), NormalizationRule::MinMax).unwrap();
        for j in 0..n.n_columns() {
            let lo = n.column(j).fold(f64::INFINITY, f64::min);
            let hi = n.column(j).fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(lo, 0.0);
            assert_eq!(hi, 1.0);
        }
    }

    #[test]
    fn test_min_max_rule_constant_column_is_degenerate() {
        let matrix = DecisionMatrix::new(
            ["a", "b"],
            ["price", "battery"],
            vec![vec![100.0, 1.0], vec![100.0, 2.0]],
        )
        .unwrap();
        let err = normalize(&matrix, &criteria(), NormalizationRule::MinMax).unwrap_err();
        assert!(matches!(
            err,
            ElectreError::DegenerateColumn { ref criterion, rule: NormalizationRule::MinMax, .. }
                if criterion == "price"
        ));
    }

    #[test]
    fn test_ratio_rule_direction_aware() {
        let n = normalize(&phones(), &criteria(), NormalizationRule::Ratio).unwrap();
        assert_close(&column(&n, "price"), &[1.0, 0.5, 200.0 / 300.0, 200.0 / 600.0]);
        assert_close(&column(&n, "battery"), &[0.6, 0.8, 1.0, 0.7]);
    }

    #[test]
    fn test_ratio_rule_zero_under_minimize_is_degenerate() {
        let matrix = DecisionMatrix::new(
            ["a", "b"],
            ["price", "battery"],
            vec![vec![0.0, 1.0], vec![100.0, 2.0]],
        )
        .unwrap();
        let err = normalize(&matrix, &criteria(), NormalizationRule::Ratio).unwrap_err();
        assert!(matches!(err, ElectreError::DegenerateColumn { .. }));
    }

    fn degenerate_criterion(rows: Vec<Vec<f64>>, rule: NormalizationRule) -> String {
        let matrix = DecisionMatrix::new(["a", "b", "c"][..rows.len()].to_vec(), ["price", "battery"], rows).unwrap();
        match normalize(&matrix, &criteria(), rule).unwrap_err() {
            ElectreError::DegenerateColumn { criterion, rule: r, .. } => {
                assert_eq!(r, rule);
                criterion
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_vector_rule_zero_column_is_degenerate() {
        let criterion = degenerate_criterion(vec![vec![0.0, 1.0], vec![0.0, 2.0]], NormalizationRule::Vector);
        assert_eq!(criterion, "price");
    }

    #[test]
    fn test_ratio_rule_zero_max_is_degenerate() {
        let criterion = degenerate_criterion(vec![vec![1.0, 0.0], vec![2.0, -2.0]], NormalizationRule::Ratio);
        assert_eq!(criterion, "battery");
    }

    #[test]
    fn test_vector_rule_overflowing_norm_is_degenerate() {
        let criterion = degenerate_criterion(vec![vec![1.0, 1e200], vec![2.0, 2e200]], NormalizationRule::Vector);
        assert_eq!(criterion, "battery");
    }

    #[test]
    fn test_min_max_rule_overflowing_range_is_degenerate() {
        let criterion = degenerate_criterion(
            vec![vec![-1e308, 1.0], vec![1e308, 2.0], vec![0.0, 3.0]],
            NormalizationRule::MinMax,
        );
        assert_eq!(criterion, "price");
    }

    #[test]
    fn test_z_score_rule_overflowing_variance_is_degenerate() {
        let criterion = degenerate_criterion(
            vec![vec![-1e308, 1.0], vec![1e308, 2.0], vec![0.0, 3.0]],
            NormalizationRule::ZScore,
        );
        assert_eq!(criterion, "price");
    }

    #[test]
    fn test_z_score_rule_population_std() {
        let n = normalize(&phones(), &criteria(), NormalizationRule::ZScore).unwrap();
        // price: mean 375, population std sqrt(21875)
        let std = 21875.0_f64.sqrt();
        assert_close(
            &column(&n, "price"),
            &[-175.0 / std, 25.0 / std, -75.0 / std, 225.0 / std],
        );
        for j in 0..n.n_columns() {
            let mean: f64 = n.column(j).sum::<f64>() / 4.0;
            let var: f64 = n.column(j).map(|x| (x - mean).powi(2)).sum::<f64>() / 4.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_z_score_rule_constant_column_is_zero() {
        let matrix = DecisionMatrix::new(
            ["a", "b"],
            ["price", "battery"],
            vec![vec![7.0, 1.0], vec![7.0, 2.0]],
        )
        .unwrap();
        let n = normalize(&matrix, &criteria(), NormalizationRule::ZScore).unwrap();
        assert_eq!(column(&n, "price"), vec![0.0, 0.0]);
    }

    #[test]
    fn test_missing_direction_is_rejected() {
        let only_price = Criteria::new(vec![Criterion::new("price", Direction::Minimize, 1.0)]).unwrap();
        let err = normalize(&phones(), &only_price, NormalizationRule::Vector).unwrap_err();
        assert_eq!(
            err,
            ElectreError::DirectionCount {
                missing: vec!["battery".to_string()]
            }
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let matrix = phones();
        let before = matrix.clone();
        let _ = normalize(&matrix, &criteria(), NormalizationRule::MinMax).unwrap();
        assert_eq!(matrix, before);
    }
}
