use thiserror::Error;

use super::normalize::NormalizationRule;

/// Errors raised by the outranking pipeline.
///
/// Every check happens before the stage that needs it produces any output,
/// so a failing call never hands back a partially filled matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElectreError {
    #[error("unsupported normalization rule {0}; expected a rule id from 1 to 4")]
    InvalidRule(u8),

    #[error("weights {found:?} do not match the matrix criteria {expected:?}")]
    WeightMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("criteria {found:?} do not match the matrix columns {expected:?}")]
    CriteriaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("cannot combine {left} with {right}: row or column labels differ")]
    ShapeMismatch {
        left: &'static str,
        right: &'static str,
    },

    #[error("criterion weights sum to {sum}, expected 1")]
    WeightSum { sum: f64 },

    #[error("no optimization direction given for criteria {missing:?}")]
    DirectionCount { missing: Vec<String> },

    #[error("criterion '{criterion}' cannot be normalized with {rule}: {reason}")]
    DegenerateColumn {
        criterion: String,
        rule: NormalizationRule,
        reason: &'static str,
    },

    #[error("criterion '{criterion}' has negative weight {weight}")]
    NegativeWeight { criterion: String, weight: f64 },

    #[error("alternative '{0}' appears more than once")]
    DuplicateAlternative(String),

    #[error("criterion '{0}' appears more than once")]
    DuplicateCriterion(String),

    #[error("row '{row}' has {found} values, expected {expected}")]
    RaggedRow {
        row: String,
        expected: usize,
        found: usize,
    },

    #[error("score of '{alternative}' on '{criterion}' is not a finite number")]
    NonFinite {
        alternative: String,
        criterion: String,
    },

    #[error("decision matrix needs at least one alternative and one criterion")]
    EmptyMatrix,
}
