use serde::Serialize;
use std::ops::Deref;

use super::dominance::BinaryMatrix;
use super::error::ElectreError;
use super::matrix::Table;

/// Final outranking relation: cell (a, b) is set when a outranks b.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OutrankingMatrix(Table<bool>);

impl Deref for OutrankingMatrix {
    type Target = Table<bool>;

    fn deref(&self) -> &Table<bool> {
        &self.0
    }
}

/// Per-alternative summary of the outranking relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeScore {
    pub alternative: String,
    /// How many alternatives this one outranks.
    pub outranks: usize,
    /// How many alternatives outrank this one.
    pub outranked_by: usize,
}

impl OutrankingMatrix {
    /// Row sum for `alternative`.
    pub fn outranks(&self, alternative: &str) -> Option<usize> {
        let i = self.0.rows().position(alternative)?;
        Some(self.0.row(i).iter().filter(|cell| **cell).count())
    }

    /// Column sum for `alternative`.
    pub fn outranked_by(&self, alternative: &str) -> Option<usize> {
        let j = self.0.columns().position(alternative)?;
        Some(self.0.column(j).filter(|cell| *cell).count())
    }

    /// Scores for every alternative, in input order.
    pub fn scores(&self) -> Vec<AlternativeScore> {
        self.0
            .rows()
            .iter()
            .enumerate()
            .map(|(i, alternative)| AlternativeScore {
                alternative: alternative.to_string(),
                outranks: self.0.row(i).iter().filter(|cell| **cell).count(),
                outranked_by: self.0.column(i).filter(|cell| *cell).count(),
            })
            .collect()
    }

    /// Alternatives no other alternative outranks.
    pub fn kernel(&self) -> Vec<String> {
        self.scores()
            .into_iter()
            .filter(|s| s.outranked_by == 0)
            .map(|s| s.alternative)
            .collect()
    }
}

/// Cell-wise AND of the concordant and discordant dominance matrices.
///
/// Both inputs must share the same alternatives. When the order differs the
/// discordant side is looked up by identifier; the result follows the
/// concordant ordering.
pub fn aggregate(concordant: &BinaryMatrix, discordant: &BinaryMatrix) -> Result<OutrankingMatrix, ElectreError> {
    let shape_error = ElectreError::ShapeMismatch {
        left: "concordant dominance",
        right: "discordant dominance",
    };
    if !concordant.rows().same_set(discordant.rows()) || !concordant.columns().same_set(discordant.columns()) {
        return Err(shape_error);
    }

    if concordant.same_index(&**discordant) {
        return Ok(OutrankingMatrix(Table::from_fn(
            concordant.rows().clone(),
            concordant.columns().clone(),
            |i, j| concordant.at(i, j) && discordant.at(i, j),
        )));
    }

    let rows: Vec<usize> = concordant
        .rows()
        .iter()
        .map(|id| discordant.rows().position(id))
        .collect::<Option<_>>()
        .ok_or_else(|| shape_error.clone())?;
    let columns: Vec<usize> = concordant
        .columns()
        .iter()
        .map(|id| discordant.columns().position(id))
        .collect::<Option<_>>()
        .ok_or(shape_error)?;

    Ok(OutrankingMatrix(Table::from_fn(
        concordant.rows().clone(),
        concordant.columns().clone(),
        |i, j| concordant.at(i, j) && discordant.at(rows[i], columns[j]),
    )))
}
